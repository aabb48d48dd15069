//! One-shot conversion driven by environment variables.

use std::process::ExitCode;

use tracing::error;

use crate::errors::{ConvertError, ErrorKind};
use crate::layout::PageConfig;
use crate::storage::ObjectStore;
use crate::transfer::{transfer, TransferParams};

pub const ENV_NAMES: [&str; 3] = ["SOURCE_BUCKET", "OBJECT_KEY", "DEST_BUCKET"];

/// Result of one CLI run.
#[derive(Debug)]
pub enum CliOutcome {
    Completed(String),
    MissingVariables(ConvertError),
    Failed(ConvertError),
}

impl CliOutcome {
    /// Process exit status: 0 on success, 1 on any failure.
    pub fn exit_status(&self) -> u8 {
        match self {
            CliOutcome::Completed(_) => 0,
            CliOutcome::MissingVariables(_) | CliOutcome::Failed(_) => 1,
        }
    }

    pub fn exit_code(&self) -> ExitCode {
        ExitCode::from(self.exit_status())
    }

    /// Line reported to the user.
    pub fn message(&self) -> String {
        match self {
            CliOutcome::Completed(key) => format!("Conversion completed: {key}"),
            CliOutcome::MissingVariables(e) => format!(
                "Missing required environment variables: {} ({e})",
                ENV_NAMES.join(", ")
            ),
            CliOutcome::Failed(e) => format!("Conversion failed: {e}"),
        }
    }

    /// Prints the message to stdout on success, stderr otherwise.
    pub fn report(&self) {
        match self {
            CliOutcome::Completed(_) => println!("{}", self.message()),
            _ => eprintln!("{}", self.message()),
        }
    }
}

/// Validates `params` and runs one transfer against `store`. The store is
/// never touched when a variable is missing.
pub async fn run(params: TransferParams, store: &dyn ObjectStore, config: &PageConfig) -> CliOutcome {
    let request = match params.validate(ENV_NAMES) {
        Ok(request) => request,
        Err(e) => return CliOutcome::MissingVariables(e),
    };

    match transfer(store, config, &request).await {
        Ok(output_key) => CliOutcome::Completed(output_key),
        Err(e) => {
            if e.kind() == ErrorKind::Unknown {
                error!("Unexpected failure: {e:?}");
            }
            CliOutcome::Failed(e)
        }
    }
}
