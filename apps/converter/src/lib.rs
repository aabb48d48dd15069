//! Text-to-PDF conversion between object-store buckets.
//!
//! Three front ends share this library: the `pdf-converter` CLI, the
//! `pdf-converter-api` HTTP service and the `upload-test-file` generator.

pub mod cli;
pub mod config;
pub mod errors;
pub mod layout;
pub mod routes;
pub mod sample_upload;
pub mod state;
pub mod storage;
pub mod transfer;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initializes structured logging, scoped to this crate at `level` unless
/// `RUST_LOG` holds a full filter directive.
pub fn init_tracing(level: &str) {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={level},tower_http={level}",
                env!("CARGO_CRATE_NAME")
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();
}
