//! One-shot conversion driven by `SOURCE_BUCKET`, `OBJECT_KEY` and `DEST_BUCKET`.

use std::process::ExitCode;

use pdf_converter::cli;
use pdf_converter::config::{log_level, S3Settings};
use pdf_converter::layout::PageConfig;
use pdf_converter::storage::S3Store;
use pdf_converter::transfer::TransferParams;

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    pdf_converter::init_tracing(&log_level());

    let store = S3Store::from_settings(&S3Settings::from_env()).await;
    let outcome = cli::run(TransferParams::from_env(), &store, &PageConfig::letter()).await;
    outcome.report();
    outcome.exit_code()
}
