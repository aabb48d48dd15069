//! Uploads one generated lorem-ipsum object to `BUCKET_NAME` and prints the
//! structured result as JSON.

use std::process::ExitCode;

use rand::rngs::StdRng;
use rand::SeedableRng;

use pdf_converter::config::UploaderConfig;
use pdf_converter::sample_upload::handle_event;
use pdf_converter::storage::S3Store;

#[tokio::main]
async fn main() -> ExitCode {
    let config = UploaderConfig::from_env();
    pdf_converter::init_tracing(&config.rust_log);

    let store = S3Store::from_settings(&config.s3).await;
    let mut rng = StdRng::from_entropy();
    let now = chrono::Local::now().naive_local();

    let result = handle_event(&store, &config.bucket_name, &mut rng, now).await;
    match serde_json::to_string_pretty(&result) {
        Ok(json) => println!("{json}"),
        Err(e) => eprintln!("failed to serialize result: {e}"),
    }

    if result.status_code == 200 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
