//! Test-data generator: uploads a lorem-ipsum text object with fixed metadata
//! so the converter has something to chew on.

use std::collections::BTreeMap;

use bytes::Bytes;
use chrono::NaiveDateTime;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;
use serde_json::{json, Value};
use tracing::{error, info};

use crate::storage::{ObjectStore, PutObject};

pub const WORD_COUNT: usize = 150;

const LOREM_WORDS: [&str; 62] = [
    "lorem", "ipsum", "dolor", "sit", "amet", "consectetur", "adipiscing", "elit", "sed", "do",
    "eiusmod", "tempor", "incididunt", "ut", "labore", "et", "dolore", "magna", "aliqua", "enim",
    "ad", "minim", "veniam", "quis", "nostrud", "exercitation", "ullamco", "laboris", "nisi",
    "aliquip", "ex", "ea", "commodo", "consequat", "duis", "aute", "irure", "in",
    "reprehenderit", "voluptate", "velit", "esse", "cillum", "fugiat", "nulla", "pariatur",
    "excepteur", "sint", "occaecat", "cupidatat", "non", "proident", "sunt", "culpa", "qui",
    "officia", "deserunt", "mollit", "anim", "id", "est", "laborum",
];

/// Metadata attached to every generated object.
pub fn upload_metadata() -> BTreeMap<String, String> {
    [
        ("customer", "AnyCompany"),
        ("processor-type", "pool"),
        ("output-destination", "batch-poc-output-bucket-123456789101"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

/// Builds `word_count` random lorem words: space separated, first letter
/// upper-cased, terminated by a period.
pub fn generate_lorem_ipsum<R: Rng + ?Sized>(rng: &mut R, word_count: usize) -> String {
    let words: Vec<&str> = (0..word_count)
        .filter_map(|_| LOREM_WORDS.choose(rng).copied())
        .collect();
    let mut text = capitalize(&words.join(" "));
    text.push('.');
    text
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// `test_file_YYYYMMDD_HHMMSS.txt`
pub fn object_key_at(now: NaiveDateTime) -> String {
    format!("test_file_{}.txt", now.format("%Y%m%d_%H%M%S"))
}

/// Structured outcome of one invocation.
#[derive(Debug, Clone, Serialize)]
pub struct EventResult {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub body: Value,
}

/// Generates a payload and writes it to `bucket`. Failures are reported in
/// the result rather than propagated.
pub async fn handle_event<R: Rng + ?Sized>(
    store: &dyn ObjectStore,
    bucket: &str,
    rng: &mut R,
    now: NaiveDateTime,
) -> EventResult {
    info!("output bucket: {}", bucket);

    let content = generate_lorem_ipsum(rng, WORD_COUNT);
    info!("Generated content: {}", content);

    let key = object_key_at(now);
    let metadata = upload_metadata();

    if bucket.is_empty() {
        error!("BUCKET_NAME is not configured");
        return failure("Missing required configuration: BUCKET_NAME");
    }

    let size = content.chars().count();
    let upload = store
        .put(PutObject {
            bucket: bucket.to_string(),
            key: key.clone(),
            body: Bytes::from(content),
            content_type: "text/plain".to_string(),
            metadata: metadata.clone(),
        })
        .await;

    match upload {
        Ok(()) => {
            info!("Uploaded s3://{}/{}", bucket, key);
            EventResult {
                status_code: 200,
                body: json!({
                    "message": format!("Successfully uploaded {key}"),
                    "bucket": bucket,
                    "key": key,
                    "size": size,
                    "metadata": metadata,
                }),
            }
        }
        Err(e) => {
            error!("Upload failed: {e}");
            failure(&e.to_string())
        }
    }
}

fn failure(message: &str) -> EventResult {
    EventResult {
        status_code: 500,
        body: json!({ "error": message }),
    }
}
