//! Fetch → layout → store orchestration shared by every entry point.

use bytes::Bytes;
use serde::Deserialize;
use tracing::info;

use crate::config::optional_env;
use crate::errors::ConvertError;
use crate::layout::{text_to_pdf, PageConfig};
use crate::storage::{ObjectStore, PutObject};

pub const PDF_CONTENT_TYPE: &str = "application/pdf";

/// Source and destination of one conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferRequest {
    pub source_bucket: String,
    pub object_key: String,
    pub dest_bucket: String,
}

/// Wire shape of a conversion request; every field may be absent.
#[derive(Debug, Default, Deserialize)]
pub struct TransferParams {
    pub source_bucket: Option<String>,
    pub object_key: Option<String>,
    pub dest_bucket: Option<String>,
}

impl TransferParams {
    /// Reads `SOURCE_BUCKET`, `OBJECT_KEY` and `DEST_BUCKET`.
    pub fn from_env() -> Self {
        TransferParams {
            source_bucket: optional_env("SOURCE_BUCKET"),
            object_key: optional_env("OBJECT_KEY"),
            dest_bucket: optional_env("DEST_BUCKET"),
        }
    }

    /// Fails with the names of every missing or empty field.
    pub fn validate(self, names: [&'static str; 3]) -> Result<TransferRequest, ConvertError> {
        fn present(value: Option<String>) -> Option<String> {
            value.filter(|v| !v.is_empty())
        }

        match (
            present(self.source_bucket),
            present(self.object_key),
            present(self.dest_bucket),
        ) {
            (Some(source_bucket), Some(object_key), Some(dest_bucket)) => Ok(TransferRequest {
                source_bucket,
                object_key,
                dest_bucket,
            }),
            (source, key, dest) => {
                let missing = [source.is_none(), key.is_none(), dest.is_none()]
                    .into_iter()
                    .zip(names)
                    .filter_map(|(is_missing, name)| is_missing.then_some(name))
                    .collect();
                Err(ConvertError::ParameterMissing(missing))
            }
        }
    }
}

/// Derives the destination key: the last `.`-suffix is replaced by `.pdf`,
/// keys without a dot just gain the suffix.
pub fn output_key_for(input_key: &str) -> String {
    let base = input_key
        .rsplit_once('.')
        .map_or(input_key, |(base, _)| base);
    format!("{base}.pdf")
}

/// Downloads the source object, renders it as PDF and uploads the result.
/// Returns the destination key. Any failure aborts before the upload.
pub async fn transfer(
    store: &dyn ObjectStore,
    config: &PageConfig,
    request: &TransferRequest,
) -> Result<String, ConvertError> {
    let TransferRequest {
        source_bucket,
        object_key,
        dest_bucket,
    } = request;

    info!("Downloading {} from {}", object_key, source_bucket);
    let raw = store.get(source_bucket, object_key).await?;
    let text = String::from_utf8(raw.to_vec())?;

    info!("Converting to PDF...");
    let cfg = config.clone();
    let (pdf, stats) = tokio::task::spawn_blocking(move || text_to_pdf(&text, &cfg))
        .await
        .map_err(|e| anyhow::anyhow!("spawn_blocking failed in layout: {e}"))?
        .map_err(anyhow::Error::from)?;
    info!(
        pages = stats.pages,
        lines = stats.lines,
        blank_lines = stats.blank_lines,
        bytes = pdf.len(),
        "Layout complete"
    );

    let output_key = output_key_for(object_key);
    info!("Uploading {} to {}", output_key, dest_bucket);
    store
        .put(PutObject {
            bucket: dest_bucket.clone(),
            key: output_key.clone(),
            body: Bytes::from(pdf),
            content_type: PDF_CONTENT_TYPE.to_string(),
            metadata: Default::default(),
        })
        .await?;

    info!("Successfully converted and uploaded {}", output_key);
    Ok(output_key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;
    use crate::layout::render::tests::read_pages;
    use crate::storage::{MemoryStore, StoreError};

    const NAMES: [&str; 3] = ["source_bucket", "object_key", "dest_bucket"];

    fn request(key: &str) -> TransferRequest {
        TransferRequest {
            source_bucket: "incoming".into(),
            object_key: key.into(),
            dest_bucket: "converted".into(),
        }
    }

    #[test]
    fn test_output_key_replaces_last_extension() {
        assert_eq!(output_key_for("notes.txt"), "notes.pdf");
        assert_eq!(output_key_for("notes"), "notes.pdf");
        assert_eq!(output_key_for("archive.tar.gz"), "archive.tar.pdf");
        assert_eq!(output_key_for("dir/report.md"), "dir/report.pdf");
    }

    #[test]
    fn test_validate_reports_every_missing_field() {
        let params = TransferParams {
            source_bucket: Some("a".into()),
            object_key: Some(String::new()),
            dest_bucket: None,
        };
        match params.validate(NAMES) {
            Err(ConvertError::ParameterMissing(missing)) => {
                assert_eq!(missing, vec!["object_key", "dest_bucket"]);
            }
            other => panic!("expected ParameterMissing, got {other:?}"),
        }
    }

    #[test]
    fn test_validate_accepts_complete_params() {
        let params = TransferParams {
            source_bucket: Some("incoming".into()),
            object_key: Some("notes.txt".into()),
            dest_bucket: Some("converted".into()),
        };
        assert_eq!(params.validate(NAMES).unwrap(), request("notes.txt"));
    }

    #[tokio::test]
    async fn test_transfer_uploads_pdf() {
        let store = MemoryStore::new();
        store.insert("incoming", "notes.txt", "Hello world");

        let key = transfer(&store, &PageConfig::letter(), &request("notes.txt"))
            .await
            .unwrap();
        assert_eq!(key, "notes.pdf");

        let object = store.object("converted", "notes.pdf").expect("uploaded");
        assert_eq!(object.content_type, PDF_CONTENT_TYPE);
        assert_eq!(
            read_pages(&object.body),
            vec![vec![("Hello world".to_string(), 742.0)]]
        );
    }

    #[tokio::test]
    async fn test_transfer_twice_is_byte_identical() {
        let store = MemoryStore::new();
        store.insert("incoming", "story", "Once upon a time.\n\nThe end.\n");
        let config = PageConfig::letter();

        transfer(&store, &config, &request("story")).await.unwrap();
        let first = store.object("converted", "story.pdf").unwrap().body;
        transfer(&store, &config, &request("story")).await.unwrap();
        let second = store.object("converted", "story.pdf").unwrap().body;

        assert_eq!(first, second);
        assert_eq!(store.put_count(), 2);
    }

    #[tokio::test]
    async fn test_missing_source_aborts_without_upload() {
        let store = MemoryStore::new();
        let err = transfer(&store, &PageConfig::letter(), &request("absent.txt"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::RemoteIo);
        assert!(matches!(
            err,
            ConvertError::RemoteIo(StoreError::NotFound { .. })
        ));
        assert_eq!(store.put_count(), 0);
    }

    #[tokio::test]
    async fn test_invalid_utf8_is_a_decoding_error() {
        let store = MemoryStore::new();
        store.insert("incoming", "bad.txt", vec![0x66, 0x6f, 0xff, 0xfe]);
        let err = transfer(&store, &PageConfig::letter(), &request("bad.txt"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Decoding);
        assert_eq!(store.put_count(), 0);
    }

    #[tokio::test]
    async fn test_denied_destination_is_remote_io() {
        let store = MemoryStore::new().deny_bucket("converted");
        store.insert("incoming", "notes.txt", "text");
        let err = transfer(&store, &PageConfig::letter(), &request("notes.txt"))
            .await
            .unwrap_err();
        assert!(matches!(err, ConvertError::RemoteIo(StoreError::Access(_))));
    }
}
