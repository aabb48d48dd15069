pub mod convert;
pub mod health;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, HttpMakeClassifier, TraceLayer};
use tracing::Level;

use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/convert", post(convert::handle_convert))
        .with_state(state)
}

/// Request tracing at INFO, so spans and responses pass the default
/// `tower_http=info` filter.
pub fn http_trace_layer(
) -> TraceLayer<HttpMakeClassifier, DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse> {
    TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_request(DefaultOnRequest::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::layout::PageConfig;
    use crate::storage::MemoryStore;

    fn router_with(store: Arc<MemoryStore>) -> Router {
        build_router(AppState::new(store, PageConfig::letter()))
    }

    async fn post_json(app: Router, body: String) -> (StatusCode, Value) {
        let response = app
            .oneshot(
                Request::post("/convert")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_convert_success() {
        let store = Arc::new(MemoryStore::new());
        store.insert("in", "letter.txt", "Dear reader,\n\nHello world");

        let body = json!({
            "source_bucket": "in",
            "object_key": "letter.txt",
            "dest_bucket": "out"
        });
        let (status, value) = post_json(router_with(store.clone()), body.to_string()).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            value,
            json!({
                "status": "success",
                "message": "Conversion completed",
                "output_key": "letter.pdf"
            })
        );
        assert!(store.object("out", "letter.pdf").is_some());
    }

    #[tokio::test]
    async fn test_missing_parameter_is_400() {
        let store = Arc::new(MemoryStore::new());
        let body = json!({ "source_bucket": "in", "object_key": "letter.txt" });
        let (status, value) = post_json(router_with(store.clone()), body.to_string()).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(value["status"], "error");
        assert_eq!(value["error"], "PARAMETER_MISSING");
        assert!(value["message"].as_str().unwrap().contains("dest_bucket"));
        assert_eq!(store.put_count(), 0);
    }

    #[tokio::test]
    async fn test_empty_string_parameter_is_400() {
        let body = json!({ "source_bucket": "", "object_key": "k", "dest_bucket": "out" });
        let (status, value) =
            post_json(router_with(Arc::new(MemoryStore::new())), body.to_string()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(value["message"].as_str().unwrap().contains("source_bucket"));
    }

    #[tokio::test]
    async fn test_malformed_body_is_400() {
        let (status, value) = post_json(
            router_with(Arc::new(MemoryStore::new())),
            "{not json".to_string(),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(value["error"], "BAD_REQUEST");
    }

    #[tokio::test]
    async fn test_missing_source_object_is_500() {
        let store = Arc::new(MemoryStore::new());
        let body = json!({
            "source_bucket": "in",
            "object_key": "absent.txt",
            "dest_bucket": "out"
        });
        let (status, value) = post_json(router_with(store.clone()), body.to_string()).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(value["status"], "error");
        assert_eq!(value["error"], "REMOTE_IO_ERROR");
        assert_eq!(store.put_count(), 0);
    }

    #[tokio::test]
    async fn test_health() {
        let response = router_with(Arc::new(MemoryStore::new()))
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(value["status"], "ok");
        assert_eq!(value["service"], "pdf-converter-api");
    }

    #[derive(Clone, Default)]
    struct SpanRecorder(Arc<std::sync::Mutex<Vec<String>>>);

    impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for SpanRecorder {
        fn on_new_span(
            &self,
            attrs: &tracing::span::Attributes<'_>,
            _id: &tracing::span::Id,
            _ctx: tracing_subscriber::layer::Context<'_, S>,
        ) {
            if let Ok(mut names) = self.0.lock() {
                names.push(attrs.metadata().name().to_string());
            }
        }
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_request_spans_pass_info_filter() {
        use tracing_subscriber::{layer::SubscriberExt, EnvFilter, Layer};

        let recorder = SpanRecorder::default();
        let subscriber = tracing_subscriber::registry()
            .with(recorder.clone().with_filter(EnvFilter::new("tower_http=info")));
        let _guard = tracing::subscriber::set_default(subscriber);

        let response = router_with(Arc::new(MemoryStore::new()))
            .layer(http_trace_layer())
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let names = recorder.0.lock().unwrap().clone();
        assert!(names.iter().any(|n| n == "request"), "spans: {names:?}");
    }
}
