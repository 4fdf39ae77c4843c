//! Blog Trigger Handlers
//!
//! 两种触发形式：
//! - `/api/blog/generate`: HTTP body 就是请求 JSON
//! - `/api/invoke`: `{"body": "<json text>"}` 事件

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::application::GenerateBlogCommand;
use crate::infrastructure::http::dto::{BlogRequestBody, InvocationResponse, TriggerEvent};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// 直接以请求体触发
pub async fn generate_blog(
    State(state): State<Arc<AppState>>,
    body: String,
) -> Result<Json<InvocationResponse>, ApiError> {
    run_invocation(&state, &body).await
}

/// 以网关事件触发
pub async fn invoke(
    State(state): State<Arc<AppState>>,
    event: String,
) -> Result<Json<InvocationResponse>, ApiError> {
    let body = TriggerEvent::parse(&event)?;
    run_invocation(&state, &body).await
}

/// 解析通过后，无论生成或归档结果如何都返回固定信封
///
/// 生成与归档在独立任务中执行，客户端断开连接不会中止本次调用
async fn run_invocation(state: &AppState, body: &str) -> Result<Json<InvocationResponse>, ApiError> {
    let request = BlogRequestBody::parse(body)?;

    let command = GenerateBlogCommand::new(request);
    let invocation_id = command.invocation_id;
    let handler = state.generate_blog_handler.clone();
    let task = tokio::spawn(async move { handler.handle(command).await });

    match task.await {
        Ok(response) => tracing::debug!(
            invocation_id = %response.invocation_id,
            saved = response.persist.is_saved(),
            "Invocation completed"
        ),
        Err(e) => tracing::error!(
            invocation_id = %invocation_id,
            error = %e,
            "Invocation task aborted"
        ),
    }

    Ok(Json(InvocationResponse::completed()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
        Router,
    };
    use tower::util::ServiceExt;

    use crate::application::{ArticleArchiver, ContentPipeline, DirectGenerator, StagedPipeline};
    use crate::config::TimestampClock;
    use crate::infrastructure::adapters::{FakeInferenceClient, FakeInferenceConfig, FakeReply};
    use std::time::Duration;
    use crate::infrastructure::http::routes::create_routes;
    use crate::infrastructure::memory::InMemoryObjectStore;

    const BUCKET: &str = "aws_bedrock_course1";

    struct Harness {
        router: Router,
        engine: Arc<FakeInferenceClient>,
        store: Arc<InMemoryObjectStore>,
    }

    fn harness(replies: Vec<FakeReply>, store: InMemoryObjectStore, staged: bool) -> Harness {
        harness_with_engine(FakeInferenceClient::scripted(replies), store, staged)
    }

    fn harness_with_engine(
        engine: FakeInferenceClient,
        store: InMemoryObjectStore,
        staged: bool,
    ) -> Harness {
        let engine = Arc::new(engine);
        let store = store.arc();

        let direct = DirectGenerator::with_default_params(engine.clone());
        let staged = if staged {
            Ok(StagedPipeline::with_default_params(engine.clone()))
        } else {
            Err("disabled by configuration".to_string())
        };
        let pipeline = Arc::new(ContentPipeline::new(direct, staged));
        let archiver = Arc::new(ArticleArchiver::new(
            store.clone(),
            BUCKET,
            "blog-output",
            TimestampClock::Utc,
        ));

        let router = create_routes().with_state(Arc::new(AppState::new(pipeline, archiver)));
        Harness {
            router,
            engine,
            store,
        }
    }

    fn post(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn json_body(response: axum::response::Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn envelope() -> serde_json::Value {
        serde_json::json!({"statusCode": 200, "body": "Blog generation is completed"})
    }

    #[tokio::test]
    async fn test_end_to_end_staged_run() {
        let edited = "Cloud bills keep growing.\n\nHere is how to cut them.\n\n\
                      Meta Description: Five proven ways to optimize cloud costs.\n\n\
                      CTA: Schedule a free cost audit.";
        let replies = ["research", "outline", "draft", edited]
            .map(|r| FakeReply::Text(r.to_string()))
            .to_vec();
        let h = harness(replies, InMemoryObjectStore::new(), true);

        let response = h
            .router
            .oneshot(post(
                "/api/blog/generate",
                r#"{"blog_topic": "cloud cost optimization", "target_word_count": 500}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await, envelope());

        let keys = h.store.keys(BUCKET);
        assert_eq!(keys.len(), 1);
        assert!(keys[0].starts_with("blog-output/") && keys[0].ends_with(".txt"));

        let stored = String::from_utf8(h.store.get(BUCKET, &keys[0]).unwrap()).unwrap();
        assert!(!stored.is_empty());
        let meta = stored.find("Meta Description:").unwrap();
        let cta = stored.find("CTA:").unwrap();
        assert!(meta < cta);
        assert!(stored.ends_with("Schedule a free cost audit."));

        let requests = h.engine.requests();
        assert_eq!(requests.len(), 4);
        assert!(requests[2].prompt.contains("Write a 500-word article"));
    }

    #[tokio::test]
    async fn test_missing_topic_fails_before_generation() {
        let h = harness(Vec::new(), InMemoryObjectStore::new(), true);

        let response = h
            .router
            .oneshot(post("/api/blog/generate", r#"{"brand_name": "Acme"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(body["errno"], 400);
        assert_eq!(h.engine.call_count(), 0);
        assert!(h.store.is_empty());
    }

    #[tokio::test]
    async fn test_storage_failure_keeps_envelope() {
        let replies = ["r", "o", "w", "e"]
            .map(|r| FakeReply::Text(r.to_string()))
            .to_vec();
        let h = harness(replies, InMemoryObjectStore::failing(), true);

        let response = h
            .router
            .oneshot(post("/api/blog/generate", r#"{"blog_topic": "t"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await, envelope());
        assert!(h.store.is_empty());
    }

    #[tokio::test]
    async fn test_nothing_generated_keeps_envelope() {
        let h = harness(vec![FakeReply::Malformed], InMemoryObjectStore::new(), false);

        let response = h
            .router
            .oneshot(post("/api/blog/generate", r#"{"blog_topic": "t"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await, envelope());
        assert!(h.store.is_empty());
        assert_eq!(h.engine.call_count(), 1);
    }

    #[tokio::test]
    async fn test_invoke_event_shape() {
        let h = harness(
            vec![FakeReply::Text("A 200 word blog.".to_string())],
            InMemoryObjectStore::new(),
            false,
        );

        let event = serde_json::json!({"body": r#"{"blog_topic": "edge computing"}"#}).to_string();
        let response = h.router.oneshot(post("/api/invoke", &event)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let keys = h.store.keys(BUCKET);
        assert_eq!(
            h.store.get(BUCKET, &keys[0]),
            Some(b"A 200 word blog.".to_vec())
        );
        assert!(h.engine.requests()[0].prompt.contains("on the topic edge computing"));
    }

    #[tokio::test]
    async fn test_invoke_without_body_is_rejected() {
        let h = harness(Vec::new(), InMemoryObjectStore::new(), true);
        let response = h
            .router
            .oneshot(post("/api/invoke", r#"{"headers": {}}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(h.engine.call_count(), 0);
    }

    #[tokio::test]
    async fn test_client_disconnect_does_not_cancel_invocation() {
        let engine = FakeInferenceClient::new(FakeInferenceConfig {
            latency_ms: 100,
            record_requests: true,
        });
        let h = harness_with_engine(engine, InMemoryObjectStore::new(), true);

        // 请求 future 在第一次推理返回前被丢弃
        let dropped = tokio::time::timeout(
            Duration::from_millis(20),
            h.router
                .clone()
                .oneshot(post("/api/blog/generate", r#"{"blog_topic": "t"}"#)),
        )
        .await;
        assert!(dropped.is_err());

        tokio::time::sleep(Duration::from_millis(1500)).await;

        assert_eq!(h.engine.call_count(), 4);
        let keys = h.store.keys(BUCKET);
        assert_eq!(keys.len(), 1);
        let stored = String::from_utf8(h.store.get(BUCKET, &keys[0]).unwrap()).unwrap();
        assert!(stored.contains("CTA:"));
    }

    #[tokio::test]
    async fn test_ping_reports_capability() {
        let h = harness(Vec::new(), InMemoryObjectStore::new(), false);
        let response = h
            .router
            .oneshot(
                Request::builder()
                    .uri("/api/ping")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        let body = json_body(response).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["staged_pipeline"]["state"], "unavailable");
        assert_eq!(body["staged_pipeline"]["reason"], "disabled by configuration");
    }
}
