//! 问答端点

use axum::{extract::State, routing::post, Json, Router};
use std::sync::Arc;
use tracing::info;

use crate::error::{AppError, AppResult};
use crate::models::{AnswerResponse, QuestionRequest};
use crate::state::AppState;

/// 问答处理器
///
/// 校验问题非空后调用外部回答服务，每个请求恰好调用一次。
/// 不做裁剪、长度限制或内容过滤。
async fn answer_question(
    State(state): State<Arc<AppState>>,
    Json(req): Json<QuestionRequest>,
) -> AppResult<Json<AnswerResponse>> {
    if req.question.is_empty() {
        return Err(AppError::BadRequest("Question cannot be empty".to_string()));
    }

    info!("Received question: len={}", req.question.len());

    let answer = state.provider.answer(&req.question).await?;

    Ok(Json(AnswerResponse { answer }))
}

/// 创建问答路由
pub fn question_routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/question", post(answer_question))
}

#[cfg(test)]
mod tests {
    use crate::answer::{AnswerError, AnswerProvider};
    use crate::api::create_api_routes;
    use crate::state::create_shared_state;

    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{header, Method, Request, StatusCode};
    use axum::Router;
    use http_body_util::BodyExt;
    use serde_json::Value;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tower::ServiceExt;

    /// 计数桩：记录调用次数，返回带序号的回答
    #[derive(Default)]
    struct CountingProvider {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl AnswerProvider for CountingProvider {
        async fn answer(&self, question: &str) -> Result<String, AnswerError> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            Ok(format!("answer #{} to: {}", n, question))
        }
    }

    /// 失败桩：总是返回上游错误
    struct FailingProvider;

    #[async_trait]
    impl AnswerProvider for FailingProvider {
        async fn answer(&self, _question: &str) -> Result<String, AnswerError> {
            Err(AnswerError::ApiError {
                status: 500,
                message: "upstream unavailable".to_string(),
            })
        }
    }

    fn test_app(provider: Arc<dyn AnswerProvider>) -> Router {
        create_api_routes(create_shared_state(provider))
    }

    fn question_request(body: &str) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri("/api/question")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn response_json(response: axum::response::Response) -> Value {
        let body = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn test_root_returns_running_message() {
        let app = test_app(Arc::new(CountingProvider::default()));

        let response = app
            .oneshot(
                Request::builder()
                    .method(Method::GET)
                    .uri("/")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = response_json(response).await;
        assert_eq!(body["message"], "Q&A Server is running!");
    }

    #[tokio::test]
    async fn test_question_returns_answer() {
        let provider = Arc::new(CountingProvider::default());
        let app = test_app(provider.clone());

        let response = app
            .oneshot(question_request(r#"{"question":"hello"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = response_json(response).await;
        assert_eq!(body["answer"], "answer #1 to: hello");
        assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_empty_question_returns_400() {
        let provider = Arc::new(CountingProvider::default());
        let app = test_app(provider.clone());

        let response = app
            .oneshot(question_request(r#"{"question":""}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = response_json(response).await;
        assert_eq!(body["detail"], "Question cannot be empty");
        // 校验失败时不调用回答服务
        assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_missing_question_field_is_rejected() {
        let provider = Arc::new(CountingProvider::default());
        let app = test_app(provider.clone());

        let response = app.oneshot(question_request(r#"{}"#)).await.unwrap();

        // Json 提取器在处理器之前拒绝
        assert!(response.status().is_client_error());
        assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_repeated_questions_are_not_memoized() {
        let provider = Arc::new(CountingProvider::default());
        let app = test_app(provider.clone());

        let first = app
            .clone()
            .oneshot(question_request(r#"{"question":"same"}"#))
            .await
            .unwrap();
        let second = app
            .oneshot(question_request(r#"{"question":"same"}"#))
            .await
            .unwrap();

        let first_body = response_json(first).await;
        let second_body = response_json(second).await;

        // 相同问题每次独立调用回答服务
        assert_ne!(first_body["answer"], second_body["answer"]);
        assert_eq!(provider.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_provider_failure_returns_502() {
        let app = test_app(Arc::new(FailingProvider));

        let response = app
            .oneshot(question_request(r#"{"question":"hello"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let body = response_json(response).await;
        assert!(body["detail"].as_str().unwrap().contains("upstream unavailable"));
    }
}
