//! 리뷰 프록시 라우트 통합 테스트. 가짜 게이트웨이로 upstream 호출을 대체한다.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Method, Request, StatusCode, header};
use serde_json::{Value, json};
use tower::ServiceExt;

use staypilot::application::config::CompletionConfig;
use staypilot::application::error::{GatewayError, ServiceFailure};
use staypilot::application::ports::{
    CompletionGateway, CompletionTransport, TransportRequest, TransportResponse,
};
use staypilot::domain::resort::ConfigurationCatalog;
use staypilot::infrastructure::providers::{CompletionSettings, OpenAiGateway};
use staypilot::interface::http::{AppState, router};

struct FakeGateway {
    calls: AtomicUsize,
    reply: Option<&'static str>,
}

#[async_trait]
impl CompletionGateway for FakeGateway {
    async fn generate(&self, prompt: &str) -> Result<String, GatewayError> {
        if prompt.trim().is_empty() {
            return Err(GatewayError::InvalidArgument("prompt is required"));
        }
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.reply
            .map(ToString::to_string)
            .ok_or(GatewayError::Service(ServiceFailure::CredentialMissing))
    }
}

fn app(reply: Option<&'static str>) -> (Router, Arc<FakeGateway>) {
    let gateway = Arc::new(FakeGateway {
        calls: AtomicUsize::new(0),
        reply,
    });
    let state = AppState {
        catalog: Arc::new(ConfigurationCatalog::fallback()),
        gateway: gateway.clone(),
    };
    (router(state, None), gateway)
}

async fn send(app: Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Vec<u8>) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(value) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };
    let response = app
        .oneshot(builder.body(body).expect("request"))
        .await
        .expect("response");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    (status, bytes.to_vec())
}

fn json_body(bytes: &[u8]) -> Value {
    serde_json::from_slice(bytes).expect("json body")
}

#[tokio::test]
async fn generates_a_review_on_both_routes() {
    for uri in ["/api/generate-review", "/.netlify/functions/generate-review"] {
        let (app, gateway) = app(Some("A dreamy stay."));
        let (status, body) = send(
            app,
            Method::POST,
            uri,
            Some(json!({ "prompt": "Write a review" })),
        )
        .await;

        assert_eq!(status, StatusCode::OK, "{uri}");
        assert_eq!(json_body(&body), json!({ "review": "A dreamy stay." }));
        assert_eq!(gateway.calls.load(Ordering::SeqCst), 1);
    }
}

#[tokio::test]
async fn options_answers_with_an_empty_body_and_open_cors() {
    let (app, _) = app(Some("unused"));
    let response = app
        .oneshot(
            Request::builder()
                .method(Method::OPTIONS)
                .uri("/api/generate-review")
                .header(header::ORIGIN, "https://guest.example")
                .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .and_then(|v| v.to_str().ok()),
        Some("*")
    );
    let body = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    assert!(body.is_empty());
}

#[tokio::test]
async fn plain_options_without_cors_headers_is_ok() {
    let (app, _) = app(Some("unused"));
    let (status, body) = send(app, Method::OPTIONS, "/api/generate-review", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.is_empty());
}

#[tokio::test]
async fn other_methods_are_rejected() {
    for method in [Method::GET, Method::PUT, Method::DELETE] {
        let (app, gateway) = app(Some("unused"));
        let (status, body) = send(app, method.clone(), "/api/generate-review", None).await;

        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED, "{method}");
        assert_eq!(json_body(&body), json!({ "error": "Method not allowed" }));
        assert_eq!(gateway.calls.load(Ordering::SeqCst), 0);
    }
}

#[tokio::test]
async fn empty_prompt_is_a_client_error() {
    let (app, gateway) = app(Some("unused"));
    let (status, body) = send(
        app,
        Method::POST,
        "/api/generate-review",
        Some(json!({ "prompt": "   " })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json_body(&body)["error"], "Failed to generate review");
    assert_eq!(gateway.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn unreadable_body_is_a_client_error() {
    let (app, _) = app(Some("unused"));
    let response = app
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/api/generate-review")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("{ nope"))
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn service_errors_are_server_errors_with_details() {
    let (app, _) = app(None);
    let (status, body) = send(
        app,
        Method::POST,
        "/api/generate-review",
        Some(json!({ "prompt": "Write a review" })),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let body = json_body(&body);
    assert_eq!(body["error"], "Failed to generate review");
    assert!(
        body["details"]
            .as_str()
            .expect("details")
            .contains("not configured")
    );
}

#[tokio::test]
async fn lists_resorts_in_catalog_order() {
    let (app, _) = app(None);
    let (status, body) = send(app, Method::GET, "/api/resorts", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        json_body(&body),
        json!([{
            "id": "domes-white-coast-milos",
            "name": "Domes White Coast Milos",
            "location": "Milos, Greece"
        }])
    );
}

#[tokio::test]
async fn resolves_resort_and_platform_links() {
    let (app, _) = app(None);
    let (status, body) = send(
        app,
        Method::GET,
        "/api/resort?resort=unknown-resort&platform=google",
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let body = json_body(&body);
    assert_eq!(body["resortId"], "unknown-resort");
    assert_eq!(body["platformId"], "google");
    assert_eq!(body["resort"]["id"], "domes-white-coast-milos");
    assert_eq!(body["links"].as_array().expect("links").len(), 2);
}

/// 키가 틀렸을 때 OpenAI가 돌려주는 형태의 401 응답.
struct RejectingProvider;

#[async_trait]
impl CompletionTransport for RejectingProvider {
    async fn post_json(
        &self,
        _request: TransportRequest,
    ) -> Result<TransportResponse, ServiceFailure> {
        Ok(TransportResponse {
            status: 401,
            body: json!({
                "error": {
                    "message": "Incorrect API key provided: sk-proj-****wxyz. You can find your API key at https://platform.openai.com/account/api-keys.",
                    "type": "invalid_request_error",
                    "code": "invalid_api_key"
                }
            })
            .to_string(),
        })
    }

    async fn options(&self, _url: &str) -> Result<u16, ServiceFailure> {
        Ok(200)
    }
}

#[tokio::test]
async fn provider_rejections_do_not_leak_the_key_to_the_browser() {
    let gateway = OpenAiGateway::new(
        Arc::new(RejectingProvider),
        CompletionSettings::from_config(&CompletionConfig::default()),
        Some("sk-proj-SECRETwxyz".to_string()),
    );
    let state = AppState {
        catalog: Arc::new(ConfigurationCatalog::fallback()),
        gateway: Arc::new(gateway),
    };

    let (status, body) = send(
        router(state, None),
        Method::POST,
        "/api/generate-review",
        Some(json!({ "prompt": "Write a review" })),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let body = json_body(&body);
    assert_eq!(body["error"], "Failed to generate review");
    let details = body["details"].as_str().expect("details");
    assert!(details.contains("401"), "{details}");
    for fragment in ["sk-", "wxyz", "SECRET", "Incorrect API key"] {
        assert!(!details.contains(fragment), "leaked {fragment:?}: {details}");
    }
}
