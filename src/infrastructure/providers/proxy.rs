//! 리뷰 생성 프록시 라우트를 호출하는 클라이언트 측 게이트웨이.
//! 자격 증명 없이 `{prompt}`를 보내고 `{review}`를 받는다.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Value, json};
use tracing::{debug, warn};

use crate::application::error::{GatewayError, ServiceFailure};
use crate::application::ports::{CompletionGateway, CompletionTransport, TransportRequest};

use super::api_runner::{parse_json_body, truncate_body};

pub struct ProxyGateway {
    transport: Arc<dyn CompletionTransport>,
    endpoint: String,
}

impl ProxyGateway {
    pub fn new(transport: Arc<dyn CompletionTransport>, endpoint: impl Into<String>) -> Self {
        Self {
            transport,
            endpoint: endpoint.into(),
        }
    }

    /// OPTIONS 요청이 2xx로 응답하면 `true`. 상태 코드도 함께 돌려준다.
    pub async fn health_check(&self) -> Result<(bool, u16), ServiceFailure> {
        let status = self.transport.options(&self.endpoint).await?;
        Ok(((200..300).contains(&status), status))
    }
}

#[async_trait]
impl CompletionGateway for ProxyGateway {
    async fn generate(&self, prompt: &str) -> Result<String, GatewayError> {
        if prompt.trim().is_empty() {
            return Err(GatewayError::InvalidArgument("prompt is required"));
        }

        debug!(endpoint = self.endpoint.as_str(), "calling review proxy");
        let response = self
            .transport
            .post_json(TransportRequest {
                url: self.endpoint.clone(),
                bearer: None,
                payload: json!({ "prompt": prompt }),
            })
            .await?;

        if !response.is_success() {
            let detail = parse_json_body(&response.body)
                .ok()
                .and_then(|body| proxy_error_message(&body));
            return Err(match detail {
                Some(message) => ServiceFailure::Upstream(message),
                None => {
                    warn!(
                        status = response.status,
                        body = truncate_body(&response.body).as_str(),
                        "review proxy returned a non-JSON failure"
                    );
                    ServiceFailure::UpstreamStatus {
                        status: response.status,
                    }
                }
            }
            .into());
        }

        let body = parse_json_body(&response.body)?;
        if let Some(message) = proxy_error_message(&body) {
            return Err(ServiceFailure::Upstream(message).into());
        }

        body.get("review")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .map(ToString::to_string)
            .ok_or_else(|| ServiceFailure::MalformedResponse("missing review".to_string()).into())
    }
}

/// `{error, details?}` 본문을 한 줄 메시지로 합친다.
fn proxy_error_message(body: &Value) -> Option<String> {
    let error = body.get("error").and_then(Value::as_str)?;
    match body.get("details").and_then(Value::as_str) {
        Some(details) if !details.is_empty() => Some(format!("{error}: {details}")),
        _ => Some(error.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::application::ports::TransportResponse;

    struct FakeTransport {
        calls: AtomicUsize,
        last: Mutex<Option<TransportRequest>>,
        status: u16,
        body: String,
    }

    impl FakeTransport {
        fn replying(status: u16, body: &str) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                last: Mutex::new(None),
                status,
                body: body.to_string(),
            })
        }
    }

    #[async_trait]
    impl CompletionTransport for FakeTransport {
        async fn post_json(
            &self,
            request: TransportRequest,
        ) -> Result<TransportResponse, ServiceFailure> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last.lock().unwrap() = Some(request);
            Ok(TransportResponse {
                status: self.status,
                body: self.body.clone(),
            })
        }

        async fn options(&self, _url: &str) -> Result<u16, ServiceFailure> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.status)
        }
    }

    const ENDPOINT: &str = "http://127.0.0.1:8888/api/generate-review";

    #[tokio::test]
    async fn posts_the_prompt_without_a_credential() {
        let transport = FakeTransport::replying(200, r#"{"review": "Loved it."}"#);
        let gateway = ProxyGateway::new(transport.clone(), ENDPOINT);

        assert_eq!(gateway.generate("Write a review").await.expect("review"), "Loved it.");

        let sent = transport.last.lock().unwrap().clone().expect("request");
        assert_eq!(sent.url, ENDPOINT);
        assert!(sent.bearer.is_none());
        assert_eq!(sent.payload, json!({ "prompt": "Write a review" }));
    }

    #[tokio::test]
    async fn empty_prompt_never_reaches_the_proxy() {
        let transport = FakeTransport::replying(200, r#"{"review": "x"}"#);
        let gateway = ProxyGateway::new(transport.clone(), ENDPOINT);

        assert!(gateway.generate(" \n").await.expect_err("reject").is_invalid_argument());
        assert_eq!(transport.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn error_bodies_become_service_errors() {
        let transport = FakeTransport::replying(
            500,
            r#"{"error": "Failed to generate review", "details": "upstream credential is not configured"}"#,
        );
        let gateway = ProxyGateway::new(transport, ENDPOINT);

        let err = gateway.generate("Write a review").await.expect_err("fail");
        match err {
            GatewayError::Service(ServiceFailure::Upstream(message)) => {
                assert!(message.starts_with("Failed to generate review"));
                assert!(message.contains("not configured"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn non_json_failures_keep_the_status() {
        let gateway = ProxyGateway::new(FakeTransport::replying(502, "Bad Gateway"), ENDPOINT);
        let err = gateway.generate("Write a review").await.expect_err("fail");
        assert!(matches!(
            err,
            GatewayError::Service(ServiceFailure::UpstreamStatus { status: 502, .. })
        ));
    }

    #[tokio::test]
    async fn success_without_review_is_malformed() {
        let gateway = ProxyGateway::new(FakeTransport::replying(200, r#"{"text": "hi"}"#), ENDPOINT);
        let err = gateway.generate("Write a review").await.expect_err("fail");
        assert!(matches!(
            err,
            GatewayError::Service(ServiceFailure::MalformedResponse(_))
        ));
    }

    #[tokio::test]
    async fn health_check_reports_the_options_status() {
        let up = ProxyGateway::new(FakeTransport::replying(200, ""), ENDPOINT);
        let down = ProxyGateway::new(FakeTransport::replying(404, ""), ENDPOINT);

        assert_eq!(up.health_check().await.expect("status"), (true, 200));
        assert_eq!(down.health_check().await.expect("status"), (false, 404));
    }
}
