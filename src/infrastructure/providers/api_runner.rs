//! Provider HTTP API 호출 공용 유틸리티.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method};
use serde_json::Value;

use crate::application::error::ServiceFailure;
use crate::application::ports::{CompletionTransport, TransportRequest, TransportResponse};

/// reqwest 기반 전송 어댑터. 모든 요청에 고정 타임아웃이 걸린다.
pub struct ReqwestTransport {
    client: Client,
    timeout: Duration,
}

impl ReqwestTransport {
    pub fn new(timeout: Duration) -> Self {
        Self {
            client: build_api_client(timeout),
            timeout,
        }
    }

    fn map_error(&self, err: reqwest::Error) -> ServiceFailure {
        if err.is_timeout() {
            return ServiceFailure::Timeout(self.timeout);
        }
        // URL에 자격 증명이 들어가는 일은 없지만 메시지에서 URL은 빼 둔다.
        ServiceFailure::Transport(err.without_url().to_string())
    }
}

/// Provider API 호출용 기본 HTTP 클라이언트를 생성한다.
pub fn build_api_client(timeout: Duration) -> Client {
    // TLS 설정 실패 등 예외 상황에서는 기본 클라이언트로 폴백한다.
    Client::builder()
        .timeout(timeout)
        .build()
        .unwrap_or_else(|_| Client::new())
}

#[async_trait]
impl CompletionTransport for ReqwestTransport {
    async fn post_json(
        &self,
        request: TransportRequest,
    ) -> Result<TransportResponse, ServiceFailure> {
        let mut builder = self.client.post(&request.url).json(&request.payload);
        if let Some(bearer) = request.bearer.as_deref() {
            builder = builder.bearer_auth(bearer);
        }

        let response = builder.send().await.map_err(|err| self.map_error(err))?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(|err| self.map_error(err))?;

        Ok(TransportResponse { status, body })
    }

    async fn options(&self, url: &str) -> Result<u16, ServiceFailure> {
        let response = self
            .client
            .request(Method::OPTIONS, url)
            .send()
            .await
            .map_err(|err| self.map_error(err))?;
        Ok(response.status().as_u16())
    }
}

/// 오류 응답 본문을 로그/오류 메시지에 넣을 만큼만 자른다.
pub fn truncate_body(body: &str) -> String {
    const LIMIT: usize = 512;
    let trimmed = body.trim();
    if trimmed.chars().count() <= LIMIT {
        return trimmed.to_string();
    }
    let mut out: String = trimmed.chars().take(LIMIT).collect();
    out.push('…');
    out
}

/// JSON 본문을 파싱한다. 실패하면 `MalformedResponse`.
pub fn parse_json_body(body: &str) -> Result<Value, ServiceFailure> {
    serde_json::from_str(body)
        .map_err(|err| ServiceFailure::MalformedResponse(format!("invalid JSON: {err}")))
}
