//! 애플리케이션 계층이 의존하는 포트(추상 인터페이스) 모음.

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;

use crate::application::config::Config;
use crate::application::error::{CatalogError, GatewayError, ServiceFailure};
use crate::domain::resort::ConfigurationCatalog;

/// 설정 로딩/점검을 담당하는 저장소 포트.
pub trait ConfigRepository: Send + Sync {
    fn load(&self) -> Result<Config>;
    fn inspect_pretty_json(&self) -> Result<String>;
}

/// 카탈로그 JSON 원문을 가져오는 포트(파일/HTTP).
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// 로그/진단용 출처 표기
    fn label(&self) -> String;
    async fn fetch(&self) -> std::result::Result<String, CatalogError>;
}

/// 설정에 지정된 출처에서 카탈로그를 적재하는 포트. 실패는 내장 카탈로그로 흡수한다.
#[async_trait]
pub trait CatalogLoader: Send + Sync {
    async fn load(&self, config: &Config) -> ConfigurationCatalog;
}

/// JSON POST 한 번을 표현하는 전송 요청.
#[derive(Debug, Clone)]
pub struct TransportRequest {
    pub url: String,
    pub bearer: Option<String>,
    pub payload: Value,
}

/// 상태 코드와 원문 본문. 해석은 게이트웨이가 맡는다.
#[derive(Debug, Clone)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

impl TransportResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// HTTP 전송 포트. 테스트에서는 호출 횟수를 세는 가짜로 대체한다.
#[async_trait]
pub trait CompletionTransport: Send + Sync {
    async fn post_json(
        &self,
        request: TransportRequest,
    ) -> std::result::Result<TransportResponse, ServiceFailure>;

    /// OPTIONS 요청으로 엔드포인트 응답 여부를 확인한다.
    async fn options(&self, url: &str) -> std::result::Result<u16, ServiceFailure>;
}

/// 프롬프트를 받아 생성된 리뷰를 돌려주는 게이트웨이 포트.
/// 구현체는 재시도/대체 처리를 하지 않는다.
#[async_trait]
pub trait CompletionGateway: Send + Sync {
    async fn generate(&self, prompt: &str) -> std::result::Result<String, GatewayError>;
}

/// 실행 모드별 게이트웨이 생성 포트.
pub trait GatewayFactory: Send + Sync {
    /// upstream provider를 직접 호출하는 서버 측 게이트웨이
    fn server_gateway(&self, config: &Config) -> Arc<dyn CompletionGateway>;
    /// 프록시 라우트를 호출하는 클라이언트 측 게이트웨이
    fn proxy_gateway(&self, config: &Config, endpoint: &str) -> Arc<dyn CompletionGateway>;
}
