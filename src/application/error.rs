//! 애플리케이션 경계에서 호출자가 분기하는 오류 타입.

use std::time::Duration;

use thiserror::Error;

use crate::domain::resort::CatalogInvariantError;

/// completion 게이트웨이 실패.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// 호출 계약 위반. upstream 호출 전에 거부된다.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    /// upstream 실패. 호출자는 대체 리뷰로 전환해야 한다.
    #[error("completion service error: {0}")]
    Service(#[from] ServiceFailure),
}

impl GatewayError {
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }
}

/// `GatewayError::Service` 상세 원인. 자격 증명 값은 절대 담지 않는다.
#[derive(Debug, Error)]
pub enum ServiceFailure {
    #[error("upstream credential is not configured")]
    CredentialMissing,

    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    #[error("transport failed: {0}")]
    Transport(String),

    /// 응답 본문은 서버 로그에만 남긴다. 본문에 키 일부가 실릴 수 있다.
    #[error("upstream returned status {status}")]
    UpstreamStatus { status: u16 },

    #[error("malformed upstream response: {0}")]
    MalformedResponse(String),

    #[error("upstream reported an error: {0}")]
    Upstream(String),
}

/// 카탈로그 로딩 실패. 로더가 흡수하고 내장 카탈로그로 대체한다.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to fetch catalog from {source_label}: {reason}")]
    Fetch { source_label: String, reason: String },

    #[error("failed to parse catalog JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("catalog is invalid: {0}")]
    Invalid(#[from] CatalogInvariantError),
}
