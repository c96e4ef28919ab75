//! completion provider 연동 모듈.
//! 서버 측 OpenAI 게이트웨이와 클라이언트 측 프록시 게이트웨이가
//! 같은 전송 포트(`CompletionTransport`)를 공유한다.

mod api_runner;
pub mod openai;
pub mod proxy;

use std::sync::Arc;

use tracing::{info, warn};

use crate::application::config::Config;
use crate::application::ports::{CompletionGateway, CompletionTransport};

pub use api_runner::ReqwestTransport;
pub use openai::{CompletionSettings, OpenAiGateway};
pub use proxy::ProxyGateway;

/// 설정의 타임아웃을 반영한 기본 전송 어댑터.
pub fn build_transport(config: &Config) -> Arc<dyn CompletionTransport> {
    Arc::new(ReqwestTransport::new(config.completion.timeout()))
}

/// 배포 환경과 무관하게 같은 게이트웨이를 만든다. 자격 증명이 없으면 경고만 남긴다.
pub fn build_gateway(config: &Config) -> Arc<dyn CompletionGateway> {
    let gateway = OpenAiGateway::from_config(&config.completion, build_transport(config));
    if gateway.has_credential() {
        info!(
            deployment = config.deployment().code(),
            model = config.completion.model().as_str(),
            "completion gateway ready"
        );
    } else {
        warn!(
            deployment = config.deployment().code(),
            env = config.completion.api_key_env().as_str(),
            "completion credential is not configured, requests will fail"
        );
    }
    Arc::new(gateway)
}

/// 프록시 엔드포인트를 호출하는 게이트웨이.
pub fn build_proxy_gateway(config: &Config, endpoint: &str) -> ProxyGateway {
    ProxyGateway::new(build_transport(config), endpoint)
}
