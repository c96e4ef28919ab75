//! 게이트웨이 생성 포트 구현 어댑터.

use std::sync::Arc;

use crate::application::config::Config;
use crate::application::ports::{CompletionGateway, GatewayFactory};
use crate::infrastructure::providers;

/// reqwest 전송을 쓰는 게이트웨이 팩토리.
pub struct GatewayFactoryAdapter;

impl GatewayFactory for GatewayFactoryAdapter {
    fn server_gateway(&self, config: &Config) -> Arc<dyn CompletionGateway> {
        providers::build_gateway(config)
    }

    fn proxy_gateway(&self, config: &Config, endpoint: &str) -> Arc<dyn CompletionGateway> {
        Arc::new(providers::build_proxy_gateway(config, endpoint))
    }
}
