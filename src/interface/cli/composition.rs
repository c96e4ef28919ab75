//! 애플리케이션 조립(composition root) 모듈.

use std::sync::Arc;

use anyhow::Result;

use crate::application::config::Config;
use crate::application::ports::{CatalogLoader, CompletionGateway, ConfigRepository, GatewayFactory};
use crate::application::usecases::generate_review::GenerateReviewUseCase;
use crate::application::usecases::inspect_config::InspectConfigUseCase;
use crate::application::usecases::resolve_session::ResolveSessionUseCase;
use crate::domain::resort::ConfigurationCatalog;
use crate::infrastructure::adapters::{
    ConfiguredCatalogLoader, GatewayFactoryAdapter, JsonConfigRepository,
};

/// 실행 시점 의존성을 한 곳에서 조립하는 컨테이너.
pub struct AppComposition {
    config_repo: JsonConfigRepository,
    catalog_loader: ConfiguredCatalogLoader,
    gateway_factory: GatewayFactoryAdapter,
}

impl Default for AppComposition {
    fn default() -> Self {
        Self {
            config_repo: JsonConfigRepository,
            catalog_loader: ConfiguredCatalogLoader,
            gateway_factory: GatewayFactoryAdapter,
        }
    }
}

impl AppComposition {
    pub fn load_config(&self) -> Result<Config> {
        self.config_repo.load()
    }

    /// 카탈로그를 적재한다. 실패해도 내장 카탈로그가 돌아온다.
    pub async fn load_catalog(&self, config: &Config) -> Arc<ConfigurationCatalog> {
        Arc::new(self.catalog_loader.load(config).await)
    }

    /// 엔드포인트가 있으면 프록시 경유, 없으면 provider 직접 호출.
    pub fn gateway(&self, config: &Config, endpoint: Option<&str>) -> Arc<dyn CompletionGateway> {
        match endpoint {
            Some(endpoint) => self.gateway_factory.proxy_gateway(config, endpoint),
            None => self.gateway_factory.server_gateway(config),
        }
    }

    /// 설정 점검 유스케이스를 생성한다.
    pub fn inspect_config_usecase(&self) -> InspectConfigUseCase<'_> {
        InspectConfigUseCase {
            config_repo: &self.config_repo,
        }
    }

    /// 리뷰 초안 유스케이스를 생성한다.
    pub fn generate_review_usecase<'a>(
        &self,
        gateway: &'a dyn CompletionGateway,
    ) -> GenerateReviewUseCase<'a> {
        GenerateReviewUseCase { gateway }
    }

    /// 세션 해석 유스케이스를 생성한다.
    pub fn resolve_session_usecase<'a>(
        &self,
        catalog: &'a ConfigurationCatalog,
    ) -> ResolveSessionUseCase<'a> {
        ResolveSessionUseCase { catalog }
    }
}
