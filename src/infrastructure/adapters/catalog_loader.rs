//! 카탈로그 적재 포트 구현 어댑터.

use async_trait::async_trait;

use crate::application::config::Config;
use crate::application::ports::CatalogLoader;
use crate::domain::resort::ConfigurationCatalog;
use crate::infrastructure::catalog;

/// 설정의 `catalog.source`(파일 경로/URL)에서 읽는 로더.
pub struct ConfiguredCatalogLoader;

#[async_trait]
impl CatalogLoader for ConfiguredCatalogLoader {
    async fn load(&self, config: &Config) -> ConfigurationCatalog {
        let source = config
            .catalog
            .source
            .as_deref()
            .and_then(catalog::source_from_setting);
        catalog::load_catalog(source.as_deref()).await
    }
}
