//! 리조트 카탈로그 로딩(파일/HTTP)과 내장 카탈로그 대체.

use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{error, info};

use crate::application::error::CatalogError;
use crate::application::ports::CatalogSource;
use crate::domain::resort::{CatalogDocument, ConfigurationCatalog};

const CATALOG_TIMEOUT: Duration = Duration::from_secs(30);

/// 로컬 JSON 파일 카탈로그.
pub struct FileCatalogSource {
    path: PathBuf,
}

impl FileCatalogSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl CatalogSource for FileCatalogSource {
    fn label(&self) -> String {
        self.path.display().to_string()
    }

    async fn fetch(&self) -> Result<String, CatalogError> {
        tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|err| CatalogError::Fetch {
                source_label: self.label(),
                reason: err.to_string(),
            })
    }
}

/// 정적 호스팅된 JSON 문서 카탈로그.
pub struct HttpCatalogSource {
    client: Client,
    url: String,
}

impl HttpCatalogSource {
    pub fn new(url: impl Into<String>) -> Self {
        // TLS 설정 실패 등 예외 상황에서는 기본 클라이언트로 폴백한다.
        let client = Client::builder()
            .timeout(CATALOG_TIMEOUT)
            .build()
            .unwrap_or_else(|_| Client::new());
        Self {
            client,
            url: url.into(),
        }
    }
}

#[async_trait]
impl CatalogSource for HttpCatalogSource {
    fn label(&self) -> String {
        self.url.clone()
    }

    async fn fetch(&self) -> Result<String, CatalogError> {
        let fetch_error = |reason: String| CatalogError::Fetch {
            source_label: self.label(),
            reason,
        };

        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|err| fetch_error(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(fetch_error(format!("status {status}")));
        }

        response
            .text()
            .await
            .map_err(|err| fetch_error(err.to_string()))
    }
}

/// 설정 문자열로 출처를 고른다. http(s)면 HTTP, 그 외는 파일 경로.
pub fn source_from_setting(raw: &str) -> Option<Box<dyn CatalogSource>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if raw.starts_with("http://") || raw.starts_with("https://") {
        return Some(Box::new(HttpCatalogSource::new(raw)));
    }
    Some(Box::new(FileCatalogSource::new(raw)))
}

/// 카탈로그 원문을 파싱/검증한다.
pub fn parse_catalog(raw: &str) -> Result<ConfigurationCatalog, CatalogError> {
    let document: CatalogDocument = serde_json::from_str(raw)?;
    Ok(ConfigurationCatalog::from_document(document)?)
}

/// 카탈로그를 로딩한다. 어떤 실패든 내장 카탈로그로 대체하며 호출자에게 오류를 올리지 않는다.
pub async fn load_catalog(source: Option<&dyn CatalogSource>) -> ConfigurationCatalog {
    let Some(source) = source else {
        info!("no catalog source configured, using built-in catalog");
        return ConfigurationCatalog::fallback();
    };

    let loaded = match source.fetch().await {
        Ok(raw) => parse_catalog(&raw),
        Err(err) => Err(err),
    };

    match loaded {
        Ok(catalog) => {
            info!(
                source = source.label().as_str(),
                resorts = catalog.resorts().len(),
                "loaded resort catalog"
            );
            catalog
        }
        Err(err) => {
            error!(source = source.label().as_str(), error = %err, "catalog load failed, using built-in catalog");
            ConfigurationCatalog::fallback()
        }
    }
}
