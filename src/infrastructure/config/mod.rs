//! 사용자 설정(JSON) 로딩/병합 모듈.
//! 여러 경로의 설정을 우선순위대로 병합하고, 실행 진단용 정보를 함께 제공한다.

mod inspection;
mod loader;
mod resolve;

use std::env;

use anyhow::Result;

pub use crate::application::config::Config;
pub use inspection::{CompletionInspection, ConfigInspection, ServerInspection};
pub use loader::{CONFIG_ENV, DEPLOYMENT_ENV, config_paths};
pub use resolve::{ProviderCredentialResolution, resolve_provider_api_key};

/// hosted 배포에서 바인딩 포트를 읽는 환경변수.
pub const PORT_ENV: &str = "PORT";

impl Config {
    /// 병합된 최종 설정을 로딩한다.
    pub fn load() -> Result<Self> {
        Ok(loader::load_merged_config()?.config)
    }

    /// 디버깅/진단용 설정 정보를 구성한다.
    pub fn inspect() -> Result<ConfigInspection> {
        let loaded = loader::load_merged_config()?;
        Ok(ConfigInspection::from_loaded(loaded, hosted_port()))
    }

    /// 설정 진단 결과를 사람이 읽기 쉬운 JSON으로 반환한다.
    pub fn inspect_pretty_json() -> Result<String> {
        Ok(serde_json::to_string_pretty(&Self::inspect()?)?)
    }

    /// 배포 환경을 반영한 최종 바인딩 주소.
    pub fn bind_address(&self) -> String {
        self.server.bind_for(self.deployment(), hosted_port())
    }
}

/// `$PORT`가 숫자일 때만 사용한다.
pub fn hosted_port() -> Option<u16> {
    env::var(PORT_ENV).ok().and_then(|v| v.trim().parse().ok())
}
