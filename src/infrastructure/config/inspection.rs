//! 적용 설정 진단(inspection) 뷰 모델.

use serde::Serialize;

use super::loader::LoadedConfig;
use super::resolve::resolve_provider_api_key;
use crate::application::config::{CatalogConfig, Config};

#[derive(Debug, Clone, Serialize)]
pub struct ConfigInspection {
    pub searched_paths: Vec<String>,
    pub loaded_paths: Vec<String>,
    pub deployment: String,
    pub catalog: CatalogConfig,
    pub completion: CompletionInspection,
    pub server: ServerInspection,
}

/// 자격 증명 값은 싣지 않는다. 출처와 해석 여부만 보여준다.
#[derive(Debug, Clone, Serialize)]
pub struct CompletionInspection {
    pub api_base: String,
    pub model: String,
    pub system_prompt: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub timeout_ms: u128,
    pub api_key_source: Option<String>,
    pub api_key_resolved: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ServerInspection {
    pub bind: String,
    pub static_dir: Option<String>,
}

impl ConfigInspection {
    pub(crate) fn from_loaded(loaded: LoadedConfig, port: Option<u16>) -> Self {
        let config: &Config = &loaded.config;
        let deployment = config.deployment();
        let credential = resolve_provider_api_key(&config.completion);

        Self {
            searched_paths: loaded
                .searched_paths
                .iter()
                .map(|p| p.display().to_string())
                .collect(),
            loaded_paths: loaded
                .loaded_paths
                .iter()
                .map(|p| p.display().to_string())
                .collect(),
            deployment: deployment.code().to_string(),
            catalog: config.catalog.clone(),
            completion: CompletionInspection {
                api_base: config.completion.api_base(),
                model: config.completion.model(),
                system_prompt: config.completion.system_prompt(),
                temperature: config.completion.temperature(),
                max_tokens: config.completion.max_tokens(),
                timeout_ms: config.completion.timeout().as_millis(),
                api_key_resolved: credential.credential.is_some(),
                api_key_source: credential.source,
            },
            server: ServerInspection {
                bind: config.server.bind_for(deployment, port),
                static_dir: config.server.static_dir_for(deployment),
            },
        }
    }
}
