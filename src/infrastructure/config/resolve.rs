//! 설정 값(api key/env)을 실제 런타임 값으로 해석하는 유틸리티.
//!
//! - 환경변수 접근은 인프라 계층에서만 수행한다.

use std::env;

use crate::application::config::CompletionConfig;

/// Provider(API key) 해석 결과. `source`는 값이 아닌 출처 표기다.
#[derive(Clone)]
pub struct ProviderCredentialResolution {
    pub credential: Option<String>,
    pub source: Option<String>,
}

impl std::fmt::Debug for ProviderCredentialResolution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderCredentialResolution")
            .field("credential", &self.credential.as_ref().map(|_| "<redacted>"))
            .field("source", &self.source)
            .finish()
    }
}

/// completion provider API key를 해석한다. 직접값 → 환경변수 순서.
pub fn resolve_provider_api_key(cfg: &CompletionConfig) -> ProviderCredentialResolution {
    if let Some(key) = cfg.api_key.as_deref().map(str::trim).filter(|v| !v.is_empty()) {
        return ProviderCredentialResolution {
            credential: Some(key.to_string()),
            source: Some("inline".to_string()),
        };
    }

    let env_name = cfg.api_key_env();
    let env_name = env_name.trim();
    if env_name.is_empty() {
        return ProviderCredentialResolution {
            credential: None,
            source: None,
        };
    }

    match env::var(env_name).ok().map(|v| v.trim().to_string()) {
        Some(v) if !v.is_empty() => ProviderCredentialResolution {
            credential: Some(v),
            source: Some(format!("env:{env_name}")),
        },
        _ => ProviderCredentialResolution {
            credential: None,
            source: Some(format!("env:{env_name} (missing)")),
        },
    }
}
