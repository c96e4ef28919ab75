//! staypilot 설정 파일(`config.json` 계층) 저장소 어댑터.

use anyhow::Result;

use crate::application::ports::ConfigRepository;
use crate::infrastructure::config;

/// `/etc` → 사용자 → 프로젝트 → `$STAYPILOT_CONFIG` 순서로 병합한 설정을 제공한다.
pub struct JsonConfigRepository;

impl ConfigRepository for JsonConfigRepository {
    fn load(&self) -> Result<config::Config> {
        config::Config::load()
    }

    /// completion 자격 증명은 출처 표기로만 나간다.
    fn inspect_pretty_json(&self) -> Result<String> {
        config::Config::inspect_pretty_json()
    }
}
