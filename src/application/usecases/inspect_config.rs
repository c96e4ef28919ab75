//! `staypilot config` 명령의 유효 설정 출력 유스케이스.

use anyhow::Result;

use crate::application::ports::ConfigRepository;

/// 병합된 배포/카탈로그/completion/서버 설정을 JSON으로 돌려준다.
/// API 키는 값 대신 출처(inline, 환경변수 이름)만 노출된다.
pub struct InspectConfigUseCase<'a> {
    pub config_repo: &'a dyn ConfigRepository,
}

impl<'a> InspectConfigUseCase<'a> {
    pub fn execute(&self) -> Result<String> {
        self.config_repo.inspect_pretty_json()
    }
}
