//! 애플리케이션이 사용하는 설정 스키마(순수 데이터).
//!
//! 주의: 파일/환경변수 접근은 `infrastructure`에서만 수행한다.

use std::time::Duration;

use serde::{Deserialize, Serialize};

pub const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_API_KEY_ENV: &str = "OPENAI_API_KEY";
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a helpful assistant that writes authentic, personal hotel reviews based on guest experiences. Keep reviews concise (under 150 words) and genuine.";
pub const DEFAULT_TEMPERATURE: f32 = 0.9;
pub const DEFAULT_MAX_TOKENS: u32 = 150;
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;
pub const DEFAULT_LOCAL_BIND: &str = "127.0.0.1:8888";
pub const DEFAULT_HOSTED_PORT: u16 = 8080;

/// 배포 환경. 게이트웨이 구현은 하나이고 기본값만 달라진다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Deployment {
    /// 개발 머신: 루프백 바인딩 + 정적 파일 제공
    #[default]
    Local,
    /// 호스팅 함수/컨테이너: 모든 인터페이스 바인딩, 정적 파일 없음
    Hosted,
}

impl Deployment {
    /// 설정 문자열을 배포 환경으로 변환한다. 알 수 없는 값은 `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "local" | "dev" | "development" => Some(Self::Local),
            "hosted" | "prod" | "production" => Some(Self::Hosted),
            _ => None,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::Hosted => "hosted",
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// 배포 환경(local/hosted)
    pub deployment: Option<Deployment>,
    /// 리조트 카탈로그 출처
    #[serde(default)]
    pub catalog: CatalogConfig,
    /// completion provider 호출 설정
    #[serde(default)]
    pub completion: CompletionConfig,
    /// HTTP 프록시 서버 설정
    #[serde(default)]
    pub server: ServerConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct CatalogConfig {
    /// 파일 경로 또는 http(s) URL. 없으면 내장 카탈로그를 쓴다.
    pub source: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct CompletionConfig {
    pub api_base: Option<String>,
    pub model: Option<String>,
    /// 인증 키 직접값(민감정보: 권장하지 않음)
    pub api_key: Option<String>,
    /// 인증 키를 읽을 환경변수 이름
    pub api_key_env: Option<String>,
    pub system_prompt: Option<String>,
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
    /// upstream 호출 타임아웃(ms)
    pub timeout_ms: Option<u64>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct ServerConfig {
    /// 바인딩 주소(예: "127.0.0.1:8888")
    pub bind: Option<String>,
    /// 정적 파일 루트 디렉터리
    pub static_dir: Option<String>,
}

impl Config {
    pub fn deployment(&self) -> Deployment {
        self.deployment.unwrap_or_default()
    }

    /// 후순위(나중 파일) 값으로 덮어쓰는 병합 규칙.
    pub fn merge_from(&mut self, other: Config) {
        if other.deployment.is_some() {
            self.deployment = other.deployment;
        }
        self.catalog.merge_from(other.catalog);
        self.completion.merge_from(other.completion);
        self.server.merge_from(other.server);
    }
}

impl CatalogConfig {
    pub fn merge_from(&mut self, other: CatalogConfig) {
        if other.source.is_some() {
            self.source = other.source;
        }
    }
}

impl CompletionConfig {
    pub fn api_base(&self) -> String {
        self.api_base
            .clone()
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string())
    }

    pub fn model(&self) -> String {
        self.model.clone().unwrap_or_else(|| DEFAULT_MODEL.to_string())
    }

    pub fn api_key_env(&self) -> String {
        self.api_key_env
            .clone()
            .unwrap_or_else(|| DEFAULT_API_KEY_ENV.to_string())
    }

    pub fn system_prompt(&self) -> String {
        self.system_prompt
            .clone()
            .unwrap_or_else(|| DEFAULT_SYSTEM_PROMPT.to_string())
    }

    pub fn temperature(&self) -> f32 {
        self.temperature.unwrap_or(DEFAULT_TEMPERATURE)
    }

    pub fn max_tokens(&self) -> u32 {
        self.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms.unwrap_or(DEFAULT_TIMEOUT_MS))
    }

    pub fn merge_from(&mut self, other: CompletionConfig) {
        if other.api_base.is_some() {
            self.api_base = other.api_base;
        }
        if other.model.is_some() {
            self.model = other.model;
        }
        if other.api_key.is_some() {
            self.api_key = other.api_key;
        }
        if other.api_key_env.is_some() {
            self.api_key_env = other.api_key_env;
        }
        if other.system_prompt.is_some() {
            self.system_prompt = other.system_prompt;
        }
        if other.temperature.is_some() {
            self.temperature = other.temperature;
        }
        if other.max_tokens.is_some() {
            self.max_tokens = other.max_tokens;
        }
        if other.timeout_ms.is_some() {
            self.timeout_ms = other.timeout_ms;
        }
    }
}

impl ServerConfig {
    /// 배포 환경별 기본 바인딩 주소. hosted는 `port`(보통 $PORT)를 쓴다.
    pub fn bind_for(&self, deployment: Deployment, port: Option<u16>) -> String {
        if let Some(bind) = self.bind.as_deref().map(str::trim).filter(|v| !v.is_empty()) {
            return bind.to_string();
        }
        match deployment {
            Deployment::Local => DEFAULT_LOCAL_BIND.to_string(),
            Deployment::Hosted => format!("0.0.0.0:{}", port.unwrap_or(DEFAULT_HOSTED_PORT)),
        }
    }

    /// 배포 환경별 정적 파일 루트. hosted는 명시했을 때만 제공한다.
    pub fn static_dir_for(&self, deployment: Deployment) -> Option<String> {
        if let Some(dir) = self
            .static_dir
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty())
        {
            return Some(dir.to_string());
        }
        match deployment {
            Deployment::Local => Some(".".to_string()),
            Deployment::Hosted => None,
        }
    }

    pub fn merge_from(&mut self, other: ServerConfig) {
        if other.bind.is_some() {
            self.bind = other.bind;
        }
        if other.static_dir.is_some() {
            self.static_dir = other.static_dir;
        }
    }
}
