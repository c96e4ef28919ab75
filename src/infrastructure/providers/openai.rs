//! OpenAI chat completions 게이트웨이.
//!
//! 서버 측에서만 생성한다. 자격 증명은 이 구조체 밖으로 나가지 않는다.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Value, json};
use tracing::{debug, warn};

use crate::application::config::CompletionConfig;
use crate::application::error::{GatewayError, ServiceFailure};
use crate::application::ports::{CompletionGateway, CompletionTransport, TransportRequest};
use crate::infrastructure::config::resolve_provider_api_key;

use super::api_runner::{parse_json_body, truncate_body};

/// 요청마다 변하지 않는 호출 파라미터.
#[derive(Debug, Clone)]
pub struct CompletionSettings {
    pub base_url: String,
    pub model: String,
    pub system_prompt: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl CompletionSettings {
    pub fn from_config(cfg: &CompletionConfig) -> Self {
        Self {
            base_url: cfg.api_base(),
            model: cfg.model(),
            system_prompt: cfg.system_prompt(),
            temperature: cfg.temperature(),
            max_tokens: cfg.max_tokens(),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), "chat/completions")
    }
}

pub struct OpenAiGateway {
    transport: Arc<dyn CompletionTransport>,
    settings: CompletionSettings,
    credential: Option<String>,
}

impl OpenAiGateway {
    pub fn new(
        transport: Arc<dyn CompletionTransport>,
        settings: CompletionSettings,
        credential: Option<String>,
    ) -> Self {
        Self {
            transport,
            settings,
            credential: credential.filter(|c| !c.trim().is_empty()),
        }
    }

    /// 설정에서 자격 증명과 호출 파라미터를 해석한다. 자격 증명이 없어도 생성은 된다.
    pub fn from_config(cfg: &CompletionConfig, transport: Arc<dyn CompletionTransport>) -> Self {
        let credential = resolve_provider_api_key(cfg).credential;
        Self::new(transport, CompletionSettings::from_config(cfg), credential)
    }

    pub fn has_credential(&self) -> bool {
        self.credential.is_some()
    }

    fn payload(&self, prompt: &str) -> Value {
        json!({
            "model": self.settings.model,
            "messages": [
                { "role": "system", "content": self.settings.system_prompt },
                { "role": "user", "content": prompt }
            ],
            "temperature": self.settings.temperature,
            "max_tokens": self.settings.max_tokens
        })
    }
}

#[async_trait]
impl CompletionGateway for OpenAiGateway {
    async fn generate(&self, prompt: &str) -> Result<String, GatewayError> {
        if prompt.trim().is_empty() {
            return Err(GatewayError::InvalidArgument("prompt is required"));
        }
        let Some(credential) = self.credential.as_deref() else {
            return Err(ServiceFailure::CredentialMissing.into());
        };

        let request = TransportRequest {
            url: self.settings.endpoint(),
            bearer: Some(credential.to_string()),
            payload: self.payload(prompt),
        };
        debug!(model = self.settings.model.as_str(), "calling completion provider");

        let response = self.transport.post_json(request).await?;
        if !response.is_success() {
            warn!(
                status = response.status,
                body = truncate_body(&response.body).as_str(),
                "completion provider rejected the request"
            );
            return Err(ServiceFailure::UpstreamStatus {
                status: response.status,
            }
            .into());
        }

        let body = parse_json_body(&response.body)?;
        let content = extract_openai_content(&body).ok_or_else(|| {
            ServiceFailure::MalformedResponse("missing choices[0].message.content".to_string())
        })?;
        Ok(content)
    }
}

fn extract_openai_content(response: &Value) -> Option<String> {
    response
        .pointer("/choices/0/message/content")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(ToString::to_string)
}
