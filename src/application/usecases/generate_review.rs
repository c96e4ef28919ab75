//! 리뷰 초안 생성 유스케이스.
//! 프롬프트 구성 → 게이트웨이 1회 호출 → 실패 시 템플릿 리뷰로 전환한다.

use tracing::{debug, warn};

use crate::application::ports::CompletionGateway;
use crate::domain::policy::{build_fallback_review, build_prompt};
use crate::domain::resort::ResortRecord;
use crate::domain::review::{DraftSource, ReviewDraft, ReviewRequest};

pub struct GenerateReviewUseCase<'a> {
    pub gateway: &'a dyn CompletionGateway,
}

impl<'a> GenerateReviewUseCase<'a> {
    /// 항상 리뷰 본문을 돌려준다. 게스트가 리뷰 게시를 막히는 일은 없다.
    pub async fn execute(&self, resort: &ResortRecord, request: &ReviewRequest) -> ReviewDraft {
        let prompt = build_prompt(resort, request);
        debug!(resort = resort.id.as_str(), prompt_chars = prompt.len(), "requesting review draft");

        match self.gateway.generate(&prompt).await {
            Ok(text) => ReviewDraft {
                text,
                source: DraftSource::Generated,
            },
            Err(err) => {
                warn!(resort = resort.id.as_str(), error = %err, "completion failed, using fallback review");
                ReviewDraft {
                    text: build_fallback_review(resort, request),
                    source: DraftSource::Fallback,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::application::error::{GatewayError, ServiceFailure};
    use crate::domain::resort::ConfigurationCatalog;

    struct ScriptedGateway {
        reply: Option<String>,
        prompts: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl CompletionGateway for ScriptedGateway {
        async fn generate(&self, prompt: &str) -> Result<String, GatewayError> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            self.reply
                .clone()
                .ok_or(GatewayError::Service(ServiceFailure::CredentialMissing))
        }
    }

    fn request() -> ReviewRequest {
        ReviewRequest::new(["ambiance"], ["Nikos (Pool Bar)"], "")
    }

    #[tokio::test]
    async fn generated_text_is_returned_as_is() {
        let gateway = ScriptedGateway {
            reply: Some("Wonderful week.".to_string()),
            prompts: Mutex::new(Vec::new()),
        };
        let catalog = ConfigurationCatalog::fallback();
        let resort = catalog.default_record();

        let draft = GenerateReviewUseCase { gateway: &gateway }
            .execute(resort, &request())
            .await;

        assert_eq!(draft.source, DraftSource::Generated);
        assert_eq!(draft.text, "Wonderful week.");
        let prompts = gateway.prompts.lock().unwrap();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("serene and romantic ambiance"));
    }

    #[tokio::test]
    async fn service_failure_degrades_to_fallback_review() {
        let gateway = ScriptedGateway {
            reply: None,
            prompts: Mutex::new(Vec::new()),
        };
        let catalog = ConfigurationCatalog::fallback();
        let resort = catalog.default_record();

        let draft = GenerateReviewUseCase { gateway: &gateway }
            .execute(resort, &request())
            .await;

        assert_eq!(draft.source, DraftSource::Fallback);
        assert_eq!(draft.text, build_fallback_review(resort, &request()));
        assert!(draft.text.contains("Special thanks to Nikos"));
        assert_eq!(gateway.prompts.lock().unwrap().len(), 1);
    }
}
