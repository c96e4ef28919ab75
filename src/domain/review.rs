//! 리뷰 초안 도메인 값 객체.

use serde::{Deserialize, Serialize};

/// 게스트 한 번의 선택(기능/직원/자유 코멘트). 요청마다 만들고 버린다.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ReviewRequest {
    #[serde(default)]
    pub feature_keys: Vec<String>,
    #[serde(default)]
    pub staff_labels: Vec<String>,
    #[serde(default)]
    pub comment: String,
}

impl ReviewRequest {
    pub fn new(
        feature_keys: impl IntoIterator<Item = impl Into<String>>,
        staff_labels: impl IntoIterator<Item = impl Into<String>>,
        comment: impl Into<String>,
    ) -> Self {
        Self {
            feature_keys: feature_keys.into_iter().map(Into::into).collect(),
            staff_labels: staff_labels.into_iter().map(Into::into).collect(),
            comment: comment.into(),
        }
    }
}

/// 리뷰 본문의 출처.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DraftSource {
    /// completion 서비스가 생성한 본문
    Generated,
    /// 서비스 실패로 템플릿에서 만든 본문
    Fallback,
}

impl DraftSource {
    pub fn code(self) -> &'static str {
        match self {
            Self::Generated => "generated",
            Self::Fallback => "fallback",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReviewDraft {
    pub text: String,
    pub source: DraftSource,
}
