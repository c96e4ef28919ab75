//! URL 쿼리 파라미터 기반 세션 상태(활성 리조트/플랫폼) 해석.

use std::collections::HashMap;

use url::Url;

use crate::domain::resort::{ConfigurationCatalog, DEFAULT_PLATFORM_KEY, FALLBACK_RESORT_ID};

pub const RESORT_PARAM: &str = "resort";
pub const PLATFORM_PARAM: &str = "platform";

/// 세션 해석에 필요한 쿼리 파라미터 묶음.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionQuery {
    pub resort: Option<String>,
    pub platform: Option<String>,
}

impl SessionQuery {
    /// URL의 쿼리 문자열에서 읽는다. 같은 키가 여러 번 나오면 첫 값을 쓴다.
    pub fn from_url(url: &Url) -> Self {
        let mut query = Self::default();
        for (key, value) in url.query_pairs() {
            match key.as_ref() {
                RESORT_PARAM if query.resort.is_none() => query.resort = Some(value.into_owned()),
                PLATFORM_PARAM if query.platform.is_none() => {
                    query.platform = Some(value.into_owned())
                }
                _ => {}
            }
        }
        query
    }

    pub fn from_pairs(pairs: &HashMap<String, String>) -> Self {
        Self {
            resort: pairs.get(RESORT_PARAM).cloned(),
            platform: pairs.get(PLATFORM_PARAM).cloned(),
        }
    }
}

/// `resort` 파라미터 → 카탈로그 기본값 → 내장 식별자 순서로 리조트를 고른다.
pub fn resolve_resort_id(query: &SessionQuery, catalog: &ConfigurationCatalog) -> String {
    non_empty(query.resort.as_deref())
        .or_else(|| catalog.default_resort_id())
        .unwrap_or(FALLBACK_RESORT_ID)
        .to_string()
}

/// `platform` 파라미터가 없으면 `default`.
pub fn resolve_platform_id(query: &SessionQuery) -> String {
    non_empty(query.platform.as_deref())
        .unwrap_or(DEFAULT_PLATFORM_KEY)
        .to_string()
}

/// 선택한 리조트를 URL에 기록한다.
/// 기존 `resort` 값은 제자리에서 교체하고 다른 파라미터와 순서는 그대로 둔다.
pub fn persist_resort_selection(url: &Url, resort_id: &str) -> Url {
    let mut replaced = false;
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .filter_map(|(key, value)| {
            if key == RESORT_PARAM {
                if replaced {
                    return None;
                }
                replaced = true;
                return Some((key.into_owned(), resort_id.to_string()));
            }
            Some((key.into_owned(), value.into_owned()))
        })
        .collect();

    let mut next = url.clone();
    {
        let mut query = next.query_pairs_mut();
        query.clear();
        for (key, value) in &pairs {
            query.append_pair(key, value);
        }
        if !replaced {
            query.append_pair(RESORT_PARAM, resort_id);
        }
    }
    next
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
