//! 쿼리 파라미터로 활성 리조트/플랫폼과 리뷰 링크를 해석하는 유스케이스.

use serde::Serialize;

use crate::domain::resort::{ConfigurationCatalog, PlatformLink, ResortRecord};
use crate::domain::session::{SessionQuery, resolve_platform_id, resolve_resort_id};

/// 해석 결과. `resort_id`는 요청값이고 `resort.id`는 실제로 쓰인 레코드다.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedSession {
    pub resort_id: String,
    pub platform_id: String,
    pub resort: ResortRecord,
    pub links: Vec<PlatformLink>,
}

pub struct ResolveSessionUseCase<'a> {
    pub catalog: &'a ConfigurationCatalog,
}

impl<'a> ResolveSessionUseCase<'a> {
    pub fn execute(&self, query: &SessionQuery) -> ResolvedSession {
        let resort_id = resolve_resort_id(query, self.catalog);
        let platform_id = resolve_platform_id(query);
        let resort = self.catalog.get_resort(&resort_id).clone();
        let links = resort.platform_links(&platform_id);

        ResolvedSession {
            resort_id,
            platform_id,
            resort,
            links,
        }
    }
}
