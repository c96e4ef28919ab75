//! 리조트 카탈로그 도메인 엔티티/값 객체.
//!
//! 카탈로그는 로딩 시점에 한 번 검증되고, 이후에는 읽기 전용으로만 사용된다.

use std::fmt;
use std::marker::PhantomData;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;
use url::Url;

/// 카탈로그에 기본 리조트가 없을 때 사용하는 리조트 식별자.
pub const FALLBACK_RESORT_ID: &str = "domes-white-coast-milos";
/// 기본 플랫폼이 지정되지 않았을 때 찾는 플랫폼 키.
pub const FALLBACK_PLATFORM_ID: &str = "tripadvisor";
/// URL 파라미터가 없을 때 사용하는 플랫폼 키.
pub const DEFAULT_PLATFORM_KEY: &str = "default";

/// 문서 순서를 보존하는 문자열 키 맵.
///
/// 리조트/기능/플랫폼 목록은 JSON에 적힌 순서대로 노출되어야 한다.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderedMap<V> {
    entries: Vec<(String, V)>,
}

impl<V> Default for OrderedMap<V> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<V> OrderedMap<V> {
    pub fn get(&self, key: &str) -> Option<&V> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    /// 같은 키가 이미 있으면 값을 교체하고, 없으면 끝에 추가한다.
    fn insert(&mut self, key: impl Into<String>, value: V) {
        let key = key.into();
        if let Some(slot) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            slot.1 = value;
        } else {
            self.entries.push((key, value));
        }
    }

    fn iter_mut(&mut self) -> impl Iterator<Item = (&str, &mut V)> {
        self.entries.iter_mut().map(|(k, v)| (k.as_str(), v))
    }

    fn into_entries(self) -> Vec<(String, V)> {
        self.entries
    }
}

impl<V> FromIterator<(String, V)> for OrderedMap<V> {
    fn from_iter<I: IntoIterator<Item = (String, V)>>(iter: I) -> Self {
        let mut map = Self::default();
        for (key, value) in iter {
            map.insert(key, value);
        }
        map
    }
}

impl<V: Serialize> Serialize for OrderedMap<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl<'de, V: Deserialize<'de>> Deserialize<'de> for OrderedMap<V> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct OrderedMapVisitor<V>(PhantomData<V>);

        impl<'de, V: Deserialize<'de>> Visitor<'de> for OrderedMapVisitor<V> {
            type Value = OrderedMap<V>;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a JSON object")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut map = OrderedMap::default();
                while let Some((key, value)) = access.next_entry::<String, V>()? {
                    map.insert(key, value);
                }
                Ok(map)
            }
        }

        deserializer.deserialize_map(OrderedMapVisitor(PhantomData))
    }
}

/// 게스트 경험 항목. 프롬프트용 문구와 대체 리뷰용 문구를 함께 가진다.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Feature {
    pub label: String,
    #[serde(default)]
    pub icon: String,
    #[serde(rename = "reviewText")]
    pub prompt_fragment: String,
    #[serde(rename = "fallbackText")]
    pub fallback_fragment: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct StaffMember {
    pub name: String,
    #[serde(default)]
    pub role: String,
    /// UI 라벨이자 이름 역조회 키
    pub display: String,
}

/// 리뷰를 게시할 플랫폼 링크.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PlatformLink {
    #[serde(default)]
    pub id: String,
    pub name: String,
    pub url: String,
    #[serde(default)]
    pub checked: bool,
}

/// 플랫폼 키에 매달린 값. 단일 링크이거나 링크 묶음이다.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum PlatformEntry {
    Group {
        #[serde(rename = "additionalPlatforms")]
        additional_platforms: Vec<PlatformLink>,
    },
    Link(PlatformLink),
}

impl PlatformEntry {
    pub fn links(&self) -> &[PlatformLink] {
        match self {
            Self::Group {
                additional_platforms,
            } => additional_platforms,
            Self::Link(link) => std::slice::from_ref(link),
        }
    }

    fn links_mut(&mut self) -> &mut [PlatformLink] {
        match self {
            Self::Group {
                additional_platforms,
            } => additional_platforms,
            Self::Link(link) => std::slice::from_mut(link),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ResortRecord {
    #[serde(default)]
    pub id: String,
    pub name: String,
    pub location: String,
    #[serde(default)]
    pub features: OrderedMap<Feature>,
    #[serde(default)]
    pub staff: Vec<StaffMember>,
    #[serde(default)]
    pub platforms: OrderedMap<PlatformEntry>,
    #[serde(
        default,
        rename = "defaultPlatform",
        skip_serializing_if = "Option::is_none"
    )]
    pub default_platform: Option<String>,
}

impl ResortRecord {
    pub fn feature(&self, key: &str) -> Option<&Feature> {
        self.features.get(key)
    }

    /// 표시 라벨과 정확히 일치하는 직원을 찾는다.
    pub fn staff_by_display(&self, display: &str) -> Option<&StaffMember> {
        self.staff.iter().find(|member| member.display == display)
    }

    /// 플랫폼 키를 해석한다.
    /// 요청 키 → 리조트 기본 플랫폼 → `tripadvisor` → `default` 순서로 찾는다.
    pub fn platform(&self, platform_id: &str) -> Option<&PlatformEntry> {
        self.platforms
            .get(platform_id)
            .or_else(|| {
                self.default_platform
                    .as_deref()
                    .and_then(|key| self.platforms.get(key))
            })
            .or_else(|| self.platforms.get(FALLBACK_PLATFORM_ID))
            .or_else(|| self.platforms.get(DEFAULT_PLATFORM_KEY))
    }

    /// 해석된 플랫폼의 링크 목록. 아무것도 해석되지 않으면 비어 있다.
    pub fn platform_links(&self, platform_id: &str) -> Vec<PlatformLink> {
        self.platform(platform_id)
            .map(|entry| entry.links().to_vec())
            .unwrap_or_default()
    }

    pub fn summary(&self) -> ResortSummary {
        ResortSummary {
            id: self.id.clone(),
            name: self.name.clone(),
            location: self.location.clone(),
        }
    }
}

/// 리조트 선택 목록용 투영.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResortSummary {
    pub id: String,
    pub name: String,
    pub location: String,
}

/// 카탈로그 JSON 문서 형태.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CatalogDocument {
    pub resorts: OrderedMap<ResortRecord>,
    #[serde(
        default,
        rename = "defaultResort",
        skip_serializing_if = "Option::is_none"
    )]
    pub default_resort: Option<String>,
}

/// 카탈로그 불변식 위반.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogInvariantError {
    #[error("catalog contains no resorts")]
    Empty,
    #[error("resort id '{0}' appears more than once")]
    DuplicateResortId(String),
    #[error("default resort '{0}' is not present in the catalog")]
    UnknownDefault(String),
    #[error("resort '{resort}' lists staff display label '{display}' more than once")]
    DuplicateStaffLabel { resort: String, display: String },
    #[error("resort '{resort}' platform '{platform}' has an invalid url '{url}'")]
    InvalidPlatformUrl {
        resort: String,
        platform: String,
        url: String,
    },
}

/// 검증을 통과한 읽기 전용 리조트 카탈로그.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigurationCatalog {
    resorts: Vec<ResortRecord>,
    default_resort: Option<String>,
    default_index: usize,
}

impl TryFrom<CatalogDocument> for ConfigurationCatalog {
    type Error = CatalogInvariantError;

    fn try_from(document: CatalogDocument) -> Result<Self, Self::Error> {
        let mut resorts = Vec::with_capacity(document.resorts.len());
        for (key, mut record) in document.resorts.into_entries() {
            if record.id.trim().is_empty() {
                record.id = key;
            }
            for (platform_key, entry) in record.platforms.iter_mut() {
                for link in entry.links_mut() {
                    if link.id.trim().is_empty() {
                        link.id = platform_key.to_string();
                    }
                }
            }
            if resorts.iter().any(|r: &ResortRecord| r.id == record.id) {
                return Err(CatalogInvariantError::DuplicateResortId(record.id));
            }
            validate_record(&record)?;
            resorts.push(record);
        }

        if resorts.is_empty() {
            return Err(CatalogInvariantError::Empty);
        }

        let default_resort = document
            .default_resort
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty());

        let default_index = match default_resort.as_deref() {
            Some(id) => resorts
                .iter()
                .position(|r| r.id == id)
                .ok_or_else(|| CatalogInvariantError::UnknownDefault(id.to_string()))?,
            None => resorts
                .iter()
                .position(|r| r.id == FALLBACK_RESORT_ID)
                .unwrap_or(0),
        };

        Ok(Self {
            resorts,
            default_resort,
            default_index,
        })
    }
}

fn validate_record(record: &ResortRecord) -> Result<(), CatalogInvariantError> {
    for (idx, member) in record.staff.iter().enumerate() {
        if record.staff[..idx]
            .iter()
            .any(|earlier| earlier.display == member.display)
        {
            return Err(CatalogInvariantError::DuplicateStaffLabel {
                resort: record.id.clone(),
                display: member.display.clone(),
            });
        }
    }

    for (platform_key, entry) in record.platforms.iter() {
        for link in entry.links() {
            let valid = !link.url.trim().is_empty() && Url::parse(&link.url).is_ok();
            if !valid {
                return Err(CatalogInvariantError::InvalidPlatformUrl {
                    resort: record.id.clone(),
                    platform: platform_key.to_string(),
                    url: link.url.clone(),
                });
            }
        }
    }

    Ok(())
}

impl ConfigurationCatalog {
    /// JSON 문서를 파싱하고 불변식을 검증한다.
    pub fn from_document(document: CatalogDocument) -> Result<Self, CatalogInvariantError> {
        Self::try_from(document)
    }

    /// 리조트 식별자로 레코드를 찾는다. 없으면 `None`.
    pub fn resort(&self, id: &str) -> Option<&ResortRecord> {
        self.resorts.iter().find(|r| r.id == id)
    }

    /// 리조트를 찾고, 없으면 경고 후 기본 리조트로 대체한다.
    pub fn get_resort(&self, id: &str) -> &ResortRecord {
        if let Some(record) = self.resort(id) {
            return record;
        }
        let fallback = self.default_record();
        tracing::warn!(
            requested = id,
            substituted = fallback.id.as_str(),
            "resort not found, using default"
        );
        fallback
    }

    /// 기본 리조트 레코드. 기본값 → 내장 식별자 → 첫 레코드 순서로 결정된다.
    pub fn default_record(&self) -> &ResortRecord {
        &self.resorts[self.default_index]
    }

    pub fn default_resort_id(&self) -> Option<&str> {
        self.default_resort.as_deref()
    }

    /// 선택 목록용 요약. 문서 순서를 유지한다.
    pub fn list_resorts(&self) -> Vec<ResortSummary> {
        self.resorts.iter().map(ResortRecord::summary).collect()
    }

    pub fn resorts(&self) -> &[ResortRecord] {
        &self.resorts
    }

    pub fn to_document(&self) -> CatalogDocument {
        CatalogDocument {
            resorts: self
                .resorts
                .iter()
                .map(|r| (r.id.clone(), r.clone()))
                .collect(),
            default_resort: self.default_resort.clone(),
        }
    }

    /// 외부 카탈로그를 사용할 수 없을 때 쓰는 내장 카탈로그(리조트 1개, 플랫폼 2개).
    pub fn fallback() -> Self {
        let record = fallback_resort();
        Self {
            resorts: vec![record],
            default_resort: Some(FALLBACK_RESORT_ID.to_string()),
            default_index: 0,
        }
    }
}

fn feature(label: &str, icon: &str, prompt: &str, fallback: &str) -> Feature {
    Feature {
        label: label.to_string(),
        icon: icon.to_string(),
        prompt_fragment: prompt.to_string(),
        fallback_fragment: fallback.to_string(),
    }
}

fn staff(name: &str, role: &str) -> StaffMember {
    StaffMember {
        name: name.to_string(),
        role: role.to_string(),
        display: format!("{name} ({role})"),
    }
}

fn fallback_resort() -> ResortRecord {
    let features = [
        (
            "location",
            feature(
                "Perfect Location",
                "📍",
                "perfect location in Milos",
                "The location in Milos was absolutely perfect",
            ),
        ),
        (
            "cleanliness",
            feature(
                "Impeccable Cleanliness",
                "✨",
                "impeccable cleanliness",
                "The attention to cleanliness was impeccable",
            ),
        ),
        (
            "hospitality",
            feature(
                "Exceptional Hospitality",
                "🤝",
                "exceptional hospitality",
                "The hospitality exceeded all expectations",
            ),
        ),
        (
            "dining",
            feature(
                "Exquisite Dining",
                "🍽️",
                "exquisite dining experiences",
                "The dining experience was truly memorable",
            ),
        ),
        (
            "spa",
            feature(
                "Luxurious Spa",
                "🧘",
                "luxurious spa treatments",
                "The spa treatments were absolutely divine",
            ),
        ),
        (
            "ambiance",
            feature(
                "Serene Ambiance",
                "🌅",
                "serene and romantic ambiance",
                "The ambiance was perfectly serene and romantic",
            ),
        ),
    ]
    .into_iter()
    .map(|(key, f)| (key.to_string(), f))
    .collect();

    let platforms = [(
        DEFAULT_PLATFORM_KEY.to_string(),
        PlatformEntry::Group {
            additional_platforms: vec![
                PlatformLink {
                    id: "tripadvisor".to_string(),
                    name: "TripAdvisor".to_string(),
                    url: "https://www.tripadvisor.com/Hotel_Review-g12880133-d20284485-Reviews-Domes_White_Coast_Milos-Mytakas_Milos_Cyclades_South_Aegean.html".to_string(),
                    checked: true,
                },
                PlatformLink {
                    id: "google".to_string(),
                    name: "Google Maps".to_string(),
                    url: "https://search.google.com/local/writereview?placeid=ChIJjUneyFTemBQR8l8IIFjXpKE".to_string(),
                    checked: true,
                },
            ],
        },
    )]
    .into_iter()
    .collect();

    ResortRecord {
        id: FALLBACK_RESORT_ID.to_string(),
        name: "Domes White Coast Milos".to_string(),
        location: "Milos, Greece".to_string(),
        features,
        staff: vec![
            staff("Marianna", "Guest Relations"),
            staff("Apostolos", "Restaurant"),
            staff("Christina", "Reception"),
            staff("Nikos", "Pool Bar"),
            staff("Elena", "Soma Spa"),
            staff("George", "Concierge"),
        ],
        platforms,
        default_platform: None,
    }
}
