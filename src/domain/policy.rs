//! 도메인 정책(프롬프트 구성, 대체 리뷰 템플릿).
//!
//! 두 함수 모두 순수 함수이며 실패하지 않는다. 현재 리조트는 인자로만 받는다.

use crate::domain::resort::ResortRecord;
use crate::domain::review::ReviewRequest;

const PROMPT_CLOSING: &str = " Keep the review natural, personal, and under 150 words. Make it sound like a genuine guest experience, not marketing copy.";
const FALLBACK_CLOSING: &str = "Highly recommended!";

/// completion 서비스에 보낼 리뷰 작성 지시문을 만든다.
pub fn build_prompt(resort: &ResortRecord, request: &ReviewRequest) -> String {
    // 카탈로그에 없는 기능 키는 건너뛴다.
    let loved: Vec<&str> = request
        .feature_keys
        .iter()
        .filter_map(|key| resort.feature(key))
        .map(|feature| feature.prompt_fragment.as_str())
        .collect();

    let mut out = format!(
        "Write a genuine, authentic hotel review for {} in {}. The guest particularly loved: {}.",
        resort.name,
        resort.location,
        loved.join(", ")
    );

    if !request.staff_labels.is_empty() {
        out.push_str(&format!(
            " They want to specially recognize {} for their exceptional service.",
            staff_names(resort, &request.staff_labels).join(", ")
        ));
    }

    if !request.comment.is_empty() {
        out.push_str(&format!(" They also mentioned: \"{}\"", request.comment));
    }

    out.push_str(PROMPT_CLOSING);
    out
}

/// completion 서비스 없이 만드는 템플릿 리뷰.
pub fn build_fallback_review(resort: &ResortRecord, request: &ReviewRequest) -> String {
    let mut out = format!("Exceptional stay at {}! ", resort.name);

    let narrative: Vec<&str> = request
        .feature_keys
        .iter()
        .filter_map(|key| resort.feature(key))
        .map(|feature| feature.fallback_fragment.as_str())
        .collect();
    if !narrative.is_empty() {
        out.push_str(&narrative.join(". "));
        out.push_str(". ");
    }

    if !request.staff_labels.is_empty() {
        out.push_str(&format!(
            "Special thanks to {} for making our stay memorable. ",
            staff_names(resort, &request.staff_labels).join(", ")
        ));
    }

    if !request.comment.is_empty() {
        out.push_str(&request.comment);
        out.push(' ');
    }

    out.push_str(FALLBACK_CLOSING);
    out
}

/// 표시 라벨을 실제 이름으로 바꾼다. 찾지 못한 라벨은 그대로 쓴다.
fn staff_names<'a>(resort: &'a ResortRecord, labels: &'a [String]) -> Vec<&'a str> {
    labels
        .iter()
        .map(|label| {
            resort
                .staff_by_display(label)
                .map_or(label.as_str(), |member| member.name.as_str())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::resort::ConfigurationCatalog;

    fn milos() -> ResortRecord {
        ConfigurationCatalog::fallback().default_record().clone()
    }

    #[test]
    fn prompt_covers_features_staff_and_comment() {
        let request = ReviewRequest::new(
            ["location", "cleanliness"],
            ["Marianna (Guest Relations)"],
            "Loved the sunset.",
        );
        let prompt = build_prompt(&milos(), &request);

        assert!(prompt.starts_with(
            "Write a genuine, authentic hotel review for Domes White Coast Milos in Milos, Greece."
        ));
        assert!(prompt.contains("perfect location in Milos, impeccable cleanliness"));
        assert!(prompt.contains("recognize Marianna for their exceptional service."));
        assert!(prompt.contains("They also mentioned: \"Loved the sunset.\""));
        assert!(prompt.ends_with(PROMPT_CLOSING));
    }

    #[test]
    fn unknown_feature_keys_render_an_empty_loved_list() {
        let request = ReviewRequest::new(["doesNotExist"], Vec::<String>::new(), "");
        let prompt = build_prompt(&milos(), &request);

        assert_eq!(
            prompt,
            format!(
                "Write a genuine, authentic hotel review for Domes White Coast Milos in Milos, Greece. The guest particularly loved: .{PROMPT_CLOSING}"
            )
        );
    }

    #[test]
    fn unresolved_staff_label_passes_through() {
        let request = ReviewRequest::new(Vec::<String>::new(), ["Dimitris (Night Shift)"], "");
        let prompt = build_prompt(&milos(), &request);
        assert!(prompt.contains("recognize Dimitris (Night Shift) for"));

        let fallback = build_fallback_review(&milos(), &request);
        assert!(fallback.contains("Special thanks to Dimitris (Night Shift) for making"));
    }

    #[test]
    fn fallback_review_follows_template() {
        let request = ReviewRequest::new(
            ["spa", "missing", "dining"],
            ["Elena (Soma Spa)", "George (Concierge)"],
            "Will return.",
        );
        let review = build_fallback_review(&milos(), &request);

        assert_eq!(
            review,
            "Exceptional stay at Domes White Coast Milos! \
             The spa treatments were absolutely divine. The dining experience was truly memorable. \
             Special thanks to Elena, George for making our stay memorable. \
             Will return. Highly recommended!"
        );
    }

    #[test]
    fn empty_selection_still_produces_text() {
        let request = ReviewRequest::default();
        assert_eq!(
            build_fallback_review(&milos(), &request),
            "Exceptional stay at Domes White Coast Milos! Highly recommended!"
        );
        assert!(build_prompt(&milos(), &request).contains("particularly loved: ."));
    }
}
