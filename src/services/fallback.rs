/// Fallback provider
///
/// Fixed, mode-specific sets of well-known works served whenever the pipeline
/// fails after validation. Links are derived the same way as for generated
/// items (title-only, no creator available); posters are never attached.
use crate::{
    models::{Mode, RecommendationItem},
    services::links,
};

/// Marker placed in the response `note` field so the caller can distinguish
/// degraded output from genuine model output.
pub const FALLBACK_NOTE: &str = "fallback";

const FALLBACK_REASON: &str = "AI 응답 지연으로 기본 추천을 표시합니다.";

const MOVIE_TITLES: [&str; 3] = ["쇼생크 탈출", "인셉션", "라라랜드"];
const BOOK_TITLES: [&str; 3] = ["데미안", "어린왕자", "미움받을 용기"];

pub fn items(mode: Mode) -> Vec<RecommendationItem> {
    let titles = match mode {
        Mode::Movie => MOVIE_TITLES,
        Mode::Book => BOOK_TITLES,
    };

    titles
        .iter()
        .map(|title| RecommendationItem {
            title: title.to_string(),
            creator: String::new(),
            year: String::new(),
            reason: FALLBACK_REASON.to_string(),
            external_url: links::external_url(mode, title),
            detail_url: links::detail_url(title),
            poster_url: None,
        })
        .collect()
}
