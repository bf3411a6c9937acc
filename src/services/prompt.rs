/// Prompt builder
///
/// Turns a normalized request into one deterministic instruction string with
/// an explicit output-format contract. Three constraints are load-bearing for
/// the normalizer: exactly three entries, no fabricated works, and no line
/// breaks inside JSON string values.
use crate::models::{Mode, RecommendationRequest};

/// Echo placeholder for fields the user left empty.
const EMPTY_FIELD: &str = "(없음)";

fn field(value: &str) -> &str {
    if value.is_empty() {
        EMPTY_FIELD
    } else {
        value
    }
}

pub fn build_prompt(request: &RecommendationRequest) -> String {
    let (domain, watched_label, creator_label) = match request.mode {
        Mode::Movie => ("영화", "이전에 봤던 영화", "감독"),
        Mode::Book => ("도서", "이전에 읽었던 책", "저자"),
    };

    format!(
        r#"너는 {domain} 추천 전문가다.
사용자의 취향에 맞춰 **실존하는 작품** 3개를 추천해줘.

[사용자 입력]
- 장르/분위기: {mood_genre}
- 주제: {theme}
- {watched_label}: {watched}
- {creator_label}: {creator_name}
- 자유 조건: {constraints}

[출력 형식]
반드시 아래와 같은 **JSON Array** 포맷으로 출력해.
**중요: JSON 문자열 안에 절대 줄바꿈(엔터)을 넣지 마. 모든 텍스트는 한 줄로 작성해.**

[
  {{ "title": "작품제목", "reason": "추천 이유(한 줄로 짧게)", "creator": "감독또는저자", "year": "2023" }},
  {{ "title": "작품제목", "reason": "추천 이유(한 줄로 짧게)", "creator": "감독또는저자", "year": "2020" }},
  {{ "title": "작품제목", "reason": "추천 이유(한 줄로 짧게)", "creator": "감독또는저자", "year": "2019" }}
]

[규칙]
1. {watched_label}와 유사한 결을 가진 작품을 우선 추천.
2. 없는 작품을 지어내지 말 것.
3. 한국어로 출력할 것."#,
        domain = domain,
        mood_genre = field(&request.mood_genre),
        theme = field(&request.theme),
        watched_label = watched_label,
        watched = field(&request.watched),
        creator_label = creator_label,
        creator_name = field(&request.creator_name),
        constraints = field(&request.constraints),
    )
}
