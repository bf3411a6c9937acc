use serde::{Deserialize, Serialize};

/// Domain selector for a recommendation request.
///
/// The mode changes prompt wording, outbound link templates, and whether
/// poster enrichment runs (movie only).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Movie,
    Book,
}

impl Mode {
    /// Parses the wire value. Anything other than the two recognized strings
    /// is rejected before any downstream work.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "movie" => Some(Mode::Movie),
            "book" => Some(Mode::Book),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Movie => "movie",
            Mode::Book => "book",
        }
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// Inbound request types
// ============================================================================

/// Raw JSON body of the recommend endpoint.
///
/// `mode` stays a plain string here so the handler can reject unknown values
/// with an explicit message instead of a generic deserialization error.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendPayload {
    pub mode: Option<String>,
    #[serde(default)]
    pub mood_genre: Option<String>,
    #[serde(default)]
    pub theme: Option<String>,
    #[serde(default)]
    pub watched: Option<String>,
    #[serde(default)]
    pub creator_name: Option<String>,
    #[serde(default)]
    pub constraints: Option<String>,
}

/// Validated, normalized form of a recommendation request.
///
/// All text fields are whitespace-trimmed and empty when the caller omitted
/// them, never absent in downstream logic.
#[derive(Debug, Clone)]
pub struct RecommendationRequest {
    pub mode: Mode,
    pub mood_genre: String,
    pub theme: String,
    pub watched: String,
    pub creator_name: String,
    pub constraints: String,
}

impl RecommendationRequest {
    /// Normalizes a parsed payload. `mode` must already have been validated.
    pub fn from_payload(mode: Mode, payload: RecommendPayload) -> Self {
        let trim = |field: Option<String>| field.unwrap_or_default().trim().to_string();

        Self {
            mode,
            mood_genre: trim(payload.mood_genre),
            theme: trim(payload.theme),
            watched: trim(payload.watched),
            creator_name: trim(payload.creator_name),
            constraints: trim(payload.constraints),
        }
    }
}

// ============================================================================
// Outbound response types
// ============================================================================

/// A single recommended work returned to the client.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationItem {
    pub title: String,
    pub creator: String,
    pub year: String,
    pub reason: String,
    pub external_url: String,
    pub detail_url: String,
    /// Always `None` in book mode; populated in movie mode when the poster
    /// lookup succeeds.
    pub poster_url: Option<String>,
}

/// Response envelope for the recommend endpoint.
#[derive(Debug, Serialize)]
pub struct RecommendationResponse {
    pub mode: Mode,
    pub items: Vec<RecommendationItem>,
    /// Set to the fallback marker when the items are the fixed degraded set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    /// Diagnostic detail, only ever present alongside the fallback marker.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_parse_recognized_values() {
        assert_eq!(Mode::parse("movie"), Some(Mode::Movie));
        assert_eq!(Mode::parse("book"), Some(Mode::Book));
    }

    #[test]
    fn test_mode_parse_rejects_unknown() {
        assert_eq!(Mode::parse("music"), None);
        assert_eq!(Mode::parse("Movie"), None);
        assert_eq!(Mode::parse(""), None);
    }

    #[test]
    fn test_request_normalization_trims_and_defaults() {
        let payload = RecommendPayload {
            mode: Some("movie".to_string()),
            mood_genre: Some("  thriller  ".to_string()),
            theme: None,
            watched: Some("".to_string()),
            creator_name: Some("봉준호".to_string()),
            constraints: None,
        };

        let request = RecommendationRequest::from_payload(Mode::Movie, payload);
        assert_eq!(request.mood_genre, "thriller");
        assert_eq!(request.theme, "");
        assert_eq!(request.watched, "");
        assert_eq!(request.creator_name, "봉준호");
        assert_eq!(request.constraints, "");
    }

    #[test]
    fn test_payload_accepts_camel_case_fields() {
        let payload: RecommendPayload = serde_json::from_str(
            r#"{"mode": "book", "moodGenre": "잔잔한", "creatorName": "헤르만 헤세"}"#,
        )
        .unwrap();
        assert_eq!(payload.mode.as_deref(), Some("book"));
        assert_eq!(payload.mood_genre.as_deref(), Some("잔잔한"));
        assert_eq!(payload.creator_name.as_deref(), Some("헤르만 헤세"));
    }

    #[test]
    fn test_item_serializes_camel_case_with_null_poster() {
        let item = RecommendationItem {
            title: "인셉션".to_string(),
            creator: "크리스토퍼 놀란".to_string(),
            year: "2010".to_string(),
            reason: "추천 작품입니다.".to_string(),
            external_url: "https://example.com".to_string(),
            detail_url: "https://example.com".to_string(),
            poster_url: None,
        };

        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["externalUrl"], "https://example.com");
        assert_eq!(json["detailUrl"], "https://example.com");
        assert!(json["posterUrl"].is_null());
    }
}
