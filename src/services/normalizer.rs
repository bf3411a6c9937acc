/// Response normalizer
///
/// Repairs raw model text into the canonical item schema. The model is asked
/// for a bare JSON array with one-line strings, but in practice the text may
/// arrive wrapped in markdown fences or with raw line breaks inside string
/// values, either of which would make it unparsable as-is.
use serde_json::Value;

use crate::{
    error::{AppError, AppResult},
    models::{Mode, RecommendationItem},
    services::links,
};

/// Reason text for entries the model returned without one.
const DEFAULT_REASON: &str = "추천 작품입니다.";

/// Strips code-fence markers, collapses line breaks to single spaces, and
/// trims. The line-break collapse is load-bearing: an unescaped newline inside
/// a JSON string value would otherwise fail the parse outright.
pub fn clean_raw_text(raw: &str) -> String {
    raw.replace("```json", "")
        .replace("```", "")
        .replace(['\n', '\r'], " ")
        .trim()
        .to_string()
}

/// Reads a field tolerantly: strings pass through, numbers are stringified
/// (models occasionally emit `"year": 2023`), anything else is empty.
fn text_field(entry: &Value, key: &str) -> String {
    match entry.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

/// Cleans and parses raw model text, mapping each parsed entry into a
/// [`RecommendationItem`] with defaulted fields and derived links.
///
/// Parse failure is treated as an empty sequence, and an empty sequence is
/// the single condition that decides "generation succeeded" vs. "degrade":
/// it returns [`AppError::NoItems`] so the orchestrator serves the fallback
/// set instead.
pub fn normalize(raw: &str, mode: Mode) -> AppResult<Vec<RecommendationItem>> {
    let cleaned = clean_raw_text(raw);

    let entries: Vec<Value> = serde_json::from_str(&cleaned).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Model output is not a JSON array, treating as empty");
        Vec::new()
    });

    let items: Vec<RecommendationItem> = entries
        .iter()
        .map(|entry| {
            let title = text_field(entry, "title");
            let creator = text_field(entry, "creator");
            let year = text_field(entry, "year");
            let reason = match text_field(entry, "reason") {
                r if r.is_empty() => DEFAULT_REASON.to_string(),
                r => r,
            };

            let query = links::search_query(&title, &creator);

            RecommendationItem {
                title,
                creator,
                year,
                reason,
                external_url: links::external_url(mode, &query),
                detail_url: links::detail_url(&query),
                poster_url: None,
            }
        })
        .collect();

    if items.is_empty() {
        return Err(AppError::NoItems);
    }

    tracing::debug!(items = items.len(), "Normalized model output");

    Ok(items)
}
