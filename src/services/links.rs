/// Outbound search-link derivation
///
/// Items carry two derived links: a mode-specific "watch/buy" search and a
/// general web search. Queries are percent-encoded; an empty query yields an
/// empty string rather than a link to a blank search page.
use crate::models::Mode;

/// Space-joins the non-empty parts of a title/creator pair into one query.
pub fn search_query(title: &str, creator: &str) -> String {
    [title, creator]
        .iter()
        .map(|part| part.trim())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Mode-specific outbound link: trailer search on YouTube for movies,
/// Kyobobook keyword search for books.
pub fn external_url(mode: Mode, query: &str) -> String {
    if query.is_empty() {
        return String::new();
    }

    match mode {
        Mode::Movie => format!(
            "https://www.youtube.com/results?search_query={}",
            urlencoding::encode(&format!("{} 예고편", query))
        ),
        Mode::Book => format!(
            "https://search.kyobobook.co.kr/search?keyword={}",
            urlencoding::encode(query)
        ),
    }
}

/// General web-search link for the work.
pub fn detail_url(query: &str) -> String {
    if query.is_empty() {
        return String::new();
    }

    format!(
        "https://www.google.com/search?q={}",
        urlencoding::encode(query)
    )
}
