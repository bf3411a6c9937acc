/// TMDB poster provider
///
/// Queries `/3/search/movie` with a Korean locale hint and takes the first
/// result's `poster_path`, resolved against the w500 image CDN. Empty result
/// sets and entries without artwork both resolve to `Ok(None)`.
use std::time::Duration;

use reqwest::Client as HttpClient;
use serde::Deserialize;

use crate::{
    error::{AppError, AppResult},
    services::providers::PosterProvider,
};

const POSTER_IMAGE_BASE: &str = "https://image.tmdb.org/t/p/w500";

/// A slow poster lookup only delays its own item, but there is no cancellation
/// once the fan-out starts, so keep the bound tight.
const LOOKUP_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<SearchResult>,
}

#[derive(Debug, Deserialize)]
struct SearchResult {
    poster_path: Option<String>,
}

/// First result's artwork, if any.
fn first_poster_url(response: SearchResponse) -> Option<String> {
    response
        .results
        .into_iter()
        .next()
        .and_then(|r| r.poster_path)
        .map(|path| format!("{}{}", POSTER_IMAGE_BASE, path))
}

#[derive(Clone)]
pub struct TmdbProvider {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
}

impl TmdbProvider {
    pub fn new(api_key: String, api_url: String) -> Self {
        let http_client = HttpClient::builder()
            .timeout(LOOKUP_TIMEOUT)
            .build()
            .unwrap_or_default();

        Self {
            http_client,
            api_key,
            api_url,
        }
    }
}

#[async_trait::async_trait]
impl PosterProvider for TmdbProvider {
    async fn find_poster(&self, title: &str) -> AppResult<Option<String>> {
        if title.trim().is_empty() {
            return Ok(None);
        }

        let url = format!("{}/3/search/movie", self.api_url);

        let response = self
            .http_client
            .get(&url)
            .query(&[
                ("api_key", self.api_key.as_str()),
                ("query", title),
                ("language", "ko-KR"),
                ("page", "1"),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "TMDB API returned status {}: {}",
                status, body
            )));
        }

        let search: SearchResponse = response.json().await?;
        let poster = first_poster_url(search);

        tracing::debug!(
            title = %title,
            found = poster.is_some(),
            provider = "tmdb",
            "Poster lookup completed"
        );

        Ok(poster)
    }

    fn name(&self) -> &'static str {
        "tmdb"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_poster_url_resolves_cdn_path() {
        let json = r#"{
            "results": [
                { "poster_path": "/q719jXXEzOoYaps6babgKnONONX.jpg" },
                { "poster_path": "/other.jpg" }
            ]
        }"#;

        let response: SearchResponse = serde_json::from_str(json).unwrap();
        assert_eq!(
            first_poster_url(response),
            Some("https://image.tmdb.org/t/p/w500/q719jXXEzOoYaps6babgKnONONX.jpg".to_string())
        );
    }

    #[test]
    fn test_first_poster_url_missing_path() {
        let response: SearchResponse =
            serde_json::from_str(r#"{"results": [{ "poster_path": null }]}"#).unwrap();
        assert_eq!(first_poster_url(response), None);
    }

    #[test]
    fn test_first_poster_url_empty_results() {
        let response: SearchResponse = serde_json::from_str(r#"{"results": []}"#).unwrap();
        assert_eq!(first_poster_url(response), None);

        let response: SearchResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(first_poster_url(response), None);
    }

    #[tokio::test]
    async fn test_empty_title_short_circuits() {
        let provider = TmdbProvider::new("test_key".to_string(), "http://test.local".to_string());
        let result = provider.find_poster("  ").await.unwrap();
        assert_eq!(result, None);
    }
}
