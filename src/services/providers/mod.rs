/// External provider abstractions
///
/// The pipeline talks to two external endpoints: a generative text model and a
/// poster metadata API. Both sit behind traits so the orchestrator and route
/// tests can substitute mocks and assert call counts.
use crate::error::AppResult;

pub mod gemini;
pub mod tmdb;

/// Generative text model client
///
/// One prompt in, raw model text out. Implementations fail with an error on
/// non-success status or transport failure; the orchestrator treats any error
/// as fallback-triggering, never request-failing.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait GenerationClient: Send + Sync {
    async fn generate(&self, prompt: &str) -> AppResult<String>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}

/// Poster artwork lookup
///
/// Resolves a display poster URL for a title, `Ok(None)` when the catalog has
/// no artwork. Errors are contained by the enrichment stage and resolve to a
/// null poster for that item only.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait PosterProvider: Send + Sync {
    async fn find_poster(&self, title: &str) -> AppResult<Option<String>>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}
