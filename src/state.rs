use std::sync::Arc;

use crate::config::Config;
use crate::services::providers::{
    gemini::GeminiClient, tmdb::TmdbProvider, GenerationClient, PosterProvider,
};

/// Shared application state: handles to the two external providers.
///
/// Both are optional because they depend on provisioned credentials. A missing
/// generation client makes the recommend endpoint answer 500; a missing poster
/// provider only disables enrichment. Everything else is request-scoped, so
/// there is no mutable state here.
#[derive(Clone)]
pub struct AppState {
    pub generator: Option<Arc<dyn GenerationClient>>,
    pub posters: Option<Arc<dyn PosterProvider>>,
}

impl AppState {
    pub fn new(
        generator: Option<Arc<dyn GenerationClient>>,
        posters: Option<Arc<dyn PosterProvider>>,
    ) -> Self {
        Self { generator, posters }
    }

    /// Builds provider clients from configuration.
    pub fn from_config(config: &Config) -> Self {
        let generator = config.gemini_api_key.clone().map(|key| {
            Arc::new(GeminiClient::new(key, config.gemini_api_url.clone()))
                as Arc<dyn GenerationClient>
        });

        let posters = config.tmdb_api_key.clone().map(|key| {
            Arc::new(TmdbProvider::new(key, config.tmdb_api_url.clone()))
                as Arc<dyn PosterProvider>
        });

        tracing::info!(
            generation_configured = generator.is_some(),
            enrichment_configured = posters.is_some(),
            "Application state initialized"
        );

        Self { generator, posters }
    }
}
