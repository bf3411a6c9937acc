/// Request orchestrator
///
/// Drives the pipeline: prompt → generation → normalization → (movie mode)
/// poster enrichment. Every failure past validation is absorbed into an
/// explicit [`RecommendationOutcome::Fallback`] instead of crossing component
/// boundaries as an error, so the caller's UI is never shown a bare error
/// screen.
use std::sync::Arc;
use std::time::Instant;

use crate::{
    error::{AppError, AppResult},
    models::{Mode, RecommendationItem, RecommendationRequest},
    services::{
        fallback, normalizer, prompt,
        providers::{GenerationClient, PosterProvider},
    },
};

/// Whether a response carries genuine model output or the fixed degraded set.
///
/// Modeled as an explicit enum so the degrade decision is a testable branch
/// rather than implicit error control flow.
#[derive(Debug)]
pub enum RecommendationOutcome {
    Generated(Vec<RecommendationItem>),
    Fallback {
        items: Vec<RecommendationItem>,
        error: AppError,
    },
}

/// Runs the full pipeline for one validated request. Never fails: any
/// pipeline error resolves to the fallback set for the request's mode, with
/// the triggering error kept for the diagnostic response field.
pub async fn run(
    generator: Arc<dyn GenerationClient>,
    posters: Option<Arc<dyn PosterProvider>>,
    request: &RecommendationRequest,
) -> RecommendationOutcome {
    match generate_items(generator, posters, request).await {
        Ok(items) => RecommendationOutcome::Generated(items),
        Err(error) => {
            tracing::warn!(
                error = %error,
                mode = %request.mode,
                "Pipeline failed, serving fallback set"
            );
            RecommendationOutcome::Fallback {
                items: fallback::items(request.mode),
                error,
            }
        }
    }
}

async fn generate_items(
    generator: Arc<dyn GenerationClient>,
    posters: Option<Arc<dyn PosterProvider>>,
    request: &RecommendationRequest,
) -> AppResult<Vec<RecommendationItem>> {
    let prompt = prompt::build_prompt(request);

    let started = Instant::now();
    let raw = generator.generate(&prompt).await?;

    tracing::info!(
        provider = generator.name(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Generation call completed"
    );

    let mut items = normalizer::normalize(&raw, request.mode)?;

    if request.mode == Mode::Movie {
        match posters {
            Some(provider) => enrich_posters(provider, &mut items).await,
            None => tracing::info!("Poster enrichment disabled, no lookup credential"),
        }
    }

    Ok(items)
}

/// Attaches poster URLs to movie items, one concurrent lookup per item.
///
/// Each lookup is independently fault-tolerant: a failed or joined-out task
/// leaves that item's poster as `None` without affecting siblings, and never
/// escalates into the fallback path.
async fn enrich_posters(provider: Arc<dyn PosterProvider>, items: &mut [RecommendationItem]) {
    let tasks: Vec<_> = items
        .iter()
        .map(|item| {
            let provider = Arc::clone(&provider);
            let title = item.title.clone();
            tokio::spawn(async move { provider.find_poster(&title).await })
        })
        .collect();

    for (item, task) in items.iter_mut().zip(tasks) {
        item.poster_url = match task.await {
            Ok(Ok(poster)) => poster,
            Ok(Err(e)) => {
                tracing::warn!(title = %item.title, error = %e, "Poster lookup failed");
                None
            }
            Err(e) => {
                tracing::warn!(title = %item.title, error = %e, "Poster task panicked");
                None
            }
        };
    }

    tracing::info!(
        enriched = items.iter().filter(|i| i.poster_url.is_some()).count(),
        total = items.len(),
        "Poster enrichment completed"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::providers::{MockGenerationClient, MockPosterProvider};

    const THREE_MOVIES: &str = r#"[
        { "title": "기생충", "reason": "r1", "creator": "봉준호", "year": "2019" },
        { "title": "올드보이", "reason": "r2", "creator": "박찬욱", "year": "2003" },
        { "title": "버닝", "reason": "r3", "creator": "이창동", "year": "2018" }
    ]"#;

    fn request(mode: Mode) -> RecommendationRequest {
        RecommendationRequest {
            mode,
            mood_genre: "스릴러".to_string(),
            theme: String::new(),
            watched: String::new(),
            creator_name: String::new(),
            constraints: String::new(),
        }
    }

    fn generator_returning(raw: &'static str) -> Arc<dyn GenerationClient> {
        let mut mock = MockGenerationClient::new();
        mock.expect_generate()
            .times(1)
            .returning(move |_| Ok(raw.to_string()));
        mock.expect_name().return_const("mock");
        Arc::new(mock)
    }

    #[tokio::test]
    async fn test_generation_error_serves_fallback_with_cause() {
        let mut generator = MockGenerationClient::new();
        generator
            .expect_generate()
            .times(1)
            .returning(|_| Err(AppError::ExternalApi("Gemini API returned status 503".into())));

        let outcome = run(Arc::new(generator), None, &request(Mode::Movie)).await;

        match outcome {
            RecommendationOutcome::Fallback { items, error } => {
                assert_eq!(items, fallback::items(Mode::Movie));
                assert!(error.to_string().contains("503"));
            }
            other => panic!("expected fallback, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_unparsable_output_serves_fallback() {
        let generator = generator_returning("추천드릴 작품이 없네요.");

        let outcome = run(generator, None, &request(Mode::Book)).await;

        match outcome {
            RecommendationOutcome::Fallback { items, error } => {
                assert_eq!(items, fallback::items(Mode::Book));
                assert!(matches!(error, AppError::NoItems));
            }
            other => panic!("expected fallback, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_book_mode_never_calls_poster_provider() {
        let generator = generator_returning(r#"[{ "title": "데미안" }]"#);

        let mut posters = MockPosterProvider::new();
        posters.expect_find_poster().times(0);

        let outcome = run(generator, Some(Arc::new(posters)), &request(Mode::Book)).await;

        match outcome {
            RecommendationOutcome::Generated(items) => {
                assert!(items.iter().all(|i| i.poster_url.is_none()));
            }
            other => panic!("expected generated, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_poster_failure_isolated_to_one_item() {
        let generator = generator_returning(THREE_MOVIES);

        let mut posters = MockPosterProvider::new();
        posters.expect_find_poster().times(3).returning(|title| {
            if title == "올드보이" {
                Err(AppError::ExternalApi("TMDB API returned status 500".into()))
            } else {
                Ok(Some(format!("https://image.tmdb.org/t/p/w500/{}.jpg", title)))
            }
        });

        let outcome = run(generator, Some(Arc::new(posters)), &request(Mode::Movie)).await;

        match outcome {
            RecommendationOutcome::Generated(items) => {
                assert_eq!(items.len(), 3);
                assert!(items[0].poster_url.is_some());
                assert_eq!(items[1].poster_url, None);
                assert!(items[2].poster_url.is_some());
            }
            other => panic!("expected generated, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_movie_mode_without_provider_skips_enrichment() {
        let generator = generator_returning(THREE_MOVIES);

        let outcome = run(generator, None, &request(Mode::Movie)).await;

        match outcome {
            RecommendationOutcome::Generated(items) => {
                assert_eq!(items.len(), 3);
                assert!(items.iter().all(|i| i.poster_url.is_none()));
            }
            other => panic!("expected generated, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_missing_poster_resolves_to_none() {
        let generator = generator_returning(r#"[{ "title": "무명작" }]"#);

        let mut posters = MockPosterProvider::new();
        posters
            .expect_find_poster()
            .times(1)
            .returning(|_| Ok(None));

        let outcome = run(generator, Some(Arc::new(posters)), &request(Mode::Movie)).await;

        match outcome {
            RecommendationOutcome::Generated(items) => {
                assert_eq!(items[0].poster_url, None);
            }
            other => panic!("expected generated, got {:?}", other),
        }
    }
}
