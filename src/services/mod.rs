pub mod fallback;
pub mod links;
pub mod normalizer;
pub mod orchestrator;
pub mod prompt;
pub mod providers;
