pub mod completion_client;
pub mod fallback_scorer;
pub mod recommendation_service;

pub use completion_client::{CompletionClient, OpenAiCompletionClient};
pub use fallback_scorer::FallbackScorer;
pub use recommendation_service::{build_prompt, RecommendationService};
