// Recommendations module: "find my match" service suggestions

pub mod controllers;
pub mod models;
pub mod services;

pub use models::{Need, Recommendation, RecommendationSource, Selections, Specificity, Style, Timing};
pub use services::{CompletionClient, FallbackScorer, OpenAiCompletionClient, RecommendationService};
