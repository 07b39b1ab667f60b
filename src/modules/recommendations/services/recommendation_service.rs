use std::sync::Arc;

use tracing::{info, warn};

use crate::core::{AppError, Result};
use crate::modules::catalog::models::CareService;
use crate::modules::catalog::repositories::CareServiceRepository;
use crate::modules::recommendations::models::{Recommendation, RecommendationSource, Selections};
use crate::modules::recommendations::services::{CompletionClient, FallbackScorer};

/// Picks one active service for the wizard answers
pub struct RecommendationService {
    services: Arc<dyn CareServiceRepository>,
    completion: Option<Arc<dyn CompletionClient>>,
    scorer: FallbackScorer,
}

impl RecommendationService {
    /// `completion` is None when no provider is configured; every answer then
    /// comes from the fallback scorer
    pub fn new(
        services: Arc<dyn CareServiceRepository>,
        completion: Option<Arc<dyn CompletionClient>>,
    ) -> Self {
        Self {
            services,
            completion,
            scorer: FallbackScorer,
        }
    }

    pub async fn recommend(&self, selections: Selections) -> Result<Recommendation> {
        let mut catalog = self.services.list(true).await?;
        if catalog.is_empty() {
            return Err(AppError::not_found("No services are available."));
        }

        if let Some(index) = self.ask_model(&selections, &catalog).await {
            info!(service_slug = %catalog[index].slug, "Recommendation from completion provider");
            return Ok(Recommendation {
                service: catalog.swap_remove(index),
                source: RecommendationSource::Ai,
            });
        }

        let best = self.scorer.best_slug(&selections);
        let index = catalog
            .iter()
            .position(|service| service.slug == best)
            .unwrap_or(0);

        info!(service_slug = %catalog[index].slug, "Recommendation from fallback scorer");
        Ok(Recommendation {
            service: catalog.swap_remove(index),
            source: RecommendationSource::Fallback,
        })
    }

    /// Index of the catalog entry the model picked, if it picked a valid one
    async fn ask_model(&self, selections: &Selections, catalog: &[CareService]) -> Option<usize> {
        let client = self.completion.as_ref()?;
        let prompt = build_prompt(selections, catalog);

        let answer = match client.complete(&prompt).await {
            Ok(answer) => answer,
            Err(e) => {
                warn!(error = %e, "Completion provider failed, using fallback");
                return None;
            }
        };

        let slug = answer.trim().to_lowercase();
        let index = catalog.iter().position(|service| service.slug == slug);
        if index.is_none() {
            warn!(answer = %slug, "Completion returned an unknown slug, using fallback");
        }
        index
    }
}

/// Prompt asking for exactly one slug from the catalog
pub fn build_prompt(selections: &Selections, catalog: &[CareService]) -> String {
    let slugs = catalog
        .iter()
        .map(|service| format!("- {}", service.slug))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "You are a specialized Care Assistant for NestCare. Your goal is to recommend the best care service based on user needs.\n\n\
         User Choices:\n\
         - Need: {} (Baby/Elderly/Adult)\n\
         - Timing: {} (Daytime/Overnight/Short-term)\n\
         - Specificity: {} (General/Newborn/Special Needs/Recovery/Post-surgery)\n\
         - Personality Style: {} (Quiet/Active/Social)\n\n\
         Available Services Slugs:\n{}\n\n\
         Rules:\n\
         - Pick exactly ONE slug from the list above that best matches these 4 user choices.\n\
         - Return ONLY the slug in plain text.\n\
         - Do NOT include any explanation or extra characters.\n",
        selections.need.as_str(),
        selections.timing.as_str(),
        selections.specificity.as_str(),
        selections.style.as_str(),
        slugs,
    )
}
