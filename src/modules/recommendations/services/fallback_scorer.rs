use crate::modules::recommendations::models::{Need, Selections, Specificity, Style, Timing};

/// Candidate slugs in tie-break order
pub const CANDIDATE_SLUGS: [&str; 9] = [
    "respite-care",
    "companion-care",
    "overnight-care",
    "special-needs-care",
    "post-surgery-care",
    "newborn-support",
    "sick-care",
    "elderly-care",
    "baby-care",
];

/// Rule-based matcher used when the completion provider is unavailable
#[derive(Debug, Clone, Copy, Default)]
pub struct FallbackScorer;

impl FallbackScorer {
    /// Score of every candidate, in `CANDIDATE_SLUGS` order
    pub fn scores(&self, selections: &Selections) -> [(&'static str, u32); 9] {
        let mut scores = CANDIDATE_SLUGS.map(|slug| (slug, 0u32));
        let mut add = |slug: &str, points: u32| {
            if let Some(entry) = scores.iter_mut().find(|(s, _)| *s == slug) {
                entry.1 += points;
            }
        };

        match selections.need {
            Need::Baby => {
                add("baby-care", 10);
                add("newborn-support", 5);
            }
            Need::Elderly => {
                add("elderly-care", 10);
                add("companion-care", 5);
            }
            Need::Adult => {
                add("sick-care", 10);
                add("post-surgery-care", 5);
            }
        }

        match selections.timing {
            Timing::Respite => add("respite-care", 20),
            Timing::Overnight => add("overnight-care", 20),
            Timing::Daytime => {}
        }

        match selections.specificity {
            Specificity::Newborn => add("newborn-support", 15),
            Specificity::Special => add("special-needs-care", 20),
            Specificity::Recovery => add("post-surgery-care", 15),
            Specificity::General => {}
        }

        if selections.style == Style::Social {
            add("companion-care", 10);
        }

        match (selections.need, selections.specificity) {
            (Need::Baby, Specificity::Newborn) => add("newborn-support", 10),
            (Need::Adult, Specificity::Recovery) => add("post-surgery-care", 10),
            _ => {}
        }

        scores
    }

    /// Highest-scoring slug; the earliest candidate wins a tie
    pub fn best_slug(&self, selections: &Selections) -> &'static str {
        let scores = self.scores(selections);
        let mut best = scores[0];
        for entry in scores.iter().skip(1) {
            if entry.1 > best.1 {
                best = *entry;
            }
        }
        best.0
    }
}
