use proptest::prelude::*;

use nestcare::modules::recommendations::services::fallback_scorer::CANDIDATE_SLUGS;
use nestcare::modules::recommendations::{
    FallbackScorer, Need, Selections, Specificity, Style, Timing,
};

/// Tests for the rule-based recommendation scorer
///
/// Validates:
/// - the score table for each answer
/// - ties resolve to the earliest candidate
/// - the winner always holds the maximum score

fn selections(need: Need, timing: Timing, specificity: Specificity, style: Style) -> Selections {
    Selections {
        need,
        timing,
        specificity,
        style,
    }
}

fn score_of(scores: &[(&'static str, u32); 9], slug: &str) -> u32 {
    scores.iter().find(|(s, _)| *s == slug).map(|(_, v)| *v).unwrap()
}

fn any_selections() -> impl Strategy<Value = Selections> {
    (
        prop_oneof![Just(Need::Baby), Just(Need::Elderly), Just(Need::Adult)],
        prop_oneof![Just(Timing::Daytime), Just(Timing::Overnight), Just(Timing::Respite)],
        prop_oneof![
            Just(Specificity::General),
            Just(Specificity::Newborn),
            Just(Specificity::Special),
            Just(Specificity::Recovery)
        ],
        prop_oneof![Just(Style::Quiet), Just(Style::Active), Just(Style::Social)],
    )
        .prop_map(|(need, timing, specificity, style)| selections(need, timing, specificity, style))
}

#[test]
fn test_scores_for_baby_newborn() {
    let s = selections(Need::Baby, Timing::Daytime, Specificity::Newborn, Style::Quiet);
    let scores = FallbackScorer.scores(&s);

    assert_eq!(score_of(&scores, "baby-care"), 10);
    assert_eq!(score_of(&scores, "newborn-support"), 5 + 15 + 10);
    assert_eq!(FallbackScorer.best_slug(&s), "newborn-support");
}

#[test]
fn test_scores_for_adult_recovery() {
    let s = selections(Need::Adult, Timing::Daytime, Specificity::Recovery, Style::Quiet);
    let scores = FallbackScorer.scores(&s);

    assert_eq!(score_of(&scores, "sick-care"), 10);
    assert_eq!(score_of(&scores, "post-surgery-care"), 5 + 15 + 10);
    assert_eq!(FallbackScorer.best_slug(&s), "post-surgery-care");
}

#[test]
fn test_social_elderly_prefers_companion() {
    let s = selections(Need::Elderly, Timing::Daytime, Specificity::General, Style::Social);
    let scores = FallbackScorer.scores(&s);

    assert_eq!(score_of(&scores, "companion-care"), 15);
    assert_eq!(score_of(&scores, "elderly-care"), 10);
    assert_eq!(FallbackScorer.best_slug(&s), "companion-care");
}

#[test]
fn test_plain_elderly_daytime_prefers_elderly_care() {
    let s = selections(Need::Elderly, Timing::Daytime, Specificity::General, Style::Quiet);
    assert_eq!(FallbackScorer.best_slug(&s), "elderly-care");
}

#[test]
fn test_overnight_beats_need() {
    let s = selections(Need::Baby, Timing::Overnight, Specificity::General, Style::Active);
    assert_eq!(FallbackScorer.best_slug(&s), "overnight-care");
}

#[test]
fn test_tie_resolves_to_earlier_candidate() {
    // overnight-care 20 and special-needs-care 20
    let s = selections(Need::Elderly, Timing::Overnight, Specificity::Special, Style::Quiet);
    assert_eq!(FallbackScorer.best_slug(&s), "overnight-care");
}

proptest! {
    #[test]
    fn test_winner_has_max_score(s in any_selections()) {
        let scores = FallbackScorer.scores(&s);
        let best = FallbackScorer.best_slug(&s);
        let max = scores.iter().map(|(_, v)| *v).max().unwrap();

        prop_assert_eq!(score_of(&scores, best), max);

        let first_max = scores.iter().find(|(_, v)| *v == max).map(|(slug, _)| *slug).unwrap();
        prop_assert_eq!(best, first_max);
    }

    #[test]
    fn test_scores_cover_every_candidate(s in any_selections()) {
        let scores = FallbackScorer.scores(&s);
        let slugs: Vec<&str> = scores.iter().map(|(slug, _)| *slug).collect();
        prop_assert_eq!(slugs, CANDIDATE_SLUGS.to_vec());
    }
}
