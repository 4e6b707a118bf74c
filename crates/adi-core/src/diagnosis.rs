use std::cmp::Ordering;

use crate::engine::{
    compute_score, ScoreResult, FOUNDER_CONTENT_TARGET, KEY_PERSON_THRESHOLD,
    REPEAT_PURCHASE_TARGET,
};
use crate::input::{Metric, ScoreInput};
use crate::pillar::Pillar;

const MIN_LEVER_POINTS: f64 = 1e-9;

/// A metric that still has points to give under the current input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lever {
    pub metric: Metric,
    pub current: f64,
    /// Value at which the metric stops adding points.
    pub target: f64,
    pub available_points: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Diagnosis {
    pub result: ScoreResult,
    pub weakest_pillar: Pillar,
    pub key_person_risk: bool,
    /// Whole points missing to reach the next verdict tier, if any.
    pub points_to_next_tier: Option<u8>,
    /// Sorted by `available_points`, largest first.
    pub levers: Vec<Lever>,
}

/// Value at which each metric saturates its component.
pub const fn saturation_target(metric: Metric) -> f64 {
    match metric {
        Metric::OrganicEmv => 100.0,
        Metric::FounderContentFreq => FOUNDER_CONTENT_TARGET,
        Metric::RepeatPurchaseRate => REPEAT_PURCHASE_TARGET,
        Metric::ReviewSentiment | Metric::GovernanceScore => 5.0,
        Metric::FounderOwnershipPct => KEY_PERSON_THRESHOLD,
    }
}

pub fn diagnose(input: &ScoreInput) -> Diagnosis {
    let input = input.clamped();
    let result = compute_score(&input);
    let raw_total = result.breakdown.raw_total();

    let weakest_pillar = result
        .breakdown
        .pillars()
        .into_iter()
        .min_by(|a, b| a.ratio().partial_cmp(&b.ratio()).unwrap_or(Ordering::Equal))
        .map_or(Pillar::Authenticity, |score| score.pillar);

    let points_to_next_tier = result
        .verdict
        .next_tier()
        .map(|next| next.min_score().saturating_sub(result.total_score));

    let mut levers = Metric::ALL
        .into_iter()
        .filter_map(|metric| {
            let target = saturation_target(metric);
            let reached = compute_score(&input.with(metric, target))
                .breakdown
                .raw_total();
            let available_points = reached - raw_total;
            (available_points > MIN_LEVER_POINTS).then_some(Lever {
                metric,
                current: input.value(metric),
                target,
                available_points,
            })
        })
        .collect::<Vec<_>>();
    levers.sort_by(|a, b| {
        b.available_points
            .partial_cmp(&a.available_points)
            .unwrap_or(Ordering::Equal)
    });

    Diagnosis {
        result,
        weakest_pillar,
        key_person_risk: input.founder_ownership_pct > KEY_PERSON_THRESHOLD,
        points_to_next_tier,
        levers,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::verdict::Verdict;

    fn default_state() -> ScoreInput {
        ScoreInput {
            organic_emv: 50.0,
            founder_content_freq: 15.0,
            repeat_purchase_rate: 20.0,
            review_sentiment: 3.5,
            founder_ownership_pct: 80.0,
            governance_score: 3,
        }
    }

    #[test]
    fn default_state_flags_key_person_risk() {
        let out = diagnose(&default_state());
        assert!(out.key_person_risk);
        assert_eq!(out.result.verdict, Verdict::SustainableNiche);
        assert_eq!(out.points_to_next_tier, Some(80 - 53));
    }

    #[test]
    fn weakest_pillar_has_lowest_share() {
        let input = ScoreInput {
            review_sentiment: 1.0,
            repeat_purchase_rate: 0.0,
            ..default_state()
        };
        assert_eq!(diagnose(&input).weakest_pillar, Pillar::Differentiation);
    }

    #[test]
    fn levers_are_sorted_and_positive() {
        let out = diagnose(&default_state());
        assert_eq!(out.levers.len(), Metric::ALL.len());
        for pair in out.levers.windows(2) {
            if let [a, b] = pair {
                assert!(a.available_points >= b.available_points);
            }
        }
        // ownership 80% -> 50% recovers 0.6 * 17 points
        let ownership = out
            .levers
            .iter()
            .find(|lever| lever.metric == Metric::FounderOwnershipPct)
            .map(|lever| lever.available_points);
        assert!(ownership.is_some_and(|points| (points - 10.2).abs() < 1e-9));
    }

    #[test]
    fn saturated_input_has_no_levers() {
        let input = ScoreInput {
            organic_emv: 100.0,
            founder_content_freq: 80.0,
            repeat_purchase_rate: 50.0,
            review_sentiment: 5.0,
            founder_ownership_pct: 10.0,
            governance_score: 5,
        };
        let out = diagnose(&input);
        assert!(out.levers.is_empty());
        assert!(!out.key_person_risk);
        assert_eq!(out.points_to_next_tier, None);
    }

    #[test]
    fn levers_close_the_gap_when_applied() {
        let mut input = default_state();
        for lever in diagnose(&input).levers {
            input = input.with(lever.metric, lever.target);
        }
        assert_eq!(compute_score(&input).total_score, 100);
    }
}
