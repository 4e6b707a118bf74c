use adi_catalog::default_input;
use adi_core::{strict_governance_level, InputError, Metric, ScoreInput};
use serde::Deserialize;

use crate::config::InputPolicy;

/// Metric values supplied by a caller. Missing values take the calculator
/// defaults.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScoreArgs {
    pub organic_emv: Option<f64>,
    pub founder_content_freq: Option<f64>,
    pub repeat_purchase_rate: Option<f64>,
    pub review_sentiment: Option<f64>,
    pub founder_ownership_pct: Option<f64>,
    pub governance_score: Option<f64>,
}

impl ScoreArgs {
    pub const fn value(&self, metric: Metric) -> Option<f64> {
        match metric {
            Metric::OrganicEmv => self.organic_emv,
            Metric::FounderContentFreq => self.founder_content_freq,
            Metric::RepeatPurchaseRate => self.repeat_purchase_rate,
            Metric::ReviewSentiment => self.review_sentiment,
            Metric::FounderOwnershipPct => self.founder_ownership_pct,
            Metric::GovernanceScore => self.governance_score,
        }
    }
}

/// Applies caller values over the defaults. Under [`InputPolicy::Reject`]
/// any value outside its range is an error; under `Clamp` the engine pulls
/// it into range.
pub fn resolve_input(args: &ScoreArgs, policy: InputPolicy) -> Result<ScoreInput, InputError> {
    let mut input = default_input();
    for metric in Metric::ALL {
        let Some(value) = args.value(metric) else {
            continue;
        };
        if policy == InputPolicy::Reject && metric == Metric::GovernanceScore {
            strict_governance_level(value)?;
        }
        input = input.with(metric, value);
    }
    if policy == InputPolicy::Reject {
        input.validate()?;
    }
    Ok(input)
}
