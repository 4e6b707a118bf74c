use crate::error::InputError;
use crate::pillar::Pillar;

/// Inclusive bounds of a single metric.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricRange {
    pub min: f64,
    pub max: f64,
}

impl MetricRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Clamps into the range. NaN collapses to the lower bound.
    pub fn clamp(&self, value: f64) -> f64 {
        if value.is_nan() {
            self.min
        } else {
            value.clamp(self.min, self.max)
        }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    OrganicEmv,
    FounderContentFreq,
    RepeatPurchaseRate,
    ReviewSentiment,
    FounderOwnershipPct,
    GovernanceScore,
}

impl Metric {
    pub const ALL: [Self; 6] = [
        Self::OrganicEmv,
        Self::FounderContentFreq,
        Self::RepeatPurchaseRate,
        Self::ReviewSentiment,
        Self::FounderOwnershipPct,
        Self::GovernanceScore,
    ];

    pub const fn key(self) -> &'static str {
        match self {
            Self::OrganicEmv => "organic_emv",
            Self::FounderContentFreq => "founder_content_freq",
            Self::RepeatPurchaseRate => "repeat_purchase_rate",
            Self::ReviewSentiment => "review_sentiment",
            Self::FounderOwnershipPct => "founder_ownership_pct",
            Self::GovernanceScore => "governance_score",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|metric| metric.key() == key)
    }

    pub const fn range(self) -> MetricRange {
        match self {
            Self::OrganicEmv | Self::FounderContentFreq | Self::FounderOwnershipPct => {
                MetricRange::new(0.0, 100.0)
            }
            Self::RepeatPurchaseRate => MetricRange::new(0.0, 60.0),
            Self::ReviewSentiment | Self::GovernanceScore => MetricRange::new(1.0, 5.0),
        }
    }

    pub const fn pillar(self) -> Pillar {
        match self {
            Self::OrganicEmv | Self::FounderContentFreq => Pillar::Authenticity,
            Self::RepeatPurchaseRate | Self::ReviewSentiment => Pillar::Differentiation,
            Self::FounderOwnershipPct | Self::GovernanceScore => Pillar::Institutionalization,
        }
    }
}

/// Brand metrics fed into the longevity score.
///
/// Values are percentages except `review_sentiment` (1-5 stars) and
/// `governance_score` (1-5 scale). Nothing here is trusted: the engine
/// clamps every field before use.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreInput {
    pub organic_emv: f64,
    pub founder_content_freq: f64,
    pub repeat_purchase_rate: f64,
    pub review_sentiment: f64,
    pub founder_ownership_pct: f64,
    pub governance_score: u8,
}

impl ScoreInput {
    pub fn value(&self, metric: Metric) -> f64 {
        match metric {
            Metric::OrganicEmv => self.organic_emv,
            Metric::FounderContentFreq => self.founder_content_freq,
            Metric::RepeatPurchaseRate => self.repeat_purchase_rate,
            Metric::ReviewSentiment => self.review_sentiment,
            Metric::FounderOwnershipPct => self.founder_ownership_pct,
            Metric::GovernanceScore => f64::from(self.governance_score),
        }
    }

    /// Copy with one metric replaced. Governance is rounded to a level.
    #[must_use]
    pub fn with(mut self, metric: Metric, value: f64) -> Self {
        match metric {
            Metric::OrganicEmv => self.organic_emv = value,
            Metric::FounderContentFreq => self.founder_content_freq = value,
            Metric::RepeatPurchaseRate => self.repeat_purchase_rate = value,
            Metric::ReviewSentiment => self.review_sentiment = value,
            Metric::FounderOwnershipPct => self.founder_ownership_pct = value,
            Metric::GovernanceScore => self.governance_score = governance_level(value),
        }
        self
    }

    #[must_use]
    pub fn clamped(&self) -> Self {
        Self {
            organic_emv: Metric::OrganicEmv.range().clamp(self.organic_emv),
            founder_content_freq: Metric::FounderContentFreq
                .range()
                .clamp(self.founder_content_freq),
            repeat_purchase_rate: Metric::RepeatPurchaseRate
                .range()
                .clamp(self.repeat_purchase_rate),
            review_sentiment: Metric::ReviewSentiment.range().clamp(self.review_sentiment),
            founder_ownership_pct: Metric::FounderOwnershipPct
                .range()
                .clamp(self.founder_ownership_pct),
            governance_score: self.governance_score.clamp(GOVERNANCE_MIN, GOVERNANCE_MAX),
        }
    }

    /// Reports the first metric that is non-finite or out of range.
    pub fn validate(&self) -> Result<(), InputError> {
        for metric in Metric::ALL {
            check_value(metric, self.value(metric))?;
        }
        Ok(())
    }
}

const GOVERNANCE_MIN: u8 = 1;
const GOVERNANCE_MAX: u8 = 5;

/// Rounds a raw governance reading to the nearest level in 1..=5.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn governance_level(raw: f64) -> u8 {
    // clamp() maps NaN to 1.0, so the cast is always in 1..=5
    Metric::GovernanceScore.range().clamp(raw).round() as u8
}

/// Like [`governance_level`] but refuses anything that is not already a
/// whole level in range.
pub fn strict_governance_level(raw: f64) -> Result<u8, InputError> {
    let metric = Metric::GovernanceScore;
    check_value(metric, raw)?;
    if raw.fract() != 0.0 {
        return Err(InputError::Fractional {
            metric: metric.key(),
            value: raw,
        });
    }
    Ok(governance_level(raw))
}

fn check_value(metric: Metric, value: f64) -> Result<(), InputError> {
    if !value.is_finite() {
        return Err(InputError::NotFinite {
            metric: metric.key(),
        });
    }
    let range = metric.range();
    if !range.contains(value) {
        return Err(InputError::OutOfRange {
            metric: metric.key(),
            value,
            min: range.min,
            max: range.max,
        });
    }
    Ok(())
}
