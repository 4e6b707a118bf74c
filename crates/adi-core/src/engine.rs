use crate::input::ScoreInput;
use crate::pillar::Pillar;
use crate::verdict::Verdict;

/// Points for each half of the authenticity and differentiation pillars.
pub const HALF_PILLAR_POINTS: f64 = 16.5;
/// Points for each half of the institutionalization pillar.
pub const INSTITUTION_COMPONENT_POINTS: f64 = 17.0;

/// Founder content share that earns the full founder-content points.
pub const FOUNDER_CONTENT_TARGET: f64 = 30.0;
/// Repeat purchase rate that earns the full retention points.
pub const REPEAT_PURCHASE_TARGET: f64 = 35.0;
/// Founder ownership at or above which key-person risk starts to cost points.
pub const KEY_PERSON_THRESHOLD: f64 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PillarScore {
    pub pillar: Pillar,
    pub components: [f64; 2],
    pub points: f64,
    pub max_points: f64,
}

impl PillarScore {
    fn new(pillar: Pillar, first: f64, second: f64) -> Self {
        Self {
            pillar,
            components: [first, second],
            points: first + second,
            max_points: pillar.max_points(),
        }
    }

    /// Share of the pillar ceiling reached, in 0..=1.
    pub fn ratio(&self) -> f64 {
        self.points / self.max_points
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreBreakdown {
    pub authenticity: PillarScore,
    pub differentiation: PillarScore,
    pub institutionalization: PillarScore,
}

impl ScoreBreakdown {
    pub const fn pillars(&self) -> [PillarScore; 3] {
        [
            self.authenticity,
            self.differentiation,
            self.institutionalization,
        ]
    }

    pub fn pillar(&self, pillar: Pillar) -> PillarScore {
        match pillar {
            Pillar::Authenticity => self.authenticity,
            Pillar::Differentiation => self.differentiation,
            Pillar::Institutionalization => self.institutionalization,
        }
    }

    /// Unrounded sum of all pillars.
    pub fn raw_total(&self) -> f64 {
        self.authenticity.points + self.differentiation.points + self.institutionalization.points
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreResult {
    pub total_score: u8,
    pub verdict: Verdict,
    pub breakdown: ScoreBreakdown,
}

/// Pillar points for an input. The input is clamped first.
pub fn pillar_scores(input: &ScoreInput) -> ScoreBreakdown {
    let input = input.clamped();

    let organic = input.organic_emv / 100.0 * HALF_PILLAR_POINTS;
    let founder_content =
        (input.founder_content_freq / FOUNDER_CONTENT_TARGET).min(1.0) * HALF_PILLAR_POINTS;

    let retention =
        (input.repeat_purchase_rate / REPEAT_PURCHASE_TARGET).min(1.0) * HALF_PILLAR_POINTS;
    let sentiment = ((input.review_sentiment - 1.0) / 4.0).min(1.0) * HALF_PILLAR_POINTS;

    let ownership_factor = if input.founder_ownership_pct < KEY_PERSON_THRESHOLD {
        1.0
    } else {
        (100.0 - input.founder_ownership_pct) / KEY_PERSON_THRESHOLD
    };
    let ownership = ownership_factor * INSTITUTION_COMPONENT_POINTS;
    let governance = f64::from(input.governance_score) / 5.0 * INSTITUTION_COMPONENT_POINTS;

    ScoreBreakdown {
        authenticity: PillarScore::new(Pillar::Authenticity, organic, founder_content),
        differentiation: PillarScore::new(Pillar::Differentiation, retention, sentiment),
        institutionalization: PillarScore::new(
            Pillar::Institutionalization,
            ownership,
            governance,
        ),
    }
}

/// Longevity score and verdict for a brand.
///
/// Total over every input: out-of-range and NaN fields are clamped, so the
/// score always lands in 0..=100.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn compute_score(input: &ScoreInput) -> ScoreResult {
    let breakdown = pillar_scores(input);
    let total_score = breakdown.raw_total().round().clamp(0.0, 100.0) as u8;

    ScoreResult {
        total_score,
        verdict: Verdict::from_score(total_score),
        breakdown,
    }
}
