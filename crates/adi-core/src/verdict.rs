use std::fmt;

pub const INSTITUTIONAL_GRADE_MIN: u8 = 80;
pub const SUSTAINABLE_NICHE_MIN: u8 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Verdict {
    HypeCycleHighRisk,
    SustainableNiche,
    InstitutionalGrade,
}

impl Verdict {
    /// Lower bounds are inclusive.
    pub const fn from_score(total_score: u8) -> Self {
        if total_score >= INSTITUTIONAL_GRADE_MIN {
            Self::InstitutionalGrade
        } else if total_score >= SUSTAINABLE_NICHE_MIN {
            Self::SustainableNiche
        } else {
            Self::HypeCycleHighRisk
        }
    }

    pub const fn key(self) -> &'static str {
        match self {
            Self::InstitutionalGrade => "institutional_grade",
            Self::SustainableNiche => "sustainable_niche",
            Self::HypeCycleHighRisk => "hype_cycle_high_risk",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::InstitutionalGrade => "Institutional Grade",
            Self::SustainableNiche => "Sustainable Niche",
            Self::HypeCycleHighRisk => "Hype Cycle / High Risk",
        }
    }

    pub const fn min_score(self) -> u8 {
        match self {
            Self::InstitutionalGrade => INSTITUTIONAL_GRADE_MIN,
            Self::SustainableNiche => SUSTAINABLE_NICHE_MIN,
            Self::HypeCycleHighRisk => 0,
        }
    }

    pub const fn next_tier(self) -> Option<Self> {
        match self {
            Self::HypeCycleHighRisk => Some(Self::SustainableNiche),
            Self::SustainableNiche => Some(Self::InstitutionalGrade),
            Self::InstitutionalGrade => None,
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thresholds_are_inclusive_lower_bounds() {
        assert_eq!(Verdict::from_score(100), Verdict::InstitutionalGrade);
        assert_eq!(Verdict::from_score(80), Verdict::InstitutionalGrade);
        assert_eq!(Verdict::from_score(79), Verdict::SustainableNiche);
        assert_eq!(Verdict::from_score(50), Verdict::SustainableNiche);
        assert_eq!(Verdict::from_score(49), Verdict::HypeCycleHighRisk);
        assert_eq!(Verdict::from_score(0), Verdict::HypeCycleHighRisk);
    }

    #[test]
    fn next_tier_min_score_is_above_current() {
        let mut tier = Verdict::HypeCycleHighRisk;
        while let Some(next) = tier.next_tier() {
            assert!(next.min_score() > tier.min_score());
            assert_eq!(Verdict::from_score(next.min_score()), next);
            tier = next;
        }
        assert_eq!(tier, Verdict::InstitutionalGrade);
    }
}
