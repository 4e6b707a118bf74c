use adi_core::{governance_level, Metric, Pillar, ScoreInput, Verdict};

pub const FRAMEWORK_URI: &str = "adi://framework/overview.md";
pub const FRAMEWORK_TEXT: &str = include_str!("../../../catalog/framework.md");

#[derive(Debug, Clone, Copy)]
pub struct CatalogResource {
    pub uri: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub mime_type: &'static str,
    pub text: &'static str,
}

static RESOURCES: [CatalogResource; 1] = [CatalogResource {
    uri: FRAMEWORK_URI,
    name: "adi/framework/overview.md",
    description: "Pillars, scoring components and verdict bands of the ADI framework.",
    mime_type: "text/markdown",
    text: FRAMEWORK_TEXT,
}];

pub fn resources() -> &'static [CatalogResource] {
    &RESOURCES
}

pub fn resource_text(uri: &str) -> Option<&'static str> {
    RESOURCES
        .iter()
        .find(|resource| resource.uri == uri)
        .map(|resource| resource.text)
}

/// Slider definition for one calculator input.
#[derive(Debug, Clone, Copy)]
pub struct MetricDescriptor {
    pub metric: Metric,
    pub label: &'static str,
    pub unit: &'static str,
    pub tooltip: &'static str,
    pub default: f64,
    pub step: f64,
}

static ORGANIC_EMV: MetricDescriptor = MetricDescriptor {
    metric: Metric::OrganicEmv,
    label: "Organic Earned Media %",
    unit: "%",
    tooltip: "Percentage of mentions that are unpaid. Rhode achieved 99% organic EMV.",
    default: 50.0,
    step: 1.0,
};

static FOUNDER_CONTENT: MetricDescriptor = MetricDescriptor {
    metric: Metric::FounderContentFreq,
    label: "Founder Content Frequency",
    unit: "%",
    tooltip: "How often the creator posts about the product. Target is at least 30%.",
    default: 15.0,
    step: 1.0,
};

static REPEAT_PURCHASE: MetricDescriptor = MetricDescriptor {
    metric: Metric::RepeatPurchaseRate,
    label: "Repeat Purchase Rate",
    unit: "%",
    tooltip: "Percentage of customers who buy again. SKIMS is above 50%.",
    default: 20.0,
    step: 1.0,
};

static REVIEW_SENTIMENT: MetricDescriptor = MetricDescriptor {
    metric: Metric::ReviewSentiment,
    label: "Review Sentiment (1-5)",
    unit: " stars",
    tooltip: "Average 3rd party review score. Above 4.0 signals quality.",
    default: 3.5,
    step: 0.1,
};

static FOUNDER_OWNERSHIP: MetricDescriptor = MetricDescriptor {
    metric: Metric::FounderOwnershipPct,
    label: "Founder Ownership",
    unit: "%",
    tooltip: "High ownership (above 50%) often signals key-person risk.",
    default: 80.0,
    step: 1.0,
};

static GOVERNANCE: MetricDescriptor = MetricDescriptor {
    metric: Metric::GovernanceScore,
    label: "Governance Strength",
    unit: "/5",
    tooltip: "Presence of independent board, experienced ops team, and crisis protocols.",
    default: 3.0,
    step: 1.0,
};

pub fn descriptor(metric: Metric) -> &'static MetricDescriptor {
    match metric {
        Metric::OrganicEmv => &ORGANIC_EMV,
        Metric::FounderContentFreq => &FOUNDER_CONTENT,
        Metric::RepeatPurchaseRate => &REPEAT_PURCHASE,
        Metric::ReviewSentiment => &REVIEW_SENTIMENT,
        Metric::FounderOwnershipPct => &FOUNDER_OWNERSHIP,
        Metric::GovernanceScore => &GOVERNANCE,
    }
}

/// Descriptors in calculator order.
pub fn metrics() -> [&'static MetricDescriptor; 6] {
    Metric::ALL.map(descriptor)
}

/// The calculator's initial slider positions.
pub fn default_input() -> ScoreInput {
    ScoreInput {
        organic_emv: ORGANIC_EMV.default,
        founder_content_freq: FOUNDER_CONTENT.default,
        repeat_purchase_rate: REPEAT_PURCHASE.default,
        review_sentiment: REVIEW_SENTIMENT.default,
        founder_ownership_pct: FOUNDER_OWNERSHIP.default,
        governance_score: governance_level(GOVERNANCE.default),
    }
}

#[derive(Debug, Clone, Copy)]
pub struct PillarDescriptor {
    pub pillar: Pillar,
    pub number: u8,
    pub title: &'static str,
    pub description: &'static str,
}

static AUTHENTICITY: PillarDescriptor = PillarDescriptor {
    pillar: Pillar::Authenticity,
    number: 1,
    title: "Authenticity",
    description: "Authenticity is not about follower count; it's about credibility and congruence. The most successful brands align the creator's values, expertise, and audience with the product's purpose.",
};

static DIFFERENTIATION: PillarDescriptor = PillarDescriptor {
    pillar: Pillar::Differentiation,
    number: 2,
    title: "Product Differentiation",
    description: "Product differentiation transforms trust into loyalty. Consumers judge creator-led brands by product quality, innovation, and reliability, not just the name.",
};

static INSTITUTIONALIZATION: PillarDescriptor = PillarDescriptor {
    pillar: Pillar::Institutionalization,
    number: 3,
    title: "Institutionalization",
    description: "Institutionalization ensures success outlasts the creator. Enduring brands build systems, teams, and governance that reduce key-person risk.",
};

pub fn pillar_descriptor(pillar: Pillar) -> &'static PillarDescriptor {
    match pillar {
        Pillar::Authenticity => &AUTHENTICITY,
        Pillar::Differentiation => &DIFFERENTIATION,
        Pillar::Institutionalization => &INSTITUTIONALIZATION,
    }
}

pub fn pillars() -> [&'static PillarDescriptor; 3] {
    Pillar::ALL.map(pillar_descriptor)
}

#[derive(Debug, Clone, Copy)]
pub struct VerdictLabel {
    pub verdict: Verdict,
    pub headline: &'static str,
    pub examples: &'static [&'static str],
}

static INSTITUTIONAL_GRADE: VerdictLabel = VerdictLabel {
    verdict: Verdict::InstitutionalGrade,
    headline: "Institutional Grade",
    examples: &["SKIMS", "Casamigos"],
};

static SUSTAINABLE_NICHE: VerdictLabel = VerdictLabel {
    verdict: Verdict::SustainableNiche,
    headline: "Sustainable Niche",
    examples: &["Fenty"],
};

static HYPE_CYCLE: VerdictLabel = VerdictLabel {
    verdict: Verdict::HypeCycleHighRisk,
    headline: "Hype Cycle / High Risk",
    examples: &["Item Beauty", "Yeezy"],
};

pub fn verdict_label(verdict: Verdict) -> &'static VerdictLabel {
    match verdict {
        Verdict::InstitutionalGrade => &INSTITUTIONAL_GRADE,
        Verdict::SustainableNiche => &SUSTAINABLE_NICHE,
        Verdict::HypeCycleHighRisk => &HYPE_CYCLE,
    }
}

pub fn verdict_labels() -> [&'static VerdictLabel; 3] {
    [&INSTITUTIONAL_GRADE, &SUSTAINABLE_NICHE, &HYPE_CYCLE]
}

/// Headline plus brand examples, e.g. `Sustainable Niche (e.g., Fenty)`.
pub fn verdict_caption(verdict: Verdict) -> String {
    let label = verdict_label(verdict);
    if label.examples.is_empty() {
        return label.headline.to_string();
    }
    format!("{} (e.g., {})", label.headline, label.examples.join(", "))
}

/// Colour band of the score gauge. Its cut-offs sit a few points below the
/// verdict thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreTone {
    Strong,
    Moderate,
    Weak,
}

impl ScoreTone {
    pub const fn key(self) -> &'static str {
        match self {
            Self::Strong => "strong",
            Self::Moderate => "moderate",
            Self::Weak => "weak",
        }
    }
}

pub const fn tone_for_score(total_score: u8) -> ScoreTone {
    if total_score > 75 {
        ScoreTone::Strong
    } else if total_score > 45 {
        ScoreTone::Moderate
    } else {
        ScoreTone::Weak
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use adi_core::compute_score;

    #[test]
    fn every_metric_has_a_descriptor_in_range() {
        for (metric, descriptor) in Metric::ALL.into_iter().zip(metrics()) {
            assert_eq!(descriptor.metric, metric);
            assert!(metric.range().contains(descriptor.default));
            assert!(descriptor.step > 0.0);
        }
    }

    #[test]
    fn default_input_matches_calculator_start() {
        let out = compute_score(&default_input());
        assert_eq!(out.total_score, 53);
        assert_eq!(
            verdict_caption(out.verdict),
            "Sustainable Niche (e.g., Fenty)"
        );
    }

    #[test]
    fn captions_list_examples() {
        assert_eq!(
            verdict_caption(Verdict::InstitutionalGrade),
            "Institutional Grade (e.g., SKIMS, Casamigos)"
        );
        assert_eq!(
            verdict_caption(Verdict::HypeCycleHighRisk),
            "Hype Cycle / High Risk (e.g., Item Beauty, Yeezy)"
        );
    }

    #[test]
    fn labels_cover_every_verdict() {
        for label in verdict_labels() {
            assert_eq!(verdict_label(label.verdict).headline, label.headline);
        }
    }

    #[test]
    fn tone_cutoffs_are_exclusive() {
        assert_eq!(tone_for_score(76), ScoreTone::Strong);
        assert_eq!(tone_for_score(75), ScoreTone::Moderate);
        assert_eq!(tone_for_score(46), ScoreTone::Moderate);
        assert_eq!(tone_for_score(45), ScoreTone::Weak);
    }

    #[test]
    fn pillars_are_numbered_in_order() {
        for (expected, descriptor) in (1_u8..).zip(pillars()) {
            assert_eq!(descriptor.number, expected);
        }
    }

    #[test]
    fn framework_resource_resolves() {
        let text = resource_text(FRAMEWORK_URI).unwrap_or_default();
        assert!(text.contains("Institutionalization"));
        assert!(resource_text("adi://missing").is_none());
    }
}
