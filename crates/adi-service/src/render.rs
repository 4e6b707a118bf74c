use std::fmt::Write as _;

use adi_catalog::{
    descriptor, metrics, pillar_descriptor, pillars, tone_for_score, verdict_caption,
    verdict_label, verdict_labels,
};
use adi_core::{Diagnosis, Metric, PillarScore, ScoreInput, ScoreResult};
use serde_json::{json, Map, Value};

pub fn input_json(input: &ScoreInput) -> Value {
    let fields = Metric::ALL
        .into_iter()
        .map(|metric| (metric.key().to_string(), json!(input.value(metric))))
        .collect::<Map<_, _>>();
    Value::Object(fields)
}

fn pillar_json(score: &PillarScore) -> Value {
    json!({
        "pillar": score.pillar.key(),
        "label": score.pillar.label(),
        "title": pillar_descriptor(score.pillar).title,
        "points": score.points,
        "max_points": score.max_points,
        "components": score.components,
    })
}

pub fn score_json(input: &ScoreInput, result: &ScoreResult) -> Value {
    json!({
        "total_score": result.total_score,
        "verdict": result.verdict.key(),
        "verdict_label": result.verdict.label(),
        "caption": verdict_caption(result.verdict),
        "tone": tone_for_score(result.total_score).key(),
        "input": input_json(&input.clamped()),
        "pillars": result
            .breakdown
            .pillars()
            .iter()
            .map(pillar_json)
            .collect::<Vec<_>>(),
    })
}

pub fn diagnosis_json(diagnosis: &Diagnosis) -> Value {
    json!({
        "total_score": diagnosis.result.total_score,
        "verdict": diagnosis.result.verdict.key(),
        "weakest_pillar": diagnosis.weakest_pillar.key(),
        "weakest_pillar_points": diagnosis
            .result
            .breakdown
            .pillar(diagnosis.weakest_pillar)
            .points,
        "key_person_risk": diagnosis.key_person_risk,
        "points_to_next_tier": diagnosis.points_to_next_tier,
        "next_verdict": diagnosis.result.verdict.next_tier().map(|v| v.key()),
        "levers": diagnosis
            .levers
            .iter()
            .map(|lever| json!({
                "metric": lever.metric.key(),
                "label": descriptor(lever.metric).label,
                "current": lever.current,
                "target": lever.target,
                "available_points": lever.available_points,
            }))
            .collect::<Vec<_>>(),
    })
}

pub fn catalog_json() -> Value {
    json!({
        "metrics": metrics()
            .iter()
            .map(|d| {
                let range = d.metric.range();
                json!({
                    "key": d.metric.key(),
                    "pillar": d.metric.pillar().key(),
                    "label": d.label,
                    "unit": d.unit,
                    "tooltip": d.tooltip,
                    "min": range.min,
                    "max": range.max,
                    "default": d.default,
                    "step": d.step,
                })
            })
            .collect::<Vec<_>>(),
        "pillars": pillars()
            .iter()
            .map(|p| json!({
                "key": p.pillar.key(),
                "number": p.number,
                "title": p.title,
                "description": p.description,
                "max_points": p.pillar.max_points(),
            }))
            .collect::<Vec<_>>(),
        "verdicts": verdict_labels()
            .iter()
            .map(|v| json!({
                "key": v.verdict.key(),
                "headline": v.headline,
                "examples": v.examples,
                "min_score": v.verdict.min_score(),
            }))
            .collect::<Vec<_>>(),
    })
}

/// One-line summary used in tool responses.
pub fn score_summary(result: &ScoreResult) -> String {
    format!(
        "score={} verdict={}",
        result.total_score,
        verdict_caption(result.verdict)
    )
}

pub fn score_text(result: &ScoreResult) -> String {
    let mut out = format!(
        "Predicted longevity score: {}\n{}\n",
        result.total_score,
        verdict_caption(result.verdict)
    );
    for pillar in result.breakdown.pillars() {
        let _ = writeln!(
            out,
            "  {:<24} {:>6.2} / {}",
            pillar_descriptor(pillar.pillar).title,
            pillar.points,
            pillar.max_points
        );
    }
    out
}

pub fn diagnosis_text(diagnosis: &Diagnosis) -> String {
    let mut out = score_text(&diagnosis.result);
    let _ = writeln!(
        out,
        "Weakest pillar: {}",
        pillar_descriptor(diagnosis.weakest_pillar).title
    );
    if diagnosis.key_person_risk {
        out.push_str("Key-person risk: founder holds a controlling stake\n");
    }
    if let (Some(gap), Some(next)) = (
        diagnosis.points_to_next_tier,
        diagnosis.result.verdict.next_tier(),
    ) {
        let _ = writeln!(out, "{gap} points to {}", verdict_label(next).headline);
    }
    for lever in &diagnosis.levers {
        let d = descriptor(lever.metric);
        let _ = writeln!(
            out,
            "  +{:.2}  {} {}{} -> {}{}",
            lever.available_points, d.label, lever.current, d.unit, lever.target, d.unit
        );
    }
    out
}

pub fn catalog_text() -> String {
    let mut out = String::new();
    for p in pillars() {
        let _ = writeln!(
            out,
            "{}. {} [{}] ({} points)",
            p.number,
            p.title,
            p.pillar.label(),
            p.pillar.max_points()
        );
        for d in metrics().iter().filter(|d| d.metric.pillar() == p.pillar) {
            let range = d.metric.range();
            let _ = writeln!(
                out,
                "   --{:<22} {} [{}-{}] default {}",
                d.metric.key().replace('_', "-"),
                d.label,
                range.min,
                range.max,
                d.default
            );
        }
    }
    out
}
