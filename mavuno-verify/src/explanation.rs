//! Explanation trail assembly.
//!
//! Every decision carries the full trail: primary and ranked
//! classifications, the satellite summary, both confidences with the weight
//! constants, the rule or path that fired with its deciding threshold, and
//! an explicit notice when the two evidence sources materially disagree.

use std::fmt::Write;

use mavuno_core::config::VerificationWeights;
use mavuno_core::constants::MAX_RANKED_CLASSES;
use mavuno_core::models::{
    AppliedRule, Confidence, CropCondition, DecisionStatus, GroundObservation, MoistureVerdict,
    SatelliteEvidence,
};

pub(crate) struct ExplanationContext<'a> {
    pub observation: &'a GroundObservation,
    pub evidence: &'a SatelliteEvidence,
    pub weights: &'a VerificationWeights,
    pub status: DecisionStatus,
    pub score: f64,
    pub ground_confidence: Confidence,
    pub satellite_confidence: Confidence,
    pub rule: AppliedRule,
    pub summary: &'a str,
}

pub(crate) fn build(ctx: &ExplanationContext<'_>) -> String {
    let mut out = String::with_capacity(768);
    out.push_str(ctx.summary);

    let _ = write!(
        out,
        "\n\nClassification:\nprimary: {} ({} confidence)\nranked: {}",
        ctx.observation.condition,
        ctx.observation.confidence,
        ranked_list(ctx.observation),
    );

    let _ = write!(
        out,
        "\n\nSatellite analysis:\nNDMI: {:.3} (14-day avg: {:.3})\nverdict: {}\nobservation date: {}\ncloud cover: {:.1}%",
        ctx.evidence.ndmi,
        ctx.evidence.ndmi_14day_avg,
        ctx.evidence.verdict(),
        ctx.evidence.observed_at.format("%Y-%m-%d"),
        ctx.evidence.cloud_cover_pct,
    );

    let _ = write!(
        out,
        "\n\nDecision trail:\nground confidence: {}\nsatellite confidence: {}\nscore: {:.2} (ground weight {}, satellite weight {})\nrule applied: {}\ndeciding threshold: {}",
        ctx.ground_confidence,
        ctx.satellite_confidence,
        ctx.score,
        ctx.weights.ground_weight,
        ctx.weights.satellite_weight,
        ctx.rule,
        threshold_line(ctx.status, ctx.weights),
    );

    if disagrees(ctx.observation, ctx.evidence) {
        let _ = write!(
            out,
            "\n\nDisagreement notice: the visual assessment ({}) and the satellite \
             verdict ({}) indicate different conditions. Possible causes: localized \
             conditions invisible from orbit, recent changes not yet captured by the \
             satellite, or a data-quality issue needing manual review.",
            ctx.observation.condition,
            ctx.evidence.verdict(),
        );
    }

    out
}

fn ranked_list(observation: &GroundObservation) -> String {
    if observation.ranked.is_empty() {
        return "no alternative classifications available".to_string();
    }
    observation
        .ranked
        .iter()
        .take(MAX_RANKED_CLASSES)
        .enumerate()
        .map(|(i, entry)| format!("{}. {}: {}", i + 1, entry.condition, entry.confidence))
        .collect::<Vec<_>>()
        .join(" | ")
}

fn threshold_line(status: DecisionStatus, weights: &VerificationWeights) -> String {
    match status {
        DecisionStatus::AutoApproved => {
            format!("auto-approve (score > {})", weights.auto_approve_threshold)
        }
        DecisionStatus::FlaggedForReview => format!(
            "flag for review ({} <= score <= {})",
            weights.flag_threshold, weights.auto_approve_threshold
        ),
        DecisionStatus::Rejected => format!("reject (score < {})", weights.flag_threshold),
    }
}

/// Material disagreement between the evidence sources: drought against a
/// normal verdict, or a healthy crop against severe stress.
fn disagrees(observation: &GroundObservation, evidence: &SatelliteEvidence) -> bool {
    match observation.condition {
        CropCondition::DroughtStress => evidence.verdict() == MoistureVerdict::Normal,
        CropCondition::Healthy => evidence.verdict() == MoistureVerdict::SevereStress,
        _ => false,
    }
}
