//! End-to-end engine behavior: contextual rules, seasonality ordering,
//! weighted scoring, and the explanation trail.

use mavuno_core::models::{AppliedRule, CropCondition, DecisionStatus};
use mavuno_verify::VerificationEngine;
use test_fixtures::{date, evidence, observation};

fn engine() -> VerificationEngine {
    VerificationEngine::default()
}

#[test]
fn drought_with_severe_deficit_auto_approves() {
    let decision = engine().evaluate(
        &observation(CropCondition::DroughtStress, 0.9),
        &evidence(-0.25),
        None,
    );
    assert_eq!(decision.status, DecisionStatus::AutoApproved);
    assert_eq!(decision.rule_applied, AppliedRule::DroughtSevereDeficit);
    assert!((decision.score.value() - 0.95).abs() < 1e-12);
    assert!((decision.satellite_confidence.value() - 0.9).abs() < 1e-12);
}

#[test]
fn drought_rule_beats_seasonality_in_dry_harvest_months() {
    // January claim date, but the severe deficit fires R1 before the
    // seasonality check is ever consulted.
    let decision = engine().evaluate(
        &observation(CropCondition::DroughtStress, 0.9),
        &evidence(-0.25),
        Some(date(2025, 1, 15)),
    );
    assert_eq!(decision.rule_applied, AppliedRule::DroughtSevereDeficit);
    assert_eq!(decision.status, DecisionStatus::AutoApproved);
}

#[test]
fn drought_against_normal_moisture_flags() {
    let decision = engine().evaluate(
        &observation(CropCondition::DroughtStress, 0.9),
        &evidence(0.05),
        None,
    );
    assert_eq!(decision.status, DecisionStatus::FlaggedForReview);
    assert_eq!(decision.rule_applied, AppliedRule::DroughtNormalMoisture);
    assert!((decision.score.value() - 0.65).abs() < 1e-12);
}

#[test]
fn drought_against_normal_moisture_flags_even_in_dry_harvest_months() {
    // The contradiction rule outranks the seasonality rejection, so a
    // February drought claim with adequate moisture is flagged, not rejected.
    let decision = engine().evaluate(
        &observation(CropCondition::DroughtStress, 0.9),
        &evidence(0.05),
        Some(date(2025, 2, 10)),
    );
    assert_eq!(decision.status, DecisionStatus::FlaggedForReview);
    assert_eq!(decision.rule_applied, AppliedRule::DroughtNormalMoisture);
}

#[test]
fn disease_approves_regardless_of_moisture_verdict() {
    for condition in [CropCondition::LeafBlight, CropCondition::CommonRust] {
        for ndmi in [-0.25, -0.15, 0.1] {
            let decision = engine().evaluate(&observation(condition, 0.8), &evidence(ndmi), None);
            assert_eq!(decision.status, DecisionStatus::AutoApproved);
            assert_eq!(decision.rule_applied, AppliedRule::DiseaseVisual);
            assert!((decision.score.value() - 0.85).abs() < 1e-12);
        }
    }
}

#[test]
fn healthy_with_moisture_deficit_rejects() {
    let decision = engine().evaluate(
        &observation(CropCondition::Healthy, 0.9),
        &evidence(-0.11),
        None,
    );
    assert_eq!(decision.status, DecisionStatus::Rejected);
    assert_eq!(decision.rule_applied, AppliedRule::HealthyMoistureDeficit);
    assert!((decision.score.value() - 0.2).abs() < 1e-12);
}

#[test]
fn healthy_just_above_deficit_threshold_falls_through_to_weighted() {
    // -0.09 is a normal verdict, so no contextual rule matches.
    let decision = engine().evaluate(
        &observation(CropCondition::Healthy, 0.9),
        &evidence(-0.09),
        None,
    );
    assert_eq!(decision.rule_applied, AppliedRule::WeightedScore);
    // 0.6 * 0.9 + 0.4 * 0.3 = 0.66
    assert!((decision.score.value() - 0.66).abs() < 1e-12);
    assert_eq!(decision.status, DecisionStatus::FlaggedForReview);
}

#[test]
fn invalid_subject_rejects_with_zero_score() {
    for ndmi in [-0.25, -0.15, 0.1] {
        let decision = engine().evaluate(
            &observation(CropCondition::Other, 0.99),
            &evidence(ndmi),
            None,
        );
        assert_eq!(decision.status, DecisionStatus::Rejected);
        assert_eq!(decision.rule_applied, AppliedRule::InvalidSubject);
        assert_eq!(decision.score.value(), 0.0);
    }
}

#[test]
fn drought_at_exact_severe_boundary_uses_weighted_path() {
    // Exactly -0.2 is moderate stress: R1 needs strictly below, and a
    // moderate verdict rules out R2.
    let decision = engine().evaluate(
        &observation(CropCondition::DroughtStress, 0.9),
        &evidence(-0.2),
        None,
    );
    assert_eq!(decision.rule_applied, AppliedRule::WeightedScore);
    // 0.6 * 0.9 + 0.4 * 0.6 = 0.78
    assert!((decision.score.value() - 0.78).abs() < 1e-12);
    assert_eq!(decision.status, DecisionStatus::FlaggedForReview);
}

#[test]
fn weighted_path_flags_midband_scores() {
    // fall_armyworm has no contextual rule, so the weighted path decides.
    // 0.6 * 0.87 + 0.4 * 0.3 = 0.642, inside [0.5, 0.8].
    let decision = engine().evaluate(
        &observation(CropCondition::FallArmyworm, 0.87),
        &evidence(0.1),
        None,
    );
    assert_eq!(decision.rule_applied, AppliedRule::WeightedScore);
    assert!((decision.score.value() - 0.642).abs() < 1e-12);
    assert_eq!(decision.status, DecisionStatus::FlaggedForReview);
}

#[test]
fn weighted_path_approves_high_scores() {
    // 0.6 * 0.95 + 0.4 * 0.9 = 0.93 > 0.8
    let decision = engine().evaluate(
        &observation(CropCondition::FallArmyworm, 0.95),
        &evidence(-0.25),
        None,
    );
    assert_eq!(decision.status, DecisionStatus::AutoApproved);
    assert_eq!(decision.rule_applied, AppliedRule::WeightedScore);
}

#[test]
fn weighted_path_rejects_low_scores() {
    // 0.6 * 0.3 + 0.4 * 0.3 = 0.3 < 0.5
    let decision = engine().evaluate(
        &observation(CropCondition::FallArmyworm, 0.3),
        &evidence(0.1),
        None,
    );
    assert_eq!(decision.status, DecisionStatus::Rejected);
    assert_eq!(decision.rule_applied, AppliedRule::WeightedScore);
}

#[test]
fn identical_inputs_produce_identical_decisions() {
    let obs = observation(CropCondition::FallArmyworm, 0.72);
    let ev = evidence(-0.15);
    let claim_date = Some(date(2025, 6, 1));

    let first = engine().evaluate(&obs, &ev, claim_date);
    let second = engine().evaluate(&obs, &ev, claim_date);
    assert_eq!(first, second);
}

#[test]
fn explanation_carries_the_full_trail() {
    let decision = engine().evaluate(
        &observation(CropCondition::DroughtStress, 0.9),
        &evidence(-0.25),
        None,
    );
    let text = &decision.explanation;
    assert!(text.contains("Classification:"));
    assert!(text.contains("drought_stress"));
    assert!(text.contains("Satellite analysis:"));
    assert!(text.contains("NDMI: -0.250"));
    assert!(text.contains("severe_stress"));
    assert!(text.contains("Decision trail:"));
    assert!(text.contains("rule_1_drought_low_moisture"));
    assert!(text.contains("ground weight 0.6"));
}

#[test]
fn explanation_handles_missing_ranked_output() {
    let mut obs = observation(CropCondition::FallArmyworm, 0.7);
    obs.ranked.clear();
    let decision = engine().evaluate(&obs, &evidence(0.1), None);
    assert!(decision
        .explanation
        .contains("no alternative classifications available"));
}

#[test]
fn disagreement_notice_appears_only_on_contradiction() {
    // Drought against a normal verdict disagrees.
    let flagged = engine().evaluate(
        &observation(CropCondition::DroughtStress, 0.9),
        &evidence(0.05),
        None,
    );
    assert!(flagged.explanation.contains("Disagreement notice"));

    // Healthy against severe stress disagrees.
    let rejected = engine().evaluate(
        &observation(CropCondition::Healthy, 0.9),
        &evidence(-0.25),
        None,
    );
    assert!(rejected.explanation.contains("Disagreement notice"));

    // Drought confirmed by severe stress agrees.
    let approved = engine().evaluate(
        &observation(CropCondition::DroughtStress, 0.9),
        &evidence(-0.25),
        None,
    );
    assert!(!approved.explanation.contains("Disagreement notice"));
}
