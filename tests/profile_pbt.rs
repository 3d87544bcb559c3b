//! Property-based tests for learner profile inference.
//!
//! Tests the following invariants:
//! - Normalization: a distribution with any positive weight sums to 1.0
//! - Similarity: every distribution is fully similar to itself
//! - Consistency: a single answer per parameter is always fully consistent
//! - Bounds: composite load, time multiplier, confidence and phase shares stay in range

use proptest::prelude::*;

use learner_profile::profile::config::PreprocessParams;
use learner_profile::profile::ResponsePreprocessor;
use learner_profile::{infer_profile, AnswerSet, AnswerValue, RawAnswer, StyleDistribution};

// ============================================================================
// Arbitrary Generators
// ============================================================================

const STYLES: &[&str] = &["Visual", "Auditory", "Kinesthetic", "ReadWrite", "Tactile"];

const NUMERIC_PARAMETERS: &[&str] = &[
    "Adaptability",
    "SkillAcquisition-Complexity",
    "DistractionSensitivity",
    "PsychologicalSafety",
    "MediaPreference",
    "Motivation-Drivers",
    "PriorKnowledgeIntegration",
    "LearningVelocity-Retention",
    "LearningVelocity-Timeframe",
];

const LABELLED_ANSWERS: &[(&str, &[&str])] = &[
    (
        "CognitiveLoad-Management",
        &["Chunking", "Connecting", "Overwhelmed", "Meditation"],
    ),
    ("CognitiveLoad", &["Comfortable", "Challenged", "Overwhelmed"]),
    ("DistractionSensitivity", &["High", "Moderate", "Low"]),
    ("SkillAcquisition-Complexity", &["Complex", "Moderate", "Simple"]),
    ("LearningVelocity-Pattern", &["FastStart", "steady pace", "slow-start", "Unknown"]),
    ("LearningVelocity-Acquisition", &["Rapid", "Gradual", "Variable"]),
    ("LearningVelocity-Timeframe", &["Precise", "Flexible", "Uncertain"]),
    ("LearningStyle-Technical", &["Visual", "Aural", "Hands-on", "Read/Write"]),
    ("HoneyMumford-Approach", &["Activist", "Theorist", "Pragmatist"]),
];

fn arb_f64_0_1() -> impl Strategy<Value = f64> {
    (0u64..=1000u64).prop_map(|v| v as f64 / 1000.0)
}

fn arb_weights() -> impl Strategy<Value = Vec<(&'static str, f64)>> {
    prop::collection::vec((prop::sample::select(STYLES), arb_f64_0_1()), 1..8)
}

fn arb_distribution() -> impl Strategy<Value = StyleDistribution> {
    arb_weights().prop_map(StyleDistribution::from_weights)
}

fn arb_answer() -> impl Strategy<Value = RawAnswer> {
    let numeric = (prop::sample::select(NUMERIC_PARAMETERS), arb_f64_0_1())
        .prop_map(|(parameter, value)| RawAnswer::new(parameter, value));
    let labelled = prop::sample::select(LABELLED_ANSWERS)
        .prop_flat_map(|(parameter, labels)| (Just(parameter), prop::sample::select(labels)))
        .prop_map(|(parameter, label)| RawAnswer::new(parameter, label));

    (
        prop_oneof![numeric, labelled],
        proptest::option::of(0.0f64..120.0),
    )
        .prop_map(|(answer, response_time)| match response_time {
            Some(seconds) => answer.with_response_time(seconds),
            None => answer,
        })
}

fn arb_answer_set() -> impl Strategy<Value = AnswerSet> {
    prop::collection::vec(arb_answer(), 0..20).prop_map(|answers| {
        answers
            .into_iter()
            .enumerate()
            .map(|(i, answer)| {
                let id = format!("q{i:02}");
                (id.clone(), answer.with_question_id(id))
            })
            .collect()
    })
}

// ============================================================================
// Style distribution
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn prop_positive_distribution_sums_to_one(weights in arb_weights()) {
        prop_assume!(weights.iter().any(|(_, w)| *w > 0.0));
        let dist = StyleDistribution::from_weights(weights);
        prop_assert!((dist.total() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn prop_self_similarity_is_one(dist in arb_distribution()) {
        prop_assert!((dist.similarity(&dist) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn prop_similarity_is_bounded(a in arb_distribution(), b in arb_distribution()) {
        let s = a.similarity(&b);
        prop_assert!((0.0..=1.0).contains(&s));
    }
}

// ============================================================================
// Preprocessing
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn prop_single_answer_groups_are_consistent(answers in arb_answer_set()) {
        let params = PreprocessParams::default();
        let responses = ResponsePreprocessor::new(&params).process(&answers);

        for (name, processed) in &responses.parameters {
            let group_size = answers
                .values()
                .filter(|a| a.parameter.as_deref() == Some(name.as_str()))
                .count();
            if group_size == 1 {
                prop_assert_eq!(processed.consistency_score, 1.0);
            }
            prop_assert!((0.0..=1.0).contains(&processed.consistency_score));
            prop_assert!(processed.weight <= 1.0);
        }
    }
}

// ============================================================================
// Full inference bounds
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn prop_composite_load_in_unit_range(
        distraction in arb_f64_0_1(),
        complexity in arb_f64_0_1(),
        safety in arb_f64_0_1(),
    ) {
        let mut answers = AnswerSet::new();
        answers.insert("q1".into(), RawAnswer::new("DistractionSensitivity", distraction));
        answers.insert("q2".into(), RawAnswer::new("SkillAcquisition-Complexity", complexity));
        answers.insert("q3".into(), RawAnswer::new("PsychologicalSafety", safety));

        let load = infer_profile(&answers).cognitive_profile;
        prop_assert!((0.0..=1.0).contains(&load.composite));
        for axis in [load.intrinsic, load.extraneous, load.germane, load.management] {
            prop_assert!((0.0..=1.0).contains(&axis));
        }
    }

    #[test]
    fn prop_velocity_outputs_stay_in_bounds(answers in arb_answer_set()) {
        let profile = infer_profile(&answers);
        let velocity = &profile.velocity_prediction;

        prop_assert!((0.75..=2.0).contains(&velocity.time_multiplier));
        prop_assert!((0.4..=0.95).contains(&velocity.confidence));

        let ranges = &velocity.probabilistic_ranges;
        prop_assert!(ranges.optimistic <= ranges.expected);
        prop_assert!(ranges.expected <= ranges.conservative);

        let total = velocity.phase_durations.total();
        prop_assert!((99..=101).contains(&total), "phase total {}", total);
    }

    #[test]
    fn prop_style_scores_are_normalized(answers in arb_answer_set()) {
        let profile = infer_profile(&answers);
        let total: f64 = profile.learning_styles.scores.values().sum();
        prop_assert!((total - 1.0).abs() < 1e-9);
        prop_assert!(profile.learning_styles.scores.contains_key(&profile.learning_styles.primary));
    }

    #[test]
    fn prop_inference_is_deterministic(answers in arb_answer_set()) {
        let first = serde_json::to_string(&infer_profile(&answers)).unwrap();
        let second = serde_json::to_string(&infer_profile(&answers)).unwrap();
        prop_assert_eq!(first, second);
    }
}

#[test]
fn distribution_answers_keep_their_keys() {
    let mut weights = std::collections::BTreeMap::new();
    weights.insert("Visual".to_string(), 2.0);
    weights.insert("Tactile".to_string(), 2.0);
    let mut answers = AnswerSet::new();
    answers.insert(
        "q1".into(),
        RawAnswer::new("LearningStyle-Practical", AnswerValue::Distribution(weights)),
    );

    let scores = infer_profile(&answers).learning_styles.scores;
    assert_eq!(scores.len(), 5);
    assert!((scores["Tactile"] - 0.5).abs() < 1e-12);
}
