use crate::profile::config::VelocityParams;
use crate::profile::style::StyleDistribution;
use crate::profile::tables::{self, dim, param, NamedTable, VELOCITY_WEIGHTS};
use crate::profile::types::{
    CognitiveLoadProfile, DimensionMap, DimensionValue, PhaseDurations, PhaseVelocity,
    ProbabilisticRanges, RetentionProfile, VelocityFactors, VelocityPattern, VelocityPrediction,
};

const DEFAULT_FACTOR: f64 = 0.6;
const COMPLEXITY_THRESHOLD: f64 = 0.7;
const ADAPTIVE_THRESHOLD: f64 = 0.7;
const FAST_START_THRESHOLD: f64 = 0.6;

pub struct VelocityPredictor<'a> {
    params: &'a VelocityParams,
}

impl<'a> VelocityPredictor<'a> {
    pub fn new(params: &'a VelocityParams) -> Self {
        Self { params }
    }

    pub fn predict(
        &self,
        dims: &DimensionMap,
        load: &CognitiveLoadProfile,
        styles: &StyleDistribution,
        is_multimodal: bool,
    ) -> VelocityPrediction {
        let adaptability = dims.score_or(param::ADAPTABILITY, DEFAULT_FACTOR).clamp(0.0, 1.0);
        let complexity = dims.score_or(param::SKILL_COMPLEXITY, DEFAULT_FACTOR).clamp(0.0, 1.0);

        let mut factors = VelocityFactors {
            adaptability,
            cognitive: load.composite,
            complexity,
            motivation: dims
                .score_or(dim::MOTIVATIONAL_SYSTEM, DEFAULT_FACTOR)
                .clamp(0.0, 1.0),
            media_match: dims
                .score_or(param::MEDIA_PREFERENCE, DEFAULT_FACTOR)
                .clamp(0.0, 1.0),
            prior_knowledge: dims
                .score_or(dim::KNOWLEDGE_ASSIMILATION, DEFAULT_FACTOR)
                .clamp(0.0, 1.0),
            style_match: self.style_match(styles, is_multimodal),
            acquisition: sub_score(dims, &tables::VELOCITY_ACQUISITION),
            retention: sub_score(dims, &tables::VELOCITY_RETENTION),
            application: sub_score(dims, &tables::VELOCITY_APPLICATION),
            transfer: sub_score(dims, &tables::VELOCITY_TRANSFER),
            pattern_factor: 1.0,
            normalized_velocity: 0.0,
        };

        let velocity_score = weighted_score(&factors);
        let pattern = dims
            .label(param::VELOCITY_PATTERN)
            .and_then(VelocityPattern::parse)
            .unwrap_or_else(|| select_pattern(complexity, adaptability));

        let pattern_factor = pattern.pattern_factor();
        let normalized_velocity = (velocity_score * pattern_factor).clamp(0.0, 1.0);
        factors.pattern_factor = pattern_factor;
        factors.normalized_velocity = normalized_velocity;

        let (min_mult, max_mult) = (
            self.params.min_time_multiplier,
            self.params.max_time_multiplier,
        );
        let time_multiplier =
            (max_mult - normalized_velocity * (max_mult - min_mult)).clamp(min_mult, max_mult);

        let (timeframe_precision, precision_score) = timeframe(dims);
        let confidence = self.confidence(dims, load, precision_score);
        let variance = (1.0 - confidence) * self.params.variance_scale;

        let (initial, midpoint, completion) = pattern.phase_paces();

        tracing::debug!(
            pattern = pattern.as_str(),
            velocity_score,
            time_multiplier,
            confidence,
            "predicted learning velocity"
        );

        VelocityPrediction {
            base_velocity: velocity_score,
            pattern,
            time_multiplier,
            confidence,
            variance,
            probabilistic_ranges: ProbabilisticRanges {
                optimistic: round2(time_multiplier * (1.0 - variance)),
                expected: round2(time_multiplier),
                conservative: round2(time_multiplier * (1.0 + variance)),
            },
            phase_velocity: PhaseVelocity {
                initial: normalized_velocity * initial,
                midpoint: normalized_velocity * midpoint,
                completion: normalized_velocity * completion,
            },
            phase_durations: phase_durations(pattern),
            retention_profile: retention_profile(pattern, factors.retention, load.germane),
            measurement_preference: dims
                .label(param::VELOCITY_MEASUREMENT)
                .unwrap_or(tables::DEFAULT_MEASUREMENT_PREFERENCE)
                .to_string(),
            timeframe_precision,
            factors,
        }
    }

    /// Overlap between the learner's VARK weights and typical content delivery.
    /// Multimodal learners get the style bonus, capped at 1.0.
    pub fn style_match(&self, styles: &StyleDistribution, is_multimodal: bool) -> f64 {
        let matched: f64 = tables::CONTENT_DELIVERY
            .iter()
            .map(|(style, content)| content * (1.0 - (styles.weight_of(style) - content).abs()))
            .sum();

        let matched = if is_multimodal {
            matched * self.params.multimodal_style_bonus
        } else {
            matched
        };
        matched.clamp(0.0, 1.0)
    }

    fn confidence(&self, dims: &DimensionMap, load: &CognitiveLoadProfile, precision: f64) -> f64 {
        let load_confidence = 1.0 - load.intrinsic * 0.3 - load.extraneous * 0.4;

        let consistency = dims
            .map(dim::CONSISTENCY_SCORES)
            .filter(|scores| !scores.is_empty())
            .map(|scores| scores.values().sum::<f64>() / scores.len() as f64)
            .unwrap_or(self.params.default_consistency);

        let response_factor = dims
            .score(dim::AVG_RESPONSE_TIME)
            .filter(|avg| avg.is_finite())
            .map(|avg| 1.1 - 0.25 * (avg / self.params.response_time_scale).clamp(0.0, 1.0))
            .unwrap_or(1.0);

        let w = &self.params.confidence;
        let confidence = w.timeframe_precision * precision
            + w.cognitive_load * load_confidence
            + w.consistency * consistency
            + w.response_time * response_factor;

        confidence.clamp(self.params.min_confidence, self.params.max_confidence)
    }
}

fn weighted_score(f: &VelocityFactors) -> f64 {
    let w = VELOCITY_WEIGHTS;
    w.adaptability * f.adaptability
        + w.cognitive * f.cognitive
        + w.complexity * f.complexity
        + w.motivation * f.motivation
        + w.media_match * f.media_match
        + w.prior_knowledge * f.prior_knowledge
        + w.style_match * f.style_match
        + w.acquisition * f.acquisition
        + w.retention * f.retention
        + w.application * f.application
        + w.transfer * f.transfer
}

/// Decision tree used when no explicit pattern was given.
pub fn select_pattern(complexity: f64, adaptability: f64) -> VelocityPattern {
    if complexity > COMPLEXITY_THRESHOLD {
        if adaptability > ADAPTIVE_THRESHOLD {
            VelocityPattern::AdaptivePace
        } else {
            VelocityPattern::SteadyPace
        }
    } else if adaptability > FAST_START_THRESHOLD {
        VelocityPattern::FastStart
    } else {
        VelocityPattern::SlowStart
    }
}

fn sub_score(dims: &DimensionMap, table: &NamedTable) -> f64 {
    match dims.get(table.parameter) {
        Some(DimensionValue::Score(v)) if v.is_finite() => v.clamp(0.0, 1.0),
        Some(DimensionValue::Label(label)) => table.score(label),
        _ => table.default,
    }
}

/// Self-reported timeframe precision as (label, score).
fn timeframe(dims: &DimensionMap) -> (String, f64) {
    let table = &tables::TIMEFRAME_PRECISION;
    match dims.get(table.parameter) {
        Some(DimensionValue::Label(label)) => (label.clone(), table.score(label)),
        Some(DimensionValue::Score(v)) if v.is_finite() => {
            (tables::DEFAULT_TIMEFRAME_LABEL.to_string(), v.clamp(0.0, 1.0))
        }
        _ => (tables::DEFAULT_TIMEFRAME_LABEL.to_string(), table.default),
    }
}

fn retention_profile(pattern: VelocityPattern, retention: f64, germane: f64) -> RetentionProfile {
    let (short, medium, long) = pattern.retention_base();
    let r = retention - 0.5;
    let g = (germane - 0.5) * 0.3;

    RetentionProfile {
        short_term: (short * (1.0 + 0.2 * r + 0.5 * g)).clamp(0.5, 0.98),
        medium_term: (medium * (1.0 + 0.3 * r + 0.75 * g)).clamp(0.35, 0.95),
        long_term: (long * (1.0 + 0.4 * r + 1.0 * g)).clamp(0.2, 0.9),
    }
}

/// Rounded shares may total 99 to 101; they are not forced to 100.
fn phase_durations(pattern: VelocityPattern) -> PhaseDurations {
    let (initial, midpoint, completion) = pattern.phase_paces();
    let durations = [initial, midpoint, completion].map(|pace| 100.0 / (pace * 3.0));
    let total: f64 = durations.iter().sum();
    let [initial, midpoint, completion] =
        durations.map(|d| (d / total * 100.0).round() as u32);

    PhaseDurations {
        initial,
        midpoint,
        completion,
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
