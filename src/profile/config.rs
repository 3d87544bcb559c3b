use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreprocessParams {
    pub default_base_weight: f64,
    pub consistency_boost: f64,
    pub empty_group_consistency: f64,
}

impl Default for PreprocessParams {
    fn default() -> Self {
        Self {
            default_base_weight: 0.5,
            consistency_boost: 0.1,
            empty_group_consistency: 0.5,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompositeWeights {
    pub germane: f64,
    pub extraneous: f64,
    pub intrinsic: f64,
}

impl Default for CompositeWeights {
    fn default() -> Self {
        Self {
            germane: 0.4,
            extraneous: 0.3,
            intrinsic: 0.3,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CognitiveLoadParams {
    pub baseline: f64,
    /// Share of an indirect indicator mixed into the current value.
    pub blend_factor: f64,
    pub base_steepness: f64,
    pub management_steepness: f64,
    pub composite: CompositeWeights,
}

impl Default for CognitiveLoadParams {
    fn default() -> Self {
        Self {
            baseline: 0.5,
            blend_factor: 0.3,
            base_steepness: 4.0,
            management_steepness: 4.0,
            composite: CompositeWeights::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfidenceWeights {
    pub timeframe_precision: f64,
    pub cognitive_load: f64,
    pub consistency: f64,
    pub response_time: f64,
}

impl Default for ConfidenceWeights {
    fn default() -> Self {
        Self {
            timeframe_precision: 0.4,
            cognitive_load: 0.2,
            consistency: 0.3,
            response_time: 0.1,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VelocityParams {
    pub min_time_multiplier: f64,
    pub max_time_multiplier: f64,
    pub multimodal_style_bonus: f64,
    pub min_confidence: f64,
    pub max_confidence: f64,
    pub default_consistency: f64,
    pub variance_scale: f64,
    /// Seconds of average response time that map to the slowest response factor.
    pub response_time_scale: f64,
    pub confidence: ConfidenceWeights,
}

impl Default for VelocityParams {
    fn default() -> Self {
        Self {
            min_time_multiplier: 0.75,
            max_time_multiplier: 2.0,
            multimodal_style_bonus: 1.15,
            min_confidence: 0.4,
            max_confidence: 0.95,
            default_consistency: 0.85,
            variance_scale: 0.6,
            response_time_scale: 20.0,
            confidence: ConfidenceWeights::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssemblerParams {
    pub multimodal_threshold: f64,
    pub blend_secondary_threshold: f64,
    pub blend_member_threshold: f64,
    pub blend_max_styles: usize,
    pub default_score: f64,
}

impl Default for AssemblerParams {
    fn default() -> Self {
        Self {
            multimodal_threshold: 0.6,
            blend_secondary_threshold: 0.4,
            blend_member_threshold: 0.2,
            blend_max_styles: 3,
            default_score: 0.5,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileConfig {
    pub preprocess: PreprocessParams,
    pub cognitive_load: CognitiveLoadParams,
    pub velocity: VelocityParams,
    pub assembler: AssemblerParams,
}

impl ProfileConfig {
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();
        let mut config = Self::default();

        if let Some(val) = env_f64("PROFILE_CONSISTENCY_BOOST") {
            config.preprocess.consistency_boost = val.clamp(0.0, 1.0);
        }
        if let Some(val) = env_f64("PROFILE_MULTIMODAL_THRESHOLD") {
            config.assembler.multimodal_threshold = val.clamp(0.0, 1.0);
        }

        let min = env_f64("PROFILE_MIN_TIME_MULTIPLIER");
        let max = env_f64("PROFILE_MAX_TIME_MULTIPLIER");
        let min = min.unwrap_or(config.velocity.min_time_multiplier);
        let max = max.unwrap_or(config.velocity.max_time_multiplier);
        if min > 0.0 && min < max {
            config.velocity.min_time_multiplier = min;
            config.velocity.max_time_multiplier = max;
        } else {
            tracing::warn!(min, max, "ignoring invalid time multiplier bounds");
        }

        config
    }
}

fn env_f64(key: &str) -> Option<f64> {
    std::env::var(key)
        .ok()
        .and_then(|val| val.trim().parse::<f64>().ok())
        .filter(|val| val.is_finite())
}
