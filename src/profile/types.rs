use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One submission's answers keyed by question id.
pub type AnswerSet = BTreeMap<String, RawAnswer>;

/// Answer payload, resolved once at ingestion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(untagged)]
pub enum AnswerValue {
    #[default]
    Null,
    Number(f64),
    Text(String),
    Distribution(BTreeMap<String, f64>),
}

impl AnswerValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn is_distribution(&self) -> bool {
        matches!(self, Self::Distribution(_))
    }

    /// Categorical reading of the value: the text itself, or the heaviest key
    /// of a distribution (first key wins ties).
    pub fn dominant_label(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s.as_str()),
            Self::Distribution(map) => {
                let mut best: Option<(&str, f64)> = None;
                for (key, weight) in map {
                    if best.map_or(true, |(_, w)| *weight > w) {
                        best = Some((key.as_str(), *weight));
                    }
                }
                best.map(|(key, _)| key)
            }
            _ => None,
        }
    }

    /// Key used when counting identical scalar answers.
    pub fn count_key(&self) -> String {
        match self {
            Self::Null => "null".to_string(),
            Self::Number(n) => n.to_string(),
            Self::Text(s) => s.clone(),
            Self::Distribution(_) => self.dominant_label().unwrap_or("").to_string(),
        }
    }
}

impl From<&str> for AnswerValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for AnswerValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<f64> for AnswerValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<BTreeMap<String, f64>> for AnswerValue {
    fn from(value: BTreeMap<String, f64>) -> Self {
        Self::Distribution(value)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct RawAnswer {
    #[serde(default)]
    pub question_id: String,
    #[serde(default)]
    pub parameter: Option<String>,
    #[serde(default)]
    pub value: AnswerValue,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_time: Option<f64>,
}

impl RawAnswer {
    pub fn new(parameter: impl Into<String>, value: impl Into<AnswerValue>) -> Self {
        Self {
            parameter: Some(parameter.into()),
            value: value.into(),
            ..Default::default()
        }
    }

    pub fn with_question_id(mut self, question_id: impl Into<String>) -> Self {
        self.question_id = question_id.into();
        self
    }

    pub fn with_timestamp(mut self, timestamp: impl Into<String>) -> Self {
        self.timestamp = Some(timestamp.into());
        self
    }

    pub fn with_response_time(mut self, seconds: f64) -> Self {
        self.response_time = Some(seconds);
        self
    }

    /// Parameter name, `None` when missing or blank.
    pub fn parameter_name(&self) -> Option<&str> {
        self.parameter
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessedParameter {
    pub value: AnswerValue,
    pub weight: f64,
    pub consistency_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DimensionValue {
    Score(f64),
    Label(String),
    Map(BTreeMap<String, f64>),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DimensionMap(BTreeMap<String, DimensionValue>);

impl DimensionMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: DimensionValue) {
        self.0.insert(key.into(), value);
    }

    pub fn get(&self, key: &str) -> Option<&DimensionValue> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn score(&self, key: &str) -> Option<f64> {
        match self.0.get(key) {
            Some(DimensionValue::Score(v)) => Some(*v),
            _ => None,
        }
    }

    pub fn score_or(&self, key: &str, default: f64) -> f64 {
        self.score(key).unwrap_or(default)
    }

    pub fn label(&self, key: &str) -> Option<&str> {
        match self.0.get(key) {
            Some(DimensionValue::Label(s)) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn map(&self, key: &str) -> Option<&BTreeMap<String, f64>> {
        match self.0.get(key) {
            Some(DimensionValue::Map(m)) => Some(m),
            _ => None,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &DimensionValue)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CognitiveLoadProfile {
    pub intrinsic: f64,
    pub extraneous: f64,
    pub germane: f64,
    pub management: f64,
    pub composite: f64,
}

impl Default for CognitiveLoadProfile {
    fn default() -> Self {
        Self {
            intrinsic: 0.5,
            extraneous: 0.5,
            germane: 0.5,
            management: 0.5,
            composite: 0.5,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VelocityPattern {
    FastStart,
    SteadyPace,
    SlowStart,
    AdaptivePace,
}

impl VelocityPattern {
    pub const ALL: [VelocityPattern; 4] = [
        Self::FastStart,
        Self::SteadyPace,
        Self::SlowStart,
        Self::AdaptivePace,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FastStart => "FastStart",
            Self::SteadyPace => "SteadyPace",
            Self::SlowStart => "SlowStart",
            Self::AdaptivePace => "AdaptivePace",
        }
    }

    /// Accepts `FastStart`, `fast start`, `fast-start` and similar spellings.
    pub fn parse(s: &str) -> Option<Self> {
        let folded: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect();
        match folded.as_str() {
            "faststart" => Some(Self::FastStart),
            "steadypace" => Some(Self::SteadyPace),
            "slowstart" => Some(Self::SlowStart),
            "adaptivepace" => Some(Self::AdaptivePace),
            _ => None,
        }
    }

    pub fn pattern_factor(&self) -> f64 {
        match self {
            Self::FastStart => 1.1,
            Self::SteadyPace => 1.0,
            Self::SlowStart => 0.9,
            Self::AdaptivePace => 1.05,
        }
    }

    /// Relative pace for the (initial, midpoint, completion) phases.
    pub fn phase_paces(&self) -> (f64, f64, f64) {
        match self {
            Self::FastStart => (1.3, 1.0, 0.85),
            Self::SteadyPace => (1.0, 1.0, 1.0),
            Self::SlowStart => (0.75, 1.0, 1.2),
            Self::AdaptivePace => (0.9, 1.15, 1.05),
        }
    }

    /// Base (short, medium, long) term retention.
    pub fn retention_base(&self) -> (f64, f64, f64) {
        match self {
            Self::FastStart => (0.9, 0.7, 0.5),
            Self::SteadyPace => (0.85, 0.75, 0.65),
            Self::SlowStart => (0.8, 0.75, 0.7),
            Self::AdaptivePace => (0.88, 0.78, 0.68),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProbabilisticRanges {
    pub optimistic: f64,
    pub expected: f64,
    pub conservative: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhaseVelocity {
    pub initial: f64,
    pub midpoint: f64,
    pub completion: f64,
}

/// Share of total time per phase, in whole percent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseDurations {
    pub initial: u32,
    pub midpoint: u32,
    pub completion: u32,
}

impl PhaseDurations {
    pub fn total(&self) -> u32 {
        self.initial + self.midpoint + self.completion
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RetentionProfile {
    pub short_term: f64,
    pub medium_term: f64,
    pub long_term: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VelocityFactors {
    pub adaptability: f64,
    pub cognitive: f64,
    pub complexity: f64,
    pub motivation: f64,
    pub media_match: f64,
    pub prior_knowledge: f64,
    pub style_match: f64,
    pub acquisition: f64,
    pub retention: f64,
    pub application: f64,
    pub transfer: f64,
    pub pattern_factor: f64,
    pub normalized_velocity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VelocityPrediction {
    pub base_velocity: f64,
    pub pattern: VelocityPattern,
    pub time_multiplier: f64,
    pub confidence: f64,
    pub variance: f64,
    pub probabilistic_ranges: ProbabilisticRanges,
    pub phase_velocity: PhaseVelocity,
    pub phase_durations: PhaseDurations,
    pub retention_profile: RetentionProfile,
    pub measurement_preference: String,
    pub timeframe_precision: String,
    pub factors: VelocityFactors,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearningStyles {
    pub primary: String,
    pub secondary: Option<String>,
    pub scores: BTreeMap<String, f64>,
    pub is_multimodal: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style_blend: Option<BTreeMap<String, f64>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearningApproaches {
    pub primary: String,
    pub secondary: Option<String>,
    pub scores: BTreeMap<String, f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimalConditions {
    pub timing: f64,
    pub duration: f64,
    pub environment: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentPreferences {
    pub sequencing: f64,
    pub feedback: f64,
    pub motivation: f64,
    pub knowledge_integration: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LearnerProfile {
    pub learning_styles: LearningStyles,
    pub learning_approaches: LearningApproaches,
    pub optimal_conditions: OptimalConditions,
    pub content_preferences: ContentPreferences,
    pub cognitive_profile: CognitiveLoadProfile,
    pub velocity_prediction: VelocityPrediction,
    pub raw_dimensions: DimensionMap,
}
