use rayon::prelude::*;
use thiserror::Error;

use super::assembler::ProfileAssembler;
use super::config::ProfileConfig;
use super::modeling::{CognitiveLoadCalculator, DimensionCalculator, VelocityPredictor};
use super::preprocess::ResponsePreprocessor;
use super::style::StyleDistribution;
use super::tables::dim;
use super::types::{AnswerSet, DimensionMap, LearnerProfile};

#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("invalid answer payload: {0}")]
    InvalidPayload(#[from] serde_json::Error),
}

/// Stateless profile inference over one submission at a time.
#[derive(Debug, Clone, Default)]
pub struct ProfileEngine {
    config: ProfileConfig,
}

impl ProfileEngine {
    pub fn new(config: ProfileConfig) -> Self {
        Self { config }
    }

    pub fn from_env() -> Self {
        Self::new(ProfileConfig::from_env())
    }

    pub fn config(&self) -> &ProfileConfig {
        &self.config
    }

    pub fn infer_profile(&self, answers: &AnswerSet) -> LearnerProfile {
        let responses = ResponsePreprocessor::new(&self.config.preprocess).process(answers);

        let dimensions = match DimensionCalculator::new().calculate(&responses) {
            Ok(dimensions) => dimensions,
            Err(err) => {
                tracing::warn!(error = %err, "dimension calculation failed, using safe defaults");
                DimensionMap::safe_defaults()
            }
        };

        let cognitive =
            CognitiveLoadCalculator::new(&self.config.cognitive_load).calculate(&responses);

        let styles = dimensions
            .map(dim::LEARNING_STYLE_DISTRIBUTION)
            .map(StyleDistribution::from_vark_map)
            .filter(|styles| !styles.is_empty())
            .unwrap_or_else(StyleDistribution::vark_uniform);

        let assembler = ProfileAssembler::new(&self.config.assembler);
        let velocity = VelocityPredictor::new(&self.config.velocity).predict(
            &dimensions,
            &cognitive,
            &styles,
            assembler.is_multimodal(&dimensions),
        );

        assembler.assemble(dimensions, &styles, cognitive, velocity)
    }

    /// Independent submissions in parallel; output order follows input order.
    pub fn infer_batch(&self, submissions: &[AnswerSet]) -> Vec<LearnerProfile> {
        submissions
            .par_iter()
            .map(|answers| self.infer_profile(answers))
            .collect()
    }

    /// Parses `{question_id: {parameter, value, timestamp?, response_time?}}` and infers.
    pub fn infer_profile_json(&self, payload: &str) -> Result<LearnerProfile, ProfileError> {
        let mut answers: AnswerSet = serde_json::from_str(payload)?;
        for (question_id, answer) in answers.iter_mut() {
            if answer.question_id.is_empty() {
                answer.question_id = question_id.clone();
            }
        }
        Ok(self.infer_profile(&answers))
    }
}

/// Infers a profile with the default configuration.
pub fn infer_profile(answers: &AnswerSet) -> LearnerProfile {
    ProfileEngine::default().infer_profile(answers)
}
