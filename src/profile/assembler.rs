use std::collections::BTreeMap;

use super::config::AssemblerParams;
use super::style::StyleDistribution;
use super::tables::{dim, param, HONEY_MUMFORD_APPROACHES, VARK_STYLES};
use super::types::{
    CognitiveLoadProfile, ContentPreferences, DimensionMap, LearnerProfile, LearningApproaches,
    LearningStyles, OptimalConditions, VelocityPrediction,
};

pub struct ProfileAssembler<'a> {
    params: &'a AssemblerParams,
}

impl<'a> ProfileAssembler<'a> {
    pub fn new(params: &'a AssemblerParams) -> Self {
        Self { params }
    }

    pub fn assemble(
        &self,
        dimensions: DimensionMap,
        styles: &StyleDistribution,
        cognitive_profile: CognitiveLoadProfile,
        velocity_prediction: VelocityPrediction,
    ) -> LearnerProfile {
        let default = self.params.default_score;
        let score = |key: &str| dimensions.score_or(key, default);

        let learning_styles = self.learning_styles(&dimensions, styles);
        let learning_approaches = self.learning_approaches(&dimensions);

        let optimal_conditions = OptimalConditions {
            timing: score(param::OPTIMAL_TIMING),
            duration: score(param::SESSION_DURATION),
            environment: score(param::LEARNING_ENVIRONMENT),
        };
        let content_preferences = ContentPreferences {
            sequencing: score(param::CONTENT_SEQUENCING),
            feedback: score(param::FEEDBACK_UTILIZATION),
            motivation: score(dim::MOTIVATIONAL_SYSTEM),
            knowledge_integration: score(dim::KNOWLEDGE_ASSIMILATION),
        };

        tracing::debug!(
            primary_style = %learning_styles.primary,
            multimodal = learning_styles.is_multimodal,
            primary_approach = %learning_approaches.primary,
            "assembled learner profile"
        );

        LearnerProfile {
            learning_styles,
            learning_approaches,
            optimal_conditions,
            content_preferences,
            cognitive_profile,
            velocity_prediction,
            raw_dimensions: dimensions,
        }
    }

    /// `MultimodalIntegration` above the configured threshold.
    pub fn is_multimodal(&self, dims: &DimensionMap) -> bool {
        dims.score_or(dim::MULTIMODAL_INTEGRATION, self.params.default_score)
            > self.params.multimodal_threshold
    }

    fn learning_styles(&self, dims: &DimensionMap, styles: &StyleDistribution) -> LearningStyles {
        let mut scores: BTreeMap<String, f64> = VARK_STYLES
            .iter()
            .map(|style| (style.to_string(), styles.weight_of(style)))
            .collect();
        for (style, weight) in styles.iter() {
            scores.entry(style.to_string()).or_insert(weight);
        }

        let primary = styles.primary_style().unwrap_or(VARK_STYLES[0]).to_string();
        let secondary = styles.secondary_style().map(str::to_string);

        let is_multimodal = self.is_multimodal(dims);

        let ranked = styles.ranked();
        let second_score = ranked.get(1).map(|(_, w)| *w).unwrap_or(0.0);
        let style_blend = (is_multimodal && second_score > self.params.blend_secondary_threshold)
            .then(|| {
                let members = ranked
                    .iter()
                    .take(self.params.blend_max_styles)
                    .filter(|(_, w)| *w > self.params.blend_member_threshold)
                    .map(|(style, w)| (*style, *w));
                StyleDistribution::from_weights(members).to_map()
            })
            .filter(|blend| blend.len() > 1);

        LearningStyles {
            primary,
            secondary,
            scores,
            is_multimodal,
            style_blend,
        }
    }

    fn learning_approaches(&self, dims: &DimensionMap) -> LearningApproaches {
        let answered = dims.map(dim::LEARNING_APPROACHES);
        let ranked_input: Vec<(&str, f64)> = HONEY_MUMFORD_APPROACHES
            .iter()
            .map(|(name, _)| {
                let score = match answered {
                    Some(map) => map.get(*name).copied().unwrap_or(0.0),
                    None => self.params.default_score,
                };
                (*name, score)
            })
            .collect();

        let mut ranked = ranked_input.clone();
        ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

        let primary = ranked[0].0.to_string();
        let secondary = ranked
            .get(1)
            .filter(|(_, score)| *score > 0.0)
            .map(|(name, _)| name.to_string());

        LearningApproaches {
            primary,
            secondary,
            scores: ranked_input
                .into_iter()
                .map(|(name, score)| (name.to_string(), score))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::config::VelocityParams;
    use crate::profile::modeling::VelocityPredictor;
    use crate::profile::types::DimensionValue;

    fn assemble(dims: DimensionMap, styles: &StyleDistribution) -> LearnerProfile {
        let params = AssemblerParams::default();
        let load = CognitiveLoadProfile::default();
        let velocity_params = VelocityParams::default();
        let assembler = ProfileAssembler::new(&params);
        let velocity = VelocityPredictor::new(&velocity_params).predict(
            &dims,
            &load,
            styles,
            assembler.is_multimodal(&dims),
        );
        assembler.assemble(dims, styles, load, velocity)
    }

    #[test]
    fn defaults_are_fully_populated() {
        let profile = assemble(DimensionMap::new(), &StyleDistribution::vark_uniform());
        assert_eq!(profile.learning_styles.primary, "Visual");
        assert_eq!(profile.learning_styles.secondary.as_deref(), Some("Auditory"));
        assert!(!profile.learning_styles.is_multimodal);
        assert_eq!(profile.learning_styles.scores.len(), 4);
        assert_eq!(profile.learning_approaches.primary, "Activist");
        assert_eq!(profile.learning_approaches.secondary.as_deref(), Some("Reflector"));
        assert_eq!(profile.optimal_conditions.timing, 0.5);
        assert_eq!(profile.content_preferences.knowledge_integration, 0.5);
    }

    #[test]
    fn multimodal_blend_for_even_split() {
        let mut dims = DimensionMap::new();
        dims.insert(dim::MULTIMODAL_INTEGRATION, DimensionValue::Score(0.9));
        let styles = StyleDistribution::from_weights([
            ("Visual", 0.45),
            ("Kinesthetic", 0.42),
            ("Auditory", 0.13),
        ]);
        let profile = assemble(dims, &styles);
        let ls = &profile.learning_styles;
        assert!(ls.is_multimodal);
        let blend = ls.style_blend.as_ref().unwrap();
        assert_eq!(blend.len(), 2);
        assert!((blend.values().sum::<f64>() - 1.0).abs() < 1e-12);
        assert!(!blend.contains_key("Auditory"));
    }

    #[test]
    fn no_blend_when_second_style_is_weak() {
        let mut dims = DimensionMap::new();
        dims.insert(dim::MULTIMODAL_INTEGRATION, DimensionValue::Score(0.9));
        let styles = StyleDistribution::from_weights([("Visual", 0.7), ("Auditory", 0.3)]);
        let profile = assemble(dims, &styles);
        assert!(profile.learning_styles.is_multimodal);
        assert!(profile.learning_styles.style_blend.is_none());
    }

    #[test]
    fn approaches_rank_answered_scores() {
        let mut dims = DimensionMap::new();
        dims.insert(
            dim::LEARNING_APPROACHES,
            DimensionValue::Map([("Theorist".to_string(), 0.7)].into()),
        );
        let profile = assemble(dims, &StyleDistribution::vark_uniform());
        let la = &profile.learning_approaches;
        assert_eq!(la.primary, "Theorist");
        assert_eq!(la.secondary, None);
        assert_eq!(la.scores["Activist"], 0.0);
        assert_eq!(la.scores.len(), 4);
    }
}
