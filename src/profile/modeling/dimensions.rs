use std::collections::BTreeMap;

use thiserror::Error;

use crate::profile::preprocess::PreprocessedResponses;
use crate::profile::style::StyleDistribution;
use crate::profile::tables::{self, dim, param, VARK_STYLES};
use crate::profile::types::{AnswerValue, DimensionMap, DimensionValue};

const NEUTRAL_SCORE: f64 = 0.5;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DimensionError {
    #[error("non-finite value for parameter {parameter}")]
    NonFinite { parameter: String },
}

impl DimensionMap {
    /// Substitute used when dimension calculation fails.
    pub fn safe_defaults() -> Self {
        let mut dims = DimensionMap::new();
        for (key, score) in [
            (param::ADAPTABILITY, 0.7),
            (param::MEDIA_PREFERENCE, 0.7),
            (param::FEEDBACK_UTILIZATION, 0.7),
            (param::SKILL_COMPLEXITY, 0.6),
            (param::DISTRACTION_SENSITIVITY, 0.5),
            (param::MOTIVATION_DRIVERS, 0.7),
            (dim::MOTIVATIONAL_SYSTEM, 0.7),
            (param::PRIOR_KNOWLEDGE, 0.7),
            (dim::KNOWLEDGE_ASSIMILATION, 0.7),
            (dim::MULTIMODAL_INTEGRATION, 0.5),
            (param::OPTIMAL_TIMING, 0.5),
            (param::SESSION_DURATION, 0.5),
            (param::LEARNING_ENVIRONMENT, 0.5),
            (param::CONTENT_SEQUENCING, 0.5),
        ] {
            dims.insert(key, DimensionValue::Score(score));
        }
        dims
    }
}

/// Maps resolved parameters onto normalized dimensions.
#[derive(Debug, Default, Clone, Copy)]
pub struct DimensionCalculator;

impl DimensionCalculator {
    pub fn new() -> Self {
        Self
    }

    pub fn calculate(
        &self,
        responses: &PreprocessedResponses,
    ) -> Result<DimensionMap, DimensionError> {
        let mut dims = DimensionMap::new();
        let mut styles: Vec<(String, f64)> =
            VARK_STYLES.iter().map(|s| (s.to_string(), 0.0)).collect();
        let mut style_answers = 0usize;
        let mut approaches: BTreeMap<String, f64> = BTreeMap::new();
        let mut contributed: Vec<(&'static str, f64)> = Vec::new();

        for (name, processed) in &responses.parameters {
            ensure_finite(name, &processed.value)?;
            let value = &processed.value;

            let dimension = if name.starts_with(param::LEARNING_STYLE_PREFIX) {
                let (dimension, dist) = learning_style(value);
                if let Some(dist) = dist {
                    style_answers += 1;
                    accumulate(&mut styles, &dist, processed.weight);
                }
                dimension
            } else if name.starts_with(param::LEARNING_VELOCITY_PREFIX) {
                pass_through(value)
            } else if name.starts_with(param::HONEY_MUMFORD_PREFIX) {
                match value.as_text().and_then(tables::honey_mumford_approach) {
                    Some((approach, score)) => {
                        let entry = approaches.entry(approach.to_string()).or_insert(0.0);
                        *entry = entry.max(score);
                        Some(DimensionValue::Score(score))
                    }
                    None => Some(DimensionValue::Score(generic(name, value, &mut contributed))),
                }
            } else if name == param::COGNITIVE_LOAD_MANAGEMENT {
                value
                    .dominant_label()
                    .map(|label| DimensionValue::Label(label.to_string()))
            } else if name.starts_with(param::COGNITIVE_PREFIX) {
                Some(DimensionValue::Score(cognitive(value)))
            } else {
                Some(DimensionValue::Score(generic(name, value, &mut contributed)))
            };

            if let Some(dimension) = dimension {
                dims.insert(name.clone(), dimension);
            }
        }

        for (dimension, score) in contributed {
            if !dims.contains_key(dimension) {
                dims.insert(dimension, DimensionValue::Score(score));
            }
        }

        derive_dimensions(&mut dims, responses);

        if style_answers > 0 {
            let combined = StyleDistribution::from_weights(styles);
            if !dims.contains_key(dim::MULTIMODAL_INTEGRATION) {
                dims.insert(
                    dim::MULTIMODAL_INTEGRATION,
                    DimensionValue::Score(multimodal_integration(&combined)),
                );
            }
            dims.insert(
                dim::LEARNING_STYLE_DISTRIBUTION,
                DimensionValue::Map(combined.to_map()),
            );
        }

        if !approaches.is_empty() {
            dims.insert(dim::LEARNING_APPROACHES, DimensionValue::Map(approaches));
        }

        dims.insert(
            dim::CONSISTENCY_SCORES,
            DimensionValue::Map(responses.consistency_scores()),
        );
        if let Some(avg) = responses.avg_response_time() {
            dims.insert(dim::AVG_RESPONSE_TIME, DimensionValue::Score(avg));
        }

        tracing::debug!(
            dimensions = dims.len(),
            style_answers,
            "calculated dimensions"
        );

        Ok(dims)
    }
}

fn ensure_finite(parameter: &str, value: &AnswerValue) -> Result<(), DimensionError> {
    let finite = match value {
        AnswerValue::Number(n) => n.is_finite(),
        AnswerValue::Distribution(map) => map.values().all(|w| w.is_finite()),
        _ => true,
    };
    if finite {
        Ok(())
    } else {
        Err(DimensionError::NonFinite {
            parameter: parameter.to_string(),
        })
    }
}

/// VARK-mapped value plus the style distribution it contributes, if any.
/// Compound values stay whole here; splitting happens when the distribution is built.
fn learning_style(value: &AnswerValue) -> (Option<DimensionValue>, Option<StyleDistribution>) {
    match value {
        AnswerValue::Text(text) => {
            let mapped = tables::canonical_style(text);
            let parts = StyleDistribution::from_name(&mapped);
            let dist = StyleDistribution::from_weights(
                parts.iter().map(|(style, w)| (tables::canonical_style(style), w)),
            );
            let dist = (!dist.is_empty()).then_some(dist);
            (Some(DimensionValue::Label(mapped)), dist)
        }
        AnswerValue::Distribution(map) => {
            let dist = StyleDistribution::from_weights(
                map.iter().map(|(style, w)| (tables::canonical_style(style), *w)),
            );
            let mapped = dist.to_map();
            let dist = (!dist.is_empty()).then_some(dist);
            (Some(DimensionValue::Map(mapped)), dist)
        }
        AnswerValue::Number(n) => (Some(DimensionValue::Score(n.clamp(0.0, 1.0))), None),
        AnswerValue::Null => (None, None),
    }
}

fn accumulate(styles: &mut Vec<(String, f64)>, dist: &StyleDistribution, weight: f64) {
    for (style, w) in dist.iter() {
        match styles.iter_mut().find(|(name, _)| name == style) {
            Some(entry) => entry.1 += w * weight,
            None => styles.push((style.to_string(), w * weight)),
        }
    }
}

fn pass_through(value: &AnswerValue) -> Option<DimensionValue> {
    match value {
        AnswerValue::Text(s) => Some(DimensionValue::Label(s.clone())),
        AnswerValue::Number(n) => Some(DimensionValue::Score(*n)),
        AnswerValue::Distribution(map) => Some(DimensionValue::Map(map.clone())),
        AnswerValue::Null => None,
    }
}

fn cognitive(value: &AnswerValue) -> f64 {
    match value {
        AnswerValue::Number(n) => n.clamp(0.0, 1.0),
        other => other
            .dominant_label()
            .and_then(|label| tables::lookup(tables::COGNITIVE_STYLES, label))
            .unwrap_or(tables::COGNITIVE_DEFAULT),
    }
}

fn generic(
    parameter: &str,
    value: &AnswerValue,
    contributed: &mut Vec<(&'static str, f64)>,
) -> f64 {
    match value {
        AnswerValue::Number(n) => n.clamp(0.0, 1.0),
        AnswerValue::Null => NEUTRAL_SCORE,
        other => match other.dominant_label() {
            Some(label) => categorical(parameter, label, contributed),
            None => NEUTRAL_SCORE,
        },
    }
}

fn categorical(
    parameter: &str,
    label: &str,
    contributed: &mut Vec<(&'static str, f64)>,
) -> f64 {
    if let Some(table) = tables::named_table(parameter) {
        return table.score(label);
    }

    let mut own = None;
    for contribution in tables::contributions(parameter) {
        let Some(score) = tables::lookup(contribution.entries, label) else {
            continue;
        };
        if contribution.dimension.eq_ignore_ascii_case(parameter) {
            own.get_or_insert(score);
        } else {
            contributed.push((contribution.dimension, score));
        }
    }

    own.unwrap_or(NEUTRAL_SCORE)
}

fn derive_dimensions(dims: &mut DimensionMap, responses: &PreprocessedResponses) {
    if let Some(motivation) = dims.get(param::MOTIVATION_DRIVERS).cloned() {
        dims.insert(dim::MOTIVATIONAL_SYSTEM, motivation);
    }

    if let Some(value) = responses.value(param::PRIOR_KNOWLEDGE) {
        let assimilation = match value {
            AnswerValue::Number(n) => Some(n.clamp(0.0, 1.0)),
            other => other
                .dominant_label()
                .and_then(|label| tables::lookup(tables::KNOWLEDGE_ASSIMILATION, label))
                .or_else(|| dims.score(param::PRIOR_KNOWLEDGE)),
        };
        if let Some(score) = assimilation {
            dims.insert(dim::KNOWLEDGE_ASSIMILATION, DimensionValue::Score(score));
        }
    }
}

/// How evenly the top two styles share the learner: 1.0 for a perfect split.
fn multimodal_integration(dist: &StyleDistribution) -> f64 {
    if !dist.is_multimodal() {
        return 0.0;
    }
    let ranked = dist.ranked();
    (1.0 - (ranked[0].1 - ranked[1].1)).clamp(0.0, 1.0)
}
