use std::collections::{BTreeMap, BTreeSet};

use super::config::PreprocessParams;
use super::tables;
use super::types::{AnswerSet, AnswerValue, ProcessedParameter, RawAnswer};

/// Weight counted for a key that a response's distribution does not carry.
/// Scalar answers in a distribution group carry no map, so every key gets this.
const ABSENT_KEY_WEIGHT: f64 = 0.5;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PreprocessedResponses {
    pub parameters: BTreeMap<String, ProcessedParameter>,
    pub response_times: Vec<f64>,
}

impl PreprocessedResponses {
    pub fn get(&self, parameter: &str) -> Option<&ProcessedParameter> {
        self.parameters.get(parameter)
    }

    pub fn value(&self, parameter: &str) -> Option<&AnswerValue> {
        self.parameters.get(parameter).map(|p| &p.value)
    }

    pub fn avg_response_time(&self) -> Option<f64> {
        if self.response_times.is_empty() {
            return None;
        }
        Some(self.response_times.iter().sum::<f64>() / self.response_times.len() as f64)
    }

    pub fn consistency_scores(&self) -> BTreeMap<String, f64> {
        self.parameters
            .iter()
            .map(|(name, p)| (name.clone(), p.consistency_score))
            .collect()
    }
}

pub struct ResponsePreprocessor<'a> {
    params: &'a PreprocessParams,
}

impl<'a> ResponsePreprocessor<'a> {
    pub fn new(params: &'a PreprocessParams) -> Self {
        Self { params }
    }

    pub fn process(&self, answers: &AnswerSet) -> PreprocessedResponses {
        let mut groups: Vec<(&str, Vec<&RawAnswer>)> = Vec::new();
        let mut response_times = Vec::new();
        let mut dropped = 0usize;

        for answer in answers.values() {
            if let Some(seconds) = answer.response_time.filter(|t| t.is_finite() && *t >= 0.0) {
                response_times.push(seconds);
            }

            let Some(parameter) = answer.parameter_name() else {
                dropped += 1;
                continue;
            };

            match groups.iter_mut().find(|(name, _)| *name == parameter) {
                Some((_, group)) => group.push(answer),
                None => groups.push((parameter, vec![answer])),
            }
        }

        let parameters = groups
            .into_iter()
            .map(|(name, group)| (name.to_string(), self.resolve(name, group)))
            .collect::<BTreeMap<_, _>>();

        tracing::debug!(
            parameters = parameters.len(),
            dropped,
            timed = response_times.len(),
            "preprocessed responses"
        );

        PreprocessedResponses {
            parameters,
            response_times,
        }
    }

    fn resolve(&self, parameter: &str, mut group: Vec<&RawAnswer>) -> ProcessedParameter {
        let base_weight =
            tables::base_weight(parameter).unwrap_or(self.params.default_base_weight);

        let consistency_score = if group.len() == 1 {
            1.0
        } else {
            let values: Vec<&AnswerValue> = group.iter().map(|a| &a.value).collect();
            self.consistency(&values)
        };

        // Most recent first; a missing timestamp sorts after every real one.
        // `sort_by` is stable, so equal timestamps keep answer-set order.
        group.sort_by(|a, b| {
            let a_ts = a.timestamp.as_deref().unwrap_or("");
            let b_ts = b.timestamp.as_deref().unwrap_or("");
            b_ts.cmp(a_ts)
        });
        let value = group
            .first()
            .map(|a| a.value.clone())
            .unwrap_or_default();

        let weight =
            (base_weight * (1.0 + consistency_score * self.params.consistency_boost)).min(1.0);

        ProcessedParameter {
            value,
            weight,
            consistency_score,
        }
    }

    /// Share of the group agreeing with the most common answer.
    pub fn consistency(&self, values: &[&AnswerValue]) -> f64 {
        if values.is_empty() {
            return self.params.empty_group_consistency;
        }

        let max = if values.iter().any(|v| v.is_distribution()) {
            let mut keys: BTreeSet<String> = BTreeSet::new();
            for value in values {
                match value {
                    AnswerValue::Distribution(map) => keys.extend(map.keys().cloned()),
                    scalar => {
                        keys.insert(scalar.count_key());
                    }
                }
            }

            keys.iter()
                .map(|key| {
                    values
                        .iter()
                        .map(|value| match value {
                            AnswerValue::Distribution(map) => map
                                .get(key)
                                .copied()
                                .filter(|w| w.is_finite())
                                .unwrap_or(ABSENT_KEY_WEIGHT),
                            _ => ABSENT_KEY_WEIGHT,
                        })
                        .sum::<f64>()
                })
                .fold(0.0_f64, f64::max)
        } else {
            let mut counts: BTreeMap<String, f64> = BTreeMap::new();
            for value in values {
                *counts.entry(value.count_key()).or_insert(0.0) += 1.0;
            }
            counts.values().cloned().fold(0.0_f64, f64::max)
        };

        (max / values.len() as f64).clamp(0.0, 1.0)
    }
}
