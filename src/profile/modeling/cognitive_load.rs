use crate::profile::config::CognitiveLoadParams;
use crate::profile::preprocess::PreprocessedResponses;
use crate::profile::tables::{self, param, AdjustmentTable, LoadAdjustment};
use crate::profile::types::{AnswerValue, CognitiveLoadProfile};

#[derive(Debug, Clone, Copy, PartialEq)]
enum Update {
    Overwrite,
    Blend(f64),
    Max,
}

#[derive(Debug, Clone, Copy)]
struct LoadState {
    intrinsic: f64,
    extraneous: f64,
    germane: f64,
    management: f64,
}

impl LoadState {
    fn apply(&mut self, adjustment: &LoadAdjustment, update: Update) {
        let merge = |current: f64, target: Option<f64>| match (target, update) {
            (None, _) => current,
            (Some(t), Update::Overwrite) => t,
            (Some(t), Update::Blend(share)) => current * (1.0 - share) + t * share,
            (Some(t), Update::Max) => current.max(t),
        };
        self.intrinsic = merge(self.intrinsic, adjustment.intrinsic).clamp(0.0, 1.0);
        self.extraneous = merge(self.extraneous, adjustment.extraneous).clamp(0.0, 1.0);
        self.germane = merge(self.germane, adjustment.germane).clamp(0.0, 1.0);
        self.management = merge(self.management, adjustment.management).clamp(0.0, 1.0);
    }
}

pub struct CognitiveLoadCalculator<'a> {
    params: &'a CognitiveLoadParams,
}

impl<'a> CognitiveLoadCalculator<'a> {
    pub fn new(params: &'a CognitiveLoadParams) -> Self {
        Self { params }
    }

    pub fn calculate(&self, responses: &PreprocessedResponses) -> CognitiveLoadProfile {
        let baseline = self.params.baseline;
        let mut state = LoadState {
            intrinsic: baseline,
            extraneous: baseline,
            germane: baseline,
            management: baseline,
        };

        if let Some(adjustment) = categorical(
            responses.value(param::COGNITIVE_LOAD_MANAGEMENT),
            tables::LOAD_MANAGEMENT_STRATEGIES,
        ) {
            state.apply(&adjustment, Update::Overwrite);
        }

        let blend = Update::Blend(self.params.blend_factor);
        for (parameter, table, numeric_axis) in [
            (
                param::DISTRACTION_SENSITIVITY,
                tables::DISTRACTION_INDICATORS,
                Axis::Extraneous,
            ),
            (
                param::SKILL_COMPLEXITY,
                tables::COMPLEXITY_INDICATORS,
                Axis::Intrinsic,
            ),
            (
                param::PSYCHOLOGICAL_SAFETY,
                tables::SAFETY_INDICATORS,
                Axis::Germane,
            ),
        ] {
            let value = responses.value(parameter);
            let adjustment = match value.and_then(AnswerValue::as_number) {
                Some(n) if n.is_finite() => Some(numeric_axis.adjustment(n.clamp(0.0, 1.0))),
                _ => categorical(value, table),
            };
            if let Some(adjustment) = adjustment {
                state.apply(&adjustment, blend);
            }
        }

        if let Some(adjustment) =
            categorical(responses.value(param::COGNITIVE_LOAD), tables::DIRECT_LOAD_REPORTS)
        {
            state.apply(&adjustment, Update::Max);
        }

        let composite = self.composite(&state);

        tracing::debug!(
            intrinsic = state.intrinsic,
            extraneous = state.extraneous,
            germane = state.germane,
            management = state.management,
            composite,
            "calculated cognitive load"
        );

        CognitiveLoadProfile {
            intrinsic: state.intrinsic,
            extraneous: state.extraneous,
            germane: state.germane,
            management: state.management,
            composite,
        }
    }

    /// Management steepens the intrinsic penalty curve around 0.5.
    fn composite(&self, state: &LoadState) -> f64 {
        let steepness =
            self.params.base_steepness + state.management * self.params.management_steepness;
        let intrinsic_impact = sigmoid((state.intrinsic - 0.5) * steepness);
        let w = &self.params.composite;
        let composite = w.germane * state.germane
            + w.extraneous * (1.0 - state.extraneous)
            + w.intrinsic * (1.0 - intrinsic_impact);
        composite.clamp(0.0, 1.0)
    }
}

#[derive(Debug, Clone, Copy)]
enum Axis {
    Intrinsic,
    Extraneous,
    Germane,
}

impl Axis {
    fn adjustment(self, value: f64) -> LoadAdjustment {
        match self {
            Self::Intrinsic => LoadAdjustment {
                intrinsic: Some(value),
                ..LoadAdjustment::NONE
            },
            Self::Extraneous => LoadAdjustment {
                extraneous: Some(value),
                ..LoadAdjustment::NONE
            },
            Self::Germane => LoadAdjustment {
                germane: Some(value),
                ..LoadAdjustment::NONE
            },
        }
    }
}

fn categorical(value: Option<&AnswerValue>, table: AdjustmentTable) -> Option<LoadAdjustment> {
    value
        .and_then(AnswerValue::dominant_label)
        .and_then(|label| tables::lookup_adjustment(table, label))
}

pub(crate) fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::config::PreprocessParams;
    use crate::profile::preprocess::ResponsePreprocessor;
    use crate::profile::types::{AnswerSet, RawAnswer};

    fn load_for(items: Vec<(&str, AnswerValue)>) -> CognitiveLoadProfile {
        let set: AnswerSet = items
            .into_iter()
            .enumerate()
            .map(|(i, (parameter, value))| (format!("q{i:02}"), RawAnswer::new(parameter, value)))
            .collect();
        let pre = PreprocessParams::default();
        let responses = ResponsePreprocessor::new(&pre).process(&set);
        let params = CognitiveLoadParams::default();
        CognitiveLoadCalculator::new(&params).calculate(&responses)
    }

    #[test]
    fn test_sigmoid() {
        assert!((sigmoid(0.0) - 0.5).abs() < 1e-10);
        assert!(sigmoid(100.0) > 0.99);
        assert!(sigmoid(-100.0) < 0.01);
    }

    fn assert_neutral(load: &CognitiveLoadProfile) {
        assert_eq!(load.intrinsic, 0.5);
        assert_eq!(load.extraneous, 0.5);
        assert_eq!(load.germane, 0.5);
        assert_eq!(load.management, 0.5);
        assert!((load.composite - 0.5).abs() < 1e-12);
    }

    #[test]
    fn defaults_without_answers() {
        assert_neutral(&load_for(vec![]));
    }

    #[test]
    fn management_strategy_overwrites() {
        let load = load_for(vec![("CognitiveLoad-Management", AnswerValue::from("Chunking"))]);
        assert_eq!(load.intrinsic, 0.4);
        assert_eq!(load.management, 0.8);
        assert_eq!(load.extraneous, 0.5);
        assert_eq!(load.germane, 0.5);
    }

    #[test]
    fn indirect_indicators_blend() {
        let load = load_for(vec![("DistractionSensitivity", AnswerValue::from("High"))]);
        // 0.5 * 0.7 + 0.8 * 0.3
        assert!((load.extraneous - 0.59).abs() < 1e-12);

        let load = load_for(vec![("PsychologicalSafety", AnswerValue::from(1.0))]);
        assert!((load.germane - 0.65).abs() < 1e-12);
        assert_eq!(load.extraneous, 0.5);
    }

    #[test]
    fn overwrite_then_blend() {
        let load = load_for(vec![
            ("CognitiveLoad-Management", AnswerValue::from("Overwhelmed")),
            ("DistractionSensitivity", AnswerValue::from("Low")),
        ]);
        // 0.75 * 0.7 + 0.3 * 0.3
        assert!((load.extraneous - 0.615).abs() < 1e-12);
        assert_eq!(load.management, 0.25);
    }

    #[test]
    fn direct_report_takes_max() {
        let load = load_for(vec![
            ("CognitiveLoad-Management", AnswerValue::from("Chunking")),
            ("CognitiveLoad", AnswerValue::from("Challenged")),
        ]);
        assert_eq!(load.intrinsic, 0.7);
        assert_eq!(load.germane, 0.7);

        let load = load_for(vec![
            ("CognitiveLoad-Management", AnswerValue::from("Connecting")),
            ("CognitiveLoad", AnswerValue::from("Comfortable")),
        ]);
        assert_eq!(load.germane, 0.85);
    }

    #[test]
    fn unknown_values_leave_defaults() {
        let load = load_for(vec![
            ("CognitiveLoad-Management", AnswerValue::from("Meditation")),
            ("CognitiveLoad", AnswerValue::from("Sleepy")),
        ]);
        assert_neutral(&load);
    }

    #[test]
    fn management_steepens_intrinsic_penalty() {
        let params = CognitiveLoadParams::default();
        let calc = CognitiveLoadCalculator::new(&params);
        let low = LoadState {
            intrinsic: 0.9,
            extraneous: 0.5,
            germane: 0.5,
            management: 0.0,
        };
        let high = LoadState {
            management: 1.0,
            ..low
        };
        assert!(calc.composite(&high) < calc.composite(&low));
    }
}
