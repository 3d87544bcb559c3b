//! Immutable lookup tables shared by every pipeline stage.
//!
//! All tables are `const` slices; lookups are case-insensitive on trimmed keys.

pub type ScoreTable = &'static [(&'static str, f64)];

/// Parameter names as they arrive on answers.
pub mod param {
    pub const LEARNING_STYLE_PREFIX: &str = "LearningStyle";
    pub const LEARNING_VELOCITY_PREFIX: &str = "LearningVelocity";
    pub const HONEY_MUMFORD_PREFIX: &str = "HoneyMumford";
    pub const COGNITIVE_PREFIX: &str = "Cognitive";

    pub const COGNITIVE_LOAD: &str = "CognitiveLoad";
    pub const COGNITIVE_LOAD_MANAGEMENT: &str = "CognitiveLoad-Management";
    pub const ADAPTABILITY: &str = "Adaptability";
    pub const MEDIA_PREFERENCE: &str = "MediaPreference";
    pub const FEEDBACK_UTILIZATION: &str = "FeedbackUtilization";
    pub const SKILL_COMPLEXITY: &str = "SkillAcquisition-Complexity";
    pub const DISTRACTION_SENSITIVITY: &str = "DistractionSensitivity";
    pub const MOTIVATION_DRIVERS: &str = "Motivation-Drivers";
    pub const PRIOR_KNOWLEDGE: &str = "PriorKnowledgeIntegration";
    pub const PSYCHOLOGICAL_SAFETY: &str = "PsychologicalSafety";
    pub const OPTIMAL_TIMING: &str = "OptimalTiming";
    pub const SESSION_DURATION: &str = "SessionDuration";
    pub const LEARNING_ENVIRONMENT: &str = "LearningEnvironment";
    pub const CONTENT_SEQUENCING: &str = "ContentSequencing";

    pub const VELOCITY_PATTERN: &str = "LearningVelocity-Pattern";
    pub const VELOCITY_ACQUISITION: &str = "LearningVelocity-Acquisition";
    pub const VELOCITY_RETENTION: &str = "LearningVelocity-Retention";
    pub const VELOCITY_APPLICATION: &str = "LearningVelocity-Application";
    pub const VELOCITY_TRANSFER: &str = "LearningVelocity-Transfer";
    pub const VELOCITY_TIMEFRAME: &str = "LearningVelocity-Timeframe";
    pub const VELOCITY_MEASUREMENT: &str = "LearningVelocity-Measurement";
}

/// Dimension names produced by the calculator beyond the per-parameter ones.
pub mod dim {
    pub const MOTIVATIONAL_SYSTEM: &str = "MotivationalSystem";
    pub const KNOWLEDGE_ASSIMILATION: &str = "KnowledgeAssimilation";
    pub const LEARNING_STYLE_DISTRIBUTION: &str = "LearningStyleDistribution";
    pub const MULTIMODAL_INTEGRATION: &str = "MultimodalIntegration";
    pub const LEARNING_APPROACHES: &str = "LearningApproaches";
    pub const FEEDBACK_RECEPTIVITY: &str = "FeedbackReceptivity";
    pub const CONSISTENCY_SCORES: &str = "consistency_scores";
    pub const AVG_RESPONSE_TIME: &str = "avg_response_time";
}

pub const PARAMETER_BASE_WEIGHTS: ScoreTable = &[
    ("LearningStyle-Technical", 0.90),
    ("LearningStyle-Conceptual", 0.85),
    ("LearningStyle-Practical", 0.85),
    ("HoneyMumford-Approach", 0.85),
    ("HoneyMumford-ProblemSolving", 0.80),
    ("CognitiveLoad", 0.80),
    ("CognitiveLoad-Management", 0.85),
    ("Cognitive-Processing", 0.75),
    ("Cognitive-Focus", 0.70),
    ("LearningVelocity-Pattern", 0.90),
    ("LearningVelocity-Acquisition", 0.85),
    ("LearningVelocity-Retention", 0.85),
    ("LearningVelocity-Application", 0.80),
    ("LearningVelocity-Transfer", 0.75),
    ("LearningVelocity-Timeframe", 0.75),
    ("LearningVelocity-Measurement", 0.60),
    ("Adaptability", 0.80),
    ("MediaPreference", 0.70),
    ("FeedbackUtilization", 0.75),
    ("SkillAcquisition-Complexity", 0.80),
    ("DistractionSensitivity", 0.70),
    ("Motivation-Drivers", 0.75),
    ("PriorKnowledgeIntegration", 0.80),
    ("PsychologicalSafety", 0.65),
    ("OptimalTiming", 0.60),
    ("SessionDuration", 0.60),
    ("LearningEnvironment", 0.60),
    ("ContentSequencing", 0.65),
];

pub const VARK_STYLES: [&str; 4] = ["Visual", "Auditory", "Kinesthetic", "ReadWrite"];

/// Whole-value aliases; matched before any hyphen splitting.
pub const VARK_ALIASES: &[(&str, &str)] = &[
    ("Visual", "Visual"),
    ("Auditory", "Auditory"),
    ("Aural", "Auditory"),
    ("Kinesthetic", "Kinesthetic"),
    ("Kinaesthetic", "Kinesthetic"),
    ("Hands-on", "Kinesthetic"),
    ("ReadWrite", "ReadWrite"),
    ("Read/Write", "ReadWrite"),
    ("Read-Write", "ReadWrite"),
    ("Reading", "ReadWrite"),
];

/// Typical content delivery mix used for style matching.
pub const CONTENT_DELIVERY: ScoreTable = &[
    ("Visual", 0.40),
    ("Auditory", 0.15),
    ("Kinesthetic", 0.20),
    ("ReadWrite", 0.25),
];

pub const HONEY_MUMFORD_APPROACHES: ScoreTable = &[
    ("Activist", 0.8),
    ("Reflector", 0.6),
    ("Theorist", 0.7),
    ("Pragmatist", 0.75),
];

pub const COGNITIVE_STYLES: ScoreTable = &[
    ("Analytical", 0.85),
    ("Systematic", 0.8),
    ("Holistic", 0.75),
    ("Intuitive", 0.7),
];
pub const COGNITIVE_DEFAULT: f64 = 0.7;

pub const KNOWLEDGE_ASSIMILATION: ScoreTable = &[
    ("Connective", 0.9),
    ("Restructuring", 0.8),
    ("Compartmentalized", 0.5),
    ("Evaluative", 0.7),
];

/// A categorical mapping with its fallback score.
#[derive(Debug, Clone, Copy)]
pub struct NamedTable {
    pub parameter: &'static str,
    pub entries: ScoreTable,
    pub default: f64,
}

impl NamedTable {
    pub fn score(&self, label: &str) -> f64 {
        lookup(self.entries, label).unwrap_or(self.default)
    }
}

pub const NAMED_TABLES: &[NamedTable] = &[
    NamedTable {
        parameter: param::ADAPTABILITY,
        entries: &[("High", 0.9), ("Moderate", 0.7), ("Variable", 0.6), ("Low", 0.4)],
        default: 0.6,
    },
    NamedTable {
        parameter: param::MEDIA_PREFERENCE,
        entries: &[("Interactive", 0.9), ("Video", 0.8), ("Audio", 0.7), ("Text", 0.6)],
        default: 0.6,
    },
    NamedTable {
        parameter: param::FEEDBACK_UTILIZATION,
        entries: &[
            ("Immediate", 0.9),
            ("Reflective", 0.75),
            ("Selective", 0.6),
            ("Minimal", 0.4),
        ],
        default: 0.6,
    },
    NamedTable {
        parameter: param::SKILL_COMPLEXITY,
        entries: &[
            ("Complex", 0.9),
            ("Moderate", 0.7),
            ("Incremental", 0.6),
            ("Simple", 0.5),
        ],
        default: 0.6,
    },
    NamedTable {
        parameter: param::DISTRACTION_SENSITIVITY,
        entries: &[("High", 0.8), ("Moderate", 0.6), ("Variable", 0.5), ("Low", 0.3)],
        default: 0.5,
    },
    NamedTable {
        parameter: param::MOTIVATION_DRIVERS,
        entries: &[
            ("Intrinsic", 0.9),
            ("Achievement", 0.8),
            ("Social", 0.7),
            ("Extrinsic", 0.6),
        ],
        default: 0.7,
    },
];

/// Maps one parameter's answer onto one dimension.
#[derive(Debug, Clone, Copy)]
pub struct Contribution {
    pub parameter: &'static str,
    pub dimension: &'static str,
    pub entries: ScoreTable,
}

pub const DIMENSION_CONTRIBUTORS: &[Contribution] = &[
    Contribution {
        parameter: param::PSYCHOLOGICAL_SAFETY,
        dimension: param::PSYCHOLOGICAL_SAFETY,
        entries: &[("High", 0.9), ("Moderate", 0.7), ("Variable", 0.6), ("Low", 0.4)],
    },
    Contribution {
        parameter: param::PSYCHOLOGICAL_SAFETY,
        dimension: dim::FEEDBACK_RECEPTIVITY,
        entries: &[("High", 0.85), ("Moderate", 0.7), ("Variable", 0.6), ("Low", 0.45)],
    },
    Contribution {
        parameter: param::OPTIMAL_TIMING,
        dimension: param::OPTIMAL_TIMING,
        entries: &[
            ("Morning", 0.8),
            ("Evening", 0.7),
            ("Afternoon", 0.6),
            ("Flexible", 0.5),
        ],
    },
    Contribution {
        parameter: param::SESSION_DURATION,
        dimension: param::SESSION_DURATION,
        entries: &[("Long", 0.8), ("Medium", 0.6), ("Variable", 0.5), ("Short", 0.4)],
    },
    Contribution {
        parameter: param::LEARNING_ENVIRONMENT,
        dimension: param::LEARNING_ENVIRONMENT,
        entries: &[
            ("Quiet", 0.8),
            ("Collaborative", 0.7),
            ("Dynamic", 0.6),
            ("Flexible", 0.5),
        ],
    },
    Contribution {
        parameter: param::CONTENT_SEQUENCING,
        dimension: param::CONTENT_SEQUENCING,
        entries: &[
            ("Linear", 0.8),
            ("Spiral", 0.75),
            ("Modular", 0.7),
            ("Exploratory", 0.6),
        ],
    },
    Contribution {
        parameter: param::PRIOR_KNOWLEDGE,
        dimension: param::PRIOR_KNOWLEDGE,
        entries: &[
            ("Connective", 0.9),
            ("Restructuring", 0.8),
            ("Evaluative", 0.7),
            ("Compartmentalized", 0.5),
        ],
    },
];

/// Partial update of the four cognitive-load axes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoadAdjustment {
    pub intrinsic: Option<f64>,
    pub extraneous: Option<f64>,
    pub germane: Option<f64>,
    pub management: Option<f64>,
}

impl LoadAdjustment {
    pub const NONE: LoadAdjustment = LoadAdjustment {
        intrinsic: None,
        extraneous: None,
        germane: None,
        management: None,
    };
}

pub type AdjustmentTable = &'static [(&'static str, LoadAdjustment)];

/// Self-reported load-management strategy; overwrites the named axes.
pub const LOAD_MANAGEMENT_STRATEGIES: AdjustmentTable = &[
    (
        "Chunking",
        LoadAdjustment {
            intrinsic: Some(0.4),
            management: Some(0.8),
            ..LoadAdjustment::NONE
        },
    ),
    (
        "Prioritizing",
        LoadAdjustment {
            extraneous: Some(0.3),
            management: Some(0.75),
            ..LoadAdjustment::NONE
        },
    ),
    (
        "Connecting",
        LoadAdjustment {
            germane: Some(0.85),
            ..LoadAdjustment::NONE
        },
    ),
    (
        "Overwhelmed",
        LoadAdjustment {
            extraneous: Some(0.75),
            management: Some(0.25),
            ..LoadAdjustment::NONE
        },
    ),
];

pub const DISTRACTION_INDICATORS: AdjustmentTable = &[
    (
        "High",
        LoadAdjustment {
            extraneous: Some(0.8),
            ..LoadAdjustment::NONE
        },
    ),
    (
        "Moderate",
        LoadAdjustment {
            extraneous: Some(0.55),
            ..LoadAdjustment::NONE
        },
    ),
    (
        "Variable",
        LoadAdjustment {
            extraneous: Some(0.5),
            ..LoadAdjustment::NONE
        },
    ),
    (
        "Low",
        LoadAdjustment {
            extraneous: Some(0.3),
            ..LoadAdjustment::NONE
        },
    ),
];

pub const COMPLEXITY_INDICATORS: AdjustmentTable = &[
    (
        "Complex",
        LoadAdjustment {
            intrinsic: Some(0.75),
            germane: Some(0.7),
            ..LoadAdjustment::NONE
        },
    ),
    (
        "Moderate",
        LoadAdjustment {
            intrinsic: Some(0.55),
            ..LoadAdjustment::NONE
        },
    ),
    (
        "Incremental",
        LoadAdjustment {
            intrinsic: Some(0.45),
            germane: Some(0.65),
            ..LoadAdjustment::NONE
        },
    ),
    (
        "Simple",
        LoadAdjustment {
            intrinsic: Some(0.35),
            ..LoadAdjustment::NONE
        },
    ),
];

pub const SAFETY_INDICATORS: AdjustmentTable = &[
    (
        "High",
        LoadAdjustment {
            germane: Some(0.8),
            extraneous: Some(0.3),
            ..LoadAdjustment::NONE
        },
    ),
    (
        "Moderate",
        LoadAdjustment {
            germane: Some(0.65),
            ..LoadAdjustment::NONE
        },
    ),
    (
        "Variable",
        LoadAdjustment {
            germane: Some(0.55),
            ..LoadAdjustment::NONE
        },
    ),
    (
        "Low",
        LoadAdjustment {
            germane: Some(0.4),
            extraneous: Some(0.7),
            ..LoadAdjustment::NONE
        },
    ),
];

/// Direct load self-report; applied as a floor (max) on intrinsic/germane.
pub const DIRECT_LOAD_REPORTS: AdjustmentTable = &[
    (
        "Overwhelmed",
        LoadAdjustment {
            intrinsic: Some(0.85),
            ..LoadAdjustment::NONE
        },
    ),
    (
        "Challenged",
        LoadAdjustment {
            intrinsic: Some(0.7),
            germane: Some(0.7),
            ..LoadAdjustment::NONE
        },
    ),
    (
        "Comfortable",
        LoadAdjustment {
            germane: Some(0.6),
            ..LoadAdjustment::NONE
        },
    ),
    (
        "Underutilized",
        LoadAdjustment {
            germane: Some(0.55),
            ..LoadAdjustment::NONE
        },
    ),
];

pub const VELOCITY_ACQUISITION: NamedTable = NamedTable {
    parameter: param::VELOCITY_ACQUISITION,
    entries: &[("Rapid", 0.9), ("Moderate", 0.7), ("Variable", 0.6), ("Gradual", 0.5)],
    default: 0.6,
};

pub const VELOCITY_RETENTION: NamedTable = NamedTable {
    parameter: param::VELOCITY_RETENTION,
    entries: &[("Strong", 0.9), ("Moderate", 0.7), ("Fading", 0.5), ("Weak", 0.35)],
    default: 0.65,
};

pub const VELOCITY_APPLICATION: NamedTable = NamedTable {
    parameter: param::VELOCITY_APPLICATION,
    entries: &[
        ("Immediate", 0.9),
        ("Practiced", 0.75),
        ("Guided", 0.6),
        ("Delayed", 0.45),
    ],
    default: 0.65,
};

pub const VELOCITY_TRANSFER: NamedTable = NamedTable {
    parameter: param::VELOCITY_TRANSFER,
    entries: &[("Broad", 0.9), ("Related", 0.75), ("Narrow", 0.55), ("Limited", 0.4)],
    default: 0.6,
};

pub const TIMEFRAME_PRECISION: NamedTable = NamedTable {
    parameter: param::VELOCITY_TIMEFRAME,
    entries: &[
        ("Precise", 0.9),
        ("Approximate", 0.7),
        ("Flexible", 0.55),
        ("Uncertain", 0.4),
    ],
    default: 0.6,
};

pub const DEFAULT_TIMEFRAME_LABEL: &str = "Approximate";
pub const DEFAULT_MEASUREMENT_PREFERENCE: &str = "Milestones";

/// Velocity factor weights; they sum to 1.0.
#[derive(Debug, Clone, Copy)]
pub struct VelocityWeights {
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
}

impl VelocityWeights {
    pub fn total(&self) -> f64 {
        self.adaptability
            + self.cognitive
            + self.complexity
            + self.motivation
            + self.media_match
            + self.prior_knowledge
            + self.style_match
            + self.acquisition
            + self.retention
            + self.application
            + self.transfer
    }
}

pub const VELOCITY_WEIGHTS: VelocityWeights = VelocityWeights {
    adaptability: 0.12,
    cognitive: 0.12,
    complexity: 0.10,
    motivation: 0.10,
    media_match: 0.06,
    prior_knowledge: 0.10,
    style_match: 0.08,
    acquisition: 0.10,
    retention: 0.08,
    application: 0.08,
    transfer: 0.06,
};

pub fn lookup(table: ScoreTable, key: &str) -> Option<f64> {
    let key = key.trim();
    table
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(key))
        .map(|(_, score)| *score)
}

pub fn lookup_adjustment(table: AdjustmentTable, key: &str) -> Option<LoadAdjustment> {
    let key = key.trim();
    table
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(key))
        .map(|(_, adjustment)| *adjustment)
}

pub fn base_weight(parameter: &str) -> Option<f64> {
    lookup(PARAMETER_BASE_WEIGHTS, parameter)
}

pub fn named_table(parameter: &str) -> Option<&'static NamedTable> {
    NAMED_TABLES
        .iter()
        .find(|table| table.parameter.eq_ignore_ascii_case(parameter))
}

pub fn contributions(parameter: &str) -> impl Iterator<Item = &'static Contribution> + '_ {
    DIMENSION_CONTRIBUTORS
        .iter()
        .filter(move |c| c.parameter.eq_ignore_ascii_case(parameter))
}

/// Canonical VARK name for a whole style value; unknown values pass through trimmed.
pub fn canonical_style(value: &str) -> String {
    let value = value.trim();
    VARK_ALIASES
        .iter()
        .find(|(alias, _)| alias.eq_ignore_ascii_case(value))
        .map(|(_, canonical)| canonical.to_string())
        .unwrap_or_else(|| value.to_string())
}

/// Canonical Honey-Mumford approach name for a value, if it names one.
pub fn honey_mumford_approach(value: &str) -> Option<(&'static str, f64)> {
    let value = value.trim();
    HONEY_MUMFORD_APPROACHES
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(value))
        .map(|(name, score)| (*name, *score))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn velocity_weights_sum_to_one() {
        assert!((VELOCITY_WEIGHTS.total() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn content_delivery_sums_to_one() {
        let total: f64 = CONTENT_DELIVERY.iter().map(|(_, w)| w).sum();
        assert!((total - 1.0).abs() < 1e-9);
    }

    #[test]
    fn named_tables_have_four_entries() {
        assert_eq!(NAMED_TABLES.len(), 6);
        for table in NAMED_TABLES {
            assert_eq!(table.entries.len(), 4, "{}", table.parameter);
            assert!(table.default >= 0.0 && table.default <= 1.0);
        }
    }

    #[test]
    fn lookup_is_case_insensitive() {
        assert_eq!(lookup(HONEY_MUMFORD_APPROACHES, "activist"), Some(0.8));
        assert_eq!(lookup(HONEY_MUMFORD_APPROACHES, " Theorist "), Some(0.7));
        assert_eq!(lookup(HONEY_MUMFORD_APPROACHES, "Dreamer"), None);
        assert_eq!(base_weight("LearningStyle-Technical"), Some(0.9));
        assert_eq!(base_weight("Unlisted"), None);
    }

    #[test]
    fn canonical_style_keeps_compounds_whole() {
        assert_eq!(canonical_style("visual"), "Visual");
        assert_eq!(canonical_style("Read-Write"), "ReadWrite");
        assert_eq!(canonical_style("Hands-on"), "Kinesthetic");
        assert_eq!(canonical_style("Visual-Kinesthetic"), "Visual-Kinesthetic");
        assert_eq!(canonical_style("Olfactory"), "Olfactory");
    }

    #[test]
    fn contributions_cover_multiple_dimensions() {
        let dims: Vec<&str> = contributions(param::PSYCHOLOGICAL_SAFETY)
            .map(|c| c.dimension)
            .collect();
        assert_eq!(dims, vec![param::PSYCHOLOGICAL_SAFETY, dim::FEEDBACK_RECEPTIVITY]);
        assert_eq!(contributions("Adaptability").count(), 0);
    }
}
