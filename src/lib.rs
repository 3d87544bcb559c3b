//! # learner-profile
//!
//! Turns the raw answers of one assessment submission into a learner profile:
//!
//! - **Learning styles** - VARK distribution with multimodal blending
//! - **Learning approaches** - Honey-Mumford ranking
//! - **Cognitive load** - intrinsic / extraneous / germane / management and a composite
//! - **Learning velocity** - pacing pattern, time multiplier, confidence, retention, phases
//!
//! ```rust
//! use learner_profile::{infer_profile, AnswerSet, RawAnswer};
//!
//! let mut answers = AnswerSet::new();
//! answers.insert("q1".to_string(), RawAnswer::new("LearningStyle-Technical", "Visual"));
//!
//! let profile = infer_profile(&answers);
//! assert_eq!(profile.learning_styles.primary, "Visual");
//! ```

pub mod config;
pub mod logging;
pub mod profile;

pub use profile::{
    infer_profile, AnswerSet, AnswerValue, CognitiveLoadProfile, DimensionError, DimensionMap,
    DimensionValue, LearnerProfile, ProfileConfig, ProfileEngine, ProfileError, RawAnswer,
    StyleDistribution, VelocityPattern, VelocityPrediction,
};
