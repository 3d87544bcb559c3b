pub mod assembler;
pub mod config;
pub mod engine;
pub mod modeling;
pub mod preprocess;
pub mod style;
pub mod tables;
pub mod types;

pub use assembler::ProfileAssembler;
pub use config::ProfileConfig;
pub use engine::{infer_profile, ProfileEngine, ProfileError};
pub use modeling::{CognitiveLoadCalculator, DimensionCalculator, DimensionError, VelocityPredictor};
pub use preprocess::{PreprocessedResponses, ResponsePreprocessor};
pub use style::StyleDistribution;
pub use types::*;
