pub mod cognitive_load;
pub mod dimensions;
pub mod velocity;

pub use cognitive_load::CognitiveLoadCalculator;
pub use dimensions::{DimensionCalculator, DimensionError};
pub use velocity::{select_pattern, VelocityPredictor};
