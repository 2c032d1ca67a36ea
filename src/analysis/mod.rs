pub mod composite;
pub mod correlation;
pub mod distribution;
pub mod frequency;
pub mod partition;
pub mod pipeline;
pub mod summary;

pub use correlation::{CorrelationMethod, CorrelationResult};
pub use pipeline::{run, AnalysisContext, AnalysisReport};
