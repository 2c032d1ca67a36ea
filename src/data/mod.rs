pub mod column;
pub mod dataset;
pub mod loader;

pub use column::{Column, ColumnData};
pub use dataset::Dataset;
