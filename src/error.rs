use crate::analysis::correlation::CorrelationMethod;

#[derive(Debug, thiserror::Error)]
pub enum SurveyorError {
    #[error("At least 2 numeric columns are required, found {found}.")]
    InsufficientNumericColumns { found: usize },
    #[error("The {method} correlation is undefined for this data ({observations} paired observations or zero variance).")]
    UndefinedCorrelation {
        method: CorrelationMethod,
        observations: usize,
    },
    #[error("Column `{0}` already exists in the dataset.")]
    DuplicateColumn(String),
    #[error("Column `{0}` was not found in the dataset.")]
    ColumnNotFound(String),
    #[error("Column `{0}` is not numeric.")]
    NonNumericColumn(String),
    #[error("Column `{name}` has {got} rows but the dataset has {expected}.")]
    RowCountMismatch {
        name: String,
        expected: usize,
        got: usize,
    },
    #[error("The input `{0}` contains no header row.")]
    EmptyInput(String),
    #[error("Unsupported file format: `{0}` (expected .csv, .xlsx, .xls or .ods)")]
    UnsupportedFormat(String),
    #[error("Failed to parse language: {0}")]
    ParseLanguage(String),
    #[error("Failed to parse correlation method: {0}")]
    ParseMethod(String),
    #[error("Histogram bin count must be positive.")]
    InvalidBinCount,
    #[error("IO Error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("CSV Error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("Serde YAML Error: {0}")]
    SerdeYamlError(#[from] serde_yaml::Error),
    #[error("Serde JSON Error: {0}")]
    SerdeJsonError(#[from] serde_json::Error),
    #[error("Distribution Error: {0}")]
    DistributionError(#[from] statrs::StatsError),
    #[error("Analysis context Error: {0}")]
    ContextError(#[from] crate::analysis::pipeline::AnalysisContextBuilderError),
    #[cfg(feature = "excel")]
    #[error("Excel Error: {0}")]
    ExcelError(#[from] calamine::Error),
}
