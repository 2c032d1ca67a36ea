use std::{
    fs::File,
    io::{BufReader, Write as _},
    path::Path,
};

use serde::{Deserialize, Serialize};
use serde_yaml::from_reader;
use tracing::{debug, info, instrument};

use crate::{
    analysis::{
        composite::{DEFAULT_COMPOSITE_X, DEFAULT_COMPOSITE_Y},
        pipeline::DEFAULT_HISTOGRAM_BINS,
        AnalysisContext, CorrelationMethod,
    },
    error::SurveyorError,
    locale::Language,
};

fn default_histogram_bins() -> usize {
    DEFAULT_HISTOGRAM_BINS
}

fn default_composite_x() -> String {
    DEFAULT_COMPOSITE_X.to_string()
}

fn default_composite_y() -> String {
    DEFAULT_COMPOSITE_Y.to_string()
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SurveyorConfig {
    pub language: Language,
    pub method: CorrelationMethod,
    #[serde(rename = "histogram-bins", default = "default_histogram_bins")]
    pub histogram_bins: usize,
    #[serde(rename = "composite-x", default = "default_composite_x")]
    pub composite_x: String,
    #[serde(rename = "composite-y", default = "default_composite_y")]
    pub composite_y: String,
    #[serde(rename = "log-dir", default)]
    pub log_dir: Option<String>,
}

const DEFAULT_DATA: &str = r#"
language: "EN"
method: "Pearson"
histogram-bins: 10
composite-x: "Composite_X"
composite-y: "Composite_Y"
"#;

impl Default for SurveyorConfig {
    fn default() -> Self {
        Self {
            language: Language::English,
            method: CorrelationMethod::Pearson,
            histogram_bins: DEFAULT_HISTOGRAM_BINS,
            composite_x: default_composite_x(),
            composite_y: default_composite_y(),
            log_dir: None,
        }
    }
}

impl SurveyorConfig {
    /// Reads the configuration from a YAML file.
    ///
    /// If the file does not exist, it creates a default configuration file.
    ///
    /// # Arguments
    ///
    /// * `filename` - Optional path to the configuration file, `config.yml` when `None`.
    ///
    /// # Returns
    ///
    /// The parsed `SurveyorConfig`, or an error if the file cannot be read or parsed.
    #[instrument(level = "info", skip(filename))]
    pub fn read_config<P: AsRef<Path>>(filename: Option<P>) -> Result<Self, SurveyorError> {
        let path = filename
            .map(|p| p.as_ref().to_path_buf())
            .unwrap_or_else(|| Path::new("config.yml").to_path_buf());

        info!(path = %path.display(), "Reading configuration");

        if !path.exists() {
            info!(
                "Config file does not exist. Creating default config at {}",
                path.display()
            );
            let mut file = File::create(&path)?;
            file.write_all(DEFAULT_DATA.as_bytes())?;
            debug!("Default configuration file created");
            return Ok(SurveyorConfig::default());
        }

        let file = File::open(&path)?;
        let reader = BufReader::new(file);
        let config: Self = from_reader(reader)?;
        info!(
            language = %config.language,
            method = %config.method,
            "Configuration loaded successfully"
        );
        Ok(config)
    }

    /// Builds the analysis context for one run.
    ///
    /// # Errors
    ///
    /// `InvalidBinCount` when `histogram-bins` is zero.
    pub fn to_context(&self) -> Result<AnalysisContext, SurveyorError> {
        if self.histogram_bins == 0 {
            return Err(SurveyorError::InvalidBinCount);
        }
        let context = AnalysisContext::builder()
            .language(self.language)
            .method(self.method)
            .histogram_bins(self.histogram_bins)
            .composite_x(self.composite_x.as_str())
            .composite_y(self.composite_y.as_str())
            .build()?;
        Ok(context)
    }
}
