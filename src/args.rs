use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use getset::Getters;

use crate::{analysis::CorrelationMethod, locale::Language};

fn parse_language(s: &str) -> Result<Language, String> {
    s.parse().map_err(|e: crate::error::SurveyorError| e.to_string())
}

fn parse_method(s: &str) -> Result<CorrelationMethod, String> {
    s.parse().map_err(|e: crate::error::SurveyorError| e.to_string())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Descriptive statistics and X/Y association analysis for survey data.
#[derive(Parser, Debug, Getters)]
#[command(version, about)]
pub struct Args {
    /// CSV or spreadsheet file with one row per respondent
    #[getset(get = "pub")]
    input: PathBuf,
    /// Path to the YAML configuration file
    #[clap(short, long)]
    #[getset(get = "pub")]
    config: Option<PathBuf>,
    /// Report language (EN or ID), overrides the config file
    #[clap(short, long, env = "SURVEYOR_LANGUAGE", value_parser = parse_language)]
    #[getset(get = "pub")]
    language: Option<Language>,
    /// Correlation method (Pearson or Spearman), overrides the config file
    #[clap(short, long, value_parser = parse_method)]
    #[getset(get = "pub")]
    method: Option<CorrelationMethod>,
    #[clap(short, long, value_enum, default_value_t = OutputFormat::Text)]
    #[getset(get = "pub")]
    format: OutputFormat,
    /// Directory for the debug log file
    #[clap(long)]
    #[getset(get = "pub")]
    log_dir: Option<String>,
}
