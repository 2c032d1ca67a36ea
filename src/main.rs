use std::error::Error;

use clap::Parser;
use surveyor::{
    analysis,
    args::{Args, OutputFormat},
    config::SurveyorConfig,
    data::loader,
    error::SurveyorError,
    locale::TextKey,
    logging::setup_tracing,
    report::{render_json, render_text},
};
use tracing::{error, warn};

pub fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    let mut config = SurveyorConfig::read_config(args.config().as_ref())?;
    if let Some(language) = args.language() {
        config.language = *language;
    }
    if let Some(method) = args.method() {
        config.method = *method;
    }
    let log_dir = args.log_dir().clone().or_else(|| config.log_dir.clone());
    let _guard = setup_tracing(log_dir.as_deref())?;

    let context = config.to_context()?;
    let dataset = loader::load(args.input()).inspect_err(|e| error!("Failed to load data: {}", e))?;

    let report = match analysis::run(&dataset, &context) {
        Ok(report) => report,
        Err(SurveyorError::InsufficientNumericColumns { found }) => {
            warn!(found, "Nothing to analyse");
            println!("{}", context.language.text(TextKey::NoNumeric));
            return Ok(());
        }
        Err(SurveyorError::DuplicateColumn(column)) => {
            warn!(%column, "Composite score name already used by an input column");
            println!("{}", context.language.composite_name_taken(&column));
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    match args.format() {
        OutputFormat::Text => print!("{}", render_text(&report)),
        OutputFormat::Json => println!("{}", render_json(&report)?),
    }
    Ok(())
}
