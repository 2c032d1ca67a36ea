use common::setup_survey_data;
use surveyor::{
    analysis::{
        correlation::{Direction, Strength},
        run, AnalysisContext, CorrelationMethod,
    },
    error::SurveyorError,
    locale::Language,
    report::{render_json, render_text},
};
use tracing::info;

mod common;

#[test]
fn test_survey_pearson() {
    let (dataset, _guards) = setup_survey_data("survey_pearson");
    let report = run(&dataset, &AnalysisContext::default()).unwrap();
    info!("{:?}", report.correlation);

    assert_eq!(report.groups.x_vars().len(), 2);
    assert_eq!(report.groups.y_vars()[0], "3. I feel anxious without my phone");
    // X = [1.5, 2, 3, 4.5, 5, 3], Y = [1.5, 1.5, 3.5, 4, 5, 3.5]
    assert_eq!(report.correlation.observations, 6);
    assert!((report.correlation.coefficient - 0.948149).abs() < 1e-5);
    assert!(report.correlation.p_value < 0.05);

    let classification = report.classification.unwrap();
    assert_eq!(classification.direction, Direction::Positive);
    assert_eq!(classification.strength, Strength::Strong);
}

#[test]
fn test_survey_spearman() {
    let (dataset, _guards) = setup_survey_data("survey_spearman");
    let context = AnalysisContext::builder()
        .method(CorrelationMethod::Spearman)
        .build()
        .unwrap();
    let report = run(&dataset, &context).unwrap();
    assert!((report.correlation.coefficient - 0.985184).abs() < 1e-5);
    assert_eq!(report.correlation.method, CorrelationMethod::Spearman);
}

#[test]
fn test_missing_answer_is_averaged_over_present_items() {
    let (dataset, _guards) = setup_survey_data("missing_answer");
    let report = run(&dataset, &AnalysisContext::default()).unwrap();
    let composite_y = report.dataset.numeric_values("Composite_Y").unwrap();
    assert_eq!(composite_y[3], Some(4.0));

    let item = &report.y_frequencies[0];
    assert_eq!(item.position, 1);
    assert_eq!(item.display_name, "I feel anxious without my phone");
    assert_eq!(item.total, 5);
}

#[test]
fn test_input_is_not_modified() {
    let (dataset, _guards) = setup_survey_data("input_not_modified");
    let before = dataset.clone();
    let report = run(&dataset, &AnalysisContext::default()).unwrap();
    assert_eq!(dataset, before);
    assert_eq!(report.dataset.n_columns(), dataset.n_columns() + 2);
}

#[test]
fn test_runs_are_deterministic() {
    let (dataset, _guards) = setup_survey_data("deterministic");
    let context = AnalysisContext::default();
    let first = render_json(&run(&dataset, &context).unwrap()).unwrap();
    let second = render_json(&run(&dataset, &context).unwrap()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_language_only_changes_rendering() {
    let (dataset, _guards) = setup_survey_data("language_rendering");
    let english = run(&dataset, &AnalysisContext::default()).unwrap();
    let context = AnalysisContext::builder()
        .language(Language::Indonesian)
        .build()
        .unwrap();
    let indonesian = run(&dataset, &context).unwrap();

    assert_eq!(english.correlation, indonesian.correlation);
    assert_eq!(english.summaries, indonesian.summaries);

    let text = render_text(&indonesian);
    assert!(text.contains("Analisis Data Survei"));
    assert!(text.contains("hubungan positif dengan kekuatan kuat"));
    assert!(render_text(&english).contains("strong positive relationship"));
}

#[test]
fn test_existing_composite_column_is_reported() {
    let (dataset, _guards) = setup_survey_data("existing_composite_column");
    let exported = run(&dataset, &AnalysisContext::default()).unwrap().dataset;

    let result = run(&exported, &AnalysisContext::default());
    let Err(SurveyorError::DuplicateColumn(column)) = result else {
        panic!("expected a duplicate column error");
    };
    assert_eq!(column, "Composite_X");
    assert!(Language::Indonesian
        .composite_name_taken(&column)
        .contains("`composite-x`"));
}
