use std::fmt::{self, Write as _};

use serde::Serialize;

use crate::{
    analysis::{
        frequency::FrequencyTable,
        pipeline::{AnalysisReport, ItemDistribution},
    },
    data::ColumnData,
    error::SurveyorError,
    locale::{Language, TextKey},
};

const PREVIEW_ROWS: usize = 5;
const HISTOGRAM_WIDTH: usize = 30;

/// Formats a statistic, showing non-finite values as `-`.
fn number(value: f64, decimals: usize) -> String {
    if value.is_finite() {
        format!("{:.*}", decimals, value)
    } else {
        "-".to_string()
    }
}

/// Survey answers are usually whole numbers, so drop the fraction when there is none.
fn answer(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

/// Left-aligned plain-text table.
fn table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let line = |cells: Vec<&str>| -> String {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut out = String::new();
    out.push_str(&line(headers.to_vec()));
    out.push('\n');
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    out.push_str(&line(rule.iter().map(String::as_str).collect()));
    out.push('\n');
    for row in rows {
        out.push_str(&line(row.iter().map(String::as_str).collect()));
        out.push('\n');
    }
    out
}

fn heading(f: &mut fmt::Formatter<'_>, title: &str) -> fmt::Result {
    writeln!(f)?;
    writeln!(f, "{}", title)?;
    writeln!(f, "{}", "=".repeat(title.chars().count()))
}

impl AnalysisReport {
    fn write_preview(&self, f: &mut fmt::Formatter<'_>, lang: Language) -> fmt::Result {
        heading(f, lang.text(TextKey::Preview))?;
        let columns = self.dataset.columns();
        let headers: Vec<&str> = columns.iter().map(|c| c.name().as_str()).collect();
        let rows: Vec<Vec<String>> = (0..self.dataset.n_rows().min(PREVIEW_ROWS))
            .map(|row| {
                columns
                    .iter()
                    .map(|column| match column.data() {
                        ColumnData::Numeric(values) => {
                            values[row].map(answer).unwrap_or_default()
                        }
                        ColumnData::Text(values) => values[row].clone().unwrap_or_default(),
                    })
                    .collect()
            })
            .collect();
        write!(f, "{}", table(&headers, &rows))?;
        let (n_rows, n_columns) = self.dataset.shape();
        writeln!(f, "{}: {} x {}", lang.text(TextKey::DatasetSize), n_rows, n_columns)
    }

    fn write_summaries(&self, f: &mut fmt::Formatter<'_>, lang: Language) -> fmt::Result {
        heading(f, lang.text(TextKey::DescriptiveStats))?;
        let headers = [
            lang.text(TextKey::Column),
            lang.text(TextKey::Mean),
            lang.text(TextKey::Median),
            lang.text(TextKey::Std),
            lang.text(TextKey::Min),
            lang.text(TextKey::Max),
        ];
        let rows: Vec<Vec<String>> = self
            .summaries
            .iter()
            .map(|s| {
                vec![
                    s.name.clone(),
                    number(s.mean, 4),
                    number(s.median, 4),
                    number(s.std, 4),
                    number(s.min, 4),
                    number(s.max, 4),
                ]
            })
            .collect();
        write!(f, "{}", table(&headers, &rows))?;

        writeln!(f)?;
        writeln!(f, "{}", lang.text(TextKey::Composite))?;
        let headers = [
            lang.text(TextKey::Column),
            lang.text(TextKey::Count),
            lang.text(TextKey::Mean),
            lang.text(TextKey::Std),
            lang.text(TextKey::Min),
            "25%",
            lang.text(TextKey::Median),
            "75%",
            lang.text(TextKey::Max),
        ];
        let rows: Vec<Vec<String>> = self
            .composite_profiles
            .iter()
            .map(|p| {
                vec![
                    p.name.clone(),
                    p.count.to_string(),
                    number(p.mean, 4),
                    number(p.std, 4),
                    number(p.min, 4),
                    number(p.q1, 4),
                    number(p.median, 4),
                    number(p.q3, 4),
                    number(p.max, 4),
                ]
            })
            .collect();
        write!(f, "{}", table(&headers, &rows))
    }

    fn write_frequencies(
        f: &mut fmt::Formatter<'_>,
        lang: Language,
        group: TextKey,
        tables: &[FrequencyTable],
    ) -> fmt::Result {
        writeln!(f)?;
        writeln!(f, "{}", lang.text(group))?;
        for frequency in tables {
            writeln!(f)?;
            writeln!(f, "{}. {}", frequency.position, frequency.display_name)?;
            let headers = [
                lang.text(TextKey::Value),
                lang.text(TextKey::Frequency),
                lang.text(TextKey::Percentage),
            ];
            let rows: Vec<Vec<String>> = frequency
                .rows
                .iter()
                .map(|r| vec![answer(r.value), r.frequency.to_string(), number(r.percentage, 2)])
                .collect();
            write!(f, "{}", table(&headers, &rows))?;
        }
        Ok(())
    }

    fn write_distributions(
        f: &mut fmt::Formatter<'_>,
        lang: Language,
        group: TextKey,
        items: &[ItemDistribution],
    ) -> fmt::Result {
        writeln!(f)?;
        writeln!(f, "{}", lang.text(group))?;
        for item in items {
            writeln!(f)?;
            writeln!(f, "{}. {}", item.position, item.display_name)?;
            writeln!(f, "{}", lang.text(TextKey::Histogram))?;
            let peak = item.histogram.bins.iter().map(|b| b.count).max().unwrap_or(0);
            for bin in &item.histogram.bins {
                let bar = if peak == 0 {
                    0
                } else {
                    bin.count * HISTOGRAM_WIDTH / peak
                };
                writeln!(
                    f,
                    "  [{:>8}, {:>8}] {:<width$} {}",
                    number(bin.lower, 2),
                    number(bin.upper, 2),
                    "#".repeat(bar),
                    bin.count,
                    width = HISTOGRAM_WIDTH
                )?;
            }
            writeln!(f, "{}", lang.text(TextKey::Boxplot))?;
            match &item.boxplot {
                Some(stats) => {
                    writeln!(
                        f,
                        "  Q1 = {} | {} = {} | Q3 = {} | {} = {} .. {}",
                        number(stats.q1, 2),
                        lang.text(TextKey::Median),
                        number(stats.median, 2),
                        number(stats.q3, 2),
                        lang.text(TextKey::Whiskers),
                        number(stats.whisker_low, 2),
                        number(stats.whisker_high, 2),
                    )?;
                    if !stats.outliers.is_empty() {
                        let outliers: Vec<String> =
                            stats.outliers.iter().map(|v| answer(*v)).collect();
                        writeln!(f, "  {}: {}", lang.text(TextKey::Outliers), outliers.join(", "))?;
                    }
                }
                None => writeln!(f, "  -")?,
            }
        }
        Ok(())
    }

    fn write_association(&self, f: &mut fmt::Formatter<'_>, lang: Language) -> fmt::Result {
        heading(f, lang.text(TextKey::Association))?;
        let result = &self.correlation;
        writeln!(f, "{}: {}", lang.text(TextKey::Method), result.method)?;
        writeln!(f)?;
        writeln!(f, "{}", lang.text(TextKey::CorrelationOutput))?;
        writeln!(
            f,
            "{}: {}",
            lang.text(TextKey::CorrelationCoefficient),
            number(result.coefficient, 3)
        )?;
        writeln!(f, "{}: {}", lang.text(TextKey::PValue), number(result.p_value, 4))?;
        let (direction, strength) = match self.classification {
            Some(c) => (lang.direction(c.direction), lang.strength(c.strength)),
            None => (lang.text(TextKey::Undefined), lang.text(TextKey::Undefined)),
        };
        writeln!(f, "{}: {}", lang.text(TextKey::Direction), direction)?;
        writeln!(f, "{}: {}", lang.text(TextKey::Strength), strength)?;
        writeln!(f)?;
        writeln!(f, "{}", lang.text(TextKey::Interpretation))?;
        writeln!(f, "{}", lang.interpretation(result))
    }
}

/// Plain-text report in the language carried by the analysis context.
impl fmt::Display for AnalysisReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lang = self.context.language;
        writeln!(f, "{}", lang.text(TextKey::Title))?;
        writeln!(f, "{}", lang.text(TextKey::Subtitle))?;

        self.write_preview(f, lang)?;
        self.write_summaries(f, lang)?;

        heading(f, lang.text(TextKey::FrequencyTables))?;
        Self::write_frequencies(f, lang, TextKey::VariableX, &self.x_frequencies)?;
        Self::write_frequencies(f, lang, TextKey::VariableY, &self.y_frequencies)?;

        heading(f, lang.text(TextKey::Visualizations))?;
        Self::write_distributions(f, lang, TextKey::VariableX, &self.x_distributions)?;
        Self::write_distributions(f, lang, TextKey::VariableY, &self.y_distributions)?;

        self.write_association(f, lang)
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    #[serde(flatten)]
    report: &'a AnalysisReport,
    interpretation: String,
}

/// The whole report as pretty JSON, with the interpretation sentence added. Non-finite numbers become `null`.
pub fn render_json(report: &AnalysisReport) -> Result<String, SurveyorError> {
    let json = JsonReport {
        report,
        interpretation: report.context.language.interpretation(&report.correlation),
    };
    Ok(serde_json::to_string_pretty(&json)?)
}

/// Renders the report as text into a `String`.
pub fn render_text(report: &AnalysisReport) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write!(out, "{}", report);
    out
}
