use std::{
    collections::HashMap,
    fs::File,
    io::{BufReader, Read},
    path::Path,
};

use tracing::{debug, info, instrument};

use crate::error::SurveyorError;

use super::{column::Column, dataset::Dataset};

/**
Load a survey dataset from disk, choosing the reader from the file extension.

## Arguments
* `path` - Path to a `.csv` file, or an `.xlsx` / `.xls` / `.xlsm` / `.ods`
  workbook when the `excel` feature is enabled (the first sheet is read).

## Returns
The dataset with per-column inferred types, or a `SurveyorError` when the file
cannot be read or has an unsupported extension.
 */
#[instrument(skip(path), fields(path = %path.as_ref().display()))]
pub fn load<P: AsRef<Path>>(path: P) -> Result<Dataset, SurveyorError> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    let dataset = match extension.as_str() {
        "csv" => read_csv(path)?,
        #[cfg(feature = "excel")]
        "xlsx" | "xls" | "xlsm" | "ods" => read_workbook(path)?,
        _ => return Err(SurveyorError::UnsupportedFormat(path.display().to_string())),
    };

    let (rows, columns) = dataset.shape();
    info!(rows, columns, "Dataset loaded");
    Ok(dataset)
}

pub fn read_csv(path: &Path) -> Result<Dataset, SurveyorError> {
    let file = File::open(path)?;
    from_csv_reader(BufReader::new(file), &path.display().to_string())
}

/// Parse delimited text with a header row. Records must all have the header's length.
pub fn from_csv_reader<R: Read>(reader: R, source: &str) -> Result<Dataset, SurveyorError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    if headers.is_empty() {
        return Err(SurveyorError::EmptyInput(source.to_string()));
    }

    let mut cells: Vec<Vec<String>> = vec![Vec::new(); headers.len()];
    for record in reader.records() {
        let record = record?;
        for (i, column) in cells.iter_mut().enumerate() {
            column.push(record.get(i).unwrap_or_default().to_string());
        }
    }
    debug!(source, records = cells[0].len(), "Parsed delimited records");

    build_dataset(headers, cells)
}

#[cfg(feature = "excel")]
pub fn read_workbook(path: &Path) -> Result<Dataset, SurveyorError> {
    use calamine::{open_workbook_auto, Reader};

    let source = path.display().to_string();
    let mut workbook = open_workbook_auto(path)?;
    let sheet = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| SurveyorError::EmptyInput(source.clone()))?;
    let range = workbook.worksheet_range(&sheet)?;
    debug!(sheet = %sheet, "Reading first worksheet");

    let mut rows = range.rows();
    let headers: Vec<String> = rows
        .next()
        .ok_or_else(|| SurveyorError::EmptyInput(source.clone()))?
        .iter()
        .map(|cell| cell.to_string())
        .collect();

    let mut cells: Vec<Vec<String>> = vec![Vec::new(); headers.len()];
    for row in rows {
        for (i, column) in cells.iter_mut().enumerate() {
            column.push(row.get(i).map(|c| c.to_string()).unwrap_or_default());
        }
    }

    build_dataset(headers, cells)
}

/// Repeated headers get a `.1`, `.2`, ... suffix so column names stay unique.
fn deduplicate_headers(headers: Vec<String>) -> Vec<String> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    headers
        .into_iter()
        .map(|header| {
            let seen = counts.entry(header.clone()).or_insert(0);
            let name = if *seen == 0 {
                header
            } else {
                format!("{}.{}", header, seen)
            };
            *seen += 1;
            name
        })
        .collect()
}

fn build_dataset(headers: Vec<String>, cells: Vec<Vec<String>>) -> Result<Dataset, SurveyorError> {
    let columns = deduplicate_headers(headers)
        .into_iter()
        .zip(cells)
        .map(|(name, values)| Column::infer(name, values))
        .collect();
    Dataset::new(columns)
}
