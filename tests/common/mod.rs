#[allow(unused_imports)]
pub use surveyor::util::test_util::{setup_survey_data, setup_test_tracing};

use std::io::Write;

use tempfile::NamedTempFile;

/// Writes `contents` to a temporary `.csv` file that lives as long as the handle.
#[allow(dead_code)]
pub fn csv_file(contents: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}
