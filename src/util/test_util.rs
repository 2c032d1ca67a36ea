use std::path::Path;
use tracing::{info, subscriber::set_default};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt;

use crate::data::Dataset;

pub struct TracingGuards {
    _subscriber_guard: tracing::subscriber::DefaultGuard,
    _worker_guard: WorkerGuard,
}

pub fn setup_test_tracing(test_name: &str) -> TracingGuards {
    let log_dir = Path::new("tests/logs");
    if !log_dir.exists() {
        std::fs::create_dir_all(log_dir).unwrap();
    }

    let log_file = format!("tests/logs/{}.log", test_name);
    let file_appender = tracing_appender::rolling::never("", &log_file);
    let (non_blocking, worker_guard) = tracing_appender::non_blocking(file_appender);

    let subscriber = fmt::Subscriber::builder()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_level(true)
        .with_target(true)
        .with_thread_ids(true)
        .with_thread_names(true)
        .with_max_level(tracing::Level::DEBUG)
        .finish();

    // Thread-local so parallel tests keep separate logs.
    let subscriber_guard = set_default(subscriber);

    TracingGuards {
        _subscriber_guard: subscriber_guard,
        _worker_guard: worker_guard,
    }
}

/**
A small Likert-scale survey: one text column and four items answered by six
respondents, with one missing answer in the third item.

The numeric items split into X = (1, 2) and Y = (3, 4).
 */
pub fn sample_survey() -> Dataset {
    Dataset::builder()
        .add_text("Respondent", &["A", "B", "C", "D", "E", "F"])
        .add_complete("1. I use social media daily", &[1.0, 2.0, 3.0, 4.0, 5.0, 3.0])
        .add_complete("2. I scroll before sleeping", &[2.0, 2.0, 3.0, 5.0, 5.0, 3.0])
        .add_numeric(
            "3. I feel anxious without my phone",
            vec![Some(1.0), Some(2.0), Some(4.0), None, Some(5.0), Some(3.0)],
        )
        .add_complete("4. I lose focus while studying", &[2.0, 1.0, 3.0, 4.0, 5.0, 4.0])
        .build()
        .unwrap()
}

pub fn setup_survey_data(test_name: &str) -> (Dataset, TracingGuards) {
    let guards = setup_test_tracing(test_name);
    info!("-----------------");
    info!("Test: {}", test_name);
    info!("-----------------");
    (sample_survey(), guards)
}
