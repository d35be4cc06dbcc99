use thiserror::Error;

/// Top-level error type used across the entire application.
#[derive(Debug, Error)]
pub enum TrackerError {
    #[error("config error: {0}")]
    Config(String),

    #[error("render error: {0}")]
    Render(String),

    #[error("export error: {0}")]
    Export(String),

    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

/// The single failure kind a metric source can report.
///
/// Sources surface it; the sampler decides the fallback.
#[derive(Debug, Error)]
pub enum MetricReadError {
    #[error("cannot read metric source: {0}")]
    Io(#[from] std::io::Error),

    #[error("line {line} is missing")]
    MissingLine { line: usize },

    #[error("line {line} has no ':' separator")]
    MissingSeparator { line: usize },

    #[error("line {line} has a non-integer value '{value}'")]
    InvalidValue { line: usize, value: String },

    #[error("metric source unavailable: {0}")]
    Unavailable(String),
}

pub type Result<T, E = TrackerError> = std::result::Result<T, E>;
