use chrono::NaiveDate;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ServiceError>;

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Measurement validation error: {message}")]
    MeasurementValidation { message: String },

    #[error("Dataset contains no measurements")]
    EmptyDataset,

    #[error("Invalid date '{input}': expected YYYY-MM-DD")]
    InvalidDate { input: String },

    #[error("Invalid date range: end {end} is earlier than start {start}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    #[error("Async task error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}

impl ServiceError {
    /// Errors caused by the caller's input rather than the service state.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            ServiceError::InvalidDate { .. } | ServiceError::InvalidRange { .. }
        )
    }
}
