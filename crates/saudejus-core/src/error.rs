use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("unrecognized outcome: {0:?}")]
    UnrecognizedOutcome(String),

    #[error("invalid filter criteria: {0}")]
    InvalidCriteria(String),

    #[error("decision year {year} outside plausible range {min}..={max}")]
    YearOutOfRange { year: i32, min: i32, max: i32 },

    #[error("claim value must be a finite non-negative number, got {0}")]
    InvalidClaimValue(f64),

    #[error("court name is empty")]
    EmptyCourt,

    #[error("column {column}: {reason}")]
    Column { column: String, reason: String },

    #[error("arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),
}
