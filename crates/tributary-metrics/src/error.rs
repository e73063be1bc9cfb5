use thiserror::Error;

/// Analysis configuration rejected before any analyzer runs.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{field} must be positive (got {value})")]
    NotPositive { field: &'static str, value: i64 },
    #[error("{field} must not be negative (got {value})")]
    Negative { field: &'static str, value: i64 },
    #[error("{field} exceeds {max} days (got {value})")]
    OutOfRange {
        field: &'static str,
        value: i64,
        max: i64,
    },
    #[error("flow window ends before it starts ({start} > {end})")]
    InvertedWindow { start: String, end: String },
}
