//! Error types for meeting-finder operations.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FinderError {
    /// A time range that ends before it starts or leaves the day.
    #[error("Invalid time range: start {start}, end {end}")]
    InvalidRange { start: i32, end: i32 },

    /// A clock string that is not a valid `HH:MM` time of day.
    #[error("Invalid clock time: {0}")]
    InvalidClockTime(String),

    /// A slot granularity that is zero or does not evenly divide a day.
    #[error("Invalid granularity: {0} minutes does not evenly divide a day")]
    InvalidGranularity(u32),
}

pub type Result<T> = std::result::Result<T, FinderError>;
