//! Error types for jalali-engine operations.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CalendarError {
    #[error("Invalid Jalali date: {0}")]
    InvalidDate(String),

    #[error("Invalid Gregorian date: {0}")]
    InvalidGregorian(String),

    #[error("Year out of supported range: {0}")]
    OutOfRange(i32),

    #[error("Cannot parse date: {0}")]
    Parse(String),

    #[error("Date outside picker bounds: {0}")]
    OutOfBounds(String),

    #[error("Invalid picker bounds: {0}")]
    InvalidBounds(String),
}

pub type Result<T> = std::result::Result<T, CalendarError>;
