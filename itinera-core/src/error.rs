//! Error types for Itinera

use chrono::NaiveDate;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum TripError {
    #[error("Trip ends ({end}) before it starts ({start})")]
    InvalidDateRange { start: NaiveDate, end: NaiveDate },

    #[error("Trip must span at least one day")]
    ZeroDays,

    #[error("Unknown activity type: {0}")]
    UnknownActivityType(String),

    #[error("Invalid document: {0}")]
    InvalidDocument(String),
}

pub type Result<T> = std::result::Result<T, TripError>;
