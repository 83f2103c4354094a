//! Error type shared by the loaders, the roster store and the import adapter
//!
//! The lookup and the engine are total and never produce one of these.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid date: {0}")]
    Date(#[from] chrono::ParseError),

    #[error("invalid birth month {month} (expected 1-12)")]
    InvalidMonth { month: u32 },

    #[error("invalid birth month {0:?} (expected YYYY-MM)")]
    InvalidBirthMonth(String),

    #[error("life table has no rows")]
    EmptyLifeTable,

    #[error("unknown scenario template: {0}")]
    UnknownTemplate(String),

    #[error("no person with id {0}")]
    UnknownPerson(String),

    #[error("no segment {index} (timeline has {len})")]
    SegmentIndex { index: usize, len: usize },

    #[error("a timeline must keep at least one segment")]
    LastSegment,

    #[error("no birthdays with years found in the export")]
    NoBirthdays,
}

pub type Result<T> = std::result::Result<T, Error>;
