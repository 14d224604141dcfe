//! Error types.
//!
//! Only failures that abort an operation live here. Row-level problems
//! during loading are recovered and reported through
//! [`LoadReport`](crate::ingest::LoadReport); swap lookups never fail.

use thiserror::Error;

/// A weekday or period value outside the timetable grid.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SlotError {
    #[error("weekday must be 1..=5, got {0}")]
    InvalidWeekday(i64),

    #[error("period must be 1..=8, got {0}")]
    InvalidPeriod(i64),
}

/// A timetable load that produced no snapshot.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    /// The sheet header lacks one or more required columns.
    #[error("sheet is missing required column(s): {}", missing.join(", "))]
    Schema { missing: Vec<String> },
}
