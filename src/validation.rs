//! Row validation for timetable sheets.
//!
//! Cleans one raw spreadsheet row into a [`Session`], or explains why the
//! row is unusable. Detects:
//! - Missing class, teacher, subject, weekday or period
//! - Weekday outside Monday..Friday
//! - Period outside 1..8
//!
//! # Cell normalization
//! Cells are trimmed. Empty, whitespace-only and `nan` cells (as written
//! by dataframe exports) are treated as empty. Numeric cells accept
//! integral decimal renderings such as `3.0`.

use serde::Serialize;

use crate::models::{Period, Session, Slot, Weekday};

/// A dropped row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RowIssue {
    /// 0-based data row index (header excluded).
    pub row: usize,
    /// Issue category.
    pub kind: RowIssueKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of row issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RowIssueKind {
    /// A required cell is empty.
    MissingField,
    /// The weekday cell is not a number in 1..=5.
    InvalidWeekday,
    /// The period cell is not a number in 1..=8.
    InvalidPeriod,
}

impl RowIssue {
    fn new(row: usize, kind: RowIssueKind, message: impl Into<String>) -> Self {
        Self {
            row,
            kind,
            message: message.into(),
        }
    }
}

/// The cells of one row, already picked out by column.
#[derive(Debug, Clone, Copy, Default)]
pub struct RowCells<'a> {
    pub class_name: &'a str,
    pub teacher_name: &'a str,
    pub subject_name: &'a str,
    pub room_name: &'a str,
    pub weekday: &'a str,
    pub period: &'a str,
    pub date_label: &'a str,
}

/// Normalizes a cell: trims it and maps empty-like values to `""`.
pub fn clean_cell(raw: &str) -> &str {
    let trimmed = raw.trim();
    if trimmed.eq_ignore_ascii_case("nan") {
        ""
    } else {
        trimmed
    }
}

/// Parses an integral cell. Accepts `3`, ` 3 `, `3.0`; rejects `3.5`.
pub fn parse_integral(raw: &str) -> Option<i64> {
    let cell = clean_cell(raw);
    if cell.is_empty() {
        return None;
    }
    if let Ok(n) = cell.parse::<i64>() {
        return Some(n);
    }
    let f = cell.parse::<f64>().ok()?;
    if f.is_finite() && f.fract() == 0.0 && f.abs() < i64::MAX as f64 {
        Some(f as i64)
    } else {
        None
    }
}

/// Validates one row.
///
/// Checks, in order:
/// 1. Class, teacher and subject are present
/// 2. Weekday is present and in 1..=5
/// 3. Period is present and in 1..=8
///
/// # Returns
/// The cleaned session, or the first issue found.
pub fn validate_row(row: usize, cells: &RowCells<'_>) -> Result<Session, RowIssue> {
    let class_name = clean_cell(cells.class_name);
    let teacher_name = clean_cell(cells.teacher_name);
    let subject_name = clean_cell(cells.subject_name);

    for (field, value) in [
        ("class", class_name),
        ("teacher", teacher_name),
        ("subject", subject_name),
        ("weekday", clean_cell(cells.weekday)),
        ("period", clean_cell(cells.period)),
    ] {
        if value.is_empty() {
            return Err(RowIssue::new(
                row,
                RowIssueKind::MissingField,
                format!("Row {row}: missing {field}"),
            ));
        }
    }

    let weekday = parse_integral(cells.weekday)
        .and_then(|n| Weekday::from_number(n).ok())
        .ok_or_else(|| {
            RowIssue::new(
                row,
                RowIssueKind::InvalidWeekday,
                format!("Row {row}: invalid weekday '{}'", cells.weekday.trim()),
            )
        })?;

    let period = parse_integral(cells.period)
        .and_then(|n| Period::new(n).ok())
        .ok_or_else(|| {
            RowIssue::new(
                row,
                RowIssueKind::InvalidPeriod,
                format!("Row {row}: invalid period '{}'", cells.period.trim()),
            )
        })?;

    Ok(
        Session::new(class_name, teacher_name, subject_name, Slot::new(weekday, period))
            .with_room(clean_cell(cells.room_name))
            .with_date_label(clean_cell(cells.date_label)),
    )
}
