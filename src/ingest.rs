//! Sheet ingestion.
//!
//! Turns a raw spreadsheet (header row + string cells) into a
//! [`Timetable`] snapshot.
//!
//! # Pipeline
//!
//! 1. Resolve required columns against the header; any missing column
//!    fails the whole load with [`LoadError::Schema`].
//! 2. Clean and validate each row ([`validate_row`]); bad rows are
//!    dropped and reported, loading continues.
//! 3. Deduplicate on (class, teacher, weekday, period), first seen wins.
//!
//! Transport (how the sheet is fetched) belongs to the caller.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::LoadError;
use crate::models::Timetable;
use crate::validation::{validate_row, RowCells, RowIssue};

/// A spreadsheet as delivered by the host: one header row and data rows.
///
/// Rows shorter than the header are padded with empty cells.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawSheet {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawSheet {
    /// Creates a sheet with the given header and no rows.
    pub fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Appends a data row.
    pub fn with_row<I, S>(mut self, cells: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.push_row(cells);
        self
    }

    /// Appends a data row.
    pub fn push_row<I, S>(&mut self, cells: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rows.push(cells.into_iter().map(Into::into).collect());
    }

    fn column(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h.trim() == name)
    }
}

/// Header names for each session field.
///
/// Defaults to the school sheet's headers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnMapping {
    pub class_name: String,
    pub teacher_name: String,
    pub subject_name: String,
    pub room_name: String,
    pub weekday: String,
    pub period: String,
    pub date_label: String,
}

impl Default for ColumnMapping {
    fn default() -> Self {
        Self {
            class_name: "班級名稱".into(),
            teacher_name: "教師名稱".into(),
            subject_name: "科目名稱".into(),
            room_name: "教室名稱".into(),
            weekday: "星期".into(),
            period: "節次".into(),
            date_label: "日期".into(),
        }
    }
}

impl ColumnMapping {
    /// Plain English headers: `class`, `teacher`, `subject`, `room`,
    /// `weekday`, `period`, `date`.
    pub fn english() -> Self {
        Self {
            class_name: "class".into(),
            teacher_name: "teacher".into(),
            subject_name: "subject".into(),
            room_name: "room".into(),
            weekday: "weekday".into(),
            period: "period".into(),
            date_label: "date".into(),
        }
    }
}

/// Resolved column positions.
struct Columns {
    class_name: usize,
    teacher_name: usize,
    subject_name: usize,
    weekday: usize,
    period: usize,
    room_name: Option<usize>,
    date_label: Option<usize>,
}

impl Columns {
    fn resolve(sheet: &RawSheet, mapping: &ColumnMapping) -> Result<Self, LoadError> {
        let mut missing = Vec::new();
        let mut require = |name: &str| {
            let pos = sheet.column(name);
            if pos.is_none() {
                missing.push(name.to_string());
            }
            pos.unwrap_or(0)
        };

        let class_name = require(&mapping.class_name);
        let teacher_name = require(&mapping.teacher_name);
        let subject_name = require(&mapping.subject_name);
        let weekday = require(&mapping.weekday);
        let period = require(&mapping.period);

        if !missing.is_empty() {
            return Err(LoadError::Schema { missing });
        }

        Ok(Self {
            class_name,
            teacher_name,
            subject_name,
            weekday,
            period,
            room_name: sheet.column(&mapping.room_name),
            date_label: sheet.column(&mapping.date_label),
        })
    }

    fn cells<'a>(&self, row: &'a [String]) -> RowCells<'a> {
        let cell = move |i: usize| row.get(i).map(String::as_str).unwrap_or("");
        RowCells {
            class_name: cell(self.class_name),
            teacher_name: cell(self.teacher_name),
            subject_name: cell(self.subject_name),
            room_name: self.room_name.map(cell).unwrap_or(""),
            weekday: cell(self.weekday),
            period: cell(self.period),
            date_label: self.date_label.map(cell).unwrap_or(""),
        }
    }
}

/// Diagnostics from a successful load.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LoadReport {
    /// Data rows in the sheet.
    pub raw_rows: usize,
    /// Sessions in the resulting snapshot.
    pub sessions: usize,
    /// Valid rows collapsed as duplicates.
    pub duplicates: usize,
    /// Rows dropped by validation.
    pub dropped: Vec<RowIssue>,
}

impl LoadReport {
    /// Number of rows dropped by validation.
    pub fn dropped_count(&self) -> usize {
        self.dropped.len()
    }

    /// Whether every row became a session.
    pub fn is_clean(&self) -> bool {
        self.dropped.is_empty() && self.duplicates == 0
    }
}

/// Loads a sheet with the given column mapping.
pub fn load_sheet(
    sheet: &RawSheet,
    mapping: &ColumnMapping,
) -> Result<(Timetable, LoadReport), LoadError> {
    let columns = Columns::resolve(sheet, mapping)?;

    let mut dropped = Vec::new();
    let mut sessions = Vec::with_capacity(sheet.rows.len());
    for (i, row) in sheet.rows.iter().enumerate() {
        match validate_row(i, &columns.cells(row)) {
            Ok(session) => sessions.push(session),
            Err(issue) => {
                debug!(row = issue.row, kind = ?issue.kind, "{}", issue.message);
                dropped.push(issue);
            }
        }
    }

    let timetable = Timetable::from_sessions(sessions);
    let report = LoadReport {
        raw_rows: sheet.rows.len(),
        sessions: timetable.len(),
        duplicates: timetable.duplicates_removed(),
        dropped,
    };

    if report.duplicates > 0 {
        warn!(
            duplicates = report.duplicates,
            "Timetable source contained duplicate rows; kept first occurrence"
        );
    }
    if !report.dropped.is_empty() {
        warn!(
            dropped = report.dropped.len(),
            "Dropped invalid timetable rows"
        );
    }

    Ok((timetable, report))
}

impl Timetable {
    /// Loads a sheet using the default school headers.
    pub fn load(sheet: &RawSheet) -> Result<(Timetable, LoadReport), LoadError> {
        load_sheet(sheet, &ColumnMapping::default())
    }

    /// Loads a sheet using custom headers.
    pub fn load_with(
        sheet: &RawSheet,
        mapping: &ColumnMapping,
    ) -> Result<(Timetable, LoadReport), LoadError> {
        load_sheet(sheet, mapping)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Slot, Weekday};
    use crate::validation::RowIssueKind;

    const HEADERS: [&str; 7] = [
        "班級名稱",
        "教師名稱",
        "科目名稱",
        "教室名稱",
        "星期",
        "節次",
        "日期",
    ];

    fn sample_sheet() -> RawSheet {
        RawSheet::new(HEADERS)
            .with_row(["英3", "王", "數學", "301", "1", "1", "5/27"])
            .with_row(["英3", "李", "英文", "", "2", "3", "5/28"])
            .with_row(["英3", "王", "數學", "301", "1", "2", "5/27"])
    }

    #[test]
    fn test_load_valid_sheet() {
        let (t, report) = Timetable::load(&sample_sheet()).unwrap();
        assert_eq!(t.len(), 3);
        assert_eq!(report.raw_rows, 3);
        assert_eq!(report.sessions, 3);
        assert!(report.is_clean());
        assert_eq!(t.teaching_load("王", "英3", Weekday::Monday), 2);
    }

    #[test]
    fn test_missing_required_columns() {
        let sheet = RawSheet::new(["班級名稱", "教師名稱", "教室名稱", "星期"])
            .with_row(["英3", "王", "301", "1"]);

        let err = Timetable::load(&sheet).unwrap_err();
        assert_eq!(
            err,
            LoadError::Schema {
                missing: vec!["科目名稱".to_string(), "節次".to_string()]
            }
        );
        assert!(err.to_string().contains("科目名稱"));
    }

    #[test]
    fn test_optional_columns_absent() {
        let headers = ["班級名稱", "教師名稱", "科目名稱", "星期", "節次"];
        let sheet = RawSheet::new(headers)
            .with_row(["英3", "王", "數學", "1", "1"]);

        let (t, _) = Timetable::load(&sheet).unwrap();
        assert!(!t.sessions()[0].has_room());
        assert!(t.sessions()[0].date_label.is_empty());
    }

    #[test]
    fn test_bad_rows_dropped_and_reported() {
        let sheet = sample_sheet()
            .with_row(["英3", "nan", "數學", "", "1", "3", ""])
            .with_row(["英3", "王", "數學", "", "6", "1", ""])
            .with_row(["英3", "王", "數學", "", "1", "9", ""])
            .with_row(["英3", "王"]);

        let (t, report) = Timetable::load(&sheet).unwrap();
        assert_eq!(t.len(), 3);
        assert_eq!(report.dropped_count(), 4);
        let kinds: Vec<_> = report.dropped.iter().map(|i| i.kind).collect();
        assert_eq!(
            kinds,
            vec![
                RowIssueKind::MissingField,
                RowIssueKind::InvalidWeekday,
                RowIssueKind::InvalidPeriod,
                RowIssueKind::MissingField,
            ]
        );
        assert_eq!(report.dropped[0].row, 3);
    }

    #[test]
    fn test_duplicate_row_collapsed() {
        let sheet = sample_sheet().with_row(["英3", "王", "數學", "301", "1", "1", "5/27"]);

        let (t, report) = Timetable::load(&sheet).unwrap();
        assert_eq!(t.len(), sheet.rows.len() - 1);
        assert_eq!(report.duplicates, 1);

        // Reloading the deduplicated rows is stable
        let mut again = RawSheet::new(HEADERS);
        for s in t.sessions() {
            let day = s.weekday().number().to_string();
            let period = s.period().number().to_string();
            again.push_row([
                s.class_name.as_str(),
                s.teacher_name.as_str(),
                s.subject_name.as_str(),
                s.room_name.as_str(),
                day.as_str(),
                period.as_str(),
                s.date_label.as_str(),
            ]);
        }
        let (t2, report2) = Timetable::load(&again).unwrap();
        assert_eq!(t2.len(), t.len());
        assert_eq!(report2.duplicates, 0);
    }

    #[test]
    fn test_trimmed_headers_and_cells() {
        let headers = [" 班級名稱", "教師名稱 ", "科目名稱", "星期", "節次"];
        let sheet = RawSheet::new(headers)
            .with_row([" 英3 ", " 王 ", " 數學 ", "2.0", " 4 "]);

        let (t, _) = Timetable::load(&sheet).unwrap();
        let s = &t.sessions()[0];
        assert_eq!(s.class_name, "英3");
        assert_eq!(s.teacher_name, "王");
        assert_eq!(s.slot, Slot::from_numbers(2, 4).unwrap());
    }

    #[test]
    fn test_custom_mapping() {
        let sheet = RawSheet::new(["class", "teacher", "subject", "room", "weekday", "period"])
            .with_row(["A1", "Wang", "Math", "101", "1", "1"]);

        assert!(Timetable::load(&sheet).is_err());
        let (t, _) = Timetable::load_with(&sheet, &ColumnMapping::english()).unwrap();
        assert_eq!(t.room_names(), vec!["101"]);
    }

    #[test]
    fn test_sheet_from_json() {
        let json = r#"{
            "headers": ["class", "teacher", "subject", "weekday", "period"],
            "rows": [["A1", "Wang", "Math", "3", "5"]]
        }"#;
        let sheet: RawSheet = serde_json::from_str(json).unwrap();
        let (t, _) = Timetable::load_with(&sheet, &ColumnMapping::english()).unwrap();
        assert_eq!(t.len(), 1);
    }
}
