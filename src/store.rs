//! Timetable store.
//!
//! Owns the active [`Timetable`] snapshot. A reload builds a complete new
//! snapshot and then swaps it in; readers holding the previous `Arc` keep
//! using it undisturbed. A failed reload leaves the active snapshot as-is.

use parking_lot::RwLock;
use std::sync::Arc;
use tracing::{error, info};

use crate::error::LoadError;
use crate::ingest::{load_sheet, ColumnMapping, LoadReport, RawSheet};
use crate::models::Timetable;

/// Holder of the active timetable snapshot.
#[derive(Debug)]
pub struct TimetableStore {
    mapping: ColumnMapping,
    current: RwLock<Arc<Timetable>>,
}

impl TimetableStore {
    /// Creates a store with an empty snapshot and the default headers.
    pub fn new() -> Self {
        Self::with_mapping(ColumnMapping::default())
    }

    /// Creates a store with an empty snapshot and custom headers.
    pub fn with_mapping(mapping: ColumnMapping) -> Self {
        Self {
            mapping,
            current: RwLock::new(Arc::new(Timetable::default())),
        }
    }

    /// Creates a store around an already built snapshot.
    pub fn from_timetable(timetable: Timetable) -> Self {
        Self {
            mapping: ColumnMapping::default(),
            current: RwLock::new(Arc::new(timetable)),
        }
    }

    /// The active snapshot.
    pub fn current(&self) -> Arc<Timetable> {
        Arc::clone(&*self.current.read())
    }

    /// Rebuilds the snapshot from a sheet and makes it active.
    ///
    /// On error no partial snapshot is published.
    pub fn reload(&self, sheet: &RawSheet) -> Result<LoadReport, LoadError> {
        let (timetable, report) = match load_sheet(sheet, &self.mapping) {
            Ok(loaded) => loaded,
            Err(e) => {
                error!(error = %e, "Timetable reload failed; keeping previous snapshot");
                return Err(e);
            }
        };

        *self.current.write() = Arc::new(timetable);

        info!(
            rows = report.raw_rows,
            sessions = report.sessions,
            duplicates = report.duplicates,
            dropped = report.dropped_count(),
            "Timetable reloaded"
        );
        Ok(report)
    }

    /// Publishes a snapshot built elsewhere.
    pub fn replace(&self, timetable: Timetable) -> Arc<Timetable> {
        let next = Arc::new(timetable);
        *self.current.write() = Arc::clone(&next);
        next
    }
}

impl Default for TimetableStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    fn sheet(rows: &[[&str; 5]]) -> RawSheet {
        let headers = ["班級名稱", "教師名稱", "科目名稱", "星期", "節次"];
        let mut s = RawSheet::new(headers);
        for r in rows {
            s.push_row(*r);
        }
        s
    }

    #[test]
    fn test_starts_empty() {
        let store = TimetableStore::new();
        assert!(store.current().is_empty());
    }

    #[test]
    fn test_reload_replaces_snapshot() {
        let store = TimetableStore::new();
        store
            .reload(&sheet(&[["A1", "Wang", "Math", "1", "1"]]))
            .unwrap();
        let first = store.current();
        assert_eq!(first.len(), 1);

        store
            .reload(&sheet(&[
                ["A1", "Wang", "Math", "1", "1"],
                ["A1", "Lee", "English", "2", "3"],
            ]))
            .unwrap();

        // Old readers keep their snapshot
        assert_eq!(first.len(), 1);
        assert_eq!(store.current().len(), 2);
    }

    #[test]
    fn test_failed_reload_keeps_previous() {
        let store = TimetableStore::new();
        store
            .reload(&sheet(&[["A1", "Wang", "Math", "1", "1"]]))
            .unwrap();

        let broken = RawSheet::new(["班級名稱"]).with_row(["A1"]);
        assert!(matches!(
            store.reload(&broken),
            Err(LoadError::Schema { .. })
        ));
        assert_eq!(store.current().len(), 1);
    }

    #[test]
    fn test_concurrent_readers() {
        let store = Arc::new(TimetableStore::new());
        store
            .reload(&sheet(&[["A1", "Wang", "Math", "1", "1"]]))
            .unwrap();

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let store = Arc::clone(&store);
                thread::spawn(move || store.current().len())
            })
            .collect();
        store
            .reload(&sheet(&[
                ["A1", "Wang", "Math", "1", "1"],
                ["A1", "Lee", "English", "2", "3"],
            ]))
            .unwrap();

        for h in handles {
            let n = h.join().unwrap();
            assert!(n == 1 || n == 2);
        }
    }

    #[test]
    fn test_replace() {
        let store = TimetableStore::default();
        let snap = store.replace(Timetable::from_sessions(Vec::new()));
        assert!(Arc::ptr_eq(&snap, &store.current()));
    }
}
