//! School timetable snapshots and swap recommendations.
//!
//! Loads a weekly class/teacher/room timetable from spreadsheet rows into
//! an immutable, indexed snapshot, and answers the question "which other
//! lesson of this class could trade places with this one?".
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Weekday`, `Period`, `Slot`, `Session`,
//!   `Timetable`, `SwapPolicy`
//! - **`validation`**: Row cleaning (trim, `nan` handling, numeric coercion)
//! - **`ingest`**: Sheet schema checks, row dropping, deduplication
//! - **`store`**: `TimetableStore`, the reloadable snapshot holder
//! - **`swap`**: Hard filters, soft checks, and `SwapRecommender`
//!
//! # Example
//!
//! ```
//! use timetable_swap::ingest::RawSheet;
//! use timetable_swap::store::TimetableStore;
//! use timetable_swap::swap::SwapRecommender;
//!
//! let headers = ["班級名稱", "教師名稱", "科目名稱", "教室名稱", "星期", "節次", "日期"];
//! let sheet = RawSheet::new(headers)
//!     .with_row(["A1", "Wang", "Math", "101", "1", "1", "5/27"])
//!     .with_row(["A1", "Lee", "English", "102", "2", "3", "5/28"]);
//!
//! let store = TimetableStore::new();
//! let report = store.reload(&sheet).unwrap();
//! assert_eq!(report.sessions, 2);
//!
//! let options = SwapRecommender::new().find_swap_options_raw(&store.current(), "A1", 1, 1);
//! assert_eq!(options.len(), 1);
//! assert_eq!((options[0].day, options[0].period), (2, 3));
//! assert!(options[0].recommended);
//! ```

pub mod error;
pub mod ingest;
pub mod models;
pub mod store;
pub mod swap;
pub mod validation;

pub use error::{LoadError, SlotError};
