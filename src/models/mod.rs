//! Timetable domain models.
//!
//! Provides the data types the swap engine queries: validated grid
//! coordinates, sessions, the indexed timetable snapshot, and the swap
//! policy.
//!
//! # Domain Mappings
//!
//! | timetable-swap | School sheet column |
//! |----------------|---------------------|
//! | `Session::class_name` | 班級名稱 |
//! | `Session::teacher_name` | 教師名稱 |
//! | `Session::subject_name` | 科目名稱 |
//! | `Session::room_name` | 教室名稱 |
//! | `Weekday` | 星期 |
//! | `Period` | 節次 |
//! | `Session::date_label` | 日期 |

mod policy;
mod session;
mod slot;
mod timetable;

pub use policy::{SwapPolicy, DEFAULT_PROTECTED_SUBJECTS};
pub use session::Session;
pub use slot::{Period, Slot, Weekday};
pub use timetable::{sort_class_names, ClassOrder, SessionQuery, Timetable};
