//! Session model.
//!
//! A session is one class/teacher/subject assignment at one slot of the
//! weekly grid. Sessions are created in bulk when a timetable is loaded
//! and are read-only afterwards.

use serde::{Deserialize, Serialize};

use super::{Period, Slot, Weekday};

/// One teaching assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Grid position.
    pub slot: Slot,
    /// Class (homeroom) name, e.g. "資2".
    pub class_name: String,
    /// Teacher name.
    pub teacher_name: String,
    /// Subject name.
    pub subject_name: String,
    /// Room name. Empty = unassigned.
    pub room_name: String,
    /// Calendar date label for the weekday (e.g. "5/27"). Empty if unknown.
    pub date_label: String,
}

impl Session {
    /// Creates a session with no room and no date label.
    pub fn new(
        class_name: impl Into<String>,
        teacher_name: impl Into<String>,
        subject_name: impl Into<String>,
        slot: Slot,
    ) -> Self {
        Self {
            slot,
            class_name: class_name.into(),
            teacher_name: teacher_name.into(),
            subject_name: subject_name.into(),
            room_name: String::new(),
            date_label: String::new(),
        }
    }

    /// Sets the room.
    pub fn with_room(mut self, room_name: impl Into<String>) -> Self {
        self.room_name = room_name.into();
        self
    }

    /// Sets the date label.
    pub fn with_date_label(mut self, date_label: impl Into<String>) -> Self {
        self.date_label = date_label.into();
        self
    }

    /// Day of the week this session falls on.
    #[inline]
    pub fn weekday(&self) -> Weekday {
        self.slot.weekday
    }

    /// Period within the day.
    #[inline]
    pub fn period(&self) -> Period {
        self.slot.period
    }

    /// Whether a room is assigned.
    pub fn has_room(&self) -> bool {
        !self.room_name.is_empty()
    }

    /// Whether this session sits in the extended (8th) period.
    pub fn is_extended(&self) -> bool {
        self.slot.period == Period::EXTENDED
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_builder() {
        let s = Session::new("英3", "王老師", "數學", Slot::from_numbers(2, 3).unwrap())
            .with_room("301")
            .with_date_label("5/28");

        assert_eq!(s.class_name, "英3");
        assert_eq!(s.teacher_name, "王老師");
        assert_eq!(s.weekday(), Weekday::Tuesday);
        assert_eq!(s.period().number(), 3);
        assert!(s.has_room());
        assert_eq!(s.date_label, "5/28");
        assert!(!s.is_extended());
    }

    #[test]
    fn test_session_without_room() {
        let s = Session::new("會1", "李老師", "英文", Slot::from_numbers(5, 8).unwrap());
        assert!(!s.has_room());
        assert!(s.is_extended());
    }
}
