//! Timetable snapshot.
//!
//! An immutable, indexed set of sessions for one term. Built once per
//! load and never mutated; a reload produces a new snapshot.
//!
//! # Indices
//!
//! | Index | Key | Used by |
//! |-------|-----|---------|
//! | `by_class` | class | candidate generation, class lookups |
//! | `by_teacher` | teacher | teacher lookups |
//! | `by_room` | room | room lookups |
//! | `busy` | teacher → slots | teacher-availability filter |
//! | `loads` | class → teacher → per-weekday count | same-day load checks |
//!
//! Index vectors hold positions into `sessions` in ascending order, so
//! every lookup returns sessions in load order.

use serde::Serialize;
use std::cmp::Reverse;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use super::{Session, Slot, Weekday};

/// Ordering for class-name enumeration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ClassOrder {
    /// Plain lexicographic order.
    #[default]
    Lexicographic,
    /// School order: category prefix (英, 會, 商, 資, 多, then anything
    /// else), then grade descending, then name.
    School,
}

/// Filter for [`Timetable::lookup`]. `None` fields match anything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionQuery {
    pub class_name: Option<String>,
    pub teacher_name: Option<String>,
    pub room_name: Option<String>,
}

impl SessionQuery {
    /// Matches every session.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_class(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = Some(class_name.into());
        self
    }

    pub fn with_teacher(mut self, teacher_name: impl Into<String>) -> Self {
        self.teacher_name = Some(teacher_name.into());
        self
    }

    pub fn with_room(mut self, room_name: impl Into<String>) -> Self {
        self.room_name = Some(room_name.into());
        self
    }

    /// Whether a session satisfies every supplied filter.
    pub fn matches(&self, session: &Session) -> bool {
        self.class_name
            .as_deref()
            .map_or(true, |c| session.class_name == c)
            && self
                .teacher_name
                .as_deref()
                .map_or(true, |t| session.teacher_name == t)
            && self
                .room_name
                .as_deref()
                .map_or(true, |r| session.room_name == r)
    }
}

/// An immutable, indexed timetable.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Timetable {
    sessions: Vec<Session>,
    #[serde(skip)]
    by_class: HashMap<String, Vec<usize>>,
    #[serde(skip)]
    by_teacher: HashMap<String, Vec<usize>>,
    #[serde(skip)]
    by_room: HashMap<String, Vec<usize>>,
    #[serde(skip)]
    busy: HashMap<String, HashSet<Slot>>,
    #[serde(skip)]
    loads: HashMap<String, HashMap<String, [usize; 5]>>,
    #[serde(skip)]
    duplicates_removed: usize,
}

impl Timetable {
    /// Builds a snapshot from sessions in source order.
    ///
    /// Sessions repeating an earlier (class, teacher, weekday, period)
    /// are dropped; the first occurrence wins.
    pub fn from_sessions(sessions: impl IntoIterator<Item = Session>) -> Self {
        let mut table = Self::default();
        let mut seen: HashSet<(String, String, Slot)> = HashSet::new();

        for session in sessions {
            let key = (
                session.class_name.clone(),
                session.teacher_name.clone(),
                session.slot,
            );
            if !seen.insert(key) {
                table.duplicates_removed += 1;
                continue;
            }
            table.index(session);
        }

        table
    }

    fn index(&mut self, session: Session) {
        let idx = self.sessions.len();

        self.by_class
            .entry(session.class_name.clone())
            .or_default()
            .push(idx);
        self.by_teacher
            .entry(session.teacher_name.clone())
            .or_default()
            .push(idx);
        if session.has_room() {
            self.by_room
                .entry(session.room_name.clone())
                .or_default()
                .push(idx);
        }
        self.busy
            .entry(session.teacher_name.clone())
            .or_default()
            .insert(session.slot);

        let day = usize::from(session.weekday().number() - 1);
        self.loads
            .entry(session.class_name.clone())
            .or_default()
            .entry(session.teacher_name.clone())
            .or_default()[day] += 1;

        self.sessions.push(session);
    }

    /// All sessions in load order.
    pub fn sessions(&self) -> &[Session] {
        &self.sessions
    }

    /// Number of sessions.
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Whether the timetable holds no sessions.
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Rows collapsed as duplicates while building this snapshot.
    pub fn duplicates_removed(&self) -> usize {
        self.duplicates_removed
    }

    /// Sessions matching every filter in `query`, in load order.
    pub fn lookup(&self, query: &SessionQuery) -> Vec<&Session> {
        let candidates = [
            query.class_name.as_deref().map(|c| positions(&self.by_class, c)),
            query.teacher_name.as_deref().map(|t| positions(&self.by_teacher, t)),
            // Unassigned sessions are not in the room index
            query
                .room_name
                .as_deref()
                .filter(|r| !r.is_empty())
                .map(|r| positions(&self.by_room, r)),
        ]
        .into_iter()
        .flatten()
        .min_by_key(|indices| indices.len());

        match candidates {
            Some(indices) => indices
                .iter()
                .map(|&i| &self.sessions[i])
                .filter(|s| query.matches(s))
                .collect(),
            None => self.sessions.iter().collect(),
        }
    }

    /// Sessions of a class, in load order.
    pub fn sessions_for_class(&self, class_name: &str) -> impl Iterator<Item = &Session> + '_ {
        positions(&self.by_class, class_name)
            .iter()
            .map(move |&i| &self.sessions[i])
    }

    /// Sessions of a class at a slot. Usually one; co-taught slots have more.
    pub fn sessions_at(&self, class_name: &str, slot: Slot) -> Vec<&Session> {
        self.sessions_for_class(class_name)
            .filter(|s| s.slot == slot)
            .collect()
    }

    /// The first session (in load order) of a class at a slot.
    pub fn session_at(&self, class_name: &str, slot: Slot) -> Option<&Session> {
        self.sessions_for_class(class_name).find(|s| s.slot == slot)
    }

    /// Whether a teacher has any session, in any class, at a slot.
    pub fn teacher_is_busy(&self, teacher_name: &str, slot: Slot) -> bool {
        self.busy
            .get(teacher_name)
            .is_some_and(|slots| slots.contains(&slot))
    }

    /// Number of sessions a teacher has with a class on a weekday.
    pub fn teaching_load(&self, teacher_name: &str, class_name: &str, weekday: Weekday) -> usize {
        self.loads
            .get(class_name)
            .and_then(|teachers| teachers.get(teacher_name))
            .map(|days| days[usize::from(weekday.number() - 1)])
            .unwrap_or(0)
    }

    /// Distinct class names.
    pub fn class_names(&self, order: ClassOrder) -> Vec<String> {
        let mut names: Vec<String> = self.by_class.keys().cloned().collect();
        match order {
            ClassOrder::Lexicographic => names.sort(),
            ClassOrder::School => sort_class_names(&mut names),
        }
        names
    }

    /// Distinct teacher names, lexicographic.
    pub fn teacher_names(&self) -> Vec<String> {
        sorted_keys(&self.by_teacher)
    }

    /// Distinct assigned room names, lexicographic.
    pub fn room_names(&self) -> Vec<String> {
        sorted_keys(&self.by_room)
    }

    /// Date label per weekday, from the first session of that weekday
    /// carrying one.
    pub fn weekday_dates(&self) -> BTreeMap<Weekday, String> {
        let mut dates = BTreeMap::new();
        for s in self.sessions.iter().filter(|s| !s.date_label.is_empty()) {
            dates
                .entry(s.weekday())
                .or_insert_with(|| s.date_label.clone());
        }
        dates
    }
}

fn positions<'a>(index: &'a HashMap<String, Vec<usize>>, key: &str) -> &'a [usize] {
    index.get(key).map(Vec::as_slice).unwrap_or(&[])
}

fn sorted_keys(index: &HashMap<String, Vec<usize>>) -> Vec<String> {
    index
        .keys()
        .cloned()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Sorts class names in school order.
///
/// A class name starts with a one-character category followed by a grade
/// digit ("資3"). Categories rank 英 < 會 < 商 < 資 < 多 < other; higher
/// grades come first within a category. Names not matching the pattern
/// sort after every category, by name.
pub fn sort_class_names(names: &mut [String]) {
    names.sort_by_cached_key(|name| {
        let (rank, grade) = class_key(name);
        (rank, Reverse(grade), name.clone())
    });
}

fn class_key(name: &str) -> (u8, u32) {
    let mut chars = name.chars();
    let (Some(prefix), Some(grade)) = (chars.next(), chars.next().and_then(grade_digit)) else {
        return (99, 0);
    };
    let rank = match prefix {
        '英' => 1,
        '會' => 2,
        '商' => 3,
        '資' => 4,
        '多' => 5,
        _ => 99,
    };
    (rank, grade)
}

/// Decimal value of an ASCII or full-width digit.
fn grade_digit(c: char) -> Option<u32> {
    match c {
        '０'..='９' => Some(u32::from(c) - u32::from('０')),
        _ => c.to_digit(10),
    }
}
