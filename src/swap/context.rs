//! Evaluation context for swap filters.

use crate::models::{SwapPolicy, Timetable};

/// Read-only state passed to filters and checks.
///
/// Borrows the snapshot being searched and the active policy; nothing
/// in it changes during a search.
#[derive(Debug, Clone, Copy)]
pub struct SwapContext<'a> {
    /// Snapshot the search runs against.
    pub timetable: &'a Timetable,
    /// Active swap policy.
    pub policy: &'a SwapPolicy,
}

impl<'a> SwapContext<'a> {
    /// Creates a context.
    pub fn new(timetable: &'a Timetable, policy: &'a SwapPolicy) -> Self {
        Self { timetable, policy }
    }
}
