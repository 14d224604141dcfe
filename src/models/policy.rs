//! Swap policy configuration.
//!
//! Holds the school-specific knobs of the swap engine: which subjects are
//! never exchanged, which period is the isolated extended slot, the
//! midday double-period block, and the same-day load threshold.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::Period;

/// Subjects that never take part in an exchange, on either side.
///
/// Group activity, mother-tongue language, elective block, flexible learning.
pub const DEFAULT_PROTECTED_SUBJECTS: [&str; 4] =
    ["團體活動時間", "本土語文", "多元選修", "彈性學習時間"];

/// Swap policy.
///
/// `Default` reproduces the school's rules; every field can be
/// overridden by the host, e.g. from a JSON or TOML config file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SwapPolicy {
    /// Subjects exempt from swapping.
    pub protected_subjects: BTreeSet<String>,
    /// Period that may only be exchanged with itself.
    pub extended_period: Period,
    /// The two periods forming the midday double block.
    pub double_block: (Period, Period),
    /// Pre-swap same-day sessions with one class at which a teacher counts
    /// as overloaded.
    pub same_day_limit: usize,
    /// Separator used when warnings are rendered into a single reason.
    pub reason_delimiter: String,
}

impl Default for SwapPolicy {
    fn default() -> Self {
        Self {
            protected_subjects: DEFAULT_PROTECTED_SUBJECTS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            extended_period: Period::EXTENDED,
            double_block: (Period(4), Period(5)),
            same_day_limit: 2,
            reason_delimiter: "; ".to_string(),
        }
    }
}

impl SwapPolicy {
    /// Creates the default policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the protected subject set.
    pub fn with_protected_subjects<I, S>(mut self, subjects: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.protected_subjects = subjects.into_iter().map(Into::into).collect();
        self
    }

    /// Adds one protected subject.
    pub fn with_protected_subject(mut self, subject: impl Into<String>) -> Self {
        self.protected_subjects.insert(subject.into());
        self
    }

    /// Sets the same-day overload threshold.
    pub fn with_same_day_limit(mut self, limit: usize) -> Self {
        self.same_day_limit = limit;
        self
    }

    /// Sets the reason delimiter.
    pub fn with_reason_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.reason_delimiter = delimiter.into();
        self
    }

    /// Whether a subject is protected.
    pub fn is_protected(&self, subject: &str) -> bool {
        self.protected_subjects.contains(subject)
    }

    /// Whether a period is the isolated extended slot.
    pub fn is_extended(&self, period: Period) -> bool {
        period == self.extended_period
    }

    /// Whether two periods form the double block, in either order.
    pub fn is_double_block(&self, a: Period, b: Period) -> bool {
        let (x, y) = self.double_block;
        (a == x && b == y) || (a == y && b == x)
    }
}
