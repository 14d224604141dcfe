//! Swap outcomes: rejections, warnings, candidates and the boundary record.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::{Session, Slot, Weekday};

/// Why a hard filter excluded a candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "code", rename_all = "snake_case")]
pub enum Rejection {
    /// One side's subject is never swapped.
    ProtectedSubject { subject: String },
    /// Exactly one side sits in the extended period.
    ExtendedPeriodMismatch,
    /// Candidate occupies the source slot itself.
    SameSlot,
    /// A teacher already teaches at the slot they would move into.
    TeacherBusy { teacher: String, slot: Slot },
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::ProtectedSubject { subject } => {
                write!(f, "subject '{subject}' is protected from swapping")
            }
            Rejection::ExtendedPeriodMismatch => {
                f.write_str("extended period can only swap with another extended period")
            }
            Rejection::SameSlot => f.write_str("candidate is in the source slot"),
            Rejection::TeacherBusy { teacher, slot } => {
                write!(f, "{teacher} already teaches at {slot}")
            }
        }
    }
}

/// Advisory finding attached to an eligible candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "code", rename_all = "snake_case")]
pub enum SwapWarning {
    /// After the swap, `teacher` would meet the class 3+ times on `weekday`.
    SameDayOverload {
        teacher: String,
        weekday: Weekday,
        /// Pre-swap sessions with the class that day.
        sessions: usize,
    },
    /// `teacher` already has several sessions with the class on `weekday`
    /// and the swap touches the midday double block.
    BackToBackBlock { teacher: String, weekday: Weekday },
}

impl SwapWarning {
    /// Display text used at the output boundary.
    pub fn message(&self) -> &'static str {
        match self {
            SwapWarning::SameDayOverload { .. } => {
                "same teacher teaching the same class 3+ times that day"
            }
            SwapWarning::BackToBackBlock { .. } => {
                "teacher has a back-to-back 4th/5th period block with this class that day"
            }
        }
    }
}

impl fmt::Display for SwapWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Outcome of evaluating one (source, candidate) pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// A hard filter excluded the pair.
    Rejected(Rejection),
    /// The pair is feasible, with zero or more warnings.
    Eligible(Vec<SwapWarning>),
}

impl Verdict {
    pub fn is_eligible(&self) -> bool {
        matches!(self, Verdict::Eligible(_))
    }
}

/// A feasible exchange partner for the source session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SwapCandidate {
    /// Slot being vacated.
    pub source: Slot,
    /// Slot the source teacher would move into.
    pub target: Slot,
    /// Teacher on the other side of the exchange.
    pub swap_teacher: String,
    /// Subject on the other side of the exchange.
    pub swap_subject: String,
    /// Soft-check findings. Empty = recommended.
    pub warnings: Vec<SwapWarning>,
}

impl SwapCandidate {
    pub(crate) fn new(source: &Session, candidate: &Session, warnings: Vec<SwapWarning>) -> Self {
        Self {
            source: source.slot,
            target: candidate.slot,
            swap_teacher: candidate.teacher_name.clone(),
            swap_subject: candidate.subject_name.clone(),
            warnings,
        }
    }

    /// Whether no soft check raised a warning.
    pub fn recommended(&self) -> bool {
        self.warnings.is_empty()
    }

    /// Warning messages joined by `delimiter`; empty when recommended.
    pub fn reason(&self, delimiter: &str) -> String {
        self.warnings
            .iter()
            .map(SwapWarning::message)
            .collect::<Vec<_>>()
            .join(delimiter)
    }

    /// Renders the boundary record.
    pub fn to_option(&self, delimiter: &str) -> SwapOption {
        SwapOption {
            day: self.target.weekday.number(),
            period: self.target.period.number(),
            original_period: self.source.period.number(),
            recommended: self.recommended(),
            reason: self.reason(delimiter),
            swap_teacher: self.swap_teacher.clone(),
            swap_subject: self.swap_subject.clone(),
        }
    }
}

/// Flat record handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapOption {
    pub day: u8,
    pub period: u8,
    pub original_period: u8,
    pub recommended: bool,
    pub reason: String,
    pub swap_teacher: String,
    pub swap_subject: String,
}
