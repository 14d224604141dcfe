//! Swap recommendation.
//!
//! Given one scheduled session, finds every other session of the same
//! class that could trade time slots with it. A swap moves the source
//! teacher into the candidate's slot and the candidate's teacher into the
//! source slot; both keep teaching the same class.
//!
//! Evaluation is two-tier:
//! - **Hard filters** ([`SwapFilter`]) exclude a candidate outright.
//!   Applied in order, short-circuiting on the first rejection.
//! - **Soft checks** ([`SoftCheck`]) attach [`SwapWarning`]s. A candidate
//!   with warnings is still returned, flagged as not recommended.
//!
//! # Usage
//!
//! ```
//! use timetable_swap::models::{Period, Session, Slot, Timetable, Weekday};
//! use timetable_swap::swap::SwapRecommender;
//!
//! let slot = |d, p| Slot::from_numbers(d, p).unwrap();
//! let timetable = Timetable::from_sessions(vec![
//!     Session::new("A1", "Wang", "Math", slot(1, 1)),
//!     Session::new("A1", "Lee", "English", slot(2, 3)),
//! ]);
//!
//! let engine = SwapRecommender::new();
//! let period = Period::new(1).unwrap();
//! let options = engine.find_swap_options(&timetable, "A1", Weekday::Monday, period);
//! assert_eq!(options.len(), 1);
//! assert!(options[0].recommended());
//! ```

mod candidate;
mod context;
mod engine;
pub mod filters;

pub use candidate::{Rejection, SwapCandidate, SwapOption, SwapWarning, Verdict};
pub use context::SwapContext;
pub use engine::{CandidateOrder, SwapRecommender};

use crate::models::Session;
use std::fmt::Debug;

/// A hard eligibility rule between a source session and a candidate.
///
/// `source` is the session being vacated; `candidate` is the other side
/// of the exchange (same class, different teacher).
pub trait SwapFilter: Send + Sync + Debug {
    /// Filter name (e.g., "protected-subject").
    fn name(&self) -> &'static str;

    /// Passes, or rejects with the reason.
    fn check(
        &self,
        source: &Session,
        candidate: &Session,
        context: &SwapContext<'_>,
    ) -> Result<(), Rejection>;

    /// Filter description.
    fn description(&self) -> &'static str {
        self.name()
    }
}

/// An advisory rule. Never excludes a candidate.
pub trait SoftCheck: Send + Sync + Debug {
    /// Check name (e.g., "same-day-overload").
    fn name(&self) -> &'static str;

    /// Appends any warnings this check raises for the pair.
    fn inspect(
        &self,
        source: &Session,
        candidate: &Session,
        context: &SwapContext<'_>,
        warnings: &mut Vec<SwapWarning>,
    );

    /// Check description.
    fn description(&self) -> &'static str {
        self.name()
    }
}
