//! Swap recommender.
//!
//! Resolves the source session, enumerates exchange partners from the
//! same class, runs each pair through the hard filters and soft checks,
//! and returns the feasible candidates.
//!
//! # Algorithm
//! 1. Source = first session (load order) of the class at the slot.
//!    Missing or protected source → empty result.
//! 2. Partners = sessions of the class taught by another teacher,
//!    grouped by teacher in order of first appearance.
//! 3. Hard filters in order; the first rejection drops the partner.
//! 4. Soft checks collect warnings on survivors.
//!
//! # Complexity
//! O(n · (f + c)) for n sessions in the class, f filters and c checks;
//! every filter and check is a hash lookup.

use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, trace};

use super::filters::{default_checks, default_filters};
use super::{
    Rejection, SoftCheck, SwapCandidate, SwapContext, SwapFilter, SwapOption, SwapWarning, Verdict,
};
use crate::models::{Period, Session, Slot, SwapPolicy, Timetable, Weekday};

/// Output ordering of candidates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CandidateOrder {
    /// Grouped by partner teacher in order of first appearance, each
    /// teacher's sessions in load order (default).
    #[default]
    Discovery,
    /// By target weekday, then period, then partner teacher name.
    BySlot,
}

/// The swap-recommendation engine.
///
/// Stateless between calls: the same snapshot and inputs always give the
/// same output. Safe to share across threads.
///
/// # Example
/// ```
/// use timetable_swap::swap::{CandidateOrder, SwapRecommender};
/// use timetable_swap::models::SwapPolicy;
///
/// let engine = SwapRecommender::new()
///     .with_policy(SwapPolicy::default().with_protected_subject("班會"))
///     .with_order(CandidateOrder::BySlot);
/// ```
#[derive(Clone)]
pub struct SwapRecommender {
    policy: SwapPolicy,
    filters: Vec<Arc<dyn SwapFilter>>,
    checks: Vec<Arc<dyn SoftCheck>>,
    order: CandidateOrder,
}

impl SwapRecommender {
    /// Creates an engine with the default policy, filters and checks.
    pub fn new() -> Self {
        Self {
            policy: SwapPolicy::default(),
            filters: default_filters(),
            checks: default_checks(),
            order: CandidateOrder::Discovery,
        }
    }

    /// Creates an engine with no filters or checks.
    pub fn empty() -> Self {
        Self {
            policy: SwapPolicy::default(),
            filters: Vec::new(),
            checks: Vec::new(),
            order: CandidateOrder::Discovery,
        }
    }

    /// Sets the policy.
    pub fn with_policy(mut self, policy: SwapPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Appends a hard filter.
    pub fn with_filter<F: SwapFilter + 'static>(mut self, filter: F) -> Self {
        self.filters.push(Arc::new(filter));
        self
    }

    /// Appends a soft check.
    pub fn with_check<C: SoftCheck + 'static>(mut self, check: C) -> Self {
        self.checks.push(Arc::new(check));
        self
    }

    /// Sets the output ordering.
    pub fn with_order(mut self, order: CandidateOrder) -> Self {
        self.order = order;
        self
    }

    /// The active policy.
    pub fn policy(&self) -> &SwapPolicy {
        &self.policy
    }

    /// Evaluates one (source, candidate) pair.
    pub fn evaluate(
        &self,
        timetable: &Timetable,
        source: &Session,
        candidate: &Session,
    ) -> Verdict {
        let context = SwapContext::new(timetable, &self.policy);
        match self.run_filters(source, candidate, &context) {
            Err(rejection) => Verdict::Rejected(rejection),
            Ok(()) => Verdict::Eligible(self.run_checks(source, candidate, &context)),
        }
    }

    fn run_filters(
        &self,
        source: &Session,
        candidate: &Session,
        context: &SwapContext<'_>,
    ) -> Result<(), Rejection> {
        for filter in &self.filters {
            if let Err(rejection) = filter.check(source, candidate, context) {
                trace!(
                    filter = filter.name(),
                    target = %candidate.slot,
                    teacher = %candidate.teacher_name,
                    "{rejection}"
                );
                return Err(rejection);
            }
        }
        Ok(())
    }

    fn run_checks(
        &self,
        source: &Session,
        candidate: &Session,
        context: &SwapContext<'_>,
    ) -> Vec<SwapWarning> {
        let mut warnings = Vec::new();
        for check in &self.checks {
            check.inspect(source, candidate, context, &mut warnings);
        }
        warnings
    }

    /// Finds every feasible exchange for the session of `class_name` at
    /// (`weekday`, `period`).
    ///
    /// Returns an empty list when the class has no session there or the
    /// session's subject is protected.
    pub fn find_swap_options(
        &self,
        timetable: &Timetable,
        class_name: &str,
        weekday: Weekday,
        period: Period,
    ) -> Vec<SwapCandidate> {
        let slot = Slot::new(weekday, period);
        let Some(source) = timetable.session_at(class_name, slot) else {
            debug!(class = class_name, %slot, "No session to swap");
            return Vec::new();
        };
        if self.policy.is_protected(&source.subject_name) {
            debug!(class = class_name, %slot, subject = %source.subject_name, "Protected subject");
            return Vec::new();
        }

        let context = SwapContext::new(timetable, &self.policy);
        let mut candidates: Vec<SwapCandidate> = partners(timetable, source)
            .into_iter()
            .filter_map(|partner| {
                self.run_filters(source, partner, &context).ok()?;
                let warnings = self.run_checks(source, partner, &context);
                Some(SwapCandidate::new(source, partner, warnings))
            })
            .collect();

        if self.order == CandidateOrder::BySlot {
            candidates.sort_by(|a, b| {
                a.target
                    .cmp(&b.target)
                    .then_with(|| a.swap_teacher.cmp(&b.swap_teacher))
            });
        }

        debug!(
            class = class_name,
            %slot,
            candidates = candidates.len(),
            recommended = candidates.iter().filter(|c| c.recommended()).count(),
            "Swap search complete"
        );
        candidates
    }

    /// Boundary form of [`find_swap_options`](Self::find_swap_options):
    /// takes raw day/period numbers and returns flat records.
    ///
    /// Out-of-range numbers give an empty list.
    pub fn find_swap_options_raw(
        &self,
        timetable: &Timetable,
        class_name: &str,
        weekday: i64,
        period: i64,
    ) -> Vec<SwapOption> {
        let Ok(slot) = Slot::from_numbers(weekday, period) else {
            debug!(class = class_name, weekday, period, "Slot outside the grid");
            return Vec::new();
        };
        self.find_swap_options(timetable, class_name, slot.weekday, slot.period)
            .iter()
            .map(|c| c.to_option(&self.policy.reason_delimiter))
            .collect()
    }
}

/// Sessions of the source's class taught by someone else, grouped by
/// teacher in order of first appearance.
fn partners<'a>(timetable: &'a Timetable, source: &Session) -> Vec<&'a Session> {
    let mut groups: Vec<Vec<&'a Session>> = Vec::new();
    let mut group_of: HashMap<&'a str, usize> = HashMap::new();

    for session in timetable.sessions_for_class(&source.class_name) {
        if session.teacher_name == source.teacher_name {
            continue;
        }
        let idx = *group_of
            .entry(session.teacher_name.as_str())
            .or_insert_with(|| {
                groups.push(Vec::new());
                groups.len() - 1
            });
        groups[idx].push(session);
    }

    groups.into_iter().flatten().collect()
}

impl Default for SwapRecommender {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SwapRecommender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SwapRecommender")
            .field(
                "filters",
                &self.filters.iter().map(|r| r.name()).collect::<Vec<_>>(),
            )
            .field(
                "checks",
                &self.checks.iter().map(|c| c.name()).collect::<Vec<_>>(),
            )
            .field("order", &self.order)
            .finish()
    }
}
