//! Built-in swap filters and soft checks.
//!
//! # Hard filters (default order)
//!
//! 1. [`ProtectedSubject`]: neither side may be a protected subject
//! 2. [`ExtendedPeriodIsolation`]: period 8 only trades with period 8
//! 3. [`DistinctSlot`]: no swapping a slot with itself
//! 4. [`TeacherAvailability`]: both teachers must be free where they move
//!
//! # Soft checks
//!
//! - [`SameDayOverload`]: a teacher would see the class 3+ times that day
//! - [`DoublePeriodBlock`]: the swap touches the 4th/5th double block of a
//!   teacher already heavy with the class that day

use std::sync::Arc;

use super::{Rejection, SoftCheck, SwapContext, SwapFilter, SwapWarning};
use crate::models::Session;

/// The default hard filters, in evaluation order.
pub fn default_filters() -> Vec<Arc<dyn SwapFilter>> {
    vec![
        Arc::new(ProtectedSubject),
        Arc::new(ExtendedPeriodIsolation),
        Arc::new(DistinctSlot),
        Arc::new(TeacherAvailability),
    ]
}

/// The default soft checks, in evaluation order.
pub fn default_checks() -> Vec<Arc<dyn SoftCheck>> {
    vec![Arc::new(SameDayOverload), Arc::new(DoublePeriodBlock)]
}

// ======================== Hard filters ========================

/// Rejects when either side's subject is protected by policy.
#[derive(Debug, Clone, Copy)]
pub struct ProtectedSubject;

impl SwapFilter for ProtectedSubject {
    fn name(&self) -> &'static str {
        "protected-subject"
    }

    fn check(
        &self,
        source: &Session,
        candidate: &Session,
        context: &SwapContext<'_>,
    ) -> Result<(), Rejection> {
        match [source, candidate]
            .into_iter()
            .find(|s| context.policy.is_protected(&s.subject_name))
        {
            Some(s) => Err(Rejection::ProtectedSubject {
                subject: s.subject_name.clone(),
            }),
            None => Ok(()),
        }
    }

    fn description(&self) -> &'static str {
        "Protected subjects are never swapped"
    }
}

/// Rejects when exactly one side is in the extended period.
#[derive(Debug, Clone, Copy)]
pub struct ExtendedPeriodIsolation;

impl SwapFilter for ExtendedPeriodIsolation {
    fn name(&self) -> &'static str {
        "extended-period-isolation"
    }

    fn check(
        &self,
        source: &Session,
        candidate: &Session,
        context: &SwapContext<'_>,
    ) -> Result<(), Rejection> {
        let policy = context.policy;
        if policy.is_extended(source.period()) != policy.is_extended(candidate.period()) {
            Err(Rejection::ExtendedPeriodMismatch)
        } else {
            Ok(())
        }
    }

    fn description(&self) -> &'static str {
        "Extended period swaps only with extended period"
    }
}

/// Rejects a candidate sitting in the source slot.
#[derive(Debug, Clone, Copy)]
pub struct DistinctSlot;

impl SwapFilter for DistinctSlot {
    fn name(&self) -> &'static str {
        "distinct-slot"
    }

    fn check(
        &self,
        source: &Session,
        candidate: &Session,
        _context: &SwapContext<'_>,
    ) -> Result<(), Rejection> {
        if source.slot == candidate.slot {
            Err(Rejection::SameSlot)
        } else {
            Ok(())
        }
    }

    fn description(&self) -> &'static str {
        "Candidate must be in a different slot"
    }
}

/// Requires the source teacher to be free at the candidate slot and the
/// candidate teacher to be free at the source slot, across all classes.
#[derive(Debug, Clone, Copy)]
pub struct TeacherAvailability;

impl SwapFilter for TeacherAvailability {
    fn name(&self) -> &'static str {
        "teacher-availability"
    }

    fn check(
        &self,
        source: &Session,
        candidate: &Session,
        context: &SwapContext<'_>,
    ) -> Result<(), Rejection> {
        let timetable = context.timetable;
        for (teacher, slot) in [
            (&source.teacher_name, candidate.slot),
            (&candidate.teacher_name, source.slot),
        ] {
            if timetable.teacher_is_busy(teacher, slot) {
                return Err(Rejection::TeacherBusy {
                    teacher: teacher.clone(),
                    slot,
                });
            }
        }
        Ok(())
    }

    fn description(&self) -> &'static str {
        "Both teachers must be free in their new slots"
    }
}

// ======================== Soft checks ========================

/// Warns when a teacher moving into a day already meets the class there
/// `same_day_limit` or more times.
///
/// Checked in both directions: the source teacher on the candidate's day
/// and the candidate teacher on the source day. Counts are pre-swap.
#[derive(Debug, Clone, Copy)]
pub struct SameDayOverload;

impl SoftCheck for SameDayOverload {
    fn name(&self) -> &'static str {
        "same-day-overload"
    }

    fn inspect(
        &self,
        source: &Session,
        candidate: &Session,
        context: &SwapContext<'_>,
        warnings: &mut Vec<SwapWarning>,
    ) {
        let class_name = &source.class_name;
        for (teacher, weekday) in [
            (&source.teacher_name, candidate.weekday()),
            (&candidate.teacher_name, source.weekday()),
        ] {
            let sessions = context.timetable.teaching_load(teacher, class_name, weekday);
            if sessions >= context.policy.same_day_limit {
                warnings.push(SwapWarning::SameDayOverload {
                    teacher: teacher.clone(),
                    weekday,
                    sessions,
                });
            }
        }
    }

    fn description(&self) -> &'static str {
        "Same teacher teaching the same class 3+ times a day"
    }
}

/// Warns when the swap pairs the two double-block periods and the source
/// teacher has more than one session with the class on the source day.
#[derive(Debug, Clone, Copy)]
pub struct DoublePeriodBlock;

impl SoftCheck for DoublePeriodBlock {
    fn name(&self) -> &'static str {
        "double-period-block"
    }

    fn inspect(
        &self,
        source: &Session,
        candidate: &Session,
        context: &SwapContext<'_>,
        warnings: &mut Vec<SwapWarning>,
    ) {
        if !context
            .policy
            .is_double_block(source.period(), candidate.period())
        {
            return;
        }
        let load = context.timetable.teaching_load(
            &source.teacher_name,
            &source.class_name,
            source.weekday(),
        );
        if load > 1 {
            warnings.push(SwapWarning::BackToBackBlock {
                teacher: source.teacher_name.clone(),
                weekday: source.weekday(),
            });
        }
    }

    fn description(&self) -> &'static str {
        "Back-to-back 4th/5th period block with the same class"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Slot, SwapPolicy, Timetable, Weekday};

    fn session(class: &str, teacher: &str, subject: &str, day: i64, period: i64) -> Session {
        Session::new(class, teacher, subject, Slot::from_numbers(day, period).unwrap())
    }

    fn run_filter(
        filter: &dyn SwapFilter,
        timetable: &Timetable,
        a: &Session,
        b: &Session,
    ) -> Result<(), Rejection> {
        let policy = SwapPolicy::default();
        filter.check(a, b, &SwapContext::new(timetable, &policy))
    }

    fn run_check(
        check: &dyn SoftCheck,
        timetable: &Timetable,
        a: &Session,
        b: &Session,
    ) -> Vec<SwapWarning> {
        let policy = SwapPolicy::default();
        let mut warnings = Vec::new();
        check.inspect(a, b, &SwapContext::new(timetable, &policy), &mut warnings);
        warnings
    }

    #[test]
    fn test_protected_subject_either_side() {
        let t = Timetable::default();
        let math = session("A1", "Wang", "Math", 1, 1);
        let group = session("A1", "Lee", "團體活動時間", 2, 3);

        assert!(run_filter(&ProtectedSubject, &t, &math, &math).is_ok());
        assert_eq!(
            run_filter(&ProtectedSubject, &t, &math, &group),
            Err(Rejection::ProtectedSubject {
                subject: "團體活動時間".into()
            })
        );
        assert!(run_filter(&ProtectedSubject, &t, &group, &math).is_err());
    }

    #[test]
    fn test_extended_period_isolation() {
        let t = Timetable::default();
        let p8 = session("A1", "Wang", "Math", 1, 8);
        let p7 = session("A1", "Lee", "English", 2, 7);
        let other_p8 = session("A1", "Lee", "English", 3, 8);

        assert_eq!(
            run_filter(&ExtendedPeriodIsolation, &t, &p8, &p7),
            Err(Rejection::ExtendedPeriodMismatch)
        );
        assert_eq!(
            run_filter(&ExtendedPeriodIsolation, &t, &p7, &p8),
            Err(Rejection::ExtendedPeriodMismatch)
        );
        assert!(run_filter(&ExtendedPeriodIsolation, &t, &p8, &other_p8).is_ok());
        let regular = session("A1", "X", "Y", 1, 1);
        assert!(run_filter(&ExtendedPeriodIsolation, &t, &p7, &regular).is_ok());
    }

    #[test]
    fn test_distinct_slot() {
        let t = Timetable::default();
        let a = session("A1", "Wang", "Math", 1, 1);
        let co = session("A1", "Lee", "English", 1, 1);
        let b = session("A1", "Lee", "English", 1, 2);

        assert_eq!(run_filter(&DistinctSlot, &t, &a, &co), Err(Rejection::SameSlot));
        assert!(run_filter(&DistinctSlot, &t, &a, &b).is_ok());
    }

    #[test]
    fn test_teacher_availability_both_directions() {
        let a = session("A1", "Wang", "Math", 1, 1);
        let b = session("A1", "Lee", "English", 2, 3);

        let free = Timetable::from_sessions(vec![a.clone(), b.clone()]);
        assert!(run_filter(&TeacherAvailability, &free, &a, &b).is_ok());

        // Wang teaches B2 at Tue P3
        let wang_busy = Timetable::from_sessions(vec![
            a.clone(),
            b.clone(),
            session("B2", "Wang", "Math", 2, 3),
        ]);
        assert_eq!(
            run_filter(&TeacherAvailability, &wang_busy, &a, &b),
            Err(Rejection::TeacherBusy {
                teacher: "Wang".into(),
                slot: b.slot,
            })
        );

        // Lee teaches C3 at Mon P1
        let lee_busy = Timetable::from_sessions(vec![
            a.clone(),
            b.clone(),
            session("C3", "Lee", "English", 1, 1),
        ]);
        assert_eq!(
            run_filter(&TeacherAvailability, &lee_busy, &a, &b),
            Err(Rejection::TeacherBusy {
                teacher: "Lee".into(),
                slot: a.slot,
            })
        );
    }

    #[test]
    fn test_same_day_overload_incoming_teacher() {
        let a = session("A1", "Wang", "Math", 1, 1);
        let b = session("A1", "Lee", "English", 2, 3);
        let t = Timetable::from_sessions(vec![
            a.clone(),
            b.clone(),
            session("A1", "Lee", "English", 1, 2),
            session("A1", "Lee", "English", 1, 4),
        ]);

        let warnings = run_check(&SameDayOverload, &t, &a, &b);
        assert_eq!(
            warnings,
            vec![SwapWarning::SameDayOverload {
                teacher: "Lee".into(),
                weekday: Weekday::Monday,
                sessions: 2,
            }]
        );
    }

    #[test]
    fn test_same_day_overload_both_directions() {
        let a = session("A1", "Wang", "Math", 1, 1);
        let b = session("A1", "Lee", "English", 2, 3);
        let t = Timetable::from_sessions(vec![
            a.clone(),
            b.clone(),
            session("A1", "Lee", "English", 1, 2),
            session("A1", "Lee", "English", 1, 4),
            session("A1", "Wang", "Math", 2, 1),
            session("A1", "Wang", "Math", 2, 2),
        ]);

        let warnings = run_check(&SameDayOverload, &t, &a, &b);
        assert_eq!(warnings.len(), 2);
        assert!(matches!(
            &warnings[0],
            SwapWarning::SameDayOverload {
                teacher,
                weekday: Weekday::Tuesday,
                ..
            } if teacher == "Wang"
        ));
    }

    #[test]
    fn test_same_day_overload_under_limit() {
        let a = session("A1", "Wang", "Math", 1, 1);
        let b = session("A1", "Lee", "English", 2, 3);
        let t = Timetable::from_sessions(vec![
            a.clone(),
            b.clone(),
            session("A1", "Lee", "English", 1, 2),
        ]);
        assert!(run_check(&SameDayOverload, &t, &a, &b).is_empty());
    }

    #[test]
    fn test_double_period_block() {
        let a = session("A1", "Wang", "Math", 1, 4);
        let b = session("A1", "Lee", "English", 3, 5);

        let light = Timetable::from_sessions(vec![a.clone(), b.clone()]);
        assert!(run_check(&DoublePeriodBlock, &light, &a, &b).is_empty());

        let heavy = Timetable::from_sessions(vec![
            a.clone(),
            b.clone(),
            session("A1", "Wang", "Math", 1, 5),
        ]);
        assert_eq!(
            run_check(&DoublePeriodBlock, &heavy, &a, &b),
            vec![SwapWarning::BackToBackBlock {
                teacher: "Wang".into(),
                weekday: Weekday::Monday,
            }]
        );

        // Not the 4/5 pair
        let c = session("A1", "Lee", "English", 3, 6);
        assert!(run_check(&DoublePeriodBlock, &heavy, &a, &c).is_empty());
    }

    #[test]
    fn test_default_pipelines() {
        let names: Vec<_> = default_filters().iter().map(|f| f.name()).collect();
        assert_eq!(
            names,
            vec![
                "protected-subject",
                "extended-period-isolation",
                "distinct-slot",
                "teacher-availability",
            ]
        );
        assert_eq!(default_checks().len(), 2);
    }
}
