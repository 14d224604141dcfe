//! Weekly grid coordinates.
//!
//! The grid is five school days by eight periods. Values are validated
//! once, when a row is loaded, so nothing downstream re-parses them.
//!
//! Period 8 is the extended/elective slot. It only trades places with
//! another period-8 slot.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::SlotError;

/// School day, Monday (1) through Friday (5).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
}

impl Weekday {
    /// All school days in order.
    pub const ALL: [Weekday; 5] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
    ];

    /// Builds a weekday from its 1-based number.
    pub fn from_number(n: i64) -> Result<Self, SlotError> {
        match n {
            1 => Ok(Weekday::Monday),
            2 => Ok(Weekday::Tuesday),
            3 => Ok(Weekday::Wednesday),
            4 => Ok(Weekday::Thursday),
            5 => Ok(Weekday::Friday),
            other => Err(SlotError::InvalidWeekday(other)),
        }
    }

    /// 1-based day number.
    #[inline]
    pub fn number(self) -> u8 {
        self as u8 + 1
    }
}

impl TryFrom<i64> for Weekday {
    type Error = SlotError;

    fn try_from(n: i64) -> Result<Self, Self::Error> {
        Self::from_number(n)
    }
}

impl From<Weekday> for i64 {
    fn from(day: Weekday) -> Self {
        i64::from(day.number())
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Weekday::Monday => "Mon",
            Weekday::Tuesday => "Tue",
            Weekday::Wednesday => "Wed",
            Weekday::Thursday => "Thu",
            Weekday::Friday => "Fri",
        };
        f.write_str(name)
    }
}

/// Teaching period, 1 through 8.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct Period(pub(crate) u8);

impl Period {
    /// Number of periods in a school day.
    pub const COUNT: u8 = 8;
    /// The extended/elective period.
    pub const EXTENDED: Period = Period(8);

    /// Builds a period from its 1-based number.
    pub fn new(n: i64) -> Result<Self, SlotError> {
        if (1..=i64::from(Self::COUNT)).contains(&n) {
            Ok(Period(n as u8))
        } else {
            Err(SlotError::InvalidPeriod(n))
        }
    }

    /// 1-based period number.
    #[inline]
    pub fn number(self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for Period {
    type Error = SlotError;

    fn try_from(n: i64) -> Result<Self, Self::Error> {
        Self::new(n)
    }
}

impl From<Period> for i64 {
    fn from(period: Period) -> Self {
        i64::from(period.0)
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}", self.0)
    }
}

/// A cell of the weekly grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Slot {
    pub weekday: Weekday,
    pub period: Period,
}

impl Slot {
    /// Creates a slot.
    pub fn new(weekday: Weekday, period: Period) -> Self {
        Self { weekday, period }
    }

    /// Creates a slot from raw day and period numbers.
    pub fn from_numbers(weekday: i64, period: i64) -> Result<Self, SlotError> {
        Ok(Self {
            weekday: Weekday::from_number(weekday)?,
            period: Period::new(period)?,
        })
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.weekday, self.period)
    }
}
