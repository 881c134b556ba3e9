//! Days of a trip.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{Stop, StopId};

/// Error returned for a day number of zero.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("day numbers start at 1")]
pub struct InvalidDayNumber;

/// A 1-based day number within a trip.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct DayNumber(u32);

impl DayNumber {
    pub fn new(n: u32) -> Result<Self, InvalidDayNumber> {
        if n == 0 {
            Err(InvalidDayNumber)
        } else {
            Ok(Self(n))
        }
    }

    pub fn get(&self) -> u32 {
        self.0
    }
}

impl TryFrom<u32> for DayNumber {
    type Error = InvalidDayNumber;

    fn try_from(n: u32) -> Result<Self, Self::Error> {
        Self::new(n)
    }
}

impl From<DayNumber> for u32 {
    fn from(day: DayNumber) -> Self {
        day.0
    }
}

impl fmt::Debug for DayNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Day {}", self.0)
    }
}

impl fmt::Display for DayNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Planned versus actual spend for one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DayBudget {
    /// Sum of planned costs.
    pub planned: u64,
    /// Sum of itemized expenses.
    pub actual: u64,
    /// `planned - actual`; negative when over budget.
    pub remaining: i64,
}

impl DayBudget {
    /// Build a budget, clamping `remaining` to the range of `i64`.
    pub fn new(planned: u64, actual: u64) -> Self {
        let remaining = if planned >= actual {
            i64::try_from(planned - actual).unwrap_or(i64::MAX)
        } else {
            i64::try_from(actual - planned).map_or(i64::MIN, |over| -over)
        };
        Self {
            planned,
            actual,
            remaining,
        }
    }
}

/// The ordered stops of one day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Day {
    number: DayNumber,
    pub stops: Vec<Stop>,
}

impl Day {
    pub fn new(number: DayNumber) -> Self {
        Self {
            number,
            stops: Vec::new(),
        }
    }

    pub fn number(&self) -> DayNumber {
        self.number
    }

    pub fn len(&self) -> usize {
        self.stops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    pub fn stop(&self, id: StopId) -> Option<&Stop> {
        self.stops.iter().find(|s| s.id() == id)
    }

    pub fn stop_mut(&mut self, id: StopId) -> Option<&mut Stop> {
        self.stops.iter_mut().find(|s| s.id() == id)
    }

    pub fn contains(&self, id: StopId) -> bool {
        self.stop(id).is_some()
    }

    /// Remove a stop by id, returning it.
    pub fn remove(&mut self, id: StopId) -> Option<Stop> {
        let pos = self.stops.iter().position(|s| s.id() == id)?;
        Some(self.stops.remove(pos))
    }

    /// Stable sort by time of day. Stops sharing a time keep their order.
    pub fn sort_by_time(&mut self) {
        self.stops.sort_by_key(|s| s.time);
    }

    /// Sum of effective costs over all stops, saturating at `u64::MAX`.
    pub fn effective_total(&self) -> u64 {
        saturating_sum(self.stops.iter().map(Stop::effective_cost))
    }

    pub fn budget(&self) -> DayBudget {
        DayBudget::new(
            saturating_sum(self.stops.iter().map(|s| s.planned_cost)),
            saturating_sum(self.stops.iter().map(|s| s.ledger.total())),
        )
    }
}

pub(super) fn saturating_sum(amounts: impl Iterator<Item = u64>) -> u64 {
    amounts.fold(0, u64::saturating_add)
}
