//! A whole trip: its days, their stops and the id counter.

use chrono::{Days, NaiveDate};

use super::day::saturating_sum;
use super::{Day, DayBudget, DayNumber, DomainError, NewStop, Stop, StopId};

/// Exchange rate used when none is configured (home units per local unit).
pub const DEFAULT_EXCHANGE_RATE: f64 = 0.215;

/// An itinerary spanning one or more consecutive days.
///
/// The trip owns every stop and hands out their ids. Days are numbered
/// from 1 and always contiguous.
#[derive(Debug, Clone)]
pub struct Trip {
    pub title: String,
    pub start_date: NaiveDate,
    /// Home-currency units per unit of local currency.
    pub exchange_rate: f64,
    days: Vec<Day>,
    next_id: u64,
}

impl Trip {
    /// Longest trip that can be planned.
    pub const MAX_DAYS: u32 = 30;

    /// Create a trip with `day_count` empty days, clamped to `1..=MAX_DAYS`.
    pub fn new(title: impl Into<String>, start_date: NaiveDate, day_count: u32) -> Self {
        let mut trip = Self {
            title: title.into(),
            start_date,
            exchange_rate: DEFAULT_EXCHANGE_RATE,
            days: Vec::new(),
            next_id: 1,
        };
        trip.resize(day_count.clamp(1, Self::MAX_DAYS));
        trip
    }

    pub fn days(&self) -> &[Day] {
        &self.days
    }

    pub fn day_count(&self) -> u32 {
        self.days.len() as u32
    }

    /// Grow with empty days or drop trailing ones, along with their stops.
    ///
    /// Counts outside `1..=MAX_DAYS` are refused and leave the trip as it was.
    pub fn set_day_count(&mut self, count: u32) -> Result<(), DomainError> {
        if !(1..=Self::MAX_DAYS).contains(&count) {
            return Err(DomainError::InvalidDayCount(count));
        }
        self.resize(count);
        Ok(())
    }

    pub fn day(&self, day: u32) -> Result<&Day, DomainError> {
        let index = Self::index_of(day)?;
        self.days.get(index).ok_or(DomainError::DayOutOfRange(day))
    }

    pub fn day_mut(&mut self, day: u32) -> Result<&mut Day, DomainError> {
        let index = Self::index_of(day)?;
        self.days
            .get_mut(index)
            .ok_or(DomainError::DayOutOfRange(day))
    }

    /// Calendar date of a day: the start date plus `day - 1` days.
    pub fn date_of(&self, day: u32) -> Result<NaiveDate, DomainError> {
        let index = Self::index_of(day)?;
        if index >= self.days.len() {
            return Err(DomainError::DayOutOfRange(day));
        }
        self.start_date
            .checked_add_days(Days::new(index as u64))
            .ok_or(DomainError::DayOutOfRange(day))
    }

    /// Append a new stop to a day and return its fresh id.
    pub fn add_stop(&mut self, day: u32, fields: NewStop) -> Result<StopId, DomainError> {
        let id = StopId::new(self.next_id);
        self.day_mut(day)?.stops.push(Stop::new(id, fields));
        self.next_id += 1;
        Ok(id)
    }

    /// Delete a stop. Its id is not handed out again.
    pub fn remove_stop(&mut self, day: u32, id: StopId) -> Result<Stop, DomainError> {
        self.day_mut(day)?
            .remove(id)
            .ok_or(DomainError::StopNotFound(id))
    }

    pub fn stop(&self, day: u32, id: StopId) -> Result<&Stop, DomainError> {
        self.day(day)?.stop(id).ok_or(DomainError::StopNotFound(id))
    }

    pub fn stop_mut(&mut self, day: u32, id: StopId) -> Result<&mut Stop, DomainError> {
        self.day_mut(day)?
            .stop_mut(id)
            .ok_or(DomainError::StopNotFound(id))
    }

    /// Budget summed over every day.
    pub fn budget(&self) -> DayBudget {
        let budgets: Vec<DayBudget> = self.days.iter().map(Day::budget).collect();
        DayBudget::new(
            saturating_sum(budgets.iter().map(|b| b.planned)),
            saturating_sum(budgets.iter().map(|b| b.actual)),
        )
    }

    /// Change the exchange rate. Negative and non-finite rates are refused.
    pub fn set_exchange_rate(&mut self, rate: f64) -> Result<(), DomainError> {
        if !rate.is_finite() || rate < 0.0 {
            return Err(DomainError::InvalidExchangeRate(rate));
        }
        self.exchange_rate = rate;
        Ok(())
    }

    /// Convert a local-currency amount, rounding down.
    pub fn to_home_currency(&self, amount: u64) -> u64 {
        (amount as f64 * self.exchange_rate).floor().max(0.0) as u64
    }

    fn resize(&mut self, count: u32) {
        let count = count as usize;
        self.days.truncate(count);
        while self.days.len() < count {
            let n = self.days.len() as u32 + 1;
            // n >= 1 by construction
            if let Ok(number) = DayNumber::new(n) {
                self.days.push(Day::new(number));
            }
        }
    }

    fn index_of(day: u32) -> Result<usize, DomainError> {
        DayNumber::new(day)
            .map(|n| n.get() as usize - 1)
            .map_err(|_| DomainError::DayOutOfRange(day))
    }
}
