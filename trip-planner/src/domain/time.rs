//! Wall-clock times for itinerary stops.
//!
//! Stops carry a plain "HH:MM" time of day with no date attached. The
//! day a stop belongs to is implied by the [`Day`](super::Day) holding it,
//! so arithmetic on these times wraps around midnight.

use std::fmt;
use std::ops::Add;

use chrono::{Duration, NaiveTime, Timelike};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Error returned when parsing an invalid time string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid time: {reason}")]
pub struct TimeError {
    reason: &'static str,
}

impl TimeError {
    fn new(reason: &'static str) -> Self {
        Self { reason }
    }
}

/// A time of day with minute precision.
///
/// # Examples
///
/// ```
/// use trip_planner::domain::ClockTime;
///
/// let t = ClockTime::parse_hhmm("14:30").unwrap();
/// assert_eq!(t.to_string(), "14:30");
///
/// assert!(ClockTime::parse_hhmm("1430").is_err());
/// assert!(ClockTime::parse_hhmm("24:00").is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClockTime(NaiveTime);

impl ClockTime {
    /// Create a time from hour and minute, if both are in range.
    pub fn from_hm(hour: u32, minute: u32) -> Option<Self> {
        NaiveTime::from_hms_opt(hour, minute, 0).map(Self)
    }

    /// Parse a time from "HH:MM" format. Both fields are exactly two digits.
    pub fn parse_hhmm(s: &str) -> Result<Self, TimeError> {
        let (hour, minute) = s
            .split_once(':')
            .ok_or_else(|| TimeError::new("expected HH:MM format"))?;

        let hour = two_digit_field(hour).ok_or_else(|| TimeError::new("invalid hour digits"))?;
        let minute =
            two_digit_field(minute).ok_or_else(|| TimeError::new("invalid minute digits"))?;

        match (hour, minute) {
            (24.., _) => Err(TimeError::new("hour must be 0-23")),
            (_, 60..) => Err(TimeError::new("minute must be 0-59")),
            _ => Self::from_hm(hour, minute).ok_or_else(|| TimeError::new("invalid time")),
        }
    }

    /// Returns the hour (0-23).
    pub fn hour(&self) -> u32 {
        self.0.hour()
    }

    /// Returns the minute (0-59).
    pub fn minute(&self) -> u32 {
        self.0.minute()
    }

    /// Minutes elapsed since midnight.
    pub fn minutes_since_midnight(&self) -> u32 {
        self.hour() * 60 + self.minute()
    }

    /// Add a duration, wrapping past midnight.
    ///
    /// ```
    /// use chrono::Duration;
    /// use trip_planner::domain::ClockTime;
    ///
    /// let late = ClockTime::parse_hhmm("23:00").unwrap();
    /// assert_eq!(late.wrapping_add(Duration::hours(2)).to_string(), "01:00");
    /// ```
    pub fn wrapping_add(&self, duration: Duration) -> Self {
        let (time, _) = self.0.overflowing_add_signed(duration);
        Self(time)
    }
}

impl Default for ClockTime {
    /// 09:00, the time new stops start at.
    fn default() -> Self {
        Self(NaiveTime::from_hms_opt(9, 0, 0).unwrap_or_default())
    }
}

impl Add<Duration> for ClockTime {
    type Output = Self;

    fn add(self, rhs: Duration) -> Self::Output {
        self.wrapping_add(rhs)
    }
}

impl std::str::FromStr for ClockTime {
    type Err = TimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_hhmm(s)
    }
}

impl fmt::Debug for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ClockTime({:02}:{:02})", self.hour(), self.minute())
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl Serialize for ClockTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ClockTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse_hhmm(&s).map_err(serde::de::Error::custom)
    }
}

fn two_digit_field(field: &str) -> Option<u32> {
    if field.len() == 2 && field.bytes().all(|b| b.is_ascii_digit()) {
        field.parse().ok()
    } else {
        None
    }
}
