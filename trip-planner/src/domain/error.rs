//! Domain error types.
//!
//! Lookups into a trip can miss and trip settings can be refused; the
//! sequencing and ledger operations themselves never fail.

use super::StopId;

/// Errors from locating days and stops within a trip.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DomainError {
    /// The trip has no such day
    #[error("day {0} is not part of this trip")]
    DayOutOfRange(u32),

    /// The day has no stop with this id
    #[error("stop {0} not found")]
    StopNotFound(StopId),

    /// A trip lasts between 1 and 30 days
    #[error("a trip must last between 1 and 30 days, not {0}")]
    InvalidDayCount(u32),

    /// Exchange rates must be finite and not negative
    #[error("invalid exchange rate {0}")]
    InvalidExchangeRate(f64),
}
