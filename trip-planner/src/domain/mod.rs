//! Domain types for the itinerary planner.
//!
//! This module contains the core model: stops, their expense ledgers,
//! days and the trip that owns them. Types that carry validated text
//! (times, categories, day numbers) enforce their invariants at
//! construction time.

mod category;
mod day;
mod error;
mod ledger;
mod stop;
mod time;
mod transport;
mod trip;

pub use category::{Category, InvalidCategory};
pub use day::{Day, DayBudget, DayNumber, InvalidDayNumber};
pub use error::DomainError;
pub use ledger::{ExpenseDraft, ExpenseLedger, ExpenseLine};
pub use stop::{NewStop, Stop, StopId, StopPatch};
pub use time::{ClockTime, TimeError};
pub use transport::TransportMode;
pub use trip::Trip;
