//! Itinerary planner server.
//!
//! Sequences the stops of a travel day into a visiting order, stamps
//! arrival times and transport legs, and keeps per-stop expense ledgers.

pub mod domain;
pub mod links;
pub mod places;
pub mod planner;
pub mod web;
