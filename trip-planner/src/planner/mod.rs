//! Route sequencing for a single day.
//!
//! This module implements the core itinerary algorithm: given the stops
//! of one day, visit them in greedy nearest-neighbour order starting
//! from the day's first stop, estimate the transport leg between each
//! consecutive pair, and re-stamp arrival times from a fixed anchor.

mod config;
mod leg;
mod sequence;

pub use config::SequencerConfig;
pub use leg::{TransportLeg, classify_leg};
pub use sequence::RouteSequencer;
