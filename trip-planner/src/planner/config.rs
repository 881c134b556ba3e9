//! Sequencer configuration.

use chrono::Duration;

use crate::domain::{ClockTime, Stop};

/// Parameters of the sequencing and leg-estimation rules.
///
/// The defaults are calibrated against the coordinate registry in
/// [`crate::places`]; the leg thresholds are in coordinate units, not
/// kilometres.
#[derive(Debug, Clone, PartialEq)]
pub struct SequencerConfig {
    /// Time stamped on the first stop of a sequenced day.
    pub anchor_time: ClockTime,

    /// Spacing between consecutive stops after sequencing (minutes).
    pub dwell_mins: i64,

    /// Leg duration when either end has no known place (minutes).
    pub unknown_leg_mins: u32,

    /// Legs shorter than this are walked.
    pub walk_threshold: f64,

    /// Legs shorter than this (and not walked) go by taxi; longer ones by transit.
    pub taxi_threshold: f64,
}

impl SequencerConfig {
    /// Returns the dwell interval as a Duration.
    pub fn dwell(&self) -> Duration {
        Duration::minutes(self.dwell_mins)
    }

    /// Arrival time of the stop at `index` in sequenced order.
    pub fn arrival_at(&self, index: usize) -> ClockTime {
        self.anchor_time + self.dwell() * index as i32
    }
}

impl Default for SequencerConfig {
    fn default() -> Self {
        Self {
            anchor_time: ClockTime::default(), // 09:00
            dwell_mins: 120,
            unknown_leg_mins: Stop::DEFAULT_LEG_MINUTES,
            walk_threshold: 0.02,
            taxi_threshold: 0.05,
        }
    }
}
