//! Transport leg estimation from coordinate distance.

use serde::Serialize;

use super::SequencerConfig;
use crate::domain::TransportMode;
use crate::places::UNKNOWN_DISTANCE;

/// Estimated travel between two consecutive stops.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TransportLeg {
    pub mode: TransportMode,
    pub minutes: u32,
}

/// Per-mode travel estimate: minutes = round(distance * rate) + overhead.
struct Rate {
    per_unit: f64,
    overhead: u32,
}

const WALK: Rate = Rate {
    per_unit: 1000.0,
    overhead: 5,
};
const TAXI: Rate = Rate {
    per_unit: 600.0,
    overhead: 10,
};
const TRANSIT: Rate = Rate {
    per_unit: 800.0,
    overhead: 15,
};

impl Rate {
    fn minutes(&self, distance: f64) -> u32 {
        ((distance * self.per_unit).round() as u32).saturating_add(self.overhead)
    }
}

/// Classify a leg by its distance.
///
/// # Examples
///
/// ```
/// use trip_planner::domain::TransportMode;
/// use trip_planner::planner::{SequencerConfig, classify_leg};
///
/// let config = SequencerConfig::default();
///
/// let leg = classify_leg(0.01, &config);
/// assert_eq!(leg.mode, TransportMode::Walk);
/// assert_eq!(leg.minutes, 15);
///
/// let leg = classify_leg(trip_planner::places::UNKNOWN_DISTANCE, &config);
/// assert_eq!(leg.mode, TransportMode::Unspecified);
/// assert_eq!(leg.minutes, 30);
/// ```
pub fn classify_leg(distance: f64, config: &SequencerConfig) -> TransportLeg {
    if !distance.is_finite() || distance == UNKNOWN_DISTANCE {
        return TransportLeg {
            mode: TransportMode::Unspecified,
            minutes: config.unknown_leg_mins,
        };
    }

    let (mode, rate) = if distance < config.walk_threshold {
        (TransportMode::Walk, &WALK)
    } else if distance < config.taxi_threshold {
        (TransportMode::Taxi, &TAXI)
    } else {
        (TransportMode::Transit, &TRANSIT)
    };

    TransportLeg {
        mode,
        minutes: rate.minutes(distance),
    }
}
