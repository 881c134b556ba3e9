//! Greedy nearest-neighbour sequencing.

use std::collections::HashSet;

use tracing::{debug, trace};

use super::config::SequencerConfig;
use super::leg::classify_leg;
use crate::domain::{Day, Stop};
use crate::places::PlaceResolver;

/// Orders and re-times the stops of a single day.
pub struct RouteSequencer<'a, R: PlaceResolver> {
    resolver: &'a R,
    config: &'a SequencerConfig,
}

impl<'a, R: PlaceResolver> RouteSequencer<'a, R> {
    /// Create a new sequencer.
    pub fn new(resolver: &'a R, config: &'a SequencerConfig) -> Self {
        Self { resolver, config }
    }

    /// Reorder a day's stops into a visiting sequence.
    ///
    /// The first stop is the anchor and always stays first. From there
    /// the nearest unvisited stop is picked repeatedly; ties go to the
    /// stop that came first in the input. Afterwards every stop is stamped
    /// with `anchor_time + index * dwell`, and every stop but the last gets
    /// the transport leg to its successor.
    ///
    /// Lists of zero or one stop come back untouched. Unknown places
    /// never fail the call; they just get `unspecified` legs.
    ///
    /// The uniform spacing does not take the computed leg minutes into
    /// account, so arrival times and travel durations are not consistent
    /// with each other.
    pub fn optimize(&self, stops: Vec<Stop>) -> Vec<Stop> {
        if stops.len() < 2 {
            return stops;
        }
        debug_assert!(
            has_unique_ids(&stops),
            "stops passed to one optimize call must have distinct ids"
        );

        let mut ordered = self.nearest_neighbour_order(stops);
        self.stamp_times(&mut ordered);
        let travel_mins = self.assign_legs(&mut ordered);

        debug!(stops = ordered.len(), travel_mins, "Sequenced day");

        ordered
    }

    /// Sequence a day's stops in place.
    pub fn optimize_day(&self, day: &mut Day) {
        let stops = std::mem::take(&mut day.stops);
        day.stops = self.optimize(stops);
    }

    fn nearest_neighbour_order(&self, stops: Vec<Stop>) -> Vec<Stop> {
        let mut remaining = stops.into_iter();
        let Some(anchor) = remaining.next() else {
            return Vec::new();
        };
        // Options keep the input order so ties resolve to the earliest stop
        let mut remaining: Vec<Option<Stop>> = remaining.map(Some).collect();
        let mut visited = Vec::with_capacity(remaining.len() + 1);
        visited.push(anchor);

        loop {
            let Some(current) = visited.last() else {
                break;
            };
            let nearest = remaining
                .iter()
                .enumerate()
                .filter_map(|(i, slot)| slot.as_ref().map(|stop| (i, stop)))
                .map(|(i, stop)| {
                    (
                        i,
                        self.resolver.distance(&current.place_name, &stop.place_name),
                    )
                })
                // min_by returns the first of equal minima
                .min_by(|(_, a), (_, b)| a.total_cmp(b));

            let Some((index, distance)) = nearest else {
                break;
            };
            let Some(next) = remaining[index].take() else {
                break;
            };
            trace!(
                from = %current.place_name,
                to = %next.place_name,
                distance,
                "Picked nearest stop"
            );
            visited.push(next);
        }

        visited
    }

    fn stamp_times(&self, stops: &mut [Stop]) {
        for (i, stop) in stops.iter_mut().enumerate() {
            stop.time = self.config.arrival_at(i);
        }
    }

    /// Returns the total estimated travel minutes.
    fn assign_legs(&self, stops: &mut [Stop]) -> u32 {
        let mut total = 0;
        for i in 0..stops.len().saturating_sub(1) {
            let distance = self
                .resolver
                .distance(&stops[i].place_name, &stops[i + 1].place_name);
            let leg = classify_leg(distance, self.config);
            stops[i].transport_mode = leg.mode;
            stops[i].transport_minutes = leg.minutes;
            total += leg.minutes;
        }
        total
    }
}

fn has_unique_ids(stops: &[Stop]) -> bool {
    let mut seen = HashSet::with_capacity(stops.len());
    stops.iter().all(|s| seen.insert(s.id()))
}
