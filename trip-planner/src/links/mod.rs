//! Map links for sequenced days.
//!
//! Pure formatters: they take stops that are already in visiting order
//! and produce Google Maps URLs. Blank place names are skipped, and a
//! link that would have nothing to show is `None`.

use crate::domain::{Stop, TransportMode};

const SEARCH_BASE: &str = "https://www.google.com/maps/search/?api=1";
const DIR_BASE: &str = "https://www.google.com/maps/dir/";

/// Google Maps travel mode for a transport leg.
pub fn travel_mode(mode: TransportMode) -> &'static str {
    match mode {
        TransportMode::Walk => "walking",
        TransportMode::Taxi => "driving",
        TransportMode::Transit | TransportMode::Unspecified => "transit",
    }
}

/// Link to a map search for one place.
///
/// ```
/// use trip_planner::links::place_search_url;
///
/// assert_eq!(
///     place_search_url("Nara Park").unwrap(),
///     "https://www.google.com/maps/search/?api=1&query=Nara%20Park"
/// );
/// assert!(place_search_url("  ").is_none());
/// ```
pub fn place_search_url(place: &str) -> Option<String> {
    let place = non_blank(place)?;
    Some(format!(
        "{SEARCH_BASE}&query={}",
        urlencoding::encode(place)
    ))
}

/// Multi-stop directions through every stop with a place, in order.
pub fn day_route_url(stops: &[Stop]) -> Option<String> {
    let waypoints: Vec<String> = stops
        .iter()
        .filter_map(|s| non_blank(&s.place_name))
        .map(|p| urlencoding::encode(p).into_owned())
        .collect();
    if waypoints.is_empty() {
        return None;
    }
    Some(format!("{DIR_BASE}{}", waypoints.join("/")))
}

/// Point-to-point navigation between two places.
pub fn navigation_url(origin: &str, destination: &str, mode: TransportMode) -> Option<String> {
    let origin = non_blank(origin)?;
    let destination = non_blank(destination)?;
    Some(format!(
        "{DIR_BASE}?api=1&origin={}&destination={}&travelmode={}",
        urlencoding::encode(origin),
        urlencoding::encode(destination),
        travel_mode(mode)
    ))
}

fn non_blank(s: &str) -> Option<&str> {
    let s = s.trim();
    (!s.is_empty()).then_some(s)
}
