//! Place lookup used as a distance proxy.
//!
//! Stops name the place they visit in free text. This module maps those
//! names onto approximate coordinates so stops can be ranked by how far
//! apart they are. Nothing here talks to a geocoder: the registry is a
//! static table, and names missing from it simply have no coordinate.

use std::collections::HashMap;

use serde::Serialize;

/// Distance reported when either place is unknown.
///
/// Larger than any distance between two latitude/longitude pairs, so
/// stops at unknown places never look like the nearest option. Leg
/// classification treats exactly this value as "no estimate".
pub const UNKNOWN_DISTANCE: f64 = 9999.0;

/// An approximate latitude/longitude pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Straight-line distance in coordinate space.
    ///
    /// This is not a geodesic distance. It is only meaningful for ranking
    /// places within one metropolitan area.
    pub fn euclidean_distance(&self, other: &Coordinate) -> f64 {
        ((self.lat - other.lat).powi(2) + (self.lon - other.lon).powi(2)).sqrt()
    }
}

/// Resolves place names to coordinates.
///
/// This abstraction allows the sequencer to be tested with hand-built
/// coordinate tables.
pub trait PlaceResolver {
    /// Look up a place. Unknown or blank names give `None`.
    fn resolve(&self, name: &str) -> Option<Coordinate>;

    /// Distance between two named places, or [`UNKNOWN_DISTANCE`] if
    /// either cannot be resolved.
    fn distance(&self, a: &str, b: &str) -> f64 {
        match (self.resolve(a), self.resolve(b)) {
            (Some(from), Some(to)) => from.euclidean_distance(&to),
            _ => UNKNOWN_DISTANCE,
        }
    }
}

/// A static table of named places.
#[derive(Debug, Clone, Default)]
pub struct PlaceRegistry {
    places: HashMap<String, Coordinate>,
}

impl PlaceRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a place, replacing any previous coordinate under that name.
    pub fn insert(&mut self, name: &str, coordinate: Coordinate) {
        let name = name.trim();
        if !name.is_empty() {
            self.places.insert(name.to_string(), coordinate);
        }
    }

    /// Returns the number of registered names, aliases included.
    pub fn len(&self) -> usize {
        self.places.len()
    }

    pub fn is_empty(&self) -> bool {
        self.places.is_empty()
    }

    /// Registered names in alphabetical order.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.places.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl PlaceResolver for PlaceRegistry {
    fn resolve(&self, name: &str) -> Option<Coordinate> {
        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        self.places.get(name).copied()
    }
}

/// Builder for creating place registries.
#[derive(Debug, Default)]
pub struct PlaceRegistryBuilder {
    inner: PlaceRegistry,
}

impl PlaceRegistryBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a place.
    pub fn add(mut self, name: &str, lat: f64, lon: f64) -> Self {
        self.inner.insert(name, Coordinate::new(lat, lon));
        self
    }

    /// Register `alias` at the same coordinate as an already added place.
    ///
    /// Aliases of unknown places are ignored.
    pub fn alias(mut self, alias: &str, existing: &str) -> Self {
        if let Some(coordinate) = self.inner.resolve(existing) {
            self.inner.insert(alias, coordinate);
        }
        self
    }

    /// Build the registry.
    pub fn build(self) -> PlaceRegistry {
        self.inner
    }
}

/// The default registry: sights and hubs around Kyoto, Osaka and Nara.
///
/// Coordinates are rounded to two decimals, which is all the transport
/// leg thresholds are calibrated against.
pub fn kyoto_kansai() -> PlaceRegistry {
    PlaceRegistryBuilder::new()
        .add("Kyoto Station", 34.98, 135.75)
        .add("KOKO HOTEL Kyoto", 34.98, 135.76)
        .add("Kiyomizu-dera", 34.99, 135.78)
        .add("Yasaka Shrine", 35.00, 135.77)
        .add("Fushimi Inari Taisha", 34.96, 135.77)
        .add("Kinkaku-ji", 35.03, 135.72)
        .add("Arashiyama", 35.01, 135.67)
        .add("Nijo Castle", 35.01, 135.74)
        .add("Osaka Castle", 34.68, 135.52)
        .add("Universal Studios Japan", 34.66, 135.43)
        .add("Shinsaibashi", 34.67, 135.50)
        .add("Nara Park", 34.68, 135.84)
        .add("Kansai Airport", 34.43, 135.23)
        // Local names
        .alias("京都車站", "Kyoto Station")
        .alias("KOKO HOTEL 京都", "KOKO HOTEL Kyoto")
        .alias("清水寺", "Kiyomizu-dera")
        .alias("八坂神社", "Yasaka Shrine")
        .alias("伏見稻荷大社", "Fushimi Inari Taisha")
        .alias("金閣寺", "Kinkaku-ji")
        .alias("嵐山", "Arashiyama")
        .alias("二條城", "Nijo Castle")
        .alias("大阪城", "Osaka Castle")
        .alias("環球影城", "Universal Studios Japan")
        .alias("心齋橋", "Shinsaibashi")
        .alias("奈良公園", "Nara Park")
        .alias("關西機場", "Kansai Airport")
        .build()
}
