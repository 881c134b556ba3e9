//! Transport modes for the leg between consecutive stops.

use std::fmt;

use serde::{Deserialize, Serialize};

/// How a traveller gets from one stop to the next.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportMode {
    /// No estimate available, usually because a place is unknown.
    #[default]
    Unspecified,
    Walk,
    Taxi,
    /// Train or bus.
    Transit,
}

impl TransportMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransportMode::Unspecified => "unspecified",
            TransportMode::Walk => "walk",
            TransportMode::Taxi => "taxi",
            TransportMode::Transit => "transit",
        }
    }
}

impl fmt::Display for TransportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
