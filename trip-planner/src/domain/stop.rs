//! Itinerary stops.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{Category, ClockTime, ExpenseLedger, ExpenseLine, TransportMode};

/// Stable identifier of a stop.
///
/// Ids are handed out by the owning [`Trip`](super::Trip) and never reused.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StopId(u64);

impl StopId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Debug for StopId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StopId({})", self.0)
    }
}

impl fmt::Display for StopId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The user-supplied fields of a stop about to be created.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct NewStop {
    pub title: String,
    pub place_name: String,
    pub category: Category,
    pub planned_cost: u64,
    pub time: Option<ClockTime>,
    pub note: String,
}

impl NewStop {
    /// A stop with the given title and everything else defaulted.
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// A stop titled after the place it visits.
    pub fn at_place(place: impl Into<String>) -> Self {
        let place = place.into();
        Self {
            title: place.clone(),
            place_name: place,
            ..Self::default()
        }
    }

    pub fn place(mut self, place: impl Into<String>) -> Self {
        self.place_name = place.into();
        self
    }

    pub fn category(mut self, category: Category) -> Self {
        self.category = category;
        self
    }

    pub fn cost(mut self, planned_cost: u64) -> Self {
        self.planned_cost = planned_cost;
        self
    }

    pub fn time(mut self, time: ClockTime) -> Self {
        self.time = Some(time);
        self
    }

    pub fn note(mut self, note: impl Into<String>) -> Self {
        self.note = note.into();
        self
    }
}

/// Changes to the user-set fields of an existing stop. Absent fields are
/// left alone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StopPatch {
    pub title: Option<String>,
    pub place_name: Option<String>,
    pub category: Option<Category>,
    pub planned_cost: Option<u64>,
    pub time: Option<ClockTime>,
    pub note: Option<String>,
}

/// One scheduled entry of a day.
///
/// `transport_mode` and `transport_minutes` describe the leg from this
/// stop to the next one in the day; on the last stop they carry no meaning.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stop {
    id: StopId,
    pub time: ClockTime,
    pub title: String,
    pub place_name: String,
    pub category: Category,
    pub planned_cost: u64,
    pub note: String,
    pub ledger: ExpenseLedger,
    pub transport_mode: TransportMode,
    pub transport_minutes: u32,
}

impl Stop {
    /// Leg duration a stop starts out with before any sequencing.
    pub const DEFAULT_LEG_MINUTES: u32 = 30;

    pub fn new(id: StopId, fields: NewStop) -> Self {
        Self {
            id,
            time: fields.time.unwrap_or_default(),
            title: fields.title,
            place_name: fields.place_name,
            category: fields.category,
            planned_cost: fields.planned_cost,
            note: fields.note,
            ledger: ExpenseLedger::new(),
            transport_mode: TransportMode::Unspecified,
            transport_minutes: Self::DEFAULT_LEG_MINUTES,
        }
    }

    pub fn id(&self) -> StopId {
        self.id
    }

    /// The cost shown for this stop.
    ///
    /// Itemized expenses win once there are any; until then the planned
    /// cost stands in.
    pub fn effective_cost(&self) -> u64 {
        if self.ledger.is_empty() {
            self.planned_cost
        } else {
            self.ledger.total()
        }
    }

    /// Overwrite the fields present in `patch`.
    pub fn apply(&mut self, patch: StopPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(place_name) = patch.place_name {
            self.place_name = place_name;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(planned_cost) = patch.planned_cost {
            self.planned_cost = planned_cost;
        }
        if let Some(time) = patch.time {
            self.time = time;
        }
        if let Some(note) = patch.note {
            self.note = note;
        }
    }

    /// Set the leg to the next stop by hand. The next sequencing run
    /// replaces it.
    pub fn override_leg(&mut self, mode: TransportMode, minutes: u32) {
        self.transport_mode = mode;
        self.transport_minutes = minutes;
    }

    /// Add an itemized expense. See [`ExpenseLedger::add`].
    pub fn add_expense(&mut self, name: &str, amount: u64) -> bool {
        self.ledger.add(name, amount)
    }

    /// Remove an itemized expense. See [`ExpenseLedger::remove`].
    pub fn remove_expense(&mut self, index: usize) -> Option<ExpenseLine> {
        self.ledger.remove(index)
    }
}
