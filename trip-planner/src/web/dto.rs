//! Data transfer objects for web requests and responses.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::{
    Category, ClockTime, Day, DayBudget, ExpenseDraft, ExpenseLine, Stop, StopId, TransportMode,
    Trip,
};
use crate::links::{day_route_url, navigation_url, place_search_url};
use crate::places::Coordinate;

/// Request to add an itemized expense, or to stage it as a draft.
///
/// Amounts are signed so that negative input reaches the ledger and is
/// ignored there, rather than failing deserialization.
#[derive(Debug, Deserialize)]
pub struct ExpenseRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub amount: i64,
}

impl ExpenseRequest {
    /// The amount as the ledger sees it; negatives become zero.
    pub fn ledger_amount(&self) -> u64 {
        u64::try_from(self.amount).unwrap_or(0)
    }
}

/// Request to set a stop's outgoing leg by hand.
#[derive(Debug, Deserialize)]
pub struct LegOverrideRequest {
    pub mode: TransportMode,
    pub minutes: u32,
}

/// Request to change trip-wide settings. Absent fields are left alone.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct TripUpdate {
    pub title: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub days: Option<u32>,
    pub exchange_rate: Option<f64>,
}

/// Query for resolving a place name.
#[derive(Debug, Deserialize)]
pub struct ResolveQuery {
    #[serde(default)]
    pub name: String,
}

/// Query for the distance between two places.
#[derive(Debug, Deserialize)]
pub struct DistanceQuery {
    #[serde(default)]
    pub from: String,
    #[serde(default)]
    pub to: String,
}

/// A stop as shown to clients.
#[derive(Debug, Serialize)]
pub struct StopView {
    pub id: StopId,
    pub time: ClockTime,
    pub title: String,
    pub place_name: String,
    pub category: Category,
    pub planned_cost: u64,

    /// Expense total if any are recorded, else the planned cost
    pub effective_cost: u64,

    pub note: String,
    pub expenses: Vec<ExpenseLine>,
    pub draft: Option<ExpenseDraft>,

    /// Leg to the next stop; absent on the last stop of a day
    pub transport: Option<LegView>,

    /// Map search link for the place
    pub map_url: Option<String>,
}

/// The leg from a stop to its successor.
#[derive(Debug, Serialize)]
pub struct LegView {
    pub mode: TransportMode,
    pub minutes: u32,
    /// Directions to the next stop in this leg's travel mode
    pub navigation_url: Option<String>,
}

impl StopView {
    /// Build the view of a stop followed by `next`. Without a next stop the
    /// outgoing leg is meaningless and hidden.
    pub fn from_stop(stop: &Stop, next: Option<&Stop>) -> Self {
        Self {
            id: stop.id(),
            time: stop.time,
            title: stop.title.clone(),
            place_name: stop.place_name.clone(),
            category: stop.category,
            planned_cost: stop.planned_cost,
            effective_cost: stop.effective_cost(),
            note: stop.note.clone(),
            expenses: stop.ledger.lines().to_vec(),
            draft: stop.ledger.draft().cloned(),
            transport: next.map(|next| LegView {
                mode: stop.transport_mode,
                minutes: stop.transport_minutes,
                navigation_url: navigation_url(
                    &stop.place_name,
                    &next.place_name,
                    stop.transport_mode,
                ),
            }),
            map_url: place_search_url(&stop.place_name),
        }
    }

    /// View of a stop looked up within its day.
    pub fn in_day(day: &Day, id: StopId) -> Option<Self> {
        let pos = day.stops.iter().position(|s| s.id() == id)?;
        Some(Self::from_stop(&day.stops[pos], day.stops.get(pos + 1)))
    }
}

/// A day as shown to clients.
#[derive(Debug, Serialize)]
pub struct DayView {
    pub day: u32,
    pub date: Option<NaiveDate>,
    pub stops: Vec<StopView>,
    pub budget: DayBudget,
    pub effective_total: u64,
    /// `effective_total` in home currency
    pub effective_total_home: u64,
    pub route_url: Option<String>,
}

impl DayView {
    pub fn from_day(trip: &Trip, day: &Day) -> Self {
        let number = day.number().get();
        let effective_total = day.effective_total();
        Self {
            day: number,
            date: trip.date_of(number).ok(),
            stops: day
                .stops
                .iter()
                .enumerate()
                .map(|(i, s)| StopView::from_stop(s, day.stops.get(i + 1)))
                .collect(),
            budget: day.budget(),
            effective_total,
            effective_total_home: trip.to_home_currency(effective_total),
            route_url: day_route_url(&day.stops),
        }
    }
}

/// The whole trip.
#[derive(Debug, Serialize)]
pub struct TripView {
    pub title: String,
    pub start_date: NaiveDate,
    pub exchange_rate: f64,
    pub budget: DayBudget,
    pub days: Vec<DayView>,
}

impl TripView {
    pub fn from_trip(trip: &Trip) -> Self {
        Self {
            title: trip.title.clone(),
            start_date: trip.start_date,
            exchange_rate: trip.exchange_rate,
            budget: trip.budget(),
            days: trip
                .days()
                .iter()
                .map(|d| DayView::from_day(trip, d))
                .collect(),
        }
    }
}

/// Result of a ledger add or draft commit.
#[derive(Debug, Serialize)]
pub struct ExpenseResponse {
    /// Whether a line was appended (blank names and non-positive amounts are ignored)
    pub added: bool,
    pub stop: StopView,
}

/// Result of removing a ledger line.
#[derive(Debug, Serialize)]
pub struct RemoveExpenseResponse {
    /// The removed line, or `None` if the index was out of range
    pub removed: Option<ExpenseLine>,
    pub stop: StopView,
}

/// Result of clearing a stop's ledger.
#[derive(Debug, Serialize)]
pub struct ClearExpensesResponse {
    /// Number of lines removed
    pub removed: usize,
    pub stop: StopView,
}

/// Result of a place lookup.
#[derive(Debug, Serialize)]
pub struct ResolveResponse {
    pub name: String,
    pub coordinate: Option<Coordinate>,
}

/// Distance between two places.
#[derive(Debug, Serialize)]
pub struct DistanceResponse {
    pub from: String,
    pub to: String,
    pub distance: f64,
    /// False when either place is unknown and `distance` is the sentinel
    pub known: bool,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
