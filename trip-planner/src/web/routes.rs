//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post, put},
};
use tracing::{info, warn};

use crate::domain::{DomainError, NewStop, StopId, StopPatch, Trip};
use crate::places::{PlaceResolver, UNKNOWN_DISTANCE};
use crate::planner::RouteSequencer;

use super::dto::*;
use super::state::AppState;

type DayPath = Result<Path<u32>, PathRejection>;
type StopPath = Result<Path<(u32, u64)>, PathRejection>;
type JsonBody<T> = Result<Json<T>, JsonRejection>;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/trip", get(get_trip).patch(update_trip))
        .route("/days/:day", get(get_day))
        .route("/days/:day/optimize", post(optimize_day))
        .route("/days/:day/sort", post(sort_day))
        .route("/days/:day/stops", post(add_stop))
        .route(
            "/days/:day/stops/:id",
            delete(remove_stop).patch(update_stop),
        )
        .route("/days/:day/stops/:id/leg", put(override_leg))
        .route(
            "/days/:day/stops/:id/expenses",
            post(add_expense).delete(clear_expenses),
        )
        .route(
            "/days/:day/stops/:id/expenses/:index",
            delete(remove_expense),
        )
        .route("/days/:day/stops/:id/draft", put(stage_draft))
        .route("/days/:day/stops/:id/draft/commit", post(commit_draft))
        .route("/places/resolve", get(resolve_place))
        .route("/places/distance", get(place_distance))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// The whole trip.
async fn get_trip(State(state): State<AppState>) -> Json<TripView> {
    let trip = state.trip.lock().await;
    Json(TripView::from_trip(&trip))
}

/// Change the title, start date, length or exchange rate of the trip.
///
/// Either every field is applied or, on a bad value, none is.
async fn update_trip(
    State(state): State<AppState>,
    update: JsonBody<TripUpdate>,
) -> Result<Json<TripView>, AppError> {
    let Json(update) = update?;
    let mut trip = state.trip.lock().await;

    let mut updated = trip.clone();
    if let Some(title) = update.title {
        let title = title.trim();
        if title.is_empty() {
            return Err(AppError::BadRequest {
                message: "trip title must not be blank".to_string(),
            });
        }
        updated.title = title.to_string();
    }
    if let Some(start_date) = update.start_date {
        updated.start_date = start_date;
    }
    if let Some(days) = update.days {
        updated.set_day_count(days)?;
    }
    if let Some(rate) = update.exchange_rate {
        updated.set_exchange_rate(rate)?;
    }
    *trip = updated;

    info!(days = trip.day_count(), rate = trip.exchange_rate, "Updated trip");
    Ok(Json(TripView::from_trip(&trip)))
}

/// One day of the trip.
async fn get_day(State(state): State<AppState>, day: DayPath) -> Result<Json<DayView>, AppError> {
    let Path(day) = day?;
    let trip = state.trip.lock().await;
    let view = DayView::from_day(&trip, trip.day(day)?);
    Ok(Json(view))
}

/// Sequence a day's stops, re-stamping times and legs.
async fn optimize_day(
    State(state): State<AppState>,
    day: DayPath,
) -> Result<Json<DayView>, AppError> {
    let Path(day) = day?;
    let mut trip = state.trip.lock().await;
    let sequencer = RouteSequencer::new(state.places.as_ref(), state.config.as_ref());
    sequencer.optimize_day(trip.day_mut(day)?);

    info!(day, stops = trip.day(day)?.len(), "Optimized day");
    Ok(Json(DayView::from_day(&trip, trip.day(day)?)))
}

/// Put a day's stops in time order.
async fn sort_day(State(state): State<AppState>, day: DayPath) -> Result<Json<DayView>, AppError> {
    let Path(day) = day?;
    let mut trip = state.trip.lock().await;
    trip.day_mut(day)?.sort_by_time();
    Ok(Json(DayView::from_day(&trip, trip.day(day)?)))
}

/// Append a stop to a day.
async fn add_stop(
    State(state): State<AppState>,
    day: DayPath,
    fields: JsonBody<NewStop>,
) -> Result<impl IntoResponse, AppError> {
    let Path(day) = day?;
    let Json(fields) = fields?;
    let mut trip = state.trip.lock().await;
    let id = trip.add_stop(day, fields)?;
    let view = stop_view(&trip, day, id)?;
    Ok((StatusCode::CREATED, Json(view)))
}

/// Edit the user-set fields of a stop.
async fn update_stop(
    State(state): State<AppState>,
    path: StopPath,
    patch: JsonBody<StopPatch>,
) -> Result<Json<StopView>, AppError> {
    let Path((day, id)) = path?;
    let Json(patch) = patch?;
    let mut trip = state.trip.lock().await;
    let id = StopId::new(id);
    trip.stop_mut(day, id)?.apply(patch);
    Ok(Json(stop_view(&trip, day, id)?))
}

/// Delete a stop.
async fn remove_stop(
    State(state): State<AppState>,
    path: StopPath,
) -> Result<Json<StopView>, AppError> {
    let Path((day, id)) = path?;
    let mut trip = state.trip.lock().await;
    let removed = trip.remove_stop(day, StopId::new(id))?;
    Ok(Json(StopView::from_stop(&removed, None)))
}

/// Set the leg from a stop to the next one by hand.
async fn override_leg(
    State(state): State<AppState>,
    path: StopPath,
    req: JsonBody<LegOverrideRequest>,
) -> Result<Json<StopView>, AppError> {
    let Path((day, id)) = path?;
    let Json(req) = req?;
    let mut trip = state.trip.lock().await;
    let id = StopId::new(id);
    trip.stop_mut(day, id)?.override_leg(req.mode, req.minutes);
    Ok(Json(stop_view(&trip, day, id)?))
}

/// Add an itemized expense to a stop.
async fn add_expense(
    State(state): State<AppState>,
    path: StopPath,
    req: JsonBody<ExpenseRequest>,
) -> Result<Json<ExpenseResponse>, AppError> {
    let Path((day, id)) = path?;
    let Json(req) = req?;
    let mut trip = state.trip.lock().await;
    let id = StopId::new(id);
    let added = trip
        .stop_mut(day, id)?
        .add_expense(&req.name, req.ledger_amount());
    Ok(Json(ExpenseResponse {
        added,
        stop: stop_view(&trip, day, id)?,
    }))
}

/// Drop every itemized expense of a stop.
async fn clear_expenses(
    State(state): State<AppState>,
    path: StopPath,
) -> Result<Json<ClearExpensesResponse>, AppError> {
    let Path((day, id)) = path?;
    let mut trip = state.trip.lock().await;
    let id = StopId::new(id);
    let removed = trip.stop_mut(day, id)?.ledger.clear();
    Ok(Json(ClearExpensesResponse {
        removed,
        stop: stop_view(&trip, day, id)?,
    }))
}

/// Remove an itemized expense by position.
async fn remove_expense(
    State(state): State<AppState>,
    path: Result<Path<(u32, u64, usize)>, PathRejection>,
) -> Result<Json<RemoveExpenseResponse>, AppError> {
    let Path((day, id, index)) = path?;
    let mut trip = state.trip.lock().await;
    let id = StopId::new(id);
    let removed = trip.stop_mut(day, id)?.remove_expense(index);
    Ok(Json(RemoveExpenseResponse {
        removed,
        stop: stop_view(&trip, day, id)?,
    }))
}

/// Stage the draft expense of a stop.
async fn stage_draft(
    State(state): State<AppState>,
    path: StopPath,
    req: JsonBody<ExpenseRequest>,
) -> Result<Json<StopView>, AppError> {
    let Path((day, id)) = path?;
    let Json(req) = req?;
    let mut trip = state.trip.lock().await;
    let id = StopId::new(id);
    trip.stop_mut(day, id)?
        .ledger
        .stage(req.name.clone(), req.ledger_amount());
    Ok(Json(stop_view(&trip, day, id)?))
}

/// Commit the staged draft expense of a stop.
async fn commit_draft(
    State(state): State<AppState>,
    path: StopPath,
) -> Result<Json<ExpenseResponse>, AppError> {
    let Path((day, id)) = path?;
    let mut trip = state.trip.lock().await;
    let id = StopId::new(id);
    let added = trip.stop_mut(day, id)?.ledger.commit_draft();
    Ok(Json(ExpenseResponse {
        added,
        stop: stop_view(&trip, day, id)?,
    }))
}

/// Look up a place's coordinate.
async fn resolve_place(
    State(state): State<AppState>,
    query: Result<Query<ResolveQuery>, QueryRejection>,
) -> Result<Json<ResolveResponse>, AppError> {
    let Query(query) = query?;
    let coordinate = state.places.resolve(&query.name);
    Ok(Json(ResolveResponse {
        name: query.name,
        coordinate,
    }))
}

/// Distance between two places.
async fn place_distance(
    State(state): State<AppState>,
    query: Result<Query<DistanceQuery>, QueryRejection>,
) -> Result<Json<DistanceResponse>, AppError> {
    let Query(query) = query?;
    let distance = state.places.distance(&query.from, &query.to);
    Ok(Json(DistanceResponse {
        from: query.from,
        to: query.to,
        distance,
        known: distance != UNKNOWN_DISTANCE,
    }))
}

fn stop_view(trip: &Trip, day: u32, id: StopId) -> Result<StopView, AppError> {
    StopView::in_day(trip.day(day)?, id).ok_or_else(|| DomainError::StopNotFound(id).into())
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
}

impl From<DomainError> for AppError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::DayOutOfRange(_) | DomainError::StopNotFound(_) => AppError::NotFound {
                message: e.to_string(),
            },
            DomainError::InvalidDayCount(_) | DomainError::InvalidExchangeRate(_) => {
                AppError::BadRequest {
                    message: e.to_string(),
                }
            }
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest {
            message: format!("Invalid JSON: {}", rejection.body_text()),
        }
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::BadRequest {
            message: format!("Invalid path: {}", rejection.body_text()),
        }
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::BadRequest {
            message: format!("Invalid query: {}", rejection.body_text()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
        };

        warn!(%status, %message, "Request failed");

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
