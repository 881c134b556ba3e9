//! Web layer for the itinerary planner.
//!
//! Provides JSON endpoints over a single in-memory trip: editing stops,
//! recording expenses, sequencing days and looking up places.

mod config;
mod dto;
mod routes;
mod state;

pub use config::ServerConfig;
pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
