//! Server configuration from the environment.

use std::net::SocketAddr;

use chrono::NaiveDate;
use tracing::warn;

use crate::domain::Trip;

/// Settings for the server binary.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    /// Address to listen on (`TRIP_PLANNER_ADDR`).
    pub addr: SocketAddr,

    /// Title of the initial trip (`TRIP_PLANNER_TITLE`).
    pub title: String,

    /// Number of days in the initial trip (`TRIP_PLANNER_DAYS`).
    pub days: u32,

    /// First day of the trip, `YYYY-MM-DD` (`TRIP_PLANNER_START`).
    pub start_date: NaiveDate,
}

impl ServerConfig {
    /// Read the configuration from environment variables.
    ///
    /// Unset variables use the defaults; unparseable ones are logged and
    /// also fall back to the defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read the configuration through an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let addr = parse_or(&lookup, "TRIP_PLANNER_ADDR", defaults.addr, |s| s.parse().ok());
        let days = parse_or(&lookup, "TRIP_PLANNER_DAYS", defaults.days, |s| {
            s.parse::<u32>()
                .ok()
                .filter(|d| (1..=Trip::MAX_DAYS).contains(d))
        });
        let start_date = parse_or(&lookup, "TRIP_PLANNER_START", defaults.start_date, |s| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
        });
        let title = lookup("TRIP_PLANNER_TITLE")
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .unwrap_or(defaults.title);

        Self {
            addr,
            title,
            days,
            start_date,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            title: "Kansai Trip".to_string(),
            days: 5,
            start_date: NaiveDate::from_ymd_opt(2026, 1, 17).unwrap_or_default(),
        }
    }
}

fn parse_or<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
    parse: impl FnOnce(&str) -> Option<T>,
) -> T {
    let Some(raw) = lookup(key) else {
        return default;
    };
    match parse(raw.trim()) {
        Some(value) => value,
        None => {
            warn!(key, value = %raw, "Ignoring invalid setting");
            default
        }
    }
}
