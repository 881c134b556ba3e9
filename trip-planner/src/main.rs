use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use trip_planner::domain::{Category, NewStop, Trip};
use trip_planner::places::kyoto_kansai;
use trip_planner::planner::SequencerConfig;
use trip_planner::web::{AppState, ServerConfig, create_router};

#[tokio::main]
async fn main() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("trip_planner=info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = ServerConfig::from_env();

    // Seed the trip with a first day to sequence
    let mut trip = Trip::new(&config.title, config.start_date, config.days);
    let first_day = [
        NewStop::at_place("Kyoto Station")
            .category(Category::Transit)
            .note("Buy a one-day pass"),
        NewStop::at_place("Kinkaku-ji")
            .category(Category::Sight)
            .cost(400),
        NewStop::at_place("Kiyomizu-dera")
            .category(Category::Sight)
            .cost(400),
        NewStop::at_place("Yasaka Shrine").category(Category::Sight),
    ];
    for stop in first_day {
        if let Err(e) = trip.add_stop(1, stop) {
            error!(error = %e, "Failed to seed trip");
        }
    }

    let places = kyoto_kansai();
    info!(places = places.len(), days = trip.day_count(), "Loaded trip");

    let state = AppState::new(trip, places, SequencerConfig::default());
    let app = create_router(state);

    let listener = match tokio::net::TcpListener::bind(config.addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!(addr = %config.addr, error = %e, "Failed to bind");
            std::process::exit(1);
        }
    };

    info!("Itinerary planner listening on http://{}", config.addr);
    info!("  GET    /trip                                  - Whole trip");
    info!("  PATCH  /trip                                  - Title, days, exchange rate");
    info!("  GET    /days/:day                             - One day");
    info!("  POST   /days/:day/optimize                    - Sequence a day");
    info!("  PATCH  /days/:day/stops/:id                   - Edit a stop");
    info!("  POST   /days/:day/stops/:id/expenses          - Record an expense");

    if let Err(e) = axum::serve(listener, app).await {
        error!(error = %e, "Server error");
        std::process::exit(1);
    }
}
