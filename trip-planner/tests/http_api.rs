use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use chrono::NaiveDate;
use serde_json::{Value, json};
use tower::ServiceExt;

use trip_planner::domain::{NewStop, Trip};
use trip_planner::places::kyoto_kansai;
use trip_planner::planner::SequencerConfig;
use trip_planner::web::{AppState, create_router};

fn app_with(trip: Trip) -> Router {
    create_router(AppState::new(
        trip,
        kyoto_kansai(),
        SequencerConfig::default(),
    ))
}

fn kyoto_trip() -> Trip {
    let mut trip = Trip::new(
        "Kansai",
        NaiveDate::from_ymd_opt(2026, 1, 17).unwrap(),
        2,
    );
    for place in ["Kyoto Station", "Kinkaku-ji", "Kiyomizu-dera", "Yasaka Shrine"] {
        trip.add_stop(1, NewStop::at_place(place)).unwrap();
    }
    trip
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };
    (status, value)
}

fn places(day: &Value) -> Vec<String> {
    day["stops"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["place_name"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn health() {
    let app = app_with(kyoto_trip());
    let (status, body) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::String("ok".into()));
}

#[tokio::test]
async fn optimize_reorders_kyoto_day() {
    let app = app_with(kyoto_trip());

    let (status, day) = send(&app, "POST", "/days/1/optimize", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        places(&day),
        ["Kyoto Station", "Yasaka Shrine", "Kiyomizu-dera", "Kinkaku-ji"]
    );

    let stops = day["stops"].as_array().unwrap();
    assert_eq!(stops[0]["time"], "09:00");
    assert_eq!(stops[3]["time"], "15:00");
    let legs: Vec<(&str, u64)> = stops[..3]
        .iter()
        .map(|s| {
            let leg = &s["transport"];
            (leg["mode"].as_str().unwrap(), leg["minutes"].as_u64().unwrap())
        })
        .collect();
    assert_eq!(legs, [("taxi", 27), ("walk", 19), ("transit", 73)]);
    assert_eq!(stops[3]["transport"], Value::Null);
    assert_eq!(
        stops[1]["transport"]["navigation_url"],
        "https://www.google.com/maps/dir/?api=1&origin=Yasaka%20Shrine\
         &destination=Kiyomizu-dera&travelmode=walking"
    );

    // The stored day reflects the new order
    let (_, stored) = send(&app, "GET", "/days/1", None).await;
    assert_eq!(places(&stored), places(&day));
}

#[tokio::test]
async fn optimize_empty_day() {
    let app = app_with(kyoto_trip());
    let (status, day) = send(&app, "POST", "/days/2/optimize", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(day["stops"].as_array().unwrap().is_empty());
    assert_eq!(day["route_url"], Value::Null);
}

#[tokio::test]
async fn unknown_day_is_not_found() {
    let app = app_with(kyoto_trip());

    let (status, body) = send(&app, "POST", "/days/9/optimize", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "day 9 is not part of this trip");

    let (status, _) = send(&app, "GET", "/days/0", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn add_and_remove_stop() {
    let app = app_with(kyoto_trip());

    let (status, stop) = send(
        &app,
        "POST",
        "/days/2/stops",
        Some(json!({"title": "Deer park", "place_name": "Nara Park", "category": "sight", "planned_cost": 200})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(stop["time"], "09:00");
    assert_eq!(stop["effective_cost"], 200);
    assert_eq!(stop["category"], "sight");
    let id = stop["id"].as_u64().unwrap();

    let (status, removed) = send(&app, "DELETE", &format!("/days/2/stops/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(removed["title"], "Deer park");

    let (status, body) = send(&app, "DELETE", &format!("/days/2/stops/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], format!("stop {id} not found"));
}

#[tokio::test]
async fn expenses_drive_effective_cost() {
    let mut trip = kyoto_trip();
    let id = trip
        .add_stop(2, NewStop::at_place("Nara Park").cost(200))
        .unwrap()
        .get();
    let app = app_with(trip);
    let expenses = format!("/days/2/stops/{id}/expenses");

    let (_, resp) = send(&app, "POST", &expenses, Some(json!({"name": "Ticket", "amount": 600}))).await;
    assert_eq!(resp["added"], true);
    assert_eq!(resp["stop"]["effective_cost"], 600);

    let (_, resp) = send(&app, "POST", &expenses, Some(json!({"name": "Crackers", "amount": 200}))).await;
    assert_eq!(resp["stop"]["effective_cost"], 800);

    // Rejected input leaves the ledger alone
    for bad in [
        json!({"name": "", "amount": 100}),
        json!({"name": "Tea", "amount": 0}),
        json!({"name": "Refund", "amount": -300}),
    ] {
        let (status, resp) = send(&app, "POST", &expenses, Some(bad)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(resp["added"], false);
        assert_eq!(resp["stop"]["effective_cost"], 800);
    }

    let (_, resp) = send(&app, "DELETE", &format!("{expenses}/0"), None).await;
    assert_eq!(resp["removed"]["name"], "Ticket");
    assert_eq!(resp["stop"]["effective_cost"], 200);

    let (status, resp) = send(&app, "DELETE", &format!("{expenses}/5"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(resp["removed"], Value::Null);

    // Removing the last line falls back to the planned cost
    let (_, resp) = send(&app, "DELETE", &format!("{expenses}/0"), None).await;
    assert_eq!(resp["stop"]["effective_cost"], 200);
    assert!(resp["stop"]["expenses"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn draft_commit_clears_draft() {
    let mut trip = kyoto_trip();
    let id = trip.add_stop(2, NewStop::titled("Dinner")).unwrap().get();
    let app = app_with(trip);
    let base = format!("/days/2/stops/{id}");

    let (status, stop) = send(
        &app,
        "PUT",
        &format!("{base}/draft"),
        Some(json!({"name": "Okonomiyaki", "amount": 1800})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stop["draft"], json!({"name": "Okonomiyaki", "amount": 1800}));

    let (_, resp) = send(&app, "POST", &format!("{base}/draft/commit"), None).await;
    assert_eq!(resp["added"], true);
    assert_eq!(resp["stop"]["draft"], Value::Null);
    assert_eq!(resp["stop"]["effective_cost"], 1800);

    // Nothing staged any more
    let (_, resp) = send(&app, "POST", &format!("{base}/draft/commit"), None).await;
    assert_eq!(resp["added"], false);
    assert_eq!(resp["stop"]["effective_cost"], 1800);
}

#[tokio::test]
async fn expense_on_stop_from_other_day_is_not_found() {
    let app = app_with(kyoto_trip());
    // Stop 1 lives on day 1
    let (status, _) = send(
        &app,
        "POST",
        "/days/2/stops/1/expenses",
        Some(json!({"name": "Tea", "amount": 300})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn trip_summary() {
    let app = app_with(kyoto_trip());
    let (status, trip) = send(&app, "GET", "/trip", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(trip["title"], "Kansai");
    assert_eq!(trip["start_date"], "2026-01-17");
    assert_eq!(trip["days"].as_array().unwrap().len(), 2);
    assert_eq!(trip["days"][1]["date"], "2026-01-18");
    assert_eq!(
        trip["days"][0]["route_url"],
        "https://www.google.com/maps/dir/Kyoto%20Station/Kinkaku-ji/Kiyomizu-dera/Yasaka%20Shrine"
    );
}

#[tokio::test]
async fn place_lookups() {
    let app = app_with(kyoto_trip());

    let (_, resp) = send(&app, "GET", "/places/resolve?name=Nara%20Park", None).await;
    assert_eq!(resp["coordinate"], json!({"lat": 34.68, "lon": 135.84}));

    let (_, resp) = send(&app, "GET", "/places/resolve?name=Atlantis", None).await;
    assert_eq!(resp["coordinate"], Value::Null);

    let (_, resp) = send(
        &app,
        "GET",
        "/places/distance?from=Yasaka%20Shrine&to=Kiyomizu-dera",
        None,
    )
    .await;
    assert_eq!(resp["known"], true);
    let d = resp["distance"].as_f64().unwrap();
    assert!((d - 0.01414).abs() < 1e-4);

    let (_, resp) = send(&app, "GET", "/places/distance?from=Yasaka%20Shrine&to=", None).await;
    assert_eq!(resp["known"], false);
    assert_eq!(resp["distance"], 9999.0);
}

#[tokio::test]
async fn oversized_expenses_are_refused() {
    let mut trip = kyoto_trip();
    let id = trip.add_stop(2, NewStop::titled("Hotel")).unwrap().get();
    let app = app_with(trip);
    let expenses = format!("/days/2/stops/{id}/expenses");

    for _ in 0..2 {
        let (_, resp) = send(&app, "POST", &expenses, Some(json!({"name": "a", "amount": i64::MAX}))).await;
        assert_eq!(resp["added"], true);
    }

    let (status, resp) = send(&app, "POST", &expenses, Some(json!({"name": "a", "amount": 2}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(resp["added"], false);
    assert_eq!(resp["stop"]["effective_cost"], u64::MAX - 1);

    // The day and trip still render
    let (status, day) = send(&app, "GET", "/days/2", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(day["budget"]["actual"], u64::MAX - 1);
    assert_eq!(day["budget"]["remaining"], i64::MIN);

    let (status, trip) = send(&app, "GET", "/trip", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(trip["budget"]["actual"], u64::MAX - 1);
}

#[tokio::test]
async fn stop_categories_accept_short_codes() {
    let app = app_with(kyoto_trip());

    for (input, expected) in [("stay", "lodging"), ("Sight", "sight"), ("TRANS", "transit")] {
        let (status, stop) = send(
            &app,
            "POST",
            "/days/2/stops",
            Some(json!({"title": "x", "category": input})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(stop["category"], expected);
    }
}

#[tokio::test]
async fn malformed_requests_get_json_errors() {
    let app = app_with(kyoto_trip());

    let (status, body) = send(
        &app,
        "POST",
        "/days/2/stops",
        Some(json!({"title": "x", "category": "museum"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("unknown category"));

    let (status, body) = send(&app, "GET", "/days/abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().starts_with("Invalid path"));

    let (status, body) = send(
        &app,
        "POST",
        "/days/1/stops/1/expenses",
        Some(json!({"name": "Tea", "amount": "lots"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().starts_with("Invalid JSON"));

    // No content type at all
    let (status, body) = send(&app, "POST", "/days/1/stops", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn edit_stop_fields() {
    let app = app_with(kyoto_trip());

    let (status, stop) = send(
        &app,
        "PATCH",
        "/days/1/stops/2",
        Some(json!({"title": "Golden Pavilion", "note": "Closes at 17:00", "planned_cost": 500})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stop["title"], "Golden Pavilion");
    assert_eq!(stop["note"], "Closes at 17:00");
    assert_eq!(stop["effective_cost"], 500);
    assert_eq!(stop["place_name"], "Kinkaku-ji");

    let (status, body) = send(&app, "PATCH", "/days/2/stops/2", Some(json!({"title": "x"}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "stop 2 not found");

    let (status, _) = send(&app, "PATCH", "/days/1/stops/2", Some(json!({"time": "9am"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn leg_override_survives_until_next_optimize() {
    let app = app_with(kyoto_trip());

    let (status, stop) = send(
        &app,
        "PUT",
        "/days/1/stops/1/leg",
        Some(json!({"mode": "walk", "minutes": 45})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stop["transport"]["mode"], "walk");
    assert_eq!(stop["transport"]["minutes"], 45);

    let (_, day) = send(&app, "GET", "/days/1", None).await;
    assert_eq!(day["stops"][0]["transport"]["minutes"], 45);

    let (_, day) = send(&app, "POST", "/days/1/optimize", None).await;
    assert_eq!(day["stops"][0]["transport"]["mode"], "taxi");
    assert_eq!(day["stops"][0]["transport"]["minutes"], 27);

    let (status, _) = send(
        &app,
        "PUT",
        "/days/1/stops/1/leg",
        Some(json!({"mode": "rocket", "minutes": 1})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn clear_expenses_falls_back_to_planned() {
    let mut trip = kyoto_trip();
    let id = trip
        .add_stop(2, NewStop::at_place("Nara Park").cost(200))
        .unwrap()
        .get();
    let app = app_with(trip);
    let expenses = format!("/days/2/stops/{id}/expenses");

    send(&app, "POST", &expenses, Some(json!({"name": "Ticket", "amount": 600}))).await;
    send(&app, "POST", &expenses, Some(json!({"name": "Crackers", "amount": 200}))).await;

    let (status, resp) = send(&app, "DELETE", &expenses, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(resp["removed"], 2);
    assert_eq!(resp["stop"]["effective_cost"], 200);
    assert!(resp["stop"]["expenses"].as_array().unwrap().is_empty());

    let (_, resp) = send(&app, "DELETE", &expenses, None).await;
    assert_eq!(resp["removed"], 0);
}

#[tokio::test]
async fn sort_day_by_time() {
    let app = app_with(kyoto_trip());
    send(&app, "PATCH", "/days/1/stops/1", Some(json!({"time": "18:00"}))).await;
    send(&app, "PATCH", "/days/1/stops/3", Some(json!({"time": "08:30"}))).await;

    let (status, day) = send(&app, "POST", "/days/1/sort", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        places(&day),
        ["Kiyomizu-dera", "Kinkaku-ji", "Yasaka Shrine", "Kyoto Station"]
    );

    let (status, _) = send(&app, "POST", "/days/7/sort", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn update_trip_settings() {
    let app = app_with(kyoto_trip());

    let (status, trip) = send(
        &app,
        "PATCH",
        "/trip",
        Some(json!({"title": "Kansai in winter", "days": 4, "exchange_rate": 0.2})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(trip["title"], "Kansai in winter");
    assert_eq!(trip["exchange_rate"], 0.2);
    assert_eq!(trip["days"].as_array().unwrap().len(), 4);

    // A bad value leaves every setting untouched
    let (status, body) = send(
        &app,
        "PATCH",
        "/trip",
        Some(json!({"title": "Shorter", "days": 0})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "a trip must last between 1 and 30 days, not 0");

    let (status, _) = send(&app, "PATCH", "/trip", Some(json!({"exchange_rate": -1.0}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, trip) = send(&app, "GET", "/trip", None).await;
    assert_eq!(trip["title"], "Kansai in winter");
    assert_eq!(trip["days"].as_array().unwrap().len(), 4);
    assert_eq!(trip["exchange_rate"], 0.2);

    // Shrinking drops trailing days
    let (_, trip) = send(&app, "PATCH", "/trip", Some(json!({"days": 1}))).await;
    assert_eq!(trip["days"].as_array().unwrap().len(), 1);
    let (status, _) = send(&app, "GET", "/days/2", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
