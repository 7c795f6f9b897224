//! Integration tests for the API server.

use std::sync::{Arc, OnceLock};

use api::config::Config;
use api::routes::AppState;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use booking_store::InMemoryBookingStore;
use domain::Room;
use metrics_exporter_prometheus::PrometheusHandle;
use tower::ServiceExt;

static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

fn get_metrics_handle() -> PrometheusHandle {
    METRICS_HANDLE
        .get_or_init(|| {
            let builder = metrics_exporter_prometheus::PrometheusBuilder::new();
            builder
                .install_recorder()
                .expect("failed to install Prometheus recorder")
        })
        .clone()
}

fn setup_with_config(config: Config) -> (axum::Router, Arc<AppState<InMemoryBookingStore>>) {
    let state = api::create_state(InMemoryBookingStore::new(), &config);
    let app = api::create_app(state.clone(), get_metrics_handle());
    (app, state)
}

fn setup() -> (axum::Router, Arc<AppState<InMemoryBookingStore>>) {
    setup_with_config(Config {
        eur_rate: 0.8,
        rooms: vec![Room::new("1.1", 2), Room::new("1.3", 4)],
        ..Config::default()
    })
}

fn booking_body(guests: u32, prepaid: bool) -> serde_json::Value {
    serde_json::json!({
        "user_id": "1",
        "date_from": "2020-01-01",
        "date_to": "2020-01-05",
        "guest_count": guests,
        "prepaid": prepaid
    })
}

fn post_json(uri: &str, body: &serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(body).unwrap()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn delete(uri: &str) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

async fn create_booking(app: &axum::Router, guests: u32, prepaid: bool) -> String {
    let response = app
        .clone()
        .oneshot(post_json("/bookings", &booking_body(guests, prepaid)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["booking_id"]
        .as_str()
        .unwrap()
        .to_string()
}

#[tokio::test]
async fn test_health_check() {
    let (app, _) = setup();

    let response = app.oneshot(get("/health")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["status"], "ok");
}

#[tokio::test]
async fn test_metrics_endpoint() {
    let (app, _) = setup();
    create_booking(&app, 2, false).await;

    let response = app.oneshot(get("/metrics")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let text = String::from_utf8(body.to_vec()).unwrap();
    assert!(text.contains("bookings_total"));
}

#[tokio::test]
async fn test_create_and_get_booking() {
    let (app, _) = setup();
    let booking_id = create_booking(&app, 2, true).await;

    let response = app
        .oneshot(get(&format!("/bookings/{booking_id}")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["booking_id"], booking_id.as_str());
    assert_eq!(json["user_id"], "1");
    assert_eq!(json["date_from"], "2020-01-01");
    assert_eq!(json["nights"], 4);
    assert_eq!(json["guest_count"], 2);
    assert_eq!(json["prepaid"], true);
    assert_eq!(json["room_id"], "1.1");
}

#[tokio::test]
async fn test_prepaid_booking_charges_the_stay() {
    let (app, state) = setup();
    create_booking(&app, 2, true).await;

    let charges = state.payment.charges().await;
    assert_eq!(charges.len(), 1);
    assert_eq!(charges[0].1.as_major(), 400.0);
}

#[tokio::test]
async fn test_cancel_booking() {
    let (app, state) = setup();
    let booking_id = create_booking(&app, 2, false).await;
    assert_eq!(
        state.orchestrator.get_available_place_count().await.unwrap(),
        4
    );

    let response = app
        .clone()
        .oneshot(delete(&format!("/bookings/{booking_id}")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert_eq!(
        state.orchestrator.get_available_place_count().await.unwrap(),
        6
    );

    let response = app
        .oneshot(get(&format!("/bookings/{booking_id}")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_cancel_unknown_booking() {
    let (app, _) = setup();

    let response = app
        .oneshot(delete("/bookings/00000000-0000-0000-0000-000000000001"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(body_json(response).await["error"].as_str().is_some());
}

#[tokio::test]
async fn test_malformed_id() {
    let (app, _) = setup();

    let response = app.oneshot(get("/bookings/not-a-uuid")).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_inverted_dates_are_bad_request() {
    let (app, _) = setup();
    let body = serde_json::json!({
        "user_id": "1",
        "date_from": "2020-01-05",
        "date_to": "2020-01-01",
        "guest_count": 2,
        "prepaid": true
    });

    let response = app.oneshot(post_json("/bookings", &body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_no_room_is_conflict() {
    let (app, _) = setup();

    let response = app
        .oneshot(post_json("/bookings", &booking_body(5, false)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_declined_payment_is_payment_required() {
    let (app, state) = setup();
    state.payment.set_decline(true).await;

    let response = app
        .oneshot(post_json("/bookings", &booking_body(2, true)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::PAYMENT_REQUIRED);
    assert_eq!(
        state.orchestrator.get_available_place_count().await.unwrap(),
        6
    );
}

#[tokio::test]
async fn test_quote() {
    let (app, _) = setup();

    let response = app
        .oneshot(post_json("/bookings/quote", &booking_body(2, false)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["price"], 400.0);
    assert_eq!(json["price_eur"], 320.0);
    assert_eq!(json["nights"], 4);
}

#[tokio::test]
async fn test_quote_without_user() {
    let (app, _) = setup();
    let body = serde_json::json!({
        "date_from": "2020-01-01",
        "date_to": "2020-01-02",
        "guest_count": 2
    });

    let response = app
        .oneshot(post_json("/bookings/quote", &body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["price"], 100.0);
}

#[tokio::test]
async fn test_available_rooms() {
    let (app, _) = setup();
    create_booking(&app, 2, false).await;

    let response = app.oneshot(get("/rooms/available")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["place_count"], 4);
    assert_eq!(
        json["rooms"],
        serde_json::json!([{ "id": "1.3", "capacity": 4 }])
    );
}

#[tokio::test]
async fn test_quote_too_expensive_is_bad_request() {
    let (app, _) = setup();
    let body = serde_json::json!({
        "date_from": "2000-01-01",
        "date_to": "5000-01-01",
        "guest_count": u32::MAX
    });

    let response = app
        .oneshot(post_json("/bookings/quote", &body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_json(response).await["error"].as_str().is_some());
}

#[tokio::test]
async fn test_place_count_saturates_on_huge_inventory() {
    let (app, _) = setup_with_config(Config {
        rooms: vec![Room::new("A", u32::MAX), Room::new("B", 4)],
        ..Config::default()
    });

    let response = app.oneshot(get("/rooms/available")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["place_count"], u32::MAX);
}
