//! HTTP API integration tests.
//!
//! Drives the full router (extractors, handlers, error mapping, middleware)
//! against an in-memory store seeded with the sample data.

#![allow(clippy::expect_used, clippy::unwrap_used)] // Integration tests can use expect for setup

use axum::http::StatusCode;
use axum_test::TestServer;
use campus_events_core::CampusEvents;
use campus_events_testing::{UnavailableStorage, memory_storage, seeded_storage};
use campus_events_web::{AppState, CORRELATION_ID_HEADER, build_router};
use serde_json::{Value, json};
use std::sync::Arc;

async fn seeded_server() -> TestServer {
    let storage = seeded_storage().await.expect("sample data loads");
    let state = AppState::new(Arc::new(CampusEvents::new(storage)));
    TestServer::new(build_router(state)).expect("test server starts")
}

fn titles(body: &Value) -> Vec<String> {
    body.as_array()
        .expect("array body")
        .iter()
        .map(|e| e["title"].as_str().unwrap().to_string())
        .collect()
}

fn chess_night(capacity: i64) -> Value {
    json!({
        "title": "Chess Night",
        "description": "Casual games, all levels welcome",
        "date": "2023-12-01",
        "startTime": "19:00",
        "endTime": "22:00",
        "location": "Library",
        "capacity": capacity,
        "category": "social",
        "organizerId": 1
    })
}

#[tokio::test]
async fn test_health_check() {
    let server = seeded_server().await;

    let response = server.get("/health").await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["status"], "ok");
    assert!(response.headers().contains_key(CORRELATION_ID_HEADER));
}

#[tokio::test]
async fn test_list_events_is_chronological() {
    let server = seeded_server().await;

    let response = server.get("/api/events").await;

    response.assert_status_ok();
    let body = response.json::<Value>();
    assert_eq!(
        titles(&body),
        [
            "Annual Tech Symposium",
            "Campus Spring Festival",
            "Fall Career Fair",
            "Research Symposium",
            "Intramural Basketball",
            "Leadership Workshop",
        ]
    );
    assert_eq!(body[0]["startTime"], "09:00");
    assert_eq!(body[0]["date"], "2023-11-15");
    assert_eq!(body[0]["organizerId"], 1);
}

#[tokio::test]
async fn test_category_and_search() {
    let server = seeded_server().await;

    let academic = server.get("/api/events/category/academic").await.json::<Value>();
    assert_eq!(titles(&academic), ["Annual Tech Symposium", "Research Symposium"]);

    let unknown = server.get("/api/events/category/Academic").await;
    unknown.assert_status_ok();
    assert!(titles(&unknown.json::<Value>()).is_empty());

    let career = server.get("/api/events/search/career").await.json::<Value>();
    assert_eq!(titles(&career), ["Fall Career Fair"]);
}

#[tokio::test]
async fn test_get_event_includes_registration_count() {
    let server = seeded_server().await;

    let response = server.get("/api/events/1").await;
    response.assert_status_ok();
    let body = response.json::<Value>();
    assert_eq!(body["title"], "Annual Tech Symposium");
    assert_eq!(body["registrationCount"], 1);

    let count = server.get("/api/events/2/registrations/count").await;
    assert_eq!(count.json::<Value>(), json!({ "count": 0 }));
}

#[tokio::test]
async fn test_get_event_errors() {
    let server = seeded_server().await;

    let missing = server.get("/api/events/99").await;
    missing.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(
        missing.json::<Value>(),
        json!({ "code": "NOT_FOUND", "message": "Event not found" })
    );

    let bad_id = server.get("/api/events/abc").await;
    bad_id.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(bad_id.json::<Value>()["message"], "Invalid event ID");
}

#[tokio::test]
async fn test_create_event() {
    let server = seeded_server().await;

    let response = server.post("/api/events").json(&chess_night(40)).await;

    response.assert_status(StatusCode::CREATED);
    let body = response.json::<Value>();
    assert_eq!(body["id"], 7);
    assert_eq!(body["capacity"], 40);
    assert!(body["imageUrl"].is_null());
    assert!(body["createdAt"].is_string());
}

#[tokio::test]
async fn test_create_event_validation() {
    let server = seeded_server().await;

    let mut zero_capacity = chess_night(0);
    let response = server.post("/api/events").json(&zero_capacity).await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["code"], "VALIDATION_ERROR");

    zero_capacity["capacity"] = json!(10);
    zero_capacity["date"] = json!("2023-02-30");
    server
        .post("/api/events")
        .json(&zero_capacity)
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    let mut bad_category = chess_night(10);
    bad_category["category"] = json!("party");
    server
        .post("/api/events")
        .json(&bad_category)
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    let missing_title = json!({ "description": "no title" });
    let response = server.post("/api/events").json(&missing_title).await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["code"], "BAD_REQUEST");

    assert_eq!(titles(&server.get("/api/events").await.json::<Value>()).len(), 6);
}

#[tokio::test]
async fn test_update_event() {
    let server = seeded_server().await;

    let response = server
        .put("/api/events/3")
        .json(&json!({ "location": "Gymnasium", "capacity": 150 }))
        .await;
    response.assert_status_ok();
    let body = response.json::<Value>();
    assert_eq!(body["location"], "Gymnasium");
    assert_eq!(body["capacity"], 150);
    assert_eq!(body["title"], "Fall Career Fair");

    // Validation runs before the existence check
    server
        .put("/api/events/99")
        .json(&json!({ "startTime": "25:00" }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);
    server
        .put("/api/events/99")
        .json(&json!({ "location": "Gymnasium" }))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_event_keeps_registrations() {
    let server = seeded_server().await;

    let response = server.delete("/api/events/3").await;
    response.assert_status_ok();
    assert_eq!(
        response.json::<Value>()["message"],
        "Event deleted successfully"
    );
    server
        .delete("/api/events/3")
        .await
        .assert_status(StatusCode::NOT_FOUND);

    let registrations = server.get("/api/users/1/registrations").await.json::<Value>();
    assert_eq!(registrations.as_array().unwrap().len(), 2);

    let events = server.get("/api/users/1/events").await.json::<Value>();
    assert_eq!(titles(&events), ["Annual Tech Symposium"]);
}

#[tokio::test]
async fn test_registration_flow() {
    let server = seeded_server().await;

    let response = server
        .post("/api/registrations")
        .json(&json!({ "userId": 1, "eventId": 2 }))
        .await;
    response.assert_status(StatusCode::CREATED);
    let body = response.json::<Value>();
    assert_eq!(body["userId"], 1);
    assert_eq!(body["eventId"], 2);
    assert_eq!(body["id"], 3);

    let duplicate = server
        .post("/api/registrations")
        .json(&json!({ "userId": 1, "eventId": 2 }))
        .await;
    duplicate.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        duplicate.json::<Value>()["message"],
        "User already registered for this event"
    );

    let cancelled = server.delete("/api/registrations/1/2").await;
    cancelled.assert_status_ok();
    assert_eq!(
        cancelled.json::<Value>()["message"],
        "Registration cancelled successfully"
    );

    let again = server.delete("/api/registrations/1/2").await;
    again.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(again.json::<Value>()["message"], "Registration not found");

    server
        .delete("/api/registrations/one/2")
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_registration_errors() {
    let server = seeded_server().await;

    let no_event = server
        .post("/api/registrations")
        .json(&json!({ "userId": 1, "eventId": 99 }))
        .await;
    no_event.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(no_event.json::<Value>()["message"], "Event not found");

    let no_user = server
        .post("/api/registrations")
        .json(&json!({ "userId": 42, "eventId": 2 }))
        .await;
    no_user.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(no_user.json::<Value>()["message"], "User not found");

    server
        .post("/api/registrations")
        .json(&json!({ "userId": "one" }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_capacity_one_event() {
    let server = seeded_server().await;
    let event = server
        .post("/api/events")
        .json(&chess_night(1))
        .await
        .json::<Value>();
    let event_id = event["id"].as_u64().unwrap();
    server
        .post("/api/users")
        .json(&json!({ "username": "grace", "password": "pw", "email": "grace@university.edu" }))
        .await
        .assert_status(StatusCode::CREATED);

    server
        .post("/api/registrations")
        .json(&json!({ "userId": 1, "eventId": event_id }))
        .await
        .assert_status(StatusCode::CREATED);

    let full = server
        .post("/api/registrations")
        .json(&json!({ "userId": 2, "eventId": event_id }))
        .await;
    full.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(full.json::<Value>()["code"], "CAPACITY_EXCEEDED");
    assert_eq!(full.json::<Value>()["message"], "Event is at full capacity");
}

#[tokio::test]
async fn test_users_and_login() {
    let server = seeded_server().await;

    let created = server
        .post("/api/users")
        .json(&json!({ "username": "ada", "password": "hunter2", "email": "ada@university.edu" }))
        .await;
    created.assert_status(StatusCode::CREATED);
    assert_eq!(
        created.json::<Value>(),
        json!({ "id": 2, "username": "ada", "email": "ada@university.edu" })
    );

    let taken = server
        .post("/api/users")
        .json(&json!({ "username": "admin", "password": "x", "email": "other@university.edu" }))
        .await;
    taken.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(taken.json::<Value>()["message"], "Username already taken");

    let login = server
        .post("/api/login")
        .json(&json!({ "username": "admin", "password": "password123" }))
        .await;
    login.assert_status_ok();
    assert_eq!(login.json::<Value>()["email"], "admin@university.edu");
    assert!(login.json::<Value>().get("password").is_none());

    server
        .post("/api/login")
        .json(&json!({ "username": "admin", "password": "wrong" }))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);

    server
        .post("/api/login")
        .json(&json!({ "username": "admin" }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_metrics_disabled_by_default_state() {
    let state = AppState::new(Arc::new(CampusEvents::new(memory_storage())));
    let server = TestServer::new(build_router(state)).unwrap();

    server
        .get("/metrics")
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_storage_failure_is_internal_error() {
    let state = AppState::new(Arc::new(CampusEvents::new(Arc::new(UnavailableStorage))));
    let server = TestServer::new(build_router(state)).unwrap();

    let response = server.get("/api/events").await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.json::<Value>()["code"], "INTERNAL_SERVER_ERROR");
}
