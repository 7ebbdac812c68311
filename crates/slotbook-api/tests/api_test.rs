//! Integration tests for the HTTP API
//!
//! Each test runs the full route table against fresh in-memory storage.

use actix_web::{http::StatusCode, test, web, App};
use serde_json::{json, Value};
use slotbook_api::configure_api;
use slotbook_services::BookingServices;

macro_rules! app {
    () => {
        test::init_service(
            App::new()
                .app_data(web::Data::new(BookingServices::in_memory()))
                .configure(configure_api),
        )
        .await
    };
}

/// Send a request and decode the JSON body, `Null` when empty
macro_rules! call {
    ($app:expr, $req:expr) => {{
        let resp = test::call_service($app, $req.to_request()).await;
        let status = resp.status();
        let bytes = test::read_body(resp).await;
        let body: Value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }};
}

macro_rules! post {
    ($app:expr, $uri:expr, $body:expr $(,)?) => {
        call!($app, test::TestRequest::post().uri($uri).set_json($body))
    };
}

macro_rules! put {
    ($app:expr, $uri:expr, $body:expr $(,)?) => {
        call!($app, test::TestRequest::put().uri($uri).set_json($body))
    };
}

macro_rules! get {
    ($app:expr, $uri:expr) => {
        call!($app, test::TestRequest::get().uri($uri))
    };
}

#[actix_web::test]
async fn test_health() {
    let app = app!();

    let (status, body) = get!(&app, "/api/v1/health");
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

#[actix_web::test]
async fn test_booking_lifecycle() {
    let app = app!();

    let (status, body) = post!(
        &app,
        "/api/v1/providers",
        json!({
            "name": "Ana",
            "service_type": "haircut",
            "contact_info": "ana@example.com",
            "availability": [200, "100"]
        }),
    );
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["availability"], json!([100, 200]));
    assert_eq!(body["data"]["average_rating"], 0);
    let provider_id = body["data"]["id"].as_str().unwrap().to_string();

    let (status, body) = post!(
        &app,
        "/api/v1/clients",
        json!({"name": "Bob", "contact_info": "bob@example.com"}),
    );
    assert_eq!(status, StatusCode::CREATED);
    let client_id = body["data"]["id"].as_str().unwrap().to_string();

    let (status, body) = post!(
        &app,
        "/api/v1/bookings",
        json!({
            "service_provider_id": provider_id,
            "client_id": client_id,
            "service_date": 100,
            "service_type": "haircut"
        }),
    );
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["status"], "pending");
    let booking_id = body["data"]["id"].as_str().unwrap().to_string();

    let (status, _) = put!(
        &app,
        &format!("/api/v1/bookings/{}/reschedule", booking_id),
        json!({"new_date": 200}),
    );
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = put!(
        &app,
        &format!("/api/v1/bookings/{}/reschedule", booking_id),
        json!({"new_date": 300}),
    );
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "date_unavailable");

    for next in ["confirmed", "completed"] {
        let (status, body) = put!(
            &app,
            &format!("/api/v1/bookings/{}/status", booking_id),
            json!({ "status": next }),
        );
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["status"], next);
    }

    let (status, _) = post!(
        &app,
        &format!("/api/v1/bookings/{}/reviews", booking_id),
        json!({"rating": 5, "comment": "great"}),
    );
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = post!(
        &app,
        &format!("/api/v1/bookings/{}/reviews", booking_id),
        json!({"rating": 1}),
    );
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "duplicate");

    let (status, body) = get!(&app, &format!("/api/v1/providers/{}", provider_id));
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["average_rating"], 5);
    assert_eq!(body["data"]["reviews"].as_array().unwrap().len(), 1);

    let (status, body) = get!(&app, &format!("/api/v1/providers/{}/history", provider_id));
    assert_eq!(status, StatusCode::OK);
    let history = body["data"].as_array().unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0]["service_date"], 200);
    assert_eq!(history[0]["status"], "completed");
}

#[actix_web::test]
async fn test_duplicate_client_contact() {
    let app = app!();

    let (status, _) = post!(
        &app,
        "/api/v1/clients",
        json!({"name": "Ana", "contact_info": "shared@example.com"}),
    );
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = post!(
        &app,
        "/api/v1/clients",
        json!({"name": "Bob", "contact_info": "shared@example.com"}),
    );
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "duplicate");
    assert_eq!(body["status"], 409);
}

#[actix_web::test]
async fn test_validation_errors() {
    let app = app!();

    let (status, body) = post!(
        &app,
        "/api/v1/providers",
        json!({
            "name": "Ana",
            "service_type": "haircut",
            "contact_info": "ana@example.com",
            "availability": [1, "tomorrow"]
        }),
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation_error");

    let (status, body) = post!(&app, "/api/v1/clients", json!({"name": "Ana"}));
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation_error");

    let (status, _) = get!(&app, "/api/v1/providers?page=0");
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_not_found() {
    let app = app!();

    for uri in [
        "/api/v1/providers/missing",
        "/api/v1/providers/missing/history",
        "/api/v1/clients/missing",
        "/api/v1/bookings/missing",
    ] {
        let (status, body) = get!(&app, uri);
        assert_eq!(status, StatusCode::NOT_FOUND, "{}", uri);
        assert_eq!(body["error"], "not_found");
    }
}

#[actix_web::test]
async fn test_booking_without_availability() {
    let app = app!();

    let (_, body) = post!(
        &app,
        "/api/v1/providers",
        json!({"name": "Ana", "service_type": "cut", "contact_info": "a@x"}),
    );
    let provider_id = body["data"]["id"].as_str().unwrap().to_string();

    let (_, body) = post!(
        &app,
        "/api/v1/clients",
        json!({"name": "Bob", "contact_info": "b@x"}),
    );
    let client_id = body["data"]["id"].as_str().unwrap().to_string();

    let (status, body) = post!(
        &app,
        "/api/v1/bookings",
        json!({
            "service_provider_id": provider_id,
            "client_id": client_id,
            "service_date": 100,
            "service_type": "cut"
        }),
    );
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "invalid_state");

    let (status, body) = put!(
        &app,
        &format!("/api/v1/providers/{}/availability", provider_id),
        json!({"availability": [100]}),
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["availability"], json!([100]));
}

#[actix_web::test]
async fn test_list_providers_paginated() {
    let app = app!();

    for i in 0..3 {
        post!(
            &app,
            "/api/v1/providers",
            json!({
                "name": format!("P{}", i),
                "service_type": "cut",
                "contact_info": format!("p{}@x", i)
            }),
        );
    }

    let (status, body) = get!(&app, "/api/v1/providers?page=1&per_page=2");
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 2);
    assert_eq!(body["pagination"]["total"], 3);
    assert_eq!(body["pagination"]["total_pages"], 2);
}

#[actix_web::test]
async fn test_long_text_fields_accepted() {
    let app = app!();
    let long_name = "n".repeat(300);
    let long_contact = format!("{}@example.com", "c".repeat(300));

    let (status, body) = post!(
        &app,
        "/api/v1/clients",
        json!({"name": long_name, "contact_info": long_contact}),
    );
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["name"], long_name);

    let (status, body) = post!(
        &app,
        "/api/v1/providers",
        json!({
            "name": long_name,
            "service_type": "s".repeat(300),
            "contact_info": long_contact
        }),
    );
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["name"], long_name);
}
