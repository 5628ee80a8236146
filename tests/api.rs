// tests/api.rs
//
// Sobe o router inteiro em memória e dispara requisições com `oneshot`.

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use chrono::Local;
use serde_json::{json, Value};
use tower::ServiceExt;

use tutorsync::{config::AppState, db::MemStorage, routes};

fn app() -> Router {
    routes::app(AppState::from_storage(Arc::new(MemStorage::new())))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(value) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

fn inquiry_body() -> Value {
    json!({
        "parentFirstName": "Jack",
        "parentLastName": "Smith",
        "parentEmail": "jack.smith@example.com",
        "parentPhone": "555-111-1111",
        "studentName": "Tommy Smith",
        "studentGrade": "10",
        "subject": "math",
        "location": "online",
        "availability": ["weekday-afternoon", "weekend"]
    })
}

#[tokio::test]
async fn health_check_answers_ok() {
    let app = app();
    let response = app
        .oneshot(Request::builder().uri("/api/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn created_inquiry_starts_as_new() {
    let app = app();

    let (status, body) = send(&app, Method::POST, "/api/inquiries", Some(inquiry_body())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["id"], 1);
    assert_eq!(body["status"], "new");
    assert_eq!(body["availability"], json!(["weekday-afternoon", "weekend"]));

    let (status, body) = send(&app, Method::GET, "/api/inquiries/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["studentName"], "Tommy Smith");
}

#[tokio::test]
async fn missing_records_return_404() {
    let app = app();

    let (status, body) = send(&app, Method::GET, "/api/inquiries/999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].is_string());

    let (status, _) = send(
        &app,
        Method::PATCH,
        "/api/tutors/42",
        Some(json!({ "bio": "Physics PhD" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn invalid_status_is_rejected_and_record_kept() {
    let app = app();
    send(&app, Method::POST, "/api/inquiries", Some(inquiry_body())).await;

    let (status, _) = send(
        &app,
        Method::PATCH,
        "/api/inquiries/1/status",
        Some(json!({ "status": "archived" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, body) = send(&app, Method::GET, "/api/inquiries/1", None).await;
    assert_eq!(body["status"], "new");

    let (status, body) = send(
        &app,
        Method::PATCH,
        "/api/inquiries/1/status",
        Some(json!({ "status": "matched" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "matched");
}

#[tokio::test]
async fn scheduling_a_call_moves_inquiry_to_scheduled() {
    let app = app();
    send(&app, Method::POST, "/api/inquiries", Some(inquiry_body())).await;

    let (status, call) = send(
        &app,
        Method::POST,
        "/api/calls",
        Some(json!({
            "inquiryId": 1,
            "adminId": 1,
            "callDate": "2026-10-20",
            "callTime": "10:30:00",
            "callType": "video",
            "callPurpose": "Initial consultation"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(call["duration"], 30);
    assert_eq!(call["status"], "scheduled");

    let (_, inquiry) = send(&app, Method::GET, "/api/inquiries/1", None).await;
    assert_eq!(inquiry["status"], "scheduled");
}

#[tokio::test]
async fn validation_failures_return_400() {
    let app = app();

    let mut body = inquiry_body();
    body["parentEmail"] = json!("not-an-email");
    let (status, response) = send(&app, Method::POST, "/api/inquiries", Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(response["details"].is_object());

    // Campo obrigatório ausente
    let (status, _) = send(
        &app,
        Method::POST,
        "/api/inquiries",
        Some(json!({ "parentFirstName": "Jack" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, Method::GET, "/api/inquiries", None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn recent_inquiries_are_newest_first_and_capped() {
    let app = app();
    for _ in 0..7 {
        send(&app, Method::POST, "/api/inquiries", Some(inquiry_body())).await;
    }

    let (status, body) = send(&app, Method::GET, "/api/inquiries/recent", None).await;
    assert_eq!(status, StatusCode::OK);
    let ids: Vec<i64> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|inquiry| inquiry["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![7, 6, 5, 4, 3]);
}

#[tokio::test]
async fn register_and_login() {
    let app = app();
    let user = json!({
        "username": "jdoe",
        "email": "jdoe@example.com",
        "password": "secret",
        "firstName": "John",
        "lastName": "Doe",
        "role": "tutor"
    });

    let (status, body) = send(&app, Method::POST, "/api/auth/register", Some(user.clone())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(body.get("password").is_none());

    let (status, _) = send(&app, Method::POST, "/api/auth/register", Some(user)).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/auth/login",
        Some(json!({ "username": "jdoe", "password": "secret" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], 1);

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/auth/login",
        Some(json!({ "username": "jdoe", "password": "wrong" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn dashboard_stats_reflect_the_store() {
    let app = app();
    send(&app, Method::POST, "/api/inquiries", Some(inquiry_body())).await;
    send(&app, Method::POST, "/api/inquiries", Some(inquiry_body())).await;
    send(
        &app,
        Method::POST,
        "/api/tutors",
        Some(json!({ "userId": 1, "subjects": ["math"], "hourlyRate": 6000 })),
    )
    .await;

    let today = Local::now().date_naive();
    send(
        &app,
        Method::POST,
        "/api/invoices",
        Some(json!({
            "tutorId": 1,
            "parentId": 2,
            "amount": 125000,
            "description": "October sessions",
            "dueDate": today.to_string()
        })),
    )
    .await;
    let (status, invoice) = send(
        &app,
        Method::PATCH,
        "/api/invoices/1",
        Some(json!({ "status": "paid", "paidDate": today.to_string() })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(invoice["status"], "paid");

    let (status, stats) = send(&app, Method::GET, "/api/dashboard/stats", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        stats,
        json!({
            "newInquiries": 2,
            "activeStudents": 0,
            "activeTutors": 1,
            "monthlyRevenue": "$1,250.00"
        })
    );
}

#[tokio::test]
async fn today_sessions_use_placeholders_for_unknown_people() {
    let app = app();
    let today = Local::now().date_naive().to_string();

    for hour in ["09", "10", "11", "12"] {
        let (status, _) = send(
            &app,
            Method::POST,
            "/api/sessions",
            Some(json!({
                "tutorId": 3,
                "studentId": 8,
                "subject": "science",
                "date": today,
                "startTime": format!("{}:00:00", hour),
                "endTime": format!("{}:45:00", hour),
                "notes": "Stoichiometry"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, body) = send(&app, Method::GET, "/api/sessions/today", None).await;
    assert_eq!(status, StatusCode::OK);
    let sessions = body.as_array().unwrap();
    assert_eq!(sessions.len(), 3);
    assert_eq!(sessions[0]["time"], "09:00 - 09:45");
    assert_eq!(sessions[0]["topic"], "Stoichiometry");
    assert_eq!(sessions[0]["student"]["name"], "Student #8");
    assert_eq!(sessions[0]["tutor"]["initials"], "TU");
}

#[tokio::test]
async fn patching_a_missing_user_is_404_even_with_a_taken_email() {
    let app = app();
    let user = json!({
        "username": "jdoe",
        "email": "jdoe@example.com",
        "password": "secret",
        "firstName": "John",
        "lastName": "Doe",
        "role": "parent"
    });
    send(&app, Method::POST, "/api/auth/register", Some(user)).await;

    let (status, body) = send(
        &app,
        Method::PATCH,
        "/api/users/999",
        Some(json!({ "email": "jdoe@example.com" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn null_in_patch_clears_the_field() {
    let app = app();
    send(
        &app,
        Method::POST,
        "/api/invoices",
        Some(json!({
            "tutorId": 1,
            "parentId": 2,
            "amount": 9000,
            "description": "September sessions",
            "dueDate": "2026-09-30"
        })),
    )
    .await;
    send(
        &app,
        Method::PATCH,
        "/api/invoices/1",
        Some(json!({ "status": "paid", "paidDate": "2026-10-01" })),
    )
    .await;

    let (status, invoice) = send(
        &app,
        Method::PATCH,
        "/api/invoices/1",
        Some(json!({ "status": "sent", "paidDate": null })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(invoice["status"], "sent");
    assert!(invoice["paidDate"].is_null());
    assert_eq!(invoice["amount"], 9000);

    // Campo ausente continua valendo "não mexe"
    let (_, invoice) = send(
        &app,
        Method::PATCH,
        "/api/invoices/1",
        Some(json!({ "description": "September tutoring" })),
    )
    .await;
    assert_eq!(invoice["status"], "sent");
    assert_eq!(invoice["description"], "September tutoring");
}

#[tokio::test]
async fn bad_filter_value_is_a_json_400() {
    let app = app();

    let (status, body) = send(&app, Method::GET, "/api/inquiries?status=bogus", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let (status, body) = send(&app, Method::GET, "/api/tutors?active=maybe", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let (status, _) = send(&app, Method::GET, "/api/inquiries?status=new", None).await;
    assert_eq!(status, StatusCode::OK);
}
