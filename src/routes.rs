// src/routes.rs

use axum::{
    routing::{get, patch, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{config::AppState, handlers};

/// Monta o router completo (`/api/...`) com o estado já injetado.
pub fn app(app_state: AppState) -> Router {
    let auth_routes = Router::new()
        .route("/register", post(handlers::auth::register))
        .route("/login", post(handlers::auth::login));

    let user_routes = Router::new()
        .route("/", get(handlers::users::list_users))
        .route(
            "/{id}",
            get(handlers::users::get_user).patch(handlers::users::update_user),
        );

    let student_routes = Router::new()
        .route(
            "/",
            post(handlers::users::create_student).get(handlers::users::list_students),
        )
        .route(
            "/{id}",
            get(handlers::users::get_student).patch(handlers::users::update_student),
        );

    let inquiry_routes = Router::new()
        .route(
            "/",
            post(handlers::inquiries::create_inquiry).get(handlers::inquiries::list_inquiries),
        )
        .route("/recent", get(handlers::inquiries::recent_inquiries))
        .route(
            "/{id}",
            get(handlers::inquiries::get_inquiry).patch(handlers::inquiries::update_inquiry),
        )
        .route("/{id}/status", patch(handlers::inquiries::update_inquiry_status));

    let call_routes = Router::new()
        .route(
            "/",
            post(handlers::inquiries::create_call).get(handlers::inquiries::list_calls),
        )
        .route(
            "/{id}",
            get(handlers::inquiries::get_call).patch(handlers::inquiries::update_call),
        );

    let tutor_routes = Router::new()
        .route(
            "/",
            post(handlers::tutoring::create_tutor).get(handlers::tutoring::list_tutors),
        )
        .route(
            "/{id}",
            get(handlers::tutoring::get_tutor).patch(handlers::tutoring::update_tutor),
        );

    let session_routes = Router::new()
        .route(
            "/",
            post(handlers::tutoring::create_session).get(handlers::tutoring::list_sessions),
        )
        .route("/today", get(handlers::tutoring::today_sessions))
        .route(
            "/{id}",
            get(handlers::tutoring::get_session).patch(handlers::tutoring::update_session),
        );

    let report_routes = Router::new()
        .route(
            "/",
            post(handlers::tutoring::create_report).get(handlers::tutoring::list_reports),
        )
        .route(
            "/{id}",
            get(handlers::tutoring::get_report).patch(handlers::tutoring::update_report),
        );

    let invoice_routes = Router::new()
        .route(
            "/",
            post(handlers::billing::create_invoice).get(handlers::billing::list_invoices),
        )
        .route(
            "/{id}",
            get(handlers::billing::get_invoice).patch(handlers::billing::update_invoice),
        );

    let invoice_item_routes = Router::new()
        .route(
            "/",
            post(handlers::billing::create_invoice_item)
                .get(handlers::billing::list_invoice_items),
        )
        .route(
            "/{id}",
            get(handlers::billing::get_invoice_item)
                .patch(handlers::billing::update_invoice_item),
        );

    let api = Router::new()
        .route("/health", get(|| async { "OK" }))
        .route("/dashboard/stats", get(handlers::dashboard::get_stats))
        .nest("/auth", auth_routes)
        .nest("/users", user_routes)
        .nest("/students", student_routes)
        .nest("/inquiries", inquiry_routes)
        .nest("/calls", call_routes)
        .nest("/tutors", tutor_routes)
        .nest("/sessions", session_routes)
        .nest("/reports", report_routes)
        .nest("/invoices", invoice_routes)
        .nest("/invoice-items", invoice_item_routes);

    Router::new()
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state)
}
