// src/handlers/tutoring.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    common::{
        error::AppError,
        extract::{FilterQuery, ValidatedJson},
    },
    config::AppState,
    models::tutoring::{
        NewSession, NewSessionReport, NewTutor, SessionFilter, SessionPatch, SessionReportFilter,
        SessionReportPatch, TutorFilter, TutorPatch,
    },
};

// =============================================================================
//  TUTORES
// =============================================================================

// POST /api/tutors
pub async fn create_tutor(
    State(app_state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<NewTutor>,
) -> Result<impl IntoResponse, AppError> {
    let tutor = app_state.storage.create_tutor(payload).await?;
    Ok((StatusCode::CREATED, Json(tutor)))
}

// GET /api/tutors
pub async fn list_tutors(
    State(app_state): State<AppState>,
    FilterQuery(filter): FilterQuery<TutorFilter>,
) -> Result<impl IntoResponse, AppError> {
    let tutors = app_state.storage.list_tutors(filter).await?;
    Ok((StatusCode::OK, Json(tutors)))
}

// GET /api/tutors/{id}
pub async fn get_tutor(
    State(app_state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let tutor = app_state
        .storage
        .get_tutor(id)
        .await?
        .ok_or(AppError::NotFound("Tutor"))?;
    Ok((StatusCode::OK, Json(tutor)))
}

// PATCH /api/tutors/{id}
pub async fn update_tutor(
    State(app_state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedJson(patch): ValidatedJson<TutorPatch>,
) -> Result<impl IntoResponse, AppError> {
    let tutor = app_state
        .storage
        .update_tutor(id, patch)
        .await?
        .ok_or(AppError::NotFound("Tutor"))?;
    Ok((StatusCode::OK, Json(tutor)))
}

// =============================================================================
//  AULAS
// =============================================================================

// POST /api/sessions
pub async fn create_session(
    State(app_state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<NewSession>,
) -> Result<impl IntoResponse, AppError> {
    let session = app_state.storage.create_session(payload).await?;
    Ok((StatusCode::CREATED, Json(session)))
}

// GET /api/sessions
pub async fn list_sessions(
    State(app_state): State<AppState>,
    FilterQuery(filter): FilterQuery<SessionFilter>,
) -> Result<impl IntoResponse, AppError> {
    let sessions = app_state.storage.list_sessions(filter).await?;
    Ok((StatusCode::OK, Json(sessions)))
}

// GET /api/sessions/today
pub async fn today_sessions(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let sessions = app_state.dashboard_service.today_sessions().await?;
    Ok((StatusCode::OK, Json(sessions)))
}

// GET /api/sessions/{id}
pub async fn get_session(
    State(app_state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let session = app_state
        .storage
        .get_session(id)
        .await?
        .ok_or(AppError::NotFound("Session"))?;
    Ok((StatusCode::OK, Json(session)))
}

// PATCH /api/sessions/{id}
pub async fn update_session(
    State(app_state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedJson(patch): ValidatedJson<SessionPatch>,
) -> Result<impl IntoResponse, AppError> {
    let session = app_state
        .storage
        .update_session(id, patch)
        .await?
        .ok_or(AppError::NotFound("Session"))?;
    Ok((StatusCode::OK, Json(session)))
}

// =============================================================================
//  RELATÓRIOS
// =============================================================================

// POST /api/reports
pub async fn create_report(
    State(app_state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<NewSessionReport>,
) -> Result<impl IntoResponse, AppError> {
    let report = app_state.storage.create_session_report(payload).await?;
    Ok((StatusCode::CREATED, Json(report)))
}

// GET /api/reports
pub async fn list_reports(
    State(app_state): State<AppState>,
    FilterQuery(filter): FilterQuery<SessionReportFilter>,
) -> Result<impl IntoResponse, AppError> {
    let reports = app_state.storage.list_session_reports(filter).await?;
    Ok((StatusCode::OK, Json(reports)))
}

// GET /api/reports/{id}
pub async fn get_report(
    State(app_state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let report = app_state
        .storage
        .get_session_report(id)
        .await?
        .ok_or(AppError::NotFound("Session report"))?;
    Ok((StatusCode::OK, Json(report)))
}

// PATCH /api/reports/{id}
pub async fn update_report(
    State(app_state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedJson(patch): ValidatedJson<SessionReportPatch>,
) -> Result<impl IntoResponse, AppError> {
    let report = app_state
        .storage
        .update_session_report(id, patch)
        .await?
        .ok_or(AppError::NotFound("Session report"))?;
    Ok((StatusCode::OK, Json(report)))
}
