// src/handlers/inquiries.rs

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
    models::intake::{
        InquiryFilter, InquiryPatch, InquiryStatusUpdate, NewInquiry, NewScheduledCall,
        ScheduledCallFilter, ScheduledCallPatch,
    },
};

// =============================================================================
//  SOLICITAÇÕES (formulário público)
// =============================================================================

// POST /api/inquiries
pub async fn create_inquiry(
    State(app_state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<NewInquiry>,
) -> Result<impl IntoResponse, AppError> {
    let inquiry = app_state.storage.create_inquiry(payload).await?;
    tracing::info!(inquiry_id = inquiry.id, subject = %inquiry.subject, "Inquiry received");
    Ok((StatusCode::CREATED, Json(inquiry)))
}

// GET /api/inquiries
pub async fn list_inquiries(
    State(app_state): State<AppState>,
    FilterQuery(filter): FilterQuery<InquiryFilter>,
) -> Result<impl IntoResponse, AppError> {
    let inquiries = app_state.storage.list_inquiries(filter).await?;
    Ok((StatusCode::OK, Json(inquiries)))
}

// GET /api/inquiries/recent
pub async fn recent_inquiries(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let inquiries = app_state.dashboard_service.recent_inquiries().await?;
    Ok((StatusCode::OK, Json(inquiries)))
}

// GET /api/inquiries/{id}
pub async fn get_inquiry(
    State(app_state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let inquiry = app_state
        .storage
        .get_inquiry(id)
        .await?
        .ok_or(AppError::NotFound("Inquiry"))?;
    Ok((StatusCode::OK, Json(inquiry)))
}

// PATCH /api/inquiries/{id}
pub async fn update_inquiry(
    State(app_state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedJson(patch): ValidatedJson<InquiryPatch>,
) -> Result<impl IntoResponse, AppError> {
    let inquiry = app_state
        .storage
        .update_inquiry(id, patch)
        .await?
        .ok_or(AppError::NotFound("Inquiry"))?;
    Ok((StatusCode::OK, Json(inquiry)))
}

// PATCH /api/inquiries/{id}/status
pub async fn update_inquiry_status(
    State(app_state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<InquiryStatusUpdate>,
) -> Result<impl IntoResponse, AppError> {
    let inquiry = app_state
        .storage
        .update_inquiry_status(id, &payload.status)
        .await?
        .ok_or(AppError::NotFound("Inquiry"))?;
    Ok((StatusCode::OK, Json(inquiry)))
}

// =============================================================================
//  LIGAÇÕES AGENDADAS
// =============================================================================

// POST /api/calls
pub async fn create_call(
    State(app_state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<NewScheduledCall>,
) -> Result<impl IntoResponse, AppError> {
    let call = app_state.scheduling_service.create_call(payload).await?;
    Ok((StatusCode::CREATED, Json(call)))
}

// GET /api/calls
pub async fn list_calls(
    State(app_state): State<AppState>,
    FilterQuery(filter): FilterQuery<ScheduledCallFilter>,
) -> Result<impl IntoResponse, AppError> {
    let calls = app_state.storage.list_scheduled_calls(filter).await?;
    Ok((StatusCode::OK, Json(calls)))
}

// GET /api/calls/{id}
pub async fn get_call(
    State(app_state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let call = app_state
        .storage
        .get_scheduled_call(id)
        .await?
        .ok_or(AppError::NotFound("Scheduled call"))?;
    Ok((StatusCode::OK, Json(call)))
}

// PATCH /api/calls/{id}
pub async fn update_call(
    State(app_state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedJson(patch): ValidatedJson<ScheduledCallPatch>,
) -> Result<impl IntoResponse, AppError> {
    let call = app_state
        .storage
        .update_scheduled_call(id, patch)
        .await?
        .ok_or(AppError::NotFound("Scheduled call"))?;
    Ok((StatusCode::OK, Json(call)))
}
