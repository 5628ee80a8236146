// src/handlers/users.rs

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
    models::users::{NewStudent, StudentFilter, StudentPatch, UserFilter, UserPatch},
};

// =============================================================================
//  USUÁRIOS (criação passa por /auth/register)
// =============================================================================

// GET /api/users
pub async fn list_users(
    State(app_state): State<AppState>,
    FilterQuery(filter): FilterQuery<UserFilter>,
) -> Result<impl IntoResponse, AppError> {
    let users = app_state.storage.list_users(filter).await?;
    Ok((StatusCode::OK, Json(users)))
}

// GET /api/users/{id}
pub async fn get_user(
    State(app_state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = app_state
        .storage
        .get_user(id)
        .await?
        .ok_or(AppError::NotFound("User"))?;
    Ok((StatusCode::OK, Json(user)))
}

// PATCH /api/users/{id}
pub async fn update_user(
    State(app_state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedJson(patch): ValidatedJson<UserPatch>,
) -> Result<impl IntoResponse, AppError> {
    let user = app_state
        .storage
        .update_user(id, patch)
        .await?
        .ok_or(AppError::NotFound("User"))?;
    Ok((StatusCode::OK, Json(user)))
}

// =============================================================================
//  ALUNOS
// =============================================================================

// POST /api/students
pub async fn create_student(
    State(app_state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<NewStudent>,
) -> Result<impl IntoResponse, AppError> {
    let student = app_state.storage.create_student(payload).await?;
    Ok((StatusCode::CREATED, Json(student)))
}

// GET /api/students
pub async fn list_students(
    State(app_state): State<AppState>,
    FilterQuery(filter): FilterQuery<StudentFilter>,
) -> Result<impl IntoResponse, AppError> {
    let students = app_state.storage.list_students(filter).await?;
    Ok((StatusCode::OK, Json(students)))
}

// GET /api/students/{id}
pub async fn get_student(
    State(app_state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let student = app_state
        .storage
        .get_student(id)
        .await?
        .ok_or(AppError::NotFound("Student"))?;
    Ok((StatusCode::OK, Json(student)))
}

// PATCH /api/students/{id}
pub async fn update_student(
    State(app_state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedJson(patch): ValidatedJson<StudentPatch>,
) -> Result<impl IntoResponse, AppError> {
    let student = app_state
        .storage
        .update_student(id, patch)
        .await?
        .ok_or(AppError::NotFound("Student"))?;
    Ok((StatusCode::OK, Json(student)))
}
