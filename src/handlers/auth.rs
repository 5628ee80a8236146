// src/handlers/auth.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::{
    common::{error::AppError, extract::ValidatedJson},
    config::AppState,
    models::users::{LoginPayload, NewUser},
};

// POST /api/auth/register
pub async fn register(
    State(app_state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<NewUser>,
) -> Result<impl IntoResponse, AppError> {
    let user = app_state.auth_service.register_user(payload).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

// POST /api/auth/login
pub async fn login(
    State(app_state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<LoginPayload>,
) -> Result<impl IntoResponse, AppError> {
    let user = app_state
        .auth_service
        .login_user(&payload.username, &payload.password)
        .await?;
    Ok((StatusCode::OK, Json(user)))
}
