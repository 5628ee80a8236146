// src/common/error.rs

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("validation error")]
    ValidationError(#[from] validator::ValidationErrors),

    // JSON malformado, corpo com formato errado etc.
    #[error("bad request: {0}")]
    BadRequest(String),

    // Valor fora do enum fechado; o registro não é alterado
    #[error("invalid {entity} status: '{value}'")]
    InvalidStatus { entity: &'static str, value: String },

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("unique constraint violated: {0}")]
    UniqueConstraintViolation(String),

    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("database error")]
    DatabaseError(#[from] sqlx::Error),

    #[error("internal server error")]
    InternalServerError(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::ValidationError(errors) => {
                let mut details = std::collections::HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .map(|e| {
                            e.message
                                .as_ref()
                                .map(|m| m.to_string())
                                .unwrap_or_else(|| e.code.to_string())
                        })
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                let body = Json(json!({
                    "error": "One or more fields are invalid.",
                    "details": details,
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }
            AppError::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            ref e @ AppError::InvalidStatus { .. } => (StatusCode::BAD_REQUEST, e.to_string()),
            AppError::NotFound(entity) => (StatusCode::NOT_FOUND, format!("{} not found", entity)),
            AppError::UniqueConstraintViolation(message) => (StatusCode::CONFLICT, message),
            AppError::InvalidCredentials => {
                (StatusCode::UNAUTHORIZED, "Invalid credentials".to_string())
            }

            // Banco fora do ar, erro inesperado etc. viram 500.
            // O detalhe vai só para o log.
            ref e => {
                tracing::error!("Internal server error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An unexpected error occurred.".to_string(),
                )
            }
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}

/// Converte erro de chave única do Postgres em `UniqueConstraintViolation`.
pub fn map_unique_violation(e: sqlx::Error, what: impl FnOnce() -> String) -> AppError {
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.is_unique_violation() {
            return AppError::UniqueConstraintViolation(what());
        }
    }
    e.into()
}
