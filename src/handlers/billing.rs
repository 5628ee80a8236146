// src/handlers/billing.rs

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
    models::billing::{
        InvoiceFilter, InvoiceItemFilter, InvoiceItemPatch, InvoicePatch, NewInvoice,
        NewInvoiceItem,
    },
};

// POST /api/invoices
pub async fn create_invoice(
    State(app_state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<NewInvoice>,
) -> Result<impl IntoResponse, AppError> {
    let invoice = app_state.storage.create_invoice(payload).await?;
    Ok((StatusCode::CREATED, Json(invoice)))
}

// GET /api/invoices
pub async fn list_invoices(
    State(app_state): State<AppState>,
    FilterQuery(filter): FilterQuery<InvoiceFilter>,
) -> Result<impl IntoResponse, AppError> {
    let invoices = app_state.storage.list_invoices(filter).await?;
    Ok((StatusCode::OK, Json(invoices)))
}

// GET /api/invoices/{id}
pub async fn get_invoice(
    State(app_state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let invoice = app_state
        .storage
        .get_invoice(id)
        .await?
        .ok_or(AppError::NotFound("Invoice"))?;
    Ok((StatusCode::OK, Json(invoice)))
}

// PATCH /api/invoices/{id}
pub async fn update_invoice(
    State(app_state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedJson(patch): ValidatedJson<InvoicePatch>,
) -> Result<impl IntoResponse, AppError> {
    let invoice = app_state
        .storage
        .update_invoice(id, patch)
        .await?
        .ok_or(AppError::NotFound("Invoice"))?;
    Ok((StatusCode::OK, Json(invoice)))
}

// POST /api/invoice-items
pub async fn create_invoice_item(
    State(app_state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<NewInvoiceItem>,
) -> Result<impl IntoResponse, AppError> {
    let item = app_state.storage.create_invoice_item(payload).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

// GET /api/invoice-items
pub async fn list_invoice_items(
    State(app_state): State<AppState>,
    FilterQuery(filter): FilterQuery<InvoiceItemFilter>,
) -> Result<impl IntoResponse, AppError> {
    let items = app_state.storage.list_invoice_items(filter).await?;
    Ok((StatusCode::OK, Json(items)))
}

// GET /api/invoice-items/{id}
pub async fn get_invoice_item(
    State(app_state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let item = app_state
        .storage
        .get_invoice_item(id)
        .await?
        .ok_or(AppError::NotFound("Invoice item"))?;
    Ok((StatusCode::OK, Json(item)))
}

// PATCH /api/invoice-items/{id}
pub async fn update_invoice_item(
    State(app_state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedJson(patch): ValidatedJson<InvoiceItemPatch>,
) -> Result<impl IntoResponse, AppError> {
    let item = app_state
        .storage
        .update_invoice_item(id, patch)
        .await?
        .ok_or(AppError::NotFound("Invoice item"))?;
    Ok((StatusCode::OK, Json(item)))
}
