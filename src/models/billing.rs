// src/models/billing.rs

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::common::patch::nullable;

use super::status::InvoiceStatus;

// Todo valor monetário é inteiro em centavos. Formatação fica na borda.

#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    pub id: i32,
    pub tutor_id: i32,
    pub parent_id: i32,
    pub amount: i64,
    pub description: String,
    pub due_date: NaiveDate,
    pub status: InvoiceStatus,
    pub paid_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewInvoice {
    pub tutor_id: i32,
    pub parent_id: i32,

    #[validate(range(min = 0, message = "amount cannot be negative"))]
    pub amount: i64,

    #[validate(length(min = 1, message = "required"))]
    pub description: String,

    pub due_date: NaiveDate,
}

impl NewInvoice {
    pub fn into_record(self, id: i32, created_at: DateTime<Utc>) -> Invoice {
        Invoice {
            id,
            tutor_id: self.tutor_id,
            parent_id: self.parent_id,
            amount: self.amount,
            description: self.description,
            due_date: self.due_date,
            status: InvoiceStatus::Draft,
            paid_date: None,
            created_at,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct InvoicePatch {
    pub tutor_id: Option<i32>,
    pub parent_id: Option<i32>,

    #[validate(range(min = 0, message = "amount cannot be negative"))]
    pub amount: Option<i64>,

    #[validate(length(min = 1, message = "required"))]
    pub description: Option<String>,

    pub due_date: Option<NaiveDate>,
    pub status: Option<InvoiceStatus>,
    #[serde(default, deserialize_with = "nullable")]
    pub paid_date: Option<Option<NaiveDate>>,
}

impl Invoice {
    pub fn apply(&mut self, patch: InvoicePatch) {
        if let Some(v) = patch.tutor_id {
            self.tutor_id = v;
        }
        if let Some(v) = patch.parent_id {
            self.parent_id = v;
        }
        if let Some(v) = patch.amount {
            self.amount = v;
        }
        if let Some(v) = patch.description {
            self.description = v;
        }
        if let Some(v) = patch.due_date {
            self.due_date = v;
        }
        if let Some(v) = patch.status {
            self.status = v;
        }
        if let Some(v) = patch.paid_date {
            self.paid_date = v;
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceFilter {
    pub status: Option<InvoiceStatus>,
    pub tutor_id: Option<i32>,
    pub parent_id: Option<i32>,
}

// --- Itens da fatura ---

#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceItem {
    pub id: i32,
    pub invoice_id: i32,
    pub session_id: Option<i32>,
    pub description: String,
    pub amount: i64,
    pub quantity: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewInvoiceItem {
    pub invoice_id: i32,
    pub session_id: Option<i32>,

    #[validate(length(min = 1, message = "required"))]
    pub description: String,

    #[validate(range(min = 0, message = "amount cannot be negative"))]
    pub amount: i64,

    #[validate(range(min = 1, message = "quantity must be at least 1"))]
    pub quantity: Option<i32>,
}

impl NewInvoiceItem {
    pub fn into_record(self, id: i32, created_at: DateTime<Utc>) -> InvoiceItem {
        InvoiceItem {
            id,
            invoice_id: self.invoice_id,
            session_id: self.session_id,
            description: self.description,
            amount: self.amount,
            quantity: self.quantity.unwrap_or(1),
            created_at,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceItemPatch {
    #[serde(default, deserialize_with = "nullable")]
    pub session_id: Option<Option<i32>>,

    #[validate(length(min = 1, message = "required"))]
    pub description: Option<String>,

    #[validate(range(min = 0, message = "amount cannot be negative"))]
    pub amount: Option<i64>,

    #[validate(range(min = 1, message = "quantity must be at least 1"))]
    pub quantity: Option<i32>,
}

impl InvoiceItem {
    pub fn apply(&mut self, patch: InvoiceItemPatch) {
        if let Some(v) = patch.session_id {
            self.session_id = v;
        }
        if let Some(v) = patch.description {
            self.description = v;
        }
        if let Some(v) = patch.amount {
            self.amount = v;
        }
        if let Some(v) = patch.quantity {
            self.quantity = v;
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceItemFilter {
    pub invoice_id: Option<i32>,
}
