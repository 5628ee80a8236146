// src/models/intake.rs

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::common::patch::nullable;

use super::status::{CallStatus, CallType, InquiryStatus};

pub const DEFAULT_CALL_DURATION_MINUTES: i32 = 30;

// =========================================================================
//  SOLICITAÇÕES (Inquiry) - o formulário que os pais preenchem
// =========================================================================

#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Inquiry {
    pub id: i32,

    // Contato do responsável
    pub parent_first_name: String,
    pub parent_last_name: String,
    pub parent_email: String,
    pub parent_phone: String,

    // Aluno
    pub student_name: String,
    pub student_grade: String,

    pub subject: String,
    pub specific_needs: Option<String>,
    pub location: String,
    pub zip_code: Option<String>,

    // Ex: ["weekday-afternoon", "weekend"]
    pub availability: Option<Vec<String>>,

    pub additional_info: Option<String>,
    pub budget: Option<String>,
    pub contact_preference: Option<String>,
    pub referral: Option<String>,

    pub status: InquiryStatus,
    pub created_at: DateTime<Utc>,
}

/// Sem campo `status`: toda solicitação nasce como `new`.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewInquiry {
    #[validate(length(min = 1, message = "required"))]
    pub parent_first_name: String,

    #[validate(length(min = 1, message = "required"))]
    pub parent_last_name: String,

    #[validate(email(message = "invalid email"))]
    pub parent_email: String,

    #[validate(length(min = 1, message = "required"))]
    pub parent_phone: String,

    #[validate(length(min = 1, message = "required"))]
    pub student_name: String,

    #[validate(length(min = 1, message = "required"))]
    pub student_grade: String,

    #[validate(length(min = 1, message = "required"))]
    pub subject: String,

    pub specific_needs: Option<String>,

    #[validate(length(min = 1, message = "required"))]
    pub location: String,

    pub zip_code: Option<String>,
    pub availability: Option<Vec<String>>,
    pub additional_info: Option<String>,
    pub budget: Option<String>,
    pub contact_preference: Option<String>,
    pub referral: Option<String>,
}

impl NewInquiry {
    pub fn into_record(self, id: i32, created_at: DateTime<Utc>) -> Inquiry {
        Inquiry {
            id,
            parent_first_name: self.parent_first_name,
            parent_last_name: self.parent_last_name,
            parent_email: self.parent_email,
            parent_phone: self.parent_phone,
            student_name: self.student_name,
            student_grade: self.student_grade,
            subject: self.subject,
            specific_needs: self.specific_needs,
            location: self.location,
            zip_code: self.zip_code,
            availability: self.availability,
            additional_info: self.additional_info,
            budget: self.budget,
            contact_preference: self.contact_preference,
            referral: self.referral,
            status: InquiryStatus::New,
            created_at,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct InquiryPatch {
    #[validate(length(min = 1, message = "required"))]
    pub parent_first_name: Option<String>,

    #[validate(length(min = 1, message = "required"))]
    pub parent_last_name: Option<String>,

    #[validate(email(message = "invalid email"))]
    pub parent_email: Option<String>,

    pub parent_phone: Option<String>,
    pub student_name: Option<String>,
    pub student_grade: Option<String>,
    pub subject: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub specific_needs: Option<Option<String>>,
    pub location: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub zip_code: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub availability: Option<Option<Vec<String>>>,
    #[serde(default, deserialize_with = "nullable")]
    pub additional_info: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub budget: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub contact_preference: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub referral: Option<Option<String>>,
    pub status: Option<InquiryStatus>,
}

impl Inquiry {
    pub fn apply(&mut self, patch: InquiryPatch) {
        if let Some(v) = patch.parent_first_name {
            self.parent_first_name = v;
        }
        if let Some(v) = patch.parent_last_name {
            self.parent_last_name = v;
        }
        if let Some(v) = patch.parent_email {
            self.parent_email = v;
        }
        if let Some(v) = patch.parent_phone {
            self.parent_phone = v;
        }
        if let Some(v) = patch.student_name {
            self.student_name = v;
        }
        if let Some(v) = patch.student_grade {
            self.student_grade = v;
        }
        if let Some(v) = patch.subject {
            self.subject = v;
        }
        if let Some(v) = patch.specific_needs {
            self.specific_needs = v;
        }
        if let Some(v) = patch.location {
            self.location = v;
        }
        if let Some(v) = patch.zip_code {
            self.zip_code = v;
        }
        if let Some(v) = patch.availability {
            self.availability = v;
        }
        if let Some(v) = patch.additional_info {
            self.additional_info = v;
        }
        if let Some(v) = patch.budget {
            self.budget = v;
        }
        if let Some(v) = patch.contact_preference {
            self.contact_preference = v;
        }
        if let Some(v) = patch.referral {
            self.referral = v;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InquiryFilter {
    pub status: Option<InquiryStatus>,
}

/// Corpo do PATCH /inquiries/{id}/status. Fica como texto cru para
/// que a validação passe pelo `FromStr` do status.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct InquiryStatusUpdate {
    pub status: String,
}

// =========================================================================
//  LIGAÇÕES AGENDADAS
// =========================================================================

#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledCall {
    pub id: i32,
    pub inquiry_id: Option<i32>,
    pub parent_id: Option<i32>,
    pub admin_id: Option<i32>,
    pub call_date: NaiveDate,
    pub call_time: NaiveTime,

    // Minutos
    pub duration: i32,

    pub call_type: CallType,
    pub call_purpose: String,
    pub notes: Option<String>,
    pub status: CallStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewScheduledCall {
    pub inquiry_id: Option<i32>,
    pub parent_id: Option<i32>,
    pub admin_id: Option<i32>,
    pub call_date: NaiveDate,
    pub call_time: NaiveTime,

    #[validate(range(min = 1, message = "duration must be positive"))]
    pub duration: Option<i32>,

    pub call_type: CallType,

    #[validate(length(min = 1, message = "required"))]
    pub call_purpose: String,

    pub notes: Option<String>,
}

impl NewScheduledCall {
    pub fn into_record(self, id: i32, created_at: DateTime<Utc>) -> ScheduledCall {
        ScheduledCall {
            id,
            inquiry_id: self.inquiry_id,
            parent_id: self.parent_id,
            admin_id: self.admin_id,
            call_date: self.call_date,
            call_time: self.call_time,
            duration: self.duration.unwrap_or(DEFAULT_CALL_DURATION_MINUTES),
            call_type: self.call_type,
            call_purpose: self.call_purpose,
            notes: self.notes,
            status: CallStatus::Scheduled,
            created_at,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledCallPatch {
    #[serde(default, deserialize_with = "nullable")]
    pub inquiry_id: Option<Option<i32>>,
    #[serde(default, deserialize_with = "nullable")]
    pub parent_id: Option<Option<i32>>,
    #[serde(default, deserialize_with = "nullable")]
    pub admin_id: Option<Option<i32>>,
    pub call_date: Option<NaiveDate>,
    pub call_time: Option<NaiveTime>,

    #[validate(range(min = 1, message = "duration must be positive"))]
    pub duration: Option<i32>,

    pub call_type: Option<CallType>,

    #[validate(length(min = 1, message = "required"))]
    pub call_purpose: Option<String>,

    #[serde(default, deserialize_with = "nullable")]
    pub notes: Option<Option<String>>,
    pub status: Option<CallStatus>,
}

impl ScheduledCall {
    pub fn apply(&mut self, patch: ScheduledCallPatch) {
        if let Some(v) = patch.inquiry_id {
            self.inquiry_id = v;
        }
        if let Some(v) = patch.parent_id {
            self.parent_id = v;
        }
        if let Some(v) = patch.admin_id {
            self.admin_id = v;
        }
        if let Some(v) = patch.call_date {
            self.call_date = v;
        }
        if let Some(v) = patch.call_time {
            self.call_time = v;
        }
        if let Some(v) = patch.duration {
            self.duration = v;
        }
        if let Some(v) = patch.call_type {
            self.call_type = v;
        }
        if let Some(v) = patch.call_purpose {
            self.call_purpose = v;
        }
        if let Some(v) = patch.notes {
            self.notes = v;
        }
        if let Some(v) = patch.status {
            self.status = v;
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledCallFilter {
    pub status: Option<CallStatus>,
    pub inquiry_id: Option<i32>,
}
