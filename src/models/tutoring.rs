// src/models/tutoring.rs

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use validator::Validate;

use crate::common::patch::nullable;

use super::status::SessionStatus;

// =========================================================================
//  TUTORES
// =========================================================================

#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Tutor {
    pub id: i32,
    pub user_id: i32,
    pub subjects: Vec<String>,
    pub education: Option<String>,
    pub bio: Option<String>,

    // Centavos por hora
    pub hourly_rate: i64,

    // Blob opaco vindo do front (JSONB no Postgres)
    pub availability: Value,

    pub location: Option<String>,
    pub zip_code: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewTutor {
    pub user_id: i32,

    #[serde(default)]
    pub subjects: Vec<String>,

    pub education: Option<String>,
    pub bio: Option<String>,

    #[validate(range(min = 0, message = "hourly rate cannot be negative"))]
    pub hourly_rate: i64,

    #[serde(default)]
    pub availability: Value,

    pub location: Option<String>,
    pub zip_code: Option<String>,
    pub is_active: Option<bool>,
}

impl NewTutor {
    pub fn into_record(self, id: i32, created_at: DateTime<Utc>) -> Tutor {
        Tutor {
            id,
            user_id: self.user_id,
            subjects: self.subjects,
            education: self.education,
            bio: self.bio,
            hourly_rate: self.hourly_rate,
            availability: self.availability,
            location: self.location,
            zip_code: self.zip_code,
            is_active: self.is_active.unwrap_or(true),
            created_at,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TutorPatch {
    pub user_id: Option<i32>,
    pub subjects: Option<Vec<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub education: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub bio: Option<Option<String>>,

    #[validate(range(min = 0, message = "hourly rate cannot be negative"))]
    pub hourly_rate: Option<i64>,

    pub availability: Option<Value>,
    #[serde(default, deserialize_with = "nullable")]
    pub location: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub zip_code: Option<Option<String>>,
    pub is_active: Option<bool>,
}

impl Tutor {
    pub fn apply(&mut self, patch: TutorPatch) {
        if let Some(v) = patch.user_id {
            self.user_id = v;
        }
        if let Some(v) = patch.subjects {
            self.subjects = v;
        }
        if let Some(v) = patch.education {
            self.education = v;
        }
        if let Some(v) = patch.bio {
            self.bio = v;
        }
        if let Some(v) = patch.hourly_rate {
            self.hourly_rate = v;
        }
        if let Some(v) = patch.availability {
            self.availability = v;
        }
        if let Some(v) = patch.location {
            self.location = v;
        }
        if let Some(v) = patch.zip_code {
            self.zip_code = v;
        }
        if let Some(v) = patch.is_active {
            self.is_active = v;
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TutorFilter {
    pub active: Option<bool>,
}

// =========================================================================
//  AULAS (Session)
// =========================================================================

#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id: i32,
    pub tutor_id: i32,
    pub student_id: i32,
    pub subject: String,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub location: Option<String>,
    pub notes: Option<String>,
    pub status: SessionStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewSession {
    pub tutor_id: i32,
    pub student_id: i32,

    #[validate(length(min = 1, message = "required"))]
    pub subject: String,

    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub location: Option<String>,
    pub notes: Option<String>,
}

impl NewSession {
    pub fn into_record(self, id: i32, created_at: DateTime<Utc>) -> Session {
        Session {
            id,
            tutor_id: self.tutor_id,
            student_id: self.student_id,
            subject: self.subject,
            date: self.date,
            start_time: self.start_time,
            end_time: self.end_time,
            location: self.location,
            notes: self.notes,
            status: SessionStatus::Scheduled,
            created_at,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SessionPatch {
    pub tutor_id: Option<i32>,
    pub student_id: Option<i32>,

    #[validate(length(min = 1, message = "required"))]
    pub subject: Option<String>,

    pub date: Option<NaiveDate>,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    #[serde(default, deserialize_with = "nullable")]
    pub location: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub notes: Option<Option<String>>,
    pub status: Option<SessionStatus>,
}

impl Session {
    pub fn apply(&mut self, patch: SessionPatch) {
        if let Some(v) = patch.tutor_id {
            self.tutor_id = v;
        }
        if let Some(v) = patch.student_id {
            self.student_id = v;
        }
        if let Some(v) = patch.subject {
            self.subject = v;
        }
        if let Some(v) = patch.date {
            self.date = v;
        }
        if let Some(v) = patch.start_time {
            self.start_time = v;
        }
        if let Some(v) = patch.end_time {
            self.end_time = v;
        }
        if let Some(v) = patch.location {
            self.location = v;
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
pub struct SessionFilter {
    pub status: Option<SessionStatus>,
    pub tutor_id: Option<i32>,
    pub student_id: Option<i32>,
    pub date: Option<NaiveDate>,
}

// =========================================================================
//  RELATÓRIOS DE AULA
// =========================================================================

#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct SessionReport {
    pub id: i32,
    pub session_id: i32,
    pub topics_covered: String,
    pub summary: String,
    pub homework: Option<String>,
    pub progress: String,
    pub internal_notes: Option<String>,

    // As duas flags são independentes (nada impede enviar sem aprovar)
    pub admin_approved: bool,
    pub sent_to_parent: bool,

    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewSessionReport {
    pub session_id: i32,

    #[validate(length(min = 1, message = "required"))]
    pub topics_covered: String,

    #[validate(length(min = 1, message = "required"))]
    pub summary: String,

    pub homework: Option<String>,

    #[validate(length(min = 1, message = "required"))]
    pub progress: String,

    pub internal_notes: Option<String>,
}

impl NewSessionReport {
    pub fn into_record(self, id: i32, created_at: DateTime<Utc>) -> SessionReport {
        SessionReport {
            id,
            session_id: self.session_id,
            topics_covered: self.topics_covered,
            summary: self.summary,
            homework: self.homework,
            progress: self.progress,
            internal_notes: self.internal_notes,
            admin_approved: false,
            sent_to_parent: false,
            created_at,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SessionReportPatch {
    #[validate(length(min = 1, message = "required"))]
    pub topics_covered: Option<String>,

    #[validate(length(min = 1, message = "required"))]
    pub summary: Option<String>,

    #[serde(default, deserialize_with = "nullable")]
    pub homework: Option<Option<String>>,

    #[validate(length(min = 1, message = "required"))]
    pub progress: Option<String>,

    #[serde(default, deserialize_with = "nullable")]
    pub internal_notes: Option<Option<String>>,
    pub admin_approved: Option<bool>,
    pub sent_to_parent: Option<bool>,
}

impl SessionReport {
    pub fn apply(&mut self, patch: SessionReportPatch) {
        if let Some(v) = patch.topics_covered {
            self.topics_covered = v;
        }
        if let Some(v) = patch.summary {
            self.summary = v;
        }
        if let Some(v) = patch.homework {
            self.homework = v;
        }
        if let Some(v) = patch.progress {
            self.progress = v;
        }
        if let Some(v) = patch.internal_notes {
            self.internal_notes = v;
        }
        if let Some(v) = patch.admin_approved {
            self.admin_approved = v;
        }
        if let Some(v) = patch.sent_to_parent {
            self.sent_to_parent = v;
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionReportFilter {
    pub session_id: Option<i32>,
    pub approved: Option<bool>,
    pub sent: Option<bool>,
}
