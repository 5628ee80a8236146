// src/models/users.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::common::patch::nullable;

use super::status::UserRole;

// =========================================================================
//  USUÁRIOS (admin, pais, tutores)
// =========================================================================

#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i32,
    pub username: String,
    pub email: String,

    // Senha opaca; nunca sai na resposta
    #[serde(skip_serializing)]
    pub password: String,

    pub first_name: String,
    pub last_name: String,
    pub role: UserRole,
    pub phone: Option<String>,
    pub avatar: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    #[validate(length(min = 3, message = "username must have at least 3 characters"))]
    pub username: String,

    #[validate(email(message = "invalid email"))]
    pub email: String,

    #[validate(length(min = 1, message = "required"))]
    pub password: String,

    #[validate(length(min = 1, message = "required"))]
    pub first_name: String,

    #[validate(length(min = 1, message = "required"))]
    pub last_name: String,

    pub role: UserRole,
    pub phone: Option<String>,
    pub avatar: Option<String>,
}

impl NewUser {
    pub fn into_record(self, id: i32, created_at: DateTime<Utc>) -> User {
        User {
            id,
            username: self.username,
            email: self.email,
            password: self.password,
            first_name: self.first_name,
            last_name: self.last_name,
            role: self.role,
            phone: self.phone,
            avatar: self.avatar,
            created_at,
        }
    }
}

/// O papel não entra aqui: não existe troca de papel.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UserPatch {
    #[validate(email(message = "invalid email"))]
    pub email: Option<String>,

    #[validate(length(min = 1, message = "required"))]
    pub password: Option<String>,

    #[validate(length(min = 1, message = "required"))]
    pub first_name: Option<String>,

    #[validate(length(min = 1, message = "required"))]
    pub last_name: Option<String>,

    #[serde(default, deserialize_with = "nullable")]
    pub phone: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub avatar: Option<Option<String>>,
}

impl User {
    pub fn apply(&mut self, patch: UserPatch) {
        if let Some(email) = patch.email {
            self.email = email;
        }
        if let Some(password) = patch.password {
            self.password = password;
        }
        if let Some(first_name) = patch.first_name {
            self.first_name = first_name;
        }
        if let Some(last_name) = patch.last_name {
            self.last_name = last_name;
        }
        if let Some(v) = patch.phone {
            self.phone = v;
        }
        if let Some(v) = patch.avatar {
            self.avatar = v;
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserFilter {
    pub role: Option<UserRole>,
}

// Dados para login
#[derive(Debug, Deserialize, Validate)]
pub struct LoginPayload {
    #[validate(length(min = 1, message = "required"))]
    pub username: String,
    #[validate(length(min = 1, message = "required"))]
    pub password: String,
}

// =========================================================================
//  ALUNOS
// =========================================================================

#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub grade: String,

    // Referência "fraca": não verificamos se o pai existe
    pub parent_id: i32,

    pub school: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewStudent {
    #[validate(length(min = 1, message = "required"))]
    pub first_name: String,

    #[validate(length(min = 1, message = "required"))]
    pub last_name: String,

    #[validate(length(min = 1, message = "required"))]
    pub grade: String,

    pub parent_id: i32,
    pub school: Option<String>,
    pub notes: Option<String>,
}

impl NewStudent {
    pub fn into_record(self, id: i32, created_at: DateTime<Utc>) -> Student {
        Student {
            id,
            first_name: self.first_name,
            last_name: self.last_name,
            grade: self.grade,
            parent_id: self.parent_id,
            school: self.school,
            notes: self.notes,
            created_at,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct StudentPatch {
    #[validate(length(min = 1, message = "required"))]
    pub first_name: Option<String>,

    #[validate(length(min = 1, message = "required"))]
    pub last_name: Option<String>,

    #[validate(length(min = 1, message = "required"))]
    pub grade: Option<String>,

    pub parent_id: Option<i32>,
    #[serde(default, deserialize_with = "nullable")]
    pub school: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub notes: Option<Option<String>>,
}

impl Student {
    pub fn apply(&mut self, patch: StudentPatch) {
        if let Some(first_name) = patch.first_name {
            self.first_name = first_name;
        }
        if let Some(last_name) = patch.last_name {
            self.last_name = last_name;
        }
        if let Some(grade) = patch.grade {
            self.grade = grade;
        }
        if let Some(parent_id) = patch.parent_id {
            self.parent_id = parent_id;
        }
        if let Some(v) = patch.school {
            self.school = v;
        }
        if let Some(v) = patch.notes {
            self.notes = v;
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentFilter {
    pub parent_id: Option<i32>,
}
