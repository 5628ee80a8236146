// src/handlers.rs

pub mod auth;
pub mod billing;
pub mod dashboard;
pub mod inquiries;
pub mod tutoring;
pub mod users;
