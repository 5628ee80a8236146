// src/models/dashboard.rs

use serde::Serialize;

// 1. Agregados crus, calculados pelo backend de storage
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DashboardTotals {
    pub new_inquiries: i64,
    pub active_students: i64,
    pub active_tutors: i64,
    pub monthly_revenue_cents: i64,
}

// 2. Os cards do topo do dashboard
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub new_inquiries: i64,
    pub active_students: i64,
    pub active_tutors: i64,
    pub monthly_revenue: String, // Ex: "$1,250.00"
}

// 3. Aulas de hoje, já com nomes resolvidos
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TodaySession {
    pub id: i32,
    pub time: String, // "14:00 - 15:00"
    pub subject: String,
    pub topic: String,
    pub student: Participant,
    pub tutor: Participant,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Participant {
    pub id: i32,
    pub name: String,
    pub initials: String,
}
