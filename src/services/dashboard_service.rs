// src/services/dashboard_service.rs

use std::sync::Arc;

use chrono::{Local, NaiveDate};

use crate::{
    common::{error::AppError, money::format_usd},
    db::Storage,
    models::{
        dashboard::{DashboardStats, Participant, TodaySession},
        intake::Inquiry,
        status::SessionStatus,
        tutoring::{Session, SessionFilter},
    },
};

/// Quantas aulas o card "Hoje" mostra.
pub const TODAY_SESSIONS_LIMIT: usize = 3;

const DEFAULT_TOPIC: &str = "General tutoring";

#[derive(Clone)]
pub struct DashboardService {
    storage: Arc<dyn Storage>,
}

impl DashboardService {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    // "Hoje" é o dia local do processo
    fn today() -> NaiveDate {
        Local::now().date_naive()
    }

    // 1. Cards do topo
    pub async fn get_stats(&self) -> Result<DashboardStats, AppError> {
        self.stats_for(Self::today()).await
    }

    pub async fn stats_for(&self, today: NaiveDate) -> Result<DashboardStats, AppError> {
        let totals = self.storage.dashboard_totals(today).await?;

        Ok(DashboardStats {
            new_inquiries: totals.new_inquiries,
            active_students: totals.active_students,
            active_tutors: totals.active_tutors,
            monthly_revenue: format_usd(totals.monthly_revenue_cents),
        })
    }

    // 2. Solicitações recentes
    pub async fn recent_inquiries(&self) -> Result<Vec<Inquiry>, AppError> {
        self.storage.recent_inquiries().await
    }

    // 3. Aulas de hoje
    pub async fn today_sessions(&self) -> Result<Vec<TodaySession>, AppError> {
        self.sessions_on(Self::today()).await
    }

    /// Aulas agendadas na data, no máximo `TODAY_SESSIONS_LIMIT`, com nome e
    /// iniciais de aluno/tutor já resolvidos.
    pub async fn sessions_on(&self, date: NaiveDate) -> Result<Vec<TodaySession>, AppError> {
        let filter = SessionFilter {
            status: Some(SessionStatus::Scheduled),
            date: Some(date),
            ..Default::default()
        };
        let sessions = self.storage.list_sessions(filter).await?;

        let mut enriched = Vec::with_capacity(TODAY_SESSIONS_LIMIT);
        for session in sessions.into_iter().take(TODAY_SESSIONS_LIMIT) {
            enriched.push(self.enrich(session).await?);
        }
        Ok(enriched)
    }

    async fn enrich(&self, session: Session) -> Result<TodaySession, AppError> {
        let student = self.student_participant(session.student_id).await?;
        let tutor = self.tutor_participant(session.tutor_id).await?;

        Ok(TodaySession {
            id: session.id,
            time: format!(
                "{} - {}",
                session.start_time.format("%H:%M"),
                session.end_time.format("%H:%M")
            ),
            subject: session.subject,
            topic: session.notes.unwrap_or_else(|| DEFAULT_TOPIC.to_string()),
            student,
            tutor,
        })
    }

    async fn student_participant(&self, student_id: i32) -> Result<Participant, AppError> {
        let participant = match self.storage.get_student(student_id).await? {
            Some(student) => Participant {
                id: student_id,
                name: student.full_name(),
                initials: initials(&student.first_name, &student.last_name),
            },
            None => placeholder(student_id, "Student", "ST"),
        };
        Ok(participant)
    }

    // Tutor -> User para achar o nome
    async fn tutor_participant(&self, tutor_id: i32) -> Result<Participant, AppError> {
        let user = match self.storage.get_tutor(tutor_id).await? {
            Some(tutor) => self.storage.get_user(tutor.user_id).await?,
            None => None,
        };

        let participant = match user {
            Some(user) => Participant {
                id: tutor_id,
                name: user.full_name(),
                initials: initials(&user.first_name, &user.last_name),
            },
            None => placeholder(tutor_id, "Tutor", "TU"),
        };
        Ok(participant)
    }
}

fn initials(first_name: &str, last_name: &str) -> String {
    first_name
        .chars()
        .take(1)
        .chain(last_name.chars().take(1))
        .flat_map(char::to_uppercase)
        .collect()
}

fn placeholder(id: i32, label: &str, initials: &str) -> Participant {
    Participant {
        id,
        name: format!("{} #{}", label, id),
        initials: initials.to_string(),
    }
}
