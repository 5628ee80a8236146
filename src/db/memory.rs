// src/db/memory.rs

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{Datelike, NaiveDate, Utc};
use tokio::sync::RwLock;

use crate::{
    common::error::AppError,
    db::{
        id_allocator::IdAllocator,
        storage::{Storage, RECENT_INQUIRIES_LIMIT},
    },
    models::{
        billing::{
            Invoice, InvoiceFilter, InvoiceItem, InvoiceItemFilter, InvoiceItemPatch,
            InvoicePatch, NewInvoice, NewInvoiceItem,
        },
        dashboard::DashboardTotals,
        intake::{
            Inquiry, InquiryFilter, InquiryPatch, NewInquiry, NewScheduledCall, ScheduledCall,
            ScheduledCallFilter, ScheduledCallPatch,
        },
        status::{InquiryStatus, InvoiceStatus},
        tutoring::{
            NewSession, NewSessionReport, NewTutor, Session, SessionFilter, SessionPatch,
            SessionReport, SessionReportFilter, SessionReportPatch, Tutor, TutorFilter, TutorPatch,
        },
        users::{
            NewStudent, NewUser, Student, StudentFilter, StudentPatch, User, UserFilter, UserPatch,
        },
    },
};

// =========================================================================
//  TABELA GENÉRICA (mapa ordenado por id + alocador próprio)
// =========================================================================

#[derive(Debug)]
struct Table<T> {
    rows: BTreeMap<i32, T>,
    ids: IdAllocator,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
            ids: IdAllocator::new(),
        }
    }
}

impl<T: Clone> Table<T> {
    fn insert_with(&mut self, build: impl FnOnce(i32) -> T) -> T {
        let id = self.ids.next();
        let row = build(id);
        self.rows.insert(id, row.clone());
        row
    }

    fn get(&self, id: i32) -> Option<T> {
        self.rows.get(&id).cloned()
    }

    fn select(&self, keep: impl Fn(&T) -> bool) -> Vec<T> {
        self.rows.values().filter(|row| keep(row)).cloned().collect()
    }

    fn update(&mut self, id: i32, merge: impl FnOnce(&mut T)) -> Option<T> {
        let row = self.rows.get_mut(&id)?;
        merge(row);
        Some(row.clone())
    }

    fn count(&self, keep: impl Fn(&T) -> bool) -> i64 {
        self.rows.values().filter(|row| keep(row)).count() as i64
    }
}

// Filtro ausente casa com tudo
fn matches<T: PartialEq>(filter: &Option<T>, value: &T) -> bool {
    filter.as_ref().is_none_or(|wanted| wanted == value)
}

#[derive(Debug, Default)]
struct Tables {
    users: Table<User>,
    students: Table<Student>,
    inquiries: Table<Inquiry>,
    tutors: Table<Tutor>,
    calls: Table<ScheduledCall>,
    sessions: Table<Session>,
    reports: Table<SessionReport>,
    invoices: Table<Invoice>,
    invoice_items: Table<InvoiceItem>,
}

impl Tables {
    fn check_user_unique(
        &self,
        username: Option<&str>,
        email: Option<&str>,
        skip_id: i32,
    ) -> Result<(), AppError> {
        for user in self.users.rows.values().filter(|u| u.id != skip_id) {
            if username == Some(user.username.as_str()) {
                return Err(AppError::UniqueConstraintViolation(format!(
                    "Username '{}' is already taken.",
                    user.username
                )));
            }
            if email == Some(user.email.as_str()) {
                return Err(AppError::UniqueConstraintViolation(format!(
                    "Email '{}' is already in use.",
                    user.email
                )));
            }
        }
        Ok(())
    }
}

/// Backend em memória. Um único `RwLock` cobre todas as tabelas, então
/// alocar id + gravar (create) e ler + mesclar + gravar (update) acontecem
/// sob o mesmo guard de escrita.
#[derive(Debug, Default)]
pub struct MemStorage {
    tables: RwLock<Tables>,
}

impl MemStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Storage for MemStorage {
    // =========================================================================
    //  USUÁRIOS
    // =========================================================================

    async fn create_user(&self, new: NewUser) -> Result<User, AppError> {
        let mut tables = self.tables.write().await;
        tables.check_user_unique(Some(new.username.as_str()), Some(new.email.as_str()), 0)?;
        let now = Utc::now();
        Ok(tables.users.insert_with(|id| new.into_record(id, now)))
    }

    async fn get_user(&self, id: i32) -> Result<Option<User>, AppError> {
        Ok(self.tables.read().await.users.get(id))
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables.users.rows.values().find(|u| u.username == username).cloned())
    }

    async fn list_users(&self, filter: UserFilter) -> Result<Vec<User>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables.users.select(|u| matches(&filter.role, &u.role)))
    }

    async fn update_user(&self, id: i32, patch: UserPatch) -> Result<Option<User>, AppError> {
        let mut tables = self.tables.write().await;
        // Id inexistente é "não encontrado", mesmo que o e-mail colida
        if !tables.users.rows.contains_key(&id) {
            return Ok(None);
        }
        tables.check_user_unique(None, patch.email.as_deref(), id)?;
        Ok(tables.users.update(id, |user| user.apply(patch)))
    }

    // =========================================================================
    //  ALUNOS
    // =========================================================================

    async fn create_student(&self, new: NewStudent) -> Result<Student, AppError> {
        let now = Utc::now();
        let mut tables = self.tables.write().await;
        Ok(tables.students.insert_with(|id| new.into_record(id, now)))
    }

    async fn get_student(&self, id: i32) -> Result<Option<Student>, AppError> {
        Ok(self.tables.read().await.students.get(id))
    }

    async fn list_students(&self, filter: StudentFilter) -> Result<Vec<Student>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables.students.select(|s| matches(&filter.parent_id, &s.parent_id)))
    }

    async fn update_student(
        &self,
        id: i32,
        patch: StudentPatch,
    ) -> Result<Option<Student>, AppError> {
        let mut tables = self.tables.write().await;
        Ok(tables.students.update(id, |student| student.apply(patch)))
    }

    // =========================================================================
    //  SOLICITAÇÕES
    // =========================================================================

    async fn create_inquiry(&self, new: NewInquiry) -> Result<Inquiry, AppError> {
        let now = Utc::now();
        let mut tables = self.tables.write().await;
        Ok(tables.inquiries.insert_with(|id| new.into_record(id, now)))
    }

    async fn get_inquiry(&self, id: i32) -> Result<Option<Inquiry>, AppError> {
        Ok(self.tables.read().await.inquiries.get(id))
    }

    async fn list_inquiries(&self, filter: InquiryFilter) -> Result<Vec<Inquiry>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables.inquiries.select(|i| matches(&filter.status, &i.status)))
    }

    async fn update_inquiry(
        &self,
        id: i32,
        patch: InquiryPatch,
    ) -> Result<Option<Inquiry>, AppError> {
        let mut tables = self.tables.write().await;
        Ok(tables.inquiries.update(id, |inquiry| inquiry.apply(patch)))
    }

    async fn update_inquiry_status(
        &self,
        id: i32,
        status: &str,
    ) -> Result<Option<Inquiry>, AppError> {
        // Valida antes de pegar o lock: valor inválido nunca toca no registro
        let status: InquiryStatus = status.parse()?;
        let mut tables = self.tables.write().await;
        Ok(tables.inquiries.update(id, |inquiry| inquiry.status = status))
    }

    async fn recent_inquiries(&self) -> Result<Vec<Inquiry>, AppError> {
        let tables = self.tables.read().await;
        let mut inquiries: Vec<Inquiry> = tables.inquiries.rows.values().cloned().collect();
        // Empate de timestamp: o id maior foi criado depois
        inquiries.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        inquiries.truncate(RECENT_INQUIRIES_LIMIT);
        Ok(inquiries)
    }

    // =========================================================================
    //  TUTORES
    // =========================================================================

    async fn create_tutor(&self, new: NewTutor) -> Result<Tutor, AppError> {
        let now = Utc::now();
        let mut tables = self.tables.write().await;
        Ok(tables.tutors.insert_with(|id| new.into_record(id, now)))
    }

    async fn get_tutor(&self, id: i32) -> Result<Option<Tutor>, AppError> {
        Ok(self.tables.read().await.tutors.get(id))
    }

    async fn list_tutors(&self, filter: TutorFilter) -> Result<Vec<Tutor>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables.tutors.select(|t| matches(&filter.active, &t.is_active)))
    }

    async fn update_tutor(&self, id: i32, patch: TutorPatch) -> Result<Option<Tutor>, AppError> {
        let mut tables = self.tables.write().await;
        Ok(tables.tutors.update(id, |tutor| tutor.apply(patch)))
    }

    // =========================================================================
    //  LIGAÇÕES
    // =========================================================================

    async fn create_scheduled_call(
        &self,
        new: NewScheduledCall,
    ) -> Result<ScheduledCall, AppError> {
        let now = Utc::now();
        let mut tables = self.tables.write().await;
        Ok(tables.calls.insert_with(|id| new.into_record(id, now)))
    }

    async fn get_scheduled_call(&self, id: i32) -> Result<Option<ScheduledCall>, AppError> {
        Ok(self.tables.read().await.calls.get(id))
    }

    async fn list_scheduled_calls(
        &self,
        filter: ScheduledCallFilter,
    ) -> Result<Vec<ScheduledCall>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables.calls.select(|c| {
            matches(&filter.status, &c.status)
                && filter.inquiry_id.is_none_or(|wanted| c.inquiry_id == Some(wanted))
        }))
    }

    async fn update_scheduled_call(
        &self,
        id: i32,
        patch: ScheduledCallPatch,
    ) -> Result<Option<ScheduledCall>, AppError> {
        let mut tables = self.tables.write().await;
        Ok(tables.calls.update(id, |call| call.apply(patch)))
    }

    // =========================================================================
    //  AULAS
    // =========================================================================

    async fn create_session(&self, new: NewSession) -> Result<Session, AppError> {
        let now = Utc::now();
        let mut tables = self.tables.write().await;
        Ok(tables.sessions.insert_with(|id| new.into_record(id, now)))
    }

    async fn get_session(&self, id: i32) -> Result<Option<Session>, AppError> {
        Ok(self.tables.read().await.sessions.get(id))
    }

    async fn list_sessions(&self, filter: SessionFilter) -> Result<Vec<Session>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables.sessions.select(|s| {
            matches(&filter.status, &s.status)
                && matches(&filter.tutor_id, &s.tutor_id)
                && matches(&filter.student_id, &s.student_id)
                && matches(&filter.date, &s.date)
        }))
    }

    async fn update_session(
        &self,
        id: i32,
        patch: SessionPatch,
    ) -> Result<Option<Session>, AppError> {
        let mut tables = self.tables.write().await;
        Ok(tables.sessions.update(id, |session| session.apply(patch)))
    }

    // =========================================================================
    //  RELATÓRIOS
    // =========================================================================

    async fn create_session_report(
        &self,
        new: NewSessionReport,
    ) -> Result<SessionReport, AppError> {
        let now = Utc::now();
        let mut tables = self.tables.write().await;
        Ok(tables.reports.insert_with(|id| new.into_record(id, now)))
    }

    async fn get_session_report(&self, id: i32) -> Result<Option<SessionReport>, AppError> {
        Ok(self.tables.read().await.reports.get(id))
    }

    async fn list_session_reports(
        &self,
        filter: SessionReportFilter,
    ) -> Result<Vec<SessionReport>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables.reports.select(|r| {
            matches(&filter.session_id, &r.session_id)
                && matches(&filter.approved, &r.admin_approved)
                && matches(&filter.sent, &r.sent_to_parent)
        }))
    }

    async fn update_session_report(
        &self,
        id: i32,
        patch: SessionReportPatch,
    ) -> Result<Option<SessionReport>, AppError> {
        let mut tables = self.tables.write().await;
        Ok(tables.reports.update(id, |report| report.apply(patch)))
    }

    // =========================================================================
    //  FATURAS
    // =========================================================================

    async fn create_invoice(&self, new: NewInvoice) -> Result<Invoice, AppError> {
        let now = Utc::now();
        let mut tables = self.tables.write().await;
        Ok(tables.invoices.insert_with(|id| new.into_record(id, now)))
    }

    async fn get_invoice(&self, id: i32) -> Result<Option<Invoice>, AppError> {
        Ok(self.tables.read().await.invoices.get(id))
    }

    async fn list_invoices(&self, filter: InvoiceFilter) -> Result<Vec<Invoice>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables.invoices.select(|i| {
            matches(&filter.status, &i.status)
                && matches(&filter.tutor_id, &i.tutor_id)
                && matches(&filter.parent_id, &i.parent_id)
        }))
    }

    async fn update_invoice(
        &self,
        id: i32,
        patch: InvoicePatch,
    ) -> Result<Option<Invoice>, AppError> {
        let mut tables = self.tables.write().await;
        Ok(tables.invoices.update(id, |invoice| invoice.apply(patch)))
    }

    async fn create_invoice_item(&self, new: NewInvoiceItem) -> Result<InvoiceItem, AppError> {
        let now = Utc::now();
        let mut tables = self.tables.write().await;
        Ok(tables.invoice_items.insert_with(|id| new.into_record(id, now)))
    }

    async fn get_invoice_item(&self, id: i32) -> Result<Option<InvoiceItem>, AppError> {
        Ok(self.tables.read().await.invoice_items.get(id))
    }

    async fn list_invoice_items(
        &self,
        filter: InvoiceItemFilter,
    ) -> Result<Vec<InvoiceItem>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables.invoice_items.select(|i| matches(&filter.invoice_id, &i.invoice_id)))
    }

    async fn update_invoice_item(
        &self,
        id: i32,
        patch: InvoiceItemPatch,
    ) -> Result<Option<InvoiceItem>, AppError> {
        let mut tables = self.tables.write().await;
        Ok(tables.invoice_items.update(id, |item| item.apply(patch)))
    }

    // =========================================================================
    //  DASHBOARD
    // =========================================================================

    async fn dashboard_totals(&self, today: NaiveDate) -> Result<DashboardTotals, AppError> {
        let tables = self.tables.read().await;

        let monthly_revenue_cents = tables
            .invoices
            .rows
            .values()
            .filter(|inv| inv.status == InvoiceStatus::Paid)
            .filter(|inv| {
                inv.paid_date.is_some_and(|paid| {
                    paid.year() == today.year() && paid.month() == today.month()
                })
            })
            // Satura em i64::MAX, igual ao LEAST do Postgres
            .fold(0i64, |total, inv| total.saturating_add(inv.amount));

        Ok(DashboardTotals {
            new_inquiries: tables.inquiries.count(|i| i.status == InquiryStatus::New),
            active_students: tables.students.rows.len() as i64,
            active_tutors: tables.tutors.count(|t| t.is_active),
            monthly_revenue_cents,
        })
    }
}
