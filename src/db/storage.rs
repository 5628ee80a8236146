// src/db/storage.rs
//
// Contrato único de persistência. Existem dois backends intercambiáveis:
// `MemStorage` (mapas em memória) e `PgStorage` (Postgres via sqlx).
// O backend é escolhido na configuração e injetado no AppState.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::{
    common::error::AppError,
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
        tutoring::{
            NewSession, NewSessionReport, NewTutor, Session, SessionFilter, SessionPatch,
            SessionReport, SessionReportFilter, SessionReportPatch, Tutor, TutorFilter, TutorPatch,
        },
        users::{
            NewStudent, NewUser, Student, StudentFilter, StudentPatch, User, UserFilter, UserPatch,
        },
    },
};

/// Quantas solicitações o card "recentes" mostra.
pub const RECENT_INQUIRIES_LIMIT: usize = 5;

/// Regras comuns a todos os tipos:
/// - `create_*` atribui id, `created_at` e o status padrão;
/// - `get_*` / `update_*` devolvem `Ok(None)` para id inexistente;
/// - `update_*` faz merge raso: campo ausente no patch fica como está,
///   `null` em campo anulável apaga o valor;
/// - `list_*` aplica os filtros presentes com AND.
#[async_trait]
pub trait Storage: Send + Sync {
    // --- Usuários ---
    async fn create_user(&self, new: NewUser) -> Result<User, AppError>;
    async fn get_user(&self, id: i32) -> Result<Option<User>, AppError>;
    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>, AppError>;
    async fn list_users(&self, filter: UserFilter) -> Result<Vec<User>, AppError>;
    async fn update_user(&self, id: i32, patch: UserPatch) -> Result<Option<User>, AppError>;

    // --- Alunos ---
    async fn create_student(&self, new: NewStudent) -> Result<Student, AppError>;
    async fn get_student(&self, id: i32) -> Result<Option<Student>, AppError>;
    async fn list_students(&self, filter: StudentFilter) -> Result<Vec<Student>, AppError>;
    async fn update_student(
        &self,
        id: i32,
        patch: StudentPatch,
    ) -> Result<Option<Student>, AppError>;

    // --- Solicitações ---
    async fn create_inquiry(&self, new: NewInquiry) -> Result<Inquiry, AppError>;
    async fn get_inquiry(&self, id: i32) -> Result<Option<Inquiry>, AppError>;
    async fn list_inquiries(&self, filter: InquiryFilter) -> Result<Vec<Inquiry>, AppError>;
    async fn update_inquiry(
        &self,
        id: i32,
        patch: InquiryPatch,
    ) -> Result<Option<Inquiry>, AppError>;

    /// Update restrito ao status. Valor fora do enum devolve
    /// `AppError::InvalidStatus` e não toca no registro.
    async fn update_inquiry_status(
        &self,
        id: i32,
        status: &str,
    ) -> Result<Option<Inquiry>, AppError>;

    /// As `RECENT_INQUIRIES_LIMIT` mais novas, da mais recente para a mais antiga.
    async fn recent_inquiries(&self) -> Result<Vec<Inquiry>, AppError>;

    // --- Tutores ---
    async fn create_tutor(&self, new: NewTutor) -> Result<Tutor, AppError>;
    async fn get_tutor(&self, id: i32) -> Result<Option<Tutor>, AppError>;
    async fn list_tutors(&self, filter: TutorFilter) -> Result<Vec<Tutor>, AppError>;
    async fn update_tutor(&self, id: i32, patch: TutorPatch) -> Result<Option<Tutor>, AppError>;

    // --- Ligações ---
    // Só grava a ligação. O efeito colateral na solicitação fica no SchedulingService.
    async fn create_scheduled_call(&self, new: NewScheduledCall) -> Result<ScheduledCall, AppError>;
    async fn get_scheduled_call(&self, id: i32) -> Result<Option<ScheduledCall>, AppError>;
    async fn list_scheduled_calls(
        &self,
        filter: ScheduledCallFilter,
    ) -> Result<Vec<ScheduledCall>, AppError>;
    async fn update_scheduled_call(
        &self,
        id: i32,
        patch: ScheduledCallPatch,
    ) -> Result<Option<ScheduledCall>, AppError>;

    // --- Aulas ---
    async fn create_session(&self, new: NewSession) -> Result<Session, AppError>;
    async fn get_session(&self, id: i32) -> Result<Option<Session>, AppError>;
    async fn list_sessions(&self, filter: SessionFilter) -> Result<Vec<Session>, AppError>;
    async fn update_session(
        &self,
        id: i32,
        patch: SessionPatch,
    ) -> Result<Option<Session>, AppError>;

    // --- Relatórios ---
    async fn create_session_report(&self, new: NewSessionReport) -> Result<SessionReport, AppError>;
    async fn get_session_report(&self, id: i32) -> Result<Option<SessionReport>, AppError>;
    async fn list_session_reports(
        &self,
        filter: SessionReportFilter,
    ) -> Result<Vec<SessionReport>, AppError>;
    async fn update_session_report(
        &self,
        id: i32,
        patch: SessionReportPatch,
    ) -> Result<Option<SessionReport>, AppError>;

    // --- Faturas ---
    async fn create_invoice(&self, new: NewInvoice) -> Result<Invoice, AppError>;
    async fn get_invoice(&self, id: i32) -> Result<Option<Invoice>, AppError>;
    async fn list_invoices(&self, filter: InvoiceFilter) -> Result<Vec<Invoice>, AppError>;
    async fn update_invoice(
        &self,
        id: i32,
        patch: InvoicePatch,
    ) -> Result<Option<Invoice>, AppError>;

    async fn create_invoice_item(&self, new: NewInvoiceItem) -> Result<InvoiceItem, AppError>;
    async fn get_invoice_item(&self, id: i32) -> Result<Option<InvoiceItem>, AppError>;
    async fn list_invoice_items(
        &self,
        filter: InvoiceItemFilter,
    ) -> Result<Vec<InvoiceItem>, AppError>;
    async fn update_invoice_item(
        &self,
        id: i32,
        patch: InvoiceItemPatch,
    ) -> Result<Option<InvoiceItem>, AppError>;

    // --- Dashboard ---
    /// Agregados do dashboard. A receita é a soma das faturas pagas
    /// com `paid_date` no mesmo mês/ano de `today`.
    async fn dashboard_totals(&self, today: NaiveDate) -> Result<DashboardTotals, AppError>;
}
