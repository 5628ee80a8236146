// src/db/postgres.rs

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use sqlx::PgPool;

use crate::{
    common::error::{map_unique_violation, AppError},
    db::storage::{Storage, RECENT_INQUIRIES_LIMIT},
    models::{
        billing::{
            Invoice, InvoiceFilter, InvoiceItem, InvoiceItemFilter, InvoiceItemPatch,
            InvoicePatch, NewInvoice, NewInvoiceItem,
        },
        dashboard::DashboardTotals,
        intake::{
            Inquiry, InquiryFilter, InquiryPatch, NewInquiry, NewScheduledCall, ScheduledCall,
            ScheduledCallFilter, ScheduledCallPatch, DEFAULT_CALL_DURATION_MINUTES,
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

// Backend relacional. Cada operação é um único statement (create/update
// commitam sozinhos). Merge de update:
// - coluna NOT NULL: COALESCE(param, coluna);
// - coluna anulável: CASE WHEN <presente> THEN param ELSE coluna END,
//   para que `null` no PATCH apague o valor.
#[derive(Clone)]
pub struct PgStorage {
    pool: PgPool,
}

impl PgStorage {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn run_migrations(&self) -> Result<(), AppError> {
        sqlx::migrate!()
            .run(&self.pool)
            .await
            .map_err(|e| AppError::InternalServerError(e.into()))?;
        Ok(())
    }
}

#[async_trait]
impl Storage for PgStorage {
    // =========================================================================
    //  USUÁRIOS
    // =========================================================================

    async fn create_user(&self, new: NewUser) -> Result<User, AppError> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users
                (username, email, password, first_name, last_name, role, phone, avatar, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(&new.username)
        .bind(&new.email)
        .bind(&new.password)
        .bind(&new.first_name)
        .bind(&new.last_name)
        .bind(new.role)
        .bind(&new.phone)
        .bind(&new.avatar)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            map_unique_violation(e, || {
                format!("Username '{}' or email '{}' already exists.", new.username, new.email)
            })
        })
    }

    async fn get_user(&self, id: i32) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE username = $1")
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn list_users(&self, filter: UserFilter) -> Result<Vec<User>, AppError> {
        let users = sqlx::query_as::<_, User>(
            "SELECT * FROM users WHERE ($1::user_role IS NULL OR role = $1) ORDER BY id",
        )
        .bind(filter.role)
        .fetch_all(&self.pool)
        .await?;
        Ok(users)
    }

    async fn update_user(&self, id: i32, patch: UserPatch) -> Result<Option<User>, AppError> {
        let email = patch.email.clone();
        sqlx::query_as::<_, User>(
            r#"
            UPDATE users SET
                email = COALESCE($2, email),
                password = COALESCE($3, password),
                first_name = COALESCE($4, first_name),
                last_name = COALESCE($5, last_name),
                phone = CASE WHEN $6 THEN $7 ELSE phone END,
                avatar = CASE WHEN $8 THEN $9 ELSE avatar END
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(patch.email)
        .bind(patch.password)
        .bind(patch.first_name)
        .bind(patch.last_name)
        .bind(patch.phone.is_some())
        .bind(patch.phone.flatten())
        .bind(patch.avatar.is_some())
        .bind(patch.avatar.flatten())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            map_unique_violation(e, || {
                format!("Email '{}' is already in use.", email.unwrap_or_default())
            })
        })
    }

    // =========================================================================
    //  ALUNOS
    // =========================================================================

    async fn create_student(&self, new: NewStudent) -> Result<Student, AppError> {
        let student = sqlx::query_as::<_, Student>(
            r#"
            INSERT INTO students
                (first_name, last_name, grade, parent_id, school, notes, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(new.first_name)
        .bind(new.last_name)
        .bind(new.grade)
        .bind(new.parent_id)
        .bind(new.school)
        .bind(new.notes)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;
        Ok(student)
    }

    async fn get_student(&self, id: i32) -> Result<Option<Student>, AppError> {
        let student = sqlx::query_as::<_, Student>("SELECT * FROM students WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(student)
    }

    async fn list_students(&self, filter: StudentFilter) -> Result<Vec<Student>, AppError> {
        let students = sqlx::query_as::<_, Student>(
            "SELECT * FROM students WHERE ($1::int IS NULL OR parent_id = $1) ORDER BY id",
        )
        .bind(filter.parent_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(students)
    }

    async fn update_student(
        &self,
        id: i32,
        patch: StudentPatch,
    ) -> Result<Option<Student>, AppError> {
        let student = sqlx::query_as::<_, Student>(
            r#"
            UPDATE students SET
                first_name = COALESCE($2, first_name),
                last_name = COALESCE($3, last_name),
                grade = COALESCE($4, grade),
                parent_id = COALESCE($5, parent_id),
                school = CASE WHEN $6 THEN $7 ELSE school END,
                notes = CASE WHEN $8 THEN $9 ELSE notes END
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(patch.first_name)
        .bind(patch.last_name)
        .bind(patch.grade)
        .bind(patch.parent_id)
        .bind(patch.school.is_some())
        .bind(patch.school.flatten())
        .bind(patch.notes.is_some())
        .bind(patch.notes.flatten())
        .fetch_optional(&self.pool)
        .await?;
        Ok(student)
    }

    // =========================================================================
    //  SOLICITAÇÕES
    // =========================================================================

    async fn create_inquiry(&self, new: NewInquiry) -> Result<Inquiry, AppError> {
        // status fica no DEFAULT 'new' da tabela
        let inquiry = sqlx::query_as::<_, Inquiry>(
            r#"
            INSERT INTO inquiries (
                parent_first_name, parent_last_name, parent_email, parent_phone,
                student_name, student_grade, subject, specific_needs, location,
                zip_code, availability, additional_info, budget, contact_preference,
                referral, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
            RETURNING *
            "#,
        )
        .bind(new.parent_first_name)
        .bind(new.parent_last_name)
        .bind(new.parent_email)
        .bind(new.parent_phone)
        .bind(new.student_name)
        .bind(new.student_grade)
        .bind(new.subject)
        .bind(new.specific_needs)
        .bind(new.location)
        .bind(new.zip_code)
        .bind(new.availability)
        .bind(new.additional_info)
        .bind(new.budget)
        .bind(new.contact_preference)
        .bind(new.referral)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;
        Ok(inquiry)
    }

    async fn get_inquiry(&self, id: i32) -> Result<Option<Inquiry>, AppError> {
        let inquiry = sqlx::query_as::<_, Inquiry>("SELECT * FROM inquiries WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(inquiry)
    }

    async fn list_inquiries(&self, filter: InquiryFilter) -> Result<Vec<Inquiry>, AppError> {
        let inquiries = sqlx::query_as::<_, Inquiry>(
            "SELECT * FROM inquiries WHERE ($1::inquiry_status IS NULL OR status = $1) ORDER BY id",
        )
        .bind(filter.status)
        .fetch_all(&self.pool)
        .await?;
        Ok(inquiries)
    }

    async fn update_inquiry(
        &self,
        id: i32,
        patch: InquiryPatch,
    ) -> Result<Option<Inquiry>, AppError> {
        let inquiry = sqlx::query_as::<_, Inquiry>(
            r#"
            UPDATE inquiries SET
                parent_first_name = COALESCE($2, parent_first_name),
                parent_last_name = COALESCE($3, parent_last_name),
                parent_email = COALESCE($4, parent_email),
                parent_phone = COALESCE($5, parent_phone),
                student_name = COALESCE($6, student_name),
                student_grade = COALESCE($7, student_grade),
                subject = COALESCE($8, subject),
                specific_needs = CASE WHEN $9 THEN $10 ELSE specific_needs END,
                location = COALESCE($11, location),
                zip_code = CASE WHEN $12 THEN $13 ELSE zip_code END,
                availability = CASE WHEN $14 THEN $15 ELSE availability END,
                additional_info = CASE WHEN $16 THEN $17 ELSE additional_info END,
                budget = CASE WHEN $18 THEN $19 ELSE budget END,
                contact_preference = CASE WHEN $20 THEN $21 ELSE contact_preference END,
                referral = CASE WHEN $22 THEN $23 ELSE referral END,
                status = COALESCE($24::inquiry_status, status)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(patch.parent_first_name)
        .bind(patch.parent_last_name)
        .bind(patch.parent_email)
        .bind(patch.parent_phone)
        .bind(patch.student_name)
        .bind(patch.student_grade)
        .bind(patch.subject)
        .bind(patch.specific_needs.is_some())
        .bind(patch.specific_needs.flatten())
        .bind(patch.location)
        .bind(patch.zip_code.is_some())
        .bind(patch.zip_code.flatten())
        .bind(patch.availability.is_some())
        .bind(patch.availability.flatten())
        .bind(patch.additional_info.is_some())
        .bind(patch.additional_info.flatten())
        .bind(patch.budget.is_some())
        .bind(patch.budget.flatten())
        .bind(patch.contact_preference.is_some())
        .bind(patch.contact_preference.flatten())
        .bind(patch.referral.is_some())
        .bind(patch.referral.flatten())
        .bind(patch.status)
        .fetch_optional(&self.pool)
        .await?;
        Ok(inquiry)
    }

    async fn update_inquiry_status(
        &self,
        id: i32,
        status: &str,
    ) -> Result<Option<Inquiry>, AppError> {
        let status: InquiryStatus = status.parse()?;
        let inquiry = sqlx::query_as::<_, Inquiry>(
            "UPDATE inquiries SET status = $2 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(status)
        .fetch_optional(&self.pool)
        .await?;
        Ok(inquiry)
    }

    async fn recent_inquiries(&self) -> Result<Vec<Inquiry>, AppError> {
        let inquiries = sqlx::query_as::<_, Inquiry>(
            "SELECT * FROM inquiries ORDER BY created_at DESC, id DESC LIMIT $1",
        )
        .bind(RECENT_INQUIRIES_LIMIT as i64)
        .fetch_all(&self.pool)
        .await?;
        Ok(inquiries)
    }

    // =========================================================================
    //  TUTORES
    // =========================================================================

    async fn create_tutor(&self, new: NewTutor) -> Result<Tutor, AppError> {
        let tutor = sqlx::query_as::<_, Tutor>(
            r#"
            INSERT INTO tutors (
                user_id, subjects, education, bio, hourly_rate, availability,
                location, zip_code, is_active, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING *
            "#,
        )
        .bind(new.user_id)
        .bind(new.subjects)
        .bind(new.education)
        .bind(new.bio)
        .bind(new.hourly_rate)
        .bind(new.availability)
        .bind(new.location)
        .bind(new.zip_code)
        .bind(new.is_active.unwrap_or(true))
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;
        Ok(tutor)
    }

    async fn get_tutor(&self, id: i32) -> Result<Option<Tutor>, AppError> {
        let tutor = sqlx::query_as::<_, Tutor>("SELECT * FROM tutors WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(tutor)
    }

    async fn list_tutors(&self, filter: TutorFilter) -> Result<Vec<Tutor>, AppError> {
        let tutors = sqlx::query_as::<_, Tutor>(
            "SELECT * FROM tutors WHERE ($1::boolean IS NULL OR is_active = $1) ORDER BY id",
        )
        .bind(filter.active)
        .fetch_all(&self.pool)
        .await?;
        Ok(tutors)
    }

    async fn update_tutor(&self, id: i32, patch: TutorPatch) -> Result<Option<Tutor>, AppError> {
        let tutor = sqlx::query_as::<_, Tutor>(
            r#"
            UPDATE tutors SET
                user_id = COALESCE($2, user_id),
                subjects = COALESCE($3, subjects),
                education = CASE WHEN $4 THEN $5 ELSE education END,
                bio = CASE WHEN $6 THEN $7 ELSE bio END,
                hourly_rate = COALESCE($8, hourly_rate),
                availability = COALESCE($9, availability),
                location = CASE WHEN $10 THEN $11 ELSE location END,
                zip_code = CASE WHEN $12 THEN $13 ELSE zip_code END,
                is_active = COALESCE($14, is_active)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(patch.user_id)
        .bind(patch.subjects)
        .bind(patch.education.is_some())
        .bind(patch.education.flatten())
        .bind(patch.bio.is_some())
        .bind(patch.bio.flatten())
        .bind(patch.hourly_rate)
        .bind(patch.availability)
        .bind(patch.location.is_some())
        .bind(patch.location.flatten())
        .bind(patch.zip_code.is_some())
        .bind(patch.zip_code.flatten())
        .bind(patch.is_active)
        .fetch_optional(&self.pool)
        .await?;
        Ok(tutor)
    }

    // =========================================================================
    //  LIGAÇÕES
    // =========================================================================

    async fn create_scheduled_call(
        &self,
        new: NewScheduledCall,
    ) -> Result<ScheduledCall, AppError> {
        let call = sqlx::query_as::<_, ScheduledCall>(
            r#"
            INSERT INTO scheduled_calls (
                inquiry_id, parent_id, admin_id, call_date, call_time, duration,
                call_type, call_purpose, notes, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING *
            "#,
        )
        .bind(new.inquiry_id)
        .bind(new.parent_id)
        .bind(new.admin_id)
        .bind(new.call_date)
        .bind(new.call_time)
        .bind(new.duration.unwrap_or(DEFAULT_CALL_DURATION_MINUTES))
        .bind(new.call_type)
        .bind(new.call_purpose)
        .bind(new.notes)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;
        Ok(call)
    }

    async fn get_scheduled_call(&self, id: i32) -> Result<Option<ScheduledCall>, AppError> {
        let call = sqlx::query_as::<_, ScheduledCall>("SELECT * FROM scheduled_calls WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(call)
    }

    async fn list_scheduled_calls(
        &self,
        filter: ScheduledCallFilter,
    ) -> Result<Vec<ScheduledCall>, AppError> {
        let calls = sqlx::query_as::<_, ScheduledCall>(
            r#"
            SELECT * FROM scheduled_calls
            WHERE ($1::call_status IS NULL OR status = $1)
              AND ($2::int IS NULL OR inquiry_id = $2)
            ORDER BY id
            "#,
        )
        .bind(filter.status)
        .bind(filter.inquiry_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(calls)
    }

    async fn update_scheduled_call(
        &self,
        id: i32,
        patch: ScheduledCallPatch,
    ) -> Result<Option<ScheduledCall>, AppError> {
        let call = sqlx::query_as::<_, ScheduledCall>(
            r#"
            UPDATE scheduled_calls SET
                inquiry_id = CASE WHEN $2 THEN $3 ELSE inquiry_id END,
                parent_id = CASE WHEN $4 THEN $5 ELSE parent_id END,
                admin_id = CASE WHEN $6 THEN $7 ELSE admin_id END,
                call_date = COALESCE($8, call_date),
                call_time = COALESCE($9, call_time),
                duration = COALESCE($10, duration),
                call_type = COALESCE($11::call_type, call_type),
                call_purpose = COALESCE($12, call_purpose),
                notes = CASE WHEN $13 THEN $14 ELSE notes END,
                status = COALESCE($15::call_status, status)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(patch.inquiry_id.is_some())
        .bind(patch.inquiry_id.flatten())
        .bind(patch.parent_id.is_some())
        .bind(patch.parent_id.flatten())
        .bind(patch.admin_id.is_some())
        .bind(patch.admin_id.flatten())
        .bind(patch.call_date)
        .bind(patch.call_time)
        .bind(patch.duration)
        .bind(patch.call_type)
        .bind(patch.call_purpose)
        .bind(patch.notes.is_some())
        .bind(patch.notes.flatten())
        .bind(patch.status)
        .fetch_optional(&self.pool)
        .await?;
        Ok(call)
    }

    // =========================================================================
    //  AULAS
    // =========================================================================

    async fn create_session(&self, new: NewSession) -> Result<Session, AppError> {
        let session = sqlx::query_as::<_, Session>(
            r#"
            INSERT INTO sessions (
                tutor_id, student_id, subject, date, start_time, end_time,
                location, notes, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(new.tutor_id)
        .bind(new.student_id)
        .bind(new.subject)
        .bind(new.date)
        .bind(new.start_time)
        .bind(new.end_time)
        .bind(new.location)
        .bind(new.notes)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;
        Ok(session)
    }

    async fn get_session(&self, id: i32) -> Result<Option<Session>, AppError> {
        let session = sqlx::query_as::<_, Session>("SELECT * FROM sessions WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(session)
    }

    async fn list_sessions(&self, filter: SessionFilter) -> Result<Vec<Session>, AppError> {
        let sessions = sqlx::query_as::<_, Session>(
            r#"
            SELECT * FROM sessions
            WHERE ($1::session_status IS NULL OR status = $1)
              AND ($2::int IS NULL OR tutor_id = $2)
              AND ($3::int IS NULL OR student_id = $3)
              AND ($4::date IS NULL OR date = $4)
            ORDER BY id
            "#,
        )
        .bind(filter.status)
        .bind(filter.tutor_id)
        .bind(filter.student_id)
        .bind(filter.date)
        .fetch_all(&self.pool)
        .await?;
        Ok(sessions)
    }

    async fn update_session(
        &self,
        id: i32,
        patch: SessionPatch,
    ) -> Result<Option<Session>, AppError> {
        let session = sqlx::query_as::<_, Session>(
            r#"
            UPDATE sessions SET
                tutor_id = COALESCE($2, tutor_id),
                student_id = COALESCE($3, student_id),
                subject = COALESCE($4, subject),
                date = COALESCE($5, date),
                start_time = COALESCE($6, start_time),
                end_time = COALESCE($7, end_time),
                location = CASE WHEN $8 THEN $9 ELSE location END,
                notes = CASE WHEN $10 THEN $11 ELSE notes END,
                status = COALESCE($12::session_status, status)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(patch.tutor_id)
        .bind(patch.student_id)
        .bind(patch.subject)
        .bind(patch.date)
        .bind(patch.start_time)
        .bind(patch.end_time)
        .bind(patch.location.is_some())
        .bind(patch.location.flatten())
        .bind(patch.notes.is_some())
        .bind(patch.notes.flatten())
        .bind(patch.status)
        .fetch_optional(&self.pool)
        .await?;
        Ok(session)
    }

    // =========================================================================
    //  RELATÓRIOS
    // =========================================================================

    async fn create_session_report(
        &self,
        new: NewSessionReport,
    ) -> Result<SessionReport, AppError> {
        let report = sqlx::query_as::<_, SessionReport>(
            r#"
            INSERT INTO session_reports (
                session_id, topics_covered, summary, homework, progress,
                internal_notes, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(new.session_id)
        .bind(new.topics_covered)
        .bind(new.summary)
        .bind(new.homework)
        .bind(new.progress)
        .bind(new.internal_notes)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;
        Ok(report)
    }

    async fn get_session_report(&self, id: i32) -> Result<Option<SessionReport>, AppError> {
        let report =
            sqlx::query_as::<_, SessionReport>("SELECT * FROM session_reports WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(report)
    }

    async fn list_session_reports(
        &self,
        filter: SessionReportFilter,
    ) -> Result<Vec<SessionReport>, AppError> {
        let reports = sqlx::query_as::<_, SessionReport>(
            r#"
            SELECT * FROM session_reports
            WHERE ($1::int IS NULL OR session_id = $1)
              AND ($2::boolean IS NULL OR admin_approved = $2)
              AND ($3::boolean IS NULL OR sent_to_parent = $3)
            ORDER BY id
            "#,
        )
        .bind(filter.session_id)
        .bind(filter.approved)
        .bind(filter.sent)
        .fetch_all(&self.pool)
        .await?;
        Ok(reports)
    }

    async fn update_session_report(
        &self,
        id: i32,
        patch: SessionReportPatch,
    ) -> Result<Option<SessionReport>, AppError> {
        let report = sqlx::query_as::<_, SessionReport>(
            r#"
            UPDATE session_reports SET
                topics_covered = COALESCE($2, topics_covered),
                summary = COALESCE($3, summary),
                homework = CASE WHEN $4 THEN $5 ELSE homework END,
                progress = COALESCE($6, progress),
                internal_notes = CASE WHEN $7 THEN $8 ELSE internal_notes END,
                admin_approved = COALESCE($9, admin_approved),
                sent_to_parent = COALESCE($10, sent_to_parent)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(patch.topics_covered)
        .bind(patch.summary)
        .bind(patch.homework.is_some())
        .bind(patch.homework.flatten())
        .bind(patch.progress)
        .bind(patch.internal_notes.is_some())
        .bind(patch.internal_notes.flatten())
        .bind(patch.admin_approved)
        .bind(patch.sent_to_parent)
        .fetch_optional(&self.pool)
        .await?;
        Ok(report)
    }

    // =========================================================================
    //  FATURAS
    // =========================================================================

    async fn create_invoice(&self, new: NewInvoice) -> Result<Invoice, AppError> {
        let invoice = sqlx::query_as::<_, Invoice>(
            r#"
            INSERT INTO invoices (tutor_id, parent_id, amount, description, due_date, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(new.tutor_id)
        .bind(new.parent_id)
        .bind(new.amount)
        .bind(new.description)
        .bind(new.due_date)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;
        Ok(invoice)
    }

    async fn get_invoice(&self, id: i32) -> Result<Option<Invoice>, AppError> {
        let invoice = sqlx::query_as::<_, Invoice>("SELECT * FROM invoices WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(invoice)
    }

    async fn list_invoices(&self, filter: InvoiceFilter) -> Result<Vec<Invoice>, AppError> {
        let invoices = sqlx::query_as::<_, Invoice>(
            r#"
            SELECT * FROM invoices
            WHERE ($1::invoice_status IS NULL OR status = $1)
              AND ($2::int IS NULL OR tutor_id = $2)
              AND ($3::int IS NULL OR parent_id = $3)
            ORDER BY id
            "#,
        )
        .bind(filter.status)
        .bind(filter.tutor_id)
        .bind(filter.parent_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(invoices)
    }

    async fn update_invoice(
        &self,
        id: i32,
        patch: InvoicePatch,
    ) -> Result<Option<Invoice>, AppError> {
        let invoice = sqlx::query_as::<_, Invoice>(
            r#"
            UPDATE invoices SET
                tutor_id = COALESCE($2, tutor_id),
                parent_id = COALESCE($3, parent_id),
                amount = COALESCE($4, amount),
                description = COALESCE($5, description),
                due_date = COALESCE($6, due_date),
                status = COALESCE($7::invoice_status, status),
                paid_date = CASE WHEN $8 THEN $9 ELSE paid_date END
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(patch.tutor_id)
        .bind(patch.parent_id)
        .bind(patch.amount)
        .bind(patch.description)
        .bind(patch.due_date)
        .bind(patch.status)
        .bind(patch.paid_date.is_some())
        .bind(patch.paid_date.flatten())
        .fetch_optional(&self.pool)
        .await?;
        Ok(invoice)
    }

    async fn create_invoice_item(&self, new: NewInvoiceItem) -> Result<InvoiceItem, AppError> {
        let item = sqlx::query_as::<_, InvoiceItem>(
            r#"
            INSERT INTO invoice_items
                (invoice_id, session_id, description, amount, quantity, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(new.invoice_id)
        .bind(new.session_id)
        .bind(new.description)
        .bind(new.amount)
        .bind(new.quantity.unwrap_or(1))
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;
        Ok(item)
    }

    async fn get_invoice_item(&self, id: i32) -> Result<Option<InvoiceItem>, AppError> {
        let item = sqlx::query_as::<_, InvoiceItem>("SELECT * FROM invoice_items WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(item)
    }

    async fn list_invoice_items(
        &self,
        filter: InvoiceItemFilter,
    ) -> Result<Vec<InvoiceItem>, AppError> {
        let items = sqlx::query_as::<_, InvoiceItem>(
            "SELECT * FROM invoice_items WHERE ($1::int IS NULL OR invoice_id = $1) ORDER BY id",
        )
        .bind(filter.invoice_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(items)
    }

    async fn update_invoice_item(
        &self,
        id: i32,
        patch: InvoiceItemPatch,
    ) -> Result<Option<InvoiceItem>, AppError> {
        let item = sqlx::query_as::<_, InvoiceItem>(
            r#"
            UPDATE invoice_items SET
                session_id = CASE WHEN $2 THEN $3 ELSE session_id END,
                description = COALESCE($4, description),
                amount = COALESCE($5, amount),
                quantity = COALESCE($6, quantity)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(patch.session_id.is_some())
        .bind(patch.session_id.flatten())
        .bind(patch.description)
        .bind(patch.amount)
        .bind(patch.quantity)
        .fetch_optional(&self.pool)
        .await?;
        Ok(item)
    }

    // =========================================================================
    //  DASHBOARD
    // =========================================================================

    async fn dashboard_totals(&self, today: NaiveDate) -> Result<DashboardTotals, AppError> {
        // Um único statement = snapshot consistente dos quatro números
        let (new_inquiries, active_students, active_tutors, monthly_revenue_cents) =
            sqlx::query_as::<_, (i64, i64, i64, i64)>(
                r#"
                SELECT
                    (SELECT COUNT(*) FROM inquiries WHERE status = $1) AS new_inquiries,
                    (SELECT COUNT(*) FROM students) AS active_students,
                    (SELECT COUNT(*) FROM tutors WHERE is_active) AS active_tutors,
                    (SELECT LEAST(COALESCE(SUM(amount), 0), 9223372036854775807)::BIGINT
                       FROM invoices
                      WHERE status = $2
                        AND paid_date IS NOT NULL
                        AND date_trunc('month', paid_date) = date_trunc('month', $3::date)
                    ) AS monthly_revenue_cents
                "#,
            )
            .bind(InquiryStatus::New)
            .bind(InvoiceStatus::Paid)
            .bind(today)
            .fetch_one(&self.pool)
            .await?;

        Ok(DashboardTotals {
            new_inquiries,
            active_students,
            active_tutors,
            monthly_revenue_cents,
        })
    }
}
