// src/db/contract.rs
//
// Comportamento que todo backend de `Storage` precisa ter. As mesmas
// funções rodam contra o MemStorage (sempre) e contra o Postgres
// (`cargo test -- --ignored`, com DATABASE_URL).
//
// Cada entidade: create -> get devolve o mesmo registro -> update parcial
// bate com `apply` do patch (inclusive `null` limpando campo anulável)
// -> id inexistente devolve None.

use chrono::{NaiveDate, NaiveTime};
use serde_json::json;

use crate::{
    common::error::AppError,
    db::Storage,
    models::{
        billing::{InvoiceItemPatch, InvoicePatch, NewInvoice, NewInvoiceItem},
        intake::{InquiryPatch, NewInquiry, NewScheduledCall, ScheduledCallPatch},
        status::{CallStatus, CallType, InquiryStatus, InvoiceStatus, SessionStatus, UserRole},
        tutoring::{
            NewSession, NewSessionReport, NewTutor, SessionPatch, SessionReportPatch, TutorPatch,
        },
        users::{NewStudent, NewUser, StudentPatch, UserPatch},
    },
};

const MISSING_ID: i32 = i32::MAX;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn time(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

pub async fn run_all(store: &dyn Storage) {
    users(store).await;
    students(store).await;
    inquiries(store).await;
    tutors(store).await;
    scheduled_calls(store).await;
    sessions(store).await;
    session_reports(store).await;
    invoices(store).await;
    invoice_items(store).await;
}

pub async fn users(store: &dyn Storage) {
    let created = store
        .create_user(NewUser {
            username: "ada".into(),
            email: "ada@example.com".into(),
            password: "secret".into(),
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            role: UserRole::Parent,
            phone: Some("555-000-0001".into()),
            avatar: Some("ada.png".into()),
        })
        .await
        .unwrap();
    assert_eq!(store.get_user(created.id).await.unwrap(), Some(created.clone()));
    assert_eq!(store.get_user_by_username("ada").await.unwrap(), Some(created.clone()));

    let patch = UserPatch {
        first_name: Some("Augusta".into()),
        phone: Some(None),
        ..Default::default()
    };
    let mut expected = created.clone();
    expected.apply(patch.clone());

    let updated = store.update_user(created.id, patch).await.unwrap().unwrap();
    assert_eq!(updated, expected);
    assert_eq!(updated.phone, None);
    assert_eq!(updated.avatar.as_deref(), Some("ada.png"));
    assert_eq!(store.get_user(created.id).await.unwrap(), Some(expected.clone()));
    assert!(store.list_users(Default::default()).await.unwrap().contains(&expected));

    // Id inexistente é None, mesmo com e-mail já em uso
    let missing = store
        .update_user(
            MISSING_ID,
            UserPatch { email: Some(created.email.clone()), ..Default::default() },
        )
        .await
        .unwrap();
    assert!(missing.is_none());
    assert!(store.get_user(MISSING_ID).await.unwrap().is_none());

    // Outro usuário não pode assumir o e-mail
    let grace = store
        .create_user(NewUser {
            username: "grace".into(),
            email: "grace@example.com".into(),
            password: "secret".into(),
            first_name: "Grace".into(),
            last_name: "Hopper".into(),
            role: UserRole::Tutor,
            phone: None,
            avatar: None,
        })
        .await
        .unwrap();
    let err = store
        .update_user(grace.id, UserPatch { email: Some(created.email), ..Default::default() })
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::UniqueConstraintViolation(_)));
}

pub async fn students(store: &dyn Storage) {
    let created = store
        .create_student(NewStudent {
            first_name: "Tommy".into(),
            last_name: "Smith".into(),
            grade: "10".into(),
            parent_id: 7,
            school: Some("Lincoln High".into()),
            notes: Some("Prefers mornings".into()),
        })
        .await
        .unwrap();
    assert_eq!(store.get_student(created.id).await.unwrap(), Some(created.clone()));

    let patch = StudentPatch {
        grade: Some("11".into()),
        notes: Some(None),
        ..Default::default()
    };
    let mut expected = created.clone();
    expected.apply(patch.clone());

    let updated = store.update_student(created.id, patch).await.unwrap().unwrap();
    assert_eq!(updated, expected);
    assert_eq!(updated.notes, None);
    assert_eq!(updated.school.as_deref(), Some("Lincoln High"));
    assert!(store.list_students(Default::default()).await.unwrap().contains(&expected));

    assert!(store.get_student(MISSING_ID).await.unwrap().is_none());
    assert!(
        store
            .update_student(MISSING_ID, StudentPatch::default())
            .await
            .unwrap()
            .is_none()
    );
}

pub async fn inquiries(store: &dyn Storage) {
    let created = store
        .create_inquiry(NewInquiry {
            parent_first_name: "Jack".into(),
            parent_last_name: "Smith".into(),
            parent_email: "jack.smith@example.com".into(),
            parent_phone: "555-111-1111".into(),
            student_name: "Tommy Smith".into(),
            student_grade: "10".into(),
            subject: "math".into(),
            specific_needs: Some("Algebra II".into()),
            location: "online".into(),
            zip_code: Some("10001".into()),
            availability: Some(vec!["weekday-afternoon".into(), "weekend".into()]),
            additional_info: None,
            budget: Some("50-60".into()),
            contact_preference: Some("email".into()),
            referral: Some("google".into()),
        })
        .await
        .unwrap();
    assert_eq!(created.status, InquiryStatus::New);
    assert_eq!(store.get_inquiry(created.id).await.unwrap(), Some(created.clone()));

    let patch = InquiryPatch {
        subject: Some("science".into()),
        availability: Some(None),
        budget: Some(Some("70-80".into())),
        status: Some(InquiryStatus::Matched),
        ..Default::default()
    };
    let mut expected = created.clone();
    expected.apply(patch.clone());

    let updated = store.update_inquiry(created.id, patch).await.unwrap().unwrap();
    assert_eq!(updated, expected);
    assert_eq!(updated.availability, None);
    assert_eq!(updated.zip_code.as_deref(), Some("10001"));
    assert!(store.list_inquiries(Default::default()).await.unwrap().contains(&expected));

    let completed = store
        .update_inquiry_status(created.id, "completed")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(completed.status, InquiryStatus::Completed);

    let err = store.update_inquiry_status(created.id, "archived").await.unwrap_err();
    assert!(matches!(err, AppError::InvalidStatus { .. }));
    assert_eq!(
        store.get_inquiry(created.id).await.unwrap().unwrap().status,
        InquiryStatus::Completed
    );

    assert!(store.get_inquiry(MISSING_ID).await.unwrap().is_none());
    assert!(store.update_inquiry_status(MISSING_ID, "matched").await.unwrap().is_none());
}

pub async fn tutors(store: &dyn Storage) {
    let created = store
        .create_tutor(NewTutor {
            user_id: 3,
            subjects: vec!["math".into(), "physics".into()],
            education: Some("MSc Physics".into()),
            bio: Some("Ten years of tutoring".into()),
            hourly_rate: 6_000,
            availability: json!({ "monday": ["16:00", "18:00"] }),
            location: Some("Brooklyn".into()),
            zip_code: None,
            is_active: None,
        })
        .await
        .unwrap();
    assert!(created.is_active);
    assert_eq!(store.get_tutor(created.id).await.unwrap(), Some(created.clone()));

    let patch = TutorPatch {
        hourly_rate: Some(7_500),
        bio: Some(None),
        is_active: Some(false),
        ..Default::default()
    };
    let mut expected = created.clone();
    expected.apply(patch.clone());

    let updated = store.update_tutor(created.id, patch).await.unwrap().unwrap();
    assert_eq!(updated, expected);
    assert_eq!(updated.bio, None);
    assert_eq!(updated.education.as_deref(), Some("MSc Physics"));
    assert!(store.list_tutors(Default::default()).await.unwrap().contains(&expected));

    assert!(store.get_tutor(MISSING_ID).await.unwrap().is_none());
    assert!(store.update_tutor(MISSING_ID, TutorPatch::default()).await.unwrap().is_none());
}

pub async fn scheduled_calls(store: &dyn Storage) {
    let created = store
        .create_scheduled_call(NewScheduledCall {
            inquiry_id: Some(1),
            parent_id: None,
            admin_id: Some(1),
            call_date: date(2026, 10, 20),
            call_time: time(10, 30),
            duration: None,
            call_type: CallType::Video,
            call_purpose: "Initial consultation".into(),
            notes: None,
        })
        .await
        .unwrap();
    assert_eq!(created.duration, 30);
    assert_eq!(created.status, CallStatus::Scheduled);
    assert_eq!(store.get_scheduled_call(created.id).await.unwrap(), Some(created.clone()));

    let patch = ScheduledCallPatch {
        inquiry_id: Some(None),
        notes: Some(Some("Left a voicemail".into())),
        status: Some(CallStatus::Completed),
        ..Default::default()
    };
    let mut expected = created.clone();
    expected.apply(patch.clone());

    let updated = store.update_scheduled_call(created.id, patch).await.unwrap().unwrap();
    assert_eq!(updated, expected);
    assert_eq!(updated.inquiry_id, None);
    assert_eq!(updated.admin_id, Some(1));
    assert!(
        store
            .list_scheduled_calls(Default::default())
            .await
            .unwrap()
            .contains(&expected)
    );

    assert!(store.get_scheduled_call(MISSING_ID).await.unwrap().is_none());
    assert!(
        store
            .update_scheduled_call(MISSING_ID, ScheduledCallPatch::default())
            .await
            .unwrap()
            .is_none()
    );
}

pub async fn sessions(store: &dyn Storage) {
    let created = store
        .create_session(NewSession {
            tutor_id: 2,
            student_id: 5,
            subject: "chemistry".into(),
            date: date(2026, 10, 21),
            start_time: time(16, 0),
            end_time: time(17, 0),
            location: Some("Library".into()),
            notes: Some("Stoichiometry".into()),
        })
        .await
        .unwrap();
    assert_eq!(created.status, SessionStatus::Scheduled);
    assert_eq!(store.get_session(created.id).await.unwrap(), Some(created.clone()));

    let patch = SessionPatch {
        end_time: Some(time(17, 30)),
        location: Some(None),
        status: Some(SessionStatus::Completed),
        ..Default::default()
    };
    let mut expected = created.clone();
    expected.apply(patch.clone());

    let updated = store.update_session(created.id, patch).await.unwrap().unwrap();
    assert_eq!(updated, expected);
    assert_eq!(updated.location, None);
    assert_eq!(updated.notes.as_deref(), Some("Stoichiometry"));
    assert!(store.list_sessions(Default::default()).await.unwrap().contains(&expected));

    assert!(store.get_session(MISSING_ID).await.unwrap().is_none());
    assert!(store.update_session(MISSING_ID, SessionPatch::default()).await.unwrap().is_none());
}

pub async fn session_reports(store: &dyn Storage) {
    let created = store
        .create_session_report(NewSessionReport {
            session_id: 4,
            topics_covered: "Limiting reagents".into(),
            summary: "Good progress".into(),
            homework: Some("Worksheet 3".into()),
            progress: "on-track".into(),
            internal_notes: Some("Parent asked about AP".into()),
        })
        .await
        .unwrap();
    assert!(!created.admin_approved);
    assert!(!created.sent_to_parent);
    assert_eq!(store.get_session_report(created.id).await.unwrap(), Some(created.clone()));

    let patch = SessionReportPatch {
        homework: Some(None),
        admin_approved: Some(true),
        ..Default::default()
    };
    let mut expected = created.clone();
    expected.apply(patch.clone());

    let updated = store.update_session_report(created.id, patch).await.unwrap().unwrap();
    assert_eq!(updated, expected);
    assert_eq!(updated.homework, None);
    assert_eq!(updated.internal_notes.as_deref(), Some("Parent asked about AP"));
    assert!(
        store
            .list_session_reports(Default::default())
            .await
            .unwrap()
            .contains(&expected)
    );

    assert!(store.get_session_report(MISSING_ID).await.unwrap().is_none());
    assert!(
        store
            .update_session_report(MISSING_ID, SessionReportPatch::default())
            .await
            .unwrap()
            .is_none()
    );
}

pub async fn invoices(store: &dyn Storage) {
    let created = store
        .create_invoice(NewInvoice {
            tutor_id: 2,
            parent_id: 7,
            amount: 125_000,
            description: "October sessions".into(),
            due_date: date(2026, 10, 30),
        })
        .await
        .unwrap();
    assert_eq!(created.status, InvoiceStatus::Draft);
    assert_eq!(created.paid_date, None);
    assert_eq!(store.get_invoice(created.id).await.unwrap(), Some(created.clone()));

    let paid = store
        .update_invoice(
            created.id,
            InvoicePatch {
                status: Some(InvoiceStatus::Paid),
                paid_date: Some(Some(date(2026, 10, 19))),
                ..Default::default()
            },
        )
        .await
        .unwrap()
        .unwrap();
    assert_eq!(paid.paid_date, Some(date(2026, 10, 19)));

    // Pagamento estornado: volta para `sent` e limpa a data
    let patch = InvoicePatch {
        status: Some(InvoiceStatus::Sent),
        paid_date: Some(None),
        ..Default::default()
    };
    let mut expected = paid.clone();
    expected.apply(patch.clone());

    let updated = store.update_invoice(created.id, patch).await.unwrap().unwrap();
    assert_eq!(updated, expected);
    assert_eq!(updated.status, InvoiceStatus::Sent);
    assert_eq!(updated.paid_date, None);
    assert_eq!(updated.amount, 125_000);
    assert!(store.list_invoices(Default::default()).await.unwrap().contains(&expected));

    assert!(store.get_invoice(MISSING_ID).await.unwrap().is_none());
    assert!(store.update_invoice(MISSING_ID, InvoicePatch::default()).await.unwrap().is_none());
}

pub async fn invoice_items(store: &dyn Storage) {
    let created = store
        .create_invoice_item(NewInvoiceItem {
            invoice_id: 1,
            session_id: Some(4),
            description: "Chemistry, 60 min".into(),
            amount: 6_000,
            quantity: None,
        })
        .await
        .unwrap();
    assert_eq!(created.quantity, 1);
    assert_eq!(store.get_invoice_item(created.id).await.unwrap(), Some(created.clone()));

    let patch = InvoiceItemPatch {
        session_id: Some(None),
        quantity: Some(3),
        ..Default::default()
    };
    let mut expected = created.clone();
    expected.apply(patch.clone());

    let updated = store.update_invoice_item(created.id, patch).await.unwrap().unwrap();
    assert_eq!(updated, expected);
    assert_eq!(updated.session_id, None);
    assert_eq!(updated.description, "Chemistry, 60 min");
    assert!(
        store
            .list_invoice_items(Default::default())
            .await
            .unwrap()
            .contains(&expected)
    );

    assert!(store.get_invoice_item(MISSING_ID).await.unwrap().is_none());
    assert!(
        store
            .update_invoice_item(MISSING_ID, InvoiceItemPatch::default())
            .await
            .unwrap()
            .is_none()
    );
}
