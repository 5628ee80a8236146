// src/services/seed.rs

use crate::{
    common::error::AppError,
    db::Storage,
    models::{intake::NewInquiry, status::UserRole, users::NewUser},
};

const ADMIN_USERNAME: &str = "admin";

struct SampleInquiry {
    parent_first: &'static str,
    parent_last: &'static str,
    phone: &'static str,
    student: &'static str,
    grade: &'static str,
    subject: &'static str,
    needs: &'static str,
    location: &'static str,
    zip_code: &'static str,
    availability: &'static [&'static str],
    info: &'static str,
    budget: &'static str,
    referral: &'static str,
}

const SAMPLE_INQUIRIES: [SampleInquiry; 3] = [
    SampleInquiry {
        parent_first: "Jack",
        parent_last: "Smith",
        phone: "555-111-1111",
        student: "Tommy Smith",
        grade: "10",
        subject: "math",
        needs: "Algebra II",
        location: "online",
        zip_code: "10001",
        availability: &["weekday-afternoon", "weekend"],
        info: "Struggling with quadratic equations",
        budget: "50-60",
        referral: "google",
    },
    SampleInquiry {
        parent_first: "Alice",
        parent_last: "Davis",
        phone: "555-222-2222",
        student: "Emma Davis",
        grade: "8",
        subject: "english",
        needs: "Essay Writing",
        location: "student-home",
        zip_code: "10002",
        availability: &["weekday-evening"],
        info: "Needs help with structure and grammar",
        budget: "40-50",
        referral: "friend",
    },
    SampleInquiry {
        parent_first: "Robert",
        parent_last: "Johnson",
        phone: "555-333-3333",
        student: "Michael Johnson",
        grade: "12",
        subject: "science",
        needs: "AP Chemistry",
        location: "tutor-location",
        zip_code: "10003",
        availability: &["weekday-evening", "weekend"],
        info: "Preparing for AP exam",
        budget: "60-70",
        referral: "school",
    },
];

/// Dados de demonstração: um admin e três solicitações de exemplo.
/// Não faz nada se o admin já existir (ex: Postgres reiniciado).
pub async fn seed_demo_data(storage: &dyn Storage) -> Result<(), AppError> {
    if storage.get_user_by_username(ADMIN_USERNAME).await?.is_some() {
        tracing::info!("Demo data already present, skipping seed");
        return Ok(());
    }

    storage
        .create_user(NewUser {
            username: ADMIN_USERNAME.to_string(),
            email: "admin@tutorsync.com".into(),
            password: "password".into(),
            first_name: "Admin".into(),
            last_name: "User".into(),
            role: UserRole::Admin,
            phone: Some("555-123-4567".into()),
            avatar: None,
        })
        .await?;

    for sample in &SAMPLE_INQUIRIES {
        storage
            .create_inquiry(NewInquiry {
                parent_first_name: sample.parent_first.into(),
                parent_last_name: sample.parent_last.into(),
                parent_email: format!(
                    "{}.{}@example.com",
                    sample.parent_first.to_lowercase(),
                    sample.parent_last.to_lowercase()
                ),
                parent_phone: sample.phone.into(),
                student_name: sample.student.into(),
                student_grade: sample.grade.into(),
                subject: sample.subject.into(),
                specific_needs: Some(sample.needs.into()),
                location: sample.location.into(),
                zip_code: Some(sample.zip_code.into()),
                availability: Some(sample.availability.iter().map(|s| s.to_string()).collect()),
                additional_info: Some(sample.info.into()),
                budget: Some(sample.budget.into()),
                contact_preference: None,
                referral: Some(sample.referral.into()),
            })
            .await?;
    }

    tracing::info!("Demo data seeded");
    Ok(())
}
