// src/services/scheduling_service.rs

use std::sync::Arc;

use crate::{
    common::error::AppError,
    db::Storage,
    models::{
        intake::{NewScheduledCall, ScheduledCall},
        status::InquiryStatus,
    },
};

#[derive(Clone)]
pub struct SchedulingService {
    storage: Arc<dyn Storage>,
}

impl SchedulingService {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    /// Grava a ligação e depois roda o hook `mark_inquiry_scheduled`.
    /// Não há rollback: se o hook falhar, a ligação continua criada.
    pub async fn create_call(&self, new: NewScheduledCall) -> Result<ScheduledCall, AppError> {
        let call = self.storage.create_scheduled_call(new).await?;

        if let Some(inquiry_id) = call.inquiry_id {
            self.mark_inquiry_scheduled(inquiry_id).await;
        }

        Ok(call)
    }

    /// Hook pós-criação (best-effort). Devolve `true` se a solicitação foi
    /// movida para `scheduled`.
    pub async fn mark_inquiry_scheduled(&self, inquiry_id: i32) -> bool {
        match self
            .storage
            .update_inquiry_status(inquiry_id, InquiryStatus::Scheduled.as_str())
            .await
        {
            Ok(Some(_)) => {
                tracing::info!(inquiry_id, "Inquiry moved to scheduled");
                true
            }
            Ok(None) => {
                tracing::warn!(inquiry_id, "Call references an inquiry that does not exist");
                false
            }
            Err(e) => {
                tracing::warn!(inquiry_id, error = %e, "Failed to mark inquiry as scheduled");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        db::MemStorage,
        models::{intake::NewInquiry, status::CallType},
    };
    use chrono::{NaiveDate, NaiveTime};

    fn new_call(inquiry_id: Option<i32>) -> NewScheduledCall {
        NewScheduledCall {
            inquiry_id,
            parent_id: None,
            admin_id: Some(1),
            call_date: NaiveDate::from_ymd_opt(2026, 10, 20).unwrap(),
            call_time: NaiveTime::from_hms_opt(10, 30, 0).unwrap(),
            duration: None,
            call_type: CallType::Video,
            call_purpose: "Initial consultation".into(),
            notes: None,
        }
    }

    #[tokio::test]
    async fn creating_a_call_schedules_the_inquiry() {
        let storage = Arc::new(MemStorage::new());
        let service = SchedulingService::new(storage.clone());

        let inquiry = storage
            .create_inquiry(NewInquiry {
                parent_first_name: "Robert".into(),
                parent_last_name: "Johnson".into(),
                parent_email: "robert.johnson@example.com".into(),
                parent_phone: "555-333-3333".into(),
                student_name: "Michael Johnson".into(),
                student_grade: "12".into(),
                subject: "math".into(),
                specific_needs: None,
                location: "online".into(),
                zip_code: None,
                availability: None,
                additional_info: None,
                budget: None,
                contact_preference: None,
                referral: None,
            })
            .await
            .unwrap();
        assert_eq!(inquiry.status, InquiryStatus::New);

        let call = service.create_call(new_call(Some(inquiry.id))).await.unwrap();
        assert_eq!(call.inquiry_id, Some(inquiry.id));
        assert_eq!(call.duration, 30);

        let refreshed = storage.get_inquiry(inquiry.id).await.unwrap().unwrap();
        assert_eq!(refreshed.status, InquiryStatus::Scheduled);
    }

    #[tokio::test]
    async fn call_survives_a_missing_inquiry() {
        let storage = Arc::new(MemStorage::new());
        let service = SchedulingService::new(storage.clone());

        let call = service.create_call(new_call(Some(404))).await.unwrap();
        assert!(storage.get_scheduled_call(call.id).await.unwrap().is_some());
        assert!(!service.mark_inquiry_scheduled(404).await);
    }

    #[tokio::test]
    async fn call_without_inquiry_touches_nothing() {
        let storage = Arc::new(MemStorage::new());
        let service = SchedulingService::new(storage.clone());

        let call = service.create_call(new_call(None)).await.unwrap();
        assert_eq!(call.id, 1);
        assert!(storage.list_inquiries(Default::default()).await.unwrap().is_empty());
    }
}
