use crate::domain::{NewSentEmail, SentEmail};
use async_trait::async_trait;
use chrono::Utc;
use std::sync::Mutex;
use uuid::Uuid;

/// Append-only log of send attempts. Implementations assign the record
/// id and timestamp; records are never edited or deleted.
#[async_trait]
pub trait HistoryRecorder: Send + Sync {
    async fn record_sent_email(&self, attempt: NewSentEmail) -> Result<SentEmail, anyhow::Error>;
}

/// Keeps the send history in memory, in insertion order.
pub struct InMemoryHistory {
    records: Mutex<Vec<SentEmail>>,
}

impl InMemoryHistory {
    pub fn new() -> InMemoryHistory {
        InMemoryHistory {
            records: Mutex::new(Vec::new()),
        }
    }

    pub fn records(&self) -> Vec<SentEmail> {
        self.records.lock().unwrap().clone()
    }
}

impl Default for InMemoryHistory {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HistoryRecorder for InMemoryHistory {
    async fn record_sent_email(&self, attempt: NewSentEmail) -> anyhow::Result<SentEmail> {
        let record = SentEmail {
            id: Uuid::new_v4(),
            contact_id: attempt.contact_id,
            template_id: attempt.template_id,
            sender_profile_id: attempt.sender_profile_id,
            subject: attempt.subject,
            status: attempt.status,
            sent_at: Utc::now(),
            message_id: attempt.message_id,
            error: attempt.error,
        };
        self.records.lock().unwrap().push(record.clone());
        Ok(record)
    }
}
