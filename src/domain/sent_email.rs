use chrono::offset::Utc;
use chrono::DateTime;
use uuid::Uuid;

/// Outcome of a single send attempt. `Bounced` is never produced by the
/// campaign runner; it is reserved for a future delivery-webhook feature.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SendStatus {
    Sent,
    Failed,
    Bounced,
}

/// One send attempt, written exactly once per recipient per campaign run
/// and never mutated afterwards.
#[derive(Clone, Debug, serde::Serialize)]
pub struct SentEmail {
    pub id: Uuid,
    pub contact_id: Uuid,
    pub template_id: Uuid,
    pub sender_profile_id: Uuid,
    /// The subject as rendered at send time, not re-derived later.
    pub subject: String,
    pub status: SendStatus,
    pub sent_at: DateTime<Utc>,
    pub message_id: Option<String>,
    pub error: Option<String>,
}

/// Payload handed to the history recorder; id and timestamp are assigned
/// by the recorder itself.
#[derive(Clone, Debug)]
pub struct NewSentEmail {
    pub contact_id: Uuid,
    pub template_id: Uuid,
    pub sender_profile_id: Uuid,
    pub subject: String,
    pub status: SendStatus,
    pub message_id: Option<String>,
    pub error: Option<String>,
}
