mod ses_mail_transport;

use crate::domain::ContactEmail;
use async_trait::async_trait;
pub use ses_mail_transport::SesMailTransport;

/// A fully rendered message addressed to one recipient.
#[derive(Clone, Debug)]
pub struct OutgoingEmail {
    pub to: ContactEmail,
    pub from: String,
    pub reply_to: Option<String>,
    pub subject: String,
    pub html_content: String,
    pub text_content: String,
}

/// What the provider hands back on a successful delivery attempt.
#[derive(Clone, Debug)]
pub struct SendReceipt {
    pub message_id: Option<String>,
}

/// Account-level sending limits, surfaced to the operator for display
/// only. Pacing decisions never read these numbers.
#[derive(Clone, Copy, Debug, serde::Serialize)]
pub struct SendQuota {
    pub max_24_hour: f64,
    pub max_send_rate: f64,
    pub sent_last_24_hours: f64,
}

#[async_trait]
pub trait MailTransport: Send + Sync {
    /// Whether credentials were loaded; a campaign refuses to start when
    /// this is false.
    fn is_configured(&self) -> bool;

    async fn send_email(&self, email: OutgoingEmail) -> Result<SendReceipt, anyhow::Error>;

    async fn send_quota(&self) -> Result<SendQuota, anyhow::Error>;
}
