use crate::campaign::{Pacer, PacingPolicy};
use crate::domain::{Contact, MessageTemplate, NewSentEmail, SendStatus, SenderProfile};
use crate::email::{MailTransport, OutgoingEmail};
use crate::history::HistoryRecorder;
use crate::render::render_template;
use crate::routes::error_chain_fmt;
use crate::storage::ContactStore;
use chrono::Utc;
use std::sync::Arc;

/// What the operator sees once a run has finished: three counters plus
/// one `"<email>: <reason>"` line per failed recipient, in send order.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct CampaignSummary {
    pub sent: usize,
    pub failed: usize,
    pub total: usize,
    pub errors: Vec<String>,
}

/// A campaign that never started. Once the per-recipient loop begins,
/// failures are contained per recipient and no longer surface here.
#[derive(thiserror::Error)]
pub enum CampaignError {
    #[error("No recipients were selected for this campaign.")]
    NoRecipients,
    #[error("The mail transport is not configured. Check the AWS credentials and region.")]
    TransportNotConfigured,
}

impl std::fmt::Debug for CampaignError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

/// Drives one campaign: template × sender × ordered recipient list.
/// Collaborators are injected explicitly; the runner owns no global
/// state and holds its progress counters only for the duration of a run.
pub struct CampaignRunner {
    transport: Arc<dyn MailTransport>,
    history: Arc<dyn HistoryRecorder>,
    contacts: Arc<dyn ContactStore>,
    pacer: Arc<dyn Pacer>,
}

impl CampaignRunner {
    pub fn new(
        transport: Arc<dyn MailTransport>,
        history: Arc<dyn HistoryRecorder>,
        contacts: Arc<dyn ContactStore>,
        pacer: Arc<dyn Pacer>,
    ) -> CampaignRunner {
        CampaignRunner {
            transport,
            history,
            contacts,
            pacer,
        }
    }

    /// Sends the campaign strictly sequentially, in recipient-list order.
    /// Exactly one history record is written per recipient; a failure for
    /// one recipient never aborts the loop for the rest.
    #[tracing::instrument(
        name = "Running a campaign",
        skip(self, template, sender, recipients, policy),
        fields(
            template_name = %template.name,
            sender_email = %sender.email,
            recipient_count = recipients.len()
        )
    )]
    pub async fn run(
        &self,
        template: &MessageTemplate,
        sender: &SenderProfile,
        recipients: &[Contact],
        policy: PacingPolicy,
    ) -> Result<CampaignSummary, CampaignError> {
        if recipients.is_empty() {
            return Err(CampaignError::NoRecipients);
        }
        if !self.transport.is_configured() {
            return Err(CampaignError::TransportNotConfigured);
        }
        if policy.is_unthrottled() {
            tracing::warn!(
                "No send rate is configured; emails will be dispatched back to back."
            );
        }

        let mut sent = 0;
        let mut failed = 0;
        let mut errors = Vec::new();

        for (position, contact) in recipients.iter().enumerate() {
            let rendered = render_template(template, contact, Some(sender));
            let subject = rendered.subject.clone();

            let outcome = self
                .transport
                .send_email(OutgoingEmail {
                    to: contact.email.clone(),
                    from: sender.formatted_address(),
                    reply_to: None,
                    subject: rendered.subject,
                    html_content: rendered.html_content,
                    text_content: rendered.text_content,
                })
                .await;

            match outcome {
                Ok(receipt) => {
                    sent += 1;
                    self.record_attempt(
                        template,
                        sender,
                        contact,
                        subject,
                        SendStatus::Sent,
                        receipt.message_id,
                        None,
                    )
                    .await;
                    if let Err(error) = self.contacts.mark_contacted(contact.id, Utc::now()).await
                    {
                        tracing::warn!(error.cause_chain = ?error, contact = %contact.email,
                            "Failed to stamp the last-contacted timestamp.");
                    }
                }
                Err(error) => {
                    failed += 1;
                    tracing::warn!(error.cause_chain = ?error, contact = %contact.email,
                        "Failed to send campaign email to a recipient.");
                    let reason = error.to_string();
                    errors.push(format!("{}: {}", contact.email, reason));
                    self.record_attempt(
                        template,
                        sender,
                        contact,
                        subject,
                        SendStatus::Failed,
                        None,
                        Some(reason),
                    )
                    .await;
                }
            }

            if position + 1 < recipients.len() {
                self.pacer.pause(policy.next_delay()).await;
            }
        }

        Ok(CampaignSummary {
            sent,
            failed,
            total: recipients.len(),
            errors,
        })
    }

    // A recorder failure is logged and swallowed: it must not flip the
    // sent/failed counters or stop the remaining recipients.
    #[allow(clippy::too_many_arguments)]
    async fn record_attempt(
        &self,
        template: &MessageTemplate,
        sender: &SenderProfile,
        contact: &Contact,
        subject: String,
        status: SendStatus,
        message_id: Option<String>,
        error: Option<String>,
    ) {
        let attempt = NewSentEmail {
            contact_id: contact.id,
            template_id: template.id,
            sender_profile_id: sender.id,
            subject,
            status,
            message_id,
            error,
        };
        if let Err(error) = self.history.record_sent_email(attempt).await {
            tracing::warn!(error.cause_chain = ?error, contact = %contact.email,
                "Failed to record the send attempt in history.");
        }
    }
}
