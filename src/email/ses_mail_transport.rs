use crate::configuration::Settings;
use crate::email::{MailTransport, OutgoingEmail, SendQuota, SendReceipt};
use anyhow::Context;
use async_trait::async_trait;
use aws_config::TimeoutConfig;
use aws_sdk_sesv2 as ses;
use aws_sdk_sesv2::model::{Body, Content, Destination, EmailContent, Message};
use std::time::Duration;

pub struct SesMailTransport {
    ses_client: ses::Client,
    configured: bool,
}

impl SesMailTransport {
    pub async fn new(configuration: &Settings) -> Self {
        let timeout = TimeoutConfig::new().with_api_call_timeout(Some(Duration::from_millis(
            configuration.email_client.timeout_milliseconds,
        )));
        let shared_config = aws_config::from_env().timeout_config(timeout).load().await;
        let configured =
            shared_config.region().is_some() && shared_config.credentials_provider().is_some();
        Self {
            ses_client: ses::Client::new(&shared_config),
            configured,
        }
    }
}

#[async_trait]
impl MailTransport for SesMailTransport {
    fn is_configured(&self) -> bool {
        self.configured
    }

    async fn send_email(&self, email: OutgoingEmail) -> anyhow::Result<SendReceipt> {
        let html_content = Content::builder()
            .data(&email.html_content)
            .charset("UTF-8")
            .build();
        let text_content = Content::builder()
            .data(&email.text_content)
            .charset("UTF-8")
            .build();
        let body = Body::builder()
            .html(html_content)
            .text(text_content)
            .build();
        let subject = Content::builder()
            .data(&email.subject)
            .charset("UTF-8")
            .build();
        let message = Message::builder().subject(subject).body(body).build();
        let content = EmailContent::builder().simple(message).build();
        let destination = Destination::builder()
            .to_addresses(email.to.as_ref())
            .build();

        let mut request = self
            .ses_client
            .send_email()
            .from_email_address(&email.from)
            .destination(destination)
            .content(content);
        if let Some(reply_to) = &email.reply_to {
            request = request.reply_to_addresses(reply_to);
        }
        let response = request.send().await?;
        Ok(SendReceipt {
            message_id: response.message_id,
        })
    }

    async fn send_quota(&self) -> anyhow::Result<SendQuota> {
        let account = self.ses_client.get_account().send().await?;
        let quota = account
            .send_quota
            .context("The provider response did not include a send quota.")?;
        Ok(SendQuota {
            max_24_hour: quota.max24_hour_send,
            max_send_rate: quota.max_send_rate,
            sent_last_24_hours: quota.sent_last24_hours,
        })
    }
}
