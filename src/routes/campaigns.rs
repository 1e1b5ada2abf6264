use crate::campaign::{CampaignError, CampaignRunner, CampaignSummary, PacingPolicy, TokioPacer};
use crate::configuration::SendingSettings;
use crate::domain::{Contact, ContactEmail, ContactName, MessageTemplate, SenderProfile};
use crate::email::MailTransport;
use crate::guards::AuthenticatedOperator;
use crate::history::HistoryRecorder;
use crate::routes::error_chain_fmt;
use crate::startup::CampaignGate;
use crate::storage::ContactStore;
use rocket::http::Status;
use rocket::response::Responder;
use rocket::serde::json::Json;
use rocket::{Request, Response, State};
use std::sync::Arc;
use uuid::Uuid;

#[derive(serde::Deserialize)]
pub struct BodyData {
    template: TemplateData,
    sender: SenderData,
    recipients: Vec<RecipientData>,
    chill_mode: Option<bool>,
}

#[derive(serde::Deserialize)]
pub struct TemplateData {
    name: String,
    subject: String,
    html: String,
    text: String,
}

#[derive(serde::Deserialize)]
pub struct SenderData {
    name: String,
    email: String,
    signature: Option<String>,
}

#[derive(serde::Deserialize)]
pub struct RecipientData {
    name: String,
    email: String,
    company: Option<String>,
}

impl From<TemplateData> for MessageTemplate {
    fn from(data: TemplateData) -> Self {
        MessageTemplate::new(data.name, data.subject, data.html, data.text)
    }
}

impl TryFrom<SenderData> for SenderProfile {
    type Error = String;

    fn try_from(data: SenderData) -> Result<Self, Self::Error> {
        let email = ContactEmail::parse(data.email)?;
        Ok(SenderProfile::new(data.name, email, data.signature))
    }
}

impl TryFrom<RecipientData> for Contact {
    type Error = String;

    fn try_from(data: RecipientData) -> Result<Self, Self::Error> {
        let email = ContactEmail::parse(data.email)?;
        let name = ContactName::parse(data.name)?;
        Ok(Contact::new(email, name, data.company))
    }
}

#[tracing::instrument(
    name = "Sending a campaign",
    skip(body, transport, history, contacts, sending, gate, _operator),
    fields(request_id = %Uuid::new_v4())
)]
#[post("/campaigns", data = "<body>")]
pub async fn send_campaign(
    body: Json<BodyData>,
    transport: &State<Arc<dyn MailTransport>>,
    history: &State<Arc<dyn HistoryRecorder>>,
    contacts: &State<Arc<dyn ContactStore>>,
    sending: &State<SendingSettings>,
    gate: &State<CampaignGate>,
    _operator: AuthenticatedOperator,
) -> Result<Json<CampaignSummary>, SendCampaignError> {
    let body = body.into_inner();

    let template = MessageTemplate::from(body.template);
    let sender =
        SenderProfile::try_from(body.sender).map_err(SendCampaignError::ValidationError)?;
    let recipients = body
        .recipients
        .into_iter()
        .map(Contact::try_from)
        .collect::<Result<Vec<_>, _>>()
        .map_err(SendCampaignError::ValidationError)?;

    let chill_mode = body.chill_mode.unwrap_or(sending.chill_mode);
    let policy = PacingPolicy::select(chill_mode, sending.rate_per_second);

    let runner = CampaignRunner::new(
        transport.inner().clone(),
        history.inner().clone(),
        contacts.inner().clone(),
        Arc::new(TokioPacer),
    );

    // One campaign at a time; a second request waits for the first run
    // to finish rather than contending for the provider's rate limit.
    let _running = gate.0.lock().await;
    let summary = runner.run(&template, &sender, &recipients, policy).await?;
    Ok(Json(summary))
}

#[derive(thiserror::Error)]
pub enum SendCampaignError {
    #[error("{0}")]
    ValidationError(String),
    #[error(transparent)]
    RefusedError(#[from] CampaignError),
    #[error(transparent)]
    UnexpectedError(#[from] anyhow::Error),
}

impl std::fmt::Debug for SendCampaignError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl<'r> Responder<'r, 'static> for SendCampaignError {
    fn respond_to(self, _request: &'r Request<'_>) -> rocket::response::Result<'static> {
        tracing::warn!("SendCampaignError: {:?}", self);
        Response::build()
            .status(match self {
                SendCampaignError::ValidationError(_) | SendCampaignError::RefusedError(_) => {
                    Status::BadRequest
                }
                SendCampaignError::UnexpectedError(_) => Status::InternalServerError,
            })
            .ok()
    }
}
