use crate::email::{MailTransport, SendQuota};
use crate::guards::AuthenticatedOperator;
use crate::routes::error_chain_fmt;
use anyhow::Context;
use rocket::http::Status;
use rocket::response::Responder;
use rocket::serde::json::Json;
use rocket::{Request, Response, State};
use std::sync::Arc;

/// Relays the provider's account-level sending limits for display. The
/// pacing policy never consults these numbers.
#[get("/send_quota")]
pub async fn send_quota(
    transport: &State<Arc<dyn MailTransport>>,
    _operator: AuthenticatedOperator,
) -> Result<Json<SendQuota>, QuotaError> {
    let quota = transport
        .send_quota()
        .await
        .context("Failed to fetch the send quota from the mail provider.")?;
    Ok(Json(quota))
}

#[derive(thiserror::Error)]
pub enum QuotaError {
    #[error(transparent)]
    UnexpectedError(#[from] anyhow::Error),
}

impl std::fmt::Debug for QuotaError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl<'r> Responder<'r, 'static> for QuotaError {
    fn respond_to(self, _request: &'r Request<'_>) -> rocket::response::Result<'static> {
        tracing::warn!("QuotaError: {:?}", self);
        Response::build()
            .status(match self {
                QuotaError::UnexpectedError(_) => Status::InternalServerError,
            })
            .ok()
    }
}
