use crate::configuration::OperatorSettings;
use crate::guards::BasicAuth;
use anyhow::{anyhow, Context};
use argon2::{Argon2, PasswordHash, PasswordVerifier};
use async_trait::async_trait;
use rocket::http::Status;
use rocket::outcome::{try_outcome, IntoOutcome};
use rocket::request::{FromRequest, Outcome};
use rocket::{Request, State};
use secrecy::ExposeSecret;

/// The single configured operator, proven by Basic-auth credentials
/// matching the argon2 hash in the settings.
pub struct AuthenticatedOperator {
    pub username: String,
    // prevents construction outside of this module
    _private: (),
}

#[async_trait]
impl<'r> FromRequest<'r> for AuthenticatedOperator {
    type Error = anyhow::Error;

    async fn from_request(request: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        let operator = try_outcome!(request.guard::<&State<OperatorSettings>>().await.map_error(
            |_| (
                Status::InternalServerError,
                anyhow!("The operator settings were not managed by the server.")
            )
        ));
        let basic_auth = try_outcome!(request.guard::<BasicAuth>().await.map_error(|_| (
            Status::Unauthorized,
            anyhow!("User has not been authenticated.")
        )));

        validate_credentials(basic_auth, operator).or_error(Status::Unauthorized)
    }
}

fn validate_credentials(
    basic_auth: BasicAuth,
    operator: &OperatorSettings,
) -> Result<AuthenticatedOperator, anyhow::Error> {
    if basic_auth.username != operator.username {
        return Err(anyhow!("Unknown operator username."));
    }

    let expected_hash = PasswordHash::new(operator.password_hash.expose_secret())
        .context("Failed to parse the stored operator password hash in PHC format.")?;

    Argon2::default()
        .verify_password(basic_auth.password.expose_secret().as_bytes(), &expected_hash)
        .context("Invalid password.")?;

    Ok(AuthenticatedOperator {
        username: basic_auth.username,
        _private: (),
    })
}
