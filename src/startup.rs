use crate::catchers::*;
use crate::configuration::Settings;
use crate::email::MailTransport;
use crate::history::HistoryRecorder;
use crate::port_saver;
use crate::port_saver::Port;
use crate::routes::*;
use crate::storage::ContactStore;
use rocket::{Config, Ignite, Rocket};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Serializes campaign runs: the send route holds this lock for the
/// whole run, so two concurrent requests never contend for the
/// provider's rate limit.
pub struct CampaignGate(pub Mutex<()>);

pub struct Application {
    pub server: Rocket<Ignite>,
    pub port: Port,
}

impl Application {
    pub async fn build(
        configuration: &Settings,
        transport: Arc<dyn MailTransport>,
        history: Arc<dyn HistoryRecorder>,
        contacts: Arc<dyn ContactStore>,
    ) -> Result<Application, rocket::Error> {
        let (port_saver, port) = port_saver::create_pair();
        let server = rocket::custom(Config {
            port: configuration.application.port.unwrap_or(0),
            address: configuration.application.host,
            ..Config::debug_default()
        })
        .attach(port_saver)
        .manage(transport)
        .manage(history)
        .manage(contacts)
        .manage(configuration.sending.clone())
        .manage(configuration.operator.clone())
        .manage(CampaignGate(Mutex::new(())))
        .mount("/", routes![health_check, send_campaign, send_quota::send_quota])
        .register(
            "/",
            catchers![
                unauthorized_request_credentials,
                unprocessable_entity_to_bad_request
            ],
        )
        .ignite()
        .await?;
        Ok(Application { server, port })
    }
}
