use campaigner::configuration::get_configuration;
use campaigner::email::SesMailTransport;
use campaigner::history::InMemoryHistory;
use campaigner::startup::Application;
use campaigner::storage::InMemoryContactStore;
use campaigner::telemetry::{get_subscriber, init_subscriber};
use std::sync::Arc;

#[rocket::main]
async fn main() -> Result<(), rocket::Error> {
    let subscriber = get_subscriber("campaigner".into(), "info".into(), std::io::stdout);
    init_subscriber(subscriber);

    let configuration = get_configuration().expect("Failed to read configuration.");
    let transport = SesMailTransport::new(&configuration).await;
    let app = Application::build(
        &configuration,
        Arc::new(transport),
        Arc::new(InMemoryHistory::new()),
        Arc::new(InMemoryContactStore::new()),
    )
    .await?;
    app.server.launch().await?;
    Ok(())
}
