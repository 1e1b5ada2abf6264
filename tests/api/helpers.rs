use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHasher};
use async_trait::async_trait;
use campaigner::configuration::get_configuration;
use campaigner::email::{MailTransport, OutgoingEmail, SendQuota, SendReceipt};
use campaigner::history::InMemoryHistory;
use campaigner::startup::Application;
use campaigner::storage::InMemoryContactStore;
use campaigner::telemetry::{get_subscriber, init_subscriber};
use once_cell::sync::Lazy;
use secrecy::Secret;
use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

static TRACING: Lazy<()> = Lazy::new(|| {
    let default_filter_level = "info".into();
    let subscriber_name = "test".into();
    if std::env::var("TEST_LOG").is_ok() {
        let subscriber = get_subscriber(subscriber_name, default_filter_level, std::io::stdout);
        init_subscriber(subscriber);
    } else {
        let subscriber = get_subscriber(subscriber_name, default_filter_level, std::io::sink);
        init_subscriber(subscriber);
    }
});

/// Stand-in for SES: remembers every outgoing email and fails on demand.
pub struct FakeMailTransport {
    pub sent_emails: Mutex<Vec<OutgoingEmail>>,
    fail_for: Mutex<HashSet<String>>,
}

impl FakeMailTransport {
    pub fn new() -> FakeMailTransport {
        FakeMailTransport {
            sent_emails: Mutex::new(Vec::new()),
            fail_for: Mutex::new(HashSet::new()),
        }
    }

    pub fn fail_sends_to(&self, email: &str) {
        self.fail_for.lock().unwrap().insert(email.to_string());
    }
}

#[async_trait]
impl MailTransport for FakeMailTransport {
    fn is_configured(&self) -> bool {
        true
    }

    async fn send_email(&self, email: OutgoingEmail) -> anyhow::Result<SendReceipt> {
        let rejected = self.fail_for.lock().unwrap().contains(email.to.as_ref());
        let mut sent_emails = self.sent_emails.lock().unwrap();
        sent_emails.push(email);
        if rejected {
            Err(anyhow::anyhow!("MessageRejected: Email address is not verified."))
        } else {
            Ok(SendReceipt {
                message_id: Some(format!("fake-{}", sent_emails.len())),
            })
        }
    }

    async fn send_quota(&self) -> anyhow::Result<SendQuota> {
        Ok(SendQuota {
            max_24_hour: 50000.0,
            max_send_rate: 14.0,
            sent_last_24_hours: 123.0,
        })
    }
}

pub struct TestApp {
    pub address: String,
    pub username: String,
    pub password: String,
    pub transport: Arc<FakeMailTransport>,
    pub history: Arc<InMemoryHistory>,
    pub contacts: Arc<InMemoryContactStore>,
}

impl TestApp {
    pub async fn post_campaigns(&self, body: &serde_json::Value) -> reqwest::Response {
        reqwest::Client::new()
            .post(&format!("{}/campaigns", &self.address))
            .basic_auth(&self.username, Some(&self.password))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn get_send_quota(&self) -> reqwest::Response {
        reqwest::Client::new()
            .get(&format!("{}/send_quota", &self.address))
            .basic_auth(&self.username, Some(&self.password))
            .send()
            .await
            .expect("Failed to execute request.")
    }
}

pub async fn spawn_app() -> TestApp {
    Lazy::force(&TRACING);

    let username = "operator".to_string();
    let password = Uuid::new_v4().to_string();

    let configuration = {
        let mut c = get_configuration().expect("Failed to read configuration.");
        c.application.port = None;
        c.sending.chill_mode = false;
        c.sending.rate_per_second = None;
        c.operator.username = username.clone();
        c.operator.password_hash = Secret::new(hash_password(&password));
        c
    };

    let transport = Arc::new(FakeMailTransport::new());
    let history = Arc::new(InMemoryHistory::new());
    let contacts = Arc::new(InMemoryContactStore::new());

    let app = Application::build(
        &configuration,
        transport.clone(),
        history.clone(),
        contacts.clone(),
    )
    .await
    .unwrap();
    let port = app.port;
    let _ = tokio::spawn(app.server.launch());
    TestApp {
        address: format!("http://127.0.0.1:{}", port.get().await),
        username,
        password,
        transport,
        history,
        contacts,
    }
}

fn hash_password(password: &str) -> String {
    let salt = SaltString::generate(&mut rand::thread_rng());
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .expect("Failed to hash the test operator password.")
        .to_string()
}

/// A request body that passes validation; tests tweak it per scenario.
pub fn valid_campaign_body() -> serde_json::Value {
    serde_json::json!({
        "template": {
            "name": "Launch announcement",
            "subject": "Hi {{name}}",
            "html": "<p>{{name}} at {{company}}</p>",
            "text": "{{name}} at {{company}}"
        },
        "sender": {
            "name": "Grace Hopper",
            "email": "grace@navy.mil",
            "signature": "-- Grace"
        },
        "recipients": [
            { "name": "Ada Lovelace", "email": "ada@x.com", "company": "Analytical Engines" },
            { "name": "Cher", "email": "cher@x.com" },
            { "name": "Alan Turing", "email": "alan@x.com", "company": "Bletchley" }
        ]
    })
}
