use crate::domain::{ContactEmail, ContactName};
use chrono::offset::Utc;
use chrono::DateTime;
use uuid::Uuid;

/// How warm a contact is, as judged by the operator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Classification {
    Default,
    ColdLead,
    HotLead,
}

#[derive(Clone, Debug)]
pub struct Contact {
    pub id: Uuid,
    pub email: ContactEmail,
    pub name: ContactName,
    pub company: Option<String>,
    pub labels: Vec<String>,
    pub classification: Classification,
    pub created_at: DateTime<Utc>,
    pub last_contacted_at: Option<DateTime<Utc>>,
}

impl Contact {
    pub fn new(email: ContactEmail, name: ContactName, company: Option<String>) -> Contact {
        Contact {
            id: Uuid::new_v4(),
            email,
            name,
            company,
            labels: Vec::new(),
            classification: Classification::Default,
            created_at: Utc::now(),
            last_contacted_at: None,
        }
    }
}
