use crate::domain::Contact;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Mutex;
use uuid::Uuid;

/// The sliver of the contact store the campaign runner needs: stamping a
/// contact as just contacted. Returns the updated contact, or `None` if
/// the id is unknown.
#[async_trait]
pub trait ContactStore: Send + Sync {
    async fn mark_contacted(
        &self,
        contact_id: Uuid,
        at: DateTime<Utc>,
    ) -> Result<Option<Contact>, anyhow::Error>;
}

pub struct InMemoryContactStore {
    contacts: Mutex<HashMap<Uuid, Contact>>,
}

impl InMemoryContactStore {
    pub fn new() -> InMemoryContactStore {
        InMemoryContactStore {
            contacts: Mutex::new(HashMap::new()),
        }
    }

    pub fn add(&self, contact: Contact) {
        self.contacts.lock().unwrap().insert(contact.id, contact);
    }

    pub fn get(&self, contact_id: Uuid) -> Option<Contact> {
        self.contacts.lock().unwrap().get(&contact_id).cloned()
    }
}

impl Default for InMemoryContactStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ContactStore for InMemoryContactStore {
    async fn mark_contacted(
        &self,
        contact_id: Uuid,
        at: DateTime<Utc>,
    ) -> anyhow::Result<Option<Contact>> {
        let mut contacts = self.contacts.lock().unwrap();
        Ok(contacts.get_mut(&contact_id).map(|contact| {
            contact.last_contacted_at = Some(at);
            contact.clone()
        }))
    }
}
