use crate::domain::ContactEmail;
use uuid::Uuid;

/// The identity a campaign is sent as. At most one profile in the active
/// set carries `is_default`; clearing the flag on the others is the
/// storage collaborator's job.
#[derive(Clone, Debug)]
pub struct SenderProfile {
    pub id: Uuid,
    pub name: String,
    pub email: ContactEmail,
    pub signature: Option<String>,
    pub is_default: bool,
}

impl SenderProfile {
    pub fn new(name: String, email: ContactEmail, signature: Option<String>) -> SenderProfile {
        SenderProfile {
            id: Uuid::new_v4(),
            name,
            email,
            signature,
            is_default: false,
        }
    }

    /// The RFC 5322 `From` value used on outgoing mail.
    pub fn formatted_address(&self) -> String {
        format!("\"{}\" <{}>", self.name, self.email)
    }
}
