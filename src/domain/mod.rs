mod contact;
mod contact_email;
mod contact_name;
mod sender_profile;
mod sent_email;
mod template;

pub use contact::*;
pub use contact_email::*;
pub use contact_name::*;
pub use sender_profile::*;
pub use sent_email::*;
pub use template::*;
