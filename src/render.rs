use crate::domain::{Contact, MessageTemplate, SenderProfile};

/// The subject and bodies produced for one recipient, ready to hand to
/// the mail transport.
#[derive(Clone, Debug)]
pub struct RenderedEmail {
    pub subject: String,
    pub html_content: String,
    pub text_content: String,
}

/// The closed placeholder vocabulary. Tokens outside this set are left
/// verbatim in the output; they are validated at template-save time, not
/// here.
const PLACEHOLDER_KEYS: [&str; 8] = [
    "name",
    "email",
    "company",
    "firstName",
    "lastName",
    "senderName",
    "senderEmail",
    "senderSignature",
];

/// Substitutes every `{{key}}` occurrence in subject, html and text with
/// the value resolved from the contact and the sender profile. Missing
/// optional values become the empty string, never the literal token.
///
/// Substituted values are not HTML-escaped; the html body is emitted as
/// trusted raw markup authored by the operator.
pub fn render_template(
    template: &MessageTemplate,
    contact: &Contact,
    sender: Option<&SenderProfile>,
) -> RenderedEmail {
    let (first_name, last_name) = split_name(contact.name.as_ref());

    let mut subject = template.subject.clone();
    let mut html_content = template.html_content.clone();
    let mut text_content = template.text_content.clone();

    for key in PLACEHOLDER_KEYS {
        let value = match key {
            "name" => contact.name.as_ref().to_string(),
            "email" => contact.email.as_ref().to_string(),
            "company" => contact.company.clone().unwrap_or_default(),
            "firstName" => first_name.clone(),
            "lastName" => last_name.clone(),
            "senderName" => sender.map(|s| s.name.clone()).unwrap_or_default(),
            "senderEmail" => sender
                .map(|s| s.email.as_ref().to_string())
                .unwrap_or_default(),
            "senderSignature" => sender.and_then(|s| s.signature.clone()).unwrap_or_default(),
            _ => unreachable!(),
        };
        let token = format!("{{{{{}}}}}", key);
        subject = subject.replace(&token, &value);
        html_content = html_content.replace(&token, &value);
        text_content = text_content.replace(&token, &value);
    }

    RenderedEmail {
        subject,
        html_content,
        text_content,
    }
}

/// First whitespace-separated token vs. the remaining tokens joined by a
/// single space. A single-token name yields an empty last name.
fn split_name(full_name: &str) -> (String, String) {
    let mut parts = full_name.split_whitespace();
    let first = parts.next().unwrap_or_default().to_string();
    let rest = parts.collect::<Vec<_>>().join(" ");
    (first, rest)
}
