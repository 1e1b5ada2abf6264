use chrono::offset::Utc;
use chrono::DateTime;
use uuid::Uuid;

/// An email template with `{{token}}` placeholders in its subject and
/// bodies. The placeholder list is a cache derived from the content; it
/// is recomputed on every content mutation, never at render time.
#[derive(Clone, Debug)]
pub struct MessageTemplate {
    pub id: Uuid,
    pub name: String,
    pub subject: String,
    pub html_content: String,
    pub text_content: String,
    placeholders: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl MessageTemplate {
    pub fn new(
        name: String,
        subject: String,
        html_content: String,
        text_content: String,
    ) -> MessageTemplate {
        let placeholders = extract_placeholders(&subject, &html_content, &text_content);
        let now = Utc::now();
        MessageTemplate {
            id: Uuid::new_v4(),
            name,
            subject,
            html_content,
            text_content,
            placeholders,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replaces the template content and recomputes the placeholder cache
    /// in the same step, keeping the two in sync.
    pub fn update_content(&mut self, subject: String, html_content: String, text_content: String) {
        self.placeholders = extract_placeholders(&subject, &html_content, &text_content);
        self.subject = subject;
        self.html_content = html_content;
        self.text_content = text_content;
        self.updated_at = Utc::now();
    }

    /// Distinct placeholder names as of the last content mutation, in
    /// order of first appearance (subject, then html, then text).
    pub fn placeholders(&self) -> &[String] {
        &self.placeholders
    }
}

/// Scans subject and both bodies for `{{token}}` occurrences and returns
/// the distinct token names. Tokens containing whitespace or braces are
/// not placeholders and are skipped.
pub fn extract_placeholders(subject: &str, html_content: &str, text_content: &str) -> Vec<String> {
    let mut found = Vec::new();
    for input in [subject, html_content, text_content] {
        scan_tokens(input, &mut found);
    }
    found
}

fn scan_tokens(input: &str, found: &mut Vec<String>) {
    let mut rest = input;
    while let Some(start) = rest.find("{{") {
        rest = &rest[start + 2..];
        let end = match rest.find("}}") {
            Some(end) => end,
            None => break,
        };
        let token = &rest[..end];
        let is_well_formed = !token.is_empty()
            && !token
                .chars()
                .any(|c| c.is_whitespace() || c == '{' || c == '}');
        if is_well_formed && !found.iter().any(|known| known == token) {
            found.push(token.to_string());
        }
        rest = &rest[end + 2..];
    }
}
