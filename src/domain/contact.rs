//! Contact form submission rules.

use thiserror::Error;

pub const MIN_MESSAGE_CHARS: usize = 10;
const MAX_EMAIL_LEN: usize = 254;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContactError {
    #[error("email address is not valid")]
    InvalidEmail,
    #[error("message must be at least 10 characters")]
    MessageTooShort,
}

/// A submission that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactSubmission {
    email: String,
    message: String,
}

impl ContactSubmission {
    pub fn parse(email: &str, message: &str) -> Result<Self, ContactError> {
        let email = email.trim();
        if !is_valid_email(email) {
            return Err(ContactError::InvalidEmail);
        }

        let message = message.trim();
        if message.chars().count() < MIN_MESSAGE_CHARS {
            return Err(ContactError::MessageTooShort);
        }

        Ok(Self {
            email: email.to_string(),
            message: message.to_string(),
        })
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Domain half of the address; safe to log.
    pub fn email_domain(&self) -> &str {
        self.email
            .rsplit_once('@')
            .map(|(_, domain)| domain)
            .unwrap_or_default()
    }
}

/// `local@domain.tld` with a dotted domain of alphanumeric/hyphen labels.
pub fn is_valid_email(email: &str) -> bool {
    if email.is_empty() || email.len() > MAX_EMAIL_LEN {
        return false;
    }

    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    if local.is_empty()
        || domain.contains('@')
        || local.chars().any(|ch| ch.is_whitespace() || ch.is_control())
        || local.starts_with('.')
        || local.ends_with('.')
        || local.contains("..")
    {
        return false;
    }

    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 {
        return false;
    }

    let labels_ok = labels.iter().all(|label| {
        !label.is_empty()
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label
                .chars()
                .all(|ch| ch.is_ascii_alphanumeric() || ch == '-')
    });

    let tld_ok = labels
        .last()
        .is_some_and(|tld| tld.len() >= 2 && tld.chars().all(|ch| ch.is_ascii_alphabetic()));

    labels_ok && tld_ok
}
