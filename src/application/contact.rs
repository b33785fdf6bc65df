use metrics::counter;
use tracing::{info, warn};
use vantage_api_types::{ContactRequest, ContactResponse};

use crate::domain::contact::{ContactError, ContactSubmission};
use crate::domain::i18n::{Locale, Msg, translate};

const SUBMISSIONS_METRIC: &str = "vantage_contact_submissions_total";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactOutcome {
    Accepted,
    Rejected(ContactError),
    RateLimited,
}

impl ContactOutcome {
    fn label(&self) -> &'static str {
        match self {
            Self::Accepted => "accepted",
            Self::Rejected(_) => "rejected",
            Self::RateLimited => "rate_limited",
        }
    }

    pub fn message(&self, locale: Locale) -> &'static str {
        let msg = match self {
            Self::Accepted => Msg::ContactSuccess,
            Self::Rejected(ContactError::InvalidEmail) => Msg::ContactInvalidEmail,
            Self::Rejected(ContactError::MessageTooShort) => Msg::ContactMessageTooShort,
            Self::RateLimited => Msg::ContactRateLimited,
        };
        translate(locale, msg)
    }

    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted)
    }

    pub fn to_response(&self, locale: Locale) -> ContactResponse {
        if self.is_accepted() {
            ContactResponse::accepted(self.message(locale))
        } else {
            ContactResponse::rejected(self.message(locale))
        }
    }
}

/// Validates and records contact submissions. Nothing is persisted.
#[derive(Debug, Clone, Default)]
pub struct ContactService;

impl ContactService {
    pub fn new() -> Self {
        Self
    }

    pub fn submit(&self, request: &ContactRequest) -> ContactOutcome {
        let outcome = match ContactSubmission::parse(&request.email, &request.message) {
            Ok(submission) => {
                info!(
                    target = "vantage::contact",
                    email_domain = submission.email_domain(),
                    message_chars = submission.message().chars().count(),
                    "contact submission accepted"
                );
                ContactOutcome::Accepted
            }
            Err(err) => ContactOutcome::Rejected(err),
        };
        record(&outcome);
        outcome
    }

    /// Count a submission the rate limiter turned away before validation.
    pub fn rate_limited(&self, client: &str) -> ContactOutcome {
        warn!(
            target = "vantage::contact",
            client = client,
            "contact submission rate limited"
        );
        let outcome = ContactOutcome::RateLimited;
        record(&outcome);
        outcome
    }
}

fn record(outcome: &ContactOutcome) {
    counter!(SUBMISSIONS_METRIC, "outcome" => outcome.label()).increment(1);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(email: &str, message: &str) -> ContactRequest {
        ContactRequest {
            email: email.to_string(),
            message: message.to_string(),
        }
    }

    #[test]
    fn accepts_valid_submission() {
        let outcome = ContactService::new().submit(&request(
            "ceo@example.com",
            "We need help with our operating model.",
        ));
        assert!(outcome.is_accepted());
        let response = outcome.to_response(Locale::En);
        assert!(response.success);
    }

    #[test]
    fn rejection_carries_localized_reason() {
        let outcome = ContactService::new().submit(&request("ceo@example.com", "short"));
        assert_eq!(
            outcome,
            ContactOutcome::Rejected(ContactError::MessageTooShort)
        );
        assert_eq!(
            outcome.to_response(Locale::Fr).message,
            "Your message must be at least 10 characters long."
        );
    }
}
