//! Wire types for the public contact endpoint.

use serde::{Deserialize, Serialize};

/// Body accepted by `POST /api/contact`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactRequest {
    pub email: String,
    pub message: String,
}

/// Body returned by `POST /api/contact`, for both accepted and rejected submissions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactResponse {
    pub success: bool,
    pub message: String,
}

impl ContactResponse {
    pub fn accepted(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_default_to_empty() {
        let request: ContactRequest = serde_json::from_str(r#"{"email":"a@b.co"}"#).unwrap();
        assert_eq!(request.email, "a@b.co");
        assert!(request.message.is_empty());
    }

    #[test]
    fn response_serializes_flat() {
        let body = serde_json::to_string(&ContactResponse::rejected("nope")).unwrap();
        assert_eq!(body, r#"{"success":false,"message":"nope"}"#);
    }
}
