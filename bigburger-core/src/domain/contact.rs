//! Contact form domain model and validation

use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};

/// A single failed form field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Join field errors into one line for the error envelope
pub fn describe(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join("; ")
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl ContactForm {
    /// Name 3-100 chars, valid email, message 10-500 chars
    pub fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        let name_len = self.name.trim().chars().count();
        if name_len == 0 {
            errors.push(ValidationError::new("name", "Name is required"));
        } else if name_len < 3 {
            errors.push(ValidationError::new("name", "Name must have at least 3 characters"));
        } else if name_len > 100 {
            errors.push(ValidationError::new("name", "Name must have at most 100 characters"));
        }

        let email = self.email.trim();
        if email.is_empty() {
            errors.push(ValidationError::new("email", "Email is required"));
        } else if !is_valid_email(email) {
            errors.push(ValidationError::new("email", "Invalid email"));
        }

        let message_len = self.message.trim().chars().count();
        if message_len == 0 {
            errors.push(ValidationError::new("message", "Message is required"));
        } else if message_len < 10 {
            errors.push(ValidationError::new("message", "Message must have at least 10 characters"));
        } else if message_len > 500 {
            errors.push(ValidationError::new("message", "Message must have at most 500 characters"));
        }

        errors
    }
}

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("Invalid regex"));

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// A stored contact message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    #[serde(deserialize_with = "super::wire::deserialize_id")]
    pub id: String,
    #[serde(flatten)]
    pub form: ContactForm,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}
