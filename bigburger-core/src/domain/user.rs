//! User domain model

use serde::{Deserialize, Serialize};

use super::contact::is_valid_email;
use super::ValidationError;

pub const MIN_PASSWORD_LEN: usize = 6;

/// A customer as seen by the rest of the application
///
/// The password never lives here; it only exists on [`UserRecord`] while
/// the login check runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(deserialize_with = "super::wire::deserialize_id")]
    pub id: String,
    pub email: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl User {
    pub fn new(id: impl Into<String>, email: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            email: email.into(),
            name: name.into(),
            phone: None,
        }
    }
}

/// A row of the `users` collection, password included
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    #[serde(flatten)]
    pub user: User,
    #[serde(default)]
    pub password: String,
}

impl UserRecord {
    /// Plaintext comparison; a placeholder, not a security mechanism
    pub fn matches(&self, email: &str, password: &str) -> bool {
        self.user.email == email && self.password == password
    }
}

/// Registration form
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub password: String,
}

impl NewUser {
    /// Name at least 2 chars, valid email, password at least 6 chars
    pub fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        if self.name.trim().chars().count() < 2 {
            errors.push(ValidationError::new("name", "Name must have at least 2 characters"));
        }
        if !is_valid_email(self.email.trim()) {
            errors.push(ValidationError::new("email", "Invalid email"));
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            errors.push(ValidationError::new(
                "password",
                format!("Password must have at least {} characters", MIN_PASSWORD_LEN),
            ));
        }
        errors
    }
}
