//! Auth service - toy login, registration and session guard
//!
//! Credentials are compared in plaintext against the `users` collection and
//! the session token is an unsigned base64 blob (see [`AuthToken`]). This is
//! a placeholder for a storefront demo, not a security boundary.

use std::sync::Arc;

use chrono::{Duration, Utc};
use serde::Serialize;

use crate::domain::result::{ApiResponse, Error, Result};
use crate::domain::token::DEFAULT_TOKEN_TTL_HOURS;
use crate::domain::{describe_validation, AuthToken, NewUser, User, UserRecord};
use crate::ports::{SessionStore, Store};

/// Result of a successful login or registration
#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    pub user: User,
    pub token: String,
    pub message: String,
}

pub struct AuthService {
    store: Arc<dyn Store>,
    session: Arc<dyn SessionStore>,
    token_ttl: Duration,
}

impl AuthService {
    pub fn new(store: Arc<dyn Store>, session: Arc<dyn SessionStore>) -> Self {
        Self {
            store,
            session,
            token_ttl: Duration::hours(DEFAULT_TOKEN_TTL_HOURS),
        }
    }

    pub fn with_token_ttl(mut self, ttl: Duration) -> Self {
        self.token_ttl = ttl;
        self
    }

    pub fn login(&self, email: &str, password: &str) -> Result<ApiResponse<LoginResponse>> {
        let email = email.trim();
        if email.is_empty() || password.is_empty() {
            return Err(Error::validation("Email and password are required"));
        }

        let users = self.store.list_users()?.data;
        let record = users
            .into_iter()
            .find(|u| u.matches(email, password))
            .ok_or_else(|| {
                Error::Unauthorized("Incorrect email or password. Please try again.".to_string())
            })?;

        let token = self.start_session(&record.user.id)?;
        let message = format!("Welcome, {}!", record.user.name);
        Ok(ApiResponse::ok(
            LoginResponse {
                user: record.user,
                token,
                message,
            },
            "Logged in",
        ))
    }

    /// Create an account and log it in
    pub fn register(&self, new_user: NewUser) -> Result<ApiResponse<LoginResponse>> {
        let errors = new_user.validate();
        if !errors.is_empty() {
            return Err(Error::validation(describe_validation(&errors)));
        }

        let users = self.store.list_users()?.data;
        let email = new_user.email.trim().to_string();
        if users.iter().any(|u| u.user.email == email) {
            return Err(Error::Conflict(
                "Email already registered. Use another email or log in.".to_string(),
            ));
        }

        let record = UserRecord {
            user: User {
                id: (users.len() + 1).to_string(),
                email,
                name: new_user.name.trim().to_string(),
                phone: new_user.phone.filter(|p| !p.trim().is_empty()),
            },
            password: new_user.password,
        };
        let user = self.store.create_user(&record)?.data.user;

        let token = self.start_session(&user.id)?;
        let message = format!("Account created! Welcome, {}!", user.name);
        Ok(ApiResponse::created(
            LoginResponse {
                user,
                token,
                message,
            },
            "Registered",
        ))
    }

    pub fn logout(&self) -> Result<ApiResponse<()>> {
        self.session.clear_token()?;
        Ok(ApiResponse::ok((), "Logged out"))
    }

    /// Resolve the stored session
    ///
    /// `data` is `None` with status 401 when there is no usable token and
    /// status 404 when the token names a user that no longer exists.
    pub fn current_user(&self) -> Result<ApiResponse<Option<User>>> {
        let invalid = || ApiResponse {
            data: None,
            status: 401,
            message: "Invalid or expired token".to_string(),
        };

        let Some(token) = self.session.load_token()? else {
            return Ok(invalid());
        };
        let Some(payload) = AuthToken::decode(&token) else {
            return Ok(invalid());
        };
        if payload.is_expired(Utc::now()) {
            return Ok(invalid());
        }

        let users = self.store.list_users()?.data;
        match users.into_iter().find(|u| u.user.id == payload.user_id) {
            Some(record) => Ok(ApiResponse::ok(Some(record.user), "Token valid")),
            None => Ok(ApiResponse {
                data: None,
                status: 404,
                message: "User not found".to_string(),
            }),
        }
    }

    /// Guard for routes that need a logged-in user
    pub fn require_user(&self) -> Result<User> {
        self.current_user()?
            .data
            .ok_or_else(|| Error::Unauthorized("login required".to_string()))
    }

    fn start_session(&self, user_id: &str) -> Result<String> {
        let token = AuthToken::issue(user_id, Utc::now(), self.token_ttl).encode();
        self.session.save_token(&token)?;
        Ok(token)
    }
}
