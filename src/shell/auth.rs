//! Login gate for the terminal shell.
//!
//! Authentication is deliberately a seam, not a security mechanism: the
//! shipped [`OpenAuth`] provider accepts any credentials after the same form
//! validation the game has always had. A real provider can implement
//! [`AuthProvider`] and replace it without touching the progression core.

use chrono::{DateTime, Utc};
use rand::Rng;
use thiserror::Error;
use uuid::Uuid;

/// Minimum password length enforced on registration.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Form-validation failures at the login gate. All are user-correctable.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("please fill in all fields ({0} is missing)")]
    MissingField(&'static str),

    #[error("password must be at least 6 characters")]
    PasswordTooShort,

    #[error("passwords do not match")]
    PasswordMismatch,
}

/// An authenticated player identity, valid for one session.
#[derive(Debug, Clone, PartialEq)]
pub struct Authed {
    pub username: String,
    pub guest: bool,
    pub session_id: Uuid,
    pub login_time: DateTime<Utc>,
}

impl Authed {
    fn named(username: &str) -> Self {
        Self {
            username: username.to_string(),
            guest: false,
            session_id: Uuid::new_v4(),
            login_time: Utc::now(),
        }
    }
}

/// Pluggable credential check for the login gate.
pub trait AuthProvider {
    fn authenticate(&self, username: &str, password: &str) -> Result<Authed, AuthError>;

    fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
        confirm: &str,
    ) -> Result<Authed, AuthError>;
}

/// Accepts any credentials. Performs form validation only; nothing is ever
/// checked against a backend.
#[derive(Debug, Default, Clone, Copy)]
pub struct OpenAuth;

impl AuthProvider for OpenAuth {
    fn authenticate(&self, username: &str, password: &str) -> Result<Authed, AuthError> {
        if username.trim().is_empty() {
            return Err(AuthError::MissingField("username"));
        }
        if password.is_empty() {
            return Err(AuthError::MissingField("password"));
        }
        Ok(Authed::named(username.trim()))
    }

    fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
        confirm: &str,
    ) -> Result<Authed, AuthError> {
        if username.trim().is_empty() {
            return Err(AuthError::MissingField("username"));
        }
        if email.trim().is_empty() {
            return Err(AuthError::MissingField("email"));
        }
        if password.is_empty() {
            return Err(AuthError::MissingField("password"));
        }
        if confirm.is_empty() {
            return Err(AuthError::MissingField("password confirmation"));
        }
        if password.len() < MIN_PASSWORD_LEN {
            return Err(AuthError::PasswordTooShort);
        }
        if password != confirm {
            return Err(AuthError::PasswordMismatch);
        }
        Ok(Authed::named(username.trim()))
    }
}

/// A throwaway guest identity in the classic `Guest_<n>` style.
pub fn guest() -> Authed {
    let n: u32 = rand::thread_rng().gen_range(0..10_000);
    let mut authed = Authed::named(&format!("Guest_{}", n));
    authed.guest = true;
    authed
}
