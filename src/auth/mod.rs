//! Authentication boundary: phone OTP and session lookup.
//!
//! The provider itself is opaque. The wizard only asks whether a session
//! exists, which decides the save mode.

pub mod otp;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};

use crate::error::ServiceError;

pub use otp::{OtpFlow, normalize_phone};

/// A signed-in user as reported by the provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: String,
    pub phone: String,
}

/// An authenticated session.
#[derive(Debug, Clone)]
pub struct Session {
    pub user: AuthUser,
    pub access_token: SecretString,
    pub expires_at: Option<DateTime<Utc>>,
}

impl Session {
    /// Sessions without an expiry never expire.
    pub fn is_active_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_none_or(|exp| exp > now)
    }
}

/// Phone OTP provider.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Send a one-time code to an E.164 phone number.
    async fn send_otp(&self, phone: &str) -> Result<(), ServiceError>;

    /// Exchange a code for a signed-in user.
    async fn verify_otp(&self, phone: &str, code: &str) -> Result<AuthUser, ServiceError>;

    /// The current session, if any.
    async fn get_session(&self) -> Result<Option<Session>, ServiceError>;
}

/// Used when no provider is configured: nobody is ever signed in, so every
/// profile is saved in demo mode.
#[derive(Debug, Default, Clone, Copy)]
pub struct AnonymousAuth;

const NOT_CONFIGURED: &str = "Phone sign-in is not available right now.";

#[async_trait]
impl AuthService for AnonymousAuth {
    async fn send_otp(&self, _phone: &str) -> Result<(), ServiceError> {
        Err(ServiceError::Auth {
            message: NOT_CONFIGURED.to_string(),
        })
    }

    async fn verify_otp(&self, _phone: &str, _code: &str) -> Result<AuthUser, ServiceError> {
        Err(ServiceError::Auth {
            message: NOT_CONFIGURED.to_string(),
        })
    }

    async fn get_session(&self) -> Result<Option<Session>, ServiceError> {
        Ok(None)
    }
}
