//! Phone OTP sign-in flow on top of an [`AuthService`].

use std::sync::{Arc, LazyLock};
use std::time::Duration;

use regex::Regex;
use tracing::{info, warn};

use crate::error::{Error, ValidationError};
use crate::service::with_timeout;

use super::{AuthService, AuthUser};

static E164: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\+[1-9]\d{7,14}$").unwrap());
static OTP_CODE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d{6}$").unwrap());

/// Normalize user-typed phone input to E.164.
///
/// Separators are dropped, a `00` international prefix becomes `+`, and a
/// single leading `0` (national format) is replaced by `default_country_code`.
pub fn normalize_phone(raw: &str, default_country_code: &str) -> Result<String, ValidationError> {
    let compact: String = raw
        .chars()
        .filter(|c| !c.is_whitespace() && !matches!(c, '-' | '(' | ')' | '.'))
        .collect();

    let normalized = if let Some(rest) = compact.strip_prefix("00") {
        format!("+{rest}")
    } else if compact.starts_with('+') {
        compact
    } else if let Some(rest) = compact.strip_prefix('0') {
        format!("{default_country_code}{rest}")
    } else {
        format!("+{compact}")
    };

    if E164.is_match(&normalized) {
        Ok(normalized)
    } else {
        Err(ValidationError::invalid(
            "phone",
            "Please enter a valid phone number.",
        ))
    }
}

/// Sends and verifies one-time codes, with input checks and a deadline on
/// every provider call.
pub struct OtpFlow {
    auth: Arc<dyn AuthService>,
    default_country_code: String,
    timeout: Duration,
}

impl OtpFlow {
    pub fn new(auth: Arc<dyn AuthService>, default_country_code: impl Into<String>, timeout: Duration) -> Self {
        Self {
            auth,
            default_country_code: default_country_code.into(),
            timeout,
        }
    }

    /// Send a code. Returns the normalized number the code went to.
    pub async fn send_code(&self, raw_phone: &str) -> Result<String, Error> {
        let phone = normalize_phone(raw_phone, &self.default_country_code)?;
        with_timeout("Sending the code", self.timeout, self.auth.send_otp(&phone))
            .await
            .inspect_err(|e| warn!(error = %e, "OTP send failed"))?;
        info!("OTP sent");
        Ok(phone)
    }

    /// Verify a code previously sent to `raw_phone`.
    pub async fn verify_code(&self, raw_phone: &str, code: &str) -> Result<AuthUser, Error> {
        let phone = normalize_phone(raw_phone, &self.default_country_code)?;
        let code = code.trim();
        if !OTP_CODE.is_match(code) {
            return Err(ValidationError::invalid("code", "Please enter the 6-digit code.").into());
        }
        let user = with_timeout("Verifying the code", self.timeout, self.auth.verify_otp(&phone, code))
            .await
            .inspect_err(|e| warn!(error = %e, "OTP verification failed"))?;
        info!(user_id = %user.id, "OTP verified");
        Ok(user)
    }
}
