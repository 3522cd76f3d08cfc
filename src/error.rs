//! Error types for the Hubbly onboarding wizard.

use std::time::Duration;

use crate::wizard::step::StepId;

/// Generic alert text shown for failures that carry no provider message.
pub const UNEXPECTED_ERROR_MESSAGE: &str = "An unexpected error occurred. Please try again.";

/// Top-level error type.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Service error: {0}")]
    Service(#[from] ServiceError),

    #[error("Wizard error: {0}")]
    Wizard(#[from] WizardError),
}

impl Error {
    /// Text suitable for a blocking alert in the client.
    ///
    /// Validation and provider messages are surfaced verbatim; anything
    /// unstructured collapses to a generic message.
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(e) => e.message.clone(),
            Self::Service(e) => e.user_message(),
            Self::Wizard(e) => e.to_string(),
            Self::Config(_) | Self::Database(_) => UNEXPECTED_ERROR_MESSAGE.to_string(),
        }
    }
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Database-related errors.
#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    #[error("Connection pool error: {0}")]
    Pool(String),

    #[error("Query failed: {0}")]
    Query(String),

    #[error("Migration failed: {0}")]
    Migration(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// A required field is missing or malformed. Blocks the transition and
/// never mutates the draft.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    /// Wizard step the field belongs to; `None` for the sign-in forms.
    pub step: Option<StepId>,
    pub field: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(step: StepId, field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            step: Some(step),
            field: field.into(),
            message: message.into(),
        }
    }

    /// A malformed value outside the wizard (phone number, OTP code).
    pub fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            step: None,
            field: field.into(),
            message: message.into(),
        }
    }

    /// The common "please fill in X" case.
    pub fn required(step: StepId, field: &str, label: &str) -> Self {
        Self::new(step, field, format!("Please enter {label}."))
    }
}

/// Failures of the external collaborators (auth, profile store, media).
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("Authentication failed: {message}")]
    Auth { message: String },

    #[error("Profile save failed: {message}")]
    ProfileStore { message: String },

    #[error("Image picker failed: {message}")]
    Media { message: String },

    #[error("{operation} timed out after {after:?}")]
    Timeout { operation: String, after: Duration },

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl ServiceError {
    pub fn user_message(&self) -> String {
        match self {
            Self::Auth { message } | Self::ProfileStore { message } | Self::Media { message } => {
                message.clone()
            }
            Self::Timeout { operation, .. } => {
                format!("{operation} is taking too long. Please try again.")
            }
            Self::Unexpected(_) => UNEXPECTED_ERROR_MESSAGE.to_string(),
        }
    }
}

impl From<DatabaseError> for ServiceError {
    fn from(e: DatabaseError) -> Self {
        Self::Unexpected(e.to_string())
    }
}

/// Misuse of the wizard state machine.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WizardError {
    #[error("Input for {got} submitted while the wizard is at {expected}")]
    StepMismatch { expected: StepId, got: StepId },

    #[error("Already at the first step")]
    NoPreviousStep,

    #[error("Step {0} is terminal and accepts no input")]
    TerminalStep(StepId),
}

/// Result type alias for the crate.
pub type Result<T> = std::result::Result<T, Error>;
