//! `ProfileStore` trait: where a finished draft goes.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ServiceError;
use crate::wizard::draft::ProfileDraft;

/// Which table set a profile is written to.
///
/// Chosen outside the wizard: `Admin` when an authenticated session exists,
/// `Demo` otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SaveMode {
    Admin,
    Demo,
}

impl SaveMode {
    pub fn for_session(has_session: bool) -> Self {
        if has_session { Self::Admin } else { Self::Demo }
    }

    /// Backing table for this mode.
    pub fn table(&self) -> &'static str {
        match self {
            Self::Admin => "profiles",
            Self::Demo => "demo_profiles",
        }
    }
}

impl std::fmt::Display for SaveMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Admin => write!(f, "admin"),
            Self::Demo => write!(f, "demo"),
        }
    }
}

/// Identity assigned by the store on a successful save.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedProfile {
    pub id: String,
    pub mode: SaveMode,
    pub saved_at: DateTime<Utc>,
}

/// Persists the assembled profile.
///
/// There is no dedup key: saving the same draft twice creates two records.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn save_profile(
        &self,
        draft: &ProfileDraft,
        mode: SaveMode,
    ) -> Result<SavedProfile, ServiceError>;
}
