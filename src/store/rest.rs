//! REST profile store: inserts rows through a PostgREST-style endpoint.

use async_trait::async_trait;
use chrono::Utc;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use crate::error::ServiceError;
use crate::store::traits::{ProfileStore, SaveMode, SavedProfile};
use crate::wizard::draft::ProfileDraft;

/// Posts drafts to `{base_url}/rest/v1/{table}`.
pub struct RestProfileStore {
    base_url: String,
    api_key: SecretString,
    client: reqwest::Client,
}

/// Error body returned by the endpoint on rejection.
#[derive(Debug, Deserialize)]
struct RestError {
    message: String,
}

impl RestProfileStore {
    pub fn new(base_url: impl Into<String>, api_key: SecretString) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
            client: reqwest::Client::new(),
        }
    }

    fn table_url(&self, mode: SaveMode) -> String {
        format!("{}/rest/v1/{}", self.base_url, mode.table())
    }
}

#[async_trait]
impl ProfileStore for RestProfileStore {
    async fn save_profile(
        &self,
        draft: &ProfileDraft,
        mode: SaveMode,
    ) -> Result<SavedProfile, ServiceError> {
        let key = self.api_key.expose_secret();
        let resp = self
            .client
            .post(self.table_url(mode))
            .header("apikey", key)
            .bearer_auth(key)
            .header("Prefer", "return=representation")
            .json(draft)
            .send()
            .await
            .map_err(|e| ServiceError::Unexpected(format!("profile insert request: {e}")))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            tracing::warn!(status = %status, mode = %mode, "Profile insert rejected");
            let message = serde_json::from_str::<RestError>(&body)
                .map(|e| e.message)
                .unwrap_or_else(|_| format!("Saving the profile failed ({status})."));
            return Err(ServiceError::ProfileStore { message });
        }

        let rows: Vec<serde_json::Value> = resp
            .json()
            .await
            .map_err(|e| ServiceError::Unexpected(format!("profile insert response: {e}")))?;
        let id = rows
            .first()
            .and_then(|row| row.get("id"))
            .map(|id| match id {
                serde_json::Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .ok_or_else(|| ServiceError::Unexpected("profile insert returned no id".into()))?;

        Ok(SavedProfile {
            id,
            mode,
            saved_at: Utc::now(),
        })
    }
}
