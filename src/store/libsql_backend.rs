//! libSQL profile store: local file or in-memory database.
//!
//! Admin saves land in `profiles`, demo saves in `demo_profiles`. The whole
//! draft is kept as a JSON payload; name, gender and relation are copied
//! into their own columns for browsing.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use libsql::{Connection, Database as LibSqlDatabase, params};
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{DatabaseError, ServiceError};
use crate::store::migrations;
use crate::store::traits::{ProfileStore, SaveMode, SavedProfile};
use crate::wizard::draft::ProfileDraft;

/// libSQL-backed [`ProfileStore`].
///
/// Holds a single connection reused for all operations.
pub struct LibSqlProfileStore {
    #[allow(dead_code)]
    db: Arc<LibSqlDatabase>,
    conn: Connection,
}

impl LibSqlProfileStore {
    /// Open (or create) a local database file and run migrations.
    pub async fn new_local(path: &Path) -> Result<Self, DatabaseError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                DatabaseError::Pool(format!("Failed to create database directory: {e}"))
            })?;
        }

        let db = libsql::Builder::new_local(path)
            .build()
            .await
            .map_err(|e| DatabaseError::Pool(format!("Failed to open libSQL database: {e}")))?;

        let store = Self::from_database(db).await?;
        info!(path = %path.display(), "Profile database opened");
        Ok(store)
    }

    /// Create an in-memory database.
    pub async fn new_memory() -> Result<Self, DatabaseError> {
        let db = libsql::Builder::new_local(":memory:")
            .build()
            .await
            .map_err(|e| {
                DatabaseError::Pool(format!("Failed to create in-memory database: {e}"))
            })?;
        Self::from_database(db).await
    }

    async fn from_database(db: LibSqlDatabase) -> Result<Self, DatabaseError> {
        let conn = db
            .connect()
            .map_err(|e| DatabaseError::Pool(format!("Failed to create connection: {e}")))?;
        migrations::run_migrations(&conn).await?;
        Ok(Self {
            db: Arc::new(db),
            conn,
        })
    }

    async fn insert(&self, draft: &ProfileDraft, mode: SaveMode) -> Result<SavedProfile, DatabaseError> {
        let payload = serde_json::to_string(draft)
            .map_err(|e| DatabaseError::Serialization(format!("profile payload: {e}")))?;
        let id = Uuid::new_v4().to_string();
        let saved_at = Utc::now();

        self.conn
            .execute(
                &format!(
                    "INSERT INTO {} (id, relation, name, gender, payload, created_at) \
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                    mode.table()
                ),
                params![
                    id.clone(),
                    opt_text_owned(draft.relation.map(|r| format!("{r:?}"))),
                    opt_text_owned(draft.name.clone()),
                    opt_text_owned(draft.gender.map(|g| g.to_string())),
                    payload,
                    saved_at.to_rfc3339()
                ],
            )
            .await
            .map_err(|e| DatabaseError::Query(format!("insert profile: {e}")))?;

        debug!(id = %id, table = mode.table(), "Profile row inserted");
        Ok(SavedProfile { id, mode, saved_at })
    }

    /// Load a saved draft back by id.
    pub async fn get_profile(
        &self,
        id: &str,
        mode: SaveMode,
    ) -> Result<Option<ProfileDraft>, DatabaseError> {
        let mut rows = self
            .conn
            .query(
                &format!("SELECT payload FROM {} WHERE id = ?1", mode.table()),
                params![id],
            )
            .await
            .map_err(|e| DatabaseError::Query(format!("get_profile: {e}")))?;

        match rows.next().await {
            Ok(Some(row)) => {
                let payload: String = row
                    .get(0)
                    .map_err(|e| DatabaseError::Query(format!("get_profile row parse: {e}")))?;
                let draft = serde_json::from_str(&payload)
                    .map_err(|e| DatabaseError::Serialization(format!("profile payload: {e}")))?;
                Ok(Some(draft))
            }
            Ok(None) => Ok(None),
            Err(e) => Err(DatabaseError::Query(format!("get_profile: {e}"))),
        }
    }

    /// Number of profiles saved in `mode`.
    pub async fn count_profiles(&self, mode: SaveMode) -> Result<i64, DatabaseError> {
        let mut rows = self
            .conn
            .query(&format!("SELECT COUNT(*) FROM {}", mode.table()), ())
            .await
            .map_err(|e| DatabaseError::Query(format!("count_profiles: {e}")))?;

        match rows.next().await {
            Ok(Some(row)) => row
                .get(0)
                .map_err(|e| DatabaseError::Query(format!("count_profiles row parse: {e}"))),
            Ok(None) => Ok(0),
            Err(e) => Err(DatabaseError::Query(format!("count_profiles: {e}"))),
        }
    }
}

fn opt_text_owned(s: Option<String>) -> libsql::Value {
    match s {
        Some(s) => libsql::Value::Text(s),
        None => libsql::Value::Null,
    }
}

#[async_trait]
impl ProfileStore for LibSqlProfileStore {
    async fn save_profile(
        &self,
        draft: &ProfileDraft,
        mode: SaveMode,
    ) -> Result<SavedProfile, ServiceError> {
        Ok(self.insert(draft, mode).await?)
    }
}
