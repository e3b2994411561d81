//! SQLite-backed local mirror of registered registries and their catalogs.
//!
//! The store owns the schema and every uniqueness/cascade constraint; the
//! registration and sync components are its only writers. A handle is
//! constructed once at startup and passed by reference, so there is no
//! process-global state to initialize out of order.

mod entries;
mod installations;

pub use entries::ReplaceOutcome;

use crate::config::StoreConfig;
use crate::error::{HubError, Result};
use crate::models::{NewRegistry, Registry, RegistryKind};
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::sync::{Arc, Mutex};
use tracing::debug;

/// Durable keyed storage for registries, catalog entries, and
/// installation records.
///
/// Uses WAL mode for safe concurrent reads across processes and
/// `Arc<Mutex<Connection>>` for thread safety within a process. Cloning is
/// cheap and shares the underlying connection.
#[derive(Clone)]
pub struct HubStore {
    conn: Arc<Mutex<Connection>>,
}

impl HubStore {
    /// Open the store at the default per-user location.
    ///
    /// Creates the database and parent directories if they don't exist.
    pub fn open() -> Result<Self> {
        let db_path = crate::platform::store_db_path()?;
        Self::open_at(&db_path)
    }

    /// Open the store at a specific path.
    pub fn open_at(db_path: &Path) -> Result<Self> {
        if let Some(parent) = db_path.parent() {
            if !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|e| HubError::Io {
                    message: format!("Failed to create store directory: {}", parent.display()),
                    path: Some(parent.to_path_buf()),
                    source: Some(e),
                })?;
            }
        }

        let conn = Connection::open(db_path)?;
        Self::configure_connection(&conn)?;
        Self::ensure_schema(&conn)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    fn configure_connection(conn: &Connection) -> Result<()> {
        conn.execute_batch(&format!(
            "PRAGMA journal_mode=WAL;\n\
             PRAGMA busy_timeout={};\n\
             PRAGMA synchronous=NORMAL;\n\
             PRAGMA foreign_keys=ON;",
            StoreConfig::BUSY_TIMEOUT_MS,
        ))?;
        Ok(())
    }

    fn ensure_schema(conn: &Connection) -> Result<()> {
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS registries (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL UNIQUE,
                url TEXT NOT NULL,
                kind TEXT NOT NULL CHECK (kind IN ('public', 'private')),
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS server_entries (
                id INTEGER PRIMARY KEY,
                registry_id TEXT NOT NULL REFERENCES registries(id) ON DELETE CASCADE,
                name TEXT NOT NULL,
                title TEXT,
                description TEXT NOT NULL DEFAULT '',
                version TEXT NOT NULL,
                website_url TEXT,
                installed INTEGER NOT NULL DEFAULT 0,
                data TEXT NOT NULL,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL,
                UNIQUE (registry_id, name, version)
            );

            CREATE TABLE IF NOT EXISTS skill_entries (
                id INTEGER PRIMARY KEY,
                registry_id TEXT NOT NULL REFERENCES registries(id) ON DELETE CASCADE,
                name TEXT NOT NULL,
                title TEXT,
                description TEXT NOT NULL DEFAULT '',
                version TEXT NOT NULL,
                website_url TEXT,
                installed INTEGER NOT NULL DEFAULT 0,
                data TEXT NOT NULL,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL,
                UNIQUE (registry_id, name, version)
            );

            CREATE TABLE IF NOT EXISTS installations (
                id INTEGER PRIMARY KEY,
                resource_type TEXT NOT NULL,
                resource_name TEXT NOT NULL,
                version TEXT NOT NULL,
                config TEXT NOT NULL DEFAULT '{}',
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL,
                UNIQUE (resource_type, resource_name)
            );

            CREATE INDEX IF NOT EXISTS idx_server_entries_registry
                ON server_entries(registry_id);
            CREATE INDEX IF NOT EXISTS idx_skill_entries_registry
                ON skill_entries(registry_id);",
        )?;
        Ok(())
    }

    pub(crate) fn lock_conn(&self) -> Result<std::sync::MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| HubError::Database {
            message: "Failed to acquire store connection lock".to_string(),
            source: None,
        })
    }

    // ========================================
    // Registry CRUD
    // ========================================

    /// Register a new registry. A duplicate name surfaces as
    /// [`HubError::RegistryExists`] and performs no write.
    pub fn add_registry(&self, new: &NewRegistry) -> Result<Registry> {
        let conn = self.lock_conn()?;
        let id = uuid::Uuid::new_v4().to_string();
        let now = Utc::now().to_rfc3339();

        conn.execute(
            "INSERT INTO registries (id, name, url, kind, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?5)",
            params![id, new.name, new.url, new.kind.as_str(), now],
        )
        .map_err(|e| {
            if is_unique_violation(&e) {
                HubError::RegistryExists {
                    name: new.name.clone(),
                }
            } else {
                HubError::Database {
                    message: format!("Failed to register '{}': {}", new.name, e),
                    source: Some(e),
                }
            }
        })?;

        debug!("Registered registry '{}' ({})", new.name, new.url);

        Ok(Registry {
            id,
            name: new.name.clone(),
            url: new.url.clone(),
            kind: new.kind,
            created_at: now.clone(),
            updated_at: now,
        })
    }

    /// List all registered registries, most recently created first.
    pub fn list_registries(&self) -> Result<Vec<Registry>> {
        let conn = self.lock_conn()?;
        let mut stmt = conn.prepare(
            "SELECT id, name, url, kind, created_at, updated_at
             FROM registries ORDER BY created_at DESC, name ASC",
        )?;

        let rows = stmt.query_map([], row_to_registry)?;

        let mut registries = Vec::new();
        for row in rows {
            registries.push(row?);
        }
        Ok(registries)
    }

    /// Look up a registry by name.
    pub fn get_registry(&self, name: &str) -> Result<Option<Registry>> {
        let conn = self.lock_conn()?;
        let result = conn
            .query_row(
                "SELECT id, name, url, kind, created_at, updated_at
                 FROM registries WHERE name = ?1",
                params![name],
                row_to_registry,
            )
            .optional()?;
        Ok(result)
    }

    /// Delete a registry. Its server and skill entries go with it.
    pub fn delete_registry(&self, name: &str) -> Result<bool> {
        let conn = self.lock_conn()?;
        let rows = conn.execute("DELETE FROM registries WHERE name = ?1", params![name])?;

        if rows > 0 {
            debug!("Deleted registry '{}'", name);
        }
        Ok(rows > 0)
    }
}

fn row_to_registry(row: &rusqlite::Row<'_>) -> rusqlite::Result<Registry> {
    let kind_str: String = row.get(3)?;
    let kind = RegistryKind::parse(&kind_str).unwrap_or(RegistryKind::Public);
    Ok(Registry {
        id: row.get(0)?,
        name: row.get(1)?,
        url: row.get(2)?,
        kind,
        created_at: row.get(4)?,
        updated_at: row.get(5)?,
    })
}

fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _)
            if e.code == rusqlite::ErrorCode::ConstraintViolation
    )
}
