//! Installation records: which servers/skills are installed locally.
//!
//! The install workflow itself lives outside this crate; the store only
//! keeps the durable record it writes.

use super::HubStore;
use crate::error::Result;
use crate::models::Installation;
use chrono::Utc;
use rusqlite::{params, OptionalExtension};

impl HubStore {
    /// Record an installation. Upserts by (resource_type, resource_name):
    /// re-installing updates the version and configuration in place.
    pub fn record_installation(
        &self,
        resource_type: &str,
        resource_name: &str,
        version: &str,
        config: &str,
    ) -> Result<Installation> {
        let conn = self.lock_conn()?;
        let now = Utc::now().to_rfc3339();

        conn.execute(
            "INSERT INTO installations (resource_type, resource_name, version, config,
                                        created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?5)
             ON CONFLICT(resource_type, resource_name) DO UPDATE SET
                 version = excluded.version,
                 config = excluded.config,
                 updated_at = excluded.updated_at",
            params![resource_type, resource_name, version, config, now],
        )?;

        let installation = conn.query_row(
            "SELECT id, resource_type, resource_name, version, config, created_at, updated_at
             FROM installations WHERE resource_type = ?1 AND resource_name = ?2",
            params![resource_type, resource_name],
            row_to_installation,
        )?;
        Ok(installation)
    }

    /// Remove an installation record. Returns false if none existed.
    pub fn remove_installation(&self, resource_type: &str, resource_name: &str) -> Result<bool> {
        let conn = self.lock_conn()?;
        let rows = conn.execute(
            "DELETE FROM installations WHERE resource_type = ?1 AND resource_name = ?2",
            params![resource_type, resource_name],
        )?;
        Ok(rows > 0)
    }

    /// Look up one installation record.
    pub fn get_installation(
        &self,
        resource_type: &str,
        resource_name: &str,
    ) -> Result<Option<Installation>> {
        let conn = self.lock_conn()?;
        let result = conn
            .query_row(
                "SELECT id, resource_type, resource_name, version, config, created_at, updated_at
                 FROM installations WHERE resource_type = ?1 AND resource_name = ?2",
                params![resource_type, resource_name],
                row_to_installation,
            )
            .optional()?;
        Ok(result)
    }

    /// List all installation records, most recently created first.
    pub fn list_installations(&self) -> Result<Vec<Installation>> {
        let conn = self.lock_conn()?;
        let mut stmt = conn.prepare(
            "SELECT id, resource_type, resource_name, version, config, created_at, updated_at
             FROM installations ORDER BY created_at DESC, id DESC",
        )?;

        let rows = stmt.query_map([], row_to_installation)?;

        let mut installations = Vec::new();
        for row in rows {
            installations.push(row?);
        }
        Ok(installations)
    }
}

fn row_to_installation(row: &rusqlite::Row<'_>) -> rusqlite::Result<Installation> {
    Ok(Installation {
        id: row.get(0)?,
        resource_type: row.get(1)?,
        resource_name: row.get(2)?,
        version: row.get(3)?,
        config: row.get(4)?,
        created_at: row.get(5)?,
        updated_at: row.get(6)?,
    })
}
