//! Catalog entry operations: transactional replace, listing, install flags.
//!
//! Server and skill entries share one shape, one uniqueness constraint and
//! one replace contract, so every operation here is parameterized by
//! [`EntryKind`].

use super::HubStore;
use crate::error::Result;
use crate::models::{CatalogEntry, EntryKind, NewCatalogEntry};
use chrono::Utc;
use rusqlite::params;
use std::collections::HashSet;
use tracing::{debug, warn};

/// Counters from a clear-then-repopulate pass.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReplaceOutcome {
    /// Entries written.
    pub stored: usize,
    /// Entries that failed to write and were skipped.
    pub skipped: usize,
}

impl HubStore {
    /// Replace a registry's entries with a freshly fetched set.
    ///
    /// Runs as a single transaction per registry so readers never observe a
    /// mix of two sync generations: the previous rows are deleted, the new
    /// set is inserted, and the whole pass rolls back if the transaction
    /// cannot commit. Duplicate (name, version) pairs in the input collapse
    /// to the later entry. `installed` flags survive for (name, version)
    /// pairs present both before and after; synchronization never sets or
    /// clears the flag on its own.
    ///
    /// An individual row failure is counted and skipped without aborting
    /// the rest of the set.
    pub fn replace_entries(
        &self,
        kind: EntryKind,
        registry_id: &str,
        entries: &[NewCatalogEntry],
    ) -> Result<ReplaceOutcome> {
        let table = kind.table();
        let mut conn = self.lock_conn()?;
        let tx = conn.transaction()?;
        let now = Utc::now().to_rfc3339();

        let installed_before: HashSet<(String, String)> = {
            let mut stmt = tx.prepare(&format!(
                "SELECT name, version FROM {} WHERE registry_id = ?1 AND installed = 1",
                table
            ))?;
            let rows = stmt.query_map(params![registry_id], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
            })?;
            rows.filter_map(|r| r.ok()).collect()
        };

        tx.execute(
            &format!("DELETE FROM {} WHERE registry_id = ?1", table),
            params![registry_id],
        )?;

        let insert_sql = format!(
            "INSERT INTO {} (registry_id, name, title, description, version,
                             website_url, installed, data, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
             ON CONFLICT(registry_id, name, version) DO UPDATE SET
                 title = excluded.title,
                 description = excluded.description,
                 website_url = excluded.website_url,
                 data = excluded.data,
                 updated_at = excluded.updated_at",
            table
        );

        let mut outcome = ReplaceOutcome::default();
        for entry in entries {
            let installed =
                installed_before.contains(&(entry.name.clone(), entry.version.clone()));
            let result = tx.execute(
                &insert_sql,
                params![
                    registry_id,
                    entry.name,
                    entry.title,
                    entry.description,
                    entry.version,
                    entry.website_url,
                    installed,
                    entry.data,
                    now,
                    now
                ],
            );
            match result {
                Ok(_) => outcome.stored += 1,
                Err(e) => {
                    warn!(
                        "Skipping {} entry {}@{}: {}",
                        kind.label(),
                        entry.name,
                        entry.version,
                        e
                    );
                    outcome.skipped += 1;
                }
            }
        }

        tx.commit()?;

        debug!(
            "Replaced {} entries for registry {}: stored={}, skipped={}",
            kind.label(),
            registry_id,
            outcome.stored,
            outcome.skipped
        );
        Ok(outcome)
    }

    /// List entries, optionally scoped to one registry, ordered by name
    /// then version descending.
    pub fn list_entries(
        &self,
        kind: EntryKind,
        registry_id: Option<&str>,
    ) -> Result<Vec<CatalogEntry>> {
        let conn = self.lock_conn()?;
        let base = format!(
            "SELECT id, registry_id, name, title, description, version,
                    website_url, installed, data, created_at, updated_at
             FROM {}",
            kind.table()
        );

        let map_row = |row: &rusqlite::Row<'_>| -> rusqlite::Result<CatalogEntry> {
            Ok(CatalogEntry {
                id: row.get(0)?,
                registry_id: row.get(1)?,
                name: row.get(2)?,
                title: row.get(3)?,
                description: row.get(4)?,
                version: row.get(5)?,
                website_url: row.get(6)?,
                installed: row.get(7)?,
                data: row.get(8)?,
                created_at: row.get(9)?,
                updated_at: row.get(10)?,
            })
        };

        let mut entries = Vec::new();
        match registry_id {
            Some(registry_id) => {
                let mut stmt = conn.prepare(&format!(
                    "{} WHERE registry_id = ?1 ORDER BY name ASC, version DESC",
                    base
                ))?;
                let rows = stmt.query_map(params![registry_id], map_row)?;
                for row in rows {
                    entries.push(row?);
                }
            }
            None => {
                let mut stmt =
                    conn.prepare(&format!("{} ORDER BY name ASC, version DESC", base))?;
                let rows = stmt.query_map([], map_row)?;
                for row in rows {
                    entries.push(row?);
                }
            }
        }
        Ok(entries)
    }

    /// Flip the installed flag for one entry. This is the only mutation
    /// path for the flag; returns false if the entry doesn't exist.
    pub fn set_installed(
        &self,
        kind: EntryKind,
        registry_id: &str,
        name: &str,
        version: &str,
        installed: bool,
    ) -> Result<bool> {
        let conn = self.lock_conn()?;
        let now = Utc::now().to_rfc3339();
        let rows = conn.execute(
            &format!(
                "UPDATE {} SET installed = ?1, updated_at = ?2
                 WHERE registry_id = ?3 AND name = ?4 AND version = ?5",
                kind.table()
            ),
            params![installed, now, registry_id, name, version],
        )?;
        Ok(rows > 0)
    }
}
