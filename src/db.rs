// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{Category, Kind, Ledger, Record};
use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use rusqlite::{Connection, OptionalExtension, params};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

static APP: Lazy<(&str, &str, &str)> =
    Lazy::new(|| ("com.alphavelocity", "Tallybook", "tallybook"));

/// Environment variable that overrides the database location.
pub const DB_ENV: &str = "TALLYBOOK_DB";

pub fn db_path() -> Result<PathBuf> {
    if let Some(p) = std::env::var_os(DB_ENV).filter(|p| !p.is_empty()) {
        return Ok(PathBuf::from(p));
    }
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data dir")?;
    Ok(data_dir.join("tallybook.sqlite"))
}

pub fn open_or_init() -> Result<Store> {
    Store::open(&db_path()?)
}

pub fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
    CREATE TABLE IF NOT EXISTS settings(
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL
    );

    -- one row per stored record; seq keeps insertion order within a collection
    CREATE TABLE IF NOT EXISTS records(
        seq INTEGER PRIMARY KEY AUTOINCREMENT,
        collection TEXT NOT NULL CHECK(collection IN ('loans','fixed','car','general')),
        id INTEGER NOT NULL,
        body TEXT NOT NULL,
        created_at TEXT NOT NULL DEFAULT (datetime('now'))
    );
    CREATE INDEX IF NOT EXISTS idx_records_collection_id ON records(collection, id);
    "#,
    )?;
    Ok(())
}

/// Owns the record collections and every mutation of them.
pub struct Store {
    conn: Connection,
}

impl Store {
    pub fn open(path: &Path) -> Result<Self> {
        let conn =
            Connection::open(path).with_context(|| format!("Open DB at {}", path.display()))?;
        Self::from_connection(conn)
    }

    pub fn open_in_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    pub fn from_connection(conn: Connection) -> Result<Self> {
        init_schema(&conn)?;
        Ok(Self { conn })
    }

    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Records of one collection in insertion order.
    pub fn records<K: Kind>(&self) -> Result<Vec<Record<K>>> {
        let collection = K::CATEGORY.key();
        let mut stmt = self
            .conn
            .prepare("SELECT id, body FROM records WHERE collection=?1 ORDER BY seq")?;
        let rows = stmt.query_map(params![collection], |r| {
            Ok((r.get::<_, i64>(0)?, r.get::<_, String>(1)?))
        })?;
        let mut out = Vec::new();
        for row in rows {
            let (id, body) = row?;
            let rec: Record<K> = serde_json::from_str(&body)
                .with_context(|| format!("Corrupt {} record {}", collection, id))?;
            out.push(rec);
        }
        Ok(out)
    }

    pub fn load(&self) -> Result<Ledger> {
        Ok(Ledger {
            loans: self.records()?,
            fixed: self.records()?,
            car: self.records()?,
            general: self.records()?,
        })
    }

    /// Appends records to their collection in one transaction.
    pub fn add_records<K: Kind>(&mut self, records: &[Record<K>]) -> Result<()> {
        let tx = self.conn.transaction()?;
        insert_all(&tx, records)?;
        tx.commit()?;
        debug!(
            collection = K::CATEGORY.key(),
            count = records.len(),
            "records added"
        );
        Ok(())
    }

    pub fn add_record<K: Kind>(&mut self, record: &Record<K>) -> Result<()> {
        self.add_records(std::slice::from_ref(record))
    }

    /// Removes every record of `category` whose id equals `id`; returns how
    /// many rows went away.
    pub fn remove_record(&self, category: Category, id: i64) -> Result<usize> {
        let n = self.conn.execute(
            "DELETE FROM records WHERE collection=?1 AND id=?2",
            params![category.key(), id],
        )?;
        debug!(collection = category.key(), id, removed = n, "remove record");
        Ok(n)
    }

    /// Swaps the whole data set for `ledger`, keeping each collection's order.
    pub fn replace_all(&mut self, ledger: &Ledger) -> Result<()> {
        let tx = self.conn.transaction()?;
        tx.execute("DELETE FROM records", [])?;
        insert_all(&tx, &ledger.loans)?;
        insert_all(&tx, &ledger.fixed)?;
        insert_all(&tx, &ledger.car)?;
        insert_all(&tx, &ledger.general)?;
        tx.commit()?;
        info!(records = ledger.len(), "replaced all records");
        Ok(())
    }

    /// Reserves `n` consecutive fresh ids and returns the first one.
    ///
    /// Ids come from a persisted counter that never goes backwards and always
    /// starts above the largest id already stored, so imported timestamp ids
    /// cannot collide with new ones.
    pub fn reserve_ids(&self, n: i64) -> Result<i64> {
        let counter: Option<String> = self
            .conn
            .query_row("SELECT value FROM settings WHERE key='next_id'", [], |r| {
                r.get(0)
            })
            .optional()?;
        let counter = match counter {
            Some(s) => s
                .parse::<i64>()
                .with_context(|| format!("Invalid next_id setting '{}'", s))?,
            None => 1,
        };
        let max_id: Option<i64> = self
            .conn
            .query_row("SELECT MAX(id) FROM records", [], |r| r.get(0))?;
        let first = counter.max(max_id.map_or(1, |m| m + 1));
        self.conn.execute(
            "INSERT INTO settings(key, value) VALUES('next_id', ?1)
             ON CONFLICT(key) DO UPDATE SET value=excluded.value",
            params![(first + n.max(0)).to_string()],
        )?;
        Ok(first)
    }
}

fn insert_all<K: Kind>(conn: &Connection, records: &[Record<K>]) -> Result<()> {
    let mut stmt =
        conn.prepare("INSERT INTO records(collection, id, body) VALUES (?1, ?2, ?3)")?;
    for r in records {
        let body = serde_json::to_string(r)?;
        stmt.execute(params![K::CATEGORY.key(), r.id, body])?;
    }
    Ok(())
}
