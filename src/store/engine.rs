//! SQLite-backed event store
//!
//! One table, `events`, holds every recorded event. SQLite's B-tree does the
//! heavy lifting for the list/search/count paths; the `(label, timestamp)`
//! index covers the chart and stats queries.
//!
//! The connection lives behind a `std::sync::Mutex` (SQLite connections are
//! not `Sync`); every method locks for the duration of one statement and
//! never holds the lock across an await point.

use super::error::{StoreError, StoreResult};
use super::types::{Event, EventFilter};
use rusqlite::{params, Connection, OpenFlags};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};
use uuid::Uuid;

/// Store-wide counts, reported by the health endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct StoreStats {
    /// Total number of stored events
    pub total_events: u64,
    /// Number of distinct labels
    pub total_labels: u64,
}

/// Persistent store for events
pub struct EventStore {
    conn: Mutex<Connection>,
    path: PathBuf,
}

impl EventStore {
    /// Open or create the store at `data_dir/events.db`
    pub fn open(data_dir: &Path) -> StoreResult<Self> {
        let path = data_dir.join("events.db");

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open_with_flags(
            &path,
            OpenFlags::SQLITE_OPEN_READ_WRITE
                | OpenFlags::SQLITE_OPEN_CREATE
                | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;

        // Configure for performance
        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            PRAGMA cache_size = 10000;
            PRAGMA temp_store = MEMORY;
            ",
        )?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS events (
                id TEXT PRIMARY KEY,
                timestamp INTEGER NOT NULL,
                label TEXT NOT NULL
            )",
            [],
        )?;

        // Covers the chart fetch and the stats counts
        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_events_label_time ON events(label, timestamp)",
            [],
        )?;

        // Covers unlabeled time-range scans
        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_events_time ON events(timestamp)",
            [],
        )?;

        Ok(Self {
            conn: Mutex::new(conn),
            path,
        })
    }

    fn conn(&self) -> StoreResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| StoreError::Lock(format!("Failed to acquire store lock: {}", e)))
    }

    /// Persist a new event
    pub fn insert(&self, event: &Event) -> StoreResult<()> {
        let conn = self.conn()?;
        let mut stmt =
            conn.prepare_cached("INSERT INTO events (id, timestamp, label) VALUES (?, ?, ?)")?;
        stmt.execute(params![event.id.to_string(), event.timestamp, event.label])?;
        Ok(())
    }

    /// Most recent events, newest first, at most `limit` rows
    pub fn list(&self, limit: usize) -> StoreResult<Vec<Event>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare_cached(
            "SELECT id, timestamp, label FROM events
             ORDER BY timestamp DESC, id
             LIMIT ?",
        )?;
        let rows = stmt.query_map(params![limit as i64], row_to_event)?;
        collect_events(rows)
    }

    /// Remove one event by id
    ///
    /// Deleting an id that does not exist is `NotFound`, not a silent no-op.
    pub fn delete(&self, id: &Uuid) -> StoreResult<()> {
        let conn = self.conn()?;
        let affected = conn.execute("DELETE FROM events WHERE id = ?", params![id.to_string()])?;
        if affected == 0 {
            return Err(StoreError::NotFound(id.to_string()));
        }
        Ok(())
    }

    /// Events matching a filter, newest first
    pub fn search(&self, filter: &EventFilter) -> StoreResult<Vec<Event>> {
        let mut sql = String::from("SELECT id, timestamp, label FROM events WHERE 1=1");
        let mut args: Vec<rusqlite::types::Value> = Vec::new();

        if let Some(label) = &filter.label {
            sql.push_str(" AND label = ?");
            args.push(label.clone().into());
        }
        if let Some(start) = filter.start {
            sql.push_str(" AND timestamp >= ?");
            args.push(start.into());
        }
        if let Some(end) = filter.end {
            sql.push_str(" AND timestamp <= ?");
            args.push(end.into());
        }
        sql.push_str(" ORDER BY timestamp DESC, id");

        let conn = self.conn()?;
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map(rusqlite::params_from_iter(args), row_to_event)?;
        collect_events(rows)
    }

    /// All events for a label, oldest first
    ///
    /// This is the chart input; the aggregation pipeline expects to see
    /// every event for the label, unlimited.
    pub fn events_for_label(&self, label: &str) -> StoreResult<Vec<Event>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare_cached(
            "SELECT id, timestamp, label FROM events
             WHERE label = ?
             ORDER BY timestamp ASC, id",
        )?;
        let rows = stmt.query_map(params![label], row_to_event)?;
        collect_events(rows)
    }

    /// Count of events for a label in `[start, end)`
    pub fn count_between(&self, label: &str, start: i64, end: i64) -> StoreResult<u64> {
        let conn = self.conn()?;
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM events
             WHERE label = ? AND timestamp >= ? AND timestamp < ?",
            params![label, start, end],
            |row| row.get(0),
        )?;
        Ok(count as u64)
    }

    /// Total count of events for a label
    pub fn count_label(&self, label: &str) -> StoreResult<u64> {
        let conn = self.conn()?;
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM events WHERE label = ?",
            params![label],
            |row| row.get(0),
        )?;
        Ok(count as u64)
    }

    /// Store-wide counts
    pub fn stats(&self) -> StoreResult<StoreStats> {
        let conn = self.conn()?;
        let (total_events, total_labels): (i64, i64) = conn.query_row(
            "SELECT COUNT(*), COUNT(DISTINCT label) FROM events",
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )?;
        Ok(StoreStats {
            total_events: total_events as u64,
            total_labels: total_labels as u64,
        })
    }

    /// Get the database file path
    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn row_to_event(row: &rusqlite::Row<'_>) -> rusqlite::Result<Event> {
    let id_text: String = row.get(0)?;
    let id = Uuid::parse_str(&id_text).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
    })?;
    Ok(Event {
        id,
        timestamp: row.get(1)?,
        label: row.get(2)?,
    })
}

fn collect_events<I>(rows: I) -> StoreResult<Vec<Event>>
where
    I: Iterator<Item = rusqlite::Result<Event>>,
{
    rows.collect::<rusqlite::Result<Vec<_>>>()
        .map_err(StoreError::from)
}
