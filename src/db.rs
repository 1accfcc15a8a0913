use chrono::{SecondsFormat, Utc};
use rusqlite::{Connection, OptionalExtension};
use serde::Serialize;
use std::path::Path;
use uuid::Uuid;

pub const DB_FILE_NAME: &str = "cgpa.sqlite3";

#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    #[error("name must be a non-empty string")]
    MissingName,
    #[error("cgpa must be a finite number, got {0}")]
    InvalidCgpa(f64),
    #[error("stale write for {name}: clientSeq {got} is not after {latest}")]
    Stale { name: String, latest: i64, got: i64 },
    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CgpaRecord {
    pub id: String,
    pub seq: i64,
    pub name: String,
    pub cgpa: f64,
    pub client_seq: Option<i64>,
    pub created_at: String,
    pub updated_at: String,
}

pub fn open_db(workspace: &Path) -> anyhow::Result<Connection> {
    std::fs::create_dir_all(workspace)?;
    let db_path = workspace.join(DB_FILE_NAME);
    let conn = Connection::open(db_path)?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS cgpa_records(
            id TEXT PRIMARY KEY,
            seq INTEGER NOT NULL UNIQUE,
            name TEXT NOT NULL,
            cgpa REAL NOT NULL,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )",
        [],
    )?;

    // Stores written before ordered writes existed have no client_seq column.
    ensure_records_client_seq(&conn)?;
    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_cgpa_records_name ON cgpa_records(name, client_seq)",
        [],
    )?;

    Ok(conn)
}

fn ensure_records_client_seq(conn: &Connection) -> anyhow::Result<()> {
    if table_has_column(conn, "cgpa_records", "client_seq")? {
        return Ok(());
    }
    conn.execute("ALTER TABLE cgpa_records ADD COLUMN client_seq INTEGER", [])?;
    Ok(())
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> anyhow::Result<bool> {
    let sql = format!("PRAGMA table_info({})", table);
    let mut stmt = conn.prepare(&sql)?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let name: String = row.get(1)?;
        if name == column {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Appends one record. Records are never updated or deleted.
pub fn insert_record(
    conn: &Connection,
    name: &str,
    cgpa: f64,
    client_seq: Option<i64>,
) -> Result<CgpaRecord, RecordError> {
    if name.trim().is_empty() {
        return Err(RecordError::MissingName);
    }
    if !cgpa.is_finite() {
        return Err(RecordError::InvalidCgpa(cgpa));
    }

    let tx = conn.unchecked_transaction()?;

    if let Some(got) = client_seq {
        let latest: Option<i64> = tx
            .query_row(
                "SELECT MAX(client_seq) FROM cgpa_records WHERE name = ?",
                [name],
                |r| r.get(0),
            )
            .optional()?
            .flatten();
        if let Some(latest) = latest.filter(|latest| *latest >= got) {
            return Err(RecordError::Stale {
                name: name.to_string(),
                latest,
                got,
            });
        }
    }

    let seq: i64 = tx.query_row(
        "SELECT COALESCE(MAX(seq), 0) + 1 FROM cgpa_records",
        [],
        |r| r.get(0),
    )?;
    let now = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
    let record = CgpaRecord {
        id: Uuid::new_v4().to_string(),
        seq,
        name: name.to_string(),
        cgpa,
        client_seq,
        created_at: now.clone(),
        updated_at: now,
    };
    tx.execute(
        "INSERT INTO cgpa_records(id, seq, name, cgpa, client_seq, created_at, updated_at)
         VALUES(?, ?, ?, ?, ?, ?, ?)",
        (
            &record.id,
            record.seq,
            &record.name,
            record.cgpa,
            record.client_seq,
            &record.created_at,
            &record.updated_at,
        ),
    )?;
    tx.commit()?;

    Ok(record)
}
