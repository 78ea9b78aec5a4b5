//! Audit log — SQLite-based operation history.
//!
//! Stores a record of every vault operation (add, encrypt, import, etc.)
//! in a local SQLite database at `<data_dir>/audit.db`.
//!
//! If the database can't be opened or written to, operations continue
//! without logging.  Without the `audit-log` feature every call is a no-op.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use crate::cli::Cli;

/// File name of the audit database inside the data directory.
pub const AUDIT_DB: &str = "audit.db";

/// A single audit log entry.
#[derive(Debug, Clone)]
pub struct AuditEntry {
    pub id: i64,
    pub timestamp: DateTime<Utc>,
    pub operation: String,
    pub item_id: Option<String>,
    pub details: Option<String>,
}

/// Return the path to the audit database (for testing/display).
pub fn db_path(data_dir: &Path) -> PathBuf {
    data_dir.join(AUDIT_DB)
}

#[cfg(feature = "audit-log")]
pub use sqlite::AuditLog;

#[cfg(feature = "audit-log")]
mod sqlite {
    use std::path::Path;

    use chrono::{DateTime, Utc};
    use rusqlite::Connection;

    use super::{db_path, AuditEntry};
    use crate::errors::{Result, VaultError};

    /// SQLite-backed audit log.
    pub struct AuditLog {
        conn: Connection,
    }

    impl AuditLog {
        /// Open (or create) the audit database at `<data_dir>/audit.db`.
        ///
        /// Returns `None` if the database can't be opened — callers should
        /// treat this as "audit logging unavailable" and continue normally.
        pub fn open(data_dir: &Path) -> Option<Self> {
            let db_path = db_path(data_dir);
            let conn = Connection::open(&db_path).ok()?;

            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                let perms = std::fs::Permissions::from_mode(0o600);
                let _ = std::fs::set_permissions(&db_path, perms);
            }

            conn.execute_batch(
                "CREATE TABLE IF NOT EXISTS audit_log (
                    id          INTEGER PRIMARY KEY AUTOINCREMENT,
                    timestamp   TEXT NOT NULL,
                    operation   TEXT NOT NULL,
                    item_id     TEXT,
                    details     TEXT
                );",
            )
            .ok()?;

            Some(Self { conn })
        }

        /// Record an operation. Fire-and-forget — errors are only traced.
        pub fn log(&self, operation: &str, item_id: Option<&str>, details: Option<&str>) {
            let now = Utc::now().to_rfc3339();
            if let Err(e) = self.conn.execute(
                "INSERT INTO audit_log (timestamp, operation, item_id, details)
                 VALUES (?1, ?2, ?3, ?4)",
                rusqlite::params![now, operation, item_id, details],
            ) {
                tracing::warn!(error = %e, operation, "audit insert failed");
            }
        }

        /// Query recent audit entries.
        ///
        /// - `limit`: maximum number of entries to return (most recent first).
        /// - `since`: if provided, only return entries newer than this timestamp.
        pub fn query(
            &self,
            limit: usize,
            since: Option<DateTime<Utc>>,
        ) -> Result<Vec<AuditEntry>> {
            let limit_i64 = i64::try_from(limit).unwrap_or(i64::MAX);
            let (sql, params): (&str, Vec<Box<dyn rusqlite::types::ToSql>>) = match since {
                Some(ref ts) => (
                    "SELECT id, timestamp, operation, item_id, details
                     FROM audit_log
                     WHERE timestamp >= ?1
                     ORDER BY id DESC
                     LIMIT ?2",
                    vec![
                        Box::new(ts.to_rfc3339()) as Box<dyn rusqlite::types::ToSql>,
                        Box::new(limit_i64),
                    ],
                ),
                None => (
                    "SELECT id, timestamp, operation, item_id, details
                     FROM audit_log
                     ORDER BY id DESC
                     LIMIT ?1",
                    vec![Box::new(limit_i64) as Box<dyn rusqlite::types::ToSql>],
                ),
            };

            let mut stmt = self
                .conn
                .prepare(sql)
                .map_err(|e| VaultError::AuditError(format!("query prepare: {e}")))?;

            let params_refs: Vec<&dyn rusqlite::types::ToSql> =
                params.iter().map(|p| &**p).collect();

            let rows = stmt
                .query_map(params_refs.as_slice(), |row| {
                    let ts_str: String = row.get(1)?;
                    let timestamp = DateTime::parse_from_rfc3339(&ts_str)
                        .map_or_else(|_| Utc::now(), |dt| dt.with_timezone(&Utc));

                    Ok(AuditEntry {
                        id: row.get(0)?,
                        timestamp,
                        operation: row.get(2)?,
                        item_id: row.get(3)?,
                        details: row.get(4)?,
                    })
                })
                .map_err(|e| VaultError::AuditError(format!("query exec: {e}")))?;

            let mut entries = Vec::new();
            for row in rows {
                entries
                    .push(row.map_err(|e| VaultError::AuditError(format!("row parse: {e}")))?);
            }

            Ok(entries)
        }
    }
}

/// Log an audit event using the CLI context.
///
/// Opens the audit database in the resolved data directory and logs the
/// event.  Never fails the parent operation.
pub fn log_audit(cli: &Cli, op: &str, item_id: Option<&str>, details: Option<&str>) {
    #[cfg(feature = "audit-log")]
    {
        let Ok(data_dir) = crate::cli::data_dir(cli) else {
            return;
        };
        if std::fs::create_dir_all(&data_dir).is_err() {
            return;
        }
        if let Some(audit) = AuditLog::open(&data_dir) {
            audit.log(op, item_id, details);
        }
    }

    #[cfg(not(feature = "audit-log"))]
    {
        let _ = (cli, op, item_id, details);
    }
}
