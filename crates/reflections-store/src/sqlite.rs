//! Relational backend over the externally produced SQLite database.
//!
//! One table, `reflections(date, language, title, quote, text, content)`,
//! where `content` carries the source citation and `language` uses the
//! legacy store spellings (`english`, ..., `pt-BR`).

use std::path::{Path, PathBuf};

use rusqlite::{params, Connection, OpenFlags};
use tracing::debug;

use reflections_core::{Language, Reflection, ReflectionError};

use crate::validate::RawRecord;
use crate::DatasetSource;

/// Read-only accessor for the SQLite dataset.
///
/// Holds only the path; a connection is opened per `load` call and
/// dropped before the call returns, on success and on error alike.
pub struct SqliteStore {
    db_path: PathBuf,
}

impl SqliteStore {
    pub fn new(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: db_path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.db_path
    }

    /// Open a read-only connection. The read-only open flag doubles as
    /// the existence check: SQLite will not create the file.
    fn connect(&self) -> Result<Connection, ReflectionError> {
        Connection::open_with_flags(
            &self.db_path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .map_err(|e| {
            ReflectionError::DataUnavailable(format!(
                "cannot open {}: {}",
                self.db_path.display(),
                e
            ))
        })
    }
}

impl DatasetSource for SqliteStore {
    fn load(&self, language: Language) -> Result<Vec<Reflection>, ReflectionError> {
        let conn = self.connect()?;
        let origin = self.db_path.display().to_string();

        let mut stmt = conn
            .prepare(
                "SELECT date, title, quote, text, content
                 FROM reflections
                 WHERE language = ?1
                 ORDER BY date",
            )
            .map_err(|e| {
                ReflectionError::DataUnavailable(format!("{}: {}", origin, e))
            })?;

        let rows = stmt
            .query_map(params![language.store_key()], |row| {
                Ok(RawRecord {
                    date: row.get(0)?,
                    title: row.get(1)?,
                    quote: row.get(2)?,
                    text: row.get(3)?,
                    reference: row.get(4)?,
                })
            })
            .map_err(|e| ReflectionError::DataCorrupt(format!("{}: {}", origin, e)))?;

        let mut reflections = Vec::new();
        for row in rows {
            let raw = row
                .map_err(|e| ReflectionError::DataCorrupt(format!("{}: {}", origin, e)))?;
            reflections.push(raw.into_reflection(language, &origin)?);
        }

        // The query already orders by the date column, but that column is
        // TEXT; re-sort on the parsed dates so the contract holds even
        // for an oddly formatted dump.
        reflections.sort_by_key(|r| r.date);

        debug!(language = %language, count = reflections.len(), "loaded reflections from sqlite");
        Ok(reflections)
    }
}
