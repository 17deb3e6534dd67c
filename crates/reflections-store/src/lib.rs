//! # reflections-store
//!
//! Read-only dataset accessors.
//!
//! The reflection dataset ships in two externally produced forms: a
//! single SQLite table (`reflections`) covering every language, and one
//! JSON document per language. [`DatasetSource`] abstracts over both so
//! the query service only ever sees "language in, ordered reflections
//! out".
//!
//! ## Key Types
//!
//! - [`DatasetSource`] - The accessor contract
//! - [`SqliteStore`] - Relational backend (read-only connection per load)
//! - [`JsonStore`] - Per-language JSON document backend
//!
//! Both backends validate required fields at the boundary: a row or
//! object with a missing/empty `date`, `title`, or `text` surfaces
//! `DataCorrupt` instead of leaking a half-formed record.

mod json;
mod sqlite;
mod validate;

pub use json::JsonStore;
pub use sqlite::SqliteStore;

use reflections_core::{Language, Reflection, ReflectionError};

/// A read-only source of per-language reflection collections.
///
/// Implementations never mutate the underlying store, and any handle
/// they acquire is released on every exit path before `load` returns.
pub trait DatasetSource: Send + Sync {
    /// Load the full collection for one language, ordered by ascending
    /// date.
    ///
    /// Fails with `DataUnavailable` when the underlying file or table
    /// is missing, and `DataCorrupt` when content cannot be parsed or
    /// a required field is absent.
    fn load(&self, language: Language) -> Result<Vec<Reflection>, ReflectionError>;
}

impl<S: DatasetSource + ?Sized> DatasetSource for Box<S> {
    fn load(&self, language: Language) -> Result<Vec<Reflection>, ReflectionError> {
        (**self).load(language)
    }
}
