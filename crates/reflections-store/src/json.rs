//! Per-language JSON document backend.
//!
//! Each language ships as one ordered JSON array of objects with
//! `date`, `title`, `quote`, `text`, and a citation field. Different
//! dataset exports spell the citation field `reference`, `content`, or
//! `citation`; all three are accepted.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use reflections_core::{Language, Reflection, ReflectionError};

use crate::validate::RawRecord;
use crate::DatasetSource;

/// Accessor over a directory of per-language JSON documents.
pub struct JsonStore {
    data_dir: PathBuf,
}

#[derive(Debug, Deserialize)]
struct JsonRecord {
    date: Option<String>,
    title: Option<String>,
    quote: Option<String>,
    text: Option<String>,
    #[serde(alias = "content", alias = "citation")]
    reference: Option<String>,
}

impl From<JsonRecord> for RawRecord {
    fn from(r: JsonRecord) -> Self {
        RawRecord {
            date: r.date,
            title: r.title,
            quote: r.quote,
            text: r.text,
            reference: r.reference,
        }
    }
}

impl JsonStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.data_dir
    }

    /// Path of the document backing one language.
    pub fn document_path(&self, language: Language) -> PathBuf {
        self.data_dir.join(language.data_file())
    }
}

impl DatasetSource for JsonStore {
    fn load(&self, language: Language) -> Result<Vec<Reflection>, ReflectionError> {
        let path = self.document_path(language);
        let origin = path.display().to_string();

        let content = fs::read_to_string(&path).map_err(|e| {
            ReflectionError::DataUnavailable(format!("cannot read {}: {}", origin, e))
        })?;

        let records: Vec<JsonRecord> = serde_json::from_str(&content)
            .map_err(|e| ReflectionError::DataCorrupt(format!("{}: {}", origin, e)))?;

        let mut reflections = Vec::with_capacity(records.len());
        for record in records {
            reflections.push(RawRecord::from(record).into_reflection(language, &origin)?);
        }
        reflections.sort_by_key(|r| r.date);

        debug!(language = %language, count = reflections.len(), "loaded reflections from json");
        Ok(reflections)
    }
}
