//! Boundary validation shared by both backends.

use chrono::NaiveDate;
use reflections_core::{Language, Reflection, ReflectionError};

/// One record as it arrives from the store, before validation.
///
/// Everything is optional here; `into_reflection` decides what was
/// actually required.
#[derive(Debug, Default)]
pub(crate) struct RawRecord {
    pub date: Option<String>,
    pub title: Option<String>,
    pub quote: Option<String>,
    pub text: Option<String>,
    pub reference: Option<String>,
}

impl RawRecord {
    /// Promote a raw record to a validated [`Reflection`].
    ///
    /// Required: a parseable ISO date, a non-empty title, a non-empty
    /// body. `quote` and `reference` may be absent or empty.
    pub fn into_reflection(
        self,
        language: Language,
        origin: &str,
    ) -> Result<Reflection, ReflectionError> {
        let date_str = self
            .date
            .ok_or_else(|| corrupt(origin, "record missing 'date'"))?;
        let date = NaiveDate::parse_from_str(&date_str, "%Y-%m-%d").map_err(|e| {
            corrupt(origin, &format!("invalid date '{}': {}", date_str, e))
        })?;

        let title = self
            .title
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| corrupt(origin, &format!("record {} missing 'title'", date)))?;
        let text = self
            .text
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| corrupt(origin, &format!("record {} missing 'text'", date)))?;

        Ok(Reflection {
            date,
            language,
            title,
            quote: self.quote.unwrap_or_default(),
            text,
            reference: self.reference.unwrap_or_default(),
        })
    }
}

fn corrupt(origin: &str, detail: &str) -> ReflectionError {
    ReflectionError::DataCorrupt(format!("{}: {}", origin, detail))
}
