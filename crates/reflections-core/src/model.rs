//! The reflection record.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::Language;

/// One daily reflection entry.
///
/// Exactly one entry exists per (date, language) pair in a complete
/// dataset. Records are immutable once loaded; the accessors validate
/// required fields before one of these is ever constructed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reflection {
    pub date: NaiveDate,
    pub language: Language,
    pub title: String,
    /// Short excerpt; may be empty.
    pub quote: String,
    /// Main body; may contain embedded paragraph breaks.
    pub text: String,
    /// Source attribution / citation.
    pub reference: String,
}

impl Reflection {
    /// Case-insensitive substring match against title, quote, and text.
    ///
    /// An empty keyword matches every record (the empty string is a
    /// substring of everything); that is intended behavior, not a bug.
    pub fn matches_keyword(&self, keyword: &str) -> bool {
        let needle = keyword.to_lowercase();
        self.title.to_lowercase().contains(&needle)
            || self.quote.to_lowercase().contains(&needle)
            || self.text.to_lowercase().contains(&needle)
    }
}
