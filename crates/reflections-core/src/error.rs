use thiserror::Error;

use crate::Language;

/// Failures surfaced by the accessors and the query service.
///
/// Legitimate absence of a (date, language) entry is not in this
/// taxonomy; lookups return `Option::None` for that. Nothing here is
/// retried: the dataset is static, so a failure without remediation
/// would fail the same way again.
#[derive(Error, Debug)]
pub enum ReflectionError {
    /// Underlying store or file missing or unreachable.
    #[error("dataset unavailable: {0}")]
    DataUnavailable(String),

    /// Content present but malformed, or a required field absent.
    #[error("dataset corrupt: {0}")]
    DataCorrupt(String),

    /// Random selection or statistics requested against zero entries.
    /// Signals a misconfigured deployment, not a transient condition.
    /// `language` is `None` when the whole dataset is empty.
    #[error("empty dataset{}", language.map(|l| format!(" for language '{l}'")).unwrap_or_default())]
    EmptyDataset { language: Option<Language> },

    /// Requested language is outside the fixed supported set.
    #[error("unsupported language: '{0}' (expected one of en, es, fr, pt-br)")]
    UnsupportedLanguage(String),
}
