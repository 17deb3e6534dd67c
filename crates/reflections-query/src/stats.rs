use std::collections::BTreeMap;

use serde::Serialize;

use reflections_core::Language;

/// Dataset-wide counts, one entry per supported language.
///
/// `total` always equals the sum of `by_language`; the service computes
/// it that way rather than trusting two separate queries to agree.
#[derive(Debug, Clone, Serialize)]
pub struct Statistics {
    pub total: usize,
    pub by_language: BTreeMap<Language, usize>,
    /// Mean body length in characters, rounded to two decimals.
    pub average_text_length: BTreeMap<Language, f64>,
}
