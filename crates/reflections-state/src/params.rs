//! The URL query representation of a selection.
//!
//! A shareable URL carries exactly two parameters, `date` and `lang`.
//! Anything else in the query is ignored, and invalid values are
//! treated as absent rather than as errors.

use chrono::NaiveDate;
use url::Url;

use reflections_core::Language;

/// Raw `date`/`lang` query parameters, before adoption.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UrlParams {
    pub date: Option<String>,
    pub lang: Option<String>,
}

impl UrlParams {
    /// Extract the two known parameters from a full URL.
    pub fn from_url(url: &Url) -> Self {
        let mut params = UrlParams::default();
        for (key, value) in url.query_pairs() {
            match key.as_ref() {
                "date" => params.date = Some(value.into_owned()),
                "lang" => params.lang = Some(value.into_owned()),
                _ => {}
            }
        }
        params
    }

    /// Extract from a bare query string (`date=...&lang=...`).
    pub fn from_query(query: &str) -> Self {
        let mut params = UrlParams::default();
        for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
            match key.as_ref() {
                "date" => params.date = Some(value.into_owned()),
                "lang" => params.lang = Some(value.into_owned()),
                _ => {}
            }
        }
        params
    }

    /// The date parameter, if it is a strict `YYYY-MM-DD` calendar date.
    pub fn valid_date(&self) -> Option<NaiveDate> {
        self.date.as_deref().and_then(parse_strict_date)
    }

    /// The language parameter, if it is in the supported set.
    pub fn valid_language(&self) -> Option<Language> {
        self.lang.as_deref().and_then(|l| l.parse().ok())
    }
}

/// Parse a date only when it has the exact `\d{4}-\d{2}-\d{2}` shape
/// and names a real calendar day. chrono alone would also accept
/// unpadded forms like `2025-3-5`, which the URL contract excludes.
fn parse_strict_date(s: &str) -> Option<NaiveDate> {
    let bytes = s.as_bytes();
    if bytes.len() != 10 || bytes[4] != b'-' || bytes[7] != b'-' {
        return None;
    }
    let digits_ok = bytes
        .iter()
        .enumerate()
        .all(|(i, b)| matches!(i, 4 | 7) || b.is_ascii_digit());
    if !digits_ok {
        return None;
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}
