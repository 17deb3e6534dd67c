//! The fixed set of supported locales and its canonical spelling.

use std::fmt;
use std::str::FromStr;

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::ReflectionError;

/// A supported locale.
///
/// The canonical codes are `en`, `es`, `fr`, and `pt-br`. The legacy
/// store spellings (`english`, `spanish`, `french`, `pt-BR`) are still
/// accepted on input and remain the values of the `language` column in
/// the SQLite table, but they never appear in new output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Language {
    English,
    Spanish,
    French,
    BrazilianPortuguese,
}

impl Language {
    /// All supported languages, in canonical-code order.
    pub const ALL: [Language; 4] = [
        Language::English,
        Language::Spanish,
        Language::French,
        Language::BrazilianPortuguese,
    ];

    /// Canonical language code (`en`, `es`, `fr`, `pt-br`).
    pub fn code(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Spanish => "es",
            Language::French => "fr",
            Language::BrazilianPortuguese => "pt-br",
        }
    }

    /// Value of the `language` column in the relational store.
    pub fn store_key(&self) -> &'static str {
        match self {
            Language::English => "english",
            Language::Spanish => "spanish",
            Language::French => "french",
            Language::BrazilianPortuguese => "pt-BR",
        }
    }

    /// File name of the per-language JSON document.
    pub fn data_file(&self) -> &'static str {
        match self {
            Language::English => "daily_reflections_english.json",
            Language::Spanish => "daily_reflections_spanish.json",
            Language::French => "daily_reflections_french.json",
            Language::BrazilianPortuguese => "daily_reflections_brazilian-portuguese.json",
        }
    }

    /// Human-readable native name.
    pub fn display_name(&self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Spanish => "Español",
            Language::French => "Français",
            Language::BrazilianPortuguese => "Português (Brasil)",
        }
    }
}

impl FromStr for Language {
    type Err = ReflectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "en" | "english" => Ok(Language::English),
            "es" | "spanish" => Ok(Language::Spanish),
            "fr" | "french" => Ok(Language::French),
            "pt-br" | "brazilian-portuguese" => Ok(Language::BrazilianPortuguese),
            _ => Err(ReflectionError::UnsupportedLanguage(s.to_string())),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl Serialize for Language {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}

impl<'de> Deserialize<'de> for Language {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}
