//! # reflections-core
//!
//! Domain model for the daily reflections lookup service.
//!
//! ## Key Types
//!
//! - [`Reflection`] - One dated, language-tagged reflection entry
//! - [`Language`] - The fixed set of supported locales
//! - [`ReflectionError`] - Shared error taxonomy for the whole workspace
//!
//! The dataset is externally authored and read-only; nothing in this
//! workspace ever creates, mutates, or deletes a reflection.

mod error;
mod language;
mod model;

pub use error::ReflectionError;
pub use language::Language;
pub use model::Reflection;

/// The one default language for the whole workspace.
///
/// Historically the web front-end defaulted to pt-br while the CLI
/// examples defaulted to english; this constant is the single
/// resolution of that split. Callers that want another language pass
/// it explicitly.
pub const DEFAULT_LANGUAGE: Language = Language::BrazilianPortuguese;
