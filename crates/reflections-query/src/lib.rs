//! # reflections-query
//!
//! The lookup operations over a [`DatasetSource`], plus the per-language
//! in-memory cache.
//!
//! ## Key Types
//!
//! - [`QueryService`] - All lookup operations, owns the cache
//! - [`Statistics`] - Dataset-wide counts
//!
//! The cache is populate-on-miss and write-once per language until an
//! explicit [`QueryService::clear_cache`]. Collections are held behind
//! `Arc`, so successive calls observe one consistent snapshot per
//! language for the lifetime of its cache entry.

mod service;
mod stats;

pub use service::QueryService;
pub use stats::Statistics;

pub use reflections_store::DatasetSource;
