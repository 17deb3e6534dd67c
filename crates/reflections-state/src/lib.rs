//! # reflections-state
//!
//! The client selection state, kept consistent across three surfaces:
//! the in-memory `(language, date)` pair, a shareable URL query, and a
//! durable local preference file.
//!
//! ## Key Types
//!
//! - [`Selection`] - The active (language, date) coordinates
//! - [`StateSync`] - The `Uninitialized -> Synced` state machine
//! - [`UrlParams`] - The two-parameter URL query representation
//! - [`PreferenceStore`] / [`FilePreferences`] - Durable preferences
//!
//! Everything here is synchronous and in-process; there are no timers
//! or network calls in the state machine itself.

mod params;
mod prefs;
mod sync;

pub use params::UrlParams;
pub use prefs::{FilePreferences, MemoryPreferences, PreferenceStore, StoredSelection};
pub use sync::{Selection, StateSync};
