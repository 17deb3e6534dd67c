//! The selection state machine.
//!
//! The `Uninitialized -> Synced` transition is encoded in the type:
//! [`StateSync::initialize`] is the only constructor, so the first-run
//! adoption (URL over stored preferences over built-in defaults) runs
//! exactly once per synchronizer. Every later navigation updates the
//! in-memory selection first, then mirrors it to the preference store
//! and the URL representation.

use chrono::NaiveDate;
use tracing::debug;
use url::Url;

use reflections_core::{Language, DEFAULT_LANGUAGE};

use crate::{PreferenceStore, UrlParams};

/// The active (language, date) coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub language: Language,
    pub date: NaiveDate,
}

impl Selection {
    /// The URL query representation of this selection.
    pub fn to_params(&self) -> UrlParams {
        UrlParams {
            date: Some(self.date.to_string()),
            lang: Some(self.language.code().to_string()),
        }
    }

    /// Bare canonical query string, `date=<date>&lang=<lang>`.
    pub fn canonical_query(&self) -> String {
        format!("date={}&lang={}", self.date, self.language.code())
    }

    /// The single authoritative shareable URL for this selection.
    pub fn canonical_url(&self, base: &Url) -> Url {
        let mut url = base.clone();
        url.set_query(Some(&self.canonical_query()));
        url
    }
}

/// Keeps one [`Selection`] consistent with its URL representation and a
/// durable preference store.
pub struct StateSync<P: PreferenceStore> {
    selection: Selection,
    /// What the address-bar side of the world currently shows.
    url_mirror: UrlParams,
    /// History entries written so far; redundant updates are skipped.
    url_writes: usize,
    prefs: P,
}

impl<P: PreferenceStore> StateSync<P> {
    /// First-run transition.
    ///
    /// Adoption order per coordinate: a valid URL parameter wins, then
    /// the durable store, then the built-in defaults (language pt-br,
    /// date = `today`). The result is immediately mirrored back to both
    /// surfaces, so a synchronizer is `Synced` from the moment it
    /// exists.
    pub fn initialize(prefs: P, params: &UrlParams, today: NaiveDate) -> Self {
        let stored = prefs.load();
        let selection = Selection {
            language: params
                .valid_language()
                .or(stored.language)
                .unwrap_or(DEFAULT_LANGUAGE),
            date: params.valid_date().or(stored.date).unwrap_or(today),
        };
        debug!(language = %selection.language, date = %selection.date, "initialized selection");

        let mut sync = Self {
            selection,
            url_mirror: params.clone(),
            url_writes: 0,
            prefs,
        };
        sync.mirror_out();
        sync
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Move to the previous calendar day. Date arithmetic stays on
    /// year/month/day components; no locale parsing, no timezone shift.
    pub fn previous_day(&mut self) -> &Selection {
        if let Some(date) = self.selection.date.pred_opt() {
            self.selection.date = date;
            self.mirror_out();
        }
        &self.selection
    }

    /// Move to the next calendar day.
    pub fn next_day(&mut self) -> &Selection {
        if let Some(date) = self.selection.date.succ_opt() {
            self.selection.date = date;
            self.mirror_out();
        }
        &self.selection
    }

    pub fn set_date(&mut self, date: NaiveDate) -> &Selection {
        self.selection.date = date;
        self.mirror_out();
        &self.selection
    }

    pub fn jump_to_today(&mut self, today: NaiveDate) -> &Selection {
        self.set_date(today)
    }

    pub fn set_language(&mut self, language: Language) -> &Selection {
        self.selection.language = language;
        self.mirror_out();
        &self.selection
    }

    /// The durable store behind this synchronizer.
    pub fn prefs(&self) -> &P {
        &self.prefs
    }

    /// The URL-side mirror of the current selection.
    pub fn url_mirror(&self) -> &UrlParams {
        &self.url_mirror
    }

    /// How many URL updates have actually been written. Updates that
    /// would repeat the current URL are skipped, so this also counts
    /// avoided redundant history entries by its difference from the
    /// number of navigation calls.
    pub fn url_writes(&self) -> usize {
        self.url_writes
    }

    pub fn canonical_url(&self, base: &Url) -> Url {
        self.selection.canonical_url(base)
    }

    /// Push the in-memory selection out to both mirrors.
    fn mirror_out(&mut self) {
        self.prefs.save(&self.selection);
        let params = self.selection.to_params();
        if self.url_mirror != params {
            self.url_mirror = params;
            self.url_writes += 1;
        }
    }
}
