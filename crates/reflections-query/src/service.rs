//! The query service: four lookups plus statistics over a cached
//! per-language dataset.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};

use chrono::{Local, NaiveDate};
use rand::seq::SliceRandom;
use tracing::debug;

use reflections_core::{Language, Reflection, ReflectionError};
use reflections_store::DatasetSource;

use crate::Statistics;

/// Read-only lookup operations over one [`DatasetSource`].
///
/// Owns the per-language cache. Each language is loaded at most once
/// (until [`clear_cache`](Self::clear_cache)); if two callers race on
/// the first load, both load but only one copy is kept, so the cache
/// converges to a single snapshot either way.
pub struct QueryService<S: DatasetSource> {
    source: S,
    cache: Mutex<HashMap<Language, Arc<Vec<Reflection>>>>,
}

impl<S: DatasetSource> QueryService<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// The full ordered collection for one language, from cache or from
    /// the source on a miss.
    pub fn collection(&self, language: Language) -> Result<Arc<Vec<Reflection>>, ReflectionError> {
        {
            let cache = self.cache.lock().expect("reflection cache lock poisoned");
            if let Some(collection) = cache.get(&language) {
                return Ok(Arc::clone(collection));
            }
        }

        // Load outside the lock; a concurrent duplicate load is wasteful
        // but harmless, and the first inserted copy wins below.
        let loaded = Arc::new(self.source.load(language)?);
        debug!(language = %language, count = loaded.len(), "populated cache");

        let mut cache = self.cache.lock().expect("reflection cache lock poisoned");
        let entry = cache.entry(language).or_insert(loaded);
        Ok(Arc::clone(entry))
    }

    /// Exact (date, language) lookup. Absence is `None`, never an error.
    pub fn get_by_date(
        &self,
        language: Language,
        date: NaiveDate,
    ) -> Result<Option<Reflection>, ReflectionError> {
        let collection = self.collection(language)?;
        Ok(collection.iter().find(|r| r.date == date).cloned())
    }

    /// Today's entry, at the local calendar date.
    pub fn get_today(&self, language: Language) -> Result<Option<Reflection>, ReflectionError> {
        self.get_by_date(language, Local::now().date_naive())
    }

    /// One uniformly selected entry from the language's collection.
    pub fn get_random(&self, language: Language) -> Result<Reflection, ReflectionError> {
        let collection = self.collection(language)?;
        collection
            .choose(&mut rand::thread_rng())
            .cloned()
            .ok_or(ReflectionError::EmptyDataset {
                language: Some(language),
            })
    }

    /// Case-insensitive substring search over title, quote, and text,
    /// ascending by date.
    ///
    /// An empty keyword matches the whole collection; nothing upstream
    /// rejects it and that behavior is intended.
    pub fn search(
        &self,
        language: Language,
        keyword: &str,
    ) -> Result<Vec<Reflection>, ReflectionError> {
        let collection = self.collection(language)?;
        Ok(collection
            .iter()
            .filter(|r| r.matches_keyword(keyword))
            .cloned()
            .collect())
    }

    /// All entries whose date falls in the given month (1-12),
    /// ascending.
    pub fn get_month(
        &self,
        language: Language,
        month: u32,
    ) -> Result<Vec<Reflection>, ReflectionError> {
        use chrono::Datelike;
        let collection = self.collection(language)?;
        Ok(collection
            .iter()
            .filter(|r| r.date.month() == month)
            .cloned()
            .collect())
    }

    /// The same date across every supported language, omitting languages
    /// with no entry for it. A language whose dataset itself fails to
    /// load propagates that failure: a complete deployment carries all
    /// four documents, so a missing one is misconfiguration, not absence.
    pub fn get_multilingual(
        &self,
        date: NaiveDate,
    ) -> Result<BTreeMap<Language, Reflection>, ReflectionError> {
        let mut result = BTreeMap::new();
        for language in Language::ALL {
            if let Some(reflection) = self.get_by_date(language, date)? {
                result.insert(language, reflection);
            }
        }
        Ok(result)
    }

    /// Dataset-wide counts. Fails with `EmptyDataset` when every
    /// language is empty, since that signals a misconfigured deployment.
    pub fn statistics(&self) -> Result<Statistics, ReflectionError> {
        let mut by_language = BTreeMap::new();
        let mut average_text_length = BTreeMap::new();
        let mut total = 0;

        for language in Language::ALL {
            let collection = self.collection(language)?;
            let count = collection.len();
            total += count;
            by_language.insert(language, count);
            if count > 0 {
                let chars: usize = collection.iter().map(|r| r.text.chars().count()).sum();
                let mean = chars as f64 / count as f64;
                average_text_length.insert(language, (mean * 100.0).round() / 100.0);
            }
        }

        if total == 0 {
            return Err(ReflectionError::EmptyDataset { language: None });
        }

        Ok(Statistics {
            total,
            by_language,
            average_text_length,
        })
    }

    /// Warm the cache for one language ahead of use.
    pub fn preload(&self, language: Language) -> Result<(), ReflectionError> {
        self.collection(language).map(|_| ())
    }

    /// The underlying source, mostly useful to callers that need its
    /// configuration (path, directory) for diagnostics.
    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn is_cached(&self, language: Language) -> bool {
        self.cache
            .lock()
            .expect("reflection cache lock poisoned")
            .contains_key(&language)
    }

    /// Drop every cached collection; the next call per language reloads
    /// from the source.
    pub fn clear_cache(&self) {
        self.cache
            .lock()
            .expect("reflection cache lock poisoned")
            .clear();
    }
}
