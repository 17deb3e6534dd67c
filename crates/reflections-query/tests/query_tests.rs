use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use chrono::NaiveDate;
use reflections_core::{Language, Reflection, ReflectionError};
use reflections_query::{DatasetSource, QueryService};

/// In-memory source with a load counter, so cache behavior is
/// observable.
struct FakeSource {
    data: HashMap<Language, Vec<Reflection>>,
    loads: AtomicUsize,
}

impl FakeSource {
    fn new(data: HashMap<Language, Vec<Reflection>>) -> Self {
        Self {
            data,
            loads: AtomicUsize::new(0),
        }
    }

    fn load_count(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }
}

impl DatasetSource for FakeSource {
    fn load(&self, language: Language) -> Result<Vec<Reflection>, ReflectionError> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        let mut collection = self.data.get(&language).cloned().unwrap_or_default();
        collection.sort_by_key(|r| r.date);
        Ok(collection)
    }
}

/// Source that always fails, for propagation tests.
struct BrokenSource;

impl DatasetSource for BrokenSource {
    fn load(&self, _language: Language) -> Result<Vec<Reflection>, ReflectionError> {
        Err(ReflectionError::DataUnavailable(
            "reflections.db is missing".to_string(),
        ))
    }
}

fn date(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

fn entry(language: Language, d: &str, title: &str, quote: &str, text: &str) -> Reflection {
    Reflection {
        date: date(d),
        language,
        title: title.to_string(),
        quote: quote.to_string(),
        text: text.to_string(),
        reference: "Daily Reflections".to_string(),
    }
}

/// Helper: English has three entries, pt-br two, French one, Spanish
/// none.
fn sample_service() -> QueryService<FakeSource> {
    let mut data = HashMap::new();
    data.insert(
        Language::English,
        vec![
            entry(
                Language::English,
                "2025-01-03",
                "Steady Hope",
                "hope grows slowly",
                "A day at a time.",
            ),
            entry(
                Language::English,
                "2025-01-01",
                "New Beginnings",
                "Each day is a fresh start.",
                "Today we begin again.",
            ),
            entry(
                Language::English,
                "2025-01-02",
                "Quiet Strength",
                "",
                "Strength arrives quietly, with hope.",
            ),
        ],
    );
    data.insert(
        Language::BrazilianPortuguese,
        vec![
            entry(
                Language::BrazilianPortuguese,
                "2025-01-01",
                "Novos Começos",
                "Cada dia é um recomeço.",
                "Hoje começamos de novo.",
            ),
            entry(
                Language::BrazilianPortuguese,
                "2025-01-02",
                "Força Serena",
                "",
                "A força chega em silêncio.",
            ),
        ],
    );
    data.insert(
        Language::French,
        vec![entry(
            Language::French,
            "2025-01-01",
            "Nouveaux Départs",
            "Chaque jour est un recommencement.",
            "Aujourd'hui nous recommençons.",
        )],
    );
    data.insert(Language::Spanish, Vec::new());
    QueryService::new(FakeSource::new(data))
}

// ============================================================
// get_by_date
// ============================================================

#[test]
fn test_get_by_date_returns_matching_record() {
    let service = sample_service();
    let r = service
        .get_by_date(Language::English, date("2025-01-01"))
        .unwrap()
        .unwrap();
    assert_eq!(r.title, "New Beginnings");
    assert_eq!(r.date, date("2025-01-01"));
    assert_eq!(r.language, Language::English);
}

#[test]
fn test_get_by_date_absence_is_none_not_error() {
    let service = sample_service();
    let r = service
        .get_by_date(Language::English, date("1999-12-31"))
        .unwrap();
    assert!(r.is_none());
}

// ============================================================
// get_random
// ============================================================

#[test]
fn test_get_random_returns_member_of_collection() {
    let service = sample_service();
    let collection = service.collection(Language::English).unwrap();
    for _ in 0..50 {
        let r = service.get_random(Language::English).unwrap();
        assert!(collection.contains(&r));
    }
}

#[test]
fn test_get_random_covers_more_than_one_entry() {
    let service = sample_service();
    let mut seen = HashSet::new();
    for _ in 0..200 {
        seen.insert(service.get_random(Language::English).unwrap().date);
    }
    assert!(seen.len() > 1);
}

#[test]
fn test_get_random_empty_language_fails() {
    let service = sample_service();
    let err = service.get_random(Language::Spanish).unwrap_err();
    assert!(matches!(
        err,
        ReflectionError::EmptyDataset {
            language: Some(Language::Spanish)
        }
    ));
}

// ============================================================
// search
// ============================================================

#[test]
fn test_search_empty_keyword_returns_full_collection_ordered() {
    let service = sample_service();
    let results = service.search(Language::English, "").unwrap();
    assert_eq!(results.len(), 3);
    let dates: Vec<_> = results.iter().map(|r| r.date).collect();
    assert_eq!(
        dates,
        vec![date("2025-01-01"), date("2025-01-02"), date("2025-01-03")]
    );
}

#[test]
fn test_search_matches_are_subset_and_case_insensitive() {
    let service = sample_service();
    let results = service.search(Language::English, "HOPE").unwrap();
    assert_eq!(results.len(), 2);
    assert!(results.iter().all(|r| r.matches_keyword("hope")));
    // Ascending by date.
    assert!(results[0].date < results[1].date);
}

#[test]
fn test_search_no_match_is_empty_not_error() {
    let service = sample_service();
    let results = service.search(Language::English, "zzz-nothing").unwrap();
    assert!(results.is_empty());
}

// ============================================================
// get_month
// ============================================================

#[test]
fn test_get_month_filters_by_calendar_month() {
    let service = sample_service();
    let january = service.get_month(Language::English, 1).unwrap();
    assert_eq!(january.len(), 3);
    let february = service.get_month(Language::English, 2).unwrap();
    assert!(february.is_empty());
}

// ============================================================
// get_multilingual
// ============================================================

#[test]
fn test_multilingual_omits_languages_without_entry() {
    let service = sample_service();
    let map = service.get_multilingual(date("2025-01-02")).unwrap();
    // English and pt-br have 2025-01-02; French and Spanish do not.
    assert_eq!(map.len(), 2);
    assert!(map.contains_key(&Language::English));
    assert!(map.contains_key(&Language::BrazilianPortuguese));
    assert!(!map.contains_key(&Language::French));
}

#[test]
fn test_multilingual_full_coverage_date() {
    let service = sample_service();
    let map = service.get_multilingual(date("2025-01-01")).unwrap();
    assert_eq!(map.len(), 3); // every language that has any data
    for (language, reflection) in &map {
        assert_eq!(reflection.language, *language);
        assert_eq!(reflection.date, date("2025-01-01"));
    }
}

// ============================================================
// statistics
// ============================================================

#[test]
fn test_statistics_total_equals_sum_of_languages() {
    let service = sample_service();
    let stats = service.statistics().unwrap();
    assert_eq!(stats.total, 6);
    assert_eq!(stats.total, stats.by_language.values().sum::<usize>());
    assert_eq!(stats.by_language[&Language::English], 3);
    assert_eq!(stats.by_language[&Language::Spanish], 0);
    // No average for an empty language.
    assert!(!stats.average_text_length.contains_key(&Language::Spanish));
}

#[test]
fn test_statistics_empty_dataset_fails() {
    let service = QueryService::new(FakeSource::new(HashMap::new()));
    let err = service.statistics().unwrap_err();
    assert!(matches!(
        err,
        ReflectionError::EmptyDataset { language: None }
    ));
}

// ============================================================
// cache behavior
// ============================================================

#[test]
fn test_collection_is_loaded_once_per_language() {
    let service = sample_service();
    service.get_by_date(Language::English, date("2025-01-01")).unwrap();
    service.search(Language::English, "hope").unwrap();
    service.get_random(Language::English).unwrap();
    assert_eq!(service.source().load_count(), 1);
}

#[test]
fn test_clear_cache_forces_reload() {
    let service = sample_service();
    service.preload(Language::English).unwrap();
    assert!(service.is_cached(Language::English));

    service.clear_cache();
    assert!(!service.is_cached(Language::English));

    service.preload(Language::English).unwrap();
    assert_eq!(service.source().load_count(), 2);
}

/// Source whose loads park until released, so two first-time callers
/// can be held inside `load` at the same time.
struct GatedSource {
    started: AtomicUsize,
    release: AtomicBool,
}

impl GatedSource {
    fn new() -> Self {
        Self {
            started: AtomicUsize::new(0),
            release: AtomicBool::new(false),
        }
    }

    /// Spin until `n` loads have entered, failing instead of hanging.
    fn wait_for_started(&self, n: usize) {
        for _ in 0..5000 {
            if self.started.load(Ordering::SeqCst) >= n {
                return;
            }
            thread::sleep(Duration::from_millis(1));
        }
        panic!("expected {} loads to start", n);
    }
}

impl DatasetSource for GatedSource {
    fn load(&self, language: Language) -> Result<Vec<Reflection>, ReflectionError> {
        self.started.fetch_add(1, Ordering::SeqCst);
        while !self.release.load(Ordering::SeqCst) {
            thread::sleep(Duration::from_millis(1));
        }
        Ok(vec![entry(
            language,
            "2025-01-01",
            "New Beginnings",
            "",
            "Today we begin again.",
        )])
    }
}

#[test]
fn test_racing_first_loads_converge_on_one_snapshot() {
    let service = QueryService::new(GatedSource::new());

    let (first, second) = thread::scope(|s| {
        let a = s.spawn(|| service.collection(Language::English).unwrap());
        // Let the first caller get parked inside `load` before the
        // second checks the cache, so both genuinely miss.
        service.source().wait_for_started(1);
        let b = s.spawn(|| service.collection(Language::English).unwrap());
        service.source().wait_for_started(2);

        service.source().release.store(true, Ordering::SeqCst);
        (a.join().unwrap(), b.join().unwrap())
    });

    // Both loads ran; the losing copy was dropped and both callers hold
    // the one cached snapshot.
    assert_eq!(service.source().started.load(Ordering::SeqCst), 2);
    assert!(Arc::ptr_eq(&first, &second));

    // A later caller gets that same snapshot, with no further load.
    let third = service.collection(Language::English).unwrap();
    assert!(Arc::ptr_eq(&first, &third));
    assert_eq!(service.source().started.load(Ordering::SeqCst), 2);
}

// ============================================================
// error propagation
// ============================================================

#[test]
fn test_store_failures_propagate_unchanged() {
    let service = QueryService::new(BrokenSource);
    let err = service
        .get_by_date(Language::English, date("2025-01-01"))
        .unwrap_err();
    assert!(matches!(err, ReflectionError::DataUnavailable(_)));

    let err = service.get_multilingual(date("2025-01-01")).unwrap_err();
    assert!(matches!(err, ReflectionError::DataUnavailable(_)));
}
