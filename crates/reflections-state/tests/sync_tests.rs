use chrono::NaiveDate;
use url::Url;

use reflections_core::Language;
use reflections_state::{MemoryPreferences, PreferenceStore, StateSync, UrlParams};

fn date(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

const TODAY: &str = "2025-06-15";

// ============================================================
// First-run adoption
// ============================================================

#[test]
fn test_url_params_override_stored_preferences() {
    let prefs = MemoryPreferences::with(
        Some(Language::English),
        Some(date("2025-01-01")),
    );
    let params = UrlParams::from_query("date=2025-03-05&lang=fr");

    let sync = StateSync::initialize(prefs, &params, date(TODAY));

    assert_eq!(sync.selection().language, Language::French);
    assert_eq!(sync.selection().date, date("2025-03-05"));
}

#[test]
fn test_stored_preferences_beat_defaults() {
    let prefs = MemoryPreferences::with(
        Some(Language::Spanish),
        Some(date("2025-02-02")),
    );

    let sync = StateSync::initialize(prefs, &UrlParams::default(), date(TODAY));

    assert_eq!(sync.selection().language, Language::Spanish);
    assert_eq!(sync.selection().date, date("2025-02-02"));
}

#[test]
fn test_defaults_when_nothing_else_is_present() {
    let sync = StateSync::initialize(
        MemoryPreferences::default(),
        &UrlParams::default(),
        date(TODAY),
    );

    assert_eq!(sync.selection().language, Language::BrazilianPortuguese);
    assert_eq!(sync.selection().date, date(TODAY));
}

#[test]
fn test_invalid_url_values_fall_through() {
    let prefs = MemoryPreferences::with(Some(Language::English), None);
    let params = UrlParams::from_query("date=03-05-2025&lang=klingon");

    let sync = StateSync::initialize(prefs, &params, date(TODAY));

    assert_eq!(sync.selection().language, Language::English);
    assert_eq!(sync.selection().date, date(TODAY));
}

#[test]
fn test_initialize_mixed_sources_per_coordinate() {
    // Valid date in the URL, language only in the store.
    let prefs = MemoryPreferences::with(Some(Language::French), Some(date("2024-12-24")));
    let params = UrlParams::from_query("date=2025-03-05");

    let sync = StateSync::initialize(prefs, &params, date(TODAY));

    assert_eq!(sync.selection().date, date("2025-03-05"));
    assert_eq!(sync.selection().language, Language::French);
}

// ============================================================
// Day arithmetic
// ============================================================

#[test]
fn test_next_day_rolls_over_month_in_non_leap_year() {
    let mut sync = StateSync::initialize(
        MemoryPreferences::default(),
        &UrlParams::from_query("date=2025-02-28"),
        date(TODAY),
    );
    sync.next_day();
    assert_eq!(sync.selection().date, date("2025-03-01"));
}

#[test]
fn test_next_day_respects_leap_year() {
    let mut sync = StateSync::initialize(
        MemoryPreferences::default(),
        &UrlParams::from_query("date=2024-02-28"),
        date(TODAY),
    );
    sync.next_day();
    assert_eq!(sync.selection().date, date("2024-02-29"));
}

#[test]
fn test_previous_day_crosses_year_boundary() {
    let mut sync = StateSync::initialize(
        MemoryPreferences::default(),
        &UrlParams::from_query("date=2025-01-01"),
        date(TODAY),
    );
    sync.previous_day();
    assert_eq!(sync.selection().date, date("2024-12-31"));
}

#[test]
fn test_jump_to_today() {
    let mut sync = StateSync::initialize(
        MemoryPreferences::default(),
        &UrlParams::from_query("date=2020-05-05"),
        date(TODAY),
    );
    sync.jump_to_today(date(TODAY));
    assert_eq!(sync.selection().date, date(TODAY));
}

// ============================================================
// Mirror behavior
// ============================================================

#[test]
fn test_navigation_updates_preferences() {
    let mut sync = StateSync::initialize(
        MemoryPreferences::default(),
        &UrlParams::default(),
        date(TODAY),
    );
    sync.set_language(Language::English);
    sync.next_day();

    let stored = sync.prefs().load();
    assert_eq!(stored.language, Some(Language::English));
    assert_eq!(stored.date, Some(date("2025-06-16")));
}

#[test]
fn test_redundant_url_updates_are_skipped() {
    let params = UrlParams::from_query("date=2025-03-05&lang=fr");
    let mut sync = StateSync::initialize(MemoryPreferences::default(), &params, date(TODAY));

    // The URL already matches the adopted selection; nothing written.
    assert_eq!(sync.url_writes(), 0);

    // Re-setting the same date changes nothing on the URL side.
    sync.set_date(date("2025-03-05"));
    assert_eq!(sync.url_writes(), 0);

    // A real change writes exactly once.
    sync.next_day();
    assert_eq!(sync.url_writes(), 1);
    assert_eq!(sync.url_mirror().date.as_deref(), Some("2025-03-06"));
}

#[test]
fn test_initialize_writes_url_when_defaults_win() {
    // Empty URL, defaults adopted: the URL mirror must be brought up to
    // date as part of initialization.
    let sync = StateSync::initialize(
        MemoryPreferences::default(),
        &UrlParams::default(),
        date(TODAY),
    );
    assert_eq!(sync.url_writes(), 1);
    assert_eq!(sync.url_mirror().date.as_deref(), Some(TODAY));
    assert_eq!(sync.url_mirror().lang.as_deref(), Some("pt-br"));
}

// ============================================================
// Canonical URL
// ============================================================

#[test]
fn test_canonical_url_shape() {
    let params = UrlParams::from_query("date=2025-03-05&lang=fr");
    let sync = StateSync::initialize(MemoryPreferences::default(), &params, date(TODAY));

    let base = Url::parse("https://example.org/reflections").unwrap();
    let url = sync.canonical_url(&base);
    assert_eq!(
        url.as_str(),
        "https://example.org/reflections?date=2025-03-05&lang=fr"
    );
}
