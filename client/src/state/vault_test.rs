use chrono::TimeZone;

use super::*;

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 2, 3, 4, 5, 6).unwrap()
}

fn seeded() -> VaultState {
    let mut state = VaultState::default();
    state.add("Rust docs", "doc.rust-lang.org", "Reference", now()).unwrap();
    state.add("", "https://news.ycombinator.com", "", now()).unwrap();
    state.add("Crates", "crates.io", "reference", now()).unwrap();
    state
}

#[test]
fn add_prepends_and_normalizes() {
    let state = seeded();
    assert_eq!(state.links[0].title, "Crates");
    assert_eq!(state.links[2].url, "https://doc.rust-lang.org/");
    assert_eq!(state.links[1].category, "General");
}

#[test]
fn add_rejects_empty_url() {
    let mut state = VaultState::default();
    assert_eq!(state.add("x", "  ", "", now()), Err(RecordError::EmptyUrl));
    assert!(state.links.is_empty());
}

#[test]
fn visible_applies_category_and_query() {
    let mut state = seeded();
    state.category = Some("REFERENCE".into());
    assert_eq!(state.visible().len(), 2);
    state.query = "rust".into();
    let visible = state.visible();
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].title, "Rust docs");
}

#[test]
fn categories_are_distinct_case_insensitively() {
    assert_eq!(seeded().categories(), ["General", "reference"]);
}

#[test]
fn removing_last_link_of_category_resets_filter() {
    let mut state = seeded();
    let general = state.links[1].id.clone();
    state.category = Some("General".into());
    state.remove(&general);
    assert!(state.category.is_none());
    assert_eq!(state.links.len(), 2);
}
