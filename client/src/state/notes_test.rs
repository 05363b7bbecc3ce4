use chrono::TimeZone;

use super::*;

fn at(minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 6, 1, 10, minute, 0).unwrap()
}

#[test]
fn save_without_selection_creates_and_selects() {
    let mut state = NotesState::default();
    state.save("Groceries", "- eggs", at(0)).unwrap();
    assert_eq!(state.notes.len(), 1);
    assert_eq!(state.selected_note().map(|n| n.title.as_str()), Some("Groceries"));
}

#[test]
fn save_with_selection_edits_in_place() {
    let mut state = NotesState::default();
    state.save("Draft", "v1", at(0)).unwrap();
    state.save("Draft", "v2", at(5)).unwrap();
    assert_eq!(state.notes.len(), 1);
    let note = state.selected_note().unwrap();
    assert_eq!(note.body, "v2");
    assert_eq!(note.updated_at, at(5));
}

#[test]
fn save_rejects_blank_note() {
    let mut state = NotesState::default();
    assert_eq!(state.save("  ", "\n", at(0)), Err(RecordError::EmptyNote));
    assert!(state.notes.is_empty());
}

#[test]
fn pinned_notes_sort_first() {
    let mut state = NotesState::default();
    state.save("old", "", at(0)).unwrap();
    let old_id = state.selected.clone().unwrap();
    state.compose();
    state.save("new", "", at(1)).unwrap();
    assert_eq!(state.notes[0].title, "new");

    state.toggle_pin(&old_id);
    assert_eq!(state.notes[0].title, "old");
}

#[test]
fn remove_clears_selection_of_deleted_note() {
    let mut state = NotesState::default();
    state.save("gone", "", at(0)).unwrap();
    let id = state.selected.clone().unwrap();
    state.remove(&id);
    assert!(state.notes.is_empty());
    assert!(state.selected.is_none());
}

#[test]
fn from_stored_sorts_and_starts_unselected() {
    let mut a = Note::new("a", "", at(0)).unwrap();
    a.pinned = true;
    let b = Note::new("b", "", at(9)).unwrap();
    let state = NotesState::from_stored(Some(vec![b, a]));
    assert_eq!(state.notes[0].title, "a");
    assert!(state.selected.is_none());
    assert!(NotesState::from_stored(None).notes.is_empty());
}
