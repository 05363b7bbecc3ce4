use super::*;
use chrono::TimeZone;

fn at(min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 5, 1, 12, min, 0).unwrap()
}

#[test]
fn new_rejects_fully_blank_note() {
    assert_eq!(Note::new("  ", "\n  \n", at(0)).unwrap_err(), RecordError::EmptyNote);
}

#[test]
fn new_accepts_body_only() {
    let note = Note::new("", "groceries: eggs", at(0)).unwrap();
    assert_eq!(note.title, "");
    assert_eq!(note.heading(), "groceries: eggs");
}

#[test]
fn edit_bumps_updated_at_and_keeps_body_verbatim() {
    let mut note = Note::new("Plan", "a", at(0)).unwrap();
    note.edit(" Plan v2 ", "  indented\n", at(5)).unwrap();
    assert_eq!(note.title, "Plan v2");
    assert_eq!(note.body, "  indented\n");
    assert_eq!(note.updated_at, at(5));
}

#[test]
fn failed_edit_leaves_note_unchanged() {
    let mut note = Note::new("Plan", "a", at(0)).unwrap();
    assert!(note.edit("", "", at(9)).is_err());
    assert_eq!(note.title, "Plan");
    assert_eq!(note.updated_at, at(0));
}

#[test]
fn preview_skips_blank_lines_and_heading_marks() {
    let note = Note::new("t", "\n\n## Weekly review\nmore", at(0)).unwrap();
    assert_eq!(note.preview(80), "Weekly review");
}

#[test]
fn preview_truncates_on_char_boundary() {
    let note = Note::new("t", "héllo wörld", at(0)).unwrap();
    assert_eq!(note.preview(4), "héll…");
}

#[test]
fn sort_notes_pinned_then_recent() {
    let old = Note::new("old", "", at(0)).unwrap();
    let new = Note::new("new", "", at(10)).unwrap();
    let mut pinned = Note::new("pinned", "", at(1)).unwrap();
    pinned.pinned = true;

    let mut list = vec![old, new, pinned];
    sort_notes(&mut list);
    let titles: Vec<_> = list.iter().map(|n| n.title.as_str()).collect();
    assert_eq!(titles, ["pinned", "new", "old"]);
}
