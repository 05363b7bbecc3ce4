use super::*;
use chrono::TimeZone;

fn at(h: u32, m: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 14, h, m, 0).unwrap()
}

fn mission(title: &str) -> Mission {
    Mission::from_draft(MissionDraft { title: title.to_owned(), ..MissionDraft::default() }, at(8, 0))
}

// =============================================================
// Drafts
// =============================================================

#[test]
fn draft_validate_trims_title_and_notes() {
    let draft = MissionDraft {
        title: "  ship release  ".to_owned(),
        notes: Some("   ".to_owned()),
        ..MissionDraft::default()
    }
    .validate()
    .unwrap();
    assert_eq!(draft.title, "ship release");
    assert_eq!(draft.notes, None);
}

#[test]
fn draft_validate_rejects_blank_title() {
    let err = MissionDraft { title: "   ".to_owned(), ..MissionDraft::default() }
        .validate()
        .unwrap_err();
    assert_eq!(err, RecordError::EmptyTitle);
}

#[test]
fn draft_validate_rejects_long_title() {
    let err = MissionDraft { title: "x".repeat(MAX_TITLE_CHARS + 1), ..MissionDraft::default() }
        .validate()
        .unwrap_err();
    assert_eq!(err, RecordError::TitleTooLong { max: MAX_TITLE_CHARS });
}

#[test]
fn from_draft_starts_open_and_unreminded() {
    let m = mission("water plants");
    assert!(!m.completed);
    assert!(!m.reminded);
    assert_eq!(m.priority, Priority::Medium);
    assert!(uuid::Uuid::parse_str(&m.id).is_ok());
}

// =============================================================
// Toggle / patch
// =============================================================

#[test]
fn toggle_flips_completed_flag() {
    let mut m = mission("a");
    m.toggle();
    assert!(m.completed);
    m.toggle();
    assert!(!m.completed);
}

#[test]
fn apply_changing_reminder_rearms() {
    let mut m = mission("a");
    m.reminder_at = Some(at(9, 0));
    m.reminded = true;
    m.apply(MissionPatch { reminder_at: Some(Some(at(10, 0))), ..MissionPatch::default() });
    assert_eq!(m.reminder_at, Some(at(10, 0)));
    assert!(!m.reminded);
}

#[test]
fn apply_same_reminder_keeps_reminded() {
    let mut m = mission("a");
    m.reminder_at = Some(at(9, 0));
    m.reminded = true;
    m.apply(MissionPatch { reminder_at: Some(Some(at(9, 0))), ..MissionPatch::default() });
    assert!(m.reminded);
}

#[test]
fn apply_can_clear_deadline() {
    let mut m = mission("a");
    m.deadline = Some(at(12, 0));
    m.apply(MissionPatch { deadline: Some(None), ..MissionPatch::default() });
    assert_eq!(m.deadline, None);
}

#[test]
fn patch_null_deadline_deserializes_as_clear() {
    let patch: MissionPatch = serde_json::from_str(r#"{"deadline": null}"#).unwrap();
    assert_eq!(patch.deadline, Some(None));
    let absent: MissionPatch = serde_json::from_str("{}").unwrap();
    assert_eq!(absent.deadline, None);
    assert!(absent.is_empty());
}

#[test]
fn patch_serializes_only_present_fields() {
    let json = serde_json::to_value(MissionPatch::completed(true)).unwrap();
    assert_eq!(json, serde_json::json!({ "completed": true }));
}

#[test]
fn patch_validate_rejects_blank_title() {
    let err = MissionPatch { title: Some(" ".to_owned()), ..MissionPatch::default() }
        .validate()
        .unwrap_err();
    assert_eq!(err, RecordError::EmptyTitle);
}

#[test]
fn resolve_against_clears_reminded_only_on_change() {
    let mut fired = mission("Call mom");
    fired.reminder_at = Some(at(9, 0));
    fired.reminded = true;

    let moved = MissionPatch { reminder_at: Some(Some(at(10, 0))), ..MissionPatch::default() };
    assert_eq!(moved.resolve_against(&fired).reminded, Some(false));

    let same = MissionPatch { reminder_at: Some(Some(at(9, 0))), ..MissionPatch::default() };
    assert_eq!(same.resolve_against(&fired).reminded, None);
}

#[test]
fn resolve_against_keeps_explicit_reminded() {
    let current = mission("x");
    let patch = MissionPatch { reminder_at: Some(Some(at(9, 0))), reminded: Some(true), ..MissionPatch::default() };
    assert!(!patch.touches_reminder());
    assert_eq!(patch.resolve_against(&current).reminded, Some(true));
}

// =============================================================
// Ordering
// =============================================================

#[test]
fn sort_puts_open_high_priority_first() {
    let mut done = mission("done");
    done.priority = Priority::High;
    done.completed = true;
    let mut low = mission("low");
    low.priority = Priority::Low;
    let mut high = mission("high");
    high.priority = Priority::High;

    let mut list = vec![done, low, high];
    sort_missions(&mut list);
    let titles: Vec<_> = list.iter().map(|m| m.title.as_str()).collect();
    assert_eq!(titles, ["high", "low", "done"]);
}

#[test]
fn sort_orders_deadlines_before_undated() {
    let undated = mission("undated");
    let mut late = mission("late");
    late.deadline = Some(at(18, 0));
    let mut early = mission("early");
    early.deadline = Some(at(9, 0));

    let mut list = vec![undated, late, early];
    sort_missions(&mut list);
    let titles: Vec<_> = list.iter().map(|m| m.title.as_str()).collect();
    assert_eq!(titles, ["early", "late", "undated"]);
}

#[test]
fn overdue_requires_open_and_past_deadline() {
    let mut m = mission("a");
    m.deadline = Some(at(9, 0));
    assert!(m.is_overdue(at(10, 0)));
    assert!(!m.is_overdue(at(8, 30)));
    m.completed = true;
    assert!(!m.is_overdue(at(10, 0)));
}

// =============================================================
// Reminders
// =============================================================

#[test]
fn due_reminders_fires_on_or_after_reminder_time() {
    let mut a = mission("a");
    a.reminder_at = Some(at(9, 0));
    let mut b = mission("b");
    b.reminder_at = Some(at(9, 30));

    let list = vec![a, b];
    assert!(due_reminders(&list, at(8, 59)).is_empty());
    let due = due_reminders(&list, at(9, 0));
    assert_eq!(due.len(), 1);
    assert_eq!(due[0].title, "a");
    assert_eq!(due_reminders(&list, at(10, 0)).len(), 2);
}

#[test]
fn due_reminders_skips_completed_and_already_reminded() {
    let mut done = mission("done");
    done.reminder_at = Some(at(9, 0));
    done.completed = true;
    let mut fired = mission("fired");
    fired.reminder_at = Some(at(9, 0));
    fired.reminded = true;
    let unset = mission("unset");

    assert!(due_reminders(&[done, fired, unset], at(12, 0)).is_empty());
}

#[test]
fn due_reminders_preserves_array_order() {
    let mut later = mission("later");
    later.reminder_at = Some(at(9, 30));
    let mut earlier = mission("earlier");
    earlier.reminder_at = Some(at(9, 0));

    let due = due_reminders(&[later, earlier], at(10, 0));
    let titles: Vec<_> = due.iter().map(|a| a.title.as_str()).collect();
    assert_eq!(titles, ["later", "earlier"]);
}

#[test]
fn reminder_body_formats_deadline_in_offset() {
    let alert = ReminderAlert { mission_id: "1".into(), title: "t".into(), deadline: Some(at(9, 5)) };
    let plus_two = FixedOffset::east_opt(2 * 3600).unwrap();
    assert_eq!(alert.body(plus_two), "Due Sat Mar 14, 11:05");

    let undated = ReminderAlert { deadline: None, ..alert };
    assert_eq!(undated.body(plus_two), "Mission reminder");
}

#[test]
fn priority_parse_accepts_wire_names() {
    assert_eq!(Priority::parse(" HIGH "), Some(Priority::High));
    assert_eq!(Priority::parse("urgent"), None);
    for p in Priority::ALL {
        assert_eq!(Priority::parse(p.as_str()), Some(p));
    }
}
