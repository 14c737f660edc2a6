use chrono::{Local, TimeZone};
use daylog_core::{
    BlockEdit, DayKey, DaylogContext, EntryType, FixedClock, HistoryRange, RepoError, TypeTally,
};
use std::sync::Arc;

fn day(value: &str) -> DayKey {
    DayKey::parse(value).unwrap()
}

#[test]
fn set_entry_twice_keeps_one_row_with_latest_values() {
    let ctx = DaylogContext::in_memory().unwrap();
    let service = ctx.entries().unwrap();
    let today = day("2024-11-09");

    let first = service
        .set_entry(&today, "block-10", 10, "emails", EntryType::Noise)
        .unwrap();
    let second = service
        .set_entry(&today, "block-10", 10, "write report", EntryType::Signal)
        .unwrap();
    assert_eq!(first, second);

    let entries = service.get_day(&today).unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].id, first);
    assert_eq!(entries[0].task, "write report");
    assert_eq!(entries[0].kind, EntryType::Signal);
}

#[test]
fn same_block_on_different_days_are_separate_entries() {
    let ctx = DaylogContext::in_memory().unwrap();
    let service = ctx.entries().unwrap();

    let a = service
        .set_entry(&day("2024-11-09"), "block-10", 10, "a", EntryType::Signal)
        .unwrap();
    let b = service
        .set_entry(&day("2024-11-10"), "block-10", 10, "b", EntryType::Signal)
        .unwrap();
    assert_ne!(a, b);
}

#[test]
fn get_day_orders_by_start_hour() {
    let ctx = DaylogContext::in_memory().unwrap();
    let service = ctx.entries().unwrap();
    let today = day("2024-11-09");

    for hour in [15_u8, 3, 10] {
        service
            .set_entry(&today, &format!("block-{hour}"), hour, "", EntryType::Sleep)
            .unwrap();
    }

    let hours: Vec<u8> = service
        .get_day(&today)
        .unwrap()
        .iter()
        .map(|entry| entry.start_hour)
        .collect();
    assert_eq!(hours, vec![3, 10, 15]);
}

#[test]
fn get_range_is_inclusive_and_lexicographic() {
    let ctx = DaylogContext::in_memory().unwrap();
    let service = ctx.entries().unwrap();

    for key in ["2024-10-31", "2024-11-01", "2024-11-09", "2024-11-30", "2024-12-01"] {
        service
            .set_entry(&day(key), "block-10", 10, key, EntryType::Signal)
            .unwrap();
    }

    let days: Vec<String> = service
        .get_range(&day("2024-11-01"), &day("2024-11-30"))
        .unwrap()
        .into_iter()
        .map(|entry| entry.day.to_string())
        .collect();
    assert_eq!(days, vec!["2024-11-01", "2024-11-09", "2024-11-30"]);
}

#[test]
fn start_hour_outside_day_is_rejected() {
    let ctx = DaylogContext::in_memory().unwrap();
    let service = ctx.entries().unwrap();

    let err = service
        .set_entry(&day("2024-11-09"), "block-24", 24, "", EntryType::Sleep)
        .unwrap_err();
    assert!(matches!(err, RepoError::InvalidInput(_)));
    assert!(service.get_day(&day("2024-11-09")).unwrap().is_empty());
}

#[test]
fn day_view_fills_every_block_from_configured_start() {
    let ctx = DaylogContext::in_memory().unwrap().with_day_start_hour(6);
    let service = ctx.entries().unwrap();
    let today = day("2024-11-09");

    let id = service
        .set_entry(&today, "block-8", 8, "gym", EntryType::Signal)
        .unwrap();

    let view = service.day_view(&today).unwrap();
    assert_eq!(view.len(), 24);
    assert_eq!(view[0].block.id, "block-6");
    assert_eq!(view[2].entry_id, Some(id));
    assert_eq!(view[2].task, "gym");
    assert_eq!(view[3].kind, EntryType::Sleep);
    assert!(view[3].task.is_empty());
}

#[test]
fn save_blocks_upserts_known_blocks_and_skips_unknown() {
    let ctx = DaylogContext::in_memory().unwrap();
    let service = ctx.entries().unwrap();
    let today = day("2024-11-09");

    let edits = vec![
        BlockEdit {
            block_id: "block-11".to_string(),
            task: "planning".to_string(),
            kind: EntryType::Signal,
        },
        BlockEdit {
            block_id: "block-99".to_string(),
            task: "nowhere".to_string(),
            kind: EntryType::Noise,
        },
        BlockEdit {
            block_id: "block-2".to_string(),
            task: String::new(),
            kind: EntryType::Sleep,
        },
    ];
    let saved = service.save_blocks(&today, &edits).unwrap();
    assert_eq!(saved.len(), 2);

    let entries = service.get_day(&today).unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].block_id, "block-2");
    assert_eq!(entries[0].start_hour, 2);
    assert_eq!(entries[1].block_id, "block-11");
    assert_eq!(entries[1].start_hour, 11);
}

#[test]
fn history_tallies_hours_in_range() {
    let ctx = DaylogContext::in_memory().unwrap();
    let entries = ctx.entries().unwrap();
    let today = day("2024-11-09");

    entries
        .set_entry(&today, "block-10", 10, "focus", EntryType::Signal)
        .unwrap();
    entries
        .set_entry(&today.shift_days(-3), "block-11", 11, "scroll", EntryType::Noise)
        .unwrap();
    entries
        .set_entry(&today.shift_days(-7), "block-1", 1, "", EntryType::Sleep)
        .unwrap();
    entries
        .set_entry(&today.shift_days(-8), "block-12", 12, "old", EntryType::Signal)
        .unwrap();

    let history = ctx
        .history()
        .unwrap()
        .load_until(HistoryRange::Week, &today)
        .unwrap();
    assert_eq!(history.start.as_str(), "2024-11-02");
    assert_eq!(history.end.as_str(), "2024-11-09");
    assert_eq!(history.entries.len(), 3);
    assert_eq!(
        history.hours,
        TypeTally {
            signal: 1,
            noise: 1,
            sleep: 1,
        }
    );
}

#[test]
fn history_load_ends_on_the_clock_day() {
    let noon = Local
        .with_ymd_and_hms(2024, 11, 9, 12, 0, 0)
        .unwrap()
        .timestamp_millis();
    let ctx = DaylogContext::in_memory()
        .unwrap()
        .with_clock(Arc::new(FixedClock::new(noon)));
    let entries = ctx.entries().unwrap();
    entries
        .set_entry(&day("2024-11-05"), "block-9", 9, "deep work", EntryType::Signal)
        .unwrap();
    entries
        .set_entry(&day("2024-10-01"), "block-9", 9, "too old", EntryType::Signal)
        .unwrap();

    let history = ctx.history().unwrap().load(HistoryRange::Month).unwrap();
    assert_eq!(history.start.as_str(), "2024-10-10");
    assert_eq!(history.end.as_str(), "2024-11-09");
    assert_eq!(history.entries.len(), 1);
    assert_eq!(history.hours.signal, 1);
}

#[test]
fn set_entry_stores_task_text_verbatim() {
    let ctx = DaylogContext::in_memory().unwrap();
    let service = ctx.entries().unwrap();
    let today = day("2024-11-09");

    service
        .set_entry(&today, "block-8", 8, "  stand-up \n notes ", EntryType::Noise)
        .unwrap();
    let stored = service.get_day(&today).unwrap().remove(0);
    assert_eq!(stored.task, "  stand-up \n notes ");
}

#[test]
fn entry_serializes_with_boundary_field_names() {
    let ctx = DaylogContext::in_memory().unwrap();
    let service = ctx.entries().unwrap();
    let today = day("2024-11-09");
    service
        .set_entry(&today, "block-10", 10, "focus", EntryType::Signal)
        .unwrap();

    let entry = &service.get_day(&today).unwrap()[0];
    let json = serde_json::to_value(entry).unwrap();
    assert_eq!(json["blockId"], "block-10");
    assert_eq!(json["startHour"], 10);
    assert_eq!(json["type"], "Signal");
    assert_eq!(json["day"], "2024-11-09");
}
