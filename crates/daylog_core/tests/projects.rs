use daylog_core::{
    DayKey, DayProject, DayProjectRepository, DaylogContext, FixedClock, ProjectRecord,
    ProjectRepository, SqliteDayProjectRepository, SqliteProjectRepository,
};
use std::sync::Arc;
use uuid::Uuid;

fn day(value: &str) -> DayKey {
    DayKey::parse(value).unwrap()
}

fn setup() -> (DaylogContext, Arc<FixedClock>) {
    let clock = Arc::new(FixedClock::new(1_000));
    let ctx = DaylogContext::in_memory()
        .unwrap()
        .with_clock(clock.clone());
    (ctx, clock)
}

#[test]
fn add_trims_name_and_starts_open() {
    let (ctx, _clock) = setup();
    let service = ctx.projects().unwrap();

    let id = service.add("  Garden shed  ").unwrap();
    let all = service.get_all().unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].id, id);
    assert_eq!(all[0].name, "Garden shed");
    assert!(!all[0].done);
    assert_eq!(all[0].created_at, 1_000);
    assert_eq!(all[0].completed_at, None);
}

#[test]
fn get_all_orders_by_created_at_with_defaults_first() {
    let (ctx, clock) = setup();
    let service = ctx.projects().unwrap();

    clock.set(500);
    let later = service.add("later").unwrap();
    clock.set(100);
    let earlier = service.add("earlier").unwrap();

    let repo = SqliteProjectRepository::try_new(ctx.connection()).unwrap();
    let legacy = ProjectRecord {
        id: Uuid::new_v4(),
        day: None,
        name: "legacy".to_string(),
        done: None,
        created_at: None,
        completed_at: None,
    };
    repo.insert_project(&legacy).unwrap();

    let all = service.get_all().unwrap();
    let ids: Vec<_> = all.iter().map(|project| project.id).collect();
    assert_eq!(ids, vec![legacy.id, earlier, later]);
    assert_eq!(all[0].created_at, 0);
    assert!(!all[0].done);
}

#[test]
fn set_done_keeps_first_completion_and_clears_on_undo() {
    let (ctx, clock) = setup();
    let service = ctx.projects().unwrap();
    let id = service.add("launch").unwrap();

    clock.set(2_000);
    service.set_done(id, true).unwrap();
    clock.set(3_000);
    service.set_done(id, true).unwrap();
    let project = service.get_all().unwrap().remove(0);
    assert!(project.done);
    assert_eq!(project.completed_at, Some(2_000));

    service.set_done(id, false).unwrap();
    let project = service.get_all().unwrap().remove(0);
    assert!(!project.done);
    assert_eq!(project.completed_at, None);

    clock.set(4_000);
    service.set_done(id, true).unwrap();
    let project = service.get_all().unwrap().remove(0);
    assert_eq!(project.completed_at, Some(4_000));
}

#[test]
fn set_done_on_unknown_project_is_a_no_op() {
    let (ctx, _clock) = setup();
    let service = ctx.projects().unwrap();
    service.set_done(Uuid::new_v4(), true).unwrap();
    assert!(service.get_all().unwrap().is_empty());
}

#[test]
fn completed_range_counts_are_inclusive() {
    let (ctx, clock) = setup();
    let service = ctx.projects().unwrap();

    for (name, at) in [("a", 100), ("b", 200), ("c", 300)] {
        let id = service.add(name).unwrap();
        clock.set(at);
        service.set_done(id, true).unwrap();
    }
    service.add("open").unwrap();

    assert_eq!(service.get_completed_in_time_range(100, 300).unwrap(), 3);
    assert_eq!(service.get_completed_in_time_range(101, 299).unwrap(), 1);
    assert_eq!(service.get_completed_in_time_range(200, 200).unwrap(), 1);
    assert_eq!(service.get_completed_in_time_range(400, 900).unwrap(), 0);
}

#[test]
fn day_project_set_renames_existing_project_of_the_day() {
    let (ctx, clock) = setup();
    let service = ctx.projects().unwrap();
    let today = day("2024-11-09");

    let first = service.set(&today, "draft").unwrap();
    clock.set(5_000);
    let second = service.set(&today, "final").unwrap();
    assert_eq!(first, second);

    let project = service.get_by_day(&today).unwrap().unwrap();
    assert_eq!(project.id, first);
    assert_eq!(project.name.as_deref(), Some("final"));
    assert_eq!(project.created_at, Some(5_000));
}

#[test]
fn day_project_falls_back_to_latest_inserted() {
    let (ctx, clock) = setup();
    let service = ctx.projects().unwrap();

    assert!(service.get_by_day(&day("2024-11-09")).unwrap().is_none());

    service.set(&day("2024-11-01"), "older").unwrap();
    clock.advance(10);
    let newest = service.set(&day("2024-11-05"), "newer").unwrap();

    let fallback = service.get_by_day(&day("2024-11-09")).unwrap().unwrap();
    assert_eq!(fallback.id, newest);
    assert_eq!(fallback.day.unwrap().as_str(), "2024-11-05");
}

#[test]
fn day_project_prefers_newest_created_at_within_a_day() {
    let (ctx, _clock) = setup();
    let repo = SqliteDayProjectRepository::try_new(ctx.connection()).unwrap();
    let today = day("2024-11-09");
    for (name, created_at) in [("newer", 500), ("older", 100)] {
        repo.insert_day_project(&DayProject {
            id: Uuid::new_v4(),
            day: Some(today.clone()),
            name: Some(name.to_string()),
            created_at: Some(created_at),
        })
        .unwrap();
    }

    let service = ctx.projects().unwrap();
    let picked = service.get_by_day(&today).unwrap().unwrap();
    assert_eq!(picked.name.as_deref(), Some("newer"));

    let fallback = service.get_by_day(&day("2024-11-10")).unwrap().unwrap();
    assert_eq!(fallback.name.as_deref(), Some("older"));
}
