use daylog_core::{
    DaylogContext, FixedClock, ProjectRepository, ProjectTaskRecord, ProjectTaskRepository,
    SqliteProjectRepository, SqliteProjectTaskRepository,
};
use std::sync::Arc;
use uuid::Uuid;

fn setup() -> (DaylogContext, Arc<FixedClock>) {
    let clock = Arc::new(FixedClock::new(1_000));
    let ctx = DaylogContext::in_memory()
        .unwrap()
        .with_clock(clock.clone());
    (ctx, clock)
}

fn project_state(ctx: &DaylogContext, id: Uuid) -> (bool, Option<i64>) {
    let project = ctx
        .projects()
        .unwrap()
        .get_all()
        .unwrap()
        .into_iter()
        .find(|project| project.id == id)
        .unwrap();
    (project.done, project.completed_at)
}

#[test]
fn project_is_done_only_when_every_task_is_done() {
    let (ctx, clock) = setup();
    let project = ctx.projects().unwrap().add("move house").unwrap();
    let service = ctx.project_tasks().unwrap();

    let pack = service.add(project, "pack boxes").unwrap();
    let van = service.add(project, "book van").unwrap();
    assert_eq!(project_state(&ctx, project), (false, None));

    clock.set(2_000);
    service.toggle(pack, true).unwrap();
    assert_eq!(project_state(&ctx, project), (false, None));

    clock.set(3_000);
    service.toggle(van, true).unwrap();
    assert_eq!(project_state(&ctx, project), (true, Some(3_000)));
}

#[test]
fn adding_open_task_reopens_done_project() {
    let (ctx, clock) = setup();
    let project = ctx.projects().unwrap().add("release").unwrap();
    let service = ctx.project_tasks().unwrap();

    let only = service.add(project, "tag").unwrap();
    clock.set(2_000);
    service.toggle(only, true).unwrap();
    assert_eq!(project_state(&ctx, project), (true, Some(2_000)));

    clock.set(3_000);
    service.add(project, "announce").unwrap();
    assert_eq!(project_state(&ctx, project), (false, None));
}

#[test]
fn unticking_a_task_clears_project_completion() {
    let (ctx, clock) = setup();
    let project = ctx.projects().unwrap().add("paint").unwrap();
    let service = ctx.project_tasks().unwrap();

    let only = service.add(project, "buy paint").unwrap();
    clock.set(2_000);
    service.toggle(only, true).unwrap();
    service.toggle(only, false).unwrap();
    assert_eq!(project_state(&ctx, project), (false, None));

    let task = service.get_for_project(project).unwrap().remove(0);
    assert!(!task.done);
    assert_eq!(task.completed_at, None);
}

#[test]
fn task_completion_keeps_first_stamp_until_undone() {
    let (ctx, clock) = setup();
    let project = ctx.projects().unwrap().add("write").unwrap();
    let service = ctx.project_tasks().unwrap();
    let id = service.add(project, "outline").unwrap();

    clock.set(2_000);
    service.toggle(id, true).unwrap();
    clock.set(3_000);
    service.toggle(id, true).unwrap();
    let task = service.get_for_project(project).unwrap().remove(0);
    assert_eq!(task.completed_at, Some(2_000));
    assert_eq!(project_state(&ctx, project), (true, Some(2_000)));

    service.toggle(id, false).unwrap();
    clock.set(4_000);
    service.toggle(id, true).unwrap();
    let task = service.get_for_project(project).unwrap().remove(0);
    assert_eq!(task.completed_at, Some(4_000));
    assert_eq!(project_state(&ctx, project), (true, Some(4_000)));
}

#[test]
fn get_for_project_orders_by_created_at_and_trims_text() {
    let (ctx, clock) = setup();
    let project = ctx.projects().unwrap().add("trip").unwrap();
    let other = ctx.projects().unwrap().add("other").unwrap();
    let service = ctx.project_tasks().unwrap();

    clock.set(300);
    let third = service.add(project, "  pack  ").unwrap();
    clock.set(100);
    let first = service.add(project, "book flights").unwrap();
    clock.set(200);
    let second = service.add(project, "book hotel").unwrap();
    service.add(other, "unrelated").unwrap();

    let tasks = service.get_for_project(project).unwrap();
    let ids: Vec<_> = tasks.iter().map(|task| task.id).collect();
    assert_eq!(ids, vec![first, second, third]);
    assert_eq!(tasks[2].text, "pack");
}

#[test]
fn legacy_rows_get_defaults_on_read() {
    let (ctx, _clock) = setup();
    let project = ctx.projects().unwrap().add("legacy").unwrap();
    let repo = SqliteProjectTaskRepository::try_new(ctx.connection()).unwrap();
    repo.insert_project_task(&ProjectTaskRecord {
        id: Uuid::new_v4(),
        project_id: project,
        text: "imported".to_string(),
        done: None,
        created_at: None,
        completed_at: None,
    })
    .unwrap();

    let tasks = ctx
        .project_tasks()
        .unwrap()
        .get_for_project(project)
        .unwrap();
    assert_eq!(tasks.len(), 1);
    assert!(!tasks[0].done);
    assert_eq!(tasks[0].created_at, 0);
}

#[test]
fn recompute_is_idempotent_and_tolerates_missing_project() {
    let (ctx, clock) = setup();
    let project = ctx.projects().unwrap().add("tidy").unwrap();
    let service = ctx.project_tasks().unwrap();
    let id = service.add(project, "desk").unwrap();
    clock.set(2_000);
    service.toggle(id, true).unwrap();

    clock.set(9_000);
    assert_eq!(service.recompute_project_done(project).unwrap(), Some(true));
    assert_eq!(service.recompute_project_done(project).unwrap(), Some(true));
    assert_eq!(project_state(&ctx, project), (true, Some(2_000)));

    let orphan_parent = Uuid::new_v4();
    let orphan = service.add(orphan_parent, "floating").unwrap();
    service.toggle(orphan, true).unwrap();
    assert_eq!(service.recompute_project_done(orphan_parent).unwrap(), None);
    let projects = SqliteProjectRepository::try_new(ctx.connection()).unwrap();
    assert!(projects.get_project(orphan_parent).unwrap().is_none());
}

#[test]
fn empty_project_is_not_done() {
    let (ctx, _clock) = setup();
    let project = ctx.projects().unwrap().add("empty").unwrap();
    let service = ctx.project_tasks().unwrap();
    assert_eq!(service.recompute_project_done(project).unwrap(), Some(false));
    assert_eq!(project_state(&ctx, project), (false, None));
}

#[test]
fn toggle_unknown_task_is_a_no_op() {
    let (ctx, _clock) = setup();
    ctx.project_tasks()
        .unwrap()
        .toggle(Uuid::new_v4(), true)
        .unwrap();
}

#[test]
fn completed_range_counts_are_inclusive() {
    let (ctx, clock) = setup();
    let project = ctx.projects().unwrap().add("count").unwrap();
    let service = ctx.project_tasks().unwrap();

    for at in [100, 200, 300] {
        let id = service.add(project, "step").unwrap();
        clock.set(at);
        service.toggle(id, true).unwrap();
    }

    assert_eq!(service.get_completed_in_time_range(100, 300).unwrap(), 3);
    assert_eq!(service.get_completed_in_time_range(300, 1_000).unwrap(), 1);
    assert_eq!(service.get_completed_in_time_range(0, 99).unwrap(), 0);
}
