use tasklist::app::{App, Outcome, SubmitEvent, TaskForm};
use tasklist::error::INCOMPLETE_SUBMISSION;
use tasklist::render::{self, ControlAction, MemorySurface, RenderOptions};
use tasklist::store::TaskStore;
use tasklist::task::TaskId;

fn app() -> App<MemorySurface> {
    App::new(TaskStore::default(), MemorySurface::new(), RenderOptions::default())
}

fn submit(app: &mut App<MemorySurface>, title: &str, due: &str) -> (Outcome, TaskForm) {
    let mut form = TaskForm::new(title, due);
    let mut event = SubmitEvent::new();
    let outcome = app.submit(&mut event, &mut form);
    assert!(event.default_prevented());
    (outcome, form)
}

#[test]
fn add_renders_row_with_complete_control() {
    let mut app = app();
    let (outcome, form) = submit(&mut app, "Buy milk", "2025-01-05");

    assert_eq!(outcome, Outcome::Added(TaskId::new("1")));
    assert_eq!(form, TaskForm::default());

    let tasks = app.store().tasks();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].title, "Buy milk");
    assert_eq!(tasks[0].due_date, "2025-01-05");
    assert!(!tasks[0].completed);

    let rows = app.surface().rows();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].text, "Buy milk (Due: Jan 05, 2025)");
    assert!(rows[0].classes.is_empty());
    assert_eq!(rows[0].controls[0].label, "Complete");
    assert_eq!(rows[0].controls[1].label, "Delete");
}

#[test]
fn toggle_marks_row_completed_with_undo() {
    let mut app = app();
    submit(&mut app, "Buy milk", "2025-01-05");
    let id = TaskId::new("1");

    assert_eq!(app.toggle(&id), Outcome::Toggled(id.clone()));
    assert!(app.store().get(&id).expect("task").completed);

    let row = &app.surface().rows()[0];
    assert!(row.has_class("completed"));
    assert_eq!(row.controls[0].label, "Undo");
}

#[test]
fn incomplete_submission_warns_without_mutating() {
    let mut app = app();
    let redraws = app.surface().redraws();

    let (outcome, form) = submit(&mut app, "", "2025-01-05");
    assert_eq!(outcome, Outcome::Rejected(INCOMPLETE_SUBMISSION.to_string()));
    assert!(app.store().is_empty());
    assert_eq!(app.surface().warnings(), [INCOMPLETE_SUBMISSION.to_string()]);
    assert_eq!(app.surface().redraws(), redraws);
    assert_eq!(form.due_date, "2025-01-05");

    let (outcome, _) = submit(&mut app, "Buy milk", "");
    assert!(matches!(outcome, Outcome::Rejected(_)));
    assert!(app.store().is_empty());
    assert_eq!(app.surface().warnings().len(), 2);
}

#[test]
fn delete_only_task_leaves_no_rows() {
    let mut app = app();
    submit(&mut app, "Buy milk", "2025-01-05");
    let id = TaskId::new("1");

    assert_eq!(app.delete(&id), Outcome::Deleted(id));
    assert!(app.store().is_empty());
    assert!(app.surface().rows().is_empty());
}

#[test]
fn every_handler_redraws_even_for_missing_ids() {
    let mut app = app();
    submit(&mut app, "a", "2025-01-01");
    let before = app.surface().redraws();
    let missing = TaskId::new("42");

    assert_eq!(app.toggle(&missing), Outcome::Unchanged);
    assert_eq!(app.delete(&missing), Outcome::Unchanged);
    assert_eq!(app.surface().redraws(), before + 2);
    assert_eq!(app.surface().rows().len(), 1);
}

#[test]
fn row_controls_dispatch_to_their_task() {
    let mut app = app();
    submit(&mut app, "a", "2025-01-01");
    submit(&mut app, "b", "2025-01-02");

    let toggle = app.surface().rows()[1].controls[0].action.clone();
    assert_eq!(toggle, ControlAction::Toggle(TaskId::new("2")));
    app.activate(&toggle);
    assert!(app.surface().rows()[1].has_class("completed"));
    assert!(!app.surface().rows()[0].has_class("completed"));

    let delete = app.surface().rows()[0].controls[1].action.clone();
    app.activate(&delete);
    let remaining: Vec<&str> = app.store().tasks().iter().map(|t| t.title.as_str()).collect();
    assert_eq!(remaining, vec!["b"]);
}

#[test]
fn surface_matches_store_after_each_step() {
    let mut app = app();
    let check = |app: &App<MemorySurface>| {
        let expected = render::render(app.store().tasks(), app.options());
        assert_eq!(app.surface().rows(), expected.as_slice());
    };

    submit(&mut app, "a", "2025-01-01");
    check(&app);
    submit(&mut app, "b", "2025-02-01");
    check(&app);
    app.toggle(&TaskId::new("1"));
    check(&app);
    app.delete(&TaskId::new("2"));
    check(&app);
}

#[test]
fn rendering_is_idempotent() {
    let mut app = app();
    submit(&mut app, "a", "2025-01-01");
    submit(&mut app, "b", "not a date");
    app.toggle(&TaskId::new("2"));

    let first = app.surface().rows().to_vec();
    app.redraw();
    assert_eq!(app.surface().rows(), first.as_slice());
    assert_eq!(
        render::render(app.store().tasks(), app.options()),
        render::render(app.store().tasks(), app.options())
    );
}

#[test]
fn custom_display_options_flow_into_rows() {
    let options = RenderOptions {
        date_format: "%Y/%m/%d".to_string(),
        completed_class: "done".to_string(),
        invalid_date: "?".to_string(),
    };
    let mut app = App::new(TaskStore::default(), MemorySurface::new(), options);
    submit(&mut app, "a", "2025-01-05");
    submit(&mut app, "b", "soon");
    app.toggle(&TaskId::new("1"));

    let lines = app.surface().lines();
    assert_eq!(lines[0], "a (Due: 2025/01/05) [Undo] [Delete]");
    assert_eq!(lines[1], "b (Due: ?) [Complete] [Delete]");
    assert!(app.surface().rows()[0].has_class("done"));
}
