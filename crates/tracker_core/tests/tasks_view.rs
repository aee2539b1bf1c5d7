use tracker_core::{
    EventOutcome, FormData, NoticeKind, Page, Storage, Task, TasksView, ValidationError, View,
    ViewEvent,
};

fn mounted() -> (TasksView, Page, Storage) {
    let storage = Storage::in_memory();
    let mut view = TasksView::new(storage.clone());
    let mut page = Page::new();
    view.mount(&mut page).unwrap();
    (view, page, storage)
}

fn add(view: &mut TasksView, page: &mut Page, title: &str) -> EventOutcome {
    view.handle(
        ViewEvent::Submit(FormData::from_pairs([("title", title)])),
        page,
    )
    .unwrap()
}

fn stored(storage: &Storage) -> Vec<Task> {
    storage.get("tasks", Vec::new())
}

#[test]
fn starts_empty_with_placeholder() {
    let (view, page, storage) = mounted();

    assert!(view.records().unwrap().is_empty());
    assert!(stored(&storage).is_empty());
    assert!(page.content_html().contains("No tasks yet"));
}

#[test]
fn add_trims_title_and_defaults_to_not_done() {
    let (mut view, mut page, storage) = mounted();

    assert_eq!(
        add(&mut view, &mut page, "  Write release notes "),
        EventOutcome::Mutated { persisted: true }
    );

    let tasks = stored(&storage);
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].title, "Write release notes");
    assert!(!tasks[0].done);
    assert!(!page.content_html().contains("No tasks yet"));
}

#[test]
fn blank_title_shows_error_notice() {
    let (mut view, mut page, storage) = mounted();

    assert_eq!(
        add(&mut view, &mut page, "   "),
        EventOutcome::Rejected(ValidationError::EmptyField("title"))
    );
    assert!(stored(&storage).is_empty());
    assert_eq!(page.notice_board().last().unwrap().kind, NoticeKind::Error);
}

#[test]
fn toggle_persists_done_flag() {
    let (mut view, mut page, storage) = mounted();
    add(&mut view, &mut page, "Ship it");
    let id = view.records().unwrap()[0].id.clone();

    let outcome = view
        .handle(
            ViewEvent::Toggle {
                id: id.clone(),
                done: true,
            },
            &mut page,
        )
        .unwrap();
    assert_eq!(outcome, EventOutcome::Mutated { persisted: true });
    assert!(stored(&storage)[0].done);
    assert!(page.content_html().contains("checked"));

    let unchanged = view
        .handle(ViewEvent::Toggle { id, done: true }, &mut page)
        .unwrap();
    assert_eq!(unchanged, EventOutcome::Ignored);
}

#[test]
fn search_filters_by_title() {
    let (mut view, mut page, _storage) = mounted();
    add(&mut view, &mut page, "Buy milk");
    add(&mut view, &mut page, "Fix bug");

    view.handle(ViewEvent::Search("MILK".to_string()), &mut page)
        .unwrap();
    let html = page.content_html();
    assert!(html.contains("Buy milk"));
    assert!(!html.contains("Fix bug"));

    view.handle(ViewEvent::Search("zzz".to_string()), &mut page)
        .unwrap();
    assert!(page.content_html().contains("No tasks yet"));
}

#[test]
fn edit_and_delete_follow_the_shared_pattern() {
    let (mut view, mut page, storage) = mounted();
    add(&mut view, &mut page, "Draft");
    add(&mut view, &mut page, "Keep");
    let id = view.records().unwrap()[0].id.clone();

    view.handle(ViewEvent::Edit(id.clone()), &mut page).unwrap();
    view.handle(
        ViewEvent::EditInput {
            field: "title".to_string(),
            value: "Final".to_string(),
        },
        &mut page,
    )
    .unwrap();
    view.handle(ViewEvent::Save, &mut page).unwrap();
    assert_eq!(stored(&storage)[0].title, "Final");

    page.reply_next(true);
    view.handle(ViewEvent::Delete(id), &mut page).unwrap();
    let tasks = stored(&storage);
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].title, "Keep");
    assert_eq!(page.prompts(), ["Are you sure you want to delete this task?"]);
}
