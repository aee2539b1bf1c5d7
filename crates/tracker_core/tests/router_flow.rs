use tracker_core::{
    Container, EventOutcome, FormData, Page, Project, Route, Router, RouterError, Storage, User,
    ViewEvent,
};

#[test]
fn startup_renders_default_route_and_marks_nav() {
    let mut router = Router::new(Storage::in_memory());
    let mut page = Page::new();

    assert_eq!(router.start("", &mut page).unwrap(), Route::Projects);
    assert_eq!(router.current(), Some(Route::Projects));
    assert_eq!(page.active_nav(), Some(Route::Projects));
    assert!(page.content_html().contains("v-projects"));
}

#[test]
fn fragments_select_views_case_insensitively() {
    let mut router = Router::new(Storage::in_memory());
    let mut page = Page::new();

    assert_eq!(router.navigate("#USERS", &mut page).unwrap(), Route::Users);
    assert!(page.content_html().contains("v-users"));

    assert_eq!(router.navigate("#Tasks", &mut page).unwrap(), Route::Tasks);
    assert!(page.content_html().contains("v-tasks"));

    assert_eq!(router.navigate("#nope", &mut page).unwrap(), Route::Projects);
    assert_eq!(page.active_nav(), Some(Route::Projects));
}

#[test]
fn navigation_unmounts_previous_view() {
    use tracker_core::View;

    let mut router = Router::new(Storage::in_memory());
    let mut page = Page::new();

    router.navigate("#users", &mut page).unwrap();
    assert!(router.users().is_mounted());

    router.navigate("#projects", &mut page).unwrap();
    assert!(!router.users().is_mounted());
    assert!(router.projects().is_mounted());
    assert!(!page.content_html().contains("v-users"));
}

#[test]
fn missing_container_aborts_without_touching_active_view() {
    use tracker_core::View;

    let mut router = Router::new(Storage::in_memory());
    let mut page = Page::new();
    router.navigate("#users", &mut page).unwrap();

    let container = page.detach_content().unwrap();
    let err = router.navigate("#tasks", &mut page).unwrap_err();
    assert_eq!(err, RouterError::MissingContainer);
    assert_eq!(router.current(), Some(Route::Users));
    assert!(router.users().is_mounted());
    assert!(!router.tasks().is_mounted());

    page.attach_content(container);
    assert_eq!(router.navigate("#tasks", &mut page).unwrap(), Route::Tasks);
}

#[test]
fn events_reach_only_the_active_view() {
    let storage = Storage::in_memory();
    let mut router = Router::new(storage.clone());
    let mut page = Page::new();

    let before_start = router
        .dispatch(ViewEvent::Search("x".to_string()), &mut page)
        .unwrap();
    assert_eq!(before_start, EventOutcome::Ignored);

    router.navigate("#tasks", &mut page).unwrap();
    router
        .dispatch(
            ViewEvent::Submit(FormData::from_pairs([("title", "Routed")])),
            &mut page,
        )
        .unwrap();

    let tasks: Vec<tracker_core::Task> = storage.get("tasks", Vec::new());
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].title, "Routed");
}

#[test]
fn deleting_a_user_leaves_project_owner_dangling() {
    let storage = Storage::in_memory();
    let mut router = Router::new(storage.clone());
    let mut page = Page::new();

    router.navigate("#users", &mut page).unwrap();
    let owner = router.users().records().unwrap()[0].clone();

    router.navigate("#projects", &mut page).unwrap();
    let project_id = router.projects().records().unwrap()[0].id.clone();
    router
        .dispatch(ViewEvent::Edit(project_id.clone()), &mut page)
        .unwrap();
    router
        .dispatch(
            ViewEvent::EditInput {
                field: "ownerUserId".to_string(),
                value: owner.id.to_string(),
            },
            &mut page,
        )
        .unwrap();
    router.dispatch(ViewEvent::Save, &mut page).unwrap();
    assert!(page
        .content_html()
        .contains(&format!("<span class=\"project-owner\">{}</span>", owner.name)));

    router.navigate("#users", &mut page).unwrap();
    page.reply_next(true);
    router
        .dispatch(ViewEvent::Delete(owner.id.clone()), &mut page)
        .unwrap();
    let users: Vec<User> = storage.get("users", Vec::new());
    assert!(users.iter().all(|user| user.id != owner.id));

    router.navigate("#projects", &mut page).unwrap();
    assert!(page
        .content_html()
        .contains("<span class=\"project-owner\">Unassigned</span>"));
    let projects: Vec<Project> = storage.get("projects", Vec::new());
    let project = projects
        .iter()
        .find(|project| project.id == project_id)
        .unwrap();
    assert_eq!(project.owner_user_id.as_ref(), Some(&owner.id));
}

#[test]
fn renavigating_to_same_route_reloads_from_storage() {
    let storage = Storage::in_memory();
    let mut router = Router::new(storage.clone());
    let mut page = Page::new();
    router.navigate("#tasks", &mut page).unwrap();

    storage
        .set(
            "tasks",
            &[tracker_core::Task {
                id: "T1".into(),
                title: "Written elsewhere".to_string(),
                done: false,
            }],
        )
        .unwrap();
    router.navigate("#tasks", &mut page).unwrap();

    assert!(page.content_html().contains("Written elsewhere"));
    let container: &Container = page.container().unwrap();
    assert!(container.render_count() >= 2);
}
