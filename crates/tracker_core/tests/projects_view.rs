use std::rc::Rc;
use tracker_core::html::Element;
use tracker_core::{
    EventOutcome, FormData, Host, MemoryStore, Page, Project, ProjectStatus, ProjectsView, Storage,
    User, View, ViewEvent,
};

fn mounted() -> (ProjectsView, Page, Storage) {
    let storage = Storage::in_memory();
    let mut view = ProjectsView::new(storage.clone());
    let mut page = Page::new();
    view.mount(&mut page).unwrap();
    (view, page, storage)
}

fn row_names(page: &Page) -> Vec<String> {
    let root = page.container().unwrap().root().unwrap();
    root.find_all(&|element| element.has_class("project-name"))
        .into_iter()
        .map(Element::text_content)
        .collect()
}

fn stored(storage: &Storage) -> Vec<Project> {
    storage.get("projects", Vec::new())
}

fn id_of(view: &ProjectsView, name: &str) -> tracker_core::RecordId {
    view.records()
        .unwrap()
        .iter()
        .find(|project| project.name == name)
        .map(|project| project.id.clone())
        .unwrap()
}

#[test]
fn first_mount_seeds_three_projects_and_persists_them() {
    let (view, page, storage) = mounted();

    assert_eq!(
        row_names(&page),
        vec!["Website Redesign", "Mobile App", "API Documentation"]
    );
    assert_eq!(stored(&storage), view.records().unwrap());
    assert!(stored(&storage)
        .iter()
        .all(|project| project.owner_user_id.is_none()));
}

#[test]
fn search_matches_name_and_status_case_insensitively() {
    let (mut view, mut page, storage) = mounted();

    view.handle(ViewEvent::Search("active".to_string()), &mut page)
        .unwrap();
    assert_eq!(row_names(&page), vec!["Website Redesign"]);

    view.handle(ViewEvent::Search("WEBSITE".to_string()), &mut page)
        .unwrap();
    assert_eq!(row_names(&page), vec!["Website Redesign"]);

    let outcome = view
        .handle(ViewEvent::Search("zzz".to_string()), &mut page)
        .unwrap();
    assert_eq!(outcome, EventOutcome::Rendered);
    assert!(row_names(&page).is_empty());
    assert_eq!(stored(&storage).len(), 3);
    assert_eq!(view.records().unwrap().len(), 3);
}

#[test]
fn add_appends_persists_and_resets_form() {
    let (mut view, mut page, storage) = mounted();

    let form = FormData::from_pairs([
        ("name", "  Data Pipeline  "),
        ("status", "active"),
        ("ownerUserId", ""),
    ]);
    let outcome = view.handle(ViewEvent::Submit(form), &mut page).unwrap();

    assert_eq!(outcome, EventOutcome::Mutated { persisted: true });
    let projects = stored(&storage);
    assert_eq!(projects.len(), 4);
    assert_eq!(projects[3].name, "Data Pipeline");
    assert_eq!(projects[3].status, ProjectStatus::Active);
    assert_eq!(projects[3].owner_user_id, None);
    assert!(view.state().unwrap().add_form.is_empty());
    assert_eq!(
        page.notice_board().last().unwrap().message,
        "Project added successfully"
    );
}

#[test]
fn blank_name_is_rejected_and_form_keeps_values() {
    let (mut view, mut page, storage) = mounted();

    let form = FormData::from_pairs([("name", "   "), ("status", "done")]);
    let outcome = view.handle(ViewEvent::Submit(form), &mut page).unwrap();

    assert!(matches!(outcome, EventOutcome::Rejected(_)));
    assert_eq!(stored(&storage).len(), 3);
    assert_eq!(view.state().unwrap().add_form.get("status"), "done");
}

#[test]
fn edit_save_updates_in_place_and_enter_key_saves() {
    let (mut view, mut page, storage) = mounted();
    let id = id_of(&view, "Mobile App");

    view.handle(ViewEvent::Edit(id.clone()), &mut page).unwrap();
    assert_eq!(
        view.handle(ViewEvent::Edit(id.clone()), &mut page).unwrap(),
        EventOutcome::Ignored
    );
    view.handle(
        ViewEvent::EditInput {
            field: "name".to_string(),
            value: "Mobile App v2".to_string(),
        },
        &mut page,
    )
    .unwrap();
    view.handle(
        ViewEvent::EditInput {
            field: "status".to_string(),
            value: "done".to_string(),
        },
        &mut page,
    )
    .unwrap();

    let outcome = view
        .handle(ViewEvent::KeyPress("Enter".to_string()), &mut page)
        .unwrap();
    assert_eq!(outcome, EventOutcome::Mutated { persisted: true });

    let projects = stored(&storage);
    assert_eq!(projects[1].id, id);
    assert_eq!(projects[1].name, "Mobile App v2");
    assert_eq!(projects[1].status, ProjectStatus::Done);
    assert!(view.state().unwrap().editing.is_none());
    assert_eq!(
        page.notice_board().last().unwrap().message,
        "Project updated successfully"
    );
}

#[test]
fn only_one_row_is_in_edit_mode() {
    let (mut view, mut page, _storage) = mounted();
    let first = id_of(&view, "Website Redesign");
    let second = id_of(&view, "Mobile App");

    view.handle(ViewEvent::Edit(first), &mut page).unwrap();
    view.handle(ViewEvent::Edit(second.clone()), &mut page)
        .unwrap();

    let root = page.container().unwrap().root().unwrap();
    let editing = root.find_all(&|element| element.has_class("editing"));
    assert_eq!(editing.len(), 1);
    assert_eq!(editing[0].attr_value("data-id"), Some(second.as_str()));
}

#[test]
fn cancel_discards_edits() {
    let (mut view, mut page, storage) = mounted();
    let id = id_of(&view, "Mobile App");

    view.handle(ViewEvent::Edit(id), &mut page).unwrap();
    view.handle(
        ViewEvent::EditInput {
            field: "name".to_string(),
            value: "Scrapped".to_string(),
        },
        &mut page,
    )
    .unwrap();
    view.handle(ViewEvent::Cancel, &mut page).unwrap();

    assert_eq!(
        row_names(&page),
        vec!["Website Redesign", "Mobile App", "API Documentation"]
    );
    assert_eq!(stored(&storage)[1].name, "Mobile App");
    assert_eq!(
        view.handle(ViewEvent::KeyPress("Enter".to_string()), &mut page)
            .unwrap(),
        EventOutcome::Ignored
    );
}

#[test]
fn delete_requires_confirmation() {
    let (mut view, mut page, storage) = mounted();
    let id = id_of(&view, "API Documentation");

    page.reply_next(false);
    assert_eq!(
        view.handle(ViewEvent::Delete(id.clone()), &mut page).unwrap(),
        EventOutcome::Ignored
    );
    assert_eq!(stored(&storage).len(), 3);

    page.reply_next(true);
    view.handle(ViewEvent::Delete(id.clone()), &mut page).unwrap();
    let remaining = stored(&storage);
    assert_eq!(remaining.len(), 2);
    assert!(remaining.iter().all(|project| project.id != id));
    assert_eq!(
        page.prompts()[0],
        "Are you sure you want to delete this project?"
    );
}

#[test]
fn orphaned_owner_renders_unassigned_and_keeps_reference() {
    let storage = Storage::in_memory();
    storage
        .set(
            "projects",
            &[Project {
                id: "P1".into(),
                name: "Website Redesign".to_string(),
                status: ProjectStatus::Active,
                owner_user_id: Some("U1".into()),
            }],
        )
        .unwrap();
    storage
        .set(
            "users",
            &[User {
                id: "U2".into(),
                name: "Jane Smith".to_string(),
                email: "jane@example.com".to_string(),
            }],
        )
        .unwrap();

    let mut view = ProjectsView::new(storage.clone());
    let mut page = Page::new();
    view.mount(&mut page).unwrap();

    let root = page.container().unwrap().root().unwrap();
    let owner = root
        .find(&|element| element.has_class("project-owner"))
        .unwrap();
    assert_eq!(owner.text_content(), "Unassigned");
    assert_eq!(
        stored(&storage)[0].owner_user_id.as_ref().map(|id| id.as_str()),
        Some("U1")
    );
}

#[test]
fn editing_orphaned_owner_selects_unassigned_and_save_clears_it() {
    let storage = Storage::in_memory();
    storage
        .set(
            "projects",
            &[Project {
                id: "P1".into(),
                name: "Website Redesign".to_string(),
                status: ProjectStatus::Active,
                owner_user_id: Some("U1".into()),
            }],
        )
        .unwrap();
    storage
        .set(
            "users",
            &[User {
                id: "U2".into(),
                name: "Jane Smith".to_string(),
                email: "jane@example.com".to_string(),
            }],
        )
        .unwrap();
    let mut view = ProjectsView::new(storage.clone());
    let mut page = Page::new();
    view.mount(&mut page).unwrap();

    view.handle(ViewEvent::Edit("P1".into()), &mut page).unwrap();
    assert_eq!(view.state().unwrap().editing.as_ref().unwrap().form.get("ownerUserId"), "");
    assert!(page.content_html().contains(
        "<select class=\"edit-owner\" name=\"ownerUserId\">\
         <option value=\"\" selected>Unassigned</option>\
         <option value=\"U2\">Jane Smith</option></select>"
    ));

    let outcome = view.handle(ViewEvent::Save, &mut page).unwrap();
    assert_eq!(outcome, EventOutcome::Mutated { persisted: true });
    assert_eq!(stored(&storage)[0].owner_user_id, None);
}

#[test]
fn owner_select_lists_stored_users() {
    let storage = Storage::in_memory();
    storage
        .set(
            "users",
            &[User {
                id: "U1".into(),
                name: "Ann".to_string(),
                email: "ann@example.com".to_string(),
            }],
        )
        .unwrap();
    let mut view = ProjectsView::new(storage.clone());
    let mut page = Page::new();
    view.mount(&mut page).unwrap();

    let form = FormData::from_pairs([("name", "Docs"), ("status", "planned"), ("ownerUserId", "U1")]);
    view.handle(ViewEvent::Submit(form), &mut page).unwrap();

    let html = page.content_html();
    assert!(html.contains("<option value=\"U1\">Ann</option>"));
    assert!(html.contains("<span class=\"project-owner\">Ann</span>"));
}

#[test]
fn dynamic_text_is_escaped_in_markup() {
    let (mut view, mut page, _storage) = mounted();

    let form = FormData::from_pairs([("name", "<script>alert('x')</script>")]);
    view.handle(ViewEvent::Submit(form), &mut page).unwrap();
    view.handle(ViewEvent::Search("\"><b>".to_string()), &mut page)
        .unwrap();

    let html = page.content_html();
    assert!(!html.contains("<script>"));
    assert!(!html.contains("<b>"));
    assert!(html.contains("value=\"&quot;&gt;&lt;b&gt;\""));
}

#[test]
fn mounting_twice_is_a_no_op() {
    let store = Rc::new(MemoryStore::new());
    let storage = Storage::from_shared(store.clone());
    let mut view = ProjectsView::new(storage.clone());
    let mut page = Page::new();

    view.mount(&mut page).unwrap();
    let html = page.content_html();
    let renders = page.container().unwrap().render_count();

    storage.set("projects", &Vec::<Project>::new()).unwrap();
    view.mount(&mut page).unwrap();

    assert_eq!(page.content_html(), html);
    assert_eq!(page.container().unwrap().render_count(), renders);
    assert_eq!(view.records().unwrap().len(), 3);
    assert_eq!(html.matches("id=\"projects-table\"").count(), 1);
}

#[test]
fn unmount_clears_container_and_drops_state() {
    let (mut view, mut page, _storage) = mounted();

    view.unmount(&mut page).unwrap();
    assert!(page.container().unwrap().is_empty());
    assert!(!view.is_mounted());
    assert!(view.state().is_none());
    assert_eq!(
        view.handle(ViewEvent::Search("x".to_string()), &mut page)
            .unwrap(),
        EventOutcome::Ignored
    );
}

#[test]
fn mount_without_container_fails() {
    let mut view = ProjectsView::new(Storage::in_memory());
    let mut page = Page::without_content();

    assert!(view.mount(&mut page).is_err());
    assert!(!view.is_mounted());
    assert!(page.content().is_none());
}
