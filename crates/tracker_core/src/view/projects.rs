//! Projects view: name, status badge and owner per row.
//!
//! Owners are looked up in the user list read at mount time. An owner id
//! with no matching user renders as "Unassigned"; the stored id is kept.

use super::controller::{EntityController, EntityKind, ViewState};
use super::{labeled_input, row_actions, search_input, select, table_head, Collection, FormData};
use crate::html::{el, Element, Node};
use crate::model::project::{Project, ProjectDraft, ProjectStatus};
use crate::model::user::User;
use crate::model::{Record, ValidationError};
use crate::storage::Storage;

pub type ProjectsView = EntityController<ProjectsKind>;

const UNASSIGNED: &str = "Unassigned";

pub struct ProjectsKind;

/// Display name of `owner_user_id`, or "Unassigned".
pub fn owner_label<'a>(users: &'a [User], project: &Project) -> &'a str {
    project
        .owner_user_id
        .as_ref()
        .and_then(|owner| users.iter().find(|user| &user.id == owner))
        .map_or(UNASSIGNED, |user| user.name.as_str())
}

impl EntityKind for ProjectsKind {
    type Record = Project;
    type Context = Vec<User>;

    const VIEW: &'static str = "projects";

    fn load_context(storage: &Storage) -> Vec<User> {
        storage.get(User::STORAGE_KEY, Vec::new())
    }

    fn parse(form: &FormData) -> Result<ProjectDraft, ValidationError> {
        ProjectDraft::parse(form.get("name"), form.get("status"), form.get("ownerUserId"))
    }

    /// An owner with no matching user starts as "Unassigned", matching the
    /// selected option; saving then clears the dangling reference.
    fn edit_form(record: &Project, users: &Vec<User>) -> FormData {
        let owner = record
            .owner_user_id
            .as_ref()
            .filter(|owner| users.iter().any(|user| &user.id == *owner))
            .map(ToString::to_string)
            .unwrap_or_default();
        FormData::from_pairs([
            ("name", record.name.clone()),
            ("status", record.status.as_str().to_string()),
            ("ownerUserId", owner),
        ])
    }

    fn render(records: &Collection<Project>, users: &Vec<User>, state: &ViewState) -> Node {
        let add = &state.add_form;
        let add_status = non_empty_or(add.get("status"), ProjectStatus::Planned.as_str());

        let form = el("form")
            .class("form project-form")
            .id("add-project-form")
            .child(labeled_input("project-name", "Project Name", "name", add.get("name")))
            .child(
                el("div")
                    .class("form-group")
                    .child(el("label").attr("for", "project-status").text("Status"))
                    .child(status_select(
                        el("select").id("project-status").attr("name", "status"),
                        add_status,
                    )),
            )
            .child(
                el("div")
                    .class("form-group")
                    .child(el("label").attr("for", "project-owner").text("Owner"))
                    .child(owner_select(
                        el("select").id("project-owner").attr("name", "ownerUserId"),
                        users,
                        add.get("ownerUserId"),
                    )),
            )
            .child(
                el("div").class("form-group").child(
                    el("button")
                        .attr("type", "submit")
                        .class("btn btn-primary")
                        .text("Add Project"),
                ),
            );

        let rows = records
            .filtered(&state.query)
            .into_iter()
            .map(|project| match &state.editing {
                Some(session) if session.id == project.id => edit_row(project, &session.form, users),
                _ => display_row(project, users),
            });

        el("div")
            .class("v-projects")
            .child(el("h2").text("Projects"))
            .child(el("div").class("search-container").child(search_input(
                "project-search",
                "Search projects...",
                &state.query,
            )))
            .child(form)
            .child(
                el("table")
                    .class("table")
                    .id("projects-table")
                    .child(table_head(&["Name", "Status", "Owner", "Actions"]))
                    .child(el("tbody").id("projects-tbody").children(rows)),
            )
            .into()
    }
}

fn display_row(project: &Project, users: &[User]) -> Element {
    let status = project.status.as_str();
    el("tr")
        .class("project-item")
        .attr("data-id", project.id.as_str())
        .child(el("td").child(el("span").class("project-name").text(&project.name)))
        .child(
            el("td").child(
                el("span")
                    .class(format!("status-badge status-{status}"))
                    .text(status),
            ),
        )
        .child(
            el("td").child(
                el("span")
                    .class("project-owner")
                    .text(owner_label(users, project)),
            ),
        )
        .child(el("td").child(row_actions(false)))
}

fn edit_row(project: &Project, form: &FormData, users: &[User]) -> Element {
    el("tr")
        .class("project-item editing")
        .attr("data-id", project.id.as_str())
        .child(
            el("td").child(
                el("input")
                    .attr("type", "text")
                    .class("edit-name")
                    .attr("name", "name")
                    .attr("value", form.get("name"))
                    .flag("required"),
            ),
        )
        .child(el("td").child(status_select(
            el("select").class("edit-status").attr("name", "status"),
            form.get("status"),
        )))
        .child(el("td").child(owner_select(
            el("select").class("edit-owner").attr("name", "ownerUserId"),
            users,
            form.get("ownerUserId"),
        )))
        .child(el("td").child(row_actions(true)))
}

fn status_select(element: Element, selected: &str) -> Element {
    select(
        element,
        ProjectStatus::ALL
            .into_iter()
            .map(|status| (status.as_str(), status.label())),
        selected,
    )
}

fn owner_select(element: Element, users: &[User], selected: &str) -> Element {
    select(
        element,
        std::iter::once(("", UNASSIGNED))
            .chain(users.iter().map(|user| (user.id.as_str(), user.name.as_str()))),
        selected,
    )
}

fn non_empty_or<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.is_empty() {
        fallback
    } else {
        value
    }
}
