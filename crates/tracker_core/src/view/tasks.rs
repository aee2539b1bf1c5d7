//! Tasks view: a flat checklist with title search.

use super::controller::{EntityController, EntityKind, ViewState};
use super::{row_actions, Collection, FormData};
use crate::html::{el, Element, Node};
use crate::model::task::{Task, TaskDraft};
use crate::model::ValidationError;
use crate::storage::Storage;

pub type TasksView = EntityController<TasksKind>;

pub struct TasksKind;

impl EntityKind for TasksKind {
    type Record = Task;
    type Context = ();

    const VIEW: &'static str = "tasks";

    fn load_context(_storage: &Storage) {}

    fn parse(form: &FormData) -> Result<TaskDraft, ValidationError> {
        TaskDraft::parse(form.get("title"), form.flag("done"))
    }

    fn edit_form(record: &Task, _context: &()) -> FormData {
        FormData::from_pairs([
            ("title", record.title.as_str()),
            ("done", if record.done { "on" } else { "" }),
        ])
    }

    fn render(records: &Collection<Task>, _context: &(), state: &ViewState) -> Node {
        let visible = records.filtered(&state.query);
        let list = el("div").class("list").id("task-list");
        let list = if visible.is_empty() {
            list.child(el("div").class("empty").text("No tasks yet"))
        } else {
            list.children(visible.into_iter().map(|task| match &state.editing {
                Some(session) if session.id == task.id => edit_row(task, &session.form),
                _ => display_row(task),
            }))
        };

        el("section")
            .class("v-tasks")
            .child(
                el("header")
                    .class("view-header")
                    .child(el("h2").text("Tasks"))
                    .child(
                        el("input")
                            .id("task-search")
                            .class("input")
                            .attr("placeholder", "Search tasks...")
                            .attr("value", &state.query),
                    ),
            )
            .child(
                el("form")
                    .id("task-form")
                    .class("inline-form")
                    .child(
                        el("input")
                            .id("task-title")
                            .class("input")
                            .attr("name", "title")
                            .attr("placeholder", "Task title")
                            .attr("value", state.add_form.get("title"))
                            .flag("required"),
                    )
                    .child(el("button").class("btn").attr("type", "submit").text("Add")),
            )
            .child(list)
            .into()
    }

    fn set_done(record: &mut Task, done: bool) -> bool {
        if record.done == done {
            return false;
        }
        record.done = done;
        true
    }
}

fn display_row(task: &Task) -> Element {
    el("div")
        .class("list-row")
        .attr("data-id", task.id.as_str())
        .child(
            el("label")
                .class("checkbox")
                .child(
                    el("input")
                        .attr("type", "checkbox")
                        .class("toggle-done")
                        .flag_if("checked", task.done),
                )
                .child(el("span").text(&task.title)),
        )
        .child(row_actions(false))
}

fn edit_row(task: &Task, form: &FormData) -> Element {
    el("div")
        .class("list-row editing")
        .attr("data-id", task.id.as_str())
        .child(
            el("input")
                .attr("type", "text")
                .class("edit-title")
                .attr("name", "title")
                .attr("value", form.get("title"))
                .flag("required"),
        )
        .child(
            el("input")
                .attr("type", "checkbox")
                .class("edit-done")
                .attr("name", "done")
                .flag_if("checked", form.flag("done")),
        )
        .child(row_actions(true))
}
