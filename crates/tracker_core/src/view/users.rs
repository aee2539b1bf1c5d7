//! Users view: name and email per row.

use super::controller::{EntityController, EntityKind, ViewState};
use super::{labeled_input, row_actions, search_input, table_head, Collection, FormData};
use crate::html::{el, Element, Node};
use crate::model::user::{User, UserDraft};
use crate::model::ValidationError;
use crate::storage::Storage;

pub type UsersView = EntityController<UsersKind>;

pub struct UsersKind;

impl EntityKind for UsersKind {
    type Record = User;
    type Context = ();

    const VIEW: &'static str = "users";

    fn load_context(_storage: &Storage) {}

    fn parse(form: &FormData) -> Result<UserDraft, ValidationError> {
        UserDraft::parse(form.get("name"), form.get("email"))
    }

    fn edit_form(record: &User, _context: &()) -> FormData {
        FormData::from_pairs([("name", &record.name), ("email", &record.email)])
    }

    fn render(records: &Collection<User>, _context: &(), state: &ViewState) -> Node {
        let add = &state.add_form;
        let rows = records
            .filtered(&state.query)
            .into_iter()
            .map(|user| match &state.editing {
                Some(session) if session.id == user.id => edit_row(user, &session.form),
                _ => display_row(user),
            });

        el("div")
            .class("v-users")
            .child(el("h2").text("Users"))
            .child(el("div").class("search-container").child(search_input(
                "user-search",
                "Search users...",
                &state.query,
            )))
            .child(
                el("form")
                    .class("form user-form")
                    .id("add-user-form")
                    .child(labeled_input("user-name", "Name", "name", add.get("name")))
                    .child(labeled_input("user-email", "Email", "email", add.get("email")))
                    .child(
                        el("div").class("form-group").child(
                            el("button")
                                .attr("type", "submit")
                                .class("btn btn-primary")
                                .text("Add User"),
                        ),
                    ),
            )
            .child(
                el("table")
                    .class("table")
                    .id("users-table")
                    .child(table_head(&["Name", "Email", "Actions"]))
                    .child(el("tbody").id("users-tbody").children(rows)),
            )
            .into()
    }
}

fn display_row(user: &User) -> Element {
    el("tr")
        .class("user-item")
        .attr("data-id", user.id.as_str())
        .child(el("td").child(el("span").class("user-name").text(&user.name)))
        .child(el("td").child(el("span").class("user-email").text(&user.email)))
        .child(el("td").child(row_actions(false)))
}

fn edit_row(user: &User, form: &FormData) -> Element {
    let field = |input_type: &'static str, class: &'static str, name: &'static str| {
        el("td").child(
            el("input")
                .attr("type", input_type)
                .class(class)
                .attr("name", name)
                .attr("value", form.get(name))
                .flag("required"),
        )
    };

    el("tr")
        .class("user-item editing")
        .attr("data-id", user.id.as_str())
        .child(field("text", "edit-name", "name"))
        .child(field("email", "edit-email", "email"))
        .child(el("td").child(row_actions(true)))
}
