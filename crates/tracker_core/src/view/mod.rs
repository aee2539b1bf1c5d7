//! Entity view controllers.
//!
//! # Responsibility
//! - Own one entity kind's collection while mounted and render it into the
//!   host's content container.
//! - Translate host events (search, add, edit, save, delete) into collection
//!   mutations followed by a synchronous re-render.
//!
//! # Invariants
//! - All mounted state lives in the controller and is dropped on unmount.
//! - Mounting an already mounted controller is a no-op.
//! - At most one row is in edit mode.
//! - Rendering always derives from the in-memory collection.

mod collection;
mod controller;
pub mod projects;
pub mod tasks;
pub mod users;

use crate::host::Host;
use crate::html::{el, Element};
use crate::model::{RecordId, ValidationError};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub use collection::Collection;
pub use controller::{EditSession, EntityController, EntityKind, ViewState};
pub use projects::{ProjectsKind, ProjectsView};
pub use tasks::{TasksKind, TasksView};
pub use users::{UsersKind, UsersView};

/// Field values of a submitted form, keyed by input `name`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormData {
    fields: BTreeMap<String, String>,
}

impl FormData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds form data from `(name, value)` pairs.
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            fields: pairs
                .into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        }
    }

    /// Value of `name`, or `""` when the field was not submitted.
    pub fn get(&self, name: &str) -> &str {
        self.fields.get(name).map(String::as_str).unwrap_or("")
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(name.into(), value.into());
    }

    /// Checkbox semantics: `on`, `true`, `1` and `yes` count as checked.
    pub fn flag(&self, name: &str) -> bool {
        matches!(
            self.get(name).trim().to_ascii_lowercase().as_str(),
            "on" | "true" | "1" | "yes"
        )
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Host-originated event routed to the mounted view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewEvent {
    /// Search box input; the full current text.
    Search(String),
    /// Add form submitted.
    Submit(FormData),
    /// Edit button clicked on a row.
    Edit(RecordId),
    /// Typing into a field of the row in edit mode.
    EditInput { field: String, value: String },
    /// Save button clicked on the row in edit mode.
    Save,
    Cancel,
    /// Key pressed inside the view; `"Enter"` saves the row in edit mode.
    KeyPress(String),
    /// Delete button clicked; requires confirmation.
    Delete(RecordId),
    /// Done checkbox changed (tasks).
    Toggle { id: RecordId, done: bool },
}

/// What a handled event did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventOutcome {
    /// Nothing changed (not applicable, unknown id, declined confirm).
    Ignored,
    /// View state changed and was re-rendered; the collection did not.
    Rendered,
    /// Input failed validation; collection unchanged, error notice shown.
    Rejected(ValidationError),
    /// Collection changed. `persisted` is false when the write failed.
    Mutated { persisted: bool },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewError {
    /// The host has no content container to render into.
    MissingContainer { view: &'static str },
}

impl Display for ViewError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingContainer { view } => {
                write!(f, "view `{view}` has no content container to render into")
            }
        }
    }
}

impl Error for ViewError {}

/// Object-safe controller surface used by the router.
pub trait View {
    fn name(&self) -> &'static str;
    fn is_mounted(&self) -> bool;
    fn mount(&mut self, host: &mut dyn Host) -> Result<(), ViewError>;
    fn unmount(&mut self, host: &mut dyn Host) -> Result<(), ViewError>;
    fn handle(&mut self, event: ViewEvent, host: &mut dyn Host)
        -> Result<EventOutcome, ViewError>;
}

fn search_input(id: &'static str, placeholder: &'static str, query: &str) -> Element {
    el("input")
        .attr("type", "text")
        .class("search-input")
        .id(id)
        .attr("placeholder", placeholder)
        .attr("value", query)
}

fn labeled_input(
    id: &'static str,
    label: &'static str,
    name: &'static str,
    value: &str,
) -> Element {
    el("div")
        .class("form-group")
        .child(el("label").attr("for", id).text(label))
        .child(
            el("input")
                .attr("type", if name == "email" { "email" } else { "text" })
                .id(id)
                .attr("name", name)
                .attr("value", value)
                .flag("required"),
        )
}

fn select<'a>(
    element: Element,
    options: impl IntoIterator<Item = (&'a str, &'a str)>,
    selected: &str,
) -> Element {
    element.children(options.into_iter().map(|(value, label)| {
        el("option")
            .attr("value", value)
            .flag_if("selected", value == selected)
            .text(label)
    }))
}

fn row_actions(editing: bool) -> Element {
    let buttons = if editing {
        [
            ("btn btn-sm btn-success save-btn", "Save"),
            ("btn btn-sm btn-secondary cancel-btn", "Cancel"),
        ]
    } else {
        [
            ("btn btn-sm btn-secondary edit-btn", "Edit"),
            ("btn btn-sm btn-danger delete-btn", "Delete"),
        ]
    };
    el("div").class("actions").children(
        buttons
            .into_iter()
            .map(|(class, label)| el("button").class(class).text(label)),
    )
}

fn table_head(columns: &[&'static str]) -> Element {
    el("thead").child(el("tr").children(columns.iter().map(|column| el("th").text(*column))))
}
