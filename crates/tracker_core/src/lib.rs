//! Core of the project/user/task tracker.
//! This crate owns persistence, the three entity views and routing; hosts
//! only supply a page to render into.

pub mod config;
pub mod db;
pub mod host;
pub mod html;
pub mod logging;
pub mod model;
pub mod notice;
pub mod router;
pub mod storage;
pub mod view;

pub use config::{ConfigError, LogLevel, TrackerConfig};
pub use host::{Container, Host, Page};
pub use logging::{init_logging, logging_status};
pub use model::project::{Project, ProjectDraft, ProjectStatus};
pub use model::task::{Task, TaskDraft};
pub use model::user::{User, UserDraft};
pub use model::{Record, RecordId, ValidationError};
pub use notice::{Notice, NoticeBoard, NoticeKind, NOTICE_TTL};
pub use router::{Route, Router, RouterError};
pub use storage::{KeyValueStore, MemoryStore, SqliteStore, Storage, StoreError, StoreResult};
pub use view::{
    EventOutcome, FormData, ProjectsView, TasksView, UsersView, View, ViewError, ViewEvent,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
