//! Fragment router.
//!
//! # Responsibility
//! - Map a location fragment (`#users`) to one of the three views.
//! - Swap the active view: unmount the previous one, mount the next one.
//!
//! # Invariants
//! - Unknown or empty fragments resolve to `Route::Projects`.
//! - A missing content container aborts the render before anything is
//!   unmounted.
//! - Unmount failures are logged and never stop the next mount.

use crate::host::Host;
use crate::storage::Storage;
use crate::view::{EventOutcome, ProjectsView, TasksView, UsersView, View, ViewError, ViewEvent};
use log::{error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Projects,
    Users,
    Tasks,
}

impl Route {
    pub const ALL: [Route; 3] = [Self::Projects, Self::Users, Self::Tasks];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Projects => "projects",
            Self::Users => "users",
            Self::Tasks => "tasks",
        }
    }

    /// Navigation link text.
    pub fn title(self) -> &'static str {
        match self {
            Self::Projects => "Projects",
            Self::Users => "Users",
            Self::Tasks => "Tasks",
        }
    }

    /// Exact, case-insensitive route name.
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|route| route.as_str().eq_ignore_ascii_case(name.trim()))
    }

    /// Resolves a location fragment, with or without its leading `#`.
    pub fn from_fragment(fragment: &str) -> Self {
        let fragment = fragment.trim();
        let name = fragment.strip_prefix('#').unwrap_or(fragment);
        Self::parse(name).unwrap_or(Self::Projects)
    }
}

impl Display for Route {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouterError {
    /// Host page has no content container; nothing was changed.
    MissingContainer,
    /// The selected view failed to mount; no view is active.
    Mount(ViewError),
}

impl Display for RouterError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingContainer => write!(f, "missing content container"),
            Self::Mount(err) => write!(f, "mount failed: {err}"),
        }
    }
}

impl Error for RouterError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::MissingContainer => None,
            Self::Mount(err) => Some(err),
        }
    }
}

/// Owns one controller per route and tracks which one is mounted.
pub struct Router {
    projects: ProjectsView,
    users: UsersView,
    tasks: TasksView,
    current: Option<Route>,
}

impl Router {
    pub fn new(storage: Storage) -> Self {
        Self {
            projects: ProjectsView::new(storage.clone()),
            users: UsersView::new(storage.clone()),
            tasks: TasksView::new(storage),
            current: None,
        }
    }

    pub fn current(&self) -> Option<Route> {
        self.current
    }

    pub fn projects(&self) -> &ProjectsView {
        &self.projects
    }

    pub fn users(&self) -> &UsersView {
        &self.users
    }

    pub fn tasks(&self) -> &TasksView {
        &self.tasks
    }

    fn view_mut(&mut self, route: Route) -> &mut dyn View {
        match route {
            Route::Projects => &mut self.projects,
            Route::Users => &mut self.users,
            Route::Tasks => &mut self.tasks,
        }
    }

    /// Page-load signal: renders whatever the initial fragment selects.
    pub fn start(&mut self, fragment: &str, host: &mut dyn Host) -> Result<Route, RouterError> {
        self.navigate(fragment, host)
    }

    /// Navigation signal: swaps the active view for `fragment`'s route.
    ///
    /// # Errors
    /// - `MissingContainer` when the host has no content container; the
    ///   previous view stays mounted.
    /// - `Mount` when the selected view cannot mount.
    pub fn navigate(&mut self, fragment: &str, host: &mut dyn Host) -> Result<Route, RouterError> {
        let route = Route::from_fragment(fragment);

        if host.content().is_none() {
            error!("event=route_render module=router status=error route={route} error=missing_container");
            return Err(RouterError::MissingContainer);
        }

        if let Some(previous) = self.current.take() {
            if let Err(err) = self.view_mut(previous).unmount(host) {
                warn!(
                    "event=route_unmount module=router status=error route={previous} error={err}"
                );
            }
        }

        if let Err(err) = self.view_mut(route).mount(host) {
            error!("event=route_mount module=router status=error route={route} error={err}");
            return Err(RouterError::Mount(err));
        }

        self.current = Some(route);
        host.set_active_nav(route);
        info!("event=route_render module=router status=ok route={route}");
        Ok(route)
    }

    /// Forwards a host event to the active view; ignored when none is.
    pub fn dispatch(
        &mut self,
        event: ViewEvent,
        host: &mut dyn Host,
    ) -> Result<EventOutcome, ViewError> {
        match self.current {
            Some(route) => self.view_mut(route).handle(event, host),
            None => Ok(EventOutcome::Ignored),
        }
    }
}
