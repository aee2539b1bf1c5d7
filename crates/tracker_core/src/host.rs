//! Page-side collaborators a view renders into.
//!
//! # Responsibility
//! - Describe the two attachment points (content, notices) plus the
//!   confirmation prompt and navigation marker as the `Host` trait.
//! - Provide `Page`, a headless host used by the CLI and tests.
//!
//! # Invariants
//! - A view only touches the content container while it is mounted.
//! - `Page::confirm` answers queued replies first, then the default.

use crate::html::{el, Node};
use crate::notice::NoticeBoard;
use crate::router::Route;
use std::collections::VecDeque;

/// Content attachment point; holds the mounted view's rendered tree.
#[derive(Debug, Default)]
pub struct Container {
    root: Option<Node>,
    renders: u64,
}

impl Container {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces everything inside the container.
    pub fn replace(&mut self, node: Node) {
        self.root = Some(node);
        self.renders += 1;
    }

    pub fn clear(&mut self) {
        self.root = None;
    }

    pub fn root(&self) -> Option<&Node> {
        self.root.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Number of times content was replaced since creation.
    pub fn render_count(&self) -> u64 {
        self.renders
    }

    pub fn html(&self) -> String {
        self.root.as_ref().map(Node::render).unwrap_or_default()
    }
}

/// The environment a view is mounted into.
pub trait Host {
    /// Content container, or `None` when the page lacks one.
    fn content(&mut self) -> Option<&mut Container>;
    fn notices(&mut self) -> &mut NoticeBoard;
    /// Blocking yes/no question, e.g. before a delete.
    fn confirm(&mut self, prompt: &str) -> bool;
    fn set_active_nav(&mut self, route: Route);
}

/// In-memory page.
#[derive(Debug)]
pub struct Page {
    content: Option<Container>,
    notices: NoticeBoard,
    replies: VecDeque<bool>,
    default_reply: bool,
    prompts: Vec<String>,
    active_nav: Option<Route>,
}

impl Default for Page {
    fn default() -> Self {
        Self::new()
    }
}

impl Page {
    pub fn new() -> Self {
        Self {
            content: Some(Container::new()),
            notices: NoticeBoard::new(),
            replies: VecDeque::new(),
            default_reply: true,
            prompts: Vec::new(),
            active_nav: None,
        }
    }

    /// A page whose markup has no content container.
    pub fn without_content() -> Self {
        Self {
            content: None,
            ..Self::new()
        }
    }

    /// Queues the answer for the next confirmation prompt.
    pub fn reply_next(&mut self, answer: bool) -> &mut Self {
        self.replies.push_back(answer);
        self
    }

    /// Answer used once queued replies run out.
    pub fn set_default_reply(&mut self, answer: bool) {
        self.default_reply = answer;
    }

    /// Removes the content container, as if the host markup changed.
    pub fn detach_content(&mut self) -> Option<Container> {
        self.content.take()
    }

    pub fn attach_content(&mut self, container: Container) {
        self.content = Some(container);
    }

    pub fn container(&self) -> Option<&Container> {
        self.content.as_ref()
    }

    pub fn content_html(&self) -> String {
        self.content
            .as_ref()
            .map(Container::html)
            .unwrap_or_default()
    }

    pub fn notice_board(&self) -> &NoticeBoard {
        &self.notices
    }

    /// Every prompt shown so far, in order.
    pub fn prompts(&self) -> &[String] {
        &self.prompts
    }

    pub fn active_nav(&self) -> Option<Route> {
        self.active_nav
    }

    /// Navigation bar with the active link marked.
    pub fn render_nav(&self) -> Node {
        el("nav")
            .class("nav")
            .children(Route::ALL.into_iter().map(|route| {
                let class = if self.active_nav == Some(route) {
                    "nav-link active"
                } else {
                    "nav-link"
                };
                el("a")
                    .class(class)
                    .attr("href", format!("#{}", route.as_str()))
                    .attr("data-view", route.as_str())
                    .text(route.title())
            }))
            .into()
    }
}

impl Host for Page {
    fn content(&mut self) -> Option<&mut Container> {
        self.content.as_mut()
    }

    fn notices(&mut self) -> &mut NoticeBoard {
        &mut self.notices
    }

    fn confirm(&mut self, prompt: &str) -> bool {
        self.prompts.push(prompt.to_string());
        self.replies.pop_front().unwrap_or(self.default_reply)
    }

    fn set_active_nav(&mut self, route: Route) {
        self.active_nav = Some(route);
    }
}
