//! Transient notices ("toasts").
//!
//! # Invariants
//! - A notice is visible for exactly `NOTICE_TTL` after it was posted.
//! - Posting is fire-and-forget; there is no early dismissal.
//! - Posting drops notices already expired at the posting instant, so the
//!   board stays bounded without a host tick.

use crate::html::{el, Node};
use std::time::{Duration, Instant};

/// How long a notice stays visible.
pub const NOTICE_TTL: Duration = Duration::from_millis(3000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

impl NoticeKind {
    fn css(self) -> &'static str {
        match self {
            Self::Success => "toast success",
            Self::Error => "toast error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
    pub posted_at: Instant,
}

impl Notice {
    pub fn is_visible_at(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.posted_at) < NOTICE_TTL
    }
}

/// The page's notice container.
#[derive(Debug, Default)]
pub struct NoticeBoard {
    notices: Vec<Notice>,
}

impl NoticeBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.post_at(NoticeKind::Success, message, Instant::now());
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.post_at(NoticeKind::Error, message, Instant::now());
    }

    pub fn post_at(&mut self, kind: NoticeKind, message: impl Into<String>, now: Instant) {
        self.prune_at(now);
        self.notices.push(Notice {
            kind,
            message: message.into(),
            posted_at: now,
        });
    }

    /// Notices still on screen at `now`, oldest first.
    pub fn visible_at(&self, now: Instant) -> impl Iterator<Item = &Notice> {
        self.notices
            .iter()
            .filter(move |notice| notice.is_visible_at(now))
    }

    pub fn visible(&self) -> Vec<&Notice> {
        self.visible_at(Instant::now()).collect()
    }

    /// Drops expired notices. Also runs on every post.
    pub fn prune_at(&mut self, now: Instant) {
        self.notices.retain(|notice| notice.is_visible_at(now));
    }

    /// Every notice posted and not yet pruned, regardless of expiry.
    pub fn history(&self) -> &[Notice] {
        &self.notices
    }

    pub fn last(&self) -> Option<&Notice> {
        self.notices.last()
    }

    pub fn render_at(&self, now: Instant) -> Node {
        el("div")
            .id("toast-container")
            .children(
                self.visible_at(now)
                    .map(|notice| el("div").class(notice.kind.css()).text(&notice.message)),
            )
            .into()
    }
}

#[cfg(test)]
mod tests {
    use super::{NoticeBoard, NoticeKind, NOTICE_TTL};
    use std::time::{Duration, Instant};

    #[test]
    fn notices_expire_after_ttl() {
        let start = Instant::now();
        let mut board = NoticeBoard::new();
        board.post_at(NoticeKind::Success, "Saved", start);

        assert_eq!(board.visible_at(start).count(), 1);
        assert_eq!(
            board
                .visible_at(start + NOTICE_TTL - Duration::from_millis(1))
                .count(),
            1
        );
        assert_eq!(board.visible_at(start + NOTICE_TTL).count(), 0);

        board.prune_at(start + NOTICE_TTL);
        assert!(board.history().is_empty());
    }

    #[test]
    fn posting_drops_expired_notices() {
        let start = Instant::now();
        let mut board = NoticeBoard::new();
        board.post_at(NoticeKind::Success, "First", start);
        board.post_at(NoticeKind::Success, "Second", start + Duration::from_millis(500));
        assert_eq!(board.history().len(), 2);

        board.post_at(NoticeKind::Error, "Third", start + NOTICE_TTL);
        let messages: Vec<&str> = board
            .history()
            .iter()
            .map(|notice| notice.message.as_str())
            .collect();
        assert_eq!(messages, ["Second", "Third"]);
    }

    #[test]
    fn render_escapes_message_and_uses_kind_class() {
        let now = Instant::now();
        let mut board = NoticeBoard::new();
        board.post_at(NoticeKind::Error, "<oops>", now);

        let html = board.render_at(now).render();
        assert_eq!(
            html,
            "<div id=\"toast-container\"><div class=\"toast error\">&lt;oops&gt;</div></div>"
        );
    }
}
