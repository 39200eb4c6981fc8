use serde::Serialize;
use std::sync::{Arc, Mutex};

use crate::models::candidate::Candidate;
use crate::models::user::SessionUser;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Error,
    Warning,
    Info,
}

/// A transient banner message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
}

impl Notification {
    pub fn new(kind: NotificationKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(NotificationKind::Success, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(NotificationKind::Error, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(NotificationKind::Warning, message)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(NotificationKind::Info, message)
    }
}

/// Page indicator under the table. Only the first page is ever materialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pagination {
    pub total_items: usize,
    pub total_pages: usize,
    pub current_page: usize,
    pub has_previous: bool,
    pub has_next: bool,
}

impl Pagination {
    pub fn first_page(total_items: usize, page_size: usize) -> Self {
        let total_pages = total_items.div_ceil(page_size.max(1)).max(1);
        Self {
            total_items,
            total_pages,
            current_page: 1,
            has_previous: false,
            has_next: total_pages > 1,
        }
    }
}

/// Presentation side of the candidate list. The controller never touches the
/// page directly; everything visible goes through this trait.
pub trait ListView: Send {
    fn render_rows(&mut self, rows: &[&Candidate]);

    fn render_pagination(&mut self, pagination: Pagination);

    fn show_detail(&mut self, candidate: &Candidate);

    fn close_detail(&mut self);

    fn notify(&mut self, notification: Notification);

    fn show_session(&mut self, _user: Option<&SessionUser>) {}
}

/// Discards everything. Useful for headless use of the controller.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullView;

impl ListView for NullView {
    fn render_rows(&mut self, _rows: &[&Candidate]) {}

    fn render_pagination(&mut self, _pagination: Pagination) {}

    fn show_detail(&mut self, _candidate: &Candidate) {}

    fn close_detail(&mut self) {}

    fn notify(&mut self, _notification: Notification) {}
}

/// One call received by a [`RecordingView`].
#[derive(Debug, Clone, PartialEq)]
pub enum ViewEvent {
    Rows(Vec<i64>),
    Pagination(Pagination),
    DetailShown(Candidate),
    DetailClosed,
    Notified(Notification),
    Session(Option<SessionUser>),
}

/// Keeps every call in a shared log, for headless hosts that replay the
/// updates elsewhere.
#[derive(Debug, Default, Clone)]
pub struct RecordingView {
    events: Arc<Mutex<Vec<ViewEvent>>>,
}

impl RecordingView {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, event: ViewEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }

    pub fn events(&self) -> Vec<ViewEvent> {
        self.events.lock().map(|e| e.clone()).unwrap_or_default()
    }

    pub fn clear(&self) {
        if let Ok(mut events) = self.events.lock() {
            events.clear();
        }
    }

    /// Ids of the most recently rendered rows.
    pub fn last_rows(&self) -> Option<Vec<i64>> {
        self.events().into_iter().rev().find_map(|e| match e {
            ViewEvent::Rows(ids) => Some(ids),
            _ => None,
        })
    }

    pub fn last_pagination(&self) -> Option<Pagination> {
        self.events().into_iter().rev().find_map(|e| match e {
            ViewEvent::Pagination(p) => Some(p),
            _ => None,
        })
    }

    pub fn notifications(&self) -> Vec<Notification> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                ViewEvent::Notified(n) => Some(n),
                _ => None,
            })
            .collect()
    }
}

impl ListView for RecordingView {
    fn render_rows(&mut self, rows: &[&Candidate]) {
        self.push(ViewEvent::Rows(rows.iter().map(|c| c.id).collect()));
    }

    fn render_pagination(&mut self, pagination: Pagination) {
        self.push(ViewEvent::Pagination(pagination));
    }

    fn show_detail(&mut self, candidate: &Candidate) {
        self.push(ViewEvent::DetailShown(candidate.clone()));
    }

    fn close_detail(&mut self) {
        self.push(ViewEvent::DetailClosed);
    }

    fn notify(&mut self, notification: Notification) {
        self.push(ViewEvent::Notified(notification));
    }

    fn show_session(&mut self, user: Option<&SessionUser>) {
        self.push(ViewEvent::Session(user.cloned()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_count_rounds_up_and_never_drops_below_one() {
        assert_eq!(Pagination::first_page(0, 10).total_pages, 1);
        assert_eq!(Pagination::first_page(10, 10).total_pages, 1);
        let p = Pagination::first_page(11, 10);
        assert_eq!(p.total_pages, 2);
        assert!(p.has_next);
        assert!(!p.has_previous);
        assert_eq!(p.current_page, 1);
    }
}
