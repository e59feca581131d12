//! Dashboard chrome state: nav drawer, scroll shadow, header labels and the
//! notification popover.

use std::future::Future;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::gate::{RequiredRole, SessionUser};

/// Visual-only chrome state owned by the shell.
#[derive(Clone, Debug, PartialEq)]
pub struct ShellChrome {
    pub nav_open: bool,
    pub scrolled: bool,
    pub notifications_open: bool,
    scroll_threshold: f64,
}

impl ShellChrome {
    pub fn new(scroll_threshold: f64) -> Self {
        Self {
            nav_open: false,
            scrolled: false,
            notifications_open: false,
            scroll_threshold,
        }
    }

    pub fn toggle_nav(&mut self) {
        self.nav_open = !self.nav_open;
    }

    pub fn close_nav(&mut self) {
        self.nav_open = false;
    }

    pub fn toggle_notifications(&mut self) {
        self.notifications_open = !self.notifications_open;
    }

    /// Update from the window's vertical offset. Returns true if `scrolled` flipped.
    pub fn track_scroll(&mut self, scroll_y: f64) -> bool {
        let scrolled = scroll_y > self.scroll_threshold;
        let changed = scrolled != self.scrolled;
        self.scrolled = scrolled;
        changed
    }
}

/// Header text for a shell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShellLabels {
    pub portal_title: &'static str,
    pub user_name: String,
    pub role_caption: &'static str,
    pub show_notifications: bool,
}

impl ShellLabels {
    pub fn for_shell(required: RequiredRole, user: &SessionUser) -> Self {
        match required {
            RequiredRole::Admin => Self {
                portal_title: "Admin Portal",
                user_name: "Admin".to_string(),
                role_caption: "Administrator",
                show_notifications: false,
            },
            RequiredRole::Applicant => Self {
                portal_title: "Student Portal",
                user_name: user.display_name(),
                role_caption: "Student",
                show_notifications: true,
            },
        }
    }
}

pub const NOTIFICATIONS_EMPTY_TEXT: &str = "You don't have any notifications at the moment.";

/// An entry in the applicant notification popover.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub read: bool,
}

impl Notification {
    /// e.g. "Mar 4, 9:05 PM"
    pub fn display_time(&self) -> String {
        self.timestamp.format("%b %-d, %-I:%M %p").to_string()
    }
}

pub fn has_unread(notifications: &[Notification]) -> bool {
    notifications.iter().any(|n| !n.read)
}

/// Supplies notifications for a signed-in applicant.
pub trait NotificationSource {
    fn fetch(&self, user: &SessionUser) -> impl Future<Output = Vec<Notification>>;
}

/// No notification backend exists yet; always empty.
#[derive(Clone, Copy, Debug, Default)]
pub struct EmptyNotifications;

impl NotificationSource for EmptyNotifications {
    async fn fetch(&self, _user: &SessionUser) -> Vec<Notification> {
        Vec::new()
    }
}
