use std::time::Duration;

use tokio::time::Instant;

use crate::render::html_escape;

/// How long a notification stays on screen before it starts sliding out.
pub const DISPLAY_FOR: Duration = Duration::from_secs(4);
/// Slide-out transition before the element is removed.
pub const EXIT_TRANSITION: Duration = Duration::from_millis(300);
/// Container the visible banners are mounted into.
pub const NOTIFICATIONS: &str = "#notifications";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: u64,
    pub message: String,
    pub kind: NotificationKind,
}

impl Notification {
    pub fn background(&self) -> &'static str {
        match self.kind {
            NotificationKind::Success => "#10b981",
            NotificationKind::Error | NotificationKind::Info => "#ef4444",
        }
    }

    fn class(&self) -> &'static str {
        match self.kind {
            NotificationKind::Success => "notification-success",
            NotificationKind::Error => "notification-error",
            NotificationKind::Info => "notification-info",
        }
    }

    pub fn render(&self) -> String {
        format!(
            r#"<div class="notification {class}" id="notification-{id}" style="background: {background};">{message}</div>"#,
            class = self.class(),
            id = self.id,
            background = self.background(),
            message = html_escape(&self.message),
        )
    }
}

/// Transient banners. Kept apart from page state; nothing here outlives the page.
#[derive(Debug, Default)]
pub struct NotificationCenter {
    next_id: u64,
    active: Vec<(Instant, Notification)>,
}

impl NotificationCenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show(&mut self, message: &str, kind: NotificationKind, now: Instant) -> u64 {
        self.next_id += 1;
        let notification = Notification {
            id: self.next_id,
            message: message.to_string(),
            kind,
        };
        self.active
            .push((now + DISPLAY_FOR + EXIT_TRANSITION, notification));
        self.next_id
    }

    /// Click-to-dismiss.
    pub fn dismiss(&mut self, id: u64) -> bool {
        let before = self.active.len();
        self.active.retain(|(_, n)| n.id != id);
        self.active.len() != before
    }

    /// Drop notifications whose display time has run out.
    pub fn expire(&mut self, now: Instant) {
        self.active.retain(|(until, _)| *until > now);
    }

    pub fn next_expiry(&self) -> Option<Instant> {
        self.active.iter().map(|(until, _)| *until).min()
    }

    pub fn visible(&self) -> impl Iterator<Item = &Notification> {
        self.active.iter().map(|(_, n)| n)
    }

    /// Markup for every visible banner, oldest first.
    pub fn render(&self) -> String {
        self.visible()
            .map(Notification::render)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn notifications_expire_after_display_and_transition() {
        let mut center = NotificationCenter::new();
        let start = Instant::now();
        center.show("Message sent successfully!", NotificationKind::Success, start);

        center.expire(start + Duration::from_millis(4_299));
        assert_eq!(center.visible().count(), 1);
        center.expire(start + Duration::from_millis(4_300));
        assert_eq!(center.visible().count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn click_dismisses_immediately() {
        let mut center = NotificationCenter::new();
        let now = Instant::now();
        let first = center.show("a", NotificationKind::Error, now);
        center.show("b", NotificationKind::Info, now);
        assert!(center.dismiss(first));
        assert!(!center.dismiss(first));
        let left: Vec<_> = center.visible().map(|n| n.message.as_str()).collect();
        assert_eq!(left, ["b"]);
    }

    #[test]
    fn colors_by_kind() {
        let n = |kind| Notification {
            id: 1,
            message: String::new(),
            kind,
        };
        assert_eq!(n(NotificationKind::Success).background(), "#10b981");
        assert_eq!(n(NotificationKind::Error).background(), "#ef4444");
    }

    #[tokio::test(start_paused = true)]
    async fn renders_visible_banners() {
        let mut center = NotificationCenter::new();
        assert_eq!(center.render(), "");
        let id = center.show("Failed to send <message>.", NotificationKind::Error, Instant::now());
        let html = center.render();
        assert!(html.contains(&format!(r#"id="notification-{id}""#)));
        assert!(html.contains("notification notification-error"));
        assert!(html.contains("background: #ef4444;"));
        assert!(html.contains("Failed to send &lt;message&gt;."));
    }
}
