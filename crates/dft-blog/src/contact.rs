/// Contact form submission.
///
/// There is no backend: the default transport waits a fixed delay and reports success. A
/// submission is split into `begin` (lock the control, snapshot the fields) and `finish`
/// (notify, reset on success, unlock) so the page keeps handling events while it is in flight.
use std::time::Duration;

use futures::future::BoxFuture;
use futures::FutureExt;
use tokio::time::Instant;
use tracing::{info, warn};

use crate::notify::{NotificationCenter, NotificationKind};

pub const CONTACT_FORM: &str = "#contact-form";
pub const SIMULATED_LATENCY: Duration = Duration::from_millis(1_000);
const SENDING_LABEL: &str = "Sending...";
const SUCCESS_MESSAGE: &str = "Message sent successfully!";
const FAILURE_MESSAGE: &str = "Failed to send message.";

#[derive(Debug, thiserror::Error)]
pub enum ContactError {
    #[error("message delivery failed: {0}")]
    Delivery(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

pub trait ContactTransport: Send + Sync {
    fn send(&self, message: ContactMessage) -> BoxFuture<'static, Result<(), ContactError>>;
}

pub struct SimulatedTransport {
    latency: Duration,
}

impl SimulatedTransport {
    pub fn new(latency: Duration) -> Self {
        Self { latency }
    }
}

impl Default for SimulatedTransport {
    fn default() -> Self {
        Self::new(SIMULATED_LATENCY)
    }
}

impl ContactTransport for SimulatedTransport {
    fn send(&self, message: ContactMessage) -> BoxFuture<'static, Result<(), ContactError>> {
        let latency = self.latency;
        async move {
            tokio::time::sleep(latency).await;
            info!(subject = %message.subject, "contact message accepted (simulated)");
            Ok(())
        }
        .boxed()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitButton {
    pub label: String,
    pub disabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactForm {
    pub fields: ContactMessage,
    pub button: SubmitButton,
    original_label: Option<String>,
}

impl Default for ContactForm {
    fn default() -> Self {
        Self::new("Send Message")
    }
}

impl ContactForm {
    pub fn new(button_label: &str) -> Self {
        Self {
            fields: ContactMessage::default(),
            button: SubmitButton {
                label: button_label.to_string(),
                disabled: false,
            },
            original_label: None,
        }
    }

    pub fn in_flight(&self) -> bool {
        self.original_label.is_some()
    }

    /// Lock the submit control and snapshot the fields. `None` while a submission is pending.
    pub fn begin(&mut self) -> Option<ContactMessage> {
        if self.in_flight() {
            return None;
        }
        let label = std::mem::replace(&mut self.button.label, SENDING_LABEL.to_string());
        self.original_label = Some(label);
        self.button.disabled = true;
        Some(self.fields.clone())
    }

    /// Report the outcome, clear the fields on success, and unlock the control.
    pub fn finish(
        &mut self,
        result: Result<(), ContactError>,
        notifications: &mut NotificationCenter,
        now: Instant,
    ) {
        match result {
            Ok(()) => {
                notifications.show(SUCCESS_MESSAGE, NotificationKind::Success, now);
                self.fields = ContactMessage::default();
            }
            Err(e) => {
                warn!(error = %e, "contact form submission failed");
                notifications.show(FAILURE_MESSAGE, NotificationKind::Error, now);
            }
        }
        if let Some(label) = self.original_label.take() {
            self.button.label = label;
        }
        self.button.disabled = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FailingTransport;

    impl ContactTransport for FailingTransport {
        fn send(&self, _message: ContactMessage) -> BoxFuture<'static, Result<(), ContactError>> {
            async { Err(ContactError::Delivery("offline".to_string())) }.boxed()
        }
    }

    fn filled_form() -> ContactForm {
        let mut form = ContactForm::default();
        form.fields = ContactMessage {
            name: "Ada".to_string(),
            email: "ada@example.org".to_string(),
            subject: "Band structures".to_string(),
            message: "Hello".to_string(),
        };
        form
    }

    #[tokio::test(start_paused = true)]
    async fn successful_submission_resets_form() {
        let mut form = filled_form();
        let mut notifications = NotificationCenter::new();

        let message = form.begin().unwrap();
        assert!(form.button.disabled);
        assert_eq!(form.button.label, "Sending...");
        assert!(form.begin().is_none());

        let start = Instant::now();
        let result = SimulatedTransport::default().send(message).await;
        assert!(start.elapsed() >= SIMULATED_LATENCY);

        form.finish(result, &mut notifications, Instant::now());
        assert!(!form.button.disabled);
        assert_eq!(form.button.label, "Send Message");
        assert_eq!(form.fields, ContactMessage::default());
        let shown: Vec<_> = notifications.visible().collect();
        assert_eq!(shown.len(), 1);
        assert_eq!(shown[0].message, "Message sent successfully!");
        assert_eq!(shown[0].kind, NotificationKind::Success);
    }

    #[tokio::test]
    async fn failed_submission_keeps_fields() {
        let mut form = filled_form();
        let mut notifications = NotificationCenter::new();

        let message = form.begin().unwrap();
        let result = FailingTransport.send(message).await;
        form.finish(result, &mut notifications, Instant::now());

        assert!(!form.button.disabled);
        assert_eq!(form.button.label, "Send Message");
        assert_eq!(form.fields.name, "Ada");
        let shown: Vec<_> = notifications.visible().collect();
        assert_eq!(shown[0].message, "Failed to send message.");
        assert_eq!(shown[0].kind, NotificationKind::Error);
    }
}
