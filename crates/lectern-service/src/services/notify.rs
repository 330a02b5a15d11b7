//! Outbound appointment notifications
//!
//! Email delivery goes through an external HTTP API. Delivery is best-effort:
//! services spawn it off the request path and a failure only produces a log
//! line, never an error to the caller.

use async_trait::async_trait;
use tracing::{debug, warn};

use lectern_common::EmailConfig;
use lectern_core::events::{AppointmentSnapshot, NotificationKind, PartySnapshot};

/// Notification delivery errors
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("Email API request failed: {0}")]
    Request(String),

    #[error("Email API returned status {0}")]
    Status(u16),
}

/// Outbound notification port
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Deliver one notification to both parties
    async fn send(
        &self,
        kind: NotificationKind,
        appointment: &AppointmentSnapshot,
        student: &PartySnapshot,
        lecturer: &PartySnapshot,
    ) -> Result<(), NotifyError>;
}

/// Notifier backed by the external email delivery API
pub struct EmailNotifier {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
    from: String,
}

impl EmailNotifier {
    /// Create a notifier from email configuration.
    ///
    /// Returns `None` when the config has no API endpoint, in which case the
    /// caller should fall back to [`NoopNotifier`].
    pub fn from_config(config: &EmailConfig) -> Option<Self> {
        let api_url = config.api_url.clone()?;
        let api_key = config.api_key.clone().unwrap_or_default();
        Some(Self {
            client: reqwest::Client::new(),
            api_url,
            api_key,
            from: config.from.clone(),
        })
    }

    fn subject_line(kind: NotificationKind, appointment: &AppointmentSnapshot) -> String {
        let what = match kind {
            NotificationKind::Created => "Appointment requested",
            NotificationKind::Approved => "Appointment approved",
            NotificationKind::Cancelled => "Appointment cancelled",
            NotificationKind::Rescheduled => "Appointment rescheduled",
        };
        format!(
            "{what}: {} at {} ({})",
            appointment.date, appointment.start_time, appointment.subject
        )
    }
}

#[async_trait]
impl Notifier for EmailNotifier {
    async fn send(
        &self,
        kind: NotificationKind,
        appointment: &AppointmentSnapshot,
        student: &PartySnapshot,
        lecturer: &PartySnapshot,
    ) -> Result<(), NotifyError> {
        let body = serde_json::json!({
            "from": self.from,
            "to": [student.email, lecturer.email],
            "subject": Self::subject_line(kind, appointment),
            "kind": kind,
            "appointment": appointment,
            "student": student,
            "lecturer": lecturer,
        });

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| NotifyError::Request(e.to_string()))?;

        if !response.status().is_success() {
            return Err(NotifyError::Status(response.status().as_u16()));
        }

        debug!(appointment_id = %appointment.id, ?kind, "Notification delivered");
        Ok(())
    }
}

impl std::fmt::Debug for EmailNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmailNotifier")
            .field("api_url", &self.api_url)
            .field("from", &self.from)
            .finish_non_exhaustive()
    }
}

/// Notifier that drops everything, used when email delivery is not configured
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopNotifier;

#[async_trait]
impl Notifier for NoopNotifier {
    async fn send(
        &self,
        kind: NotificationKind,
        appointment: &AppointmentSnapshot,
        _student: &PartySnapshot,
        _lecturer: &PartySnapshot,
    ) -> Result<(), NotifyError> {
        debug!(appointment_id = %appointment.id, ?kind, "Email delivery disabled, dropping notification");
        Ok(())
    }
}

/// Fire-and-forget delivery off the request path
pub(super) fn spawn_notification(
    notifier: std::sync::Arc<dyn Notifier>,
    kind: NotificationKind,
    appointment: AppointmentSnapshot,
    student: PartySnapshot,
    lecturer: PartySnapshot,
) {
    tokio::spawn(async move {
        if let Err(e) = notifier.send(kind, &appointment, &student, &lecturer).await {
            warn!(appointment_id = %appointment.id, ?kind, error = %e, "Notification delivery failed");
        }
    });
}
