//! User-facing notifications: auto-dismissing toasts and blocking alerts.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::sync::{broadcast, Mutex};
use tracing::debug;

const EVENT_BUFFER: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    /// Non-blocking, disappears on its own
    Toast,
    /// Blocking, stays until acknowledged
    Alert,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Level {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub id: u64,
    pub kind: NotificationKind,
    pub level: Level,
    pub message: String,
    pub raised_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

impl Notification {
    fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|expires_at| expires_at <= now)
    }
}

pub struct Notifier {
    next_id: AtomicU64,
    toast_duration: chrono::Duration,
    active: Mutex<Vec<Notification>>,
    events: broadcast::Sender<Notification>,
}

impl Notifier {
    pub fn new(toast_duration: Duration) -> Self {
        let (events, _) = broadcast::channel(EVENT_BUFFER);
        Self {
            next_id: AtomicU64::new(1),
            toast_duration: chrono::Duration::from_std(toast_duration)
                .unwrap_or_else(|_| chrono::Duration::seconds(3)),
            active: Mutex::new(Vec::new()),
            events,
        }
    }

    /// Live feed of every notification raised from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.events.subscribe()
    }

    pub async fn toast(&self, level: Level, message: impl Into<String>) -> Notification {
        let now = Utc::now();
        let expires_at = Some(now + self.toast_duration);
        self.raise(NotificationKind::Toast, level, message.into(), now, expires_at)
            .await
    }

    pub async fn alert(&self, message: impl Into<String>) -> Notification {
        self.raise(NotificationKind::Alert, Level::Error, message.into(), Utc::now(), None)
            .await
    }

    async fn raise(
        &self,
        kind: NotificationKind,
        level: Level,
        message: String,
        raised_at: DateTime<Utc>,
        expires_at: Option<DateTime<Utc>>,
    ) -> Notification {
        let notification = Notification {
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
            kind,
            level,
            message,
            raised_at,
            expires_at,
        };

        {
            let mut active = self.active.lock().await;
            active.retain(|n| !n.is_expired(raised_at));
            active.push(notification.clone());
        }

        // No subscribers is fine: the active list still holds it.
        if self.events.send(notification.clone()).is_err() {
            debug!("No live subscribers for notification {}", notification.id);
        }

        notification
    }

    /// Notifications still showing at `now`; expired toasts are dropped.
    pub async fn active_at(&self, now: DateTime<Utc>) -> Vec<Notification> {
        let mut active = self.active.lock().await;
        active.retain(|n| !n.is_expired(now));
        active.clone()
    }

    pub async fn active(&self) -> Vec<Notification> {
        self.active_at(Utc::now()).await
    }

    /// Dismiss a notification. Returns false if it was unknown or already gone.
    pub async fn acknowledge(&self, id: u64) -> bool {
        let mut active = self.active.lock().await;
        let before = active.len();
        active.retain(|n| n.id != id);
        active.len() != before
    }
}
