//! Controller module - Application logic and event handling
//!
//! This module contains the application controller that handles user input,
//! dispatches transport commands, and keeps the local stores synchronized
//! with the remote session. It is organized into submodules by
//! responsibility:
//!
//! - `input`: Key event handling
//! - `transport`: Transport command dispatch
//! - `sources`: Feed loading and source switching
//! - `reconcile`: Fixed-cadence status polling loop

mod input;
mod reconcile;
mod sources;
mod transport;

use std::sync::Arc;
use std::time::Duration;

use crate::errors::AppError;
use crate::model::{AppModel, NotificationKind, TransportSession};

/// How long each banner kind stays up before its own timer hides it.
pub const ERROR_NOTIFICATION_TTL: Duration = Duration::from_secs(2);
pub const INFO_NOTIFICATION_TTL: Duration = Duration::from_secs(14);

#[derive(Clone)]
pub struct AppController {
    pub(crate) model: Arc<AppModel>,
    pub(crate) session: TransportSession,
}

impl AppController {
    pub fn new(model: Arc<AppModel>, session: TransportSession) -> Self {
        Self { model, session }
    }

    /// Shows a banner and schedules its expiry keyed to the fresh token, so
    /// this timer can never hide a banner that replaced it in the meantime.
    pub(crate) async fn notify(&self, kind: NotificationKind, message: impl Into<String>) {
        let token = self.model.show_notification(kind, message.into()).await;
        let ttl = match kind {
            NotificationKind::Info => INFO_NOTIFICATION_TTL,
            NotificationKind::Error => ERROR_NOTIFICATION_TTL,
        };
        let model = self.model.clone();
        tokio::spawn(async move {
            tokio::time::sleep(ttl).await;
            model.hide_notification_if(token).await;
        });
    }

    pub(crate) async fn notify_info(&self, message: impl Into<String>) {
        self.notify(NotificationKind::Info, message).await;
    }

    pub(crate) async fn notify_error(&self, error: &AppError) {
        self.notify(NotificationKind::Error, Self::format_error(error)).await;
    }

    pub(crate) fn format_error(error: &AppError) -> String {
        match error {
            AppError::Fetch { reason } => format!("Could not load feed: {reason}"),
            AppError::Transport { reason } => format!("Server command failed: {reason}"),
            AppError::NotFound => "Selection is no longer available".to_string(),
        }
    }
}
