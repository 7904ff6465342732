//! Transport command dispatch.
//!
//! Every operation is dispatched off the input loop; failures are routed to
//! the notification surface and never terminate the process. Chains that
//! depend on remote queue ordering await each command before issuing the
//! next.

use crate::errors::AppError;
use crate::model::{ListSource, PlayState};

use super::AppController;

impl AppController {
    /// Activate the highlighted entry. Browsing a catalog: replace the
    /// remote queue with the range from the entry to the end and start at
    /// the top. In the live queue: play at the selected position.
    pub async fn activate_selected(&self) {
        match self.model.active_list().await {
            ListSource::Catalog(_) => {
                let locators = match self.model.locators_from_selection().await {
                    Ok(locators) => locators,
                    Err(AppError::NotFound) => {
                        // Stale selection after a reload; recoverable.
                        self.model.select_top().await;
                        return;
                    }
                    Err(e) => {
                        self.notify_error(&e).await;
                        return;
                    }
                };

                self.notify_info(format!("Queueing {} tracks", locators.len())).await;

                let controller = self.clone();
                tokio::spawn(async move {
                    tracing::info!(count = locators.len(), "Replacing remote queue with selected range");
                    if let Err(e) = controller.session.play_range(&locators).await {
                        tracing::error!(error = %e, "Play range failed");
                        controller.notify_error(&e).await;
                        return;
                    }
                    controller.refresh_queue_mirror().await;
                });
            }
            ListSource::LiveQueue => {
                if self.model.queue_is_empty().await {
                    return;
                }
                let position = self.model.selected().await;
                let controller = self.clone();
                tokio::spawn(async move {
                    tracing::debug!(position, "Playing at queue position");
                    if let Err(e) = controller.session.play_at(position).await {
                        controller.notify_error(&e).await;
                    }
                });
            }
        }
    }

    /// The next action comes from a fresh status poll inside the session,
    /// never from a locally cached playing flag.
    pub async fn toggle_pause(&self) {
        let controller = self.clone();
        tokio::spawn(async move {
            match controller.session.toggle_pause().await {
                Ok(PlayState::Pause) => controller.notify_info("Pause").await,
                Ok(_) => controller.notify_info("Play").await,
                Err(e) => {
                    tracing::error!(error = %e, "Toggle pause failed");
                    controller.notify_error(&e).await;
                }
            }
        });
    }

    /// Relative seek; silently skipped while the transport is not playing.
    pub async fn seek_relative(&self, delta_seconds: i64) {
        let controller = self.clone();
        tokio::spawn(async move {
            match controller.session.seek_relative(delta_seconds).await {
                Ok(true) => {
                    let label = if delta_seconds < 0 {
                        format!("Jump - {}s", -delta_seconds)
                    } else {
                        format!("Jump + {delta_seconds}s")
                    };
                    controller.notify_info(label).await;
                }
                Ok(false) => {}
                Err(e) => controller.notify_error(&e).await,
            }
        });
    }

    pub async fn next_track(&self) {
        let controller = self.clone();
        tokio::spawn(async move {
            match controller.session.next().await {
                Ok(()) => controller.notify_info("Play next song").await,
                Err(e) => controller.notify_error(&e).await,
            }
        });
    }

    pub async fn previous_track(&self) {
        let controller = self.clone();
        tokio::spawn(async move {
            match controller.session.previous().await {
                Ok(()) => controller.notify_info("Play previous song").await,
                Err(e) => controller.notify_error(&e).await,
            }
        });
    }

    /// Delete the highlighted live-queue entry, then re-derive the mirror —
    /// every later position shifts down by one on the server.
    pub async fn delete_selected(&self) {
        if self.model.active_list().await != ListSource::LiveQueue
            || self.model.queue_is_empty().await
        {
            return;
        }
        let position = self.model.selected().await;

        let controller = self.clone();
        tokio::spawn(async move {
            tracing::info!(position, "Deleting queue entry");
            if let Err(e) = controller.session.delete_at(position).await {
                controller.notify_error(&e).await;
                return;
            }
            controller.refresh_queue_mirror().await;
        });
    }
}
