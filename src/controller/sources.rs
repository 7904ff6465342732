//! Feed loading and source switching.

use crate::feed;
use crate::model::{Catalog, ListSource, QueueMirror};

use super::AppController;

impl AppController {
    /// (Re)loads whichever store backs `choice`. Catalog loads replace the
    /// store wholesale on success; on failure the previously loaded catalog
    /// stays displayed and the error becomes a transient banner. Nothing is
    /// retried automatically.
    pub async fn load_source(&self, choice: ListSource) {
        match choice {
            ListSource::Catalog(index) => self.load_catalog(index).await,
            ListSource::LiveQueue => self.refresh_queue_mirror().await,
        }
    }

    pub async fn load_catalog(&self, index: usize) {
        let Some(source) = self.model.sources().get(index).cloned() else {
            tracing::warn!(index, "No such feed source");
            return;
        };

        match feed::fetch_feed(&source.url).await {
            Ok(items) => {
                let catalog = Catalog::from_feed(items);
                if catalog.is_empty() {
                    tracing::warn!(source = %source.name, "Feed parsed but has no playable entries");
                }
                tracing::info!(source = %source.name, entries = catalog.len(), "Catalog replaced");
                self.model.replace_catalog(catalog).await;
            }
            Err(e) => {
                tracing::error!(source = %source.name, error = %e, "Feed load failed");
                self.notify_error(&e).await;
            }
        }
    }

    /// Re-derives the queue mirror from a fresh listing. Called after every
    /// queue mutation and when switching to the live-queue view; the mirror
    /// is never patched in place.
    pub async fn refresh_queue_mirror(&self) {
        match self.session.playlist().await {
            Ok(lines) => {
                let mirror = QueueMirror::from_listing(&lines);
                tracing::debug!(entries = mirror.len(), "Queue mirror refreshed");
                self.model.replace_queue(mirror).await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Queue listing failed");
                self.notify_error(&e).await;
            }
        }
    }
}
