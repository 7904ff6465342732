//! Reconciliation loop: a fixed-cadence poll that merges the remote
//! transport's authoritative state into the local player projection.

use std::time::Duration;

use crate::errors::AppResult;
use crate::model::PlayerProjection;

use super::AppController;

/// Poll cadence. A tunable, not a contract.
pub const RECONCILE_TICK: Duration = Duration::from_millis(900);

impl AppController {
    /// Spawns the tick task. Each tick polls status and now-playing metadata
    /// and projects both onto the player display, unless an open overlay is
    /// suppressing redraw. A failed tick is simply retried on the next tick
    /// — never fatal, never backing off. The error banner is raised only
    /// when a healthy run first turns failing; repeats while the server
    /// stays down are logged, not repainted over the screen every tick.
    pub fn start_reconciliation(&self) -> tokio::task::JoinHandle<()> {
        let controller = self.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(RECONCILE_TICK);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            let mut healthy = true;

            loop {
                ticker.tick().await;
                if controller.model.should_quit().await {
                    tracing::debug!("Reconciliation loop shutting down");
                    break;
                }
                if controller.model.is_overlay_open().await {
                    continue;
                }
                match controller.reconcile_tick().await {
                    Ok(()) => healthy = true,
                    Err(e) => {
                        if healthy {
                            tracing::error!(error = %e, "Reconciliation poll failed");
                            controller.notify_error(&e).await;
                        } else {
                            tracing::debug!(error = %e, "Reconciliation still failing");
                        }
                        healthy = false;
                    }
                }
            }
        })
    }

    async fn reconcile_tick(&self) -> AppResult<()> {
        let status = self.session.poll_status().await?;
        let now_playing = self.session.current_song().await?;
        self.model
            .set_projection(PlayerProjection { status, now_playing })
            .await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use tokio::io::AsyncWriteExt;
    use tokio::net::TcpListener;

    use crate::model::{AppModel, TransportSession};
    use super::super::AppController;

    /// Greets like the real server, then drops the connection so every poll
    /// afterwards fails.
    async fn vanishing_server() -> std::net::SocketAddr {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            stream.write_all(b"OK MPD 0.23.5\n").await.unwrap();
        });
        addr
    }

    #[tokio::test(start_paused = true)]
    async fn repeated_poll_failures_raise_one_banner() {
        let addr = vanishing_server().await;
        let session = TransportSession::connect("127.0.0.1", addr.port())
            .await
            .unwrap();
        let model = Arc::new(AppModel::new(Vec::new()));
        let controller = AppController::new(model.clone(), session);
        let task = controller.start_reconciliation();

        // First failing tick raises the banner. The tick races the socket
        // EOF, so poll briefly instead of asserting after one fixed sleep.
        let mut shown = false;
        for _ in 0..50 {
            tokio::time::sleep(std::time::Duration::from_millis(10)).await;
            if model.snapshot().await.notification.is_some() {
                shown = true;
                break;
            }
        }
        assert!(shown, "first failing tick must raise a banner");

        // Its own expiry hides it; the ticks that keep failing afterwards
        // must not raise a fresh one.
        tokio::time::sleep(std::time::Duration::from_secs(5)).await;
        assert!(model.snapshot().await.notification.is_none());

        model.set_should_quit().await;
        tokio::time::sleep(std::time::Duration::from_secs(1)).await;
        task.await.unwrap();
    }
}
