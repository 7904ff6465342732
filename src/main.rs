mod config;
mod controller;
mod errors;
mod feed;
mod logging;
mod model;
mod view;

use std::io;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use config::Config;
use controller::AppController;
use model::{AppModel, TransportSession};
use view::AppView;

#[tokio::main]
async fn main() -> Result<()> {
    if let Err(e) = logging::init_logging() {
        eprintln!("Warning: Failed to initialize logging: {}", e);
    }

    tracing::info!("=== mfp-rs Client Starting ===");

    let config = Config::from_env();
    tracing::info!(host = %config.host, port = config.port, "connecting to player daemon");

    let session = TransportSession::connect(&config.host, config.port)
        .await
        .map_err(|e| anyhow::anyhow!("could not connect to {}:{}: {}", config.host, config.port, e))?;

    let model = Arc::new(AppModel::new(config.sources.clone()));
    let controller = AppController::new(model.clone(), session);

    // Load the default feed in the background so the TUI comes up immediately.
    let controller_for_init = controller.clone();
    tokio::spawn(async move {
        controller_for_init.load_catalog(0).await;
        controller_for_init.refresh_queue_mirror().await;
    });

    let _reconciler = controller.start_reconciliation();

    tracing::info!("Starting TUI...");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, model, controller).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!(error = ?err, "Application error");
    }

    tracing::info!("mfp-rs Client shutting down");
    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    model: Arc<AppModel>,
    controller: AppController,
) -> io::Result<()> {
    loop {
        let render_state = model.snapshot().await;

        terminal.draw(|f| {
            AppView::render(f, &render_state);
        })?;

        // Short poll time for smoother UI updates
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                let _ = controller.handle_key_event(key).await;
            }
        }

        if model.should_quit().await {
            break;
        }
    }

    Ok(())
}
