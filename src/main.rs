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

use layered_nav::config::AppConfig;
use layered_nav::controller::{handle_key_event, Collaborators, InputResult, UiManager};
use layered_nav::demo::{demo_catalog, InMemoryLibrary, SimulatedPanel, ToastBoard};
use layered_nav::logging;
use layered_nav::model::JsonFileStore;
use layered_nav::view::{AppView, ViewSnapshot};

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Front-end side of the collaborators, kept for rendering and input.
struct Frontend {
    library: Arc<InMemoryLibrary>,
    panel: Arc<SimulatedPanel>,
    toasts: Arc<ToastBoard>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::load();

    let _log_guard = match logging::init_logging(&config.log_dir, &config.log_filter) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("Warning: Failed to initialize logging: {}", e);
            None
        }
    };

    tracing::info!("=== layered-nav starting ===");
    tracing::debug!(config = ?config, "Configuration loaded");

    let (songs, playlists) = demo_catalog();
    let frontend = Frontend {
        library: Arc::new(InMemoryLibrary::new(songs, playlists)),
        panel: Arc::new(SimulatedPanel::new()),
        toasts: Arc::new(ToastBoard::default()),
    };

    let store = Arc::new(JsonFileStore::new(config.state_dir.clone()));
    tracing::info!(dir = %store.dir().display(), "UI state store");

    let manager = UiManager::new(Collaborators {
        library: frontend.library.clone(),
        panel: frontend.panel.clone(),
        notifier: frontend.toasts.clone(),
        store,
    });
    manager.restore_persistent_state();
    manager.start_persistent_sync(config.sync_interval());

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &manager, &frontend).await;

    manager.persist_now();
    manager.shutdown();

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!(error = ?err, "Application error");
    }

    tracing::info!("layered-nav shutting down");
    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    manager: &UiManager,
    frontend: &Frontend,
) -> io::Result<()> {
    loop {
        let snapshot = ViewSnapshot::capture(manager, frontend.panel.position(), frontend.toasts.current());

        terminal.draw(|f| {
            AppView::render(f, &snapshot);
        })?;

        // Short blocking poll; yield afterwards so the panel animation and
        // the synchronizer get to run between frames.
        if event::poll(POLL_INTERVAL)? {
            if let Event::Key(key) = event::read()? {
                if handle_key_event(manager, &frontend.library, key) == InputResult::Quit {
                    break;
                }
            }
        }
        tokio::task::yield_now().await;
    }

    Ok(())
}
