use color_eyre::Result;
use farefinder_tui::{
    api::FlightProvider,
    app::{App, SearchRequest},
    config::Config,
    events::{Event, EventHandler},
    logging,
    terminal::{self, RestoreGuard},
    ui,
};
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedSender;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    // Instrumentation and safety
    let _log_guard = logging::initialize_logging();
    terminal::install_hooks(|| {
        // Force terminal cleanup!
        terminal::restore_terminal().ok();
    })?;

    let config = Config::load();
    let provider = Arc::new(FlightProvider::new(&config.api)?);
    info!("Using search endpoint at {}", provider.base_url());

    // Every exit from here on, `?` included, leaves the terminal usable.
    let _restore = RestoreGuard::new(|| {
        if let Err(e) = terminal::restore_terminal() {
            error!("Failed to restore terminal: {}", e);
        }
    });

    // Ready terminal and state
    let mut tui = terminal::setup_terminal()?;
    let mut app = App::new();
    let mut events = EventHandler::new(config.ui.tick_rate_ms);

    // Main loop
    while !app.should_quit {
        tui.draw(|f| ui::render(f, &app))?;

        let Some(event) = events.next().await else {
            break;
        };
        match event {
            Event::Tick => app.on_tick(),
            Event::Input(key) => {
                if let Some(request) = app.handle_key(key) {
                    spawn_search(Arc::clone(&provider), request, events.tx.clone());
                }
            }
            Event::SearchComplete { request_id, outcome } => {
                app.on_search_complete(request_id, outcome)
            }
        }
    }

    Ok(())
}

/// Fetches in the background; the result comes back as an event.
fn spawn_search(provider: Arc<FlightProvider>, request: SearchRequest, tx: UnboundedSender<Event>) {
    tokio::spawn(async move {
        let outcome = provider.search(&request.query).await;
        let _ = tx.send(Event::SearchComplete {
            request_id: request.id,
            outcome,
        });
    });
}
