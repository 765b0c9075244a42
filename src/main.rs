use chrono::Local;
use color_eyre::Result;
use overhead_tui::{
    airlines::AirlineDirectory,
    api::FlightProvider,
    app::{Action, App},
    config::Config,
    coords::GeoPoint,
    events::{Event, EventHandler},
    location, logging,
    search::{run_search, SearchPolicy},
    terminal::{install_hooks, restore_terminal, setup_terminal},
    ui,
};
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedSender;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    // Instrumentation and safety
    let _log_guard = logging::initialize_logging();
    install_hooks()?;

    let config = Config::load();
    let airlines = AirlineDirectory::load(config.airlines.csv_path.as_deref());
    info!("Airline table ready with {} entries", airlines.len());
    let provider = Arc::new(FlightProvider::new(&config.api));

    // Ready terminal and state
    let mut terminal = setup_terminal()?;
    let mut app = App::new(config, airlines);
    let mut events = EventHandler::new(150);

    if app.config.location.auto_locate {
        app.begin_locate();
        spawn_locate(events.tx.clone());
    }

    // Main loop
    while !app.should_quit {
        terminal.draw(|f| ui::render(f, &app))?;

        let Some(event) = events.next().await else {
            break;
        };
        match event {
            Event::Tick => app.on_tick(),
            Event::Input(key) => match app.handle_key(key) {
                Some(Action::Search(origin)) => spawn_search(
                    Arc::clone(&provider),
                    origin,
                    app.config.search.clone(),
                    events.tx.clone(),
                ),
                Some(Action::Locate) => spawn_locate(events.tx.clone()),
                None => {}
            },
            Event::SearchFinished {
                origin,
                result,
                finished_at,
            } => app.on_search_finished(origin, result, finished_at),
            Event::Located(point) => app.on_located(point),
        }
    }

    restore_terminal(terminal)?;
    Ok(())
}

fn spawn_search(
    provider: Arc<FlightProvider>,
    origin: GeoPoint,
    policy: SearchPolicy,
    tx: UnboundedSender<Event>,
) {
    tokio::spawn(async move {
        let result = run_search(provider.as_ref(), origin, &policy).await;
        if let Err(e) = &result {
            error!("Fetching aircraft states failed: {}", e);
        }
        let _ = tx.send(Event::SearchFinished {
            origin,
            result,
            finished_at: Local::now(),
        });
    });
}

fn spawn_locate(tx: UnboundedSender<Event>) {
    tokio::spawn(async move {
        let point = location::locate_by_ip().await;
        let _ = tx.send(Event::Located(point));
    });
}
