mod app;
mod components;
mod draw;
mod keys;
mod state;
mod ui;

use crate::app::App;
use crate::state::app_settings::AppSettings;
use crate::state::messages::{NetworkRequest, NetworkResponse, UiEvent};
use crate::state::network::{LoadingState, NetworkWorker};
use crate::state::refresher::PeriodicRefresher;
use chrono::Utc;
use crossterm::event::{self as crossterm_event, Event};
use crossterm::{cursor, execute, terminal};
use log::{error, info};
use matchday_api::client::DashboardClient;
use std::io::Stdout;
use std::sync::Arc;
use std::{io, panic};
use tokio::sync::{Mutex, mpsc};
use tui::{Terminal, backend::CrosstermBackend};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if handle_cli_args() {
        return Ok(());
    }

    better_panic::install();

    let backend = CrosstermBackend::new(io::stdout());
    let terminal = Terminal::new(backend)?;

    setup_panic_hook();
    setup_terminal()?;

    tui_logger::init_logger(log::LevelFilter::Info)?;
    tui_logger::set_default_level(log::LevelFilter::Info);

    let settings = AppSettings::load();
    info!("polling {}", settings.dashboard_url);
    let client = DashboardClient::new(settings.dashboard_url.clone());
    let refresh_every = settings.refresh_every;
    let tick_every = settings.tick_every;

    let app = Arc::new(Mutex::new(App::new(settings)));

    let (ui_event_tx, ui_event_rx) = mpsc::channel::<UiEvent>(100);
    let (network_req_tx, network_req_rx) = mpsc::channel::<NetworkRequest>(100);
    let (network_resp_tx, network_resp_rx) = mpsc::channel::<NetworkResponse>(100);

    // Input handler thread
    let input_handler = tokio::spawn(input_handler_task(ui_event_tx.clone()));

    // Network thread
    let network_worker = NetworkWorker::new(client, network_req_rx, network_resp_tx);
    let network_task = tokio::spawn(network_worker.run());

    // Data poll (every 60s)
    let periodic_updater = PeriodicRefresher::new(network_req_tx.clone(), refresh_every);
    let periodic_task = tokio::spawn(periodic_updater.run());

    // Countdown tick (every 60s), independent of the data poll
    let tick_tx = ui_event_tx.clone();
    let countdown_task = tokio::spawn(async move {
        let mut interval = tokio::time::interval(tick_every);
        interval.tick().await;
        loop {
            interval.tick().await;
            if tick_tx.send(UiEvent::CountdownTick).await.is_err() {
                break;
            }
        }
    });

    // Trigger dashboard load on startup
    let _ = ui_event_tx.send(UiEvent::AppStarted).await;

    main_ui_loop(terminal, app, ui_event_rx, network_req_tx, network_resp_rx).await;

    input_handler.abort();
    network_task.abort();
    periodic_task.abort();
    countdown_task.abort();

    Ok(())
}

fn handle_cli_args() -> bool {
    let mut args = std::env::args().skip(1);
    let Some(arg) = args.next() else {
        return false;
    };

    match arg.as_str() {
        "-h" | "--help" => {
            println!("{}", usage_text());
            true
        }
        "-V" | "--version" => {
            println!("matchday {}", env!("CARGO_PKG_VERSION"));
            true
        }
        _ => {
            eprintln!("Unknown argument: {arg}\n\n{}", usage_text());
            std::process::exit(2);
        }
    }
}

fn usage_text() -> &'static str {
    "matchday - club matchday dashboard in your terminal

Usage:
  matchday
  matchday --help
  matchday --version

Keys:
  r  refresh now    f  full screen    \"  logs    q  quit

Environment:
  MATCHDAY_DASHBOARD_URL   Gateway endpoint (default http://127.0.0.1:3000/api/dashboard)
  MATCHDAY_LOG             Log level for the log pane (error, warn, info, debug)"
}

async fn main_ui_loop(
    mut terminal: Terminal<CrosstermBackend<Stdout>>,
    app: Arc<Mutex<App>>,
    mut ui_events: mpsc::Receiver<UiEvent>,
    network_requests: mpsc::Sender<NetworkRequest>,
    mut network_responses: mpsc::Receiver<NetworkResponse>,
) {
    let mut loading = LoadingState::default();

    loop {
        tokio::select! {
            Some(ui_event) = ui_events.recv() => {
                let should_redraw = handle_ui_event(ui_event, &app, &network_requests).await;
                if should_redraw {
                    let mut app_guard = app.lock().await;
                    draw::draw(&mut terminal, &mut app_guard, loading);
                }
            }

            Some(response) = network_responses.recv() => {
                handle_network_response(response, &app, &mut loading).await;
                let mut app_guard = app.lock().await;
                draw::draw(&mut terminal, &mut app_guard, loading);
            }

            else => break,
        }
    }
}

async fn handle_ui_event(
    ui_event: UiEvent,
    app: &Arc<Mutex<App>>,
    network_requests: &mpsc::Sender<NetworkRequest>,
) -> bool {
    match ui_event {
        UiEvent::AppStarted => {
            let _ = network_requests.send(NetworkRequest::LoadDashboard).await;
            true
        }
        UiEvent::KeyPressed(key_event) => {
            keys::handle_key_bindings(key_event, app, network_requests).await;
            true
        }
        UiEvent::Resize => true,
        UiEvent::CountdownTick => {
            let mut guard = app.lock().await;
            guard.on_countdown_tick(Utc::now());
            true
        }
    }
}

async fn handle_network_response(
    response: NetworkResponse,
    app: &Arc<Mutex<App>>,
    loading: &mut LoadingState,
) {
    match response {
        NetworkResponse::LoadingStateChanged { loading_state } => {
            *loading = loading_state;
        }
        NetworkResponse::DashboardLoaded { dataset, fetched_at } => {
            let mut guard = app.lock().await;
            guard.on_dashboard_loaded(dataset, fetched_at);
        }
        NetworkResponse::Error { message } => {
            error!("Network error: {message}");
            let mut guard = app.lock().await;
            guard.on_error(message);
        }
    }
}

async fn input_handler_task(ui_events: mpsc::Sender<UiEvent>) {
    loop {
        let event = tokio::task::spawn_blocking(crossterm_event::read).await;
        let Ok(Ok(event)) = event else {
            continue;
        };
        let ui_event = match event {
            Event::Key(key_event) => Some(UiEvent::KeyPressed(key_event)),
            Event::Resize(_, _) => Some(UiEvent::Resize),
            _ => None,
        };

        if let Some(ui_event) = ui_event
            && ui_events.send(ui_event).await.is_err()
        {
            break;
        }
    }
}

fn setup_terminal() -> io::Result<()> {
    let mut stdout = io::stdout();
    execute!(stdout, cursor::Hide)?;
    execute!(stdout, terminal::EnterAlternateScreen)?;
    execute!(stdout, terminal::Clear(terminal::ClearType::All))?;
    terminal::enable_raw_mode()
}

pub fn cleanup_terminal() {
    let mut stdout = io::stdout();
    let _ = execute!(stdout, cursor::MoveTo(0, 0));
    let _ = execute!(stdout, terminal::Clear(terminal::ClearType::All));
    let _ = execute!(stdout, terminal::LeaveAlternateScreen);
    let _ = execute!(stdout, cursor::Show);
    let _ = terminal::disable_raw_mode();
}

fn setup_panic_hook() {
    panic::set_hook(Box::new(|panic_info| {
        cleanup_terminal();
        better_panic::Settings::auto().create_panic_handler()(panic_info);
    }));
}
