use crate::app::App;
use crate::state::messages::NetworkRequest;
use crossterm::event::KeyCode::Char;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::Arc;
use tokio::sync::{Mutex, mpsc};

pub async fn handle_key_bindings(
    key_event: KeyEvent,
    app: &Arc<Mutex<App>>,
    network_requests: &mpsc::Sender<NetworkRequest>,
) {
    let mut guard = app.lock().await;

    match (key_event.code, key_event.modifiers) {
        // Quit
        (Char('q') | KeyCode::Esc, _) | (Char('c'), KeyModifiers::CONTROL) => {
            crate::cleanup_terminal();
            std::process::exit(0);
        }

        // Manual refresh queues behind any in-flight fetch; the last response wins.
        (Char('r') | KeyCode::F(5), _) => {
            drop(guard);
            let _ = network_requests.send(NetworkRequest::LoadDashboard).await;
        }

        (Char('f'), _) => guard.toggle_full_screen(),
        (Char('"'), _) => guard.toggle_show_logs(),

        _ => {}
    }
}
