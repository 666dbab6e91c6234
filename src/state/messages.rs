use crate::state::network::LoadingState;
use chrono::{DateTime, Utc};
use crossterm::event::KeyEvent;
use matchday_api::Dataset;

#[derive(Debug, Clone)]
pub enum NetworkRequest {
    LoadDashboard,
}

#[derive(Debug)]
pub enum NetworkResponse {
    LoadingStateChanged { loading_state: LoadingState },
    DashboardLoaded { dataset: Dataset, fetched_at: DateTime<Utc> },
    Error { message: String },
}

#[derive(Debug, Clone)]
pub enum UiEvent {
    KeyPressed(KeyEvent),
    Resize,
    AppStarted,
    /// Recompute countdowns against the clock without refetching.
    CountdownTick,
}
