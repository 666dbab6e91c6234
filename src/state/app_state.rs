use chrono::{DateTime, Local, Utc};
use matchday_api::Dataset;
use matchday_api::view::{DashboardView, ViewOptions, build_view};

/// Everything the draw pass reads. Only the UI loop writes to it.
#[derive(Debug, Default)]
pub struct AppState {
    /// The snapshot the current view was built from.
    pub dataset: Option<Dataset>,
    pub view: Option<DashboardView>,
    /// Shown until the next successful refresh.
    pub last_error: Option<String>,
    /// Local wall-clock "HH:MM" of the last successful load.
    pub last_updated: Option<String>,
    pub has_loaded: bool,
    pub show_logs: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the snapshot and rebuild the view.
    pub fn apply_snapshot(&mut self, dataset: Dataset, now: DateTime<Utc>, options: &ViewOptions) {
        self.view = Some(build_view(&dataset, now, options));
        self.dataset = Some(dataset);
        self.last_error = None;
        self.last_updated = Some(now.with_timezone(&Local).format("%H:%M").to_string());
        self.has_loaded = true;
    }

    /// Rebuild time-derived fields from the held snapshot.
    pub fn recompute(&mut self, now: DateTime<Utc>, options: &ViewOptions) {
        if let Some(dataset) = &self.dataset {
            self.view = Some(build_view(dataset, now, options));
        }
    }

    pub fn awaiting_first_load(&self) -> bool {
        !self.has_loaded
    }
}
