use crate::state::app_settings::AppSettings;
use crate::state::app_state::AppState;
use chrono::{DateTime, Utc};
use matchday_api::Dataset;

pub struct App {
    pub settings: AppSettings,
    pub state: AppState,
}

impl App {
    pub fn new(settings: AppSettings) -> Self {
        let app = Self {
            state: AppState::new(),
            settings,
        };

        if let Some(level) = app.settings.log_level {
            log::set_max_level(level);
            tui_logger::set_default_level(level);
        }

        app
    }

    // -----------------------------------------------------------------------
    // Network response handlers (called from main_ui_loop)
    // -----------------------------------------------------------------------

    pub fn on_dashboard_loaded(&mut self, dataset: Dataset, fetched_at: DateTime<Utc>) {
        log::info!(
            "dashboard loaded: {} fixtures, {} standings",
            dataset.next_fixture.len(),
            dataset.league_table.len()
        );
        if dataset.is_empty() {
            log::warn!("dashboard snapshot has no rows in any tab");
        }
        self.state.apply_snapshot(dataset, fetched_at, &self.settings.view);
    }

    /// Keeps whatever was last shown; the banner stays until a load succeeds.
    pub fn on_error(&mut self, message: String) {
        self.state.last_error = Some(message);
    }

    // -----------------------------------------------------------------------
    // Countdown tick (called from the CountdownTick event)
    // -----------------------------------------------------------------------

    pub fn on_countdown_tick(&mut self, now: DateTime<Utc>) {
        self.state.recompute(now, &self.settings.view);
    }

    pub fn toggle_show_logs(&mut self) {
        self.state.show_logs = !self.state.show_logs;
    }

    pub fn toggle_full_screen(&mut self) {
        self.settings.full_screen = !self.settings.full_screen;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeDelta, TimeZone};
    use serde_json::json;

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 6, 6, 12, 0, 0).unwrap()
    }

    fn snapshot() -> Dataset {
        Dataset::from_value(json!({
            "nextFixture": [{ "Team": "NDSC", "Opponent": "Lisburn", "date": "2026-06-06T14:00:00Z" }],
            "leagueTable": [{ "position": 2, "team": "B" }, { "position": 1, "team": "A" }]
        }))
    }

    fn app() -> App {
        App {
            settings: AppSettings::default(),
            state: AppState::new(),
        }
    }

    #[test]
    fn load_builds_view_and_clears_error() {
        let mut app = app();
        app.on_error("API error: 502".into());
        assert!(app.state.awaiting_first_load());

        app.on_dashboard_loaded(snapshot(), start());

        assert!(!app.state.awaiting_first_load());
        assert!(app.state.last_error.is_none());
        assert!(app.state.last_updated.is_some());
        let view = app.state.view.as_ref().unwrap();
        assert_eq!(view.league_table[0].team, "A");
        assert_eq!(view.primary_countdown.as_deref(), Some("0d 2h 0m"));
    }

    #[test]
    fn error_after_load_keeps_last_view() {
        let mut app = app();
        app.on_dashboard_loaded(snapshot(), start());
        app.on_error("Network error".into());
        app.on_countdown_tick(start() + TimeDelta::minutes(1));

        assert_eq!(app.state.last_error.as_deref(), Some("Network error"));
        assert!(app.state.view.is_some());
    }

    #[test]
    fn tick_counts_down_without_refetch() {
        let mut app = app();
        app.on_dashboard_loaded(snapshot(), start());

        app.on_countdown_tick(start() + TimeDelta::minutes(61));
        let view = app.state.view.as_ref().unwrap();
        assert_eq!(view.primary_countdown.as_deref(), Some("0d 0h 59m"));

        app.on_countdown_tick(start() + TimeDelta::hours(3));
        let view = app.state.view.as_ref().unwrap();
        assert!(view.primary_fixture.is_none());
        assert_eq!(view.fixtures[0].countdown.as_deref(), Some("Played"));
    }

    #[test]
    fn tick_before_first_load_is_harmless() {
        let mut app = app();
        app.on_countdown_tick(start());
        assert!(app.state.view.is_none());
        assert!(app.state.awaiting_first_load());
    }
}
