use log::LevelFilter;
use matchday_api::client::DEFAULT_DASHBOARD_URL;
use matchday_api::view::ViewOptions;
use std::env;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct AppSettings {
    pub full_screen: bool,
    pub log_level: Option<LevelFilter>,
    pub dashboard_url: String,
    pub refresh_every: Duration,
    pub tick_every: Duration,
    pub view: ViewOptions,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            full_screen: false,
            log_level: None,
            dashboard_url: DEFAULT_DASHBOARD_URL.to_string(),
            refresh_every: Duration::from_secs(60),
            tick_every: Duration::from_secs(60),
            view: ViewOptions::default(),
        }
    }
}

impl AppSettings {
    /// Defaults, overridden by `MATCHDAY_DASHBOARD_URL` and `MATCHDAY_LOG`.
    pub fn load() -> Self {
        Self::from_vars(
            env::var("MATCHDAY_DASHBOARD_URL").ok(),
            env::var("MATCHDAY_LOG").ok(),
        )
    }

    fn from_vars(dashboard_url: Option<String>, log_level: Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            dashboard_url: dashboard_url
                .filter(|url| !url.trim().is_empty())
                .unwrap_or(defaults.dashboard_url.clone()),
            log_level: log_level.and_then(|level| level.trim().parse().ok()),
            ..defaults
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_overrides_apply() {
        let settings = AppSettings::from_vars(
            Some("http://club.example/api/dashboard".into()),
            Some("debug".into()),
        );
        assert_eq!(settings.dashboard_url, "http://club.example/api/dashboard");
        assert_eq!(settings.log_level, Some(LevelFilter::Debug));
        assert_eq!(settings.refresh_every, Duration::from_secs(60));
    }

    #[test]
    fn blank_or_bad_values_fall_back() {
        let settings = AppSettings::from_vars(Some(" ".into()), Some("chatty".into()));
        assert_eq!(settings.dashboard_url, DEFAULT_DASHBOARD_URL);
        assert_eq!(settings.log_level, None);
    }
}
