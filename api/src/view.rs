//! Display-ready view of a [`Dataset`]: windowed fixtures with countdowns,
//! and every leaderboard in the order it is shown.
//!
//! Everything here is a pure function of the snapshot and the clock passed
//! in. Rows are never dropped for a bad field (apart from fixtures that cannot
//! be placed in time); bad fields sort last instead.

use crate::{Dataset, Fixture, GameResult, Hitter, HomeRunLeader, Standing};
use chrono::{DateTime, TimeDelta, Utc};
use serde::Serialize;
use std::cmp::Ordering;

pub const PLAYED_LABEL: &str = "Played";

pub const DISPLAY_LIMIT_HITTERS: usize = 4;
pub const DISPLAY_LIMIT_RESULTS: usize = 4;
pub const DISPLAY_LIMIT_HOME_RUNS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewOptions {
    /// How long a started fixture stays on the board, labelled "Played".
    pub grace_window: TimeDelta,
    /// Lookahead over which the progress bar fills.
    pub progress_window: TimeDelta,
    /// Percentage shown for fixtures further out than `progress_window`.
    pub progress_floor: f64,
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self {
            grace_window: TimeDelta::hours(24),
            progress_window: TimeDelta::days(7),
            progress_floor: 5.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FixtureCard {
    pub fixture: Fixture,
    pub kickoff: DateTime<Utc>,
    pub played: bool,
    pub countdown: Option<String>,
    pub progress: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    pub fixtures: Vec<FixtureCard>,
    pub primary_fixture: Option<FixtureCard>,
    pub primary_countdown: Option<String>,
    pub league_table: Vec<Standing>,
    pub top_hitters: Vec<Hitter>,
    pub recent_results: Vec<GameResult>,
    pub home_run_leaders: Vec<HomeRunLeader>,
}

pub fn build_view(data: &Dataset, now: DateTime<Utc>, options: &ViewOptions) -> DashboardView {
    let fixtures = fixture_cards(&data.next_fixture, now, options);

    // Primary = first fixture still to start. One exactly at `now` has started.
    let primary_fixture = fixtures.iter().find(|card| card.kickoff > now).cloned();
    let primary_countdown = primary_fixture.as_ref().and_then(|card| card.countdown.clone());

    DashboardView {
        fixtures,
        primary_fixture,
        primary_countdown,
        league_table: sort_league_table(&data.league_table),
        top_hitters: sort_top_hitters(&data.top_hitters),
        recent_results: sort_recent_results(&data.recent_results),
        home_run_leaders: sort_home_run_leaders(&data.home_run_leaders),
    }
}

/// Ascending by kickoff; fixtures with no readable date go last.
pub fn sort_fixtures(rows: &[Fixture]) -> Vec<Fixture> {
    let mut sorted = rows.to_vec();
    sorted.sort_by_key(|f| f.kickoff().map_or(i64::MAX, |t| t.timestamp_millis()));
    sorted
}

/// Sorted fixtures that are upcoming or inside the grace window.
pub fn fixture_cards(rows: &[Fixture], now: DateTime<Utc>, options: &ViewOptions) -> Vec<FixtureCard> {
    sort_fixtures(rows)
        .into_iter()
        .filter_map(|fixture| {
            let kickoff = fixture.kickoff()?;
            if kickoff < now - options.grace_window {
                return None;
            }
            Some(FixtureCard {
                kickoff,
                played: kickoff <= now,
                countdown: countdown_label(Some(kickoff), now, options.grace_window),
                progress: progress_percent(kickoff, now, options),
                fixture,
            })
        })
        .collect()
}

/// `"{d}d {h}h {m}m"` until `target`, "Played" inside the grace window,
/// `None` when the date is unknown or long gone.
pub fn countdown_label(
    target: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
    grace_window: TimeDelta,
) -> Option<String> {
    let target = target?;
    let remaining = target - now;

    if remaining <= TimeDelta::zero() {
        return (now - target <= grace_window).then(|| PLAYED_LABEL.to_string());
    }

    let total_minutes = remaining.num_minutes();
    let days = total_minutes / (24 * 60);
    let hours = (total_minutes % (24 * 60)) / 60;
    let minutes = total_minutes % 60;
    Some(format!("{days}d {hours}h {minutes}m"))
}

/// 0–100 fill that rises as kickoff approaches. Never below the floor,
/// 100 once the fixture has started.
pub fn progress_percent(target: DateTime<Utc>, now: DateTime<Utc>, options: &ViewOptions) -> f64 {
    let remaining = target - now;
    if remaining <= TimeDelta::zero() {
        return 100.0;
    }
    if remaining >= options.progress_window {
        return options.progress_floor;
    }

    let window_ms = options.progress_window.num_milliseconds() as f64;
    let elapsed = 1.0 - remaining.num_milliseconds() as f64 / window_ms;
    (elapsed * 100.0).clamp(options.progress_floor, 100.0)
}

pub fn sort_league_table(rows: &[Standing]) -> Vec<Standing> {
    let mut sorted = rows.to_vec();
    sorted.sort_by(|a, b| ascending_missing_last(a.rank(), b.rank()));
    sorted
}

pub fn sort_top_hitters(rows: &[Hitter]) -> Vec<Hitter> {
    let mut sorted = rows.to_vec();
    sorted.sort_by(|a, b| descending_missing_last(a.batting_average(), b.batting_average()));
    sorted
}

/// Newest first. Undated rows sort after every dated one, including any
/// dated before 1970.
pub fn sort_recent_results(rows: &[GameResult]) -> Vec<GameResult> {
    let mut sorted = rows.to_vec();
    sorted.sort_by(|a, b| descending_missing_last(a.played_at(), b.played_at()));
    sorted
}

pub fn sort_home_run_leaders(rows: &[HomeRunLeader]) -> Vec<HomeRunLeader> {
    let mut sorted = rows.to_vec();
    sorted.sort_by(|a, b| b.count().partial_cmp(&a.count()).unwrap_or(Ordering::Equal));
    sorted
}

fn ascending_missing_last<T: PartialOrd>(a: Option<T>, b: Option<T>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn descending_missing_last<T: PartialOrd>(a: Option<T>, b: Option<T>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
