pub mod client;
pub mod freshness;
pub mod gateway;
pub mod sheet;
pub mod upstream;
pub mod view;

use crate::sheet::Cell;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

// ---------------------------------------------------------------------------
// Domain types: one struct per sheet tab, keyed exactly as the sheet exports
// ---------------------------------------------------------------------------

/// A full snapshot of the club sheet, as served by `GET /api/dashboard`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    #[serde(default, deserialize_with = "sheet::rows")]
    pub next_fixture: Vec<Fixture>,
    #[serde(default, deserialize_with = "sheet::rows")]
    pub league_table: Vec<Standing>,
    #[serde(default, deserialize_with = "sheet::rows")]
    pub top_hitters: Vec<Hitter>,
    #[serde(default, deserialize_with = "sheet::rows")]
    pub recent_results: Vec<GameResult>,
    #[serde(default, deserialize_with = "sheet::rows")]
    pub home_run_leaders: Vec<HomeRunLeader>,
}

impl Dataset {
    /// Read a snapshot out of arbitrary JSON. Anything that is not an object
    /// of sheet tabs reads as an empty dataset.
    pub fn from_value(raw: Value) -> Self {
        serde_json::from_value(raw).unwrap_or_else(|e| {
            log::debug!("upstream payload is not a dataset: {e}");
            Self::default()
        })
    }

    pub fn is_empty(&self) -> bool {
        self.next_fixture.is_empty()
            && self.league_table.is_empty()
            && self.top_hitters.is_empty()
            && self.recent_results.is_empty()
            && self.home_run_leaders.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Fixture {
    #[serde(rename = "Team", default, deserialize_with = "sheet::text")]
    pub team: String,
    #[serde(rename = "Opponent", default, deserialize_with = "sheet::text")]
    pub opponent: String,
    #[serde(default)]
    pub date: Option<Cell>,
    #[serde(rename = "Venue", default, deserialize_with = "sheet::text")]
    pub venue: String,
    #[serde(rename = "League", default, deserialize_with = "sheet::text")]
    pub league: String,
    #[serde(rename = "Notes", default, deserialize_with = "sheet::text")]
    pub notes: String,
    #[serde(default)]
    pub lat: Option<Cell>,
    #[serde(default)]
    pub lng: Option<Cell>,
}

impl Fixture {
    pub fn kickoff(&self) -> Option<DateTime<Utc>> {
        sheet::timestamp(&self.date)
    }

    pub fn notes(&self) -> Option<&str> {
        let notes = self.notes.trim();
        (!notes.is_empty()).then_some(notes)
    }

    /// Venue coordinates, when both halves are present.
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        Some((sheet::number(&self.lat)?, sheet::number(&self.lng)?))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Standing {
    #[serde(default)]
    pub position: Option<Cell>,
    #[serde(default, deserialize_with = "sheet::text")]
    pub team: String,
    #[serde(default)]
    pub played: Option<Cell>,
    #[serde(default)]
    pub wins: Option<Cell>,
    #[serde(default)]
    pub losses: Option<Cell>,
    #[serde(default)]
    pub points: Option<Cell>,
}

impl Standing {
    pub fn rank(&self) -> Option<f64> {
        sheet::number(&self.position)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Hitter {
    #[serde(default, deserialize_with = "sheet::text")]
    pub player: String,
    #[serde(default, deserialize_with = "sheet::text")]
    pub team: String,
    #[serde(default)]
    pub avg: Option<Cell>,
    #[serde(default)]
    pub obp: Option<Cell>,
    #[serde(default)]
    pub rbis: Option<Cell>,
    #[serde(rename = "Games Played", default)]
    pub games_played: Option<Cell>,
}

impl Hitter {
    pub fn batting_average(&self) -> Option<f64> {
        sheet::number(&self.avg)
    }

    pub fn on_base_percentage(&self) -> Option<f64> {
        sheet::number(&self.obp)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GameResult {
    #[serde(rename = "Team", default, deserialize_with = "sheet::text")]
    pub team: String,
    #[serde(rename = "Opponent", default, deserialize_with = "sheet::text")]
    pub opponent: String,
    #[serde(rename = "Date", default)]
    pub date: Option<Cell>,
    #[serde(rename = "NDSC Score", default)]
    pub club_score: Option<Cell>,
    #[serde(rename = "Opponent Score", default)]
    pub opponent_score: Option<Cell>,
    #[serde(rename = "Result", default, deserialize_with = "sheet::text")]
    pub result: String,
}

impl GameResult {
    pub fn played_at(&self) -> Option<DateTime<Utc>> {
        sheet::timestamp(&self.date)
    }

    pub fn flag(&self) -> ResultFlag {
        ResultFlag::parse(&self.result)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultFlag {
    Win,
    Loss,
    Other,
}

impl ResultFlag {
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_uppercase().as_str() {
            "W" => ResultFlag::Win,
            "L" => ResultFlag::Loss,
            _ => ResultFlag::Other,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HomeRunLeader {
    #[serde(rename = "Player", default, deserialize_with = "sheet::text")]
    pub player: String,
    #[serde(rename = "Team", default, deserialize_with = "sheet::text")]
    pub team: String,
    #[serde(rename = "Home_Runs", default)]
    pub home_runs: Option<Cell>,
}

impl HomeRunLeader {
    /// Missing counts read as zero.
    pub fn count(&self) -> f64 {
        sheet::number(&self.home_runs).unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn dataset_reads_sheet_keys() {
        let raw = json!({
            "nextFixture": [{
                "Team": "NDSC Firsts", "Opponent": "Belfast Bandits",
                "date": "2026-06-06T18:30:00.000Z", "Venue": "Ward Park",
                "League": "NI League", "Notes": "", "lat": 54.66, "lng": "-5.67"
            }],
            "leagueTable": [{ "position": "1", "team": "NDSC", "played": 4, "wins": 3, "losses": 1, "points": 6 }],
            "topHitters": [{ "player": "A. Smith", "team": "NDSC", "avg": 0.41, "obp": ".5", "rbis": 7, "Games Played": 4 }],
            "recentResults": [{ "Team": "NDSC", "Opponent": "Lisburn", "Date": "2026-05-30", "NDSC Score": 12, "Opponent Score": 9, "Result": "w" }],
            "homeRunLeaders": [{ "Player": "B. Jones", "Team": 2, "Home_Runs": "3" }]
        });
        let data = Dataset::from_value(raw);

        let fixture = &data.next_fixture[0];
        assert_eq!(fixture.team, "NDSC Firsts");
        assert!(fixture.kickoff().is_some());
        assert_eq!(fixture.notes(), None);
        assert_eq!(fixture.coordinates(), Some((54.66, -5.67)));
        assert_eq!(data.league_table[0].rank(), Some(1.0));
        assert_eq!(data.top_hitters[0].on_base_percentage(), Some(0.5));
        assert_eq!(data.recent_results[0].flag(), ResultFlag::Win);
        assert_eq!(data.home_run_leaders[0].team, "2");
        assert_eq!(data.home_run_leaders[0].count(), 3.0);
    }

    #[test]
    fn missing_tabs_and_stray_rows_are_tolerated() {
        let data = Dataset::from_value(json!({
            "leagueTable": null,
            "topHitters": [null, 4, { "player": "C. Lee" }]
        }));
        assert!(data.league_table.is_empty());
        assert_eq!(data.top_hitters.len(), 1);
        assert_eq!(data.top_hitters[0].batting_average(), None);
    }

    #[test]
    fn malformed_tab_does_not_discard_the_others() {
        let data = Dataset::from_value(json!({
            "leagueTable": { "error": "sheet missing" },
            "recentResults": "n/a",
            "topHitters": [{ "player": "A. Smith", "avg": 0.3 }],
            "homeRunLeaders": [{ "Player": "B. Jones", "Home_Runs": 4 }]
        }));
        assert!(data.league_table.is_empty());
        assert!(data.recent_results.is_empty());
        assert_eq!(data.top_hitters.len(), 1);
        assert_eq!(data.top_hitters[0].batting_average(), Some(0.3));
        assert_eq!(data.home_run_leaders.len(), 1);

        let typed: Dataset = serde_json::from_str(r#"{"leagueTable": "n/a", "nextFixture": [{"Team": "NDSC"}]}"#)
            .unwrap();
        assert_eq!(typed.next_fixture[0].team, "NDSC");
    }

    #[test]
    fn non_object_payload_is_empty_dataset() {
        assert!(Dataset::from_value(json!([1, 2, 3])).is_empty());
    }

    #[test]
    fn result_flag_is_case_insensitive() {
        assert_eq!(ResultFlag::parse("l"), ResultFlag::Loss);
        assert_eq!(ResultFlag::parse(" W "), ResultFlag::Win);
        assert_eq!(ResultFlag::parse("T"), ResultFlag::Other);
        assert_eq!(ResultFlag::parse(""), ResultFlag::Other);
    }
}
