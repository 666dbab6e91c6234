use chrono::{DateTime, Local, Utc};
use matchday_api::sheet::{self, Cell};

pub const PLACEHOLDER: &str = "—";

/// "Sat 06 Jun, 19:30" in local time.
pub fn date_time(t: DateTime<Utc>) -> String {
    t.with_timezone(&Local).format("%a %d %b, %H:%M").to_string()
}

/// "Sat 06 Jun 2026" in local time; unreadable dates are shown as typed.
pub fn date(cell: &Option<Cell>) -> String {
    match sheet::timestamp(cell) {
        Some(t) => t.with_timezone(&Local).format("%a %d %b %Y").to_string(),
        None => sheet::display_or(cell, ""),
    }
}

/// Rate stats to three places, e.g. `0.310`.
pub fn rate(value: Option<f64>) -> String {
    value.map_or_else(|| PLACEHOLDER.to_string(), |v| format!("{v:.3}"))
}

pub fn progress_bar(percent: f64, width: usize) -> String {
    let percent = percent.clamp(0.0, 100.0);
    let filled = ((percent / 100.0) * width as f64).round() as usize;
    let filled = filled.min(width);
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max.saturating_sub(1)).collect();
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rate_uses_three_places() {
        assert_eq!(rate(Some(0.31)), "0.310");
        assert_eq!(rate(None), PLACEHOLDER);
    }

    #[test]
    fn progress_bar_fills_proportionally() {
        assert_eq!(progress_bar(5.0, 10), "█░░░░░░░░░");
        assert_eq!(progress_bar(50.0, 10), "█████░░░░░");
        assert_eq!(progress_bar(150.0, 4), "████");
        assert_eq!(progress_bar(0.0, 0), "");
    }

    #[test]
    fn undated_cells_show_as_typed() {
        assert_eq!(date(&Some(Cell::Text("TBC".into()))), "TBC");
        assert_eq!(date(&None), "");
    }

    #[test]
    fn truncate_marks_cut_names() {
        assert_eq!(truncate("Belfast", 10), "Belfast");
        assert_eq!(truncate("North Down Softball", 6), "North…");
    }
}
