/// Lenient cell handling for rows exported from the club spreadsheet.
///
/// Sheet cells arrive as whatever the sheet author typed: numbers, numeric
/// strings, ISO dates, blanks. Nothing in here ever fails; a cell that cannot
/// be read as the requested kind yields `None` and the caller substitutes.
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::de::{DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Offset-less date-time layouts, read as UTC.
const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    Bool(bool),
    Number(f64),
    Text(String),
    /// Arrays/objects pasted into a cell. Kept so the row still parses.
    Other(Value),
}

impl Cell {
    pub fn as_number(&self) -> Option<f64> {
        let n = match self {
            Cell::Number(n) => *n,
            Cell::Text(s) => {
                let s = s.trim();
                if s.is_empty() {
                    return None;
                }
                s.parse::<f64>().ok()?
            }
            Cell::Bool(_) | Cell::Other(_) => return None,
        };
        n.is_finite().then_some(n)
    }

    pub fn as_timestamp(&self) -> Option<DateTime<Utc>> {
        match self {
            Cell::Text(s) => parse_timestamp(s),
            Cell::Number(ms) if ms.is_finite() => DateTime::from_timestamp_millis(*ms as i64),
            _ => None,
        }
    }

    /// The cell as the sheet shows it: whole numbers without a trailing `.0`.
    pub fn display(&self) -> String {
        match self {
            Cell::Number(n) => format_number(*n),
            Cell::Text(s) => s.clone(),
            Cell::Bool(b) => b.to_string(),
            Cell::Other(v) => v.to_string(),
        }
    }
}

pub fn number(cell: &Option<Cell>) -> Option<f64> {
    cell.as_ref().and_then(Cell::as_number)
}

pub fn timestamp(cell: &Option<Cell>) -> Option<DateTime<Utc>> {
    cell.as_ref().and_then(Cell::as_timestamp)
}

/// Render an optional cell, falling back to `placeholder` when blank.
pub fn display_or(cell: &Option<Cell>, placeholder: &str) -> String {
    match cell {
        Some(c) => {
            let shown = c.display();
            if shown.trim().is_empty() {
                placeholder.to_string()
            } else {
                shown
            }
        }
        None => placeholder.to_string(),
    }
}

pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

/// Deserialize a text column. Numbers become their display form, blanks and
/// nulls become the empty string.
pub(crate) fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let cell = Option::<Cell>::deserialize(deserializer)?;
    Ok(cell.map(|c| c.display()).unwrap_or_default())
}

/// Deserialize a sheet tab. A missing, null or non-list tab is empty; rows
/// that are not readable records (stray nulls, scalars) are skipped.
pub(crate) fn rows<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let raw = match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Array(rows)) => rows,
        Some(other) => {
            log::debug!("sheet tab is not a list, reading it as empty: {other}");
            Vec::new()
        }
        None => Vec::new(),
    };
    let total = raw.len();
    let parsed: Vec<T> = raw
        .into_iter()
        .filter_map(|row| serde_json::from_value(row).ok())
        .collect();
    if parsed.len() < total {
        log::debug!("skipped {} unreadable sheet rows", total - parsed.len());
    }
    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn numbers_read_from_numbers_and_numeric_text() {
        assert_eq!(Cell::Number(3.0).as_number(), Some(3.0));
        assert_eq!(Cell::Text(" .310 ".into()).as_number(), Some(0.31));
        assert_eq!(Cell::Text("".into()).as_number(), None);
        assert_eq!(Cell::Text("n/a".into()).as_number(), None);
        assert_eq!(Cell::Bool(true).as_number(), None);
        assert_eq!(Cell::Text("inf".into()).as_number(), None);
    }

    #[test]
    fn timestamps_accept_sheet_layouts() {
        let expected = Utc.with_ymd_and_hms(2026, 6, 6, 18, 30, 0).unwrap();
        for raw in [
            "2026-06-06T18:30:00.000Z",
            "2026-06-06T19:30:00+01:00",
            "2026-06-06T18:30:00",
            "2026-06-06T18:30",
            "2026-06-06 18:30",
        ] {
            assert_eq!(parse_timestamp(raw), Some(expected), "{raw}");
        }
        assert_eq!(
            parse_timestamp("2026-06-06"),
            Some(Utc.with_ymd_and_hms(2026, 6, 6, 0, 0, 0).unwrap())
        );
        assert_eq!(parse_timestamp("next saturday"), None);
        assert_eq!(parse_timestamp("   "), None);
    }

    #[test]
    fn epoch_millis_are_timestamps() {
        let expected = Utc.with_ymd_and_hms(2026, 6, 6, 18, 30, 0).unwrap();
        let cell = Cell::Number(expected.timestamp_millis() as f64);
        assert_eq!(cell.as_timestamp(), Some(expected));
        assert_eq!(Cell::Bool(false).as_timestamp(), None);
    }

    #[test]
    fn display_drops_trailing_zero() {
        assert_eq!(Cell::Number(12.0).display(), "12");
        assert_eq!(Cell::Number(0.5).display(), "0.5");
        assert_eq!(display_or(&None, "—"), "—");
        assert_eq!(display_or(&Some(Cell::Text(" ".into())), "—"), "—");
    }

    #[test]
    fn cells_deserialize_from_any_json_scalar() {
        let cells: Vec<Option<Cell>> =
            serde_json::from_str(r#"[1, "x", true, null, [1, 2]]"#).unwrap();
        assert_eq!(cells[0], Some(Cell::Number(1.0)));
        assert_eq!(cells[1], Some(Cell::Text("x".into())));
        assert_eq!(cells[2], Some(Cell::Bool(true)));
        assert_eq!(cells[3], None);
        assert!(matches!(cells[4], Some(Cell::Other(_))));
    }
}
