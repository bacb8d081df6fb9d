use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;

use crate::session::{Metric, SessionRecord};

/// Sheet headers seen in the wild mapped to canonical column names. Keys are
/// compared after `normalize_header`.
static COLUMN_ALIASES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("duration_min", "duration"),
        ("total_distance_mi", "total_distance"),
        ("sprint_distance_yd", "sprint_distance"),
        ("sprints", "num_sprints"),
        ("top_speed_mph", "top_speed"),
        ("kicking_power_mph", "kicking_power"),
        ("left_kicking_power_mph", "left_kicking_power"),
        ("right_kicking_power_mph", "right_kicking_power"),
        ("left_pct", "left_foot_pct"),
        ("avg_turn_entry_speed_mph", "avg_turn_entry"),
        ("avg_turn_exit_speed_mph", "avg_turn_exit"),
        ("turn_entry_speed", "avg_turn_entry"),
        ("turn_exit_speed", "avg_turn_exit"),
    ])
});

const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];
// Two-digit years must be tried before %Y, which happily eats "25" as year 25.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%y", "%m/%d/%Y"];

pub fn normalize_header(raw: &str) -> String {
    raw.trim().to_lowercase().replace(' ', "_")
}

pub fn canonical_column(raw: &str) -> String {
    let normalized = normalize_header(raw);
    match COLUMN_ALIASES.get(normalized.as_str()) {
        Some(mapped) => (*mapped).to_string(),
        None => normalized,
    }
}

/// Coerce a cell to a number. Empty cells, placeholders, and anything that
/// does not survive cleanup become absent, never zero.
pub fn parse_number(raw: &str) -> Option<f64> {
    let s = raw.trim();
    if s.is_empty() || s == "-" {
        return None;
    }
    let cleaned: String = s
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-' || *c == ',')
        .collect();
    let cleaned = cleaned.replace(',', "");
    if cleaned.is_empty() || cleaned == "-" {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

pub fn parse_date(raw: &str) -> Option<NaiveDateTime> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }
    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return d.and_hms_opt(0, 0, 0);
        }
    }
    None
}

pub fn parse_with_ball(raw: &str) -> Option<bool> {
    match raw.trim().to_lowercase().as_str() {
        "yes" | "y" | "true" | "1" => Some(true),
        "no" | "n" | "false" | "0" => Some(false),
        _ => None,
    }
}

fn non_empty(raw: &str) -> Option<String> {
    let s = raw.trim();
    if s.is_empty() { None } else { Some(s.to_string()) }
}

fn apply_cell(record: &mut SessionRecord, column: &str, cell: &str) {
    match column {
        "date" => record.date = parse_date(cell),
        "session_name" => record.session_name = non_empty(cell),
        "coach" => record.coach = non_empty(cell),
        "location" => record.location = non_empty(cell),
        "surface" => record.surface = non_empty(cell),
        "training_type" => record.training_type = non_empty(cell),
        "intensity" => record.intensity = non_empty(cell),
        "position" => record.position = non_empty(cell),
        "with_ball" => record.with_ball = parse_with_ball(cell),
        other => {
            if let Some(metric) = Metric::from_column(other) {
                if let Some(value) = parse_number(cell) {
                    record.set_metric(metric, value);
                }
            }
        }
    }
}

/// Parse CSV text into session records. Unknown columns are ignored; rows
/// keep their table order.
pub fn parse_csv(reader: impl Read) -> Result<Vec<SessionRecord>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let columns: Vec<String> = csv_reader
        .headers()
        .context("read csv header row")?
        .iter()
        .map(canonical_column)
        .collect();

    let mut sessions = Vec::new();
    for row in csv_reader.records() {
        let row = row.context("read csv row")?;
        let mut record = SessionRecord::default();
        for (idx, cell) in row.iter().enumerate() {
            let Some(column) = columns.get(idx) else {
                continue;
            };
            apply_cell(&mut record, column, cell);
        }
        sessions.push(record);
    }
    Ok(sessions)
}

pub fn load_csv(path: &Path) -> Result<Vec<SessionRecord>> {
    let file = File::open(path).with_context(|| format!("open csv {}", path.display()))?;
    parse_csv(file)
}
