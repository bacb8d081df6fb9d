//! SQLite persistence for session history. One row per session; absent
//! metrics stay NULL so a reload reproduces the same sparse records.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use rusqlite::types::Value;
use rusqlite::{Connection, params_from_iter};

use crate::session::{Metric, SessionRecord};

const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const TEXT_COLUMNS: &[&str] = &[
    "session_name",
    "coach",
    "location",
    "surface",
    "training_type",
    "intensity",
    "position",
];

pub fn open_db(path: &Path) -> Result<Connection> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).ok();
    }
    let conn =
        Connection::open(path).with_context(|| format!("open sqlite db {}", path.display()))?;
    init_schema(&conn)?;
    Ok(conn)
}

pub fn init_schema(conn: &Connection) -> Result<()> {
    let mut ddl = String::from(
        "PRAGMA journal_mode = WAL;\n\
         CREATE TABLE IF NOT EXISTS sessions (\n    id INTEGER PRIMARY KEY AUTOINCREMENT,\n    date TEXT,\n",
    );
    for col in TEXT_COLUMNS {
        ddl.push_str(&format!("    {col} TEXT,\n"));
    }
    ddl.push_str("    with_ball INTEGER,\n");
    for (i, metric) in Metric::ALL.iter().enumerate() {
        let sep = if i + 1 == Metric::ALL.len() { "" } else { "," };
        ddl.push_str(&format!("    {} REAL{sep}\n", metric.column()));
    }
    ddl.push_str(");\nCREATE INDEX IF NOT EXISTS idx_sessions_date ON sessions(date);\n");
    conn.execute_batch(&ddl).context("create sessions schema")?;
    Ok(())
}

fn column_list() -> Vec<&'static str> {
    let mut cols = vec!["date"];
    cols.extend_from_slice(TEXT_COLUMNS);
    cols.push("with_ball");
    cols.extend(Metric::ALL.iter().map(|m| m.column()));
    cols
}

pub fn append_session(conn: &Connection, session: &SessionRecord) -> Result<()> {
    let cols = column_list();
    let placeholders = vec!["?"; cols.len()].join(", ");
    let sql = format!(
        "INSERT INTO sessions ({}) VALUES ({placeholders})",
        cols.join(", ")
    );

    let mut values: Vec<Value> = Vec::with_capacity(cols.len());
    values.push(match session.date {
        Some(d) => Value::Text(d.format(DATE_FORMAT).to_string()),
        None => Value::Null,
    });
    let text_fields = [
        &session.session_name,
        &session.coach,
        &session.location,
        &session.surface,
        &session.training_type,
        &session.intensity,
        &session.position,
    ];
    for field in text_fields {
        values.push(field.clone().map(Value::Text).unwrap_or(Value::Null));
    }
    values.push(
        session
            .with_ball
            .map(|b| Value::Integer(i64::from(b)))
            .unwrap_or(Value::Null),
    );
    for metric in Metric::ALL {
        values.push(
            session
                .metric(*metric)
                .map(Value::Real)
                .unwrap_or(Value::Null),
        );
    }

    conn.execute(&sql, params_from_iter(values))
        .context("insert session row")?;
    Ok(())
}

pub fn append_sessions(conn: &Connection, sessions: &[SessionRecord]) -> Result<usize> {
    for session in sessions {
        append_session(conn, session)?;
    }
    Ok(sessions.len())
}

/// Sessions ordered by date (undated rows last), insertion order breaking
/// ties.
pub fn load_sessions(conn: &Connection) -> Result<Vec<SessionRecord>> {
    let cols = column_list();
    let sql = format!(
        "SELECT {} FROM sessions ORDER BY date IS NULL, date, id",
        cols.join(", ")
    );
    let mut stmt = conn.prepare(&sql).context("prepare sessions query")?;
    let rows = stmt.query_map([], |row| {
        let mut session = SessionRecord::default();
        let date: Option<String> = row.get(0)?;
        session.date = date
            .as_deref()
            .and_then(|s| NaiveDateTime::parse_from_str(s, DATE_FORMAT).ok());
        let mut idx = 1;
        for field in [
            &mut session.session_name,
            &mut session.coach,
            &mut session.location,
            &mut session.surface,
            &mut session.training_type,
            &mut session.intensity,
            &mut session.position,
        ] {
            *field = row.get(idx)?;
            idx += 1;
        }
        session.with_ball = row.get::<_, Option<i64>>(idx)?.map(|v| v != 0);
        idx += 1;
        for metric in Metric::ALL {
            if let Some(value) = row.get::<_, Option<f64>>(idx)? {
                session.set_metric(*metric, value);
            }
            idx += 1;
        }
        Ok(session)
    })?;

    let mut out = Vec::new();
    for row in rows {
        out.push(row.context("read session row")?);
    }
    Ok(out)
}

pub fn session_count(conn: &Connection) -> Result<usize> {
    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM sessions", [], |row| row.get(0))
        .context("count sessions")?;
    Ok(count as usize)
}
