use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};

use touchline::session::Metric;
use touchline::{dataset, store};

fn main() -> Result<()> {
    let csv_path = parse_path_arg("--csv").context("usage: csv_ingest --csv <path> --db <path>")?;
    let db_path = parse_path_arg("--db").context("usage: csv_ingest --csv <path> --db <path>")?;

    let sessions = dataset::load_csv(&csv_path)?;
    if sessions.is_empty() {
        return Err(anyhow!("{} contained no data rows", csv_path.display()));
    }

    let conn = store::open_db(&db_path)?;
    let inserted = store::append_sessions(&conn, &sessions)?;
    let total = store::session_count(&conn)?;

    let dated = sessions.iter().filter(|s| s.date.is_some()).count();
    let with_speed = sessions
        .iter()
        .filter(|s| s.metric(Metric::TopSpeed).is_some())
        .count();

    println!("CSV ingest complete");
    println!("Source: {}", csv_path.display());
    println!("DB: {}", db_path.display());
    println!("Inserted: {inserted} ({dated} dated, {with_speed} with top speed)");
    println!("Total rows in db: {total}");
    Ok(())
}

fn parse_path_arg(name: &str) -> Option<PathBuf> {
    let args = std::env::args().skip(1).collect::<Vec<_>>();
    let prefix = format!("{name}=");
    for (idx, arg) in args.iter().enumerate() {
        if let Some(path) = arg.strip_prefix(&prefix) {
            let trimmed = path.trim();
            if !trimmed.is_empty() {
                return Some(PathBuf::from(trimmed));
            }
        }
        if arg == name
            && let Some(next) = args.get(idx + 1)
            && !next.trim().is_empty()
        {
            return Some(PathBuf::from(next.trim()));
        }
    }
    None
}
