use std::path::PathBuf;

use anyhow::{Result, anyhow};
use chrono::Utc;

use touchline::insights::InsightsReport;
use touchline::records::{PR_METRICS, PersonalRecords};
use touchline::session::SessionRecord;
use touchline::{dataset, export, report, sample, store};

const DEFAULT_DEMO_SESSIONS: usize = 40;
const DEMO_SEED: u64 = 7;

fn main() -> Result<()> {
    let athlete = parse_value_arg("--athlete")
        .or_else(|| std::env::var("TOUCHLINE_ATHLETE").ok())
        .filter(|name| !name.trim().is_empty())
        .unwrap_or_else(|| "Player".to_string());

    let sessions = load_sessions()?;
    if sessions.is_empty() {
        return Err(anyhow!("no sessions loaded; nothing to analyze"));
    }
    println!("Loaded {} sessions", sessions.len());

    let records = PersonalRecords::compute(&sessions);
    if has_flag("--json") {
        println!("{}", serde_json::to_string_pretty(&records)?);
    } else {
        print_records(&records);
    }

    let insights = InsightsReport::compute(&sessions);
    println!();
    println!(
        "{}",
        report::render_report(&insights, &athlete, Utc::now().naive_utc())
    );

    if let Some(path) = parse_value_arg("--export").map(PathBuf::from) {
        let summary = export::export_workbook(&path, &sessions, &records, &insights)?;
        println!(
            "Exported {}: {} sessions, {} record rows, {} insight rows",
            path.display(),
            summary.sessions,
            summary.record_rows,
            summary.insight_rows
        );
    }

    Ok(())
}

fn load_sessions() -> Result<Vec<SessionRecord>> {
    let csv_path = parse_value_arg("--csv").map(PathBuf::from);
    let db_path = parse_value_arg("--db").map(PathBuf::from);

    if let Some(csv_path) = csv_path {
        let sessions = dataset::load_csv(&csv_path)?;
        // A db alongside a csv means persist what we just read.
        if let Some(db_path) = db_path {
            let conn = store::open_db(&db_path)?;
            let inserted = store::append_sessions(&conn, &sessions)?;
            println!("Stored {inserted} sessions in {}", db_path.display());
        }
        return Ok(sessions);
    }
    if let Some(db_path) = db_path {
        let conn = store::open_db(&db_path)?;
        return store::load_sessions(&conn);
    }
    if has_flag("--demo") {
        let count = parse_value_arg("--sessions")
            .or_else(|| std::env::var("TOUCHLINE_DEMO_SESSIONS").ok())
            .and_then(|raw| raw.parse::<usize>().ok())
            .unwrap_or(DEFAULT_DEMO_SESSIONS)
            .clamp(1, 5000);
        println!("Generating {count} demo sessions");
        return Ok(sample::generate_sessions(count, DEMO_SEED));
    }
    Err(anyhow!(
        "no data source; pass --csv <path>, --db <path>, or --demo"
    ))
}

fn print_records(records: &PersonalRecords) {
    println!();
    println!("🏅 PERSONAL RECORDS");
    for metric in PR_METRICS {
        let Some(best) = records.best.get(metric) else {
            continue;
        };
        let date = records
            .date
            .get(metric)
            .map(|d| format!(" on {}", d.format("%b %d, %Y")))
            .unwrap_or_default();
        let foot = records
            .foot
            .get(metric)
            .map(|f| format!(" ({})", f.label()))
            .unwrap_or_default();
        let unit = metric.unit();
        let suffix = if unit.is_empty() {
            String::new()
        } else {
            format!(" {unit}")
        };
        println!("  {}: {best:.1}{suffix}{foot}{date}", metric.label());
    }
    if let Some(best_ratio) = &records.best_ratio {
        let date = best_ratio
            .date
            .map(|d| format!(" on {}", d.format("%b %d, %Y")))
            .unwrap_or_default();
        println!(
            "  Best L/R Touch Ratio: {:.3} (goal 0.500){date}",
            best_ratio.ratio
        );
    }
    if let Some(avg_ratio) = records.avg_ratio {
        println!("  Avg L/R Touch Ratio: {avg_ratio:.3}");
    }
}

fn parse_value_arg(name: &str) -> Option<String> {
    let args = std::env::args().skip(1).collect::<Vec<_>>();
    let prefix = format!("{name}=");
    for (idx, arg) in args.iter().enumerate() {
        if let Some(value) = arg.strip_prefix(&prefix) {
            let trimmed = value.trim();
            if !trimmed.is_empty() {
                return Some(trimmed.to_string());
            }
        }
        if arg == name
            && let Some(next) = args.get(idx + 1)
            && !next.trim().is_empty()
        {
            return Some(next.trim().to_string());
        }
    }
    None
}

fn has_flag(name: &str) -> bool {
    std::env::args().skip(1).any(|arg| arg == name)
}
