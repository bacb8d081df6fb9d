use std::path::Path;

use anyhow::{Context, Result};
use rust_xlsxwriter::{Workbook, Worksheet};

use crate::insights::InsightsReport;
use crate::records::PersonalRecords;
use crate::session::{Metric, SessionRecord};

pub struct ExportReport {
    pub sessions: usize,
    pub record_rows: usize,
    pub insight_rows: usize,
}

/// Write the session table, personal records, and headline insights to one
/// workbook.
pub fn export_workbook(
    path: &Path,
    sessions: &[SessionRecord],
    records: &PersonalRecords,
    insights: &InsightsReport,
) -> Result<ExportReport> {
    let session_rows = session_rows(sessions);
    let record_rows = record_rows(records);
    let insight_rows = insight_rows(insights);

    let mut workbook = Workbook::new();
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("Sessions")?;
        write_rows(sheet, &session_rows)?;
    }
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("Personal Records")?;
        write_rows(sheet, &record_rows)?;
    }
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("Insights")?;
        write_rows(sheet, &insight_rows)?;
    }

    workbook
        .save(path)
        .with_context(|| format!("failed writing workbook to {}", path.display()))?;

    Ok(ExportReport {
        sessions: session_rows.len().saturating_sub(1),
        record_rows: record_rows.len().saturating_sub(1),
        insight_rows: insight_rows.len().saturating_sub(1),
    })
}

fn session_rows(sessions: &[SessionRecord]) -> Vec<Vec<String>> {
    let mut header = vec![
        "Date".to_string(),
        "Session".to_string(),
        "Coach".to_string(),
        "Location".to_string(),
        "Surface".to_string(),
        "Training Type".to_string(),
        "Intensity".to_string(),
        "Position".to_string(),
        "With Ball".to_string(),
    ];
    header.extend(Metric::ALL.iter().map(|m| m.label().to_string()));
    let mut rows = vec![header];

    for session in sessions {
        let mut row = vec![
            session
                .date
                .map(|d| d.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_default(),
            session.session_name.clone().unwrap_or_default(),
            session.coach.clone().unwrap_or_default(),
            session.location.clone().unwrap_or_default(),
            session.surface.clone().unwrap_or_default(),
            session.training_type.clone().unwrap_or_default(),
            session.intensity.clone().unwrap_or_default(),
            session.position.clone().unwrap_or_default(),
            match session.with_ball {
                Some(true) => "yes".to_string(),
                Some(false) => "no".to_string(),
                None => String::new(),
            },
        ];
        for metric in Metric::ALL {
            row.push(
                session
                    .metric(*metric)
                    .map(|v| format!("{v}"))
                    .unwrap_or_default(),
            );
        }
        rows.push(row);
    }
    rows
}

fn record_rows(records: &PersonalRecords) -> Vec<Vec<String>> {
    let mut rows = vec![vec![
        "Metric".to_string(),
        "Best".to_string(),
        "Unit".to_string(),
        "Date".to_string(),
        "Foot".to_string(),
    ]];

    for metric in crate::records::PR_METRICS {
        let Some(best) = records.best.get(metric) else {
            continue;
        };
        rows.push(vec![
            metric.label().to_string(),
            format!("{best:.2}"),
            metric.unit().to_string(),
            records
                .date
                .get(metric)
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            records
                .foot
                .get(metric)
                .map(|f| f.label().to_string())
                .unwrap_or_default(),
        ]);
    }

    if let Some(best_ratio) = &records.best_ratio {
        rows.push(vec![
            "Best L/R Touch Ratio".to_string(),
            format!("{:.3}", best_ratio.ratio),
            String::new(),
            best_ratio
                .date
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            String::new(),
        ]);
    }
    if let Some(avg_ratio) = records.avg_ratio {
        rows.push(vec![
            "Avg L/R Touch Ratio".to_string(),
            format!("{avg_ratio:.3}"),
            String::new(),
            String::new(),
            String::new(),
        ]);
    }
    rows
}

fn insight_rows(insights: &InsightsReport) -> Vec<Vec<String>> {
    let mut rows = vec![vec![
        "Section".to_string(),
        "Item".to_string(),
        "Value".to_string(),
    ]];

    rows.push(vec![
        "Summary".to_string(),
        "Sessions".to_string(),
        insights.sessions.to_string(),
    ]);
    if let Some(range) = &insights.date_range {
        rows.push(vec![
            "Summary".to_string(),
            "Date Range".to_string(),
            format!(
                "{} to {}",
                range.start.format("%Y-%m-%d"),
                range.end.format("%Y-%m-%d")
            ),
        ]);
    }

    for trend in &insights.trends {
        let direction = if trend.improving() {
            "improving"
        } else {
            "declining"
        };
        rows.push(vec![
            "Trends".to_string(),
            trend.metric.label().to_string(),
            match trend.change_pct {
                Some(pct) => format!("{direction} ({pct:+.1}%)"),
                None => direction.to_string(),
            },
        ]);
    }

    for milestone in &insights.milestones {
        rows.push(vec![
            "Milestones".to_string(),
            milestone.metric.label().to_string(),
            format!("{:.1} -> {:.1}", milestone.current, milestone.target),
        ]);
    }
    rows
}

fn write_rows(worksheet: &mut Worksheet, rows: &[Vec<String>]) -> Result<()> {
    for (row_idx, row) in rows.iter().enumerate() {
        for (col_idx, value) in row.iter().enumerate() {
            worksheet
                .write_string(row_idx as u32, col_idx as u16, value)
                .with_context(|| format!("write cell ({row_idx},{col_idx})"))?;
        }
    }
    Ok(())
}
