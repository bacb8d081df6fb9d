use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use touchline::insights::InsightsReport;
use touchline::records::PersonalRecords;
use touchline::report::render_report;
use touchline::sample::generate_sessions;

const BENCH_SESSIONS: usize = 500;
const BENCH_SEED: u64 = 42;

fn bench_personal_records(c: &mut Criterion) {
    let sessions = generate_sessions(BENCH_SESSIONS, BENCH_SEED);
    c.bench_function("personal_records_compute", |b| {
        b.iter(|| {
            let records = PersonalRecords::compute(black_box(&sessions));
            black_box(records.best.len());
        })
    });
}

fn bench_insights_compute(c: &mut Criterion) {
    let sessions = generate_sessions(BENCH_SESSIONS, BENCH_SEED);
    c.bench_function("insights_compute", |b| {
        b.iter(|| {
            let report = InsightsReport::compute(black_box(&sessions));
            black_box(report.sessions);
        })
    });
}

fn bench_report_render(c: &mut Criterion) {
    let sessions = generate_sessions(BENCH_SESSIONS, BENCH_SEED);
    let report = InsightsReport::compute(&sessions);
    let generated_at = chrono::Utc::now().naive_utc();
    c.bench_function("report_render", |b| {
        b.iter(|| {
            let text = render_report(black_box(&report), "Player", generated_at);
            black_box(text.len());
        })
    });
}

fn bench_csv_parse(c: &mut Criterion) {
    let sessions = generate_sessions(BENCH_SESSIONS, BENCH_SEED);
    // Build a csv in memory so the parse path sees realistic row widths.
    let mut raw = String::from("date,coach,surface,training_type,intensity,with_ball,top_speed,ball_touches,left_touches,right_touches,intense_turns,avg_turn_entry,avg_turn_exit\n");
    for s in &sessions {
        raw.push_str(&format!(
            "{},{},{},{},{},{},{},{},{},{},{},{},{}\n",
            s.date.map(|d| d.format("%Y-%m-%d %H:%M:%S").to_string()).unwrap_or_default(),
            s.coach.as_deref().unwrap_or(""),
            s.surface.as_deref().unwrap_or(""),
            s.training_type.as_deref().unwrap_or(""),
            s.intensity.as_deref().unwrap_or(""),
            match s.with_ball {
                Some(true) => "yes",
                Some(false) => "no",
                None => "",
            },
            fmt_metric(s, touchline::session::Metric::TopSpeed),
            fmt_metric(s, touchline::session::Metric::BallTouches),
            fmt_metric(s, touchline::session::Metric::LeftTouches),
            fmt_metric(s, touchline::session::Metric::RightTouches),
            fmt_metric(s, touchline::session::Metric::IntenseTurns),
            fmt_metric(s, touchline::session::Metric::TurnEntrySpeed),
            fmt_metric(s, touchline::session::Metric::TurnExitSpeed),
        ));
    }

    c.bench_function("csv_parse", |b| {
        b.iter(|| {
            let rows = touchline::dataset::parse_csv(black_box(raw.as_bytes())).unwrap();
            black_box(rows.len());
        })
    });
}

fn fmt_metric(s: &touchline::session::SessionRecord, m: touchline::session::Metric) -> String {
    s.metric(m).map(|v| v.to_string()).unwrap_or_default()
}

criterion_group!(
    perf,
    bench_personal_records,
    bench_insights_compute,
    bench_report_render,
    bench_csv_parse
);
criterion_main!(perf);
