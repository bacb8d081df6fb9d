use chrono::{NaiveDate, NaiveDateTime};

use touchline::insights::{
    AccelQuality, AgilityTier, BaselineChange, Consistency, FocusArea, InsightsReport,
    Recommendation, SpeedForm, TrendLabel,
};
use touchline::report::render_report;
use touchline::session::{Metric, SessionRecord};

fn date(month: u32, day: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, month, day)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
}

fn session(d: Option<NaiveDateTime>, metrics: &[(Metric, f64)]) -> SessionRecord {
    let mut record = SessionRecord {
        date: d,
        ..SessionRecord::default()
    };
    for &(metric, value) in metrics {
        record.set_metric(metric, value);
    }
    record
}

fn intense_sessions(values: &[f64]) -> Vec<SessionRecord> {
    values
        .iter()
        .enumerate()
        .map(|(i, &v)| {
            session(
                Some(date(3, i as u32 + 1)),
                &[(Metric::IntenseTurns, v)],
            )
        })
        .collect()
}

#[test]
fn trailing_three_elite_tier_with_significant_improvement() {
    let report = InsightsReport::compute(&intense_sessions(&[5.0, 6.0, 7.0, 11.0, 11.0, 11.0]));
    let agility = report.executive.agility.expect("agility status");
    assert!((agility.trailing - 11.0).abs() < 1e-9);
    assert_eq!(agility.tier, AgilityTier::Elite);
    // 11 vs an early average of 6 clears the 1.2x bar.
    assert_eq!(agility.trend, Some(TrendLabel::SignificantImprovement));
}

#[test]
fn tier_boundaries() {
    let tier_of = |v: f64| {
        InsightsReport::compute(&intense_sessions(&[v, v, v]))
            .executive
            .agility
            .unwrap()
            .tier
    };
    assert_eq!(tier_of(10.0), AgilityTier::Elite);
    assert_eq!(tier_of(7.0), AgilityTier::Strong);
    assert_eq!(tier_of(5.0), AgilityTier::Solid);
    assert_eq!(tier_of(4.9), AgilityTier::EarlyStage);
}

#[test]
fn short_histories_have_no_trend() {
    let report = InsightsReport::compute(&intense_sessions(&[8.0, 9.0, 10.0]));
    assert_eq!(report.executive.agility.unwrap().trend, None);
}

#[test]
fn steady_speed_reads_as_peak_form() {
    let sessions: Vec<SessionRecord> = (1..=5)
        .map(|i| session(Some(date(3, i)), &[(Metric::TopSpeed, 13.0)]))
        .collect();
    let report = InsightsReport::compute(&sessions);
    let speed = report.executive.speed.expect("speed status");
    assert_eq!(speed.form, SpeedForm::Peak);
}

#[test]
fn explosive_exit_clears_the_focus_list() {
    let sessions: Vec<SessionRecord> = (1..=4)
        .map(|i| {
            session(
                Some(date(3, i)),
                &[
                    (Metric::IntenseTurns, 11.0),
                    (Metric::TurnEntrySpeed, 9.0),
                    (Metric::TurnExitSpeed, 10.0),
                ],
            )
        })
        .collect();
    let report = InsightsReport::compute(&sessions);
    let accel = report.executive.acceleration.expect("turn dynamics");
    assert_eq!(accel.quality(), AccelQuality::Explosive);
    assert_eq!(report.executive.focus, vec![FocusArea::Maintain]);
}

#[test]
fn missing_agility_data_still_sets_the_turns_focus() {
    let sessions = vec![session(Some(date(3, 1)), &[(Metric::TopSpeed, 12.0)])];
    let report = InsightsReport::compute(&sessions);
    assert!(matches!(
        report.executive.focus[0],
        FocusArea::IntenseTurns { from } if from == 0.0
    ));
}

#[test]
fn window_splits_on_the_thirty_day_cutoff() {
    // January sessions fall outside the window anchored at March 30.
    let mut sessions = vec![
        session(Some(date(1, 10)), &[(Metric::IntenseTurns, 5.0)]),
        session(Some(date(1, 20)), &[(Metric::IntenseTurns, 5.0)]),
    ];
    for day in [10, 20, 30] {
        sessions.push(session(Some(date(3, day)), &[(Metric::IntenseTurns, 8.0)]));
    }
    let report = InsightsReport::compute(&sessions);
    let window = report.window.expect("window summary");
    assert_eq!(window.sessions, 3);
    assert_eq!(window.start, date(3, 10));
    assert_eq!(window.end, date(3, 30));
    assert_eq!(window.span_days, 21);

    // 8 vs a baseline of 5 is a 60% improvement.
    let agility = window.agility.expect("window agility");
    match agility.baseline {
        Some(BaselineChange::Improvement(pct)) => assert!((pct - 60.0).abs() < 1e-9),
        other => panic!("unexpected baseline change: {other:?}"),
    }
}

#[test]
fn single_speed_sample_is_variable_consistency() {
    let sessions = vec![session(Some(date(3, 1)), &[(Metric::TopSpeed, 12.0)])];
    let report = InsightsReport::compute(&sessions);
    let speed = report.window.unwrap().speed.expect("window speed");
    assert_eq!(speed.consistency, Consistency::Variable);
}

#[test]
fn tight_speed_spread_is_excellent_consistency() {
    let sessions: Vec<SessionRecord> = [12.0, 12.1, 12.2, 12.1]
        .iter()
        .enumerate()
        .map(|(i, &v)| session(Some(date(3, i as u32 + 1)), &[(Metric::TopSpeed, v)]))
        .collect();
    let report = InsightsReport::compute(&sessions);
    let speed = report.window.unwrap().speed.expect("window speed");
    assert_eq!(speed.consistency, Consistency::Excellent);
}

#[test]
fn milestones_round_up_to_the_next_step() {
    let sessions = vec![session(
        Some(date(3, 1)),
        &[(Metric::TopSpeed, 13.0), (Metric::BallTouches, 310.0)],
    )];
    let report = InsightsReport::compute(&sessions);
    assert_eq!(report.milestones.len(), 2);
    assert!((report.milestones[0].target - 13.5).abs() < 1e-9);
    assert!((report.milestones[1].target - 350.0).abs() < 1e-9);
}

#[test]
fn milestone_at_an_exact_step_still_moves_up() {
    let sessions = vec![session(Some(date(3, 1)), &[(Metric::TopSpeed, 13.5)])];
    let report = InsightsReport::compute(&sessions);
    assert!((report.milestones[0].target - 14.0).abs() < 1e-9);
}

#[test]
fn correlation_needs_more_than_three_pairs() {
    let three: Vec<SessionRecord> = (1..=3)
        .map(|i| {
            session(
                Some(date(3, i)),
                &[
                    (Metric::IntenseTurns, i as f64),
                    (Metric::TopSpeed, 10.0 + i as f64),
                ],
            )
        })
        .collect();
    assert!(InsightsReport::compute(&three)
        .relationships
        .agility_speed_corr
        .is_none());

    let five: Vec<SessionRecord> = (1..=5)
        .map(|i| {
            session(
                Some(date(3, i)),
                &[
                    (Metric::IntenseTurns, i as f64),
                    (Metric::TopSpeed, 10.0 + i as f64),
                ],
            )
        })
        .collect();
    let corr = InsightsReport::compute(&five)
        .relationships
        .agility_speed_corr
        .expect("correlation");
    assert!(corr > 0.99);
}

#[test]
fn struggling_metrics_trigger_every_recommendation() {
    let speeds = [14.0, 14.0, 10.0, 10.0, 10.0];
    let sessions: Vec<SessionRecord> = speeds
        .iter()
        .enumerate()
        .map(|(i, &speed)| {
            session(
                Some(date(3, i as u32 + 1)),
                &[
                    (Metric::IntenseTurns, 3.0),
                    (Metric::TurnEntrySpeed, 10.0),
                    (Metric::TurnExitSpeed, 9.5),
                    (Metric::LeftTouches, 30.0),
                    (Metric::RightTouches, 100.0),
                    (Metric::TopSpeed, speed),
                ],
            )
        })
        .collect();
    let report = InsightsReport::compute(&sessions);
    assert_eq!(
        report.recommendations,
        vec![
            Recommendation::IntenseTurnsPriority,
            Recommendation::ExplosivePower,
            Recommendation::LeftFootBalance,
            Recommendation::MaintainTopSpeed,
        ]
    );
}

#[test]
fn balanced_development_earns_no_recommendations() {
    let sessions: Vec<SessionRecord> = (1..=5)
        .map(|i| {
            session(
                Some(date(3, i)),
                &[
                    (Metric::IntenseTurns, 8.0),
                    (Metric::TurnEntrySpeed, 9.0),
                    (Metric::TurnExitSpeed, 9.6),
                    (Metric::LeftTouches, 80.0),
                    (Metric::RightTouches, 120.0),
                    (Metric::TopSpeed, 13.0),
                ],
            )
        })
        .collect();
    let report = InsightsReport::compute(&sessions);
    assert!(report.recommendations.is_empty());

    let text = render_report(&report, "Alex", date(3, 31));
    assert!(text.contains("All metrics show balanced, effective development!"));
}

#[test]
fn report_renders_without_dates() {
    let sessions = vec![
        session(None, &[(Metric::TopSpeed, 12.0)]),
        session(None, &[(Metric::TopSpeed, 12.5)]),
    ];
    let report = InsightsReport::compute(&sessions);
    assert!(report.window.is_none());
    let text = render_report(&report, "Alex", date(3, 31));
    assert!(text.contains("Date information not available for 30-day analysis."));
}

#[test]
fn report_renders_from_dates_alone() {
    let sessions: Vec<SessionRecord> = (1..=4).map(|i| session(Some(date(3, i)), &[])).collect();
    let report = InsightsReport::compute(&sessions);
    let text = render_report(&report, "Alex", date(3, 31));
    assert!(text.contains("COMPREHENSIVE TRAINING INSIGHTS REPORT"));
    assert!(text.contains("PRIMARY FOCUS AREAS:"));
    assert!(text.contains("Total Sessions Analyzed: 4"));
}

#[test]
fn trends_report_direction_and_change() {
    let sessions = vec![
        session(Some(date(3, 1)), &[(Metric::TopSpeed, 12.0)]),
        session(Some(date(3, 5)), &[(Metric::TopSpeed, 13.2)]),
    ];
    let report = InsightsReport::compute(&sessions);
    let trend = report
        .trends
        .iter()
        .find(|t| t.metric == Metric::TopSpeed)
        .expect("top speed trend");
    assert!(trend.improving());
    let pct = trend.change_pct.expect("change pct");
    assert!((pct - 10.0).abs() < 1e-9);
}
