use chrono::{NaiveDate, NaiveDateTime};

use touchline::records::{Foot, PersonalRecords, touch_ratios};
use touchline::session::{Metric, SessionRecord};

fn day(d: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 1, d)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
}

fn session(date: Option<NaiveDateTime>, metrics: &[(Metric, f64)]) -> SessionRecord {
    let mut record = SessionRecord {
        date,
        ..SessionRecord::default()
    };
    for &(metric, value) in metrics {
        record.set_metric(metric, value);
    }
    record
}

#[test]
fn max_records_with_dates() {
    let sessions = vec![
        session(Some(day(5)), &[(Metric::TopSpeed, 13.0)]),
        session(Some(day(7)), &[(Metric::TopSpeed, 12.4)]),
        session(Some(day(9)), &[(Metric::TopSpeed, 12.8)]),
    ];
    let records = PersonalRecords::compute(&sessions);
    assert_eq!(records.best.get(&Metric::TopSpeed), Some(&13.0));
    assert_eq!(records.date.get(&Metric::TopSpeed), Some(&day(5)));
}

#[test]
fn ties_keep_the_first_occurrence() {
    let sessions = vec![
        session(Some(day(3)), &[(Metric::BallTouches, 300.0)]),
        session(Some(day(8)), &[(Metric::BallTouches, 300.0)]),
    ];
    let records = PersonalRecords::compute(&sessions);
    assert_eq!(records.date.get(&Metric::BallTouches), Some(&day(3)));
}

#[test]
fn absent_metrics_never_appear() {
    let sessions = vec![
        session(Some(day(1)), &[(Metric::TopSpeed, 12.0)]),
        session(Some(day(2)), &[(Metric::TopSpeed, 12.5)]),
    ];
    let records = PersonalRecords::compute(&sessions);
    assert!(records.best.contains_key(&Metric::TopSpeed));
    assert!(!records.best.contains_key(&Metric::KickingPower));
    assert!(!records.best.contains_key(&Metric::IntenseTurns));
}

#[test]
fn empty_input_yields_empty_records() {
    let records = PersonalRecords::compute(&[]);
    assert!(records.best.is_empty());
    assert!(records.best_ratio.is_none());
    assert!(records.avg_ratio.is_none());
}

#[test]
fn touch_ratio_best_and_average() {
    let sessions = vec![
        session(
            Some(day(1)),
            &[(Metric::LeftTouches, 80.0), (Metric::RightTouches, 120.0)],
        ),
        session(
            Some(day(2)),
            &[(Metric::LeftTouches, 100.0), (Metric::RightTouches, 150.0)],
        ),
        session(
            Some(day(3)),
            &[(Metric::LeftTouches, 90.0), (Metric::RightTouches, 130.0)],
        ),
    ];
    let records = PersonalRecords::compute(&sessions);

    // 80/120 and 100/150 both equal 2/3; the earlier session keeps the record.
    let best = records.best_ratio.expect("ratio record present");
    assert!((best.ratio - 2.0 / 3.0).abs() < 1e-9);
    assert_eq!(best.date, Some(day(1)));

    let avg = records.avg_ratio.expect("average ratio present");
    let expected = (80.0 / 120.0 + 100.0 / 150.0 + 90.0 / 130.0) / 3.0;
    assert!((avg - expected).abs() < 1e-9);
}

#[test]
fn ratio_ignores_zero_and_partial_rows() {
    let sessions = vec![
        session(
            None,
            &[(Metric::LeftTouches, 0.0), (Metric::RightTouches, 100.0)],
        ),
        session(None, &[(Metric::LeftTouches, 50.0)]),
        session(None, &[]),
    ];
    assert!(touch_ratios(&sessions).is_empty());
    let records = PersonalRecords::compute(&sessions);
    assert!(records.best_ratio.is_none());
    assert!(records.avg_ratio.is_none());
}

#[test]
fn recompute_on_unchanged_input_is_identical() {
    let sessions = vec![
        session(
            Some(day(5)),
            &[
                (Metric::TopSpeed, 13.0),
                (Metric::KickingPower, 40.0),
                (Metric::LeftKickingPower, 40.0),
                (Metric::RightKickingPower, 35.0),
                (Metric::LeftTouches, 90.0),
                (Metric::RightTouches, 130.0),
            ],
        ),
        session(Some(day(9)), &[(Metric::TopSpeed, 12.8)]),
    ];
    let a = PersonalRecords::compute(&sessions);
    let b = PersonalRecords::compute(&sessions);
    assert_eq!(a.best, b.best);
    assert_eq!(a.date, b.date);
    assert_eq!(a.foot, b.foot);
    assert_eq!(a.avg_ratio, b.avg_ratio);
    assert_eq!(
        a.best_ratio.map(|r| (r.ratio, r.date)),
        b.best_ratio.map(|r| (r.ratio, r.date))
    );
}

#[test]
fn kicking_power_foot_prefers_left_on_tie() {
    let sessions = vec![session(
        Some(day(4)),
        &[
            (Metric::KickingPower, 40.0),
            (Metric::LeftKickingPower, 40.0),
            (Metric::RightKickingPower, 40.0),
        ],
    )];
    let records = PersonalRecords::compute(&sessions);
    assert_eq!(records.foot.get(&Metric::KickingPower), Some(&Foot::Left));
}

#[test]
fn kicking_power_foot_follows_the_stronger_side() {
    let sessions = vec![session(
        Some(day(4)),
        &[
            (Metric::KickingPower, 42.0),
            (Metric::LeftKickingPower, 35.0),
            (Metric::RightKickingPower, 42.0),
        ],
    )];
    let records = PersonalRecords::compute(&sessions);
    assert_eq!(records.foot.get(&Metric::KickingPower), Some(&Foot::Right));
}

#[test]
fn kicking_power_foot_defaults_to_the_present_side() {
    let sessions = vec![session(
        None,
        &[
            (Metric::KickingPower, 38.0),
            (Metric::LeftKickingPower, 38.0),
        ],
    )];
    let records = PersonalRecords::compute(&sessions);
    assert_eq!(records.foot.get(&Metric::KickingPower), Some(&Foot::Left));
}

#[test]
fn kicking_power_foot_absent_when_neither_side_measured() {
    let sessions = vec![session(None, &[(Metric::KickingPower, 38.0)])];
    let records = PersonalRecords::compute(&sessions);
    assert_eq!(records.best.get(&Metric::KickingPower), Some(&38.0));
    assert!(records.foot.is_empty());
}
