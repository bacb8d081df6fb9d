use chrono::NaiveDate;
use rusqlite::Connection;

use touchline::session::{Metric, SessionRecord};
use touchline::store;

fn sample_session() -> SessionRecord {
    let mut session = SessionRecord {
        date: NaiveDate::from_ymd_opt(2025, 2, 14)
            .unwrap()
            .and_hms_opt(9, 30, 0),
        session_name: Some("Morning Drills".to_string()),
        coach: Some("Coach Lee".to_string()),
        location: Some("Memorial Park".to_string()),
        surface: Some("Grass".to_string()),
        training_type: Some("Ball Mastery".to_string()),
        intensity: Some("High".to_string()),
        position: Some("Winger".to_string()),
        with_ball: Some(true),
        ..SessionRecord::default()
    };
    session.set_metric(Metric::TopSpeed, 12.8);
    session.set_metric(Metric::BallTouches, 280.0);
    session.set_metric(Metric::IntenseTurns, 9.0);
    session
}

#[test]
fn round_trips_a_full_session() {
    let conn = Connection::open_in_memory().expect("in-memory db");
    store::init_schema(&conn).expect("schema");
    store::append_session(&conn, &sample_session()).expect("insert");

    let loaded = store::load_sessions(&conn).expect("load");
    assert_eq!(loaded.len(), 1);
    let row = &loaded[0];
    assert_eq!(row.date, sample_session().date);
    assert_eq!(row.coach.as_deref(), Some("Coach Lee"));
    assert_eq!(row.with_ball, Some(true));
    assert_eq!(row.metric(Metric::TopSpeed), Some(12.8));
    assert_eq!(row.metric(Metric::BallTouches), Some(280.0));
    assert_eq!(row.metric(Metric::IntenseTurns), Some(9.0));
    assert_eq!(row.metric(Metric::KickingPower), None);
}

#[test]
fn sparse_sessions_stay_sparse() {
    let conn = Connection::open_in_memory().expect("in-memory db");
    store::init_schema(&conn).expect("schema");
    store::append_session(&conn, &SessionRecord::default()).expect("insert");

    let loaded = store::load_sessions(&conn).expect("load");
    assert_eq!(loaded.len(), 1);
    let row = &loaded[0];
    assert!(row.date.is_none());
    assert!(row.coach.is_none());
    assert!(row.with_ball.is_none());
    assert!(row.metrics.is_empty());
}

#[test]
fn loads_in_date_order_with_undated_rows_last() {
    let conn = Connection::open_in_memory().expect("in-memory db");
    store::init_schema(&conn).expect("schema");

    let mut undated = SessionRecord::default();
    undated.set_metric(Metric::TopSpeed, 10.0);
    let mut later = sample_session();
    later.date = NaiveDate::from_ymd_opt(2025, 3, 1)
        .unwrap()
        .and_hms_opt(9, 0, 0);
    let earlier = sample_session();

    store::append_sessions(&conn, &[undated, later.clone(), earlier.clone()]).expect("insert");

    let loaded = store::load_sessions(&conn).expect("load");
    assert_eq!(loaded.len(), 3);
    assert_eq!(loaded[0].date, earlier.date);
    assert_eq!(loaded[1].date, later.date);
    assert!(loaded[2].date.is_none());
}

#[test]
fn session_count_tracks_inserts() {
    let conn = Connection::open_in_memory().expect("in-memory db");
    store::init_schema(&conn).expect("schema");
    assert_eq!(store::session_count(&conn).expect("count"), 0);
    store::append_sessions(&conn, &[sample_session(), sample_session()]).expect("insert");
    assert_eq!(store::session_count(&conn).expect("count"), 2);
}
