//! Demo session generator. Produces a plausible training history with gradual
//! improvement and realistic gaps, for the --demo flag and benchmarks.

use chrono::{Duration as ChronoDuration, NaiveDateTime, Utc};
use rand::Rng;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::session::{Metric, SessionRecord};

const COACHES: &[&str] = &["Coach Martinez", "Coach Lee", "Solo"];
const LOCATIONS: &[&str] = &["Memorial Park", "Indoor Facility", "Backyard"];
const SURFACES: &[&str] = &["Grass", "Turf", "Indoor Court"];
const TRAINING_TYPES: &[&str] = &[
    "Ball Mastery",
    "Speed & Agility",
    "Small-Sided Games",
    "Shooting",
    "Conditioning",
];
const INTENSITIES: &[&str] = &["Low", "Medium", "High"];

pub fn generate_sessions(count: usize, seed: u64) -> Vec<SessionRecord> {
    let mut rng = StdRng::seed_from_u64(seed);
    let now = Utc::now().naive_utc();
    let span_days = (count as i64 * 2).max(30);

    let mut sessions = Vec::with_capacity(count);
    for i in 0..count {
        // Oldest first, roughly every other day with some jitter.
        let days_ago = span_days - (i as i64 * span_days / count.max(1) as i64);
        let date = now - ChronoDuration::days(days_ago) - ChronoDuration::hours(rng.gen_range(0..6));
        sessions.push(generate_session(&mut rng, date, i as f64 / count.max(1) as f64));
    }
    sessions
}

/// One session. `progress` in 0..1 shifts the distributions upward so later
/// sessions trend better, which keeps the narration interesting.
fn generate_session(rng: &mut StdRng, date: NaiveDateTime, progress: f64) -> SessionRecord {
    let with_ball = rng.gen_bool(0.7);
    let mut session = SessionRecord {
        date: Some(date),
        session_name: None,
        coach: Some(pick(rng, COACHES).to_string()),
        location: Some(pick(rng, LOCATIONS).to_string()),
        surface: Some(pick(rng, SURFACES).to_string()),
        training_type: Some(pick(rng, TRAINING_TYPES).to_string()),
        intensity: Some(pick(rng, INTENSITIES).to_string()),
        position: Some("Winger".to_string()),
        with_ball: Some(with_ball),
        metrics: Default::default(),
    };

    let duration: f64 = rng.gen_range(40.0..95.0);
    session.set_metric(Metric::Duration, duration.round());
    session.set_metric(
        Metric::TotalDistance,
        rng.gen_range(1.5..4.0) + progress * 0.5,
    );
    session.set_metric(
        Metric::SprintDistance,
        (rng.gen_range(120.0..380.0) + progress * 60.0).round(),
    );
    session.set_metric(Metric::NumSprints, rng.gen_range(6.0_f64..22.0).round());
    session.set_metric(
        Metric::TopSpeed,
        rng.gen_range(11.0..13.5) + progress * 1.5,
    );

    if with_ball {
        let right = rng.gen_range(120.0_f64..300.0).round();
        let ratio = rng.gen_range(0.3..0.6) + progress * 0.1;
        let left = (right * ratio).round().max(1.0);
        session.set_metric(Metric::BallTouches, left + right);
        session.set_metric(Metric::LeftTouches, left);
        session.set_metric(Metric::RightTouches, right);
        session.set_metric(Metric::LeftFootPct, left / (left + right) * 100.0);
    }

    // Kicking power is only measured some days.
    if rng.gen_bool(0.5) {
        let right = rng.gen_range(28.0..45.0) + progress * 4.0;
        let left = right - rng.gen_range(1.0..8.0);
        session.set_metric(Metric::KickingPower, right.max(left));
        session.set_metric(Metric::LeftKickingPower, left);
        session.set_metric(Metric::RightKickingPower, right);
    }

    let left_turns = rng.gen_range(8.0_f64..30.0).round();
    let right_turns = rng.gen_range(8.0_f64..30.0).round();
    session.set_metric(Metric::LeftTurns, left_turns);
    session.set_metric(Metric::RightTurns, right_turns);
    session.set_metric(Metric::BackTurns, rng.gen_range(2.0_f64..12.0).round());
    session.set_metric(
        Metric::IntenseTurns,
        (rng.gen_range(2.0..9.0) + progress * 5.0).round(),
    );

    let entry = rng.gen_range(8.5..11.0);
    let exit = entry + rng.gen_range(-1.5..1.2) + progress * 0.8;
    session.set_metric(Metric::TurnEntrySpeed, entry);
    session.set_metric(Metric::TurnExitSpeed, exit);

    session
}

fn pick<'a>(rng: &mut StdRng, options: &'a [&'a str]) -> &'a str {
    options[rng.gen_range(0..options.len())]
}
