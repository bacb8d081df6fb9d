use std::collections::HashMap;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::session::{Metric, SessionRecord};
use crate::stats;

/// Product convention: the ideal left/right touch ratio is right-dominant
/// (one left touch for every two right), not 1.0 parity.
pub const BALANCE_GOAL: f64 = 0.5;

/// Metrics eligible for a max-value personal record.
pub const PR_METRICS: &[Metric] = &[
    Metric::TopSpeed,
    Metric::SprintDistance,
    Metric::BallTouches,
    Metric::KickingPower,
    Metric::TotalDistance,
    Metric::IntenseTurns,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Foot {
    Left,
    Right,
}

impl Foot {
    pub fn label(self) -> &'static str {
        match self {
            Foot::Left => "L",
            Foot::Right => "R",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RatioRecord {
    pub ratio: f64,
    pub date: Option<NaiveDateTime>,
}

/// All-time personal records. Metrics with no valid value anywhere are
/// absent from the maps rather than zero-filled.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PersonalRecords {
    pub best: HashMap<Metric, f64>,
    pub date: HashMap<Metric, NaiveDateTime>,
    pub foot: HashMap<Metric, Foot>,
    /// Session ratio closest to [`BALANCE_GOAL`], over rows where both touch
    /// counts are present and positive.
    pub best_ratio: Option<RatioRecord>,
    /// Mean of per-session ratios over the same rows (mean of ratios, not
    /// ratio of sums).
    pub avg_ratio: Option<f64>,
}

impl PersonalRecords {
    pub fn compute(sessions: &[SessionRecord]) -> PersonalRecords {
        let mut out = PersonalRecords::default();
        if sessions.is_empty() {
            return out;
        }

        for &metric in PR_METRICS {
            // Strict comparison keeps the first occurrence on ties.
            let mut winner: Option<(usize, f64)> = None;
            for (idx, session) in sessions.iter().enumerate() {
                let Some(value) = session.metric(metric) else {
                    continue;
                };
                match winner {
                    Some((_, best)) if value <= best => {}
                    _ => winner = Some((idx, value)),
                }
            }
            let Some((idx, value)) = winner else {
                continue;
            };
            out.best.insert(metric, value);
            if let Some(date) = sessions[idx].date {
                out.date.insert(metric, date);
            }
            if metric == Metric::KickingPower {
                if let Some(foot) = record_foot(&sessions[idx]) {
                    out.foot.insert(metric, foot);
                }
            }
        }

        let qualifying = touch_ratios(sessions);
        if !qualifying.is_empty() {
            let mut best = qualifying[0];
            for &(idx, ratio) in &qualifying[1..] {
                if (ratio - BALANCE_GOAL).abs() < (best.1 - BALANCE_GOAL).abs() {
                    best = (idx, ratio);
                }
            }
            out.best_ratio = Some(RatioRecord {
                ratio: best.1,
                date: sessions[best.0].date,
            });
            let ratios: Vec<f64> = qualifying.iter().map(|&(_, r)| r).collect();
            out.avg_ratio = stats::mean(&ratios);
        }

        out
    }
}

/// Which foot produced the kicking-power record. Equal-or-greater left wins;
/// a missing side defaults to the other; both missing means no indicator.
fn record_foot(session: &SessionRecord) -> Option<Foot> {
    let left = session.metric(Metric::LeftKickingPower);
    let right = session.metric(Metric::RightKickingPower);
    match (left, right) {
        (Some(l), Some(r)) => Some(if l >= r { Foot::Left } else { Foot::Right }),
        (Some(_), None) => Some(Foot::Left),
        (None, Some(_)) => Some(Foot::Right),
        (None, None) => None,
    }
}

/// Per-session left/right ratios with their row index, restricted to rows
/// where both touch counts are present and strictly positive.
pub fn touch_ratios(sessions: &[SessionRecord]) -> Vec<(usize, f64)> {
    let mut out = Vec::new();
    for (idx, session) in sessions.iter().enumerate() {
        let (Some(left), Some(right)) = (
            session.metric(Metric::LeftTouches),
            session.metric(Metric::RightTouches),
        ) else {
            continue;
        };
        if left > 0.0 && right > 0.0 {
            out.push((idx, left / right));
        }
    }
    out
}
