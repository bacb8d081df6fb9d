use std::collections::HashMap;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Numeric metrics tracked per training session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Metric {
    Duration,
    TotalDistance,
    SprintDistance,
    NumSprints,
    TopSpeed,
    BallTouches,
    LeftTouches,
    RightTouches,
    LeftFootPct,
    KickingPower,
    LeftKickingPower,
    RightKickingPower,
    LeftTurns,
    RightTurns,
    BackTurns,
    IntenseTurns,
    TurnEntrySpeed,
    TurnExitSpeed,
}

impl Metric {
    pub const ALL: &'static [Metric] = &[
        Metric::Duration,
        Metric::TotalDistance,
        Metric::SprintDistance,
        Metric::NumSprints,
        Metric::TopSpeed,
        Metric::BallTouches,
        Metric::LeftTouches,
        Metric::RightTouches,
        Metric::LeftFootPct,
        Metric::KickingPower,
        Metric::LeftKickingPower,
        Metric::RightKickingPower,
        Metric::LeftTurns,
        Metric::RightTurns,
        Metric::BackTurns,
        Metric::IntenseTurns,
        Metric::TurnEntrySpeed,
        Metric::TurnExitSpeed,
    ];

    /// Canonical column name after header normalization.
    pub fn column(self) -> &'static str {
        match self {
            Metric::Duration => "duration",
            Metric::TotalDistance => "total_distance",
            Metric::SprintDistance => "sprint_distance",
            Metric::NumSprints => "num_sprints",
            Metric::TopSpeed => "top_speed",
            Metric::BallTouches => "ball_touches",
            Metric::LeftTouches => "left_touches",
            Metric::RightTouches => "right_touches",
            Metric::LeftFootPct => "left_foot_pct",
            Metric::KickingPower => "kicking_power",
            Metric::LeftKickingPower => "left_kicking_power",
            Metric::RightKickingPower => "right_kicking_power",
            Metric::LeftTurns => "left_turns",
            Metric::RightTurns => "right_turns",
            Metric::BackTurns => "back_turns",
            Metric::IntenseTurns => "intense_turns",
            Metric::TurnEntrySpeed => "avg_turn_entry",
            Metric::TurnExitSpeed => "avg_turn_exit",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Metric::Duration => "Duration",
            Metric::TotalDistance => "Total Distance",
            Metric::SprintDistance => "Sprint Distance",
            Metric::NumSprints => "Sprints",
            Metric::TopSpeed => "Top Speed",
            Metric::BallTouches => "Ball Touches",
            Metric::LeftTouches => "Left Touches",
            Metric::RightTouches => "Right Touches",
            Metric::LeftFootPct => "Left Foot %",
            Metric::KickingPower => "Kicking Power",
            Metric::LeftKickingPower => "Left Kicking Power",
            Metric::RightKickingPower => "Right Kicking Power",
            Metric::LeftTurns => "Left Turns",
            Metric::RightTurns => "Right Turns",
            Metric::BackTurns => "Back Turns",
            Metric::IntenseTurns => "Intense Turns",
            Metric::TurnEntrySpeed => "Turn Entry Speed",
            Metric::TurnExitSpeed => "Turn Exit Speed",
        }
    }

    /// Unit suffix for narration; empty for plain counts.
    pub fn unit(self) -> &'static str {
        match self {
            Metric::Duration => "min",
            Metric::TotalDistance => "miles",
            Metric::SprintDistance => "yards",
            Metric::TopSpeed
            | Metric::KickingPower
            | Metric::LeftKickingPower
            | Metric::RightKickingPower
            | Metric::TurnEntrySpeed
            | Metric::TurnExitSpeed => "mph",
            Metric::BallTouches | Metric::LeftTouches | Metric::RightTouches => "touches",
            Metric::LeftFootPct => "%",
            Metric::NumSprints
            | Metric::LeftTurns
            | Metric::RightTurns
            | Metric::BackTurns
            | Metric::IntenseTurns => "",
        }
    }

    pub fn from_column(name: &str) -> Option<Metric> {
        Metric::ALL.iter().copied().find(|m| m.column() == name)
    }
}

/// One training session. All fields are optional; a missing metric is an
/// absent key, never zero.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionRecord {
    pub date: Option<NaiveDateTime>,
    pub session_name: Option<String>,
    pub coach: Option<String>,
    pub location: Option<String>,
    pub surface: Option<String>,
    pub training_type: Option<String>,
    pub intensity: Option<String>,
    pub position: Option<String>,
    pub with_ball: Option<bool>,
    #[serde(default)]
    pub metrics: HashMap<Metric, f64>,
}

impl SessionRecord {
    pub fn metric(&self, metric: Metric) -> Option<f64> {
        self.metrics.get(&metric).copied().filter(|v| v.is_finite())
    }

    pub fn set_metric(&mut self, metric: Metric, value: f64) {
        if value.is_finite() {
            self.metrics.insert(metric, value);
        }
    }
}

/// Values of one metric across sessions in table order, absent rows skipped.
pub fn metric_values(sessions: &[SessionRecord], metric: Metric) -> Vec<f64> {
    sessions.iter().filter_map(|s| s.metric(metric)).collect()
}
