//! Structured insights computed from the session table. Narration lives in
//! [`crate::report`]; everything here is a pure value so the individual
//! sections stay testable. Each section tolerates missing columns by going
//! absent instead of erroring.

use std::collections::HashMap;

use chrono::{Duration, NaiveDateTime};

use crate::session::{Metric, SessionRecord, metric_values};
use crate::stats;

/// Agility tier thresholds on the trailing-session intense-turn average.
pub const ELITE_INTENSE_TURNS: f64 = 10.0;
const STRONG_INTENSE_TURNS: f64 = 7.0;
const SOLID_INTENSE_TURNS: f64 = 5.0;

/// "Current" performance means the last this-many sessions.
const TRAILING_SESSIONS: usize = 3;
const WINDOW_DAYS: i64 = 30;

/// Exit-minus-entry turn speed gain that counts as explosive.
const EXPLOSIVE_EXIT_GAIN: f64 = 0.5;

const SPEED_MILESTONE_STEP: f64 = 0.5;
const TOUCH_MILESTONE_STEP: f64 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgilityTier {
    Elite,
    Strong,
    Solid,
    EarlyStage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrendLabel {
    SignificantImprovement,
    SteadyGrowth,
    Stable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpeedForm {
    Peak,
    RecentGains,
    Maintaining,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccelQuality {
    Explosive,
    Slight,
    Opportunity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowTrend {
    Surging,
    Positive,
    Declining,
    Steady,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Consistency {
    Excellent,
    Reliable,
    Variable,
}

/// Percent change vs the pre-window baseline, bucketed; small moves in
/// either direction stay quiet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BaselineChange {
    Improvement(f64),
    Growth(f64),
    Decline(f64),
    Flat,
}

#[derive(Debug, Clone, Copy)]
pub struct DateRange {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub days: i64,
}

#[derive(Debug, Clone, Copy)]
pub struct TurnDynamics {
    pub entry: f64,
    pub exit: f64,
    pub delta: f64,
}

impl TurnDynamics {
    pub fn quality(&self) -> AccelQuality {
        if self.delta > EXPLOSIVE_EXIT_GAIN {
            AccelQuality::Explosive
        } else if self.delta > 0.0 {
            AccelQuality::Slight
        } else {
            AccelQuality::Opportunity
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct AgilityStatus {
    pub trailing: f64,
    pub best: f64,
    pub tier: AgilityTier,
    pub trend: Option<TrendLabel>,
}

#[derive(Debug, Clone, Copy)]
pub struct SpeedStatus {
    pub trailing: f64,
    pub best: f64,
    pub form: SpeedForm,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FocusArea {
    IntenseTurns { from: f64 },
    ExplosiveAcceleration,
    Maintain,
}

#[derive(Debug, Clone)]
pub struct ExecutiveSummary {
    pub sessions: usize,
    pub days_span: Option<i64>,
    pub agility: Option<AgilityStatus>,
    pub speed: Option<SpeedStatus>,
    pub acceleration: Option<TurnDynamics>,
    pub focus: Vec<FocusArea>,
}

#[derive(Debug, Clone)]
pub struct WindowAgility {
    pub avg: f64,
    pub max: f64,
    pub trend: Option<WindowTrend>,
    pub baseline: Option<BaselineChange>,
}

#[derive(Debug, Clone)]
pub struct WindowSpeed {
    pub avg: f64,
    pub max: f64,
    pub consistency: Consistency,
}

#[derive(Debug, Clone)]
pub struct WindowSummary {
    pub sessions: usize,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub span_days: i64,
    pub agility: Option<WindowAgility>,
    pub speed: Option<WindowSpeed>,
    pub turns: Option<TurnDynamics>,
    pub volume: Option<(f64, f64)>,
}

#[derive(Debug, Clone)]
pub struct VolumeSection {
    /// (total minutes, average minutes).
    pub duration: Option<(f64, f64)>,
    pub training_types: Vec<(String, usize)>,
}

#[derive(Debug, Clone)]
pub struct MetricTrend {
    pub metric: Metric,
    pub first: f64,
    pub last: f64,
    pub change_pct: Option<f64>,
    pub best: f64,
    pub avg: f64,
}

impl MetricTrend {
    pub fn improving(&self) -> bool {
        self.last > self.first
    }
}

#[derive(Debug, Clone, Copy)]
pub struct TwoFooted {
    pub left_pct: f64,
    pub right_pct: f64,
}

#[derive(Debug, Clone)]
pub struct CoachBreakdown {
    pub name: String,
    pub sessions: usize,
    pub avg_speed: Option<f64>,
    pub avg_touches: Option<f64>,
}

#[derive(Debug, Clone, Copy)]
pub struct Directional {
    pub left: f64,
    pub right: f64,
    pub back: f64,
}

impl Directional {
    /// Left/right turn balance; within 0.7..=1.3 reads as balanced.
    pub fn balance(&self) -> Option<f64> {
        (self.left > 0.0 && self.right > 0.0).then(|| self.left / self.right)
    }
}

#[derive(Debug, Clone)]
pub struct AgilitySection {
    /// (average, best) intense turns.
    pub intense: Option<(f64, f64)>,
    pub dynamics: Option<TurnDynamics>,
    pub directional: Option<Directional>,
}

#[derive(Debug, Clone)]
pub struct SpeedPowerSection {
    /// (max, avg) top speed.
    pub top_speed: Option<(f64, f64)>,
    /// Trailing-3 minus first-3 average, when more than three sessions.
    pub recent_delta: Option<f64>,
    /// (max, avg) kicking power.
    pub kicking: Option<(f64, f64)>,
    /// (left avg, right avg) kicking power per foot.
    pub feet: Option<(f64, f64)>,
    /// (avg sprint yards, avg sprint count).
    pub sprint: Option<(f64, f64)>,
}

#[derive(Debug, Clone)]
pub struct TechnicalSection {
    /// (sessions with ball work, total sessions).
    pub frequency: Option<(usize, usize)>,
    /// (avg, max) ball touches.
    pub touches: Option<(f64, f64)>,
    /// (avg ratio, best ratio) toward the 0.5 balance goal.
    pub ratio: Option<(f64, f64)>,
}

#[derive(Debug, Clone)]
pub struct LoadSection {
    pub duration: Option<(f64, f64)>,
    pub sessions_per_week: Option<f64>,
    /// Intensity label -> share of sessions carrying that label.
    pub intensity: Vec<(String, f64)>,
}

#[derive(Debug, Clone)]
pub struct Relationships {
    pub agility_speed_corr: Option<f64>,
    /// Average total distance of above-median-touch sessions.
    pub high_touch_distance: Option<f64>,
}

#[derive(Debug, Clone)]
pub struct SurfacePerf {
    pub surface: String,
    pub speed: Option<f64>,
    pub turns: Option<f64>,
}

#[derive(Debug, Clone)]
pub struct BallCompare {
    /// Each pair is (with ball, without ball).
    pub speed: Option<(f64, f64)>,
    pub turns: Option<(f64, f64)>,
    pub duration: Option<(f64, f64)>,
}

#[derive(Debug, Clone)]
pub struct EnvironmentSection {
    pub locations: Vec<(String, usize)>,
    pub location_speed: Vec<(String, f64)>,
    pub surfaces: Vec<(String, usize)>,
    pub surface_perf: Vec<SurfacePerf>,
    pub best_surface: Option<(String, f64)>,
    pub ball_split: Vec<(bool, usize)>,
    pub ball_compare: Option<BallCompare>,
    pub training_types: Vec<(String, usize)>,
    pub other_training_types: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recommendation {
    IntenseTurnsPriority,
    ExplosivePower,
    LeftFootBalance,
    MaintainTopSpeed,
}

#[derive(Debug, Clone, Copy)]
pub struct Milestone {
    pub metric: Metric,
    pub current: f64,
    pub target: f64,
}

#[derive(Debug, Clone)]
pub struct InsightsReport {
    pub sessions: usize,
    pub date_range: Option<DateRange>,
    pub executive: ExecutiveSummary,
    pub window: Option<WindowSummary>,
    pub volume: VolumeSection,
    pub trends: Vec<MetricTrend>,
    pub two_footed: Option<TwoFooted>,
    pub coaches: Vec<CoachBreakdown>,
    pub agility: AgilitySection,
    pub speed_power: SpeedPowerSection,
    pub technical: TechnicalSection,
    pub load: LoadSection,
    pub relationships: Relationships,
    pub environment: EnvironmentSection,
    pub recommendations: Vec<Recommendation>,
    pub milestones: Vec<Milestone>,
}

impl InsightsReport {
    pub fn compute(sessions: &[SessionRecord]) -> InsightsReport {
        InsightsReport {
            sessions: sessions.len(),
            date_range: date_range(sessions),
            executive: executive_summary(sessions),
            window: window_summary(sessions),
            volume: volume_section(sessions),
            trends: metric_trends(sessions),
            two_footed: two_footed(sessions),
            coaches: coach_breakdown(sessions),
            agility: agility_section(sessions),
            speed_power: speed_power_section(sessions),
            technical: technical_section(sessions),
            load: load_section(sessions),
            relationships: relationships_section(sessions),
            environment: environment_section(sessions),
            recommendations: recommendations(sessions),
            milestones: milestones(sessions),
        }
    }
}

fn date_range(sessions: &[SessionRecord]) -> Option<DateRange> {
    let mut dates = sessions.iter().filter_map(|s| s.date);
    let first = dates.next()?;
    let (start, end) = dates.fold((first, first), |(lo, hi), d| (lo.min(d), hi.max(d)));
    Some(DateRange {
        start,
        end,
        days: (end - start).num_days(),
    })
}

fn executive_summary(sessions: &[SessionRecord]) -> ExecutiveSummary {
    let days_span = date_range(sessions).map(|r| r.days);

    let intense = metric_values(sessions, Metric::IntenseTurns);
    let agility = if intense.is_empty() {
        None
    } else {
        let trailing = stats::trailing_mean(&intense, TRAILING_SESSIONS).unwrap_or(0.0);
        let best = stats::max_value(&intense).unwrap_or(0.0);
        let trend = (intense.len() > TRAILING_SESSIONS).then(|| {
            let early = stats::leading_mean(&intense, TRAILING_SESSIONS).unwrap_or(0.0);
            if trailing > early * 1.2 {
                TrendLabel::SignificantImprovement
            } else if trailing > early {
                TrendLabel::SteadyGrowth
            } else {
                TrendLabel::Stable
            }
        });
        let tier = if trailing >= ELITE_INTENSE_TURNS {
            AgilityTier::Elite
        } else if trailing >= STRONG_INTENSE_TURNS {
            AgilityTier::Strong
        } else if trailing >= SOLID_INTENSE_TURNS {
            AgilityTier::Solid
        } else {
            AgilityTier::EarlyStage
        };
        Some(AgilityStatus {
            trailing,
            best,
            tier,
            trend,
        })
    };

    let speed_vals = metric_values(sessions, Metric::TopSpeed);
    let speed = if speed_vals.is_empty() {
        None
    } else {
        let trailing = stats::trailing_mean(&speed_vals, TRAILING_SESSIONS).unwrap_or(0.0);
        let best = stats::max_value(&speed_vals).unwrap_or(0.0);
        let overall = stats::mean(&speed_vals).unwrap_or(0.0);
        let form = if trailing >= best * 0.95 {
            SpeedForm::Peak
        } else if trailing >= overall * 1.05 {
            SpeedForm::RecentGains
        } else {
            SpeedForm::Maintaining
        };
        Some(SpeedStatus {
            trailing,
            best,
            form,
        })
    };

    let acceleration = turn_dynamics(
        &metric_values(sessions, Metric::TurnEntrySpeed),
        &metric_values(sessions, Metric::TurnExitSpeed),
    );

    // The focus rule deliberately treats "no agility data" as an average of
    // zero, same as the dashboard always nudging toward the 10+ goal.
    let trailing_intense = agility.as_ref().map(|a| a.trailing).unwrap_or(0.0);
    let mut focus = Vec::new();
    if trailing_intense < ELITE_INTENSE_TURNS {
        focus.push(FocusArea::IntenseTurns {
            from: trailing_intense,
        });
    }
    if acceleration.is_some_and(|a| a.quality() == AccelQuality::Opportunity) {
        focus.push(FocusArea::ExplosiveAcceleration);
    }
    if focus.is_empty() {
        focus.push(FocusArea::Maintain);
    }
    focus.truncate(2);

    ExecutiveSummary {
        sessions: sessions.len(),
        days_span,
        agility,
        speed,
        acceleration,
        focus,
    }
}

fn turn_dynamics(entry: &[f64], exit: &[f64]) -> Option<TurnDynamics> {
    let entry = stats::mean(entry)?;
    let exit = stats::mean(exit)?;
    Some(TurnDynamics {
        entry,
        exit,
        delta: exit - entry,
    })
}

fn classify_baseline(pct: f64) -> BaselineChange {
    if pct > 20.0 {
        BaselineChange::Improvement(pct)
    } else if pct > 5.0 {
        BaselineChange::Growth(pct)
    } else if pct < -10.0 {
        BaselineChange::Decline(pct.abs())
    } else {
        BaselineChange::Flat
    }
}

fn classify_consistency(stddev: Option<f64>) -> Consistency {
    match stddev {
        Some(s) if s < 0.5 => Consistency::Excellent,
        Some(s) if s < 1.0 => Consistency::Reliable,
        _ => Consistency::Variable,
    }
}

fn values_of(sessions: &[&SessionRecord], metric: Metric) -> Vec<f64> {
    sessions.iter().filter_map(|s| s.metric(metric)).collect()
}

fn window_summary(sessions: &[SessionRecord]) -> Option<WindowSummary> {
    let mut dated: Vec<&SessionRecord> = sessions.iter().filter(|s| s.date.is_some()).collect();
    if dated.is_empty() {
        return None;
    }
    dated.sort_by_key(|s| s.date);

    let latest = dated.last().and_then(|s| s.date)?;
    let cutoff = latest - Duration::days(WINDOW_DAYS);
    let (recent, baseline): (Vec<&SessionRecord>, Vec<&SessionRecord>) = dated
        .iter()
        .copied()
        .partition(|s| s.date.is_some_and(|d| d > cutoff));

    // The latest session always falls inside its own window.
    let start = recent.first().and_then(|s| s.date)?;
    let end = recent.last().and_then(|s| s.date)?;
    let span_days = (end - start).num_days() + 1;

    let recent_intense = values_of(&recent, Metric::IntenseTurns);
    let agility = if recent_intense.is_empty() {
        None
    } else {
        let avg = stats::mean(&recent_intense).unwrap_or(0.0);
        let max = stats::max_value(&recent_intense).unwrap_or(0.0);
        let trend = (recent_intense.len() > 2).then(|| {
            let half = recent_intense.len() / 2;
            let first = stats::mean(&recent_intense[..half]).unwrap_or(0.0);
            let second = stats::mean(&recent_intense[half..]).unwrap_or(0.0);
            if second > first * 1.15 {
                WindowTrend::Surging
            } else if second > first * 1.05 {
                WindowTrend::Positive
            } else if second < first * 0.85 {
                WindowTrend::Declining
            } else {
                WindowTrend::Steady
            }
        });
        let baseline_change = stats::mean(&values_of(&baseline, Metric::IntenseTurns))
            .map(|b| classify_baseline(stats::pct_change(avg, b)));
        Some(WindowAgility {
            avg,
            max,
            trend,
            baseline: baseline_change,
        })
    };

    let recent_speed = values_of(&recent, Metric::TopSpeed);
    let speed = if recent_speed.is_empty() {
        None
    } else {
        Some(WindowSpeed {
            avg: stats::mean(&recent_speed).unwrap_or(0.0),
            max: stats::max_value(&recent_speed).unwrap_or(0.0),
            consistency: classify_consistency(stats::stddev(&recent_speed)),
        })
    };

    let turns = turn_dynamics(
        &values_of(&recent, Metric::TurnEntrySpeed),
        &values_of(&recent, Metric::TurnExitSpeed),
    );

    let durations = values_of(&recent, Metric::Duration);
    let volume = stats::mean(&durations).map(|avg| (durations.iter().sum::<f64>(), avg));

    Some(WindowSummary {
        sessions: recent.len(),
        start,
        end,
        span_days,
        agility,
        speed,
        turns,
        volume,
    })
}

/// Distinct values with counts, most frequent first; ties keep first
/// appearance order.
fn count_values<'a>(values: impl Iterator<Item = &'a str>) -> Vec<(String, usize)> {
    let mut order: Vec<String> = Vec::new();
    let mut counts: HashMap<String, usize> = HashMap::new();
    for value in values {
        let entry = counts.entry(value.to_string()).or_insert(0);
        if *entry == 0 {
            order.push(value.to_string());
        }
        *entry += 1;
    }
    let mut out: Vec<(String, usize)> = order
        .into_iter()
        .map(|key| {
            let count = counts[&key];
            (key, count)
        })
        .collect();
    out.sort_by(|a, b| b.1.cmp(&a.1));
    out
}

fn volume_section(sessions: &[SessionRecord]) -> VolumeSection {
    let durations = metric_values(sessions, Metric::Duration);
    let duration = stats::mean(&durations).map(|avg| (durations.iter().sum::<f64>(), avg));
    let training_types = count_values(
        sessions
            .iter()
            .filter_map(|s| s.training_type.as_deref()),
    );
    VolumeSection {
        duration,
        training_types,
    }
}

fn metric_trends(sessions: &[SessionRecord]) -> Vec<MetricTrend> {
    let mut out = Vec::new();
    for metric in [Metric::TopSpeed, Metric::BallTouches, Metric::SprintDistance] {
        let values = metric_values(sessions, metric);
        if values.len() < 2 {
            continue;
        }
        let first = values[0];
        let last = values[values.len() - 1];
        out.push(MetricTrend {
            metric,
            first,
            last,
            change_pct: (first != 0.0).then(|| (last - first) / first * 100.0),
            best: stats::max_value(&values).unwrap_or(last),
            avg: stats::mean(&values).unwrap_or(last),
        });
    }
    out
}

fn two_footed(sessions: &[SessionRecord]) -> Option<TwoFooted> {
    let left_pct = stats::mean(&metric_values(sessions, Metric::LeftFootPct))?;
    Some(TwoFooted {
        left_pct,
        right_pct: 100.0 - left_pct,
    })
}

fn coach_breakdown(sessions: &[SessionRecord]) -> Vec<CoachBreakdown> {
    let mut names: Vec<&str> = Vec::new();
    for session in sessions {
        if let Some(coach) = session.coach.as_deref() {
            if !names.contains(&coach) {
                names.push(coach);
            }
        }
    }
    names
        .into_iter()
        .map(|name| {
            let theirs: Vec<&SessionRecord> = sessions
                .iter()
                .filter(|s| s.coach.as_deref() == Some(name))
                .collect();
            CoachBreakdown {
                name: name.to_string(),
                sessions: theirs.len(),
                avg_speed: stats::mean(&values_of(&theirs, Metric::TopSpeed)),
                avg_touches: stats::mean(&values_of(&theirs, Metric::BallTouches)),
            }
        })
        .collect()
}

fn agility_section(sessions: &[SessionRecord]) -> AgilitySection {
    let intense_vals = metric_values(sessions, Metric::IntenseTurns);
    let intense = stats::mean(&intense_vals)
        .zip(stats::max_value(&intense_vals));

    let dynamics = turn_dynamics(
        &metric_values(sessions, Metric::TurnEntrySpeed),
        &metric_values(sessions, Metric::TurnExitSpeed),
    );

    let directional = match (
        stats::mean(&metric_values(sessions, Metric::LeftTurns)),
        stats::mean(&metric_values(sessions, Metric::RightTurns)),
        stats::mean(&metric_values(sessions, Metric::BackTurns)),
    ) {
        (Some(left), Some(right), Some(back)) => Some(Directional { left, right, back }),
        _ => None,
    };

    AgilitySection {
        intense,
        dynamics,
        directional,
    }
}

fn speed_power_section(sessions: &[SessionRecord]) -> SpeedPowerSection {
    let speed = metric_values(sessions, Metric::TopSpeed);
    let top_speed = stats::max_value(&speed).zip(stats::mean(&speed));
    let recent_delta = (speed.len() > TRAILING_SESSIONS)
        .then(|| {
            stats::trailing_mean(&speed, TRAILING_SESSIONS)
                .zip(stats::leading_mean(&speed, TRAILING_SESSIONS))
                .map(|(recent, early)| recent - early)
        })
        .flatten();

    let kick = metric_values(sessions, Metric::KickingPower);
    let kicking = stats::max_value(&kick).zip(stats::mean(&kick));
    let feet = stats::mean(&metric_values(sessions, Metric::LeftKickingPower))
        .zip(stats::mean(&metric_values(sessions, Metric::RightKickingPower)));

    let sprint = stats::mean(&metric_values(sessions, Metric::SprintDistance))
        .zip(stats::mean(&metric_values(sessions, Metric::NumSprints)));

    SpeedPowerSection {
        top_speed,
        recent_delta,
        kicking,
        feet,
        sprint,
    }
}

fn technical_section(sessions: &[SessionRecord]) -> TechnicalSection {
    let touches = metric_values(sessions, Metric::BallTouches);
    let frequency = (!touches.is_empty()).then(|| (touches.len(), sessions.len()));
    let touch_stats = stats::mean(&touches).zip(stats::max_value(&touches));

    let ratios: Vec<f64> = crate::records::touch_ratios(sessions)
        .into_iter()
        .map(|(_, r)| r)
        .collect();
    let ratio = stats::mean(&ratios).map(|avg| {
        let mut best = ratios[0];
        for &r in &ratios[1..] {
            if (r - crate::records::BALANCE_GOAL).abs() < (best - crate::records::BALANCE_GOAL).abs()
            {
                best = r;
            }
        }
        (avg, best)
    });

    TechnicalSection {
        frequency,
        touches: touch_stats,
        ratio,
    }
}

fn load_section(sessions: &[SessionRecord]) -> LoadSection {
    let durations = metric_values(sessions, Metric::Duration);
    let duration = stats::mean(&durations).map(|avg| (durations.iter().sum::<f64>(), avg));

    let sessions_per_week = date_range(sessions).map(|range| {
        if range.days > 0 {
            sessions.len() as f64 / (range.days as f64 / 7.0)
        } else {
            0.0
        }
    });

    let counts = count_values(sessions.iter().filter_map(|s| s.intensity.as_deref()));
    let total: usize = counts.iter().map(|(_, c)| c).sum();
    let intensity = counts
        .into_iter()
        .map(|(label, count)| (label, count as f64 / total.max(1) as f64))
        .collect();

    LoadSection {
        duration,
        sessions_per_week,
        intensity,
    }
}

fn relationships_section(sessions: &[SessionRecord]) -> Relationships {
    let mut intense_paired = Vec::new();
    let mut speed_paired = Vec::new();
    for session in sessions {
        if let (Some(turns), Some(speed)) = (
            session.metric(Metric::IntenseTurns),
            session.metric(Metric::TopSpeed),
        ) {
            intense_paired.push(turns);
            speed_paired.push(speed);
        }
    }
    let agility_speed_corr = (intense_paired.len() > 3)
        .then(|| stats::pearson(&intense_paired, &speed_paired))
        .flatten();

    let touches = metric_values(sessions, Metric::BallTouches);
    let high_touch_distance = stats::median(&touches).and_then(|median| {
        let distances: Vec<f64> = sessions
            .iter()
            .filter(|s| s.metric(Metric::BallTouches).is_some_and(|t| t > median))
            .filter_map(|s| s.metric(Metric::TotalDistance))
            .collect();
        stats::mean(&distances)
    });

    Relationships {
        agility_speed_corr,
        high_touch_distance,
    }
}

fn environment_section(sessions: &[SessionRecord]) -> EnvironmentSection {
    let locations = count_values(sessions.iter().filter_map(|s| s.location.as_deref()));
    let location_speed = if locations.len() > 1 {
        locations
            .iter()
            .filter_map(|(location, _)| {
                let speeds: Vec<f64> = sessions
                    .iter()
                    .filter(|s| s.location.as_deref() == Some(location))
                    .filter_map(|s| s.metric(Metric::TopSpeed))
                    .collect();
                stats::mean(&speeds).map(|avg| (location.clone(), avg))
            })
            .collect()
    } else {
        Vec::new()
    };

    let surfaces = count_values(sessions.iter().filter_map(|s| s.surface.as_deref()));
    let mut surface_perf = Vec::new();
    let mut best_surface: Option<(String, f64)> = None;
    if surfaces.len() > 1 {
        for (surface, _) in &surfaces {
            let on_surface: Vec<&SessionRecord> = sessions
                .iter()
                .filter(|s| s.surface.as_deref() == Some(surface))
                .collect();
            let speed = stats::mean(&values_of(&on_surface, Metric::TopSpeed));
            let turns = stats::mean(&values_of(&on_surface, Metric::IntenseTurns));
            if speed.is_some() || turns.is_some() {
                surface_perf.push(SurfacePerf {
                    surface: surface.clone(),
                    speed,
                    turns,
                });
            }
            if let Some(avg) = speed {
                if best_surface.as_ref().is_none_or(|(_, best)| avg > *best) {
                    best_surface = Some((surface.clone(), avg));
                }
            }
        }
    }

    let mut with_count = 0usize;
    let mut without_count = 0usize;
    for session in sessions {
        match session.with_ball {
            Some(true) => with_count += 1,
            Some(false) => without_count += 1,
            None => {}
        }
    }
    let mut ball_split = Vec::new();
    if with_count > 0 {
        ball_split.push((true, with_count));
    }
    if without_count > 0 {
        ball_split.push((false, without_count));
    }
    ball_split.sort_by(|a, b| b.1.cmp(&a.1));

    let ball_compare = (with_count > 0 && without_count > 0).then(|| {
        let with_ball: Vec<&SessionRecord> = sessions
            .iter()
            .filter(|s| s.with_ball == Some(true))
            .collect();
        let without: Vec<&SessionRecord> = sessions
            .iter()
            .filter(|s| s.with_ball == Some(false))
            .collect();
        let pair = |metric: Metric| {
            stats::mean(&values_of(&with_ball, metric))
                .zip(stats::mean(&values_of(&without, metric)))
        };
        BallCompare {
            speed: pair(Metric::TopSpeed),
            turns: pair(Metric::IntenseTurns),
            duration: pair(Metric::Duration),
        }
    });

    let mut training_types = count_values(
        sessions
            .iter()
            .filter_map(|s| s.training_type.as_deref()),
    );
    let other_training_types = training_types.len().saturating_sub(5);
    training_types.truncate(5);

    EnvironmentSection {
        locations,
        location_speed,
        surfaces,
        surface_perf,
        best_surface,
        ball_split,
        ball_compare,
        training_types,
        other_training_types,
    }
}

fn recommendations(sessions: &[SessionRecord]) -> Vec<Recommendation> {
    let mut out = Vec::new();

    if let Some(avg) = stats::mean(&metric_values(sessions, Metric::IntenseTurns)) {
        if avg < SOLID_INTENSE_TURNS {
            out.push(Recommendation::IntenseTurnsPriority);
        }
    }

    if let Some(dynamics) = turn_dynamics(
        &metric_values(sessions, Metric::TurnEntrySpeed),
        &metric_values(sessions, Metric::TurnExitSpeed),
    ) {
        if dynamics.exit <= dynamics.entry {
            out.push(Recommendation::ExplosivePower);
        }
    }

    // This rule compares session averages side to side (ratio of means),
    // unlike the PR engine's per-session mean of ratios.
    if let (Some(left), Some(right)) = (
        stats::mean(&metric_values(sessions, Metric::LeftTouches)),
        stats::mean(&metric_values(sessions, Metric::RightTouches)),
    ) {
        if left > 0.0 && right > 0.0 && left / right < 0.4 {
            out.push(Recommendation::LeftFootBalance);
        }
    }

    let speed = metric_values(sessions, Metric::TopSpeed);
    if speed.len() > TRAILING_SESSIONS {
        if let (Some(recent), Some(best)) = (
            stats::trailing_mean(&speed, TRAILING_SESSIONS),
            stats::max_value(&speed),
        ) {
            if recent < best * 0.9 {
                out.push(Recommendation::MaintainTopSpeed);
            }
        }
    }

    out
}

fn next_step(current: f64, step: f64) -> f64 {
    ((current / step).floor() + 1.0) * step
}

fn milestones(sessions: &[SessionRecord]) -> Vec<Milestone> {
    let mut out = Vec::new();
    if let Some(current) = stats::max_value(&metric_values(sessions, Metric::TopSpeed)) {
        out.push(Milestone {
            metric: Metric::TopSpeed,
            current,
            target: next_step(current, SPEED_MILESTONE_STEP),
        });
    }
    if let Some(current) = stats::max_value(&metric_values(sessions, Metric::BallTouches)) {
        out.push(Milestone {
            metric: Metric::BallTouches,
            current,
            target: next_step(current, TOUCH_MILESTONE_STEP),
        });
    }
    out
}
