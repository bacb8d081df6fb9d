//! Renders an [`InsightsReport`] into the downloadable text report. Section
//! order and header strings are fixed; sections with no data fall back to a
//! short placeholder or print nothing.

use chrono::NaiveDateTime;

use crate::insights::{
    AccelQuality, AgilityTier, BaselineChange, Consistency, FocusArea, InsightsReport,
    Recommendation, SpeedForm, TrendLabel, WindowTrend,
};
use crate::session::Metric;

const WIDTH: usize = 80;

fn heavy_rule() -> String {
    "=".repeat(WIDTH)
}

fn light_rule() -> String {
    "-".repeat(WIDTH)
}

fn plural(n: i64) -> &'static str {
    if n == 1 { "" } else { "s" }
}

pub fn render_report(report: &InsightsReport, athlete: &str, generated_at: NaiveDateTime) -> String {
    let mut out = String::new();

    out.push_str("🤖 COMPREHENSIVE TRAINING INSIGHTS REPORT\n");
    out.push_str(&heavy_rule());
    out.push('\n');
    out.push_str(&format!(
        "Generated: {}\n",
        generated_at.format("%Y-%m-%d %H:%M")
    ));
    out.push_str(&format!("Total Sessions Analyzed: {}\n", report.sessions));
    if let Some(range) = &report.date_range {
        out.push_str(&format!(
            "Date Range: {} to {} ({} days)\n",
            range.start.format("%b %d, %Y"),
            range.end.format("%b %d, %Y"),
            range.days
        ));
    }
    out.push('\n');

    out.push_str(&render_executive(report, athlete));
    out.push('\n');
    out.push_str(&render_window(report, athlete));
    out.push('\n');

    render_volume(&mut out, report);
    render_trends(&mut out, report);
    render_two_footed(&mut out, report);
    render_coaches(&mut out, report);
    render_agility(&mut out, report);
    render_speed_power(&mut out, report);
    render_technical(&mut out, report);
    render_load(&mut out, report);
    render_relationships(&mut out, report);
    render_environment(&mut out, report);
    render_recommendations(&mut out, report);
    render_milestones(&mut out, report);

    out.push('\n');
    out.push_str(&heavy_rule());
    out.push('\n');
    out.push_str("Keep pushing boundaries and tracking progress! 🌟⚽\n");
    out
}

fn tier_phrase(tier: AgilityTier) -> &'static str {
    match tier {
        AgilityTier::Elite => "elite-level agility with consistent high-speed direction changes",
        AgilityTier::Strong => "strong agility development, approaching elite performance",
        AgilityTier::Solid => "solid agility foundation with room to reach elite levels",
        AgilityTier::EarlyStage => {
            "early-stage agility development with significant growth opportunity"
        }
    }
}

fn trend_phrase(trend: TrendLabel) -> &'static str {
    match trend {
        TrendLabel::SignificantImprovement => "significant improvement",
        TrendLabel::SteadyGrowth => "steady growth",
        TrendLabel::Stable => "stable performance",
    }
}

fn form_phrase(form: SpeedForm) -> &'static str {
    match form {
        SpeedForm::Peak => "performing at peak speed",
        SpeedForm::RecentGains => "showing recent speed gains",
        SpeedForm::Maintaining => "maintaining speed development",
    }
}

pub fn render_executive(report: &InsightsReport, athlete: &str) -> String {
    let exec = &report.executive;
    let mut out = String::new();
    out.push_str("📋 EXECUTIVE SUMMARY\n");
    out.push_str(&light_rule());
    out.push('\n');

    let date_info = exec
        .days_span
        .map(|days| format!(" over {days} days"))
        .unwrap_or_default();
    out.push_str(&format!(
        "Based on analysis of {} training sessions{}, ",
        exec.sessions, date_info
    ));

    if let Some(agility) = &exec.agility {
        out.push_str(&format!(
            "{athlete} demonstrates {}. ",
            tier_phrase(agility.tier)
        ));
        if let Some(trend) = agility.trend {
            out.push_str(&format!(
                "Intense turns show {}, currently averaging {:.1} per session with a best of {:.0}. ",
                trend_phrase(trend),
                agility.trailing,
                agility.best
            ));
        }
    }

    if let Some(speed) = &exec.speed {
        out.push_str(&format!(
            "In terms of speed development, {athlete} is {}, with recent sessions averaging {:.1} mph against a personal best of {:.1} mph. ",
            form_phrase(speed.form),
            speed.trailing,
            speed.best
        ));
    }

    if let Some(accel) = &exec.acceleration {
        let phrase = match accel.quality() {
            AccelQuality::Explosive => format!(
                "{athlete} shows explosive acceleration out of cuts, a critical game-speed skill"
            ),
            AccelQuality::Slight => {
                format!("{athlete} maintains speed through turns with slight acceleration")
            }
            AccelQuality::Opportunity => {
                "Turn exit speed presents an opportunity for explosive power development"
                    .to_string()
            }
        };
        out.push_str(&phrase);
        out.push_str(". ");
    }

    out.push_str("\n\nPRIMARY FOCUS AREAS: ");
    for (i, item) in exec.focus.iter().enumerate() {
        let text = match item {
            FocusArea::IntenseTurns { from } => format!(
                "Increase intense turns from {from:.1} to 10+ per session through high-speed cutting drills and small-sided games"
            ),
            FocusArea::ExplosiveAcceleration => {
                "Develop explosive acceleration out of turns with plyometrics and first-step quickness drills"
                    .to_string()
            }
            FocusArea::Maintain => {
                "Continue balanced development while maintaining current momentum across all metrics"
                    .to_string()
            }
        };
        out.push_str(&format!("\n  {}. {}", i + 1, text));
    }
    out.push_str("\n\n");
    out
}

pub fn render_window(report: &InsightsReport, athlete: &str) -> String {
    let mut out = String::new();
    out.push_str("📅 30-DAY CHANGE SUMMARY\n");
    out.push_str(&light_rule());
    out.push('\n');

    let Some(window) = &report.window else {
        out.push_str("Date information not available for 30-day analysis.\n\n");
        return out;
    };

    out.push_str(&format!(
        "Over the past 30 days ({} - {}), {athlete} completed {} training session{} spanning {} day{}. ",
        window.start.format("%b %d"),
        window.end.format("%b %d, %Y"),
        window.sessions,
        plural(window.sessions as i64),
        window.span_days,
        plural(window.span_days)
    ));

    if let Some(agility) = &window.agility {
        let trend = match agility.trend {
            Some(WindowTrend::Surging) => ", surging upward",
            Some(WindowTrend::Positive) => ", trending positively",
            Some(WindowTrend::Declining) => ", declining",
            Some(WindowTrend::Steady) => ", holding steady",
            None => "",
        };
        let comparison = match agility.baseline {
            Some(BaselineChange::Improvement(pct)) => {
                format!(", representing a {pct:.0}% improvement from the earlier baseline")
            }
            Some(BaselineChange::Growth(pct)) => {
                format!(", showing {pct:.0}% growth from previous performance")
            }
            Some(BaselineChange::Decline(pct)) => {
                format!(", down {pct:.0}% from the earlier average")
            }
            Some(BaselineChange::Flat) | None => String::new(),
        };
        out.push_str(&format!(
            "Agility development shows intense turns averaging {:.1} per session with a peak of {:.0}{}{}. ",
            agility.avg, agility.max, trend, comparison
        ));
    }

    if let Some(speed) = &window.speed {
        let consistency = match speed.consistency {
            Consistency::Excellent => "with excellent consistency",
            Consistency::Reliable => "showing reliable performance",
            Consistency::Variable => "with some variability",
        };
        out.push_str(&format!(
            "Speed metrics reveal an average top speed of {:.1} mph (best: {:.1} mph) {}. ",
            speed.avg, speed.max, consistency
        ));
    }

    if let Some(turns) = &window.turns {
        match turns.quality() {
            AccelQuality::Explosive => out.push_str(&format!(
                "Turn dynamics are exceptional, with exit speeds averaging {:.1} mph faster than entry speeds, demonstrating explosive acceleration out of cuts. ",
                turns.delta
            )),
            AccelQuality::Slight => out.push_str(&format!(
                "Turn performance shows positive exit acceleration ({:+.1} mph), indicating developing explosive power. ",
                turns.delta
            )),
            AccelQuality::Opportunity => out.push_str(&format!(
                "Turn exit speeds are currently {:.1} mph slower than entry speeds on average, presenting a clear opportunity for plyometric and explosive training focus. ",
                turns.delta.abs()
            )),
        }
    }

    if let Some((total, avg)) = window.volume {
        out.push_str(&format!(
            "Training volume totaled {:.0} minutes ({:.1} hours) with sessions averaging {:.0} minutes each. ",
            total,
            total / 60.0,
            avg
        ));
    }

    out.push_str(
        "These trends provide a comprehensive view of recent development patterns and identify specific areas where focused training can accelerate progress toward elite performance.\n\n",
    );
    out
}

fn section_header(out: &mut String, title: &str) {
    out.push_str(title);
    out.push('\n');
    out.push_str(&light_rule());
    out.push('\n');
}

fn render_volume(out: &mut String, report: &InsightsReport) {
    section_header(out, "📊 TRAINING VOLUME ANALYSIS");
    if let Some((total, avg)) = report.volume.duration {
        out.push_str(&format!(
            "  • Total Training Time: {total:.0} minutes ({:.1} hours)\n",
            total / 60.0
        ));
        out.push_str(&format!("  • Average Session Length: {avg:.1} minutes\n"));
    }
    if !report.volume.training_types.is_empty() {
        out.push_str("\n  Training Distribution:\n");
        for (name, count) in &report.volume.training_types {
            out.push_str(&format!(
                "    - {name}: {count} sessions ({:.1}%)\n",
                *count as f64 / report.sessions.max(1) as f64 * 100.0
            ));
        }
    }
}

fn render_trends(out: &mut String, report: &InsightsReport) {
    out.push('\n');
    section_header(out, "📈 PERFORMANCE TRENDS");
    for trend in &report.trends {
        let direction = if trend.improving() {
            "IMPROVING"
        } else {
            "DECLINING"
        };
        match trend.change_pct {
            Some(pct) => out.push_str(&format!(
                "  • {}: {} ({:+.1}% from first to last session)\n",
                trend.metric.label(),
                direction,
                pct
            )),
            None => out.push_str(&format!("  • {}: {}\n", trend.metric.label(), direction)),
        }
        let unit = trend.metric.unit();
        out.push_str(&format!(
            "    Current: {:.1} {unit} | Best: {:.1} {unit} | Avg: {:.1} {unit}\n",
            trend.last, trend.best, trend.avg
        ));
    }
}

fn render_two_footed(out: &mut String, report: &InsightsReport) {
    out.push('\n');
    section_header(out, "⚽ TWO-FOOTED DEVELOPMENT");
    if let Some(split) = &report.two_footed {
        out.push_str(&format!("  • Left Foot Usage: {:.1}%\n", split.left_pct));
        out.push_str(&format!("  • Right Foot Usage: {:.1}%\n", split.right_pct));
        if split.left_pct < 30.0 {
            out.push_str("  ⚠️ RECOMMENDATION: Increase left foot training to improve balance\n");
        } else {
            out.push_str("  ✅ Good two-footed development - keep it up!\n");
        }
    }
}

fn render_coaches(out: &mut String, report: &InsightsReport) {
    out.push('\n');
    section_header(out, "👨‍🏫 COACH PERFORMANCE ANALYSIS");
    for coach in &report.coaches {
        let display = if coach.name.eq_ignore_ascii_case("solo") {
            "No Coach"
        } else {
            coach.name.as_str()
        };
        out.push_str(&format!("  {display} ({} sessions):\n", coach.sessions));
        if let Some(speed) = coach.avg_speed {
            out.push_str(&format!("    - Avg Top Speed: {speed:.2} mph\n"));
        }
        if let Some(touches) = coach.avg_touches {
            out.push_str(&format!("    - Avg Ball Touches: {touches:.0}\n"));
        }
    }
}

fn render_agility(out: &mut String, report: &InsightsReport) {
    out.push('\n');
    section_header(out, "🔄 AGILITY DEVELOPMENT ANALYSIS");

    if let Some((avg, max)) = report.agility.intense {
        out.push_str("  ⚡ INTENSE TURNS (Game-Speed Agility at 9+ mph):\n");
        out.push_str(&format!("    Average: {avg:.1} | Best: {max:.0}\n"));
    }

    if let Some(dynamics) = &report.agility.dynamics {
        out.push_str("\n  💨 TURN SPEED DYNAMICS:\n");
        out.push_str(&format!(
            "    Entry Speed: {:.1} mph | Exit Speed: {:.1} mph\n",
            dynamics.entry, dynamics.exit
        ));
        out.push_str(&format!("    Speed Change: {:+.1} mph\n", dynamics.delta));
        match dynamics.quality() {
            AccelQuality::Explosive => {
                out.push_str("    ✅ EXPLOSIVE: Accelerating out of cuts - excellent power!\n")
            }
            AccelQuality::Opportunity => {
                out.push_str(
                    "    ⚠️ FOCUS: Exit slower than entry - work on explosive acceleration\n",
                );
                out.push_str("       → Plyometric training, first-step drills\n");
            }
            AccelQuality::Slight => {}
        }
    }

    if let Some(directional) = &report.agility.directional {
        out.push_str("\n  ↔️ DIRECTIONAL AGILITY:\n");
        out.push_str(&format!(
            "    Left Turns: {:.1} | Right Turns: {:.1} | Back Turns: {:.1}\n",
            directional.left, directional.right, directional.back
        ));
        if directional
            .balance()
            .is_some_and(|ratio| (0.7..=1.3).contains(&ratio))
        {
            out.push_str("    ✅ Balanced left/right development\n");
        }
    }
}

fn render_speed_power(out: &mut String, report: &InsightsReport) {
    out.push('\n');
    section_header(out, "🚀 SPEED & POWER DEVELOPMENT");
    let section = &report.speed_power;

    if let Some((max, avg)) = section.top_speed {
        out.push_str(&format!(
            "  Top Speed: Current Max {max:.1} mph | Avg {avg:.1} mph\n"
        ));
        if let Some(delta) = section.recent_delta {
            if delta > 0.5 {
                out.push_str(&format!(
                    "  ✅ Improving: +{delta:.1} mph in recent sessions\n"
                ));
            } else if delta < -0.5 {
                out.push_str(&format!("  ⚠️ Declining: {delta:.1} mph - may need recovery\n"));
            }
        }
    }

    if let Some((max, avg)) = section.kicking {
        out.push_str(&format!(
            "\n  Kicking Power: Max {max:.1} mph | Avg {avg:.1} mph\n"
        ));
        if let Some((left, right)) = section.feet {
            out.push_str(&format!(
                "  Left Foot: {left:.1} mph | Right Foot: {right:.1} mph\n"
            ));
            if (left - right).abs() < 3.0 {
                out.push_str("  ✅ Balanced kicking power between feet\n");
            } else {
                let weaker = if left < right { "Left" } else { "Right" };
                out.push_str(&format!("  ⚠️ {weaker} foot needs power development\n"));
            }
        }
    }

    if let Some((dist, count)) = section.sprint {
        out.push_str(&format!(
            "\n  Sprint Volume: Avg {dist:.0} yards over {count:.1} sprints\n"
        ));
    }
}

fn render_technical(out: &mut String, report: &InsightsReport) {
    out.push('\n');
    section_header(out, "⚽ TECHNICAL DEVELOPMENT");
    let section = &report.technical;

    if let Some((with_ball, total)) = section.frequency {
        out.push_str(&format!(
            "  Ball Work Frequency: {with_ball}/{total} sessions ({:.0}%)\n",
            with_ball as f64 / total.max(1) as f64 * 100.0
        ));
        if let Some((avg, max)) = section.touches {
            out.push_str(&format!("  Avg Touches: {avg:.0} | Max: {max:.0}\n"));
        }
    }

    if let Some((avg, best)) = section.ratio {
        out.push_str("\n  Left/Right Touch Ratio:\n");
        out.push_str(&format!(
            "    Average: {avg:.2} | Best: {best:.2} | Goal: 0.50\n"
        ));
        if avg >= 0.5 {
            out.push_str("    ✅ GOAL MET: Excellent left foot development!\n");
        } else if avg >= 0.4 {
            out.push_str("    📈 CLOSE: Almost at goal - keep working left foot!\n");
        } else {
            out.push_str(&format!(
                "    ⚠️ FOCUS: Need more left foot touches (currently {:.0}% of right)\n",
                avg * 100.0
            ));
        }
    }
}

fn render_load(out: &mut String, report: &InsightsReport) {
    out.push('\n');
    section_header(out, "📊 TRAINING LOAD MANAGEMENT");
    let section = &report.load;

    if let Some((total, avg)) = section.duration {
        out.push_str(&format!(
            "  Total Volume: {total:.0} minutes ({:.1} hours)\n",
            total / 60.0
        ));
        out.push_str(&format!("  Avg Session: {avg:.1} minutes\n"));
    }

    if let Some(per_week) = section.sessions_per_week {
        out.push_str(&format!("  Training Frequency: {per_week:.1} sessions/week\n"));
        if per_week < 3.0 {
            out.push_str(
                "  ⚠️ Consider increasing to 3-4 sessions/week for optimal development\n",
            );
        }
    }

    if !section.intensity.is_empty() {
        out.push_str("\n  Intensity Distribution:\n");
        for (label, share) in &section.intensity {
            out.push_str(&format!("    {label}: {:.0}%\n", share * 100.0));
        }
    }
}

fn render_relationships(out: &mut String, report: &InsightsReport) {
    out.push('\n');
    section_header(out, "🔗 PERFORMANCE RELATIONSHIPS");

    if let Some(corr) = report.relationships.agility_speed_corr {
        out.push_str(&format!("  Agility-Speed Correlation: {corr:.2}\n"));
    }

    if let Some(distance) = report.relationships.high_touch_distance {
        out.push_str("\n  Ball Work Intensity:\n");
        out.push_str(&format!(
            "    High-touch sessions avg distance: {distance:.2} miles\n"
        ));
    }
}

fn render_environment(out: &mut String, report: &InsightsReport) {
    out.push('\n');
    section_header(out, "🌍 TRAINING ENVIRONMENT ANALYSIS");
    let env = &report.environment;
    let total = report.sessions.max(1) as f64;

    if !env.locations.is_empty() {
        out.push_str("  Training Locations:\n");
        for (location, count) in &env.locations {
            out.push_str(&format!(
                "    • {location}: {count} sessions ({:.1}%)\n",
                *count as f64 / total * 100.0
            ));
        }
        if !env.location_speed.is_empty() {
            out.push_str("\n  Performance by Location:\n");
            for (location, speed) in &env.location_speed {
                out.push_str(&format!("    {location}: Avg Top Speed {speed:.1} mph\n"));
            }
        }
    }

    if !env.surfaces.is_empty() {
        out.push_str("\n  Surface Distribution:\n");
        for (surface, count) in &env.surfaces {
            out.push_str(&format!(
                "    • {surface}: {count} sessions ({:.1}%)\n",
                *count as f64 / total * 100.0
            ));
        }
        if !env.surface_perf.is_empty() {
            out.push_str("\n  Surface Performance Comparison:\n");
            for perf in &env.surface_perf {
                out.push_str(&format!("    {}:\n", perf.surface));
                if let Some(speed) = perf.speed {
                    out.push_str(&format!("      - Top Speed: {speed:.1} mph\n"));
                }
                if let Some(turns) = perf.turns {
                    out.push_str(&format!("      - Intense Turns: {turns:.1}\n"));
                }
            }
            if let Some((surface, speed)) = &env.best_surface {
                out.push_str(&format!(
                    "\n    ✅ Best surface for speed: {surface} ({speed:.1} mph avg)\n"
                ));
            }
        }
    }

    if !env.ball_split.is_empty() {
        out.push_str("\n  Ball Work Distribution:\n");
        for (with_ball, count) in &env.ball_split {
            let label = if *with_ball { "With" } else { "Without" };
            out.push_str(&format!(
                "    • {label} Ball: {count} sessions ({:.1}%)\n",
                *count as f64 / total * 100.0
            ));
        }
        if let Some(compare) = &env.ball_compare {
            out.push_str("\n  Ball vs Non-Ball Performance:\n");
            if let Some((with_ball, without)) = compare.speed {
                out.push_str(&format!(
                    "    Top Speed: With Ball {with_ball:.1} mph | Without Ball {without:.1} mph\n"
                ));
                let diff = without - with_ball;
                if diff > 1.0 {
                    out.push_str(&format!(
                        "    💡 {diff:.1} mph faster without ball - expected for pure speed work\n"
                    ));
                }
            }
            if let Some((with_ball, without)) = compare.turns {
                out.push_str(&format!(
                    "    Intense Turns: With Ball {with_ball:.1} | Without Ball {without:.1}\n"
                ));
            }
            if let Some((with_ball, without)) = compare.duration {
                out.push_str(&format!(
                    "    Avg Duration: With Ball {with_ball:.0} min | Without Ball {without:.0} min\n"
                ));
            }
        }
    }

    if !env.training_types.is_empty() {
        out.push_str("\n  Training Types:\n");
        for (name, count) in &env.training_types {
            out.push_str(&format!("    • {name}: {count} sessions\n"));
        }
        if env.other_training_types > 0 {
            out.push_str(&format!(
                "    • ({} other training types)\n",
                env.other_training_types
            ));
        }
    }
}

fn render_recommendations(out: &mut String, report: &InsightsReport) {
    out.push('\n');
    section_header(out, "💡 PERSONALIZED ACTION PLAN");

    if report.recommendations.is_empty() {
        out.push_str("  ✅ All metrics show balanced, effective development!\n");
        out.push_str("     Continue current training approach.\n");
        return;
    }
    for (i, rec) in report.recommendations.iter().enumerate() {
        let text = match rec {
            Recommendation::IntenseTurnsPriority => {
                "🎯 PRIORITY: Increase intense turns to 10+/session\n   → High-speed cutting drills, small-sided games"
            }
            Recommendation::ExplosivePower => {
                "⚡ Improve explosive power out of cuts\n   → Plyometrics, resistance training, first-step drills"
            }
            Recommendation::LeftFootBalance => {
                "👣 Increase left foot training for better balance\n   → Dedicated left-foot drills, force left-only touches"
            }
            Recommendation::MaintainTopSpeed => {
                "🚀 Focus on maintaining top speed\n   → Sprint intervals, resistance training, proper recovery"
            }
        };
        out.push_str(&format!("  {}. {}\n\n", i + 1, text));
    }
}

fn render_milestones(out: &mut String, report: &InsightsReport) {
    out.push('\n');
    section_header(out, "🎯 NEXT MILESTONE TARGETS");
    for milestone in &report.milestones {
        match milestone.metric {
            Metric::TopSpeed => out.push_str(&format!(
                "  • Top Speed: Current {:.1} mph → Target {:.1} mph\n",
                milestone.current, milestone.target
            )),
            Metric::BallTouches => out.push_str(&format!(
                "  • Ball Touches: Current {:.0} → Target {:.0}\n",
                milestone.current, milestone.target
            )),
            other => out.push_str(&format!(
                "  • {}: Current {:.1} → Target {:.1}\n",
                other.label(),
                milestone.current,
                milestone.target
            )),
        }
    }
}
