//! Effort, complexity, and priority annotation.

use crate::assignment::{Assignment, AssignmentKind, ComplexityScore, Priority};
use chrono::{Duration, NaiveDate};
use log::debug;

const COMPLEXITY_MIN: f64 = 0.5;
const COMPLEXITY_MAX: f64 = 2.0;

/// Verbs signalling analytical depth in a requirement.
const CONCEPTUAL_VERBS: &[&str] = &[
    "analyze", "analyse", "evaluate", "critique", "compare", "justify", "interpret", "argue",
    "synthesize", "synthesise", "theorize",
];

/// Verbs signalling hands-on construction work.
const PROCEDURAL_VERBS: &[&str] = &[
    "design", "implement", "build", "develop", "test", "calculate", "code", "construct", "model",
    "configure", "optimize",
];

pub(crate) fn base_hours(kind: AssignmentKind) -> f64 {
    match kind {
        AssignmentKind::Essay => 10.0,
        AssignmentKind::Report => 12.0,
        AssignmentKind::Project => 15.0,
        AssignmentKind::Presentation => 8.0,
        AssignmentKind::Quiz => 4.0,
        AssignmentKind::Homework => 3.0,
        AssignmentKind::Lab => 6.0,
        AssignmentKind::Task => 5.0,
    }
}

fn kind_multiplier(kind: AssignmentKind) -> f64 {
    match kind {
        AssignmentKind::Essay => 1.1,
        AssignmentKind::Report => 1.2,
        AssignmentKind::Project => 1.4,
        AssignmentKind::Presentation => 1.1,
        AssignmentKind::Quiz => 1.3,
        AssignmentKind::Homework => 0.9,
        AssignmentKind::Lab => 1.2,
        AssignmentKind::Task => 1.0,
    }
}

fn count_verbs(requirements: &[String], verbs: &[&str]) -> usize {
    requirements
        .iter()
        .map(|req| {
            let lowered = req.to_lowercase();
            verbs.iter().filter(|verb| lowered.contains(*verb)).count()
        })
        .sum()
}

fn clamp_complexity(value: f64) -> f64 {
    value.clamp(COMPLEXITY_MIN, COMPLEXITY_MAX)
}

fn complexity(assignment: &Assignment) -> ComplexityScore {
    let conceptual_hits = count_verbs(&assignment.requirements, CONCEPTUAL_VERBS);
    let procedural_hits = count_verbs(&assignment.requirements, PROCEDURAL_VERBS);
    let multiplier = kind_multiplier(assignment.kind);

    ComplexityScore {
        overall: clamp_complexity(
            multiplier + 0.1 * (conceptual_hits + procedural_hits) as f64,
        ),
        conceptual: clamp_complexity(1.0 + 0.15 * conceptual_hits as f64),
        procedural: clamp_complexity(1.0 + 0.15 * procedural_hits as f64),
    }
}

/// Required hours: per-kind base, boosted by stated weight and word count.
/// An explicit hours hint in the text overrides the computation entirely.
fn required_hours(assignment: &Assignment) -> f64 {
    if let Some(explicit) = assignment.estimated_hours {
        return explicit;
    }
    let mut hours = base_hours(assignment.kind);
    if let Some(weight) = assignment.weight {
        hours *= 1.0 + weight / 100.0;
    }
    if let Some(word_count) = assignment.word_count {
        hours *= 1.0 + f64::from(word_count) / 2000.0;
    }
    hours
}

/// Working days to spread the hours over, assuming `pace` focused hours per
/// day is sustainable. Never below 2; long efforts get buffer days.
fn days_needed(total_hours: f64, pace: f64) -> i64 {
    let days = (total_hours / pace).ceil() as i64;
    let buffer = if total_hours > 10.0 {
        2
    } else if total_hours > 5.0 {
        1
    } else {
        0
    };
    days.max(2) + buffer
}

fn priority(due_date: NaiveDate, weight: Option<f64>, today: NaiveDate) -> Priority {
    let days_until = (due_date - today).num_days();
    let weight = weight.unwrap_or(0.0);
    if days_until <= 7 || weight >= 25.0 {
        Priority::High
    } else if days_until >= 21 && weight < 15.0 {
        Priority::Low
    } else {
        Priority::Medium
    }
}

/// Fill the effort fields of a resolved assignment in place.
pub(crate) fn annotate(assignment: &mut Assignment, today: NaiveDate, pace: f64) {
    let total = required_hours(assignment);
    let days = days_needed(total, pace);

    assignment.complexity = Some(complexity(assignment));
    assignment.total_hours = Some(total);
    assignment.days_needed = Some(days);

    if let Some(due) = assignment.due_date {
        assignment.start_date = Some(due - Duration::days(days));
        assignment.priority = Some(priority(due, assignment.weight, today));
    }

    debug!(
        "estimated '{}': {:.1}h over {} days, priority {:?}",
        assignment.title, total, days, assignment.priority
    );
}
