//! Conversion of an assignment's required hours into dated, timed study
//! sessions spread across its work window.

use crate::assignment::{Assignment, Priority};
use crate::entry::{entry_id, EntryKind, EntryResource, ScheduleEntry};
use crate::stages::{stage_at, LearningStage};
use chrono::{Duration, NaiveTime};
use log::warn;

const MIN_SESSION_HOURS: f64 = 1.5;
const MAX_SESSION_HOURS: f64 = 2.5;

fn default_slots() -> Vec<NaiveTime> {
    [(9, 0), (13, 0), (16, 0), (19, 0)]
        .iter()
        .map(|&(h, m)| NaiveTime::from_hms_opt(h, m, 0).unwrap())
        .collect()
}

/// Strategy for placing a session inside an assignment's work window.
///
/// The default is deadline-weighted and ignores the user's class timetable;
/// a collision-aware strategy can be substituted without touching the rest
/// of the pipeline.
pub trait SessionPlacement: Sync {
    /// Day offset from the window start for session `index` of `count`,
    /// inside a window of `window_days` days. Must stay in
    /// `0..window_days` and be non-decreasing in `index`.
    fn day_offset(&self, index: usize, count: usize, window_days: i64) -> i64;

    /// Wall-clock start time for session `index`.
    fn start_time(&self, index: usize) -> NaiveTime;
}

/// Default placement: sessions concentrate at the start of the window
/// (orientation, research) and again just before the deadline (polishing),
/// matching how deadline-driven study actually distributes. Start times
/// rotate through a small set of daily slots.
pub struct DeadlineWeightedPlacement {
    slots: Vec<NaiveTime>,
}

impl DeadlineWeightedPlacement {
    pub fn new() -> Self {
        Self { slots: default_slots() }
    }

    pub fn with_slots(slots: Vec<NaiveTime>) -> Self {
        if slots.is_empty() {
            Self::new()
        } else {
            Self { slots }
        }
    }
}

impl Default for DeadlineWeightedPlacement {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionPlacement for DeadlineWeightedPlacement {
    fn day_offset(&self, index: usize, count: usize, window_days: i64) -> i64 {
        if count == 0 || window_days <= 0 {
            return 0;
        }
        let offset = if count <= 3 {
            // Short sequences spread evenly.
            (index as i64 * window_days) / count as i64
        } else {
            let progress = index as f64 / (count - 1) as f64;
            let fraction = if progress < 0.3 {
                0.4 * progress
            } else if progress <= 0.7 {
                0.4 + 0.2 * (progress - 0.3)
            } else {
                0.6 + 1.3 * (progress - 0.7)
            };
            (fraction * window_days as f64).floor() as i64
        };
        offset.clamp(0, window_days - 1)
    }

    fn start_time(&self, index: usize) -> NaiveTime {
        self.slots[index % self.slots.len()]
    }
}

fn stage_qualifier(progress: f64) -> &'static str {
    if progress < 0.33 {
        "early"
    } else if progress < 0.67 {
        "middle"
    } else {
        "final"
    }
}

fn describe(stage: &LearningStage, progress: f64) -> String {
    format!(
        "{}: {} ({} stage)",
        stage.name,
        stage.focus_hint(),
        stage_qualifier(progress)
    )
}

/// Exactly `days_needed` study sessions inside `[start_date, due_date)`.
/// Returns nothing (with a warning) when the assignment was never resolved
/// or estimated; a single bad record must not abort the synthesis.
pub(crate) fn distribute_sessions(
    assignment: &Assignment,
    placement: &dyn SessionPlacement,
    fallback_course: Option<&str>,
) -> Vec<ScheduleEntry> {
    let (Some(due), Some(start), Some(days_needed), Some(total_hours)) = (
        assignment.due_date,
        assignment.start_date,
        assignment.days_needed,
        assignment.total_hours,
    ) else {
        warn!(
            "skipping session distribution for unresolved assignment '{}'",
            assignment.title
        );
        return Vec::new();
    };

    let count = days_needed.max(1) as usize;
    let window_days = (due - start).num_days().max(1);
    let session_hours = (total_hours / count as f64).clamp(MIN_SESSION_HOURS, MAX_SESSION_HOURS);
    let session_minutes = (session_hours * 60.0).round() as i64;
    let priority = assignment.priority.unwrap_or(Priority::Medium);
    let course_code = assignment
        .course_code
        .clone()
        .or_else(|| fallback_course.map(ToOwned::to_owned));

    let mut sessions = Vec::with_capacity(count);
    for index in 0..count {
        let progress = if count > 1 {
            index as f64 / (count - 1) as f64
        } else {
            0.0
        };
        let offset = placement.day_offset(index, count, window_days);
        let date = start + Duration::days(offset);
        let begin = date.and_time(placement.start_time(index));
        let end = begin + Duration::minutes(session_minutes);
        let stage = stage_at(assignment.kind, progress);

        sessions.push(ScheduleEntry {
            id: entry_id(
                "session",
                &format!("study-session|{}|{}", assignment.title, index),
            ),
            kind: EntryKind::StudySession,
            title: format!(
                "Study: {} (Session {}/{})",
                assignment.title,
                index + 1,
                count
            ),
            start: begin,
            end,
            category: EntryKind::StudySession.category().to_string(),
            priority,
            course_code: course_code.clone(),
            description: describe(&stage, progress),
            resource: EntryResource::StudySession {
                assignment: assignment.title.clone(),
                due_date: due,
                session_number: (index + 1) as u32,
                total_sessions: count as u32,
                stage: stage.name.to_string(),
            },
        });
    }
    sessions
}
