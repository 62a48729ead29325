//! Supplementary calendar entries: final-review sessions, mid-window
//! progress milestones, topic-study sessions, and periodic knowledge checks.

use crate::assignment::{Assignment, Priority};
use crate::entry::{entry_id, EntryKind, EntryResource, ScheduleEntry};
use crate::metadata::Topic;
use chrono::{Duration, NaiveDate, NaiveTime};

/// Assignments due sooner than this get no dedicated revision pass.
const MIN_REVISION_WINDOW_DAYS: i64 = 4;
/// Assignments due further out than this get a midpoint milestone (and an
/// earlier revision slot).
const LONG_WINDOW_DAYS: i64 = 7;
const MAX_TOPIC_SESSIONS: usize = 5;

const MILESTONE_CHECKLIST: [&str; 4] = [
    "Review progress against the plan",
    "Identify blockers",
    "Adjust the remaining plan",
    "Set goals for the remaining sessions",
];

const KNOWLEDGE_CHECK_QUESTIONS: [&str; 2] = [
    "What are the key ideas you have covered so far?",
    "Which areas still feel unclear and need another pass?",
];

fn at(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
}

fn course_for(assignment: &Assignment, fallback: Option<&str>) -> Option<String> {
    assignment
        .course_code
        .clone()
        .or_else(|| fallback.map(ToOwned::to_owned))
}

/// One "Final Review" revision entry 2-3 days before the due date, for
/// assignments due at least four days out. The slot is clamped into the
/// assignment's work window so it never precedes the first session day.
pub(crate) fn revision_entry(
    assignment: &Assignment,
    today: NaiveDate,
    fallback_course: Option<&str>,
) -> Option<ScheduleEntry> {
    let due = assignment.due_date?;
    let window = (due - today).num_days();
    if window < MIN_REVISION_WINDOW_DAYS {
        return None;
    }
    let days_before = if window > LONG_WINDOW_DAYS { 3 } else { 2 };
    let mut date = due - Duration::days(days_before);
    if let Some(window_start) = assignment.start_date {
        date = date.max(window_start);
    }
    let start = date.and_time(at(17, 0));

    Some(ScheduleEntry {
        id: entry_id("revision", &format!("revision|{}", assignment.title)),
        kind: EntryKind::Revision,
        title: format!("Final Review: {}", assignment.title),
        start,
        end: start + Duration::minutes(90),
        category: EntryKind::Revision.category().to_string(),
        priority: assignment.priority.unwrap_or(Priority::Medium),
        course_code: course_for(assignment, fallback_course),
        description: "Walk the whole piece end to end before submission".to_string(),
        resource: EntryResource::Revision {
            assignment: assignment.title.clone(),
            due_date: due,
        },
    })
}

/// A progress-check milestone at the midpoint of the work window, for
/// assignments due more than a week out.
pub(crate) fn milestone_entry(
    assignment: &Assignment,
    today: NaiveDate,
    fallback_course: Option<&str>,
) -> Option<ScheduleEntry> {
    let due = assignment.due_date?;
    let start_date = assignment.start_date?;
    if (due - today).num_days() <= LONG_WINDOW_DAYS {
        return None;
    }
    let midpoint = start_date + Duration::days(assignment.window_days() / 2);
    let start = midpoint.and_time(at(18, 0));

    Some(ScheduleEntry {
        id: entry_id("milestone", &format!("milestone|{}", assignment.title)),
        kind: EntryKind::Milestone,
        title: format!("Progress Check: {}", assignment.title),
        start,
        end: start + Duration::minutes(30),
        category: EntryKind::Milestone.category().to_string(),
        priority: assignment.priority.unwrap_or(Priority::Medium),
        course_code: course_for(assignment, fallback_course),
        description: MILESTONE_CHECKLIST.join("; "),
        resource: EntryResource::Milestone {
            assignment: assignment.title.clone(),
            due_date: due,
            checklist: MILESTONE_CHECKLIST.iter().map(|s| s.to_string()).collect(),
        },
    })
}

fn topic_priority(importance: f64) -> Priority {
    if importance >= 7.0 {
        Priority::High
    } else if importance >= 4.0 {
        Priority::Medium
    } else {
        Priority::Low
    }
}

/// Topic-study entries for the highest-importance topics, placed on the
/// days following the earliest assignment's start. Capped at five; ties in
/// importance keep the caller's order.
pub(crate) fn topic_entries(
    topics: &[Topic],
    earliest_start: NaiveDate,
    fallback_course: Option<&str>,
) -> Vec<ScheduleEntry> {
    let mut ranked: Vec<&Topic> = topics.iter().collect();
    ranked.sort_by(|a, b| b.importance.total_cmp(&a.importance));

    ranked
        .into_iter()
        .take(MAX_TOPIC_SESSIONS)
        .enumerate()
        .map(|(index, topic)| {
            let date = earliest_start + Duration::days(1 + index as i64);
            let start = date.and_time(at(10, 0));
            let description = if topic.context.trim().is_empty() {
                format!("Focused review of {}", topic.title)
            } else {
                format!("Focused review of {}: {}", topic.title, topic.context.trim())
            };

            ScheduleEntry {
                id: entry_id("topic", &format!("topic-study|{}|{}", topic.title, index)),
                kind: EntryKind::TopicStudy,
                title: format!("Topic Study: {}", topic.title),
                start,
                end: start + Duration::minutes(60),
                category: EntryKind::TopicStudy.category().to_string(),
                priority: topic_priority(topic.importance),
                course_code: fallback_course.map(ToOwned::to_owned),
                description,
                resource: EntryResource::TopicStudy {
                    topic: topic.title.clone(),
                    importance: topic.importance,
                },
            }
        })
        .collect()
}

/// Recall prompts inserted periodically through a long study sequence: one
/// check every `max(2, count / 3)` sessions, the day after the anchoring
/// session, never past the due date.
pub(crate) fn knowledge_checks(
    assignment: &Assignment,
    sessions: &[ScheduleEntry],
) -> Vec<ScheduleEntry> {
    let Some(due) = assignment.due_date else {
        return Vec::new();
    };
    if sessions.len() < 3 {
        return Vec::new();
    }
    let interval = (sessions.len() / 3).max(2);

    sessions
        .iter()
        .enumerate()
        .filter(|(index, _)| (index + 1) % interval == 0)
        .map(|(index, anchor)| {
            let date = (anchor.start.date() + Duration::days(1)).min(due);
            let start = date.and_time(at(18, 30));

            ScheduleEntry {
                id: entry_id(
                    "check",
                    &format!("knowledge-check|{}|{}", assignment.title, index + 1),
                ),
                kind: EntryKind::KnowledgeCheck,
                title: format!("Knowledge Check: {}", assignment.title),
                start,
                end: start + Duration::minutes(30),
                category: EntryKind::KnowledgeCheck.category().to_string(),
                priority: assignment.priority.unwrap_or(Priority::Medium),
                course_code: anchor.course_code.clone(),
                description: KNOWLEDGE_CHECK_QUESTIONS.join(" "),
                resource: EntryResource::KnowledgeCheck {
                    assignment: assignment.title.clone(),
                    due_date: due,
                    after_session: (index + 1) as u32,
                    questions: KNOWLEDGE_CHECK_QUESTIONS
                        .iter()
                        .map(|s| s.to_string())
                        .collect(),
                },
            }
        })
        .collect()
}
