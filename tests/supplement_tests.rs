use chrono::{Duration, NaiveDate};
use study_planner::{
    EntryKind, EntryResource, PlannerConfig, Priority, StudyPlan, StudyPlanner,
    SynthesisMetadata, Topic,
};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn planner() -> StudyPlanner {
    StudyPlanner::new(PlannerConfig::for_today(d(2025, 3, 1)))
}

fn synthesize(text: &str) -> StudyPlan {
    planner().plan_from_text(text, &SynthesisMetadata::for_user("u1"))
}

fn of_kind(plan: &StudyPlan, kind: EntryKind) -> Vec<&study_planner::ScheduleEntry> {
    plan.entries().iter().filter(|e| e.kind == kind).collect()
}

#[test]
fn revision_three_days_before_a_far_deadline() {
    let plan = synthesize("Assignment 1: Progress report\nDue: 2025-06-01");
    let revisions = of_kind(&plan, EntryKind::Revision);
    assert_eq!(revisions.len(), 1);
    assert_eq!(revisions[0].start.date(), d(2025, 5, 29));
    assert!(revisions[0].title.starts_with("Final Review"));
}

#[test]
fn revision_two_days_before_a_near_deadline() {
    // Due in 5 days: inside the 4-day minimum, short of the 7-day threshold.
    let plan = synthesize("Assignment 1: Worksheet task\nDue: 2025-03-06");
    let revisions = of_kind(&plan, EntryKind::Revision);
    assert_eq!(revisions.len(), 1);
    assert_eq!(revisions[0].start.date(), d(2025, 3, 4));
}

#[test]
fn no_revision_when_due_too_soon() {
    let plan = synthesize("Assignment 1: Worksheet task\nDue: 2025-03-03");
    assert!(of_kind(&plan, EntryKind::Revision).is_empty());
}

#[test]
fn milestone_at_the_window_midpoint() {
    let plan = synthesize("Assignment 1: Progress report\nDue: 2025-06-01");
    let milestones = of_kind(&plan, EntryKind::Milestone);
    assert_eq!(milestones.len(), 1);

    let a = &plan.assignments()[0];
    let expected = a.start_date.unwrap() + Duration::days(a.window_days() / 2);
    assert_eq!(milestones[0].start.date(), expected);

    match &milestones[0].resource {
        EntryResource::Milestone { checklist, .. } => assert_eq!(checklist.len(), 4),
        other => panic!("unexpected resource {other:?}"),
    }
}

#[test]
fn no_milestone_inside_a_week() {
    let plan = synthesize("Assignment 1: Worksheet task\nDue: 2025-03-07");
    assert!(of_kind(&plan, EntryKind::Milestone).is_empty());
}

#[test]
fn six_day_effort_gets_sessions_revision_and_milestone() {
    // 9 estimated hours: ceil(9/2) + 1 buffer = 6 study days.
    let plan = synthesize(
        "Assignment 1: Case study task\nAbout 9 hours of work\nDue: 2025-03-15",
    );
    assert_eq!(plan.assignments()[0].days_needed, Some(6));
    assert_eq!(of_kind(&plan, EntryKind::StudySession).len(), 6);

    let revisions = of_kind(&plan, EntryKind::Revision);
    assert_eq!(revisions.len(), 1);
    let days_before_due = (d(2025, 3, 15) - revisions[0].start.date()).num_days();
    assert!((2..=3).contains(&days_before_due));

    assert_eq!(of_kind(&plan, EntryKind::Milestone).len(), 1);
}

#[test]
fn topics_capped_at_five_highest_importance() {
    let mut metadata = SynthesisMetadata::for_user("u1");
    metadata.topics = (1..=6)
        .map(|i| Topic {
            title: format!("Topic {i}"),
            context: String::new(),
            importance: f64::from(i),
        })
        .collect();

    let plan = planner().plan_from_text(
        "Assignment 1: Progress report\nDue: 2025-06-01",
        &metadata,
    );
    let topics = of_kind(&plan, EntryKind::TopicStudy);
    assert_eq!(topics.len(), 5);
    // Importance 6 first; importance 1 never scheduled.
    assert!(topics[0].title.contains("Topic 6"));
    assert!(topics.iter().all(|t| !t.title.contains("Topic 1")));
}

#[test]
fn topic_sessions_follow_the_earliest_start() {
    let mut metadata = SynthesisMetadata::for_user("u1");
    metadata.topics = vec![
        Topic {
            title: "Graph algorithms".to_string(),
            context: "weak area from the midterm".to_string(),
            importance: 9.0,
        },
        Topic {
            title: "Recurrences".to_string(),
            context: String::new(),
            importance: 5.0,
        },
    ];

    let plan = planner().plan_from_text(
        "Assignment 1: Progress report\nDue: 2025-06-01",
        &metadata,
    );
    let earliest = plan
        .assignments()
        .iter()
        .filter_map(|a| a.start_date)
        .min()
        .unwrap();

    let topics = of_kind(&plan, EntryKind::TopicStudy);
    assert_eq!(topics[0].start.date(), earliest + Duration::days(1));
    assert_eq!(topics[1].start.date(), earliest + Duration::days(2));
    assert_eq!(topics[0].priority, Priority::High);
    assert_eq!(topics[1].priority, Priority::Medium);
    assert!(topics[0].description.contains("weak area"));
}

#[test]
fn no_topics_without_assignments() {
    let mut metadata = SynthesisMetadata::for_user("u1");
    metadata.topics = vec![Topic {
        title: "Orphan topic".to_string(),
        context: String::new(),
        importance: 10.0,
    }];
    let plan = planner().plan_from_text("Just an intro paragraph.", &metadata);
    assert!(plan.is_empty());
}

#[test]
fn knowledge_checks_every_few_sessions() {
    // 8 sessions: a check after every 2nd session.
    let plan = synthesize("Assignment 1: Progress report\nDue: 2025-06-01");
    let sessions = of_kind(&plan, EntryKind::StudySession);
    assert_eq!(sessions.len(), 8);

    let checks = of_kind(&plan, EntryKind::KnowledgeCheck);
    assert_eq!(checks.len(), 4);

    let due = plan.assignments()[0].due_date.unwrap();
    for check in &checks {
        assert!(check.end.date() <= due);
        match &check.resource {
            EntryResource::KnowledgeCheck {
                after_session,
                questions,
                ..
            } => {
                assert_eq!(after_session % 2, 0);
                assert_eq!(questions.len(), 2);
            }
            other => panic!("unexpected resource {other:?}"),
        }
    }

    // Each check lands one day after its anchoring session.
    let anchor_date = sessions[1].start.date();
    assert_eq!(checks[0].start.date(), anchor_date + Duration::days(1));
}

#[test]
fn no_knowledge_checks_for_short_sequences() {
    let plan = synthesize("Task 1: Problem set\nAbout 3 hours of work\nDue: 2025-03-20");
    assert_eq!(of_kind(&plan, EntryKind::StudySession).len(), 2);
    assert!(of_kind(&plan, EntryKind::KnowledgeCheck).is_empty());
}
