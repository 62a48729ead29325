use chrono::{NaiveDate, NaiveTime, Weekday};
use study_planner::{
    ClassBlock, EntryKind, PlannerConfig, StudyPlanner, SynthesisMetadata, Topic,
};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn planner() -> StudyPlanner {
    StudyPlanner::new(PlannerConfig::for_today(d(2025, 3, 1)))
}

const SYLLABUS: &str = "COMP2100 Software Construction\n\
\n\
Assignment 1: Build a parser\n\
Due: 15/03/2025, worth 20%\n\
Requirements: design the grammar; implement the tokenizer; test edge cases\n\
\n\
Assignment 2: Final report\n\
Write 2000 words on your design decisions.\n\
\n\
Quiz 3 will be held in week 10.";

fn full_metadata() -> SynthesisMetadata {
    let mut metadata = SynthesisMetadata::for_user("student-7");
    metadata.course_code = Some("COMP2100".to_string());
    metadata.topics = vec![Topic {
        title: "Parsing theory".to_string(),
        context: String::new(),
        importance: 8.0,
    }];
    metadata
}

#[test]
fn identical_inputs_produce_identical_plans() {
    let metadata = full_metadata();
    let first = planner().plan_from_text(SYLLABUS, &metadata);
    let second = planner().plan_from_text(SYLLABUS, &metadata);
    assert_eq!(first, second);

    let first_ids: Vec<&str> = first.entries().iter().map(|e| e.id.as_str()).collect();
    let second_ids: Vec<&str> = second.entries().iter().map(|e| e.id.as_str()).collect();
    assert_eq!(first_ids, second_ids);
}

#[test]
fn entry_ids_are_tagged_and_unique() {
    let plan = planner().plan_from_text(SYLLABUS, &full_metadata());
    let mut seen = std::collections::HashSet::new();
    for entry in plan.entries() {
        assert!(seen.insert(entry.id.clone()), "duplicate id {}", entry.id);
        let tag = entry.id.split('-').next().unwrap();
        assert!(
            ["session", "revision", "milestone", "topic", "check"].contains(&tag),
            "unexpected id tag in {}",
            entry.id
        );
    }
}

#[test]
fn assembly_order_groups_kinds() {
    let plan = planner().plan_from_text(SYLLABUS, &full_metadata());
    let kinds: Vec<EntryKind> = plan.entries().iter().map(|e| e.kind).collect();

    let rank = |kind: EntryKind| match kind {
        EntryKind::StudySession => 0,
        EntryKind::Revision | EntryKind::Milestone => 1,
        EntryKind::TopicStudy => 2,
        EntryKind::KnowledgeCheck => 3,
    };
    let ranks: Vec<u8> = kinds.iter().map(|k| rank(*k)).collect();
    assert!(ranks.windows(2).all(|pair| pair[0] <= pair[1]));
    assert_eq!(ranks.first(), Some(&0));
}

#[test]
fn empty_text_produces_an_empty_plan() {
    let plan = planner().plan_from_text("", &SynthesisMetadata::for_user("u1"));
    assert!(plan.is_empty());
    assert_eq!(plan.summary().assignment_count, 0);
}

#[test]
fn prose_without_assignments_produces_an_empty_plan() {
    let text = "Welcome to the unit. Lectures are recorded.\n\n\
                Readings are posted weekly on the portal.";
    let plan = planner().plan_from_text(text, &SynthesisMetadata::for_user("u1"));
    assert!(plan.is_empty());
}

#[test]
fn garbage_text_never_panics() {
    let text = "�� 12345 !!! Due: 99/99/9999\n\nassignment ###\n\n- \n- \n";
    let plan = planner().plan_from_text(text, &SynthesisMetadata::for_user("u1"));
    // The malformed date degrades to a fabricated one; synthesis continues.
    assert_eq!(plan.summary().fallback_date_count, 1);
    assert!(!plan.is_empty());
}

#[test]
fn class_schedule_is_accepted_but_not_consulted() {
    let mut with_classes = full_metadata();
    with_classes.class_schedule = vec![ClassBlock {
        weekday: Weekday::Mon,
        start: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
        end: NaiveTime::from_hms_opt(11, 0, 0).unwrap(),
        label: Some("COMP2100 lecture".to_string()),
    }];

    let base = planner().plan_from_text(SYLLABUS, &full_metadata());
    let with_timetable = planner().plan_from_text(SYLLABUS, &with_classes);
    assert_eq!(base.entries(), with_timetable.entries());
}

#[test]
fn course_code_flows_to_entries() {
    let plan = planner().plan_from_text(SYLLABUS, &full_metadata());
    assert!(plan
        .entries()
        .iter()
        .all(|e| e.course_code.as_deref() == Some("COMP2100")));
}

#[test]
fn summary_counts_each_kind() {
    let plan = planner().plan_from_text(SYLLABUS, &full_metadata());
    let summary = plan.summary();

    let count = |kind: EntryKind| plan.entries().iter().filter(|e| e.kind == kind).count();
    assert_eq!(summary.assignment_count, plan.assignments().len());
    assert_eq!(summary.session_count, count(EntryKind::StudySession));
    assert_eq!(summary.revision_count, count(EntryKind::Revision));
    assert_eq!(summary.milestone_count, count(EntryKind::Milestone));
    assert_eq!(summary.topic_count, count(EntryKind::TopicStudy));
    assert_eq!(
        summary.knowledge_check_count,
        count(EntryKind::KnowledgeCheck)
    );
    assert!(summary.earliest_start.is_some());
    assert!(summary.latest_end.is_some());

    let line = summary.to_cli_summary();
    assert!(line.contains("assignments="));
    assert!(line.contains("sessions="));
}

#[test]
fn every_generated_plan_validates() {
    let plan = planner().plan_from_text(SYLLABUS, &full_metadata());
    study_planner::validate_plan(&plan).unwrap();
}

#[test]
fn stateless_engine_gives_independent_calls() {
    let p = planner();
    let metadata = full_metadata();
    let first = p.plan_from_text(SYLLABUS, &metadata);
    let other = p.plan_from_text("Assignment 1: Solo essay\nDue: 2025-05-01", &metadata);
    let again = p.plan_from_text(SYLLABUS, &metadata);
    assert_eq!(first, again);
    assert_ne!(first, other);
}
