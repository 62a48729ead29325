use study_planner::{parse_assignments, AssignmentKind, DateLocale};

fn parse(text: &str) -> Vec<study_planner::Assignment> {
    parse_assignments(text, DateLocale::DayFirst)
}

#[test]
fn section_without_label_is_skipped() {
    let text = "Welcome to the course!\n\
                Lectures run Monday and Wednesday.\n\
                \n\
                Office hours are by appointment.";
    assert!(parse(text).is_empty());
}

#[test]
fn labelled_section_yields_one_assignment() {
    let text = "Assignment 1: Build a tokenizer\n\
                Worth 20% of the final grade.\n\
                Due: 15/03/2025";
    let assignments = parse(text);
    assert_eq!(assignments.len(), 1);
    let a = &assignments[0];
    assert_eq!(a.title, "Build a tokenizer");
    assert_eq!(a.number, 1);
    assert_eq!(a.weight, Some(20.0));
}

#[test]
fn blank_lines_delimit_sections() {
    let text = "Assignment 1: First piece\nDue: 10/04/2025\n\
                \n\
                Some unrelated paragraph.\n\
                \n\
                Assignment 2: Second piece\nDue: 20/04/2025";
    let assignments = parse(text);
    assert_eq!(assignments.len(), 2);
    assert_eq!(assignments[0].title, "First piece");
    assert_eq!(assignments[1].title, "Second piece");
    assert_eq!(assignments[1].number, 2);
}

#[test]
fn title_label_takes_precedence_over_assignment_label() {
    let text = "Assessment 2\n\
                Title: Renewable energy case study\n\
                Submit a written analysis.";
    let assignments = parse(text);
    assert_eq!(assignments.len(), 1);
    assert_eq!(assignments[0].title, "Renewable energy case study");
    assert_eq!(assignments[0].number, 2);
}

#[test]
fn first_nonempty_line_is_title_fallback() {
    let text = "Reflective journal piece\n\
                This task is part of the portfolio.";
    let assignments = parse(text);
    assert_eq!(assignments.len(), 1);
    assert_eq!(assignments[0].title, "Reflective journal piece");
}

#[test]
fn untitled_fallback_when_nothing_usable() {
    let text = "Due 12/10/2025 - assignment";
    let assignments = parse(text);
    assert_eq!(assignments.len(), 1);
    assert_eq!(assignments[0].title, "Untitled Assignment");
}

#[test]
fn title_strips_trailing_due_clause() {
    let text = "Project 1: Data pipeline, due 01/05/2025, worth 30%";
    let assignments = parse(text);
    assert_eq!(assignments[0].title, "Data pipeline");
}

#[test]
fn weight_requires_nearby_keyword() {
    let with_keyword = parse("Assignment 1: Essay\nThis is worth 25 percent.");
    assert_eq!(with_keyword[0].weight, Some(25.0));

    let percent_of_grade = parse("Assignment 1: Essay\nCounts 15% of the final grade.");
    assert_eq!(percent_of_grade[0].weight, Some(15.0));

    let bare_percent = parse("Assignment 1: Essay\nAim for 100% attendance.");
    assert_eq!(bare_percent[0].weight, None);
}

#[test]
fn weight_accepts_marks_and_points() {
    let marks = parse("Task 3: Worksheet\nWeighting: 40 marks");
    assert_eq!(marks[0].weight, Some(40.0));
}

#[test]
fn kind_detection_follows_table_order() {
    assert_eq!(
        parse("Assignment 1: Final essay on modernism")[0].kind,
        AssignmentKind::Report
    );
    assert_eq!(
        parse("Assignment 1: Group development sprint")[0].kind,
        AssignmentKind::Project
    );
    assert_eq!(
        parse("Assignment 2: Prepare slides for week 6")[0].kind,
        AssignmentKind::Presentation
    );
    assert_eq!(
        parse("Assessment 3: Mid-term test")[0].kind,
        AssignmentKind::Quiz
    );
    assert_eq!(
        parse("Task 1: Weekly problem set")[0].kind,
        AssignmentKind::Homework
    );
    assert_eq!(
        parse("Deliverable 2: Updated plan document")[0].kind,
        AssignmentKind::Task
    );
}

#[test]
fn requirements_from_label_line() {
    let text = "Assignment 1: Research report\n\
                Requirements: analyze three sources; compare their methods; justify your conclusion";
    let assignments = parse(text);
    assert_eq!(
        assignments[0].requirements,
        vec![
            "analyze three sources".to_string(),
            "compare their methods".to_string(),
            "justify your conclusion".to_string(),
        ]
    );
}

#[test]
fn requirements_fall_back_to_bullets() {
    let text = "Assignment 2: Lab report\n\
                - record all measurements\n\
                - include error analysis\n\
                1. submit as PDF";
    let assignments = parse(text);
    assert_eq!(
        assignments[0].requirements,
        vec![
            "record all measurements".to_string(),
            "include error analysis".to_string(),
            "submit as PDF".to_string(),
        ]
    );
}

#[test]
fn deliverables_from_label() {
    let text = "Project 1: Compiler frontend\n\
                Deliverables: source archive; design notes";
    let assignments = parse(text);
    assert_eq!(
        assignments[0].deliverables,
        vec!["source archive".to_string(), "design notes".to_string()]
    );
}

#[test]
fn hints_are_lifted_from_text() {
    let text = "Assignment 2: Literature review for COMP3310\n\
                Write about 2500 words. Plan for approximately 9 hours.";
    let assignments = parse(text);
    let a = &assignments[0];
    assert_eq!(a.word_count, Some(2500));
    assert_eq!(a.estimated_hours, Some(9.0));
    assert_eq!(a.course_code.as_deref(), Some("COMP3310"));
}

#[test]
fn number_parsed_from_title_when_label_has_none() {
    let text = "Assignment: Portfolio piece 3\nSubmit to the portal.";
    let assignments = parse(text);
    assert_eq!(assignments[0].number, 3);
}
