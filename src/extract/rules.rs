//! Ordered pattern tables for field extraction.
//!
//! Every heuristic the parser applies lives here as a named rule in an
//! ordered table, evaluated generically by `first_capture`. Precedence is
//! therefore the table order, auditable and testable per rule.

use crate::assignment::AssignmentKind;
use once_cell::sync::Lazy;
use regex::Regex;

/// One named pattern in an ordered table. Capture group 1 carries the
/// extracted value where the rule yields one.
pub(crate) struct FieldRule {
    pub name: &'static str,
    pub pattern: &'static Lazy<Regex>,
}

impl FieldRule {
    pub fn capture<'t>(&self, text: &'t str) -> Option<&'t str> {
        self.pattern
            .captures(text)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().trim())
            .filter(|s| !s.is_empty())
    }
}

/// First rule in the table that captures a value, with the rule's name.
pub(crate) fn first_capture<'t>(
    rules: &'static [FieldRule],
    text: &'t str,
) -> Option<(&'static str, &'t str)> {
    rules
        .iter()
        .find_map(|rule| rule.capture(text).map(|value| (rule.name, value)))
}

static LABEL_ASSIGNMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bassignment\s*#?\s*(\d{1,2})?").unwrap());
static LABEL_ASSESSMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bassessment\s*#?\s*(\d{1,2})?").unwrap());
static LABEL_PROJECT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bproject\s*#?\s*(\d{1,2})?").unwrap());
static LABEL_TASK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\btask\s*#?\s*(\d{1,2})?").unwrap());
static LABEL_DELIVERABLE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bdeliverable\s*#?\s*(\d{1,2})?").unwrap());

/// Ordered assignment-label patterns; a section matching none of these is
/// not an assignment.
pub(crate) static LABEL_RULES: &[FieldRule] = &[
    FieldRule { name: "assignment", pattern: &LABEL_ASSIGNMENT },
    FieldRule { name: "assessment", pattern: &LABEL_ASSESSMENT },
    FieldRule { name: "project", pattern: &LABEL_PROJECT },
    FieldRule { name: "task", pattern: &LABEL_TASK },
    FieldRule { name: "deliverable", pattern: &LABEL_DELIVERABLE },
];

/// First label rule matching the section, with the optional trailing number.
pub(crate) fn match_label(text: &str) -> Option<(&'static str, Option<u32>)> {
    LABEL_RULES.iter().find_map(|rule| {
        rule.pattern.captures(text).map(|caps| {
            let number = caps.get(1).and_then(|m| m.as_str().parse::<u32>().ok());
            (rule.name, number)
        })
    })
}

static TITLE_LABELLED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?im)^\s*(?:title|topic)\s*[:\-]\s*(\S[^\n]*?)\s*$").unwrap());
static TITLE_AFTER_LABEL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:assignment|assessment|project|task|deliverable)\s*#?\s*\d*\s*[:\-]\s*([^\n]+)")
        .unwrap()
});

/// Title precedence: explicit title/topic label, then text after the
/// assignment label itself. The first-non-empty-line and "Untitled
/// Assignment" fallbacks are applied by the parser, not the table.
pub(crate) static TITLE_RULES: &[FieldRule] = &[
    FieldRule { name: "title-label", pattern: &TITLE_LABELLED },
    FieldRule { name: "after-label", pattern: &TITLE_AFTER_LABEL },
];

static WEIGHT_NEAR_KEYWORD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:worth|valued?|weight(?:ing|ed)?|grade)\b\D{0,24}?(\d{1,3})\s*(?:%|percent|points|marks)")
        .unwrap()
});
static WEIGHT_PERCENT_OF_GRADE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(\d{1,3})\s*(?:%|percent)\s*of\s+(?:the\s+)?(?:final\s+)?(?:grade|mark|course)")
        .unwrap()
});

pub(crate) static WEIGHT_RULES: &[FieldRule] = &[
    FieldRule { name: "near-keyword", pattern: &WEIGHT_NEAR_KEYWORD },
    FieldRule { name: "percent-of-grade", pattern: &WEIGHT_PERCENT_OF_GRADE },
];

static WORD_COUNT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(\d{3,5})\s*words?\b").unwrap());
static HOURS_HINT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:approx(?:imately)?\.?|about|around|roughly|est(?:imated)?\.?)\s*(\d{1,3}(?:\.\d)?)\s*hours?\b")
        .unwrap()
});
static HOURS_OF_WORK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(\d{1,3}(?:\.\d)?)\s*hours?\s+of\s+work\b").unwrap());

pub(crate) static WORD_COUNT_RULES: &[FieldRule] =
    &[FieldRule { name: "word-count", pattern: &WORD_COUNT }];

pub(crate) static HOURS_RULES: &[FieldRule] = &[
    FieldRule { name: "approx-hours", pattern: &HOURS_HINT },
    FieldRule { name: "hours-of-work", pattern: &HOURS_OF_WORK },
];

static COURSE_CODE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b([A-Z]{2,4}[ -]?\d{3,4})\b").unwrap());

pub(crate) static COURSE_CODE_RULES: &[FieldRule] =
    &[FieldRule { name: "course-code", pattern: &COURSE_CODE }];

/// Kind detection: first keyword family matching the section wins.
pub(crate) struct KindRule {
    pub kind: AssignmentKind,
    pub pattern: &'static Lazy<Regex>,
}

static KIND_REPORT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(?:report|paper|essay)\b").unwrap());
static KIND_PROJECT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(?:project|development|implementation)\b").unwrap());
static KIND_PRESENTATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(?:presentation|slides)\b").unwrap());
static KIND_QUIZ: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(?:quiz|test|exam)\b").unwrap());
static KIND_HOMEWORK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(?:homework|exercise|problem\s+set)\b").unwrap());

pub(crate) static KIND_RULES: &[KindRule] = &[
    KindRule { kind: AssignmentKind::Report, pattern: &KIND_REPORT },
    KindRule { kind: AssignmentKind::Project, pattern: &KIND_PROJECT },
    KindRule { kind: AssignmentKind::Presentation, pattern: &KIND_PRESENTATION },
    KindRule { kind: AssignmentKind::Quiz, pattern: &KIND_QUIZ },
    KindRule { kind: AssignmentKind::Homework, pattern: &KIND_HOMEWORK },
];

pub(crate) fn detect_kind(text: &str) -> AssignmentKind {
    KIND_RULES
        .iter()
        .find(|rule| rule.pattern.is_match(text))
        .map(|rule| rule.kind)
        .unwrap_or(AssignmentKind::Task)
}

static BULLET_ITEM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^\s*(?:[-*•]|\d{1,2}[.)])\s+(\S[^\n]*?)\s*$").unwrap());

/// Bullet and numbered list items in a section, in order.
pub(crate) fn bullet_items(text: &str) -> Vec<String> {
    BULLET_ITEM
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .collect()
}

static REQUIREMENTS_LABEL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?im)^\s*(?:requirements?|must\s+include)\s*[:\-]\s*([^\n]*)$").unwrap()
});
static DELIVERABLES_LABEL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?im)^\s*(?:deliverables?|submit|submission(?:\s+includes)?)\s*[:\-]\s*([^\n]*)$")
        .unwrap()
});

fn labelled_list(pattern: &Regex, text: &str) -> Vec<String> {
    let Some(caps) = pattern.captures(text) else {
        return Vec::new();
    };
    let inline = caps.get(1).map(|m| m.as_str().trim()).unwrap_or("");
    if !inline.is_empty() {
        return inline
            .split(';')
            .flat_map(|part| part.split(" and "))
            .map(|part| part.trim().trim_end_matches(['.', ',']).to_string())
            .filter(|part| !part.is_empty())
            .collect();
    }
    // Label with nothing inline: the items are the list right below it.
    let label_end = caps.get(0).map(|m| m.end()).unwrap_or(0);
    bullet_items(&text[label_end..])
}

pub(crate) fn requirements(text: &str) -> Vec<String> {
    let labelled = labelled_list(&REQUIREMENTS_LABEL, text);
    if !labelled.is_empty() {
        return labelled;
    }
    bullet_items(text)
}

pub(crate) fn deliverables(text: &str) -> Vec<String> {
    labelled_list(&DELIVERABLES_LABEL, text)
}
