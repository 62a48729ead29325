//! Heuristic extraction of assignment records from loosely-structured text.
//!
//! The text is split into blank-line delimited sections; each section is
//! tested against the ordered label table in [`rules`] and yields at most
//! one [`Assignment`]. Sections without a label match are skipped; not
//! every paragraph of a syllabus is an assignment.

pub mod dates;
pub(crate) mod rules;

use crate::assignment::Assignment;
use dates::DateLocale;
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

/// Blank-line delimited, non-empty chunks of the raw text.
pub(crate) fn split_sections(text: &str) -> Vec<&str> {
    let mut sections = Vec::new();
    let mut start = None;
    let mut end = 0;
    let mut offset = 0;

    for line in text.split_inclusive('\n') {
        if line.trim().is_empty() {
            if let Some(s) = start.take() {
                sections.push(text[s..end].trim());
            }
        } else {
            if start.is_none() {
                start = Some(offset);
            }
            end = offset + line.len();
        }
        offset += line.len();
    }
    if let Some(s) = start {
        sections.push(text[s..end].trim());
    }
    sections.retain(|s| !s.is_empty());
    sections
}

static TITLE_NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b(\d{1,2})\b").unwrap());
static TITLE_NOISE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)[\s,;.\-]*\b(?:due|deadline|submission|submit|worth|weight)\b.*$").unwrap()
});

/// Strip trailing due/worth clauses and stray punctuation from a captured
/// title so "Build a parser. Due: 15/03/2025" becomes "Build a parser".
fn clean_title(raw: &str) -> String {
    let stripped = TITLE_NOISE.replace(raw, "");
    let cleaned = stripped
        .trim()
        .trim_end_matches(['.', ',', ';', ':', '-'])
        .trim();
    let mut title: String = cleaned.chars().take(120).collect();
    if title.len() < cleaned.len() {
        title.push('…');
    }
    title
}

fn extract_title(section: &str) -> String {
    if let Some((rule, captured)) = rules::first_capture(rules::TITLE_RULES, section) {
        let title = clean_title(captured);
        if !title.is_empty() {
            debug!("title via rule '{}': {}", rule, title);
            return title;
        }
    }
    let first_line = section.lines().find(|line| !line.trim().is_empty());
    if let Some(line) = first_line {
        let title = clean_title(line);
        if !title.is_empty() {
            return title;
        }
    }
    "Untitled Assignment".to_string()
}

/// Parse one section into an assignment, or `None` when no label matches.
pub(crate) fn parse_section(section: &str, locale: DateLocale) -> Option<Assignment> {
    let (label, label_number) = rules::match_label(section)?;

    let title = extract_title(section);
    let kind = rules::detect_kind(section);

    let mut assignment = Assignment::new(title, kind);
    assignment.number = label_number
        .or_else(|| {
            TITLE_NUMBER
                .captures(&assignment.title)
                .and_then(|caps| caps[1].parse().ok())
        })
        .unwrap_or(1);

    assignment.weight = rules::first_capture(rules::WEIGHT_RULES, section)
        .and_then(|(_, value)| value.parse::<f64>().ok())
        .filter(|w| (0.0..=100.0).contains(w));
    assignment.word_count = rules::first_capture(rules::WORD_COUNT_RULES, section)
        .and_then(|(_, value)| value.parse().ok());
    assignment.estimated_hours = rules::first_capture(rules::HOURS_RULES, section)
        .and_then(|(_, value)| value.parse::<f64>().ok())
        .filter(|h| *h > 0.0);
    assignment.course_code = rules::first_capture(rules::COURSE_CODE_RULES, section)
        .map(|(_, value)| value.replace([' ', '-'], ""));
    assignment.requirements = rules::requirements(section);
    assignment.deliverables = rules::deliverables(section);

    if let Some((date, source)) = dates::extract_due_date(section, locale) {
        assignment.due_date = Some(date);
        assignment.due_date_source = Some(source);
    }

    debug!(
        "section matched label '{}' -> {} ({})",
        label,
        assignment.title,
        assignment.kind.as_str()
    );
    Some(assignment)
}

/// All assignments found in the raw text, in document order. Due dates are
/// filled where the text states one; fabrication for the rest happens in
/// the resolution pass.
pub fn parse_assignments(text: &str, locale: DateLocale) -> Vec<Assignment> {
    split_sections(text)
        .into_iter()
        .filter_map(|section| parse_section(section, locale))
        .collect()
}
