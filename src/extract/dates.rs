//! Due-date extraction and fallback fabrication.
//!
//! Extraction priority per section: a date token following a due/deadline
//! label, then any bare date token, then semester-relative phrasing. When
//! everything fails the resolver fabricates `today + 14 + 14 * number` days
//! so un-dated assignments spread across the term instead of clustering.

use crate::assignment::DueDateSource;
use chrono::{Duration, NaiveDate};
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Governs day/month order for ambiguous numeric dates like `03/04/2025`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateLocale {
    /// `03/04/2025` is the 3rd of April.
    #[default]
    DayFirst,
    /// `03/04/2025` is March 4th.
    MonthFirst,
}

static DUE_LABEL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:due(?:\s+date)?|deadline|submission|submit\s+by)\b[^\n]{0,80}").unwrap()
});
static ISO_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(\d{4})-(\d{2})-(\d{2})\b").unwrap());
static NUMERIC_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(\d{1,2})[/\-](\d{1,2})[/\-](\d{4})\b").unwrap());
static TEXTUAL_MDY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)[a-z]*\.?\s+(\d{1,2})(?:st|nd|rd|th)?\s*,?\s+(\d{4})\b")
        .unwrap()
});
static TEXTUAL_DMY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(\d{1,2})(?:st|nd|rd|th)?\s+(jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)[a-z]*\.?\s*,?\s+(\d{4})\b")
        .unwrap()
});
static SEMESTER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bsemester\s*([12])\b\D{0,10}?(\d{4})\b").unwrap());

fn month_index(name: &str) -> Option<u32> {
    const MONTHS: [&str; 12] = [
        "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
    ];
    let prefix = name.get(..3)?.to_ascii_lowercase();
    MONTHS.iter().position(|m| *m == prefix).map(|i| i as u32 + 1)
}

/// Numeric day/month pair interpreted per the locale flag, falling back to
/// the other order when the configured one is not a valid calendar date.
fn numeric_date(a: u32, b: u32, year: i32, locale: DateLocale) -> Option<NaiveDate> {
    let (day, month) = match locale {
        DateLocale::DayFirst => (a, b),
        DateLocale::MonthFirst => (b, a),
    };
    NaiveDate::from_ymd_opt(year, month, day)
        .or_else(|| NaiveDate::from_ymd_opt(year, day, month))
}

/// Earliest bare date token in `text`, across all supported formats.
fn find_date_token(text: &str, locale: DateLocale) -> Option<NaiveDate> {
    let mut best: Option<(usize, NaiveDate)> = None;

    let mut consider = |pos: usize, date: Option<NaiveDate>| {
        if let Some(date) = date {
            if best.map_or(true, |(p, _)| pos < p) {
                best = Some((pos, date));
            }
        }
    };

    for caps in ISO_DATE.captures_iter(text) {
        let m = caps.get(0).unwrap();
        let date = NaiveDate::from_ymd_opt(
            caps[1].parse().ok()?,
            caps[2].parse().ok()?,
            caps[3].parse().ok()?,
        );
        consider(m.start(), date);
    }
    for caps in NUMERIC_DATE.captures_iter(text) {
        let m = caps.get(0).unwrap();
        let date = numeric_date(
            caps[1].parse().ok()?,
            caps[2].parse().ok()?,
            caps[3].parse().ok()?,
            locale,
        );
        consider(m.start(), date);
    }
    for caps in TEXTUAL_MDY.captures_iter(text) {
        let m = caps.get(0).unwrap();
        let date = month_index(&caps[1]).and_then(|month| {
            NaiveDate::from_ymd_opt(caps[3].parse().ok()?, month, caps[2].parse().ok()?)
        });
        consider(m.start(), date);
    }
    for caps in TEXTUAL_DMY.captures_iter(text) {
        let m = caps.get(0).unwrap();
        let date = month_index(&caps[2]).and_then(|month| {
            NaiveDate::from_ymd_opt(caps[3].parse().ok()?, month, caps[1].parse().ok()?)
        });
        consider(m.start(), date);
    }

    best.map(|(_, date)| date)
}

/// Approximate end-of-semester date for "Semester N, YYYY" phrasing.
fn semester_date(semester: u32, year: i32) -> Option<NaiveDate> {
    match semester {
        1 => NaiveDate::from_ymd_opt(year, 6, 15),
        2 => NaiveDate::from_ymd_opt(year, 11, 15),
        _ => None,
    }
}

/// Due date extracted from a section, with how it was found.
pub(crate) fn extract_due_date(
    section: &str,
    locale: DateLocale,
) -> Option<(NaiveDate, DueDateSource)> {
    for label_match in DUE_LABEL.find_iter(section) {
        if let Some(date) = find_date_token(label_match.as_str(), locale) {
            return Some((date, DueDateSource::Labelled));
        }
    }
    if let Some(date) = find_date_token(section, locale) {
        return Some((date, DueDateSource::BareToken));
    }
    if let Some(caps) = SEMESTER.captures(section) {
        let semester = caps[1].parse::<u32>().ok()?;
        let year = caps[2].parse::<i32>().ok()?;
        if let Some(date) = semester_date(semester, year) {
            return Some((date, DueDateSource::SemesterHint));
        }
    }
    None
}

/// Parse one caller-supplied raw date string (the `raw_date_strings`
/// synthesis input). More forgiving than section extraction: the whole
/// string is scanned for any token.
pub fn parse_date_string(value: &str, locale: DateLocale) -> Option<NaiveDate> {
    find_date_token(value, locale).or_else(|| {
        let caps = SEMESTER.captures(value)?;
        semester_date(caps[1].parse().ok()?, caps[2].parse().ok()?)
    })
}

/// Fabricated due date for an assignment that stated none: two weeks out,
/// plus two further weeks per assignment ordinal so un-dated work spreads
/// across the term.
pub(crate) fn fallback_due_date(today: NaiveDate, number: u32) -> NaiveDate {
    let offset = 14 + 14 * i64::from(number.max(1));
    let date = today + Duration::days(offset);
    debug!(
        "no due date found; fabricated {} for assignment number {}",
        date, number
    );
    date
}
