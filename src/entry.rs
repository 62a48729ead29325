use crate::assignment::Priority;
use chrono::{Duration, NaiveDate, NaiveDateTime};
use polars::prelude::*;
use polars::prelude::PlSmallStr;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Discriminant for the kinds of calendar entries the engine emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EntryKind {
    StudySession,
    Revision,
    Milestone,
    TopicStudy,
    KnowledgeCheck,
}

impl EntryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryKind::StudySession => "study-session",
            EntryKind::Revision => "revision",
            EntryKind::Milestone => "milestone",
            EntryKind::TopicStudy => "topic-study",
            EntryKind::KnowledgeCheck => "knowledge-check",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "study-session" => Some(EntryKind::StudySession),
            "revision" => Some(EntryKind::Revision),
            "milestone" => Some(EntryKind::Milestone),
            "topic-study" => Some(EntryKind::TopicStudy),
            "knowledge-check" => Some(EntryKind::KnowledgeCheck),
            _ => None,
        }
    }

    /// Calendar category the UI layer colors entries by.
    pub fn category(&self) -> &'static str {
        match self {
            EntryKind::StudySession => "study",
            EntryKind::Revision => "review",
            EntryKind::Milestone => "checkpoint",
            EntryKind::TopicStudy => "topic",
            EntryKind::KnowledgeCheck => "quiz",
        }
    }
}

/// Kind-specific payload linking an entry back to what produced it.
/// Consumed opaquely by the UI layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum EntryResource {
    StudySession {
        assignment: String,
        due_date: NaiveDate,
        session_number: u32,
        total_sessions: u32,
        stage: String,
    },
    Revision {
        assignment: String,
        due_date: NaiveDate,
    },
    Milestone {
        assignment: String,
        due_date: NaiveDate,
        checklist: Vec<String>,
    },
    TopicStudy {
        topic: String,
        importance: f64,
    },
    KnowledgeCheck {
        assignment: String,
        due_date: NaiveDate,
        after_session: u32,
        questions: Vec<String>,
    },
}

impl EntryResource {
    /// Title of the originating assignment, when the entry has one.
    pub fn assignment_title(&self) -> Option<&str> {
        match self {
            EntryResource::StudySession { assignment, .. }
            | EntryResource::Revision { assignment, .. }
            | EntryResource::Milestone { assignment, .. }
            | EntryResource::KnowledgeCheck { assignment, .. } => Some(assignment),
            EntryResource::TopicStudy { .. } => None,
        }
    }

    pub fn due_date(&self) -> Option<NaiveDate> {
        match self {
            EntryResource::StudySession { due_date, .. }
            | EntryResource::Revision { due_date, .. }
            | EntryResource::Milestone { due_date, .. }
            | EntryResource::KnowledgeCheck { due_date, .. } => Some(*due_date),
            EntryResource::TopicStudy { .. } => None,
        }
    }
}

/// The unit emitted to the caller: one time-boxed block on the study calendar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    pub id: String,
    pub kind: EntryKind,
    pub title: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub category: String,
    pub priority: Priority,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub course_code: Option<String>,
    pub description: String,
    pub resource: EntryResource,
}

impl ScheduleEntry {
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    pub fn duration_hours(&self) -> f64 {
        self.duration().num_minutes() as f64 / 60.0
    }
}

/// Stable, content-derived entry id: a kind tag plus the first 12 hex chars
/// of SHA-256 over the seed. Repeated synthesis of identical input yields
/// identical ids.
pub(crate) fn entry_id(tag: &str, seed: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(seed.as_bytes());
    let digest = hex::encode(hasher.finalize());
    format!("{}-{}", tag, &digest[..12])
}

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Flat tabular projection of an entry collection. Timestamps are formatted
/// strings, the originating due date is a proper Date column.
pub fn entries_to_dataframe(entries: &[ScheduleEntry]) -> PolarsResult<DataFrame> {
    let mut ids = Vec::with_capacity(entries.len());
    let mut kinds = Vec::with_capacity(entries.len());
    let mut titles = Vec::with_capacity(entries.len());
    let mut starts = Vec::with_capacity(entries.len());
    let mut ends = Vec::with_capacity(entries.len());
    let mut categories = Vec::with_capacity(entries.len());
    let mut priorities = Vec::with_capacity(entries.len());
    let mut course_codes: Vec<Option<String>> = Vec::with_capacity(entries.len());
    let mut assignments: Vec<Option<String>> = Vec::with_capacity(entries.len());
    let mut due_dates: Vec<Option<i32>> = Vec::with_capacity(entries.len());
    let mut duration_hours = Vec::with_capacity(entries.len());

    for entry in entries {
        ids.push(entry.id.clone());
        kinds.push(entry.kind.as_str().to_string());
        titles.push(entry.title.clone());
        starts.push(entry.start.format(TIMESTAMP_FORMAT).to_string());
        ends.push(entry.end.format(TIMESTAMP_FORMAT).to_string());
        categories.push(entry.category.clone());
        priorities.push(entry.priority.as_str().to_string());
        course_codes.push(entry.course_code.clone());
        assignments.push(entry.resource.assignment_title().map(ToOwned::to_owned));
        due_dates.push(entry.resource.due_date().map(date_to_i32));
        duration_hours.push(entry.duration_hours());
    }

    let columns = vec![
        Series::new(PlSmallStr::from_static("id"), ids).into_column(),
        Series::new(PlSmallStr::from_static("kind"), kinds).into_column(),
        Series::new(PlSmallStr::from_static("title"), titles).into_column(),
        Series::new(PlSmallStr::from_static("start"), starts).into_column(),
        Series::new(PlSmallStr::from_static("end"), ends).into_column(),
        Series::new(PlSmallStr::from_static("category"), categories).into_column(),
        Series::new(PlSmallStr::from_static("priority"), priorities).into_column(),
        Series::new(PlSmallStr::from_static("course_code"), course_codes).into_column(),
        Series::new(PlSmallStr::from_static("assignment"), assignments).into_column(),
        Series::new(PlSmallStr::from_static("due_date"), due_dates)
            .cast(&DataType::Date)?
            .into_column(),
        Series::new(PlSmallStr::from_static("duration_hours"), duration_hours).into_column(),
    ];

    DataFrame::new(columns)
}

fn date_to_i32(date: NaiveDate) -> i32 {
    let epoch = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap();
    (date - epoch).num_days() as i32
}
