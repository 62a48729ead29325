//! Pipeline orchestration: raw text in, ordered entry collection out.
//!
//! The pipeline is a strict, non-branching sequence (parse, resolve dates,
//! estimate, distribute, supplement, assemble) and it never fails as a
//! whole: a stage that cannot produce a value degrades to a fallback and
//! the synthesis keeps going.

use crate::assignment::{Assignment, DueDateSource};
use crate::distribute::{distribute_sessions, DeadlineWeightedPlacement, SessionPlacement};
use crate::entry::{entries_to_dataframe, EntryKind, ScheduleEntry};
use crate::extract;
use crate::extract::dates::{self, DateLocale};
use crate::metadata::SynthesisMetadata;
use crate::{estimate, supplement};
use chrono::{Local, NaiveDate, NaiveDateTime};
use log::debug;
use polars::prelude::{DataFrame, PolarsResult};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Knobs shared by every synthesis call on a planner.
///
/// `today` is explicit rather than read from a process-wide clock so that
/// repeated synthesis of identical input is reproducible.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlannerConfig {
    pub today: NaiveDate,
    pub locale: DateLocale,
}

impl PlannerConfig {
    pub fn for_today(today: NaiveDate) -> Self {
        Self {
            today,
            locale: DateLocale::default(),
        }
    }
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self::for_today(Local::now().date_naive())
    }
}

/// Descriptive header attached to a generated plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanMetadata {
    pub user_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub course_code: Option<String>,
    pub generated_on: NaiveDate,
    pub locale: DateLocale,
}

/// Entry counts and bounds for one synthesis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SynthesisSummary {
    pub assignment_count: usize,
    pub session_count: usize,
    pub revision_count: usize,
    pub milestone_count: usize,
    pub topic_count: usize,
    pub knowledge_check_count: usize,
    pub fallback_date_count: usize,
    pub earliest_start: Option<NaiveDateTime>,
    pub latest_end: Option<NaiveDateTime>,
}

impl SynthesisSummary {
    pub fn to_cli_summary(&self) -> String {
        let mut parts = Vec::new();
        parts.push(format!("assignments={}", self.assignment_count));
        parts.push(format!("sessions={}", self.session_count));
        if self.revision_count > 0 {
            parts.push(format!("revisions={}", self.revision_count));
        }
        if self.milestone_count > 0 {
            parts.push(format!("milestones={}", self.milestone_count));
        }
        if self.topic_count > 0 {
            parts.push(format!("topics={}", self.topic_count));
        }
        if self.knowledge_check_count > 0 {
            parts.push(format!("checks={}", self.knowledge_check_count));
        }
        if self.fallback_date_count > 0 {
            parts.push(format!("fabricated_dates={}", self.fallback_date_count));
        }
        if let Some(start) = self.earliest_start {
            parts.push(format!("first={}", start.format("%Y-%m-%d %H:%M")));
        }
        if let Some(end) = self.latest_end {
            parts.push(format!("last={}", end.format("%Y-%m-%d %H:%M")));
        }
        parts.join(", ")
    }
}

/// The synthesis output: resolved assignments plus the flat, ordered entry
/// collection handed to the persistence layer.
#[derive(Debug, Clone, PartialEq)]
pub struct StudyPlan {
    metadata: PlanMetadata,
    assignments: Vec<Assignment>,
    entries: Vec<ScheduleEntry>,
}

impl StudyPlan {
    pub(crate) fn from_parts(
        metadata: PlanMetadata,
        assignments: Vec<Assignment>,
        entries: Vec<ScheduleEntry>,
    ) -> Self {
        Self {
            metadata,
            assignments,
            entries,
        }
    }

    pub fn metadata(&self) -> &PlanMetadata {
        &self.metadata
    }

    pub fn assignments(&self) -> &[Assignment] {
        &self.assignments
    }

    pub fn entries(&self) -> &[ScheduleEntry] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<ScheduleEntry> {
        self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Tabular projection of the entry collection.
    pub fn dataframe(&self) -> PolarsResult<DataFrame> {
        entries_to_dataframe(&self.entries)
    }

    pub fn summary(&self) -> SynthesisSummary {
        let count_kind = |kind: EntryKind| self.entries.iter().filter(|e| e.kind == kind).count();
        SynthesisSummary {
            assignment_count: self.assignments.len(),
            session_count: count_kind(EntryKind::StudySession),
            revision_count: count_kind(EntryKind::Revision),
            milestone_count: count_kind(EntryKind::Milestone),
            topic_count: count_kind(EntryKind::TopicStudy),
            knowledge_check_count: count_kind(EntryKind::KnowledgeCheck),
            fallback_date_count: self
                .assignments
                .iter()
                .filter(|a| a.due_date_source == Some(DueDateSource::Fallback))
                .count(),
            earliest_start: self.entries.iter().map(|e| e.start).min(),
            latest_end: self.entries.iter().map(|e| e.end).max(),
        }
    }
}

/// Stateless synthesis engine. One instance can serve any number of calls;
/// nothing is shared between them.
pub struct StudyPlanner {
    config: PlannerConfig,
    placement: Option<Box<dyn SessionPlacement>>,
}

impl StudyPlanner {
    pub fn new(config: PlannerConfig) -> Self {
        Self {
            config,
            placement: None,
        }
    }

    /// Substitute a custom session placement strategy (e.g. one that avoids
    /// the user's class timetable).
    pub fn with_placement(config: PlannerConfig, placement: Box<dyn SessionPlacement>) -> Self {
        Self {
            config,
            placement: Some(placement),
        }
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Parse raw course text into fully resolved and estimated assignment
    /// records (2 h/day default pace).
    pub fn extract_assignments(&self, text: &str) -> Vec<Assignment> {
        let mut assignments = extract::parse_assignments(text, self.config.locale);
        for assignment in &mut assignments {
            self.resolve(assignment, None);
            estimate::annotate(assignment, self.config.today, 2.0);
        }
        assignments
    }

    /// The full pipeline: parse, then synthesize with the given context.
    pub fn plan_from_text(&self, text: &str, metadata: &SynthesisMetadata) -> StudyPlan {
        let assignments = extract::parse_assignments(text, self.config.locale);
        self.synthesize(&assignments, &[], metadata)
    }

    /// Synthesize a study calendar for already-parsed assignments.
    ///
    /// `raw_date_strings` pairs with `assignments` by index and is consulted
    /// for records whose due date the parser could not find; anything still
    /// unresolved gets a fabricated fallback date. Estimation fills only the
    /// fields a record is missing, so pre-annotated assignments pass through
    /// untouched.
    pub fn synthesize(
        &self,
        assignments: &[Assignment],
        raw_date_strings: &[String],
        metadata: &SynthesisMetadata,
    ) -> StudyPlan {
        let plan_metadata = PlanMetadata {
            user_id: metadata.user_id.clone(),
            course_code: metadata.course_code.clone(),
            generated_on: self.config.today,
            locale: self.config.locale,
        };

        let mut resolved = assignments.to_vec();
        for (index, assignment) in resolved.iter_mut().enumerate() {
            self.resolve(assignment, raw_date_strings.get(index));
            if assignment.total_hours.is_none()
                || assignment.start_date.is_none()
                || assignment.priority.is_none()
            {
                estimate::annotate(assignment, self.config.today, metadata.daily_pace());
            }
        }

        if resolved.is_empty() {
            return StudyPlan::from_parts(plan_metadata, resolved, Vec::new());
        }

        if !metadata.class_schedule.is_empty() {
            debug!(
                "class schedule with {} blocks supplied; default placement does not avoid it",
                metadata.class_schedule.len()
            );
        }

        let pref_placement = metadata
            .preferences
            .as_ref()
            .and_then(|p| p.preferred_start_times.clone())
            .map(DeadlineWeightedPlacement::with_slots);
        let default_placement = DeadlineWeightedPlacement::new();
        let placement: &dyn SessionPlacement = match (&self.placement, &pref_placement) {
            (Some(custom), _) => custom.as_ref(),
            (None, Some(preferred)) => preferred,
            (None, None) => &default_placement,
        };

        let course = metadata.course_code.as_deref();
        let sessions_per_assignment: Vec<Vec<ScheduleEntry>> = resolved
            .par_iter()
            .map(|assignment| distribute_sessions(assignment, placement, course))
            .collect();

        let mut supplements = Vec::new();
        for assignment in &resolved {
            supplements.extend(supplement::revision_entry(
                assignment,
                self.config.today,
                course,
            ));
            supplements.extend(supplement::milestone_entry(
                assignment,
                self.config.today,
                course,
            ));
        }

        let earliest_start = resolved.iter().filter_map(|a| a.start_date).min();
        let topic_sessions = earliest_start
            .map(|start| supplement::topic_entries(&metadata.topics, start, course))
            .unwrap_or_default();

        let mut checks = Vec::new();
        for (assignment, sessions) in resolved.iter().zip(&sessions_per_assignment) {
            checks.extend(supplement::knowledge_checks(assignment, sessions));
        }

        // Fixed assembly order: study sessions, supplementary activities,
        // topic sessions, knowledge checks. Callers sort by start when they
        // need a chronological view.
        let mut entries: Vec<ScheduleEntry> =
            sessions_per_assignment.into_iter().flatten().collect();
        entries.extend(supplements);
        entries.extend(topic_sessions);
        entries.extend(checks);

        StudyPlan::from_parts(plan_metadata, resolved, entries)
    }

    /// Guarantee a due date on the record: raw string, then fabrication.
    fn resolve(&self, assignment: &mut Assignment, raw_date: Option<&String>) {
        if assignment.due_date.is_some() {
            return;
        }
        if let Some(raw) = raw_date {
            if let Some(date) = dates::parse_date_string(raw, self.config.locale) {
                assignment.due_date = Some(date);
                assignment.due_date_source = Some(DueDateSource::BareToken);
                return;
            }
        }
        assignment.due_date = Some(dates::fallback_due_date(self.config.today, assignment.number));
        assignment.due_date_source = Some(DueDateSource::Fallback);
    }
}
