use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Urgency bucket used when the schedule is rendered on a calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "high" => Some(Priority::High),
            "medium" => Some(Priority::Medium),
            "low" => Some(Priority::Low),
            _ => None,
        }
    }
}

/// Category of coursework detected from the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssignmentKind {
    Essay,
    Report,
    Project,
    Presentation,
    Quiz,
    Homework,
    Lab,
    Task,
}

impl AssignmentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssignmentKind::Essay => "essay",
            AssignmentKind::Report => "report",
            AssignmentKind::Project => "project",
            AssignmentKind::Presentation => "presentation",
            AssignmentKind::Quiz => "quiz",
            AssignmentKind::Homework => "homework",
            AssignmentKind::Lab => "lab",
            AssignmentKind::Task => "task",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "essay" => Some(AssignmentKind::Essay),
            "report" => Some(AssignmentKind::Report),
            "project" => Some(AssignmentKind::Project),
            "presentation" => Some(AssignmentKind::Presentation),
            "quiz" => Some(AssignmentKind::Quiz),
            "homework" => Some(AssignmentKind::Homework),
            "lab" => Some(AssignmentKind::Lab),
            "task" => Some(AssignmentKind::Task),
            _ => None,
        }
    }
}

/// How the due date on a record was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DueDateSource {
    /// A date token followed a due/deadline/submission label.
    Labelled,
    /// A bare date token appeared somewhere in the section.
    BareToken,
    /// Derived from semester-relative phrasing ("Semester 2, 2025").
    SemesterHint,
    /// Fabricated because the section carried no usable date.
    Fallback,
}

/// Heuristic difficulty scores, each clamped to [0.5, 2.0].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComplexityScore {
    pub overall: f64,
    pub conceptual: f64,
    pub procedural: f64,
}

/// One parsed unit of required coursework.
///
/// The parser creates the record with only the text-derived fields set; the
/// date resolver and the estimator fill the remaining `Option` fields in
/// later pipeline passes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    pub title: String,
    pub kind: AssignmentKind,
    /// Ordinal parsed from the label or title ("Assignment 3"), default 1.
    pub number: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub course_code: Option<String>,
    /// Grade weight as a percentage, when stated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde(default)]
    pub requirements: Vec<String>,
    #[serde(default)]
    pub deliverables: Vec<String>,
    /// Word-count hint lifted from the text ("2000 words").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub word_count: Option<u32>,
    /// Explicit effort hint ("approx 12 hours"); overrides estimation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_hours: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date_source: Option<DueDateSource>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub complexity: Option<ComplexityScore>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_hours: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub days_needed: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
}

impl Assignment {
    pub fn new(title: impl Into<String>, kind: AssignmentKind) -> Self {
        Self {
            title: title.into(),
            kind,
            number: 1,
            course_code: None,
            weight: None,
            requirements: Vec::new(),
            deliverables: Vec::new(),
            word_count: None,
            estimated_hours: None,
            due_date: None,
            due_date_source: None,
            complexity: None,
            priority: None,
            total_hours: None,
            days_needed: None,
            start_date: None,
        }
    }

    /// Days between the resolved start and due dates. Zero until both the
    /// date resolver and the estimator have run.
    pub fn window_days(&self) -> i64 {
        match (self.start_date, self.due_date) {
            (Some(start), Some(due)) => (due - start).num_days(),
            _ => 0,
        }
    }
}
