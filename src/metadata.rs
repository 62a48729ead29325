use chrono::{NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

/// Externally supplied topic of interest, consumed read-only to produce
/// topic-study entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Topic {
    pub title: String,
    #[serde(default)]
    pub context: String,
    /// Relative importance on a 1-10 scale; higher topics are scheduled first.
    pub importance: f64,
}

/// One fixed block in the user's weekly class timetable.
///
/// Accepted as input but not consulted by the default session placement; see
/// the `SessionPlacement` trait for substituting a collision-aware strategy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassBlock {
    pub weekday: Weekday,
    pub start: NaiveTime,
    pub end: NaiveTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// Per-user pacing preferences.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserPreferences {
    /// Sustainable focused hours per day; defaults to 2.0 when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub daily_study_hours: Option<f64>,
    /// Replaces the default 09:00/13:00/16:00/19:00 session start rotation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_start_times: Option<Vec<NaiveTime>>,
}

/// Caller-supplied context for one synthesis call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SynthesisMetadata {
    #[serde(default)]
    pub user_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub course_code: Option<String>,
    #[serde(default)]
    pub topics: Vec<Topic>,
    #[serde(default)]
    pub class_schedule: Vec<ClassBlock>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferences: Option<UserPreferences>,
}

impl SynthesisMetadata {
    pub fn for_user(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            ..Self::default()
        }
    }

    /// Focused hours per day the estimator should assume.
    pub fn daily_pace(&self) -> f64 {
        self.preferences
            .as_ref()
            .and_then(|p| p.daily_study_hours)
            .filter(|h| h.is_finite() && *h > 0.0)
            .unwrap_or(2.0)
    }
}
