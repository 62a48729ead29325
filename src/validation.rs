use crate::assignment::Assignment;
use crate::entry::ScheduleEntry;
use std::collections::{HashMap, HashSet};
use std::fmt;

#[derive(Debug, Clone)]
pub struct ValidationError {
    message: String,
}

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ValidationError {}

pub(crate) fn validate_assignment(assignment: &Assignment) -> Result<(), ValidationError> {
    let Some(due) = assignment.due_date else {
        return Err(ValidationError::new(format!(
            "assignment '{}' has no resolved due date",
            assignment.title
        )));
    };
    if let Some(start) = assignment.start_date {
        if start > due {
            return Err(ValidationError::new(format!(
                "assignment '{}' starts {} after its due date {}",
                assignment.title, start, due
            )));
        }
    }
    if let Some(hours) = assignment.total_hours {
        if !hours.is_finite() || hours <= 0.0 {
            return Err(ValidationError::new(format!(
                "assignment '{}' has invalid total hours {}",
                assignment.title, hours
            )));
        }
    }
    if let Some(days) = assignment.days_needed {
        if days < 2 {
            return Err(ValidationError::new(format!(
                "assignment '{}' has days_needed {} below the 2-day floor",
                assignment.title, days
            )));
        }
    }
    Ok(())
}

pub(crate) fn validate_entry(entry: &ScheduleEntry) -> Result<(), ValidationError> {
    if entry.id.trim().is_empty() {
        return Err(ValidationError::new(format!(
            "entry '{}' has an empty id",
            entry.title
        )));
    }
    if entry.end <= entry.start {
        return Err(ValidationError::new(format!(
            "entry '{}' ends {} at or before its start {}",
            entry.title, entry.end, entry.start
        )));
    }
    if let Some(due) = entry.resource.due_date() {
        if entry.end.date() > due {
            return Err(ValidationError::new(format!(
                "entry '{}' ends {} after the assignment due date {}",
                entry.title,
                entry.end.date(),
                due
            )));
        }
    }
    Ok(())
}

/// Collection-level checks: unique ids, per-entry invariants, and
/// containment of every assignment-derived entry inside its assignment's
/// work window.
pub(crate) fn validate_collection(
    assignments: &[Assignment],
    entries: &[ScheduleEntry],
) -> Result<(), ValidationError> {
    for assignment in assignments {
        validate_assignment(assignment)?;
    }

    let windows: HashMap<&str, &Assignment> = assignments
        .iter()
        .map(|a| (a.title.as_str(), a))
        .collect();

    let mut seen_ids = HashSet::with_capacity(entries.len());
    for entry in entries {
        if !seen_ids.insert(entry.id.as_str()) {
            return Err(ValidationError::new(format!(
                "duplicate entry id {}",
                entry.id
            )));
        }
        validate_entry(entry)?;

        if let Some(title) = entry.resource.assignment_title() {
            if let Some(start) = windows.get(title).and_then(|a| a.start_date) {
                if entry.start.date() < start {
                    return Err(ValidationError::new(format!(
                        "entry '{}' starts {} before assignment start {}",
                        entry.title,
                        entry.start.date(),
                        start
                    )));
                }
            }
        }
    }
    Ok(())
}
