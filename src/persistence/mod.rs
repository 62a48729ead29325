use crate::plan::StudyPlan;
use crate::validation;
use serde_json::Error as SerdeJsonError;
use std::fmt;
use std::io;

pub mod file;

pub use file::{load_plan_from_csv, load_plan_from_json, save_plan_to_csv, save_plan_to_json};

#[derive(Debug)]
pub enum PersistenceError {
    Serialization(SerdeJsonError),
    Io(io::Error),
    Csv(csv::Error),
    InvalidData(String),
}

impl fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PersistenceError::Serialization(err) => write!(f, "serialization error: {err}"),
            PersistenceError::Io(err) => write!(f, "io error: {err}"),
            PersistenceError::Csv(err) => write!(f, "csv error: {err}"),
            PersistenceError::InvalidData(msg) => write!(f, "invalid data: {msg}"),
        }
    }
}

impl std::error::Error for PersistenceError {}

impl From<SerdeJsonError> for PersistenceError {
    fn from(value: SerdeJsonError) -> Self {
        Self::Serialization(value)
    }
}

impl From<io::Error> for PersistenceError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<csv::Error> for PersistenceError {
    fn from(value: csv::Error) -> Self {
        Self::Csv(value)
    }
}

pub type PersistenceResult<T> = Result<T, PersistenceError>;

/// Check the invariants of a generated plan: unique ids, well-formed
/// entries, and containment of every entry inside its assignment's window.
pub fn validate_plan(plan: &StudyPlan) -> PersistenceResult<()> {
    validation::validate_collection(plan.assignments(), plan.entries())
        .map_err(|err| PersistenceError::InvalidData(err.to_string()))
}
