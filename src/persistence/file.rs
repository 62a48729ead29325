use super::{PersistenceError, PersistenceResult};
use crate::assignment::{Assignment, Priority};
use crate::entry::{EntryKind, EntryResource, ScheduleEntry};
use crate::plan::{PlanMetadata, StudyPlan};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::Path;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

#[derive(Serialize, Deserialize)]
struct PlanSnapshot {
    metadata: PlanMetadata,
    assignments: Vec<Assignment>,
    entries: Vec<ScheduleEntry>,
}

impl PlanSnapshot {
    fn from_plan(plan: &StudyPlan) -> PersistenceResult<Self> {
        super::validate_plan(plan)?;
        Ok(Self {
            metadata: plan.metadata().clone(),
            assignments: plan.assignments().to_vec(),
            entries: plan.entries().to_vec(),
        })
    }

    fn into_plan(self) -> PersistenceResult<StudyPlan> {
        let plan = StudyPlan::from_parts(self.metadata, self.assignments, self.entries);
        super::validate_plan(&plan)?;
        Ok(plan)
    }
}

pub fn save_plan_to_json<P: AsRef<Path>>(plan: &StudyPlan, path: P) -> PersistenceResult<()> {
    let snapshot = PlanSnapshot::from_plan(plan)?;
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, &snapshot)?;
    Ok(())
}

pub fn load_plan_from_json<P: AsRef<Path>>(path: P) -> PersistenceResult<StudyPlan> {
    let file = File::open(path)?;
    let snapshot: PlanSnapshot = serde_json::from_reader(file)?;
    snapshot.into_plan()
}

#[derive(Default, Serialize, Deserialize)]
struct EntryCsvRecord {
    id: String,
    kind: String,
    title: String,
    start: String,
    end: String,
    category: String,
    priority: String,
    course_code: String,
    description: String,
    resource: String,
    #[serde(default)]
    metadata_json: String,
    #[serde(default)]
    assignments_json: String,
}

impl EntryCsvRecord {
    fn from_entry(entry: &ScheduleEntry) -> PersistenceResult<Self> {
        Ok(Self {
            id: entry.id.clone(),
            kind: entry.kind.as_str().to_string(),
            title: entry.title.clone(),
            start: entry.start.format(TIMESTAMP_FORMAT).to_string(),
            end: entry.end.format(TIMESTAMP_FORMAT).to_string(),
            category: entry.category.clone(),
            priority: entry.priority.as_str().to_string(),
            course_code: entry.course_code.clone().unwrap_or_default(),
            description: entry.description.clone(),
            resource: serde_json::to_string(&entry.resource)?,
            metadata_json: String::new(),
            assignments_json: String::new(),
        })
    }

    fn metadata_row(plan: &StudyPlan) -> PersistenceResult<Self> {
        let mut record = EntryCsvRecord::default();
        record.title = "__metadata__".to_string();
        record.metadata_json = serde_json::to_string(plan.metadata())?;
        record.assignments_json = serde_json::to_string(plan.assignments())?;
        Ok(record)
    }

    fn is_metadata_row(&self) -> bool {
        !self.metadata_json.trim().is_empty()
    }

    fn into_entry(self) -> PersistenceResult<ScheduleEntry> {
        if self.is_metadata_row() {
            return Err(PersistenceError::InvalidData(
                "metadata row cannot be converted to an entry".into(),
            ));
        }
        let kind = EntryKind::from_str(self.kind.trim()).ok_or_else(|| {
            PersistenceError::InvalidData(format!("invalid entry kind '{}'", self.kind))
        })?;
        let priority = Priority::from_str(self.priority.trim()).ok_or_else(|| {
            PersistenceError::InvalidData(format!("invalid priority '{}'", self.priority))
        })?;
        let resource: EntryResource = serde_json::from_str(&self.resource)
            .map_err(|err| PersistenceError::InvalidData(format!("invalid resource: {err}")))?;

        Ok(ScheduleEntry {
            id: self.id,
            kind,
            title: self.title,
            start: parse_timestamp(&self.start)?,
            end: parse_timestamp(&self.end)?,
            category: self.category,
            priority,
            course_code: if self.course_code.trim().is_empty() {
                None
            } else {
                Some(self.course_code)
            },
            description: self.description,
            resource,
        })
    }
}

pub fn save_plan_to_csv<P: AsRef<Path>>(plan: &StudyPlan, path: P) -> PersistenceResult<()> {
    super::validate_plan(plan)?;
    let file = File::create(path)?;
    let mut writer = csv::Writer::from_writer(file);
    writer.serialize(EntryCsvRecord::metadata_row(plan)?)?;
    for entry in plan.entries() {
        writer.serialize(EntryCsvRecord::from_entry(entry)?)?;
    }
    writer.flush()?;
    Ok(())
}

pub fn load_plan_from_csv<P: AsRef<Path>>(path: P) -> PersistenceResult<StudyPlan> {
    let file = File::open(path)?;
    let mut reader = csv::Reader::from_reader(file);
    let mut entries = Vec::new();
    let mut metadata: Option<PlanMetadata> = None;
    let mut assignments: Vec<Assignment> = Vec::new();

    for record in reader.deserialize::<EntryCsvRecord>() {
        let record = record?;
        if record.is_metadata_row() {
            if metadata.is_some() {
                return Err(PersistenceError::InvalidData(
                    "CSV file contained multiple metadata rows".into(),
                ));
            }
            metadata = Some(serde_json::from_str(&record.metadata_json).map_err(|err| {
                PersistenceError::InvalidData(format!("invalid metadata json: {err}"))
            })?);
            if !record.assignments_json.trim().is_empty() {
                assignments = serde_json::from_str(&record.assignments_json).map_err(|err| {
                    PersistenceError::InvalidData(format!("invalid assignments json: {err}"))
                })?;
            }
            continue;
        }
        entries.push(record.into_entry()?);
    }

    let metadata = metadata.ok_or_else(|| {
        PersistenceError::InvalidData("CSV file contained no metadata row".into())
    })?;

    let plan = StudyPlan::from_parts(metadata, assignments, entries);
    super::validate_plan(&plan)?;
    Ok(plan)
}

fn parse_timestamp(input: &str) -> PersistenceResult<NaiveDateTime> {
    NaiveDateTime::parse_from_str(input.trim(), TIMESTAMP_FORMAT)
        .map_err(|e| PersistenceError::InvalidData(format!("invalid timestamp '{input}': {e}")))
}
