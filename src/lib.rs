pub mod assignment;
pub mod distribute;
pub mod entry;
pub(crate) mod estimate;
pub mod extract;
pub mod metadata;
pub mod persistence;
pub mod plan;
pub mod stages;
pub(crate) mod supplement;
pub(crate) mod validation;

pub use assignment::{Assignment, AssignmentKind, ComplexityScore, DueDateSource, Priority};
pub use distribute::{DeadlineWeightedPlacement, SessionPlacement};
pub use entry::{entries_to_dataframe, EntryKind, EntryResource, ScheduleEntry};
pub use extract::dates::DateLocale;
pub use extract::parse_assignments;
pub use metadata::{ClassBlock, SynthesisMetadata, Topic, UserPreferences};
pub use persistence::{
    load_plan_from_csv, load_plan_from_json, save_plan_to_csv, save_plan_to_json, validate_plan,
    PersistenceError,
};
pub use plan::{PlanMetadata, PlannerConfig, StudyPlan, StudyPlanner, SynthesisSummary};
pub use stages::{stages_for, LearningStage};
pub use validation::ValidationError;
