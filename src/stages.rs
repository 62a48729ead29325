use crate::assignment::AssignmentKind;

/// A named phase of working on an assignment, with its share of the total
/// effort in percent. The stage set for a kind always sums to 100.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LearningStage {
    pub name: &'static str,
    pub share: f64,
}

impl LearningStage {
    const fn new(name: &'static str, share: f64) -> Self {
        Self { name, share }
    }

    /// Short phrase describing what a session in this stage focuses on.
    pub fn focus_hint(&self) -> &'static str {
        match self.name {
            "Research" => "gather sources and background material",
            "Outline" => "plan the structure and argument",
            "Draft Writing" => "write the main body",
            "Review" => "reread and tighten the draft",
            "Final Polish" => "finalize formatting and references",
            "Requirements" => "pin down what has to be built",
            "Design" => "plan the approach and components",
            "Implementation" => "develop the core work product",
            "Testing" => "verify the work against the brief",
            "Delivery" => "package and prepare the submission",
            "Slide Design" => "build the slide deck",
            "Speaker Notes" => "write and refine the talking points",
            "Rehearsal" => "practice the delivery end to end",
            "Topic Review" => "revisit the covered material",
            "Practice Questions" => "work through practice problems",
            "Weak Areas" => "target the topics that feel shaky",
            "Final Recall" => "test recall without notes",
            "Orientation" => "read the brief and set up",
            "Working Through" => "work through the exercises",
            "Check & Submit" => "check answers and submit",
            _ => "make progress on the assignment",
        }
    }
}

const WRITING_STAGES: &[LearningStage] = &[
    LearningStage::new("Research", 25.0),
    LearningStage::new("Outline", 15.0),
    LearningStage::new("Draft Writing", 35.0),
    LearningStage::new("Review", 15.0),
    LearningStage::new("Final Polish", 10.0),
];

const PROJECT_STAGES: &[LearningStage] = &[
    LearningStage::new("Requirements", 15.0),
    LearningStage::new("Design", 20.0),
    LearningStage::new("Implementation", 40.0),
    LearningStage::new("Testing", 15.0),
    LearningStage::new("Delivery", 10.0),
];

const PRESENTATION_STAGES: &[LearningStage] = &[
    LearningStage::new("Research", 25.0),
    LearningStage::new("Slide Design", 30.0),
    LearningStage::new("Speaker Notes", 20.0),
    LearningStage::new("Rehearsal", 25.0),
];

const RECALL_STAGES: &[LearningStage] = &[
    LearningStage::new("Topic Review", 40.0),
    LearningStage::new("Practice Questions", 35.0),
    LearningStage::new("Weak Areas", 15.0),
    LearningStage::new("Final Recall", 10.0),
];

const EXERCISE_STAGES: &[LearningStage] = &[
    LearningStage::new("Orientation", 20.0),
    LearningStage::new("Working Through", 60.0),
    LearningStage::new("Check & Submit", 20.0),
];

/// Stage set for an assignment kind.
pub fn stages_for(kind: AssignmentKind) -> &'static [LearningStage] {
    match kind {
        AssignmentKind::Essay | AssignmentKind::Report => WRITING_STAGES,
        AssignmentKind::Project => PROJECT_STAGES,
        AssignmentKind::Presentation => PRESENTATION_STAGES,
        AssignmentKind::Quiz => RECALL_STAGES,
        AssignmentKind::Homework | AssignmentKind::Lab | AssignmentKind::Task => EXERCISE_STAGES,
    }
}

/// Stage whose cumulative share range contains `progress` (0.0..=1.0).
pub fn stage_at(kind: AssignmentKind, progress: f64) -> LearningStage {
    let stages = stages_for(kind);
    let target = progress.clamp(0.0, 1.0) * 100.0;
    let mut cumulative = 0.0;
    for stage in stages {
        cumulative += stage.share;
        if target < cumulative {
            return *stage;
        }
    }
    // progress == 1.0 lands past the last cumulative boundary
    *stages.last().expect("stage sets are never empty")
}
