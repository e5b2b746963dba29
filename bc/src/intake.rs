//! Intake model
//!
//! The structured Functional Behavior Assessment handed to the engine. The
//! engine trusts the caller to have enforced the wizard contract (at least one
//! behavior, antecedent, consequence, function, and replacement behavior) and
//! never re-validates; display-only fields may be blank.

use serde::{Deserialize, Serialize};

use crate::category::{
    AntecedentCategory, BehaviorFunction, ConsequenceCategory, Intensity, Observed, SettingEventCategory,
};

/// One Functional Behavior Assessment
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct IntakeRecord {
    /// Student identity fields, display only
    pub student: StudentInfo,

    /// Target behaviors, in assessment order
    pub target_behaviors: Vec<TargetBehavior>,

    /// Events that immediately precede the behavior
    pub antecedents: Observed<AntecedentCategory>,

    /// Background conditions; recorded but not used for strategy selection
    pub setting_events: Observed<SettingEventCategory>,

    /// Events that follow the behavior
    pub consequences: Observed<ConsequenceCategory>,

    /// Hypothesized functions, primary first
    pub functions: Vec<BehaviorFunction>,

    /// Free-text notes appended to the function summary
    pub function_notes: String,

    /// Behaviors to teach in place of the problem behavior
    pub replacement_behaviors: Vec<ReplacementBehavior>,

    /// Strengths, reinforcers, and communication context
    pub context: StudentContext,

    /// Safety-risk flag and details
    pub safety: SafetyConcerns,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct StudentInfo {
    pub name: String,
    pub age: String,
    pub grade: String,
    pub school: String,
    pub assessment_date: String,
    pub team: String,
}

/// A behavior targeted for reduction
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct TargetBehavior {
    pub name: String,
    /// Operational definition
    pub definition: String,
    pub frequency: String,
    pub duration: String,
    pub intensity: Intensity,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ReplacementBehavior {
    pub behavior: String,
    pub rationale: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct StudentContext {
    pub strengths: String,
    pub preferred_reinforcers: String,
    pub communication_level: String,
    pub prior_interventions: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SafetyConcerns {
    pub flagged: bool,
    pub details: String,
}

impl TargetBehavior {
    pub fn new(name: impl Into<String>, definition: impl Into<String>, intensity: Intensity) -> Self {
        Self {
            name: name.into(),
            definition: definition.into(),
            intensity,
            ..Default::default()
        }
    }
}

impl ReplacementBehavior {
    pub fn new(behavior: impl Into<String>, rationale: impl Into<String>) -> Self {
        Self {
            behavior: behavior.into(),
            rationale: rationale.into(),
        }
    }
}

impl IntakeRecord {
    /// A complete example intake: escape-maintained aggression during difficult tasks
    pub fn sample() -> Self {
        Self {
            student: StudentInfo {
                name: "Jordan".to_string(),
                age: "9".to_string(),
                grade: "4th".to_string(),
                school: "Lincoln Elementary".to_string(),
                assessment_date: "2026-09-14".to_string(),
                team: "Classroom teacher, BCBA, school psychologist, parent".to_string(),
            },
            target_behaviors: vec![TargetBehavior {
                name: "Physical aggression toward peers".to_string(),
                definition: "Hitting, kicking, or pushing a peer with enough force to move them".to_string(),
                frequency: "3-5 times per day".to_string(),
                duration: "Under 1 minute per episode".to_string(),
                intensity: Intensity::Moderate,
            }],
            antecedents: Observed::new(vec![AntecedentCategory::DifficultTasks], ""),
            setting_events: Observed::new(vec![SettingEventCategory::PoorSleep], ""),
            consequences: Observed::new(vec![ConsequenceCategory::TaskRemoval], ""),
            functions: vec![BehaviorFunction::Escape],
            function_notes: String::new(),
            replacement_behaviors: vec![ReplacementBehavior::new(
                "Request a break using a break card",
                "Gives the student the same escape from demands without aggression",
            )],
            context: StudentContext {
                strengths: "Enjoys drawing and helping the teacher".to_string(),
                preferred_reinforcers: "Drawing time, computer time".to_string(),
                communication_level: String::new(),
                prior_interventions: "Verbal reminders, loss of recess".to_string(),
            },
            safety: SafetyConcerns::default(),
        }
    }

    /// True when any target behavior is rated high intensity
    pub fn has_high_intensity_behavior(&self) -> bool {
        self.target_behaviors.iter().any(|b| b.intensity == Intensity::High)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_yaml_uses_defaults() {
        let yaml = r#"
target-behaviors:
  - name: Elopement
    definition: Leaving the classroom without permission
functions: [escape]
"#;
        let intake: IntakeRecord = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(intake.target_behaviors.len(), 1);
        assert_eq!(intake.target_behaviors[0].intensity, Intensity::Moderate);
        assert!(intake.antecedents.is_empty());
        assert!(!intake.safety.flagged);
        assert_eq!(intake.student.name, "");
    }

    #[test]
    fn test_full_yaml_parses_labels() {
        let yaml = r#"
student:
  name: Sam
  assessment-date: "2026-10-01"
antecedents:
  selected:
    - Transitions between activities
    - When told 'no' or given a directive
  custom: fire drills
functions: [attention, sensory]
safety:
  flagged: true
  details: elopement risk
"#;
        let intake: IntakeRecord = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(intake.student.assessment_date, "2026-10-01");
        assert_eq!(
            intake.antecedents.selected,
            vec![AntecedentCategory::Transitions, AntecedentCategory::ToldNo]
        );
        assert_eq!(intake.antecedents.custom_text(), Some("fire drills"));
        assert_eq!(
            intake.functions,
            vec![BehaviorFunction::Attention, BehaviorFunction::Sensory]
        );
        assert!(intake.safety.flagged);
    }

    #[test]
    fn test_unknown_function_is_rejected() {
        let yaml = "functions: [boredom]\n";
        let err = serde_yaml::from_str::<IntakeRecord>(yaml).unwrap_err();
        assert!(err.to_string().contains("Unknown function 'boredom'"));
    }

    #[test]
    fn test_sample_serializes_and_reparses() {
        let sample = IntakeRecord::sample();
        let yaml = serde_yaml::to_string(&sample).unwrap();
        let back: IntakeRecord = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(back, sample);
    }

    #[test]
    fn test_high_intensity_detection() {
        let mut intake = IntakeRecord::sample();
        assert!(!intake.has_high_intensity_behavior());
        intake
            .target_behaviors
            .push(TargetBehavior::new("Head banging", "Striking head on a surface", Intensity::High));
        assert!(intake.has_high_intensity_behavior());
    }
}
