//! Wizard contract checks
//!
//! The engine assumes a complete intake. These are the step-level rules the
//! intake wizard enforces before it lets a user generate a plan.

use bipcore::IntakeRecord;
use thiserror::Error;
use tracing::debug;

/// Wizard step a rule belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardStep {
    TargetBehavior,
    Antecedents,
    Consequences,
    Function,
    Replacement,
}

impl std::fmt::Display for WizardStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TargetBehavior => write!(f, "Target Behavior"),
            Self::Antecedents => write!(f, "Antecedents"),
            Self::Consequences => write!(f, "Consequences"),
            Self::Function => write!(f, "Function"),
            Self::Replacement => write!(f, "Replacement"),
        }
    }
}

/// A single violated rule
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationIssue {
    #[error("at least one target behavior is required")]
    NoTargetBehavior,

    #[error("target behavior #{index} has no name")]
    BlankBehaviorName { index: usize },

    #[error("target behavior #{index} has no operational definition")]
    BlankBehaviorDefinition { index: usize },

    #[error("select at least one antecedent or describe a custom one")]
    NoAntecedent,

    #[error("select at least one consequence or describe a custom one")]
    NoConsequence,

    #[error("select at least one function")]
    NoFunction,

    #[error("at least one replacement behavior is required")]
    NoReplacementBehavior,

    #[error("replacement behavior #{index} has no behavior text")]
    BlankReplacementBehavior { index: usize },
}

impl ValidationIssue {
    pub fn step(&self) -> WizardStep {
        match self {
            Self::NoTargetBehavior | Self::BlankBehaviorName { .. } | Self::BlankBehaviorDefinition { .. } => {
                WizardStep::TargetBehavior
            }
            Self::NoAntecedent => WizardStep::Antecedents,
            Self::NoConsequence => WizardStep::Consequences,
            Self::NoFunction => WizardStep::Function,
            Self::NoReplacementBehavior | Self::BlankReplacementBehavior { .. } => WizardStep::Replacement,
        }
    }
}

/// Every rule an intake violates, in wizard order
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("intake is incomplete: {}", .0.iter().map(|i| i.to_string()).collect::<Vec<_>>().join("; "))]
pub struct IntakeErrors(pub Vec<ValidationIssue>);

/// Check the intake against the wizard contract
pub fn validate_intake(intake: &IntakeRecord) -> Result<(), IntakeErrors> {
    debug!("validate_intake: called");
    let mut issues = Vec::new();

    if intake.target_behaviors.is_empty() {
        issues.push(ValidationIssue::NoTargetBehavior);
    }
    for (i, behavior) in intake.target_behaviors.iter().enumerate() {
        if behavior.name.trim().is_empty() {
            issues.push(ValidationIssue::BlankBehaviorName { index: i + 1 });
        }
        if behavior.definition.trim().is_empty() {
            issues.push(ValidationIssue::BlankBehaviorDefinition { index: i + 1 });
        }
    }

    if intake.antecedents.is_empty() {
        issues.push(ValidationIssue::NoAntecedent);
    }
    if intake.consequences.is_empty() {
        issues.push(ValidationIssue::NoConsequence);
    }
    if intake.functions.is_empty() {
        issues.push(ValidationIssue::NoFunction);
    }

    if intake.replacement_behaviors.is_empty() {
        issues.push(ValidationIssue::NoReplacementBehavior);
    }
    for (i, replacement) in intake.replacement_behaviors.iter().enumerate() {
        if replacement.behavior.trim().is_empty() {
            issues.push(ValidationIssue::BlankReplacementBehavior { index: i + 1 });
        }
    }

    if issues.is_empty() {
        debug!("validate_intake: passed");
        Ok(())
    } else {
        debug!(count = issues.len(), "validate_intake: failed");
        Err(IntakeErrors(issues))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bipcore::{Observed, ReplacementBehavior};

    #[test]
    fn test_sample_is_valid() {
        assert!(validate_intake(&IntakeRecord::sample()).is_ok());
    }

    #[test]
    fn test_empty_intake_reports_every_step() {
        let err = validate_intake(&IntakeRecord::default()).unwrap_err();
        assert_eq!(
            err.0,
            vec![
                ValidationIssue::NoTargetBehavior,
                ValidationIssue::NoAntecedent,
                ValidationIssue::NoConsequence,
                ValidationIssue::NoFunction,
                ValidationIssue::NoReplacementBehavior,
            ]
        );
        let steps: Vec<WizardStep> = err.0.iter().map(|i| i.step()).collect();
        assert_eq!(steps[0], WizardStep::TargetBehavior);
        assert_eq!(steps[4], WizardStep::Replacement);
    }

    #[test]
    fn test_custom_text_satisfies_antecedent_rule() {
        let mut intake = IntakeRecord::sample();
        intake.antecedents = Observed::new(vec![], "Fire drills");
        intake.consequences = Observed::new(vec![], "Sent to hallway");
        assert!(validate_intake(&intake).is_ok());

        intake.antecedents.custom = "   ".to_string();
        assert_eq!(validate_intake(&intake).unwrap_err().0, vec![ValidationIssue::NoAntecedent]);
    }

    #[test]
    fn test_blank_fields_are_indexed() {
        let mut intake = IntakeRecord::sample();
        intake.target_behaviors[0].definition = " ".to_string();
        intake
            .replacement_behaviors
            .push(ReplacementBehavior::new("", "no behavior text"));
        let err = validate_intake(&intake).unwrap_err();
        assert_eq!(
            err.0,
            vec![
                ValidationIssue::BlankBehaviorDefinition { index: 1 },
                ValidationIssue::BlankReplacementBehavior { index: 2 },
            ]
        );
        assert!(err.to_string().contains("target behavior #1 has no operational definition"));
    }
}
