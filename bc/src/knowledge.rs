//! Knowledge tables
//!
//! Static strategy banks keyed by antecedent category, behavior function, and
//! data-collection method. Each lookup is an exhaustive match, so every key
//! has an entry. Entries are ordered: the engine takes a prefix of each list.

use tracing::debug;

use crate::category::{AntecedentCategory, BehaviorFunction, DataCollectionMethod};

/// Prevention strategies for an antecedent category
pub fn antecedent_strategies(category: AntecedentCategory) -> &'static [&'static str] {
    debug!(?category, "antecedent_strategies: called");
    match category {
        AntecedentCategory::DifficultTasks => &[
            "Break tasks into smaller steps with visual checklists",
            "Provide task choices when possible",
            "Pre-teach or preview challenging material before independent work",
            "Reduce task length initially, then gradually increase demands",
        ],
        AntecedentCategory::Transitions => &[
            "Provide 5-minute and 2-minute warnings before transitions",
            "Use a visual schedule or timer so transitions are predictable",
            "Assign a transition job or preferred transition activity",
        ],
        AntecedentCategory::UnstructuredTime => &[
            "Provide structured activity choices during unstructured time",
            "Assign a peer buddy during lunch or recess",
            "Check in with student before and after unstructured periods",
            "Teach and practice expected recess and lunch routines",
        ],
        AntecedentCategory::RoutineChanges => &[
            "Preview schedule changes with a visual first-then board",
            "Provide advance notice of changes whenever possible",
            "Use a social narrative describing what will happen differently",
        ],
        AntecedentCategory::LargeGroupInstruction => &[
            "Seat student near the teacher and away from distractions",
            "Use frequent engagement strategies (choral response, partner turn-and-talk)",
            "Chunk instruction with embedded response opportunities every 3-5 minutes",
            "Provide a movement or helper role during extended group lessons",
        ],
        AntecedentCategory::PeerConflict => &[
            "Pre-teach social skills during structured lessons",
            "Use role-play and video modeling for common conflict scenarios",
            "Provide a cool-down area the student can access independently",
        ],
        AntecedentCategory::ToldNo => &[
            "Offer choices within directives ('Do you want to start with reading or math?')",
            "Use first-then language paired with a visual board",
            "Provide empathetic acknowledgment before restating the expectation",
            "Teach and practice accepting 'no' during calm, low-stakes moments",
        ],
        AntecedentCategory::AttentionElsewhere => &[
            "Schedule regular positive check-ins throughout the day",
            "Use nonverbal signals to acknowledge the student during group instruction",
            "Assign classroom jobs that provide natural adult attention",
        ],
        AntecedentCategory::PreferredItemsRemoved => &[
            "Provide advance warnings before transitions away from preferred items",
            "Use a visual timer so the student can see remaining time",
            "Offer a choice of when to transition",
            "Show on a visual schedule when the preferred item will be available again",
        ],
        AntecedentCategory::SensoryRichEnvironment => &[
            "Provide noise-canceling headphones or a quiet workspace option",
            "Offer sensory breaks at regular intervals",
            "Create a sensory diet plan with OT consultation",
            "Adjust lighting, noise level, and seating based on sensory needs",
        ],
    }
}

/// Replacement-skill teaching strategies for a behavior function
pub fn teaching_strategies(function: BehaviorFunction) -> &'static [&'static str] {
    debug!(?function, "teaching_strategies: called");
    match function {
        BehaviorFunction::Attention => &[
            "Teach an appropriate way to request adult attention (raising a hand, using a help card, tapping a shoulder)",
            "Model and role-play waiting for attention, with a visual cue showing when the adult will be available",
            "Teach peer-appropriate ways to start conversations and join activities",
            "Practice the attention request in natural settings with immediate adult response during acquisition",
        ],
        BehaviorFunction::Escape => &[
            "Teach the student to request a break using a break card or verbal request",
            "Teach the student to request help when a task feels too hard",
            "Teach self-monitoring of work completion using a visual checklist",
            "Practice tolerating brief, gradually longer work periods before a break is available",
        ],
        BehaviorFunction::Tangible => &[
            "Teach an appropriate request for preferred items or activities",
            "Teach waiting skills using a visual timer and a 'wait' card",
            "Teach accepting 'not now' by pairing it with when the item will be available",
        ],
        BehaviorFunction::Sensory => &[
            "Teach the student to request a sensory break or sensory tool",
            "Teach self-regulation strategies (deep breathing, using a fidget, heavy work)",
            "Teach a replacement behavior that produces similar sensory input in an acceptable way",
            "Teach the student to identify early body signals that sensory input is needed",
        ],
    }
}

/// Reinforcement procedures for a behavior function
pub fn reinforcement_strategies(function: BehaviorFunction) -> &'static [&'static str] {
    debug!(?function, "reinforcement_strategies: called");
    match function {
        BehaviorFunction::Attention => &[
            "Provide frequent behavior-specific praise for replacement behavior (5:1 positive-to-corrective ratio)",
            "Implement check-in/check-out for dedicated adult attention tied to behavioral expectations",
            "Use group contingency where student earns points for the class",
            "Provide noncontingent attention at regular intervals",
        ],
        BehaviorFunction::Escape => &[
            "Allow earned breaks contingent on task completion or appropriate requesting",
            "Offer choice of task order when student uses replacement behavior",
            "Use first-then board: non-preferred task then preferred activity",
            "Provide immediate praise when student begins or sustains work effort",
        ],
        BehaviorFunction::Tangible => &[
            "Implement token economy exchangeable for preferred items/activities",
            "Provide immediate access to preferred items when student requests appropriately",
            "Create a reinforcer menu updated weekly based on preference assessments",
        ],
        BehaviorFunction::Sensory => &[
            "Provide scheduled sensory breaks independent of behavior",
            "Allow access to preferred sensory tools contingent on replacement behavior use",
            "Build sensory activities into academic tasks",
        ],
    }
}

/// Responses to the problem behavior when it occurs
pub fn response_strategies(function: BehaviorFunction) -> &'static [&'static str] {
    debug!(?function, "response_strategies: called");
    match function {
        BehaviorFunction::Attention => &[
            "Use planned ignoring for minor attention-seeking behaviors",
            "Redirect to replacement behavior with brief, neutral prompt",
            "Avoid lengthy discussions that inadvertently provide attention",
            "Provide attention immediately when student self-corrects",
        ],
        BehaviorFunction::Escape => &[
            "Do not remove task demand when problem behavior occurs",
            "Use brief neutral redirect: 'Use your break card if you need a moment'",
            "After de-escalation, return to the task at same or slightly reduced demand",
            "Honor the request immediately when student uses replacement behavior",
        ],
        BehaviorFunction::Tangible => &[
            "Do not provide preferred item contingent on problem behavior",
            "Use brief redirect: 'You can earn it by [replacement behavior]'",
            "Provide immediate access when student uses replacement behavior",
        ],
        BehaviorFunction::Sensory => &[
            "Redirect to acceptable sensory alternative",
            "For harmful behaviors, implement response blocking with minimal attention",
            "Increase proactive sensory diet access",
        ],
    }
}

/// Procedure statements for a data-collection method
pub fn data_collection_procedures(method: DataCollectionMethod) -> &'static [&'static str] {
    debug!(?method, "data_collection_procedures: called");
    match method {
        DataCollectionMethod::AbcData => &[
            "Collect ABC (antecedent-behavior-consequence) data for each occurrence of the target behavior(s)",
            "Record daily frequency counts of the target behavior(s) and of independent replacement behavior use",
            "Note setting events (sleep, medication, schedule changes) on days the behavior occurs",
            "Summarize ABC patterns weekly to confirm or revise the function hypothesis",
        ],
        DataCollectionMethod::FrequencyCount => &[
            "Tally each occurrence of the target behavior during identified target periods",
            "Tally each independent use of the replacement behavior",
            "Convert counts to rate per hour when observation length varies",
        ],
        DataCollectionMethod::DurationRecording => &[
            "Record the start and end time of each episode of the target behavior",
            "Report total and average episode duration per day",
            "Track latency from directive to task engagement when escape is suspected",
        ],
        DataCollectionMethod::IntervalRecording => &[
            "Use partial-interval recording in 5-minute intervals during target periods",
            "Report the percentage of intervals with the target behavior",
            "Use momentary time sampling for on-task behavior alongside the target behavior",
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::Category;

    fn assert_bank_shape(entries: &[&str]) {
        assert!(
            (3..=5).contains(&entries.len()),
            "bank has {} entries",
            entries.len()
        );
        assert!(entries.iter().all(|e| !e.trim().is_empty()));
    }

    #[test]
    fn test_every_antecedent_has_strategies() {
        for c in AntecedentCategory::ALL {
            assert_bank_shape(antecedent_strategies(*c));
        }
    }

    #[test]
    fn test_every_function_has_all_banks() {
        for f in BehaviorFunction::ALL {
            assert_bank_shape(teaching_strategies(*f));
            assert_bank_shape(reinforcement_strategies(*f));
            assert_bank_shape(response_strategies(*f));
        }
    }

    #[test]
    fn test_every_data_method_has_procedures() {
        for m in DataCollectionMethod::ALL {
            assert_bank_shape(data_collection_procedures(*m));
        }
    }

    #[test]
    fn test_difficult_tasks_order() {
        let strategies = antecedent_strategies(AntecedentCategory::DifficultTasks);
        assert_eq!(strategies[0], "Break tasks into smaller steps with visual checklists");
        assert_eq!(strategies[1], "Provide task choices when possible");
    }
}
