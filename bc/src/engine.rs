//! Synthesis engine
//!
//! `generate` walks an intake record once, pulls strategy prefixes from the
//! knowledge tables, adds the statements synthesized from free text, and
//! returns a fresh [`Plan`]. No state is kept between calls.

use chrono::{Local, NaiveDate};
use tracing::{debug, info};

use crate::category::{BehaviorFunction, DataCollectionMethod, Entry};
use crate::intake::IntakeRecord;
use crate::knowledge;
use crate::plan::{BehaviorDefinition, CrisisEntry, CrisisPlan, Plan, StudentDisplay};

/// Default number of statements taken from each knowledge-table entry
pub const DEFAULT_STRATEGIES_PER_KEY: usize = 3;

/// Default number of ABC-table statements that open the data-collection plan
pub const DEFAULT_DATA_COLLECTION_BASE: usize = 2;

/// Tunable caps applied while composing the plan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineOptions {
    /// Statements taken per antecedent category or function
    pub strategies_per_key: usize,
    /// Statements taken from the ABC data-collection entry
    pub data_collection_base: usize,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            strategies_per_key: DEFAULT_STRATEGIES_PER_KEY,
            data_collection_base: DEFAULT_DATA_COLLECTION_BASE,
        }
    }
}

const FALLBACK_ANTECEDENT_STRATEGIES: [&str; 3] = [
    "Review the daily schedule with the student each morning so expectations are predictable",
    "Pre-teach behavioral expectations before activities where the behavior is most likely",
    "Increase the rate of positive adult interaction throughout the day",
];

const DATA_REVIEW_STATEMENTS: [&str; 2] = [
    "Graph problem and replacement behavior data weekly to monitor trends",
    "Review progress data with the team every two weeks to monthly and adjust the plan as needed",
];

const SKILL_TRACKING_STATEMENT: &str =
    "Track acquisition of each replacement behavior (prompted vs. independent use) during teaching sessions";

const HIGH_INTENSITY_STATEMENT: &str = "For high-intensity behaviors, record duration and an intensity rating for every occurrence in addition to frequency";

const CRISIS_DEFAULT_DETAILS: &str = "See FBA documentation";

const CRISIS_INSTRUCTION: &str = "If the student engages in behavior posing risk of harm to self or others:";

const CRISIS_STEPS: [&str; 9] = [
    "Ensure safety of all students — clear the area if necessary",
    "Remain calm, use a low steady voice — avoid physical intervention unless trained and authorized",
    "Remove potential hazards from the area",
    "Contact the designated crisis team member or administrator immediately",
    "Use approved crisis intervention procedures per district policy",
    "Document the incident within 24 hours",
    "Conduct a team debrief within 48 hours",
    "Contact the family the same day per district protocol",
    "Review and update the BIP within one week following a crisis",
];

const GENERALIZATION_STATEMENTS: [&str; 5] = [
    "Train all staff who work with the student on BIP strategies so responses are consistent across adults",
    "Implement the plan across at least 3 settings (e.g., classroom, specials, cafeteria) from the start",
    "Use multiple exemplar training: practice replacement behaviors in varied contexts with different people",
    "Gradually fade prompts and supports as the student demonstrates independent use of replacement behaviors",
    "Schedule monthly team check-ins to ensure consistent implementation across settings and staff",
];

const GENERIC_COMMUNICATION_STATEMENT: &str =
    "Provide communication supports (visuals, simplified language, AAC if needed) matched to the student's communication level";

const MAINTENANCE_STATEMENTS: [&str; 6] = [
    "Thin the reinforcement schedule once the student meets criterion for 4 consecutive weeks",
    "Hold monthly booster sessions on replacement behaviors for 3 months after criterion is met",
    "Step down monitoring frequency (daily, then weekly, then biweekly) as gains hold",
    "Conduct formal plan reviews at 30, 60, and 90 days",
    "Re-intensify supports if the behavior returns to baseline levels within 5 school days",
    "Identify naturally occurring reinforcers that will maintain the replacement behavior after the plan is faded",
];

/// Generate a plan dated today with default options
pub fn generate(intake: &IntakeRecord) -> Plan {
    generate_on(intake, Local::now().date_naive(), &EngineOptions::default())
}

/// Generate a plan for a fixed date; identical inputs yield identical plans
pub fn generate_on(intake: &IntakeRecord, date: NaiveDate, options: &EngineOptions) -> Plan {
    debug!(
        behaviors = intake.target_behaviors.len(),
        functions = intake.functions.len(),
        safety = intake.safety.flagged,
        %date,
        ?options,
        "generate_on: called"
    );

    let functions = unique(&intake.functions);
    let name = or_placeholder(&intake.student.name, "[Student Name]");

    let plan = Plan {
        student: student_display(intake, date),
        behavior_definitions: behavior_definitions(intake),
        function_summary: function_summary(&name, &functions, &intake.function_notes),
        antecedent_strategies: antecedent_strategies(intake, options),
        teaching_strategies: teaching_strategies(intake, &functions, options),
        reinforcement_strategies: reinforcement_strategies(intake, &name, &functions, options),
        response_strategies: response_strategies(&functions, options),
        data_collection_plan: data_collection_plan(intake, options),
        crisis_plan: crisis_plan(intake),
        generalization_plan: generalization_plan(intake, &name),
        maintenance_plan: MAINTENANCE_STATEMENTS.iter().map(|s| s.to_string()).collect(),
    };

    info!(
        student = %plan.student.name,
        sections = plan.sections().len(),
        "Generated behavior intervention plan"
    );
    plan
}

fn or_placeholder(value: &str, placeholder: &str) -> String {
    let value = value.trim();
    if value.is_empty() {
        placeholder.to_string()
    } else {
        value.to_string()
    }
}

/// First occurrence of each item, in order
fn unique<T: Copy + PartialEq>(items: &[T]) -> Vec<T> {
    let mut out: Vec<T> = Vec::with_capacity(items.len());
    for item in items {
        if !out.contains(item) {
            out.push(*item);
        }
    }
    out
}

fn push_unique(list: &mut Vec<String>, statement: impl Into<String>) {
    let statement = statement.into();
    if !list.contains(&statement) {
        list.push(statement);
    }
}

fn extend_capped(list: &mut Vec<String>, bank: &[&str], cap: usize) {
    for statement in bank.iter().take(cap) {
        push_unique(list, *statement);
    }
}

fn student_display(intake: &IntakeRecord, date: NaiveDate) -> StudentDisplay {
    let student = &intake.student;
    StudentDisplay {
        name: or_placeholder(&student.name, "[Student Name]"),
        age: or_placeholder(&student.age, "[Age]"),
        grade: or_placeholder(&student.grade, "[Grade]"),
        school: or_placeholder(&student.school, "[School]"),
        assessment_date: or_placeholder(&student.assessment_date, "[FBA Date]"),
        plan_date: date.format("%B %-d, %Y").to_string(),
        team: or_placeholder(&student.team, "[Team Members]"),
    }
}

fn behavior_definitions(intake: &IntakeRecord) -> Vec<BehaviorDefinition> {
    intake
        .target_behaviors
        .iter()
        .map(|b| BehaviorDefinition {
            name: b.name.clone(),
            definition: b.definition.clone(),
            frequency: b.frequency.clone(),
            duration: b.duration.clone(),
            intensity: b.intensity.to_string(),
        })
        .collect()
}

fn join_descriptions(functions: &[BehaviorFunction]) -> String {
    let descriptions: Vec<&str> = functions.iter().map(|f| f.description()).collect();
    match descriptions.split_last() {
        Some((last, rest)) if !rest.is_empty() => format!("{} and {}", rest.join(", "), last),
        Some((last, _)) => last.to_string(),
        None => String::new(),
    }
}

fn function_summary(name: &str, functions: &[BehaviorFunction], notes: &str) -> String {
    debug!(count = functions.len(), "function_summary: called");
    let mut summary = match functions {
        [] => {
            debug!("function_summary: no functions, using placeholder");
            format!("Based on the FBA data for {name}, the primary function is [function not identified].")
        }
        [only] => {
            debug!("function_summary: single function");
            format!(
                "Based on the FBA data for {name}, the primary function is {}.",
                only.description()
            )
        }
        [primary, ..] => {
            debug!("function_summary: multiple functions");
            format!(
                "Based on the FBA data for {name}, the behavior appears to serve multiple functions: {}. \
                 Interventions should prioritize the primary function ({}) while addressing each identified function.",
                join_descriptions(functions),
                primary.description()
            )
        }
    };

    let notes = notes.trim();
    if !notes.is_empty() {
        summary.push(' ');
        summary.push_str(notes);
    }
    summary
}

fn antecedent_strategies(intake: &IntakeRecord, options: &EngineOptions) -> Vec<String> {
    let mut strategies = Vec::new();
    let mut seen = Vec::new();

    for entry in intake.antecedents.entries() {
        match entry {
            Entry::Known(category) => {
                if seen.contains(&category) {
                    continue;
                }
                seen.push(category);
                debug!(%category, "antecedent_strategies: adding table entry");
                extend_capped(
                    &mut strategies,
                    knowledge::antecedent_strategies(category),
                    options.strategies_per_key,
                );
            }
            Entry::Custom(text) => {
                debug!(%text, "antecedent_strategies: adding custom antecedent");
                push_unique(
                    &mut strategies,
                    format!("Plan a proactive prevention strategy for the identified antecedent: {text}"),
                );
            }
        }
    }

    if strategies.is_empty() {
        debug!("antecedent_strategies: nothing selected, using fallback");
        strategies.extend(FALLBACK_ANTECEDENT_STRATEGIES.iter().map(|s| s.to_string()));
    }
    strategies
}

fn teaching_strategies(intake: &IntakeRecord, functions: &[BehaviorFunction], options: &EngineOptions) -> Vec<String> {
    let mut strategies = Vec::new();
    for function in functions {
        extend_capped(
            &mut strategies,
            knowledge::teaching_strategies(*function),
            options.strategies_per_key,
        );
    }

    for replacement in &intake.replacement_behaviors {
        let behavior = replacement.behavior.trim();
        if behavior.is_empty() {
            continue;
        }
        let rationale = replacement.rationale.trim();
        let statement = if rationale.is_empty() {
            format!("Explicitly teach and practice the replacement behavior: {behavior}")
        } else {
            format!("Explicitly teach and practice the replacement behavior: {behavior} — {rationale}")
        };
        push_unique(&mut strategies, statement);
    }
    strategies
}

fn reinforcement_strategies(
    intake: &IntakeRecord,
    name: &str,
    functions: &[BehaviorFunction],
    options: &EngineOptions,
) -> Vec<String> {
    let mut strategies = Vec::new();
    for function in functions {
        extend_capped(
            &mut strategies,
            knowledge::reinforcement_strategies(*function),
            options.strategies_per_key,
        );
    }

    let strengths = intake.context.strengths.trim();
    if !strengths.is_empty() {
        push_unique(
            &mut strategies,
            format!("Build on {name}'s strengths ({strengths}) when arranging reinforcement and practice opportunities"),
        );
    }

    let preferred = intake.context.preferred_reinforcers.trim();
    if !preferred.is_empty() {
        push_unique(
            &mut strategies,
            format!("Use identified preferred items/activities ({preferred}) as reinforcers within the reinforcement system"),
        );
    }
    strategies
}

fn response_strategies(functions: &[BehaviorFunction], options: &EngineOptions) -> Vec<String> {
    let mut strategies = Vec::new();
    for function in functions {
        extend_capped(
            &mut strategies,
            knowledge::response_strategies(*function),
            options.strategies_per_key,
        );
    }
    strategies
}

fn data_collection_plan(intake: &IntakeRecord, options: &EngineOptions) -> Vec<String> {
    let mut plan = Vec::new();
    extend_capped(
        &mut plan,
        knowledge::data_collection_procedures(DataCollectionMethod::AbcData),
        options.data_collection_base,
    );
    plan.extend(DATA_REVIEW_STATEMENTS.iter().map(|s| s.to_string()));
    plan.push(SKILL_TRACKING_STATEMENT.to_string());

    if intake.has_high_intensity_behavior() {
        debug!("data_collection_plan: high-intensity behavior present");
        plan.push(HIGH_INTENSITY_STATEMENT.to_string());
    }
    plan
}

fn crisis_plan(intake: &IntakeRecord) -> Option<CrisisPlan> {
    if !intake.safety.flagged {
        debug!("crisis_plan: no safety concern flagged");
        return None;
    }

    let details = or_placeholder(&intake.safety.details, CRISIS_DEFAULT_DETAILS);
    debug!(%details, "crisis_plan: building");

    let mut entries = vec![
        CrisisEntry::Header(format!("Safety concerns identified: {details}")),
        CrisisEntry::Note(CRISIS_INSTRUCTION.to_string()),
    ];
    entries.extend(CRISIS_STEPS.iter().enumerate().map(|(i, text)| CrisisEntry::Step {
        number: (i + 1) as u8,
        text: text.to_string(),
    }));
    Some(CrisisPlan { entries })
}

fn generalization_plan(intake: &IntakeRecord, name: &str) -> Vec<String> {
    let mut plan: Vec<String> = GENERALIZATION_STATEMENTS.iter().map(|s| s.to_string()).collect();
    let communication = intake.context.communication_level.trim();
    if communication.is_empty() {
        plan.push(GENERIC_COMMUNICATION_STATEMENT.to_string());
    } else {
        plan.push(format!(
            "Adapt prompts, visuals, and replacement-behavior instruction to {name}'s communication level ({communication})"
        ));
    }
    plan
}
