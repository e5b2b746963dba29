//! Behavior Intervention Plan
//!
//! The engine's output value. A plan is built once per request and never
//! mutated; consumers either display it directly or render it to text.

use serde::Serialize;

/// Student block shown at the top of the plan, placeholders already applied
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct StudentDisplay {
    pub name: String,
    pub age: String,
    pub grade: String,
    pub school: String,
    pub assessment_date: String,
    pub plan_date: String,
    pub team: String,
}

/// A target behavior carried through from the intake
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BehaviorDefinition {
    pub name: String,
    pub definition: String,
    pub frequency: String,
    pub duration: String,
    pub intensity: String,
}

/// One line of the crisis plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "kebab-case")]
pub enum CrisisEntry {
    /// Opening line echoing the safety details
    Header(String),
    /// Free-text instruction
    Note(String),
    /// Numbered procedural step
    Step { number: u8, text: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CrisisPlan {
    pub entries: Vec<CrisisEntry>,
}

impl CrisisPlan {
    /// Numbered procedural steps only
    pub fn steps(&self) -> impl Iterator<Item = (u8, &str)> {
        self.entries.iter().filter_map(|e| match e {
            CrisisEntry::Step { number, text } => Some((*number, text.as_str())),
            _ => None,
        })
    }
}

/// Stable identifiers for plan sections, in document order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SectionId {
    BehaviorDefinitions,
    FunctionSummary,
    AntecedentStrategies,
    TeachingStrategies,
    ReinforcementStrategies,
    ResponseStrategies,
    DataCollection,
    CrisisPlan,
    GeneralizationPlan,
    MaintenancePlan,
}

impl SectionId {
    pub const ORDER: [SectionId; 10] = [
        SectionId::BehaviorDefinitions,
        SectionId::FunctionSummary,
        SectionId::AntecedentStrategies,
        SectionId::TeachingStrategies,
        SectionId::ReinforcementStrategies,
        SectionId::ResponseStrategies,
        SectionId::DataCollection,
        SectionId::CrisisPlan,
        SectionId::GeneralizationPlan,
        SectionId::MaintenancePlan,
    ];

    /// Heading text used by the text renderer
    pub fn title(&self) -> &'static str {
        match self {
            Self::BehaviorDefinitions => "TARGET BEHAVIOR DEFINITIONS",
            Self::FunctionSummary => "FUNCTION OF BEHAVIOR",
            Self::AntecedentStrategies => "ANTECEDENT / PREVENTION STRATEGIES",
            Self::TeachingStrategies => "TEACHING STRATEGIES",
            Self::ReinforcementStrategies => "REINFORCEMENT STRATEGIES",
            Self::ResponseStrategies => "RESPONSE TO PROBLEM BEHAVIOR",
            Self::DataCollection => "DATA COLLECTION PLAN",
            Self::CrisisPlan => "CRISIS / SAFETY PLAN",
            Self::GeneralizationPlan => "GENERALIZATION PLAN",
            Self::MaintenancePlan => "MAINTENANCE PLAN",
        }
    }
}

/// Borrowed content of one present section
#[derive(Debug, Clone, Copy)]
pub enum SectionBody<'a> {
    Definitions(&'a [BehaviorDefinition]),
    Paragraph(&'a str),
    Bullets(&'a [String]),
    Crisis(&'a CrisisPlan),
}

#[derive(Debug, Clone, Copy)]
pub struct Section<'a> {
    pub id: SectionId,
    pub body: SectionBody<'a>,
}

/// The synthesized plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct Plan {
    pub student: StudentDisplay,
    pub behavior_definitions: Vec<BehaviorDefinition>,
    pub function_summary: String,
    pub antecedent_strategies: Vec<String>,
    pub teaching_strategies: Vec<String>,
    pub reinforcement_strategies: Vec<String>,
    pub response_strategies: Vec<String>,
    pub data_collection_plan: Vec<String>,
    /// Present only when a safety concern was flagged
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crisis_plan: Option<CrisisPlan>,
    pub generalization_plan: Vec<String>,
    pub maintenance_plan: Vec<String>,
}

impl Plan {
    /// Present sections in document order; an absent crisis plan is skipped
    pub fn sections(&self) -> Vec<Section<'_>> {
        SectionId::ORDER
            .iter()
            .filter_map(|id| {
                let body = match id {
                    SectionId::BehaviorDefinitions => SectionBody::Definitions(&self.behavior_definitions),
                    SectionId::FunctionSummary => SectionBody::Paragraph(&self.function_summary),
                    SectionId::AntecedentStrategies => SectionBody::Bullets(&self.antecedent_strategies),
                    SectionId::TeachingStrategies => SectionBody::Bullets(&self.teaching_strategies),
                    SectionId::ReinforcementStrategies => SectionBody::Bullets(&self.reinforcement_strategies),
                    SectionId::ResponseStrategies => SectionBody::Bullets(&self.response_strategies),
                    SectionId::DataCollection => SectionBody::Bullets(&self.data_collection_plan),
                    SectionId::CrisisPlan => SectionBody::Crisis(self.crisis_plan.as_ref()?),
                    SectionId::GeneralizationPlan => SectionBody::Bullets(&self.generalization_plan),
                    SectionId::MaintenancePlan => SectionBody::Bullets(&self.maintenance_plan),
                };
                Some(Section { id: *id, body })
            })
            .collect()
    }

    /// Displayed section number for `id`, or `None` if the section is absent
    pub fn section_number(&self, id: SectionId) -> Option<usize> {
        self.sections().iter().position(|s| s.id == id).map(|i| i + 1)
    }
}
