//! BipCore - rules-based Behavior Intervention Plan synthesis
//!
//! Turns a structured Functional Behavior Assessment into a multi-section
//! Behavior Intervention Plan by combining the intake with static strategy
//! tables. Everything here is pure: no I/O, no shared mutable state, and the
//! same intake on the same date always yields the same plan.
//!
//! # Flow
//!
//! ```text
//! IntakeRecord --generate--> Plan --render_text--> String
//! ```
//!
//! # Modules
//!
//! - [`category`] - closed category enumerations and observed sets
//! - [`knowledge`] - strategy tables keyed by category
//! - [`intake`] - the assessment input record
//! - [`engine`] - plan composition
//! - [`plan`] - the output structure and its section order
//! - [`render`] - plain-text serialization

pub mod category;
pub mod engine;
pub mod intake;
pub mod knowledge;
pub mod plan;
pub mod render;

pub use category::{
    AntecedentCategory, BehaviorFunction, Category, CategoryParseError, ConsequenceCategory, DataCollectionMethod,
    Entry, Intensity, Observed, SettingEventCategory,
};
pub use engine::{DEFAULT_DATA_COLLECTION_BASE, DEFAULT_STRATEGIES_PER_KEY, EngineOptions, generate, generate_on};
pub use intake::{IntakeRecord, ReplacementBehavior, SafetyConcerns, StudentContext, StudentInfo, TargetBehavior};
pub use plan::{BehaviorDefinition, CrisisEntry, CrisisPlan, Plan, Section, SectionBody, SectionId, StudentDisplay};
pub use render::{SECTION_MARKER, render_text, section_count};
