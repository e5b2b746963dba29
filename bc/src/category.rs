//! Closed clinical category enumerations
//!
//! Every category the intake wizard offers is a variant here, so a lookup
//! against the knowledge tables is an exhaustive `match` instead of a string
//! probe. Labels are the exact option text shown to users and are the
//! serialized form in intake documents.

use serde::{Deserialize, Serialize, Serializer};
use thiserror::Error;
use tracing::debug;

/// Error returned when a label does not name any known category
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown {kind} '{label}' (expected one of: {expected})")]
pub struct CategoryParseError {
    pub kind: &'static str,
    pub label: String,
    pub expected: String,
}

/// A closed set of labelled categories
pub trait Category: Copy + Sized + 'static {
    /// Human-readable name of the category kind, used in error messages
    const KIND: &'static str;

    /// Every variant in canonical order
    const ALL: &'static [Self];

    /// Display label (exact wizard option text)
    fn label(&self) -> &'static str;

    /// Parse a label, ignoring case and surrounding whitespace
    fn from_label(s: &str) -> Result<Self, CategoryParseError> {
        let wanted = s.trim();
        debug!(kind = Self::KIND, %wanted, "Category::from_label: called");
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| CategoryParseError {
                kind: Self::KIND,
                label: wanted.to_string(),
                expected: Self::ALL.iter().map(|c| c.label()).collect::<Vec<_>>().join(", "),
            })
    }
}

macro_rules! impl_category_traits {
    ($ty:ty) => {
        impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.label())
            }
        }

        impl std::str::FromStr for $ty {
            type Err = CategoryParseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                <$ty as Category>::from_label(s)
            }
        }

        impl TryFrom<String> for $ty {
            type Error = CategoryParseError;

            fn try_from(s: String) -> Result<Self, Self::Error> {
                <$ty as Category>::from_label(&s)
            }
        }

        impl Serialize for $ty {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.label())
            }
        }
    };
}

/// Events that reliably precede the target behavior
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub enum AntecedentCategory {
    DifficultTasks,
    Transitions,
    UnstructuredTime,
    RoutineChanges,
    LargeGroupInstruction,
    PeerConflict,
    ToldNo,
    AttentionElsewhere,
    PreferredItemsRemoved,
    SensoryRichEnvironment,
}

impl Category for AntecedentCategory {
    const KIND: &'static str = "antecedent";

    const ALL: &'static [Self] = &[
        Self::DifficultTasks,
        Self::Transitions,
        Self::UnstructuredTime,
        Self::RoutineChanges,
        Self::LargeGroupInstruction,
        Self::PeerConflict,
        Self::ToldNo,
        Self::AttentionElsewhere,
        Self::PreferredItemsRemoved,
        Self::SensoryRichEnvironment,
    ];

    fn label(&self) -> &'static str {
        match self {
            Self::DifficultTasks => "Difficult or non-preferred tasks",
            Self::Transitions => "Transitions between activities",
            Self::UnstructuredTime => "Unstructured time (recess, lunch)",
            Self::RoutineChanges => "Changes in routine",
            Self::LargeGroupInstruction => "Large group instruction",
            Self::PeerConflict => "Peer interactions / conflict",
            Self::ToldNo => "When told 'no' or given a directive",
            Self::AttentionElsewhere => "When attention is directed elsewhere",
            Self::PreferredItemsRemoved => "When preferred items/activities are removed",
            Self::SensoryRichEnvironment => "Sensory-rich environments (noise, lights, crowds)",
        }
    }
}

impl_category_traits!(AntecedentCategory);

/// Background conditions that make the behavior more likely
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub enum SettingEventCategory {
    PoorSleep,
    MissedMedication,
    ConflictAtHome,
    Hunger,
    Illness,
    CaregiverChange,
    EarlierIncident,
    UnfamiliarStaff,
}

impl Category for SettingEventCategory {
    const KIND: &'static str = "setting event";

    const ALL: &'static [Self] = &[
        Self::PoorSleep,
        Self::MissedMedication,
        Self::ConflictAtHome,
        Self::Hunger,
        Self::Illness,
        Self::CaregiverChange,
        Self::EarlierIncident,
        Self::UnfamiliarStaff,
    ];

    fn label(&self) -> &'static str {
        match self {
            Self::PoorSleep => "Poor sleep the night before",
            Self::MissedMedication => "Missed medication",
            Self::ConflictAtHome => "Conflict at home before school",
            Self::Hunger => "Hunger / missed meals",
            Self::Illness => "Illness or physical discomfort",
            Self::CaregiverChange => "Change in caregiver or home situation",
            Self::EarlierIncident => "Previous behavioral incident earlier in the day",
            Self::UnfamiliarStaff => "Substitute teacher or unfamiliar staff",
        }
    }
}

impl_category_traits!(SettingEventCategory);

/// Events that reliably follow the target behavior
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub enum ConsequenceCategory {
    PeerAttention,
    AdultAttention,
    TaskRemoval,
    SentOut,
    LossOfPrivileges,
    PreferredAccess,
    PeerWithdrawal,
    PhysicalEscort,
}

impl Category for ConsequenceCategory {
    const KIND: &'static str = "consequence";

    const ALL: &'static [Self] = &[
        Self::PeerAttention,
        Self::AdultAttention,
        Self::TaskRemoval,
        Self::SentOut,
        Self::LossOfPrivileges,
        Self::PreferredAccess,
        Self::PeerWithdrawal,
        Self::PhysicalEscort,
    ];

    fn label(&self) -> &'static str {
        match self {
            Self::PeerAttention => "Peer attention (laughter, reactions)",
            Self::AdultAttention => "Adult attention (reprimands, discussions)",
            Self::TaskRemoval => "Removal from the task or activity",
            Self::SentOut => "Sent to the office / removed from class",
            Self::LossOfPrivileges => "Loss of privileges",
            Self::PreferredAccess => "Access to preferred item/activity",
            Self::PeerWithdrawal => "Peer withdrawal / isolation",
            Self::PhysicalEscort => "Physical restraint or escort",
        }
    }
}

impl_category_traits!(ConsequenceCategory);

/// Reinforcement class maintaining the behavior
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub enum BehaviorFunction {
    Attention,
    Escape,
    Tangible,
    Sensory,
}

impl BehaviorFunction {
    /// Phrase used when describing this function in the plan narrative
    pub fn description(&self) -> &'static str {
        match self {
            Self::Attention => "attention",
            Self::Escape => "escape/avoidance",
            Self::Tangible => "access to tangible items/activities",
            Self::Sensory => "sensory regulation",
        }
    }
}

impl Category for BehaviorFunction {
    const KIND: &'static str = "function";

    const ALL: &'static [Self] = &[Self::Attention, Self::Escape, Self::Tangible, Self::Sensory];

    fn label(&self) -> &'static str {
        match self {
            Self::Attention => "attention",
            Self::Escape => "escape",
            Self::Tangible => "tangible",
            Self::Sensory => "sensory",
        }
    }
}

impl_category_traits!(BehaviorFunction);

/// Data-collection methods with procedure statements in the knowledge tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub enum DataCollectionMethod {
    AbcData,
    FrequencyCount,
    DurationRecording,
    IntervalRecording,
}

impl Category for DataCollectionMethod {
    const KIND: &'static str = "data-collection method";

    const ALL: &'static [Self] = &[
        Self::AbcData,
        Self::FrequencyCount,
        Self::DurationRecording,
        Self::IntervalRecording,
    ];

    fn label(&self) -> &'static str {
        match self {
            Self::AbcData => "ABC data collection",
            Self::FrequencyCount => "Frequency count",
            Self::DurationRecording => "Duration recording",
            Self::IntervalRecording => "Interval recording",
        }
    }
}

impl_category_traits!(DataCollectionMethod);

/// Observed intensity of a target behavior
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Deserialize)]
#[serde(try_from = "String")]
pub enum Intensity {
    Low,
    #[default]
    Moderate,
    High,
}

impl Category for Intensity {
    const KIND: &'static str = "intensity";

    const ALL: &'static [Self] = &[Self::Low, Self::Moderate, Self::High];

    fn label(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Moderate => "moderate",
            Self::High => "high",
        }
    }
}

impl_category_traits!(Intensity);

/// One entry of an observed category set: a known category or user-entered text
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry<C> {
    Known(C),
    Custom(String),
}

/// Categories selected in the wizard plus an optional free-text addition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound(
    serialize = "C: Serialize",
    deserialize = "C: Deserialize<'de>"
))]
pub struct Observed<C> {
    /// Known categories, in selection order
    #[serde(default = "Vec::new")]
    pub selected: Vec<C>,

    /// Free-text addition typed by the user
    #[serde(default)]
    pub custom: String,
}

impl<C> Default for Observed<C> {
    fn default() -> Self {
        Self {
            selected: Vec::new(),
            custom: String::new(),
        }
    }
}

impl<C: Copy> Observed<C> {
    pub fn new(selected: Vec<C>, custom: impl Into<String>) -> Self {
        Self {
            selected,
            custom: custom.into(),
        }
    }

    /// Trimmed custom text, if any was entered
    pub fn custom_text(&self) -> Option<&str> {
        let text = self.custom.trim();
        if text.is_empty() { None } else { Some(text) }
    }

    /// True when neither a category nor custom text is present
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty() && self.custom_text().is_none()
    }

    /// Selected categories in order, followed by the custom text if present
    pub fn entries(&self) -> Vec<Entry<C>> {
        let mut entries: Vec<Entry<C>> = self.selected.iter().copied().map(Entry::Known).collect();
        if let Some(text) = self.custom_text() {
            entries.push(Entry::Custom(text.to_string()));
        }
        entries
    }
}
