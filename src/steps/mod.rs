//! Onboarding steps
//!
//! Each step is a serde struct whose JSON shape is the step's declared field
//! set, plus a validator and a field description used to prompt for it.

pub mod ancestry;
pub mod education;
pub mod family;
pub mod general;
pub mod money;
pub mod work;

pub use ancestry::{Ancestry, Relative};
pub use education::Education;
pub use family::Family;
pub use general::GeneralInfo;
pub use money::Money;
pub use work::Work;

use std::fmt;
use std::str::FromStr;

use crate::error::WizardError;
use crate::form::{StepData, StepDraft, ValidationErrors};

/// Message used for unanswered single-choice questions
pub const SELECT_AN_OPTION: &str = "Please select an option";

/// How a field is answered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Free text
    Text,
    /// Free text holding a number
    Number,
    /// One of a fixed set of options
    Choice(&'static [&'static str]),
    /// "Yes" or "No"
    YesNo,
    /// true / false
    Flag,
    /// Several free-text values
    MultiSelect,
    /// A list of records with the given sub-fields
    List(&'static [&'static str]),
}

/// Description of one field in a step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
}

impl FieldSpec {
    pub const fn new(name: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self { name, label, kind }
    }
}

/// A wizard step with its defaults, fields and validation rules
pub trait OnboardingStep: StepData + Default {
    /// Step key, also the draft store key suffix
    const KEY: &'static str;
    /// Heading shown to the user
    const TITLE: &'static str;

    /// Fields in prompt order
    fn fields() -> &'static [FieldSpec];

    /// Validate a draft of this step
    fn validate(draft: &StepDraft) -> ValidationErrors;

    /// Whether a field applies given the answers so far
    fn is_asked(_field: &str, _draft: &StepDraft) -> bool {
        true
    }
}

/// The onboarding steps in wizard order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StepKind {
    GeneralInfo,
    Family,
    Education,
    Work,
    Money,
    Ancestry,
}

impl StepKind {
    /// Every step, in the order the wizard visits them
    pub const ALL: [StepKind; 6] = [
        StepKind::GeneralInfo,
        StepKind::Family,
        StepKind::Education,
        StepKind::Work,
        StepKind::Money,
        StepKind::Ancestry,
    ];

    /// Step key
    pub fn key(self) -> &'static str {
        match self {
            Self::GeneralInfo => GeneralInfo::KEY,
            Self::Family => Family::KEY,
            Self::Education => Education::KEY,
            Self::Work => Work::KEY,
            Self::Money => Money::KEY,
            Self::Ancestry => Ancestry::KEY,
        }
    }

    /// Step heading
    pub fn title(self) -> &'static str {
        match self {
            Self::GeneralInfo => GeneralInfo::TITLE,
            Self::Family => Family::TITLE,
            Self::Education => Education::TITLE,
            Self::Work => Work::TITLE,
            Self::Money => Money::TITLE,
            Self::Ancestry => Ancestry::TITLE,
        }
    }

    /// Field descriptions for the step
    pub fn fields(self) -> &'static [FieldSpec] {
        match self {
            Self::GeneralInfo => GeneralInfo::fields(),
            Self::Family => Family::fields(),
            Self::Education => Education::fields(),
            Self::Work => Work::fields(),
            Self::Money => Money::fields(),
            Self::Ancestry => Ancestry::fields(),
        }
    }

    /// Position in the wizard, starting at 0
    pub fn index(self) -> usize {
        Self::ALL
            .iter()
            .position(|s| *s == self)
            .unwrap_or_default()
    }

    /// The step after this one
    pub fn next(self) -> Option<Self> {
        Self::ALL.get(self.index() + 1).copied()
    }

    /// The step before this one
    pub fn previous(self) -> Option<Self> {
        self.index().checked_sub(1).and_then(|i| Self::ALL.get(i).copied())
    }
}

impl fmt::Display for StepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl FromStr for StepKind {
    type Err = WizardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace(['-', '_', ' '], "");
        Self::ALL
            .iter()
            .copied()
            .find(|step| step.key().replace('_', "") == wanted)
            .ok_or_else(|| WizardError::unknown_step(s))
    }
}

/// True if `value` parses as a non-negative number
pub(crate) fn is_amount(value: &str) -> bool {
    value
        .trim()
        .replace(',', "")
        .parse::<f64>()
        .map(|n| n.is_finite() && n >= 0.0)
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_order() {
        assert_eq!(StepKind::GeneralInfo.next(), Some(StepKind::Family));
        assert_eq!(StepKind::Ancestry.next(), None);
        assert_eq!(StepKind::GeneralInfo.previous(), None);
        assert_eq!(StepKind::Money.previous(), Some(StepKind::Work));
        assert_eq!(StepKind::Ancestry.index(), 5);
    }

    #[test]
    fn test_parse_step_names() {
        assert_eq!("family".parse::<StepKind>().unwrap(), StepKind::Family);
        assert_eq!("General-Info".parse::<StepKind>().unwrap(), StepKind::GeneralInfo);
        assert_eq!("general_info".parse::<StepKind>().unwrap(), StepKind::GeneralInfo);
        assert!("pets".parse::<StepKind>().is_err());
    }

    #[test]
    fn test_keys_are_unique() {
        let mut keys: Vec<_> = StepKind::ALL.iter().map(|s| s.key()).collect();
        keys.sort();
        keys.dedup();
        assert_eq!(keys.len(), StepKind::ALL.len());
    }

    #[test]
    fn test_field_specs_match_defaults() {
        fn check<S: OnboardingStep>() {
            let draft = StepDraft::from_data(&S::default()).unwrap();
            let declared: Vec<_> = draft.field_names().collect();
            let described: Vec<_> = S::fields().iter().map(|f| f.name).collect();
            assert_eq!(declared, described, "field mismatch in {}", S::KEY);
        }

        check::<GeneralInfo>();
        check::<Family>();
        check::<Education>();
        check::<Work>();
        check::<Money>();
        check::<Ancestry>();
    }

    #[test]
    fn test_is_amount() {
        assert!(is_amount("1200"));
        assert!(is_amount("1,200.50"));
        assert!(!is_amount("-5"));
        assert!(!is_amount("lots"));
        assert!(!is_amount(""));
    }
}
