//! Education step

use serde::{Deserialize, Serialize};

use super::{FieldKind, FieldSpec, OnboardingStep, SELECT_AN_OPTION};
use crate::form::{StepDraft, ValidationErrors};

/// Highest completed education levels
pub const LEVELS: &[&str] = &[
    "High school",
    "Vocational",
    "Bachelor's",
    "Master's",
    "Doctorate",
];

const FIELDS: &[FieldSpec] = &[
    FieldSpec::new("highestLevel", "Highest completed level", FieldKind::Choice(LEVELS)),
    FieldSpec::new("fieldOfStudy", "Field of study", FieldKind::Text),
    FieldSpec::new("languages", "Languages you speak", FieldKind::MultiSelect),
];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Education {
    pub highest_level: String,
    pub field_of_study: String,
    pub languages: Vec<String>,
}

impl OnboardingStep for Education {
    const KEY: &'static str = "education";
    const TITLE: &'static str = "Education";

    fn fields() -> &'static [FieldSpec] {
        FIELDS
    }

    fn validate(draft: &StepDraft) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        errors.require(draft, "highestLevel", SELECT_AN_OPTION);

        let degree = matches!(
            draft.text("highestLevel"),
            Some("Bachelor's" | "Master's" | "Doctorate")
        );
        if degree {
            errors.require(draft, "fieldOfStudy", "Please enter your field of study");
        }

        errors.require(draft, "languages", "Please add at least one language");
        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_degree_requires_field_of_study() {
        let education = Education {
            highest_level: "Master's".into(),
            field_of_study: String::new(),
            languages: vec!["English".into()],
        };
        let draft = StepDraft::from_data(&education).unwrap();

        let errors = Education::validate(&draft);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get("fieldOfStudy"), Some("Please enter your field of study"));
    }

    #[test]
    fn test_high_school_without_field_is_valid() {
        let education = Education {
            highest_level: "High school".into(),
            field_of_study: String::new(),
            languages: vec!["Spanish".into()],
        };
        let draft = StepDraft::from_data(&education).unwrap();
        assert!(Education::validate(&draft).is_empty());
    }
}
