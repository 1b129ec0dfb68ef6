//! Work step

use serde::{Deserialize, Serialize};

use super::{is_amount, FieldKind, FieldSpec, OnboardingStep, SELECT_AN_OPTION};
use crate::form::{StepDraft, ValidationErrors};

pub const EMPLOYMENT_STATUSES: &[&str] = &[
    "Employed",
    "Self-employed",
    "Unemployed",
    "Student",
    "Retired",
];

const FIELDS: &[FieldSpec] = &[
    FieldSpec::new(
        "employmentStatus",
        "Employment status",
        FieldKind::Choice(EMPLOYMENT_STATUSES),
    ),
    FieldSpec::new("occupation", "Occupation", FieldKind::Text),
    FieldSpec::new("yearsOfExperience", "Years of experience", FieldKind::Number),
    FieldSpec::new("hasJobOffer", "Do you have a job offer abroad?", FieldKind::YesNo),
];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Work {
    pub employment_status: String,
    pub occupation: String,
    pub years_of_experience: String,
    pub has_job_offer: String,
}

impl OnboardingStep for Work {
    const KEY: &'static str = "work";
    const TITLE: &'static str = "Work";

    fn fields() -> &'static [FieldSpec] {
        FIELDS
    }

    fn validate(draft: &StepDraft) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        errors.require(draft, "employmentStatus", SELECT_AN_OPTION);

        if matches!(
            draft.text("employmentStatus"),
            Some("Employed" | "Self-employed")
        ) {
            errors.require(draft, "occupation", "Please enter your occupation");
        }

        match draft.text("yearsOfExperience") {
            Some(years) if !years.trim().is_empty() && !is_amount(years) => {
                errors.insert("yearsOfExperience", "Please enter a number");
            }
            _ => {}
        }

        errors.require(draft, "hasJobOffer", SELECT_AN_OPTION);
        errors
    }
}
