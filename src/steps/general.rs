//! General information step

use serde::{Deserialize, Serialize};

use super::{FieldKind, FieldSpec, OnboardingStep, SELECT_AN_OPTION};
use crate::form::{StepDraft, ValidationErrors};

/// Reasons for relocating
pub const PURPOSES: &[&str] = &["Work", "Study", "Family", "Retirement", "Investment"];

const FIELDS: &[FieldSpec] = &[
    FieldSpec::new("fullName", "Full name", FieldKind::Text),
    FieldSpec::new("nationality", "Nationality", FieldKind::Text),
    FieldSpec::new("currentCountry", "Country of residence", FieldKind::Text),
    FieldSpec::new("destinationCountry", "Destination country", FieldKind::Text),
    FieldSpec::new("purpose", "Reason for moving", FieldKind::Choice(PURPOSES)),
];

/// Who is moving, from where, to where and why
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneralInfo {
    pub full_name: String,
    pub nationality: String,
    pub current_country: String,
    pub destination_country: String,
    pub purpose: String,
}

impl OnboardingStep for GeneralInfo {
    const KEY: &'static str = "general_info";
    const TITLE: &'static str = "General Information";

    fn fields() -> &'static [FieldSpec] {
        FIELDS
    }

    fn validate(draft: &StepDraft) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        errors.require(draft, "fullName", "Please enter your full name");
        errors.require(draft, "nationality", "Please enter your nationality");
        errors.require(draft, "currentCountry", "Please enter where you live now");
        errors.require(draft, "destinationCountry", "Please enter where you want to move");
        errors.require(draft, "purpose", SELECT_AN_OPTION);

        if let (Some(from), Some(to)) = (draft.text("currentCountry"), draft.text("destinationCountry")) {
            if !to.trim().is_empty() && from.trim().eq_ignore_ascii_case(to.trim()) {
                errors.insert(
                    "destinationCountry",
                    "Destination must differ from your current country",
                );
            }
        }

        errors
    }
}
