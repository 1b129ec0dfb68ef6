//! Family step

use serde::{Deserialize, Serialize};

use super::{FieldKind, FieldSpec, OnboardingStep, SELECT_AN_OPTION};
use crate::form::{StepDraft, ValidationErrors};

const FIELDS: &[FieldSpec] = &[
    FieldSpec::new("hasPartner", "Do you have a partner?", FieldKind::YesNo),
    FieldSpec::new(
        "partnerNationality",
        "Partner nationalities",
        FieldKind::MultiSelect,
    ),
    FieldSpec::new("hasChildren", "Do you have children?", FieldKind::Flag),
];

/// Partner and children moving along
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Family {
    /// "Yes", "No", or empty while unanswered
    pub has_partner: String,
    pub partner_nationality: Vec<String>,
    pub has_children: bool,
}

impl OnboardingStep for Family {
    const KEY: &'static str = "family";
    const TITLE: &'static str = "Family";

    fn fields() -> &'static [FieldSpec] {
        FIELDS
    }

    fn validate(draft: &StepDraft) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        errors.require(draft, "hasPartner", SELECT_AN_OPTION);

        if draft.text("hasPartner") == Some("Yes") {
            errors.require(
                draft,
                "partnerNationality",
                "Please add your partner's nationality",
            );
        }

        errors
    }

    fn is_asked(field: &str, draft: &StepDraft) -> bool {
        field != "partnerNationality" || draft.text("hasPartner") == Some("Yes")
    }
}
