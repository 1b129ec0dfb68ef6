//! Ancestry step
//!
//! Relatives whose nationality may give a claim to citizenship by descent.

use serde::{Deserialize, Serialize};

use super::{FieldKind, FieldSpec, OnboardingStep, SELECT_AN_OPTION};
use crate::form::{StepDraft, ValidationErrors};

/// Sub-fields of a relative entry
pub const RELATIVE_FIELDS: &[&str] = &["relative", "passport"];

const FIELDS: &[FieldSpec] = &[
    FieldSpec::new(
        "hasAncestry",
        "Do you have parents or grandparents of another nationality?",
        FieldKind::YesNo,
    ),
    FieldSpec::new("relatives", "Relatives", FieldKind::List(RELATIVE_FIELDS)),
];

/// A relative and the passport they hold
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Relative {
    pub relative: String,
    pub passport: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ancestry {
    pub has_ancestry: String,
    pub relatives: Vec<Relative>,
}

impl OnboardingStep for Ancestry {
    const KEY: &'static str = "ancestry";
    const TITLE: &'static str = "Ancestry";

    fn fields() -> &'static [FieldSpec] {
        FIELDS
    }

    fn validate(draft: &StepDraft) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        errors.require(draft, "hasAncestry", SELECT_AN_OPTION);

        if draft.text("hasAncestry") != Some("Yes") {
            return errors;
        }

        let relatives = draft.array("relatives").map(Vec::as_slice).unwrap_or_default();
        if relatives.is_empty() {
            errors.insert("relatives", "Please add at least one relative");
            return errors;
        }

        let incomplete = relatives.iter().any(|entry| {
            RELATIVE_FIELDS.iter().any(|field| {
                entry
                    .get(field)
                    .and_then(|v| v.as_str())
                    .map_or(true, |s| s.trim().is_empty())
            })
        });
        if incomplete {
            errors.insert("relatives", "Please complete every relative");
        }

        errors
    }

    fn is_asked(field: &str, draft: &StepDraft) -> bool {
        field != "relatives" || draft.text("hasAncestry") == Some("Yes")
    }
}
