//! Money step

use serde::{Deserialize, Serialize};

use super::{is_amount, FieldKind, FieldSpec, OnboardingStep};
use crate::form::{StepDraft, ValidationErrors};

const FIELDS: &[FieldSpec] = &[
    FieldSpec::new("monthlyIncome", "Monthly income", FieldKind::Number),
    FieldSpec::new("savings", "Savings", FieldKind::Number),
    FieldSpec::new("currency", "Currency", FieldKind::Text),
];

/// Income and savings, used for means-tested visas
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Money {
    pub monthly_income: String,
    pub savings: String,
    pub currency: String,
}

impl Default for Money {
    fn default() -> Self {
        Self {
            monthly_income: String::new(),
            savings: String::new(),
            currency: "EUR".to_string(),
        }
    }
}

fn check_amount(errors: &mut ValidationErrors, draft: &StepDraft, field: &str) {
    match draft.text(field) {
        Some(value) if is_amount(value) => {}
        Some(value) if !value.trim().is_empty() => {
            errors.insert(field, "Please enter a valid amount");
        }
        _ => errors.insert(field, "Please enter an amount"),
    }
}

impl OnboardingStep for Money {
    const KEY: &'static str = "money";
    const TITLE: &'static str = "Money";

    fn fields() -> &'static [FieldSpec] {
        FIELDS
    }

    fn validate(draft: &StepDraft) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        check_amount(&mut errors, draft, "monthlyIncome");
        check_amount(&mut errors, draft, "savings");

        match draft.text("currency").map(str::trim) {
            Some(code) if code.len() == 3 && code.chars().all(|c| c.is_ascii_alphabetic()) => {}
            _ => errors.insert("currency", "Please enter a three-letter currency code"),
        }

        errors
    }
}
