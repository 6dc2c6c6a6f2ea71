//! Step validation rules
//!
//! Rules are fixed and keyed by field. Each rule yields at most one message,
//! so the error map holds a single message per failing field.

use super::field::FieldName;
use super::form_state::FormValues;
use super::steps::{WizardStep, ORGANISATION_TYPES, STEPS};
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::LazyLock;

/// Field name to human-readable message
pub type FieldErrors = BTreeMap<FieldName, String>;

pub const AADHAAR_MESSAGE: &str = "Aadhaar number must be 12 digits.";
pub const NAME_MESSAGE: &str = "Name must be at least 2 characters.";
pub const CONSENT_MESSAGE: &str = "You must give your consent.";
pub const ORGANISATION_MESSAGE: &str = "Please select an organisation type.";
pub const PAN_MESSAGE: &str = "Invalid PAN number format.";
pub const PIN_MESSAGE: &str = "PIN code must be 6 digits.";
pub const STATE_MESSAGE: &str = "State is required.";
pub const CITY_MESSAGE: &str = "City is required.";

static AADHAAR_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]{12}$").unwrap());
static PAN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z]{5}[0-9]{4}[A-Z]$").unwrap());
static PIN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]{6}$").unwrap());

/// Exactly six ASCII digits
pub fn is_pin_code(value: &str) -> bool {
    PIN_RE.is_match(value)
}

/// Validate a single field against the full value set
pub fn validate_field(field: FieldName, values: &FormValues) -> Option<String> {
    let failed = match field {
        FieldName::AadhaarNumber => !AADHAAR_RE.is_match(&values.aadhaar_number),
        FieldName::Name => values.name.chars().count() < 2,
        FieldName::Terms => !values.terms,
        FieldName::OrganisationType => !ORGANISATION_TYPES
            .iter()
            .any(|o| o.value == values.organisation_type),
        FieldName::PanNumber => !PAN_RE.is_match(&values.pan_number),
        FieldName::PinCode => !is_pin_code(&values.pin_code),
        FieldName::State => values.state.is_empty(),
        FieldName::City => values.city.is_empty(),
        FieldName::PanTerms | FieldName::Spacer => false,
    };

    failed.then(|| message_for(field).to_string())
}

fn message_for(field: FieldName) -> &'static str {
    match field {
        FieldName::AadhaarNumber => AADHAAR_MESSAGE,
        FieldName::Name => NAME_MESSAGE,
        FieldName::Terms => CONSENT_MESSAGE,
        FieldName::OrganisationType => ORGANISATION_MESSAGE,
        FieldName::PanNumber => PAN_MESSAGE,
        FieldName::PinCode => PIN_MESSAGE,
        FieldName::State => STATE_MESSAGE,
        FieldName::City => CITY_MESSAGE,
        FieldName::PanTerms | FieldName::Spacer => "",
    }
}

/// Validate the required fields of one step
pub fn validate_step(step: WizardStep, values: &FormValues) -> Result<(), FieldErrors> {
    let Some(definition) = step.definition() else {
        return Ok(());
    };
    collect(definition.required.iter().copied(), values)
}

/// Validate every step's required fields at once
pub fn validate_all(values: &FormValues) -> Result<(), FieldErrors> {
    collect(
        STEPS.iter().flat_map(|s| s.required.iter().copied()),
        values,
    )
}

fn collect(fields: impl Iterator<Item = FieldName>, values: &FormValues) -> Result<(), FieldErrors> {
    let errors: FieldErrors = fields
        .filter_map(|f| validate_field(f, values).map(|msg| (f, msg)))
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
