//! Form domain layer
//!
//! Static step table, typed form values, and the validation rules that
//! gate each step of the registration wizard.

mod field;
mod form_state;
mod steps;
mod validator;

pub use field::{ChoiceOption, FieldKind, FieldName, FieldSpec, FieldValue};
pub use form_state::{cycle_option, FormValues, StepFocus};
pub use steps::{StepDefinition, WizardStep, ORGANISATION_TYPES, STEPS};
pub use validator::{
    is_pin_code, validate_all, validate_field, validate_step, FieldErrors, AADHAAR_MESSAGE,
    CITY_MESSAGE, CONSENT_MESSAGE, NAME_MESSAGE, ORGANISATION_MESSAGE, PAN_MESSAGE, PIN_MESSAGE,
    STATE_MESSAGE,
};
