//! Form values and focus tracking

use super::field::{FieldKind, FieldName, FieldSpec, FieldValue};
use super::steps::StepDefinition;

/// Every value entered across the three steps
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormValues {
    pub aadhaar_number: String,
    pub name: String,
    pub terms: bool,
    pub organisation_type: String,
    pub pan_number: String,
    pub pan_terms: bool,
    pub pin_code: String,
    pub state: String,
    pub city: String,
}

impl FormValues {
    /// Read a value by field name
    pub fn get(&self, field: FieldName) -> FieldValue {
        match field {
            FieldName::AadhaarNumber => FieldValue::Text(self.aadhaar_number.clone()),
            FieldName::Name => FieldValue::Text(self.name.clone()),
            FieldName::Terms => FieldValue::Flag(self.terms),
            FieldName::OrganisationType => FieldValue::Text(self.organisation_type.clone()),
            FieldName::PanNumber => FieldValue::Text(self.pan_number.clone()),
            FieldName::PanTerms => FieldValue::Flag(self.pan_terms),
            FieldName::PinCode => FieldValue::Text(self.pin_code.clone()),
            FieldName::State => FieldValue::Text(self.state.clone()),
            FieldName::City => FieldValue::Text(self.city.clone()),
            FieldName::Spacer => FieldValue::default(),
        }
    }

    /// Mutable access to a text field, `None` for flags and the spacer
    pub fn text_mut(&mut self, field: FieldName) -> Option<&mut String> {
        match field {
            FieldName::AadhaarNumber => Some(&mut self.aadhaar_number),
            FieldName::Name => Some(&mut self.name),
            FieldName::OrganisationType => Some(&mut self.organisation_type),
            FieldName::PanNumber => Some(&mut self.pan_number),
            FieldName::PinCode => Some(&mut self.pin_code),
            FieldName::State => Some(&mut self.state),
            FieldName::City => Some(&mut self.city),
            FieldName::Terms | FieldName::PanTerms | FieldName::Spacer => None,
        }
    }

    /// Mutable access to a flag field, `None` for text fields
    pub fn flag_mut(&mut self, field: FieldName) -> Option<&mut bool> {
        match field {
            FieldName::Terms => Some(&mut self.terms),
            FieldName::PanTerms => Some(&mut self.pan_terms),
            _ => None,
        }
    }

    /// Reset the auto-filled address fields
    pub fn clear_address(&mut self) {
        self.city.clear();
        self.state.clear();
    }
}

/// Keyboard focus within the current step.
///
/// Index `focusable.len()` is the submit button row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepFocus {
    pub active_index: usize,
}

impl StepFocus {
    fn slot_count(definition: &StepDefinition) -> usize {
        definition.focusable_fields().len() + 1
    }

    pub fn next(&mut self, definition: &StepDefinition) {
        let count = Self::slot_count(definition);
        self.active_index = (self.active_index + 1) % count;
    }

    pub fn prev(&mut self, definition: &StepDefinition) {
        let count = Self::slot_count(definition);
        if self.active_index == 0 {
            self.active_index = count - 1;
        } else {
            self.active_index -= 1;
        }
    }

    /// Field under focus, `None` when the button row is active
    pub fn active_field<'a>(&self, definition: &'a StepDefinition) -> Option<&'a FieldSpec> {
        definition.focusable_fields().get(self.active_index).copied()
    }

    pub fn is_button_active(&self, definition: &StepDefinition) -> bool {
        self.active_index + 1 == Self::slot_count(definition)
    }

    pub fn is_active(&self, definition: &StepDefinition, field: FieldName) -> bool {
        self.active_field(definition).is_some_and(|f| f.name == field)
    }

    pub fn reset(&mut self) {
        self.active_index = 0;
    }
}

/// Option value adjacent to `current` in a radio field, wrapping around
pub fn cycle_option(spec: &FieldSpec, current: &str, forward: bool) -> Option<&'static str> {
    let FieldKind::Radio { options } = spec.kind else {
        return None;
    };
    if options.is_empty() {
        return None;
    }

    let position = options.iter().position(|o| o.value == current);
    let index = match (position, forward) {
        (None, true) => 0,
        (None, false) => options.len() - 1,
        (Some(i), true) => (i + 1) % options.len(),
        (Some(0), false) => options.len() - 1,
        (Some(i), false) => i - 1,
    };
    Some(options[index].value)
}
