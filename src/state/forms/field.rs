//! Form field value objects

use serde::Serialize;
use std::fmt;

/// Every field the wizard knows about, across all steps
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum FieldName {
    #[serde(rename = "aadhaarnumber")]
    AadhaarNumber,
    #[serde(rename = "name")]
    Name,
    #[serde(rename = "terms")]
    Terms,
    #[serde(rename = "organisationtype")]
    OrganisationType,
    #[serde(rename = "pannumber")]
    PanNumber,
    #[serde(rename = "panTerms")]
    PanTerms,
    #[serde(rename = "pincode")]
    PinCode,
    #[serde(rename = "state")]
    State,
    #[serde(rename = "city")]
    City,
    /// Cosmetic layout filler; holds no value
    #[serde(rename = "spacer")]
    Spacer,
}

impl FieldName {
    /// Wire name used by the registration store
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AadhaarNumber => "aadhaarnumber",
            Self::Name => "name",
            Self::Terms => "terms",
            Self::OrganisationType => "organisationtype",
            Self::PanNumber => "pannumber",
            Self::PanTerms => "panTerms",
            Self::PinCode => "pincode",
            Self::State => "state",
            Self::City => "city",
            Self::Spacer => "spacer",
        }
    }

    pub fn is_spacer(&self) -> bool {
        matches!(self, Self::Spacer)
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One selectable option of a radio field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChoiceOption {
    pub value: &'static str,
    pub label: &'static str,
}

/// How a field is presented and edited
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text {
        placeholder: &'static str,
        /// Auto-filled fields the user cannot type into
        read_only: bool,
    },
    Checkbox,
    Radio {
        options: &'static [ChoiceOption],
    },
}

/// Static render spec of a single field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: FieldName,
    pub label: &'static str,
    pub kind: FieldKind,
}

impl FieldSpec {
    pub const fn text(name: FieldName, label: &'static str, placeholder: &'static str) -> Self {
        Self {
            name,
            label,
            kind: FieldKind::Text {
                placeholder,
                read_only: false,
            },
        }
    }

    pub const fn read_only(name: FieldName, label: &'static str, placeholder: &'static str) -> Self {
        Self {
            name,
            label,
            kind: FieldKind::Text {
                placeholder,
                read_only: true,
            },
        }
    }

    pub const fn checkbox(name: FieldName, label: &'static str) -> Self {
        Self {
            name,
            label,
            kind: FieldKind::Checkbox,
        }
    }

    pub const fn radio(
        name: FieldName,
        label: &'static str,
        options: &'static [ChoiceOption],
    ) -> Self {
        Self {
            name,
            label,
            kind: FieldKind::Radio { options },
        }
    }

    pub const fn spacer() -> Self {
        Self {
            name: FieldName::Spacer,
            label: "",
            kind: FieldKind::Text {
                placeholder: "",
                read_only: true,
            },
        }
    }

    /// Whether keyboard focus may land on this field
    pub fn is_focusable(&self) -> bool {
        !self.name.is_spacer() && !self.is_read_only()
    }

    pub fn is_read_only(&self) -> bool {
        matches!(self.kind, FieldKind::Text { read_only: true, .. })
    }

    /// Label of the option whose value matches, if this is a radio field
    pub fn option_label(&self, value: &str) -> Option<&'static str> {
        match self.kind {
            FieldKind::Radio { options } => options
                .iter()
                .find(|o| o.value == value)
                .map(|o| o.label),
            _ => None,
        }
    }
}

/// Type-safe field values
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Flag(bool),
}

impl Default for FieldValue {
    fn default() -> Self {
        FieldValue::Text(String::new())
    }
}

impl FieldValue {
    /// Get the text value (returns empty string for flags)
    pub fn as_text(&self) -> &str {
        match self {
            FieldValue::Text(s) => s,
            FieldValue::Flag(_) => "",
        }
    }

    /// Get the flag value (returns false for text)
    pub fn as_flag(&self) -> bool {
        match self {
            FieldValue::Flag(b) => *b,
            FieldValue::Text(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_names_match_serde() {
        for name in [
            FieldName::AadhaarNumber,
            FieldName::PanTerms,
            FieldName::OrganisationType,
            FieldName::Spacer,
        ] {
            let json = serde_json::to_string(&name).unwrap();
            assert_eq!(json, format!("\"{}\"", name.as_str()));
        }
    }

    #[test]
    fn test_spacer_is_not_focusable() {
        assert!(!FieldSpec::spacer().is_focusable());
    }

    #[test]
    fn test_read_only_is_not_focusable() {
        let spec = FieldSpec::read_only(FieldName::City, "City", "");
        assert!(spec.is_read_only());
        assert!(!spec.is_focusable());
    }

    #[test]
    fn test_checkbox_is_focusable() {
        let spec = FieldSpec::checkbox(FieldName::Terms, "Consent");
        assert!(spec.is_focusable());
        assert!(!spec.is_read_only());
    }

    #[test]
    fn test_option_label() {
        const OPTS: &[ChoiceOption] = &[ChoiceOption {
            value: "1",
            label: "Proprietary",
        }];
        let spec = FieldSpec::radio(FieldName::OrganisationType, "Type", OPTS);
        assert_eq!(spec.option_label("1"), Some("Proprietary"));
        assert_eq!(spec.option_label("2"), None);
        assert_eq!(
            FieldSpec::text(FieldName::Name, "Name", "").option_label("1"),
            None
        );
    }

    #[test]
    fn test_field_value_accessors() {
        assert_eq!(FieldValue::Text("abc".into()).as_text(), "abc");
        assert!(!FieldValue::Text("abc".into()).as_flag());
        assert!(FieldValue::Flag(true).as_flag());
        assert_eq!(FieldValue::Flag(true).as_text(), "");
        assert_eq!(FieldValue::default(), FieldValue::Text(String::new()));
    }
}
