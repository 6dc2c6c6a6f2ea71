//! Records exchanged with the lookup and registration services

use super::forms::FormValues;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// City and state resolved from a PIN code
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub city: String,
    pub state: String,
}

/// Row written to the registration store. Consent flags are not persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationRecord {
    #[serde(rename = "aadhaarnumber")]
    pub aadhaar_number: String,
    pub name: String,
    #[serde(rename = "organisationtype")]
    pub organisation_type: String,
    #[serde(rename = "pannumber")]
    pub pan_number: String,
    #[serde(rename = "pincode")]
    pub pin_code: String,
    pub state: String,
    pub city: String,
}

impl From<&FormValues> for RegistrationRecord {
    fn from(values: &FormValues) -> Self {
        Self {
            aadhaar_number: values.aadhaar_number.clone(),
            name: values.name.clone(),
            organisation_type: values.organisation_type.clone(),
            pan_number: values.pan_number.clone(),
            pin_code: values.pin_code.clone(),
            state: values.state.clone(),
            city: values.city.clone(),
        }
    }
}

/// Proof of a successful submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receipt {
    pub reference: Uuid,
    pub submitted_at: DateTime<Utc>,
    pub message: String,
}

impl Receipt {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            reference: Uuid::new_v4(),
            submitted_at: Utc::now(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_record_drops_consent_and_uses_wire_names() {
        let values = FormValues {
            aadhaar_number: "123456789012".into(),
            name: "Test User".into(),
            terms: true,
            organisation_type: "1".into(),
            pan_number: "ABCDE1234F".into(),
            pan_terms: true,
            pin_code: "110001".into(),
            state: "Delhi".into(),
            city: "New Delhi".into(),
        };
        let record = RegistrationRecord::from(&values);
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(
            json,
            json!({
                "aadhaarnumber": "123456789012",
                "name": "Test User",
                "organisationtype": "1",
                "pannumber": "ABCDE1234F",
                "pincode": "110001",
                "state": "Delhi",
                "city": "New Delhi",
            })
        );
    }

    #[test]
    fn test_receipts_get_unique_references() {
        let a = Receipt::new("ok");
        let b = Receipt::new("ok");
        assert_ne!(a.reference, b.reference);
        assert_eq!(a.message, "ok");
    }
}
