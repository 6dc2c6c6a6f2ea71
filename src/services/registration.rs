//! Final registration submission
//!
//! Re-checks the whole value set before anything reaches the store, drops
//! the consent flags, and words failures the way the user sees them.

use super::traits::{RegistrationStore, StoreError};
use crate::state::{validate_all, FormValues, Receipt, RegistrationRecord};
use thiserror::Error;

pub const SUBMITTED_MESSAGE: &str = "Registration submitted successfully!";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SubmissionError {
    #[error("Invalid data submitted.")]
    Invalid,
    #[error("Database error: {0}")]
    Database(String),
}

/// Validate and persist a completed registration
pub async fn submit_registration(
    store: &dyn RegistrationStore,
    values: &FormValues,
) -> Result<Receipt, SubmissionError> {
    if let Err(errors) = validate_all(values) {
        tracing::error!(?errors, "submission failed server-side validation");
        return Err(SubmissionError::Invalid);
    }

    let record = RegistrationRecord::from(values);
    store.insert(&record).await.map_err(|e| {
        match &e {
            StoreError::Rejected { status, .. } => {
                tracing::error!(status, error = %e, "registration insert rejected")
            }
            _ => tracing::error!(error = %e, "registration insert failed"),
        }
        SubmissionError::Database(e.to_string())
    })?;

    Ok(Receipt::new(SUBMITTED_MESSAGE))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::traits::MockRegistrationStore;
    use pretty_assertions::assert_eq;

    fn valid_values() -> FormValues {
        FormValues {
            aadhaar_number: "123456789012".into(),
            name: "Test User".into(),
            terms: true,
            organisation_type: "1".into(),
            pan_number: "ABCDE1234F".into(),
            pan_terms: true,
            pin_code: "110001".into(),
            state: "Delhi".into(),
            city: "New Delhi".into(),
        }
    }

    #[tokio::test]
    async fn test_valid_values_are_inserted() {
        let mut store = MockRegistrationStore::new();
        store
            .expect_insert()
            .withf(|record| record.pan_number == "ABCDE1234F" && record.city == "New Delhi")
            .times(1)
            .returning(|_| Ok(()));

        let receipt = submit_registration(&store, &valid_values()).await.unwrap();
        assert_eq!(receipt.message, SUBMITTED_MESSAGE);
    }

    #[tokio::test]
    async fn test_invalid_values_never_reach_store() {
        let mut store = MockRegistrationStore::new();
        store.expect_insert().times(0);

        let values = FormValues {
            aadhaar_number: "123".into(),
            name: "Test".into(),
            organisation_type: "1".into(),
            pan_number: "INVALID".into(),
            pin_code: "123".into(),
            ..Default::default()
        };
        let err = submit_registration(&store, &values).await.unwrap_err();
        assert_eq!(err.to_string(), "Invalid data submitted.");
    }

    #[tokio::test]
    async fn test_store_failure_is_prefixed() {
        let mut store = MockRegistrationStore::new();
        store.expect_insert().returning(|_| {
            Err(StoreError::Rejected {
                status: 500,
                message: "X".into(),
            })
        });

        let err = submit_registration(&store, &valid_values()).await.unwrap_err();
        assert_eq!(err, SubmissionError::Database("X".into()));
        assert_eq!(err.to_string(), "Database error: X");
    }
}
