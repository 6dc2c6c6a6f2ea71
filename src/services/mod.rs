//! External collaborators: address lookup, registration store, verification

mod postal;
mod registration;
mod store;
mod traits;
mod verification;

pub use postal::DEFAULT_POSTAL_API;
pub use traits::{AddressLookup, RegistrationStore, VerificationGateway};

use postal::PostalPinClient;
use registration::submit_registration;
use store::RestRegistrationStore;
use verification::SimulatedVerification;

#[cfg(test)]
pub use traits::{
    LookupError, MockAddressLookup, MockRegistrationStore, MockVerificationGateway, StoreError,
    VerificationError,
};

use crate::config::Settings;
use crate::state::{Effect, Outcome};
use anyhow::Result;
use std::sync::Arc;

/// The set of collaborators a wizard session talks to
#[derive(Clone)]
pub struct Services {
    pub lookup: Arc<dyn AddressLookup>,
    pub store: Arc<dyn RegistrationStore>,
    pub verifier: Arc<dyn VerificationGateway>,
}

impl Services {
    /// Build the production collaborators from resolved settings
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let lookup = PostalPinClient::new(&settings.postal_api_base, settings.request_timeout)?;
        let store = RestRegistrationStore::new(
            settings.registration_url.clone(),
            settings.registration_api_key.clone(),
            settings.request_timeout,
        )?;
        let verifier = SimulatedVerification::new(settings.simulated_latency);

        Ok(Self {
            lookup: Arc::new(lookup),
            store: Arc::new(store),
            verifier: Arc::new(verifier),
        })
    }

    /// Run one effect to completion
    pub async fn execute(&self, effect: Effect) -> Outcome {
        match effect {
            Effect::SendOtp { aadhaar_number } => Outcome::OtpSent(
                self.verifier
                    .send_otp(&aadhaar_number)
                    .await
                    .map_err(|e| e.to_string()),
            ),
            Effect::ConfirmOtp {
                aadhaar_number,
                code,
            } => Outcome::OtpConfirmed(
                self.verifier
                    .confirm_otp(&aadhaar_number, &code)
                    .await
                    .map_err(|e| e.to_string()),
            ),
            Effect::VerifyPan { pan_number } => Outcome::PanVerified(
                self.verifier
                    .verify_pan(&pan_number)
                    .await
                    .map_err(|e| e.to_string()),
            ),
            Effect::Submit { values } => Outcome::Submitted(
                submit_registration(self.store.as_ref(), &values)
                    .await
                    .map_err(|e| e.to_string()),
            ),
            Effect::LookupAddress {
                pin_code,
                generation,
            } => {
                let result = self
                    .lookup
                    .lookup(&pin_code)
                    .await
                    .map_err(|e| e.to_string());
                Outcome::AddressResolved {
                    pin_code,
                    generation,
                    result,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Address, FormValues};

    fn services(
        lookup: MockAddressLookup,
        store: MockRegistrationStore,
        verifier: MockVerificationGateway,
    ) -> Services {
        Services {
            lookup: Arc::new(lookup),
            store: Arc::new(store),
            verifier: Arc::new(verifier),
        }
    }

    #[tokio::test]
    async fn test_lookup_effect_carries_generation() {
        let mut lookup = MockAddressLookup::new();
        lookup.expect_lookup().returning(|_| {
            Ok(Some(Address {
                city: "New Delhi".into(),
                state: "Delhi".into(),
            }))
        });
        let services = services(
            lookup,
            MockRegistrationStore::new(),
            MockVerificationGateway::new(),
        );

        let outcome = services
            .execute(Effect::LookupAddress {
                pin_code: "110001".into(),
                generation: 7,
            })
            .await;
        assert_eq!(
            outcome,
            Outcome::AddressResolved {
                pin_code: "110001".into(),
                generation: 7,
                result: Ok(Some(Address {
                    city: "New Delhi".into(),
                    state: "Delhi".into(),
                })),
            }
        );
    }

    #[tokio::test]
    async fn test_verification_failure_becomes_message() {
        let mut verifier = MockVerificationGateway::new();
        verifier
            .expect_verify_pan()
            .returning(|_| Err(VerificationError::Rejected("PAN not found".into())));
        let services = services(
            MockAddressLookup::new(),
            MockRegistrationStore::new(),
            verifier,
        );

        let outcome = services
            .execute(Effect::VerifyPan {
                pan_number: "ABCDE1234F".into(),
            })
            .await;
        assert_eq!(outcome, Outcome::PanVerified(Err("PAN not found".into())));
    }

    #[tokio::test]
    async fn test_submit_failure_is_worded_for_user() {
        let mut store = MockRegistrationStore::new();
        store.expect_insert().returning(|_| {
            Err(StoreError::Rejected {
                status: 400,
                message: "X".into(),
            })
        });
        let services = services(
            MockAddressLookup::new(),
            store,
            MockVerificationGateway::new(),
        );

        let values = FormValues {
            aadhaar_number: "123456789012".into(),
            name: "Test User".into(),
            terms: true,
            organisation_type: "1".into(),
            pan_number: "ABCDE1234F".into(),
            pan_terms: false,
            pin_code: "110001".into(),
            state: "Delhi".into(),
            city: "New Delhi".into(),
        };
        let outcome = services.execute(Effect::Submit { values }).await;
        assert_eq!(outcome, Outcome::Submitted(Err("Database error: X".into())));
    }
}
