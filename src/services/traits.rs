//! Trait abstractions for external collaborators to enable mocking in tests

use crate::state::{Address, RegistrationRecord};
use async_trait::async_trait;
use thiserror::Error;

/// Failure reaching the postal PIN service
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("postal API request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("postal API returned status {0}")]
    Status(reqwest::StatusCode),
}

/// Failure writing a registration
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("registration endpoint is not configured")]
    NotConfigured,
    #[error("{0}")]
    Request(#[from] reqwest::Error),
    /// The store answered but refused the row
    #[error("{message}")]
    Rejected { status: u16, message: String },
}

/// Failure from the OTP / PAN verification provider
#[derive(Debug, Error)]
pub enum VerificationError {
    #[error("{0}")]
    Rejected(String),
}

/// Resolves a PIN code to city and state
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AddressLookup: Send + Sync {
    /// `Ok(None)` when the service knows no such PIN
    async fn lookup(&self, pin_code: &str) -> Result<Option<Address>, LookupError>;
}

/// Persists completed registrations
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RegistrationStore: Send + Sync {
    async fn insert(&self, record: &RegistrationRecord) -> Result<(), StoreError>;
}

/// Identity checks gating the first two steps
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VerificationGateway: Send + Sync {
    /// Deliver an OTP to the mobile number linked to the Aadhaar
    async fn send_otp(&self, aadhaar_number: &str) -> Result<(), VerificationError>;

    /// Check the code the user typed
    async fn confirm_otp(&self, aadhaar_number: &str, code: &str)
        -> Result<(), VerificationError>;

    /// Verify a PAN with the Income Tax Department
    async fn verify_pan(&self, pan_number: &str) -> Result<(), VerificationError>;
}
