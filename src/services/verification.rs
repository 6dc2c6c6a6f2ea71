//! Simulated OTP and PAN verification
//!
//! No code is delivered and nothing is checked; each call just waits for the
//! configured latency. A real provider slots in behind [`VerificationGateway`].

use super::traits::{VerificationError, VerificationGateway};
use async_trait::async_trait;
use std::time::Duration;

pub struct SimulatedVerification {
    latency: Duration,
}

impl SimulatedVerification {
    pub fn new(latency: Duration) -> Self {
        Self { latency }
    }
}

#[async_trait]
impl VerificationGateway for SimulatedVerification {
    async fn send_otp(&self, _aadhaar_number: &str) -> Result<(), VerificationError> {
        tokio::time::sleep(self.latency).await;
        tracing::debug!("simulated OTP issued");
        Ok(())
    }

    async fn confirm_otp(&self, _aadhaar_number: &str, _code: &str) -> Result<(), VerificationError> {
        tokio::time::sleep(self.latency).await;
        tracing::debug!("simulated OTP accepted");
        Ok(())
    }

    async fn verify_pan(&self, _pan_number: &str) -> Result<(), VerificationError> {
        tokio::time::sleep(self.latency).await;
        tracing::debug!("simulated PAN verified");
        Ok(())
    }
}
