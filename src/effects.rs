//! Runs wizard effects on the tokio runtime
//!
//! Each effect becomes a task whose [`Outcome`] is sent back over a channel
//! that the UI loop drains between frames. Address lookups are single-slot:
//! starting one aborts the previous. Dropping the runner aborts the
//! outstanding lookup, and outcomes sent after the receiver is gone are
//! discarded, so nothing reaches a torn-down session.

use crate::services::Services;
use crate::state::{Effect, Outcome};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::AbortHandle;

pub struct EffectRunner {
    services: Services,
    outcomes: UnboundedSender<Outcome>,
    lookup_task: Option<AbortHandle>,
}

impl EffectRunner {
    /// Create a runner and the receiving end of its outcome channel
    pub fn new(services: Services) -> (Self, UnboundedReceiver<Outcome>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let runner = Self {
            services,
            outcomes: tx,
            lookup_task: None,
        };
        (runner, rx)
    }

    /// Spawn an effect; its outcome arrives on the channel
    pub fn dispatch(&mut self, effect: Effect) {
        let is_lookup = matches!(effect, Effect::LookupAddress { .. });
        if is_lookup {
            self.abort_lookup();
        }

        tracing::debug!(?effect, "dispatching effect");
        let services = self.services.clone();
        let tx = self.outcomes.clone();
        let handle = tokio::spawn(async move {
            let outcome = services.execute(effect).await;
            if tx.send(outcome).is_err() {
                tracing::debug!("session closed before effect completed");
            }
        });

        if is_lookup {
            self.lookup_task = Some(handle.abort_handle());
        }
    }

    fn abort_lookup(&mut self) {
        if let Some(handle) = self.lookup_task.take() {
            handle.abort();
        }
    }
}

impl Drop for EffectRunner {
    fn drop(&mut self) {
        self.abort_lookup();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::{MockAddressLookup, MockRegistrationStore, MockVerificationGateway};
    use crate::state::Address;
    use std::sync::Arc;
    use std::time::Duration;

    /// Lookup that answers after a per-PIN delay
    struct SlowLookup;

    #[async_trait::async_trait]
    impl crate::services::AddressLookup for SlowLookup {
        async fn lookup(
            &self,
            pin_code: &str,
        ) -> Result<Option<Address>, crate::services::LookupError> {
            let delay = if pin_code == "560001" { 500 } else { 100 };
            tokio::time::sleep(Duration::from_millis(delay)).await;
            Ok(Some(Address {
                city: format!("city-{pin_code}"),
                state: format!("state-{pin_code}"),
            }))
        }
    }

    fn services_with_lookup(lookup: Arc<dyn crate::services::AddressLookup>) -> Services {
        Services {
            lookup,
            store: Arc::new(MockRegistrationStore::new()),
            verifier: Arc::new(MockVerificationGateway::new()),
        }
    }

    #[tokio::test]
    async fn test_outcome_arrives_on_channel() {
        let mut verifier = MockVerificationGateway::new();
        verifier.expect_send_otp().returning(|_| Ok(()));
        let services = Services {
            lookup: Arc::new(MockAddressLookup::new()),
            store: Arc::new(MockRegistrationStore::new()),
            verifier: Arc::new(verifier),
        };

        let (mut runner, mut rx) = EffectRunner::new(services);
        runner.dispatch(Effect::SendOtp {
            aadhaar_number: "123456789012".into(),
        });

        assert_eq!(rx.recv().await, Some(Outcome::OtpSent(Ok(()))));
    }

    #[tokio::test(start_paused = true)]
    async fn test_new_lookup_aborts_previous() {
        let (mut runner, mut rx) = EffectRunner::new(services_with_lookup(Arc::new(SlowLookup)));

        runner.dispatch(Effect::LookupAddress {
            pin_code: "560001".into(),
            generation: 1,
        });
        runner.dispatch(Effect::LookupAddress {
            pin_code: "110001".into(),
            generation: 2,
        });

        let Some(Outcome::AddressResolved { generation, .. }) = rx.recv().await else {
            panic!("expected an address outcome");
        };
        assert_eq!(generation, 2);

        // The superseded lookup never reports
        tokio::time::sleep(Duration::from_secs(1)).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_aborts_lookup() {
        let (mut runner, mut rx) = EffectRunner::new(services_with_lookup(Arc::new(SlowLookup)));
        runner.dispatch(Effect::LookupAddress {
            pin_code: "560001".into(),
            generation: 1,
        });
        drop(runner);

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(rx.recv().await, None);
    }
}
