//! Payment gateway trait and in-memory implementation.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::GatewayError;

/// Configuration for a payment gateway client.
///
/// Injected at construction; there is no ambient global client state.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Secret API key for the gateway account.
    pub api_key: String,
    /// ISO currency code used for all intents (e.g. "usd", "ngn").
    pub currency: String,
}

impl GatewayConfig {
    /// Creates a configuration for the given key and currency.
    pub fn new(api_key: impl Into<String>, currency: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            currency: currency.into(),
        }
    }
}

/// A payment intent created at the gateway.
#[derive(Debug, Clone)]
pub struct PaymentIntent {
    /// Opaque secret handed to the client to complete the payment.
    pub client_secret: String,
}

/// Trait for payment gateway operations.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Creates a payment intent for the given amount.
    ///
    /// `amount_minor_units` must already be an integer number of the
    /// gateway's minor currency unit; this adapter performs no rounding
    /// or unit conversion.
    async fn create_intent(
        &self,
        amount_minor_units: i64,
        currency: &str,
    ) -> Result<PaymentIntent, GatewayError>;
}

#[derive(Debug, Default)]
struct InMemoryGatewayState {
    intents: HashMap<String, (i64, String)>,
    fail_on_create: bool,
}

/// In-memory payment gateway for local runs and testing.
#[derive(Debug, Clone, Default)]
pub struct InMemoryGateway {
    state: Arc<RwLock<InMemoryGatewayState>>,
}

impl InMemoryGateway {
    /// Creates a new in-memory gateway.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the gateway to fail on subsequent create calls.
    pub fn set_fail_on_create(&self, fail: bool) {
        self.state.write().unwrap().fail_on_create = fail;
    }

    /// Returns the number of intents created so far.
    pub fn intent_count(&self) -> usize {
        self.state.read().unwrap().intents.len()
    }

    /// Returns the amount recorded for a client secret, if any.
    pub fn intent_amount(&self, client_secret: &str) -> Option<i64> {
        self.state
            .read()
            .unwrap()
            .intents
            .get(client_secret)
            .map(|(amount, _)| *amount)
    }
}

#[async_trait]
impl PaymentGateway for InMemoryGateway {
    async fn create_intent(
        &self,
        amount_minor_units: i64,
        currency: &str,
    ) -> Result<PaymentIntent, GatewayError> {
        let mut state = self.state.write().unwrap();

        if state.fail_on_create {
            return Err(GatewayError::Unavailable(
                "simulated gateway outage".to_string(),
            ));
        }

        if amount_minor_units <= 0 {
            return Err(GatewayError::InvalidAmount { amount_minor_units });
        }

        let client_secret = format!("pi_{}_secret", Uuid::new_v4().simple());
        state
            .intents
            .insert(client_secret.clone(), (amount_minor_units, currency.to_string()));

        Ok(PaymentIntent { client_secret })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn create_intent_returns_client_secret() {
        let gw = InMemoryGateway::new();

        let intent = gw.create_intent(2000, "usd").await.unwrap();
        assert!(intent.client_secret.starts_with("pi_"));
        assert_eq!(gw.intent_count(), 1);
        assert_eq!(gw.intent_amount(&intent.client_secret), Some(2000));
    }

    #[tokio::test]
    async fn fail_on_create_surfaces_gateway_error() {
        let gw = InMemoryGateway::new();
        gw.set_fail_on_create(true);

        let result = gw.create_intent(2000, "usd").await;
        assert!(matches!(result, Err(GatewayError::Unavailable(_))));
        assert_eq!(gw.intent_count(), 0);
    }

    #[tokio::test]
    async fn non_positive_amount_is_rejected() {
        let gw = InMemoryGateway::new();

        let result = gw.create_intent(0, "usd").await;
        assert!(matches!(
            result,
            Err(GatewayError::InvalidAmount {
                amount_minor_units: 0
            })
        ));
    }

    #[test]
    fn config_holds_injected_values() {
        let config = GatewayConfig::new("sk_test_123", "ngn");
        assert_eq!(config.api_key, "sk_test_123");
        assert_eq!(config.currency, "ngn");
    }
}
