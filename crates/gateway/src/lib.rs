//! Payment gateway adapter.
//!
//! Wraps a third-party payment-intent API behind a trait so the rest of
//! the system never touches gateway client types directly. The adapter
//! takes amounts that are already integers in the gateway's minor unit
//! (cents, kobo); the currency-unit conversion is the caller's job and
//! happens exactly once, in `domain`.

mod error;
mod payment;

pub use error::GatewayError;
pub use payment::{GatewayConfig, InMemoryGateway, PaymentGateway, PaymentIntent};
