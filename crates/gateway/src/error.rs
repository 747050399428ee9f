use thiserror::Error;

/// Errors that can occur when talking to the payment gateway.
///
/// Gateway failures are surfaced as their own error kind so callers can
/// report them distinctly from not-found or validation failures.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The gateway rejected the payment-intent request.
    #[error("Payment intent rejected: {0}")]
    IntentRejected(String),

    /// The gateway could not be reached or returned a transport error.
    #[error("Payment gateway unavailable: {0}")]
    Unavailable(String),

    /// The requested amount is not chargeable.
    #[error("Invalid charge amount: {amount_minor_units} minor units")]
    InvalidAmount { amount_minor_units: i64 },
}
