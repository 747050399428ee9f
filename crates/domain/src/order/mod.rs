//! Order aggregate and payment/delivery lifecycle.

mod aggregate;
mod service;
mod value_objects;

pub use aggregate::Order;
pub use service::{OrderService, PlaceOrder};
pub use value_objects::{OrderItem, OrderPricing, PaymentResult, ShippingAddress};

use thiserror::Error;

/// Errors that can occur during order operations.
#[derive(Debug, Error)]
pub enum OrderError {
    /// Order has no items.
    #[error("Order has no items")]
    NoItems,

    /// An item quantity must be at least one.
    #[error("Invalid quantity: {quantity} (must be greater than 0)")]
    InvalidQuantity { quantity: u32 },

    /// A price field is negative or not a finite number.
    #[error("Invalid price for {field}: {value}")]
    InvalidPrice { field: &'static str, value: f64 },
}

/// Converts a major-unit currency amount to the gateway's integer
/// minor-unit representation.
///
/// Rounded to the nearest minor unit exactly once, before transmission;
/// the gateway adapter never rounds.
pub fn to_minor_units(amount: f64) -> i64 {
    (amount * 100.0).round() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fractional_amounts_round_to_nearest_not_truncate() {
        assert_eq!(to_minor_units(19.999), 2000);
        assert_eq!(to_minor_units(19.994), 1999);
    }

    #[test]
    fn whole_amounts_convert_exactly() {
        assert_eq!(to_minor_units(0.0), 0);
        assert_eq!(to_minor_units(10.0), 1000);
        assert_eq!(to_minor_units(0.01), 1);
    }
}
