//! Value objects for the order domain.

use chrono::{DateTime, Utc};
use common::ProductId;
use serde::{Deserialize, Serialize};

/// A line item in an order.
///
/// The price is captured when the order is placed and never recomputed
/// from live catalog prices afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    /// The product this line refers to.
    pub product: ProductId,

    /// Product name at order time.
    pub name: String,

    /// Quantity ordered.
    pub quantity: u32,

    /// Unit price at order time, in major currency units.
    pub price: f64,
}

impl OrderItem {
    /// Creates a new order item.
    pub fn new(product: ProductId, name: impl Into<String>, quantity: u32, price: f64) -> Self {
        Self {
            product,
            name: name.into(),
            quantity,
            price,
        }
    }
}

/// Destination address for an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShippingAddress {
    pub full_name: String,
    pub address: String,
    pub city: String,
    pub postal_code: String,
    pub country: String,
}

/// Price breakdown fixed when the order is placed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrderPricing {
    pub items_price: f64,
    pub shipping_price: f64,
    pub tax_price: f64,
    pub total_price: f64,
}

/// Confirmation record from the payment gateway.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentResult {
    /// External transaction identifier reported by the gateway.
    pub transaction_id: String,

    /// Gateway-reported status.
    pub status: String,

    /// When the confirmation was recorded.
    pub update_time: DateTime<Utc>,

    /// Payer email, resolved from the order's owner.
    pub email_address: String,
}
