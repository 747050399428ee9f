//! Order aggregate implementation.

use chrono::{DateTime, Utc};
use common::{OrderId, UserId};
use serde::{Deserialize, Serialize};
use store::Document;
use uuid::Uuid;

use super::{OrderError, OrderItem, OrderPricing, PaymentResult, ShippingAddress};

/// Order aggregate root.
///
/// Payment and delivery are independent monotonic flags: each moves
/// from false to true once, with a set-once timestamp, and never
/// reverts. Items and the price breakdown are fixed at placement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,

    /// User who placed the order. Immutable.
    pub owner: UserId,

    /// Owner email captured at placement, used for the payment record.
    pub owner_email: String,

    pub order_items: Vec<OrderItem>,
    pub shipping_address: ShippingAddress,
    pub payment_method: String,

    pub items_price: f64,
    pub shipping_price: f64,
    pub tax_price: f64,
    pub total_price: f64,

    is_paid: bool,
    paid_at: Option<DateTime<Utc>>,
    payment_result: Option<PaymentResult>,

    is_delivered: bool,
    delivered_at: Option<DateTime<Utc>>,

    pub created_at: DateTime<Utc>,
}

impl Document for Order {
    fn document_id(&self) -> Uuid {
        self.id.as_uuid()
    }
}

// Query methods
impl Order {
    pub fn is_paid(&self) -> bool {
        self.is_paid
    }

    pub fn paid_at(&self) -> Option<DateTime<Utc>> {
        self.paid_at
    }

    pub fn payment_result(&self) -> Option<&PaymentResult> {
        self.payment_result.as_ref()
    }

    pub fn is_delivered(&self) -> bool {
        self.is_delivered
    }

    pub fn delivered_at(&self) -> Option<DateTime<Utc>> {
        self.delivered_at
    }
}

// Transitions
impl Order {
    /// Places a new order in the unpaid, undelivered state.
    ///
    /// Item prices and the totals are fixed here and never recomputed,
    /// protecting both sides from later catalog price drift.
    pub fn place(
        owner: UserId,
        owner_email: impl Into<String>,
        order_items: Vec<OrderItem>,
        shipping_address: ShippingAddress,
        payment_method: impl Into<String>,
        pricing: OrderPricing,
        now: DateTime<Utc>,
    ) -> Result<Self, OrderError> {
        if order_items.is_empty() {
            return Err(OrderError::NoItems);
        }
        for item in &order_items {
            if item.quantity == 0 {
                return Err(OrderError::InvalidQuantity {
                    quantity: item.quantity,
                });
            }
            validate_price("item price", item.price)?;
        }
        validate_price("items_price", pricing.items_price)?;
        validate_price("shipping_price", pricing.shipping_price)?;
        validate_price("tax_price", pricing.tax_price)?;
        validate_price("total_price", pricing.total_price)?;

        Ok(Self {
            id: OrderId::new(),
            owner,
            owner_email: owner_email.into(),
            order_items,
            shipping_address,
            payment_method: payment_method.into(),
            items_price: pricing.items_price,
            shipping_price: pricing.shipping_price,
            tax_price: pricing.tax_price,
            total_price: pricing.total_price,
            is_paid: false,
            paid_at: None,
            payment_result: None,
            is_delivered: false,
            delivered_at: None,
            created_at: now,
        })
    }

    /// Confirms payment for this order.
    ///
    /// Idempotent: the gateway may report the same transaction more
    /// than once. A second call returns false and leaves `paid_at` and
    /// `payment_result` exactly as the first call set them.
    pub fn confirm_payment(&mut self, transaction_id: &str, now: DateTime<Utc>) -> bool {
        if self.is_paid {
            return false;
        }

        self.is_paid = true;
        self.paid_at = Some(now);
        self.payment_result = Some(PaymentResult {
            transaction_id: transaction_id.to_string(),
            status: "succeeded".to_string(),
            update_time: now,
            email_address: self.owner_email.clone(),
        });
        true
    }

    /// Marks this order as delivered.
    ///
    /// Idempotent: an already-delivered order keeps its original
    /// `delivered_at` and the call reports no transition.
    pub fn mark_delivered(&mut self, now: DateTime<Utc>) -> bool {
        if self.is_delivered {
            return false;
        }

        self.is_delivered = true;
        self.delivered_at = Some(now);
        true
    }
}

fn validate_price(field: &'static str, value: f64) -> Result<(), OrderError> {
    if !value.is_finite() || value < 0.0 {
        return Err(OrderError::InvalidPrice { field, value });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use common::ProductId;

    use super::*;

    fn pricing(total: f64) -> OrderPricing {
        OrderPricing {
            items_price: total,
            shipping_price: 0.0,
            tax_price: 0.0,
            total_price: total,
        }
    }

    fn address() -> ShippingAddress {
        ShippingAddress {
            full_name: "Ana Tester".to_string(),
            address: "1 Main St".to_string(),
            city: "Lagos".to_string(),
            postal_code: "100001".to_string(),
            country: "NG".to_string(),
        }
    }

    fn order() -> Order {
        Order::place(
            UserId::new(),
            "ana@example.com",
            vec![OrderItem::new(ProductId::new(), "Mug", 2, 9.99)],
            address(),
            "card",
            pricing(19.98),
            Utc::now(),
        )
        .unwrap()
    }

    #[test]
    fn placed_order_starts_unpaid_and_undelivered() {
        let order = order();
        assert!(!order.is_paid());
        assert!(!order.is_delivered());
        assert!(order.paid_at().is_none());
        assert!(order.delivered_at().is_none());
        assert!(order.payment_result().is_none());
    }

    #[test]
    fn empty_order_is_rejected() {
        let result = Order::place(
            UserId::new(),
            "ana@example.com",
            vec![],
            address(),
            "card",
            pricing(0.0),
            Utc::now(),
        );
        assert!(matches!(result, Err(OrderError::NoItems)));
    }

    #[test]
    fn zero_quantity_item_is_rejected() {
        let result = Order::place(
            UserId::new(),
            "ana@example.com",
            vec![OrderItem::new(ProductId::new(), "Mug", 0, 9.99)],
            address(),
            "card",
            pricing(0.0),
            Utc::now(),
        );
        assert!(matches!(result, Err(OrderError::InvalidQuantity { .. })));
    }

    #[test]
    fn negative_total_is_rejected() {
        let result = Order::place(
            UserId::new(),
            "ana@example.com",
            vec![OrderItem::new(ProductId::new(), "Mug", 1, 9.99)],
            address(),
            "card",
            pricing(-1.0),
            Utc::now(),
        );
        assert!(matches!(
            result,
            Err(OrderError::InvalidPrice {
                field: "items_price",
                ..
            })
        ));
    }

    #[test]
    fn confirm_payment_records_result_with_owner_email() {
        let mut order = order();
        let now = Utc::now();

        assert!(order.confirm_payment("pi_123", now));
        assert!(order.is_paid());
        assert_eq!(order.paid_at(), Some(now));

        let result = order.payment_result().unwrap();
        assert_eq!(result.transaction_id, "pi_123");
        assert_eq!(result.status, "succeeded");
        assert_eq!(result.email_address, "ana@example.com");
    }

    #[test]
    fn second_payment_confirmation_is_noop() {
        let mut order = order();
        let first = Utc::now();
        order.confirm_payment("pi_123", first);

        let later = first + Duration::minutes(5);
        assert!(!order.confirm_payment("pi_456", later));

        // First confirmation wins, untouched by the retry.
        assert_eq!(order.paid_at(), Some(first));
        assert_eq!(order.payment_result().unwrap().transaction_id, "pi_123");
    }

    #[test]
    fn deliver_is_independent_of_payment() {
        let mut order = order();
        assert!(order.mark_delivered(Utc::now()));
        assert!(order.is_delivered());
        assert!(!order.is_paid());
    }

    #[test]
    fn second_delivery_is_noop() {
        let mut order = order();
        let first = Utc::now();
        order.mark_delivered(first);

        assert!(!order.mark_delivered(first + Duration::hours(1)));
        assert_eq!(order.delivered_at(), Some(first));
    }

    #[test]
    fn order_serialization_roundtrip() {
        let mut order = order();
        order.confirm_payment("pi_123", Utc::now());

        let json = serde_json::to_string(&order).unwrap();
        let back: Order = serde_json::from_str(&json).unwrap();
        assert_eq!(back.id, order.id);
        assert!(back.is_paid());
        assert_eq!(back.payment_result(), order.payment_result());
    }
}
