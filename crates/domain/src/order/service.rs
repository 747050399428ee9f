//! Order service: placement, payment, and delivery transitions.

use chrono::Utc;
use common::{OrderId, UserId};
use gateway::{GatewayConfig, PaymentGateway, PaymentIntent};
use store::Collection;

use crate::error::DomainError;

use super::{Order, OrderItem, OrderPricing, ShippingAddress, to_minor_units};

/// Command to place a new order.
#[derive(Debug, Clone)]
pub struct PlaceOrder {
    pub owner: UserId,
    pub owner_email: String,
    pub items: Vec<OrderItem>,
    pub shipping_address: ShippingAddress,
    pub payment_method: String,
    pub pricing: OrderPricing,
}

/// Service managing the order lifecycle.
///
/// Mutations load the full current order from the collection right
/// before transforming it and write the whole document back. The
/// gateway is only consulted for intent creation, which never touches
/// stored order state.
pub struct OrderService<C: Collection<Order>, G: PaymentGateway> {
    orders: C,
    gateway: G,
    gateway_config: GatewayConfig,
}

impl<C: Collection<Order>, G: PaymentGateway> OrderService<C, G> {
    /// Creates a new order service.
    pub fn new(orders: C, gateway: G, gateway_config: GatewayConfig) -> Self {
        Self {
            orders,
            gateway,
            gateway_config,
        }
    }

    async fn load(&self, order_id: OrderId) -> Result<Order, DomainError> {
        self.orders
            .get(order_id.as_uuid())
            .await?
            .ok_or(DomainError::OrderNotFound(order_id))
    }

    /// Places a new order with prices fixed as submitted.
    #[tracing::instrument(skip(self, cmd))]
    pub async fn place_order(&self, cmd: PlaceOrder) -> Result<Order, DomainError> {
        let order = Order::place(
            cmd.owner,
            cmd.owner_email,
            cmd.items,
            cmd.shipping_address,
            cmd.payment_method,
            cmd.pricing,
            Utc::now(),
        )?;

        self.orders.put(order.clone()).await?;

        metrics::counter!("orders_created_total").increment(1);
        tracing::info!(order_id = %order.id, owner = %order.owner, "order placed");
        Ok(order)
    }

    /// Requests a payment intent from the gateway for the given total.
    ///
    /// The amount is converted to integer minor units here, exactly
    /// once. Gateway failures surface as [`DomainError::Gateway`] and
    /// leave every order untouched.
    #[tracing::instrument(skip(self))]
    pub async fn create_payment_intent(
        &self,
        total_price: f64,
    ) -> Result<PaymentIntent, DomainError> {
        let amount = to_minor_units(total_price);

        match self
            .gateway
            .create_intent(amount, &self.gateway_config.currency)
            .await
        {
            Ok(intent) => Ok(intent),
            Err(err) => {
                metrics::counter!("payment_intents_failed_total").increment(1);
                tracing::warn!(error = %err, amount_minor_units = amount, "payment intent failed");
                Err(DomainError::Gateway(err))
            }
        }
    }

    /// Confirms payment of an order, idempotently.
    ///
    /// A repeat confirmation (the gateway may call back more than once
    /// for the same transaction) returns the stored state unchanged.
    #[tracing::instrument(skip(self))]
    pub async fn confirm_payment(
        &self,
        order_id: OrderId,
        transaction_id: &str,
    ) -> Result<Order, DomainError> {
        let mut order = self.load(order_id).await?;

        if order.confirm_payment(transaction_id, Utc::now()) {
            self.orders.put(order.clone()).await?;
            metrics::counter!("orders_paid_total").increment(1);
            tracing::info!(%order_id, transaction_id, "order paid");
        } else {
            tracing::debug!(%order_id, "payment already confirmed, no-op");
        }

        Ok(order)
    }

    /// Marks an order as delivered, idempotently.
    #[tracing::instrument(skip(self))]
    pub async fn mark_delivered(&self, order_id: OrderId) -> Result<Order, DomainError> {
        let mut order = self.load(order_id).await?;

        if order.mark_delivered(Utc::now()) {
            self.orders.put(order.clone()).await?;
            tracing::info!(%order_id, "order delivered");
        }

        Ok(order)
    }

    /// Loads an order by id, or `None` if it does not exist.
    #[tracing::instrument(skip(self))]
    pub async fn get_order(&self, order_id: OrderId) -> Result<Option<Order>, DomainError> {
        Ok(self.orders.get(order_id.as_uuid()).await?)
    }

    /// Returns all orders, newest first.
    #[tracing::instrument(skip(self))]
    pub async fn list_orders(&self) -> Result<Vec<Order>, DomainError> {
        let mut orders = self.orders.list().await?;
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(orders)
    }

    /// Returns the orders placed by a user, newest first.
    #[tracing::instrument(skip(self))]
    pub async fn list_orders_for(&self, owner: UserId) -> Result<Vec<Order>, DomainError> {
        let mut orders = self.orders.list().await?;
        orders.retain(|o| o.owner == owner);
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(orders)
    }

    /// Deletes an order. Administrative override; callers gate this on
    /// the admin capability.
    #[tracing::instrument(skip(self))]
    pub async fn delete_order(&self, order_id: OrderId) -> Result<(), DomainError> {
        if !self.orders.remove(order_id.as_uuid()).await? {
            return Err(DomainError::OrderNotFound(order_id));
        }
        Ok(())
    }
}
