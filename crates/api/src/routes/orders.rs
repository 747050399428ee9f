//! Order placement, payment, and delivery endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use chrono::{DateTime, Utc};
use common::{OrderId, ProductId};
use domain::{Order, OrderItem, OrderPricing, PaymentResult, PlaceOrder, Product, ShippingAddress};
use gateway::PaymentGateway;
use serde::{Deserialize, Serialize};
use store::Collection;
use uuid::Uuid;

use crate::AppState;
use crate::auth::Identity;
use crate::error::ApiError;

// -- Request types --

#[derive(Deserialize)]
pub struct OrderItemRequest {
    pub product_id: Uuid,
    pub name: String,
    pub quantity: u32,
    pub price: f64,
}

#[derive(Deserialize)]
pub struct ShippingAddressRequest {
    pub full_name: String,
    pub address: String,
    pub city: String,
    pub postal_code: String,
    pub country: String,
}

#[derive(Deserialize)]
pub struct CreateOrderRequest {
    pub order_items: Vec<OrderItemRequest>,
    pub shipping_address: ShippingAddressRequest,
    pub payment_method: String,
    pub items_price: f64,
    pub shipping_price: f64,
    pub tax_price: f64,
    pub total_price: f64,
}

#[derive(Deserialize)]
pub struct PaymentIntentRequest {
    pub total_price: f64,
}

#[derive(Deserialize)]
pub struct PayOrderRequest {
    pub payment_intent_id: String,
}

// -- Response types --

#[derive(Serialize)]
pub struct OrderItemResponse {
    pub product_id: String,
    pub name: String,
    pub quantity: u32,
    pub price: f64,
}

#[derive(Serialize)]
pub struct PaymentResultResponse {
    pub transaction_id: String,
    pub status: String,
    pub update_time: DateTime<Utc>,
    pub email_address: String,
}

impl From<&PaymentResult> for PaymentResultResponse {
    fn from(result: &PaymentResult) -> Self {
        Self {
            transaction_id: result.transaction_id.clone(),
            status: result.status.clone(),
            update_time: result.update_time,
            email_address: result.email_address.clone(),
        }
    }
}

#[derive(Serialize)]
pub struct OrderResponse {
    pub id: String,
    pub owner: String,
    pub order_items: Vec<OrderItemResponse>,
    pub shipping_address: ShippingAddressResponse,
    pub payment_method: String,
    pub items_price: f64,
    pub shipping_price: f64,
    pub tax_price: f64,
    pub total_price: f64,
    pub is_paid: bool,
    pub paid_at: Option<DateTime<Utc>>,
    pub payment_result: Option<PaymentResultResponse>,
    pub is_delivered: bool,
    pub delivered_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize)]
pub struct ShippingAddressResponse {
    pub full_name: String,
    pub address: String,
    pub city: String,
    pub postal_code: String,
    pub country: String,
}

impl From<&Order> for OrderResponse {
    fn from(order: &Order) -> Self {
        Self {
            id: order.id.to_string(),
            owner: order.owner.to_string(),
            order_items: order
                .order_items
                .iter()
                .map(|item| OrderItemResponse {
                    product_id: item.product.to_string(),
                    name: item.name.clone(),
                    quantity: item.quantity,
                    price: item.price,
                })
                .collect(),
            shipping_address: ShippingAddressResponse {
                full_name: order.shipping_address.full_name.clone(),
                address: order.shipping_address.address.clone(),
                city: order.shipping_address.city.clone(),
                postal_code: order.shipping_address.postal_code.clone(),
                country: order.shipping_address.country.clone(),
            },
            payment_method: order.payment_method.clone(),
            items_price: order.items_price,
            shipping_price: order.shipping_price,
            tax_price: order.tax_price,
            total_price: order.total_price,
            is_paid: order.is_paid(),
            paid_at: order.paid_at(),
            payment_result: order.payment_result().map(PaymentResultResponse::from),
            is_delivered: order.is_delivered(),
            delivered_at: order.delivered_at(),
            created_at: order.created_at,
        }
    }
}

#[derive(Serialize)]
pub struct OrderMessageResponse {
    pub message: &'static str,
    pub order: OrderResponse,
}

#[derive(Serialize)]
pub struct PaymentIntentResponse {
    pub client_secret: String,
}

#[derive(Serialize)]
pub struct OrderDeletedResponse {
    pub message: &'static str,
}

// -- Handlers --

/// POST /orders — place a new order.
#[tracing::instrument(skip(state, identity, req))]
pub async fn create<P, O, G>(
    State(state): State<Arc<AppState<P, O, G>>>,
    identity: Identity,
    Json(req): Json<CreateOrderRequest>,
) -> Result<(StatusCode, Json<OrderMessageResponse>), ApiError>
where
    P: Collection<Product> + 'static,
    O: Collection<Order> + 'static,
    G: PaymentGateway + 'static,
{
    let items = req
        .order_items
        .into_iter()
        .map(|item| {
            OrderItem::new(
                ProductId::from_uuid(item.product_id),
                item.name,
                item.quantity,
                item.price,
            )
        })
        .collect();

    let order = state
        .orders
        .place_order(PlaceOrder {
            owner: identity.user_id,
            owner_email: identity.email,
            items,
            shipping_address: ShippingAddress {
                full_name: req.shipping_address.full_name,
                address: req.shipping_address.address,
                city: req.shipping_address.city,
                postal_code: req.shipping_address.postal_code,
                country: req.shipping_address.country,
            },
            payment_method: req.payment_method,
            pricing: OrderPricing {
                items_price: req.items_price,
                shipping_price: req.shipping_price,
                tax_price: req.tax_price,
                total_price: req.total_price,
            },
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(OrderMessageResponse {
            message: "New Order Created",
            order: OrderResponse::from(&order),
        }),
    ))
}

/// POST /orders/create-payment-intent — request a gateway intent.
///
/// Never touches stored order state; gateway failures surface as 500.
#[tracing::instrument(skip(state, _identity, req))]
pub async fn create_payment_intent<P, O, G>(
    State(state): State<Arc<AppState<P, O, G>>>,
    _identity: Identity,
    Json(req): Json<PaymentIntentRequest>,
) -> Result<Json<PaymentIntentResponse>, ApiError>
where
    P: Collection<Product> + 'static,
    O: Collection<Order> + 'static,
    G: PaymentGateway + 'static,
{
    let intent = state.orders.create_payment_intent(req.total_price).await?;

    Ok(Json(PaymentIntentResponse {
        client_secret: intent.client_secret,
    }))
}

/// GET /orders — list all orders (admin).
#[tracing::instrument(skip(state, identity))]
pub async fn list<P, O, G>(
    State(state): State<Arc<AppState<P, O, G>>>,
    identity: Identity,
) -> Result<Json<Vec<OrderResponse>>, ApiError>
where
    P: Collection<Product> + 'static,
    O: Collection<Order> + 'static,
    G: PaymentGateway + 'static,
{
    identity.require_admin()?;

    let orders = state.orders.list_orders().await?;
    Ok(Json(orders.iter().map(OrderResponse::from).collect()))
}

/// GET /orders/mine — list the caller's orders.
#[tracing::instrument(skip(state, identity))]
pub async fn mine<P, O, G>(
    State(state): State<Arc<AppState<P, O, G>>>,
    identity: Identity,
) -> Result<Json<Vec<OrderResponse>>, ApiError>
where
    P: Collection<Product> + 'static,
    O: Collection<Order> + 'static,
    G: PaymentGateway + 'static,
{
    let orders = state.orders.list_orders_for(identity.user_id).await?;
    Ok(Json(orders.iter().map(OrderResponse::from).collect()))
}

/// GET /orders/{id} — load an order by id.
#[tracing::instrument(skip(state, _identity))]
pub async fn get<P, O, G>(
    State(state): State<Arc<AppState<P, O, G>>>,
    _identity: Identity,
    Path(id): Path<Uuid>,
) -> Result<Json<OrderResponse>, ApiError>
where
    P: Collection<Product> + 'static,
    O: Collection<Order> + 'static,
    G: PaymentGateway + 'static,
{
    let order = state
        .orders
        .get_order(OrderId::from_uuid(id))
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Order {id} not found")))?;

    Ok(Json(OrderResponse::from(&order)))
}

/// PUT /orders/{id}/pay — confirm payment (idempotent).
#[tracing::instrument(skip(state, _identity, req))]
pub async fn pay<P, O, G>(
    State(state): State<Arc<AppState<P, O, G>>>,
    _identity: Identity,
    Path(id): Path<Uuid>,
    Json(req): Json<PayOrderRequest>,
) -> Result<Json<OrderMessageResponse>, ApiError>
where
    P: Collection<Product> + 'static,
    O: Collection<Order> + 'static,
    G: PaymentGateway + 'static,
{
    let order = state
        .orders
        .confirm_payment(OrderId::from_uuid(id), &req.payment_intent_id)
        .await?;

    Ok(Json(OrderMessageResponse {
        message: "Order Paid",
        order: OrderResponse::from(&order),
    }))
}

/// PUT /orders/{id}/deliver — mark delivered (idempotent).
#[tracing::instrument(skip(state, _identity))]
pub async fn deliver<P, O, G>(
    State(state): State<Arc<AppState<P, O, G>>>,
    _identity: Identity,
    Path(id): Path<Uuid>,
) -> Result<Json<OrderMessageResponse>, ApiError>
where
    P: Collection<Product> + 'static,
    O: Collection<Order> + 'static,
    G: PaymentGateway + 'static,
{
    let order = state.orders.mark_delivered(OrderId::from_uuid(id)).await?;

    Ok(Json(OrderMessageResponse {
        message: "Order Delivered",
        order: OrderResponse::from(&order),
    }))
}

/// DELETE /orders/{id} — administrative delete.
#[tracing::instrument(skip(state, identity))]
pub async fn delete<P, O, G>(
    State(state): State<Arc<AppState<P, O, G>>>,
    identity: Identity,
    Path(id): Path<Uuid>,
) -> Result<Json<OrderDeletedResponse>, ApiError>
where
    P: Collection<Product> + 'static,
    O: Collection<Order> + 'static,
    G: PaymentGateway + 'static,
{
    identity.require_admin()?;

    state.orders.delete_order(OrderId::from_uuid(id)).await?;
    Ok(Json(OrderDeletedResponse {
        message: "Order Deleted",
    }))
}
