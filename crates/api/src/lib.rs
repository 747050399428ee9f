//! HTTP API server for the store backend.
//!
//! Exposes catalog, review, and order endpoints with structured
//! logging (tracing) and Prometheus metrics. Authentication is a
//! trusted upstream collaborator; see [`auth::Identity`].

pub mod auth;
pub mod config;
pub mod error;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use axum::routing::{delete, get, post, put};
use domain::{Order, OrderService, Product, ProductService};
use gateway::{GatewayConfig, InMemoryGateway, PaymentGateway};
use metrics_exporter_prometheus::PrometheusHandle;
use store::{Collection, InMemoryCollection};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use config::Config;

/// Shared application state accessible from all handlers.
pub struct AppState<P, O, G>
where
    P: Collection<Product>,
    O: Collection<Order>,
    G: PaymentGateway,
{
    pub products: ProductService<P>,
    pub orders: OrderService<O, G>,
}

/// Creates the Axum application router with all routes and shared state.
pub fn create_app<P, O, G>(state: Arc<AppState<P, O, G>>, metrics_handle: PrometheusHandle) -> Router
where
    P: Collection<Product> + 'static,
    O: Collection<Order> + 'static,
    G: PaymentGateway + 'static,
{
    let metrics_router = Router::new()
        .route("/metrics", get(routes::metrics::get))
        .with_state(metrics_handle);

    Router::new()
        .route("/health", get(routes::health::check))
        .route("/products", get(routes::products::list::<P, O, G>))
        .route("/products", post(routes::products::create::<P, O, G>))
        .route("/products/slug/{slug}", get(routes::products::get_by_slug::<P, O, G>))
        .route("/products/{id}", get(routes::products::get::<P, O, G>))
        .route("/products/{id}", put(routes::products::update::<P, O, G>))
        .route("/products/{id}", delete(routes::products::delete::<P, O, G>))
        .route(
            "/products/{id}/reviews",
            post(routes::products::submit_review::<P, O, G>),
        )
        .route(
            "/products/{id}/reviews/{review_id}",
            post(routes::products::like_review::<P, O, G>),
        )
        .route(
            "/products/{id}/reviews/{review_id}",
            delete(routes::products::delete_review::<P, O, G>),
        )
        .route("/orders", post(routes::orders::create::<P, O, G>))
        .route("/orders", get(routes::orders::list::<P, O, G>))
        .route(
            "/orders/create-payment-intent",
            post(routes::orders::create_payment_intent::<P, O, G>),
        )
        .route("/orders/mine", get(routes::orders::mine::<P, O, G>))
        .route("/orders/{id}", get(routes::orders::get::<P, O, G>))
        .route("/orders/{id}", delete(routes::orders::delete::<P, O, G>))
        .route("/orders/{id}/pay", put(routes::orders::pay::<P, O, G>))
        .route("/orders/{id}/deliver", put(routes::orders::deliver::<P, O, G>))
        .with_state(state)
        .merge(metrics_router)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}

/// Creates application state from the given stores and gateway.
pub fn create_state<P, O, G>(
    products: P,
    orders: O,
    gateway: G,
    gateway_config: GatewayConfig,
) -> Arc<AppState<P, O, G>>
where
    P: Collection<Product>,
    O: Collection<Order>,
    G: PaymentGateway,
{
    Arc::new(AppState {
        products: ProductService::new(products),
        orders: OrderService::new(orders, gateway, gateway_config),
    })
}

/// Creates the default state with in-memory collections and gateway.
pub fn create_default_state(
    config: &Config,
) -> Arc<AppState<InMemoryCollection<Product>, InMemoryCollection<Order>, InMemoryGateway>> {
    create_state(
        InMemoryCollection::new(),
        InMemoryCollection::new(),
        InMemoryGateway::new(),
        GatewayConfig::new(config.gateway_api_key.clone(), config.gateway_currency.clone()),
    )
}
