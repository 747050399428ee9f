//! Domain error types.

use common::{OrderId, ProductId};
use gateway::GatewayError;
use store::StoreError;
use thiserror::Error;

use crate::order::OrderError;
use crate::product::ReviewError;

/// Errors that can occur during domain operations.
#[derive(Debug, Error)]
pub enum DomainError {
    /// Product not found in the catalog.
    #[error("Product not found: {0}")]
    ProductNotFound(ProductId),

    /// Order not found.
    #[error("Order not found: {0}")]
    OrderNotFound(OrderId),

    /// Another product already uses this slug.
    #[error("Product already exists with slug '{slug}'")]
    DuplicateSlug { slug: String },

    /// Another product already uses this name.
    #[error("Product already exists with name '{name}'")]
    DuplicateName { name: String },

    /// An error occurred in the review lifecycle.
    #[error("Review error: {0}")]
    Review(ReviewError),

    /// An error occurred in the order lifecycle.
    #[error("Order error: {0}")]
    Order(OrderError),

    /// The payment gateway failed; no order state was touched.
    #[error("Payment gateway error: {0}")]
    Gateway(#[from] GatewayError),

    /// An error occurred in the document store.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

impl From<ReviewError> for DomainError {
    fn from(e: ReviewError) -> Self {
        DomainError::Review(e)
    }
}

impl From<OrderError> for DomainError {
    fn from(e: OrderError) -> Self {
        DomainError::Order(e)
    }
}
