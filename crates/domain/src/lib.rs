//! Domain layer for the store backend.
//!
//! This crate provides the two aggregates with real invariants:
//! - `Product`, which owns its embedded review list and keeps the
//!   denormalized `rating`/`num_reviews` pair consistent through the
//!   rating aggregator after every review mutation
//! - `Order`, whose payment and delivery flags move monotonically from
//!   false to true with set-once timestamps and idempotent transitions
//!
//! Services wrap each aggregate with load-transform-put persistence
//! against a document [`store::Collection`].

pub mod error;
pub mod order;
pub mod product;

pub use error::DomainError;
pub use order::{
    Order, OrderError, OrderItem, OrderPricing, OrderService, PaymentResult, PlaceOrder,
    ShippingAddress, to_minor_units,
};
pub use product::{
    LikeUpdate, NewProduct, Product, ProductService, ProductUpdate, RatingSummary, Review,
    ReviewError, ReviewSubmission,
};
