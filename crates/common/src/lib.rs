//! Shared types for the store backend.
//!
//! All aggregate and entity identifiers are UUID newtypes so that a
//! product id can never be passed where an order id is expected.

mod types;

pub use types::{OrderId, ProductId, ReviewId, UserId};
