//! Product aggregate, embedded reviews, and the rating aggregator.

mod aggregate;
pub mod rating;
mod review;
mod service;

pub use aggregate::{Product, ReviewOutcome};
pub use rating::RatingSummary;
pub use review::Review;
pub use service::{LikeUpdate, NewProduct, ProductService, ProductUpdate, ReviewSubmission};

use common::ReviewId;
use thiserror::Error;

/// Errors that can occur during review operations.
#[derive(Debug, Error)]
pub enum ReviewError {
    /// The review does not exist on this product.
    #[error("Review not found: {0}")]
    NotFound(ReviewId),

    /// The acting user is not the author of the review.
    #[error("Review {0} is owned by another reviewer")]
    NotOwner(ReviewId),

    /// Rating outside the accepted 1-5 range.
    #[error("Invalid rating: {rating} (must be between 1 and 5)")]
    InvalidRating { rating: u8 },
}
