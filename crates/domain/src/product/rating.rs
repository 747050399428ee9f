//! Rating aggregator.
//!
//! Centralizes the denormalized `rating`/`num_reviews` computation so
//! the invariant holds at every call site, including the empty-list
//! case after the last review is deleted. The mean is recomputed from
//! the full review list on every mutation; there is no incremental
//! running average to accumulate floating-point drift.

use serde::{Deserialize, Serialize};

use super::review::Review;

/// Denormalized rating summary for a product.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatingSummary {
    /// Arithmetic mean of all review ratings, 0 when there are none.
    pub rating: f64,

    /// Number of reviews on the product.
    pub num_reviews: u32,
}

impl RatingSummary {
    /// The summary of a product with no reviews.
    pub fn empty() -> Self {
        Self {
            rating: 0.0,
            num_reviews: 0,
        }
    }
}

/// Recomputes the rating summary from the full review list.
///
/// Pure function of its input: no side effects, no I/O.
pub fn recompute(reviews: &[Review]) -> RatingSummary {
    if reviews.is_empty() {
        return RatingSummary::empty();
    }

    let sum: u32 = reviews.iter().map(|r| u32::from(r.rating)).sum();
    RatingSummary {
        rating: f64::from(sum) / reviews.len() as f64,
        num_reviews: reviews.len() as u32,
    }
}
