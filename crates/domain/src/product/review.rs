//! Embedded review entity.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use common::{ReviewId, UserId};
use serde::{Deserialize, Serialize};

/// A review embedded in a product.
///
/// Identity is the explicit `id` key, never the position in the list.
/// Like membership and ownership are keyed by the reviewer's canonical
/// [`UserId`]; the display name is carried separately for rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    /// Unique identifier within the owning product.
    pub id: ReviewId,

    /// Canonical identity of the author.
    pub reviewer: UserId,

    /// Display name of the author at submission time.
    pub reviewer_name: String,

    /// Star rating, always within 1..=5.
    pub rating: u8,

    /// Free-form review text.
    pub comment: String,

    /// Users who liked this review. Set semantics: membership is unique.
    pub liked_by: BTreeSet<UserId>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Review {
    /// Creates a new review.
    pub fn new(
        reviewer: UserId,
        reviewer_name: impl Into<String>,
        rating: u8,
        comment: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: ReviewId::new(),
            reviewer,
            reviewer_name: reviewer_name.into(),
            rating,
            comment: comment.into(),
            liked_by: BTreeSet::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Number of likes, derived from the membership set.
    pub fn num_of_likes(&self) -> usize {
        self.liked_by.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn num_of_likes_tracks_set_size() {
        let mut review = Review::new(UserId::new(), "Ana", 4, "Solid", Utc::now());
        assert_eq!(review.num_of_likes(), 0);

        let fan = UserId::new();
        review.liked_by.insert(fan);
        review.liked_by.insert(fan);
        assert_eq!(review.num_of_likes(), 1);
    }

    #[test]
    fn review_serialization_roundtrip() {
        let review = Review::new(UserId::new(), "Ana", 5, "Great", Utc::now());
        let json = serde_json::to_string(&review).unwrap();
        let back: Review = serde_json::from_str(&json).unwrap();
        assert_eq!(back, review);
    }
}
