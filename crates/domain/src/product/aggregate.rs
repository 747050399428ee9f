//! Product aggregate implementation.

use chrono::{DateTime, Utc};
use common::{ProductId, ReviewId, UserId};
use serde::{Deserialize, Serialize};
use store::Document;
use uuid::Uuid;

use super::{RatingSummary, Review, ReviewError, rating};

/// Whether a review submission created a new review or replaced an
/// existing one by the same reviewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewOutcome {
    Created,
    Updated,
}

/// Product aggregate root.
///
/// Owns the embedded review list exclusively. The `rating` and
/// `num_reviews` fields are derived through the rating aggregator after
/// every review mutation and are never settable from outside.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub slug: String,
    pub image: String,
    pub images: Vec<String>,
    pub brand: String,
    pub category: String,
    pub description: String,
    pub price: f64,
    pub count_in_stock: u32,
    pub discount: Option<f64>,
    pub num_sold: u32,

    rating: f64,
    num_reviews: u32,
    reviews: Vec<Review>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Document for Product {
    fn document_id(&self) -> Uuid {
        self.id.as_uuid()
    }
}

// Query methods
impl Product {
    /// Current aggregate rating (0 when there are no reviews).
    pub fn rating(&self) -> f64 {
        self.rating
    }

    /// Current review count.
    pub fn num_reviews(&self) -> u32 {
        self.num_reviews
    }

    /// All reviews, in submission order.
    pub fn reviews(&self) -> &[Review] {
        &self.reviews
    }

    /// Looks up a review by its id.
    pub fn find_review(&self, review_id: ReviewId) -> Option<&Review> {
        self.reviews.iter().find(|r| r.id == review_id)
    }

    /// Looks up the review written by a given user, if any.
    pub fn review_by(&self, reviewer: UserId) -> Option<&Review> {
        self.reviews.iter().find(|r| r.reviewer == reviewer)
    }
}

// Review lifecycle (mutations)
impl Product {
    /// Creates a product with an empty review list.
    #[allow(clippy::too_many_arguments)]
    pub fn create(
        name: impl Into<String>,
        slug: impl Into<String>,
        image: impl Into<String>,
        images: Vec<String>,
        brand: impl Into<String>,
        category: impl Into<String>,
        description: impl Into<String>,
        price: f64,
        count_in_stock: u32,
        discount: Option<f64>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: ProductId::new(),
            name: name.into(),
            slug: slug.into(),
            image: image.into(),
            images,
            brand: brand.into(),
            category: category.into(),
            description: description.into(),
            price,
            count_in_stock,
            discount,
            num_sold: 0,
            rating: 0.0,
            num_reviews: 0,
            reviews: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Submits a review with upsert semantics.
    ///
    /// If the reviewer already has a review on this product, its rating
    /// and comment are replaced in place; otherwise a new review is
    /// appended. Either way the aggregator recomputes the summary. An
    /// out-of-range rating is rejected, never clamped.
    pub fn submit_review(
        &mut self,
        reviewer: UserId,
        reviewer_name: &str,
        rating: u8,
        comment: &str,
        now: DateTime<Utc>,
    ) -> Result<(ReviewId, ReviewOutcome), ReviewError> {
        if !(1..=5).contains(&rating) {
            return Err(ReviewError::InvalidRating { rating });
        }

        let (review_id, outcome) =
            if let Some(existing) = self.reviews.iter_mut().find(|r| r.reviewer == reviewer) {
                existing.rating = rating;
                existing.comment = comment.to_string();
                existing.updated_at = now;
                (existing.id, ReviewOutcome::Updated)
            } else {
                let review = Review::new(reviewer, reviewer_name, rating, comment, now);
                let id = review.id;
                self.reviews.push(review);
                (id, ReviewOutcome::Created)
            };

        self.refresh_rating(now);
        Ok((review_id, outcome))
    }

    /// Adds or removes a like on a review.
    ///
    /// Set semantics: liking twice or unliking a non-liker is a no-op.
    /// The product-level rating is not touched.
    pub fn set_review_liked(
        &mut self,
        review_id: ReviewId,
        user: UserId,
        liked: bool,
        now: DateTime<Utc>,
    ) -> Result<&Review, ReviewError> {
        let index = self
            .reviews
            .iter()
            .position(|r| r.id == review_id)
            .ok_or(ReviewError::NotFound(review_id))?;

        let review = &mut self.reviews[index];
        if liked {
            review.liked_by.insert(user);
        } else {
            review.liked_by.remove(&user);
        }

        self.updated_at = now;
        Ok(&self.reviews[index])
    }

    /// Deletes a review owned by the acting user.
    ///
    /// Ownership is the reviewer identity recorded on the review, not
    /// whatever the request claims. Removing the last review drives the
    /// summary back to zero through the aggregator.
    pub fn delete_review(
        &mut self,
        review_id: ReviewId,
        acting_user: UserId,
        now: DateTime<Utc>,
    ) -> Result<(), ReviewError> {
        let index = self
            .reviews
            .iter()
            .position(|r| r.id == review_id)
            .ok_or(ReviewError::NotFound(review_id))?;

        if self.reviews[index].reviewer != acting_user {
            return Err(ReviewError::NotOwner(review_id));
        }

        self.reviews.remove(index);
        self.refresh_rating(now);
        Ok(())
    }

    /// Runs the aggregator and stores the result on the aggregate.
    fn refresh_rating(&mut self, now: DateTime<Utc>) {
        let RatingSummary {
            rating,
            num_reviews,
        } = rating::recompute(&self.reviews);
        self.rating = rating;
        self.num_reviews = num_reviews;
        self.updated_at = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product() -> Product {
        Product::create(
            "Alabaster Mug",
            "alabaster-mug",
            "/images/mug.jpg",
            vec![],
            "Atelier",
            "Kitchen",
            "A mug",
            19.99,
            10,
            None,
            Utc::now(),
        )
    }

    #[test]
    fn new_product_has_zero_summary() {
        let p = product();
        assert_eq!(p.rating(), 0.0);
        assert_eq!(p.num_reviews(), 0);
        assert!(p.reviews().is_empty());
    }

    #[test]
    fn submit_review_appends_and_recomputes() {
        let mut p = product();
        let (id, outcome) = p
            .submit_review(UserId::new(), "Ana", 4, "Nice", Utc::now())
            .unwrap();

        assert_eq!(outcome, ReviewOutcome::Created);
        assert_eq!(p.num_reviews(), 1);
        assert_eq!(p.rating(), 4.0);
        assert!(p.find_review(id).is_some());
    }

    #[test]
    fn second_submission_by_same_reviewer_updates_in_place() {
        let mut p = product();
        let ana = UserId::new();

        let (first_id, _) = p.submit_review(ana, "Ana", 4, "Nice", Utc::now()).unwrap();
        let (second_id, outcome) = p
            .submit_review(ana, "Ana", 2, "Changed my mind", Utc::now())
            .unwrap();

        assert_eq!(outcome, ReviewOutcome::Updated);
        assert_eq!(first_id, second_id);
        assert_eq!(p.num_reviews(), 1);
        assert_eq!(p.rating(), 2.0);
        assert_eq!(p.find_review(first_id).unwrap().comment, "Changed my mind");
    }

    #[test]
    fn out_of_range_rating_is_rejected_not_clamped() {
        let mut p = product();
        let user = UserId::new();

        for bad in [0u8, 6, 200] {
            let result = p.submit_review(user, "Ana", bad, "", Utc::now());
            assert!(matches!(
                result,
                Err(ReviewError::InvalidRating { rating }) if rating == bad
            ));
        }
        assert_eq!(p.num_reviews(), 0);
    }

    #[test]
    fn like_is_idempotent_set_insert() {
        let mut p = product();
        let (id, _) = p
            .submit_review(UserId::new(), "Ana", 4, "", Utc::now())
            .unwrap();

        let fan = UserId::new();
        p.set_review_liked(id, fan, true, Utc::now()).unwrap();
        let review = p.set_review_liked(id, fan, true, Utc::now()).unwrap();
        assert_eq!(review.num_of_likes(), 1);
    }

    #[test]
    fn unlike_non_liker_is_noop() {
        let mut p = product();
        let (id, _) = p
            .submit_review(UserId::new(), "Ana", 4, "", Utc::now())
            .unwrap();

        let review = p
            .set_review_liked(id, UserId::new(), false, Utc::now())
            .unwrap();
        assert_eq!(review.num_of_likes(), 0);
    }

    #[test]
    fn like_does_not_touch_product_rating() {
        let mut p = product();
        let (id, _) = p
            .submit_review(UserId::new(), "Ana", 4, "", Utc::now())
            .unwrap();

        p.set_review_liked(id, UserId::new(), true, Utc::now())
            .unwrap();
        assert_eq!(p.rating(), 4.0);
        assert_eq!(p.num_reviews(), 1);
    }

    #[test]
    fn like_unknown_review_is_not_found() {
        let mut p = product();
        let result = p.set_review_liked(ReviewId::new(), UserId::new(), true, Utc::now());
        assert!(matches!(result, Err(ReviewError::NotFound(_))));
    }

    #[test]
    fn delete_requires_ownership() {
        let mut p = product();
        let ana = UserId::new();
        let (id, _) = p.submit_review(ana, "Ana", 4, "", Utc::now()).unwrap();

        let result = p.delete_review(id, UserId::new(), Utc::now());
        assert!(matches!(result, Err(ReviewError::NotOwner(_))));
        assert_eq!(p.num_reviews(), 1);

        p.delete_review(id, ana, Utc::now()).unwrap();
        assert_eq!(p.num_reviews(), 0);
    }

    #[test]
    fn delete_sequence_keeps_summary_exact() {
        // [{r:4},{r:2}] -> 3.0/2, delete one -> remaining/1, delete last -> 0/0
        let mut p = product();
        let ana = UserId::new();
        let ben = UserId::new();
        let (ana_review, _) = p.submit_review(ana, "Ana", 4, "", Utc::now()).unwrap();
        let (ben_review, _) = p.submit_review(ben, "Ben", 2, "", Utc::now()).unwrap();

        assert_eq!(p.rating(), 3.0);
        assert_eq!(p.num_reviews(), 2);

        p.delete_review(ana_review, ana, Utc::now()).unwrap();
        assert_eq!(p.rating(), 2.0);
        assert_eq!(p.num_reviews(), 1);

        p.delete_review(ben_review, ben, Utc::now()).unwrap();
        assert_eq!(p.rating(), 0.0);
        assert_eq!(p.num_reviews(), 0);
    }

    #[test]
    fn product_serialization_preserves_reviews() {
        let mut p = product();
        p.submit_review(UserId::new(), "Ana", 5, "Great", Utc::now())
            .unwrap();

        let json = serde_json::to_string(&p).unwrap();
        let back: Product = serde_json::from_str(&json).unwrap();
        assert_eq!(back.num_reviews(), 1);
        assert_eq!(back.rating(), 5.0);
        assert_eq!(back.reviews().len(), 1);
    }
}
