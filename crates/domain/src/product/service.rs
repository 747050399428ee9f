//! Product service: catalog CRUD plus the review lifecycle manager.

use chrono::Utc;
use common::{ProductId, ReviewId, UserId};
use store::Collection;

use crate::error::DomainError;

use super::{Product, Review, ReviewOutcome};

/// Fields accepted when creating a product.
///
/// `rating`/`num_reviews` are deliberately absent: the summary always
/// starts at zero and only the aggregator moves it.
#[derive(Debug, Clone)]
pub struct NewProduct {
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
}

/// Catalog fields replaced by an admin update.
#[derive(Debug, Clone)]
pub struct ProductUpdate {
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
}

/// Result of a review submission.
#[derive(Debug, Clone)]
pub struct ReviewSubmission {
    /// The created or replaced review.
    pub review: Review,
    /// Aggregate rating after the mutation.
    pub rating: f64,
    /// Review count after the mutation.
    pub num_reviews: u32,
    /// True when a new review was appended, false when replaced.
    pub created: bool,
}

/// Result of a like/unlike toggle.
#[derive(Debug, Clone)]
pub struct LikeUpdate {
    pub review: Review,
    pub num_of_likes: usize,
}

/// Service managing products and their embedded reviews.
///
/// Every mutation loads the full current aggregate from the collection
/// immediately before transforming it, then writes the whole document
/// back. The transform happens on an owned copy, so a failed put leaves
/// no observable partial state.
pub struct ProductService<C: Collection<Product>> {
    products: C,
}

impl<C: Collection<Product>> ProductService<C> {
    /// Creates a new product service backed by the given collection.
    pub fn new(products: C) -> Self {
        Self { products }
    }

    async fn load(&self, product_id: ProductId) -> Result<Product, DomainError> {
        self.products
            .get(product_id.as_uuid())
            .await?
            .ok_or(DomainError::ProductNotFound(product_id))
    }

    // -- Catalog --

    /// Creates a product with a zeroed review summary.
    #[tracing::instrument(skip(self, new))]
    pub async fn create_product(&self, new: NewProduct) -> Result<Product, DomainError> {
        let existing = self.products.list().await?;
        ensure_unique(&existing, None, &new.slug, &new.name)?;

        let product = Product::create(
            new.name,
            new.slug,
            new.image,
            new.images,
            new.brand,
            new.category,
            new.description,
            new.price,
            new.count_in_stock,
            new.discount,
            Utc::now(),
        );
        self.products.put(product.clone()).await?;

        tracing::info!(product_id = %product.id, slug = %product.slug, "product created");
        Ok(product)
    }

    /// Replaces the catalog fields of a product. Reviews and the rating
    /// summary are untouched. The new slug and name must not collide
    /// with any other product in the catalog.
    #[tracing::instrument(skip(self, update))]
    pub async fn update_product(
        &self,
        product_id: ProductId,
        update: ProductUpdate,
    ) -> Result<Product, DomainError> {
        let mut product = self.load(product_id).await?;

        let existing = self.products.list().await?;
        ensure_unique(&existing, Some(product_id), &update.slug, &update.name)?;

        product.name = update.name;
        product.slug = update.slug;
        product.image = update.image;
        product.images = update.images;
        product.brand = update.brand;
        product.category = update.category;
        product.description = update.description;
        product.price = update.price;
        product.count_in_stock = update.count_in_stock;
        product.discount = update.discount;
        product.num_sold = update.num_sold;
        product.updated_at = Utc::now();

        self.products.put(product.clone()).await?;
        Ok(product)
    }

    /// Removes a product from the catalog.
    #[tracing::instrument(skip(self))]
    pub async fn delete_product(&self, product_id: ProductId) -> Result<(), DomainError> {
        if !self.products.remove(product_id.as_uuid()).await? {
            return Err(DomainError::ProductNotFound(product_id));
        }
        Ok(())
    }

    /// Loads a product by id, or `None` if it does not exist.
    #[tracing::instrument(skip(self))]
    pub async fn get_product(&self, product_id: ProductId) -> Result<Option<Product>, DomainError> {
        Ok(self.products.get(product_id.as_uuid()).await?)
    }

    /// Loads a product by slug.
    #[tracing::instrument(skip(self))]
    pub async fn get_by_slug(&self, slug: &str) -> Result<Option<Product>, DomainError> {
        let products = self.products.list().await?;
        Ok(products.into_iter().find(|p| p.slug == slug))
    }

    /// Returns all products.
    #[tracing::instrument(skip(self))]
    pub async fn list_products(&self) -> Result<Vec<Product>, DomainError> {
        Ok(self.products.list().await?)
    }

    // -- Review lifecycle --

    /// Submits a review, replacing the reviewer's previous one if present.
    #[tracing::instrument(skip(self, comment))]
    pub async fn submit_review(
        &self,
        product_id: ProductId,
        reviewer: UserId,
        reviewer_name: &str,
        rating: u8,
        comment: &str,
    ) -> Result<ReviewSubmission, DomainError> {
        let mut product = self.load(product_id).await?;

        let (review_id, outcome) =
            product.submit_review(reviewer, reviewer_name, rating, comment, Utc::now())?;
        self.products.put(product.clone()).await?;

        metrics::counter!("reviews_submitted_total").increment(1);
        tracing::info!(
            %product_id,
            %review_id,
            created = outcome == ReviewOutcome::Created,
            "review submitted"
        );

        let review = product
            .find_review(review_id)
            .cloned()
            .ok_or(DomainError::Review(super::ReviewError::NotFound(review_id)))?;

        Ok(ReviewSubmission {
            review,
            rating: product.rating(),
            num_reviews: product.num_reviews(),
            created: outcome == ReviewOutcome::Created,
        })
    }

    /// Adds or removes the acting user's like on a review.
    #[tracing::instrument(skip(self))]
    pub async fn set_review_liked(
        &self,
        product_id: ProductId,
        review_id: ReviewId,
        user: UserId,
        liked: bool,
    ) -> Result<LikeUpdate, DomainError> {
        let mut product = self.load(product_id).await?;

        let review = product
            .set_review_liked(review_id, user, liked, Utc::now())?
            .clone();
        self.products.put(product).await?;

        let num_of_likes = review.num_of_likes();
        Ok(LikeUpdate {
            review,
            num_of_likes,
        })
    }

    /// Deletes a review owned by the acting user and returns the
    /// product with its recomputed summary.
    #[tracing::instrument(skip(self))]
    pub async fn delete_review(
        &self,
        product_id: ProductId,
        review_id: ReviewId,
        acting_user: UserId,
    ) -> Result<Product, DomainError> {
        let mut product = self.load(product_id).await?;

        product.delete_review(review_id, acting_user, Utc::now())?;
        self.products.put(product.clone()).await?;

        Ok(product)
    }
}

/// Rejects a slug or name already taken by another product.
///
/// `exclude` carries the id of the product being updated so that a
/// product never collides with itself.
fn ensure_unique(
    existing: &[Product],
    exclude: Option<ProductId>,
    slug: &str,
    name: &str,
) -> Result<(), DomainError> {
    for other in existing.iter().filter(|p| Some(p.id) != exclude) {
        if other.slug == slug {
            return Err(DomainError::DuplicateSlug {
                slug: slug.to_string(),
            });
        }
        if other.name == name {
            return Err(DomainError::DuplicateName {
                name: name.to_string(),
            });
        }
    }
    Ok(())
}
