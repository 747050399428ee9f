//! Catalog and review endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use chrono::{DateTime, Utc};
use common::{ProductId, ReviewId};
use domain::{NewProduct, Product, ProductUpdate, Review};
use gateway::PaymentGateway;
use serde::{Deserialize, Serialize};
use store::Collection;
use uuid::Uuid;

use crate::AppState;
use crate::auth::Identity;
use crate::error::ApiError;

// -- Request types --

#[derive(Deserialize)]
pub struct CreateProductRequest {
    pub name: String,
    pub slug: String,
    pub image: String,
    #[serde(default)]
    pub images: Vec<String>,
    pub brand: String,
    pub category: String,
    pub description: String,
    pub price: f64,
    pub count_in_stock: u32,
    pub discount: Option<f64>,
}

#[derive(Deserialize)]
pub struct UpdateProductRequest {
    pub name: String,
    pub slug: String,
    pub image: String,
    #[serde(default)]
    pub images: Vec<String>,
    pub brand: String,
    pub category: String,
    pub description: String,
    pub price: f64,
    pub count_in_stock: u32,
    pub discount: Option<f64>,
    #[serde(default)]
    pub num_sold: u32,
}

#[derive(Deserialize)]
pub struct SubmitReviewRequest {
    /// Star rating. Accepted as a JSON number so the handler can reject
    /// fractional values with the same error shape as out-of-range ones.
    pub rating: f64,
    pub comment: String,
}

#[derive(Deserialize)]
pub struct LikeReviewRequest {
    pub liked: bool,
}

// -- Response types --

#[derive(Serialize)]
pub struct ReviewResponse {
    pub id: String,
    pub reviewer_name: String,
    pub rating: u8,
    pub comment: String,
    pub num_of_likes: usize,
    pub liked_by: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Review> for ReviewResponse {
    fn from(review: &Review) -> Self {
        Self {
            id: review.id.to_string(),
            reviewer_name: review.reviewer_name.clone(),
            rating: review.rating,
            comment: review.comment.clone(),
            num_of_likes: review.num_of_likes(),
            liked_by: review.liked_by.iter().map(|u| u.to_string()).collect(),
            created_at: review.created_at,
            updated_at: review.updated_at,
        }
    }
}

#[derive(Serialize)]
pub struct ProductResponse {
    pub id: String,
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
    pub rating: f64,
    pub num_reviews: u32,
    pub reviews: Vec<ReviewResponse>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Product> for ProductResponse {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.to_string(),
            name: product.name.clone(),
            slug: product.slug.clone(),
            image: product.image.clone(),
            images: product.images.clone(),
            brand: product.brand.clone(),
            category: product.category.clone(),
            description: product.description.clone(),
            price: product.price,
            count_in_stock: product.count_in_stock,
            discount: product.discount,
            num_sold: product.num_sold,
            rating: product.rating(),
            num_reviews: product.num_reviews(),
            reviews: product.reviews().iter().map(ReviewResponse::from).collect(),
            created_at: product.created_at,
            updated_at: product.updated_at,
        }
    }
}

#[derive(Serialize)]
pub struct ProductMessageResponse {
    pub message: &'static str,
    pub product: ProductResponse,
}

#[derive(Serialize)]
pub struct ReviewSubmittedResponse {
    pub message: &'static str,
    pub review: ReviewResponse,
    pub rating: f64,
    pub num_reviews: u32,
}

#[derive(Serialize)]
pub struct ReviewLikedResponse {
    pub message: &'static str,
    pub review: ReviewResponse,
    pub num_of_likes: usize,
}

#[derive(Serialize)]
pub struct DeletedResponse {
    pub message: &'static str,
}

// -- Handlers --

/// GET /products — list the catalog.
#[tracing::instrument(skip(state))]
pub async fn list<P, O, G>(
    State(state): State<Arc<AppState<P, O, G>>>,
) -> Result<Json<Vec<ProductResponse>>, ApiError>
where
    P: Collection<Product> + 'static,
    O: Collection<domain::Order> + 'static,
    G: PaymentGateway + 'static,
{
    let products = state.products.list_products().await?;
    Ok(Json(products.iter().map(ProductResponse::from).collect()))
}

/// POST /products — create a product (admin).
#[tracing::instrument(skip(state, identity, req))]
pub async fn create<P, O, G>(
    State(state): State<Arc<AppState<P, O, G>>>,
    identity: Identity,
    Json(req): Json<CreateProductRequest>,
) -> Result<(StatusCode, Json<ProductMessageResponse>), ApiError>
where
    P: Collection<Product> + 'static,
    O: Collection<domain::Order> + 'static,
    G: PaymentGateway + 'static,
{
    identity.require_admin()?;

    let product = state
        .products
        .create_product(NewProduct {
            name: req.name,
            slug: req.slug,
            image: req.image,
            images: req.images,
            brand: req.brand,
            category: req.category,
            description: req.description,
            price: req.price,
            count_in_stock: req.count_in_stock,
            discount: req.discount,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ProductMessageResponse {
            message: "Product Created",
            product: ProductResponse::from(&product),
        }),
    ))
}

/// GET /products/{id} — load a product by id.
#[tracing::instrument(skip(state))]
pub async fn get<P, O, G>(
    State(state): State<Arc<AppState<P, O, G>>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ProductResponse>, ApiError>
where
    P: Collection<Product> + 'static,
    O: Collection<domain::Order> + 'static,
    G: PaymentGateway + 'static,
{
    let product = state
        .products
        .get_product(ProductId::from_uuid(id))
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Product {id} not found")))?;

    Ok(Json(ProductResponse::from(&product)))
}

/// GET /products/slug/{slug} — load a product by slug.
#[tracing::instrument(skip(state))]
pub async fn get_by_slug<P, O, G>(
    State(state): State<Arc<AppState<P, O, G>>>,
    Path(slug): Path<String>,
) -> Result<Json<ProductResponse>, ApiError>
where
    P: Collection<Product> + 'static,
    O: Collection<domain::Order> + 'static,
    G: PaymentGateway + 'static,
{
    let product = state
        .products
        .get_by_slug(&slug)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Product '{slug}' not found")))?;

    Ok(Json(ProductResponse::from(&product)))
}

/// PUT /products/{id} — replace catalog fields (admin).
#[tracing::instrument(skip(state, identity, req))]
pub async fn update<P, O, G>(
    State(state): State<Arc<AppState<P, O, G>>>,
    identity: Identity,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateProductRequest>,
) -> Result<Json<ProductMessageResponse>, ApiError>
where
    P: Collection<Product> + 'static,
    O: Collection<domain::Order> + 'static,
    G: PaymentGateway + 'static,
{
    identity.require_admin()?;

    let product = state
        .products
        .update_product(
            ProductId::from_uuid(id),
            ProductUpdate {
                name: req.name,
                slug: req.slug,
                image: req.image,
                images: req.images,
                brand: req.brand,
                category: req.category,
                description: req.description,
                price: req.price,
                count_in_stock: req.count_in_stock,
                discount: req.discount,
                num_sold: req.num_sold,
            },
        )
        .await?;

    Ok(Json(ProductMessageResponse {
        message: "Product Updated",
        product: ProductResponse::from(&product),
    }))
}

/// DELETE /products/{id} — remove a product (admin).
#[tracing::instrument(skip(state, identity))]
pub async fn delete<P, O, G>(
    State(state): State<Arc<AppState<P, O, G>>>,
    identity: Identity,
    Path(id): Path<Uuid>,
) -> Result<Json<DeletedResponse>, ApiError>
where
    P: Collection<Product> + 'static,
    O: Collection<domain::Order> + 'static,
    G: PaymentGateway + 'static,
{
    identity.require_admin()?;

    state.products.delete_product(ProductId::from_uuid(id)).await?;
    Ok(Json(DeletedResponse {
        message: "Product Deleted",
    }))
}

/// POST /products/{id}/reviews — submit or replace the caller's review.
#[tracing::instrument(skip(state, identity, req))]
pub async fn submit_review<P, O, G>(
    State(state): State<Arc<AppState<P, O, G>>>,
    identity: Identity,
    Path(id): Path<Uuid>,
    Json(req): Json<SubmitReviewRequest>,
) -> Result<(StatusCode, Json<ReviewSubmittedResponse>), ApiError>
where
    P: Collection<Product> + 'static,
    O: Collection<domain::Order> + 'static,
    G: PaymentGateway + 'static,
{
    if req.rating.fract() != 0.0 || !(0.0..=f64::from(u8::MAX)).contains(&req.rating) {
        return Err(ApiError::BadRequest(format!(
            "Invalid rating: {} (must be an integer between 1 and 5)",
            req.rating
        )));
    }

    let submission = state
        .products
        .submit_review(
            ProductId::from_uuid(id),
            identity.user_id,
            &identity.name,
            req.rating as u8,
            &req.comment,
        )
        .await?;

    let (status, message) = if submission.created {
        (StatusCode::CREATED, "Review Created")
    } else {
        (StatusCode::OK, "Review Updated")
    };

    Ok((
        status,
        Json(ReviewSubmittedResponse {
            message,
            review: ReviewResponse::from(&submission.review),
            rating: submission.rating,
            num_reviews: submission.num_reviews,
        }),
    ))
}

/// POST /products/{id}/reviews/{review_id} — like or unlike a review.
#[tracing::instrument(skip(state, identity, req))]
pub async fn like_review<P, O, G>(
    State(state): State<Arc<AppState<P, O, G>>>,
    identity: Identity,
    Path((id, review_id)): Path<(Uuid, Uuid)>,
    Json(req): Json<LikeReviewRequest>,
) -> Result<Json<ReviewLikedResponse>, ApiError>
where
    P: Collection<Product> + 'static,
    O: Collection<domain::Order> + 'static,
    G: PaymentGateway + 'static,
{
    let update = state
        .products
        .set_review_liked(
            ProductId::from_uuid(id),
            ReviewId::from_uuid(review_id),
            identity.user_id,
            req.liked,
        )
        .await?;

    Ok(Json(ReviewLikedResponse {
        message: if req.liked {
            "Review Liked"
        } else {
            "Review Unliked"
        },
        review: ReviewResponse::from(&update.review),
        num_of_likes: update.num_of_likes,
    }))
}

/// DELETE /products/{id}/reviews/{review_id} — delete the caller's review.
#[tracing::instrument(skip(state, identity))]
pub async fn delete_review<P, O, G>(
    State(state): State<Arc<AppState<P, O, G>>>,
    identity: Identity,
    Path((id, review_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<ProductMessageResponse>, ApiError>
where
    P: Collection<Product> + 'static,
    O: Collection<domain::Order> + 'static,
    G: PaymentGateway + 'static,
{
    let product = state
        .products
        .delete_review(
            ProductId::from_uuid(id),
            ReviewId::from_uuid(review_id),
            identity.user_id,
        )
        .await?;

    Ok(Json(ProductMessageResponse {
        message: "Review Deleted",
        product: ProductResponse::from(&product),
    }))
}
