//! API error types with HTTP response mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use domain::{DomainError, OrderError, ReviewError};

/// API-level error type that maps to HTTP responses.
#[derive(Debug)]
pub enum ApiError {
    /// Resource not found.
    NotFound(String),
    /// Acting user does not own the resource.
    Forbidden(String),
    /// Bad request from the client.
    BadRequest(String),
    /// Request is missing a resolved identity.
    Unauthorized(String),
    /// Resource conflicts with existing state.
    Conflict(String),
    /// The payment gateway failed. Reported distinctly, never as
    /// not-found or validation.
    Gateway(String),
    /// Internal server error.
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::Gateway(msg) => {
                tracing::error!(error = %msg, "payment gateway failure");
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
            ApiError::Internal(msg) => {
                tracing::error!(error = %msg, "internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
        };

        let body = serde_json::json!({ "error": message });
        (status, axum::Json(body)).into_response()
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match &err {
            DomainError::ProductNotFound(_) | DomainError::OrderNotFound(_) => {
                ApiError::NotFound(err.to_string())
            }
            DomainError::DuplicateSlug { .. } | DomainError::DuplicateName { .. } => {
                ApiError::Conflict(err.to_string())
            }
            DomainError::Review(review_err) => match review_err {
                ReviewError::NotFound(_) => ApiError::NotFound(err.to_string()),
                ReviewError::NotOwner(_) => ApiError::Forbidden(err.to_string()),
                ReviewError::InvalidRating { .. } => ApiError::BadRequest(err.to_string()),
            },
            DomainError::Order(order_err) => match order_err {
                OrderError::NoItems
                | OrderError::InvalidQuantity { .. }
                | OrderError::InvalidPrice { .. } => ApiError::BadRequest(err.to_string()),
            },
            DomainError::Gateway(_) => ApiError::Gateway(err.to_string()),
            DomainError::Store(_) => ApiError::Internal(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use common::{OrderId, ProductId, ReviewId};
    use gateway::GatewayError;

    use super::*;

    #[test]
    fn not_found_maps_to_404() {
        let err: ApiError = DomainError::ProductNotFound(ProductId::new()).into();
        assert!(matches!(err, ApiError::NotFound(_)));

        let err: ApiError = DomainError::OrderNotFound(OrderId::new()).into();
        assert!(matches!(err, ApiError::NotFound(_)));
    }

    #[test]
    fn ownership_violation_maps_to_403() {
        let err: ApiError = DomainError::Review(ReviewError::NotOwner(ReviewId::new())).into();
        assert!(matches!(err, ApiError::Forbidden(_)));
    }

    #[test]
    fn invalid_rating_maps_to_400() {
        let err: ApiError = DomainError::Review(ReviewError::InvalidRating { rating: 9 }).into();
        assert!(matches!(err, ApiError::BadRequest(_)));
    }

    #[test]
    fn catalog_collisions_map_to_409() {
        let err: ApiError = DomainError::DuplicateSlug {
            slug: "mug".to_string(),
        }
        .into();
        assert!(matches!(err, ApiError::Conflict(_)));

        let err: ApiError = DomainError::DuplicateName {
            name: "Mug".to_string(),
        }
        .into();
        assert!(matches!(err, ApiError::Conflict(_)));
    }

    #[test]
    fn gateway_failure_stays_distinct_from_not_found() {
        let err: ApiError =
            DomainError::Gateway(GatewayError::Unavailable("down".to_string())).into();
        assert!(matches!(err, ApiError::Gateway(_)));
    }
}
