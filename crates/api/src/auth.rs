//! Identity contract with the external auth collaborator.
//!
//! Upstream authentication middleware terminates credentials and
//! forwards the resolved identity in trusted headers. This extractor
//! only reads that contract; it performs no credential checks.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use common::UserId;

use crate::error::ApiError;

const USER_ID_HEADER: &str = "x-user-id";
const USER_NAME_HEADER: &str = "x-user-name";
const USER_EMAIL_HEADER: &str = "x-user-email";
const ADMIN_HEADER: &str = "x-admin";

/// Authenticated identity resolved by the auth collaborator.
#[derive(Debug, Clone)]
pub struct Identity {
    pub user_id: UserId,
    pub name: String,
    pub email: String,
    pub is_admin: bool,
}

impl Identity {
    /// Fails with 403 unless the identity carries the admin capability.
    pub fn require_admin(&self) -> Result<(), ApiError> {
        if self.is_admin {
            Ok(())
        } else {
            Err(ApiError::Forbidden("admin capability required".to_string()))
        }
    }
}

fn header_value(parts: &Parts, name: &'static str) -> Result<String, ApiError> {
    let value = parts
        .headers
        .get(name)
        .ok_or_else(|| ApiError::Unauthorized(format!("missing {name} header")))?;
    value
        .to_str()
        .map(str::to_string)
        .map_err(|_| ApiError::Unauthorized(format!("malformed {name} header")))
}

impl<S: Send + Sync> FromRequestParts<S> for Identity {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user_id = header_value(parts, USER_ID_HEADER)?
            .parse::<UserId>()
            .map_err(|_| ApiError::Unauthorized(format!("malformed {USER_ID_HEADER} header")))?;
        let name = header_value(parts, USER_NAME_HEADER)?;
        let email = header_value(parts, USER_EMAIL_HEADER).unwrap_or_default();
        let is_admin = parts
            .headers
            .get(ADMIN_HEADER)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v == "true" || v == "1");

        Ok(Identity {
            user_id,
            name,
            email,
            is_admin,
        })
    }
}
