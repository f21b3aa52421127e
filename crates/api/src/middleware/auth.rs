//! Authentication extractor.
//!
//! Identity is supplied by the upstream gateway as trusted headers:
//! `x-user-id` carries the authenticated user's ID and `x-user-is-staff`
//! marks administrative callers. This service never sees credentials; it
//! only consumes the identity the authorization collaborator established.

use axum::{extract::FromRequestParts, http::request::Parts};

use oxcart_core::UserId;
use oxcart_store::services::Requester;

use crate::error::ApiError;

/// Header carrying the authenticated user's ID.
pub const USER_ID_HEADER: &str = "x-user-id";

/// Header marking staff callers; `"true"` or `"1"`.
pub const STAFF_HEADER: &str = "x-user-is-staff";

/// Extractor that requires an authenticated caller.
///
/// Rejects with a 401 if the gateway supplied no usable identity.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     RequireAuth(requester): RequireAuth,
/// ) -> impl IntoResponse {
///     format!("Hello, user {}!", requester.user_id)
/// }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct RequireAuth(pub Requester);

impl<S> FromRequestParts<S> for RequireAuth
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user_id = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.parse::<i32>().ok())
            .ok_or(ApiError::Unauthenticated)?;

        let is_staff = parts
            .headers
            .get(STAFF_HEADER)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value == "true" || value == "1");

        Ok(Self(Requester {
            user_id: UserId::new(user_id),
            is_staff,
        }))
    }
}
