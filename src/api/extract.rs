//! Principal Extractor
//!
//! The acting user is established by the identity layer in front of this
//! service and forwarded in the `x-user-id` header.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};

use crate::error::GeocacheError;
use crate::store::UserId;

/// Header carrying the authenticated user id.
pub const USER_ID_HEADER: &str = "x-user-id";

/// Id of the user making the request.
///
/// Only the header format is checked here; handlers confirm the user exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Principal(pub UserId);

#[async_trait]
impl<S> FromRequestParts<S> for Principal
where
    S: Send + Sync,
{
    type Rejection = GeocacheError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let raw = parts.headers.get(USER_ID_HEADER).ok_or_else(|| {
            GeocacheError::Unauthorized(format!("missing {} header", USER_ID_HEADER))
        })?;

        raw.to_str()
            .ok()
            .and_then(|v| v.trim().parse::<UserId>().ok())
            .filter(|id| *id > 0)
            .map(Principal)
            .ok_or_else(|| {
                GeocacheError::Unauthorized(format!("malformed {} header", USER_ID_HEADER))
            })
    }
}
