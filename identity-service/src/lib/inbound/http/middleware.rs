use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::extract::Request;
use axum::extract::State;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;

use crate::domain::authentication::ports::AuthServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;

/// Bearer token taken from the `Authorization` header.
///
/// Rejects with 401 when the header is missing or is not of the form
/// `<scheme> <token>` with a `Bearer` scheme.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BearerToken(pub String);

#[async_trait]
impl<S> FromRequestParts<S> for BearerToken
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        extract_token_from_headers(&parts.headers).map(|token| BearerToken(token.to_string()))
    }
}

/// Middleware that lets only non-guest sessions through.
///
/// The verified caller is stored in the request extensions as an
/// [`AuthenticatedUser`](crate::domain::authentication::models::AuthenticatedUser).
pub async fn require_non_guest(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let user = state
        .auth_service
        .require_non_guest(&token)
        .await
        .map_err(|e| {
            tracing::warn!(error = %e, "Non-guest gate rejected request");
            ApiError::from(e)
        })?;

    req.extensions_mut().insert(user);

    Ok(next.run(req).await)
}

pub fn extract_token_from_headers(headers: &HeaderMap) -> Result<&str, ApiError> {
    let auth_str = headers
        .get(AUTHORIZATION)
        .ok_or_else(|| ApiError::Unauthorized("Missing Authorization header".to_string()))?
        .to_str()
        .map_err(|_| ApiError::Unauthorized("Invalid Authorization header".to_string()))?;

    match auth_str.split_once(' ') {
        Some((scheme, token))
            if scheme.eq_ignore_ascii_case("bearer")
                && !token.is_empty()
                && !token.contains(' ') =>
        {
            Ok(token)
        }
        _ => Err(ApiError::Unauthorized(
            "Invalid Authorization header format. Expected: Bearer <token>".to_string(),
        )),
    }
}
