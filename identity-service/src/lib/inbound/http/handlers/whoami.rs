use axum::extract::State;
use axum::http::StatusCode;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::authentication::models::Identity;
use crate::domain::authentication::ports::AuthServicePort;
use crate::domain::user::models::Role;
use crate::inbound::http::middleware::BearerToken;
use crate::inbound::http::router::AppState;

pub async fn whoami(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
) -> Result<ApiSuccess<WhoamiResponseData>, ApiError> {
    state
        .auth_service
        .whoami(&token)
        .await
        .map_err(ApiError::from)
        .map(|identity| ApiSuccess::new(StatusCode::OK, identity.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WhoamiResponseData {
    pub username: String,
    pub role: Role,
}

impl From<Identity> for WhoamiResponseData {
    fn from(identity: Identity) -> Self {
        Self {
            username: identity.username,
            role: identity.role,
        }
    }
}
