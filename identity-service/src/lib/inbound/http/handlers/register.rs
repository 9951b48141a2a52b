use axum::extract::rejection::FormRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Form;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::authentication::models::AuthSession;
use crate::domain::authentication::models::RegisterCommand;
use crate::domain::authentication::ports::AuthServicePort;
use crate::domain::user::models::Role;
use crate::domain::user::models::Username;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;

pub async fn register(
    State(state): State<AppState>,
    body: Result<Form<CredentialsForm>, FormRejection>,
) -> Result<ApiSuccess<TokenResponseData>, ApiError> {
    let Form(body) = body?;
    let username = Username::new(body.username).map_err(UserError::from)?;

    state
        .auth_service
        .register(RegisterCommand::new(username, body.password))
        .await
        .map_err(ApiError::from)
        .map(|session| ApiSuccess::new(StatusCode::OK, session.into()))
}

/// Form body shared by register and login.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CredentialsForm {
    pub username: String,
    pub password: String,
}

/// Session response returned by register, login and guest login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenResponseData {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub role: Role,
    pub username: String,
    pub token_type: String,
}

impl From<AuthSession> for TokenResponseData {
    fn from(session: AuthSession) -> Self {
        Self {
            access_token: session.access_token,
            refresh_token: None,
            role: session.role,
            username: session.username,
            token_type: "bearer".to_string(),
        }
    }
}
