use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::MessageData;
use crate::domain::authentication::ports::AuthServicePort;
use crate::inbound::http::router::AppState;

pub const FORGOT_PASSWORD_MESSAGE: &str =
    "Si el usuario existe, se enviará un enlace para restablecer la contraseña";

/// The same body is returned whether or not the account exists.
pub async fn forgot_password(
    State(state): State<AppState>,
    body: Result<Json<ForgotPasswordRequest>, JsonRejection>,
) -> Result<ApiSuccess<MessageData>, ApiError> {
    let Json(body) = body?;

    state
        .auth_service
        .forgot_password(&body.email)
        .await
        .map_err(ApiError::from)?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        MessageData::new(FORGOT_PASSWORD_MESSAGE),
    ))
}

/// `email` carries the username; the web client names the field after email.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ForgotPasswordRequest {
    pub email: String,
}
