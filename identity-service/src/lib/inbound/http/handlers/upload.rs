use axum::http::StatusCode;
use axum::Extension;
use serde::Serialize;

use super::ApiSuccess;
use crate::domain::authentication::models::AuthenticatedUser;

/// Example endpoint behind the non-guest gate.
pub async fn upload(
    Extension(user): Extension<AuthenticatedUser>,
) -> ApiSuccess<UploadResponseData> {
    tracing::info!(username = %user.username, "Upload accepted");

    ApiSuccess::new(
        StatusCode::OK,
        UploadResponseData {
            message: "Archivo subido con éxito".to_string(),
            usuario: user.username,
        },
    )
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UploadResponseData {
    pub message: String,
    pub usuario: String,
}
