/*
 * Responsibility
 * - アプリ共通の AppError 定義
 * - IntoResponse 実装 (HTTP status / JSON error body: {"error": "<message>"})
 * - 認証 service の error を統一的に変換
 */
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::services::auth::AccessJwtError;
use crate::services::auth::claims::ClaimsError;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Authorization cookie is required")]
    MissingCredential,
    // signature / format / algorithm: verifier の文言をそのまま返す
    #[error("{0}")]
    Verification(String),
    #[error("Invalid token")]
    InvalidToken,
    #[error("Invalid user_id format")]
    MalformedUserId,
    #[error("internal server error")]
    Internal,
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::MissingCredential | AppError::Verification(_) | AppError::InvalidToken => {
                StatusCode::UNAUTHORIZED
            }
            AppError::MalformedUserId | AppError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorResponse {
            error: self.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<AccessJwtError> for AppError {
    fn from(e: AccessJwtError) -> Self {
        match e {
            AccessJwtError::Jwt(_)
            | AccessJwtError::UnexpectedSigningMethod
            | AccessJwtError::UsedBeforeIssued => {
                AppError::Verification(e.to_string())
            }
            AccessJwtError::InvalidToken => AppError::InvalidToken,
            // Signature-valid token with a bad user_id is an issuer-side defect.
            AccessJwtError::Claims(ClaimsError::InvalidUserId) => AppError::MalformedUserId,
            AccessJwtError::EmptySecret => AppError::Internal,
        }
    }
}
