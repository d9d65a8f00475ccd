use std::collections::BTreeMap;

use axum::extract::multipart::MultipartError;
use axum::extract::rejection::JsonRejection;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::Value;
use tracing::{error, warn};
use utoipa::ToSchema;
use validator::ValidationErrors;

use crate::application::app_error::AppError;

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// Field-keyed validation failure with the submitted values echoed back.
#[derive(Debug, Serialize, ToSchema)]
pub struct ValidationErrorResponse {
    pub errors: BTreeMap<String, String>,
    #[schema(value_type = Object)]
    pub fields: Value,
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        warn!("Rejected request body: {}", rejection.body_text());
        AppError::InvalidFormData
    }
}

impl From<MultipartError> for AppError {
    fn from(rejection: MultipartError) -> Self {
        warn!("Rejected multipart body: {}", rejection.body_text());
        AppError::InvalidFormData
    }
}

/// First message per field; the validator code when no message was attached.
pub fn field_messages(errors: &ValidationErrors) -> BTreeMap<String, String> {
    errors
        .field_errors()
        .into_iter()
        .filter_map(|(field, errs)| {
            errs.first().map(|e| {
                let message = e.message.as_ref().map(|m| m.to_string()).unwrap_or_else(|| e.code.to_string());
                (field.to_string(), message)
            })
        })
        .collect()
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidFormData
            | AppError::Validation { .. }
            | AppError::InvalidId(_)
            | AppError::EmptyKudoMessage
            | AppError::SelfKudoNotAllowed
            | AppError::InvalidColor(_)
            | AppError::InvalidEmoji(_)
            | AppError::InvalidDepartment(_)
            | AppError::EmailAlreadyTaken
            | AppError::UnsupportedImageFormat
            | AppError::AvatarTooLarge(_) => StatusCode::BAD_REQUEST,
            AppError::UserNotFound | AppError::RecipientNotFound | AppError::StorageNotFound => StatusCode::NOT_FOUND,
            AppError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AppError::DatabaseError(_)
            | AppError::SessionAlreadyCommitted
            | AppError::StorageError(_)
            | AppError::PasswordHashError
            | AppError::InvalidHeader(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if let AppError::Validation { errors, fields } = self {
            let body = ValidationErrorResponse {
                errors: field_messages(&errors),
                fields,
            };
            return (status, Json(body)).into_response();
        }

        let message = if status.is_server_error() {
            error!("{}", self);
            status.canonical_reason().unwrap_or("Internal Server Error").to_string()
        } else {
            self.to_string()
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}
