use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Json, Request};
use serde::Serialize;
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::application::app_error::AppError;

/// JSON body that passed `validator` checks.
///
/// A body that does not deserialize is [`AppError::InvalidFormData`]; one that deserializes
/// but fails validation is [`AppError::Validation`] carrying the submitted values, so the
/// client can re-populate its form.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidJson<T>
where
    T: DeserializeOwned + Validate + Serialize,
    S: Send + Sync,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        if let Err(errors) = value.validate() {
            let fields = serde_json::to_value(&value).unwrap_or_default();
            return Err(AppError::Validation { errors, fields });
        }
        Ok(ValidJson(value))
    }
}
