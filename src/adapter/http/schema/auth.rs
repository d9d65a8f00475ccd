use serde::{Deserialize, Serialize};
use serde_email::Email;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Deserialize, Serialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[validate(email(message = "Please provide a valid email"))]
    pub email: String,
    #[serde(skip_serializing)]
    #[validate(length(min = 5, message = "Password must be at least 5 characters long"))]
    pub password: String,
    #[validate(length(min = 1, message = "Please provide a first name"))]
    pub first_name: String,
    #[validate(length(min = 1, message = "Please provide a last name"))]
    pub last_name: String,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[schema(value_type = String, format = "email")]
    pub email: Email,
    pub password: String,
    #[serde(default)]
    pub remember_me: bool,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}
