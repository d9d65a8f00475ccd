use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::application::dto::profile::AvatarUrlDTO;
use crate::domain::entities::profile::Department;

#[derive(Debug, Deserialize, Serialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    #[validate(length(min = 1, message = "Please provide a first name"))]
    pub first_name: String,
    #[validate(length(min = 1, message = "Please provide a last name"))]
    pub last_name: String,
    /// One of MARKETING, SALES, ENGINEERING, HR. Empty clears it.
    #[serde(default)]
    #[validate(custom(function = "known_department", message = "Please choose a valid department"))]
    pub department: Option<String>,
}

fn known_department(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() || value.parse::<Department>().is_ok() {
        return Ok(());
    }
    Err(ValidationError::new("unknown_department"))
}

/// Multipart form of `POST /avatar`.
#[derive(Debug, Deserialize, ToSchema)]
#[allow(dead_code)]
pub struct AvatarUploadRequest {
    #[serde(rename = "profile-pic")]
    #[schema(value_type = String, format = Binary)]
    pub profile_pic: Vec<u8>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AvatarResponse {
    pub image_url: String,
}

impl From<AvatarUrlDTO> for AvatarResponse {
    fn from(dto: AvatarUrlDTO) -> Self {
        Self {
            image_url: dto.image_url,
        }
    }
}
