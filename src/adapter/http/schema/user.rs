use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::application::dto::user::{ProfileDTO, UserDTO};

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    pub user_id: String,
    pub first_name: String,
    pub last_name: String,
    pub department: Option<String>,
    pub profile_picture: Option<String>,
}

impl From<ProfileDTO> for ProfileResponse {
    fn from(dto: ProfileDTO) -> Self {
        Self {
            user_id: dto.user_id,
            first_name: dto.first_name,
            last_name: dto.last_name,
            department: dto.department,
            profile_picture: dto.profile_picture,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: String,
    pub email: String,
    pub profile: ProfileResponse,
    pub created_at: DateTime<Utc>,
}

impl From<UserDTO> for UserResponse {
    fn from(dto: UserDTO) -> Self {
        Self {
            id: dto.id,
            email: dto.email,
            profile: dto.profile.into(),
            created_at: dto.created_at,
        }
    }
}
