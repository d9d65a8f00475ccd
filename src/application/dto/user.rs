use chrono::{DateTime, Utc};

use crate::domain::entities::profile::Profile;

#[derive(Debug, Clone)]
pub struct ProfileDTO {
    pub user_id: String,
    pub first_name: String,
    pub last_name: String,
    pub department: Option<String>,
    pub profile_picture: Option<String>,
}

impl From<Profile> for ProfileDTO {
    fn from(profile: Profile) -> Self {
        Self {
            user_id: profile.user_id.to_string(),
            first_name: profile.first_name,
            last_name: profile.last_name,
            department: profile.department.map(|d| d.as_str().to_string()),
            profile_picture: profile.profile_picture,
        }
    }
}

#[derive(Debug, Clone)]
pub struct UserDTO {
    pub id: String,
    pub email: String,
    pub profile: ProfileDTO,
    pub created_at: DateTime<Utc>,
}
