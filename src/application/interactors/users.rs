use std::sync::Arc;

use crate::application::app_error::{AppError, AppResult};
use crate::application::dto::id::IdDTO;
use crate::application::dto::user::{ProfileDTO, UserDTO};
use crate::application::interface::gateway::profile::ProfileReader;
use crate::application::interface::gateway::user::UserReader;
use crate::domain::entities::id::Id;
use crate::domain::entities::user::User;

/// Account and profile of a single user. Backs both `/users/me` and `/users/{user_id}`.
#[derive(Clone)]
pub struct GetUserInteractor {
    user_reader: Arc<dyn UserReader>,
    profile_reader: Arc<dyn ProfileReader>,
}

impl GetUserInteractor {
    pub fn new(user_reader: Arc<dyn UserReader>, profile_reader: Arc<dyn ProfileReader>) -> Self {
        Self {
            user_reader,
            profile_reader,
        }
    }

    pub async fn execute(&self, dto: IdDTO) -> AppResult<UserDTO> {
        let user_id: Id<User> = dto.id.try_into()?;
        let user = self
            .user_reader
            .find_by_id(&user_id)
            .await?
            .ok_or(AppError::UserNotFound)?;
        let profile = self
            .profile_reader
            .find_by_user_id(&user_id)
            .await?
            .ok_or(AppError::UserNotFound)?;

        Ok(UserDTO {
            id: user.id.to_string(),
            email: user.email,
            profile: profile.into(),
            created_at: user.created_at,
        })
    }
}

/// Everyone a user can send kudos to.
#[derive(Clone)]
pub struct ListColleaguesInteractor {
    profile_reader: Arc<dyn ProfileReader>,
}

impl ListColleaguesInteractor {
    pub fn new(profile_reader: Arc<dyn ProfileReader>) -> Self {
        Self { profile_reader }
    }

    pub async fn execute(&self, dto: IdDTO) -> AppResult<Vec<ProfileDTO>> {
        let user_id: Id<User> = dto.id.try_into()?;
        let profiles = self.profile_reader.list_except(&user_id).await?;
        Ok(profiles.into_iter().map(ProfileDTO::from).collect())
    }
}
