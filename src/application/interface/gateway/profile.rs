use async_trait::async_trait;

use crate::application::app_error::AppResult;
use crate::domain::entities::id::Id;
use crate::domain::entities::profile::Profile;
use crate::domain::entities::user::User;

#[async_trait]
pub trait ProfileWriter: Send + Sync {
    async fn insert(&self, profile: Profile) -> AppResult<()>;
    async fn update(&self, profile: Profile) -> AppResult<()>;
}

#[async_trait]
pub trait ProfileReader: Send + Sync {
    async fn find_by_user_id(&self, user_id: &Id<User>) -> AppResult<Option<Profile>>;
    /// Every profile except `user_id`'s, by first then last name.
    async fn list_except(&self, user_id: &Id<User>) -> AppResult<Vec<Profile>>;
}
