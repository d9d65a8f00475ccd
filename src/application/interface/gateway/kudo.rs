use async_trait::async_trait;

use crate::application::app_error::AppResult;
use crate::domain::entities::id::Id;
use crate::domain::entities::kudo::{Kudo, KudoWithAuthor, RecentKudo};
use crate::domain::entities::user::User;
use crate::domain::feed::FeedQuery;

#[async_trait]
pub trait KudoWriter: Send + Sync {
    async fn insert(&self, kudo: Kudo) -> AppResult<Id<Kudo>>;
}

#[async_trait]
pub trait KudoReader: Send + Sync {
    /// Kudos addressed to `recipient_id` that satisfy the query's filter, in the query's
    /// order and page. The recipient constraint is always ANDed with the filter.
    async fn list_for_recipient(&self, recipient_id: &Id<User>, query: &FeedQuery) -> AppResult<Vec<KudoWithAuthor>>;
    /// Row count of `list_for_recipient` without paging.
    async fn count_for_recipient(&self, recipient_id: &Id<User>, query: &FeedQuery) -> AppResult<i64>;
    /// Newest kudos across all recipients.
    async fn list_recent(&self, limit: i64) -> AppResult<Vec<RecentKudo>>;
}
