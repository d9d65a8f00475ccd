use std::sync::Arc;

use tracing::{info, warn};

use crate::application::app_error::{AppError, AppResult};
use crate::application::dto::id::IdDTO;
use crate::application::dto::kudo::{CreateKudoDTO, GetKudoFeedDTO, KudoFeedDTO, RecentKudoDTO};
use crate::application::interface::db::DBSession;
use crate::application::interface::gateway::kudo::{KudoReader, KudoWriter};
use crate::application::interface::gateway::user::UserReader;
use crate::domain::entities::id::Id;
use crate::domain::entities::kudo::{Color, Emoji, Kudo, KudoStyle};
use crate::domain::entities::user::User;
use crate::domain::feed::{FeedPage, FeedQuery};

#[derive(Clone)]
pub struct CreateKudoInteractor {
    db_session: Arc<dyn DBSession>,
    user_reader: Arc<dyn UserReader>,
    kudo_writer: Arc<dyn KudoWriter>,
    allow_self_kudo: bool,
}

impl CreateKudoInteractor {
    pub fn new(
        db_session: Arc<dyn DBSession>,
        user_reader: Arc<dyn UserReader>,
        kudo_writer: Arc<dyn KudoWriter>,
        allow_self_kudo: bool,
    ) -> Self {
        Self {
            db_session,
            user_reader,
            kudo_writer,
            allow_self_kudo,
        }
    }

    pub async fn execute(&self, dto: CreateKudoDTO) -> AppResult<IdDTO> {
        let author_id: Id<User> = dto.author_id.try_into()?;
        let recipient_id: Id<User> = dto.recipient_id.try_into()?;
        let style = KudoStyle {
            background_color: dto.background_color.parse::<Color>()?,
            text_color: dto.text_color.parse::<Color>()?,
            emoji: dto.emoji.parse::<Emoji>()?,
        };

        let kudo = Kudo::new(dto.message, author_id, recipient_id, style)?;
        if kudo.is_self_kudo() && !self.allow_self_kudo {
            return Err(AppError::SelfKudoNotAllowed);
        }

        if !self.user_reader.exists(&kudo.author_id).await? {
            return Err(AppError::UserNotFound);
        }
        if !self.user_reader.exists(&kudo.recipient_id).await? {
            return Err(AppError::RecipientNotFound);
        }

        let author = kudo.author_id.clone();
        let recipient = kudo.recipient_id.clone();
        let kudo_id = match self.kudo_writer.insert(kudo).await {
            Ok(id) => id,
            Err(err) => {
                if let Err(rollback_err) = self.db_session.rollback().await {
                    warn!("Rollback after failed kudo insert failed: {}", rollback_err);
                }
                // A user deleted between the existence check and the insert.
                if err.is_foreign_key_violation() {
                    return Err(AppError::RecipientNotFound);
                }
                return Err(err);
            }
        };
        self.db_session.commit().await?;

        info!(kudo_id = %kudo_id, author = %author, recipient = %recipient, "Kudo created");
        Ok(IdDTO {
            id: kudo_id.to_string(),
        })
    }
}

#[derive(Clone)]
pub struct GetKudoFeedInteractor {
    kudo_reader: Arc<dyn KudoReader>,
    max_per_page: i64,
}

impl GetKudoFeedInteractor {
    pub fn new(kudo_reader: Arc<dyn KudoReader>, max_per_page: i64) -> Self {
        Self {
            kudo_reader,
            max_per_page,
        }
    }

    pub async fn execute(&self, dto: GetKudoFeedDTO) -> AppResult<KudoFeedDTO> {
        let recipient_id: Id<User> = dto.recipient_id.try_into()?;
        let page = FeedPage::new(dto.page, dto.per_page, self.max_per_page);
        let query = FeedQuery::compose(dto.sort.as_deref(), dto.filter.as_deref(), page);

        let total = self.kudo_reader.count_for_recipient(&recipient_id, &query).await?;
        let kudos = self.kudo_reader.list_for_recipient(&recipient_id, &query).await?;

        Ok(KudoFeedDTO {
            total,
            page: page.page,
            per_page: page.per_page,
            items: kudos.into_iter().map(Into::into).collect(),
        })
    }
}

#[derive(Clone)]
pub struct GetRecentKudosInteractor {
    kudo_reader: Arc<dyn KudoReader>,
    default_limit: i64,
    max_limit: i64,
}

impl GetRecentKudosInteractor {
    pub fn new(kudo_reader: Arc<dyn KudoReader>, default_limit: i64, max_limit: i64) -> Self {
        Self {
            kudo_reader,
            default_limit,
            max_limit,
        }
    }

    pub async fn execute(&self, limit: Option<i64>) -> AppResult<Vec<RecentKudoDTO>> {
        let limit = limit.unwrap_or(self.default_limit).clamp(1, self.max_limit.max(1));
        let kudos = self.kudo_reader.list_recent(limit).await?;
        Ok(kudos.into_iter().map(Into::into).collect())
    }
}
