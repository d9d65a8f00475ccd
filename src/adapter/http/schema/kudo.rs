use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError};

use crate::adapter::http::schema::user::ProfileResponse;
use crate::application::dto::kudo::{KudoDTO, KudoFeedDTO, KudoStyleDTO, RecentKudoDTO};

#[derive(Debug, Deserialize, Serialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateKudoRequest {
    #[validate(custom(function = "not_blank", message = "Please provide a message"))]
    pub message: String,
    /// RED, GREEN, YELLOW, BLUE or WHITE.
    #[validate(length(min = 1, message = "Please choose a background color"))]
    pub background_color: String,
    #[validate(length(min = 1, message = "Please choose a text color"))]
    pub text_color: String,
    /// THUMBSUP, PARTY or HANDSUP.
    #[validate(length(min = 1, message = "Please choose an emoji"))]
    pub emoji: String,
    #[validate(length(min = 1, message = "Please choose a recipient"))]
    pub recipient_id: String,
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct KudoFeedQuery {
    /// `date`, `sender` or `emoji`; anything else keeps creation order.
    pub sort: Option<String>,
    /// Case-insensitive text matched against the message and the sender's names.
    pub filter: Option<String>,
    #[param(minimum = 1, default = 1)]
    pub page: Option<i64>,
    #[param(minimum = 1)]
    pub per_page: Option<i64>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct RecentKudosQuery {
    #[param(minimum = 1)]
    pub limit: Option<i64>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct KudoStyleResponse {
    pub background_color: String,
    pub text_color: String,
    pub emoji: String,
    pub emoji_glyph: String,
}

impl From<KudoStyleDTO> for KudoStyleResponse {
    fn from(dto: KudoStyleDTO) -> Self {
        Self {
            background_color: dto.background_color,
            text_color: dto.text_color,
            emoji: dto.emoji,
            emoji_glyph: dto.emoji_glyph,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct KudoResponse {
    pub id: String,
    pub message: String,
    pub style: KudoStyleResponse,
    pub author: ProfileResponse,
    pub created_at: DateTime<Utc>,
}

impl From<KudoDTO> for KudoResponse {
    fn from(dto: KudoDTO) -> Self {
        Self {
            id: dto.id,
            message: dto.message,
            style: dto.style.into(),
            author: dto.author.into(),
            created_at: dto.created_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct KudoFeedResponse {
    pub total: i64,
    pub page: i64,
    pub per_page: i64,
    pub items: Vec<KudoResponse>,
}

impl From<KudoFeedDTO> for KudoFeedResponse {
    fn from(dto: KudoFeedDTO) -> Self {
        Self {
            total: dto.total,
            page: dto.page,
            per_page: dto.per_page,
            items: dto.items.into_iter().map(KudoResponse::from).collect(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecentKudoResponse {
    pub recipient_id: String,
    pub recipient: ProfileResponse,
    pub emoji: String,
    pub emoji_glyph: String,
}

impl From<RecentKudoDTO> for RecentKudoResponse {
    fn from(dto: RecentKudoDTO) -> Self {
        Self {
            recipient_id: dto.recipient_id,
            recipient: dto.recipient.into(),
            emoji: dto.emoji,
            emoji_glyph: dto.emoji_glyph,
        }
    }
}
