use chrono::{DateTime, Utc};

use crate::application::dto::user::ProfileDTO;
use crate::domain::entities::kudo::{KudoStyle, KudoWithAuthor, RecentKudo};

#[derive(Debug, Clone)]
pub struct CreateKudoDTO {
    pub author_id: String,
    pub recipient_id: String,
    pub message: String,
    pub background_color: String,
    pub text_color: String,
    pub emoji: String,
}

#[derive(Debug, Clone)]
pub struct GetKudoFeedDTO {
    pub recipient_id: String,
    pub sort: Option<String>,
    pub filter: Option<String>,
    pub page: i64,
    pub per_page: i64,
}

#[derive(Debug, Clone)]
pub struct KudoStyleDTO {
    pub background_color: String,
    pub text_color: String,
    pub emoji: String,
    pub emoji_glyph: String,
}

impl From<KudoStyle> for KudoStyleDTO {
    fn from(style: KudoStyle) -> Self {
        Self {
            background_color: style.background_color.as_str().to_string(),
            text_color: style.text_color.as_str().to_string(),
            emoji: style.emoji.as_str().to_string(),
            emoji_glyph: style.emoji.glyph().to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct KudoDTO {
    pub id: String,
    pub message: String,
    pub style: KudoStyleDTO,
    pub author: ProfileDTO,
    pub created_at: DateTime<Utc>,
}

impl From<KudoWithAuthor> for KudoDTO {
    fn from(kudo: KudoWithAuthor) -> Self {
        Self {
            id: kudo.id.to_string(),
            message: kudo.message,
            style: kudo.style.into(),
            author: kudo.author.into(),
            created_at: kudo.created_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct KudoFeedDTO {
    pub total: i64,
    pub page: i64,
    pub per_page: i64,
    pub items: Vec<KudoDTO>,
}

#[derive(Debug, Clone)]
pub struct RecentKudoDTO {
    pub recipient_id: String,
    pub recipient: ProfileDTO,
    pub emoji: String,
    pub emoji_glyph: String,
}

impl From<RecentKudo> for RecentKudoDTO {
    fn from(kudo: RecentKudo) -> Self {
        Self {
            recipient_id: kudo.recipient_id.to_string(),
            recipient: kudo.recipient.into(),
            emoji: kudo.emoji.as_str().to_string(),
            emoji_glyph: kudo.emoji.glyph().to_string(),
        }
    }
}
