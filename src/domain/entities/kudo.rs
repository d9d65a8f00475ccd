use std::str::FromStr;

use chrono::{DateTime, Utc};

use crate::application::app_error::{AppError, AppResult};
use crate::domain::entities::id::Id;
use crate::domain::entities::profile::Profile;
use crate::domain::entities::user::User;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Red,
    Green,
    Yellow,
    Blue,
    White,
}

impl Color {
    pub const ALL: [Color; 5] = [Color::Red, Color::Green, Color::Yellow, Color::Blue, Color::White];

    pub fn as_str(&self) -> &'static str {
        match self {
            Color::Red => "RED",
            Color::Green => "GREEN",
            Color::Yellow => "YELLOW",
            Color::Blue => "BLUE",
            Color::White => "WHITE",
        }
    }
}

impl FromStr for Color {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "RED" => Ok(Color::Red),
            "GREEN" => Ok(Color::Green),
            "YELLOW" => Ok(Color::Yellow),
            "BLUE" => Ok(Color::Blue),
            "WHITE" => Ok(Color::White),
            _ => Err(AppError::InvalidColor(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Emoji {
    Thumbsup,
    Party,
    Handsup,
}

impl Emoji {
    pub const ALL: [Emoji; 3] = [Emoji::Thumbsup, Emoji::Party, Emoji::Handsup];

    pub fn as_str(&self) -> &'static str {
        match self {
            Emoji::Thumbsup => "THUMBSUP",
            Emoji::Party => "PARTY",
            Emoji::Handsup => "HANDSUP",
        }
    }

    pub fn glyph(&self) -> &'static str {
        match self {
            Emoji::Thumbsup => "👍",
            Emoji::Party => "🎉",
            Emoji::Handsup => "🙌🏻",
        }
    }
}

impl FromStr for Emoji {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "THUMBSUP" => Ok(Emoji::Thumbsup),
            "PARTY" => Ok(Emoji::Party),
            "HANDSUP" => Ok(Emoji::Handsup),
            _ => Err(AppError::InvalidEmoji(s.to_string())),
        }
    }
}

/// Visual style embedded in a kudo row. Has no identity of its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KudoStyle {
    pub background_color: Color,
    pub text_color: Color,
    pub emoji: Emoji,
}

impl Default for KudoStyle {
    fn default() -> Self {
        Self {
            background_color: Color::Red,
            text_color: Color::White,
            emoji: Emoji::Thumbsup,
        }
    }
}

/// A praise message from `author_id` to `recipient_id`. Never mutated once stored.
#[derive(Debug, Clone)]
pub struct Kudo {
    pub id: Id<Kudo>,
    pub message: String,
    pub author_id: Id<User>,
    pub recipient_id: Id<User>,
    pub style: KudoStyle,
    pub created_at: DateTime<Utc>,
}

impl Kudo {
    pub fn new(message: String, author_id: Id<User>, recipient_id: Id<User>, style: KudoStyle) -> AppResult<Self> {
        if message.trim().is_empty() {
            return Err(AppError::EmptyKudoMessage);
        }

        Ok(Self {
            id: Id::generate(),
            message,
            author_id,
            recipient_id,
            style,
            created_at: Utc::now(),
        })
    }

    pub fn is_self_kudo(&self) -> bool {
        self.author_id == self.recipient_id
    }
}

/// Feed row: a received kudo with its author's profile attached.
#[derive(Debug, Clone)]
pub struct KudoWithAuthor {
    pub id: Id<Kudo>,
    pub message: String,
    pub style: KudoStyle,
    pub created_at: DateTime<Utc>,
    pub author: Profile,
}

/// Activity ticker row. Message and author are left out on purpose.
#[derive(Debug, Clone)]
pub struct RecentKudo {
    pub recipient_id: Id<User>,
    pub recipient: Profile,
    pub emoji: Emoji,
}
