use async_trait::async_trait;
use futures::FutureExt;
use sqlx::postgres::PgRow;
use sqlx::{Postgres, QueryBuilder, Row};
use uuid::Uuid;

use crate::adapter::db::gateway::profile::get_profile;
use crate::adapter::db::session::SqlxSession;
use crate::application::app_error::AppResult;
use crate::application::interface::gateway::kudo::{KudoReader, KudoWriter};
use crate::domain::entities::id::Id;
use crate::domain::entities::kudo::{Color, Emoji, Kudo, KudoStyle, KudoWithAuthor, RecentKudo};
use crate::domain::entities::user::User;
use crate::domain::feed::{FeedFilter, FeedOrdering, FeedQuery};

const FEED_COLUMNS: &str = r#"
    SELECT
        k.id, k.message, k.created_at,
        k.background_color::text AS background_color,
        k.text_color::text AS text_color,
        k.emoji::text AS emoji,
        p.user_id AS author_id, p.first_name, p.last_name,
        p.department::text AS department, p.profile_picture
    FROM
        kudos k
        JOIN profiles p ON p.user_id = k.author_id
"#;

const FEED_COUNT: &str = r#"
    SELECT
        COUNT(k.id) AS total
    FROM
        kudos k
        JOIN profiles p ON p.user_id = k.author_id
"#;

#[derive(Clone)]
pub struct KudoGateway {
    session: SqlxSession,
}

impl KudoGateway {
    pub fn new(session: SqlxSession) -> Self {
        Self { session }
    }

    fn get_style(row: &PgRow) -> AppResult<KudoStyle> {
        let background_color: String = row.try_get("background_color")?;
        let text_color: String = row.try_get("text_color")?;
        let emoji: String = row.try_get("emoji")?;
        Ok(KudoStyle {
            background_color: background_color.parse::<Color>()?,
            text_color: text_color.parse::<Color>()?,
            emoji: emoji.parse::<Emoji>()?,
        })
    }

    fn get_kudo_with_author(row: &PgRow) -> AppResult<KudoWithAuthor> {
        Ok(KudoWithAuthor {
            id: Id::new(row.try_get("id")?),
            message: row.try_get("message")?,
            style: Self::get_style(row)?,
            created_at: row.try_get("created_at")?,
            author: get_profile(row, "author_id")?,
        })
    }

    fn get_recent_kudo(row: &PgRow) -> AppResult<RecentKudo> {
        let emoji: String = row.try_get("emoji")?;
        Ok(RecentKudo {
            recipient_id: Id::new(row.try_get("recipient_id")?),
            recipient: get_profile(row, "recipient_id")?,
            emoji: emoji.parse::<Emoji>()?,
        })
    }
}

/// Escapes `ILIKE` wildcards so the needle only ever matches literally.
pub(crate) fn escape_like(needle: &str) -> String {
    let mut escaped = String::with_capacity(needle.len());
    for c in needle.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

pub(crate) fn order_by(ordering: FeedOrdering) -> &'static str {
    match ordering {
        FeedOrdering::Default => " ORDER BY k.created_at ASC, k.id ASC",
        FeedOrdering::Date => " ORDER BY k.created_at DESC, k.id DESC",
        FeedOrdering::Sender => " ORDER BY lower(p.first_name) ASC, k.created_at ASC, k.id ASC",
        FeedOrdering::Emoji => " ORDER BY k.emoji::text ASC, k.created_at ASC, k.id ASC",
    }
}

/// `WHERE recipient = $n AND (message OR first_name OR last_name)`. The recipient constraint
/// is pushed first and unconditionally.
fn push_scope(builder: &mut QueryBuilder<'_, Postgres>, recipient_id: Uuid, filter: Option<&FeedFilter>) {
    builder.push(" WHERE k.recipient_id = ").push_bind(recipient_id);
    if let Some(filter) = filter {
        let pattern = format!("%{}%", escape_like(filter.needle()));
        builder
            .push(" AND (k.message ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR p.first_name ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR p.last_name ILIKE ")
            .push_bind(pattern)
            .push(")");
    }
}

#[async_trait]
impl KudoWriter for KudoGateway {
    async fn insert(&self, kudo: Kudo) -> AppResult<Id<Kudo>> {
        self.session
            .with_tx(|tx| {
                let kudo = kudo.clone();
                async move {
                    let id: Uuid = sqlx::query_scalar(
                        r#"
                            INSERT INTO kudos
                                (id, message, author_id, recipient_id, background_color, text_color, emoji, created_at)
                            VALUES
                                ($1, $2, $3, $4, $5::kudo_color, $6::kudo_color, $7::kudo_emoji, $8)
                            RETURNING
                                id
                        "#,
                    )
                    .bind(kudo.id.value)
                    .bind(&kudo.message)
                    .bind(kudo.author_id.value)
                    .bind(kudo.recipient_id.value)
                    .bind(kudo.style.background_color.as_str())
                    .bind(kudo.style.text_color.as_str())
                    .bind(kudo.style.emoji.as_str())
                    .bind(kudo.created_at)
                    .fetch_one(tx.as_mut())
                    .await?;
                    Ok(Id::new(id))
                }
                .boxed()
            })
            .await
    }
}

#[async_trait]
impl KudoReader for KudoGateway {
    async fn list_for_recipient(&self, recipient_id: &Id<User>, query: &FeedQuery) -> AppResult<Vec<KudoWithAuthor>> {
        self.session
            .with_tx(|tx| {
                let recipient_id = recipient_id.value;
                let query = query.clone();
                async move {
                    let mut builder = QueryBuilder::<Postgres>::new(FEED_COLUMNS);
                    push_scope(&mut builder, recipient_id, query.filter.as_ref());
                    builder
                        .push(order_by(query.ordering))
                        .push(" LIMIT ")
                        .push_bind(query.page.limit())
                        .push(" OFFSET ")
                        .push_bind(query.page.offset());

                    let rows = builder.build().fetch_all(tx.as_mut()).await?;
                    rows.iter().map(Self::get_kudo_with_author).collect()
                }
                .boxed()
            })
            .await
    }

    async fn count_for_recipient(&self, recipient_id: &Id<User>, query: &FeedQuery) -> AppResult<i64> {
        self.session
            .with_tx(|tx| {
                let recipient_id = recipient_id.value;
                let filter = query.filter.clone();
                async move {
                    let mut builder = QueryBuilder::<Postgres>::new(FEED_COUNT);
                    push_scope(&mut builder, recipient_id, filter.as_ref());

                    let row = builder.build().fetch_one(tx.as_mut()).await?;
                    Ok(row.try_get("total")?)
                }
                .boxed()
            })
            .await
    }

    async fn list_recent(&self, limit: i64) -> AppResult<Vec<RecentKudo>> {
        self.session
            .with_tx(|tx| {
                async move {
                    let rows = sqlx::query(
                        r#"
                            SELECT
                                k.recipient_id, k.emoji::text AS emoji,
                                p.first_name, p.last_name,
                                p.department::text AS department, p.profile_picture
                            FROM
                                kudos k
                                JOIN profiles p ON p.user_id = k.recipient_id
                            ORDER BY k.created_at DESC, k.id DESC
                            LIMIT $1
                        "#,
                    )
                    .bind(limit)
                    .fetch_all(tx.as_mut())
                    .await?;

                    rows.iter().map(Self::get_recent_kudo).collect()
                }
                .boxed()
            })
            .await
    }
}
