use async_trait::async_trait;
use futures::FutureExt;
use sqlx::Row;
use sqlx::postgres::PgRow;
use uuid::Uuid;

use crate::adapter::db::session::SqlxSession;
use crate::application::app_error::AppResult;
use crate::application::interface::gateway::user::{UserReader, UserWriter};
use crate::domain::entities::id::Id;
use crate::domain::entities::user::User;

#[derive(Clone)]
pub struct UserGateway {
    session: SqlxSession,
}

impl UserGateway {
    pub fn new(session: SqlxSession) -> Self {
        Self { session }
    }

    fn get_user(row: &PgRow) -> AppResult<User> {
        Ok(User {
            id: Id::new(row.try_get("id")?),
            email: row.try_get("email")?,
            password: row.try_get("password")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

#[async_trait]
impl UserWriter for UserGateway {
    async fn insert(&self, user: User) -> AppResult<Id<User>> {
        self.session
            .with_tx(|tx| {
                let user = user.clone();
                async move {
                    let result = sqlx::query(
                        r#"
                            INSERT INTO users
                                (id, email, password, created_at, updated_at)
                            VALUES
                                ($1, $2, $3, $4, $5)
                            RETURNING
                                id
                        "#,
                    )
                    .bind(user.id.value)
                    .bind(&user.email)
                    .bind(&user.password)
                    .bind(user.created_at)
                    .bind(user.updated_at)
                    .fetch_one(tx.as_mut())
                    .await?;
                    let id: Uuid = result.try_get("id")?;
                    Ok(Id::new(id))
                }
                .boxed()
            })
            .await
    }

    async fn delete(&self, user_id: &Id<User>) -> AppResult<bool> {
        self.session
            .with_tx(|tx| {
                let user_id = user_id.value;
                async move {
                    let result = sqlx::query("DELETE FROM users WHERE id = $1")
                        .bind(user_id)
                        .execute(tx.as_mut())
                        .await?;
                    Ok(result.rows_affected() > 0)
                }
                .boxed()
            })
            .await
    }
}

#[async_trait]
impl UserReader for UserGateway {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        self.session
            .with_tx(|tx| {
                let email = email.to_owned();
                async move {
                    let result = sqlx::query(
                        r#"
                            SELECT
                                id, email, password, created_at, updated_at
                            FROM
                                users
                            WHERE email = $1
                        "#,
                    )
                    .bind(&email)
                    .fetch_optional(tx.as_mut())
                    .await?;

                    result.as_ref().map(Self::get_user).transpose()
                }
                .boxed()
            })
            .await
    }

    async fn find_by_id(&self, user_id: &Id<User>) -> AppResult<Option<User>> {
        self.session
            .with_tx(|tx| {
                let user_id = user_id.value;
                async move {
                    let result = sqlx::query(
                        r#"
                            SELECT
                                id, email, password, created_at, updated_at
                            FROM
                                users
                            WHERE id = $1
                        "#,
                    )
                    .bind(user_id)
                    .fetch_optional(tx.as_mut())
                    .await?;

                    result.as_ref().map(Self::get_user).transpose()
                }
                .boxed()
            })
            .await
    }

    async fn exists(&self, user_id: &Id<User>) -> AppResult<bool> {
        self.session
            .with_tx(|tx| {
                let user_id = user_id.value;
                async move {
                    let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE id = $1)")
                        .bind(user_id)
                        .fetch_one(tx.as_mut())
                        .await?;
                    Ok(exists)
                }
                .boxed()
            })
            .await
    }

    async fn is_email_taken(&self, email: &str) -> AppResult<bool> {
        self.session
            .with_tx(|tx| {
                let email = email.to_owned();
                async move {
                    let taken: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
                        .bind(&email)
                        .fetch_one(tx.as_mut())
                        .await?;
                    Ok(taken)
                }
                .boxed()
            })
            .await
    }
}
