use async_trait::async_trait;
use futures::FutureExt;
use sqlx::Row;
use sqlx::postgres::PgRow;

use crate::adapter::db::session::SqlxSession;
use crate::application::app_error::AppResult;
use crate::application::interface::gateway::profile::{ProfileReader, ProfileWriter};
use crate::domain::entities::id::Id;
use crate::domain::entities::profile::{Department, Profile};
use crate::domain::entities::user::User;

#[derive(Clone)]
pub struct ProfileGateway {
    session: SqlxSession,
}

impl ProfileGateway {
    pub fn new(session: SqlxSession) -> Self {
        Self { session }
    }
}

/// Maps the `first_name`, `last_name`, `department` and `profile_picture` columns of a
/// joined row; the owner id is read from `user_id_column`.
pub(crate) fn get_profile(row: &PgRow, user_id_column: &str) -> AppResult<Profile> {
    let department: Option<String> = row.try_get("department")?;
    Ok(Profile {
        user_id: Id::new(row.try_get(user_id_column)?),
        first_name: row.try_get("first_name")?,
        last_name: row.try_get("last_name")?,
        department: department.map(|d| d.parse::<Department>()).transpose()?,
        profile_picture: row.try_get("profile_picture")?,
    })
}

#[async_trait]
impl ProfileWriter for ProfileGateway {
    async fn insert(&self, profile: Profile) -> AppResult<()> {
        self.session
            .with_tx(|tx| {
                let profile = profile.clone();
                async move {
                    sqlx::query(
                        r#"
                            INSERT INTO profiles
                                (user_id, first_name, last_name, department, profile_picture)
                            VALUES
                                ($1, $2, $3, $4::profile_department, $5)
                        "#,
                    )
                    .bind(profile.user_id.value)
                    .bind(&profile.first_name)
                    .bind(&profile.last_name)
                    .bind(profile.department.map(|d| d.as_str()))
                    .bind(&profile.profile_picture)
                    .execute(tx.as_mut())
                    .await?;
                    Ok(())
                }
                .boxed()
            })
            .await
    }

    async fn update(&self, profile: Profile) -> AppResult<()> {
        self.session
            .with_tx(|tx| {
                let profile = profile.clone();
                async move {
                    sqlx::query(
                        r#"
                            UPDATE
                                profiles
                            SET
                                first_name = $2,
                                last_name = $3,
                                department = $4::profile_department,
                                profile_picture = $5
                            WHERE
                                user_id = $1
                        "#,
                    )
                    .bind(profile.user_id.value)
                    .bind(&profile.first_name)
                    .bind(&profile.last_name)
                    .bind(profile.department.map(|d| d.as_str()))
                    .bind(&profile.profile_picture)
                    .execute(tx.as_mut())
                    .await?;
                    Ok(())
                }
                .boxed()
            })
            .await
    }
}

#[async_trait]
impl ProfileReader for ProfileGateway {
    async fn find_by_user_id(&self, user_id: &Id<User>) -> AppResult<Option<Profile>> {
        self.session
            .with_tx(|tx| {
                let user_id = user_id.value;
                async move {
                    let result = sqlx::query(
                        r#"
                            SELECT
                                user_id, first_name, last_name, department::text AS department, profile_picture
                            FROM
                                profiles
                            WHERE user_id = $1
                        "#,
                    )
                    .bind(user_id)
                    .fetch_optional(tx.as_mut())
                    .await?;

                    result.as_ref().map(|row| get_profile(row, "user_id")).transpose()
                }
                .boxed()
            })
            .await
    }

    async fn list_except(&self, user_id: &Id<User>) -> AppResult<Vec<Profile>> {
        self.session
            .with_tx(|tx| {
                let user_id = user_id.value;
                async move {
                    let rows = sqlx::query(
                        r#"
                            SELECT
                                user_id, first_name, last_name, department::text AS department, profile_picture
                            FROM
                                profiles
                            WHERE user_id <> $1
                            ORDER BY first_name, last_name, user_id
                        "#,
                    )
                    .bind(user_id)
                    .fetch_all(tx.as_mut())
                    .await?;

                    rows.iter().map(|row| get_profile(row, "user_id")).collect()
                }
                .boxed()
            })
            .await
    }
}
