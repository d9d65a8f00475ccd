#![cfg(test)]

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::application::interface::crypto::CredentialsHasher;
use crate::domain::entities::kudo::Emoji;
use crate::infra::state::AppState;

pub fn unique_email() -> String {
    let id = Uuid::now_v7().as_simple().to_string();
    format!("t_{}@test.example", &id[16..])
}

pub async fn hash_password(state: &AppState, password: &str) -> String {
    state.hasher.hash_password(password).await.expect("hash password")
}

/// A user row plus its profile, with an unusable password.
pub async fn insert_user_with_profile(pool: &PgPool, first_name: &str, last_name: &str) -> Uuid {
    insert_user_with_credentials(pool, &unique_email(), "x", first_name, last_name).await
}

pub async fn insert_user_with_credentials(
    pool: &PgPool,
    email: &str,
    hashed_password: &str,
    first_name: &str,
    last_name: &str,
) -> Uuid {
    let user_id = Uuid::now_v7();
    sqlx::query("INSERT INTO users (id, email, password) VALUES ($1, $2, $3)")
        .bind(user_id)
        .bind(email)
        .bind(hashed_password)
        .execute(pool)
        .await
        .expect("insert user");
    sqlx::query("INSERT INTO profiles (user_id, first_name, last_name) VALUES ($1, $2, $3)")
        .bind(user_id)
        .bind(first_name)
        .bind(last_name)
        .execute(pool)
        .await
        .expect("insert profile");
    user_id
}

pub async fn insert_kudo(
    pool: &PgPool,
    author_id: Uuid,
    recipient_id: Uuid,
    message: &str,
    emoji: Emoji,
    created_at: DateTime<Utc>,
) -> Uuid {
    sqlx::query_scalar::<_, Uuid>(
        "INSERT INTO kudos (id, message, author_id, recipient_id, background_color, text_color, emoji, created_at) \
         VALUES ($1, $2, $3, $4, 'RED', 'WHITE', $5::kudo_emoji, $6) RETURNING id",
    )
    .bind(Uuid::now_v7())
    .bind(message)
    .bind(author_id)
    .bind(recipient_id)
    .bind(emoji.as_str())
    .bind(created_at)
    .fetch_one(pool)
    .await
    .expect("insert kudo")
}

pub async fn count_kudos(pool: &PgPool) -> i64 {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM kudos")
        .fetch_one(pool)
        .await
        .expect("count kudos")
}

pub async fn delete_user(pool: &PgPool, user_id: Uuid) {
    sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(user_id)
        .execute(pool)
        .await
        .expect("delete user");
}

pub async fn insert_session(pool: &PgPool, user_id: Uuid) -> Uuid {
    sqlx::query_scalar::<_, Uuid>("INSERT INTO sessions (id, user_id) VALUES ($1, $2) RETURNING id")
        .bind(Uuid::now_v7())
        .bind(user_id)
        .fetch_one(pool)
        .await
        .expect("insert session")
}

pub fn session_cookie(session_id: Uuid, cookie_name: &str) -> String {
    format!("{}={}", cookie_name, session_id)
}
