use std::sync::Arc;

use crate::adapter::crypto::argon2::ArgonPasswordHasher;
use crate::adapter::storage::s3::S3StorageClient;
use crate::infra::config::AppConfig;
use crate::infra::db::{init_db, run_migrations};
use crate::infra::state::AppState;

pub mod app;
pub mod config;
pub mod db;
pub mod setup;
pub mod state;

pub(crate) fn argon2_password_hasher() -> ArgonPasswordHasher {
    ArgonPasswordHasher::default()
}

pub async fn init_app_state(config: &AppConfig) -> anyhow::Result<AppState> {
    let pool = init_db(config).await?;
    run_migrations(&pool).await?;
    let password_hasher = argon2_password_hasher();
    let storage = S3StorageClient::new(&config.s3);

    Ok(AppState {
        pool,
        hasher: Arc::new(password_hasher),
        config: Arc::new(config.clone()),
        storage: Arc::new(storage),
    })
}
