use std::sync::Arc;

use async_trait::async_trait;
use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;
use sqlx::{Pool, Postgres};

use crate::adapter::db::gateway::kudo::KudoGateway;
use crate::adapter::db::gateway::profile::ProfileGateway;
use crate::adapter::db::gateway::session::SessionGateway;
use crate::adapter::db::gateway::user::UserGateway;
use crate::adapter::db::session::SqlxSession;
use crate::application::app_error::{AppError, AppResult};
use crate::application::interactors::auth::{LoginInteractor, LogoutInteractor, RegisterInteractor};
use crate::application::interactors::kudo::{CreateKudoInteractor, GetKudoFeedInteractor, GetRecentKudosInteractor};
use crate::application::interactors::profile::{
    DeleteAccountInteractor, GetAvatarInteractor, UpdateProfileInteractor, UploadAvatarInteractor,
};
use crate::application::interactors::session::ValidateSessionInteractor;
use crate::application::interactors::users::{GetUserInteractor, ListColleaguesInteractor};
use crate::application::interface::crypto::CredentialsHasher;
use crate::application::interface::s3::StorageClient;
use crate::infra::config::AppConfig;

#[derive(Clone)]
pub struct AppState {
    pub pool: Pool<Postgres>,
    pub hasher: Arc<dyn CredentialsHasher>,
    pub config: Arc<AppConfig>,
    pub storage: Arc<dyn StorageClient>,
}

impl FromRef<AppState> for Arc<AppConfig> {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}

#[async_trait]
pub trait FromAppState: Sized {
    async fn from_app_state(state: &AppState) -> AppResult<Self>;
}

// RegisterInteractor
#[async_trait]
impl FromAppState for RegisterInteractor {
    async fn from_app_state(state: &AppState) -> AppResult<Self> {
        let session = SqlxSession::new_lazy(state.pool.clone());
        let user_gateway = Arc::new(UserGateway::new(session.clone()));

        Ok(RegisterInteractor::new(
            Arc::new(session.clone()),
            user_gateway.clone(),
            user_gateway,
            Arc::new(ProfileGateway::new(session.clone())),
            Arc::new(SessionGateway::new(session)),
            state.hasher.clone(),
        ))
    }
}

impl<S> FromRequestParts<S> for RegisterInteractor
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(_parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);
        RegisterInteractor::from_app_state(&app_state).await
    }
}

// LoginInteractor
#[async_trait]
impl FromAppState for LoginInteractor {
    async fn from_app_state(state: &AppState) -> AppResult<Self> {
        let session = SqlxSession::new_lazy(state.pool.clone());
        let user_gateway = UserGateway::new(session.clone());
        let session_gateway = SessionGateway::new(session.clone());

        Ok(LoginInteractor::new(
            Arc::new(session),
            Arc::new(user_gateway),
            Arc::new(session_gateway),
            state.hasher.clone(),
        ))
    }
}

impl<S> FromRequestParts<S> for LoginInteractor
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(_parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);
        LoginInteractor::from_app_state(&app_state).await
    }
}

// LogoutInteractor
#[async_trait]
impl FromAppState for LogoutInteractor {
    async fn from_app_state(state: &AppState) -> AppResult<Self> {
        let session = SqlxSession::new_lazy(state.pool.clone());
        let session_gateway = Arc::new(SessionGateway::new(session.clone()));

        Ok(LogoutInteractor::new(Arc::new(session), session_gateway))
    }
}

impl<S> FromRequestParts<S> for LogoutInteractor
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(_parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);
        LogoutInteractor::from_app_state(&app_state).await
    }
}

// ValidateSessionInteractor
#[async_trait]
impl FromAppState for ValidateSessionInteractor {
    async fn from_app_state(state: &AppState) -> AppResult<Self> {
        let session = SqlxSession::new_lazy(state.pool.clone());
        let session_gateway = Arc::new(SessionGateway::new(session.clone()));

        Ok(ValidateSessionInteractor::new(
            Arc::new(session),
            session_gateway.clone(),
            session_gateway,
        ))
    }
}

impl<S> FromRequestParts<S> for ValidateSessionInteractor
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(_parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);
        ValidateSessionInteractor::from_app_state(&app_state).await
    }
}

// GetUserInteractor
#[async_trait]
impl FromAppState for GetUserInteractor {
    async fn from_app_state(state: &AppState) -> AppResult<Self> {
        let session = SqlxSession::new_lazy(state.pool.clone());

        Ok(GetUserInteractor::new(
            Arc::new(UserGateway::new(session.clone())),
            Arc::new(ProfileGateway::new(session)),
        ))
    }
}

impl<S> FromRequestParts<S> for GetUserInteractor
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(_parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);
        GetUserInteractor::from_app_state(&app_state).await
    }
}

// ListColleaguesInteractor
#[async_trait]
impl FromAppState for ListColleaguesInteractor {
    async fn from_app_state(state: &AppState) -> AppResult<Self> {
        let session = SqlxSession::new_lazy(state.pool.clone());

        Ok(ListColleaguesInteractor::new(Arc::new(ProfileGateway::new(session))))
    }
}

impl<S> FromRequestParts<S> for ListColleaguesInteractor
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(_parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);
        ListColleaguesInteractor::from_app_state(&app_state).await
    }
}

// UpdateProfileInteractor
#[async_trait]
impl FromAppState for UpdateProfileInteractor {
    async fn from_app_state(state: &AppState) -> AppResult<Self> {
        let session = SqlxSession::new_lazy(state.pool.clone());
        let profile_gateway = Arc::new(ProfileGateway::new(session.clone()));

        Ok(UpdateProfileInteractor::new(
            Arc::new(session),
            profile_gateway.clone(),
            profile_gateway,
        ))
    }
}

impl<S> FromRequestParts<S> for UpdateProfileInteractor
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(_parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);
        UpdateProfileInteractor::from_app_state(&app_state).await
    }
}

// DeleteAccountInteractor
#[async_trait]
impl FromAppState for DeleteAccountInteractor {
    async fn from_app_state(state: &AppState) -> AppResult<Self> {
        let session = SqlxSession::new_lazy(state.pool.clone());

        Ok(DeleteAccountInteractor::new(
            Arc::new(session.clone()),
            Arc::new(ProfileGateway::new(session.clone())),
            Arc::new(UserGateway::new(session)),
            state.storage.clone(),
            state.config.s3.bucket.clone(),
        ))
    }
}

impl<S> FromRequestParts<S> for DeleteAccountInteractor
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(_parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);
        DeleteAccountInteractor::from_app_state(&app_state).await
    }
}

// UploadAvatarInteractor
#[async_trait]
impl FromAppState for UploadAvatarInteractor {
    async fn from_app_state(state: &AppState) -> AppResult<Self> {
        let session = SqlxSession::new_lazy(state.pool.clone());
        let profile_gateway = Arc::new(ProfileGateway::new(session.clone()));

        Ok(UploadAvatarInteractor::new(
            Arc::new(session),
            profile_gateway.clone(),
            profile_gateway,
            state.storage.clone(),
            state.config.s3.bucket.clone(),
            state.config.s3.max_avatar_size,
        ))
    }
}

impl<S> FromRequestParts<S> for UploadAvatarInteractor
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(_parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);
        UploadAvatarInteractor::from_app_state(&app_state).await
    }
}

// GetAvatarInteractor
#[async_trait]
impl FromAppState for GetAvatarInteractor {
    async fn from_app_state(state: &AppState) -> AppResult<Self> {
        Ok(GetAvatarInteractor::new(
            state.storage.clone(),
            state.config.s3.bucket.clone(),
        ))
    }
}

impl<S> FromRequestParts<S> for GetAvatarInteractor
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(_parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);
        GetAvatarInteractor::from_app_state(&app_state).await
    }
}

// CreateKudoInteractor
#[async_trait]
impl FromAppState for CreateKudoInteractor {
    async fn from_app_state(state: &AppState) -> AppResult<Self> {
        let session = SqlxSession::new_lazy(state.pool.clone());

        Ok(CreateKudoInteractor::new(
            Arc::new(session.clone()),
            Arc::new(UserGateway::new(session.clone())),
            Arc::new(KudoGateway::new(session)),
            state.config.kudos.allow_self_kudo,
        ))
    }
}

impl<S> FromRequestParts<S> for CreateKudoInteractor
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(_parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);
        CreateKudoInteractor::from_app_state(&app_state).await
    }
}

// GetKudoFeedInteractor
#[async_trait]
impl FromAppState for GetKudoFeedInteractor {
    async fn from_app_state(state: &AppState) -> AppResult<Self> {
        let session = SqlxSession::new_lazy(state.pool.clone());

        Ok(GetKudoFeedInteractor::new(
            Arc::new(KudoGateway::new(session)),
            state.config.kudos.max_per_page,
        ))
    }
}

impl<S> FromRequestParts<S> for GetKudoFeedInteractor
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(_parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);
        GetKudoFeedInteractor::from_app_state(&app_state).await
    }
}

// GetRecentKudosInteractor
#[async_trait]
impl FromAppState for GetRecentKudosInteractor {
    async fn from_app_state(state: &AppState) -> AppResult<Self> {
        let session = SqlxSession::new_lazy(state.pool.clone());

        Ok(GetRecentKudosInteractor::new(
            Arc::new(KudoGateway::new(session)),
            state.config.kudos.default_recent_limit,
            state.config.kudos.max_recent_limit,
        ))
    }
}

impl<S> FromRequestParts<S> for GetRecentKudosInteractor
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(_parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);
        GetRecentKudosInteractor::from_app_state(&app_state).await
    }
}
