use std::sync::Arc;

use tracing::{info, warn};

use crate::application::app_error::{AppError, AppResult};
use crate::application::dto::auth::{LoginDTO, RegisterDTO, SessionIdDTO};
use crate::application::dto::id::IdDTO;
use crate::application::interface::crypto::CredentialsHasher;
use crate::application::interface::db::DBSession;
use crate::application::interface::gateway::profile::ProfileWriter;
use crate::application::interface::gateway::session::SessionWriter;
use crate::application::interface::gateway::user::{UserReader, UserWriter};
use crate::domain::entities::id::Id;
use crate::domain::entities::profile::Profile;
use crate::domain::entities::session::Session;
use crate::domain::entities::user::User;

/// Creates the user, its profile and a first session in one transaction.
#[derive(Clone)]
pub struct RegisterInteractor {
    db_session: Arc<dyn DBSession>,
    user_reader: Arc<dyn UserReader>,
    user_writer: Arc<dyn UserWriter>,
    profile_writer: Arc<dyn ProfileWriter>,
    session_writer: Arc<dyn SessionWriter>,
    hasher: Arc<dyn CredentialsHasher>,
}

impl RegisterInteractor {
    pub fn new(
        db_session: Arc<dyn DBSession>,
        user_reader: Arc<dyn UserReader>,
        user_writer: Arc<dyn UserWriter>,
        profile_writer: Arc<dyn ProfileWriter>,
        session_writer: Arc<dyn SessionWriter>,
        hasher: Arc<dyn CredentialsHasher>,
    ) -> Self {
        Self {
            db_session,
            user_reader,
            user_writer,
            profile_writer,
            session_writer,
            hasher,
        }
    }

    pub async fn execute(&self, dto: RegisterDTO) -> AppResult<SessionIdDTO> {
        let email = dto.email.trim().to_lowercase();
        if self.user_reader.is_email_taken(&email).await? {
            return Err(AppError::EmailAlreadyTaken);
        }

        let hashed = self.hasher.hash_password(&dto.password).await?;
        let user = User::new(email, hashed);
        let user_id = self.user_writer.insert(user).await?;
        self.profile_writer
            .insert(Profile::new(user_id.clone(), dto.first_name, dto.last_name))
            .await?;
        let session_id = self.session_writer.insert(Session::start(user_id.clone(), false)).await?;
        self.db_session.commit().await?;

        info!(user_id = %user_id, "User registered");
        Ok(SessionIdDTO {
            session_id: session_id.to_string(),
            remember_me: false,
        })
    }
}

#[derive(Clone)]
pub struct LoginInteractor {
    db_session: Arc<dyn DBSession>,
    user_reader: Arc<dyn UserReader>,
    session_writer: Arc<dyn SessionWriter>,
    hasher: Arc<dyn CredentialsHasher>,
}

impl LoginInteractor {
    pub fn new(
        db_session: Arc<dyn DBSession>,
        user_reader: Arc<dyn UserReader>,
        session_writer: Arc<dyn SessionWriter>,
        hasher: Arc<dyn CredentialsHasher>,
    ) -> Self {
        Self {
            db_session,
            user_reader,
            session_writer,
            hasher,
        }
    }

    pub async fn execute(&self, dto: LoginDTO) -> AppResult<SessionIdDTO> {
        let email = dto.email.trim().to_lowercase();
        let user = self.user_reader.find_by_email(&email).await?.ok_or_else(|| {
            warn!("Login attempt with unknown email");
            AppError::InvalidCredentials
        })?;
        if !self.hasher.verify_password(&dto.password, &user.password).await? {
            warn!(user_id = %user.id, "Login attempt with wrong password");
            return Err(AppError::InvalidCredentials);
        }

        let session_id = self
            .session_writer
            .insert(Session::start(user.id.clone(), dto.remember_me))
            .await?;
        self.db_session.commit().await?;

        info!(user_id = %user.id, "User logged in");
        Ok(SessionIdDTO {
            session_id: session_id.to_string(),
            remember_me: dto.remember_me,
        })
    }
}

#[derive(Clone)]
pub struct LogoutInteractor {
    db_session: Arc<dyn DBSession>,
    session_writer: Arc<dyn SessionWriter>,
}

impl LogoutInteractor {
    pub fn new(db_session: Arc<dyn DBSession>, session_writer: Arc<dyn SessionWriter>) -> Self {
        Self {
            db_session,
            session_writer,
        }
    }

    pub async fn execute(&self, dto: IdDTO) -> AppResult<()> {
        let user_id: Id<User> = dto.id.try_into()?;
        self.session_writer.delete_by_user_id(&user_id).await?;
        self.db_session.commit().await?;
        info!(user_id = %user_id, "User logged out");
        Ok(())
    }
}
