use std::sync::Arc;

use chrono::{Duration, Utc};
use tracing::debug;

use crate::application::app_error::AppResult;
use crate::application::dto::session::{SessionValidationResult, ValidateSessionDTO};
use crate::application::interface::db::DBSession;
use crate::application::interface::gateway::session::{SessionReader, SessionWriter};
use crate::domain::entities::id::Id;
use crate::domain::entities::session::Session;

/// Resolves a session cookie into the authenticated user id.
///
/// Sessions expire after their max lifetime or after an idle period, both longer for
/// "remember me" sessions. A live session older than the rotation interval is swapped for
/// a fresh id so a leaked cookie stops working soon after.
#[derive(Clone)]
pub struct ValidateSessionInteractor {
    db_session: Arc<dyn DBSession>,
    session_reader: Arc<dyn SessionReader>,
    session_writer: Arc<dyn SessionWriter>,
}

impl ValidateSessionInteractor {
    pub fn new(
        db_session: Arc<dyn DBSession>,
        session_reader: Arc<dyn SessionReader>,
        session_writer: Arc<dyn SessionWriter>,
    ) -> Self {
        Self {
            db_session,
            session_reader,
            session_writer,
        }
    }

    fn limits(dto: &ValidateSessionDTO, remember_me: bool) -> (Duration, Duration) {
        if remember_me {
            (
                Duration::seconds(dto.remembered_max_lifetime),
                Duration::seconds(dto.remembered_idle_timeout),
            )
        } else {
            (
                Duration::seconds(dto.default_max_lifetime),
                Duration::seconds(dto.default_idle_timeout),
            )
        }
    }

    pub async fn execute(&self, dto: ValidateSessionDTO) -> AppResult<SessionValidationResult> {
        let Ok(session_id) = dto.id.parse::<Id<Session>>() else {
            return Ok(SessionValidationResult::Invalid);
        };
        let Some(session) = self.session_reader.find_by_id(&session_id).await? else {
            return Ok(SessionValidationResult::Invalid);
        };

        let now = Utc::now();
        let (max_lifetime, idle_timeout) = Self::limits(&dto, session.remember_me);
        if now - session.created_at > max_lifetime || now - session.last_activity > idle_timeout {
            debug!(session_id = %session_id, "Session expired");
            self.session_writer.delete(&session_id).await?;
            self.db_session.commit().await?;
            return Ok(SessionValidationResult::Expired);
        }

        if now - session.last_rotation > Duration::seconds(dto.rotation_interval) {
            let new_session_id = self.session_writer.rotate(&session_id, session.rotated(now)).await?;
            self.db_session.commit().await?;
            return Ok(SessionValidationResult::Rotated {
                user_id: session.user_id,
                new_session_id,
                remember_me: session.remember_me,
            });
        }

        self.session_writer.update_activity(&session_id, now).await?;
        self.db_session.commit().await?;
        Ok(SessionValidationResult::Valid(session.user_id))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use chrono::{DateTime, Duration, Utc};
    use mockall::mock;
    use rstest::{fixture, rstest};

    use crate::application::app_error::AppResult;
    use crate::application::dto::session::{SessionValidationResult, ValidateSessionDTO};
    use crate::application::interactors::session::ValidateSessionInteractor;
    use crate::application::interface::db::DBSession;
    use crate::application::interface::gateway::session::{SessionReader, SessionWriter};
    use crate::domain::entities::id::Id;
    use crate::domain::entities::session::Session;
    use crate::domain::entities::user::User;

    mock! {
        pub DBSessionMock {}

        #[async_trait]
        impl DBSession for DBSessionMock {
            async fn commit(&self) -> AppResult<()>;
            async fn rollback(&self) -> AppResult<()>;
        }
    }

    mock! {
        pub SessionReaderMock {}

        #[async_trait]
        impl SessionReader for SessionReaderMock {
            async fn find_by_id(&self, session_id: &Id<Session>) -> AppResult<Option<Session>>;
        }
    }

    mock! {
        pub SessionWriterMock {}

        #[async_trait]
        impl SessionWriter for SessionWriterMock {
            async fn insert(&self, session: Session) -> AppResult<Id<Session>>;
            async fn update_activity(&self, session_id: &Id<Session>, now: DateTime<Utc>) -> AppResult<()>;
            async fn rotate(&self, old_session_id: &Id<Session>, new_session: Session) -> AppResult<Id<Session>>;
            async fn delete(&self, session_id: &Id<Session>) -> AppResult<()>;
            async fn delete_by_user_id(&self, user_id: &Id<User>) -> AppResult<()>;
        }
    }

    const SESSION_ID: &str = "019c47ec-2160-7e53-bf7e-06db2a1bad85";

    #[fixture]
    fn policy() -> ValidateSessionDTO {
        ValidateSessionDTO {
            id: SESSION_ID.to_string(),
            default_max_lifetime: 60,
            default_idle_timeout: 30,
            remembered_max_lifetime: 120,
            remembered_idle_timeout: 90,
            rotation_interval: 20,
        }
    }

    fn session_aged(created: i64, idle: i64, rotated: i64, remember_me: bool) -> Session {
        let now = Utc::now();
        Session {
            id: SESSION_ID.parse().unwrap(),
            user_id: Id::generate(),
            created_at: now - Duration::seconds(created),
            last_activity: now - Duration::seconds(idle),
            last_rotation: now - Duration::seconds(rotated),
            remember_me,
        }
    }

    fn interactor(
        db_session: MockDBSessionMock,
        reader: MockSessionReaderMock,
        writer: MockSessionWriterMock,
    ) -> ValidateSessionInteractor {
        ValidateSessionInteractor::new(Arc::new(db_session), Arc::new(reader), Arc::new(writer))
    }

    #[rstest]
    #[tokio::test]
    async fn test_garbage_cookie_is_invalid(policy: ValidateSessionDTO) {
        let dto = ValidateSessionDTO {
            id: "garbage".to_string(),
            ..policy
        };
        let result = interactor(
            MockDBSessionMock::new(),
            MockSessionReaderMock::new(),
            MockSessionWriterMock::new(),
        )
        .execute(dto)
        .await
        .unwrap();

        assert_eq!(result, SessionValidationResult::Invalid);
    }

    #[rstest]
    #[tokio::test]
    async fn test_unknown_session_is_invalid(policy: ValidateSessionDTO) {
        let mut reader = MockSessionReaderMock::new();
        reader.expect_find_by_id().returning(|_| Ok(None));

        let result = interactor(MockDBSessionMock::new(), reader, MockSessionWriterMock::new())
            .execute(policy)
            .await
            .unwrap();

        assert_eq!(result, SessionValidationResult::Invalid);
    }

    #[rstest]
    #[tokio::test]
    async fn test_fresh_session_touches_activity(policy: ValidateSessionDTO) {
        let mut db_session = MockDBSessionMock::new();
        let mut reader = MockSessionReaderMock::new();
        let mut writer = MockSessionWriterMock::new();

        let session = session_aged(10, 5, 5, false);
        let user_id = session.user_id.clone();
        reader.expect_find_by_id().returning(move |_| Ok(Some(session.clone())));
        writer.expect_update_activity().times(1).returning(|_, _| Ok(()));
        db_session.expect_commit().times(1).returning(|| Ok(()));

        let result = interactor(db_session, reader, writer).execute(policy).await.unwrap();

        assert_eq!(result, SessionValidationResult::Valid(user_id));
    }

    #[rstest]
    #[case(session_aged(100, 5, 5, false))]
    #[case(session_aged(10, 45, 5, false))]
    #[case(session_aged(130, 5, 5, true))]
    #[tokio::test]
    async fn test_expired_session_is_deleted(policy: ValidateSessionDTO, #[case] session: Session) {
        let mut db_session = MockDBSessionMock::new();
        let mut reader = MockSessionReaderMock::new();
        let mut writer = MockSessionWriterMock::new();

        reader.expect_find_by_id().returning(move |_| Ok(Some(session.clone())));
        writer.expect_delete().times(1).returning(|_| Ok(()));
        db_session.expect_commit().returning(|| Ok(()));

        let result = interactor(db_session, reader, writer).execute(policy).await.unwrap();

        assert_eq!(result, SessionValidationResult::Expired);
    }

    #[rstest]
    #[tokio::test]
    async fn test_remembered_session_outlives_default_limits(policy: ValidateSessionDTO) {
        let mut db_session = MockDBSessionMock::new();
        let mut reader = MockSessionReaderMock::new();
        let mut writer = MockSessionWriterMock::new();

        let session = session_aged(100, 45, 5, true);
        reader.expect_find_by_id().returning(move |_| Ok(Some(session.clone())));
        writer.expect_update_activity().returning(|_, _| Ok(()));
        db_session.expect_commit().returning(|| Ok(()));

        let result = interactor(db_session, reader, writer).execute(policy).await.unwrap();

        assert!(matches!(result, SessionValidationResult::Valid(_)));
    }

    #[rstest]
    #[tokio::test]
    async fn test_stale_rotation_issues_new_id(policy: ValidateSessionDTO) {
        let mut db_session = MockDBSessionMock::new();
        let mut reader = MockSessionReaderMock::new();
        let mut writer = MockSessionWriterMock::new();

        let session = session_aged(25, 5, 25, true);
        let user_id = session.user_id.clone();
        let created_at = session.created_at;
        reader.expect_find_by_id().returning(move |_| Ok(Some(session.clone())));
        writer
            .expect_rotate()
            .withf(move |old, new| old.to_string() == SESSION_ID && new.created_at == created_at)
            .returning(|_, new| Ok(new.id));
        db_session.expect_commit().returning(|| Ok(()));

        let result = interactor(db_session, reader, writer).execute(policy).await.unwrap();

        match result {
            SessionValidationResult::Rotated {
                user_id: rotated_user,
                new_session_id,
                remember_me,
            } => {
                assert_eq!(rotated_user, user_id);
                assert_ne!(new_session_id.to_string(), SESSION_ID);
                assert!(remember_me);
            }
            other => panic!("expected rotation, got {:?}", other),
        }
    }
}
