use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use crate::application::app_error::{AppError, AppResult};
use crate::application::dto::id::IdDTO;
use crate::application::dto::profile::{AvatarUrlDTO, GetAvatarDTO, UpdateProfileDTO, UploadAvatarDTO};
use crate::application::dto::user::ProfileDTO;
use crate::application::interface::db::DBSession;
use crate::application::interface::gateway::profile::{ProfileReader, ProfileWriter};
use crate::application::interface::gateway::user::UserWriter;
use crate::application::interface::s3::{DownloadedFile, StorageClient};
use crate::domain::entities::id::Id;
use crate::domain::entities::profile::Department;
use crate::domain::entities::user::User;

const AVATAR_URL_PREFIX: &str = "/avatars/";

fn avatar_url(key: &str) -> String {
    format!("{}{}", AVATAR_URL_PREFIX, key)
}

/// Object key of a stored avatar URL, `None` for anything not served by `/avatars`.
fn avatar_key(url: &str) -> Option<&str> {
    url.strip_prefix(AVATAR_URL_PREFIX).filter(|key| !key.is_empty())
}

#[derive(Clone)]
pub struct UpdateProfileInteractor {
    db_session: Arc<dyn DBSession>,
    profile_reader: Arc<dyn ProfileReader>,
    profile_writer: Arc<dyn ProfileWriter>,
}

impl UpdateProfileInteractor {
    pub fn new(
        db_session: Arc<dyn DBSession>,
        profile_reader: Arc<dyn ProfileReader>,
        profile_writer: Arc<dyn ProfileWriter>,
    ) -> Self {
        Self {
            db_session,
            profile_reader,
            profile_writer,
        }
    }

    pub async fn execute(&self, dto: UpdateProfileDTO) -> AppResult<ProfileDTO> {
        let user_id: Id<User> = dto.user_id.try_into()?;
        let department = match dto.department.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(raw.parse::<Department>()?),
        };

        let mut profile = self
            .profile_reader
            .find_by_user_id(&user_id)
            .await?
            .ok_or(AppError::UserNotFound)?;
        profile.first_name = dto.first_name.trim().to_string();
        profile.last_name = dto.last_name.trim().to_string();
        profile.department = department;

        self.profile_writer.update(profile.clone()).await?;
        self.db_session.commit().await?;

        info!(user_id = %user_id, "Profile updated");
        Ok(profile.into())
    }
}

/// Removes the account. Profile, sessions and kudos sent or received go with it.
#[derive(Clone)]
pub struct DeleteAccountInteractor {
    db_session: Arc<dyn DBSession>,
    profile_reader: Arc<dyn ProfileReader>,
    user_writer: Arc<dyn UserWriter>,
    storage: Arc<dyn StorageClient>,
    bucket: String,
}

impl DeleteAccountInteractor {
    pub fn new(
        db_session: Arc<dyn DBSession>,
        profile_reader: Arc<dyn ProfileReader>,
        user_writer: Arc<dyn UserWriter>,
        storage: Arc<dyn StorageClient>,
        bucket: String,
    ) -> Self {
        Self {
            db_session,
            profile_reader,
            user_writer,
            storage,
            bucket,
        }
    }

    pub async fn execute(&self, dto: IdDTO) -> AppResult<()> {
        let user_id: Id<User> = dto.id.try_into()?;
        let picture = self
            .profile_reader
            .find_by_user_id(&user_id)
            .await?
            .and_then(|p| p.profile_picture);

        if !self.user_writer.delete(&user_id).await? {
            return Err(AppError::UserNotFound);
        }
        self.db_session.commit().await?;
        info!(user_id = %user_id, "Account deleted");

        // The account is gone either way; an orphaned object is only logged.
        if let Some(key) = picture.as_deref().and_then(avatar_key) {
            if let Err(e) = self.storage.delete(&self.bucket, key).await {
                warn!(user_id = %user_id, key, "Failed to delete avatar: {}", e);
            }
        }
        Ok(())
    }
}

#[derive(Clone)]
pub struct UploadAvatarInteractor {
    db_session: Arc<dyn DBSession>,
    profile_reader: Arc<dyn ProfileReader>,
    profile_writer: Arc<dyn ProfileWriter>,
    storage: Arc<dyn StorageClient>,
    bucket: String,
    max_size: usize,
}

impl UploadAvatarInteractor {
    pub fn new(
        db_session: Arc<dyn DBSession>,
        profile_reader: Arc<dyn ProfileReader>,
        profile_writer: Arc<dyn ProfileWriter>,
        storage: Arc<dyn StorageClient>,
        bucket: String,
        max_size: usize,
    ) -> Self {
        Self {
            db_session,
            profile_reader,
            profile_writer,
            storage,
            bucket,
            max_size,
        }
    }

    pub async fn execute(&self, dto: UploadAvatarDTO) -> AppResult<AvatarUrlDTO> {
        let user_id: Id<User> = dto.user_id.try_into()?;
        if dto.data.len() > self.max_size {
            return Err(AppError::AvatarTooLarge(self.max_size));
        }
        let detected = self
            .storage
            .detect_image(&dto.data)
            .ok_or(AppError::UnsupportedImageFormat)?;

        let mut profile = self
            .profile_reader
            .find_by_user_id(&user_id)
            .await?
            .ok_or(AppError::UserNotFound)?;

        let key = format!("{}/{}.{}", user_id, Uuid::now_v7(), detected.ext);
        self.storage.ensure_bucket(&self.bucket).await?;
        self.storage
            .upload(&self.bucket, &key, dto.data, detected.content_type)
            .await?;

        let previous = profile.profile_picture.replace(avatar_url(&key));
        self.profile_writer.update(profile).await?;
        self.db_session.commit().await?;

        if let Some(old_key) = previous.as_deref().and_then(avatar_key) {
            if let Err(e) = self.storage.delete(&self.bucket, old_key).await {
                warn!(user_id = %user_id, key = old_key, "Failed to delete previous avatar: {}", e);
            }
        }

        info!(user_id = %user_id, key = %key, "Avatar uploaded");
        Ok(AvatarUrlDTO {
            image_url: avatar_url(&key),
        })
    }
}

#[derive(Clone)]
pub struct GetAvatarInteractor {
    storage: Arc<dyn StorageClient>,
    bucket: String,
}

impl GetAvatarInteractor {
    pub fn new(storage: Arc<dyn StorageClient>, bucket: String) -> Self {
        Self { storage, bucket }
    }

    pub async fn execute(&self, dto: GetAvatarDTO) -> AppResult<DownloadedFile> {
        let user_id: Id<User> = dto.user_id.try_into()?;
        let file_name = dto.file_name.as_str();
        if file_name.is_empty() || file_name.contains('/') || file_name.contains("..") {
            return Err(AppError::StorageNotFound);
        }

        self.storage
            .download(&self.bucket, &format!("{}/{}", user_id, file_name))
            .await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use bytes::Bytes;
    use mockall::mock;
    use rstest::rstest;

    use crate::application::app_error::{AppError, AppResult};
    use crate::application::dto::id::IdDTO;
    use crate::application::dto::profile::{GetAvatarDTO, UpdateProfileDTO, UploadAvatarDTO};
    use crate::application::interactors::profile::{
        DeleteAccountInteractor, GetAvatarInteractor, UpdateProfileInteractor, UploadAvatarInteractor,
    };
    use crate::application::interface::db::DBSession;
    use crate::application::interface::gateway::profile::{ProfileReader, ProfileWriter};
    use crate::application::interface::gateway::user::UserWriter;
    use crate::application::interface::s3::{DetectedImage, DownloadedFile, StorageClient};
    use crate::domain::entities::id::Id;
    use crate::domain::entities::profile::{Department, Profile};
    use crate::domain::entities::user::User;

    // Mocks
    mock! {
        pub DBSessionMock {}

        #[async_trait]
        impl DBSession for DBSessionMock {
            async fn commit(&self) -> AppResult<()>;
            async fn rollback(&self) -> AppResult<()>;
        }
    }

    mock! {
        pub ProfileReaderMock {}

        #[async_trait]
        impl ProfileReader for ProfileReaderMock {
            async fn find_by_user_id(&self, user_id: &Id<User>) -> AppResult<Option<Profile>>;
            async fn list_except(&self, user_id: &Id<User>) -> AppResult<Vec<Profile>>;
        }
    }

    mock! {
        pub ProfileWriterMock {}

        #[async_trait]
        impl ProfileWriter for ProfileWriterMock {
            async fn insert(&self, profile: Profile) -> AppResult<()>;
            async fn update(&self, profile: Profile) -> AppResult<()>;
        }
    }

    mock! {
        pub UserWriterMock {}

        #[async_trait]
        impl UserWriter for UserWriterMock {
            async fn insert(&self, user: User) -> AppResult<Id<User>>;
            async fn delete(&self, user_id: &Id<User>) -> AppResult<bool>;
        }
    }

    mock! {
        pub StorageClientMock {}

        #[async_trait]
        impl StorageClient for StorageClientMock {
            async fn ensure_bucket(&self, bucket: &str) -> AppResult<()>;
            async fn upload(&self, bucket: &str, key: &str, data: Bytes, content_type: &str) -> AppResult<()>;
            async fn download(&self, bucket: &str, key: &str) -> AppResult<DownloadedFile>;
            async fn delete(&self, bucket: &str, key: &str) -> AppResult<()>;
            fn detect_image(&self, data: &[u8]) -> Option<DetectedImage>;
        }
    }

    // Constants
    const USER_ID: &str = "019c47ec-183d-744e-b11d-cd409015bf13";
    const BUCKET: &str = "avatars";
    const PNG_BYTES: &[u8] = &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
    const OLD_PICTURE: &str = "/avatars/019c47ec-183d-744e-b11d-cd409015bf13/old.png";

    fn profile(picture: Option<&str>) -> Profile {
        let mut profile = Profile::new(USER_ID.parse().unwrap(), "Alice".to_string(), "Jones".to_string());
        profile.profile_picture = picture.map(str::to_string);
        profile
    }

    fn png_detected() -> Option<DetectedImage> {
        Some(DetectedImage {
            content_type: "image/png",
            ext: "png",
        })
    }

    // UpdateProfileInteractor tests
    #[rstest]
    #[case(Some("sales"), Some(Department::Sales))]
    #[case(Some(""), None)]
    #[case(None, None)]
    #[tokio::test]
    async fn test_update_profile(#[case] department: Option<&str>, #[case] expected: Option<Department>) {
        let mut db_session = MockDBSessionMock::new();
        let mut reader = MockProfileReaderMock::new();
        let mut writer = MockProfileWriterMock::new();

        reader.expect_find_by_user_id().returning(|_| Ok(Some(profile(None))));
        writer
            .expect_update()
            .withf(move |p| p.first_name == "Alicia" && p.last_name == "Smith" && p.department == expected)
            .times(1)
            .returning(|_| Ok(()));
        db_session.expect_commit().times(1).returning(|| Ok(()));

        let result = UpdateProfileInteractor::new(Arc::new(db_session), Arc::new(reader), Arc::new(writer))
            .execute(UpdateProfileDTO {
                user_id: USER_ID.to_string(),
                first_name: " Alicia ".to_string(),
                last_name: "Smith".to_string(),
                department: department.map(str::to_string),
            })
            .await
            .unwrap();

        assert_eq!(result.first_name, "Alicia");
    }

    #[tokio::test]
    async fn test_update_profile_invalid_department() {
        let mut writer = MockProfileWriterMock::new();
        writer.expect_update().never();

        let result = UpdateProfileInteractor::new(
            Arc::new(MockDBSessionMock::new()),
            Arc::new(MockProfileReaderMock::new()),
            Arc::new(writer),
        )
        .execute(UpdateProfileDTO {
            user_id: USER_ID.to_string(),
            first_name: "Alice".to_string(),
            last_name: "Jones".to_string(),
            department: Some("LEGAL".to_string()),
        })
        .await;

        assert!(matches!(result, Err(AppError::InvalidDepartment(_))));
    }

    // DeleteAccountInteractor tests
    #[tokio::test]
    async fn test_delete_account_removes_avatar() {
        let mut db_session = MockDBSessionMock::new();
        let mut reader = MockProfileReaderMock::new();
        let mut user_writer = MockUserWriterMock::new();
        let mut storage = MockStorageClientMock::new();

        reader
            .expect_find_by_user_id()
            .returning(|_| Ok(Some(profile(Some(OLD_PICTURE)))));
        user_writer.expect_delete().times(1).returning(|_| Ok(true));
        db_session.expect_commit().times(1).returning(|| Ok(()));
        storage
            .expect_delete()
            .withf(|bucket, key| bucket == BUCKET && key == format!("{}/old.png", USER_ID))
            .times(1)
            .returning(|_, _| Err(AppError::StorageError("unreachable".to_string())));

        let result = DeleteAccountInteractor::new(
            Arc::new(db_session),
            Arc::new(reader),
            Arc::new(user_writer),
            Arc::new(storage),
            BUCKET.to_string(),
        )
        .execute(IdDTO {
            id: USER_ID.to_string(),
        })
        .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_delete_account_unknown_user() {
        let mut db_session = MockDBSessionMock::new();
        let mut reader = MockProfileReaderMock::new();
        let mut user_writer = MockUserWriterMock::new();

        reader.expect_find_by_user_id().returning(|_| Ok(None));
        user_writer.expect_delete().returning(|_| Ok(false));
        db_session.expect_commit().never();

        let result = DeleteAccountInteractor::new(
            Arc::new(db_session),
            Arc::new(reader),
            Arc::new(user_writer),
            Arc::new(MockStorageClientMock::new()),
            BUCKET.to_string(),
        )
        .execute(IdDTO {
            id: USER_ID.to_string(),
        })
        .await;

        assert!(matches!(result, Err(AppError::UserNotFound)));
    }

    // UploadAvatarInteractor tests
    fn upload_interactor(
        db_session: MockDBSessionMock,
        reader: MockProfileReaderMock,
        writer: MockProfileWriterMock,
        storage: MockStorageClientMock,
    ) -> UploadAvatarInteractor {
        UploadAvatarInteractor::new(
            Arc::new(db_session),
            Arc::new(reader),
            Arc::new(writer),
            Arc::new(storage),
            BUCKET.to_string(),
            1024,
        )
    }

    fn upload_dto(data: &'static [u8]) -> UploadAvatarDTO {
        UploadAvatarDTO {
            user_id: USER_ID.to_string(),
            data: Bytes::from_static(data),
        }
    }

    #[tokio::test]
    async fn test_upload_avatar_replaces_previous() {
        let mut db_session = MockDBSessionMock::new();
        let mut reader = MockProfileReaderMock::new();
        let mut writer = MockProfileWriterMock::new();
        let mut storage = MockStorageClientMock::new();

        storage.expect_detect_image().returning(|_| png_detected());
        reader
            .expect_find_by_user_id()
            .returning(|_| Ok(Some(profile(Some(OLD_PICTURE)))));
        storage.expect_ensure_bucket().returning(|_| Ok(()));
        storage
            .expect_upload()
            .withf(|bucket, key, _, content_type| {
                bucket == BUCKET && key.starts_with(USER_ID) && key.ends_with(".png") && content_type == "image/png"
            })
            .times(1)
            .returning(|_, _, _, _| Ok(()));
        writer
            .expect_update()
            .withf(|p| p.profile_picture.as_deref().is_some_and(|url| url != OLD_PICTURE))
            .times(1)
            .returning(|_| Ok(()));
        db_session.expect_commit().times(1).returning(|| Ok(()));
        storage
            .expect_delete()
            .withf(|_, key| key.ends_with("/old.png"))
            .times(1)
            .returning(|_, _| Ok(()));

        let result = upload_interactor(db_session, reader, writer, storage)
            .execute(upload_dto(PNG_BYTES))
            .await
            .unwrap();

        assert!(result.image_url.starts_with(&format!("/avatars/{}/", USER_ID)));
        assert!(result.image_url.ends_with(".png"));
    }

    #[tokio::test]
    async fn test_upload_avatar_rejects_unknown_format() {
        let mut storage = MockStorageClientMock::new();
        storage.expect_detect_image().returning(|_| None);
        storage.expect_upload().never();

        let result = upload_interactor(
            MockDBSessionMock::new(),
            MockProfileReaderMock::new(),
            MockProfileWriterMock::new(),
            storage,
        )
        .execute(upload_dto(b"plain text"))
        .await;

        assert!(matches!(result, Err(AppError::UnsupportedImageFormat)));
    }

    #[tokio::test]
    async fn test_upload_avatar_rejects_oversized() {
        static BIG: [u8; 2048] = [0u8; 2048];
        let result = upload_interactor(
            MockDBSessionMock::new(),
            MockProfileReaderMock::new(),
            MockProfileWriterMock::new(),
            MockStorageClientMock::new(),
        )
        .execute(upload_dto(&BIG))
        .await;

        assert!(matches!(result, Err(AppError::AvatarTooLarge(1024))));
    }

    // GetAvatarInteractor tests
    #[rstest]
    #[case("")]
    #[case("../secret.png")]
    #[case("a/b.png")]
    #[tokio::test]
    async fn test_get_avatar_rejects_traversal(#[case] file_name: &str) {
        let mut storage = MockStorageClientMock::new();
        storage.expect_download().never();

        let result = GetAvatarInteractor::new(Arc::new(storage), BUCKET.to_string())
            .execute(GetAvatarDTO {
                user_id: USER_ID.to_string(),
                file_name: file_name.to_string(),
            })
            .await;

        assert!(matches!(result, Err(AppError::StorageNotFound)));
    }

    #[tokio::test]
    async fn test_get_avatar_downloads_scoped_key() {
        let mut storage = MockStorageClientMock::new();
        storage
            .expect_download()
            .withf(|bucket, key| bucket == BUCKET && key == format!("{}/pic.png", USER_ID))
            .returning(|_, _| {
                Ok(DownloadedFile {
                    data: Bytes::from_static(PNG_BYTES),
                    content_type: "image/png".to_string(),
                })
            });

        let file = GetAvatarInteractor::new(Arc::new(storage), BUCKET.to_string())
            .execute(GetAvatarDTO {
                user_id: USER_ID.to_string(),
                file_name: "pic.png".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(file.content_type, "image/png");
    }
}
