use bytes::Bytes;

#[derive(Debug, Clone)]
pub struct UpdateProfileDTO {
    pub user_id: String,
    pub first_name: String,
    pub last_name: String,
    pub department: Option<String>,
}

#[derive(Debug, Clone)]
pub struct UploadAvatarDTO {
    pub user_id: String,
    pub data: Bytes,
}

#[derive(Debug, Clone)]
pub struct AvatarUrlDTO {
    pub image_url: String,
}

#[derive(Debug, Clone)]
pub struct GetAvatarDTO {
    pub user_id: String,
    pub file_name: String,
}
