use std::sync::Arc;

use axum::Json;
use axum::body::Body;
use axum::extract::{Multipart, Path, State};
use axum::http::header::{CONTENT_TYPE, SET_COOKIE};
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::response::IntoResponse;

use crate::adapter::http::app_error_impl::{ErrorResponse, ValidationErrorResponse};
use crate::adapter::http::middleware::auth::{build_logout_cookie, cookie_header};
use crate::adapter::http::middleware::extractor::AuthUser;
use crate::adapter::http::schema::auth::MessageResponse;
use crate::adapter::http::schema::profile::{AvatarResponse, AvatarUploadRequest, UpdateProfileRequest};
use crate::adapter::http::schema::user::ProfileResponse;
use crate::adapter::http::validation::ValidJson;
use crate::application::app_error::{AppError, AppResult};
use crate::application::dto::profile::{GetAvatarDTO, UpdateProfileDTO, UploadAvatarDTO};
use crate::application::interactors::profile::{
    DeleteAccountInteractor, GetAvatarInteractor, UpdateProfileInteractor, UploadAvatarInteractor,
};
use crate::infra::config::AppConfig;

const AVATAR_FIELD: &str = "profile-pic";

#[utoipa::path(
    patch,
    path = "/profile",
    tag = "Profile",
    request_body(
        content = UpdateProfileRequest,
        example = json!(
            {
                "firstName": "Alice",
                "lastName": "Jones",
                "department": "ENGINEERING"
            }
        )
    ),
    responses(
        (
            status = 200,
            description = "Updated profile",
            body = ProfileResponse
        ),
        (
            status = 400,
            description = "Invalid fields",
            body = ValidationErrorResponse,
            example = json!(
                {
                    "errors": { "first_name": "Please provide a first name" },
                    "fields": { "firstName": "", "lastName": "Jones", "department": "HR" }
                }
            )
        ),
        (
            status = 401,
            description = "Not authenticated",
            body = ErrorResponse,
            example = json!(
                {
                    "error": "Invalid Credentials"
                }
            )
        )
    ),
    security(("cookieAuth" = []))
)]
pub async fn update_profile(
    auth_user: AuthUser,
    interactor: UpdateProfileInteractor,
    ValidJson(payload): ValidJson<UpdateProfileRequest>,
) -> AppResult<impl IntoResponse> {
    let dto = UpdateProfileDTO {
        user_id: auth_user.user_id,
        first_name: payload.first_name,
        last_name: payload.last_name,
        department: payload.department,
    };
    let profile = interactor.execute(dto).await?;
    Ok((StatusCode::OK, Json(ProfileResponse::from(profile))))
}

#[utoipa::path(
    delete,
    path = "/profile",
    tag = "Profile",
    responses(
        (
            status = 200,
            description = "Account deleted with everything it sent and received",
            body = MessageResponse,
            example = json!(
                {
                    "message": "Account deleted successfully"
                }
            )
        ),
        (
            status = 401,
            description = "Not authenticated",
            body = ErrorResponse,
            example = json!(
                {
                    "error": "Invalid Credentials"
                }
            )
        )
    ),
    security(("cookieAuth" = []))
)]
pub async fn delete_account(
    auth_user: AuthUser,
    interactor: DeleteAccountInteractor,
    State(config): State<Arc<AppConfig>>,
) -> AppResult<impl IntoResponse> {
    interactor.execute(auth_user.id_dto()).await?;
    let mut headers = HeaderMap::new();
    headers.insert(SET_COOKIE, cookie_header(&build_logout_cookie(&config.session))?);
    Ok((
        StatusCode::OK,
        headers,
        Json(MessageResponse {
            message: "Account deleted successfully".to_string(),
        }),
    ))
}

#[utoipa::path(
    post,
    path = "/avatar",
    tag = "Profile",
    request_body(
        content_type = "multipart/form-data",
        content = AvatarUploadRequest,
        description = "PNG, JPEG, GIF or WEBP image"
    ),
    responses(
        (
            status = 200,
            description = "Avatar stored",
            body = AvatarResponse,
            example = json!(
                {
                    "imageUrl": "/avatars/019c47ec-183d-744e-b11d-cd409015bf13/019c47ee-0a4b-7c21-9a8f-3d0c5e1f2a7b.png"
                }
            )
        ),
        (
            status = 400,
            description = "Missing file, unsupported format or too large",
            body = ErrorResponse,
            example = json!(
                {
                    "error": "Unsupported image format"
                }
            )
        ),
        (
            status = 401,
            description = "Not authenticated",
            body = ErrorResponse,
            example = json!(
                {
                    "error": "Invalid Credentials"
                }
            )
        )
    ),
    security(("cookieAuth" = []))
)]
pub async fn upload_avatar(
    auth_user: AuthUser,
    interactor: UploadAvatarInteractor,
    mut multipart: Multipart,
) -> AppResult<impl IntoResponse> {
    let mut data = None;
    while let Some(field) = multipart.next_field().await? {
        if field.name() == Some(AVATAR_FIELD) {
            data = Some(field.bytes().await?);
        }
    }
    let data = data.filter(|bytes| !bytes.is_empty()).ok_or(AppError::InvalidFormData)?;

    let dto = UploadAvatarDTO {
        user_id: auth_user.user_id,
        data,
    };
    let avatar = interactor.execute(dto).await?;
    Ok((StatusCode::OK, Json(AvatarResponse::from(avatar))))
}

#[utoipa::path(
    get,
    path = "/avatars/{user_id}/{file_name}",
    tag = "Profile",
    params(
        ("user_id" = String, Path, description = "Owner of the avatar"),
        ("file_name" = String, Path, description = "Stored file name")
    ),
    responses(
        (
            status = 200,
            description = "Image bytes",
            content_type = "image/*"
        ),
        (
            status = 404,
            description = "No such avatar",
            body = ErrorResponse,
            example = json!(
                {
                    "error": "File not found"
                }
            )
        )
    ),
    security(("cookieAuth" = []))
)]
pub async fn get_avatar(
    _auth_user: AuthUser,
    interactor: GetAvatarInteractor,
    Path((user_id, file_name)): Path<(String, String)>,
) -> AppResult<impl IntoResponse> {
    let file = interactor.execute(GetAvatarDTO { user_id, file_name }).await?;

    let mut headers = HeaderMap::new();
    headers.insert(
        CONTENT_TYPE,
        HeaderValue::from_str(&file.content_type).map_err(|e| AppError::InvalidHeader(e.to_string()))?,
    );
    Ok((StatusCode::OK, headers, Body::from(file.data)))
}
