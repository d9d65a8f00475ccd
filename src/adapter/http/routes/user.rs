use axum::Json;
use axum::extract::Path;
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::adapter::http::app_error_impl::ErrorResponse;
use crate::adapter::http::middleware::extractor::AuthUser;
use crate::adapter::http::schema::user::{ProfileResponse, UserResponse};
use crate::application::app_error::AppResult;
use crate::application::dto::id::IdDTO;
use crate::application::interactors::users::{GetUserInteractor, ListColleaguesInteractor};

#[utoipa::path(
    get,
    path = "/users",
    tag = "Users",
    responses(
        (
            status = 200,
            description = "Every other user, by first then last name",
            body = Vec<ProfileResponse>
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
pub async fn list_colleagues(
    auth_user: AuthUser,
    interactor: ListColleaguesInteractor,
) -> AppResult<impl IntoResponse> {
    let profiles = interactor.execute(auth_user.id_dto()).await?;
    let response: Vec<ProfileResponse> = profiles.into_iter().map(ProfileResponse::from).collect();
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/users/me",
    tag = "Users",
    responses(
        (
            status = 200,
            description = "The signed-in user",
            body = UserResponse
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
pub async fn get_me(auth_user: AuthUser, interactor: GetUserInteractor) -> AppResult<impl IntoResponse> {
    let user = interactor.execute(auth_user.id_dto()).await?;
    Ok((StatusCode::OK, Json(UserResponse::from(user))))
}

#[utoipa::path(
    get,
    path = "/users/{user_id}",
    tag = "Users",
    params(("user_id" = String, Path, description = "User id")),
    responses(
        (
            status = 200,
            description = "A user's profile",
            body = ProfileResponse
        ),
        (
            status = 400,
            description = "Malformed id",
            body = ErrorResponse,
            example = json!(
                {
                    "error": "Invalid id: Invalid UUID: invalid length: expected length 32 for simple format, found 3"
                }
            )
        ),
        (
            status = 404,
            description = "No such user",
            body = ErrorResponse,
            example = json!(
                {
                    "error": "User not found"
                }
            )
        )
    ),
    security(("cookieAuth" = []))
)]
pub async fn get_user(
    _auth_user: AuthUser,
    interactor: GetUserInteractor,
    Path(user_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let user = interactor.execute(IdDTO { id: user_id }).await?;
    Ok((StatusCode::OK, Json(ProfileResponse::from(user.profile))))
}
