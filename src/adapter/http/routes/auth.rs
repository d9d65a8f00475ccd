use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::http::header::SET_COOKIE;
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;

use crate::adapter::http::app_error_impl::{ErrorResponse, ValidationErrorResponse};
use crate::adapter::http::middleware::auth::{build_logout_cookie, build_session_cookie, cookie_header};
use crate::adapter::http::middleware::extractor::AuthUser;
use crate::adapter::http::schema::auth::{LoginRequest, MessageResponse, RegisterRequest};
use crate::adapter::http::validation::ValidJson;
use crate::application::app_error::AppResult;
use crate::application::dto::auth::{LoginDTO, RegisterDTO};
use crate::application::interactors::auth::{LoginInteractor, LogoutInteractor, RegisterInteractor};
use crate::infra::config::AppConfig;

#[utoipa::path(
    post,
    path = "/auth/register",
    tag = "Auth",
    request_body(
        content = RegisterRequest,
        example = json!(
            {
                "email": "alice@example.com",
                "password": "hunter2",
                "firstName": "Alice",
                "lastName": "Jones"
            }
        )
    ),
    responses(
        (
            status = 201,
            description = "Account created and signed in",
            body = MessageResponse,
            example = json!(
                {
                    "message": "Account created successfully"
                }
            )
        ),
        (
            status = 400,
            description = "Invalid fields or email already taken",
            body = ValidationErrorResponse,
            example = json!(
                {
                    "errors": { "password": "Password must be at least 5 characters long" },
                    "fields": { "email": "alice@example.com", "firstName": "Alice", "lastName": "Jones" }
                }
            )
        ),
        (
            status = 500,
            description = "Internal server error",
            body = ErrorResponse,
            example = json!(
                {
                    "error": "Internal Server Error"
                }
            )
        )
    )
)]
pub async fn register(
    interactor: RegisterInteractor,
    State(config): State<Arc<AppConfig>>,
    ValidJson(payload): ValidJson<RegisterRequest>,
) -> AppResult<impl IntoResponse> {
    let dto = RegisterDTO {
        email: payload.email,
        password: payload.password,
        first_name: payload.first_name,
        last_name: payload.last_name,
    };
    let session = interactor.execute(dto).await?;
    let cookie = build_session_cookie(&session.session_id, session.remember_me, &config.session);
    let mut headers = HeaderMap::new();
    headers.insert(SET_COOKIE, cookie_header(&cookie)?);
    Ok((
        StatusCode::CREATED,
        headers,
        Json(MessageResponse {
            message: "Account created successfully".to_string(),
        }),
    ))
}

#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "Auth",
    request_body(
        content = LoginRequest,
        example = json!(
            {
                "email": "alice@example.com",
                "password": "hunter2",
                "rememberMe": true
            }
        )
    ),
    responses(
        (
            status = 200,
            description = "Login successful",
            body = MessageResponse,
            example = json!(
                {
                    "message": "Login successful"
                }
            )
        ),
        (
            status = 400,
            description = "Malformed body",
            body = ErrorResponse,
            example = json!(
                {
                    "error": "Invalid Form Data"
                }
            )
        ),
        (
            status = 401,
            description = "Unknown email or wrong password",
            body = ErrorResponse,
            example = json!(
                {
                    "error": "Invalid Credentials"
                }
            )
        ),
        (
            status = 500,
            description = "Internal server error",
            body = ErrorResponse,
            example = json!(
                {
                    "error": "Internal Server Error"
                }
            )
        )
    )
)]
pub async fn login(
    interactor: LoginInteractor,
    State(config): State<Arc<AppConfig>>,
    Json(payload): Json<LoginRequest>,
) -> AppResult<impl IntoResponse> {
    let dto = LoginDTO {
        email: payload.email.to_string(),
        password: payload.password,
        remember_me: payload.remember_me,
    };
    let session = interactor.execute(dto).await?;
    let cookie = build_session_cookie(&session.session_id, session.remember_me, &config.session);
    let mut headers = HeaderMap::new();
    headers.insert(SET_COOKIE, cookie_header(&cookie)?);
    Ok((
        StatusCode::OK,
        headers,
        Json(MessageResponse {
            message: "Login successful".to_string(),
        }),
    ))
}

#[utoipa::path(
    post,
    path = "/auth/logout",
    tag = "Auth",
    responses(
        (
            status = 200,
            description = "Logged out successfully",
            body = MessageResponse,
            example = json!(
                {
                    "message": "Logged out successfully"
                }
            )
        ),
        (
            status = 401,
            description = "Missing or invalid session",
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
pub async fn logout(
    auth_user: AuthUser,
    interactor: LogoutInteractor,
    State(config): State<Arc<AppConfig>>,
) -> AppResult<impl IntoResponse> {
    interactor.execute(auth_user.id_dto()).await?;
    let mut headers = HeaderMap::new();
    headers.insert(SET_COOKIE, cookie_header(&build_logout_cookie(&config.session))?);
    Ok((
        StatusCode::OK,
        headers,
        Json(MessageResponse {
            message: "Logged out successfully".to_string(),
        }),
    ))
}
