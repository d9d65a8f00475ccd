use std::sync::Arc;

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::adapter::http::app_error_impl::{ErrorResponse, ValidationErrorResponse};
use crate::adapter::http::middleware::extractor::AuthUser;
use crate::adapter::http::schema::id::IdResponse;
use crate::adapter::http::schema::kudo::{
    CreateKudoRequest, KudoFeedQuery, KudoFeedResponse, RecentKudoResponse, RecentKudosQuery,
};
use crate::adapter::http::validation::ValidJson;
use crate::application::app_error::AppResult;
use crate::application::dto::kudo::{CreateKudoDTO, GetKudoFeedDTO};
use crate::application::interactors::kudo::{CreateKudoInteractor, GetKudoFeedInteractor, GetRecentKudosInteractor};
use crate::infra::config::AppConfig;

const DEFAULT_PAGE: i64 = 1;

#[utoipa::path(
    get,
    path = "/kudos",
    tag = "Kudos",
    params(KudoFeedQuery),
    responses(
        (
            status = 200,
            description = "Kudos received by the current user",
            body = KudoFeedResponse
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
    ),
    security(("cookieAuth" = []))
)]
pub async fn get_feed(
    auth_user: AuthUser,
    interactor: GetKudoFeedInteractor,
    State(config): State<Arc<AppConfig>>,
    Query(query): Query<KudoFeedQuery>,
) -> AppResult<impl IntoResponse> {
    let dto = GetKudoFeedDTO {
        recipient_id: auth_user.user_id,
        sort: query.sort,
        filter: query.filter,
        page: query.page.unwrap_or(DEFAULT_PAGE),
        per_page: query.per_page.unwrap_or(config.kudos.default_per_page),
    };
    let feed = interactor.execute(dto).await?;
    Ok((StatusCode::OK, Json(KudoFeedResponse::from(feed))))
}

#[utoipa::path(
    get,
    path = "/kudos/recent",
    tag = "Kudos",
    params(RecentKudosQuery),
    responses(
        (
            status = 200,
            description = "Newest kudos across all users",
            body = Vec<RecentKudoResponse>
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
pub async fn get_recent(
    interactor: GetRecentKudosInteractor,
    Query(query): Query<RecentKudosQuery>,
) -> AppResult<impl IntoResponse> {
    let kudos = interactor.execute(query.limit).await?;
    let response: Vec<RecentKudoResponse> = kudos.into_iter().map(RecentKudoResponse::from).collect();
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    post,
    path = "/kudos",
    tag = "Kudos",
    request_body(
        content = CreateKudoRequest,
        example = json!(
            {
                "message": "Thanks for the review!",
                "backgroundColor": "YELLOW",
                "textColor": "BLUE",
                "emoji": "THUMBSUP",
                "recipientId": "019c47ec-183d-744e-b11d-cd409015bf13"
            }
        )
    ),
    responses(
        (
            status = 201,
            description = "Kudo created",
            body = IdResponse
        ),
        (
            status = 400,
            description = "Missing or empty fields",
            body = ValidationErrorResponse,
            example = json!(
                {
                    "errors": { "message": "Please provide a message" },
                    "fields": { "message": "", "backgroundColor": "RED", "textColor": "WHITE", "emoji": "PARTY", "recipientId": "019c47ec-183d-744e-b11d-cd409015bf13" }
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
        ),
        (
            status = 404,
            description = "Recipient does not exist",
            body = ErrorResponse,
            example = json!(
                {
                    "error": "No recipient found..."
                }
            )
        )
    ),
    security(("cookieAuth" = []))
)]
pub async fn create_kudo(
    auth_user: AuthUser,
    interactor: CreateKudoInteractor,
    ValidJson(payload): ValidJson<CreateKudoRequest>,
) -> AppResult<impl IntoResponse> {
    let dto = CreateKudoDTO {
        author_id: auth_user.user_id,
        recipient_id: payload.recipient_id,
        message: payload.message,
        background_color: payload.background_color,
        text_color: payload.text_color,
        emoji: payload.emoji,
    };
    let kudo_id = interactor.execute(dto).await?;
    Ok((StatusCode::CREATED, Json(IdResponse::from(kudo_id))))
}
