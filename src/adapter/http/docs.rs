use std::sync::Arc;

use axum::extract::State;
use axum::{Json, response::Html};
use utoipa::{
    OpenApi,
    openapi::{
        OpenApi as OpenApiDoc,
        security::{ApiKey, ApiKeyValue, SecurityScheme},
    },
};

use crate::adapter::http::{
    app_error_impl::{ErrorResponse, ValidationErrorResponse},
    routes::{auth, kudo, profile, user},
    schema::{
        auth::{LoginRequest, MessageResponse, RegisterRequest},
        id::IdResponse,
        kudo::{CreateKudoRequest, KudoFeedResponse, KudoResponse, KudoStyleResponse, RecentKudoResponse},
        profile::{AvatarResponse, AvatarUploadRequest, UpdateProfileRequest},
        user::{ProfileResponse, UserResponse},
    },
};
use crate::infra::config::AppConfig;

#[derive(OpenApi)]
#[openapi(
    paths(
        auth::register,
        auth::login,
        auth::logout,
        user::list_colleagues,
        user::get_me,
        user::get_user,
        profile::update_profile,
        profile::delete_account,
        profile::upload_avatar,
        profile::get_avatar,
        kudo::get_feed,
        kudo::get_recent,
        kudo::create_kudo
    ),
    components(
        schemas(
            ErrorResponse,
            ValidationErrorResponse,
            MessageResponse,
            IdResponse,
            RegisterRequest,
            LoginRequest,
            ProfileResponse,
            UserResponse,
            UpdateProfileRequest,
            AvatarUploadRequest,
            AvatarResponse,
            CreateKudoRequest,
            KudoStyleResponse,
            KudoResponse,
            KudoFeedResponse,
            RecentKudoResponse
        )
    )
)]
pub struct ApiDoc;

/// The generated document with `cookieAuth` bound to the configured session cookie.
pub fn api_doc(cookie_name: &str) -> OpenApiDoc {
    let mut doc = ApiDoc::openapi();
    if let Some(components) = doc.components.as_mut() {
        components.add_security_scheme(
            "cookieAuth",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::new(cookie_name))),
        );
    }
    doc
}

pub async fn openapi_json(State(config): State<Arc<AppConfig>>) -> Json<OpenApiDoc> {
    Json(api_doc(&config.session.cookie_name))
}

pub async fn docs_ui() -> Html<&'static str> {
    Html(
        r#"
            <!doctype html>
            <html>
              <head>
                <title>Kudos API</title>
                <meta charset="utf-8">
                <meta name="viewport" content="width=device-width, initial-scale=1">
                <script src="https://unpkg.com/@stoplight/elements/web-components.min.js"></script>
                <link rel="stylesheet" href="https://unpkg.com/@stoplight/elements/styles.min.css">
              </head>
              <body style="height: 100%; margin: 0;">
                <elements-api
                  apiDescriptionUrl="openapi.json"
                  basePath="/"
                  router="hash"
                />
              </body>
            </html>
        "#,
    )
}
