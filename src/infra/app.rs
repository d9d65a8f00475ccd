use axum::extract::DefaultBodyLimit;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{self};
use axum::routing::{get, patch, post};
use axum::{Router, middleware};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;
use uuid::Uuid;

use crate::adapter::http::docs::{docs_ui, openapi_json};
use crate::adapter::http::middleware::auth::{auth_middleware, session_cookie_middleware};
use crate::adapter::http::routes::auth::{login, logout, register};
use crate::adapter::http::routes::kudo::{create_kudo, get_feed, get_recent};
use crate::adapter::http::routes::profile::{delete_account, get_avatar, update_profile, upload_avatar};
use crate::adapter::http::routes::user::{get_me, get_user, list_colleagues};
use crate::infra::config::AppConfig;
use crate::infra::state::AppState;

/// Room for the multipart framing around an avatar of the maximum size.
const MULTIPART_OVERHEAD: usize = 64 * 1024;

const ALLOWED_METHODS: [http::Method; 4] = [
    http::Method::POST,
    http::Method::GET,
    http::Method::PATCH,
    http::Method::DELETE,
];

fn build_cors(config: &AppConfig) -> CorsLayer {
    let has_wildcard = config.application.allow_origins.iter().any(|s| s == "*");

    if has_wildcard {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(ALLOWED_METHODS)
            .allow_headers([CONTENT_TYPE, AUTHORIZATION]);
    }
    let origins: Vec<http::HeaderValue> = config
        .application
        .allow_origins
        .iter()
        .filter_map(|s| {
            s.parse::<http::HeaderValue>()
                .map_err(|e| {
                    tracing::warn!("Failed to parse origin '{}': {}", s, e);
                })
                .ok()
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(ALLOWED_METHODS)
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .allow_credentials(true)
}

/// Puts `router` behind the session cookie.
fn protected(router: Router<AppState>, state: &AppState) -> Router<AppState> {
    router
        .route_layer(middleware::from_fn_with_state(state.clone(), session_cookie_middleware))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth_middleware))
}

pub fn auth_router(state: AppState) -> Router<AppState> {
    let public_routes = Router::new()
        .route("/register", post(register))
        .route("/login", post(login));

    let protected_routes = protected(Router::new().route("/logout", post(logout)), &state);
    Router::new().merge(public_routes).merge(protected_routes)
}

pub fn user_router(state: AppState) -> Router<AppState> {
    protected(
        Router::new()
            .route("/", get(list_colleagues))
            .route("/me", get(get_me))
            .route("/{user_id}", get(get_user)),
        &state,
    )
}

pub fn profile_router(state: AppState) -> Router<AppState> {
    let avatar_limit = state.config.s3.max_avatar_size + MULTIPART_OVERHEAD;
    protected(
        Router::new()
            .route("/profile", patch(update_profile).delete(delete_account))
            .route("/avatar", post(upload_avatar).layer(DefaultBodyLimit::max(avatar_limit)))
            .route("/avatars/{user_id}/{file_name}", get(get_avatar)),
        &state,
    )
}

pub fn kudo_router(state: AppState) -> Router<AppState> {
    protected(
        Router::new()
            .route("/", get(get_feed).post(create_kudo))
            .route("/recent", get(get_recent)),
        &state,
    )
}

pub fn router(state: AppState) -> Router<AppState> {
    Router::new()
        .nest("/auth", auth_router(state.clone()))
        .nest("/users", user_router(state.clone()))
        .nest("/kudos", kudo_router(state.clone()))
        .merge(profile_router(state.clone()))
        .route("/openapi.json", get(openapi_json))
        .route("/docs", get(docs_ui))
}

pub fn create_app(config: &AppConfig, state: AppState) -> Router {
    let cors = build_cors(config);
    Router::new()
        .merge(router(state.clone()))
        .with_state(state.clone())
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &http::Request<_>| {
                    let request_id = Uuid::now_v7();
                    tracing::info_span!(
                        "http-request",
                        method = %request.method(),
                        uri = %request.uri(),
                        version = ?request.version(),
                        request_id = %request_id
                    )
                })
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::header::{COOKIE, SET_COOKIE};
    use axum::http::{Request, StatusCode};
    use chrono::{Duration, Utc};
    use http_body_util::BodyExt;
    use rstest::rstest;
    use serde_json::{Value, json};
    use serial_test::serial;
    use tower::ServiceExt;

    use crate::domain::entities::kudo::Emoji;
    use crate::infra::app::create_app;
    use crate::infra::state::AppState;
    use crate::tests::fixtures::init_test_app_state;
    use crate::tests::helpers::{
        count_kudos, delete_user, hash_password, insert_kudo, insert_session, insert_user_with_credentials,
        insert_user_with_profile, session_cookie, unique_email,
    };

    async fn read_json(response: axum::response::Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn json_request(method: &str, uri: &str, cookie: Option<&str>, body: Value) -> Request<Body> {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json");
        if let Some(cookie) = cookie {
            builder = builder.header(COOKIE, cookie);
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    fn get_request(uri: &str, cookie: &str) -> Request<Body> {
        Request::builder().uri(uri).header(COOKIE, cookie).body(Body::empty()).unwrap()
    }

    #[rstest]
    #[case("/kudos")]
    #[case("/kudos/recent")]
    #[case("/users")]
    #[case("/users/me")]
    #[tokio::test]
    #[serial]
    async fn test_protected_routes_require_session(
        #[future] init_test_app_state: anyhow::Result<AppState>,
        #[case] uri: &str,
    ) {
        let state = init_test_app_state.await.unwrap();
        let app = create_app(state.config.as_ref(), state.clone());

        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[rstest]
    #[tokio::test]
    #[serial]
    async fn test_register_then_read_me(#[future] init_test_app_state: anyhow::Result<AppState>) {
        let state = init_test_app_state.await.unwrap();
        let email = unique_email();
        let app = create_app(state.config.as_ref(), state.clone());

        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/auth/register",
                None,
                json!({ "email": email, "password": "hunter2", "firstName": "Alice", "lastName": "Jones" }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let set_cookie = response.headers().get(SET_COOKIE).unwrap().to_str().unwrap().to_string();
        let cookie = set_cookie.split(';').next().unwrap().to_string();

        let response = app.oneshot(get_request("/users/me", &cookie)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json(response).await;
        assert_eq!(body["email"], email);
        assert_eq!(body["profile"]["firstName"], "Alice");

        delete_user(&state.pool, body["id"].as_str().unwrap().parse().unwrap()).await;
    }

    #[rstest]
    #[tokio::test]
    #[serial]
    async fn test_login_logout_round_trip(#[future] init_test_app_state: anyhow::Result<AppState>) {
        let state = init_test_app_state.await.unwrap();
        let email = unique_email();
        let hashed = hash_password(&state, "hunter2").await;
        let user_id = insert_user_with_credentials(&state.pool, &email, &hashed, "Alice", "Jones").await;
        let app = create_app(state.config.as_ref(), state.clone());

        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/auth/login",
                None,
                json!({ "email": email.to_uppercase(), "password": "wrong" }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/auth/login",
                None,
                json!({ "email": email.to_uppercase(), "password": "hunter2" }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let set_cookie = response.headers().get(SET_COOKIE).unwrap().to_str().unwrap().to_string();
        let cookie = set_cookie.split(';').next().unwrap().to_string();

        let response = app
            .clone()
            .oneshot(json_request("POST", "/auth/logout", Some(&cookie), json!({})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app.oneshot(get_request("/users/me", &cookie)).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        delete_user(&state.pool, user_id).await;
    }

    #[rstest]
    #[tokio::test]
    #[serial]
    async fn test_send_kudo_and_read_recipient_feed(#[future] init_test_app_state: anyhow::Result<AppState>) {
        let state = init_test_app_state.await.unwrap();
        let cookie_name = state.config.session.cookie_name.clone();
        let author = insert_user_with_profile(&state.pool, "Alice", "Smith").await;
        let recipient = insert_user_with_profile(&state.pool, "Bob", "Lee").await;
        let author_cookie = session_cookie(insert_session(&state.pool, author).await, &cookie_name);
        let recipient_cookie = session_cookie(insert_session(&state.pool, recipient).await, &cookie_name);
        let app = create_app(state.config.as_ref(), state.clone());

        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/kudos",
                Some(&author_cookie),
                json!({
                    "message": "Great demo",
                    "backgroundColor": "GREEN",
                    "textColor": "WHITE",
                    "emoji": "handsup",
                    "recipientId": recipient.to_string(),
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let response = app
            .clone()
            .oneshot(get_request("/kudos?filter=smith", &recipient_cookie))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json(response).await;
        assert_eq!(body["total"], 1);
        assert_eq!(body["items"][0]["message"], "Great demo");
        assert_eq!(body["items"][0]["author"]["firstName"], "Alice");
        assert_eq!(body["items"][0]["style"]["emoji"], "HANDSUP");

        let response = app.oneshot(get_request("/kudos", &author_cookie)).await.unwrap();
        assert_eq!(read_json(response).await["total"], 0);

        delete_user(&state.pool, author).await;
        delete_user(&state.pool, recipient).await;
    }

    #[rstest]
    #[tokio::test]
    #[serial]
    async fn test_kudo_to_unknown_recipient_is_not_found(#[future] init_test_app_state: anyhow::Result<AppState>) {
        let state = init_test_app_state.await.unwrap();
        let author = insert_user_with_profile(&state.pool, "Alice", "Smith").await;
        let cookie = session_cookie(insert_session(&state.pool, author).await, &state.config.session.cookie_name);
        let before = count_kudos(&state.pool).await;
        let app = create_app(state.config.as_ref(), state.clone());

        let response = app
            .oneshot(json_request(
                "POST",
                "/kudos",
                Some(&cookie),
                json!({
                    "message": "Hello?",
                    "backgroundColor": "RED",
                    "textColor": "WHITE",
                    "emoji": "PARTY",
                    "recipientId": uuid::Uuid::now_v7().to_string(),
                }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(count_kudos(&state.pool).await, before);
        delete_user(&state.pool, author).await;
    }

    #[rstest]
    #[tokio::test]
    #[serial]
    async fn test_delete_account_removes_sent_and_received_kudos(
        #[future] init_test_app_state: anyhow::Result<AppState>,
    ) {
        let state = init_test_app_state.await.unwrap();
        let alice = insert_user_with_profile(&state.pool, "Alice", "Smith").await;
        let bob = insert_user_with_profile(&state.pool, "Bob", "Lee").await;
        let before = count_kudos(&state.pool).await;
        insert_kudo(&state.pool, alice, bob, "Thanks", Emoji::Party, Utc::now()).await;
        insert_kudo(&state.pool, bob, alice, "Back at you", Emoji::Thumbsup, Utc::now() + Duration::seconds(1)).await;
        assert_eq!(count_kudos(&state.pool).await, before + 2);
        let cookie = session_cookie(insert_session(&state.pool, alice).await, &state.config.session.cookie_name);
        let app = create_app(state.config.as_ref(), state.clone());

        let response = app
            .clone()
            .oneshot(json_request("DELETE", "/profile", Some(&cookie), json!({})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(count_kudos(&state.pool).await, before);

        let response = app.oneshot(get_request("/users/me", &cookie)).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        delete_user(&state.pool, bob).await;
    }

    #[rstest]
    #[tokio::test]
    #[serial]
    async fn test_openapi_is_public(#[future] init_test_app_state: anyhow::Result<AppState>) {
        let state = init_test_app_state.await.unwrap();
        let app = create_app(state.config.as_ref(), state.clone());

        let response = app
            .oneshot(Request::builder().uri("/openapi.json").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json(response).await;
        assert!(body["paths"].get("/kudos").is_some());
    }
}
