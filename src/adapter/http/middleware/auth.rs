use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{HeaderValue, header::COOKIE, header::SET_COOKIE},
    middleware::Next,
    response::Response,
};
use tracing::debug;

use crate::{
    adapter::http::middleware::extractor::AuthUser,
    application::{
        app_error::{AppError, AppResult},
        dto::session::{SessionValidationResult, ValidateSessionDTO},
        interactors::session::ValidateSessionInteractor,
    },
    infra::config::{AppConfig, SessionConfig},
};

#[derive(Clone)]
pub struct SessionRotation {
    pub new_session_id: String,
    pub remember_me: bool,
}

/// Resolves the session cookie into an [`AuthUser`] request extension, or answers 401.
pub async fn auth_middleware(
    State(config): State<Arc<AppConfig>>,
    interactor: ValidateSessionInteractor,
    mut request: Request,
    next: Next,
) -> AppResult<Response> {
    let policy = &config.session;
    let session_id = extract_session_id(&request, &policy.cookie_name).ok_or(AppError::InvalidCredentials)?;
    let dto = ValidateSessionDTO {
        id: session_id,
        default_max_lifetime: policy.default_max_lifetime,
        default_idle_timeout: policy.default_idle_timeout,
        remembered_max_lifetime: policy.remembered_max_lifetime,
        remembered_idle_timeout: policy.remembered_idle_timeout,
        rotation_interval: policy.rotation_interval,
    };

    match interactor.execute(dto).await? {
        SessionValidationResult::Valid(user_id) => {
            request.extensions_mut().insert(AuthUser {
                user_id: user_id.to_string(),
            });
        }
        SessionValidationResult::Rotated {
            user_id,
            new_session_id,
            remember_me,
        } => {
            debug!(user_id = %user_id, "Session rotated");
            request.extensions_mut().insert(AuthUser {
                user_id: user_id.to_string(),
            });
            request.extensions_mut().insert(SessionRotation {
                new_session_id: new_session_id.to_string(),
                remember_me,
            });
        }
        SessionValidationResult::Expired | SessionValidationResult::Invalid => {
            return Err(AppError::InvalidCredentials);
        }
    }

    Ok(next.run(request).await)
}

fn extract_session_id(request: &Request, cookie_name: &str) -> Option<String> {
    let prefix = format!("{}=", cookie_name);
    request
        .headers()
        .get_all(COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|header| header.split(';'))
        .find_map(|cookie| cookie.trim().strip_prefix(prefix.as_str()).map(str::to_string))
        .filter(|value| !value.is_empty())
}

/// Re-issues the cookie when [`auth_middleware`] rotated the session.
pub async fn session_cookie_middleware(
    State(config): State<Arc<AppConfig>>,
    request: Request,
    next: Next,
) -> Response {
    let rotated = request.extensions().get::<SessionRotation>().cloned();
    let mut response = next.run(request).await;
    if let Some(rotated) = rotated {
        let cookie = build_session_cookie(&rotated.new_session_id, rotated.remember_me, &config.session);
        if let Ok(value) = HeaderValue::from_str(&cookie) {
            response.headers_mut().append(SET_COOKIE, value);
        }
    }
    response
}

pub fn build_session_cookie(session_id: &str, remember_me: bool, config: &SessionConfig) -> String {
    let max_age = if remember_me {
        config.remembered_max_lifetime
    } else {
        config.default_max_lifetime
    };

    let secure = if config.cookie_secure { "; Secure" } else { "" };
    let http_only = if config.cookie_http_only { "; HttpOnly" } else { "" };
    format!(
        "{}={}; Path=/; Max-Age={}; SameSite=Lax{}{}",
        config.cookie_name, session_id, max_age, secure, http_only
    )
}

pub fn build_logout_cookie(config: &SessionConfig) -> String {
    format!("{}=; Path=/; Max-Age=0; SameSite=Lax", config.cookie_name)
}

pub fn cookie_header(cookie: &str) -> AppResult<HeaderValue> {
    HeaderValue::from_str(cookie).map_err(|e| AppError::InvalidHeader(e.to_string()))
}
