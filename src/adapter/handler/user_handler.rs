use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Extension, Json,
};

use super::{AppState, ErrorResponse};
use crate::adapter::middleware::auth::{extract_credential, AuthErrorResponse};
use crate::adapter::middleware::CredentialSource;
use crate::domain::entity::payload::Payload;
use crate::error::UserError;
use crate::usecase::create_user::CreateUserInput;
use crate::usecase::login_user::LoginUserInput;

impl IntoResponse for UserError {
    fn into_response(self) -> Response {
        match self {
            UserError::Validation(msg) => ErrorResponse::new("USER_VALIDATION_ERROR", &msg)
                .into_response_with(StatusCode::BAD_REQUEST),
            UserError::EmailTaken => {
                ErrorResponse::new("USER_EMAIL_TAKEN", "email is already registered")
                    .into_response_with(StatusCode::FORBIDDEN)
            }
            UserError::NotFound => ErrorResponse::new("USER_NOT_FOUND", "user not found")
                .into_response_with(StatusCode::NOT_FOUND),
            UserError::InvalidCredentials => {
                ErrorResponse::new("USER_INVALID_CREDENTIALS", "incorrect email or password")
                    .into_response_with(StatusCode::UNAUTHORIZED)
            }
            UserError::Token(err) => {
                tracing::warn!(kind = err.kind(), "token operation failed");
                AuthErrorResponse::from(err).into_response()
            }
            UserError::Internal(msg) => {
                tracing::error!(error = %msg, "user operation failed");
                ErrorResponse::new("INTERNAL_ERROR", "internal server error")
                    .into_response_with(StatusCode::INTERNAL_SERVER_ERROR)
            }
        }
    }
}

/// 資格情報 Cookie の値。Bearer Cookie はスキーム付きで保存する。
fn cookie_value(source: &CredentialSource, token: &str) -> String {
    match source {
        CredentialSource::BearerCookie(_) => format!("Bearer {token}"),
        _ => token.to_string(),
    }
}

fn set_cookie(name: &str, value: &str, max_age_secs: i64) -> Result<HeaderValue, UserError> {
    HeaderValue::from_str(&format!(
        "{name}={value}; Path=/; Max-Age={max_age_secs}; HttpOnly; Secure; SameSite=None"
    ))
    .map_err(|e| UserError::Internal(e.to_string()))
}

pub async fn create_user(
    State(state): State<AppState>,
    payload: Result<Json<CreateUserInput>, JsonRejection>,
) -> Result<impl IntoResponse, UserError> {
    let Json(input) = payload.map_err(|e| UserError::Validation(e.body_text()))?;
    let user = state.create_user_uc.execute(input).await?;
    Ok((StatusCode::OK, Json(user)))
}

pub async fn login_user(
    State(state): State<AppState>,
    payload: Result<Json<LoginUserInput>, JsonRejection>,
) -> Result<Response, UserError> {
    let Json(input) = payload.map_err(|e| UserError::Validation(e.body_text()))?;
    let output = state.login_user_uc.execute(input).await?;

    let mut headers = HeaderMap::new();
    if let Some(name) = state.auth.source.cookie_name() {
        let value = cookie_value(&state.auth.source, &output.access_token);
        let max_age = state.token_duration.num_seconds().max(0);
        headers.insert(header::SET_COOKIE, set_cookie(name, &value, max_age)?);
    }

    Ok((StatusCode::OK, headers, Json(output)).into_response())
}

pub async fn logout_user(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, UserError> {
    let credential = extract_credential(&headers, &state.auth.source)?;
    state.logout_user_uc.execute(&credential).await?;

    let mut response_headers = HeaderMap::new();
    if let Some(name) = state.auth.source.cookie_name() {
        response_headers.insert(header::SET_COOKIE, set_cookie(name, "", 0)?);
    }

    Ok((StatusCode::NO_CONTENT, response_headers).into_response())
}

pub async fn get_current_user(
    State(state): State<AppState>,
    Extension(payload): Extension<Payload>,
) -> Result<impl IntoResponse, UserError> {
    let user = state.get_current_user_uc.execute(payload.subject_id).await?;
    Ok(Json(user))
}
