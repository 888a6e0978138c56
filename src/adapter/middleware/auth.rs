use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderMap, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};

use crate::error::AuthError;
use crate::infrastructure::config::{AuthConfig, AuthMode, CredentialLocation};
use crate::infrastructure::TokenMaker;

const BEARER_SCHEME: &str = "bearer";

/// CredentialSource は資格情報を読み取る位置を表す。デプロイごとに 1 つだけ使う。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialSource {
    /// `Authorization: Bearer <token>`
    AuthorizationHeader,
    /// 値が `Bearer <token>` 形式の Cookie
    BearerCookie(String),
    /// 値がセッショントークン（UUID）そのものの Cookie
    SessionCookie(String),
}

impl CredentialSource {
    pub fn from_config(cfg: &AuthConfig) -> Self {
        match (cfg.mode, cfg.credential) {
            (AuthMode::Session, _) => Self::SessionCookie(cfg.session_token_cookie.clone()),
            (AuthMode::Token, CredentialLocation::Cookie) => {
                Self::BearerCookie(cfg.access_token_cookie.clone())
            }
            (AuthMode::Token, CredentialLocation::Header) => Self::AuthorizationHeader,
        }
    }

    /// Cookie で資格情報を受け渡す場合の Cookie 名。
    pub fn cookie_name(&self) -> Option<&str> {
        match self {
            Self::AuthorizationHeader => None,
            Self::BearerCookie(name) | Self::SessionCookie(name) => Some(name),
        }
    }
}

/// AuthState はミドルウェアが使用する共有状態。
#[derive(Clone)]
pub struct AuthState {
    pub maker: Arc<dyn TokenMaker>,
    pub source: CredentialSource,
}

impl AuthState {
    pub fn new(maker: Arc<dyn TokenMaker>, source: CredentialSource) -> Self {
        Self { maker, source }
    }
}

/// auth_middleware は資格情報を検証し、Payload をリクエストエクステンションに格納する。
/// 検証に失敗した場合は後続のハンドラーを呼ばずにエラーレスポンスを返す。
pub async fn auth_middleware(
    State(state): State<AuthState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AuthErrorResponse> {
    let result = match extract_credential(req.headers(), &state.source) {
        Ok(credential) => state.maker.verify_token(&credential).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(payload) => {
            req.extensions_mut().insert(payload);
            Ok(next.run(req).await)
        }
        Err(err) => {
            match &err {
                AuthError::BackingStore(_) | AuthError::Internal(_) | AuthError::Config(_) => {
                    tracing::error!(kind = err.kind(), error = %err, "authentication failed");
                }
                _ => tracing::debug!(kind = err.kind(), "authentication rejected"),
            }
            Err(AuthErrorResponse::from(err))
        }
    }
}

/// 設定された位置から資格情報を取り出す。
pub fn extract_credential(
    headers: &HeaderMap,
    source: &CredentialSource,
) -> Result<String, AuthError> {
    match source {
        CredentialSource::AuthorizationHeader => {
            let value = headers
                .get(header::AUTHORIZATION)
                .ok_or(AuthError::CredentialMissing)?
                .to_str()
                .map_err(|_| AuthError::CredentialMalformed)?;
            parse_bearer(value)
        }
        CredentialSource::BearerCookie(name) => {
            let value = find_cookie(headers, name)?;
            parse_bearer(&value)
        }
        CredentialSource::SessionCookie(name) => find_cookie(headers, name),
    }
}

/// `<scheme> <token>` 形式の値を解析する。scheme は大文字小文字を区別しない。
pub fn parse_bearer(value: &str) -> Result<String, AuthError> {
    if value.trim().is_empty() {
        return Err(AuthError::CredentialMissing);
    }

    let mut fields = value.split_whitespace();
    let (Some(scheme), Some(token)) = (fields.next(), fields.next()) else {
        return Err(AuthError::CredentialMalformed);
    };

    if !scheme.eq_ignore_ascii_case(BEARER_SCHEME) {
        return Err(AuthError::UnsupportedScheme(scheme.to_ascii_lowercase()));
    }

    Ok(token.to_string())
}

fn find_cookie(headers: &HeaderMap, name: &str) -> Result<String, AuthError> {
    for value in headers.get_all(header::COOKIE) {
        let Ok(raw) = value.to_str() else {
            continue;
        };
        for pair in raw.split(';') {
            let Some((key, val)) = pair.trim().split_once('=') else {
                continue;
            };
            if key.trim() == name {
                let val = val.trim();
                if val.is_empty() {
                    return Err(AuthError::CredentialMissing);
                }
                return Ok(val.to_string());
            }
        }
    }
    Err(AuthError::CredentialMissing)
}

/// AuthErrorResponse は認証失敗時の HTTP レスポンス。
#[derive(Debug)]
pub struct AuthErrorResponse {
    pub status: StatusCode,
    pub code: &'static str,
    pub message: String,
}

impl From<AuthError> for AuthErrorResponse {
    fn from(err: AuthError) -> Self {
        let (status, code) = match &err {
            AuthError::Config(_) => (StatusCode::INTERNAL_SERVER_ERROR, "AUTH_CONFIG_ERROR"),
            AuthError::CredentialMissing => (StatusCode::UNAUTHORIZED, "AUTH_CREDENTIAL_MISSING"),
            AuthError::CredentialMalformed => {
                (StatusCode::UNAUTHORIZED, "AUTH_CREDENTIAL_MALFORMED")
            }
            AuthError::UnsupportedScheme(_) => {
                (StatusCode::UNAUTHORIZED, "AUTH_UNSUPPORTED_SCHEME")
            }
            AuthError::InvalidToken => (StatusCode::UNAUTHORIZED, "AUTH_TOKEN_INVALID"),
            AuthError::ExpiredToken => (StatusCode::UNAUTHORIZED, "AUTH_TOKEN_EXPIRED"),
            AuthError::BackingStore(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "AUTH_BACKING_STORE_ERROR")
            }
            AuthError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "AUTH_INTERNAL_ERROR"),
        };

        // 内部エラーの詳細はクライアントに返さない
        let message = if status.is_server_error() {
            "internal authentication error".to_string()
        } else {
            err.to_string()
        };

        Self {
            status,
            code,
            message,
        }
    }
}

impl IntoResponse for AuthErrorResponse {
    fn into_response(self) -> Response {
        let body = serde_json::json!({
            "error": {
                "code": self.code,
                "message": self.message,
            }
        });
        (self.status, Json(body)).into_response()
    }
}
