use thiserror::Error;
use uuid::Uuid;

/// AuthError はトークンの発行・検証と認証ミドルウェアのエラーを表す。
/// メッセージにはトークン値そのものを含めない。
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("invalid token maker configuration: {0}")]
    Config(String),

    #[error("authorization credential is not provided")]
    CredentialMissing,

    #[error("invalid authorization credential format")]
    CredentialMalformed,

    #[error("unsupported authorization type {0}")]
    UnsupportedScheme(String),

    #[error("token is invalid")]
    InvalidToken,

    #[error("token has expired")]
    ExpiredToken,

    #[error("session store failure: {0}")]
    BackingStore(String),

    #[error("token issuance failed: {0}")]
    Internal(String),
}

impl AuthError {
    /// ログ出力用のエラー種別。
    pub fn kind(&self) -> &'static str {
        match self {
            AuthError::Config(_) => "config",
            AuthError::CredentialMissing => "credential_missing",
            AuthError::CredentialMalformed => "credential_malformed",
            AuthError::UnsupportedScheme(_) => "unsupported_scheme",
            AuthError::InvalidToken => "invalid_token",
            AuthError::ExpiredToken => "expired_token",
            AuthError::BackingStore(_) => "backing_store",
            AuthError::Internal(_) => "internal",
        }
    }
}

/// MemberError はメンバー操作ユースケースのエラーを表す。
#[derive(Debug, Error)]
pub enum MemberError {
    #[error("validation failed: {0}")]
    Validation(String),

    #[error("member not found: {0}")]
    NotFound(Uuid),

    #[error("internal error: {0}")]
    Internal(String),
}

/// UserError はユーザー登録・ログイン系ユースケースのエラーを表す。
#[derive(Debug, Error)]
pub enum UserError {
    #[error("validation failed: {0}")]
    Validation(String),

    #[error("email is already registered")]
    EmailTaken,

    #[error("user not found")]
    NotFound,

    #[error("incorrect email or password")]
    InvalidCredentials,

    #[error(transparent)]
    Token(#[from] AuthError),

    #[error("internal error: {0}")]
    Internal(String),
}
