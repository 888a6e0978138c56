use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::token::Token;
use crate::error::AuthError;

/// Payload は検証済みトークンが表明する内容。
/// 認証ミドルウェアはこれをリクエストエクステンションに格納し、ハンドラーは
/// `Extension<Payload>` で呼び出し元ユーザーを取得する。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payload {
    /// トークン自身の ID（ユーザー ID ではない）
    pub id: Uuid,
    /// トークンが表明するユーザー ID
    pub subject_id: Uuid,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Payload {
    /// `subject_id` に対して現在時刻から `duration` 有効な Payload を生成する。
    pub fn new(subject_id: Uuid, duration: Duration) -> Result<Self, AuthError> {
        let issued_at = Utc::now();
        let token = Token::issued_at(issued_at, duration)?;
        Ok(Self {
            id: token.id,
            subject_id,
            issued_at,
            expires_at: token.expired_at,
        })
    }

    pub fn token(&self) -> Token {
        Token {
            id: self.id,
            expired_at: self.expires_at,
        }
    }

    pub fn valid_at(&self, now: DateTime<Utc>) -> Result<(), AuthError> {
        self.token().valid_at(now)
    }
}
