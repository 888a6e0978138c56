use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::payload::Payload;
use super::token::Token;
use crate::error::AuthError;

/// Session はログイン時に作成されるサーバー側セッション。
/// クライアントは `session_token` のみを保持し、サーバーはそれで照合する。
/// 更新はされず、ログアウト時に削除される。期限切れは照合時に判定する。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub id: Uuid,
    pub user_id: Uuid,
    pub session_token: Uuid,
    pub expired_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl Session {
    pub fn new(user_id: Uuid, duration: Duration) -> Result<Self, AuthError> {
        let created_at = Utc::now();
        let token = Token::issued_at(created_at, duration)?;
        Ok(Self {
            id: token.id,
            user_id,
            session_token: Uuid::new_v4(),
            expired_at: token.expired_at,
            created_at,
        })
    }

    pub fn token(&self) -> Token {
        Token {
            id: self.id,
            expired_at: self.expired_at,
        }
    }

    pub fn payload(&self) -> Payload {
        Payload {
            id: self.id,
            subject_id: self.user_id,
            issued_at: self.created_at,
            expires_at: self.expired_at,
        }
    }
}
