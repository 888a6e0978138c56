use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AuthError;

/// Token はトークン自身の ID と有効期限を持つ値型。
/// `expired_at` は生成時に一度だけ決まり、以後変更されない。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub id: Uuid,
    pub expired_at: DateTime<Utc>,
}

impl Token {
    /// 現在時刻から `duration` 後に失効するトークンを生成する。
    pub fn new(duration: Duration) -> Result<Self, AuthError> {
        Self::issued_at(Utc::now(), duration)
    }

    /// 指定時刻を起点に `duration` 後に失効するトークンを生成する。
    /// 有効期限が表現可能な日時の範囲を超える場合は `Internal` を返す。
    pub fn issued_at(now: DateTime<Utc>, duration: Duration) -> Result<Self, AuthError> {
        let expired_at = now
            .checked_add_signed(duration)
            .ok_or_else(|| AuthError::Internal("token expiry is out of range".to_string()))?;
        Ok(Self {
            id: Uuid::new_v4(),
            expired_at,
        })
    }

    /// 現在時刻でトークンの有効期限を検証する。
    pub fn valid(&self) -> Result<(), AuthError> {
        self.valid_at(Utc::now())
    }

    /// `now` が `expired_at` より厳密に後の場合のみ期限切れとする。
    /// `expired_at` ちょうどの時刻はまだ有効。
    pub fn valid_at(&self, now: DateTime<Utc>) -> Result<(), AuthError> {
        if now > self.expired_at {
            return Err(AuthError::ExpiredToken);
        }
        Ok(())
    }
}
