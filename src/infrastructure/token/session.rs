//! サーバー側セッションによる資格情報。
//!
//! 資格情報は不透明な UUID 文字列で、実体はセッションストアに保存される。

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use super::TokenMaker;
use crate::domain::entity::payload::Payload;
use crate::domain::entity::session::Session;
use crate::domain::repository::SessionRepository;
use crate::error::AuthError;

/// SessionTokenMaker はセッションストアを参照して資格情報を検証する。
pub struct SessionTokenMaker {
    repo: Arc<dyn SessionRepository>,
}

impl SessionTokenMaker {
    pub fn new(repo: Arc<dyn SessionRepository>) -> Self {
        Self { repo }
    }

    /// 指定時刻を基準にセッションを検証する。
    pub async fn verify_token_at(
        &self,
        token: &str,
        now: DateTime<Utc>,
    ) -> Result<Payload, AuthError> {
        let session_token = parse_session_token(token)?;

        let session = self
            .repo
            .find_by_token(session_token)
            .await
            .map_err(|e| AuthError::BackingStore(e.to_string()))?
            .ok_or(AuthError::InvalidToken)?;

        session.token().valid_at(now)?;
        Ok(session.payload())
    }
}

fn parse_session_token(token: &str) -> Result<Uuid, AuthError> {
    Uuid::parse_str(token).map_err(|_| AuthError::CredentialMalformed)
}

#[async_trait]
impl TokenMaker for SessionTokenMaker {
    async fn create_token(
        &self,
        subject_id: Uuid,
        duration: Duration,
    ) -> Result<(String, Payload), AuthError> {
        let session = Session::new(subject_id, duration)?;
        self.repo
            .save(&session)
            .await
            .map_err(|e| AuthError::BackingStore(e.to_string()))?;

        Ok((session.session_token.to_string(), session.payload()))
    }

    async fn verify_token(&self, token: &str) -> Result<Payload, AuthError> {
        self.verify_token_at(token, Utc::now()).await
    }

    async fn revoke_token(&self, token: &str) -> Result<(), AuthError> {
        let session_token = parse_session_token(token)?;
        self.repo
            .delete_by_token(session_token)
            .await
            .map_err(|e| AuthError::BackingStore(e.to_string()))
    }
}
