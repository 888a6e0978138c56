//! 対称鍵による自己完結型アクセストークン。
//!
//! Payload を JSON にして AES-256-GCM で暗号化し、`v1.local.` ヘッダーに
//! base64url(nonce || ciphertext) を続けた文字列を資格情報とする。
//! ヘッダーは AAD として認証対象に含める。

use aes_gcm::aead::{Aead, KeyInit, Payload as AeadPayload};
use aes_gcm::{Aes256Gcm, Nonce};
use async_trait::async_trait;
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use chrono::{DateTime, Duration, Utc};
use rand::RngCore;
use sha2::{Digest, Sha256};
use uuid::Uuid;

use super::TokenMaker;
use crate::domain::entity::payload::Payload;
use crate::error::AuthError;

/// 対称鍵の最小バイト長。
pub const MIN_SYMMETRIC_KEY_LEN: usize = 32;

const TOKEN_HEADER: &str = "v1.local.";
const NONCE_LEN: usize = 12;

/// SymmetricTokenMaker は対称鍵を専有し、トークンの発行と検証を行う唯一の主体。
/// 構築後は不変のため、任意の数のリクエストから同時に参照できる。
pub struct SymmetricTokenMaker {
    cipher: Aes256Gcm,
}

impl SymmetricTokenMaker {
    /// 鍵長が `MIN_SYMMETRIC_KEY_LEN` 未満の場合は構築時点で `Config` エラーを返す。
    pub fn new(symmetric_key: &[u8]) -> Result<Self, AuthError> {
        if symmetric_key.len() < MIN_SYMMETRIC_KEY_LEN {
            return Err(AuthError::Config(format!(
                "invalid key size: must be at least {MIN_SYMMETRIC_KEY_LEN} bytes"
            )));
        }

        let key = Sha256::digest(symmetric_key);
        let cipher = Aes256Gcm::new_from_slice(key.as_slice())
            .map_err(|e| AuthError::Config(e.to_string()))?;

        Ok(Self { cipher })
    }

    /// 指定時刻を基準にトークンを検証する。
    pub fn verify_token_at(&self, token: &str, now: DateTime<Utc>) -> Result<Payload, AuthError> {
        let payload = self.decrypt(token)?;
        payload.valid_at(now)?;
        Ok(payload)
    }

    fn encrypt(&self, payload: &Payload) -> Result<String, AuthError> {
        let plaintext =
            serde_json::to_vec(payload).map_err(|e| AuthError::Internal(e.to_string()))?;

        let mut nonce_bytes = [0u8; NONCE_LEN];
        rand::thread_rng().fill_bytes(&mut nonce_bytes);

        let ciphertext = self
            .cipher
            .encrypt(
                Nonce::from_slice(&nonce_bytes),
                AeadPayload {
                    msg: &plaintext,
                    aad: TOKEN_HEADER.as_bytes(),
                },
            )
            .map_err(|e| AuthError::Internal(e.to_string()))?;

        let mut combined = nonce_bytes.to_vec();
        combined.extend_from_slice(&ciphertext);
        Ok(format!("{TOKEN_HEADER}{}", URL_SAFE_NO_PAD.encode(combined)))
    }

    fn decrypt(&self, token: &str) -> Result<Payload, AuthError> {
        let body = token
            .strip_prefix(TOKEN_HEADER)
            .ok_or(AuthError::InvalidToken)?;
        let combined = URL_SAFE_NO_PAD
            .decode(body)
            .map_err(|_| AuthError::InvalidToken)?;

        if combined.len() <= NONCE_LEN {
            return Err(AuthError::InvalidToken);
        }

        let (nonce_bytes, ciphertext) = combined.split_at(NONCE_LEN);
        let plaintext = self
            .cipher
            .decrypt(
                Nonce::from_slice(nonce_bytes),
                AeadPayload {
                    msg: ciphertext,
                    aad: TOKEN_HEADER.as_bytes(),
                },
            )
            .map_err(|_| AuthError::InvalidToken)?;

        serde_json::from_slice(&plaintext).map_err(|_| AuthError::InvalidToken)
    }
}

#[async_trait]
impl TokenMaker for SymmetricTokenMaker {
    async fn create_token(
        &self,
        subject_id: Uuid,
        duration: Duration,
    ) -> Result<(String, Payload), AuthError> {
        let payload = Payload::new(subject_id, duration)?;
        let token = self.encrypt(&payload)?;
        Ok((token, payload))
    }

    async fn verify_token(&self, token: &str) -> Result<Payload, AuthError> {
        self.verify_token_at(token, Utc::now())
    }

    async fn revoke_token(&self, _token: &str) -> Result<(), AuthError> {
        // サーバー側状態を持たないため失効対象がない
        Ok(())
    }
}
