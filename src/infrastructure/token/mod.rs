//! トークン発行・検証の抽象と 2 つの実装。
//!
//! デプロイごとにどちらか一方を構築時に選択する。両者を併用しない。

pub mod session;
pub mod symmetric;

pub use session::SessionTokenMaker;
pub use symmetric::{SymmetricTokenMaker, MIN_SYMMETRIC_KEY_LEN};

use async_trait::async_trait;
use chrono::Duration;
use uuid::Uuid;

use crate::domain::entity::payload::Payload;
use crate::error::AuthError;

/// TokenMaker はユーザーに紐づく資格情報を発行・検証するトレイト。
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TokenMaker: Send + Sync {
    /// `subject_id` に対して `duration` 有効な資格情報を発行する。
    /// `duration` が負の場合は発行時点で失効済みの資格情報になる。
    async fn create_token(
        &self,
        subject_id: Uuid,
        duration: Duration,
    ) -> Result<(String, Payload), AuthError>;

    /// 資格情報を検証し Payload を返す。
    /// 改ざん・形式不正は `InvalidToken`、期限切れは `ExpiredToken` となる。
    async fn verify_token(&self, token: &str) -> Result<Payload, AuthError>;

    /// 資格情報を失効させる（ログアウト）。
    async fn revoke_token(&self, token: &str) -> Result<(), AuthError>;
}
