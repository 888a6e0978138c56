use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entity::session::Session;

/// SessionRepository はセッショントークンでセッションを照合するストア。
/// 照合失敗（None）とストア障害（Err）は呼び出し側で区別される。
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionRepository: Send + Sync {
    async fn save(&self, session: &Session) -> anyhow::Result<()>;

    async fn find_by_token(&self, session_token: Uuid) -> anyhow::Result<Option<Session>>;

    async fn delete_by_token(&self, session_token: Uuid) -> anyhow::Result<()>;
}
