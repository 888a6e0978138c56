use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entity::member::{Member, MemberUpdate, NewMember};

/// MemberRepository はメンバー永続化のためのリポジトリトレイト。
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MemberRepository: Send + Sync {
    async fn create(&self, member: &NewMember) -> anyhow::Result<Member>;

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<Member>>;

    /// 作成日時の新しい順に `limit` 件を `offset` から取得する。
    async fn list(&self, limit: i64, offset: i64) -> anyhow::Result<Vec<Member>>;

    async fn count(&self) -> anyhow::Result<i64>;

    /// 対象が存在しない場合は None を返す。
    async fn update(&self, id: Uuid, update: &MemberUpdate) -> anyhow::Result<Option<Member>>;

    async fn delete(&self, id: Uuid) -> anyhow::Result<()>;

    async fn delete_many(&self, ids: &[Uuid]) -> anyhow::Result<()>;
}
