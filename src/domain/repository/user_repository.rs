use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entity::user::{NewUser, User};

/// CreateUserError はユーザー作成時のリポジトリエラーを表す。
/// メールアドレス重複は呼び出し側で 403 に変換するため区別する。
#[derive(Debug, thiserror::Error)]
pub enum CreateUserError {
    #[error("email already registered")]
    DuplicateEmail,

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// UserRepository はユーザーアカウント永続化のためのリポジトリトレイト。
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, user: &NewUser) -> Result<User, CreateUserError>;

    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<User>>;

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<User>>;
}
