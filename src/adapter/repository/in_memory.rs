//! データベース未設定時（開発モード）とテストで使うインメモリリポジトリ。

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entity::member::{Member, MemberUpdate, NewMember};
use crate::domain::entity::session::Session;
use crate::domain::entity::user::{NewUser, User};
use crate::domain::repository::{
    CreateUserError, MemberRepository, SessionRepository, UserRepository,
};

/// InMemoryMemberRepository はメンバーをプロセス内に保持する。
#[derive(Default)]
pub struct InMemoryMemberRepository {
    members: RwLock<HashMap<Uuid, Member>>,
}

impl InMemoryMemberRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MemberRepository for InMemoryMemberRepository {
    async fn create(&self, member: &NewMember) -> anyhow::Result<Member> {
        let created = Member {
            id: Uuid::new_v4(),
            first_name: member.first_name.clone(),
            last_name: member.last_name.clone(),
            email: member.email.clone(),
            created_at: Utc::now(),
        };
        self.members
            .write()
            .await
            .insert(created.id, created.clone());
        Ok(created)
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<Member>> {
        Ok(self.members.read().await.get(&id).cloned())
    }

    async fn list(&self, limit: i64, offset: i64) -> anyhow::Result<Vec<Member>> {
        let mut all: Vec<Member> = self.members.read().await.values().cloned().collect();
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.id.cmp(&b.id)));

        let offset = usize::try_from(offset.max(0))?;
        let limit = usize::try_from(limit.max(0))?;
        Ok(all.into_iter().skip(offset).take(limit).collect())
    }

    async fn count(&self) -> anyhow::Result<i64> {
        Ok(i64::try_from(self.members.read().await.len())?)
    }

    async fn update(&self, id: Uuid, update: &MemberUpdate) -> anyhow::Result<Option<Member>> {
        let mut members = self.members.write().await;
        let Some(member) = members.get_mut(&id) else {
            return Ok(None);
        };

        if let Some(first_name) = &update.first_name {
            member.first_name.clone_from(first_name);
        }
        if let Some(last_name) = &update.last_name {
            member.last_name.clone_from(last_name);
        }
        if let Some(email) = &update.email {
            member.email = Some(email.clone());
        }
        Ok(Some(member.clone()))
    }

    async fn delete(&self, id: Uuid) -> anyhow::Result<()> {
        self.members.write().await.remove(&id);
        Ok(())
    }

    async fn delete_many(&self, ids: &[Uuid]) -> anyhow::Result<()> {
        let mut members = self.members.write().await;
        for id in ids {
            members.remove(id);
        }
        Ok(())
    }
}

/// InMemoryUserRepository はユーザーアカウントをプロセス内に保持する。
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<Uuid, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: &NewUser) -> Result<User, CreateUserError> {
        let mut users = self.users.write().await;
        if users.values().any(|u| u.email == user.email) {
            return Err(CreateUserError::DuplicateEmail);
        }

        let created = User {
            id: Uuid::new_v4(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            email: user.email.clone(),
            hashed_password: user.hashed_password.clone(),
            created_at: Utc::now(),
        };
        users.insert(created.id, created.clone());
        Ok(created)
    }

    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<User>> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<User>> {
        Ok(self.users.read().await.get(&id).cloned())
    }
}

/// InMemorySessionRepository はセッショントークンをキーにセッションを保持する。
/// 期限切れのセッションは次の `save` で破棄される。
#[derive(Default)]
pub struct InMemorySessionRepository {
    sessions: RwLock<HashMap<Uuid, Session>>,
}

impl InMemorySessionRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionRepository for InMemorySessionRepository {
    async fn save(&self, session: &Session) -> anyhow::Result<()> {
        let now = Utc::now();
        let mut sessions = self.sessions.write().await;
        sessions.retain(|_, s| s.token().valid_at(now).is_ok());
        sessions.insert(session.session_token, session.clone());
        Ok(())
    }

    async fn find_by_token(&self, session_token: Uuid) -> anyhow::Result<Option<Session>> {
        Ok(self.sessions.read().await.get(&session_token).cloned())
    }

    async fn delete_by_token(&self, session_token: Uuid) -> anyhow::Result<()> {
        self.sessions.write().await.remove(&session_token);
        Ok(())
    }
}
