use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::member::{Member, MemberUpdate, NewMember};
use crate::domain::repository::MemberRepository;

/// MemberPostgresRepository は members テーブルに対する CRUD を提供する。
pub struct MemberPostgresRepository {
    pool: PgPool,
}

impl MemberPostgresRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// MemberRow は members テーブルの行を表す中間構造体。
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct MemberRow {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<MemberRow> for Member {
    fn from(row: MemberRow) -> Self {
        Member {
            id: row.id,
            first_name: row.first_name,
            last_name: row.last_name,
            email: row.email,
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl MemberRepository for MemberPostgresRepository {
    async fn create(&self, member: &NewMember) -> anyhow::Result<Member> {
        let row: MemberRow = sqlx::query_as(
            "INSERT INTO members (first_name, last_name, email) \
             VALUES ($1, $2, $3) \
             RETURNING id, first_name, last_name, email, created_at",
        )
        .bind(&member.first_name)
        .bind(&member.last_name)
        .bind(&member.email)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<Member>> {
        let row: Option<MemberRow> = sqlx::query_as(
            "SELECT id, first_name, last_name, email, created_at FROM members WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    async fn list(&self, limit: i64, offset: i64) -> anyhow::Result<Vec<Member>> {
        let rows: Vec<MemberRow> = sqlx::query_as(
            "SELECT id, first_name, last_name, email, created_at FROM members \
             ORDER BY created_at DESC, id \
             LIMIT $1 OFFSET $2",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn count(&self) -> anyhow::Result<i64> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM members")
            .fetch_one(&self.pool)
            .await?;
        Ok(count.0)
    }

    async fn update(&self, id: Uuid, update: &MemberUpdate) -> anyhow::Result<Option<Member>> {
        let row: Option<MemberRow> = sqlx::query_as(
            "UPDATE members SET \
                 first_name = COALESCE($2, first_name), \
                 last_name = COALESCE($3, last_name), \
                 email = COALESCE($4, email) \
             WHERE id = $1 \
             RETURNING id, first_name, last_name, email, created_at",
        )
        .bind(id)
        .bind(&update.first_name)
        .bind(&update.last_name)
        .bind(&update.email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    async fn delete(&self, id: Uuid) -> anyhow::Result<()> {
        sqlx::query("DELETE FROM members WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn delete_many(&self, ids: &[Uuid]) -> anyhow::Result<()> {
        sqlx::query("DELETE FROM members WHERE id = ANY($1)")
            .bind(ids)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
