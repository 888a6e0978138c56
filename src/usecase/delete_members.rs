use std::sync::Arc;

use uuid::Uuid;

use crate::domain::repository::MemberRepository;
use crate::error::MemberError;

/// DeleteMembersUseCase はカンマ区切りの ID 列でメンバーを一括削除する。
/// 1 つでも解析できない ID があれば何も削除しない。
pub struct DeleteMembersUseCase {
    repo: Arc<dyn MemberRepository>,
}

impl DeleteMembersUseCase {
    pub fn new(repo: Arc<dyn MemberRepository>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, ids: &str) -> Result<usize, MemberError> {
        let ids = parse_ids(ids)?;
        self.repo
            .delete_many(&ids)
            .await
            .map_err(|e| MemberError::Internal(e.to_string()))?;
        tracing::info!(count = ids.len(), "members deleted");
        Ok(ids.len())
    }
}

fn parse_ids(raw: &str) -> Result<Vec<Uuid>, MemberError> {
    let ids = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            Uuid::parse_str(s)
                .map_err(|_| MemberError::Validation(format!("invalid member id: {s}")))
        })
        .collect::<Result<Vec<_>, _>>()?;

    if ids.is_empty() {
        return Err(MemberError::Validation("ids is required".to_string()));
    }
    Ok(ids)
}
