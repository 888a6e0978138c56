use std::sync::Arc;

use uuid::Uuid;

use crate::domain::repository::MemberRepository;
use crate::error::MemberError;

/// DeleteMemberUseCase はメンバー削除ユースケース。存在しない ID の削除も成功とする。
pub struct DeleteMemberUseCase {
    repo: Arc<dyn MemberRepository>,
}

impl DeleteMemberUseCase {
    pub fn new(repo: Arc<dyn MemberRepository>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, id: Uuid) -> Result<(), MemberError> {
        self.repo
            .delete(id)
            .await
            .map_err(|e| MemberError::Internal(e.to_string()))?;
        tracing::info!(member_id = %id, "member deleted");
        Ok(())
    }
}
