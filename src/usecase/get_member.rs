use std::sync::Arc;

use uuid::Uuid;

use crate::domain::entity::member::Member;
use crate::domain::repository::MemberRepository;
use crate::error::MemberError;

/// GetMemberUseCase はメンバー取得ユースケース。
pub struct GetMemberUseCase {
    repo: Arc<dyn MemberRepository>,
}

impl GetMemberUseCase {
    pub fn new(repo: Arc<dyn MemberRepository>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, id: Uuid) -> Result<Member, MemberError> {
        self.repo
            .find_by_id(id)
            .await
            .map_err(|e| MemberError::Internal(e.to_string()))?
            .ok_or(MemberError::NotFound(id))
    }
}
