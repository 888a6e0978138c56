use std::sync::Arc;

use serde::Deserialize;
use validator::Validate;

use crate::domain::entity::member::{MemberPage, PageMeta};
use crate::domain::repository::MemberRepository;
use crate::error::MemberError;

/// ListMembersInput はメンバー一覧取得のクエリパラメータを表す。
#[derive(Debug, Clone, Copy, Deserialize, Validate)]
pub struct ListMembersInput {
    #[validate(range(min = 1, message = "page_id must be >= 1"))]
    pub page_id: i32,
    #[validate(range(min = 5, max = 10, message = "page_size must be between 5 and 10"))]
    pub page_size: i32,
}

/// ListMembersUseCase はメンバー一覧取得ユースケース。
pub struct ListMembersUseCase {
    repo: Arc<dyn MemberRepository>,
}

impl ListMembersUseCase {
    pub fn new(repo: Arc<dyn MemberRepository>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, input: ListMembersInput) -> Result<MemberPage, MemberError> {
        input
            .validate()
            .map_err(|e| MemberError::Validation(e.to_string()))?;

        let limit = i64::from(input.page_size);
        let offset = i64::from(input.page_id - 1) * limit;

        let total = self
            .repo
            .count()
            .await
            .map_err(|e| MemberError::Internal(e.to_string()))?;
        let data = self
            .repo
            .list(limit, offset)
            .await
            .map_err(|e| MemberError::Internal(e.to_string()))?;

        Ok(MemberPage {
            meta: PageMeta::new(input.page_id, input.page_size, total),
            data,
        })
    }
}
