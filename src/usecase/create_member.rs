use std::sync::Arc;

use serde::Deserialize;
use validator::Validate;

use super::non_empty;
use crate::domain::entity::member::{Member, NewMember};
use crate::domain::repository::MemberRepository;
use crate::error::MemberError;

/// CreateMemberInput はメンバー作成リクエストの入力値。
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateMemberInput {
    #[validate(length(min = 1, message = "first_name is required"))]
    pub first_name: String,
    #[validate(length(min = 1, message = "last_name is required"))]
    pub last_name: String,
    #[serde(default)]
    #[validate(email(message = "email must be a valid address"))]
    pub email: Option<String>,
}

/// CreateMemberUseCase はメンバー作成ユースケース。
pub struct CreateMemberUseCase {
    repo: Arc<dyn MemberRepository>,
}

impl CreateMemberUseCase {
    pub fn new(repo: Arc<dyn MemberRepository>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, input: CreateMemberInput) -> Result<Member, MemberError> {
        let input = CreateMemberInput {
            first_name: input.first_name.trim().to_string(),
            last_name: input.last_name.trim().to_string(),
            email: non_empty(input.email),
        };
        input
            .validate()
            .map_err(|e| MemberError::Validation(e.to_string()))?;

        let member = NewMember {
            first_name: input.first_name,
            last_name: input.last_name,
            email: input.email,
        };

        let created = self
            .repo
            .create(&member)
            .await
            .map_err(|e| MemberError::Internal(e.to_string()))?;

        tracing::info!(member_id = %created.id, "member created");
        Ok(created)
    }
}
