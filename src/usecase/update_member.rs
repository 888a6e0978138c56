use std::sync::Arc;

use serde::Deserialize;
use uuid::Uuid;
use validator::ValidateEmail;

use super::non_empty;
use crate::domain::entity::member::{Member, MemberUpdate};
use crate::domain::repository::MemberRepository;
use crate::error::MemberError;

/// UpdateMemberInput はメンバー部分更新の入力値。空のフィールドは変更しない。
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateMemberInput {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

/// UpdateMemberUseCase はメンバー更新ユースケース。
pub struct UpdateMemberUseCase {
    repo: Arc<dyn MemberRepository>,
}

impl UpdateMemberUseCase {
    pub fn new(repo: Arc<dyn MemberRepository>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, id: Uuid, input: UpdateMemberInput) -> Result<Member, MemberError> {
        let update = MemberUpdate {
            first_name: non_empty(input.first_name),
            last_name: non_empty(input.last_name),
            email: non_empty(input.email),
        };

        if let Some(email) = &update.email {
            if !email.validate_email() {
                return Err(MemberError::Validation(
                    "email must be a valid address".to_string(),
                ));
            }
        }

        let updated = self
            .repo
            .update(id, &update)
            .await
            .map_err(|e| MemberError::Internal(e.to_string()))?
            .ok_or(MemberError::NotFound(id))?;

        tracing::info!(member_id = %id, "member updated");
        Ok(updated)
    }
}
