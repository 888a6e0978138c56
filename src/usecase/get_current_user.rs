use std::sync::Arc;

use uuid::Uuid;

use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::error::UserError;

/// GetCurrentUserUseCase は認証済みリクエストの呼び出し元ユーザーを取得する。
pub struct GetCurrentUserUseCase {
    repo: Arc<dyn UserRepository>,
}

impl GetCurrentUserUseCase {
    pub fn new(repo: Arc<dyn UserRepository>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, user_id: Uuid) -> Result<User, UserError> {
        self.repo
            .find_by_id(user_id)
            .await
            .map_err(|e| UserError::Internal(e.to_string()))?
            .ok_or(UserError::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::domain::repository::user_repository::MockUserRepository;

    #[tokio::test]
    async fn test_get_current_user() {
        let id = Uuid::new_v4();
        let mut mock = MockUserRepository::new();
        mock.expect_find_by_id()
            .withf(move |i| *i == id)
            .returning(move |_| {
                Ok(Some(User {
                    id,
                    first_name: "Ren".to_string(),
                    last_name: "Mori".to_string(),
                    email: "ren@example.com".to_string(),
                    hashed_password: String::new(),
                    created_at: Utc::now(),
                }))
            });

        let uc = GetCurrentUserUseCase::new(Arc::new(mock));
        assert_eq!(uc.execute(id).await.unwrap().email, "ren@example.com");
    }

    #[tokio::test]
    async fn test_get_current_user_deleted() {
        let mut mock = MockUserRepository::new();
        mock.expect_find_by_id().returning(|_| Ok(None));

        let uc = GetCurrentUserUseCase::new(Arc::new(mock));
        assert!(matches!(
            uc.execute(Uuid::new_v4()).await,
            Err(UserError::NotFound)
        ));
    }
}
