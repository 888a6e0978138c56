use std::sync::Arc;

use serde::Deserialize;
use validator::{Validate, ValidationError};

use crate::domain::entity::user::{NewUser, User};
use crate::domain::repository::{CreateUserError, UserRepository};
use crate::error::UserError;
use crate::infrastructure::password;

/// CreateUserInput はユーザー登録リクエストの入力値。
/// 平文パスワードを含むため Debug を実装しない。
#[derive(Clone, Deserialize, Validate)]
pub struct CreateUserInput {
    #[validate(
        length(min = 1, message = "first_name is required"),
        custom(function = "validate_person_name")
    )]
    pub first_name: String,
    #[validate(
        length(min = 1, message = "last_name is required"),
        custom(function = "validate_person_name")
    )]
    pub last_name: String,
    #[validate(email(message = "email must be a valid address"))]
    pub email: String,
    #[validate(length(min = 14, message = "password must be at least 14 characters"))]
    pub password: String,
}

/// 人名は空白・数字・句読点・記号を含まない文字のみで構成される。
fn validate_person_name(name: &str) -> Result<(), ValidationError> {
    if name.chars().all(char::is_alphabetic) {
        Ok(())
    } else {
        let mut err = ValidationError::new("person_name");
        err.message = Some("must not contain spaces, numbers, punctuation or symbols".into());
        Err(err)
    }
}

/// CreateUserUseCase はユーザー登録ユースケース。
pub struct CreateUserUseCase {
    repo: Arc<dyn UserRepository>,
}

impl CreateUserUseCase {
    pub fn new(repo: Arc<dyn UserRepository>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, input: CreateUserInput) -> Result<User, UserError> {
        input
            .validate()
            .map_err(|e| UserError::Validation(e.to_string()))?;

        // Argon2id はメモリと CPU を占有するためブロッキングスレッドで実行
        let plain = input.password;
        let hashed_password = tokio::task::spawn_blocking(move || password::hash_password(&plain))
            .await
            .map_err(|e| UserError::Internal(e.to_string()))?
            .map_err(|e| UserError::Internal(e.to_string()))?;

        let new_user = NewUser {
            first_name: input.first_name,
            last_name: input.last_name,
            email: input.email,
            hashed_password,
        };

        let user = self.repo.create(&new_user).await.map_err(|e| match e {
            CreateUserError::DuplicateEmail => UserError::EmailTaken,
            CreateUserError::Other(e) => UserError::Internal(e.to_string()),
        })?;

        tracing::info!(user_id = %user.id, "user registered");
        Ok(user)
    }
}
