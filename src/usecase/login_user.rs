use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::error::UserError;
use crate::infrastructure::{password, TokenMaker};

/// LoginUserInput はログインリクエストの入力値。Debug を実装しない。
#[derive(Clone, Deserialize, Validate)]
pub struct LoginUserInput {
    #[validate(email(message = "email must be a valid address"))]
    pub email: String,
    #[validate(length(min = 14, message = "password must be at least 14 characters"))]
    pub password: String,
}

/// LoginUserOutput はログイン成功時のレスポンス。
#[derive(Debug, Clone, Serialize)]
pub struct LoginUserOutput {
    pub access_token: String,
    pub access_token_expires_at: DateTime<Utc>,
    pub user: User,
}

/// LoginUserUseCase は資格情報を照合し、トークンを発行する。
pub struct LoginUserUseCase {
    repo: Arc<dyn UserRepository>,
    maker: Arc<dyn TokenMaker>,
    duration: Duration,
}

impl LoginUserUseCase {
    pub fn new(
        repo: Arc<dyn UserRepository>,
        maker: Arc<dyn TokenMaker>,
        duration: Duration,
    ) -> Self {
        Self {
            repo,
            maker,
            duration,
        }
    }

    pub async fn execute(&self, input: LoginUserInput) -> Result<LoginUserOutput, UserError> {
        input
            .validate()
            .map_err(|e| UserError::Validation(e.to_string()))?;

        let user = self
            .repo
            .find_by_email(&input.email)
            .await
            .map_err(|e| UserError::Internal(e.to_string()))?
            .ok_or(UserError::NotFound)?;

        let plain = input.password;
        let hashed = user.hashed_password.clone();
        let matched =
            tokio::task::spawn_blocking(move || password::verify_password(&plain, &hashed))
                .await
                .map_err(|e| UserError::Internal(e.to_string()))?
                .map_err(|e| UserError::Internal(e.to_string()))?;
        if !matched {
            tracing::debug!(user_id = %user.id, "login rejected: password mismatch");
            return Err(UserError::InvalidCredentials);
        }

        let (access_token, payload) = self.maker.create_token(user.id, self.duration).await?;

        tracing::info!(user_id = %user.id, token_id = %payload.id, "user logged in");
        Ok(LoginUserOutput {
            access_token,
            access_token_expires_at: payload.expires_at,
            user,
        })
    }
}
