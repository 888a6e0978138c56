use std::sync::Arc;

use crate::error::UserError;
use crate::infrastructure::TokenMaker;

/// LogoutUserUseCase は提示された資格情報を失効させる。
pub struct LogoutUserUseCase {
    maker: Arc<dyn TokenMaker>,
}

impl LogoutUserUseCase {
    pub fn new(maker: Arc<dyn TokenMaker>) -> Self {
        Self { maker }
    }

    pub async fn execute(&self, credential: &str) -> Result<(), UserError> {
        self.maker.revoke_token(credential).await?;
        Ok(())
    }
}
