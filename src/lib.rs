//! coworker-server: メンバー・ユーザー管理 API サーバー
//!
//! 保護されたルートはトークン認証ミドルウェアを通過したリクエストのみ受け付ける。
//! トークン方式はデプロイごとに 1 つを選択する。
//!
//! - `token`: 対称鍵で認証付き暗号化した自己完結型アクセストークン（サーバー側状態なし）
//! - `session`: 不透明なセッショントークン（UUID）をセッションストアで照合する
//!
//! # 使い方
//!
//! ```ignore
//! use coworker_server::adapter::middleware::{auth_middleware, AuthState, CredentialSource};
//! use coworker_server::infrastructure::token::SymmetricTokenMaker;
//! use std::sync::Arc;
//!
//! let maker = SymmetricTokenMaker::new(b"0123456789abcdef0123456789abcdef")?;
//! let auth = AuthState::new(Arc::new(maker), CredentialSource::AuthorizationHeader);
//!
//! let app = axum::Router::new()
//!     .route("/protected", axum::routing::get(|| async { "ok" }))
//!     .route_layer(axum::middleware::from_fn_with_state(auth, auth_middleware));
//! ```

pub mod adapter;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod usecase;
