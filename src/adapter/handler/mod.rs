pub mod health;
pub mod member_handler;
pub mod user_handler;

use std::sync::Arc;

use axum::http::StatusCode;
use axum::middleware;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::Duration;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::adapter::middleware::{auth_middleware, AuthState, CredentialSource};
use crate::domain::repository::{MemberRepository, UserRepository};
use crate::infrastructure::TokenMaker;
use crate::usecase::{
    CreateMemberUseCase, CreateUserUseCase, DeleteMemberUseCase, DeleteMembersUseCase,
    GetCurrentUserUseCase, GetMemberUseCase, ListMembersUseCase, LoginUserUseCase,
    LogoutUserUseCase, UpdateMemberUseCase,
};

/// AppState はアプリケーション全体の共有状態を表す。
#[derive(Clone)]
pub struct AppState {
    pub create_member_uc: Arc<CreateMemberUseCase>,
    pub get_member_uc: Arc<GetMemberUseCase>,
    pub list_members_uc: Arc<ListMembersUseCase>,
    pub update_member_uc: Arc<UpdateMemberUseCase>,
    pub delete_member_uc: Arc<DeleteMemberUseCase>,
    pub delete_members_uc: Arc<DeleteMembersUseCase>,
    pub create_user_uc: Arc<CreateUserUseCase>,
    pub login_user_uc: Arc<LoginUserUseCase>,
    pub logout_user_uc: Arc<LogoutUserUseCase>,
    pub get_current_user_uc: Arc<GetCurrentUserUseCase>,
    pub auth: AuthState,
    /// 資格情報 Cookie の Max-Age
    pub token_duration: Duration,
    pub db_pool: Option<sqlx::PgPool>,
}

impl AppState {
    pub fn new(
        member_repo: Arc<dyn MemberRepository>,
        user_repo: Arc<dyn UserRepository>,
        maker: Arc<dyn TokenMaker>,
        source: CredentialSource,
        token_duration: Duration,
        db_pool: Option<sqlx::PgPool>,
    ) -> Self {
        Self {
            create_member_uc: Arc::new(CreateMemberUseCase::new(member_repo.clone())),
            get_member_uc: Arc::new(GetMemberUseCase::new(member_repo.clone())),
            list_members_uc: Arc::new(ListMembersUseCase::new(member_repo.clone())),
            update_member_uc: Arc::new(UpdateMemberUseCase::new(member_repo.clone())),
            delete_member_uc: Arc::new(DeleteMemberUseCase::new(member_repo.clone())),
            delete_members_uc: Arc::new(DeleteMembersUseCase::new(member_repo)),
            create_user_uc: Arc::new(CreateUserUseCase::new(user_repo.clone())),
            login_user_uc: Arc::new(LoginUserUseCase::new(
                user_repo.clone(),
                maker.clone(),
                token_duration,
            )),
            logout_user_uc: Arc::new(LogoutUserUseCase::new(maker.clone())),
            get_current_user_uc: Arc::new(GetCurrentUserUseCase::new(user_repo)),
            auth: AuthState::new(maker, source),
            token_duration,
            db_pool,
        }
    }
}

/// REST API のルーターを構築する。
pub fn router(state: AppState) -> Router {
    // 保護されたルートは auth_middleware を通過したリクエストのみ受け付ける
    let protected = Router::new()
        .route(
            "/api/v1/members",
            post(member_handler::create_member)
                .get(member_handler::list_members)
                .delete(member_handler::delete_members),
        )
        .route(
            "/api/v1/members/{id}",
            get(member_handler::get_member)
                .put(member_handler::update_member)
                .delete(member_handler::delete_member),
        )
        .route("/api/v1/users/me", get(user_handler::get_current_user))
        .route("/api/v1/users/logout", post(user_handler::logout_user))
        .route_layer(middleware::from_fn_with_state(
            state.auth.clone(),
            auth_middleware,
        ));

    let public = Router::new()
        .route("/healthz", get(health::healthz))
        .route("/readyz", get(health::readyz))
        .route("/api/v1/users", post(user_handler::create_user))
        .route("/api/v1/users/login", post(user_handler::login_user));

    Router::new()
        .merge(protected)
        .merge(public)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// ErrorResponse は統一エラーレスポンス。
#[derive(Debug, serde::Serialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, serde::Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(code: &str, message: &str) -> Self {
        Self {
            error: ErrorBody {
                code: code.to_string(),
                message: message.to_string(),
            },
        }
    }

    pub fn into_response_with(self, status: StatusCode) -> Response {
        (status, Json(self)).into_response()
    }
}
