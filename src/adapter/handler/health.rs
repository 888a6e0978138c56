use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use super::AppState;

pub async fn healthz() -> impl IntoResponse {
    Json(serde_json::json!({"status": "ok"}))
}

/// データベース設定時のみ疎通確認を行う。
pub async fn readyz(State(state): State<AppState>) -> impl IntoResponse {
    let mut db_status = "skipped";
    let mut overall_ok = true;

    if let Some(ref pool) = state.db_pool {
        match sqlx::query("SELECT 1").execute(pool).await {
            Ok(_) => db_status = "ok",
            Err(e) => {
                tracing::warn!(error = %e, "readiness check failed");
                db_status = "error";
                overall_ok = false;
            }
        }
    }

    let status_code = if overall_ok {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (
        status_code,
        Json(serde_json::json!({
            "status": if overall_ok { "ready" } else { "not ready" },
            "checks": {
                "database": db_status
            }
        })),
    )
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::Request;
    use chrono::Duration;
    use tower::ServiceExt;

    use super::*;
    use crate::adapter::handler::router;
    use crate::adapter::middleware::CredentialSource;
    use crate::domain::repository::member_repository::MockMemberRepository;
    use crate::domain::repository::user_repository::MockUserRepository;
    use crate::infrastructure::token::MockTokenMaker;

    fn make_app() -> axum::Router {
        let mut maker = MockTokenMaker::new();
        maker.expect_verify_token().times(0);
        router(AppState::new(
            Arc::new(MockMemberRepository::new()),
            Arc::new(MockUserRepository::new()),
            Arc::new(maker),
            CredentialSource::AuthorizationHeader,
            Duration::minutes(15),
            None,
        ))
    }

    #[tokio::test]
    async fn test_healthz_is_public() {
        let req = Request::builder().uri("/healthz").body(Body::empty()).unwrap();
        let resp = make_app().oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_readyz_without_database() {
        let req = Request::builder().uri("/readyz").body(Body::empty()).unwrap();
        let resp = make_app().oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["checks"]["database"], "skipped");
    }
}
