use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, Response, StatusCode};
use chrono::Duration;
use tower::ServiceExt;
use uuid::Uuid;

use coworker_server::adapter::handler::{router, AppState};
use coworker_server::adapter::middleware::CredentialSource;
use coworker_server::adapter::repository::{
    InMemoryMemberRepository, InMemorySessionRepository, InMemoryUserRepository,
};
use coworker_server::domain::entity::session::Session;
use coworker_server::domain::repository::SessionRepository;
use coworker_server::infrastructure::token::{SessionTokenMaker, SymmetricTokenMaker};
use coworker_server::infrastructure::TokenMaker;

const SYMMETRIC_KEY: &[u8] = b"integration-test-key-0123456789ab";
const PASSWORD: &str = "correct-horse-battery";

// --- Test doubles ---

struct FailingSessionRepository;

#[async_trait::async_trait]
impl SessionRepository for FailingSessionRepository {
    async fn save(&self, _session: &Session) -> anyhow::Result<()> {
        anyhow::bail!("session store unavailable")
    }

    async fn find_by_token(&self, _session_token: Uuid) -> anyhow::Result<Option<Session>> {
        anyhow::bail!("session store unavailable")
    }

    async fn delete_by_token(&self, _session_token: Uuid) -> anyhow::Result<()> {
        anyhow::bail!("session store unavailable")
    }
}

// --- Helpers ---

fn app_with(maker: Arc<dyn TokenMaker>, source: CredentialSource) -> axum::Router {
    let state = AppState::new(
        Arc::new(InMemoryMemberRepository::new()),
        Arc::new(InMemoryUserRepository::new()),
        maker,
        source,
        Duration::minutes(15),
        None,
    );
    router(state)
}

fn token_app() -> axum::Router {
    let maker = SymmetricTokenMaker::new(SYMMETRIC_KEY).unwrap();
    app_with(Arc::new(maker), CredentialSource::AuthorizationHeader)
}

fn session_app() -> axum::Router {
    let maker = SessionTokenMaker::new(Arc::new(InMemorySessionRepository::new()));
    app_with(
        Arc::new(maker),
        CredentialSource::SessionCookie("session_token".to_string()),
    )
}

fn json_request(method: &str, uri: &str, body: &serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(resp: Response<Body>) -> serde_json::Value {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    if bytes.is_empty() {
        return serde_json::Value::Null;
    }
    serde_json::from_slice(&bytes).unwrap()
}

async fn register_and_login(app: &axum::Router) -> (serde_json::Value, Option<String>) {
    let register = serde_json::json!({
        "first_name": "Hanako",
        "last_name": "Tanaka",
        "email": "hanako@example.com",
        "password": PASSWORD,
    });
    let resp = app
        .clone()
        .oneshot(json_request("POST", "/api/v1/users", &register))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let login = serde_json::json!({"email": "hanako@example.com", "password": PASSWORD});
    let resp = app
        .clone()
        .oneshot(json_request("POST", "/api/v1/users/login", &login))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let cookie = resp
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .map(str::to_string);
    (body_json(resp).await, cookie)
}

// --- Token mode ---

#[tokio::test]
async fn test_token_flow_member_crud() {
    let app = token_app();
    let (login, _) = register_and_login(&app).await;
    let token = login["access_token"].as_str().unwrap().to_string();
    let bearer = format!("Bearer {token}");

    let with_auth = |mut req: Request<Body>| {
        req.headers_mut()
            .insert(header::AUTHORIZATION, bearer.parse().unwrap());
        req
    };

    // create
    let mut ids = Vec::new();
    for i in 0..6 {
        let body = serde_json::json!({
            "first_name": format!("Member{i}"),
            "last_name": "Sato",
            "email": format!("member{i}@example.com"),
        });
        let resp = app
            .clone()
            .oneshot(with_auth(json_request("POST", "/api/v1/members", &body)))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        ids.push(body_json(resp).await["id"].as_str().unwrap().to_string());
    }

    // list
    let req = Request::builder()
        .uri("/api/v1/members?page_id=2&page_size=5")
        .body(Body::empty())
        .unwrap();
    let resp = app.clone().oneshot(with_auth(req)).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let page = body_json(resp).await;
    assert_eq!(page["meta"]["total_count"], 6);
    assert_eq!(page["meta"]["page_count"], 2);
    assert_eq!(page["data"].as_array().unwrap().len(), 1);

    // update
    let body = serde_json::json!({"last_name": "Kato"});
    let resp = app
        .clone()
        .oneshot(with_auth(json_request(
            "PUT",
            &format!("/api/v1/members/{}", ids[0]),
            &body,
        )))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let updated = body_json(resp).await;
    assert_eq!(updated["last_name"], "Kato");
    assert_eq!(updated["first_name"], "Member0");

    // bulk delete
    let req = Request::builder()
        .method("DELETE")
        .uri(format!("/api/v1/members?ids={},{}", ids[0], ids[1]))
        .body(Body::empty())
        .unwrap();
    let resp = app.clone().oneshot(with_auth(req)).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let req = Request::builder()
        .uri(format!("/api/v1/members/{}", ids[0]))
        .body(Body::empty())
        .unwrap();
    let resp = app.clone().oneshot(with_auth(req)).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_token_from_other_key_is_rejected() {
    let app = token_app();
    let other = SymmetricTokenMaker::new(b"another-key-another-key-another-k").unwrap();
    let (token, _) = other
        .create_token(Uuid::new_v4(), Duration::minutes(5))
        .await
        .unwrap();

    let req = Request::builder()
        .uri("/api/v1/users/me")
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(resp).await["error"]["code"], "AUTH_TOKEN_INVALID");
}

#[tokio::test]
async fn test_token_me_returns_logged_in_user() {
    let app = token_app();
    let (login, _) = register_and_login(&app).await;
    let token = login["access_token"].as_str().unwrap();

    let req = Request::builder()
        .uri("/api/v1/users/me")
        .header(header::AUTHORIZATION, format!("bearer {token}"))
        .body(Body::empty())
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let me = body_json(resp).await;
    assert_eq!(me["id"], login["user"]["id"]);
    assert!(me.get("hashed_password").is_none());
}

#[tokio::test]
async fn test_duplicate_registration_is_forbidden() {
    let app = token_app();
    register_and_login(&app).await;

    let register = serde_json::json!({
        "first_name": "Hanako",
        "last_name": "Tanaka",
        "email": "hanako@example.com",
        "password": PASSWORD,
    });
    let resp = app
        .oneshot(json_request("POST", "/api/v1/users", &register))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

// --- Session mode ---

#[tokio::test]
async fn test_session_flow_logout_revokes_session() {
    let app = session_app();
    let (login, cookie) = register_and_login(&app).await;
    let cookie = cookie.unwrap();
    assert_eq!(
        cookie,
        format!("session_token={}", login["access_token"].as_str().unwrap())
    );

    let me = || {
        Request::builder()
            .uri("/api/v1/users/me")
            .header(header::COOKIE, cookie.clone())
            .body(Body::empty())
            .unwrap()
    };

    let resp = app.clone().oneshot(me()).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let logout = Request::builder()
        .method("POST")
        .uri("/api/v1/users/logout")
        .header(header::COOKIE, cookie.clone())
        .body(Body::empty())
        .unwrap();
    let resp = app.clone().oneshot(logout).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let resp = app.clone().oneshot(me()).await.unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(resp).await["error"]["code"], "AUTH_TOKEN_INVALID");
}

#[tokio::test]
async fn test_session_mode_ignores_authorization_header() {
    let app = session_app();
    let (login, _) = register_and_login(&app).await;
    let token = login["access_token"].as_str().unwrap();

    let req = Request::builder()
        .uri("/api/v1/users/me")
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        body_json(resp).await["error"]["code"],
        "AUTH_CREDENTIAL_MISSING"
    );
}

#[tokio::test]
async fn test_session_store_failure_returns_500() {
    let maker = SessionTokenMaker::new(Arc::new(FailingSessionRepository));
    let app = app_with(
        Arc::new(maker),
        CredentialSource::SessionCookie("session_token".to_string()),
    );

    let req = Request::builder()
        .uri("/api/v1/users/me")
        .header(header::COOKIE, format!("session_token={}", Uuid::new_v4()))
        .body(Body::empty())
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body_json(resp).await["error"]["code"],
        "AUTH_BACKING_STORE_ERROR"
    );
}

#[tokio::test]
async fn test_expired_session_is_rejected() {
    let maker = SessionTokenMaker::new(Arc::new(InMemorySessionRepository::new()));
    let (token, _) = maker
        .create_token(Uuid::new_v4(), Duration::minutes(-1))
        .await
        .unwrap();

    let app = app_with(
        Arc::new(maker),
        CredentialSource::SessionCookie("session_token".to_string()),
    );
    let req = Request::builder()
        .uri("/api/v1/users/me")
        .header(header::COOKIE, format!("session_token={token}"))
        .body(Body::empty())
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(resp).await["error"]["code"], "AUTH_TOKEN_EXPIRED");
}
