use std::net::SocketAddr;
use std::sync::Arc;

use tracing::info;

use coworker_server::adapter::handler::{router, AppState};
use coworker_server::adapter::middleware::CredentialSource;
use coworker_server::adapter::repository::{
    InMemoryMemberRepository, InMemorySessionRepository, InMemoryUserRepository,
    MemberPostgresRepository, UserPostgresRepository,
};
use coworker_server::domain::repository::{MemberRepository, UserRepository};
use coworker_server::infrastructure::config::{AuthConfig, AuthMode, Config};
use coworker_server::infrastructure::token::{SessionTokenMaker, SymmetricTokenMaker};
use coworker_server::infrastructure::{database, telemetry, TokenMaker};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config_path =
        std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config/config.yaml".to_string());
    let cfg = Config::load(&config_path)?;

    telemetry::init_tracing(&cfg.log)?;

    info!(
        app = %cfg.app.name,
        version = %cfg.app.version,
        environment = %cfg.app.environment,
        "starting coworker server"
    );

    // --- Repositories: PostgreSQL or InMemory fallback ---
    let (member_repo, user_repo, db_pool): (
        Arc<dyn MemberRepository>,
        Arc<dyn UserRepository>,
        Option<sqlx::PgPool>,
    ) = if let Some(ref db_cfg) = cfg.database {
        let pool = database::create_pool(db_cfg).await?;
        database::run_migrations(&pool).await?;
        info!("PostgreSQL repositories initialized");
        (
            Arc::new(MemberPostgresRepository::new(pool.clone())),
            Arc::new(UserPostgresRepository::new(pool.clone())),
            Some(pool),
        )
    } else {
        info!("no database configured, using in-memory repositories");
        (
            Arc::new(InMemoryMemberRepository::new()),
            Arc::new(InMemoryUserRepository::new()),
            None,
        )
    };

    let maker = build_token_maker(&cfg.auth)?;
    let source = CredentialSource::from_config(&cfg.auth);
    info!(mode = ?cfg.auth.mode, source = ?source, "token maker initialized");

    let state = AppState::new(
        member_repo,
        user_repo,
        maker,
        source,
        cfg.auth.token_duration()?,
        db_pool,
    );
    let app = router(state);

    let addr: SocketAddr = format!("{}:{}", cfg.server.host, cfg.server.port).parse()?;
    info!("REST server starting on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server stopped");
    Ok(())
}

/// 設定されたモードに応じて唯一の TokenMaker を構築する。鍵長不足はここで起動失敗となる。
fn build_token_maker(cfg: &AuthConfig) -> anyhow::Result<Arc<dyn TokenMaker>> {
    match cfg.mode {
        AuthMode::Token => {
            let key = cfg.symmetric_key_bytes().ok_or_else(|| {
                anyhow::anyhow!(
                    "auth.token_symmetric_key (or TOKEN_SYMMETRIC_KEY) is required in token mode"
                )
            })?;
            Ok(Arc::new(SymmetricTokenMaker::new(key)?))
        }
        AuthMode::Session => {
            // セッションはプロセス内にのみ保持する
            Ok(Arc::new(SessionTokenMaker::new(Arc::new(
                InMemorySessionRepository::new(),
            ))))
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
    }
    info!("shutdown signal received");
}
