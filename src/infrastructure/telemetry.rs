use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use super::config::LogConfig;

/// tracing サブスクライバーを初期化する。
/// `RUST_LOG` が設定されていればそれを優先し、なければ設定ファイルのレベルを使う。
pub fn init_tracing(cfg: &LogConfig) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&cfg.level))
        .map_err(|e| anyhow::anyhow!("invalid log level {}: {}", cfg.level, e))?;

    let registry = tracing_subscriber::registry().with(filter);
    if cfg.format == "json" {
        registry
            .with(fmt::layer().json().with_target(true))
            .try_init()?;
    } else {
        registry.with(fmt::layer().with_target(true)).try_init()?;
    }

    Ok(())
}
