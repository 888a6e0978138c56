use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

/// Config はサーバー全体の設定を表す。
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub app: AppConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub database: Option<DatabaseConfig>,
    #[serde(default)]
    pub log: LogConfig,
}

impl Config {
    /// YAML ファイルを読み込み、環境変数による上書きを適用する。
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let mut cfg = Self::from_yaml(&content)?;
        cfg.apply_env_overrides(
            std::env::var("TOKEN_SYMMETRIC_KEY").ok(),
            std::env::var("DATABASE_URL").ok(),
        );
        Ok(cfg)
    }

    pub fn from_yaml(content: &str) -> anyhow::Result<Self> {
        let cfg: Config = serde_yaml::from_str(content)?;
        cfg.auth.validate()?;
        Ok(cfg)
    }

    /// 秘密値は設定ファイルよりも環境変数を優先する。
    pub fn apply_env_overrides(
        &mut self,
        token_symmetric_key: Option<String>,
        database_url: Option<String>,
    ) {
        if let Some(key) = token_symmetric_key.filter(|k| !k.is_empty()) {
            self.auth.token_symmetric_key = Some(SecretString::new(key));
        }
        if let Some(url) = database_url.filter(|u| !u.is_empty()) {
            match self.database.as_mut() {
                Some(db) => db.url = SecretString::new(url),
                None => {
                    self.database = Some(DatabaseConfig {
                        url: SecretString::new(url),
                        max_connections: default_max_connections(),
                    });
                }
            }
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub name: String,
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default = "default_environment")]
    pub environment: String,
}

fn default_version() -> String {
    "0.1.0".to_string()
}

fn default_environment() -> String {
    "dev".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// AuthMode はデプロイで使用するトークン方式。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthMode {
    /// 対称鍵による自己完結型アクセストークン
    #[default]
    Token,
    /// セッションストアで照合するセッショントークン
    Session,
}

/// CredentialLocation はアクセストークンの受け渡し位置。session モードでは無視される。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CredentialLocation {
    #[default]
    Header,
    Cookie,
}

/// AuthConfig は認証設定を表す。
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    #[serde(default)]
    pub mode: AuthMode,
    #[serde(default)]
    pub credential: CredentialLocation,
    #[serde(default)]
    pub token_symmetric_key: Option<SecretString>,
    #[serde(default = "default_access_token_duration_secs")]
    pub access_token_duration_secs: i64,
    #[serde(default = "default_session_token_duration_secs")]
    pub session_token_duration_secs: i64,
    #[serde(default = "default_access_token_cookie")]
    pub access_token_cookie: String,
    #[serde(default = "default_session_token_cookie")]
    pub session_token_cookie: String,
}

impl AuthConfig {
    /// 現在のモードで発行する資格情報の有効期間。
    pub fn token_duration(&self) -> anyhow::Result<chrono::Duration> {
        match self.mode {
            AuthMode::Token => duration_from_secs(
                "auth.access_token_duration_secs",
                self.access_token_duration_secs,
            ),
            AuthMode::Session => duration_from_secs(
                "auth.session_token_duration_secs",
                self.session_token_duration_secs,
            ),
        }
    }

    /// 有効期間は正の値で、発行時刻に加算しても日時の範囲に収まる必要がある。
    pub fn validate(&self) -> anyhow::Result<()> {
        duration_from_secs(
            "auth.access_token_duration_secs",
            self.access_token_duration_secs,
        )?;
        duration_from_secs(
            "auth.session_token_duration_secs",
            self.session_token_duration_secs,
        )?;
        Ok(())
    }

    pub fn symmetric_key_bytes(&self) -> Option<&[u8]> {
        self.token_symmetric_key
            .as_ref()
            .map(|k| k.expose_secret().as_bytes())
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            mode: AuthMode::default(),
            credential: CredentialLocation::default(),
            token_symmetric_key: None,
            access_token_duration_secs: default_access_token_duration_secs(),
            session_token_duration_secs: default_session_token_duration_secs(),
            access_token_cookie: default_access_token_cookie(),
            session_token_cookie: default_session_token_cookie(),
        }
    }
}

fn duration_from_secs(name: &str, secs: i64) -> anyhow::Result<chrono::Duration> {
    if secs <= 0 {
        anyhow::bail!("{name} must be positive, got {secs}");
    }
    let duration = chrono::TimeDelta::try_seconds(secs)
        .filter(|d| chrono::Utc::now().checked_add_signed(*d).is_some())
        .ok_or_else(|| anyhow::anyhow!("{name} is out of range: {secs}"))?;
    Ok(duration)
}

fn default_access_token_duration_secs() -> i64 {
    900
}

fn default_session_token_duration_secs() -> i64 {
    3600
}

fn default_access_token_cookie() -> String {
    "access_token".to_string()
}

fn default_session_token_cookie() -> String {
    "session_token".to_string()
}

/// DatabaseConfig は PostgreSQL データベース接続の設定を表す。
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: SecretString,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_max_connections() -> u32 {
    10
}

/// LogConfig はログ出力の設定を表す。
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "json".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_config_uses_defaults() {
        let cfg = Config::from_yaml("app:\n  name: coworker-server\n").unwrap();

        assert_eq!(cfg.app.name, "coworker-server");
        assert_eq!(cfg.app.environment, "dev");
        assert_eq!(cfg.server.port, 8080);
        assert_eq!(cfg.auth.mode, AuthMode::Token);
        assert_eq!(cfg.auth.credential, CredentialLocation::Header);
        assert_eq!(cfg.auth.access_token_duration_secs, 900);
        assert_eq!(cfg.auth.session_token_cookie, "session_token");
        assert!(cfg.auth.token_symmetric_key.is_none());
        assert!(cfg.database.is_none());
        assert_eq!(cfg.log.format, "json");
    }

    #[test]
    fn test_full_config() {
        let yaml = r#"
app:
  name: coworker-server
  environment: prod
server:
  host: 127.0.0.1
  port: 9000
auth:
  mode: session
  credential: cookie
  token_symmetric_key: "12345678901234567890123456789012"
  session_token_duration_secs: 600
database:
  url: postgres://localhost/coworker
  max_connections: 4
log:
  level: debug
  format: text
"#;
        let cfg = Config::from_yaml(yaml).unwrap();

        assert_eq!(cfg.server.port, 9000);
        assert_eq!(cfg.auth.mode, AuthMode::Session);
        assert_eq!(cfg.auth.credential, CredentialLocation::Cookie);
        assert_eq!(
            cfg.auth.token_duration().unwrap(),
            chrono::Duration::seconds(600)
        );
        assert_eq!(cfg.auth.symmetric_key_bytes().map(<[u8]>::len), Some(32));

        let db = cfg.database.unwrap();
        assert_eq!(db.url.expose_secret(), "postgres://localhost/coworker");
        assert_eq!(db.max_connections, 4);
        assert_eq!(cfg.log.level, "debug");
    }

    #[test]
    fn test_unknown_mode_is_rejected() {
        let yaml = "app:\n  name: x\nauth:\n  mode: jwt\n";
        assert!(Config::from_yaml(yaml).is_err());
    }

    #[test]
    fn test_env_overrides_secrets() {
        let mut cfg = Config::from_yaml("app:\n  name: x\n").unwrap();
        cfg.apply_env_overrides(
            Some("abcdefghijklmnopqrstuvwxyzABCDEF".to_string()),
            Some("postgres://db/coworker".to_string()),
        );

        assert_eq!(
            cfg.auth.symmetric_key_bytes(),
            Some(b"abcdefghijklmnopqrstuvwxyzABCDEF".as_slice())
        );
        let db = cfg.database.unwrap();
        assert_eq!(db.url.expose_secret(), "postgres://db/coworker");
        assert_eq!(db.max_connections, 10);
    }

    #[test]
    fn test_empty_env_values_are_ignored() {
        let mut cfg = Config::from_yaml("app:\n  name: x\n").unwrap();
        cfg.apply_env_overrides(Some(String::new()), Some(String::new()));

        assert!(cfg.auth.token_symmetric_key.is_none());
        assert!(cfg.database.is_none());
    }

    #[test]
    fn test_secret_is_redacted_in_debug() {
        let yaml = "app:\n  name: x\nauth:\n  token_symmetric_key: super-secret-key-material-0000000\n";
        let cfg = Config::from_yaml(yaml).unwrap();
        let debug = format!("{:?}", cfg.auth);
        assert!(!debug.contains("super-secret-key-material"));
    }

    #[test]
    fn test_non_positive_duration_is_rejected() {
        let yaml = "app:\n  name: x\nauth:\n  access_token_duration_secs: 0\n";
        assert!(Config::from_yaml(yaml).is_err());

        let yaml = "app:\n  name: x\nauth:\n  session_token_duration_secs: -60\n";
        assert!(Config::from_yaml(yaml).is_err());
    }

    #[test]
    fn test_out_of_range_duration_is_rejected() {
        let yaml = format!(
            "app:\n  name: x\nauth:\n  access_token_duration_secs: {}\n",
            i64::MAX
        );
        let err = Config::from_yaml(&yaml).unwrap_err();
        assert!(err.to_string().contains("out of range"));

        // TimeDelta としては表現できるが、現在時刻に加算すると溢れる値
        let yaml = format!(
            "app:\n  name: x\nauth:\n  session_token_duration_secs: {}\n",
            i64::MAX / 1000
        );
        assert!(Config::from_yaml(&yaml).is_err());
    }

    #[test]
    fn test_token_duration_follows_mode() {
        let mut cfg = AuthConfig::default();
        assert_eq!(cfg.token_duration().unwrap(), chrono::Duration::seconds(900));

        cfg.mode = AuthMode::Session;
        assert_eq!(cfg.token_duration().unwrap(), chrono::Duration::seconds(3600));

        cfg.session_token_duration_secs = i64::MAX;
        assert!(cfg.token_duration().is_err());
    }
}
