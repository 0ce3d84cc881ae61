use crate::error::DeskError;
use axum_extra::extract::cookie::Key;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::warn;

pub const CONFIG_FILE: &str = "sheetdesk.toml";
pub const ENV_PREFIX: &str = "SHEETDESK_";

/// Process configuration. Defaults are overridden by `sheetdesk.toml`, then by
/// `SHEETDESK_*` environment variables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory whose immediate subdirectories are the dashboard sections.
    pub root_folder: PathBuf,
    pub database_url: String,
    pub listen_addr: String,
    pub loglevel: String,
    /// At least 64 bytes; shorter or missing secrets fall back to a random key.
    pub cookie_secret: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root_folder: PathBuf::from("reports"),
            database_url: "sqlite:annotations.db".to_string(),
            listen_addr: "0.0.0.0:8000".to_string(),
            loglevel: "info".to_string(),
            cookie_secret: None,
        }
    }
}

impl Config {
    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file(CONFIG_FILE))
            .merge(Env::prefixed(ENV_PREFIX))
    }

    pub fn load() -> Result<Self, DeskError> {
        Ok(Self::figment().extract()?)
    }

    /// Key used to encrypt the session cookie.
    pub fn cookie_key(&self) -> Key {
        match self.cookie_secret.as_deref() {
            Some(secret) => Key::try_from(secret.as_bytes()).unwrap_or_else(|_| {
                warn!("cookie_secret shorter than 64 bytes; using a random key");
                Key::generate()
            }),
            None => Key::generate(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    const SECRET_64: &str = "0123456789abcdef0123456789abcdef0123456789abcdef0123456789abcdef";

    #[test]
    fn defaults_apply_without_file_or_env() {
        Jail::expect_with(|jail| {
            jail.clear_env();
            let cfg: Config = Config::figment().extract()?;
            assert_eq!(cfg.root_folder, PathBuf::from("reports"));
            assert_eq!(cfg.database_url, "sqlite:annotations.db");
            assert_eq!(cfg.listen_addr, "0.0.0.0:8000");
            assert_eq!(cfg.loglevel, "info");
            assert!(cfg.cookie_secret.is_none());
            Ok(())
        });
    }

    #[test]
    fn file_overrides_defaults_and_env_overrides_file() {
        Jail::expect_with(|jail| {
            jail.create_file(
                CONFIG_FILE,
                r#"
                root_folder = "/srv/informes"
                database_url = "sqlite:/srv/notes.db"
                loglevel = "debug"
                "#,
            )?;
            jail.set_env("SHEETDESK_LOGLEVEL", "warn");
            jail.set_env("SHEETDESK_LISTEN_ADDR", "127.0.0.1:9000");

            let cfg: Config = Config::figment().extract()?;
            assert_eq!(cfg.root_folder, PathBuf::from("/srv/informes"));
            assert_eq!(cfg.database_url, "sqlite:/srv/notes.db");
            assert_eq!(cfg.loglevel, "warn");
            assert_eq!(cfg.listen_addr, "127.0.0.1:9000");
            Ok(())
        });
    }

    #[test]
    fn malformed_file_is_an_error() {
        Jail::expect_with(|jail| {
            jail.create_file(CONFIG_FILE, "root_folder = [")?;
            assert!(matches!(Config::load(), Err(DeskError::Config(_))));
            Ok(())
        });
    }

    #[test]
    fn long_cookie_secret_gives_a_stable_key() {
        let cfg = Config {
            cookie_secret: Some(SECRET_64.to_string()),
            ..Config::default()
        };
        assert_eq!(cfg.cookie_key().master(), cfg.cookie_key().master());
    }

    #[test]
    fn short_or_missing_cookie_secret_gives_a_random_key() {
        let short = Config {
            cookie_secret: Some("too short".to_string()),
            ..Config::default()
        };
        assert_ne!(short.cookie_key().master(), short.cookie_key().master());

        let missing = Config::default();
        assert_ne!(missing.cookie_key().master(), missing.cookie_key().master());
    }
}
