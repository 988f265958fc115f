use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub session: SessionConfig,
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub name: String,
    pub url: String,
    pub max_connections: u32,
}

impl DatabaseConfig {
    /// SQLite connection string for this database.
    ///
    /// `url` is either a full SQLite URL pointing at a file, or the location
    /// the `<name>.sqlite3` file lives in.
    pub fn connection_url(&self) -> String {
        let url = self.url.trim_end_matches('/');

        if url.ends_with(":memory:")
            || [".db", ".sqlite", ".sqlite3"]
                .iter()
                .any(|ext| url.ends_with(ext))
        {
            return url.to_owned();
        }

        format!("{url}/{}.sqlite3", self.name)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct SessionConfig {
    pub secret: String,
    pub lifetime_seconds: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ObservabilityConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from file and environment variables
    ///
    /// Priority (highest to lowest):
    /// 1. Legacy unprefixed variables (SECRET_KEY, PORT, ...)
    /// 2. Environment variables (COOKSHARE__DATABASE__URL, etc.)
    /// 3. Config file specified by path
    /// 4. Defaults, only for tuning knobs
    ///
    /// Host, port, database name, database url and session secret have no
    /// default: loading fails when one of them is missing.
    pub fn load(config_path: Option<String>) -> Result<Self, ConfigError> {
        let mut builder = ConfigBuilder::builder();

        builder = builder
            .set_default("database.max_connections", 5)?
            .set_default("session.lifetime_seconds", 7 * 24 * 60 * 60)?;

        let config_file_path = config_path
            .or_else(|| env::var("CONFIG_PATH").ok())
            .unwrap_or_else(|| "config/default.toml".to_string());

        if std::path::Path::new(&config_file_path).exists() {
            builder = builder.add_source(File::with_name(&config_file_path));
        }

        builder = builder.add_source(
            Environment::with_prefix("COOKSHARE")
                .separator("__")
                .try_parsing(true),
        );

        for (var, key) in [
            ("DATABASE_NAME", "database.name"),
            ("DATABASE_URL", "database.url"),
            ("SECRET_KEY", "session.secret"),
            ("IP", "server.host"),
            ("PORT", "server.port"),
        ] {
            if let Ok(value) = env::var(var) {
                builder = builder.set_override(key, value)?;
            }
        }

        builder.build()?.try_deserialize()
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.session.secret.len() < 32 {
            return Err("Session secret must be at least 32 characters long".to_string());
        }
        if self.session.lifetime_seconds == 0 {
            return Err("Session lifetime must be greater than 0".to_string());
        }
        if self.database.name.is_empty() {
            return Err("Database name must not be empty".to_string());
        }
        if self.database.url.is_empty() {
            return Err("Database url must not be empty".to_string());
        }
        if self.database.max_connections < 1 {
            return Err("Database max_connections must be at least 1".to_string());
        }
        if self.server.host.is_empty() {
            return Err("Server host must not be empty".to_string());
        }
        if self.server.port == 0 {
            return Err("Server port must be greater than 0".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> Config {
        Config {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 3000,
            },
            database: DatabaseConfig {
                name: "cookshare".to_string(),
                url: "sqlite://data".to_string(),
                max_connections: 5,
            },
            session: SessionConfig {
                secret: "test_secret_key_minimum_32_characters_long".to_string(),
                lifetime_seconds: 3600,
            },
            observability: ObservabilityConfig::default(),
        }
    }

    #[test]
    fn test_validation_valid_config() {
        assert!(valid_config().validate().is_ok());
    }

    #[test]
    fn test_validation_short_secret() {
        let mut config = valid_config();
        config.session.secret = "short".to_string();

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_zero_port() {
        let mut config = valid_config();
        config.server.port = 0;

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_zero_connections() {
        let mut config = valid_config();
        config.database.max_connections = 0;

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_empty_database_name() {
        let mut config = valid_config();
        config.database.name = String::new();

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_connection_url_joins_location_and_name() {
        let config = valid_config();
        assert_eq!(
            config.database.connection_url(),
            "sqlite://data/cookshare.sqlite3"
        );

        let mut config = valid_config();
        config.database.url = "sqlite://data/".to_string();
        assert_eq!(
            config.database.connection_url(),
            "sqlite://data/cookshare.sqlite3"
        );
    }

    #[test]
    fn test_connection_url_keeps_file_urls() {
        let mut config = valid_config();
        config.database.url = "sqlite:recipes.db".to_string();
        assert_eq!(config.database.connection_url(), "sqlite:recipes.db");

        config.database.url = "sqlite::memory:".to_string();
        assert_eq!(config.database.connection_url(), "sqlite::memory:");
    }

    #[test]
    fn test_load_from_file() {
        let dir = temp_dir::TempDir::new().unwrap();
        let path = dir.child("cookshare.toml");
        std::fs::write(
            &path,
            r#"
[server]
host = "127.0.0.1"
port = 8080

[database]
name = "cookshare"
url = "sqlite://data"

[session]
secret = "test_secret_key_minimum_32_characters_long"
"#,
        )
        .unwrap();

        let config = Config::load(Some(path.to_string_lossy().to_string())).unwrap();

        assert_eq!(config.database.max_connections, 5);
        assert_eq!(config.session.lifetime_seconds, 7 * 24 * 60 * 60);
        assert_eq!(config.observability.log_level, "info");
    }

    #[test]
    fn test_load_fails_without_required_values() {
        let dir = temp_dir::TempDir::new().unwrap();
        let path = dir.child("cookshare.toml");
        std::fs::write(
            &path,
            r#"
[server]
host = "127.0.0.1"
port = 8080
"#,
        )
        .unwrap();

        assert!(Config::load(Some(path.to_string_lossy().to_string())).is_err());
    }
}
