use crate::services::credentials::{Argon2Hashed, CredentialStore, PlainText};
use log::LevelFilter;
use serde::Deserialize;
use std::{
    env,
    fs::read_to_string,
    net::{IpAddr, Ipv4Addr},
    path::Path,
    sync::Arc,
};

/// The server version extracted from the Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Environment variable key to load the config from
const CONFIG_ENV_KEY: &str = "CL_CONFIG_JSON";

/// File the config is loaded from when the environment doesn't provide one
const CONFIG_FILE: &str = "config.json";

pub fn load_config() -> Option<Config> {
    // Attempt to load the config from the env
    if let Ok(env) = env::var(CONFIG_ENV_KEY) {
        let config: Config = match serde_json::from_str(&env) {
            Ok(value) => value,
            Err(err) => {
                eprintln!("Failed to load env config (Using default): {:?}", err);
                return None;
            }
        };
        return Some(config);
    }

    // Attempt to load the config from disk
    let file = Path::new(CONFIG_FILE);
    if !file.exists() {
        return None;
    }

    let data = match read_to_string(file) {
        Ok(value) => value,
        Err(err) => {
            eprintln!("Failed to load config file (Using defaults): {:?}", err);
            return None;
        }
    };

    match serde_json::from_str(&data) {
        Ok(value) => Some(value),
        Err(err) => {
            eprintln!("Failed to load config file (Using default): {:?}", err);
            None
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    /// Path to the SQLite database file
    pub database_file: String,
    pub logging: LevelFilter,
    pub logging_dir: String,
    pub passwords: PasswordStorage,
    /// Number of games returned per page when the request doesn't
    /// specify a size
    pub games_page_size: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 8080,
            database_file: "data/app.db".to_string(),
            logging: LevelFilter::Info,
            logging_dir: "data/logs".to_string(),
            passwords: PasswordStorage::default(),
            games_page_size: 4,
        }
    }
}

/// How player and administrator passwords are kept in the database
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PasswordStorage {
    /// Passwords are stored as Argon2 hashes
    #[default]
    Argon2,
    /// Passwords are stored exactly as provided
    Plain,
}

impl PasswordStorage {
    /// Creates the credential store for this storage option
    pub fn store(self) -> Arc<dyn CredentialStore> {
        match self {
            Self::Argon2 => Arc::new(Argon2Hashed),
            Self::Plain => Arc::new(PlainText),
        }
    }
}

#[cfg(test)]
mod test {
    use super::{Config, PasswordStorage};
    use log::LevelFilter;

    #[test]
    fn test_partial_config() {
        let config: Config =
            serde_json::from_str(r#"{ "port": 9000, "passwords": "plain", "logging": "debug" }"#)
                .unwrap();

        assert_eq!(config.port, 9000);
        assert_eq!(config.passwords, PasswordStorage::Plain);
        assert_eq!(config.logging, LevelFilter::Debug);
        // Missing fields fall back to the defaults
        assert_eq!(config.database_file, "data/app.db");
        assert_eq!(config.games_page_size, 4);
    }

    #[test]
    fn test_default_password_storage() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(config.passwords, PasswordStorage::Argon2);
    }
}
