use fred::prelude::{Server, ServerConfig};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

const DEFAULT_LISTEN_ADDRESS: &str = "0.0.0.0:3000";
const DEFAULT_WEB_ROOT: &str = "webapp";
const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error(transparent)]
    FSError(#[from] std::io::Error),
    #[error(transparent)]
    SerdeError(#[from] toml::de::Error),
}

#[derive(Deserialize, Clone, Default)]
pub struct DB {
    pub database: String,
    pub host: String,
    pub user: String,
    pub password: String,
}

impl DB {
    fn is_valid(&self) -> bool {
        !self.database.is_empty()
            && !self.host.is_empty()
            && !self.password.is_empty()
            && !self.user.is_empty()
    }

    pub fn connection_string(&self) -> String {
        let password: String =
            url::form_urlencoded::byte_serialize(self.password.as_bytes()).collect();

        format!(
            "postgres://{}:{}@{}/{}",
            self.user, password, self.host, self.database
        )
    }
}

#[derive(Deserialize, Clone, Default)]
pub struct RedisConfig {
    pub connection_string: Option<String>,
    pub sentinel_enabled: Option<bool>,
    pub hostname: Option<String>,
    pub port: Option<u16>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub service_name: Option<String>,
}

impl TryFrom<RedisConfig> for fred::types::config::Config {
    type Error = String;

    fn try_from(value: RedisConfig) -> Result<Self, Self::Error> {
        if value.sentinel_enabled.unwrap_or_default() {
            Ok(Self {
                server: ServerConfig::Sentinel {
                    service_name: value.service_name.unwrap_or_default(),
                    hosts: vec![Server::new(
                        value.hostname.unwrap_or_default().as_str(),
                        value.port.unwrap_or(26379),
                    )],
                },
                username: value.username,
                password: value.password,
                ..Default::default()
            })
        } else {
            let connection_string = value
                .connection_string
                .unwrap_or("redis://127.0.0.1/".to_string());
            Self::from_url(connection_string.as_str()).map_err(|err| err.to_string())
        }
    }
}

/// Where uploaded project pictures live and how large a request body may be.
#[derive(Deserialize, Clone, Default)]
pub struct StorageConfig {
    pub web_root: Option<String>,
    pub max_upload_bytes: Option<usize>,
}

impl StorageConfig {
    pub fn web_root(&self) -> PathBuf {
        PathBuf::from(self.web_root.as_deref().unwrap_or(DEFAULT_WEB_ROOT))
    }

    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_bytes.unwrap_or(DEFAULT_MAX_UPLOAD_BYTES)
    }
}

#[derive(Deserialize, Clone, Default)]
pub struct Config {
    pub listen_address: Option<String>,
    #[serde(default)]
    pub cors_hosts: Vec<String>,
    #[serde(default)]
    pub secure_session: bool,
    #[serde(default)]
    pub redis: RedisConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    pub db: DB,
}

impl Config {
    pub fn parse(path: Option<String>) -> Result<Self, ConfigError> {
        let path = path.unwrap_or("config.toml".to_string());
        let path = Path::new(path.as_str());
        let config_text = fs::read_to_string(path)?;

        let config: Config = toml::from_str(config_text.as_str())?;

        Ok(config)
    }

    pub fn is_valid(&self) -> bool {
        self.db.is_valid()
    }

    pub fn listen_address(&self) -> &str {
        self.listen_address
            .as_deref()
            .unwrap_or(DEFAULT_LISTEN_ADDRESS)
    }
}
