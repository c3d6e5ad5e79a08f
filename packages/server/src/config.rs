use std::path::PathBuf;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct CorsConfig {
    pub allow_origins: Vec<String>,
    pub max_age: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub cors: CorsConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    /// Directory holding uploaded images.
    pub uploads_dir: PathBuf,
    /// URL prefix images are served under and recorded with.
    pub public_prefix: String,
    /// Maximum accepted image size in bytes.
    pub max_upload_size: u64,
}

/// What a catalog update does to the stored image reference when the request
/// carries no new file.
#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ImageUpdatePolicy {
    /// Every field is replaced, so an update without a file clears `image_url`.
    #[default]
    Replace,
    /// An update without a file leaves `image_url` untouched.
    KeepExisting,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct CatalogConfig {
    #[serde(default)]
    pub image_update_policy: ImageUpdatePolicy,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub storage: StorageConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let s = Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3002)?
            .set_default(
                "server.cors.allow_origins",
                vec!["http://localhost:3000", "http://localhost:3001"],
            )?
            .set_default("server.cors.max_age", 3600)?
            .set_default(
                "database.url",
                "postgres://my_user@localhost:5432/my_database",
            )?
            .set_default("storage.uploads_dir", "./uploads")?
            .set_default("storage.public_prefix", "/uploads")?
            .set_default("storage.max_upload_size", 10 * 1024 * 1024)?
            .set_default("catalog.image_update_policy", "replace")?
            // Load from config/config.toml
            .add_source(File::with_name("config/config").required(false))
            // Override from environment (e.g., STOREFRONT__DATABASE__URL)
            .add_source(Environment::with_prefix("STOREFRONT").separator("__"))
            // Plain PORT wins over everything else.
            .set_override_option("server.port", std::env::var("PORT").ok())?
            .build()?;

        s.try_deserialize()
    }
}
