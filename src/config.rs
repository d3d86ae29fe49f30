use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub listen: ListenConfig,
    #[serde(default = "default_appdir")]
    pub appdir: Option<String>,
    #[serde(default)]
    pub dbdir: Option<String>,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub model: ModelConfig,
    #[serde(default)]
    pub recommend: RecommendConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub posters: PosterConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen: ListenConfig::default(),
            appdir: default_appdir(),
            dbdir: None,
            database: DatabaseConfig::default(),
            catalog: CatalogConfig::default(),
            model: ModelConfig::default(),
            recommend: RecommendConfig::default(),
            server: ServerConfig::default(),
            posters: PosterConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ListenConfig {
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default = "default_port")]
    pub port: String,
    #[serde(default)]
    pub tlscert: Option<String>,
    #[serde(default)]
    pub tlskey: Option<String>,
}

impl Default for ListenConfig {
    fn default() -> Self {
        Self {
            address: None,
            port: default_port(),
            tlscert: None,
            tlskey: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct DatabaseConfig {
    #[serde(default)]
    pub sqlite: Option<SqliteConfig>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SqliteConfig {
    pub filename: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CatalogConfig {
    #[serde(default = "default_dataset")]
    pub dataset: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            dataset: default_dataset(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ModelConfig {
    #[serde(default = "default_model_path")]
    pub path: String,
    #[serde(default = "default_top_k")]
    pub top_k: usize,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            path: default_model_path(),
            top_k: default_top_k(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RecommendConfig {
    /// Neighbors considered when sampling a response.
    #[serde(default = "default_pool_size")]
    pub pool_size: usize,
    /// Recommendations per response.
    #[serde(default = "default_result_count")]
    pub result_count: usize,
}

impl Default for RecommendConfig {
    fn default() -> Self {
        Self {
            pool_size: default_pool_size(),
            result_count: default_result_count(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_server_name")]
    pub name: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            name: default_server_name(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PosterConfig {
    /// HEAD-check poster URLs before handing them to the page.
    #[serde(default = "default_poster_check")]
    pub check: bool,
}

impl Default for PosterConfig {
    fn default() -> Self {
        Self {
            check: default_poster_check(),
        }
    }
}

fn default_port() -> String {
    "5000".to_string()
}

fn default_appdir() -> Option<String> {
    Some("webapp".to_string())
}

fn default_dataset() -> String {
    "movies.json".to_string()
}

fn default_model_path() -> String {
    "model.json".to_string()
}

fn default_top_k() -> usize {
    50
}

fn default_pool_size() -> usize {
    50
}

fn default_result_count() -> usize {
    10
}

fn default_server_name() -> String {
    "CineMatch".to_string()
}

fn default_poster_check() -> bool {
    true
}

impl Config {
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::ReadError(path.to_string(), e))?;

        let config: Config = serde_yaml::from_str(&content)
            .map_err(|e| ConfigError::ParseError(path.to_string(), e))?;

        Ok(config)
    }

    pub fn get_database_path(&self) -> Option<String> {
        if let Some(ref sqlite) = self.database.sqlite {
            return Some(sqlite.filename.clone());
        }

        if let Some(ref dbdir) = self.dbdir {
            let path = PathBuf::from(dbdir).join("cinematch.db");
            return Some(path.to_string_lossy().to_string());
        }

        None
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {0}: {1}")]
    ReadError(String, std::io::Error),
    #[error("Failed to parse config file {0}: {1}")]
    ParseError(String, serde_yaml::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: Config = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config.listen.port, "5000");
        assert_eq!(config.catalog.dataset, "movies.json");
        assert_eq!(config.model.top_k, 50);
        assert_eq!(config.recommend.result_count, 10);
        assert_eq!(config.appdir.as_deref(), Some("webapp"));
        assert!(config.posters.check);
    }

    #[test]
    fn test_database_path_prefers_explicit_sqlite() {
        let config: Config = serde_yaml::from_str(
            "database:\n  sqlite:\n    filename: /tmp/x.db\ndbdir: /var/lib",
        )
        .unwrap();
        assert_eq!(config.get_database_path().unwrap(), "/tmp/x.db");
    }

    #[test]
    fn test_database_path_falls_back_to_dbdir() {
        let config: Config = serde_yaml::from_str("dbdir: /var/lib/cinematch").unwrap();
        assert_eq!(
            config.get_database_path().unwrap(),
            "/var/lib/cinematch/cinematch.db"
        );
        let bare: Config = serde_yaml::from_str("{}").unwrap();
        assert!(bare.get_database_path().is_none());
    }
}
