use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    pub granularity: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    pub api: Option<ApiConfig>,
    pub defaults: Option<DefaultsConfig>,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl AppConfig {
    /// Load configuration from HYDRO_CONFIG path (TOML) if present, with
    /// reasonable defaults
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var("HYDRO_CONFIG").unwrap_or_else(|_| "config.toml".to_string());
        Self::load_from(Path::new(&path))
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let cfg = if path.exists() {
            let s = fs::read_to_string(path)?;
            toml::from_str::<AppConfig>(&s)?
        } else {
            AppConfig::default()
        };
        Ok(cfg)
    }

    /// Backend API base (default http://localhost:8000/api/v1)
    pub fn api_base_url(&self) -> String {
        self.api
            .as_ref()
            .and_then(|a| a.base_url.clone())
            .unwrap_or_else(|| "http://localhost:8000/api/v1".to_string())
    }

    /// HTTP request timeout in seconds (default 30)
    pub fn request_timeout_secs(&self) -> u64 {
        self.api
            .as_ref()
            .and_then(|a| a.timeout_secs)
            .unwrap_or(30)
    }

    /// Default aggregation granularity (default "daily")
    pub fn default_granularity(&self) -> String {
        self.defaults
            .as_ref()
            .and_then(|d| d.granularity.clone())
            .unwrap_or_else(|| "daily".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_when_absent() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.api_base_url(), "http://localhost:8000/api/v1");
        assert_eq!(cfg.request_timeout_secs(), 30);
        assert_eq!(cfg.default_granularity(), "daily");
    }

    #[test]
    fn load_from_missing_file_uses_defaults() {
        let cfg = AppConfig::load_from(Path::new("/nonexistent/hydro.toml")).unwrap();
        assert_eq!(cfg.request_timeout_secs(), 30);
    }

    #[test]
    fn load_from_toml_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[api]\nbase_url = \"http://basin.example/api/v1\"\ntimeout_secs = 5\n\n\
             [defaults]\ngranularity = \"monthly\"\n"
        )
        .unwrap();

        let cfg = AppConfig::load_from(file.path()).unwrap();
        assert_eq!(cfg.api_base_url(), "http://basin.example/api/v1");
        assert_eq!(cfg.request_timeout_secs(), 5);
        assert_eq!(cfg.default_granularity(), "monthly");
    }

    #[test]
    fn invalid_toml_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "not valid toml [").unwrap();

        assert!(AppConfig::load_from(file.path()).is_err());
    }
}
