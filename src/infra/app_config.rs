use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Base URL used when neither the CLI, the environment nor the config file
/// sets one. Deployments on another port (8001 is common) override it.
pub const DEFAULT_SERVICE_URL: &str = "http://localhost:8000";

const DEFAULT_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    pub service_url: Option<String>,
    pub request_timeout_secs: Option<u64>,
}

impl AppConfig {
    /// Resolved service base URL: `DEVISDIFF_SERVICE_URL` wins over the
    /// config file, which wins over the built-in default.
    pub fn service_url(&self) -> String {
        if let Ok(url) = std::env::var("DEVISDIFF_SERVICE_URL")
            && !url.is_empty()
        {
            return url;
        }
        self.service_url
            .clone()
            .unwrap_or_else(|| DEFAULT_SERVICE_URL.to_string())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS))
    }
}

pub fn load_config() -> AppConfig {
    let path = config_path();
    let Ok(contents) = std::fs::read_to_string(&path) else {
        return AppConfig::default();
    };
    toml::from_str(&contents).unwrap_or_default()
}

pub fn save_config(config: &AppConfig) -> std::io::Result<()> {
    let path = config_path();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let contents = toml::to_string_pretty(config).unwrap_or_default();
    std::fs::write(path, contents)
}

fn config_path() -> PathBuf {
    if let Ok(path) = std::env::var("DEVISDIFF_CONFIG_PATH") {
        return PathBuf::from(path);
    }

    app_data_dir().join("config.toml")
}

fn app_data_dir() -> PathBuf {
    if let Ok(path) = std::env::var("DEVISDIFF_DATA_HOME") {
        return PathBuf::from(path);
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(home) = home::home_dir() {
            return home
                .join("Library")
                .join("Application Support")
                .join("DevisDiff");
        }
    }

    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            return PathBuf::from(appdata).join("DevisDiff");
        }
    }

    #[cfg(target_os = "linux")]
    {
        if let Some(xdg) = std::env::var_os("XDG_DATA_HOME") {
            return PathBuf::from(xdg).join("devisdiff");
        }
        if let Some(home) = home::home_dir() {
            return home.join(".local").join("share").join("devisdiff");
        }
    }

    std::env::current_dir()
        .unwrap_or_else(|_| PathBuf::from("."))
        .join(".devisdiff")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_parses_partial_toml() {
        let config: AppConfig = toml::from_str(r#"service_url = "http://10.0.0.5:8001""#).unwrap();
        assert_eq!(config.service_url.as_deref(), Some("http://10.0.0.5:8001"));
        assert!(config.request_timeout_secs.is_none());
        assert_eq!(config.request_timeout(), Duration::from_secs(120));
    }

    #[test]
    fn test_timeout_override() {
        let config = AppConfig {
            service_url: None,
            request_timeout_secs: Some(10),
        };
        assert_eq!(config.request_timeout(), Duration::from_secs(10));
    }
}
