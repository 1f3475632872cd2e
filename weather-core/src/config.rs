use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

/// Default upstream weather API host.
pub const DEFAULT_UPSTREAM: &str = "https://api.map.baidu.com";

/// Default port for the standalone proxy process.
pub const DEFAULT_PROXY_PORT: u16 = 3000;

/// Default district id sent with every weather request.
pub const DEFAULT_DISTRICT_ID: &str = "110100";

/// Proxy-related overrides.
///
/// Example TOML:
/// ```toml
/// [proxy]
/// port = 3000
/// upstream = "https://api.map.baidu.com"
/// base_url = "http://localhost:3000"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ProxySettings {
    /// Port the standalone proxy binds to.
    pub port: Option<u16>,

    /// Upstream host requests are forwarded to.
    pub upstream: Option<String>,

    /// Base URL the weather client sends its requests to (the local proxy).
    pub base_url: Option<String>,
}

/// Top-level configuration stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Upstream API key. Required for weather requests.
    pub api_key: Option<String>,

    /// Optional district id override; defaults to [`DEFAULT_DISTRICT_ID`].
    pub district_id: Option<String>,

    #[serde(default)]
    pub proxy: ProxySettings,
}

impl Config {
    /// Return the configured API key, or a hint-carrying error if absent.
    pub fn api_key(&self) -> Result<&str> {
        self.api_key.as_deref().ok_or_else(|| {
            anyhow!(
                "No API key configured.\n\
                 Hint: run `weather configure` and enter your upstream API key first."
            )
        })
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    pub fn set_api_key(&mut self, api_key: String) {
        self.api_key = Some(api_key);
    }

    pub fn district_id(&self) -> &str {
        self.district_id.as_deref().unwrap_or(DEFAULT_DISTRICT_ID)
    }

    pub fn proxy_port(&self) -> u16 {
        self.proxy.port.unwrap_or(DEFAULT_PROXY_PORT)
    }

    pub fn upstream(&self) -> &str {
        self.proxy.upstream.as_deref().unwrap_or(DEFAULT_UPSTREAM)
    }

    /// Base URL the client talks to; defaults to the local standalone proxy.
    pub fn client_base_url(&self) -> String {
        match &self.proxy.base_url {
            Some(url) => url.trim_end_matches('/').to_string(),
            None => format!("http://localhost:{}", self.proxy_port()),
        }
    }

    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weather-dashboard", "weather")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}
