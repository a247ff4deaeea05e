use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable pointing at an alternative config file
pub const CONFIG_ENV: &str = "ENTRENO_CONFIG";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub backend: BackendConfig,

    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub auth: AuthConfig,

    #[serde(default)]
    pub ui: UiConfig,

    #[serde(default)]
    pub coach: CoachConfig,

    /// Extra exercise video catalog entries: exercise name -> YouTube id
    #[serde(default)]
    pub videos: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    #[serde(default = "default_backend_url")]
    pub url: String,

    #[serde(default)]
    pub anon_key: String,

    #[serde(default = "default_bucket")]
    pub storage_bucket: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

/// Persisted session. Empty tokens mean signed out.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthConfig {
    #[serde(default)]
    pub access_token: String,

    #[serde(default)]
    pub refresh_token: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub user_id: String,

    #[serde(default)]
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_date_format")]
    pub date_format: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoachConfig {
    /// How long the "routine saved" banner stays up before the chat resets
    #[serde(default = "default_success_delay")]
    pub success_delay_ms: u64,
}

// Default value functions
fn default_backend_url() -> String {
    "http://localhost:54321".to_string()
}

fn default_bucket() -> String {
    "gym-assets".to_string()
}

fn default_base_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_date_format() -> String {
    "%d/%m/%Y".to_string()
}

fn default_success_delay() -> u64 {
    3000
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            url: default_backend_url(),
            anon_key: String::new(),
            storage_bucket: default_bucket(),
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_seconds: default_timeout(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            date_format: default_date_format(),
        }
    }
}

impl Default for CoachConfig {
    fn default() -> Self {
        Self {
            success_delay_ms: default_success_delay(),
        }
    }
}

impl Config {
    /// Get config directory path (~/.entreno/)
    pub fn config_dir() -> Result<PathBuf> {
        let home = dirs::home_dir().context("No se encontró el directorio personal")?;
        Ok(home.join(".entreno"))
    }

    /// Config file path: `ENTRENO_CONFIG` if set, otherwise ~/.entreno/config.toml
    pub fn config_file() -> Result<PathBuf> {
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            if !path.is_empty() {
                return Ok(PathBuf::from(path));
            }
        }
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Load configuration from a file, falling back to defaults when it is missing.
    /// Environment overrides are applied on top.
    pub fn load_from(path: &Path) -> Result<Self> {
        let mut config = Self::read_file(path)?;
        config.apply_env();
        Ok(config)
    }

    /// File contents only, without environment overrides
    pub fn read_file(path: &Path) -> Result<Self> {
        let config = if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("No se pudo leer la configuración {}", path.display()))?;
            toml::from_str(&contents).context("La configuración no es TOML válido")?
        } else {
            tracing::info!("Config file not found at {}, using defaults", path.display());
            Self::default()
        };
        Ok(config)
    }

    fn apply_env(&mut self) {
        if let Ok(url) = std::env::var("ENTRENO_BACKEND_URL") {
            self.backend.url = url;
        }
        if let Ok(key) = std::env::var("ENTRENO_ANON_KEY") {
            self.backend.anon_key = key;
        }
        if let Ok(url) = std::env::var("ENTRENO_API_URL") {
            self.api.base_url = url;
        }
    }

    /// Save configuration to a file, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).context("No se pudo crear el directorio de configuración")?;
        }

        let contents = toml::to_string_pretty(self).context("No se pudo serializar la configuración")?;
        fs::write(path, contents).context("No se pudo escribir la configuración")?;

        Ok(())
    }

    /// Check if a session is persisted
    pub fn is_authenticated(&self) -> bool {
        !self.auth.access_token.is_empty()
    }

    /// Clear the persisted session
    pub fn clear_session(&mut self) {
        self.auth = AuthConfig::default();
    }
}
