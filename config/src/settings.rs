//! Process settings read from the environment

use crate::PathManager;
use std::path::PathBuf;

pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_ENVIRONMENT: &str = "development";
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-pro";
pub const DEFAULT_ELEVENLABS_BASE_URL: &str = "https://api.elevenlabs.io";

/// Where progress records are kept
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProgressBackend {
    #[default]
    Memory,
    File,
}

impl ProgressBackend {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "memory" => Some(ProgressBackend::Memory),
            "file" | "fs" => Some(ProgressBackend::File),
            _ => None,
        }
    }
}

/// Settings read once at startup. Every field has a fallback, so loading never fails.
#[derive(Debug, Clone)]
pub struct Settings {
    pub port: u16,
    pub host: String,
    /// Value of NODE_ENV, kept under that name for deployment compatibility
    pub environment: String,
    pub elevenlabs_api_key: Option<String>,
    pub elevenlabs_base_url: String,
    pub gemini_api_key: Option<String>,
    pub gemini_base_url: String,
    pub gemini_model: String,
    pub progress_backend: ProgressBackend,
    pub data_dir: PathBuf,
}

impl Settings {
    /// Read settings from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read settings through an arbitrary lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port = match get("PORT") {
            Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
                tracing::warn!("Ignoring invalid PORT value {:?}, using {}", raw, DEFAULT_PORT);
                DEFAULT_PORT
            }),
            None => DEFAULT_PORT,
        };

        let progress_backend = match get("PROGRESS_STORE") {
            Some(raw) => ProgressBackend::parse(&raw).unwrap_or_else(|| {
                tracing::warn!("Unknown PROGRESS_STORE value {:?}, using memory", raw);
                ProgressBackend::Memory
            }),
            None => ProgressBackend::Memory,
        };

        Settings {
            port,
            host: get("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            environment: get("NODE_ENV").unwrap_or_else(|| DEFAULT_ENVIRONMENT.to_string()),
            elevenlabs_api_key: get("ELEVENLABS_API_KEY"),
            elevenlabs_base_url: get("ELEVENLABS_BASE_URL")
                .unwrap_or_else(|| DEFAULT_ELEVENLABS_BASE_URL.to_string()),
            gemini_api_key: get("GEMINI_API_KEY"),
            gemini_base_url: get("GEMINI_BASE_URL")
                .unwrap_or_else(|| DEFAULT_GEMINI_BASE_URL.to_string()),
            gemini_model: get("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string()),
            progress_backend,
            data_dir: get("DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(PathManager::data_dir),
        }
    }

    pub fn is_production(&self) -> bool {
        self.environment.eq_ignore_ascii_case("production")
    }

    pub fn gallery_dir(&self) -> PathBuf {
        PathManager::gallery_dir(&self.data_dir, self.is_production())
    }

    pub fn progress_dir(&self) -> PathBuf {
        PathManager::progress_dir(&self.data_dir)
    }

    /// Configuration gaps worth reporting. Only production deployments are
    /// expected to have every key, so development yields no warnings.
    pub fn warnings(&self) -> Vec<&'static str> {
        let mut warnings = Vec::new();
        if !self.is_production() {
            return warnings;
        }
        if self.elevenlabs_api_key.is_none() {
            warnings.push("ELEVENLABS_API_KEY not set");
        }
        if self.gemini_api_key.is_none() {
            warnings.push("GEMINI_API_KEY not set");
        }
        warnings
    }

    /// Emit `warnings()` through tracing
    pub fn log_warnings(&self) {
        for warning in self.warnings() {
            tracing::warn!("Warning: {}", warning);
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}
