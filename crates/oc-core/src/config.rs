//! Configuration system for oxidized-ra

use crate::error::{CoreError, Result};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

/// Default achievement server host
pub const DEFAULT_HOST: &str = "retroachievements.org";

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct Config {
    pub achievements: AchievementsConfig,
    pub paths: PathConfig,
    pub debug: DebugConfig,
}

/// Achievement integration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AchievementsConfig {
    /// Host name of the achievement server
    pub host: String,
    /// Play with hardcore restrictions
    pub hardcore: bool,
    /// Ask to enable hardcore when loading a game that has achievements
    pub non_hardcore_warning: bool,
    /// Submit leaderboard entries
    pub leaderboards: bool,
    /// Logged in user, if any
    pub username: Option<String>,
}

/// Toggleable features
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feature {
    Hardcore,
    NonHardcoreWarning,
    Leaderboards,
}

/// Path configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathConfig {
    /// JSON file mapping content hashes to game ids
    pub hash_database: PathBuf,
}

/// Debug settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugConfig {
    pub log_level: LogLevel,
    pub log_to_file: bool,
    pub log_path: PathBuf,
}

/// Logging level
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Directive understood by `tracing_subscriber::EnvFilter`
    pub fn as_filter(&self) -> &'static str {
        match self {
            LogLevel::Off => "off",
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

// Default implementations

impl Default for AchievementsConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            hardcore: false,
            non_hardcore_warning: true,
            leaderboards: true,
            username: None,
        }
    }
}

impl Default for PathConfig {
    fn default() -> Self {
        let base = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("oxidized-ra");

        Self {
            hash_database: base.join("hashes.json"),
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: LogLevel::default(),
            log_to_file: false,
            log_path: PathBuf::from("oxidized-ra.log"),
        }
    }
}

impl Config {
    /// Load configuration from file, or create default if it doesn't exist
    pub fn load() -> Result<Self> {
        let path = Self::config_path();

        if path.exists() {
            Self::load_from(&path)
        } else {
            info!("No config at {:?}, writing defaults", path);
            let config = Self::default();
            config.save()?;
            Ok(config)
        }
    }

    /// Load configuration from a specific file
    pub fn load_from(path: &Path) -> Result<Self> {
        debug!("Loading config from {:?}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| CoreError::Config(format!("Failed to parse {}: {}", path.display(), e)))
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    /// Save configuration to a specific file
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| CoreError::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, content)?;
        info!("Saved config to {:?}", path);
        Ok(())
    }

    /// Get the path to the configuration file
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("oxidized-ra")
            .join("config.toml")
    }

    pub fn is_feature_enabled(&self, feature: Feature) -> bool {
        match feature {
            Feature::Hardcore => self.achievements.hardcore,
            Feature::NonHardcoreWarning => self.achievements.non_hardcore_warning,
            Feature::Leaderboards => self.achievements.leaderboards,
        }
    }

    pub fn set_feature_enabled(&mut self, feature: Feature, enabled: bool) {
        match feature {
            Feature::Hardcore => self.achievements.hardcore = enabled,
            Feature::NonHardcoreWarning => self.achievements.non_hardcore_warning = enabled,
            Feature::Leaderboards => self.achievements.leaderboards = enabled,
        }
    }
}

/// Configuration shared between the emulator and the achievement runtime
///
/// Toggling a feature through one handle is visible through every clone.
#[derive(Debug, Clone, Default)]
pub struct SharedConfig {
    inner: Arc<RwLock<Config>>,
}

impl SharedConfig {
    pub fn new(config: Config) -> Self {
        Self {
            inner: Arc::new(RwLock::new(config)),
        }
    }

    /// Copy of the current configuration
    pub fn snapshot(&self) -> Config {
        self.inner.read().clone()
    }

    pub fn is_feature_enabled(&self, feature: Feature) -> bool {
        self.inner.read().is_feature_enabled(feature)
    }

    pub fn set_feature_enabled(&self, feature: Feature, enabled: bool) {
        self.inner.write().set_feature_enabled(feature, enabled);
    }

    pub fn host_name(&self) -> String {
        self.inner.read().achievements.host.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.achievements.host, DEFAULT_HOST);
        assert!(!config.achievements.hardcore);
        assert!(config.achievements.non_hardcore_warning);
        assert!(config.achievements.leaderboards);
        assert!(config.achievements.username.is_none());
        assert_eq!(config.debug.log_level, LogLevel::Info);
    }

    #[test]
    fn test_config_serialization() {
        let mut config = Config::default();
        config.achievements.host = "localhost:8080".to_string();
        config.achievements.username = Some("Player".to_string());
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.achievements.host, "localhost:8080");
        assert_eq!(parsed.achievements.username.as_deref(), Some("Player"));
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let parsed: Config = toml::from_str("[achievements]\nhardcore = true\n").unwrap();
        assert!(parsed.achievements.hardcore);
        assert_eq!(parsed.achievements.host, DEFAULT_HOST);
        assert!(parsed.achievements.leaderboards);
    }

    #[test]
    fn test_save_and_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.set_feature_enabled(Feature::Leaderboards, false);
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert!(!loaded.is_feature_enabled(Feature::Leaderboards));
    }

    #[derive(Clone, Default)]
    struct CapturedLog(Arc<parking_lot::Mutex<Vec<u8>>>);

    impl std::io::Write for CapturedLog {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_save_is_logged() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let log = CapturedLog::default();
        let writer = log.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            Config::default().save_to(&path).unwrap();
            Config::load_from(&path).unwrap();
        });

        let output = String::from_utf8(log.0.lock().clone()).unwrap();
        assert!(output.contains("Saved config to"));
        assert!(output.contains("Loading config from"));
    }

    #[test]
    fn test_load_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "achievements = 5").unwrap();
        assert!(matches!(Config::load_from(&path), Err(CoreError::Config(_))));
    }

    #[test]
    fn test_feature_flags() {
        let mut config = Config::default();
        config.set_feature_enabled(Feature::Hardcore, true);
        assert!(config.is_feature_enabled(Feature::Hardcore));
        config.set_feature_enabled(Feature::NonHardcoreWarning, false);
        assert!(!config.is_feature_enabled(Feature::NonHardcoreWarning));
    }

    #[test]
    fn test_shared_config_clones_observe_changes() {
        let shared = SharedConfig::new(Config::default());
        let other = shared.clone();
        other.set_feature_enabled(Feature::Hardcore, true);
        assert!(shared.is_feature_enabled(Feature::Hardcore));
        assert_eq!(shared.host_name(), DEFAULT_HOST);
        assert!(shared.snapshot().achievements.hardcore);
    }
}
