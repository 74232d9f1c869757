//! Emulator runtime state seen by the achievement system

use crate::console::Console;
use crate::context::EmulatorContext;
use oc_core::{Feature, SharedConfig};
use parking_lot::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::info;

/// In-memory emulator context
pub struct RuntimeContext {
    console: RwLock<Console>,
    game_title: RwLock<String>,
    username: RwLock<Option<String>>,
    /// Set when memory was poked outside of normal emulation
    memory_modified: AtomicBool,
    config: SharedConfig,
}

impl RuntimeContext {
    pub fn new(config: SharedConfig) -> Self {
        Self {
            console: RwLock::new(Console::Unknown),
            game_title: RwLock::new(String::new()),
            username: RwLock::new(None),
            memory_modified: AtomicBool::new(false),
            config,
        }
    }

    pub fn set_console(&self, console: Console) {
        *self.console.write() = console;
    }

    pub fn console(&self) -> Console {
        *self.console.read()
    }

    pub fn set_game_title(&self, title: &str) {
        *self.game_title.write() = title.to_string();
    }

    pub fn login(&self, username: &str) {
        info!("Logged in as {}", username);
        *self.username.write() = Some(username.to_string());
    }

    pub fn logout(&self) {
        *self.username.write() = None;
    }

    pub fn username(&self) -> Option<String> {
        self.username.read().clone()
    }

    pub fn mark_memory_modified(&self) {
        self.memory_modified.store(true, Ordering::Relaxed);
    }

    pub fn is_memory_modified(&self) -> bool {
        self.memory_modified.load(Ordering::Relaxed)
    }
}

impl EmulatorContext for RuntimeContext {
    fn console_id(&self) -> u32 {
        self.console().id()
    }

    fn console_name(&self) -> String {
        self.console().name().to_string()
    }

    fn game_title(&self) -> String {
        self.game_title.read().clone()
    }

    fn is_logged_in(&self) -> bool {
        self.username.read().is_some()
    }

    fn reset_memory_modified(&self) {
        self.memory_modified.store(false, Ordering::Relaxed);
    }

    fn enable_hardcore_mode(&self) {
        info!("Enabling hardcore mode");
        self.config.set_feature_enabled(Feature::Hardcore, true);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oc_core::Config;

    #[test]
    fn test_runtime_defaults() {
        let runtime = RuntimeContext::new(SharedConfig::default());
        assert_eq!(runtime.console_id(), 0);
        assert_eq!(runtime.console_name(), "Unknown");
        assert!(runtime.game_title().is_empty());
        assert!(!runtime.is_logged_in());
    }

    #[test]
    fn test_login_logout() {
        let runtime = RuntimeContext::new(SharedConfig::default());
        runtime.login("Player");
        assert!(runtime.is_logged_in());
        assert_eq!(runtime.username().as_deref(), Some("Player"));
        runtime.logout();
        assert!(!runtime.is_logged_in());
    }

    #[test]
    fn test_memory_modified() {
        let runtime = RuntimeContext::new(SharedConfig::default());
        runtime.mark_memory_modified();
        assert!(runtime.is_memory_modified());
        runtime.reset_memory_modified();
        assert!(!runtime.is_memory_modified());
    }

    #[test]
    fn test_enable_hardcore_updates_config() {
        let config = SharedConfig::new(Config::default());
        let runtime = RuntimeContext::new(config.clone());
        assert!(!config.is_feature_enabled(Feature::Hardcore));
        runtime.enable_hardcore_mode();
        assert!(config.is_feature_enabled(Feature::Hardcore));
    }
}
