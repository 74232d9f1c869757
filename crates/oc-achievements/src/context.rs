//! Collaborator contracts used by the game identifier
//!
//! Every subsystem the identifier talks to sits behind one of these traits so
//! the emulator frontend can plug in its own windows, server client and
//! session store, and tests can substitute recording doubles.

use crate::game::GameMode;
use oc_core::{Feature, ServiceError, SharedConfig};

/// Resolves a content hash to a game id
pub trait ResolutionService: Send + Sync {
    /// Returns the game id for `hash`, or 0 when the server does not know it
    fn resolve_hash(&self, hash: &str) -> Result<u32, ServiceError>;
}

/// Holder of the currently active game
pub trait GameState: Send + Sync {
    /// Id of the active game (0 when none)
    fn game_id(&self) -> u32;

    /// Replace the active game. Id, mode and hash change together.
    fn load_game(&self, game_id: u32, mode: GameMode, hash: &str);

    fn set_hash(&self, hash: &str);

    fn set_mode(&self, mode: GameMode);

    /// Title shown for the active game (rich presence)
    fn set_title(&self, title: &str);

    /// Whether the active game has published achievements
    fn has_achievement_assets(&self) -> bool;
}

/// Play session bookkeeping
pub trait SessionTracking: Send + Sync {
    fn begin_session(&self, game_id: u32);

    fn end_session(&self);
}

/// Data shown in the unknown game dialog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownGamePrompt {
    pub console_name: String,
    pub hash: String,
    pub estimated_title: String,
    /// Title pre-filled for a new game entry
    pub new_game_name: String,
}

/// Outcome of a confirmed unknown game dialog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnknownGameChoice {
    pub selected_game_id: u32,
    /// User wants to test compatibility rather than play normally
    pub test_mode: bool,
}

/// Dialogs, overlay and sound effects
pub trait InteractionSurface: Send + Sync {
    fn show_error(&self, title: &str, message: &str);

    /// Blocks until the user closes the dialog. `None` means cancelled.
    fn show_unknown_game(&self, prompt: &UnknownGamePrompt) -> Option<UnknownGameChoice>;

    /// Yes/No question. Blocks until answered.
    fn show_confirm(&self, header: &str, message: &str) -> bool;

    fn queue_message(&self, title: &str, subtitle: &str);

    /// Dismiss transient overlay popups
    fn clear_popups(&self);

    fn play_audio(&self, name: &str);
}

/// State owned by the running emulator
pub trait EmulatorContext: Send + Sync {
    /// Achievement server console id (0 when unknown)
    fn console_id(&self) -> u32;

    fn console_name(&self) -> String;

    /// Title guessed by the emulator from the loaded content
    fn game_title(&self) -> String;

    fn is_logged_in(&self) -> bool;

    fn reset_memory_modified(&self);

    fn enable_hardcore_mode(&self);
}

/// Feature flags and server details
pub trait Configuration: Send + Sync {
    fn is_feature_enabled(&self, feature: Feature) -> bool;

    fn host_name(&self) -> String;
}

impl Configuration for SharedConfig {
    fn is_feature_enabled(&self, feature: Feature) -> bool {
        SharedConfig::is_feature_enabled(self, feature)
    }

    fn host_name(&self) -> String {
        SharedConfig::host_name(self)
    }
}
