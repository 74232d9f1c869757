//! Game identification and activation
//!
//! Identification turns a ROM image (or a precomputed hash) into a game id
//! and stages the result. Activation is a separate call that commits the
//! staged result to the active game, starts or ends the play session and
//! applies the hardcore policy. The two steps are driven from different
//! places in the frontend: identification may block on a dialog, activation
//! tears down and loads live state.

use crate::context::{
    Configuration, EmulatorContext, GameState, InteractionSurface, ResolutionService,
    SessionTracking, UnknownGamePrompt,
};
use crate::game::GameMode;
use crate::hash::RomHasher;
use oc_core::Feature;
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::{debug, info, warn};

const UNKNOWN_CONSOLE_ERROR: &str = "Cannot identify game for unknown console.";
const LOGIN_REQUIRED_TITLE: &str = "Cannot load achievements";
const LOGIN_REQUIRED_MESSAGE: &str =
    "You must be logged in to load achievements. Please reload the game after logging in.";
const IDENTIFY_FAILED_TITLE: &str = "Could not identify game.";
const HARDCORE_PROMPT_HEADER: &str = "Enable Hardcore mode?";
const HARDCORE_PROMPT_MESSAGE: &str =
    "You are loading a game with achievements and do not currently have hardcore mode enabled.";
const SOFTCORE_TITLE: &str = "Playing in Softcore Mode";
const LEADERBOARD_CAVEAT: &str = "Leaderboard entries will not be submitted.";
const INFO_SOUND: &str = "Overlay\\info.wav";
const UNKNOWN_TITLE: &str = "Unknown";

/// Identification result waiting to be activated
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PendingIdentification {
    pub hash: String,
    /// 0 when nothing was resolved
    pub game_id: u32,
    pub mode: GameMode,
}

/// How a hash lookup ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Resolution {
    /// The server knew the hash
    Identified(u32),
    /// The server did not know the hash and the user picked a game
    Selected { game_id: u32, test_mode: bool },
    /// The server did not know the hash and the user closed the dialog
    Cancelled,
    /// The lookup failed
    Failed,
}

impl Resolution {
    fn game_id(&self) -> u32 {
        match *self {
            Resolution::Identified(game_id) => game_id,
            Resolution::Selected { game_id, .. } => game_id,
            Resolution::Cancelled | Resolution::Failed => 0,
        }
    }

    fn mode(&self) -> GameMode {
        match self {
            Resolution::Selected { test_mode: true, .. } => GameMode::CompatibilityTest,
            _ => GameMode::Normal,
        }
    }
}

/// Subsystems the identifier works with
#[derive(Clone)]
pub struct Collaborators {
    pub resolver: Arc<dyn ResolutionService>,
    pub game: Arc<dyn GameState>,
    pub sessions: Arc<dyn SessionTracking>,
    pub surface: Arc<dyn InteractionSurface>,
    pub emulator: Arc<dyn EmulatorContext>,
    pub config: Arc<dyn Configuration>,
    pub hasher: Arc<dyn RomHasher>,
}

/// Resolves loaded content to a game and activates it
pub struct GameIdentifier {
    deps: Collaborators,
    pending: Mutex<PendingIdentification>,
    /// Serializes the public operations
    busy: Mutex<()>,
}

impl GameIdentifier {
    pub fn new(deps: Collaborators) -> Self {
        Self {
            deps,
            pending: Mutex::new(PendingIdentification::default()),
            busy: Mutex::new(()),
        }
    }

    /// Copy of the staged identification result
    pub fn pending(&self) -> PendingIdentification {
        self.pending.lock().clone()
    }

    /// Identify a ROM image for the current console
    ///
    /// Returns the game id, or 0 if the game could not be identified. An
    /// absent or empty image clears the staged result without reporting an
    /// error.
    pub fn identify_game(&self, rom: Option<&[u8]>) -> u32 {
        let _busy = self.busy.lock();
        self.identify_game_locked(rom)
    }

    /// Identify a precomputed content hash
    ///
    /// Returns 0 when the lookup failed, the game is unknown and the user
    /// cancelled, or the user is not logged in. Errors are reported through
    /// the interaction surface.
    pub fn identify_hash(&self, hash: &str) -> u32 {
        let _busy = self.busy.lock();
        self.identify_hash_locked(hash)
    }

    /// Make `game_id` the active game, or unload the active game when 0
    pub fn activate_game(&self, game_id: u32) {
        let _busy = self.busy.lock();
        self.activate_game_locked(game_id);
    }

    /// Identify a ROM image and activate the result
    pub fn identify_and_activate_game(&self, rom: Option<&[u8]>) {
        let _busy = self.busy.lock();

        let game_id = self.identify_game_locked(rom);
        self.activate_game_locked(game_id);

        if game_id == 0 && rom.is_some_and(|data| !data.is_empty()) {
            // keep a name for rich presence even though nothing resolved
            let mut title = self.deps.emulator.game_title();
            if title.is_empty() {
                title = UNKNOWN_TITLE.to_string();
            }
            debug!("Using fallback title '{}'", title);
            self.deps.game.set_title(&title);
        }
    }

    fn identify_game_locked(&self, rom: Option<&[u8]>) -> u32 {
        self.pending.lock().mode = GameMode::Normal;

        let console_id = self.deps.emulator.console_id();
        if console_id == 0 {
            self.deps.surface.show_error(UNKNOWN_CONSOLE_ERROR, "");
            return 0;
        }

        let data = match rom {
            Some(data) if !data.is_empty() => data,
            _ => {
                let mut pending = self.pending.lock();
                pending.hash.clear();
                pending.game_id = 0;
                return 0;
            }
        };

        let hash = self.deps.hasher.hash(console_id, data);
        debug!("Hashed {} bytes for console {}: {}", data.len(), console_id, hash);

        self.identify_hash_locked(&hash)
    }

    fn identify_hash_locked(&self, hash: &str) -> u32 {
        if !self.deps.emulator.is_logged_in() {
            self.deps
                .surface
                .show_error(LOGIN_REQUIRED_TITLE, LOGIN_REQUIRED_MESSAGE);
            return 0;
        }

        self.pending.lock().mode = GameMode::Normal;

        let resolution = self.resolve(hash);
        let game_id = resolution.game_id();
        let mode = resolution.mode();

        // activate_game reads these back
        {
            let mut pending = self.pending.lock();
            pending.hash = hash.to_string();
            pending.game_id = game_id;
            pending.mode = mode;
        }

        if game_id != 0 && game_id == self.deps.game.game_id() {
            // Same game as the one already running: a disk swap. Activation
            // is not expected to follow, so update the hash now.
            info!("Game {} already active, updating hash", game_id);
            self.deps.game.set_hash(hash);
            self.deps.game.set_mode(mode);
        }

        game_id
    }

    fn resolve(&self, hash: &str) -> Resolution {
        match self.deps.resolver.resolve_hash(hash) {
            Ok(0) => {
                info!("Could not identify game with hash {}", hash);

                let estimated_title = self.deps.emulator.game_title();
                let prompt = UnknownGamePrompt {
                    console_name: self.deps.emulator.console_name(),
                    hash: hash.to_string(),
                    new_game_name: estimated_title.clone(),
                    estimated_title,
                };

                match self.deps.surface.show_unknown_game(&prompt) {
                    Some(choice) => Resolution::Selected {
                        game_id: choice.selected_game_id,
                        test_mode: choice.test_mode,
                    },
                    None => Resolution::Cancelled,
                }
            }
            Ok(game_id) => {
                info!("Successfully looked up game with ID {}", game_id);
                Resolution::Identified(game_id)
            }
            Err(err) => {
                warn!("Hash lookup for {} failed: {}", hash, err);
                let message = err
                    .user_message()
                    .unwrap_or_else(|| format!("Error from {}", self.deps.config.host_name()));
                self.deps.surface.show_error(IDENTIFY_FAILED_TITLE, &message);
                Resolution::Failed
            }
        }
    }

    fn activate_game_locked(&self, game_id: u32) {
        let pending = self.pending();

        if game_id != 0 {
            if !self.deps.emulator.is_logged_in() {
                self.deps
                    .surface
                    .show_error(LOGIN_REQUIRED_TITLE, LOGIN_REQUIRED_MESSAGE);
                return;
            }

            info!("Loading game {}", game_id);

            self.deps.surface.clear_popups();

            // only trust the staged hash if it belongs to this game
            let hash = if game_id == pending.game_id {
                pending.hash.as_str()
            } else {
                ""
            };
            self.deps.game.load_game(game_id, pending.mode, hash);

            self.deps.sessions.begin_session(game_id);

            if !self.deps.config.is_feature_enabled(Feature::Hardcore) {
                self.apply_softcore_policy();
            }
        } else {
            info!("Unloading current game");

            self.deps.sessions.end_session();

            let hash = if pending.game_id == 0 {
                pending.hash.as_str()
            } else {
                ""
            };
            self.deps.game.load_game(0, pending.mode, hash);
        }

        self.deps.emulator.reset_memory_modified();
    }

    /// Offer hardcore mode, or tell the player they are in softcore
    fn apply_softcore_policy(&self) {
        let config = &self.deps.config;

        let show_prompt = config.is_feature_enabled(Feature::NonHardcoreWarning)
            && self.deps.game.has_achievement_assets();

        if show_prompt {
            if self
                .deps
                .surface
                .show_confirm(HARDCORE_PROMPT_HEADER, HARDCORE_PROMPT_MESSAGE)
            {
                self.deps.emulator.enable_hardcore_mode();
            }
        } else {
            let subtitle = if config.is_feature_enabled(Feature::Leaderboards) {
                LEADERBOARD_CAVEAT
            } else {
                ""
            };

            self.deps.surface.play_audio(INFO_SOUND);
            self.deps.surface.queue_message(SOFTCORE_TITLE, subtitle);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::Console;
    use crate::database::HashDatabase;
    use crate::game::GameContext;
    use crate::hash::Md5Hasher;
    use crate::runtime::RuntimeContext;
    use crate::session::SessionTracker;
    use crate::surface::HeadlessSurface;
    use oc_core::{Config, SharedConfig};

    struct Harness {
        identifier: GameIdentifier,
        database: Arc<HashDatabase>,
        game: Arc<GameContext>,
        sessions: Arc<SessionTracker>,
        surface: Arc<HeadlessSurface>,
        runtime: Arc<RuntimeContext>,
        config: SharedConfig,
    }

    fn harness() -> Harness {
        let config = SharedConfig::new(Config::default());
        let database = Arc::new(HashDatabase::new());
        let game = Arc::new(GameContext::new());
        let sessions = Arc::new(SessionTracker::new());
        let surface = Arc::new(HeadlessSurface::new());
        let runtime = Arc::new(RuntimeContext::new(config.clone()));
        runtime.set_console(Console::SuperNintendo);
        runtime.login("Player");

        let identifier = GameIdentifier::new(Collaborators {
            resolver: database.clone(),
            game: game.clone(),
            sessions: sessions.clone(),
            surface: surface.clone(),
            emulator: runtime.clone(),
            config: Arc::new(config.clone()),
            hasher: Arc::new(Md5Hasher),
        });

        Harness {
            identifier,
            database,
            game,
            sessions,
            surface,
            runtime,
            config,
        }
    }

    #[test]
    fn test_resolution_game_id_and_mode() {
        assert_eq!(Resolution::Identified(5).game_id(), 5);
        assert_eq!(Resolution::Identified(5).mode(), GameMode::Normal);
        let selected = Resolution::Selected {
            game_id: 8,
            test_mode: true,
        };
        assert_eq!(selected.game_id(), 8);
        assert_eq!(selected.mode(), GameMode::CompatibilityTest);
        assert_eq!(Resolution::Cancelled.game_id(), 0);
        assert_eq!(Resolution::Failed.game_id(), 0);
    }

    #[test]
    fn test_identify_and_activate_known_rom() {
        let h = harness();
        let rom = b"super game rom".to_vec();
        let hash = Md5Hasher.hash(Console::SuperNintendo.id(), &rom);
        h.database.insert(&hash, 42);
        h.game.set_achievement_count(42, 0);

        h.identifier.identify_and_activate_game(Some(rom.as_slice()));

        let active = h.game.active();
        assert_eq!(active.game_id, 42);
        assert_eq!(active.hash, hash);
        assert_eq!(active.mode, GameMode::Normal);
        assert_eq!(h.sessions.current_game(), Some(42));
        // no assets, so the softcore notice is shown
        assert_eq!(h.surface.messages().len(), 1);
        assert_eq!(h.surface.messages()[0].subtitle, LEADERBOARD_CAVEAT);
    }

    #[test]
    fn test_identify_and_activate_unknown_rom_uses_estimated_title() {
        let h = harness();
        h.runtime.set_game_title("Homebrew Demo");
        h.runtime.mark_memory_modified();

        h.identifier.identify_and_activate_game(Some(&b"unlisted"[..]));

        let active = h.game.active();
        assert_eq!(active.game_id, 0);
        assert_eq!(active.title, "Homebrew Demo");
        assert_eq!(active.hash, Md5Hasher.hash(3, b"unlisted"));
        assert!(!h.runtime.is_memory_modified());
    }

    #[test]
    fn test_identify_and_activate_unknown_rom_without_estimate() {
        let h = harness();
        h.identifier.identify_and_activate_game(Some(&b"unlisted"[..]));
        assert_eq!(h.game.active().title, UNKNOWN_TITLE);
    }

    #[test]
    fn test_identify_and_activate_without_rom_keeps_title_empty() {
        let h = harness();
        h.identifier.identify_and_activate_game(None);
        assert!(h.game.active().title.is_empty());
        assert!(h.surface.errors().is_empty());
    }

    #[test]
    fn test_declined_hardcore_prompt_keeps_softcore() {
        let h = harness();
        h.database.insert("feed", 9);
        h.game.set_achievement_count(9, 30);

        assert_eq!(h.identifier.identify_hash("feed"), 9);
        h.identifier.activate_game(9);

        // headless surface answers No
        assert!(!h.config.is_feature_enabled(Feature::Hardcore));
        assert!(h.surface.messages().is_empty());
    }

    #[test]
    fn test_offline_database_reports_error() {
        let h = harness();
        h.database.set_offline(true);
        assert_eq!(h.identifier.identify_hash("abcd"), 0);
        let errors = h.surface.errors();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].0, IDENTIFY_FAILED_TITLE);
        assert!(errors[0].1.contains("offline"));
    }
}
