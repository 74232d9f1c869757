//! Active game state

use crate::context::GameState;
use parking_lot::RwLock;
use std::collections::HashMap;
use tracing::debug;

/// How a loaded game is being played
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GameMode {
    #[default]
    Normal,
    /// Unknown content being tested against an existing game's achievements
    CompatibilityTest,
}

/// Snapshot of the active game
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActiveGame {
    pub game_id: u32,
    pub mode: GameMode,
    pub hash: String,
    pub title: String,
}

/// In-memory game state holder
pub struct GameContext {
    active: RwLock<ActiveGame>,
    /// Number of published achievements per game id
    asset_counts: RwLock<HashMap<u32, u32>>,
}

impl GameContext {
    pub fn new() -> Self {
        Self {
            active: RwLock::new(ActiveGame::default()),
            asset_counts: RwLock::new(HashMap::new()),
        }
    }

    /// Register how many achievements a game has
    pub fn set_achievement_count(&self, game_id: u32, count: u32) {
        self.asset_counts.write().insert(game_id, count);
    }

    /// Copy of the active game
    pub fn active(&self) -> ActiveGame {
        self.active.read().clone()
    }
}

impl Default for GameContext {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState for GameContext {
    fn game_id(&self) -> u32 {
        self.active.read().game_id
    }

    fn load_game(&self, game_id: u32, mode: GameMode, hash: &str) {
        debug!("Game context: load {} ({:?}) hash='{}'", game_id, mode, hash);
        let mut active = self.active.write();
        *active = ActiveGame {
            game_id,
            mode,
            hash: hash.to_string(),
            title: String::new(),
        };
    }

    fn set_hash(&self, hash: &str) {
        self.active.write().hash = hash.to_string();
    }

    fn set_mode(&self, mode: GameMode) {
        self.active.write().mode = mode;
    }

    fn set_title(&self, title: &str) {
        self.active.write().title = title.to_string();
    }

    fn has_achievement_assets(&self) -> bool {
        let game_id = self.game_id();
        if game_id == 0 {
            return false;
        }

        self.asset_counts
            .read()
            .get(&game_id)
            .is_some_and(|&count| count > 0)
    }
}
