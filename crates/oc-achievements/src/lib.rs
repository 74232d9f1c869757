//! Achievement integration for oxidized-ra
//!
//! Identifies loaded content against the achievement server, resolves
//! unknown content with the user, and activates the resulting game.

pub mod console;
pub mod context;
pub mod database;
pub mod game;
pub mod hash;
pub mod identifier;
pub mod runtime;
pub mod session;
pub mod surface;

pub use console::Console;
pub use context::{
    Configuration, EmulatorContext, GameState, InteractionSurface, ResolutionService,
    SessionTracking, UnknownGameChoice, UnknownGamePrompt,
};
pub use database::{HashDatabase, HashEntry};
pub use game::{ActiveGame, GameContext, GameMode};
pub use hash::{Md5Hasher, RomHasher};
pub use identifier::{Collaborators, GameIdentifier, PendingIdentification};
pub use runtime::RuntimeContext;
pub use session::{SessionStats, SessionTracker};
pub use surface::{HeadlessSurface, OverlayMessage};
