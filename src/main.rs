//! Oxidized-RA - achievement game identification
//!
//! Identifies a ROM image or content hash against the local hash database
//! and activates the result, printing the active game afterwards.

use anyhow::{bail, Context};
use clap::Parser;
use oc_achievements::{
    Collaborators, Console, GameContext, GameIdentifier, HashDatabase, HeadlessSurface,
    Md5Hasher, RomHasher, RuntimeContext, SessionTracker,
};
use oc_core::{Config, SharedConfig};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(name = "oxidized-ra", version, about = "Identify and activate a game for achievements")]
struct Cli {
    /// ROM image to identify
    #[arg(long, conflicts_with = "hash")]
    rom: Option<PathBuf>,

    /// Precomputed content hash to identify
    #[arg(long)]
    hash: Option<String>,

    /// Console short name (snes, nes, gba, ...) or numeric id
    #[arg(long, default_value = "unknown")]
    console: String,

    /// Log in as this user (defaults to the configured username)
    #[arg(long)]
    user: Option<String>,

    /// Hash database file (defaults to the configured path)
    #[arg(long)]
    database: Option<PathBuf>,

    /// Title estimated from the content, used for unknown games
    #[arg(long)]
    title: Option<String>,

    /// Configuration file (defaults to the user config directory)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Record the content hash as this game id in the database before identifying
    #[arg(long, value_name = "GAME_ID")]
    link: Option<u32>,

    /// Treat the hash database as unreachable
    #[arg(long)]
    offline: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => Config::load().context("Failed to load config")?,
    };

    oc_core::logging::init(&config.debug)?;

    tracing::info!("Starting Oxidized-RA");

    let console = Console::from_name(&cli.console).unwrap_or_default();
    let database_path = cli
        .database
        .clone()
        .unwrap_or_else(|| config.paths.hash_database.clone());
    let username = cli.user.clone().or_else(|| config.achievements.username.clone());

    let rom = match &cli.rom {
        Some(path) => Some(
            std::fs::read(path).with_context(|| format!("Failed to read ROM {}", path.display()))?,
        ),
        None => None,
    };

    let shared = SharedConfig::new(config);
    let database = Arc::new(HashDatabase::open(&database_path)?);

    if let Some(game_id) = cli.link {
        let hash = match (&rom, &cli.hash) {
            (Some(data), _) => Md5Hasher.hash(console.id(), data),
            (None, Some(hash)) => hash.clone(),
            (None, None) => bail!("--link needs --rom or --hash"),
        };
        database
            .link(&hash, game_id)
            .with_context(|| format!("Failed to update {}", database_path.display()))?;
    }
    database.set_offline(cli.offline);

    let game = Arc::new(GameContext::new());
    let sessions = Arc::new(SessionTracker::new());
    let surface = Arc::new(HeadlessSurface::new());
    let runtime = Arc::new(RuntimeContext::new(shared.clone()));

    runtime.set_console(console);
    if let Some(title) = &cli.title {
        runtime.set_game_title(title);
    }
    if let Some(user) = &username {
        runtime.login(user);
    }

    let identifier = GameIdentifier::new(Collaborators {
        resolver: database,
        game: game.clone(),
        sessions: sessions.clone(),
        surface: surface.clone(),
        emulator: runtime,
        config: Arc::new(shared),
        hasher: Arc::new(Md5Hasher),
    });

    match (&rom, &cli.hash) {
        (Some(data), _) => {
            identifier.identify_and_activate_game(Some(data.as_slice()));
        }
        (None, Some(hash)) => {
            let game_id = identifier.identify_hash(hash);
            identifier.activate_game(game_id);
        }
        (None, None) => bail!("Either --rom or --hash is required"),
    }

    let active = game.active();
    println!("Game ID: {}", active.game_id);
    println!("Hash:    {}", active.hash);
    println!("Title:   {}", active.title);
    println!("Mode:    {:?}", active.mode);
    if let Some(game_id) = sessions.current_game() {
        println!("Session: started for game {}", game_id);
    }
    for message in surface.messages() {
        println!("Overlay: {} {}", message.title, message.subtitle);
    }

    Ok(())
}
