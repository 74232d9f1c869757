//! Local hash database
//!
//! A resolution service backed by a JSON file of known hashes. Useful when
//! the achievement server is unavailable and for tests.

use crate::context::ResolutionService;
use oc_core::error::{CoreError, Result, ServiceError};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, info};

/// One entry in the database file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HashEntry {
    pub hash: String,
    pub game_id: u32,
}

/// Hash to game id lookup table
pub struct HashDatabase {
    entries: RwLock<HashMap<String, u32>>,
    /// File the database was loaded from
    path: Option<PathBuf>,
    offline: AtomicBool,
}

impl HashDatabase {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            path: None,
            offline: AtomicBool::new(false),
        }
    }

    /// Load entries from a JSON file. A missing file yields an empty database.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let mut db = Self::new();

        if path.exists() {
            info!("Loading hash database from {:?}", path);
            let file = File::open(&path)?;
            let entries: Vec<HashEntry> = serde_json::from_reader(BufReader::new(file))
                .map_err(|e| CoreError::Database(format!("Failed to parse {:?}: {}", path, e)))?;

            for entry in entries {
                db.insert(&entry.hash, entry.game_id);
            }
            info!("Loaded {} hashes", db.len());
        } else {
            debug!("Hash database file does not exist: {:?}", path);
        }

        db.path = Some(path);
        Ok(db)
    }

    /// Write entries back to the file the database was opened from
    pub fn save(&self) -> Result<()> {
        let path = match &self.path {
            Some(p) => p,
            None => return Ok(()), // Not file backed
        };

        self.save_to(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut entries: Vec<HashEntry> = self
            .entries
            .read()
            .iter()
            .map(|(hash, &game_id)| HashEntry {
                hash: hash.clone(),
                game_id,
            })
            .collect();
        entries.sort_by(|a, b| a.hash.cmp(&b.hash));

        let file = File::create(path)?;
        serde_json::to_writer_pretty(file, &entries)
            .map_err(|e| CoreError::Database(format!("Failed to write {:?}: {}", path, e)))?;

        info!("Saved {} hashes to {:?}", entries.len(), path);
        Ok(())
    }

    /// Associate a hash with a game. Hashes are case-insensitive.
    pub fn insert(&self, hash: &str, game_id: u32) {
        self.entries.write().insert(hash.to_ascii_lowercase(), game_id);
    }

    /// Record a hash for a game and persist the database
    pub fn link(&self, hash: &str, game_id: u32) -> Result<()> {
        info!("Linking hash {} to game {}", hash, game_id);
        self.insert(hash, game_id);
        self.save()
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Simulate an unreachable server
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::Relaxed);
    }
}

impl Default for HashDatabase {
    fn default() -> Self {
        Self::new()
    }
}

impl ResolutionService for HashDatabase {
    fn resolve_hash(&self, hash: &str) -> std::result::Result<u32, ServiceError> {
        if self.offline.load(Ordering::Relaxed) {
            return Err(ServiceError::Transport("hash database is offline".to_string()));
        }

        if hash.is_empty() {
            return Err(ServiceError::Server("No hash provided.".to_string()));
        }

        let game_id = self
            .entries
            .read()
            .get(&hash.to_ascii_lowercase())
            .copied()
            .unwrap_or(0);
        debug!("Resolved {} to {}", hash, game_id);
        Ok(game_id)
    }
}
