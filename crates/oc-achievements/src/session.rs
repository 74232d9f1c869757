//! Play session tracking

use crate::context::SessionTracking;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Accumulated statistics for one game
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    /// Number of sessions started
    pub sessions: u32,
    /// Total time across finished sessions
    pub play_time: Duration,
}

struct ActiveSession {
    game_id: u32,
    started: Instant,
}

#[derive(Default)]
struct TrackerState {
    current: Option<ActiveSession>,
    stats: HashMap<u32, SessionStats>,
}

/// In-memory session tracker
#[derive(Default)]
pub struct SessionTracker {
    state: Mutex<TrackerState>,
}

impl SessionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Game with a running session, if any
    pub fn current_game(&self) -> Option<u32> {
        self.state.lock().current.as_ref().map(|session| session.game_id)
    }

    /// Statistics for a game (finished sessions only count towards play time)
    pub fn stats(&self, game_id: u32) -> SessionStats {
        self.state
            .lock()
            .stats
            .get(&game_id)
            .copied()
            .unwrap_or_default()
    }

    fn finish(state: &mut TrackerState) {
        if let Some(session) = state.current.take() {
            let elapsed = session.started.elapsed();
            let stats = state.stats.entry(session.game_id).or_default();
            stats.play_time += elapsed;
            info!(
                "Ended session for game {} after {:.1}s",
                session.game_id,
                elapsed.as_secs_f32()
            );
        }
    }
}

impl SessionTracking for SessionTracker {
    fn begin_session(&self, game_id: u32) {
        let mut state = self.state.lock();
        Self::finish(&mut state);

        state.stats.entry(game_id).or_default().sessions += 1;
        state.current = Some(ActiveSession {
            game_id,
            started: Instant::now(),
        });
        info!("Started session for game {}", game_id);
    }

    fn end_session(&self) {
        let mut state = self.state.lock();
        if state.current.is_none() {
            debug!("No active session to end");
            return;
        }
        Self::finish(&mut state);
    }
}
