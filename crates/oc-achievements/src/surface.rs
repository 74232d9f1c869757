//! Headless interaction surface
//!
//! Used when no windowing frontend is attached. Dialogs are written to the
//! log, questions are declined and overlay messages are kept in a queue.

use crate::context::{InteractionSurface, UnknownGameChoice, UnknownGamePrompt};
use parking_lot::Mutex;
use tracing::{debug, error, info, warn};

/// Queued overlay message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlayMessage {
    pub title: String,
    pub subtitle: String,
}

#[derive(Default)]
pub struct HeadlessSurface {
    messages: Mutex<Vec<OverlayMessage>>,
    errors: Mutex<Vec<(String, String)>>,
}

impl HeadlessSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overlay messages that are still queued
    pub fn messages(&self) -> Vec<OverlayMessage> {
        self.messages.lock().clone()
    }

    /// Errors shown so far, as (title, message)
    pub fn errors(&self) -> Vec<(String, String)> {
        self.errors.lock().clone()
    }
}

impl InteractionSurface for HeadlessSurface {
    fn show_error(&self, title: &str, message: &str) {
        error!("{}: {}", title, message);
        self.errors
            .lock()
            .push((title.to_string(), message.to_string()));
    }

    fn show_unknown_game(&self, prompt: &UnknownGamePrompt) -> Option<UnknownGameChoice> {
        warn!(
            "Unknown {} game '{}' (hash {}), no frontend to link it",
            prompt.console_name, prompt.estimated_title, prompt.hash
        );
        None
    }

    fn show_confirm(&self, header: &str, message: &str) -> bool {
        info!("{} {} -> No", header, message);
        false
    }

    fn queue_message(&self, title: &str, subtitle: &str) {
        info!("Overlay: {} {}", title, subtitle);
        self.messages.lock().push(OverlayMessage {
            title: title.to_string(),
            subtitle: subtitle.to_string(),
        });
    }

    fn clear_popups(&self) {
        self.messages.lock().clear();
    }

    fn play_audio(&self, name: &str) {
        debug!("Audio cue: {}", name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headless_declines() {
        let surface = HeadlessSurface::new();
        let prompt = UnknownGamePrompt {
            console_name: "NES/Famicom".to_string(),
            hash: "abc".to_string(),
            estimated_title: "Game".to_string(),
            new_game_name: "Game".to_string(),
        };
        assert_eq!(surface.show_unknown_game(&prompt), None);
        assert!(!surface.show_confirm("Question", "Really?"));
    }

    #[test]
    fn test_message_queue() {
        let surface = HeadlessSurface::new();
        surface.queue_message("Hello", "World");
        assert_eq!(surface.messages().len(), 1);
        assert_eq!(surface.messages()[0].title, "Hello");
        surface.clear_popups();
        assert!(surface.messages().is_empty());
    }

    #[test]
    fn test_errors_recorded() {
        let surface = HeadlessSurface::new();
        surface.show_error("Oops", "Something failed");
        assert_eq!(
            surface.errors(),
            vec![("Oops".to_string(), "Something failed".to_string())]
        );
    }
}
