//! Sinks that turn simulation notifications into log lines.

use starfall_sim::sinks::{AudioSink, PresentationSink, SessionSink, Sinks, UiSink};
use starfall_sim::Entity;

/// Logs every notification. Stands in for renderer, mixer and HUD when the
/// game runs headless.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl PresentationSink for LogSink {
    fn play_destruction_effect(&mut self, entity: Entity) {
        log::debug!("fx: destruction {entity:?}");
    }

    fn play_damage_effect(&mut self, entity: Entity) {
        log::debug!("fx: damage {entity:?}");
    }
}

impl AudioSink for LogSink {
    fn play_explosion(&mut self) {
        log::debug!("sfx: explosion");
    }

    fn play_laser(&mut self) {
        log::trace!("sfx: laser");
    }
}

impl UiSink for LogSink {
    fn show_score(&mut self, total: u32) {
        log::info!("score: {total}");
    }

    fn show_game_over(&mut self, visible: bool) {
        if visible {
            log::info!("GAME OVER (press R to restart)");
        }
    }
}

impl SessionSink for LogSink {
    fn request_restart(&mut self) {
        log::info!("restart requested");
    }

    fn request_exit(&mut self) {
        log::info!("exit requested");
    }
}

/// All four sinks wired to a `LogSink`.
pub fn log_sinks() -> Sinks {
    Sinks {
        presentation: Some(Box::new(LogSink)),
        audio: Some(Box::new(LogSink)),
        ui: Some(Box::new(LogSink)),
        session: Some(Box::new(LogSink)),
    }
}
