//! Outbound collaborator interfaces.
//!
//! The core only ever notifies sinks; it never reads anything back and never
//! waits. Every sink is optional. Calls into an absent sink are skipped.

use std::cell::RefCell;
use std::rc::Rc;

use hecs::Entity;

use starfall_core::events::SinkEvent;

pub trait PresentationSink {
    fn play_destruction_effect(&mut self, entity: Entity);
    fn play_damage_effect(&mut self, entity: Entity);
}

pub trait AudioSink {
    fn play_explosion(&mut self);
    fn play_laser(&mut self);
}

pub trait UiSink {
    fn show_score(&mut self, total: u32);
    fn show_game_over(&mut self, visible: bool);
}

pub trait SessionSink {
    fn request_restart(&mut self);
    fn request_exit(&mut self);
}

/// The set of sinks wired into an engine.
#[derive(Default)]
pub struct Sinks {
    pub presentation: Option<Box<dyn PresentationSink>>,
    pub audio: Option<Box<dyn AudioSink>>,
    pub ui: Option<Box<dyn UiSink>>,
    pub session: Option<Box<dyn SessionSink>>,
}

impl Sinks {
    /// No collaborators at all. Every notification is dropped.
    pub fn none() -> Self {
        Self::default()
    }

    /// All four sinks backed by one shared recorder.
    pub fn recording() -> (Self, RecordingSink) {
        let recorder = RecordingSink::new();
        let sinks = Self {
            presentation: Some(Box::new(recorder.clone())),
            audio: Some(Box::new(recorder.clone())),
            ui: Some(Box::new(recorder.clone())),
            session: Some(Box::new(recorder.clone())),
        };
        (sinks, recorder)
    }

    /// Whether destruction animations can be played at all.
    pub fn has_presentation(&self) -> bool {
        self.presentation.is_some()
    }

    pub fn destruction_effect(&mut self, entity: Entity) {
        if let Some(sink) = self.presentation.as_mut() {
            sink.play_destruction_effect(entity);
        }
    }

    pub fn damage_effect(&mut self, entity: Entity) {
        if let Some(sink) = self.presentation.as_mut() {
            sink.play_damage_effect(entity);
        }
    }

    pub fn explosion(&mut self) {
        if let Some(sink) = self.audio.as_mut() {
            sink.play_explosion();
        }
    }

    pub fn laser(&mut self) {
        if let Some(sink) = self.audio.as_mut() {
            sink.play_laser();
        }
    }

    pub fn show_score(&mut self, total: u32) {
        if let Some(sink) = self.ui.as_mut() {
            sink.show_score(total);
        }
    }

    pub fn show_game_over(&mut self, visible: bool) {
        if let Some(sink) = self.ui.as_mut() {
            sink.show_game_over(visible);
        }
    }

    pub fn request_restart(&mut self) {
        if let Some(sink) = self.session.as_mut() {
            sink.request_restart();
        }
    }

    pub fn request_exit(&mut self) {
        if let Some(sink) = self.session.as_mut() {
            sink.request_exit();
        }
    }
}

/// Sink that appends every notification to a shared log.
///
/// Clones share the same log, so one recorder can back every sink slot.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    log: Rc<RefCell<Vec<SinkEvent>>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of everything recorded so far.
    pub fn events(&self) -> Vec<SinkEvent> {
        self.log.borrow().clone()
    }

    /// Take everything recorded so far, leaving the log empty.
    pub fn drain(&self) -> Vec<SinkEvent> {
        std::mem::take(&mut *self.log.borrow_mut())
    }

    /// Number of recorded events matching `predicate`.
    pub fn count(&self, predicate: impl Fn(&SinkEvent) -> bool) -> usize {
        self.log.borrow().iter().filter(|e| predicate(e)).count()
    }

    fn push(&self, event: SinkEvent) {
        self.log.borrow_mut().push(event);
    }
}

impl PresentationSink for RecordingSink {
    fn play_destruction_effect(&mut self, entity: Entity) {
        self.push(SinkEvent::DestructionEffect {
            entity: entity.to_bits().get(),
        });
    }

    fn play_damage_effect(&mut self, entity: Entity) {
        self.push(SinkEvent::DamageEffect {
            entity: entity.to_bits().get(),
        });
    }
}

impl AudioSink for RecordingSink {
    fn play_explosion(&mut self) {
        self.push(SinkEvent::Explosion);
    }

    fn play_laser(&mut self) {
        self.push(SinkEvent::Laser);
    }
}

impl UiSink for RecordingSink {
    fn show_score(&mut self, total: u32) {
        self.push(SinkEvent::Score { total });
    }

    fn show_game_over(&mut self, visible: bool) {
        self.push(SinkEvent::GameOver { visible });
    }
}

impl SessionSink for RecordingSink {
    fn request_restart(&mut self) {
        self.push(SinkEvent::RestartRequested);
    }

    fn request_exit(&mut self) {
        self.push(SinkEvent::ExitRequested);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_sinks_are_skipped() {
        let mut sinks = Sinks::none();
        let mut world = hecs::World::new();
        let e = world.spawn((1u32,));
        sinks.destruction_effect(e);
        sinks.explosion();
        sinks.show_score(10);
        sinks.request_exit();
        assert!(!sinks.has_presentation());
    }

    #[test]
    fn test_recording_sink_shares_log() {
        let (mut sinks, recorder) = Sinks::recording();
        sinks.laser();
        sinks.show_score(20);
        sinks.show_game_over(true);
        assert_eq!(
            recorder.events(),
            vec![
                SinkEvent::Laser,
                SinkEvent::Score { total: 20 },
                SinkEvent::GameOver { visible: true },
            ]
        );
        assert_eq!(recorder.drain().len(), 3);
        assert!(recorder.events().is_empty());
    }
}
