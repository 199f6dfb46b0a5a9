//! Sound cues emitted by the simulation.
//!
//! The core never plays anything itself: systems write [`AudioEvent`]s and the host drains them
//! after each tick through [`crate::game::Game::drain_audio`], handing them to an [`AudioSink`].

use bevy_ecs::{event::Event, resource::Resource};
use strum_macros::AsRefStr;

/// Resource for tracking audio state
#[derive(Resource, Debug, Clone, Default)]
pub struct AudioState {
    /// Whether audio is currently muted
    pub muted: bool,
}

/// Events for triggering audio playback
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr)]
#[strum(serialize_all = "kebab-case")]
pub enum AudioEvent {
    EnemyDied,
    BottleThrown,
    BossHit,
    PlayerHurt,
    GameOver,
    Victory,
    BottleCollected,
    CoinCollected,
}

/// Host-side consumer of audio cues.
pub trait AudioSink {
    fn play(&mut self, event: AudioEvent);
}
