//! Sound effect identifiers and volume mixing
//!
//! The simulation only names sounds; playing them is up to the presentation.
//! Missing or failing audio never affects gameplay.

use serde::{Deserialize, Serialize};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoundEffect {
    /// Ball hits paddle (once per frame, however many balls touch it)
    PaddleHit,
    /// Ball destroys a brick
    BrickHit,
    /// All bricks cleared
    LevelComplete,
    /// Last ball fell off the bottom
    LifeLost,
}

impl SoundEffect {
    /// Base volume (0.0 - 1.0) before the master volume is applied
    pub fn base_volume(&self) -> f32 {
        match self {
            SoundEffect::PaddleHit => 0.2,
            SoundEffect::BrickHit => 0.5,
            SoundEffect::LevelComplete => 1.0,
            SoundEffect::LifeLost => 1.0,
        }
    }

    /// Longer cues that mark a game checkpoint rather than a hit
    pub fn is_jingle(&self) -> bool {
        matches!(self, SoundEffect::LevelComplete | SoundEffect::LifeLost)
    }
}

/// Volume state shared by presentations
#[derive(Debug, Clone)]
pub struct AudioMixer {
    master_volume: f32,
    muted: bool,
}

impl Default for AudioMixer {
    fn default() -> Self {
        Self::new(0.8)
    }
}

impl AudioMixer {
    pub fn new(master_volume: f32) -> Self {
        Self {
            master_volume: master_volume.clamp(0.0, 1.0),
            muted: false,
        }
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Effective volume for a sound (0.0 when muted)
    pub fn volume_for(&self, effect: SoundEffect) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * effect.base_volume()
        }
    }

    /// Whether a sound would be audible at all
    pub fn is_audible(&self, effect: SoundEffect) -> bool {
        self.volume_for(effect) > 0.0
    }
}
