//! Audio output collaborator
//!
//! The engine only needs fire-and-forget playback that reports the clip's
//! duration, so examination timing can be scheduled from it.

use crate::core::error::{CurioError, Result};
use crate::core::types::{ClipId, Seconds};
use ahash::AHashMap;
use serde::{Deserialize, Serialize};

/// Playback service consumed by the interaction controller
pub trait AudioOutput {
    /// Start playing `clip` once and return its duration
    fn play(&mut self, clip: ClipId) -> Seconds;
}

/// Authored clip metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioClip {
    pub id: ClipId,
    pub name: String,
    pub duration: Seconds,
}

/// Clip registry that records what was played
///
/// Stands in for an audio device in headless runs and tests.
#[derive(Debug, Default)]
pub struct AudioLibrary {
    clips: AHashMap<ClipId, AudioClip>,
    played: Vec<ClipId>,
}

impl AudioLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, clip: AudioClip) -> Result<()> {
        if self.clips.contains_key(&clip.id) {
            return Err(CurioError::DuplicateId {
                kind: "clip",
                id: clip.id.0,
            });
        }
        if clip.duration < 0.0 {
            return Err(CurioError::InvalidConfig(format!(
                "clip '{}' has negative duration",
                clip.name
            )));
        }
        self.clips.insert(clip.id, clip);
        Ok(())
    }

    pub fn contains(&self, clip: ClipId) -> bool {
        self.clips.contains_key(&clip)
    }

    pub fn get(&self, clip: ClipId) -> Option<&AudioClip> {
        self.clips.get(&clip)
    }

    /// Every clip started so far, oldest first
    pub fn played(&self) -> &[ClipId] {
        &self.played
    }
}

impl AudioOutput for AudioLibrary {
    fn play(&mut self, clip: ClipId) -> Seconds {
        let Some(entry) = self.clips.get(&clip) else {
            // Scene loading validates every reference, so this is an authoring bug
            tracing::error!("Playing unknown audio clip {:?}", clip);
            debug_assert!(false, "unknown audio clip {:?}", clip);
            return 0.0;
        };
        tracing::debug!("Playing clip '{}' ({:.2}s)", entry.name, entry.duration);
        self.played.push(clip);
        entry.duration
    }
}
