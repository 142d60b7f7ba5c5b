//! Examination configuration with documented constants
//!
//! All per-scene tunables are collected here. They are static for the
//! lifetime of a scene; nothing mutates them at runtime.

use crate::core::error::{CurioError, Result};
use crate::core::types::{ClipId, Seconds};
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Configuration for target detection, examination, and transitions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExamineConfig {
    // === DETECTION ===
    /// Maximum probe range from the viewer (world units)
    ///
    /// Anything further than this is treated as "nothing under the cursor".
    pub ray_distance: f32,

    /// Distance in front of the viewer where the probe starts
    ///
    /// The probe origin is the viewport centre projected this far along the
    /// viewer's forward axis, so objects touching the viewer are ignored.
    pub probe_origin_offset: f32,

    // === ROTATION ===
    /// Degrees of rotation per unit of pointer delta
    pub rotate_speed: f32,

    // === VIEWING ===
    /// World-space position a grabbable object is brought to for examination
    pub viewing_anchor: Vec3,

    /// Extra time after the item's clip before the session may finish
    pub finish_grace: Seconds,

    // === TRANSITIONS ===
    /// How long an object transition runs before snapping to its target
    pub transition_duration: Seconds,

    /// Exponential approach factor, multiplied by frame time each tick
    ///
    /// At 5.0 and 60 fps each step covers ~8% of the remaining distance.
    pub transition_rate: f32,

    // === AUDIO ===
    /// Clip played when an item is added to the inventory
    pub collect_sound: ClipId,
}

impl Default for ExamineConfig {
    fn default() -> Self {
        Self {
            ray_distance: 2.0,
            probe_origin_offset: 0.5,
            rotate_speed: 180.0,
            viewing_anchor: Vec3::new(0.0, 0.0, -0.6),
            finish_grace: 0.5,
            transition_duration: 1.0,
            transition_rate: 5.0,
            collect_sound: ClipId(0),
        }
    }
}

impl ExamineConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a config from a TOML document (missing keys take defaults)
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: ExamineConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.ray_distance <= 0.0 {
            return Err(CurioError::InvalidConfig(format!(
                "ray_distance ({}) must be positive",
                self.ray_distance
            )));
        }

        // The probe has to start inside its own range
        if self.probe_origin_offset < 0.0 || self.probe_origin_offset >= self.ray_distance {
            return Err(CurioError::InvalidConfig(format!(
                "probe_origin_offset ({}) must be in [0, ray_distance ({}))",
                self.probe_origin_offset, self.ray_distance
            )));
        }

        if self.finish_grace < 0.0 {
            return Err(CurioError::InvalidConfig(format!(
                "finish_grace ({}) must not be negative",
                self.finish_grace
            )));
        }

        if self.transition_duration <= 0.0 || self.transition_rate <= 0.0 {
            return Err(CurioError::InvalidConfig(
                "transition_duration and transition_rate must be positive".into(),
            ));
        }

        if !self.viewing_anchor.is_finite() {
            return Err(CurioError::InvalidConfig("viewing_anchor must be finite".into()));
        }

        Ok(())
    }
}
