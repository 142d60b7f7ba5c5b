//! Per-frame input snapshot

use crate::core::types::Seconds;
use glam::Vec2;

/// Input sampled once per tick
///
/// `*_pressed` fields are edges (true only on the frame the button went
/// down); `primary_held` is level-triggered.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameInput {
    /// Elapsed time since the previous tick
    pub dt: Seconds,
    pub primary_pressed: bool,
    pub primary_held: bool,
    pub secondary_pressed: bool,
    /// Pointer movement this frame (x = horizontal, y = vertical)
    pub pointer_delta: Vec2,
}

impl FrameInput {
    /// A frame with no input
    pub fn idle(dt: Seconds) -> Self {
        Self {
            dt,
            ..Default::default()
        }
    }

    /// Primary button goes down this frame
    pub fn click(dt: Seconds) -> Self {
        Self {
            dt,
            primary_pressed: true,
            primary_held: true,
            ..Default::default()
        }
    }

    /// Primary button held while the pointer moves
    pub fn drag(dt: Seconds, delta: Vec2) -> Self {
        Self {
            dt,
            primary_held: true,
            pointer_delta: delta,
            ..Default::default()
        }
    }

    /// Secondary button goes down this frame
    pub fn back(dt: Seconds) -> Self {
        Self {
            dt,
            secondary_pressed: true,
            ..Default::default()
        }
    }
}
