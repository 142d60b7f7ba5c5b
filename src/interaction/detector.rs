//! Target detection: what is the player looking at?

use crate::core::config::ExamineConfig;
use crate::core::types::{InteractableId, Pose};
use crate::world::probe::{HitTarget, Probe, ProbeHit};
use glam::Vec3;

/// An interactable under the crosshair
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Detection {
    pub interactable: InteractableId,
    pub hit: ProbeHit,
}

/// Viewport centre projected `probe_origin_offset` in front of the viewer
pub fn probe_origin(viewer: &Pose, config: &ExamineConfig) -> Vec3 {
    viewer.position + viewer.forward() * config.probe_origin_offset
}

/// Cast one forward probe and report the nearest interactable in range.
///
/// Misses and hits on non-interactable geometry both return `None`.
pub fn detect<P: Probe + ?Sized>(
    probe: &P,
    viewer: &Pose,
    config: &ExamineConfig,
) -> Option<Detection> {
    let hit = probe.cast(probe_origin(viewer, config), viewer.forward(), config.ray_distance)?;
    match hit.target {
        HitTarget::Interactable(interactable) => Some(Detection { interactable, hit }),
        HitTarget::Obstacle(_) => None,
    }
}
