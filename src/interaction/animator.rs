//! Object transitions to and from the viewing anchor
//!
//! Each transition is a small state object advanced by the tick driver.
//! Position approaches the target exponentially for a fixed duration and
//! then snaps exactly onto it. The interactable's moving flag is raised
//! for as long as its transition is in flight.

use crate::core::types::{InteractableId, Seconds};
use crate::world::{Interactable, Scene};
use glam::Vec3;

#[derive(Debug, Clone, PartialEq)]
struct Transition {
    target: InteractableId,
    to: Vec3,
    elapsed: Seconds,
}

/// Drives every in-flight object transition
#[derive(Debug, Clone)]
pub struct TransitionAnimator {
    duration: Seconds,
    rate: f32,
    active: Vec<Transition>,
}

impl TransitionAnimator {
    pub fn new(duration: Seconds, rate: f32) -> Self {
        Self {
            duration,
            rate,
            active: Vec::new(),
        }
    }

    /// Begin moving `object` toward `to`.
    ///
    /// An object has at most one transition. Starting another while one is
    /// in flight retargets it from wherever the object currently is.
    pub fn start(&mut self, object: &mut Interactable, to: Vec3) {
        object.set_moving(true);

        if let Some(existing) = self.active.iter_mut().find(|t| t.target == object.id) {
            tracing::debug!("Retargeting transition of '{}' to {:?}", object.name, to);
            existing.to = to;
            existing.elapsed = 0.0;
            return;
        }

        tracing::debug!("Moving '{}' to {:?}", object.name, to);
        self.active.push(Transition {
            target: object.id,
            to,
            elapsed: 0.0,
        });
    }

    /// Advance all transitions by one tick. Returns the objects that finished.
    pub fn advance(&mut self, dt: Seconds, scene: &mut Scene) -> Vec<InteractableId> {
        let mut finished = Vec::new();
        let step = (dt * self.rate).clamp(0.0, 1.0);
        let duration = self.duration;

        self.active.retain_mut(|transition| {
            let Some(object) = scene.get_mut(transition.target) else {
                // Object left the scene mid-flight
                return false;
            };

            if transition.elapsed < duration {
                object.pose.position = object.pose.position.lerp(transition.to, step);
                transition.elapsed += dt;
                return true;
            }

            object.pose.position = transition.to;
            object.set_moving(false);
            finished.push(transition.target);
            false
        });

        finished
    }

    pub fn is_animating(&self, id: InteractableId) -> bool {
        self.active.iter().any(|t| t.target == id)
    }

    /// Number of transitions in flight
    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Pose;

    fn scene_with_box(position: Vec3) -> Scene {
        let mut scene = Scene::new();
        scene
            .add(Interactable::new(
                InteractableId(1),
                "box",
                Pose::at(position),
                0.3,
                None,
            ))
            .unwrap();
        scene
    }

    fn start(animator: &mut TransitionAnimator, scene: &mut Scene, to: Vec3) {
        let object = scene.get_mut(InteractableId(1)).unwrap();
        animator.start(object, to);
    }

    #[test]
    fn test_snaps_exactly_to_target() {
        let mut scene = scene_with_box(Vec3::ZERO);
        let mut animator = TransitionAnimator::new(1.0, 5.0);
        let target = Vec3::new(0.3, 1.7, -0.6);
        start(&mut animator, &mut scene, target);

        let mut ticks = 0;
        while animator.is_animating(InteractableId(1)) {
            let object = scene.get(InteractableId(1)).unwrap();
            assert!(object.is_moving());
            animator.advance(1.0 / 60.0, &mut scene);
            ticks += 1;
            assert!(ticks < 200, "transition never finished");
        }

        let object = scene.get(InteractableId(1)).unwrap();
        assert_eq!(object.pose.position, target);
        assert!(!object.is_moving());
    }

    #[test]
    fn test_still_moving_until_tick_after_duration() {
        let mut scene = scene_with_box(Vec3::ZERO);
        let mut animator = TransitionAnimator::new(1.0, 5.0);
        start(&mut animator, &mut scene, Vec3::X);

        // Two half-second steps consume the whole duration
        assert!(animator.advance(0.5, &mut scene).is_empty());
        assert!(animator.advance(0.5, &mut scene).is_empty());
        assert!(scene.get(InteractableId(1)).unwrap().is_moving());

        // The following tick performs the snap
        assert_eq!(animator.advance(0.5, &mut scene), vec![InteractableId(1)]);
        let object = scene.get(InteractableId(1)).unwrap();
        assert!(!object.is_moving());
        assert_eq!(object.pose.position, Vec3::X);
    }

    #[test]
    fn test_exponential_step_uses_rate() {
        let mut scene = scene_with_box(Vec3::ZERO);
        let mut animator = TransitionAnimator::new(1.0, 5.0);
        start(&mut animator, &mut scene, Vec3::new(10.0, 0.0, 0.0));

        animator.advance(0.1, &mut scene);
        let x = scene.get(InteractableId(1)).unwrap().pose.position.x;
        assert!((x - 5.0).abs() < 1e-4);
    }

    #[test]
    fn test_restart_retargets_single_transition() {
        let mut scene = scene_with_box(Vec3::ZERO);
        let mut animator = TransitionAnimator::new(1.0, 5.0);
        start(&mut animator, &mut scene, Vec3::X);
        animator.advance(0.1, &mut scene);

        start(&mut animator, &mut scene, Vec3::ZERO);
        assert_eq!(animator.len(), 1);

        for _ in 0..30 {
            animator.advance(0.1, &mut scene);
        }
        assert_eq!(scene.get(InteractableId(1)).unwrap().pose.position, Vec3::ZERO);
    }
}
