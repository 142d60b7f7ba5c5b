//! Scene storage and probe queries

use crate::core::error::{CurioError, Result};
use crate::core::types::InteractableId;
use crate::world::interactable::Interactable;
use crate::world::probe::{ray_sphere, HitTarget, Probe, ProbeHit};
use ahash::AHashMap;
use glam::Vec3;
use ordered_float::OrderedFloat;

/// Static, non-interactable geometry that still blocks the probe
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Obstacle {
    pub center: Vec3,
    pub radius: f32,
}

/// Every interactable and obstacle in the loaded scene
#[derive(Debug, Default)]
pub struct Scene {
    interactables: AHashMap<InteractableId, Interactable>,
    obstacles: Vec<Obstacle>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an interactable. Ids must be unique.
    pub fn add(&mut self, interactable: Interactable) -> Result<()> {
        if self.interactables.contains_key(&interactable.id) {
            return Err(CurioError::DuplicateId {
                kind: "interactable",
                id: interactable.id.0,
            });
        }
        self.interactables.insert(interactable.id, interactable);
        Ok(())
    }

    pub fn add_obstacle(&mut self, obstacle: Obstacle) {
        self.obstacles.push(obstacle);
    }

    pub fn get(&self, id: InteractableId) -> Option<&Interactable> {
        self.interactables.get(&id)
    }

    pub fn get_mut(&mut self, id: InteractableId) -> Option<&mut Interactable> {
        self.interactables.get_mut(&id)
    }

    pub fn by_name(&self, name: &str) -> Option<&Interactable> {
        self.interactables.values().find(|i| i.name == name)
    }

    /// Interactables ordered by id
    pub fn sorted(&self) -> Vec<&Interactable> {
        let mut all: Vec<_> = self.interactables.values().collect();
        all.sort_by_key(|i| i.id);
        all
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn len(&self) -> usize {
        self.interactables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.interactables.is_empty()
    }
}

impl Probe for Scene {
    fn cast(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<ProbeHit> {
        let direction = direction.try_normalize()?;

        let interactables = self.interactables.values().filter_map(|i| {
            ray_sphere(origin, direction, i.pose.position, i.radius)
                .map(|t| (t, HitTarget::Interactable(i.id)))
        });
        let obstacles = self.obstacles.iter().enumerate().filter_map(|(idx, o)| {
            ray_sphere(origin, direction, o.center, o.radius).map(|t| (t, HitTarget::Obstacle(idx)))
        });

        interactables
            .chain(obstacles)
            .filter(|(t, _)| *t <= max_distance)
            .min_by_key(|(t, _)| OrderedFloat(*t))
            .map(|(distance, target)| ProbeHit {
                target,
                point: origin + direction * distance,
                distance,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Pose;

    fn ball(id: u32, name: &str, pos: Vec3) -> Interactable {
        Interactable::new(InteractableId(id), name, Pose::at(pos), 0.25, None)
    }

    #[test]
    fn test_add_and_get() {
        let mut scene = Scene::new();
        scene.add(ball(1, "cup", Vec3::ZERO)).unwrap();

        assert_eq!(scene.get(InteractableId(1)).unwrap().name, "cup");
        assert!(scene.by_name("cup").is_some());
        assert!(scene.add(ball(1, "again", Vec3::ONE)).is_err());
    }

    #[test]
    fn test_nearest_hit_wins() {
        let mut scene = Scene::new();
        scene.add(ball(1, "far", Vec3::new(0.0, 0.0, -3.0))).unwrap();
        scene.add(ball(2, "near", Vec3::new(0.0, 0.0, -1.0))).unwrap();

        let hit = scene.cast(Vec3::ZERO, Vec3::NEG_Z, 10.0).unwrap();
        assert_eq!(hit.target, HitTarget::Interactable(InteractableId(2)));
        assert!((hit.distance - 0.75).abs() < 1e-5);
    }

    #[test]
    fn test_obstacle_occludes_interactable() {
        let mut scene = Scene::new();
        scene.add(ball(1, "behind", Vec3::new(0.0, 0.0, -3.0))).unwrap();
        scene.add_obstacle(Obstacle {
            center: Vec3::new(0.0, 0.0, -1.5),
            radius: 0.5,
        });

        let hit = scene.cast(Vec3::ZERO, Vec3::NEG_Z, 10.0).unwrap();
        assert_eq!(hit.target, HitTarget::Obstacle(0));
    }

    #[test]
    fn test_hits_beyond_range_are_ignored() {
        let mut scene = Scene::new();
        scene.add(ball(1, "distant", Vec3::new(0.0, 0.0, -5.0))).unwrap();

        assert!(scene.cast(Vec3::ZERO, Vec3::NEG_Z, 2.0).is_none());
    }

    #[test]
    fn test_sorted_orders_by_id() {
        let mut scene = Scene::new();
        scene.add(ball(3, "c", Vec3::ZERO)).unwrap();
        scene.add(ball(1, "a", Vec3::ZERO)).unwrap();
        scene.add(ball(2, "b", Vec3::ZERO)).unwrap();

        let names: Vec<_> = scene.sorted().iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }
}
