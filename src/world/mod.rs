//! Interactables, scene storage, and probing

pub mod interactable;
pub mod loader;
pub mod probe;
pub mod scene;

pub use interactable::{Interactable, ItemBinding, SubstitutionRule};
pub use loader::{load_scene, load_scene_with_config, LoadedScene, SceneManifest, DEFAULT_EYE};
pub use probe::{HitTarget, Probe, ProbeHit};
pub use scene::{Obstacle, Scene};
