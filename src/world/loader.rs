//! Load scenes from TOML manifests
//!
//! A manifest bundles the authored content of one scene: audio clips, item
//! records, placed interactables with their substitution rules, blocking
//! geometry, the player's eye position, and an optional `[config]` table.
//! Every cross-reference is checked while building, so a scene that loads
//! never hands the engine a dangling clip or item.
//!
//! A separate config file can be layered over the `[config]` table key by
//! key. The merged table goes through the same validation as the manifest.

use crate::audio::{AudioClip, AudioLibrary};
use crate::core::config::ExamineConfig;
use crate::core::error::{CurioError, Result};
use crate::core::types::{ClipId, InteractableId, ItemId, Pose, Seconds, SpriteId};
use crate::items::{Item, ItemCatalog};
use crate::world::interactable::{Interactable, SubstitutionRule};
use crate::world::scene::{Obstacle, Scene};
use glam::{Quat, Vec3};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, Deserialize)]
pub struct ClipDef {
    pub id: u32,
    pub name: String,
    pub duration: Seconds,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ItemDef {
    pub id: u32,
    pub name: String,
    pub audio_clip: u32,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub grabbable: bool,
    #[serde(default)]
    pub image: Option<u32>,
    #[serde(default)]
    pub inventory_eligible: bool,
    #[serde(default)]
    pub collect_message: String,
    #[serde(default)]
    pub icon: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SubstitutionDef {
    pub required: u32,
    pub replacement: u32,
    #[serde(default)]
    pub label: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InteractableDef {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub item: Option<u32>,
    pub position: [f32; 3],
    /// Heading about +Y in degrees
    #[serde(default)]
    pub yaw_deg: f32,
    #[serde(default = "default_radius")]
    pub radius: f32,
    #[serde(default)]
    pub substitutions: Vec<SubstitutionDef>,
}

fn default_radius() -> f32 {
    0.25
}

/// Eye position used when a manifest does not author one
pub const DEFAULT_EYE: Vec3 = Vec3::new(0.0, 1.6, 0.0);

fn default_eye() -> [f32; 3] {
    DEFAULT_EYE.to_array()
}

#[derive(Debug, Clone, Deserialize)]
pub struct ObstacleDef {
    pub center: [f32; 3],
    pub radius: f32,
}

/// Parsed scene manifest, not yet validated
#[derive(Debug, Clone, Deserialize)]
pub struct SceneManifest {
    #[serde(default)]
    pub config: ExamineConfig,
    /// Where the player stands in this scene
    #[serde(default = "default_eye")]
    pub eye: [f32; 3],
    #[serde(default)]
    pub clips: Vec<ClipDef>,
    #[serde(default)]
    pub items: Vec<ItemDef>,
    #[serde(default)]
    pub interactables: Vec<InteractableDef>,
    #[serde(default)]
    pub obstacles: Vec<ObstacleDef>,
}

/// Everything a scene needs at runtime
#[derive(Debug)]
pub struct LoadedScene {
    pub config: ExamineConfig,
    pub eye: Vec3,
    pub scene: Scene,
    pub catalog: ItemCatalog,
    pub audio: AudioLibrary,
}

impl SceneManifest {
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parse a manifest with `overrides` merged over its `[config]` table
    pub fn from_toml_str_with_overrides(contents: &str, overrides: &str) -> Result<Self> {
        let mut root: toml::Table = toml::from_str(contents)?;
        let overrides: toml::Table = toml::from_str(overrides)?;

        match root
            .entry("config")
            .or_insert(toml::Value::Table(toml::Table::new()))
        {
            toml::Value::Table(config) => config.extend(overrides),
            _ => return Err(CurioError::InvalidConfig("[config] must be a table".into())),
        }

        Ok(toml::Value::Table(root).try_into::<Self>()?)
    }

    /// Validate references and instantiate the scene
    pub fn build(self) -> Result<LoadedScene> {
        self.config.validate()?;

        let mut audio = AudioLibrary::new();
        for clip in &self.clips {
            audio.insert(AudioClip {
                id: ClipId(clip.id),
                name: clip.name.clone(),
                duration: clip.duration,
            })?;
        }
        if !audio.contains(self.config.collect_sound) {
            return Err(CurioError::ClipNotFound(self.config.collect_sound));
        }

        let mut catalog = ItemCatalog::new();
        for def in &self.items {
            let clip = ClipId(def.audio_clip);
            if !audio.contains(clip) {
                return Err(CurioError::ClipNotFound(clip));
            }
            catalog.insert(Item {
                id: ItemId(def.id),
                name: def.name.clone(),
                grabbable: def.grabbable,
                audio_clip: clip,
                text: def.text.clone(),
                image: def.image.map(SpriteId),
                inventory_eligible: def.inventory_eligible,
                collect_message: def.collect_message.clone(),
                icon: def.icon.map(SpriteId),
            })?;
        }

        let mut scene = Scene::new();
        for def in &self.interactables {
            let item = def
                .item
                .map(|id| catalog.require(ItemId(id)))
                .transpose()?;
            let pose = Pose::new(
                Vec3::from_array(def.position),
                Quat::from_rotation_y(def.yaw_deg.to_radians()),
            );

            let mut interactable =
                Interactable::new(InteractableId(def.id), def.name.clone(), pose, def.radius, item);
            for sub in &def.substitutions {
                interactable = interactable.with_rule(SubstitutionRule {
                    required: catalog.require(ItemId(sub.required))?,
                    replacement: catalog.require(ItemId(sub.replacement))?,
                    label: sub.label.clone(),
                });
            }
            scene.add(interactable)?;
        }

        for def in &self.obstacles {
            scene.add_obstacle(Obstacle {
                center: Vec3::from_array(def.center),
                radius: def.radius,
            });
        }

        tracing::info!(
            "Loaded scene: {} interactables, {} items, {} clips, {} obstacles",
            scene.len(),
            catalog.len(),
            self.clips.len(),
            scene.obstacles().len()
        );

        let eye = Vec3::from_array(self.eye);
        if !eye.is_finite() {
            return Err(CurioError::InvalidConfig("eye must be finite".into()));
        }

        Ok(LoadedScene {
            config: self.config,
            eye,
            scene,
            catalog,
            audio,
        })
    }
}

/// Load and build a scene manifest from disk
pub fn load_scene(path: &Path) -> Result<LoadedScene> {
    SceneManifest::load(path)?.build()
}

/// Load a scene manifest with an optional config file layered over its `[config]`
pub fn load_scene_with_config(path: &Path, config: Option<&Path>) -> Result<LoadedScene> {
    let Some(config) = config else {
        return load_scene(path);
    };
    let contents = std::fs::read_to_string(path)?;
    let overrides = std::fs::read_to_string(config)?;
    tracing::info!("Applying config overrides from {}", config.display());
    SceneManifest::from_toml_str_with_overrides(&contents, &overrides)?.build()
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"
        [config]
        collect_sound = 9

        [[clips]]
        id = 9
        name = "scribble"
        duration = 0.5

        [[clips]]
        id = 1
        name = "read_note"
        duration = 2.0

        [[items]]
        id = 1
        name = "note"
        audio_clip = 1
        text = "A hurried note."
        inventory_eligible = true

        [[interactables]]
        id = 1
        name = "desk_note"
        item = 1
        position = [0.0, 1.0, -1.0]
    "#;

    #[test]
    fn test_minimal_manifest_builds() {
        let loaded = SceneManifest::from_toml_str(MINIMAL).unwrap().build().unwrap();

        assert_eq!(loaded.scene.len(), 1);
        let note = loaded.scene.by_name("desk_note").unwrap();
        assert_eq!(note.item().unwrap().name, "note");
        assert_eq!(note.radius, 0.25);
        assert_eq!(loaded.config.collect_sound, ClipId(9));
        assert_eq!(loaded.eye, DEFAULT_EYE);
    }

    #[test]
    fn test_overrides_merge_over_manifest_config() {
        let manifest = MINIMAL.replace(
            "collect_sound = 9",
            "collect_sound = 9\nviewing_anchor = [0.0, 1.2, -0.4]",
        );
        let loaded = SceneManifest::from_toml_str_with_overrides(&manifest, "ray_distance = 3.0")
            .unwrap()
            .build()
            .unwrap();

        assert_eq!(loaded.config.ray_distance, 3.0);
        assert_eq!(loaded.config.collect_sound, ClipId(9));
        assert_eq!(loaded.config.viewing_anchor, Vec3::new(0.0, 1.2, -0.4));
    }

    #[test]
    fn test_override_with_unknown_collect_sound_is_rejected() {
        let err = SceneManifest::from_toml_str_with_overrides(MINIMAL, "collect_sound = 0")
            .unwrap()
            .build()
            .unwrap_err();
        assert!(matches!(err, CurioError::ClipNotFound(ClipId(0))));
    }

    #[test]
    fn test_overrides_apply_without_a_config_table() {
        let manifest = MINIMAL.replace("[config]\n        collect_sound = 9\n", "");
        let loaded = SceneManifest::from_toml_str_with_overrides(&manifest, "collect_sound = 1")
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(loaded.config.collect_sound, ClipId(1));
    }

    #[test]
    fn test_authored_eye_is_used() {
        let manifest = format!("eye = [1.0, 1.7, 2.0]\n{MINIMAL}");
        let loaded = SceneManifest::from_toml_str(&manifest).unwrap().build().unwrap();
        assert_eq!(loaded.eye, Vec3::new(1.0, 1.7, 2.0));
    }

    #[test]
    fn test_unknown_item_clip_is_rejected() {
        let manifest = MINIMAL.replace("audio_clip = 1", "audio_clip = 42");
        let err = SceneManifest::from_toml_str(&manifest).unwrap().build().unwrap_err();
        assert!(matches!(err, CurioError::ClipNotFound(ClipId(42))));
    }

    #[test]
    fn test_missing_collect_sound_is_rejected() {
        let manifest = MINIMAL.replace("collect_sound = 9", "collect_sound = 77");
        let err = SceneManifest::from_toml_str(&manifest).unwrap().build().unwrap_err();
        assert!(matches!(err, CurioError::ClipNotFound(ClipId(77))));
    }

    #[test]
    fn test_dangling_substitution_is_rejected() {
        let manifest = format!(
            "{MINIMAL}\n[[interactables.substitutions]]\nrequired = 5\nreplacement = 1\n"
        );
        let err = SceneManifest::from_toml_str(&manifest).unwrap().build().unwrap_err();
        assert!(matches!(err, CurioError::ItemNotFound(ItemId(5))));
    }
}
