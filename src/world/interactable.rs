//! Interactable world objects and their item substitution rules

use crate::core::error::{CurioError, Result};
use crate::core::types::{InteractableId, Pose};
use crate::inventory::Inventory;
use crate::items::ItemRef;

/// Swap the interactable's item when the player already holds `required`
#[derive(Debug, Clone)]
pub struct SubstitutionRule {
    pub required: ItemRef,
    pub replacement: ItemRef,
    /// Name reported with the substitution notification
    pub label: String,
}

/// Which item an interactable currently presents
///
/// `Unresolved` is the authored item and may still be substituted once.
/// `Resolved` is terminal: no further rules are evaluated.
#[derive(Debug, Clone)]
pub enum ItemBinding {
    Empty,
    Unresolved(ItemRef),
    Resolved(ItemRef),
}

impl ItemBinding {
    pub fn item(&self) -> Option<&ItemRef> {
        match self {
            ItemBinding::Empty => None,
            ItemBinding::Unresolved(item) | ItemBinding::Resolved(item) => Some(item),
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, ItemBinding::Resolved(_))
    }
}

/// A world object the player can look at and examine
#[derive(Debug, Clone)]
pub struct Interactable {
    pub id: InteractableId,
    pub name: String,
    pub pose: Pose,
    /// Radius of the spherical collider probed by the detector
    pub radius: f32,
    binding: ItemBinding,
    rules: Vec<SubstitutionRule>,
    moving: bool,
}

impl Interactable {
    pub fn new(
        id: InteractableId,
        name: impl Into<String>,
        pose: Pose,
        radius: f32,
        item: Option<ItemRef>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            pose,
            radius,
            binding: item.map_or(ItemBinding::Empty, ItemBinding::Unresolved),
            rules: Vec::new(),
            moving: false,
        }
    }

    /// Append a substitution rule (rules are evaluated in declaration order)
    pub fn with_rule(mut self, rule: SubstitutionRule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn item(&self) -> Option<&ItemRef> {
        self.binding.item()
    }

    pub fn binding(&self) -> &ItemBinding {
        &self.binding
    }

    pub fn rules(&self) -> &[SubstitutionRule] {
        &self.rules
    }

    /// True while a transition owns this object's transform
    pub fn is_moving(&self) -> bool {
        self.moving
    }

    pub(crate) fn set_moving(&mut self, moving: bool) {
        self.moving = moving;
    }

    /// First rule whose required item is held, if substitution is still possible
    pub fn matching_rule(&self, inventory: &Inventory) -> Option<usize> {
        if !matches!(self.binding, ItemBinding::Unresolved(_)) {
            return None;
        }
        self.rules
            .iter()
            .position(|rule| inventory.contains(&rule.required))
    }

    /// Apply rule `index`, permanently binding its replacement item
    pub fn resolve(&mut self, index: usize) -> Result<&SubstitutionRule> {
        match self.binding {
            ItemBinding::Empty => return Err(CurioError::NoItemBound(self.id)),
            ItemBinding::Resolved(_) => return Err(CurioError::AlreadyResolved(self.id)),
            ItemBinding::Unresolved(_) => {}
        }
        let rule = self.rules.get(index).ok_or_else(|| {
            CurioError::InvalidConfig(format!(
                "interactable '{}' has no substitution rule {}",
                self.name, index
            ))
        })?;
        self.binding = ItemBinding::Resolved(ItemRef::clone(&rule.replacement));
        Ok(rule)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::fixtures::item;
    use crate::ui::HudState;
    use std::sync::Arc;

    fn rule(required: &ItemRef, replacement: &ItemRef) -> SubstitutionRule {
        SubstitutionRule {
            required: Arc::clone(required),
            replacement: Arc::clone(replacement),
            label: format!("{}->{}", required.name, replacement.name),
        }
    }

    #[test]
    fn test_first_matching_rule_wins() {
        let a = Arc::new(item(1, "a"));
        let b = Arc::new(item(2, "b"));
        let r1 = Arc::new(item(10, "r1"));
        let r2 = Arc::new(item(20, "r2"));
        let door = Interactable::new(
            InteractableId(1),
            "door",
            Pose::IDENTITY,
            0.5,
            Some(Arc::new(item(3, "locked"))),
        )
        .with_rule(rule(&a, &r1))
        .with_rule(rule(&b, &r2));

        let mut inventory = Inventory::new();
        let mut hud = HudState::new();
        inventory.add_item(&b, &mut hud);
        assert_eq!(door.matching_rule(&inventory), Some(1));

        inventory.add_item(&a, &mut hud);
        assert_eq!(door.matching_rule(&inventory), Some(0));
    }

    #[test]
    fn test_resolve_happens_once() {
        let a = Arc::new(item(1, "a"));
        let r1 = Arc::new(item(10, "r1"));
        let mut chest = Interactable::new(
            InteractableId(2),
            "chest",
            Pose::IDENTITY,
            0.5,
            Some(Arc::new(item(3, "closed"))),
        )
        .with_rule(rule(&a, &r1));

        chest.resolve(0).unwrap();
        assert!(chest.binding().is_resolved());
        assert_eq!(chest.item().map(|i| i.id), Some(r1.id));

        assert!(matches!(chest.resolve(0), Err(CurioError::AlreadyResolved(_))));

        // Resolved objects no longer look for matches
        let mut inventory = Inventory::new();
        inventory.add_item(&a, &mut HudState::new());
        assert_eq!(chest.matching_rule(&inventory), None);
    }

    #[test]
    fn test_empty_binding_cannot_resolve() {
        let mut lamp = Interactable::new(InteractableId(3), "lamp", Pose::IDENTITY, 0.2, None);
        assert!(lamp.item().is_none());
        assert!(matches!(lamp.resolve(0), Err(CurioError::NoItemBound(_))));
    }
}
