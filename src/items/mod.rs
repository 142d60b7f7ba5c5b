//! Authored item records
//!
//! Items are immutable once authored. Everything else holds them through
//! [`ItemRef`] and compares them by [`ItemId`].

use crate::core::error::{CurioError, Result};
use crate::core::types::{ClipId, ItemId, SpriteId};
use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Shared handle to an immutable item record
pub type ItemRef = Arc<Item>;

/// Properties of an inspectable item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    /// Whether the item is brought to the viewing anchor and can be rotated
    pub grabbable: bool,
    /// Narration played when the item is examined
    pub audio_clip: ClipId,
    /// Caption shown while the narration plays
    pub text: String,
    /// Picture displayed while examining
    pub image: Option<SpriteId>,

    // Inventory
    pub inventory_eligible: bool,
    pub collect_message: String,
    pub icon: Option<SpriteId>,
}

impl Item {
    /// Items that close on their own once their narration is over
    pub fn is_text_only(&self) -> bool {
        self.image.is_none() && !self.grabbable
    }

    /// Identity comparison on the authored record
    pub fn same_record(&self, other: &Item) -> bool {
        self.id == other.id
    }
}

/// All authored items, keyed by id
#[derive(Debug, Default)]
pub struct ItemCatalog {
    items: AHashMap<ItemId, ItemRef>,
}

impl ItemCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an item. Ids must be unique.
    pub fn insert(&mut self, item: Item) -> Result<ItemRef> {
        if self.items.contains_key(&item.id) {
            return Err(CurioError::DuplicateId {
                kind: "item",
                id: item.id.0,
            });
        }
        let item = Arc::new(item);
        self.items.insert(item.id, Arc::clone(&item));
        Ok(item)
    }

    pub fn get(&self, id: ItemId) -> Option<&ItemRef> {
        self.items.get(&id)
    }

    /// Look up an item that must exist
    pub fn require(&self, id: ItemId) -> Result<ItemRef> {
        self.items
            .get(&id)
            .cloned()
            .ok_or(CurioError::ItemNotFound(id))
    }

    pub fn by_name(&self, name: &str) -> Option<&ItemRef> {
        self.items.values().find(|item| item.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ItemRef> {
        self.items.values()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    /// Plain text-only collectible; tests tweak the fields they care about
    pub fn item(id: u32, name: &str) -> Item {
        Item {
            id: ItemId(id),
            name: name.to_string(),
            grabbable: false,
            audio_clip: ClipId(id),
            text: format!("{name} caption"),
            image: None,
            inventory_eligible: false,
            collect_message: String::new(),
            icon: None,
        }
    }
}
