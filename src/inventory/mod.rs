//! Inventory ledger
//!
//! Ordered, duplicate-free list of collected items. Insertion order is
//! display order. Adds notify the presentation incrementally (one slot),
//! removals trigger a full refresh.

use crate::core::types::ItemId;
use crate::items::{Item, ItemRef};
use crate::ui::Presentation;

#[derive(Debug, Default, Clone)]
pub struct Inventory {
    items: Vec<ItemRef>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `item` unless it is already held. Returns true if it was added.
    pub fn add_item<P: Presentation + ?Sized>(&mut self, item: &ItemRef, hud: &mut P) -> bool {
        if self.contains(item) {
            return false;
        }

        let index = self.items.len();
        hud.notify_inventory_slot(item, index);
        self.items.push(ItemRef::clone(item));
        tracing::info!("Collected '{}' into slot {}", item.name, index);
        true
    }

    /// Remove `item` if held. Returns true if it was removed.
    pub fn remove_item<P: Presentation + ?Sized>(&mut self, item: &Item, hud: &mut P) -> bool {
        let Some(index) = self.position(item.id) else {
            return false;
        };

        self.items.remove(index);
        hud.refresh_inventory(&self.items);
        tracing::info!("Removed '{}' from inventory", item.name);
        true
    }

    pub fn contains(&self, item: &Item) -> bool {
        self.position(item.id).is_some()
    }

    pub fn contains_id(&self, id: ItemId) -> bool {
        self.position(id).is_some()
    }

    fn position(&self, id: ItemId) -> Option<usize> {
        self.items.iter().position(|held| held.id == id)
    }

    /// Held items in display order
    pub fn items(&self) -> &[ItemRef] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
