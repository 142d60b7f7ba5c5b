//! Headless HUD state
//!
//! Mirrors what an on-screen HUD would show and keeps a log of every
//! presentation call, so the shell can print it and tests can assert on it.

use super::Presentation;
use crate::core::types::{ItemId, SpriteId};
use crate::items::{Item, ItemRef};
use std::collections::VecDeque;

/// Maximum collect messages to keep
const MAX_TOASTS: usize = 8;

/// A presentation call as it was received
#[derive(Debug, Clone, PartialEq)]
pub enum HudCall {
    HoverCursor(bool),
    Caption(String),
    Image(Option<SpriteId>),
    BackAffordance(bool),
    InventorySlot { item: ItemId, index: usize },
    InventoryRefresh(Vec<ItemId>),
}

/// One drawn inventory slot
#[derive(Debug, Clone, PartialEq)]
pub struct InventorySlot {
    pub item: ItemId,
    pub name: String,
    pub icon: Option<SpriteId>,
}

impl InventorySlot {
    fn from_item(item: &Item) -> Self {
        Self {
            item: item.id,
            name: item.name.clone(),
            icon: item.icon,
        }
    }
}

/// HUD state
#[derive(Debug, Default)]
pub struct HudState {
    /// Whether the hand cursor is showing
    pub hand_cursor: bool,
    /// Current caption line
    pub caption: String,
    /// Picture of the item being examined
    pub image: Option<SpriteId>,
    /// Whether the "back" prompt is showing
    pub back_visible: bool,
    /// Inventory slots in display order
    pub slots: Vec<InventorySlot>,
    /// Recent collect messages, oldest first
    pub toasts: VecDeque<String>,
    calls: Vec<HudCall>,
}

impl HudState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call received so far, oldest first
    pub fn calls(&self) -> &[HudCall] {
        &self.calls
    }

    /// Forget recorded calls (state is kept)
    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }

    fn toast(&mut self, message: &str) {
        if message.is_empty() {
            return;
        }
        if self.toasts.len() >= MAX_TOASTS {
            self.toasts.pop_front();
        }
        self.toasts.push_back(message.to_string());
    }
}

impl Presentation for HudState {
    fn set_hover_cursor(&mut self, visible: bool) {
        self.hand_cursor = visible;
        self.calls.push(HudCall::HoverCursor(visible));
    }

    fn set_caption_text(&mut self, text: &str) {
        self.caption = text.to_string();
        self.calls.push(HudCall::Caption(text.to_string()));
    }

    fn set_item_image(&mut self, image: Option<SpriteId>) {
        self.image = image;
        self.calls.push(HudCall::Image(image));
    }

    fn set_back_affordance(&mut self, visible: bool) {
        self.back_visible = visible;
        if !visible {
            self.image = None;
        }
        self.calls.push(HudCall::BackAffordance(visible));
    }

    fn notify_inventory_slot(&mut self, item: &Item, index: usize) {
        let slot = InventorySlot::from_item(item);
        if index < self.slots.len() {
            self.slots[index] = slot;
        } else {
            self.slots.push(slot);
        }
        self.toast(&item.collect_message);
        self.calls.push(HudCall::InventorySlot {
            item: item.id,
            index,
        });
    }

    fn refresh_inventory(&mut self, items: &[ItemRef]) {
        self.slots = items.iter().map(|item| InventorySlot::from_item(item)).collect();
        self.calls
            .push(HudCall::InventoryRefresh(items.iter().map(|item| item.id).collect()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::fixtures::item;
    use std::sync::Arc;

    #[test]
    fn test_hiding_back_hides_image() {
        let mut hud = HudState::new();
        hud.set_item_image(Some(SpriteId(7)));
        hud.set_back_affordance(true);
        assert_eq!(hud.image, Some(SpriteId(7)));

        hud.set_back_affordance(false);
        assert!(!hud.back_visible);
        assert_eq!(hud.image, None);
    }

    #[test]
    fn test_slot_notification_fills_slot_and_toasts() {
        let mut hud = HudState::new();
        let mut key = item(1, "key");
        key.collect_message = "Picked up a key".to_string();
        key.icon = Some(SpriteId(11));

        hud.notify_inventory_slot(&key, 0);

        assert_eq!(hud.slots.len(), 1);
        assert_eq!(hud.slots[0].icon, Some(SpriteId(11)));
        assert_eq!(hud.toasts.back().map(String::as_str), Some("Picked up a key"));
        assert_eq!(
            hud.calls(),
            &[HudCall::InventorySlot {
                item: ItemId(1),
                index: 0
            }]
        );
    }

    #[test]
    fn test_refresh_replaces_all_slots() {
        let mut hud = HudState::new();
        hud.notify_inventory_slot(&item(1, "a"), 0);
        hud.notify_inventory_slot(&item(2, "b"), 1);

        hud.refresh_inventory(&[Arc::new(item(2, "b"))]);

        assert_eq!(hud.slots.len(), 1);
        assert_eq!(hud.slots[0].item, ItemId(2));
    }

    #[test]
    fn test_toasts_are_bounded() {
        let mut hud = HudState::new();
        for id in 0..(MAX_TOASTS as u32 + 3) {
            let mut it = item(id, "note");
            it.collect_message = format!("note {id}");
            hud.notify_inventory_slot(&it, id as usize);
        }
        assert_eq!(hud.toasts.len(), MAX_TOASTS);
        assert_eq!(hud.toasts.front().map(String::as_str), Some("note 3"));
    }
}
