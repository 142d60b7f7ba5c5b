//! Presentation collaborator
//!
//! The engine never touches widgets directly. It pushes outward
//! notifications through [`Presentation`], which a frontend implements.

pub mod state;

pub use state::{HudCall, HudState, InventorySlot};

use crate::core::types::SpriteId;
use crate::items::{Item, ItemRef};

/// Outward presentation calls made by the detector, controller, and inventory
pub trait Presentation {
    /// Show or hide the "can interact" hand cursor
    fn set_hover_cursor(&mut self, visible: bool);

    /// Replace the caption text (empty string clears it)
    fn set_caption_text(&mut self, text: &str);

    /// Show an item picture, or hide it with `None`
    fn set_item_image(&mut self, image: Option<SpriteId>);

    /// Show or hide the "back" affordance. Hiding it also hides the item picture.
    fn set_back_affordance(&mut self, visible: bool);

    /// A new item landed in inventory slot `index`
    fn notify_inventory_slot(&mut self, item: &Item, index: usize);

    /// The inventory changed shape; redraw every slot from `items`
    fn refresh_inventory(&mut self, items: &[ItemRef]);
}
