//! Curio - First-person item inspection engine
//!
//! Detects what the player is looking at, runs the free-look / examining
//! state machine, animates objects to and from the viewing anchor, and
//! hands collected items to the inventory.

pub mod audio;
pub mod core;
pub mod interaction;
pub mod inventory;
pub mod items;
pub mod ui;
pub mod world;
