//! Examination session state and outward notifications

use crate::core::timer::TimerHandle;
use crate::core::types::{InteractableId, ItemId, Pose, SessionId};
use crate::items::ItemRef;
use serde::Serialize;

/// Lifecycle notifications broadcast by the controller
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum InteractionEvent {
    /// The player used an interactable (fires even when it has no item)
    Interacted { interactable: InteractableId },
    /// Examination started
    BeginView {
        interactable: InteractableId,
        item: ItemId,
    },
    /// A substitution rule swapped the interactable's item
    Substituted {
        interactable: InteractableId,
        rule: String,
        required: ItemId,
        replacement: ItemId,
    },
    /// The examined item went into the inventory
    ItemCollected {
        interactable: InteractableId,
        item: ItemId,
    },
    /// Examination ended
    FinishView { interactable: InteractableId },
}

/// Deferred callbacks owned by the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionTimer {
    /// Unlock finishing for the given session
    CanFinish(SessionId),
}

/// State held while an item is being examined
#[derive(Debug, Clone)]
pub struct Session {
    pub id: SessionId,
    pub interactable: InteractableId,
    /// The item actually examined (the replacement, if a rule fired)
    pub item: ItemRef,
    /// Pose to restore on finish; only captured for grabbable items
    pub origin: Option<Pose>,
    /// Set once the narration plus grace period has elapsed
    pub can_finish: bool,
    pub(crate) unlock_timer: Option<TimerHandle>,
}

#[derive(Debug, Clone, Default)]
pub enum InteractionState {
    #[default]
    Idle,
    Viewing(Session),
}

impl InteractionState {
    pub fn is_viewing(&self) -> bool {
        matches!(self, InteractionState::Viewing(_))
    }

    pub fn session(&self) -> Option<&Session> {
        match self {
            InteractionState::Idle => None,
            InteractionState::Viewing(session) => Some(session),
        }
    }
}
