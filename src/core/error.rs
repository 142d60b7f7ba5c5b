use crate::core::types::{ClipId, InteractableId, ItemId};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CurioError {
    #[error("Item not found: {0:?}")]
    ItemNotFound(ItemId),

    #[error("Audio clip not found: {0:?}")]
    ClipNotFound(ClipId),

    #[error("Duplicate {kind} id {id}")]
    DuplicateId { kind: &'static str, id: u32 },

    #[error("Interactable {0:?} already had its item substituted")]
    AlreadyResolved(InteractableId),

    #[error("Interactable {0:?} has no item to substitute")]
    NoItemBound(InteractableId),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlError(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, CurioError>;
