//! Interaction state machine.
//!
//! ```text
//! Idle -> BackgroundPressed -> Idle            (click may create an item)
//! Idle -> Dragging          -> Idle            (committed or reverted)
//! Idle -> Resizing(dir)     -> Idle
//! Idle -> Editing           -> Idle            (submit or blur)
//! ```
//!
//! Only one interaction runs at a time. Editing blocks drag and resize from
//! starting until the edit is submitted or cancelled.

use super::{DragSession, ResizeSession};
use crate::item::{ItemId, ItemPatch};

/// Inline name editing of one item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditSession {
    item_id: ItemId,
    draft: String,
}

impl EditSession {
    pub fn begin(item_id: ItemId, current_name: impl Into<String>) -> Self {
        Self {
            item_id,
            draft: current_name.into(),
        }
    }

    pub fn item_id(&self) -> ItemId {
        self.item_id
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn set_draft(&mut self, draft: impl Into<String>) {
        self.draft = draft.into();
    }

    pub fn submit(self) -> ItemPatch {
        ItemPatch::new(self.item_id).with_name(self.draft)
    }
}

/// What the pointer/keyboard is currently doing.
#[derive(Debug, Clone, Default)]
pub enum InteractionState {
    #[default]
    Idle,
    /// Pointer went down on the empty timeline; a click may follow.
    BackgroundPressed,
    Dragging(DragSession),
    Resizing(ResizeSession),
    Editing(EditSession),
}

impl InteractionState {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// Whether a drag or resize may begin now.
    pub fn accepts_pointer_gesture(&self) -> bool {
        matches!(self, Self::Idle | Self::BackgroundPressed)
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self, Self::Dragging(_))
    }

    pub fn is_resizing(&self) -> bool {
        matches!(self, Self::Resizing(_))
    }

    pub fn editing_item(&self) -> Option<ItemId> {
        match self {
            Self::Editing(session) => Some(session.item_id()),
            _ => None,
        }
    }

    /// Item targeted by the current gesture, if any.
    pub fn active_item(&self) -> Option<ItemId> {
        match self {
            Self::Dragging(session) => Some(session.item_id()),
            Self::Resizing(session) => Some(session.item_id()),
            Self::Editing(session) => Some(session.item_id()),
            Self::Idle | Self::BackgroundPressed => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::BackgroundPressed => "background_pressed",
            Self::Dragging(_) => "dragging",
            Self::Resizing(_) => "resizing",
            Self::Editing(_) => "editing",
        }
    }
}
