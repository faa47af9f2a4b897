//! Domain entities for project-board.
//!
//! This module contains the core business entities:
//! - Project: A card on the board and its status
//! - Drag and drop: The payload channel and handler traits for moving cards
//! - Validation: Range checks for form input

mod drag_drop;
mod project;
pub mod validation;

pub use drag_drop::{DataTransfer, DragEvent, Draggable, DropEffect, DropTarget, TEXT_PLAIN};
pub use project::{Project, ProjectId, ProjectStatus};
