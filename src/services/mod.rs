//! State services for project-board.
//!
//! This module contains:
//! - Observable: Ordered listener list with subscribe/publish
//! - ProjectStore: The authoritative project list

pub mod observable;
mod project_store;

pub use observable::{Listener, Observable};
pub use project_store::ProjectStore;
