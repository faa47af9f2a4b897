//! UI components for project-board.
//!
//! This module contains:
//! - layout: Board, form and help rendering
//! - input: Keyboard input handling
//! - widgets: Project cards, columns, the form and help

pub mod input;
pub mod layout;
pub mod widgets;
