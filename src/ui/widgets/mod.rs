//! Reusable UI widgets for project-board.

pub mod help;
pub mod project_form;
pub mod project_item;
pub mod project_list;
pub mod text_input;
