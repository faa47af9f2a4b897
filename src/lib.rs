//! project-board: terminal project board
//!
//! Projects live in a single observable store. Two columns, active and
//! finished, subscribe to it and re-render on every change; cards move
//! between them through a drag-and-drop protocol.

pub mod app;
pub mod config;
pub mod domain;
pub mod error;
pub mod services;
pub mod ui;

pub use app::App;
pub use config::BoardConfig;
pub use error::{AppError, Result};
