//! Tauri Command Modules
//!
//! This module serves as the central hub for all Tauri IPC commands.
//! Commands are organized into logical groups:
//!
//! # Module Organization
//!
//! - **dialog**: Native OS file dialogs (open file picker)
//! - **file_io**: CSV loading, metadata extraction, closing
//! - **dashboard**: Dashboard aggregates and brand candidate extraction
//! - **chat**: CSV chatbot backed by the free-text reasoning mode
//! - **selection**: Best-frame finder backed by the structured reasoning mode
//! - **settings**: Reasoning-service credential and active tab
//!
//! # How Commands Work
//!
//! Each command is a function decorated with `#[tauri::command]`.
//! The frontend calls these via `invoke("command_name", { args })`.
//! Return values are automatically serialized to JSON.
//!
//! # Re-exports
//!
//! All commands are re-exported at the module level for convenience.
//! This allows `lib.rs` to import all commands with `use commands::*;`

pub mod chat;
pub mod dashboard;
pub mod dialog;
pub mod file_io;
pub mod selection;
pub mod settings;

// Re-export all commands for easy access in lib.rs
pub use chat::*;
pub use dashboard::*;
pub use dialog::*;
pub use file_io::*;
pub use selection::*;
pub use settings::*;
