//! Epiphany - note editor core
//!
//! This crate provides the headless core of a rich-text note editor built on
//! the Elm Architecture pattern: a heading outline kept in sync with the
//! document, a slash command menu, debounced background work and Markdown
//! note workspaces.

pub mod cli;
pub mod commands;
pub mod config;
pub mod config_paths;
pub mod debounce;
pub mod doc;
pub mod input;
pub mod messages;
pub mod model;
pub mod outline;
pub mod replay;
pub mod runtime;
pub mod slash_menu;
pub mod tracing;
pub mod update;
pub mod workspace;

// Re-export commonly used types
pub use commands::Cmd;
pub use config::EditorConfig;
pub use messages::Msg;
pub use model::AppModel;
