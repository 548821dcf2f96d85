//! Command-line argument parsing
//!
//! Supports:
//! - Printing a note's outline
//! - Replaying a keystroke script against a note
//! - Setting up and inspecting workspaces
//! - Showing and saving the configuration

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Note editor core
#[derive(Parser, Debug)]
#[command(name = "epiphany", version, about = "Outline-synced note editor core")]
pub struct CliArgs {
    /// Workspace registry file (defaults to the config directory)
    #[arg(long, global = true, value_name = "FILE")]
    pub registry: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the outline of a note
    Outline {
        /// Markdown note to read
        note: PathBuf,
    },

    /// Run a keystroke script against a note and print the result
    Replay {
        /// Markdown note to start from
        note: PathBuf,

        /// Script with one directive per line
        #[arg(short, long, value_name = "FILE")]
        script: PathBuf,

        /// Write the edited note back
        #[arg(long)]
        write: bool,
    },

    /// Manage note workspaces
    #[command(subcommand)]
    Workspace(WorkspaceCommand),

    /// Print the effective configuration as YAML
    Config {
        /// Also write it to the config file
        #[arg(long)]
        save: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum WorkspaceCommand {
    /// Create a workspace and register it as the only one
    Init {
        /// Folder to set up
        path: PathBuf,
    },
    /// Print the content table of the registered workspace
    Show,
    /// Create an empty note and add it to the content table
    New,
    /// Print a note from the registered workspace
    Open {
        /// Filename inside `notes/`
        filename: String,
    },
    /// Save a note, renaming its file after its title
    Save {
        /// Note id from the content table
        id: String,
        /// Markdown file with the new content
        #[arg(long, value_name = "FILE")]
        from: PathBuf,
    },
}
