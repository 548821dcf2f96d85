//! Note workspaces on disk
//!
//! A workspace is a folder holding `notes/`, `assets/` and an
//! `epiphany.json` content table. Known workspaces are listed in a registry
//! file in the config directory; the first entry is opened on startup.

mod content;
mod notes;

pub use content::{ContentItem, WorkspaceContent, WorkspaceRegistry};
pub use notes::{
    note_filename, note_title, slugify, target_filename, MAX_NAME_SUFFIX, UNNAMED_NOTE,
};

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use uuid::Uuid;

pub const CONTENT_TABLE_FILE: &str = "epiphany.json";
pub const NOTES_DIR: &str = "notes";
pub const ASSETS_DIR: &str = "assets";

const WELCOME_TITLE: &str = "Welcome to Epiphany";
const WELCOME_NOTE: &str = include_str!("../../assets/welcome.md");
const EMPTY_NOTE: &str = include_str!("../../assets/empty.md");

/// Fresh id for a note
pub fn new_note_id() -> String {
    Uuid::new_v4().simple().to_string()
}

/// An opened workspace folder
#[derive(Debug, Clone)]
pub struct Workspace {
    root: PathBuf,
    content: Option<WorkspaceContent>,
}

impl Workspace {
    pub fn open(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            content: None,
        }
    }

    /// Register `path` as the only workspace and populate it
    pub fn first_time_setup(registry_file: &Path, path: &Path) -> Result<(Self, WorkspaceContent)> {
        tracing::info!(path = %path.display(), "setting up workspace");

        WorkspaceRegistry {
            workspace_paths: vec![path.to_path_buf()],
        }
        .save(registry_file)?;

        let mut workspace = Self::open(path);
        for dir in [workspace.root.clone(), workspace.assets_dir(), workspace.notes_dir()] {
            fs::create_dir_all(&dir)
                .with_context(|| format!("Failed to create {}", dir.display()))?;
        }

        let welcome = note_filename(&slugify(WELCOME_TITLE));
        let welcome_path = workspace.notes_dir().join(&welcome);
        fs::write(&welcome_path, WELCOME_NOTE)
            .with_context(|| format!("Failed to write {}", welcome_path.display()))?;

        let content = WorkspaceContent {
            workspace_title: NOTES_DIR.to_string(),
            absolute_path: path.to_path_buf(),
            content_table: vec![ContentItem {
                name: WELCOME_TITLE.to_string(),
                filename: welcome,
                id: new_note_id(),
                children: Vec::new(),
            }],
        };
        content.save(&workspace.content_table_file())?;
        workspace.content = Some(content.clone());

        Ok((workspace, content))
    }

    /// Open the first registered workspace and read its content table
    pub fn load(registry_file: &Path) -> Result<(Self, WorkspaceContent)> {
        if !registry_file.exists() {
            bail!("Not configured: {} does not exist", registry_file.display());
        }
        let registry = WorkspaceRegistry::load(registry_file)?;
        let Some(root) = registry.primary() else {
            bail!("No workspace directories in {}", registry_file.display());
        };

        let mut workspace = Self::open(root);
        let content = WorkspaceContent::load(&workspace.content_table_file())?;
        workspace.content = Some(content.clone());
        tracing::info!(path = %root.display(), notes = content.items().len(), "workspace loaded");
        Ok((workspace, content))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn notes_dir(&self) -> PathBuf {
        self.root.join(NOTES_DIR)
    }

    pub fn assets_dir(&self) -> PathBuf {
        self.root.join(ASSETS_DIR)
    }

    pub fn content_table_file(&self) -> PathBuf {
        self.root.join(CONTENT_TABLE_FILE)
    }

    /// Content table as last loaded or written
    pub fn content(&self) -> Option<&WorkspaceContent> {
        self.content.as_ref()
    }

    /// Write the empty-note template as `notes/<id>.md`, returning the filename
    pub fn create_note(&self, id: &str) -> Result<String> {
        let filename = note_filename(id);
        let path = self.notes_dir().join(&filename);
        fs::write(&path, EMPTY_NOTE)
            .with_context(|| format!("Failed to create note {}", path.display()))?;
        tracing::debug!(%filename, "note created");
        Ok(filename)
    }

    pub fn load_note(&self, filename: &str) -> Result<String> {
        let path = self.notes_dir().join(filename);
        fs::read_to_string(&path).with_context(|| format!("Failed to read note {}", path.display()))
    }

    /// Replace the content table on disk
    pub fn update_content(&mut self, content: &WorkspaceContent) -> Result<()> {
        content.save(&self.content_table_file())?;
        self.content = Some(content.clone());
        Ok(())
    }

    /// Save a note, renaming its file after its title; returns the final filename
    pub fn save_note(
        &self,
        id: &str,
        title: &str,
        current_filename: &str,
        content: &str,
    ) -> Result<String> {
        let notes_dir = self.notes_dir();
        let filename = target_filename(id, title, current_filename, |name| {
            notes_dir.join(name).exists()
        });

        if filename != current_filename {
            let from = notes_dir.join(current_filename);
            let to = notes_dir.join(&filename);
            if from.exists() {
                fs::rename(&from, &to).with_context(|| {
                    format!("Failed to rename {} to {}", from.display(), to.display())
                })?;
                tracing::debug!(from = current_filename, to = %filename, "note renamed");
            }
        }

        let path = notes_dir.join(&filename);
        fs::write(&path, content).with_context(|| format!("Failed to write note {}", path.display()))?;
        Ok(filename)
    }
}
