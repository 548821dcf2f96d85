//! Workspace registry and content table files

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// List of known workspaces, most recent first
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkspaceRegistry {
    pub workspace_paths: Vec<PathBuf>,
}

impl WorkspaceRegistry {
    pub fn load(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)
            .with_context(|| format!("Failed to read workspace registry {}", path.display()))?;
        serde_json::from_str(&data)
            .with_context(|| format!("Invalid workspace registry {}", path.display()))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let data = serde_json::to_string_pretty(self)?;
        fs::write(path, data)
            .with_context(|| format!("Failed to write workspace registry {}", path.display()))
    }

    /// The workspace opened on startup
    pub fn primary(&self) -> Option<&Path> {
        self.workspace_paths.first().map(PathBuf::as_path)
    }
}

/// An entry of the sidebar's note tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentItem {
    pub name: String,
    pub filename: String,
    pub id: String,
    #[serde(default)]
    pub children: Vec<ContentItem>,
}

impl ContentItem {
    /// Depth-first search for the item with `id`
    pub fn find_mut(&mut self, id: &str) -> Option<&mut ContentItem> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter_mut().find_map(|child| child.find_mut(id))
    }
}

/// The `epiphany.json` content table at the workspace root
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkspaceContent {
    pub workspace_title: String,
    pub absolute_path: PathBuf,
    pub content_table: Vec<ContentItem>,
}

impl WorkspaceContent {
    pub fn load(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)
            .with_context(|| format!("Failed to read content table {}", path.display()))?;
        serde_json::from_str(&data)
            .with_context(|| format!("Invalid content table {}", path.display()))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let data = serde_json::to_string_pretty(self)?;
        fs::write(path, data)
            .with_context(|| format!("Failed to write content table {}", path.display()))
    }

    pub fn find_mut(&mut self, id: &str) -> Option<&mut ContentItem> {
        self.content_table
            .iter_mut()
            .find_map(|item| item.find_mut(id))
    }

    /// All items, depth first
    pub fn items(&self) -> Vec<&ContentItem> {
        fn walk<'a>(items: &'a [ContentItem], out: &mut Vec<&'a ContentItem>) {
            for item in items {
                out.push(item);
                walk(&item.children, out);
            }
        }
        let mut out = Vec::new();
        walk(&self.content_table, &mut out);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, children: Vec<ContentItem>) -> ContentItem {
        ContentItem {
            name: id.to_uppercase(),
            filename: format!("{}.md", id),
            id: id.to_string(),
            children,
        }
    }

    #[test]
    fn test_find_nested_item() {
        let mut content = WorkspaceContent {
            workspace_title: "notes".to_string(),
            absolute_path: PathBuf::from("/tmp/ws"),
            content_table: vec![item("a", vec![item("b", vec![item("c", vec![])])])],
        };
        content.find_mut("c").unwrap().name = "Renamed".to_string();

        let names: Vec<&str> = content.items().iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B", "Renamed"]);
        assert!(content.find_mut("zzz").is_none());
    }

    #[test]
    fn test_children_default_to_empty() {
        let item: ContentItem =
            serde_json::from_str(r#"{"name":"N","filename":"n.md","id":"1"}"#).unwrap();
        assert!(item.children.is_empty());
    }
}
