//! Slash menu item registry

use crate::doc::NodeKind;

/// What choosing an item does to the block holding the cursor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemAction {
    /// Turn the current textblock into another textblock type
    SetBlockType { kind: NodeKind, level: Option<u8> },
    /// Wrap the current textblock in a container block
    WrapIn(NodeKind),
    /// Insert a content-less block after the current block
    InsertBlock(NodeKind),
}

/// A slash menu entry
#[derive(Debug, Clone)]
pub struct SlashMenuItem {
    pub label: &'static str,
    pub aliases: &'static [&'static str],
    pub action: ItemAction,
}

impl SlashMenuItem {
    /// Case-insensitive match on the label or an alias prefix
    pub fn matches(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        query.is_empty()
            || self.label.to_lowercase().contains(&query)
            || self.aliases.iter().any(|alias| alias.starts_with(&query))
    }
}

/// All items, in menu order
pub static SLASH_MENU_ITEMS: &[SlashMenuItem] = &[
    SlashMenuItem {
        label: "Heading 1",
        aliases: &["h1", "title"],
        action: ItemAction::SetBlockType {
            kind: NodeKind::Heading,
            level: Some(1),
        },
    },
    SlashMenuItem {
        label: "Heading 2",
        aliases: &["h2", "subtitle"],
        action: ItemAction::SetBlockType {
            kind: NodeKind::Heading,
            level: Some(2),
        },
    },
    SlashMenuItem {
        label: "Heading 3",
        aliases: &["h3"],
        action: ItemAction::SetBlockType {
            kind: NodeKind::Heading,
            level: Some(3),
        },
    },
    SlashMenuItem {
        label: "Paragraph",
        aliases: &["p", "text"],
        action: ItemAction::SetBlockType {
            kind: NodeKind::Paragraph,
            level: None,
        },
    },
    SlashMenuItem {
        label: "Code Block",
        aliases: &["code", "pre"],
        action: ItemAction::SetBlockType {
            kind: NodeKind::CodeBlock,
            level: None,
        },
    },
    SlashMenuItem {
        label: "Quote",
        aliases: &["blockquote", ">"],
        action: ItemAction::WrapIn(NodeKind::Blockquote),
    },
    SlashMenuItem {
        label: "Equation",
        aliases: &["math", "latex"],
        action: ItemAction::InsertBlock(NodeKind::Equation),
    },
    SlashMenuItem {
        label: "Tags",
        aliases: &["tag", "labels"],
        action: ItemAction::InsertBlock(NodeKind::Tags),
    },
    SlashMenuItem {
        label: "Divider",
        aliases: &["hr", "rule", "---"],
        action: ItemAction::InsertBlock(NodeKind::HorizontalRule),
    },
];

/// Items matching `query`, in menu order
pub fn matching_items(query: &str) -> Vec<&'static SlashMenuItem> {
    SLASH_MENU_ITEMS
        .iter()
        .filter(|item| item.matches(query))
        .collect()
}
