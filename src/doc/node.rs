//! Document tree nodes
//!
//! Sizes follow the usual tree-editor position scheme: text counts one
//! position per character, leaf blocks count 1, every other node counts its
//! content plus an opening and closing token.

use uuid::Uuid;

/// Node type tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Doc,
    Heading,
    Paragraph,
    CodeBlock,
    Blockquote,
    Tags,
    Equation,
    HorizontalRule,
    Text,
}

impl NodeKind {
    /// Schema name of the node type
    pub fn name(&self) -> &'static str {
        match self {
            NodeKind::Doc => "doc",
            NodeKind::Heading => "heading",
            NodeKind::Paragraph => "paragraph",
            NodeKind::CodeBlock => "code_block",
            NodeKind::Blockquote => "blockquote",
            NodeKind::Tags => "tags",
            NodeKind::Equation => "equation",
            NodeKind::HorizontalRule => "horizontal_rule",
            NodeKind::Text => "text",
        }
    }

    /// Blocks whose content is inline text
    pub fn is_textblock(&self) -> bool {
        matches!(
            self,
            NodeKind::Heading | NodeKind::Paragraph | NodeKind::CodeBlock
        )
    }

    /// Blocks without any content
    pub fn is_leaf(&self) -> bool {
        matches!(
            self,
            NodeKind::Tags | NodeKind::Equation | NodeKind::HorizontalRule
        )
    }
}

/// Node attributes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attrs {
    /// Heading level (1-6)
    pub level: Option<u8>,
    /// Stable identifier, assigned when a heading is created
    pub id: Option<String>,
    /// Code block language
    pub language: Option<String>,
}

/// A node in the document tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub kind: NodeKind,
    pub attrs: Attrs,
    pub children: Vec<Node>,
    /// Only set for text nodes
    pub text: Option<String>,
}

/// Generate a fresh stable id for a heading
pub fn fresh_heading_id() -> String {
    format!("h_{}", Uuid::new_v4().simple())
}

impl Node {
    fn block(kind: NodeKind, attrs: Attrs, text: &str) -> Self {
        let children = if text.is_empty() {
            Vec::new()
        } else {
            vec![Node::text(text)]
        };
        Self {
            kind,
            attrs,
            children,
            text: None,
        }
    }

    /// A text node
    pub fn text(text: &str) -> Self {
        Self {
            kind: NodeKind::Text,
            attrs: Attrs::default(),
            children: Vec::new(),
            text: Some(text.to_string()),
        }
    }

    /// A heading with a freshly generated id
    pub fn heading(level: u8, text: &str) -> Self {
        Self::heading_with_id(level, &fresh_heading_id(), text)
    }

    pub fn heading_with_id(level: u8, id: &str, text: &str) -> Self {
        let attrs = Attrs {
            level: Some(level),
            id: Some(id.to_string()),
            ..Attrs::default()
        };
        Self::block(NodeKind::Heading, attrs, text)
    }

    pub fn paragraph(text: &str) -> Self {
        Self::block(NodeKind::Paragraph, Attrs::default(), text)
    }

    pub fn code_block(language: Option<&str>, text: &str) -> Self {
        let attrs = Attrs {
            language: language.map(str::to_string),
            ..Attrs::default()
        };
        Self::block(NodeKind::CodeBlock, attrs, text)
    }

    pub fn blockquote(children: Vec<Node>) -> Self {
        Self {
            kind: NodeKind::Blockquote,
            attrs: Attrs::default(),
            children,
            text: None,
        }
    }

    /// A content-less block (tags, equation, horizontal rule)
    pub fn leaf(kind: NodeKind) -> Self {
        Self {
            kind,
            attrs: Attrs::default(),
            children: Vec::new(),
            text: None,
        }
    }

    pub fn is_heading(&self) -> bool {
        self.kind == NodeKind::Heading
    }

    pub fn is_text(&self) -> bool {
        self.kind == NodeKind::Text
    }

    pub fn is_textblock(&self) -> bool {
        self.kind.is_textblock()
    }

    /// Heading level, or 0 for nodes without one
    pub fn level(&self) -> u8 {
        self.attrs.level.unwrap_or(0)
    }

    /// Size of the node's content
    pub fn content_size(&self) -> usize {
        self.children.iter().map(Node::node_size).sum()
    }

    /// Size of the node in positions
    pub fn node_size(&self) -> usize {
        match self.kind {
            NodeKind::Text => self.text.as_deref().map_or(0, |t| t.chars().count()),
            kind if kind.is_leaf() => 1,
            _ => self.content_size() + 2,
        }
    }

    /// Concatenated text of all descendant text nodes
    pub fn text_content(&self) -> String {
        if let Some(text) = &self.text {
            return text.clone();
        }
        let mut out = String::new();
        for child in &self.children {
            out.push_str(&child.text_content());
        }
        out
    }

    /// Call `f(child, offset, index)` for each direct child
    ///
    /// `offset` is relative to the start of this node's content.
    /// Returning `false` stops the iteration.
    pub fn for_each_child<'a, F>(&'a self, mut f: F)
    where
        F: FnMut(&'a Node, usize, usize) -> bool,
    {
        let mut offset = 0;
        for (index, child) in self.children.iter().enumerate() {
            if !f(child, offset, index) {
                break;
            }
            offset += child.node_size();
        }
    }

    /// Replace a textblock's text, keeping a single text child
    pub(crate) fn set_inline_text(&mut self, text: String) {
        self.children.clear();
        if !text.is_empty() {
            self.children.push(Node::text(&text));
        }
    }
}
