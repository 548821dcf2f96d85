//! Note text <-> document conversion
//!
//! Notes are stored as Markdown. Heading ids survive a save/load cycle via
//! the `{#id}` heading attribute; leaf blocks without a Markdown form are
//! written as marker comments.

use pulldown_cmark::{CodeBlockKind, Event, HeadingLevel, Options, Parser, Tag, TagEnd};

use super::{Document, Node, NodeKind};

const TAGS_MARKER: &str = "<!-- tags -->";
const EQUATION_MARKER: &str = "<!-- equation -->";

fn heading_level(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

struct Builder {
    /// Open containers; the first entry is the document itself
    stack: Vec<Vec<Node>>,
    inline: Option<Node>,
    text: String,
}

impl Builder {
    fn push(&mut self, node: Node) {
        if let Some(container) = self.stack.last_mut() {
            container.push(node);
        }
    }

    fn open(&mut self, node: Node) {
        self.flush();
        self.inline = Some(node);
    }

    fn flush(&mut self) {
        if let Some(mut node) = self.inline.take() {
            let text = if node.kind == NodeKind::CodeBlock {
                self.text.trim_end_matches('\n').to_string()
            } else {
                self.text.trim().to_string()
            };
            node.set_inline_text(text);
            self.push(node);
        }
        self.text.clear();
    }
}

/// Parse note text into a document
pub fn parse_markdown(source: &str) -> Document {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_HEADING_ATTRIBUTES);

    let mut builder = Builder {
        stack: vec![Vec::new()],
        inline: None,
        text: String::new(),
    };

    for event in Parser::new_ext(source, options) {
        match event {
            Event::Start(Tag::Heading { level, id, .. }) => {
                let level = heading_level(level);
                let node = match id {
                    Some(id) => Node::heading_with_id(level, &id, ""),
                    None => Node::heading(level, ""),
                };
                builder.open(node);
            }
            Event::Start(Tag::Paragraph) => {
                if builder.inline.is_none() {
                    builder.open(Node::paragraph(""));
                }
            }
            Event::Start(Tag::Item) => {
                builder.open(Node::paragraph(""));
                builder.text.push_str("- ");
            }
            Event::Start(Tag::CodeBlock(kind)) => {
                let language = match kind {
                    CodeBlockKind::Fenced(lang) if !lang.is_empty() => Some(lang.to_string()),
                    _ => None,
                };
                builder.open(Node::code_block(language.as_deref(), ""));
            }
            Event::Start(Tag::BlockQuote(_)) => {
                builder.flush();
                builder.stack.push(Vec::new());
            }
            Event::End(TagEnd::BlockQuote(_)) => {
                builder.flush();
                if builder.stack.len() > 1 {
                    let children = builder.stack.pop().unwrap_or_default();
                    builder.push(Node::blockquote(children));
                }
            }
            Event::End(TagEnd::Heading(_))
            | Event::End(TagEnd::Paragraph)
            | Event::End(TagEnd::CodeBlock)
            | Event::End(TagEnd::Item) => builder.flush(),
            Event::Text(text) | Event::Code(text) => {
                if builder.inline.is_some() {
                    builder.text.push_str(&text);
                }
            }
            Event::SoftBreak | Event::HardBreak => builder.text.push(' '),
            Event::Rule => {
                builder.flush();
                builder.push(Node::leaf(NodeKind::HorizontalRule));
            }
            Event::Html(html) => match html.trim() {
                TAGS_MARKER => builder.push(Node::leaf(NodeKind::Tags)),
                EQUATION_MARKER => builder.push(Node::leaf(NodeKind::Equation)),
                _ => {}
            },
            _ => {}
        }
    }
    builder.flush();

    let blocks = builder.stack.into_iter().next().unwrap_or_default();
    if blocks.is_empty() {
        Document::default()
    } else {
        Document::new(blocks)
    }
}

/// Backslash-escape text so it reloads as the same plain text
fn escape_inline(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        if matches!(
            ch,
            '\\' | '`' | '*' | '_' | '[' | ']' | '<' | '>' | '#' | '!' | '|' | '{' | '}' | '~' | '&'
        ) {
            out.push('\\');
        }
        out.push(ch);
    }

    // List and rule markers only count at the start of a line
    if out.starts_with(&['-', '+', '='][..]) {
        out.insert(0, '\\');
    }
    let digits = out.chars().take_while(char::is_ascii_digit).count();
    if digits > 0 && out[digits..].starts_with(&['.', ')'][..]) {
        out.insert(digits, '\\');
    }
    out
}

fn write_block(node: &Node, out: &mut Vec<String>) {
    match node.kind {
        NodeKind::Heading => {
            let mut line = format!(
                "{} {}",
                "#".repeat(node.level().max(1) as usize),
                escape_inline(&node.text_content())
            );
            if let Some(id) = &node.attrs.id {
                line.push_str(&format!(" {{#{}}}", id));
            }
            out.push(line);
        }
        NodeKind::Paragraph => out.push(escape_inline(&node.text_content())),
        NodeKind::CodeBlock => out.push(format!(
            "```{}\n{}\n```",
            node.attrs.language.as_deref().unwrap_or(""),
            node.text_content()
        )),
        NodeKind::Blockquote => {
            let mut inner = Vec::new();
            for child in &node.children {
                write_block(child, &mut inner);
            }
            let quoted = inner
                .join("\n\n")
                .lines()
                .map(|line| if line.is_empty() { ">".to_string() } else { format!("> {}", line) })
                .collect::<Vec<_>>()
                .join("\n");
            out.push(quoted);
        }
        NodeKind::Tags => out.push(TAGS_MARKER.to_string()),
        NodeKind::Equation => out.push(EQUATION_MARKER.to_string()),
        NodeKind::HorizontalRule => out.push("---".to_string()),
        NodeKind::Doc | NodeKind::Text => {}
    }
}

/// Serialize a document back to note text
pub fn to_markdown(doc: &Document) -> String {
    let mut blocks = Vec::new();
    for block in doc.blocks() {
        write_block(block, &mut blocks);
    }
    let mut out = blocks.join("\n\n");
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_headings_and_paragraphs() {
        let doc = parse_markdown("# Title {#t1}\n\nSome text\nwrapped\n\n## Part\n");
        let blocks = doc.blocks();
        assert_eq!(blocks.len(), 3);
        assert!(blocks[0].is_heading());
        assert_eq!(blocks[0].attrs.id.as_deref(), Some("t1"));
        assert_eq!(blocks[0].text_content(), "Title");
        assert_eq!(blocks[1].text_content(), "Some text wrapped");
        assert_eq!(blocks[2].level(), 2);
        assert!(blocks[2].attrs.id.is_some());
    }

    #[test]
    fn test_parse_code_quote_rule_and_markers() {
        let doc = parse_markdown(
            "```rust\nfn main() {}\n```\n\n> quoted\n\n---\n\n<!-- tags -->\n",
        );
        let kinds: Vec<NodeKind> = doc.blocks().iter().map(|b| b.kind).collect();
        assert_eq!(
            kinds,
            vec![
                NodeKind::CodeBlock,
                NodeKind::Blockquote,
                NodeKind::HorizontalRule,
                NodeKind::Tags
            ]
        );
        assert_eq!(doc.blocks()[0].text_content(), "fn main() {}");
        assert_eq!(doc.blocks()[0].attrs.language.as_deref(), Some("rust"));
        assert_eq!(doc.blocks()[1].children[0].text_content(), "quoted");
    }

    #[test]
    fn test_list_items_become_paragraphs() {
        let doc = parse_markdown("- one\n- two\n");
        let texts: Vec<String> = doc.blocks().iter().map(Node::text_content).collect();
        assert_eq!(texts, vec!["- one", "- two"]);
    }

    #[test]
    fn test_empty_source_gives_empty_paragraph() {
        let doc = parse_markdown("");
        assert_eq!(doc, Document::default());
    }

    #[test]
    fn test_block_markers_in_text_survive_save_and_load() {
        let doc = Document::new(vec![
            Node::heading_with_id(1, "h", "C# {#x} notes"),
            Node::paragraph("# not a heading"),
            Node::paragraph("1. item"),
            Node::paragraph("- dash"),
            Node::paragraph("> quote"),
            Node::paragraph("```fence"),
            Node::paragraph("*stars* and a_b \\ c"),
            Node::paragraph("<!-- tags -->"),
            Node::paragraph("---"),
        ]);
        let saved = to_markdown(&doc);
        assert!(saved.contains("1\\. item"));
        assert_eq!(parse_markdown(&saved), doc);
    }

    #[test]
    fn test_heading_ids_survive_save_and_load() {
        let doc = Document::new(vec![
            Node::heading_with_id(2, "keep-me", "Section"),
            Node::paragraph("text"),
        ]);
        let reloaded = parse_markdown(&to_markdown(&doc));
        assert_eq!(reloaded, doc);
    }
}
