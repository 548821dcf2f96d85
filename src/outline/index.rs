//! Heading extraction and indentation

use super::HeadingEntry;
use crate::config::OutlineConfig;
use crate::doc::Document;

/// Indentation heuristic: one step per level transition, however many
/// levels are skipped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndentRule {
    pub baseline_level: u8,
    pub step: i32,
}

impl Default for IndentRule {
    fn default() -> Self {
        Self {
            baseline_level: 2,
            step: 10,
        }
    }
}

impl From<&OutlineConfig> for IndentRule {
    fn from(config: &OutlineConfig) -> Self {
        Self {
            baseline_level: config.baseline_level,
            step: config.indent_step,
        }
    }
}

impl IndentRule {
    /// Indentation for each level of `levels`, in order
    pub fn indentations(&self, levels: impl IntoIterator<Item = u8>) -> Vec<i32> {
        let mut indentation = 0;
        let mut current_level = self.baseline_level;
        levels
            .into_iter()
            .map(|level| {
                if level > current_level {
                    indentation += self.step;
                    current_level = level;
                } else if level < current_level {
                    indentation -= self.step;
                    current_level = level;
                }
                indentation
            })
            .collect()
    }
}

/// Collect the top-level headings of `doc` in document order
pub fn index_headings(doc: &Document, rule: IndentRule) -> Vec<HeadingEntry> {
    let mut entries = Vec::new();
    doc.for_each_child(|node, offset, _| {
        if node.is_heading() {
            entries.push(HeadingEntry {
                position: offset,
                level: node.level(),
                id: node.attrs.id.clone().unwrap_or_default(),
                text: node.text_content(),
                indentation: 0,
            });
        }
        true
    });

    let indentations = rule.indentations(entries.iter().map(|entry| entry.level));
    for (entry, indentation) in entries.iter_mut().zip(indentations) {
        entry.indentation = indentation;
    }
    entries
}
