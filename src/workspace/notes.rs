//! Note file naming

use crate::doc::Document;

/// Title of a note that has not been named yet
pub const UNNAMED_NOTE: &str = "Unnamed Note";

/// Numbered suffixes tried before falling back to the note id
pub const MAX_NAME_SUFFIX: u32 = 25;

pub const NOTE_EXTENSION: &str = "md";

/// Lowercase ASCII slug with `_` between words, transliterating other scripts
pub fn slugify(title: &str) -> String {
    ::slugify::slugify(title, "", "_", None)
}

/// A note's title: the text of its first heading
pub fn note_title(doc: &Document) -> String {
    doc.blocks()
        .iter()
        .find(|block| block.is_heading())
        .map(|heading| heading.text_content().trim().to_string())
        .filter(|title| !title.is_empty())
        .unwrap_or_else(|| UNNAMED_NOTE.to_string())
}

pub fn note_filename(stem: &str) -> String {
    format!("{}.{}", stem, NOTE_EXTENSION)
}

/// Filename a note should be saved under
///
/// `exists` reports whether a filename is taken in the notes directory.
/// A note still named after its id gets a title-based name on first save,
/// with a numbered suffix on collision. Later saves follow title changes only
/// when the new name is free.
pub fn target_filename<F>(id: &str, title: &str, current_filename: &str, exists: F) -> String
where
    F: Fn(&str) -> bool,
{
    let slug = match slugify(title) {
        s if s.is_empty() => id.to_string(),
        s => s,
    };
    let candidate = note_filename(&slug);

    let first_save = title != UNNAMED_NOTE && current_filename == note_filename(id);
    if !first_save {
        if candidate != current_filename && !exists(&candidate) {
            return candidate;
        }
        return current_filename.to_string();
    }

    if !exists(&candidate) {
        return candidate;
    }
    (1..=MAX_NAME_SUFFIX)
        .map(|n| note_filename(&format!("{}_{}", slug, n)))
        .find(|name| !exists(name))
        .unwrap_or_else(|| note_filename(&format!("{}_{}", slug, id)))
}
