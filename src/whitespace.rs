//! Trailing whitespace removal.

use crate::source::SourceFile;

/// Split a line into its body and terminator (`"\r\n"`, `"\n"` or `""`)
fn split_terminator(line: &str) -> (&str, &str) {
    if let Some(body) = line.strip_suffix("\r\n") {
        (body, "\r\n")
    } else if let Some(body) = line.strip_suffix('\n') {
        (body, "\n")
    } else {
        (line, "")
    }
}

/// Strip trailing whitespace from every line of `content`.
///
/// Each line keeps its terminator exactly, and a final line without one stays
/// without one. Returns the cleaned text and the number of lines that changed.
pub fn strip_trailing_whitespace(content: &str) -> (String, usize) {
    let mut cleaned = String::with_capacity(content.len());
    let mut lines_changed = 0;

    for line in content.split_inclusive('\n') {
        let (body, terminator) = split_terminator(line);
        let trimmed = body.trim_end();
        if trimmed.len() != body.len() {
            lines_changed += 1;
        }
        cleaned.push_str(trimmed);
        cleaned.push_str(terminator);
    }

    (cleaned, lines_changed)
}

/// Remove trailing whitespace from a file's text.
///
/// Only the in-memory content changes; [`SourceFile::save`] decides whether
/// it is written. Returns the number of lines that changed.
pub fn clean_whitespace(file: &mut SourceFile) -> usize {
    let (cleaned, lines_changed) = strip_trailing_whitespace(file.content());
    if lines_changed > 0 {
        file.replace(cleaned);
    }
    lines_changed
}
