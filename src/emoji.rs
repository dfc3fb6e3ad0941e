//! Emoji removal.
//!
//! Matches single code points against six fixed ranges. Multi-codepoint
//! sequences are not treated as units: each in-range code point is removed on
//! its own, and joiners outside the ranges are left behind.
//!
//! Task and status emojis can instead be rewritten as plain-text markers
//! (`✅` becomes `[x]`) so checklists keep their meaning.

use crate::source::SourceFile;
use anyhow::Context;
use regex::{Captures, Regex};
use std::borrow::Cow;

/// A closed interval of code points treated as removable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmojiRange {
    pub name: &'static str,
    pub start: char,
    pub end: char,
}

impl EmojiRange {
    pub fn contains(&self, c: char) -> bool {
        self.start <= c && c <= self.end
    }
}

pub const EMOJI_RANGES: &[EmojiRange] = &[
    EmojiRange {
        name: "emoticons",
        start: '\u{1F600}',
        end: '\u{1F64F}',
    },
    EmojiRange {
        name: "symbols & pictographs",
        start: '\u{1F300}',
        end: '\u{1F5FF}',
    },
    EmojiRange {
        name: "transport & map symbols",
        start: '\u{1F680}',
        end: '\u{1F6FF}',
    },
    EmojiRange {
        name: "flags",
        start: '\u{1F1E0}',
        end: '\u{1F1FF}',
    },
    EmojiRange {
        name: "dingbats",
        start: '\u{2702}',
        end: '\u{27B0}',
    },
    // Overlaps the ranges above and also spans CJK and other BMP blocks.
    EmojiRange {
        name: "enclosed characters",
        start: '\u{24C2}',
        end: '\u{1F251}',
    },
];

/// Task and status emojis with their plain-text replacements
pub const TASK_EMOJIS: &[(char, &str)] = &[
    ('\u{2705}', "[x]"),
    ('\u{2611}', "[x]"),
    ('\u{2714}', "[x]"),
    ('\u{2713}', "[x]"),
    ('\u{2610}', "[ ]"),
    ('\u{2612}', "[X]"),
    ('\u{274C}', "[X]"),
    ('\u{274E}', "[X]"),
    ('\u{26A0}', "[!]"),
    ('\u{26D4}', "[!]"),
    ('\u{2B50}', "[+]"),
    ('\u{1F7E0}', "[orange]"),
    ('\u{1F7E1}', "[yellow]"),
    ('\u{1F7E8}', "[yellow]"),
    ('\u{1F7E2}', "[green]"),
    ('\u{1F534}', "[red]"),
    ('\u{1F4DD}', "[note]"),
    ('\u{1F4CB}', "[list]"),
    ('\u{1F4C4}', "[doc]"),
    ('\u{1F4C5}', "[cal]"),
    ('\u{1F4C6}', "[cal]"),
    ('\u{1F5D3}', "[cal]"),
    ('\u{1F4D1}', "[tab]"),
    ('\u{1F4CC}', "[pin]"),
    ('\u{1F4CD}', "[pin]"),
    ('\u{1F4CE}', "[clip]"),
];

/// The marker that replaces a task emoji, if `c` is one
pub fn task_marker(c: char) -> Option<&'static str> {
    TASK_EMOJIS
        .iter()
        .find(|(emoji, _)| *emoji == c)
        .map(|(_, marker)| *marker)
}

/// Build the character class matching every range in [`EMOJI_RANGES`]
fn emoji_pattern() -> String {
    let mut pattern = String::from("[");
    for range in EMOJI_RANGES {
        pattern.push_str(&format!(
            "\\x{{{:X}}}-\\x{{{:X}}}",
            range.start as u32, range.end as u32
        ));
    }
    pattern.push(']');
    pattern
}

/// Build the character class matching every emoji in [`TASK_EMOJIS`]
fn task_pattern() -> String {
    let mut pattern = String::from("[");
    for (emoji, _) in TASK_EMOJIS {
        pattern.push_str(&format!("\\x{{{:X}}}", *emoji as u32));
    }
    pattern.push(']');
    pattern
}

/// Removes emoji code points from text and files.
pub struct EmojiStripper {
    pattern: Regex,
    task_pattern: Regex,
}

impl EmojiStripper {
    pub fn new() -> anyhow::Result<Self> {
        let pattern = Regex::new(&emoji_pattern()).context("Failed to compile emoji pattern")?;
        let task_pattern =
            Regex::new(&task_pattern()).context("Failed to compile task emoji pattern")?;
        Ok(EmojiStripper {
            pattern,
            task_pattern,
        })
    }

    /// Remove every matching code point from `content`.
    ///
    /// Returns the cleaned text (borrowed when nothing matched) and the number
    /// of code points removed.
    pub fn strip<'a>(&self, content: &'a str) -> (Cow<'a, str>, usize) {
        let removed = self.pattern.find_iter(content).count();
        if removed == 0 {
            return (Cow::Borrowed(content), 0);
        }
        (self.pattern.replace_all(content, ""), removed)
    }

    /// Replace every task emoji in `content` with its marker.
    ///
    /// Returns the rewritten text (borrowed when nothing matched) and the
    /// number of emojis replaced.
    pub fn replace_tasks<'a>(&self, content: &'a str) -> (Cow<'a, str>, usize) {
        let replaced = self.task_pattern.find_iter(content).count();
        if replaced == 0 {
            return (Cow::Borrowed(content), 0);
        }
        let rewritten = self.task_pattern.replace_all(content, |caps: &Captures| {
            caps[0].chars().next().and_then(task_marker).unwrap_or("")
        });
        (rewritten, replaced)
    }

    /// Strip emojis from a file's text, returning how many were removed
    pub fn strip_emojis(&self, file: &mut SourceFile) -> usize {
        let (cleaned, removed) = self.strip(file.content());
        if removed == 0 {
            return 0;
        }
        let cleaned = cleaned.into_owned();
        file.replace(cleaned);
        removed
    }

    /// Rewrite task emojis in a file's text as markers
    pub fn replace_task_emojis(&self, file: &mut SourceFile) -> usize {
        let (rewritten, replaced) = self.replace_tasks(file.content());
        if replaced == 0 {
            return 0;
        }
        let rewritten = rewritten.into_owned();
        file.replace(rewritten);
        replaced
    }
}
