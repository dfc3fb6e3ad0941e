//! cleanfile - Source File Hygiene
//!
//! cleanfile strips trailing whitespace from every line of source and text files,
//! keeping each line's terminator intact, and can optionally remove emoji code
//! points. Only files whose extension is allow-listed (see `filetypes.toml`) are
//! touched; hidden paths and well-known build/dependency directories are skipped.
//!
//! ## Flow
//!
//! Input paths are resolved into candidate files (directories are walked
//! recursively), each candidate is gated by [`ExtensionFilter`], and eligible
//! files go through the whitespace pass and then, if requested, the task emoji
//! and emoji passes. Each file is read once and written back at most once.
//! Files are processed one at a time; an I/O failure on one file is reported and
//! the run continues.

pub mod emoji;
pub mod error;
pub mod filter;
pub mod runner;
pub mod source;
pub mod whitespace;

// Re-export commonly used items
pub use emoji::{task_marker, EmojiRange, EmojiStripper, EMOJI_RANGES, TASK_EMOJIS};
pub use error::CleanError;
pub use filter::{Eligibility, ExtensionFilter, EXCLUDED_DIRS};
pub use runner::{run, status_line, FileOutcome, FileTask, RunOptions, RunSummary, Runner};
pub use source::SourceFile;
pub use whitespace::{clean_whitespace, strip_trailing_whitespace};
