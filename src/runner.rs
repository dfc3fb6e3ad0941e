//! Input resolution and per-file processing.

use crate::emoji::EmojiStripper;
use crate::error::CleanError;
use crate::filter::{should_prune, ExtensionFilter};
use crate::source::SourceFile;
use crate::whitespace::clean_whitespace;

use anyhow::Result;
use colored::Colorize;
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};

/// Options controlling a run (runtime flags)
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    pub remove_emojis: bool,
    /// Rewrite task emojis as text markers, e.g. `✅` as `[x]`
    pub replace_task_emojis: bool,
    pub dry_run: bool,
    pub verbose: bool,
}

/// A single eligible file and what to do with it
#[derive(Debug, Clone)]
pub struct FileTask {
    pub path: PathBuf,
    pub remove_emojis: bool,
    pub replace_task_emojis: bool,
    pub dry_run: bool,
}

/// Counters produced by processing one file
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FileOutcome {
    pub lines_cleaned: usize,
    pub task_emojis_replaced: usize,
    pub emojis_removed: usize,
    pub errors: usize,
}

impl FileOutcome {
    pub fn changed(&self) -> bool {
        self.lines_cleaned > 0 || self.task_emojis_replaced > 0 || self.emojis_removed > 0
    }
}

/// Totals for a whole run
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Regular files found under the inputs, eligible or not
    pub candidates: usize,
    /// Eligible files that were processed
    pub files_cleaned: usize,
    /// Files with at least one change (or would-be change in dry-run)
    pub files_changed: usize,
    pub lines_cleaned: usize,
    pub task_emojis_replaced: usize,
    pub emojis_removed: usize,
    pub errors: usize,
    /// Input paths that did not exist, plus candidates gone before processing
    pub missing: usize,
}

impl RunSummary {
    fn record(&mut self, outcome: FileOutcome) {
        self.files_cleaned += 1;
        if outcome.changed() {
            self.files_changed += 1;
        }
        self.lines_cleaned += outcome.lines_cleaned;
        self.task_emojis_replaced += outcome.task_emojis_replaced;
        self.emojis_removed += outcome.emojis_removed;
        self.errors += outcome.errors;
    }
}

/// Format a change report, e.g. `DRY-RUN-Cleaned: 2 lines in src/lib.rs`
pub fn status_line(dry_run: bool, action: &str, detail: &str) -> String {
    let prefix = if dry_run { "DRY-RUN-" } else { "" };
    format!("{}{}: {}", prefix, action, detail)
}

fn report_change(dry_run: bool, action: &str, detail: &str) {
    let line = status_line(dry_run, action, detail);
    if dry_run {
        println!("{}", line.yellow());
    } else {
        println!("{}", line.green());
    }
}

fn report_error(err: &CleanError) {
    eprintln!("{}", err.to_string().red());
}

fn report_missing(path: &Path) {
    eprintln!("{}", CleanError::NotFound(path.to_path_buf()).to_string().yellow());
}

/// Runs the cleaners over a set of input paths.
pub struct Runner<'a> {
    filter: &'a ExtensionFilter,
    stripper: EmojiStripper,
    options: RunOptions,
}

impl<'a> Runner<'a> {
    pub fn new(filter: &'a ExtensionFilter, options: RunOptions) -> Result<Self> {
        Ok(Runner {
            filter,
            stripper: EmojiStripper::new()?,
            options,
        })
    }

    /// Resolve inputs into a flat list of candidate files.
    ///
    /// Files are taken as-is and directories are expanded recursively in
    /// enumeration order. Missing inputs are reported and counted.
    pub fn collect_candidates(&self, paths: &[PathBuf], summary: &mut RunSummary) -> Vec<PathBuf> {
        let mut files = Vec::new();

        for path in paths {
            if !path.exists() {
                report_missing(path);
                summary.missing += 1;
                continue;
            }

            if path.is_file() {
                files.push(path.clone());
            } else if path.is_dir() {
                if self.options.verbose {
                    println!("DEBUG: Scanning directory {}", path.display());
                }
                expand_directory(path, self.options.verbose, &mut files);
            }
        }

        files
    }

    /// Clean every eligible file under `paths`
    pub fn run(&self, paths: &[PathBuf]) -> RunSummary {
        let mut summary = RunSummary::default();
        let candidates = self.collect_candidates(paths, &mut summary);
        summary.candidates = candidates.len();
        self.process_candidates(candidates, &mut summary);
        summary
    }

    /// Gate each candidate through the filter and clean the eligible ones
    pub fn process_candidates(&self, candidates: Vec<PathBuf>, summary: &mut RunSummary) {
        for path in candidates {
            // The tree may have changed since it was listed
            if !path.exists() {
                report_missing(&path);
                summary.missing += 1;
                continue;
            }
            if !path.is_file() {
                continue;
            }

            let eligibility = self.filter.check(&path);
            if !eligibility.is_eligible() {
                if self.options.verbose {
                    println!("DEBUG: Skipping {}: {}", path.display(), eligibility.reason());
                }
                continue;
            }

            let task = FileTask {
                path,
                remove_emojis: self.options.remove_emojis,
                replace_task_emojis: self.options.replace_task_emojis,
                dry_run: self.options.dry_run,
            };
            summary.record(self.process_file(&task));
        }
    }

    /// Read the file once, run the requested passes over its text and write
    /// it back at most once.
    ///
    /// Passes run in order: whitespace, task emoji markers, emoji removal.
    /// Each later pass sees the earlier passes' output, so dry-run counts
    /// match a real run. Status lines are printed only once the result is
    /// saved (or would be, in dry-run).
    pub fn process_file(&self, task: &FileTask) -> FileOutcome {
        let mut outcome = FileOutcome::default();

        println!("cleaning: {}", task.path.display());

        let mut file = match SourceFile::read(&task.path) {
            Ok(file) => file,
            Err(err) => {
                report_error(&err);
                outcome.errors += 1;
                return outcome;
            }
        };

        let lines = clean_whitespace(&mut file);
        let replaced = if task.replace_task_emojis {
            self.stripper.replace_task_emojis(&mut file)
        } else {
            0
        };
        let removed = if task.remove_emojis {
            self.stripper.strip_emojis(&mut file)
        } else {
            0
        };

        if let Err(err) = file.save(task.dry_run) {
            report_error(&err);
            outcome.errors += 1;
            return outcome;
        }

        let path = file.path().display();
        if lines > 0 {
            outcome.lines_cleaned = lines;
            report_change(task.dry_run, "Cleaned", &format!("{} lines in {}", lines, path));
        }
        if replaced > 0 {
            outcome.task_emojis_replaced = replaced;
            report_change(
                task.dry_run,
                "Replaced",
                &format!("{} task emojis in {}", replaced, path),
            );
        }
        if removed > 0 {
            outcome.emojis_removed = removed;
            report_change(
                task.dry_run,
                "Removed",
                &format!("{} emojis from {}", removed, path),
            );
        }

        outcome
    }
}

/// Append every regular file under `root` to `files`.
///
/// Hidden and excluded directories below the root are not descended into;
/// nothing inside them could pass the filter. Symlinks are not followed.
fn expand_directory(root: &Path, verbose: bool, files: &mut Vec<PathBuf>) {
    let walker = WalkBuilder::new(root)
        .hidden(false)
        .git_ignore(false)
        .ignore(false)
        .git_global(false)
        .git_exclude(false)
        .filter_entry(move |entry| {
            if entry.depth() == 0 {
                return true;
            }

            let prune = entry.file_name().to_str().is_some_and(should_prune);
            if prune && verbose && entry.file_type().is_some_and(|ft| ft.is_dir()) {
                println!("DEBUG: Skipping excluded directory {}", entry.path().display());
            }
            !prune
        })
        .build();

    for result in walker {
        let entry = match result {
            Ok(entry) => entry,
            Err(err) => {
                eprintln!(
                    "Warning: Failed to access entry in {}: {}",
                    root.display(),
                    err
                );
                continue;
            }
        };

        if entry.file_type().is_some_and(|ft| ft.is_file()) {
            files.push(entry.into_path());
        }
    }
}

/// Load the embedded allow-list and clean everything under `paths`
pub fn run(paths: &[PathBuf], options: RunOptions) -> Result<RunSummary> {
    let filter = ExtensionFilter::load()?;
    if options.verbose {
        println!("DEBUG: Loaded {} allow-listed extensions", filter.len());
    }
    let runner = Runner::new(&filter, options)?;
    Ok(runner.run(paths))
}
