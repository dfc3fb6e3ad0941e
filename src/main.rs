use anyhow::Result;
use clap::Parser;
use cleanfile::{run, RunOptions, RunSummary};
use colored::Colorize;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Remove trailing whitespace and emojis from files",
    long_about = None
)]
struct Args {
    /// Files or directories to process; directories are walked recursively
    /// (defaults to current directory)
    #[arg(default_value = ".")]
    paths: Vec<PathBuf>,

    /// Remove any emojis from the file
    #[arg(long, short = 'e')]
    remove_emojis: bool,

    /// Rewrite task emojis as text markers (e.g. ✅ as [x]) before any removal
    #[arg(long, short = 't')]
    replace_task_emojis: bool,

    /// Show what would be changed without modifying files
    #[arg(long, short = 'd')]
    dry_run: bool,

    /// Explain why files are skipped
    #[arg(long, short)]
    verbose: bool,
}

fn print_summary(summary: &RunSummary, options: RunOptions) {
    println!("========================================");

    let mut totals = format!(
        "Processed {} files: {} lines cleaned",
        summary.files_cleaned, summary.lines_cleaned
    );
    if options.replace_task_emojis {
        totals.push_str(&format!(
            ", {} task emojis replaced",
            summary.task_emojis_replaced
        ));
    }
    if options.remove_emojis {
        totals.push_str(&format!(", {} emojis removed", summary.emojis_removed));
    }
    println!("{}", totals.bold());

    if options.dry_run {
        println!("Dry run mode: No files were modified.");
    }

    if summary.errors > 0 {
        eprintln!(
            "{}",
            format!("{} errors while processing files", summary.errors).red()
        );
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let options = RunOptions {
        remove_emojis: args.remove_emojis,
        replace_task_emojis: args.replace_task_emojis,
        dry_run: args.dry_run,
        verbose: args.verbose,
    };

    let summary = run(&args.paths, options)?;
    print_summary(&summary, options);

    // Per-file failures have already been reported; they do not change the exit code
    Ok(())
}
