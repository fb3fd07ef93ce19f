//! Command-line interface for dirsort.
//!
//! This module handles:
//! - Argument parsing and validation of the target directory
//! - Running the classify, move and optional duplicate passes in order
//! - Reporting what was moved and what was deleted

use crate::classifier::{Classification, Classifier};
use crate::config::SortConfig;
use crate::dedup::{DedupOutcome, Deduplicator};
use crate::error::SortResult;
use crate::mover::{Mover, SortReport};
use crate::output::OutputFormatter;
use crate::prompt::{ConsolePrompt, Prompt};
use clap::Parser;
use std::path::PathBuf;

/// Sort files in a specified directory into folders by file type.
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "dirsort", version)]
pub struct Args {
    /// The target directory to sort.
    #[arg(value_parser = parse_directory)]
    pub directory: PathBuf,

    /// Remove duplicate files after sorting.
    #[arg(long)]
    pub unique: bool,
}

impl Args {
    /// Builds the run configuration for these arguments. The hash chunk
    /// size is not exposed on the command line and keeps its default.
    pub fn to_config(&self) -> SortConfig {
        SortConfig::new(self.directory.clone()).with_remove_duplicates(self.unique)
    }
}

/// Accepts only paths that name an existing directory.
fn parse_directory(value: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(value);
    if path.is_dir() {
        Ok(path)
    } else if path.exists() {
        Err(format!("'{}' is not a directory", value))
    } else {
        Err(format!("directory '{}' does not exist", value))
    }
}

/// What a completed run did.
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// Every move performed.
    pub report: SortReport,
    /// Entries left in place because they were already organized or are not
    /// regular files or directories.
    pub skipped: usize,
    /// Outcome of the duplicate pass, if it ran.
    pub dedup: Option<DedupOutcome>,
}

/// Runs dirsort with the given arguments, asking questions on the console.
///
/// # Arguments
///
/// * `args` - Parsed command-line arguments
///
/// # Examples
///
/// ```no_run
/// use clap::Parser;
/// use dirsort::cli::{Args, run_cli};
///
/// let args = Args::parse_from(["dirsort", "/home/user/Downloads", "--unique"]);
/// match run_cli(&args) {
///     Ok(summary) => println!("moved {} entries", summary.report.total_moves()),
///     Err(e) => eprintln!("Error: {}", e),
/// }
/// ```
pub fn run_cli(args: &Args) -> SortResult<RunSummary> {
    run_with_prompt(&args.to_config(), &mut ConsolePrompt)
}

/// Runs a full sort with an injected prompt.
///
/// 1. Scans the target directory
/// 2. Moves loose files and loose folders into place
/// 3. If enabled, hashes the extension folders and asks before deleting
///    duplicates
///
/// The first failure aborts the run. Moves that already happened are kept.
///
/// # Arguments
///
/// * `config` - Target directory and whether to remove duplicates
/// * `prompt` - Where the delete confirmation is asked
///
/// # Examples
///
/// ```no_run
/// use dirsort::{ScriptedPrompt, SortConfig, run_with_prompt};
///
/// let config = SortConfig::new("/home/user/Downloads").with_remove_duplicates(true);
/// let mut prompt = ScriptedPrompt::new(["no"]);
/// let summary = run_with_prompt(&config, &mut prompt)?;
/// println!("moved {} entries", summary.report.total_moves());
/// # Ok::<(), dirsort::SortError>(())
/// ```
pub fn run_with_prompt(config: &SortConfig, prompt: &mut dyn Prompt) -> SortResult<RunSummary> {
    OutputFormatter::info(&format!("Sorting contents of: {}", config.target.display()));

    let classification = Classifier::scan(&config.target)?;
    if classification.is_empty() {
        OutputFormatter::plain("Nothing to sort.");
    }

    let report = Mover::apply(&classification)?;
    for record in &report.moves {
        let name = record
            .original_path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        OutputFormatter::plain(&format!(" - {} → {}/", name, record.destination_folder));
    }
    for record in report.renamed() {
        OutputFormatter::warning(&format!(
            "Name already taken, saved as {}",
            record.new_path.display()
        ));
    }
    if report.total_moves() > 0 {
        OutputFormatter::summary_table(&report.counts_by_folder(), report.total_moves());
    }

    let dedup = if config.remove_duplicates {
        Some(remove_duplicates(config, &classification, prompt)?)
    } else {
        None
    };

    OutputFormatter::success("Sorting complete!");

    Ok(RunSummary {
        report,
        skipped: classification.skipped.len(),
        dedup,
    })
}

/// Hashes the extension folders of this run and settles duplicates
/// through `prompt`, reporting the outcome.
fn remove_duplicates(
    config: &SortConfig,
    classification: &Classification,
    prompt: &mut dyn Prompt,
) -> SortResult<DedupOutcome> {
    OutputFormatter::header("DUPLICATES");

    let scan = Deduplicator::scan_classification(classification, config.hash_chunk_size)?;
    let outcome = Deduplicator::confirm_and_delete(&scan, prompt)?;

    match outcome {
        DedupOutcome::NoDuplicates => {
            OutputFormatter::plain(&format!(
                "No duplicates among {} files.",
                scan.files_hashed
            ));
        }
        DedupOutcome::Deleted(count) => {
            OutputFormatter::success(&format!("Deleted {} duplicate files.", count));
        }
        DedupOutcome::Kept(count) => {
            OutputFormatter::plain(&format!("Kept {} duplicate files.", count));
        }
    }

    Ok(outcome)
}
