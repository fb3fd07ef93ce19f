//! dirsort - sort a directory by file type
//!
//! Loose files directly inside a directory are moved into folders named after
//! their extension (`"TXT Files"`, `"PDF Files"`, ...), loose subfolders are
//! collected into a single `Folders` folder, and an optional pass removes
//! duplicate files by content hash after asking for confirmation.

pub mod classifier;
pub mod cli;
pub mod config;
pub mod dedup;
pub mod error;
pub mod extension;
pub mod logging;
pub mod mover;
pub mod output;
pub mod prompt;

pub use classifier::{Classification, Classifier, LooseFile, SkipReason, SkippedEntry};
pub use config::SortConfig;
pub use dedup::{DedupOutcome, Deduplicator, DuplicateFile, DuplicateScan, hash_file};
pub use error::{SortError, SortResult};
pub use extension::ExtensionKey;
pub use mover::{MoveKind, MoveRecord, Mover, SortReport, resolve_collision};
pub use prompt::{ConsolePrompt, Prompt, PromptResponse, ScriptedPrompt};

pub use cli::{Args, RunSummary, run_cli, run_with_prompt};
