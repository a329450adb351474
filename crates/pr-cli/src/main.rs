//! prompt-reviewer - Prompt Review CLI
//!
//! A terminal tool for sorting prompt records into kept, discarded and
//! skipped buckets.
//!
//! ## Quick Start
//!
//! ```bash
//! # Review a file, choosing the starting index interactively
//! prompt-reviewer review prompts.json
//!
//! # Resume at record 120 with a line-oriented prompt instead of the TUI
//! prompt-reviewer review prompts.json --start 120 --no-tui
//!
//! # Inspect the saved buckets
//! prompt-reviewer status
//! ```

mod commands;

fn main() {
    if let Err(err) = commands::run() {
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}
