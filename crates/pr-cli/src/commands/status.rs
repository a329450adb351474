//! Status command
//!
//! Report what the bucket files in an output directory hold.

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;
use std::path::{Path, PathBuf};

use pr_core::config::Config;
use pr_core::session::{BucketStore, Decision};
use pr_core::types::SessionId;
use pr_storage::FileSystemStore;

/// Arguments for the status command
#[derive(Debug, Args)]
pub struct StatusArgs {
    /// Output directory (defaults to the configured one)
    #[arg(long, short)]
    pub output_dir: Option<PathBuf>,

    /// Look at the per-input directory of this input file
    #[arg(long, conflicts_with = "session")]
    pub input: Option<PathBuf>,

    /// Look at the directory of this session ID
    #[arg(long)]
    pub session: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Contents of one bucket file
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BucketStatus {
    pub bucket: &'static str,
    pub file: PathBuf,
    /// None when the file has not been written
    pub records: Option<usize>,
}

/// Contents of a bucket directory
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusReport {
    pub dir: PathBuf,
    pub buckets: Vec<BucketStatus>,
}

impl StatusReport {
    /// Records across all written buckets
    pub fn total(&self) -> usize {
        self.buckets.iter().filter_map(|b| b.records).sum()
    }
}

/// Execute the status command
pub fn execute(args: StatusArgs, config: &Config) -> Result<()> {
    let dir = resolve_dir(&args, config)?;
    let report = collect(&dir)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    Ok(())
}

fn resolve_dir(args: &StatusArgs, config: &Config) -> Result<PathBuf> {
    let output_dir = args
        .output_dir
        .clone()
        .unwrap_or_else(|| config.store.output_dir.clone());

    if let Some(input) = &args.input {
        return Ok(FileSystemStore::input_dir(&output_dir, input));
    }
    if let Some(session) = &args.session {
        let id = SessionId::from_string(session)?;
        return Ok(FileSystemStore::session_dir(&output_dir, &id));
    }
    Ok(output_dir)
}

/// Load every bucket in `dir`
pub fn collect(dir: &Path) -> Result<StatusReport> {
    let store = FileSystemStore::open(dir)
        .with_context(|| format!("No bucket directory at {}", dir.display()))?;

    let mut buckets = Vec::with_capacity(Decision::ALL.len());
    for decision in Decision::ALL {
        let records = store.load(decision)?.map(|r| r.len());
        buckets.push(BucketStatus {
            bucket: decision.store_name(),
            file: store.bucket_path(decision),
            records,
        });
    }

    Ok(StatusReport {
        dir: store.dir().to_path_buf(),
        buckets,
    })
}

fn print_report(report: &StatusReport) {
    use colored::Colorize;

    println!("{}", "Buckets:".bold().underline());
    println!("{}", report.dir.display().to_string().dimmed());
    println!();

    for bucket in &report.buckets {
        match bucket.records {
            Some(n) => println!("  {:<20} {}", bucket.bucket, n.to_string().green()),
            None => println!("  {:<20} {}", bucket.bucket, "not written".dimmed()),
        }
    }

    println!();
    println!("Total: {}", report.total());
}

#[cfg(test)]
mod tests {
    use super::*;
    use pr_core::record::Record;
    use serde_json::json;
    use tempfile::TempDir;

    fn record(prompt: &str) -> Record {
        serde_json::from_value(json!({ "prompt": prompt })).unwrap()
    }

    #[test]
    fn test_collect_counts_written_buckets() {
        let temp = TempDir::new().unwrap();
        let store = FileSystemStore::new(temp.path()).unwrap();
        store.save(Decision::Keep, &[record("a"), record("b")]).unwrap();
        store.save(Decision::Skip, &[]).unwrap();

        let report = collect(temp.path()).unwrap();
        let counts: Vec<_> = report.buckets.iter().map(|b| b.records).collect();
        assert_eq!(counts, vec![Some(2), None, Some(0)]);
        assert_eq!(report.total(), 2);
    }

    #[test]
    fn test_collect_missing_dir() {
        let temp = TempDir::new().unwrap();
        assert!(collect(&temp.path().join("nope")).is_err());
    }

    #[test]
    fn test_resolve_session_dir() {
        let id = SessionId::generate();
        let args = StatusArgs {
            output_dir: Some(PathBuf::from("out")),
            input: None,
            session: Some(id.to_string()),
            json: false,
        };
        let dir = resolve_dir(&args, &Config::default()).unwrap();
        assert_eq!(dir, PathBuf::from("out").join(id.as_str()));
    }

    #[test]
    fn test_resolve_rejects_bad_session_id() {
        let args = StatusArgs {
            output_dir: None,
            input: None,
            session: Some("not-a-session".to_string()),
            json: false,
        };
        assert!(resolve_dir(&args, &Config::default()).is_err());
    }
}
