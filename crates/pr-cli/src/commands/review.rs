//! Review command
//!
//! Load an input file and classify its records, either in the full-screen
//! TUI or in a line-oriented prompt loop.

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use std::path::PathBuf;
use std::sync::Arc;

use pr_core::config::{Config, StoreConfig, StoreNamespace};
use pr_core::export::ExportManager;
use pr_core::record::{Record, RecordSource};
use pr_core::session::{BucketStore, Decision, MemoryStore, SessionState, SessionSummary};
use pr_core::types::SessionId;
use pr_storage::FileSystemStore;
use pr_ui::{App, ExportTarget, Highlighter, Reviewer};

/// Store namespacing options
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum NamespaceArg {
    /// Fixed file names in the output directory
    Shared,
    /// One subdirectory per input file
    Input,
    /// One subdirectory per session
    Session,
}

impl From<NamespaceArg> for StoreNamespace {
    fn from(arg: NamespaceArg) -> Self {
        match arg {
            NamespaceArg::Shared => StoreNamespace::Shared,
            NamespaceArg::Input => StoreNamespace::Input,
            NamespaceArg::Session => StoreNamespace::Session,
        }
    }
}

/// Export format options
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ExportFormat {
    /// ZIP archive with one JSON file per bucket
    Zip,
    /// Single JSON document holding all buckets
    Json,
}

impl ExportFormat {
    fn name(&self) -> &'static str {
        match self {
            ExportFormat::Zip => "zip",
            ExportFormat::Json => "json",
        }
    }
}

/// Arguments for the review command
#[derive(Debug, Args)]
pub struct ReviewArgs {
    /// Input JSON file (an array of record objects)
    pub input: PathBuf,

    /// Starting record index (0-based); asked interactively when omitted
    #[arg(long)]
    pub start: Option<usize>,

    /// Directory for the saved bucket files
    #[arg(long, short)]
    pub output_dir: Option<PathBuf>,

    /// How saved buckets are separated between runs
    #[arg(long, value_enum)]
    pub namespace: Option<NamespaceArg>,

    /// Export destination
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Export format
    #[arg(long, short, value_enum)]
    pub format: Option<ExportFormat>,

    /// Use a line-oriented prompt instead of the full-screen UI
    #[arg(long)]
    pub no_tui: bool,

    /// Keep buckets in memory only; nothing is saved except explicit exports
    #[arg(long)]
    pub dry_run: bool,
}

/// Execute the review command
pub fn execute(args: ReviewArgs, config: &Config) -> Result<()> {
    use colored::Colorize;

    let store_config = resolve_store_config(&args, config);

    // Parse the input once; everything below works on this result
    let source = RecordSource::new(&args.input);
    let count = source
        .len()
        .with_context(|| format!("Cannot review {}", args.input.display()))?;
    println!(
        "Loaded {} records from {}",
        count.to_string().cyan(),
        args.input.display()
    );

    if let Some(start) = args.start {
        SessionState::check_start_index(count, start)?;
    }

    let session_id = SessionId::generate();
    tracing::info!("Session ID: {}", session_id);

    let store: Arc<dyn BucketStore> = if args.dry_run {
        println!("{}", "Dry run: buckets are not saved.".yellow());
        Arc::new(MemoryStore::new())
    } else {
        let store = FileSystemStore::for_session(&store_config, &args.input, &session_id)
            .context("Failed to prepare the bucket directory")?;
        println!("Buckets are saved to {}", store.dir().display().to_string().cyan());
        Arc::new(store)
    };

    let target = resolve_export_target(&args, config, &store_config)?;

    let records = source.into_records()?;
    let mut reviewer = Reviewer::new(records, store, session_id, target);
    reviewer.state.show_raw = config.ui.show_raw_record;
    if let Some(start) = args.start {
        reviewer.start(start)?;
    }

    if args.no_tui {
        run_line_mode(&mut reviewer)?;
        println!("{}", format_summary(&reviewer));
    } else {
        let highlighter = Highlighter::with_theme(&config.ui.theme);
        let mut app = App::new(reviewer, highlighter)?;
        app.run()?;
        let summary = format_summary(app.reviewer());
        // Leave the alternate screen before printing
        drop(app);
        println!("{}", summary);
    }

    Ok(())
}

fn resolve_store_config(args: &ReviewArgs, config: &Config) -> StoreConfig {
    let mut store = config.store.clone();
    if let Some(dir) = &args.output_dir {
        store.output_dir = dir.clone();
    }
    if let Some(namespace) = args.namespace {
        store.namespace = namespace.into();
    }
    store
}

fn resolve_export_target(
    args: &ReviewArgs,
    config: &Config,
    store: &StoreConfig,
) -> Result<ExportTarget> {
    let format = args
        .format
        .map(|f| f.name().to_string())
        .unwrap_or_else(|| config.export.default_format.clone());

    if !ExportManager::new().has_format(&format) {
        anyhow::bail!("Unknown export format in configuration: {}", format);
    }

    let path = args
        .export
        .clone()
        .unwrap_or_else(|| store.output_dir.join(&config.export.file_name));

    Ok(ExportTarget { format, path })
}

/// Text block shown for one record in line mode
fn describe_record(record: &Record, position: usize, total: usize) -> String {
    let preview = record
        .preview_url()
        .map(|url| format!("Preview: {}", url))
        .unwrap_or_else(|| "No preview URL available.".to_string());
    format!(
        "Prompt {} / {}\n\n{}\n\n{}",
        position + 1,
        total,
        record.prompt(),
        preview
    )
}

const LINE_ACTIONS: [&str; 5] = ["Keep", "Discard", "Skip", "Export", "Quit"];

fn run_line_mode(reviewer: &mut Reviewer) -> Result<()> {
    use colored::Colorize;
    use dialoguer::{Confirm, Input, Select};

    let term = console::Term::stdout();
    if !term.is_term() {
        anyhow::bail!("--no-tui needs an interactive terminal");
    }

    while reviewer.session().is_none() {
        let count = reviewer.record_count();
        let start: usize = Input::new()
            .with_prompt(format!(
                "Enter starting record index (0-based, 0..={})",
                count.saturating_sub(1)
            ))
            .default(0)
            .validate_with(|value: &usize| -> std::result::Result<(), String> {
                SessionState::check_start_index(count, *value).map_err(|e| e.to_string())
            })
            .interact_text()?;

        let confirmed = Confirm::new()
            .with_prompt(format!("Start reviewing at record {}?", start))
            .default(true)
            .interact()?;
        if confirmed {
            reviewer.start(start)?;
        }
    }

    loop {
        let Some(session) = reviewer.session() else {
            break;
        };
        let Some(record) = session.current_record() else {
            break;
        };
        let text = describe_record(record, session.state().cursor(), session.state().len());

        term.clear_screen()?;
        if let Some(msg) = &reviewer.state.message {
            if reviewer.state.message_is_warning {
                println!("{}", msg.yellow());
            } else {
                println!("{}", msg.dimmed());
            }
        }
        println!("{}\n", text);

        let choice = Select::new()
            .items(&LINE_ACTIONS)
            .default(0)
            .interact()?;

        match choice {
            0..=2 => reviewer.classify(Decision::ALL[choice]),
            3 => reviewer.export(),
            _ => return Ok(()),
        }
    }

    println!("\n{}", "Review complete!".green().bold());
    if let Some(msg) = &reviewer.state.message {
        if reviewer.state.message_is_warning {
            println!("{}", msg.yellow());
        }
    }

    let export = Confirm::new()
        .with_prompt(format!(
            "Export to {}?",
            reviewer.export_target().path.display()
        ))
        .default(true)
        .interact()?;
    if export {
        reviewer.export();
        if let Some(msg) = &reviewer.state.message {
            println!("{}", msg);
        }
    }

    Ok(())
}

fn summary_lines(summary: &SessionSummary) -> Vec<String> {
    Decision::ALL
        .iter()
        .map(|d| format!("Total {}: {}", d.bucket_label(), summary.count(*d)))
        .collect()
}

fn format_summary(reviewer: &Reviewer) -> String {
    use colored::Colorize;

    let Some(session) = reviewer.session() else {
        return "No session started.".to_string();
    };

    let summary = session.summary();
    let mut out = vec![
        format!("\n{}", "Session Summary".bold().underline()),
        format!("  ID: {}", summary.id.to_string().green()),
        format!(
            "  Reviewed: {} (records {}..{} of {})",
            summary.reviewed(),
            summary.start_index,
            summary.position,
            summary.total
        ),
    ];
    out.extend(summary_lines(&summary).into_iter().map(|l| format!("  {}", l)));

    let stale = session.stale_buckets();
    if !stale.is_empty() {
        let names: Vec<_> = stale.iter().map(|d| d.store_name()).collect();
        out.push(format!(
            "{} Not saved: {} (in {})",
            "⚠".yellow(),
            names.join(", "),
            session.store_location()
        ));
    }
    if let Some(path) = &reviewer.state.last_export {
        out.push(format!("  Exported: {}", path.display()));
    }
    out.join("\n")
}
