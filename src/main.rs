//! fileman - recursive file search, cleanup and change watching.
//!
//! Usage:
//!   fileman count --pattern '*.log'          Count matching entries
//!   fileman find --pattern '*.rs' --disk /    List matching entries
//!   fileman remove --pattern '*.tmp'          Delete matching files
//!   fileman content --string TODO --type .rs  Search file contents
//!   fileman extension --pattern '*.txt' --new .md
//!   fileman changes PATH --since 2024-01-01   List recently modified entries
//!   fileman watch PATH                        Log changes under PATH

use std::path::{Path, PathBuf};

use chrono::{DateTime, Local, NaiveDate, TimeZone};
use clap::{Parser, Subcommand, ValueEnum};
use color_eyre::eyre::{Context, Result, bail, eyre};
use tracing_subscriber::EnvFilter;

use fileman_core::{ContentQuery, NamePattern, Platform, RootSelection, TimeWindow, WalkConfig};
use fileman_ops::{FileOperation, OperationComplete, OperationExecutor};
use fileman_scan::{
    FsProbe, changed_between, count_files, find_by_content, find_files, resolve_roots,
};
use fileman_watch::{TracingSink, watch};

#[derive(Parser)]
#[command(
    name = "fileman",
    version,
    about = "Recursive file search, cleanup and change watching",
    long_about = "fileman walks one root, a chosen disk or every drive and acts on \
                  entries whose base name matches a shell glob.\n\n\
                  Set RUST_LOG to control log verbosity (default: info)."
)]
struct Cli {
    /// Search every accessible drive
    #[arg(long, global = true)]
    all: bool,

    /// Specific disk or directory to search (ignored with --all)
    #[arg(long, global = true)]
    disk: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Count entries matching a pattern
    Count {
        /// Shell glob matched against base names
        #[arg(short, long, default_value = "*")]
        pattern: String,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Remove files matching a pattern
    Remove {
        /// Shell glob matched against base names
        #[arg(short, long, default_value = "*")]
        pattern: String,

        /// Move files to the trash instead of deleting them
        #[arg(long)]
        trash: bool,
    },

    /// Find entries matching a pattern
    Find {
        /// Shell glob matched against base names
        #[arg(short, long, default_value = "*")]
        pattern: String,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Find files containing a string
    Content {
        /// Substring to search for
        #[arg(short, long, default_value = "")]
        string: String,

        /// File extension to consider (e.g., ".log")
        #[arg(short = 't', long = "type", default_value = "")]
        file_type: String,

        /// Largest file size to read, in kilobytes
        #[arg(short, long, default_value = "1024", allow_negative_numbers = true)]
        maxsize: i64,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Change the extension of files matching a pattern
    Extension {
        /// Shell glob matched against base names
        #[arg(short, long, default_value = "*")]
        pattern: String,

        /// Replacement extension, dot included
        #[arg(short, long = "new", default_value = ".txt")]
        new_extension: String,
    },

    /// List entries modified inside a time window
    Changes {
        /// Directory to search
        path: PathBuf,

        /// Window start, exclusive (RFC 3339 or YYYY-MM-DD)
        #[arg(short, long)]
        since: String,

        /// Window end, exclusive (defaults to now)
        #[arg(short, long)]
        until: Option<String>,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Watch a directory tree and log changes until interrupted
    Watch {
        /// Directory to watch
        path: PathBuf,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum, Default)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

fn main() -> Result<()> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let platform = Platform::detect();
    let selection = RootSelection {
        all: cli.all,
        disk: cli.disk,
    };

    match cli.command {
        Command::Count { pattern, format } => {
            let pattern = compile_pattern(&pattern, &platform)?;
            let roots = resolve_roots(&selection, &platform, &FsProbe);
            run_count(&roots, &pattern, format)?;
        }
        Command::Remove { pattern, trash } => {
            let pattern = compile_pattern(&pattern, &platform)?;
            let roots = resolve_roots(&selection, &platform, &FsProbe);
            let report = run_operation(roots, &pattern, FileOperation::remove(trash))?;
            println!("Files removed successfully.");
            print_report(&report);
        }
        Command::Find { pattern, format } => {
            let pattern = compile_pattern(&pattern, &platform)?;
            let roots = resolve_roots(&selection, &platform, &FsProbe);
            run_find(&roots, &pattern, format)?;
        }
        Command::Content {
            string,
            file_type,
            maxsize,
            format,
        } => {
            let query = content_query(&string, &file_type, maxsize)?;
            let roots = resolve_roots(&selection, &platform, &FsProbe);
            run_content(&roots, &query, format)?;
        }
        Command::Extension {
            pattern,
            new_extension,
        } => {
            let pattern = compile_pattern(&pattern, &platform)?;
            if new_extension.is_empty() {
                bail!("New extension cannot be empty.");
            }
            let roots = resolve_roots(&selection, &platform, &FsProbe);
            let report =
                run_operation(roots, &pattern, FileOperation::set_extension(new_extension))?;
            println!("File extensions updated successfully.");
            print_report(&report);
        }
        Command::Changes {
            path,
            since,
            until,
            format,
        } => {
            let start = parse_date(&since)?;
            let end = match until {
                Some(until) => parse_date(&until)?,
                None => Local::now(),
            };
            let window = TimeWindow::new(start, end)?;
            run_changes(&path, window, format)?;
        }
        Command::Watch { path } => {
            run_watch(&path)?;
        }
    }

    Ok(())
}

/// Compile a name pattern, rejecting empty input.
fn compile_pattern(pattern: &str, platform: &Platform) -> Result<NamePattern> {
    if pattern.is_empty() {
        bail!("File pattern cannot be empty.");
    }
    Ok(NamePattern::with_convention(pattern, platform.convention)?)
}

/// Validate content-search flags and build the query.
fn content_query(needle: &str, file_type: &str, max_size_kb: i64) -> Result<ContentQuery> {
    if needle.is_empty() {
        bail!("Search string cannot be empty.");
    }
    if file_type.is_empty() {
        bail!("File type cannot be empty.");
    }
    if max_size_kb <= 0 {
        bail!("Max file size must be greater than 0.");
    }

    Ok(ContentQuery::with_max_size_kb(file_type, max_size_kb as u64, needle))
}

/// Count matching entries across all roots.
fn run_count(roots: &[PathBuf], pattern: &NamePattern, format: OutputFormat) -> Result<()> {
    let count = count_files(roots, &WalkConfig::default(), pattern).context("Count failed")?;

    match format {
        OutputFormat::Text => {
            println!("Found {} files matching pattern '{}'", count, pattern);
        }
        OutputFormat::Json => {
            let value = serde_json::json!({ "pattern": pattern.as_str(), "count": count });
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
    }

    Ok(())
}

/// List matching entries across all roots.
fn run_find(roots: &[PathBuf], pattern: &NamePattern, format: OutputFormat) -> Result<()> {
    let files = find_files(roots, &WalkConfig::default(), pattern).context("Search failed")?;
    print_paths(&files, format)
}

/// Search file contents across all roots.
fn run_content(roots: &[PathBuf], query: &ContentQuery, format: OutputFormat) -> Result<()> {
    tracing::info!(
        "Looking for '{}' in {} files up to {}",
        query.needle,
        query.extension,
        humansize::format_size(query.max_size_bytes, humansize::BINARY)
    );

    let files =
        find_by_content(roots, &WalkConfig::default(), query).context("Content search failed")?;
    print_paths(&files, format)
}

/// Run a batch operation over all roots.
fn run_operation(
    roots: Vec<PathBuf>,
    pattern: &NamePattern,
    operation: FileOperation,
) -> Result<OperationComplete> {
    let executor = OperationExecutor::new(roots, WalkConfig::default());
    executor
        .execute(&operation, pattern)
        .context("Operation failed")
}

/// List entries modified inside a window.
fn run_changes(path: &Path, window: TimeWindow, format: OutputFormat) -> Result<()> {
    let changes = changed_between(path, &WalkConfig::default(), window)
        .with_context(|| format!("Failed to list changes in {}", path.display()))?;

    match format {
        OutputFormat::Text => {
            for change in &changes {
                println!(
                    "{}  {}",
                    change.modified.format("%Y-%m-%d %H:%M:%S"),
                    change.path.display()
                );
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&changes)?);
        }
    }

    Ok(())
}

/// Block on the watcher until the backend shuts down.
fn run_watch(path: &Path) -> Result<()> {
    let summary = watch(path, &mut TracingSink)
        .with_context(|| format!("Failed to watch {}", path.display()))?;

    eprintln!(
        "Watcher stopped: {} changes, {} ignored, {} errors",
        summary.changes, summary.unclassified, summary.errors
    );

    Ok(())
}

/// Print a list of paths.
fn print_paths(paths: &[PathBuf], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => {
            for path in paths {
                println!("{}", path.display());
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(paths)?);
        }
    }

    Ok(())
}

/// Print an operation summary, with per-file failures on stderr.
fn print_report(report: &OperationComplete) {
    println!("{}", report.summary());
    for error in &report.errors {
        eprintln!("  {}", error);
    }
}

/// Parse a date given as RFC 3339 or as `YYYY-MM-DD` (local midnight).
fn parse_date(s: &str) -> Result<DateTime<Local>> {
    let s = s.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Local));
    }

    let date = NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| eyre!("Invalid date '{}': expected RFC 3339 or YYYY-MM-DD", s))?;
    let midnight = date
        .and_hms_opt(0, 0, 0)
        .ok_or_else(|| eyre!("Invalid date '{}'", s))?;

    Local
        .from_local_datetime(&midnight)
        .earliest()
        .ok_or_else(|| eyre!("Date '{}' does not exist in the local time zone", s))
}
