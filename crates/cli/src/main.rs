// Stockroom CLI - inventory catalog reports and lookups

mod exit_codes;
mod load;
mod query;
mod report;

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use serde::Serialize;
use stockroom_catalog::{CatalogError, IngestReport};

use exit_codes::{
    EXIT_ERROR, EXIT_INVALID_CONFIG, EXIT_IO, EXIT_MALFORMED_RECORD, EXIT_REPORT_COLLISION,
    EXIT_SUCCESS, EXIT_USAGE,
};
use load::CatalogArgs;

#[derive(Parser)]
#[command(name = "stockroom")]
#[command(about = "Inventory catalog: reports from three keyed sources, interactive lookup")]
#[command(version)]
#[command(subcommand_required = false)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the full, per-type, past-service and damaged inventory reports
    #[command(after_help = "\
Examples:
  stockroom report
  stockroom report --data-dir data --out-dir out
  stockroom report --config stockroom.toml --json
  stockroom report --today 10/18/2026")]
    Report {
        #[command(flatten)]
        catalog: CatalogArgs,

        /// Directory for report files [default: the data directory]
        #[arg(long, short = 'o')]
        out_dir: Option<PathBuf>,

        /// Print a JSON summary of the generated reports to stdout
        #[arg(long)]
        json: bool,

        /// Don't list written files on stderr
        #[arg(long, short = 'q')]
        quiet: bool,
    },

    /// Look up an item by manufacturer and type (interactive without TEXT)
    #[command(after_help = "\
Examples:
  stockroom query apple phone
  stockroom query --json dell laptop
  stockroom query                     # interactive, 'q' to quit")]
    Query {
        #[command(flatten)]
        catalog: CatalogArgs,

        /// Print the result as JSON (one-shot mode only)
        #[arg(long, requires = "text")]
        json: bool,

        /// Free-text query, e.g. "apple phone"
        text: Vec<String>,
    },

    /// Write all reports, then start the interactive lookup
    Run {
        #[command(flatten)]
        catalog: CatalogArgs,

        /// Directory for report files [default: the data directory]
        #[arg(long, short = 'o')]
        out_dir: Option<PathBuf>,
    },

    /// Check the config and sources without writing anything
    #[command(after_help = "\
Examples:
  stockroom validate
  stockroom validate --config stockroom.toml --json")]
    Validate {
        #[command(flatten)]
        catalog: CatalogArgs,

        /// Print per-source ingest results as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    init_logging();
    let cli = Cli::parse();

    let result = match cli.command {
        None => {
            // No subcommand = show usage
            eprintln!("Usage: stockroom <command> [options]");
            eprintln!("       stockroom --help for more information");
            Err(CliError { code: EXIT_USAGE, message: String::new(), hint: None })
        }
        Some(Commands::Report { catalog, out_dir, json, quiet }) => {
            report::cmd_report(catalog, out_dir, json, quiet)
        }
        Some(Commands::Query { catalog, json, text }) => query::cmd_query(catalog, text, json),
        Some(Commands::Run { catalog, out_dir }) => cmd_run(catalog, out_dir),
        Some(Commands::Validate { catalog, json }) => cmd_validate(catalog, json),
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

/// Log to stderr, filtered by RUST_LOG (default: warn). `log` records from
/// the catalog crate arrive through the tracing-log bridge.
fn init_logging() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn io(msg: impl Into<String>) -> Self {
        Self { code: EXIT_IO, message: msg.into(), hint: None }
    }

    pub fn stdout(err: io::Error) -> Self {
        Self::io(format!("cannot write output: {err}"))
    }

    pub fn json(err: serde_json::Error) -> Self {
        Self { code: EXIT_ERROR, message: format!("JSON serialization error: {err}"), hint: None }
    }

    /// Add a hint to an existing error.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

impl From<CatalogError> for CliError {
    fn from(err: CatalogError) -> Self {
        let (code, hint) = match &err {
            CatalogError::MalformedRecord { .. } => (
                EXIT_MALFORMED_RECORD,
                Some("fix the line, or set on_malformed = \"skip\" under [ingest]".to_string()),
            ),
            CatalogError::ConfigParse(_) | CatalogError::ConfigValidation(_) => {
                (EXIT_INVALID_CONFIG, None)
            }
            CatalogError::DestinationCollision { .. } => (
                EXIT_REPORT_COLLISION,
                Some("item types differing only in case need distinct spellings".to_string()),
            ),
            CatalogError::Io(_) => (EXIT_IO, None),
        };
        let cli_err = Self { code, message: err.to_string(), hint: None };
        match hint {
            Some(hint) => cli_err.with_hint(hint),
            None => cli_err,
        }
    }
}

// ============================================================================
// run
// ============================================================================

fn cmd_run(catalog: CatalogArgs, out_dir: Option<PathBuf>) -> Result<(), CliError> {
    let loaded = load::load_catalog(&catalog)?;
    let today = catalog.today();
    let out_dir = out_dir.unwrap_or_else(|| loaded.data_dir.clone());

    let (written, _) = report::write_reports(&loaded.store, &loaded.config.reports, today, &out_dir)?;
    for path in &written {
        eprintln!("wrote {}", path.display());
    }

    query::run_interactive(&loaded.store, &loaded.config.query, today)
}

// ============================================================================
// validate
// ============================================================================

#[derive(Serialize)]
struct ValidateOutput<'a> {
    data_dir: String,
    items: usize,
    sources: &'a [IngestReport],
}

fn cmd_validate(catalog: CatalogArgs, json: bool) -> Result<(), CliError> {
    let loaded = load::load_catalog(&catalog)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();

    if json {
        let output = ValidateOutput {
            data_dir: loaded.data_dir.display().to_string(),
            items: loaded.store.len(),
            sources: &loaded.ingest,
        };
        let json_str = serde_json::to_string_pretty(&output).map_err(CliError::json)?;
        writeln!(out, "{json_str}").map_err(CliError::stdout)?;
        return Ok(());
    }

    for report in &loaded.ingest {
        writeln!(
            out,
            "{:<14} {} loaded, {} skipped",
            report.source.to_string(),
            report.loaded,
            report.skipped.len()
        )
        .map_err(CliError::stdout)?;
        for err in &report.skipped {
            writeln!(out, "  {err}").map_err(CliError::stdout)?;
        }
    }
    writeln!(out, "{} item(s) in catalog", loaded.store.len()).map_err(CliError::stdout)?;
    Ok(())
}
