//! Config resolution and source loading shared by every subcommand.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use clap::Args;
use stockroom_catalog::{CatalogConfig, IngestReport, RecordStore};

use crate::exit_codes::EXIT_IO;
use crate::CliError;

/// Options naming where the catalog comes from.
#[derive(Args, Debug, Clone)]
pub struct CatalogArgs {
    /// TOML config file (source and report file names, ingest policy)
    #[arg(long, short = 'c', env = "STOCKROOM_CONFIG")]
    pub config: Option<PathBuf>,

    /// Directory holding the source files [default: config file's directory, else .]
    #[arg(long, short = 'd')]
    pub data_dir: Option<PathBuf>,

    /// Evaluate service dates against this day (MM/DD/YYYY) instead of today
    #[arg(long, value_parser = parse_day)]
    pub today: Option<NaiveDate>,
}

impl CatalogArgs {
    pub fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| chrono::Local::now().date_naive())
    }
}

fn parse_day(s: &str) -> Result<NaiveDate, String> {
    stockroom_catalog::model::parse_date(s).ok_or_else(|| format!("expected MM/DD/YYYY, got '{s}'"))
}

/// A fully ingested catalog plus what it was built from.
pub struct LoadedCatalog {
    pub config: CatalogConfig,
    pub data_dir: PathBuf,
    pub store: RecordStore,
    pub ingest: Vec<IngestReport>,
}

pub fn load_config(args: &CatalogArgs) -> Result<(CatalogConfig, PathBuf), CliError> {
    let config = match &args.config {
        Some(path) => {
            let text = std::fs::read_to_string(path).map_err(|e| {
                CliError::io(format!("cannot read config {}: {e}", path.display()))
            })?;
            CatalogConfig::from_toml(&text)?
        }
        None => CatalogConfig::default(),
    };

    // Resolve source paths relative to the config file's directory
    let data_dir = match (&args.data_dir, &args.config) {
        (Some(dir), _) => dir.clone(),
        (None, Some(path)) => path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."))
            .to_path_buf(),
        (None, None) => PathBuf::from("."),
    };

    Ok((config, data_dir))
}

pub fn load_catalog(args: &CatalogArgs) -> Result<LoadedCatalog, CliError> {
    let (config, data_dir) = load_config(args)?;

    let read = |name: &str| -> Result<String, CliError> {
        let path = data_dir.join(name);
        std::fs::read_to_string(&path).map_err(|e| CliError {
            code: EXIT_IO,
            message: format!("cannot read {}: {e}", path.display()),
            hint: Some("use --data-dir or [sources] in the config to point at the source files".into()),
        })
    };

    let attributes = read(&config.sources.attributes)?;
    let prices = read(&config.sources.prices)?;
    let service_dates = read(&config.sources.service_dates)?;

    let (store, ingest) = stockroom_catalog::load_store(
        &attributes,
        &prices,
        &service_dates,
        config.ingest.on_malformed,
    )?;
    log::info!("loaded {} item(s) from {}", store.len(), data_dir.display());

    Ok(LoadedCatalog { config, data_dir, store, ingest })
}
