//! `stockroom report` — write the four catalog reports.

use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use stockroom_catalog::config::ReportsConfig;
use stockroom_catalog::emit::render_reports;
use stockroom_catalog::{CatalogReports, RecordStore, ReportSummary};

use crate::load::{load_catalog, CatalogArgs};
use crate::CliError;

pub fn cmd_report(
    catalog: CatalogArgs,
    out_dir: Option<PathBuf>,
    json: bool,
    quiet: bool,
) -> Result<(), CliError> {
    let loaded = load_catalog(&catalog)?;
    let out_dir = out_dir.unwrap_or_else(|| loaded.data_dir.clone());

    let (written, summary) =
        write_reports(&loaded.store, &loaded.config.reports, catalog.today(), &out_dir)?;

    if !quiet {
        for path in &written {
            eprintln!("wrote {}", path.display());
        }
    }

    if json {
        let json_str = serde_json::to_string_pretty(&summary).map_err(CliError::json)?;
        writeln!(std::io::stdout(), "{json_str}").map_err(CliError::stdout)?;
    }
    Ok(())
}

/// Generate, render and write every report into `out_dir`.
///
/// All reports are rendered before the first file is written, so a
/// destination collision leaves the directory untouched.
pub fn write_reports(
    store: &RecordStore,
    config: &ReportsConfig,
    today: NaiveDate,
    out_dir: &Path,
) -> Result<(Vec<PathBuf>, ReportSummary), CliError> {
    let reports = CatalogReports::generate(store, today);
    let rendered = render_reports(&reports, config)?;

    std::fs::create_dir_all(out_dir)
        .map_err(|e| CliError::io(format!("cannot create {}: {e}", out_dir.display())))?;

    let mut written = Vec::with_capacity(rendered.len());
    for report in rendered {
        let path = out_dir.join(&report.file_name);
        std::fs::write(&path, report.contents)
            .map_err(|e| CliError::io(format!("cannot write {}: {e}", path.display())))?;
        log::debug!("wrote {}", path.display());
        written.push(path);
    }
    Ok((written, reports.summary()))
}
