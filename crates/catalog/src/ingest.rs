//! Line-oriented source parsing: `identifier, field[, field]` with no header.

use csv::{ReaderBuilder, StringRecord, Trim};
use serde::Serialize;

use crate::config::MalformedPolicy;
use crate::error::CatalogError;
use crate::model::SourceKind;
use crate::store::RecordStore;

/// Outcome of loading one source.
#[derive(Debug, Clone, Serialize)]
pub struct IngestReport {
    pub source: SourceKind,
    pub loaded: usize,
    /// Lines dropped under [`MalformedPolicy::Skip`]; always empty under `Abort`.
    #[serde(serialize_with = "serialize_errors")]
    pub skipped: Vec<CatalogError>,
}

fn serialize_errors<S: serde::Serializer>(
    errors: &[CatalogError],
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(errors.iter().map(|e| e.to_string()))
}

/// Load `identifier, manufacturer, item_type[, damaged]` lines.
pub fn ingest_attributes(
    store: &mut RecordStore,
    text: &str,
    policy: MalformedPolicy,
) -> Result<IngestReport, CatalogError> {
    ingest_lines(SourceKind::Attributes, text, policy, |record| {
        let identifier = field(record, 0);
        let manufacturer = field(record, 1);
        let item_type = field(record, 2);
        let damaged = record.iter().skip(3).find(|f| !f.is_empty());
        store.upsert_attribute(identifier, manufacturer, item_type, damaged)
    })
}

/// Load `identifier, price` lines.
pub fn ingest_prices(
    store: &mut RecordStore,
    text: &str,
    policy: MalformedPolicy,
) -> Result<IngestReport, CatalogError> {
    ingest_lines(SourceKind::Prices, text, policy, |record| {
        let identifier = field(record, 0);
        if record.len() < 2 {
            return Err(CatalogError::malformed(SourceKind::Prices, identifier, "missing price"));
        }
        store.upsert_price(identifier, field(record, 1))
    })
}

/// Load `identifier, MM/DD/YYYY` lines.
pub fn ingest_service_dates(
    store: &mut RecordStore,
    text: &str,
    policy: MalformedPolicy,
) -> Result<IngestReport, CatalogError> {
    ingest_lines(SourceKind::ServiceDates, text, policy, |record| {
        let identifier = field(record, 0);
        if record.len() < 2 {
            return Err(CatalogError::malformed(
                SourceKind::ServiceDates,
                identifier,
                "missing service date",
            ));
        }
        store.upsert_service_date(identifier, field(record, 1))
    })
}

/// Build a store from the text of all three sources.
pub fn load_store(
    attributes: &str,
    prices: &str,
    service_dates: &str,
    policy: MalformedPolicy,
) -> Result<(RecordStore, Vec<IngestReport>), CatalogError> {
    let mut store = RecordStore::new();
    let reports = vec![
        ingest_attributes(&mut store, attributes, policy)?,
        ingest_prices(&mut store, prices, policy)?,
        ingest_service_dates(&mut store, service_dates, policy)?,
    ];
    Ok((store, reports))
}

fn field(record: &StringRecord, idx: usize) -> &str {
    record.get(idx).unwrap_or("")
}

fn ingest_lines<F>(
    source: SourceKind,
    text: &str,
    policy: MalformedPolicy,
    mut apply: F,
) -> Result<IngestReport, CatalogError>
where
    F: FnMut(&StringRecord) -> Result<(), CatalogError>,
{
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .quoting(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(text.as_bytes());

    let mut report = IngestReport { source, loaded: 0, skipped: Vec::new() };

    for record in reader.records() {
        let record = record.map_err(|e| CatalogError::Io(e.to_string()))?;
        // whitespace-only lines
        if record.iter().all(str::is_empty) {
            continue;
        }
        let line_no = record.position().map(|p| p.line()).unwrap_or_default();

        match apply(&record) {
            Ok(()) => report.loaded += 1,
            Err(err) => {
                let err = err.at_line(line_no);
                match policy {
                    MalformedPolicy::Abort => return Err(err),
                    MalformedPolicy::Skip => {
                        log::warn!("skipping malformed line: {err}");
                        report.skipped.push(err);
                    }
                }
            }
        }
    }

    log::debug!(
        "{source}: loaded {} record(s), skipped {}",
        report.loaded,
        report.skipped.len()
    );
    Ok(report)
}
