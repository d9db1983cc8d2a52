use std::path::PathBuf;

use chrono::NaiveDate;
use stockroom_catalog::config::{CatalogConfig, MalformedPolicy};
use stockroom_catalog::emit::{render_query_outcome, render_reports, RenderedReport, NO_SUCH_ITEM};
use stockroom_catalog::ingest::load_store;
use stockroom_catalog::{resolve, CatalogError, CatalogReports, RecordStore, SourceKind};

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn read_fixture(name: &str) -> String {
    let path = fixtures_dir().join(name);
    std::fs::read_to_string(&path).unwrap_or_else(|e| panic!("cannot read {}: {e}", path.display()))
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
}

fn load_fixtures() -> RecordStore {
    let config = CatalogConfig::default();
    let (store, _) = load_store(
        &read_fixture(&config.sources.attributes),
        &read_fixture(&config.sources.prices),
        &read_fixture(&config.sources.service_dates),
        config.ingest.on_malformed,
    )
    .unwrap();
    store
}

fn lines(rows: &[&str]) -> String {
    rows.iter().map(|r| format!("{r}\n")).collect()
}

fn contents_of(rendered: &[RenderedReport], name: &str) -> String {
    rendered
        .iter()
        .find(|r| r.file_name == name)
        .unwrap_or_else(|| panic!("no report named {name}"))
        .contents
        .clone()
}

fn query(store: &RecordStore, input: &str) -> Vec<String> {
    render_query_outcome(&resolve(store, input, today()))
}

// -------------------------------------------------------------------------
// Reports
// -------------------------------------------------------------------------

#[test]
fn fixture_reports_render() {
    let store = load_fixtures();
    assert_eq!(store.len(), 8);

    let reports = CatalogReports::generate(&store, today());
    let rendered = render_reports(&reports, &CatalogConfig::default().reports).unwrap();
    let file = |name: &str| contents_of(&rendered, name);

    assert_eq!(
        file("FullInventory.txt"),
        lines(&[
            "1167234, Apple, phone, 534.0, 10/18/2026, ",
            "2347800, Apple, laptop, 999.99, 07/03/2026, ",
            "2390112, Dell, laptop, 799.0, 03/01/2026, ",
            "9034210, Dell, tower, 345.0, 10/17/2026, ",
            "7346234, Lenovo, laptop, 239.0, 09/01/2026, damaged",
            "1009453, Lenovo, tower, 599.0, 12/01/2027, ",
            "3001265, Samsung, phone, 1200.0, , ",
            "5552221, Samsung, phone, 0, 01/15/2025, damaged",
        ])
    );

    assert_eq!(
        file("LaptopInventory.txt"),
        lines(&[
            "2347800, Apple, 999.99, 07/03/2026, ",
            "2390112, Dell, 799.0, 03/01/2026, ",
            "7346234, Lenovo, 239.0, 09/01/2026, damaged",
        ])
    );
    assert_eq!(
        file("PhoneInventory.txt"),
        lines(&[
            "1167234, Apple, 534.0, 10/18/2026, ",
            "3001265, Samsung, 1200.0, , ",
            "5552221, Samsung, 0, 01/15/2025, damaged",
        ])
    );
    assert_eq!(
        file("TowerInventory.txt"),
        lines(&[
            "1009453, Lenovo, 599.0, 12/01/2027, ",
            "9034210, Dell, 345.0, 10/17/2026, ",
        ])
    );

    // service date equal to today is not overdue; undated items never are
    assert_eq!(
        file("PastServiceDateInventory.txt"),
        lines(&[
            "5552221, Samsung, phone, 0, 01/15/2025, damaged",
            "2390112, Dell, laptop, 799.0, 03/01/2026, ",
            "2347800, Apple, laptop, 999.99, 07/03/2026, ",
            "7346234, Lenovo, laptop, 239.0, 09/01/2026, damaged",
            "9034210, Dell, tower, 345.0, 10/17/2026, ",
        ])
    );

    assert_eq!(
        file("DamagedInventory.txt"),
        lines(&[
            "7346234, Lenovo, laptop, 239.0, 09/01/2026",
            "5552221, Samsung, phone, 0, 01/15/2025",
        ])
    );
}

#[test]
fn fixture_summary() {
    let store = load_fixtures();
    let summary = CatalogReports::generate(&store, today()).summary();
    let json = serde_json::to_value(&summary).unwrap();
    assert_eq!(json["total_items"], 8);
    assert_eq!(json["overdue_items"], 5);
    assert_eq!(json["damaged_items"], 2);
    assert_eq!(json["items_by_type"][0]["item_type"], "phone");
    assert_eq!(json["items_by_type"][0]["items"], 3);
}

// -------------------------------------------------------------------------
// Queries
// -------------------------------------------------------------------------

#[test]
fn query_with_alternative() {
    let store = load_fixtures();
    assert_eq!(
        query(&store, "Apple phone"),
        vec![
            "Your item is: 1167234, Apple, phone, 534.0",
            "You may, also, consider: 3001265, Samsung, phone, 1200.0",
        ]
    );
    assert_eq!(
        query(&store, "phone samsung"),
        vec![
            "Your item is: 3001265, Samsung, phone, 1200.0",
            "You may, also, consider: 1167234, Apple, phone, 534.0",
        ]
    );
}

#[test]
fn query_without_alternative() {
    let store = load_fixtures();
    // the only other tower is past service
    assert_eq!(query(&store, "lenovo TOWER"), vec!["Your item is: 1009453, Lenovo, tower, 599.0"]);
}

#[test]
fn query_past_service_is_no_match() {
    let store = load_fixtures();
    assert_eq!(query(&store, "dell laptop"), vec![NO_SUCH_ITEM]);
    assert_eq!(query(&store, "apple laptop"), vec![NO_SUCH_ITEM]);
}

#[test]
fn query_nonsense_is_no_match() {
    let store = load_fixtures();
    for input in ["", "   ", "toaster", "apple dell phone", "apple phone laptop", "q"] {
        assert_eq!(query(&store, input), vec![NO_SUCH_ITEM], "input {input:?}");
    }
}

// -------------------------------------------------------------------------
// Ingestion policy
// -------------------------------------------------------------------------

#[test]
fn malformed_price_aborts_by_default() {
    let err = load_store(
        &read_fixture("ManufacturerList.txt"),
        &read_fixture("malformed-prices.txt"),
        "",
        MalformedPolicy::Abort,
    )
    .unwrap_err();
    match err {
        CatalogError::MalformedRecord { source, line, identifier, .. } => {
            assert_eq!(source, SourceKind::Prices);
            assert_eq!(line, Some(2));
            assert_eq!(identifier, "2347800");
        }
        other => panic!("expected MalformedRecord, got {other:?}"),
    }
}

#[test]
fn malformed_price_skipped_when_configured() {
    let config = CatalogConfig::from_toml("[ingest]\non_malformed = \"skip\"\n").unwrap();
    let (store, reports) = load_store(
        &read_fixture("ManufacturerList.txt"),
        &read_fixture("malformed-prices.txt"),
        "",
        config.ingest.on_malformed,
    )
    .unwrap();
    assert_eq!(reports[1].loaded, 2);
    assert_eq!(reports[1].skipped.len(), 1);
    let laptop = store
        .joined_items()
        .into_iter()
        .find(|i| i.identifier == "2347800")
        .unwrap();
    assert_eq!(laptop.price, 0.0);
}
