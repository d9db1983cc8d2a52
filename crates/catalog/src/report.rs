//! Ordered report sequences derived from the joined view.
//!
//! All sorts are stable: ties keep ingestion order.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::model::JoinedItem;
use crate::store::RecordStore;

/// All items by manufacturer (byte-wise, case-sensitive).
pub fn full_catalog(store: &RecordStore) -> Vec<JoinedItem<'_>> {
    let mut items = store.joined_items();
    items.sort_by(|a, b| a.manufacturer.cmp(b.manufacturer));
    items
}

/// Items of one exact item type, ordered by identifier.
#[derive(Debug, Clone, Serialize)]
pub struct TypeCatalog<'a> {
    pub item_type: &'a str,
    pub items: Vec<JoinedItem<'a>>,
}

/// One catalog per distinct item type, in order of first appearance.
pub fn type_catalogs(store: &RecordStore) -> Vec<TypeCatalog<'_>> {
    let mut catalogs: Vec<TypeCatalog<'_>> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for item in store.joined_items() {
        let slot = *index.entry(item.item_type).or_insert_with(|| {
            catalogs.push(TypeCatalog { item_type: item.item_type, items: Vec::new() });
            catalogs.len() - 1
        });
        catalogs[slot].items.push(item);
    }

    for catalog in &mut catalogs {
        catalog.items.sort_by(|a, b| a.identifier.cmp(b.identifier));
    }
    catalogs
}

/// Items whose service date is strictly before `today`, oldest first.
pub fn overdue_catalog(store: &RecordStore, today: NaiveDate) -> Vec<JoinedItem<'_>> {
    let mut items: Vec<_> = store
        .joined_items()
        .into_iter()
        .filter(|item| item.is_overdue(today))
        .collect();
    items.sort_by_key(|item| item.service_date);
    items
}

/// Damaged items, most expensive first.
pub fn damaged_catalog(store: &RecordStore) -> Vec<JoinedItem<'_>> {
    let mut items: Vec<_> = store
        .joined_items()
        .into_iter()
        .filter(|item| item.is_damaged())
        .collect();
    items.sort_by(|a, b| b.price.total_cmp(&a.price));
    items
}

// ---------------------------------------------------------------------------
// Bundle
// ---------------------------------------------------------------------------

/// The four reports generated against one date.
#[derive(Debug, Clone, Serialize)]
pub struct CatalogReports<'a> {
    pub generated_for: NaiveDate,
    pub full: Vec<JoinedItem<'a>>,
    pub by_type: Vec<TypeCatalog<'a>>,
    pub overdue: Vec<JoinedItem<'a>>,
    pub damaged: Vec<JoinedItem<'a>>,
}

impl<'a> CatalogReports<'a> {
    pub fn generate(store: &'a RecordStore, today: NaiveDate) -> Self {
        Self {
            generated_for: today,
            full: full_catalog(store),
            by_type: type_catalogs(store),
            overdue: overdue_catalog(store, today),
            damaged: damaged_catalog(store),
        }
    }

    pub fn summary(&self) -> ReportSummary {
        ReportSummary {
            generated_for: self.generated_for.format(crate::model::DATE_FORMAT).to_string(),
            total_items: self.full.len(),
            overdue_items: self.overdue.len(),
            damaged_items: self.damaged.len(),
            items_by_type: self
                .by_type
                .iter()
                .map(|c| TypeCount { item_type: c.item_type.to_string(), items: c.items.len() })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportSummary {
    pub generated_for: String,
    pub total_items: usize,
    pub overdue_items: usize,
    pub damaged_items: usize,
    pub items_by_type: Vec<TypeCount>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypeCount {
    pub item_type: String,
    pub items: usize,
}
