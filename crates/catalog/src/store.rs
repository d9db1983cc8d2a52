use std::collections::{BTreeSet, HashMap};

use chrono::NaiveDate;

use crate::error::CatalogError;
use crate::model::{parse_date, AttributeRecord, JoinedItem, SourceKind};

/// In-memory catalog: three maps keyed by item identifier.
///
/// Attribute records keep ingestion order; an overwrite replaces the record in
/// place so the identifier keeps its first position.
#[derive(Debug, Default, Clone)]
pub struct RecordStore {
    attributes: Vec<AttributeRecord>,
    attribute_index: HashMap<String, usize>,
    prices: HashMap<String, f64>,
    service_dates: HashMap<String, NaiveDate>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn upsert_attribute(
        &mut self,
        identifier: &str,
        manufacturer: &str,
        item_type: &str,
        damaged: Option<&str>,
    ) -> Result<(), CatalogError> {
        let source = SourceKind::Attributes;
        if identifier.is_empty() {
            return Err(CatalogError::malformed(source, identifier, "missing identifier"));
        }
        if manufacturer.is_empty() {
            return Err(CatalogError::malformed(source, identifier, "missing manufacturer"));
        }
        if item_type.is_empty() {
            return Err(CatalogError::malformed(source, identifier, "missing item type"));
        }

        let record = AttributeRecord {
            identifier: identifier.to_string(),
            manufacturer: manufacturer.to_string(),
            item_type: item_type.to_string(),
            damaged: damaged.filter(|m| !m.is_empty()).map(str::to_string),
        };

        match self.attribute_index.get(identifier) {
            Some(&idx) => self.attributes[idx] = record,
            None => {
                self.attribute_index.insert(identifier.to_string(), self.attributes.len());
                self.attributes.push(record);
            }
        }
        Ok(())
    }

    pub fn upsert_price(&mut self, identifier: &str, price: &str) -> Result<(), CatalogError> {
        let source = SourceKind::Prices;
        if identifier.is_empty() {
            return Err(CatalogError::malformed(source, identifier, "missing identifier"));
        }
        let value = parse_price(price)
            .ok_or_else(|| CatalogError::malformed(source, identifier, format!("cannot parse price '{price}'")))?;
        self.prices.insert(identifier.to_string(), value);
        Ok(())
    }

    pub fn upsert_service_date(&mut self, identifier: &str, date: &str) -> Result<(), CatalogError> {
        let source = SourceKind::ServiceDates;
        if identifier.is_empty() {
            return Err(CatalogError::malformed(source, identifier, "missing identifier"));
        }
        let value = parse_date(date)
            .ok_or_else(|| CatalogError::malformed(source, identifier, format!("cannot parse date '{date}'")))?;
        self.service_dates.insert(identifier.to_string(), value);
        Ok(())
    }

    /// One joined item per attribute record, in ingestion order.
    pub fn joined_items(&self) -> Vec<JoinedItem<'_>> {
        self.attributes
            .iter()
            .map(|record| JoinedItem {
                identifier: &record.identifier,
                manufacturer: &record.manufacturer,
                item_type: &record.item_type,
                price: self.prices.get(&record.identifier).copied().unwrap_or(0.0),
                price_listed: self.prices.contains_key(&record.identifier),
                service_date: self.service_dates.get(&record.identifier).copied(),
                damaged: record.damaged.as_deref(),
            })
            .collect()
    }

    /// Number of attribute records (= number of joined items).
    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    pub fn price_count(&self) -> usize {
        self.prices.len()
    }

    pub fn service_date_count(&self) -> usize {
        self.service_dates.len()
    }

    /// Distinct manufacturer names, lowercased.
    pub fn manufacturers(&self) -> BTreeSet<String> {
        self.attributes.iter().map(|r| r.manufacturer.to_lowercase()).collect()
    }

    /// Distinct item type names, lowercased.
    pub fn item_types(&self) -> BTreeSet<String> {
        self.attributes.iter().map(|r| r.item_type.to_lowercase()).collect()
    }
}

fn parse_price(raw: &str) -> Option<f64> {
    let value: f64 = raw.trim().parse().ok()?;
    if !value.is_finite() || value < 0.0 {
        return None;
    }
    // "-0" parses as negative zero
    Some(if value == 0.0 { 0.0 } else { value })
}
