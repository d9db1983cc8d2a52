//! Free-text lookup: "<manufacturer> <item type>" → best in-stock item plus a
//! price-comparable alternative from another manufacturer.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::Serialize;

use crate::model::JoinedItem;
use crate::store::RecordStore;

// ---------------------------------------------------------------------------
// Outcome types
// ---------------------------------------------------------------------------

/// Why a query produced nothing. Never fatal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum NoMatch {
    UnknownManufacturer,
    AmbiguousManufacturer { tokens: Vec<String> },
    UnknownItemType,
    AmbiguousItemType { tokens: Vec<String> },
    NoEligibleItem { manufacturer: String, item_type: String },
}

impl std::fmt::Display for NoMatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownManufacturer => write!(f, "no known manufacturer in query"),
            Self::AmbiguousManufacturer { tokens } => {
                write!(f, "more than one manufacturer in query: {}", tokens.join(", "))
            }
            Self::UnknownItemType => write!(f, "no known item type in query"),
            Self::AmbiguousItemType { tokens } => {
                write!(f, "more than one item type in query: {}", tokens.join(", "))
            }
            Self::NoEligibleItem { manufacturer, item_type } => {
                write!(f, "no available {manufacturer} {item_type}")
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryMatch<'a> {
    /// Resolved (lowercased) manufacturer token.
    pub manufacturer: String,
    /// Resolved (lowercased) item type token.
    pub item_type: String,
    pub primary: JoinedItem<'a>,
    pub alternative: Option<JoinedItem<'a>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum QueryOutcome<'a> {
    Found(QueryMatch<'a>),
    NoMatch(NoMatch),
}

// ---------------------------------------------------------------------------
// Resolution
// ---------------------------------------------------------------------------

/// Lowercase whitespace-separated tokens.
pub fn tokenize(input: &str) -> Vec<String> {
    input.split_whitespace().map(str::to_lowercase).collect()
}

/// Pick exactly one manufacturer token and exactly one item type token.
///
/// Tokens are counted, not deduplicated: "acme acme widget" is ambiguous.
/// A token naming both a manufacturer and a type counts toward both.
pub fn disambiguate(
    tokens: &[String],
    manufacturers: &BTreeSet<String>,
    item_types: &BTreeSet<String>,
) -> Result<(String, String), NoMatch> {
    let matched_manufacturers: Vec<String> =
        tokens.iter().filter(|t| manufacturers.contains(*t)).cloned().collect();
    let matched_types: Vec<String> =
        tokens.iter().filter(|t| item_types.contains(*t)).cloned().collect();

    let manufacturer = match matched_manufacturers.len() {
        0 => return Err(NoMatch::UnknownManufacturer),
        1 => matched_manufacturers[0].clone(),
        _ => return Err(NoMatch::AmbiguousManufacturer { tokens: matched_manufacturers }),
    };
    let item_type = match matched_types.len() {
        0 => return Err(NoMatch::UnknownItemType),
        1 => matched_types[0].clone(),
        _ => return Err(NoMatch::AmbiguousItemType { tokens: matched_types }),
    };
    Ok((manufacturer, item_type))
}

/// Resolve one query against the current store contents.
///
/// `today` is the availability boundary: items serviced before it are out of
/// stock, items serviced on it are still available.
pub fn resolve<'a>(store: &'a RecordStore, input: &str, today: NaiveDate) -> QueryOutcome<'a> {
    let tokens = tokenize(input);
    let (manufacturer, item_type) =
        match disambiguate(&tokens, &store.manufacturers(), &store.item_types()) {
            Ok(pair) => pair,
            Err(reason) => return no_match(input, reason),
        };

    let eligible: Vec<JoinedItem<'a>> = store
        .joined_items()
        .into_iter()
        .filter(|item| item.item_type.to_lowercase() == item_type && item.is_available(today))
        .collect();

    let (own, others): (Vec<_>, Vec<_>) = eligible
        .into_iter()
        .partition(|item| item.manufacturer.to_lowercase() == manufacturer);

    let Some(primary) = most_expensive(&own) else {
        return no_match(input, NoMatch::NoEligibleItem { manufacturer, item_type });
    };
    let alternative = closest_price(&others, primary.price);

    QueryOutcome::Found(QueryMatch { manufacturer, item_type, primary, alternative })
}

fn no_match<'a>(input: &str, reason: NoMatch) -> QueryOutcome<'a> {
    log::debug!("query {input:?}: {reason}");
    QueryOutcome::NoMatch(reason)
}

/// Highest price; the first one seen wins a tie.
fn most_expensive<'a>(items: &[JoinedItem<'a>]) -> Option<JoinedItem<'a>> {
    let mut best: Option<JoinedItem<'a>> = None;
    for item in items {
        if best.map_or(true, |b| item.price > b.price) {
            best = Some(*item);
        }
    }
    best
}

/// Smallest absolute price difference to `target`; the first one seen wins a tie.
fn closest_price<'a>(items: &[JoinedItem<'a>], target: f64) -> Option<JoinedItem<'a>> {
    let mut best: Option<(f64, JoinedItem<'a>)> = None;
    for item in items {
        let distance = (item.price - target).abs();
        if best.map_or(true, |(d, _)| distance < d) {
            best = Some((distance, *item));
        }
    }
    best.map(|(_, item)| item)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
