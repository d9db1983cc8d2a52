//! Text rendering for reports and query results.
//!
//! Fields are joined with ", ". Missing dates and damage markers render as
//! empty strings.

use std::collections::HashMap;

use crate::config::ReportsConfig;
use crate::error::CatalogError;
use crate::model::{JoinedItem, DATE_FORMAT};
use crate::query::QueryOutcome;
use crate::report::{CatalogReports, TypeCatalog};

pub const NO_SUCH_ITEM: &str = "No such item in inventory";

fn date_field(item: &JoinedItem<'_>) -> String {
    item.service_date
        .map(|d| d.format(DATE_FORMAT).to_string())
        .unwrap_or_default()
}

/// Shortest decimal that round-trips, whole values keeping one decimal place:
/// `10.0`, `999.99`.
pub fn format_price(price: f64) -> String {
    format!("{price:?}")
}

/// A listed price renders through `format_price`. The 0 default for an
/// unlisted item renders as a bare `0`.
fn price_field(item: &JoinedItem<'_>) -> String {
    if item.price_listed {
        format_price(item.price)
    } else {
        "0".to_string()
    }
}

/// `identifier, manufacturer, item_type, price, service_date, damaged`
pub fn full_line(item: &JoinedItem<'_>) -> String {
    format!(
        "{}, {}, {}, {}, {}, {}",
        item.identifier,
        item.manufacturer,
        item.item_type,
        price_field(item),
        date_field(item),
        item.damaged.unwrap_or(""),
    )
}

/// `identifier, manufacturer, price, service_date, damaged`
pub fn type_line(item: &JoinedItem<'_>) -> String {
    format!(
        "{}, {}, {}, {}, {}",
        item.identifier,
        item.manufacturer,
        price_field(item),
        date_field(item),
        item.damaged.unwrap_or(""),
    )
}

/// `identifier, manufacturer, item_type, price, service_date`
pub fn damaged_line(item: &JoinedItem<'_>) -> String {
    format!(
        "{}, {}, {}, {}, {}",
        item.identifier,
        item.manufacturer,
        item.item_type,
        price_field(item),
        date_field(item),
    )
}

/// `identifier, manufacturer, item_type, price`
pub fn query_line(item: &JoinedItem<'_>) -> String {
    format!(
        "{}, {}, {}, {}",
        item.identifier,
        item.manufacturer,
        item.item_type,
        price_field(item),
    )
}

/// First character upper-cased, the rest lower-cased: "sMART phone" → "Smart phone".
pub fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Per-type destination: capitalized type name plus the configured suffix.
pub fn type_file_name(item_type: &str, suffix: &str) -> String {
    format!("{}{suffix}", capitalize(item_type))
}

/// Lines of one report file, newline-terminated.
pub fn render_lines<F>(items: &[JoinedItem<'_>], line: F) -> String
where
    F: Fn(&JoinedItem<'_>) -> String,
{
    let mut out = String::new();
    for item in items {
        out.push_str(&line(item));
        out.push('\n');
    }
    out
}

/// A rendered report: destination file name and its contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedReport {
    pub file_name: String,
    pub contents: String,
}

/// Render all four reports to their configured destinations.
///
/// Fails when two distinct item types would share a per-type file, so that no
/// partition silently overwrites another.
pub fn render_reports(
    reports: &CatalogReports<'_>,
    config: &ReportsConfig,
) -> Result<Vec<RenderedReport>, CatalogError> {
    let mut rendered = vec![RenderedReport {
        file_name: config.full.clone(),
        contents: render_lines(&reports.full, full_line),
    }];

    let mut claimed: HashMap<String, &str> = HashMap::new();
    for TypeCatalog { item_type, items } in &reports.by_type {
        let file_name = type_file_name(item_type, &config.type_suffix);
        if let Some(other) = claimed.insert(file_name.clone(), *item_type) {
            return Err(CatalogError::DestinationCollision {
                item_type: item_type.to_string(),
                other: other.to_string(),
                file_name,
            });
        }
        rendered.push(RenderedReport { file_name, contents: render_lines(items, type_line) });
    }

    rendered.push(RenderedReport {
        file_name: config.overdue.clone(),
        contents: render_lines(&reports.overdue, full_line),
    });
    rendered.push(RenderedReport {
        file_name: config.damaged.clone(),
        contents: render_lines(&reports.damaged, damaged_line),
    });
    Ok(rendered)
}

/// Console lines for one query result.
pub fn render_query_outcome(outcome: &QueryOutcome<'_>) -> Vec<String> {
    match outcome {
        QueryOutcome::Found(m) => {
            let mut lines = vec![format!("Your item is: {}", query_line(&m.primary))];
            if let Some(alt) = &m.alternative {
                lines.push(format!("You may, also, consider: {}", query_line(alt)));
            }
            lines
        }
        QueryOutcome::NoMatch(_) => vec![NO_SUCH_ITEM.to_string()],
    }
}
