use chrono::NaiveDate;
use serde::Serialize;

/// Date format shared by the service source and every report.
pub const DATE_FORMAT: &str = "%m/%d/%Y";

/// Parse MM/DD/YYYY with a four-digit year. chrono's `%Y` alone would also
/// accept short or signed years.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    let year = raw.rsplit('/').next()?;
    if year.len() != 4 || !year.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    NaiveDate::parse_from_str(raw, DATE_FORMAT).ok()
}

// ---------------------------------------------------------------------------
// Sources
// ---------------------------------------------------------------------------

/// The three independently-maintained inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    Attributes,
    Prices,
    ServiceDates,
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Attributes => write!(f, "attributes"),
            Self::Prices => write!(f, "prices"),
            Self::ServiceDates => write!(f, "service_dates"),
        }
    }
}

// ---------------------------------------------------------------------------
// Stored records
// ---------------------------------------------------------------------------

/// Identity row from the attributes source. The join anchor.
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeRecord {
    pub identifier: String,
    pub manufacturer: String,
    pub item_type: String,
    /// Present only when the source carried a non-empty marker.
    pub damaged: Option<String>,
}

// ---------------------------------------------------------------------------
// Joined view
// ---------------------------------------------------------------------------

/// One attribute record combined with its price and service date.
///
/// Borrowed from the store and rebuilt on every `joined_items()` call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct JoinedItem<'a> {
    pub identifier: &'a str,
    pub manufacturer: &'a str,
    pub item_type: &'a str,
    /// 0 when the price source has no entry.
    pub price: f64,
    /// False when `price` is the 0 default rather than a listed value.
    #[serde(skip)]
    pub price_listed: bool,
    #[serde(serialize_with = "serialize_date")]
    pub service_date: Option<NaiveDate>,
    pub damaged: Option<&'a str>,
}

impl JoinedItem<'_> {
    pub fn is_damaged(&self) -> bool {
        self.damaged.is_some_and(|marker| !marker.is_empty())
    }

    /// Overdue means a recorded service date strictly before `today`.
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        self.service_date.is_some_and(|date| date < today)
    }

    /// Available for sale: not damaged and not past service. Items without a
    /// service date count as available.
    pub fn is_available(&self, today: NaiveDate) -> bool {
        !self.is_damaged() && self.service_date.map_or(true, |date| date >= today)
    }
}

fn serialize_date<S: serde::Serializer>(
    date: &Option<NaiveDate>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match date {
        Some(d) => serializer.serialize_some(&d.format(DATE_FORMAT).to_string()),
        None => serializer.serialize_none(),
    }
}
