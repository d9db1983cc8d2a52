use serde::Deserialize;

use crate::error::CatalogError;

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// Catalog configuration. Every section is optional; an empty TOML document
/// yields the stock file names.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CatalogConfig {
    #[serde(default)]
    pub sources: SourcesConfig,
    #[serde(default)]
    pub reports: ReportsConfig,
    #[serde(default)]
    pub ingest: IngestConfig,
    #[serde(default)]
    pub query: QueryConfig,
}

// ---------------------------------------------------------------------------
// Sources + Reports
// ---------------------------------------------------------------------------

/// Input files, relative to the data directory unless absolute.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SourcesConfig {
    pub attributes: String,
    pub prices: String,
    pub service_dates: String,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            attributes: "ManufacturerList.txt".into(),
            prices: "PriceList.txt".into(),
            service_dates: "ServiceDatesList.txt".into(),
        }
    }
}

/// Report destinations, relative to the output directory.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReportsConfig {
    pub full: String,
    pub overdue: String,
    pub damaged: String,
    /// Appended to the capitalized item type: `Laptop` + `Inventory.txt`.
    pub type_suffix: String,
}

impl Default for ReportsConfig {
    fn default() -> Self {
        Self {
            full: "FullInventory.txt".into(),
            overdue: "PastServiceDateInventory.txt".into(),
            damaged: "DamagedInventory.txt".into(),
            type_suffix: "Inventory.txt".into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Ingest + Query
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MalformedPolicy {
    /// Stop at the first malformed line.
    #[default]
    Abort,
    /// Log and drop malformed lines.
    Skip,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IngestConfig {
    pub on_malformed: MalformedPolicy,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct QueryConfig {
    pub quit_token: String,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self { quit_token: "q".into() }
    }
}

impl QueryConfig {
    /// Case-insensitive, surrounding whitespace ignored.
    pub fn is_quit(&self, line: &str) -> bool {
        line.trim().eq_ignore_ascii_case(&self.quit_token)
    }
}

// ---------------------------------------------------------------------------
// Parse + Validate
// ---------------------------------------------------------------------------

impl CatalogConfig {
    pub fn from_toml(input: &str) -> Result<Self, CatalogError> {
        let config: CatalogConfig =
            toml::from_str(input).map_err(|e| CatalogError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), CatalogError> {
        let files = [
            ("sources.attributes", &self.sources.attributes),
            ("sources.prices", &self.sources.prices),
            ("sources.service_dates", &self.sources.service_dates),
            ("reports.full", &self.reports.full),
            ("reports.overdue", &self.reports.overdue),
            ("reports.damaged", &self.reports.damaged),
            ("reports.type_suffix", &self.reports.type_suffix),
        ];
        for (key, value) in files {
            if value.trim().is_empty() {
                return Err(CatalogError::ConfigValidation(format!("{key} must not be empty")));
            }
        }

        let token = &self.query.quit_token;
        if token.is_empty() || token.chars().any(char::is_whitespace) {
            return Err(CatalogError::ConfigValidation(format!(
                "query.quit_token must be a single non-empty word, got {token:?}"
            )));
        }

        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        let config = CatalogConfig::from_toml("").unwrap();
        assert_eq!(config.sources.attributes, "ManufacturerList.txt");
        assert_eq!(config.sources.prices, "PriceList.txt");
        assert_eq!(config.sources.service_dates, "ServiceDatesList.txt");
        assert_eq!(config.reports.full, "FullInventory.txt");
        assert_eq!(config.reports.overdue, "PastServiceDateInventory.txt");
        assert_eq!(config.reports.damaged, "DamagedInventory.txt");
        assert_eq!(config.reports.type_suffix, "Inventory.txt");
        assert_eq!(config.ingest.on_malformed, MalformedPolicy::Abort);
        assert_eq!(config.query.quit_token, "q");
    }

    #[test]
    fn parse_full_document() {
        let input = r#"
[sources]
attributes = "attrs.csv"
prices = "prices.csv"
service_dates = "service.csv"

[reports]
full = "all.txt"
type_suffix = "_stock.txt"

[ingest]
on_malformed = "skip"

[query]
quit_token = "exit"
"#;
        let config = CatalogConfig::from_toml(input).unwrap();
        assert_eq!(config.sources.attributes, "attrs.csv");
        assert_eq!(config.reports.full, "all.txt");
        // unspecified keys in a present section keep defaults
        assert_eq!(config.reports.damaged, "DamagedInventory.txt");
        assert_eq!(config.reports.type_suffix, "_stock.txt");
        assert_eq!(config.ingest.on_malformed, MalformedPolicy::Skip);
        assert!(config.query.is_quit("  EXIT "));
        assert!(!config.query.is_quit("q"));
    }

    #[test]
    fn reject_unknown_policy() {
        let err = CatalogConfig::from_toml("[ingest]\non_malformed = \"retry\"\n").unwrap_err();
        assert!(matches!(err, CatalogError::ConfigParse(_)));
    }

    #[test]
    fn reject_unknown_key() {
        let err = CatalogConfig::from_toml("[sources]\ninventory = \"x.txt\"\n").unwrap_err();
        assert!(matches!(err, CatalogError::ConfigParse(_)));
    }

    #[test]
    fn reject_empty_file_name() {
        let err = CatalogConfig::from_toml("[reports]\ndamaged = \"\"\n").unwrap_err();
        match err {
            CatalogError::ConfigValidation(msg) => assert!(msg.contains("reports.damaged")),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn reject_multiword_quit_token() {
        let err = CatalogConfig::from_toml("[query]\nquit_token = \"good bye\"\n").unwrap_err();
        assert!(matches!(err, CatalogError::ConfigValidation(_)));
        let err = CatalogConfig::from_toml("[query]\nquit_token = \"\"\n").unwrap_err();
        assert!(matches!(err, CatalogError::ConfigValidation(_)));
    }

    #[test]
    fn default_quit_token_is_case_insensitive() {
        let query = QueryConfig::default();
        assert!(query.is_quit("q"));
        assert!(query.is_quit("Q\n"));
        assert!(!query.is_quit("quit"));
    }
}
