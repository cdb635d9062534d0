//! API server configuration.
//!
//! Configuration is loaded from environment variables with fallback to
//! defaults. The tax table is static configuration: it is built once here
//! and never changes while the process runs.

use std::collections::HashMap;
use std::env;

use bottega_core::tax::TaxTable;

/// API server configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// HTTP listen port
    pub http_port: u16,

    /// MongoDB connection string
    pub mongodb_uri: String,

    /// MongoDB database name
    pub mongodb_db: String,

    /// Category → VAT percentage table (static, resolved at startup)
    pub tax_table: TaxTable,

    /// Base URL of the geocoding service (Nominatim-style search endpoint)
    pub geocoding_url: String,

    /// API key for the generative-language assistant (chat disabled if unset)
    pub gemini_api_key: Option<String>,

    /// Model name for the assistant
    pub gemini_model: String,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        let tax_table = match env::var("TAX_TABLE") {
            Ok(json) => parse_tax_table(&json)?,
            Err(_) => TaxTable::standard(),
        };

        Ok(AppConfig {
            http_port: env::var("HTTP_PORT")
                .unwrap_or_else(|_| "5000".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("HTTP_PORT".to_string()))?,

            mongodb_uri: env::var("MONGODB_URI")
                .unwrap_or_else(|_| "mongodb://localhost:27017".to_string()),

            mongodb_db: env::var("MONGODB_DB").unwrap_or_else(|_| "bottega".to_string()),

            tax_table,

            geocoding_url: env::var("GEOCODING_URL")
                .unwrap_or_else(|_| "https://nominatim.openstreetmap.org".to_string()),

            gemini_api_key: env::var("GEMINI_API_KEY").ok(),

            gemini_model: env::var("GEMINI_MODEL")
                .unwrap_or_else(|_| "gemini-1.5-flash".to_string()),
        })
    }
}

/// Parses a `TAX_TABLE` override.
///
/// Expected shape: `{"Alimentari": 4.0, "Medicinali": 10.0, "Altro": 22.0}`.
/// The entry keyed `"*"` (if present) overrides the default rate for
/// unrecognized categories; otherwise the default stays at 22%.
fn parse_tax_table(json: &str) -> Result<TaxTable, ConfigError> {
    let mut percentages: HashMap<String, f64> = serde_json::from_str(json)
        .map_err(|_| ConfigError::InvalidValue("TAX_TABLE".to_string()))?;

    if percentages.values().any(|p| !p.is_finite() || *p < 0.0) {
        return Err(ConfigError::InvalidValue("TAX_TABLE".to_string()));
    }

    let default_percentage = percentages.remove("*").unwrap_or(22.0);
    Ok(TaxTable::from_percentages(&percentages, default_percentage))
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tax_table_override() {
        let table = parse_tax_table(r#"{"Libri": 4.0, "*": 20.0}"#).unwrap();
        assert_eq!(table.rate_for("Libri").bps(), 400);
        assert_eq!(table.rate_for("Qualunque").bps(), 2000);
    }

    #[test]
    fn test_parse_tax_table_default_stays_standard() {
        let table = parse_tax_table(r#"{"Alimentari": 4.0}"#).unwrap();
        assert_eq!(table.rate_for("Alimentari").bps(), 400);
        assert_eq!(table.rate_for("Sconosciuta").bps(), 2200);
    }

    #[test]
    fn test_parse_tax_table_rejects_garbage() {
        assert!(parse_tax_table("not json").is_err());
        assert!(parse_tax_table(r#"{"X": -4.0}"#).is_err());
    }
}
