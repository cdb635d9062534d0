//! # Tax Module
//!
//! Tax rates and the category → rate table.
//!
//! ## How Rates Are Resolved
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Rate Resolution                                   │
//! │                                                                         │
//! │  CartItem.categoria ──► TaxTable.rate_for("Alimentari") ──► 4.00%      │
//! │                                                                         │
//! │  ┌───────────────┬────────┐                                            │
//! │  │ Alimentari    │  4.0%  │                                            │
//! │  │ Medicinali    │ 10.0%  │                                            │
//! │  │ Altro         │ 22.0%  │                                            │
//! │  └───────────────┴────────┘                                            │
//! │                                                                         │
//! │  Unknown category ("Elettronica") ──► default rate 22.0%               │
//! │                                                                         │
//! │  The table is static configuration, loaded once at process start.      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 400 bps = 4.00% (Italian reduced VAT for staple food)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxRate(u32);

impl TaxRate {
    /// Creates a tax rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Creates a tax rate from a percentage (4.0 → 400 bps).
    pub fn from_percentage(pct: f64) -> Self {
        TaxRate((pct * 100.0).round() as u32)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Zero tax rate.
    #[inline]
    pub const fn zero() -> Self {
        TaxRate(0)
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        TaxRate::zero()
    }
}

// =============================================================================
// Tax Table
// =============================================================================

/// Fixed mapping from category label to VAT rate, with a default fallback.
///
/// A category not present in the table resolves to [`TaxTable::default_rate`].
/// The table is built once at startup and shared read-only afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaxTable {
    rates: HashMap<String, TaxRate>,
    default_rate: TaxRate,
}

impl TaxTable {
    /// Creates a table from explicit category rates and a default.
    pub fn new(rates: HashMap<String, TaxRate>, default_rate: TaxRate) -> Self {
        TaxTable {
            rates,
            default_rate,
        }
    }

    /// The standard Italian VAT table used unless configuration overrides it.
    ///
    /// Alimentari 4%, Medicinali 10%, Altro 22%; default 22%.
    pub fn standard() -> Self {
        let mut rates = HashMap::new();
        rates.insert("Alimentari".to_string(), TaxRate::from_percentage(4.0));
        rates.insert("Medicinali".to_string(), TaxRate::from_percentage(10.0));
        rates.insert("Altro".to_string(), TaxRate::from_percentage(22.0));
        TaxTable::new(rates, TaxRate::from_percentage(22.0))
    }

    /// Builds a table from a category → percentage map (config file shape).
    pub fn from_percentages(
        percentages: &HashMap<String, f64>,
        default_percentage: f64,
    ) -> Self {
        let rates = percentages
            .iter()
            .map(|(k, v)| (k.clone(), TaxRate::from_percentage(*v)))
            .collect();
        TaxTable::new(rates, TaxRate::from_percentage(default_percentage))
    }

    /// Resolves the rate for a category, falling back to the default.
    pub fn rate_for(&self, category: &str) -> TaxRate {
        self.rates
            .get(category)
            .copied()
            .unwrap_or(self.default_rate)
    }

    /// The fallback rate for unrecognized categories.
    #[inline]
    pub fn default_rate(&self) -> TaxRate {
        self.default_rate
    }

    /// All configured rates (used by the invariant sweep tests).
    pub fn rates(&self) -> impl Iterator<Item = (&str, TaxRate)> {
        self.rates.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

impl Default for TaxTable {
    fn default() -> Self {
        TaxTable::standard()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tax_rate_from_percentage() {
        assert_eq!(TaxRate::from_percentage(4.0).bps(), 400);
        assert_eq!(TaxRate::from_percentage(8.25).bps(), 825);
        assert_eq!(TaxRate::from_percentage(22.0).bps(), 2200);
    }

    #[test]
    fn test_standard_table_rates() {
        let table = TaxTable::standard();
        assert_eq!(table.rate_for("Alimentari").bps(), 400);
        assert_eq!(table.rate_for("Medicinali").bps(), 1000);
        assert_eq!(table.rate_for("Altro").bps(), 2200);
    }

    #[test]
    fn test_unknown_category_falls_back_to_default() {
        let table = TaxTable::standard();
        assert_eq!(table.rate_for("Elettronica").bps(), 2200);
        assert_eq!(table.rate_for("").bps(), 2200);
    }

    #[test]
    fn test_from_percentages() {
        let mut map = HashMap::new();
        map.insert("Libri".to_string(), 4.0);
        let table = TaxTable::from_percentages(&map, 20.0);
        assert_eq!(table.rate_for("Libri").bps(), 400);
        assert_eq!(table.rate_for("Qualunque").bps(), 2000);
    }
}
