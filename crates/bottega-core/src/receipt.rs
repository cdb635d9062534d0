//! # Receipt Calculator
//!
//! The pricing engine: turns a cart into a finalized receipt.
//!
//! ## Calculation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Receipt Generation                                   │
//! │                                                                         │
//! │  For each cart line, in cart order:                                    │
//! │                                                                         │
//! │  gross ──► rate lookup ──► × (1 + rate) ──► floor to €0.05             │
//! │    │            (TaxTable,      │                 │                     │
//! │    │       default fallback)    │                 ▼                     │
//! │    │                            │        unit final price              │
//! │    │                            │                 │ × quantity          │
//! │    │                            │                 ▼                     │
//! │    │ × quantity                 │            line total ──► Σ grand     │
//! │    ▼                            │                                       │
//! │  Σ lordo (pre-tax) ─────────────┴──► tax = grand − lordo               │
//! │                                       (BY DIFFERENCE, so per-unit      │
//! │                                        rounding accumulates into the   │
//! │                                        reported tax figure)            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Purity
//! The calculator is a stateless, synchronous function of the cart plus the
//! tax table. It holds no mutable state and is safe to call concurrently;
//! persistence is the caller's job (checkout service).

use chrono::Utc;
use uuid::Uuid;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::tax::TaxTable;
use crate::types::{CartItem, Receipt, ReceiptLine};
use crate::validation::{validate_cart_size, validate_price_cents, validate_quantity};

/// The receipt calculation engine.
///
/// ## Usage
/// ```rust
/// use bottega_core::receipt::ReceiptCalculator;
/// use bottega_core::tax::TaxTable;
/// use bottega_core::types::CartItem;
///
/// let calc = ReceiptCalculator::new(TaxTable::standard());
/// let cart = vec![CartItem {
///     product_id: "p1".into(),
///     name: "Pane Casereccio".into(),
///     gross_price_cents: 241,
///     category: "Alimentari".into(),
///     quantity: 3,
/// }];
///
/// let receipt = calc.generate(&cart, "user-1").unwrap();
/// assert_eq!(receipt.grand_total_cents, 750);
/// assert_eq!(receipt.tax_total_cents, 27);
/// ```
#[derive(Debug, Clone)]
pub struct ReceiptCalculator {
    taxes: TaxTable,
}

impl ReceiptCalculator {
    /// Creates a calculator over a tax table.
    pub fn new(taxes: TaxTable) -> Self {
        ReceiptCalculator { taxes }
    }

    /// The tax table this calculator resolves rates against.
    pub fn tax_table(&self) -> &TaxTable {
        &self.taxes
    }

    /// Computes the tax-inclusive unit price for one product.
    ///
    /// Steps, per the pricing policy:
    /// 1. Resolve the category rate (default rate for unknown labels).
    /// 2. Apply the tax: `taxed = gross × (1 + rate/100)`.
    /// 3. Round DOWN to the nearest €0.05.
    ///
    /// ## Consistency Guard
    /// If the rounded final price lands below the gross price the whole
    /// calculation is rejected with [`CoreError::FinalBelowGross`] instead
    /// of silently returning a price that undercuts the pre-tax amount.
    /// With non-negative rates this cannot happen for euro-scale prices;
    /// it can for micro amounts (the 5-cent floor can eat more than a low
    /// rate adds on a €0.06 gross) or corrupt catalog data.
    pub fn unit_final_price(&self, name: &str, gross: Money, category: &str) -> CoreResult<Money> {
        let rate = self.taxes.rate_for(category);
        let final_price = gross.with_tax_floor_nickel(rate);

        if final_price < gross {
            return Err(CoreError::FinalBelowGross {
                product: name.to_string(),
                final_price: final_price.to_string(),
                gross_price: gross.to_string(),
            });
        }

        Ok(final_price)
    }

    /// Generates a receipt from a cart, in cart order.
    ///
    /// Preconditions: non-empty cart, positive quantities, prices within the
    /// MAX_PRICE_CENTS bound. Violation fails the whole operation atomically -
    /// no partial receipt exists. The price bound is re-checked here even
    /// though product creation enforces it: the calculator must return a
    /// typed error for corrupt catalog data, never overflow.
    ///
    /// The returned receipt is NOT persisted here; the checkout service
    /// persists it exactly once on success.
    pub fn generate(&self, cart: &[CartItem], user_id: &str) -> CoreResult<Receipt> {
        if cart.is_empty() {
            return Err(CoreError::EmptyCart);
        }
        validate_cart_size(cart.len())?;

        let mut lines = Vec::with_capacity(cart.len());
        let mut grand_total = Money::zero();
        let mut gross_total = Money::zero();

        for item in cart {
            validate_quantity(item.quantity)?;
            validate_price_cents(item.gross_price_cents)?;

            let unit_final = self.unit_final_price(&item.name, item.gross_price(), &item.category)?;
            let line_total = unit_final.multiply_quantity(item.quantity);

            lines.push(ReceiptLine {
                product_name: item.name.clone(),
                quantity: item.quantity,
                line_total_cents: line_total.cents(),
            });

            grand_total += line_total;
            // lordo running total, used only for the final tax derivation
            gross_total += item.gross_price().multiply_quantity(item.quantity);
        }

        let tax_total = grand_total - gross_total;

        Ok(Receipt {
            id: Uuid::new_v4().to_string(),
            lines,
            tax_total_cents: tax_total.cents(),
            grand_total_cents: grand_total.cents(),
            created_at: Utc::now(),
            user_id: user_id.to_string(),
        })
    }
}

impl Default for ReceiptCalculator {
    fn default() -> Self {
        ReceiptCalculator::new(TaxTable::standard())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn calc() -> ReceiptCalculator {
        ReceiptCalculator::new(TaxTable::standard())
    }

    fn item(name: &str, gross_cents: i64, category: &str, quantity: i64) -> CartItem {
        CartItem {
            product_id: format!("id-{name}"),
            name: name.to_string(),
            gross_price_cents: gross_cents,
            category: category.to_string(),
            quantity,
        }
    }

    // -------------------------------------------------------------------------
    // Unit final price
    // -------------------------------------------------------------------------

    #[test]
    fn test_unit_final_price_alimentari_scenario() {
        // €2.41 at 4%: 2.5064 → €2.50
        let price = calc()
            .unit_final_price("Pane", Money::from_cents(241), "Alimentari")
            .unwrap();
        assert_eq!(price.cents(), 250);
    }

    #[test]
    fn test_unit_final_price_unknown_category_uses_default() {
        // "Elettronica" is not in the table → default 22%: €10.00 → €12.20
        let price = calc()
            .unit_final_price("Cuffie", Money::from_cents(1000), "Elettronica")
            .unwrap();
        assert_eq!(price.cents(), 1220);
    }

    #[test]
    fn test_unit_final_price_never_below_gross_for_realistic_prices() {
        // Sweep every cent price from €1.00 to €50.00 across all configured
        // rates: the nickel floor must never undercut the gross price.
        let calc = calc();
        let rates: Vec<_> = calc.tax_table().rates().map(|(c, _)| c.to_string()).collect();
        for cents in 100..=5000 {
            for category in &rates {
                let price = calc
                    .unit_final_price("sweep", Money::from_cents(cents), category)
                    .unwrap();
                assert!(
                    price.cents() >= cents,
                    "final {} < gross {} for {category}",
                    price.cents(),
                    cents
                );
                assert_eq!(price.cents() % 5, 0);
            }
        }
    }

    #[test]
    fn test_consistency_guard_fires_for_micro_amounts() {
        // €0.03 at 4%: taxed 0.0312 → floor to nickel = €0.00 < €0.03.
        // The guard must reject this instead of returning a price below gross.
        let err = calc()
            .unit_final_price("Caramella", Money::from_cents(3), "Alimentari")
            .unwrap_err();
        assert!(matches!(err, CoreError::FinalBelowGross { .. }));
    }

    #[test]
    fn test_zero_gross_is_fine() {
        let price = calc()
            .unit_final_price("Omaggio", Money::zero(), "Altro")
            .unwrap();
        assert_eq!(price.cents(), 0);
    }

    // -------------------------------------------------------------------------
    // Receipt generation
    // -------------------------------------------------------------------------

    #[test]
    fn test_generate_single_line_spec_scenario() {
        // Pane Casereccio: €2.41, Alimentari, ×3
        // unit final €2.50, line €7.50, lordo €7.23, tax €0.27
        let receipt = calc()
            .generate(&[item("Pane Casereccio", 241, "Alimentari", 3)], "user-1")
            .unwrap();

        assert_eq!(receipt.lines.len(), 1);
        assert_eq!(receipt.lines[0].product_name, "Pane Casereccio");
        assert_eq!(receipt.lines[0].quantity, 3);
        assert_eq!(receipt.lines[0].line_total_cents, 750);
        assert_eq!(receipt.grand_total_cents, 750);
        assert_eq!(receipt.tax_total_cents, 27);
        assert_eq!(receipt.user_id, "user-1");
    }

    #[test]
    fn test_generate_unknown_category_spec_scenario() {
        // €10.00 "Elettronica" ×1 → default 22%: total €12.20, tax €2.20
        let receipt = calc()
            .generate(&[item("Cuffie", 1000, "Elettronica", 1)], "user-1")
            .unwrap();

        assert_eq!(receipt.grand_total_cents, 1220);
        assert_eq!(receipt.tax_total_cents, 220);
    }

    #[test]
    fn test_generate_preserves_cart_order() {
        let cart = vec![
            item("Agenda 2024", 1550, "Altro", 1),
            item("Pane Casereccio", 241, "Alimentari", 2),
            item("Oki", 499, "Medicinali", 1),
        ];
        let receipt = calc().generate(&cart, "user-1").unwrap();

        let names: Vec<_> = receipt
            .lines
            .iter()
            .map(|l| l.product_name.as_str())
            .collect();
        assert_eq!(names, ["Agenda 2024", "Pane Casereccio", "Oki"]);
    }

    #[test]
    fn test_generate_tax_by_difference_identity() {
        // totale_iva == totale_complessivo − Σ(prezzo_lordo × quantita), exactly
        let cart = vec![
            item("Pane Casereccio", 241, "Alimentari", 3),
            item("Agenda 2024", 1550, "Altro", 2),
            item("Oki", 499, "Medicinali", 1),
            item("Latte Intero 1L", 159, "Alimentari", 4),
        ];
        let receipt = calc().generate(&cart, "user-1").unwrap();

        let lordo: i64 = cart
            .iter()
            .map(|i| i.gross_price_cents * i.quantity)
            .sum();
        let line_sum: i64 = receipt.lines.iter().map(|l| l.line_total_cents).sum();

        assert_eq!(receipt.grand_total_cents, line_sum);
        assert_eq!(receipt.tax_total_cents, receipt.grand_total_cents - lordo);
    }

    #[test]
    fn test_generate_line_total_scales_with_quantity() {
        // Monotonically non-decreasing in the quantity
        let calc = calc();
        let mut previous = 0;
        for qty in 1..=10 {
            let receipt = calc
                .generate(&[item("Latte Intero 1L", 159, "Alimentari", qty)], "u")
                .unwrap();
            assert!(receipt.lines[0].line_total_cents >= previous);
            previous = receipt.lines[0].line_total_cents;
        }
    }

    #[test]
    fn test_generate_is_idempotent_on_totals() {
        // Same cart in → same lines and totals out (timestamps may differ)
        let cart = vec![
            item("Pane Casereccio", 241, "Alimentari", 3),
            item("Shampoo Neutro", 380, "Altro", 1),
        ];
        let first = calc().generate(&cart, "user-1").unwrap();
        let second = calc().generate(&cart, "user-1").unwrap();

        assert_eq!(first.lines, second.lines);
        assert_eq!(first.tax_total_cents, second.tax_total_cents);
        assert_eq!(first.grand_total_cents, second.grand_total_cents);
        assert_ne!(first.id, second.id);
    }

    #[test]
    fn test_generate_empty_cart_rejected() {
        let err = calc().generate(&[], "user-1").unwrap_err();
        assert!(matches!(err, CoreError::EmptyCart));
        assert!(err.is_validation());
    }

    #[test]
    fn test_generate_non_positive_quantity_rejected() {
        let err = calc()
            .generate(&[item("Pane", 241, "Alimentari", 0)], "user-1")
            .unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(crate::error::ValidationError::MustBePositive { .. })
        ));
    }

    #[test]
    fn test_generate_rejects_over_cap_price_instead_of_overflowing() {
        // A corrupt catalog price of €2·10¹⁴ at the maximum quantity would
        // overflow i64 in the line total; the calculator must return a typed
        // validation error, not panic.
        let err = calc()
            .generate(
                &[item("Corrotto", 20_000_000_000_000_000, "Altro", 999)],
                "user-1",
            )
            .unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(crate::error::ValidationError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_generate_fails_atomically_on_bad_line() {
        // The second line trips the consistency guard; no partial receipt
        let err = calc()
            .generate(
                &[
                    item("Pane", 241, "Alimentari", 1),
                    item("Micro", 3, "Alimentari", 1),
                ],
                "user-1",
            )
            .unwrap_err();
        assert!(matches!(err, CoreError::FinalBelowGross { .. }));
    }
}
