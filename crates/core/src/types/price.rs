//! Type-safe price representation using decimal arithmetic.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A unit price in the store's display currency.
///
/// Serialized as a plain JSON number so cart blobs and catalog payloads stay
/// interchangeable with storefront clients. Arithmetic stays in `Decimal` to
/// avoid accumulating float error across line totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(#[serde(with = "rust_decimal::serde::float")] Decimal);

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Get the underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Total for `quantity` units.
    #[must_use]
    pub fn line_total(&self, quantity: u32) -> Decimal {
        self.0 * Decimal::from(quantity)
    }

    /// Format for display (e.g., `$19.99`).
    #[must_use]
    pub fn display(&self) -> String {
        format!("${:.2}", self.0)
    }
}

impl From<Decimal> for Price {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_display_pads_cents() {
        let price = Price::new(Decimal::new(1990, 2));
        assert_eq!(price.display(), "$19.90");

        let whole = Price::new(Decimal::from(5));
        assert_eq!(whole.display(), "$5.00");
    }

    #[test]
    fn test_line_total() {
        let price = Price::new(Decimal::new(1050, 2));
        assert_eq!(price.line_total(3), Decimal::new(3150, 2));
        assert_eq!(price.line_total(0), Decimal::ZERO);
    }

    #[test]
    fn test_serde_as_json_number() {
        let price = Price::new(Decimal::new(1999, 2));
        assert_eq!(serde_json::to_string(&price).unwrap(), "19.99");

        let parsed: Price = serde_json::from_str("19.99").unwrap();
        assert_eq!(parsed, price);
    }
}
