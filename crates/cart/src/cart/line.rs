//! Cart line-items and read views.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use shoebox_core::{Price, ProductId};

/// A single line-item in the cart.
///
/// `amount` is the quantity the shopper selected; it never exceeds the stock
/// observed by the mutation that set it. Stock may drop afterwards without
/// retroactively correcting the line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    /// Catalog product id; unique across the cart.
    pub id: ProductId,
    /// Display title, copied from the catalog at insertion time.
    pub title: String,
    /// Unit price, copied from the catalog at insertion time.
    pub price: Price,
    /// Image URL.
    pub image: String,
    /// Selected quantity, always at least 1.
    pub amount: u32,
}

impl CartLine {
    /// Total price of this line.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.price.line_total(self.amount)
    }
}

/// Read view of the cart with derived totals.
#[derive(Debug, Clone, Serialize)]
pub struct CartSnapshot {
    /// Line-items in insertion order.
    pub items: Vec<CartLine>,
    /// Total selected quantity across all lines.
    pub total_items: u32,
    /// Formatted sum of all line totals.
    pub subtotal: String,
}

impl CartSnapshot {
    /// Build a snapshot from the given lines.
    #[must_use]
    pub fn from_lines(items: Vec<CartLine>) -> Self {
        let total_items = items.iter().map(|line| line.amount).sum();
        let subtotal: Decimal = items.iter().map(CartLine::line_total).sum();
        Self {
            items,
            total_items,
            subtotal: format!("${subtotal:.2}"),
        }
    }
}
