//! Cart builder
//!
//! The in-progress selection for the table currently being served. At
//! most one line per item id; quantities never drop below one (a line at
//! zero is removed instead). Unit prices are captured when the line is
//! created, not re-read from the catalog.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::menu::MenuItem;

/// One selected product with quantity
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CartLine {
    pub item_id: i64,
    /// Captured from the catalog at line creation
    pub unit_price: i64,
    pub quantity: i64,
}

impl CartLine {
    pub fn line_total(&self) -> i64 {
        self.unit_price * self.quantity
    }
}

/// In-progress selection, insertion order kept for display
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Add one unit of `item`. Unavailable items are an ignored no-op.
    pub fn add_item(&mut self, item: &MenuItem) {
        if !item.available {
            debug!(item_id = item.id, name = %item.name, "Unavailable item ignored");
            return;
        }
        match self.lines.iter_mut().find(|line| line.item_id == item.id) {
            Some(line) => line.quantity += 1,
            None => self.lines.push(CartLine {
                item_id: item.id,
                unit_price: item.unit_price,
                quantity: 1,
            }),
        }
    }

    /// Apply a signed quantity delta to an existing line.
    ///
    /// Dropping to zero or below removes the line. Unknown ids are a
    /// no-op.
    pub fn change_quantity(&mut self, item_id: i64, delta: i64) {
        let Some(idx) = self.lines.iter().position(|line| line.item_id == item_id) else {
            return;
        };
        self.lines[idx].quantity += delta;
        if self.lines[idx].quantity <= 0 {
            self.lines.remove(idx);
        }
    }

    /// Sum of `unit_price * quantity` over all lines; 0 when empty.
    pub fn total(&self) -> i64 {
        self.lines.iter().map(|line| line.line_total()).sum()
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Discard all lines: cancel, successful submit, or table switch.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Move the lines out, leaving the cart empty (submit path).
    pub(crate) fn take_lines(&mut self) -> Vec<CartLine> {
        std::mem::take(&mut self.lines)
    }

    /// Replace the contents wholesale (reopen path).
    pub(crate) fn set_lines(&mut self, lines: Vec<CartLine>) {
        self.lines = lines;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: i64, unit_price: i64, available: bool) -> MenuItem {
        MenuItem {
            id,
            name: format!("item-{id}"),
            unit_price,
            available,
        }
    }

    #[test]
    fn repeated_adds_merge_into_one_line() {
        let mut cart = Cart::default();
        let osh = item(1, 15_000, true);
        cart.add_item(&osh);
        cart.add_item(&osh);
        cart.add_item(&osh);

        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.lines()[0].quantity, 3);
        assert_eq!(cart.total(), 45_000);
    }

    #[test]
    fn unavailable_item_never_creates_a_line() {
        let mut cart = Cart::default();
        cart.add_item(&item(2, 18_000, false));
        assert!(cart.is_empty());
        assert_eq!(cart.total(), 0);
    }

    #[test]
    fn unit_price_is_captured_at_line_creation() {
        let mut cart = Cart::default();
        cart.add_item(&item(1, 15_000, true));
        // catalog price changes do not retro-apply to the line
        cart.add_item(&item(1, 99_000, true));
        assert_eq!(cart.lines()[0].unit_price, 15_000);
        assert_eq!(cart.total(), 30_000);
    }

    #[test]
    fn negative_delta_to_zero_removes_the_line() {
        let mut cart = Cart::default();
        let choy = item(6, 3_000, true);
        cart.add_item(&choy);
        cart.add_item(&choy);

        cart.change_quantity(6, -2);
        assert!(cart.is_empty());
    }

    #[test]
    fn delta_on_missing_line_is_a_noop() {
        let mut cart = Cart::default();
        cart.change_quantity(42, 3);
        assert!(cart.is_empty());
    }

    #[test]
    fn lines_keep_first_add_order() {
        let mut cart = Cart::default();
        cart.add_item(&item(3, 12_000, true));
        cart.add_item(&item(1, 15_000, true));
        cart.add_item(&item(3, 12_000, true));

        let ids: Vec<i64> = cart.lines().iter().map(|l| l.item_id).collect();
        assert_eq!(ids, vec![3, 1]);
    }
}
