//! Cart slice with synchronous optimistic updates.
//!
//! Unlike the request/success/failure slices, the cart mutates locally
//! first (quantity steppers must not wait on the network) and recomputes
//! its derived totals in the same transition, so a snapshot is never seen
//! with lines and totals out of step.

use std::sync::{Arc, RwLock, RwLockWriteGuard};

use rust_decimal::Decimal;

use partsgrid_core::{CurrencyCode, Price, ProductId};

/// One line in the cart.
#[derive(Debug, Clone, PartialEq)]
pub struct CartLine {
    pub product_id: ProductId,
    pub name: String,
    pub unit_price: Price,
    pub quantity: u32,
}

/// Cart snapshot: lines plus totals derived from them.
#[derive(Debug, Clone)]
pub struct CartState {
    pub lines: Vec<CartLine>,
    /// Sum of line quantities.
    pub item_count: u32,
    /// Sum of line subtotals, in the currency of the first line.
    pub subtotal: Price,
}

impl Default for CartState {
    fn default() -> Self {
        Self {
            lines: Vec::new(),
            item_count: 0,
            subtotal: Price::zero(CurrencyCode::default()),
        }
    }
}

impl CartState {
    fn from_lines(lines: Vec<CartLine>) -> Self {
        let item_count = lines.iter().map(|l| l.quantity).sum();
        let currency = lines
            .first()
            .map_or_else(CurrencyCode::default, |l| l.unit_price.currency_code);
        let amount: Decimal = lines
            .iter()
            .map(|l| l.unit_price.times(l.quantity).amount)
            .sum();
        Self {
            lines,
            item_count,
            subtotal: Price::new(amount, currency),
        }
    }
}

/// Atomically-replaced cart snapshot holder.
#[derive(Debug, Default)]
pub struct CartSlice {
    state: RwLock<Arc<CartState>>,
}

impl CartSlice {
    /// Create an empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The current snapshot.
    #[must_use]
    pub fn snapshot(&self) -> Arc<CartState> {
        Arc::clone(
            &self
                .state
                .read()
                .unwrap_or_else(std::sync::PoisonError::into_inner),
        )
    }

    /// Replace the whole cart (e.g., after a server-side cart fetch).
    pub fn replace(&self, lines: Vec<CartLine>) {
        *self.write() = Arc::new(CartState::from_lines(lines));
    }

    /// Add a line, merging quantities when the product is already carted.
    pub fn add_line(&self, line: CartLine) {
        let mut lines = self.snapshot().lines.clone();
        if let Some(existing) = lines.iter_mut().find(|l| l.product_id == line.product_id) {
            existing.quantity = existing.quantity.saturating_add(line.quantity);
        } else {
            lines.push(line);
        }
        self.replace(lines);
    }

    /// Set a line's quantity. Zero removes the line.
    pub fn set_quantity(&self, product_id: ProductId, quantity: u32) {
        let mut lines = self.snapshot().lines.clone();
        if quantity == 0 {
            lines.retain(|l| l.product_id != product_id);
        } else if let Some(line) = lines.iter_mut().find(|l| l.product_id == product_id) {
            line.quantity = quantity;
        }
        self.replace(lines);
    }

    /// Remove a line entirely.
    pub fn remove_line(&self, product_id: ProductId) {
        self.set_quantity(product_id, 0);
    }

    /// Empty the cart.
    pub fn clear(&self) {
        *self.write() = Arc::new(CartState::default());
    }

    fn write(&self) -> RwLockWriteGuard<'_, Arc<CartState>> {
        self.state
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn line(id: i64, price_paise: i64, quantity: u32) -> CartLine {
        CartLine {
            product_id: ProductId::new(id),
            name: format!("part-{id}"),
            unit_price: Price::new(Decimal::new(price_paise, 2), CurrencyCode::INR),
            quantity,
        }
    }

    #[test]
    fn test_totals_recomputed_on_replace() {
        let cart = CartSlice::new();
        cart.replace(vec![line(1, 49900, 2), line(2, 15000, 1)]);
        let snap = cart.snapshot();
        assert_eq!(snap.item_count, 3);
        assert_eq!(snap.subtotal.amount, Decimal::new(114_800, 2));
    }

    #[test]
    fn test_add_line_merges_quantities() {
        let cart = CartSlice::new();
        cart.add_line(line(1, 10000, 1));
        cart.add_line(line(1, 10000, 2));
        let snap = cart.snapshot();
        assert_eq!(snap.lines.len(), 1);
        assert_eq!(snap.item_count, 3);
    }

    #[test]
    fn test_set_quantity_updates_totals_in_same_transition() {
        let cart = CartSlice::new();
        cart.replace(vec![line(1, 10000, 1)]);
        cart.set_quantity(ProductId::new(1), 5);
        let snap = cart.snapshot();
        assert_eq!(snap.item_count, 5);
        assert_eq!(snap.subtotal.amount, Decimal::new(50000, 2));
    }

    #[test]
    fn test_zero_quantity_removes_line() {
        let cart = CartSlice::new();
        cart.replace(vec![line(1, 10000, 2), line(2, 5000, 1)]);
        cart.set_quantity(ProductId::new(1), 0);
        let snap = cart.snapshot();
        assert_eq!(snap.lines.len(), 1);
        assert_eq!(snap.item_count, 1);
        assert_eq!(snap.subtotal.amount, Decimal::new(5000, 2));
    }

    #[test]
    fn test_clear_resets_everything() {
        let cart = CartSlice::new();
        cart.replace(vec![line(1, 10000, 2)]);
        cart.clear();
        let snap = cart.snapshot();
        assert!(snap.lines.is_empty());
        assert_eq!(snap.item_count, 0);
        assert_eq!(snap.subtotal.amount, Decimal::ZERO);
    }
}
