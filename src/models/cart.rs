//! Session-held shopping cart.
//!
//! The cart only stores item ids and quantities. Names and prices are
//! resolved against the catalog every time the cart is read, so a line whose
//! item was deleted simply disappears from the view.

use crate::error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::ToSchema;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    items: BTreeMap<i32, i32>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `quantity` to the line for `item_id`, creating it if absent.
    /// The cart is left untouched on error.
    pub fn add(&mut self, item_id: i32, quantity: i32) -> AppResult<i32> {
        if quantity < 1 {
            return Err(AppError::ValidationError(
                "Quantity must be at least 1".to_string(),
            ));
        }
        let current = self.items.get(&item_id).copied().unwrap_or(0);
        let updated = current
            .checked_add(quantity)
            .ok_or_else(|| AppError::ValidationError("Quantity is too large".to_string()))?;
        self.items.insert(item_id, updated);
        Ok(updated)
    }

    pub fn quantity(&self, item_id: i32) -> Option<i32> {
        self.items.get(&item_id).copied()
    }

    /// `(item_id, quantity)` pairs in item id order.
    pub fn entries(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.items.iter().map(|(id, qty)| (*id, *qty))
    }

    pub fn item_ids(&self) -> Vec<i32> {
        self.items.keys().copied().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AddToCartRequest {
    #[schema(example = 1)]
    pub item_id: i32,
    #[schema(example = 2)]
    pub quantity: i32,
}

/// A cart entry resolved against the current catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CartLine {
    pub item_id: i32,
    pub name: String,
    pub price_cents: i64,
    pub quantity: i32,
    pub line_total_cents: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct CartView {
    pub items: Vec<CartLine>,
    pub total_cents: i64,
    #[schema(example = "67000.00")]
    pub total: String,
}

/// Result of a checkout call: the placed order, or `None` when the resolved
/// cart was empty, plus the cart as it stands afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CheckoutResponse {
    pub order: Option<super::OrderResponse>,
    pub cart: CartView,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_creates_and_increments_line() {
        let mut cart = Cart::new();
        assert_eq!(cart.add(3, 2).unwrap(), 2);
        assert_eq!(cart.add(3, 1).unwrap(), 3);
        assert_eq!(cart.add(1, 1).unwrap(), 1);

        assert_eq!(cart.quantity(3), Some(3));
        assert_eq!(cart.entries().collect::<Vec<_>>(), vec![(1, 1), (3, 3)]);
    }

    #[test]
    fn test_invalid_quantity_leaves_cart_unchanged() {
        let mut cart = Cart::new();
        cart.add(1, 2).unwrap();
        let before = cart.clone();

        assert!(cart.add(1, 0).is_err());
        assert!(cart.add(2, -5).is_err());
        assert_eq!(cart, before);
    }

    #[test]
    fn test_overflow_is_rejected() {
        let mut cart = Cart::new();
        cart.add(1, i32::MAX).unwrap();
        assert!(cart.add(1, 1).is_err());
        assert_eq!(cart.quantity(1), Some(i32::MAX));
    }

    #[test]
    fn test_clear() {
        let mut cart = Cart::new();
        cart.add(1, 1).unwrap();
        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.len(), 0);
    }
}
