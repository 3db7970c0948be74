//! Cart state reducer.
//!
//! Tracks which products (with quantities) are in the session cart and
//! derives count and subtotal. Pure data: route handlers call the upstream
//! cart API first, then apply the matching [`CartAction`] here, so this
//! module can be tested without any I/O.
//!
//! Invariants:
//! - at most one line per product id
//! - every line quantity is at least 1
//! - unit prices are the snapshot taken when the line was first added;
//!   re-adding the same product increments quantity but keeps the original
//!   snapshot price

use serde::{Deserialize, Serialize};

use marigold_core::{Price, ProductId};

use crate::api::Product;

/// One line in the session cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    /// Referenced product.
    pub product_id: ProductId,
    /// Product title at add time.
    pub title: String,
    /// Image URL at add time.
    pub image: String,
    /// Unit price snapshot taken at add time.
    pub unit_price: Price,
    /// Quantity, at least 1.
    pub quantity: u32,
}

impl CartLine {
    /// Line total: unit price × quantity.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.unit_price.line_total(self.quantity)
    }
}

/// State transitions the cart understands.
#[derive(Debug, Clone, PartialEq)]
pub enum CartAction {
    /// Insert a new line, or increment the quantity of an existing line for
    /// the same product.
    AddItem {
        product: Product,
        quantity: u32,
    },
    /// Replace a line's quantity outright; 0 removes the line.
    SetQuantity {
        product_id: ProductId,
        quantity: u32,
    },
    /// Drop a whole line. Unknown ids are a no-op.
    RemoveItem { product_id: ProductId },
    /// Empty the cart.
    Clear,
}

/// The session cart.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CartState {
    lines: Vec<CartLine>,
}

impl CartState {
    /// An empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// The cart lines, in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Total number of items: the sum of line quantities.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(|line| line.quantity).sum()
    }

    /// Cart subtotal: Σ quantity × snapshot unit price.
    #[must_use]
    pub fn subtotal(&self) -> Price {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// The line for `product_id`, if present.
    #[must_use]
    pub fn line(&self, product_id: ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.product_id == product_id)
    }

    /// Apply a state transition.
    pub fn apply(&mut self, action: CartAction) {
        match action {
            CartAction::AddItem { product, quantity } => {
                let quantity = quantity.max(1);
                if let Some(line) = self
                    .lines
                    .iter_mut()
                    .find(|line| line.product_id == product.id)
                {
                    line.quantity = line.quantity.saturating_add(quantity);
                } else {
                    self.lines.push(CartLine {
                        product_id: product.id,
                        title: product.title,
                        image: product.image,
                        unit_price: product.price,
                        quantity,
                    });
                }
            }
            CartAction::SetQuantity {
                product_id,
                quantity,
            } => {
                if quantity == 0 {
                    self.lines.retain(|line| line.product_id != product_id);
                } else if let Some(line) = self
                    .lines
                    .iter_mut()
                    .find(|line| line.product_id == product_id)
                {
                    line.quantity = quantity;
                }
            }
            CartAction::RemoveItem { product_id } => {
                self.lines.retain(|line| line.product_id != product_id);
            }
            CartAction::Clear => self.lines.clear(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Rating;
    use rust_decimal::dec;

    fn product(id: i64, price: rust_decimal::Decimal) -> Product {
        Product {
            id: ProductId::new(id),
            title: format!("Product {id}"),
            price: Price::new(price),
            description: String::new(),
            category: "electronics".to_string(),
            image: format!("https://example.test/{id}.jpg"),
            rating: Rating {
                rate: 4.0,
                count: 10,
            },
        }
    }

    #[test]
    fn test_add_to_empty_cart() {
        let mut cart = CartState::new();
        cart.apply(CartAction::AddItem {
            product: product(5, dec!(10)),
            quantity: 2,
        });

        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.item_count(), 2);
        let line = cart.line(ProductId::new(5)).expect("line present");
        assert_eq!(line.quantity, 2);
    }

    #[test]
    fn test_re_adding_merges_into_one_line() {
        let mut cart = CartState::new();
        cart.apply(CartAction::AddItem {
            product: product(5, dec!(10)),
            quantity: 2,
        });
        cart.apply(CartAction::AddItem {
            product: product(5, dec!(10)),
            quantity: 1,
        });

        assert_eq!(cart.lines().len(), 1);
        assert_eq!(
            cart.line(ProductId::new(5)).map(|line| line.quantity),
            Some(3)
        );
    }

    #[test]
    fn test_re_adding_keeps_snapshot_price() {
        let mut cart = CartState::new();
        cart.apply(CartAction::AddItem {
            product: product(5, dec!(10)),
            quantity: 1,
        });
        // Catalog price changed between adds; the snapshot wins.
        cart.apply(CartAction::AddItem {
            product: product(5, dec!(12)),
            quantity: 1,
        });

        let line = cart.line(ProductId::new(5)).expect("line present");
        assert_eq!(line.unit_price, Price::new(dec!(10)));
        assert_eq!(cart.subtotal(), Price::new(dec!(20)));
    }

    #[test]
    fn test_zero_quantity_add_is_treated_as_one() {
        let mut cart = CartState::new();
        cart.apply(CartAction::AddItem {
            product: product(1, dec!(3)),
            quantity: 0,
        });
        assert_eq!(cart.item_count(), 1);
    }

    #[test]
    fn test_subtotal() {
        let mut cart = CartState::new();
        cart.apply(CartAction::AddItem {
            product: product(1, dec!(10)),
            quantity: 2,
        });
        cart.apply(CartAction::AddItem {
            product: product(2, dec!(5)),
            quantity: 1,
        });
        assert_eq!(cart.subtotal(), Price::new(dec!(25)));
        assert_eq!(cart.item_count(), 3);
    }

    #[test]
    fn test_remove_unknown_id_is_noop_for_other_lines() {
        let mut cart = CartState::new();
        cart.apply(CartAction::AddItem {
            product: product(1, dec!(10)),
            quantity: 2,
        });
        cart.apply(CartAction::RemoveItem {
            product_id: ProductId::new(999),
        });

        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.item_count(), 2);
    }

    #[test]
    fn test_remove_drops_whole_line() {
        let mut cart = CartState::new();
        cart.apply(CartAction::AddItem {
            product: product(1, dec!(10)),
            quantity: 5,
        });
        cart.apply(CartAction::RemoveItem {
            product_id: ProductId::new(1),
        });
        assert!(cart.is_empty());
    }

    #[test]
    fn test_set_quantity_replaces_and_zero_removes() {
        let mut cart = CartState::new();
        cart.apply(CartAction::AddItem {
            product: product(1, dec!(10)),
            quantity: 2,
        });

        cart.apply(CartAction::SetQuantity {
            product_id: ProductId::new(1),
            quantity: 7,
        });
        assert_eq!(cart.item_count(), 7);

        cart.apply(CartAction::SetQuantity {
            product_id: ProductId::new(1),
            quantity: 0,
        });
        assert!(cart.is_empty());
    }

    #[test]
    fn test_set_quantity_unknown_id_is_noop() {
        let mut cart = CartState::new();
        cart.apply(CartAction::SetQuantity {
            product_id: ProductId::new(3),
            quantity: 4,
        });
        assert!(cart.is_empty());
    }

    #[test]
    fn test_clear() {
        let mut cart = CartState::new();
        cart.apply(CartAction::AddItem {
            product: product(1, dec!(10)),
            quantity: 2,
        });
        cart.apply(CartAction::AddItem {
            product: product(2, dec!(5)),
            quantity: 1,
        });
        cart.apply(CartAction::Clear);
        assert!(cart.is_empty());
        assert_eq!(cart.subtotal(), Price::ZERO);
    }

    #[test]
    fn test_cart_round_trips_through_session_json() {
        let mut cart = CartState::new();
        cart.apply(CartAction::AddItem {
            product: product(5, dec!(10.50)),
            quantity: 2,
        });

        let json = serde_json::to_string(&cart).expect("serialize");
        let back: CartState = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, cart);
    }
}
