//! Cartwright
//!
//! Cartwright prices a shopping cart after applying a set of composable discount
//! rules. Evaluation is deterministic and idempotent: the same cart and the same
//! registered discounts always produce the same per-item discounts and total.
//!
//! ```
//! use cartwright::prelude::*;
//! use rusty_money::{Money, iso::GBP};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let apple = Product::new("Apple", Money::from_minor(200, GBP))?;
//!
//! let mut cart = Cart::new(GBP);
//! cart.add_discount(TieredFreeUnits::new("Buy two, get one free", apple.clone(), 2, 1)?);
//! cart.add_item(apple, 3)?;
//! cart.apply_discounts();
//!
//! assert_eq!(cart.total(), Money::from_minor(400, GBP));
//! # Ok(())
//! # }
//! ```

pub mod cart;
pub mod discounts;
pub mod fixtures;
pub mod items;
pub mod prelude;
pub mod products;
pub mod receipt;
