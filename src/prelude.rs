//! Cartwright prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{Cart, CartError},
    discounts::{
        AppliedDiscount, BundleFreeItem, Discount, DiscountError, DiscountKey, TieredFreeUnits,
    },
    fixtures::{Fixture, FixtureError},
    items::CartItem,
    products::{Product, ProductError},
    receipt::{Receipt, ReceiptLine},
};
