//! Discounts
//!
//! The closed set of discount shapes a cart can evaluate. Every discount is
//! evaluated in two steps: a cart-wide qualification check, then an
//! application against each item that may overwrite the item's discount amount.

use smallvec::SmallVec;
use thiserror::Error;

use crate::items::CartItem;

pub mod bundle_free_item;
pub mod tiered_free_units;

pub use bundle_free_item::BundleFreeItem;
pub use tiered_free_units::TieredFreeUnits;

/// Errors related to discount construction.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DiscountError {
    /// The discount name was empty.
    #[error("discount name must not be empty")]
    EmptyName,

    /// Buy count plus free count is zero or does not fit in a `u32`.
    #[error("invalid group size: buy {buy} + free {free}")]
    InvalidGroupSize {
        /// Units that must be bought
        buy: u32,
        /// Units given away per group
        free: u32,
    },

    /// A bundle discount was given no free products.
    #[error("bundle discount must name at least one free product")]
    NoFreeProducts,
}

/// De-duplication key for registered discounts.
///
/// Two discounts with equal keys are the same discount as far as a cart is
/// concerned; only the first one registered is kept. Key text is lowercased,
/// so names differing only in case collide.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DiscountKey {
    /// Key of a [`TieredFreeUnits`] discount.
    TieredFreeUnits {
        /// Lowercased discount name
        name: String,
        /// Lowercased target product name
        product: String,
    },

    /// Key of a [`BundleFreeItem`] discount.
    BundleFreeItem {
        /// Lowercased discount name
        name: String,
        /// Sorted, lowercased names of the products that must be present
        required: SmallVec<[String; 4]>,
        /// Sorted, lowercased names of the products given away
        free: SmallVec<[String; 2]>,
    },
}

/// A discount that fired on a cart item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedDiscount {
    /// Key of the discount
    pub key: DiscountKey,

    /// Display name of the discount
    pub name: String,
}

/// Discount enum
#[derive(Debug, Clone)]
pub enum Discount {
    /// Buy N, get X free
    TieredFreeUnits(TieredFreeUnits),

    /// Buy a set of products, get one unit of another free
    BundleFreeItem(BundleFreeItem),
}

impl Discount {
    /// Return the de-duplication key.
    pub fn key(&self) -> &DiscountKey {
        match self {
            Discount::TieredFreeUnits(tiered) => tiered.key(),
            Discount::BundleFreeItem(bundle) => bundle.key(),
        }
    }

    /// Return the display name.
    pub fn name(&self) -> &str {
        match self {
            Discount::TieredFreeUnits(tiered) => tiered.name(),
            Discount::BundleFreeItem(bundle) => bundle.name(),
        }
    }

    /// Return whether the cart as a whole allows this discount to fire.
    ///
    /// Item-level discounts always qualify; their conditions are checked per item.
    pub fn qualifies(&self, items: &[CartItem]) -> bool {
        match self {
            Discount::TieredFreeUnits(_) => true,
            Discount::BundleFreeItem(bundle) => bundle.qualifies(items),
        }
    }

    /// Apply the discount to a single item, returning whether it fired.
    ///
    /// Callers must only invoke this for discounts that [`qualify`](Self::qualifies).
    pub(crate) fn apply(&self, item: &mut CartItem) -> bool {
        match self {
            Discount::TieredFreeUnits(tiered) => tiered.apply(item),
            Discount::BundleFreeItem(bundle) => bundle.apply(item),
        }
    }
}

impl From<TieredFreeUnits> for Discount {
    fn from(discount: TieredFreeUnits) -> Self {
        Discount::TieredFreeUnits(discount)
    }
}

impl From<BundleFreeItem> for Discount {
    fn from(discount: BundleFreeItem) -> Self {
        Discount::BundleFreeItem(discount)
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::{Money, iso::GBP};
    use testresult::TestResult;

    use crate::products::Product;

    use super::*;

    fn product(name: &str, price: i64) -> Result<Product, crate::products::ProductError> {
        Product::new(name, Money::from_minor(price, GBP))
    }

    #[test]
    fn key_and_name_delegate_to_inner_discount() -> TestResult {
        let tiered = TieredFreeUnits::new("Three for two", product("Apple", 200)?, 2, 1)?;
        let expected = tiered.key().clone();

        let discount = Discount::from(tiered);

        assert_eq!(discount.key(), &expected);
        assert_eq!(discount.name(), "Three for two");

        Ok(())
    }

    #[test]
    fn tiered_discount_always_qualifies() -> TestResult {
        let discount = Discount::from(TieredFreeUnits::new(
            "Three for two",
            product("Apple", 200)?,
            2,
            1,
        )?);

        assert!(discount.qualifies(&[]));

        Ok(())
    }

    #[test]
    fn bundle_discount_qualification_delegates() -> TestResult {
        let discount = Discount::from(BundleFreeItem::new(
            "Free socks",
            [product("Shoes", 5000)?],
            [product("Socks", 500)?],
        )?);

        assert!(!discount.qualifies(&[]));

        Ok(())
    }

    #[test]
    fn keys_differ_between_variants_with_same_name() -> TestResult {
        let tiered = Discount::from(TieredFreeUnits::new("Deal", product("Apple", 200)?, 2, 1)?);
        let bundle = Discount::from(BundleFreeItem::new(
            "Deal",
            [product("Apple", 200)?],
            [product("Pear", 100)?],
        )?);

        assert_ne!(tiered.key(), bundle.key());

        Ok(())
    }
}
