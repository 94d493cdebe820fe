//! Cart

use rustc_hash::FxHashSet;
use rusty_money::{Money, iso::Currency};
use smallvec::SmallVec;
use thiserror::Error;
use tracing::debug;

use crate::{
    discounts::{Discount, DiscountKey},
    items::CartItem,
    products::Product,
};

/// Errors related to cart mutation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CartError {
    /// Items must be added with a positive quantity.
    #[error("quantity must be positive, got {0}")]
    InvalidQuantity(u32),

    /// Adding the quantity would overflow the item's quantity.
    #[error("quantity of {0} would overflow")]
    QuantityOverflow(String),

    /// A product's currency differs from the cart currency.
    #[error("Product {product} has currency {found}, but cart has currency {expected}")]
    CurrencyMismatch {
        /// Product name
        product: String,
        /// Product currency code
        found: &'static str,
        /// Cart currency code
        expected: &'static str,
    },

    /// An item was not found in the cart.
    #[error("Item {0} not found")]
    ItemNotFound(usize),
}

/// Cart
///
/// Items are kept in first-insertion order with at most one item per product.
/// Discounts are kept in registration order with at most one discount per key.
#[derive(Debug)]
pub struct Cart {
    items: Vec<CartItem>,
    discounts: Vec<Discount>,
    discount_keys: FxHashSet<DiscountKey>,
    currency: &'static Currency,
}

impl Cart {
    /// Create a new, empty cart priced in the given currency.
    #[must_use]
    pub fn new(currency: &'static Currency) -> Self {
        Cart {
            items: Vec::new(),
            discounts: Vec::new(),
            discount_keys: FxHashSet::default(),
            currency,
        }
    }

    /// Add `quantity` units of a product.
    ///
    /// If an equal product (same name) is already in the cart its quantity grows
    /// and its original price is kept; otherwise a new item is appended. Discounts
    /// are not re-evaluated.
    ///
    /// # Errors
    ///
    /// - [`CartError::InvalidQuantity`]: `quantity` is zero.
    /// - [`CartError::CurrencyMismatch`]: the product is priced in another currency.
    /// - [`CartError::QuantityOverflow`]: the merged quantity does not fit in a `u32`.
    pub fn add_item(&mut self, product: Product, quantity: u32) -> Result<&CartItem, CartError> {
        if quantity == 0 {
            return Err(CartError::InvalidQuantity(quantity));
        }

        if product.currency() != self.currency {
            return Err(CartError::CurrencyMismatch {
                product: product.name().to_string(),
                found: product.currency().iso_alpha_code,
                expected: self.currency.iso_alpha_code,
            });
        }

        let position = self
            .items
            .iter()
            .position(|item| item.product() == &product);

        let item = match position {
            Some(idx) => {
                let item = self
                    .items
                    .get_mut(idx)
                    .ok_or(CartError::ItemNotFound(idx))?;

                let total = item
                    .add_quantity(quantity)
                    .ok_or_else(|| CartError::QuantityOverflow(product.name().to_string()))?;

                debug!(product = %product.name(), quantity, total, "merged cart item");

                item
            }
            None => {
                debug!(product = %product.name(), quantity, "added cart item");

                let idx = self.items.len();

                self.items.push(CartItem::new(product, quantity));

                self.items
                    .last_mut()
                    .ok_or(CartError::ItemNotFound(idx))?
            }
        };

        Ok(&*item)
    }

    /// Register a discount.
    ///
    /// Returns `false` and drops the discount if one with the same key is already
    /// registered; the first registration wins.
    pub fn add_discount(&mut self, discount: impl Into<Discount>) -> bool {
        let discount = discount.into();

        if self.discount_keys.contains(discount.key()) {
            debug!(discount = %discount.name(), "dropped duplicate discount");

            return false;
        }

        debug!(discount = %discount.name(), "registered discount");

        self.discount_keys.insert(discount.key().clone());
        self.discounts.push(discount);

        true
    }

    /// Register several discounts in order, returning how many were kept.
    pub fn add_discounts<D: Into<Discount>>(
        &mut self,
        discounts: impl IntoIterator<Item = D>,
    ) -> usize {
        discounts
            .into_iter()
            .map(|discount| self.add_discount(discount))
            .filter(|registered| *registered)
            .count()
    }

    /// Evaluate every registered discount against every item.
    ///
    /// Each item's discount state is cleared, then every discount whose cart-wide
    /// qualification holds is applied to every item, items in insertion order and
    /// discounts in registration order. Discount amounts are overwritten, not
    /// summed, so when several discounts fire on one item the last registered one
    /// decides the amount while all of them are listed as applied.
    ///
    /// Calling this again without mutating the cart changes nothing.
    pub fn apply_discounts(&mut self) {
        let qualified: SmallVec<[bool; 8]> = self
            .discounts
            .iter()
            .map(|discount| discount.qualifies(&self.items))
            .collect();

        let mut applications = 0_usize;

        for item in &mut self.items {
            item.reset_discounts();

            let candidates = self
                .discounts
                .iter()
                .zip(&qualified)
                .filter_map(|(discount, qualifies)| qualifies.then_some(discount));

            for discount in candidates {
                if discount.apply(item) {
                    item.record(discount);
                    applications += 1;
                }
            }
        }

        debug!(
            items = self.items.len(),
            discounts = self.discounts.len(),
            applications,
            total = self.total_minor(),
            "applied discounts"
        );
    }

    /// Sum of every item's price multiplied by quantity, before discounts.
    pub fn subtotal(&self) -> Money<'static, Currency> {
        let minor = self
            .items
            .iter()
            .fold(0_i64, |acc, item| acc.saturating_add(item.subtotal_minor()));

        Money::from_minor(minor, self.currency)
    }

    /// Sum of every item's payable price.
    ///
    /// Reflects the discounts set by the most recent [`apply_discounts`](Self::apply_discounts).
    pub fn total(&self) -> Money<'static, Currency> {
        Money::from_minor(self.total_minor(), self.currency)
    }

    /// Get an item from the cart by position.
    ///
    /// # Errors
    ///
    /// Returns a `CartError::ItemNotFound` if the item is not found.
    pub fn get_item(&self, item: usize) -> Result<&CartItem, CartError> {
        self.items.get(item).ok_or(CartError::ItemNotFound(item))
    }

    /// Find the item holding a product.
    pub fn find_item(&self, product: &Product) -> Option<&CartItem> {
        self.items.iter().find(|item| item.product() == product)
    }

    /// Iterate over the items in the cart.
    pub fn iter(&self) -> impl Iterator<Item = &CartItem> {
        self.items.iter()
    }

    /// Items in first-insertion order.
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Registered discounts in registration order.
    pub fn discounts(&self) -> &[Discount] {
        &self.discounts
    }

    /// Get the number of items in the cart.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the cart is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Get the currency of the cart.
    #[must_use]
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    fn total_minor(&self) -> i64 {
        self.items
            .iter()
            .fold(0_i64, |acc, item| acc.saturating_add(item.payable_minor()))
    }
}
