//! Tiered Free Units
//!
//! "Buy N, get X free": for every complete group of `N + X` units of the target
//! product, `X` units are refunded at full unit price.

use tracing::trace;

use crate::{
    discounts::{DiscountError, DiscountKey},
    items::CartItem,
    products::Product,
};

/// Buy N, get X free
#[derive(Debug, Clone)]
pub struct TieredFreeUnits {
    key: DiscountKey,
    name: String,
    product: Product,
    buy: u32,
    free: u32,
    group_size: u32,
}

impl TieredFreeUnits {
    /// Create a new tiered free-units discount.
    ///
    /// # Errors
    ///
    /// - [`DiscountError::EmptyName`]: `name` is empty.
    /// - [`DiscountError::InvalidGroupSize`]: `buy + free` is zero or overflows.
    pub fn new(
        name: impl Into<String>,
        product: Product,
        buy: u32,
        free: u32,
    ) -> Result<Self, DiscountError> {
        let name = name.into();

        if name.is_empty() {
            return Err(DiscountError::EmptyName);
        }

        let group_size = buy
            .checked_add(free)
            .filter(|size| *size > 0)
            .ok_or(DiscountError::InvalidGroupSize { buy, free })?;

        let key = DiscountKey::TieredFreeUnits {
            name: name.to_lowercase(),
            product: product.name().to_lowercase(),
        };

        Ok(Self {
            key,
            name,
            product,
            buy,
            free,
            group_size,
        })
    }

    /// Return the de-duplication key
    pub fn key(&self) -> &DiscountKey {
        &self.key
    }

    /// Return the display name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Return the target product
    pub fn product(&self) -> &Product {
        &self.product
    }

    /// Units that must be bought before any are free
    pub fn buy(&self) -> u32 {
        self.buy
    }

    /// Units given away per complete group
    pub fn free(&self) -> u32 {
        self.free
    }

    /// Number of free units for a given quantity.
    pub fn free_units(&self, quantity: u32) -> u32 {
        quantity / self.group_size
    }

    /// Set the item's discount to the value of its free units.
    ///
    /// Fires whenever the item holds more than `buy` units of the target product,
    /// even if that leaves the discount at zero.
    pub(crate) fn apply(&self, item: &mut CartItem) -> bool {
        if item.product() != &self.product || item.quantity() <= self.buy {
            return false;
        }

        let free_units = self.free_units(item.quantity());
        let amount = item
            .unit_price_minor()
            .saturating_mul(i64::from(free_units));

        trace!(
            discount = %self.name,
            product = %self.product.name(),
            quantity = item.quantity(),
            free_units,
            amount,
            "applied tiered free units"
        );

        item.set_discount(amount);

        true
    }
}
