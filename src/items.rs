//! Items

use rusty_money::{Money, iso::Currency};
use smallvec::SmallVec;

use crate::{
    discounts::{AppliedDiscount, Discount, DiscountKey},
    products::Product,
};

/// One product's aggregated quantity and discount state within a cart.
#[derive(Debug, Clone)]
pub struct CartItem {
    product: Product,
    quantity: u32,

    /// Total deduction set by discounts, in minor units.
    discount: i64,

    /// Discounts that fired on this item, in first-fired order.
    applied: SmallVec<[AppliedDiscount; 2]>,
}

impl CartItem {
    pub(crate) fn new(product: Product, quantity: u32) -> Self {
        Self {
            product,
            quantity,
            discount: 0,
            applied: SmallVec::new(),
        }
    }

    /// Returns the product of the item
    pub fn product(&self) -> &Product {
        &self.product
    }

    /// Returns the quantity held
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Returns the unit price of the item
    pub fn unit_price(&self) -> &Money<'static, Currency> {
        self.product.price()
    }

    /// Unit price multiplied by quantity, before any discount.
    pub fn subtotal(&self) -> Money<'static, Currency> {
        self.money(self.subtotal_minor())
    }

    /// Amount deducted by discounts.
    pub fn discount(&self) -> Money<'static, Currency> {
        self.money(self.discount)
    }

    /// Subtotal minus the discount.
    ///
    /// This is not clamped at zero: discounts are responsible for never deducting
    /// more than the subtotal.
    pub fn payable(&self) -> Money<'static, Currency> {
        self.money(self.payable_minor())
    }

    /// Names of the discounts that fired on this item.
    pub fn applied_discounts(&self) -> impl Iterator<Item = &str> {
        self.applied.iter().map(|applied| applied.name.as_str())
    }

    /// Keys of the discounts that fired on this item.
    pub fn applied_discount_keys(&self) -> impl Iterator<Item = &DiscountKey> {
        self.applied.iter().map(|applied| &applied.key)
    }

    /// Whether the discount with the given key fired on this item.
    pub fn has_discount(&self, key: &DiscountKey) -> bool {
        self.applied.iter().any(|applied| &applied.key == key)
    }

    pub(crate) fn unit_price_minor(&self) -> i64 {
        self.product.price().to_minor_units()
    }

    pub(crate) fn subtotal_minor(&self) -> i64 {
        self.unit_price_minor()
            .saturating_mul(i64::from(self.quantity))
    }

    pub(crate) fn payable_minor(&self) -> i64 {
        self.subtotal_minor().saturating_sub(self.discount)
    }

    /// Grow the quantity, returning `None` on overflow.
    pub(crate) fn add_quantity(&mut self, quantity: u32) -> Option<u32> {
        self.quantity = self.quantity.checked_add(quantity)?;

        Some(self.quantity)
    }

    /// Overwrite the discount amount (minor units).
    pub(crate) fn set_discount(&mut self, minor: i64) {
        self.discount = minor;
    }

    /// Record a discount as applied; recording the same key twice is a no-op.
    pub(crate) fn record(&mut self, discount: &Discount) {
        let key = discount.key();

        if !self.has_discount(key) {
            self.applied.push(AppliedDiscount {
                key: key.clone(),
                name: discount.name().to_string(),
            });
        }
    }

    /// Clear all discount state ahead of a fresh evaluation.
    pub(crate) fn reset_discounts(&mut self) {
        self.discount = 0;
        self.applied.clear();
    }

    fn money(&self, minor: i64) -> Money<'static, Currency> {
        Money::from_minor(minor, self.product.currency())
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::GBP;
    use testresult::TestResult;

    use crate::discounts::{Discount, TieredFreeUnits};

    use super::*;

    fn apple() -> Result<Product, crate::products::ProductError> {
        Product::new("Apple", Money::from_minor(200, GBP))
    }

    #[test]
    fn payable_is_subtotal_minus_discount() -> TestResult {
        let mut item = CartItem::new(apple()?, 3);

        item.set_discount(200);

        assert_eq!(item.subtotal(), Money::from_minor(600, GBP));
        assert_eq!(item.discount(), Money::from_minor(200, GBP));
        assert_eq!(item.payable(), Money::from_minor(400, GBP));

        Ok(())
    }

    #[test]
    fn payable_is_not_clamped() -> TestResult {
        let mut item = CartItem::new(apple()?, 1);

        item.set_discount(500);

        assert_eq!(item.payable(), Money::from_minor(-300, GBP));

        Ok(())
    }

    #[test]
    fn add_quantity_detects_overflow() -> TestResult {
        let mut item = CartItem::new(apple()?, u32::MAX);

        assert_eq!(item.add_quantity(1), None);
        assert_eq!(item.quantity(), u32::MAX);

        Ok(())
    }

    #[test]
    fn record_deduplicates_by_key() -> TestResult {
        let mut item = CartItem::new(apple()?, 3);
        let discount = Discount::from(TieredFreeUnits::new("Three for two", apple()?, 2, 1)?);

        item.record(&discount);
        item.record(&discount);

        assert_eq!(item.applied_discounts().collect::<Vec<_>>(), ["Three for two"]);
        assert!(item.has_discount(discount.key()));

        Ok(())
    }

    #[test]
    fn reset_discounts_clears_state() -> TestResult {
        let mut item = CartItem::new(apple()?, 3);
        let discount = Discount::from(TieredFreeUnits::new("Three for two", apple()?, 2, 1)?);

        item.set_discount(200);
        item.record(&discount);
        item.reset_discounts();

        assert_eq!(item.discount().to_minor_units(), 0);
        assert_eq!(item.applied_discount_keys().count(), 0);

        Ok(())
    }
}
