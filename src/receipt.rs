//! Receipt
//!
//! A read-only snapshot of an evaluated cart for presentation layers.

use decimal_percentage::Percentage;
use rust_decimal::Decimal;
use rusty_money::{Money, MoneyError, iso::Currency};
use smallvec::SmallVec;

use crate::cart::Cart;

/// One cart item as it should be shown to a customer.
#[derive(Debug, Clone, PartialEq)]
pub struct ReceiptLine {
    /// Product name
    pub product: String,

    /// Unit price
    pub unit_price: Money<'static, Currency>,

    /// Quantity held
    pub quantity: u32,

    /// Amount deducted by discounts
    pub discount: Money<'static, Currency>,

    /// Names of the discounts that fired, in the order they fired
    pub applied_discounts: SmallVec<[String; 2]>,

    /// Price paid for the line
    pub payable: Money<'static, Currency>,
}

/// Final receipt for an evaluated cart.
#[derive(Debug, Clone)]
pub struct Receipt {
    /// Lines in cart order
    lines: Vec<ReceiptLine>,

    /// Total cost before any discounts
    subtotal: Money<'static, Currency>,

    /// Total amount payable after discounts
    total: Money<'static, Currency>,

    /// Currency used for all monetary values
    currency: &'static Currency,
}

impl Receipt {
    /// Snapshot a cart as it stands after its last evaluation.
    pub fn from_cart(cart: &Cart) -> Self {
        let lines = cart
            .iter()
            .map(|item| ReceiptLine {
                product: item.product().name().to_string(),
                unit_price: *item.unit_price(),
                quantity: item.quantity(),
                discount: item.discount(),
                applied_discounts: item.applied_discounts().map(str::to_string).collect(),
                payable: item.payable(),
            })
            .collect();

        Receipt {
            lines,
            subtotal: cart.subtotal(),
            total: cart.total(),
            currency: cart.currency(),
        }
    }

    /// Lines in cart order
    #[must_use]
    pub fn lines(&self) -> &[ReceiptLine] {
        &self.lines
    }

    /// Total cost before any discounts
    #[must_use]
    pub fn subtotal(&self) -> Money<'static, Currency> {
        self.subtotal
    }

    /// Total amount payable after discounts
    #[must_use]
    pub fn total(&self) -> Money<'static, Currency> {
        self.total
    }

    /// Currency used for all monetary values.
    #[must_use]
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    /// Calculate the savings made by applying discounts.
    ///
    /// # Errors
    ///
    /// Returns a [`MoneyError`] if the subtraction operation fails.
    pub fn savings(&self) -> Result<Money<'static, Currency>, MoneyError> {
        self.subtotal.sub(self.total)
    }

    /// Calculates the savings made by applying discounts as a percentage
    ///
    /// # Errors
    ///
    /// Returns a [`MoneyError`] if the subtraction operation fails.
    pub fn savings_percent(&self) -> Result<Percentage, MoneyError> {
        let savings = self.savings()?;

        // Relative to the pre-discount subtotal, computed in decimal space.
        let savings_minor = savings.to_minor_units();
        let subtotal_minor = self.subtotal.to_minor_units();

        if subtotal_minor == 0 {
            return Ok(Percentage::from(0.0));
        }

        Ok(Percentage::from(
            Decimal::from(savings_minor) / Decimal::from(subtotal_minor),
        ))
    }
}
