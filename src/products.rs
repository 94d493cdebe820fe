//! Products

use std::hash::{Hash, Hasher};

use rusty_money::{Money, iso::Currency};
use thiserror::Error;

/// Errors related to product construction.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProductError {
    /// The product name was empty.
    #[error("product name must not be empty")]
    EmptyName,

    /// The product price was below zero (minor units).
    #[error("product price must not be negative, got {0} minor units")]
    NegativePrice(i64),
}

/// Product
///
/// Identity is the product name: two products with the same name are the same
/// product regardless of price.
#[derive(Debug, Clone)]
pub struct Product {
    name: String,
    price: Money<'static, Currency>,
}

impl Product {
    /// Create a new product.
    ///
    /// # Errors
    ///
    /// - [`ProductError::EmptyName`]: `name` is empty.
    /// - [`ProductError::NegativePrice`]: `price` is below zero.
    pub fn new(
        name: impl Into<String>,
        price: Money<'static, Currency>,
    ) -> Result<Self, ProductError> {
        let name = name.into();

        if name.is_empty() {
            return Err(ProductError::EmptyName);
        }

        let minor = price.to_minor_units();

        if minor < 0 {
            return Err(ProductError::NegativePrice(minor));
        }

        Ok(Self { name, price })
    }

    /// Product name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Unit price
    pub fn price(&self) -> &Money<'static, Currency> {
        &self.price
    }

    /// Currency of the unit price
    pub fn currency(&self) -> &'static Currency {
        self.price.currency()
    }
}

impl PartialEq for Product {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Product {}

impl Hash for Product {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use rustc_hash::FxHashSet;
    use rusty_money::iso::GBP;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn new_keeps_name_and_price() -> TestResult {
        let apple = Product::new("Apple", Money::from_minor(200, GBP))?;

        assert_eq!(apple.name(), "Apple");
        assert_eq!(apple.price(), &Money::from_minor(200, GBP));
        assert_eq!(apple.currency(), GBP);

        Ok(())
    }

    #[test]
    fn new_rejects_empty_name() {
        let result = Product::new("", Money::from_minor(200, GBP));

        assert!(matches!(result, Err(ProductError::EmptyName)));
    }

    #[test]
    fn new_rejects_negative_price() {
        let result = Product::new("Apple", Money::from_minor(-1, GBP));

        assert!(matches!(result, Err(ProductError::NegativePrice(-1))));
    }

    #[test]
    fn new_accepts_zero_price() -> TestResult {
        let sample = Product::new("Sample", Money::from_minor(0, GBP))?;

        assert_eq!(sample.price().to_minor_units(), 0);

        Ok(())
    }

    #[test]
    fn equality_ignores_price() -> TestResult {
        let cheap = Product::new("Apple", Money::from_minor(100, GBP))?;
        let dear = Product::new("Apple", Money::from_minor(900, GBP))?;

        assert_eq!(cheap, dear);

        let mut set = FxHashSet::default();
        set.insert(cheap);

        assert!(set.contains(&dear));

        Ok(())
    }

    #[test]
    fn equality_is_case_sensitive() -> TestResult {
        let lower = Product::new("apple", Money::from_minor(100, GBP))?;
        let upper = Product::new("Apple", Money::from_minor(100, GBP))?;

        assert_ne!(lower, upper);

        Ok(())
    }
}
