//! Fixtures
//!
//! Declarative cart setups loaded from YAML. A fixture set named `demo` is read
//! from `products/demo.yml`, `items/demo.yml` and `discounts/demo.yml` under the
//! base path.

use std::{fs, path::PathBuf};

use rustc_hash::FxHashMap;
use rusty_money::iso::Currency;
use thiserror::Error;
use tracing::debug;

use crate::{
    cart::{Cart, CartError},
    discounts::{Discount, DiscountError},
    fixtures::{discounts::DiscountsFixture, items::ItemsFixture, products::ProductsFixture},
    products::{Product, ProductError},
};

pub mod discounts;
pub mod items;
pub mod products;

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid price format
    #[error("Invalid price format: {0}")]
    InvalidPrice(String),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// Product not found
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Currency mismatch between products
    #[error("Currency mismatch: expected {0}, found {1}")]
    CurrencyMismatch(String, String),

    /// No products loaded yet
    #[error("No products loaded yet; currency unknown")]
    NoCurrency,

    /// Invalid product definition
    #[error(transparent)]
    Product(#[from] ProductError),

    /// Invalid discount definition
    #[error(transparent)]
    Discount(#[from] DiscountError),

    /// Cart creation error
    #[error("Failed to create cart: {0}")]
    Cart(#[from] CartError),
}

/// Fixture
#[derive(Debug)]
pub struct Fixture {
    /// Base path for fixture files
    base_path: PathBuf,

    /// String key -> product
    products: FxHashMap<String, Product>,

    /// Cart lines in the order they are added
    items: Vec<(Product, u32)>,

    /// Discounts in registration order
    discounts: Vec<Discount>,

    /// Currency for the fixture set
    currency: Option<&'static Currency>,
}

impl Fixture {
    /// Create a new empty fixture with default base path
    pub fn new() -> Self {
        Self::with_base_path("./fixtures")
    }

    /// Create a new empty fixture with custom base path
    pub fn with_base_path(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            products: FxHashMap::default(),
            items: Vec::new(),
            discounts: Vec::new(),
            currency: None,
        }
    }

    /// Load products from a YAML fixture file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or if there are currency mismatches.
    pub fn load_products(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let contents = self.read("products", name)?;
        let fixture: ProductsFixture = serde_norway::from_str(&contents)?;

        for (key, product_fixture) in fixture.products {
            let product = Product::try_from(product_fixture)?;
            let currency = product.currency();

            if let Some(existing_currency) = self.currency {
                if existing_currency != currency {
                    return Err(FixtureError::CurrencyMismatch(
                        existing_currency.iso_alpha_code.to_string(),
                        currency.iso_alpha_code.to_string(),
                    ));
                }
            } else {
                self.currency = Some(currency);
            }

            self.products.insert(key, product);
        }

        debug!(set = name, products = self.products.len(), "loaded product fixtures");

        Ok(self)
    }

    /// Load cart lines from a YAML fixture file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or if referenced products don't exist.
    pub fn load_items(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let contents = self.read("items", name)?;
        let fixture: ItemsFixture = serde_norway::from_str(&contents)?;

        for item in fixture.items {
            let product = self.product(&item.product)?.clone();

            self.items.push((product, item.quantity));
        }

        debug!(set = name, items = self.items.len(), "loaded item fixtures");

        Ok(self)
    }

    /// Load discounts from a YAML fixture file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or if a discount is invalid.
    pub fn load_discounts(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let contents = self.read("discounts", name)?;
        let fixture: DiscountsFixture = serde_norway::from_str(&contents)?;

        for discount_fixture in fixture.discounts {
            let discount = discount_fixture.try_into_discount(&self.products)?;

            self.discounts.push(discount);
        }

        debug!(set = name, discounts = self.discounts.len(), "loaded discount fixtures");

        Ok(self)
    }

    /// Load a complete fixture set (products, items, and discounts with the same name)
    ///
    /// # Errors
    ///
    /// Returns an error if any of the fixture files cannot be loaded.
    pub fn from_set(name: &str) -> Result<Self, FixtureError> {
        let mut fixture = Self::new();

        fixture
            .load_products(name)?
            .load_items(name)?
            .load_discounts(name)?;

        Ok(fixture)
    }

    /// Get a product by its string key
    ///
    /// # Errors
    ///
    /// Returns an error if the product is not found.
    pub fn product(&self, key: &str) -> Result<&Product, FixtureError> {
        self.products
            .get(key)
            .ok_or_else(|| FixtureError::ProductNotFound(key.to_string()))
    }

    /// Get all cart lines
    pub fn items(&self) -> &[(Product, u32)] {
        &self.items
    }

    /// Get all discounts, including any that a cart would drop as duplicates
    pub fn discounts(&self) -> &[Discount] {
        &self.discounts
    }

    /// Get the currency
    ///
    /// # Errors
    ///
    /// Returns an error if no products have been loaded yet.
    pub fn currency(&self) -> Result<&'static Currency, FixtureError> {
        self.currency.ok_or(FixtureError::NoCurrency)
    }

    /// Build a cart holding every loaded line with every loaded discount registered.
    ///
    /// Discounts are registered but not applied.
    ///
    /// # Errors
    ///
    /// Returns an error if no products are loaded or a line cannot be added.
    pub fn cart(&self) -> Result<Cart, FixtureError> {
        let mut cart = Cart::new(self.currency()?);

        for (product, quantity) in &self.items {
            cart.add_item(product.clone(), *quantity)?;
        }

        cart.add_discounts(self.discounts.iter().cloned());

        Ok(cart)
    }

    fn read(&self, category: &str, name: &str) -> Result<String, FixtureError> {
        let file_path = self.base_path.join(category).join(format!("{name}.yml"));

        Ok(fs::read_to_string(file_path)?)
    }
}

impl Default for Fixture {
    fn default() -> Self {
        Self::new()
    }
}
