//! Discount Fixtures

use rustc_hash::FxHashMap;
use serde::Deserialize;

use crate::{
    discounts::{BundleFreeItem, Discount, TieredFreeUnits},
    fixtures::FixtureError,
    products::Product,
};

/// Wrapper for discounts in YAML
#[derive(Debug, Deserialize)]
pub struct DiscountsFixture {
    /// Discounts, in registration order
    pub discounts: Vec<DiscountFixture>,
}

/// Discount fixture from YAML
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DiscountFixture {
    /// Buy N, get X free
    TieredFreeUnits {
        /// Discount name
        name: String,

        /// Target product key
        product: String,

        /// Units that must be bought
        buy: u32,

        /// Units given away per group
        free: u32,
    },

    /// Buy a set of products, get one unit of another free
    BundleFreeItem {
        /// Discount name
        name: String,

        /// Keys of the products that must be present
        required: Vec<String>,

        /// Keys of the products given away
        free: Vec<String>,
    },
}

impl DiscountFixture {
    /// Resolve product keys and build the discount.
    ///
    /// # Errors
    ///
    /// Returns an error if a product key is unknown or the discount is invalid.
    pub fn try_into_discount(
        self,
        products: &FxHashMap<String, Product>,
    ) -> Result<Discount, FixtureError> {
        match self {
            DiscountFixture::TieredFreeUnits {
                name,
                product,
                buy,
                free,
            } => {
                let product = lookup(products, &product)?;

                Ok(TieredFreeUnits::new(name, product, buy, free)?.into())
            }
            DiscountFixture::BundleFreeItem {
                name,
                required,
                free,
            } => {
                let required = required
                    .iter()
                    .map(|key| lookup(products, key))
                    .collect::<Result<Vec<_>, _>>()?;

                let free = free
                    .iter()
                    .map(|key| lookup(products, key))
                    .collect::<Result<Vec<_>, _>>()?;

                Ok(BundleFreeItem::new(name, required, free)?.into())
            }
        }
    }
}

fn lookup(products: &FxHashMap<String, Product>, key: &str) -> Result<Product, FixtureError> {
    products
        .get(key)
        .cloned()
        .ok_or_else(|| FixtureError::ProductNotFound(key.to_string()))
}
