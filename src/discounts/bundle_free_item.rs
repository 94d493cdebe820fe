//! Bundle Free Item
//!
//! "Buy A and B, get C free": when every required product is present in the cart,
//! one unit of each free product costs nothing.

use smallvec::{Array, SmallVec};
use tracing::trace;

use crate::{
    discounts::{DiscountError, DiscountKey},
    items::CartItem,
    products::Product,
};

/// Buy a set of products, get one unit of another free
#[derive(Debug, Clone)]
pub struct BundleFreeItem {
    key: DiscountKey,
    name: String,
    required: SmallVec<[Product; 4]>,
    free: SmallVec<[Product; 2]>,
}

impl BundleFreeItem {
    /// Create a new bundle discount.
    ///
    /// Repeated products in either set are collapsed. An empty required set
    /// qualifies every cart.
    ///
    /// # Errors
    ///
    /// - [`DiscountError::EmptyName`]: `name` is empty.
    /// - [`DiscountError::NoFreeProducts`]: `free` is empty.
    pub fn new(
        name: impl Into<String>,
        required: impl IntoIterator<Item = Product>,
        free: impl IntoIterator<Item = Product>,
    ) -> Result<Self, DiscountError> {
        let name = name.into();

        if name.is_empty() {
            return Err(DiscountError::EmptyName);
        }

        let required: SmallVec<[Product; 4]> = distinct(required);
        let free: SmallVec<[Product; 2]> = distinct(free);

        if free.is_empty() {
            return Err(DiscountError::NoFreeProducts);
        }

        let key = DiscountKey::BundleFreeItem {
            name: name.to_lowercase(),
            required: sorted_names(&required),
            free: sorted_names(&free),
        };

        Ok(Self {
            key,
            name,
            required,
            free,
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

    /// Products that must all be present
    pub fn required(&self) -> &[Product] {
        &self.required
    }

    /// Products given away
    pub fn free(&self) -> &[Product] {
        &self.free
    }

    /// Every required product is held by some item (any quantity).
    pub fn qualifies(&self, items: &[CartItem]) -> bool {
        self.required
            .iter()
            .all(|product| items.iter().any(|item| item.product() == product))
    }

    /// Make one unit of a free product cost nothing.
    pub(crate) fn apply(&self, item: &mut CartItem) -> bool {
        if !self.free.contains(item.product()) {
            return false;
        }

        let amount = item.unit_price_minor();

        trace!(
            discount = %self.name,
            product = %item.product().name(),
            amount,
            "applied bundle free item"
        );

        item.set_discount(amount);

        true
    }
}

fn distinct<A: Array<Item = Product>>(
    products: impl IntoIterator<Item = Product>,
) -> SmallVec<A> {
    let mut out = SmallVec::new();

    for product in products {
        if !out.contains(&product) {
            out.push(product);
        }
    }

    out
}

fn sorted_names<A: Array<Item = String>>(products: &[Product]) -> SmallVec<A> {
    let mut names: SmallVec<A> = products
        .iter()
        .map(|product| product.name().to_lowercase())
        .collect();

    names.sort_unstable();
    names.dedup();

    names
}
