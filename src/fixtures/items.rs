//! Item Fixtures

use serde::Deserialize;

/// Wrapper for cart lines in YAML
#[derive(Debug, Deserialize)]
pub struct ItemsFixture {
    /// Cart lines, in the order they are added
    pub items: Vec<ItemFixture>,
}

/// A product reference and the quantity to add
#[derive(Debug, Deserialize)]
pub struct ItemFixture {
    /// Product key
    pub product: String,

    /// Quantity to add
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

fn default_quantity() -> u32 {
    1
}
