//! Property tests for item merging and evaluation idempotence.

use proptest::prelude::*;
use rusty_money::{Money, iso::GBP};

use cartwright::{
    cart::Cart,
    discounts::{BundleFreeItem, TieredFreeUnits},
    products::Product,
};

const NAMES: [&str; 4] = ["Apple", "Banana", "Orange", "Pear"];

fn failed(err: impl std::fmt::Display) -> TestCaseError {
    TestCaseError::fail(err.to_string())
}

fn product(name: &str, price: i64) -> Result<Product, TestCaseError> {
    Product::new(name, Money::from_minor(price, GBP)).map_err(failed)
}

fn cart_line() -> impl Strategy<Value = (&'static str, u32)> {
    (prop::sample::select(NAMES.to_vec()), 1_u32..20)
}

fn discounted_cart(lines: &[(&str, u32)], buy: u32, free: u32) -> Result<Cart, TestCaseError> {
    let mut cart = Cart::new(GBP);

    cart.add_discount(
        TieredFreeUnits::new("Tiered", product("Apple", 100)?, buy, free).map_err(failed)?,
    );
    cart.add_discount(
        BundleFreeItem::new("Bundle", [product("Banana", 50)?], [product("Orange", 75)?])
            .map_err(failed)?,
    );

    for (name, quantity) in lines {
        cart.add_item(product(name, 100)?, *quantity).map_err(failed)?;
    }

    Ok(cart)
}

proptest! {
    #[test]
    fn repeated_adds_merge_into_one_item(first in 1_u32..1000, second in 1_u32..1000) {
        let mut cart = Cart::new(GBP);

        cart.add_item(product("Apple", 200)?, first).map_err(failed)?;
        cart.add_item(product("Apple", 200)?, second).map_err(failed)?;

        prop_assert_eq!(cart.len(), 1);
        prop_assert_eq!(cart.get_item(0).map_err(failed)?.quantity(), first + second);
    }

    #[test]
    fn apply_discounts_is_idempotent(
        lines in prop::collection::vec(cart_line(), 0..12),
        buy in 0_u32..5,
        free in 1_u32..3,
    ) {
        let mut cart = discounted_cart(&lines, buy, free)?;

        cart.apply_discounts();

        let first: Vec<(i64, Vec<String>)> = cart
            .iter()
            .map(|item| {
                (
                    item.discount().to_minor_units(),
                    item.applied_discounts().map(str::to_string).collect(),
                )
            })
            .collect();
        let first_total = cart.total();

        cart.apply_discounts();

        let second: Vec<(i64, Vec<String>)> = cart
            .iter()
            .map(|item| {
                (
                    item.discount().to_minor_units(),
                    item.applied_discounts().map(str::to_string).collect(),
                )
            })
            .collect();

        prop_assert_eq!(first, second);
        prop_assert_eq!(first_total, cart.total());
    }

    #[test]
    fn discounts_never_exceed_item_subtotals(
        lines in prop::collection::vec(cart_line(), 1..12),
        buy in 0_u32..5,
        free in 1_u32..3,
    ) {
        let mut cart = discounted_cart(&lines, buy, free)?;

        cart.apply_discounts();

        for item in cart.iter() {
            prop_assert!(item.payable().to_minor_units() >= 0);
        }

        prop_assert!(cart.total().to_minor_units() <= cart.subtotal().to_minor_units());
    }
}
