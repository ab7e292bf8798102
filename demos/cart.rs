//! Cart walkthrough: builds a cart from a fixture set, trips the
//! merchant-conflict confirmation, and prints the receipt-style summary.
//!
//! ```sh
//! cargo run --example cart -- --fixture bistro
//! ```

use anyhow::Result;
use clap::Parser;

use errand::{
    cart::summary,
    fixtures::Fixture,
    prelude::*,
    store::select,
};

/// Arguments for the cart demo.
#[derive(Debug, Parser)]
struct Args {
    /// Fixture set to use for the catalog.
    #[clap(short, long, default_value = "bistro")]
    fixture: String,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let fixture = Fixture::from_set(&args.fixture)?;

    let mut store = Store::new();

    let pizza = fixture.product("p-margherita")?.clone();
    let tiramisu = fixture.product("p-tiramisu")?.clone();
    let padthai = fixture.product("p-padthai")?.clone();

    store.dispatch(Action::Cart(CartAction::Add {
        product: Box::new(pizza),
        variation: VariationId::new("v-12"),
        addons: vec![AddonId::new("a-olives"), AddonId::new("a-cheese")],
        quantity: 2,
    }));
    store.dispatch(Action::Cart(CartAction::Add {
        product: Box::new(tiramisu),
        variation: VariationId::new("v-slice"),
        addons: vec![],
        quantity: 1,
    }));

    // An item from another merchant: staged, not merged.
    let result = store.dispatch(Action::Cart(CartAction::Add {
        product: Box::new(padthai),
        variation: VariationId::new("v-regular"),
        addons: vec![],
        quantity: 1,
    }));
    println!("cross-merchant add -> {:?}", result.cart);
    store.dispatch(Action::Cart(CartAction::DismissPending));

    store.dispatch(Action::Cart(CartAction::ApplyCoupon(Coupon {
        code: "SAVE10".to_owned(),
        discount: Discount::Percent(rust_decimal::Decimal::from(10)),
    })));
    store.dispatch(Action::Cart(CartAction::SetTip(Price::from_minor(200))));

    println!("{}", summary::render(&store.state().cart)?);
    println!("checkout blocker: {:?}", select::checkout_blocker(store.state()));

    Ok(())
}
