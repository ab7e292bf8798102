//! Integration tests for the cart container's core invariants: identity
//! idempotence, totals consistency, merchant exclusivity and zero-quantity
//! collapse.

use testresult::TestResult;

use errand::{
    cart::{CartLine, CartOutcome, CartState, LineKey},
    catalog::{AddonId, MerchantId, Product, VariationId},
    fixtures::Fixture,
    price::Price,
};

/// The totals invariant: the running totals must always equal the true sum
/// over lines.
fn assert_totals_consistent(cart: &CartState) {
    let quantity: u64 = cart.lines().map(CartLine::quantity).sum();
    let price: u64 = cart.lines().map(|line| line.line_total().minor()).sum();

    assert_eq!(cart.total_quantity(), quantity, "quantity total drifted");
    assert_eq!(cart.total_price(), Price::from_minor(price), "price total drifted");
}

fn merchants_exclusive(cart: &CartState) -> bool {
    match cart.merchant() {
        Some(merchant) => cart.lines().all(|line| line.merchant() == merchant),
        None => cart.is_empty(),
    }
}

#[test]
fn identity_is_idempotent_across_addon_order() -> TestResult {
    let fixture = Fixture::from_set("bistro")?;
    let pizza = fixture.product("p-margherita")?;
    let variation = VariationId::new("v-12");

    let mut cart = CartState::default();

    // Addons [olives, cheese], qty 2.
    cart.add_quantity(
        pizza,
        &variation,
        &[AddonId::new("a-olives"), AddonId::new("a-cheese")],
        2,
    );
    // Same configuration, addons in the other order, qty 1: accumulates
    // onto the same line.
    cart.add_quantity(
        pizza,
        &variation,
        &[AddonId::new("a-cheese"), AddonId::new("a-olives")],
        1,
    );

    assert_eq!(cart.len(), 1, "both calls must hit the same line");
    assert_eq!(cart.total_quantity(), 3);
    // 900 + 150 + 100 per unit.
    assert_eq!(cart.total_price(), Price::from_minor(3450));
    assert_totals_consistent(&cart);

    Ok(())
}

#[test]
fn totals_hold_across_arbitrary_operation_sequences() -> TestResult {
    let fixture = Fixture::from_set("bistro")?;
    let pizza = fixture.product("p-margherita")?;
    let tiramisu = fixture.product("p-tiramisu")?;

    let mut cart = CartState::default();

    let pizza_key = LineKey::new(
        pizza.id.clone(),
        VariationId::new("v-16"),
        &[AddonId::new("a-cheese")],
    );
    let tiramisu_key = LineKey::new(tiramisu.id.clone(), VariationId::new("v-slice"), &[]);

    // A mixed script of upserts, bumps and removals; the invariants are
    // checked after every single step.
    let check = |cart: &CartState| {
        assert_totals_consistent(cart);
        assert!(merchants_exclusive(cart), "merchant exclusivity violated");
    };

    cart.add_quantity(pizza, &VariationId::new("v-16"), &[AddonId::new("a-cheese")], 2);
    check(&cart);

    cart.increase_quantity(&pizza_key);
    check(&cart);

    cart.add_quantity(tiramisu, &VariationId::new("v-slice"), &[], 4);
    check(&cart);

    cart.decrease_quantity(&tiramisu_key);
    check(&cart);

    cart.decrease_to_zero(&pizza_key);
    check(&cart);

    cart.add_quantity(tiramisu, &VariationId::new("v-slice"), &[], 1);
    check(&cart);

    cart.decrease_quantity(&tiramisu_key);
    check(&cart);

    cart.decrease_to_zero(&tiramisu_key);
    check(&cart);
    assert!(cart.is_empty(), "script ends with an empty cart");

    Ok(())
}

#[test]
fn merchant_conflict_never_mutates_existing_lines() -> TestResult {
    let fixture = Fixture::from_set("bistro")?;
    let pizza = fixture.product("p-margherita")?;
    let padthai = fixture.product("p-padthai")?;

    let mut cart = CartState::default();
    cart.add_quantity(pizza, &VariationId::new("v-12"), &[], 2);

    let before: Vec<(LineKey, u64)> = cart
        .lines()
        .map(|line| (line.key().clone(), line.quantity()))
        .collect();

    let outcome = cart.add_quantity(padthai, &VariationId::new("v-regular"), &[], 1);

    assert_eq!(outcome, CartOutcome::RequiresConfirmation);
    assert!(cart.requires_confirmation());

    let after: Vec<(LineKey, u64)> = cart
        .lines()
        .map(|line| (line.key().clone(), line.quantity()))
        .collect();
    assert_eq!(before, after, "existing lines must be untouched");

    let pending = cart.pending();
    assert_eq!(
        pending.map(CartLine::merchant),
        Some(&MerchantId::new("m-noodle"))
    );
    assert_eq!(pending.map(CartLine::quantity), Some(1));
    assert_totals_consistent(&cart);

    Ok(())
}

#[test]
fn zero_quantity_collapse_from_any_path() -> TestResult {
    let fixture = Fixture::from_set("bistro")?;
    let pizza = fixture.product("p-margherita")?;
    let tiramisu = fixture.product("p-tiramisu")?;

    // Path 1: decrement one unit at a time.
    let mut cart = CartState::default();
    cart.add_quantity(pizza, &VariationId::new("v-12"), &[], 2);
    let key = LineKey::new(pizza.id.clone(), VariationId::new("v-12"), &[]);
    cart.decrease_quantity(&key);
    cart.decrease_quantity(&key);

    assert!(cart.is_empty());
    assert_eq!(cart.total_price(), Price::ZERO);
    assert!(cart.merchant().is_none());

    // Path 2: set the last line's quantity to zero.
    let mut cart = CartState::default();
    cart.add_quantity(tiramisu, &VariationId::new("v-slice"), &[], 3);
    cart.add_quantity(tiramisu, &VariationId::new("v-slice"), &[], 0);

    assert!(cart.is_empty());
    assert!(cart.merchant().is_none());

    // Path 3: decrease a multi-unit line straight to zero.
    let mut cart = CartState::default();
    cart.add_quantity(pizza, &VariationId::new("v-16"), &[], 5);
    let key = LineKey::new(pizza.id.clone(), VariationId::new("v-16"), &[]);
    cart.decrease_to_zero(&key);

    assert!(cart.is_empty());
    assert_eq!(cart.total_quantity(), 0);
    assert!(cart.merchant().is_none());

    Ok(())
}

#[test]
fn readding_same_configuration_accumulates_then_collapses() -> TestResult {
    // P1/V1 with addons [A2, A1], qty 2 at unit 10 -> one line, totals
    // (2, 20); re-add with [A1, A2], qty 1 -> the SAME line at quantity 3,
    // totals (3, 30); quantity zero -> empty cart.
    let product = Product {
        id: errand::catalog::ProductId::new("P1"),
        merchant: MerchantId::new("M1"),
        title: "P1".to_owned(),
        image: String::new(),
        currency: "USD".to_owned(),
        variations: vec![errand::catalog::Variation {
            id: VariationId::new("V1"),
            title: "V1".to_owned(),
            price: Price::from_minor(6),
        }],
        addons: vec![
            errand::catalog::Addon {
                id: AddonId::new("A1"),
                title: "A1".to_owned(),
                price: Price::from_minor(1),
            },
            errand::catalog::Addon {
                id: AddonId::new("A2"),
                title: "A2".to_owned(),
                price: Price::from_minor(3),
            },
        ],
    };

    let mut cart = CartState::default();

    cart.add_quantity(
        &product,
        &VariationId::new("V1"),
        &[AddonId::new("A2"), AddonId::new("A1")],
        2,
    );
    assert_eq!(cart.len(), 1);
    assert_eq!(cart.total_quantity(), 2);
    assert_eq!(cart.total_price(), Price::from_minor(20));

    cart.add_quantity(
        &product,
        &VariationId::new("V1"),
        &[AddonId::new("A1"), AddonId::new("A2")],
        1,
    );
    assert_eq!(cart.len(), 1, "same configuration must accumulate, not duplicate");
    assert_eq!(cart.total_quantity(), 3);
    assert_eq!(cart.total_price(), Price::from_minor(30));

    let key = LineKey::new(
        product.id.clone(),
        VariationId::new("V1"),
        &[AddonId::new("A1"), AddonId::new("A2")],
    );
    cart.add_quantity(&product, &VariationId::new("V1"), &[AddonId::new("A2"), AddonId::new("A1")], 0);

    assert!(cart.line(&key).is_none());
    assert!(cart.is_empty());
    assert_eq!(cart.total_price(), Price::ZERO);
    assert!(cart.merchant().is_none());

    Ok(())
}
