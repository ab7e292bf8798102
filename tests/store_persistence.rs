//! Integration tests for store dispatch and the persistence whitelist.

use tempfile::tempdir;
use testresult::TestResult;

use errand::{
    fixtures::Fixture,
    prelude::*,
    store::select::{self, CheckoutBlocker},
};

fn add_padthai(store: &mut Store, quantity: i64) -> TestResult {
    let fixture = Fixture::from_set("bistro")?;
    let product = fixture.product("p-padthai")?.clone();

    store.dispatch(Action::Cart(CartAction::Add {
        product: Box::new(product),
        variation: VariationId::new("v-regular"),
        addons: vec![AddonId::new("a-prawns")],
        quantity,
    }));

    Ok(())
}

#[test]
fn whitelisted_slices_survive_a_restart() -> TestResult {
    let dir = tempdir()?;
    let storage = FileStorage::new(dir.path().join("state.json"));

    let mut store = Store::new();
    add_padthai(&mut store, 2)?;
    store.dispatch(Action::Theme(ThemeAction::Set(Theme::Dark)));
    store.dispatch(Action::Auth(AuthAction::TokenRefreshed("t1".to_owned())));
    store.dispatch(Action::Location(LocationAction::Pick {
        point: GeoPoint { lat: 51.5, lng: -0.12 },
        label: "Work".to_owned(),
    }));
    // Not on the whitelist: the search slice.
    store.dispatch(Action::Search(SearchAction::SetQuery("pizza".to_owned())));
    store.dispatch(Action::Search(SearchAction::Apply));

    store.persist(&storage)?;

    let restored = Store::rehydrated(&storage);
    let state = restored.state();

    // Whitelisted slices came back.
    assert_eq!(state.theme, Theme::Dark);
    assert_eq!(state.auth.token.as_deref(), Some("t1"));
    assert_eq!(state.location.label, "Work");
    assert_eq!(state.cart.total_quantity(), 2);
    // 950 + 300 per unit.
    assert_eq!(state.cart.total_price(), Price::from_minor(2500));

    // Everything else restarts from defaults.
    assert_eq!(state.search.applied.query, "");

    Ok(())
}

#[test]
fn rehydrated_cart_totals_are_rederived() -> TestResult {
    let dir = tempdir()?;
    let storage = FileStorage::new(dir.path().join("state.json"));

    let mut store = Store::new();
    add_padthai(&mut store, 3)?;
    store.persist(&storage)?;

    let restored = Store::rehydrated(&storage);
    let cart = &restored.state().cart;

    let line_sum: u64 = cart.lines().map(|line| line.line_total().minor()).sum();
    assert_eq!(cart.total_price(), Price::from_minor(line_sum));

    Ok(())
}

#[test]
fn missing_file_starts_from_defaults() -> TestResult {
    let dir = tempdir()?;
    let storage = FileStorage::new(dir.path().join("never-written.json"));

    let store = Store::rehydrated(&storage);

    assert!(store.state().cart.is_empty());
    assert_eq!(store.state().theme, Theme::Light);

    Ok(())
}

#[test]
fn checkout_flow_through_dispatch() -> TestResult {
    let mut store = Store::new();

    assert_eq!(
        select::checkout_blocker(store.state()),
        Some(CheckoutBlocker::EmptyCart)
    );

    add_padthai(&mut store, 1)?;
    store.dispatch(Action::Cart(CartAction::SetAddress(Some("addr-7".to_owned()))));
    store.dispatch(Action::Cart(CartAction::SetPayment(Some(PaymentMethod::Cash))));
    store.dispatch(Action::Cart(CartAction::ApplyCoupon(Coupon {
        code: "SAVE10".to_owned(),
        discount: Discount::Percent(rust_decimal::Decimal::from(10)),
    })));
    store.dispatch(Action::Cart(CartAction::SetTip(Price::from_minor(100))));

    assert_eq!(select::checkout_blocker(store.state()), None);
    // 1250 - 125 + 100.
    assert_eq!(select::payable_total(store.state()), Price::from_minor(1225));

    // Clearing the cart resets checkout choices along with it.
    store.dispatch(Action::Cart(CartAction::Clear));
    assert!(store.state().cart.checkout().coupon.is_none());
    assert_eq!(store.state().cart.checkout().tip, Price::ZERO);

    Ok(())
}

#[test]
fn cross_merchant_flow_through_dispatch() -> TestResult {
    let fixture = Fixture::from_set("bistro")?;
    let pizza = fixture.product("p-margherita")?.clone();

    let mut store = Store::new();
    add_padthai(&mut store, 1)?;

    let result = store.dispatch(Action::Cart(CartAction::Add {
        product: Box::new(pizza),
        variation: VariationId::new("v-12"),
        addons: vec![],
        quantity: 1,
    }));

    assert_eq!(result.cart, Some(CartOutcome::RequiresConfirmation));
    assert_eq!(
        select::checkout_blocker(store.state()),
        Some(CheckoutBlocker::PendingConfirmation)
    );

    let result = store.dispatch(Action::Cart(CartAction::ConfirmReplace));

    assert!(matches!(result.cart, Some(CartOutcome::Committed { .. })));
    assert_eq!(
        store.state().cart.merchant(),
        Some(&MerchantId::new("m-bistro"))
    );
    assert_eq!(store.state().cart.total_price(), Price::from_minor(900));

    Ok(())
}
