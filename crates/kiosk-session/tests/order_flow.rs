//! End-to-end order flow through the public session API.

use std::sync::Arc;
use std::time::Duration;

use kiosk_core::{Catalog, PaymentMethod, Screen, Transition};
use kiosk_session::{KioskConfig, KioskSession, SimulatedGateway};

fn session_with(auto_return: Duration) -> KioskSession {
    let config = KioskConfig::default();
    KioskSession::new(
        Arc::new(Catalog::standard()),
        SimulatedGateway::new(config.payment_latency()),
        config.tax_rate(),
        auto_return,
    )
}

#[tokio::test(start_paused = true)]
async fn full_order_from_menu_to_fresh_menu() {
    let session = session_with(Duration::from_secs(5));
    let mut updates = session.subscribe();

    // Browse
    assert!(session.select_category("chicken").is_applied());
    let chicken: Vec<String> = session
        .catalog()
        .products_by_category("chicken")
        .iter()
        .map(|p| p.id.clone())
        .collect();
    assert_eq!(chicken.len(), 5);

    // Two combos, one abandoned customization
    assert!(session.select_product("c2").is_applied());
    assert!(session.confirm_customization("d3").is_applied());
    assert!(session.select_product("c4").is_applied());
    assert!(session.cancel_customization().is_applied());
    assert!(session.select_product("b4").is_applied());
    assert!(session.confirm_customization("d2").is_applied());

    let snapshot = session.snapshot();
    assert_eq!(snapshot.screen, Screen::Menu);
    assert_eq!(snapshot.active_category, "chicken");
    assert_eq!(snapshot.cart.len(), 2);
    // 6.00 + 3.50 = 9.50, tax 0.76, total 10.26
    assert_eq!(snapshot.totals.subtotal.to_string(), "9.50");
    assert_eq!(snapshot.totals.total.to_string(), "10.26");

    // Review, go back, come again
    assert!(session.proceed_to_checkout().is_applied());
    assert!(session.return_to_menu().is_applied());
    assert_eq!(session.snapshot().cart.len(), 2);
    assert!(session.proceed_to_checkout().is_applied());

    assert!(session.select_payment_method(PaymentMethod::Cash).is_applied());
    let confirmation = session.pay().await.unwrap().unwrap();
    assert_eq!(confirmation.method, PaymentMethod::Cash);
    assert!((100_000..=999_999).contains(&confirmation.order_number));

    // Nothing else moves the success screen
    assert_eq!(session.select_product("b1"), Transition::Ignored);
    assert_eq!(session.return_to_menu(), Transition::Ignored);

    // Wait for the auto-return through the published snapshots
    loop {
        updates.changed().await.unwrap();
        let snapshot = updates.borrow_and_update().clone();
        if snapshot.screen == Screen::Menu && snapshot.cart.is_empty() {
            assert!(snapshot.confirmation.is_none());
            assert_eq!(snapshot.active_category, "chicken");
            break;
        }
    }
}

#[tokio::test(start_paused = true)]
async fn cancel_order_requires_confirmation() {
    let session = session_with(Duration::from_secs(5));

    assert!(session.select_product("b2").is_applied());
    assert!(session.confirm_customization("d1").is_applied());

    assert!(session.request_cancel_order().is_applied());
    assert!(session.dismiss_cancel_order().is_applied());
    assert_eq!(session.snapshot().cart.len(), 1);

    assert!(session.request_cancel_order().is_applied());
    assert!(session.confirm_cancel_order().is_applied());
    let snapshot = session.snapshot();
    assert!(snapshot.cart.is_empty());
    assert_eq!(snapshot.screen, Screen::Menu);

    // Empty cart cannot reach checkout
    assert_eq!(session.proceed_to_checkout(), Transition::Ignored);
    assert!(session.pay().await.unwrap().is_none());
}

#[tokio::test(start_paused = true)]
async fn manual_reset_then_timer_deadline_is_harmless() {
    let session = session_with(Duration::from_secs(5));

    assert!(session.select_product("s1").is_applied());
    assert!(session.confirm_customization("d2").is_applied());
    assert!(session.proceed_to_checkout().is_applied());
    assert!(session.select_payment_method(PaymentMethod::Card).is_applied());
    session.pay().await.unwrap();

    assert!(session.reset_after_success().is_applied());
    assert!(session.select_category("fries").is_applied());
    assert!(session.select_product("s2").is_applied());

    // Past the first deadline the customer is still customizing
    tokio::time::sleep(Duration::from_secs(10)).await;
    let snapshot = session.snapshot();
    assert_eq!(snapshot.screen, Screen::Builder);
    assert_eq!(snapshot.pinned_product.map(|p| p.id), Some("s2".to_string()));
}
