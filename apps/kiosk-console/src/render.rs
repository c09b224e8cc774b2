//! # Screen Rendering
//!
//! Turns snapshots into plain text. Pure functions, so the layout is
//! testable without a terminal.

use std::fmt::Write;

use kiosk_core::{Catalog, OrderSnapshot, Screen};
use kiosk_session::KioskConfig;

/// Draws whatever screen the snapshot is on.
pub fn render_screen(snapshot: &OrderSnapshot, catalog: &Catalog, config: &KioskConfig) -> String {
    match snapshot.screen {
        Screen::Menu => render_menu(snapshot, catalog, config),
        Screen::Builder => render_builder(snapshot, catalog, config),
        Screen::Checkout => render_checkout(snapshot, config),
        Screen::PaymentSuccess => render_success(snapshot, config),
    }
}

pub fn render_categories(snapshot: &OrderSnapshot, catalog: &Catalog) -> String {
    let mut out = String::from("Categories:\n");
    for category in catalog.categories() {
        let marker = if category.id == snapshot.active_category { '>' } else { ' ' };
        let _ = writeln!(out, " {} {:<12} {}", marker, category.id, category.name);
    }
    out
}

pub fn render_menu(snapshot: &OrderSnapshot, catalog: &Catalog, config: &KioskConfig) -> String {
    let mut out = String::new();
    let title = catalog
        .category(&snapshot.active_category)
        .map(|c| c.name.as_str())
        .unwrap_or(snapshot.active_category.as_str());
    let _ = writeln!(out, "== {} | {} ==", config.store.name, title);

    let products = catalog.products_by_category(&snapshot.active_category);
    if products.is_empty() {
        out.push_str("  (nothing in this category)\n");
    }
    for product in products {
        let calories = product
            .calories
            .map(|c| format!("{c} Cal"))
            .unwrap_or_default();
        let _ = writeln!(
            out,
            "  {:<5} {:<28} {:>9}  {}",
            product.id,
            product.name,
            config.format_currency(product.price()),
            calories
        );
    }

    let _ = writeln!(
        out,
        "Order: {} item(s), {}",
        snapshot.totals.line_count,
        config.format_currency(snapshot.totals.total)
    );
    if snapshot.cancel_prompt_open {
        out.push_str("Cancel the entire order? (yes/no)\n");
    }
    out
}

pub fn render_builder(snapshot: &OrderSnapshot, catalog: &Catalog, config: &KioskConfig) -> String {
    let mut out = String::new();
    let Some(product) = &snapshot.pinned_product else {
        return out;
    };

    let _ = writeln!(
        out,
        "== Make it a meal: {} ({}) ==",
        product.name,
        config.format_currency(product.price())
    );
    if let Some(description) = &product.description {
        let _ = writeln!(out, "  {description}");
    }
    out.push_str("Choose a drink:\n");
    for drink in catalog.drink_options() {
        let delta = drink.price_delta();
        let delta = if delta.is_zero() {
            String::new()
        } else if delta.is_negative() {
            config.format_currency(delta)
        } else {
            format!("+{}", config.format_currency(delta))
        };
        let _ = writeln!(out, "  {:<5} {:<20} {}", drink.id, drink.name, delta);
    }
    out.push_str("(drink <id> to add, back to cancel)\n");
    out
}

pub fn render_checkout(snapshot: &OrderSnapshot, config: &KioskConfig) -> String {
    let mut out = String::from("== Review your order ==\n");
    for (i, line) in snapshot.cart.iter().enumerate() {
        let _ = writeln!(
            out,
            "  {:>2}. {:<28} w/ {:<12} {:>9}",
            i + 1,
            line.product.name,
            line.drink.name,
            config.format_currency(line.price())
        );
    }

    let totals = &snapshot.totals;
    let _ = writeln!(out, "  Subtotal {:>9}", config.format_currency(totals.subtotal));
    let _ = writeln!(
        out,
        "  Tax ({}%) {:>8}",
        config.tax_rate().percentage(),
        config.format_currency(totals.tax)
    );
    let _ = writeln!(out, "  Total    {:>9}", config.format_currency(totals.total));

    match (snapshot.payment_method, snapshot.payment_in_flight) {
        (Some(method), true) => {
            let _ = writeln!(out, "Processing {method} payment...");
        }
        (Some(method), false) => {
            let _ = writeln!(out, "Paying by {method}. Type `pay` to continue.");
        }
        (None, _) => out.push_str("Choose `method card` or `method cash`.\n"),
    }
    out
}

pub fn render_success(snapshot: &OrderSnapshot, config: &KioskConfig) -> String {
    let mut out = String::new();
    let Some(confirmation) = &snapshot.confirmation else {
        return out;
    };

    let _ = writeln!(out, "== Thank you! ==");
    let _ = writeln!(out, "  Order number   #{}", confirmation.order_number);
    let _ = writeln!(
        out,
        "  Paid           {} by {}",
        config.format_currency(confirmation.total),
        confirmation.method
    );
    let _ = writeln!(
        out,
        "Returning to the menu in {} seconds (or type `done`).",
        config.timing.auto_return_secs
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use kiosk_core::{OrderConfirmation, OrderMachine, PaymentMethod};
    use std::sync::Arc;

    fn machine() -> OrderMachine {
        let config = KioskConfig::default();
        OrderMachine::new(Arc::new(Catalog::standard()), config.tax_rate())
    }

    #[test]
    fn test_menu_lists_active_category() {
        let config = KioskConfig::default();
        let m = machine();
        let text = render_screen(&m.snapshot(), m.catalog(), &config);
        assert!(text.contains("Burgers"));
        assert!(text.contains("Big Mac®"));
        assert!(text.contains("$6.50"));
        assert!(text.contains("0 item(s)"));
    }

    #[test]
    fn test_unknown_category_renders_empty_page() {
        let config = KioskConfig::default();
        let mut m = machine();
        let _ = m.select_category("salads");
        let text = render_screen(&m.snapshot(), m.catalog(), &config);
        assert!(text.contains("nothing in this category"));
    }

    #[test]
    fn test_cancel_prompt_is_shown() {
        let config = KioskConfig::default();
        let mut m = machine();
        let _ = m.select_product("b2");
        let _ = m.confirm_customization("d1");
        let _ = m.request_cancel_order();
        let text = render_screen(&m.snapshot(), m.catalog(), &config);
        assert!(text.contains("Cancel the entire order?"));
    }

    #[test]
    fn test_builder_lists_drinks() {
        let config = KioskConfig::default();
        let mut m = machine();
        let _ = m.select_product("c1");
        let text = render_screen(&m.snapshot(), m.catalog(), &config);
        assert!(text.contains("McChicken®"));
        assert!(text.contains("Lemon Lime"));
        assert!(text.contains("Orange"));
    }

    #[test]
    fn test_builder_signs_drink_deltas() {
        let config = KioskConfig::default();
        let mut data = Catalog::standard().to_data();
        data.drinks[0].price_delta_cents = -50;
        data.drinks[1].price_delta_cents = 75;
        let mut m = OrderMachine::new(Arc::new(Catalog::new(data).unwrap()), config.tax_rate());
        let _ = m.select_product("b2");

        let text = render_screen(&m.snapshot(), m.catalog(), &config);
        assert!(text.contains("-$0.50"));
        assert!(!text.contains("+-"));
        assert!(text.contains("+$0.75"));
    }

    #[test]
    fn test_checkout_shows_rounded_totals() {
        let config = KioskConfig::default();
        let mut m = machine();
        let _ = m.select_product("b2");
        let _ = m.confirm_customization("d1");
        let _ = m.select_product("s1");
        let _ = m.confirm_customization("d2");
        let _ = m.proceed_to_checkout();

        let text = render_screen(&m.snapshot(), m.catalog(), &config);
        assert!(text.contains("$9.79"));
        assert!(text.contains("Tax (8%)"));
        assert!(text.contains("$0.78"));
        assert!(text.contains("$10.57"));
        assert!(text.contains("method card"));
    }

    #[test]
    fn test_success_shows_order_number() {
        let config = KioskConfig::default();
        let mut m = machine();
        let _ = m.select_product("b6");
        let _ = m.confirm_customization("d3");
        let _ = m.proceed_to_checkout();
        let _ = m.select_payment_method(PaymentMethod::Cash);
        let request = m.begin_payment().unwrap();
        let _ = m.complete_payment(OrderConfirmation {
            order_number: 424_242,
            total: request.total,
            method: request.method,
            payment_reference: "ref".to_string(),
            confirmed_at: Utc::now(),
        });

        let text = render_screen(&m.snapshot(), m.catalog(), &config);
        assert!(text.contains("#424242"));
        assert!(text.contains("by cash"));
        assert!(text.contains("5 seconds"));
    }
}
