//! # Order State Machine
//!
//! Holds the active screen, the product being customized, and the cart.
//!
//! ## Screen Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │          select_product                 proceed_to_checkout             │
//! │   ┌──────┐ ─────────────► ┌─────────┐    ┌──────┐ ─────────► ┌────────┐ │
//! │   │      │                │ Builder │    │      │            │Checkout│ │
//! │   │ Menu │ ◄───────────── │ product │    │ Menu │ ◄───────── │        │ │
//! │   │      │  confirm /     └─────────┘    │      │ return_to_ └───┬────┘ │
//! │   └──┬───┘  cancel_customization         └──▲───┘   menu         │      │
//! │      │                                      │       begin_payment│      │
//! │      │ request_cancel_order                 │     complete_payment      │
//! │      ▼                                      │                    ▼      │
//! │   [prompt] ── confirm: cart cleared         │   reset_after ┌─────────┐ │
//! │            ── dismiss: cart unchanged       └────────────── │ Payment │ │
//! │                                                  _success   │ Success │ │
//! │                                                             └─────────┘ │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Rules
//! - Every transition either applies completely or is [`Transition::Ignored`].
//!   Calling one from the wrong state is a silent no-op, never an error.
//! - Builder always carries its product; leaving Builder drops it.
//! - Checkout and PaymentSuccess are only reachable with a non-empty cart,
//!   and the cart is only cleared from Menu or by the post-payment reset.
//! - A confirmation exists only inside PaymentSuccess.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::catalog::Catalog;
use crate::pricing::{compute_totals, OrderTotals};
use crate::types::{
    CartLine, OrderConfirmation, PaymentMethod, PaymentRequest, Product, Screen, TaxRate,
};

/// Outcome of a transition call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum Transition {
    Applied,
    Ignored,
}

impl Transition {
    #[inline]
    pub fn is_applied(self) -> bool {
        self == Transition::Applied
    }
}

/// Where the checkout screen is in taking payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "stage", rename_all = "snake_case")]
pub enum PaymentStage {
    /// Waiting for the customer to pick a method and press pay.
    Choosing { method: Option<PaymentMethod> },
    /// Submitted to the gateway. Pay and back are disabled.
    InFlight { method: PaymentMethod },
}

impl PaymentStage {
    pub fn method(&self) -> Option<PaymentMethod> {
        match *self {
            PaymentStage::Choosing { method } => method,
            PaymentStage::InFlight { method } => Some(method),
        }
    }

    pub fn is_in_flight(&self) -> bool {
        matches!(self, PaymentStage::InFlight { .. })
    }
}

/// The state machine's state. The variant is the active screen.
///
/// The active category survives every screen so the menu reopens where
/// the customer left it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "screen", rename_all = "snake_case")]
pub enum OrderState {
    Menu {
        active_category: String,
        /// The "cancel the entire order?" prompt is showing.
        cancel_prompt: bool,
    },
    Builder {
        active_category: String,
        product: Product,
    },
    Checkout {
        active_category: String,
        payment: PaymentStage,
    },
    PaymentSuccess {
        active_category: String,
        confirmation: OrderConfirmation,
    },
}

impl OrderState {
    pub fn screen(&self) -> Screen {
        match self {
            OrderState::Menu { .. } => Screen::Menu,
            OrderState::Builder { .. } => Screen::Builder,
            OrderState::Checkout { .. } => Screen::Checkout,
            OrderState::PaymentSuccess { .. } => Screen::PaymentSuccess,
        }
    }

    pub fn active_category(&self) -> &str {
        match self {
            OrderState::Menu { active_category, .. }
            | OrderState::Builder { active_category, .. }
            | OrderState::Checkout { active_category, .. }
            | OrderState::PaymentSuccess { active_category, .. } => active_category,
        }
    }

    fn menu(active_category: &str) -> Self {
        OrderState::Menu {
            active_category: active_category.to_string(),
            cancel_prompt: false,
        }
    }
}

/// Everything the presentation layer needs to draw the current screen.
///
/// The cart is included on every screen; the success screen simply does
/// not show it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct OrderSnapshot {
    pub screen: Screen,
    pub active_category: String,
    pub cancel_prompt_open: bool,
    pub pinned_product: Option<Product>,
    pub cart: Vec<CartLine>,
    pub totals: OrderTotals,
    pub payment_method: Option<PaymentMethod>,
    pub payment_in_flight: bool,
    pub confirmation: Option<OrderConfirmation>,
}

// =============================================================================
// Order Machine
// =============================================================================

/// The single owner of order state for one kiosk.
#[derive(Debug, Clone)]
pub struct OrderMachine {
    catalog: Arc<Catalog>,
    tax_rate: TaxRate,
    state: OrderState,
    cart: Vec<CartLine>,
}

impl OrderMachine {
    /// Starts on the menu, first category active, empty cart.
    pub fn new(catalog: Arc<Catalog>, tax_rate: TaxRate) -> Self {
        let state = OrderState::menu(&catalog.first_category().id);
        OrderMachine {
            catalog,
            tax_rate,
            state,
            cart: Vec::new(),
        }
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn state(&self) -> &OrderState {
        &self.state
    }

    pub fn screen(&self) -> Screen {
        self.state.screen()
    }

    pub fn active_category(&self) -> &str {
        self.state.active_category()
    }

    pub fn cart(&self) -> &[CartLine] {
        &self.cart
    }

    pub fn tax_rate(&self) -> TaxRate {
        self.tax_rate
    }

    pub fn totals(&self) -> OrderTotals {
        compute_totals(&self.cart, self.tax_rate)
    }

    /// The product being customized, only while in Builder.
    pub fn pinned_product(&self) -> Option<&Product> {
        match &self.state {
            OrderState::Builder { product, .. } => Some(product),
            _ => None,
        }
    }

    /// The payment confirmation, only while in PaymentSuccess.
    pub fn confirmation(&self) -> Option<&OrderConfirmation> {
        match &self.state {
            OrderState::PaymentSuccess { confirmation, .. } => Some(confirmation),
            _ => None,
        }
    }

    pub fn snapshot(&self) -> OrderSnapshot {
        let (cancel_prompt_open, payment) = match &self.state {
            OrderState::Menu { cancel_prompt, .. } => (*cancel_prompt, None),
            OrderState::Checkout { payment, .. } => (false, Some(*payment)),
            _ => (false, None),
        };

        OrderSnapshot {
            screen: self.screen(),
            active_category: self.active_category().to_string(),
            cancel_prompt_open,
            pinned_product: self.pinned_product().cloned(),
            cart: self.cart.clone(),
            totals: self.totals(),
            payment_method: payment.and_then(|p| p.method()),
            payment_in_flight: payment.is_some_and(|p| p.is_in_flight()),
            confirmation: self.confirmation().cloned(),
        }
    }

    // =========================================================================
    // Menu Transitions
    // =========================================================================

    /// Switches the menu page. Unknown ids are accepted; the page is empty.
    pub fn select_category(&mut self, category_id: &str) -> Transition {
        match &mut self.state {
            OrderState::Menu {
                active_category,
                cancel_prompt: false,
            } => {
                *active_category = category_id.to_string();
                Transition::Applied
            }
            _ => Transition::Ignored,
        }
    }

    /// Opens the meal builder for a catalog product.
    pub fn select_product(&mut self, product_id: &str) -> Transition {
        let OrderState::Menu {
            active_category,
            cancel_prompt: false,
        } = &self.state
        else {
            return Transition::Ignored;
        };
        let Some(product) = self.catalog.product(product_id) else {
            return Transition::Ignored;
        };

        self.state = OrderState::Builder {
            active_category: active_category.clone(),
            product: product.clone(),
        };
        Transition::Applied
    }

    /// Opens the cancel-order prompt. Needs something in the cart.
    pub fn request_cancel_order(&mut self) -> Transition {
        match &mut self.state {
            OrderState::Menu { cancel_prompt, .. } if !*cancel_prompt && !self.cart.is_empty() => {
                *cancel_prompt = true;
                Transition::Applied
            }
            _ => Transition::Ignored,
        }
    }

    /// The customer confirmed the prompt: empty the cart, stay on the menu.
    pub fn confirm_cancel_order(&mut self) -> Transition {
        match &mut self.state {
            OrderState::Menu { cancel_prompt, .. } if *cancel_prompt => {
                *cancel_prompt = false;
                self.cart.clear();
                Transition::Applied
            }
            _ => Transition::Ignored,
        }
    }

    /// The customer backed out of the prompt. Cart is untouched.
    pub fn dismiss_cancel_order(&mut self) -> Transition {
        match &mut self.state {
            OrderState::Menu { cancel_prompt, .. } if *cancel_prompt => {
                *cancel_prompt = false;
                Transition::Applied
            }
            _ => Transition::Ignored,
        }
    }

    pub fn proceed_to_checkout(&mut self) -> Transition {
        match &self.state {
            OrderState::Menu {
                active_category,
                cancel_prompt: false,
            } if !self.cart.is_empty() => {
                self.state = OrderState::Checkout {
                    active_category: active_category.clone(),
                    payment: PaymentStage::Choosing { method: None },
                };
                Transition::Applied
            }
            _ => Transition::Ignored,
        }
    }

    // =========================================================================
    // Builder Transitions
    // =========================================================================

    /// Adds the pinned product with the chosen drink as a new cart line.
    ///
    /// Always appends: the same combo twice is two lines.
    pub fn confirm_customization(&mut self, drink_id: &str) -> Transition {
        let OrderState::Builder {
            active_category,
            product,
        } = &self.state
        else {
            return Transition::Ignored;
        };
        let Some(drink) = self.catalog.drink(drink_id) else {
            return Transition::Ignored;
        };

        self.cart.push(CartLine::new(product.clone(), drink.clone()));
        self.state = OrderState::menu(active_category);
        Transition::Applied
    }

    pub fn cancel_customization(&mut self) -> Transition {
        match &self.state {
            OrderState::Builder {
                active_category, ..
            } => {
                self.state = OrderState::menu(active_category);
                Transition::Applied
            }
            _ => Transition::Ignored,
        }
    }

    // =========================================================================
    // Checkout Transitions
    // =========================================================================

    pub fn select_payment_method(&mut self, method: PaymentMethod) -> Transition {
        match &mut self.state {
            OrderState::Checkout { payment, .. } if !payment.is_in_flight() => {
                *payment = PaymentStage::Choosing {
                    method: Some(method),
                };
                Transition::Applied
            }
            _ => Transition::Ignored,
        }
    }

    /// Marks the payment as submitted and returns what to charge.
    ///
    /// Returns `None` without a chosen method, or when a payment is already
    /// in flight, so a second press can never double-charge.
    pub fn begin_payment(&mut self) -> Option<PaymentRequest> {
        let total = self.totals().total;
        match &mut self.state {
            OrderState::Checkout { payment, .. } => match *payment {
                PaymentStage::Choosing {
                    method: Some(method),
                } => {
                    *payment = PaymentStage::InFlight { method };
                    Some(PaymentRequest { method, total })
                }
                _ => None,
            },
            _ => None,
        }
    }

    /// The gateway confirmed the in-flight payment.
    pub fn complete_payment(&mut self, confirmation: OrderConfirmation) -> Transition {
        match &self.state {
            OrderState::Checkout {
                active_category,
                payment: PaymentStage::InFlight { .. },
            } => {
                self.state = OrderState::PaymentSuccess {
                    active_category: active_category.clone(),
                    confirmation,
                };
                Transition::Applied
            }
            _ => Transition::Ignored,
        }
    }

    /// The gateway rejected the in-flight payment. Back to method selection
    /// with the cart intact.
    pub fn fail_payment(&mut self) -> Transition {
        match &mut self.state {
            OrderState::Checkout { payment, .. } => match *payment {
                PaymentStage::InFlight { method } => {
                    *payment = PaymentStage::Choosing {
                        method: Some(method),
                    };
                    Transition::Applied
                }
                PaymentStage::Choosing { .. } => Transition::Ignored,
            },
            _ => Transition::Ignored,
        }
    }

    /// Back to browsing with the cart unchanged. Not while paying.
    pub fn return_to_menu(&mut self) -> Transition {
        match &self.state {
            OrderState::Checkout {
                active_category,
                payment: PaymentStage::Choosing { .. },
            } => {
                self.state = OrderState::menu(active_category);
                Transition::Applied
            }
            _ => Transition::Ignored,
        }
    }

    // =========================================================================
    // Success Transitions
    // =========================================================================

    /// Starts a fresh order: cart and confirmation are discarded.
    pub fn reset_after_success(&mut self) -> Transition {
        match &self.state {
            OrderState::PaymentSuccess {
                active_category, ..
            } => {
                self.cart.clear();
                self.state = OrderState::menu(active_category);
                Transition::Applied
            }
            _ => Transition::Ignored,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
