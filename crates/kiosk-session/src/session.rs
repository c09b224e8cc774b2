//! # Kiosk Session
//!
//! The single owner of a kiosk's order state.
//!
//! ## Ownership
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  KioskSession                                                           │
//! │    └── Arc<Inner>                                                       │
//! │          ├── Mutex<Shared>                                              │
//! │          │     ├── OrderMachine       (state + cart)                    │
//! │          │     ├── Option<AutoReturn> (armed timer + its generation)    │
//! │          │     └── next_generation                                      │
//! │          ├── watch::Sender<OrderSnapshot>                               │
//! │          └── PaymentGateway                                             │
//! │                                                                         │
//! │  Auto-return task ── Weak<Inner> ──┘  (never keeps the session alive)   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Suspension Points
//! - **Payment**: the request is taken under the lock, the gateway is awaited
//!   with the lock released, and the result is applied under the lock again.
//!   The machine is in its in-flight stage meanwhile, so a second `pay()` is
//!   ignored.
//! - **Auto-return**: entering PaymentSuccess arms a timer. A manual reset,
//!   `shutdown()` or dropping the session aborts it. When it fires it only
//!   resets if its generation is still the armed one.

use std::sync::{Arc, Mutex, MutexGuard, Weak};
use std::time::Duration;

use kiosk_core::{
    Catalog, OrderConfirmation, OrderMachine, OrderSnapshot, PaymentMethod, Screen, TaxRate,
    Transition,
};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::config::KioskConfig;
use crate::error::{SessionError, SessionResult};
use crate::payment::{PaymentGateway, SimulatedGateway};

/// An armed auto-return timer.
struct AutoReturn {
    generation: u64,
    handle: JoinHandle<()>,
}

struct Shared {
    machine: OrderMachine,
    auto_return: Option<AutoReturn>,
    next_generation: u64,
}

impl Shared {
    fn cancel_auto_return(&mut self) -> bool {
        match self.auto_return.take() {
            Some(timer) => {
                timer.handle.abort();
                true
            }
            None => false,
        }
    }
}

struct Inner<G> {
    shared: Mutex<Shared>,
    snapshots: watch::Sender<OrderSnapshot>,
    gateway: G,
    auto_return_after: Duration,
}

impl<G> Inner<G> {
    fn lock(&self) -> MutexGuard<'_, Shared> {
        self.shared.lock().expect("Session mutex poisoned")
    }

    fn publish(&self, machine: &OrderMachine) {
        self.snapshots.send_replace(machine.snapshot());
    }

    /// Called by the timer task once its delay has elapsed.
    fn auto_return_elapsed(&self, generation: u64) {
        let mut shared = self.lock();

        let armed = shared.auto_return.as_ref().map(|t| t.generation);
        if armed != Some(generation) {
            debug!(generation, ?armed, "Stale auto-return timer, ignoring");
            return;
        }
        // This task is the one finishing; dropping its handle just detaches it.
        shared.auto_return = None;

        if shared.machine.reset_after_success().is_applied() {
            info!("Auto-return: starting a new order");
            self.publish(&shared.machine);
        }
    }
}

// =============================================================================
// Kiosk Session
// =============================================================================

/// Serializes every transition and runs the payment and auto-return timers.
///
/// Not `Clone`: dropping the session cancels its timer.
pub struct KioskSession<G: PaymentGateway = SimulatedGateway> {
    inner: Arc<Inner<G>>,
    catalog: Arc<Catalog>,
}

impl KioskSession<SimulatedGateway> {
    /// Builds a session with the simulated gateway from configuration.
    pub fn from_config(config: &KioskConfig) -> SessionResult<Self> {
        let catalog = Arc::new(config.load_catalog()?);
        let gateway = SimulatedGateway::new(config.payment_latency());
        Ok(KioskSession::new(
            catalog,
            gateway,
            config.tax_rate(),
            config.auto_return_timeout(),
        ))
    }
}

impl<G: PaymentGateway> KioskSession<G> {
    pub fn new(
        catalog: Arc<Catalog>,
        gateway: G,
        tax_rate: TaxRate,
        auto_return_after: Duration,
    ) -> Self {
        let machine = OrderMachine::new(Arc::clone(&catalog), tax_rate);
        let (snapshots, _) = watch::channel(machine.snapshot());

        info!(
            tax_bps = tax_rate.bps(),
            auto_return_secs = auto_return_after.as_secs_f64(),
            "Kiosk session started"
        );

        KioskSession {
            inner: Arc::new(Inner {
                shared: Mutex::new(Shared {
                    machine,
                    auto_return: None,
                    next_generation: 0,
                }),
                snapshots,
                gateway,
                auto_return_after,
            }),
            catalog,
        }
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn snapshot(&self) -> OrderSnapshot {
        self.inner.lock().machine.snapshot()
    }

    pub fn screen(&self) -> Screen {
        self.inner.lock().machine.screen()
    }

    /// Receives a fresh snapshot after every applied transition, including
    /// the ones the auto-return timer makes.
    pub fn subscribe(&self) -> watch::Receiver<OrderSnapshot> {
        self.inner.snapshots.subscribe()
    }

    pub fn auto_return_armed(&self) -> bool {
        self.inner.lock().auto_return.is_some()
    }

    // =========================================================================
    // Transitions
    // =========================================================================

    pub fn select_category(&self, category_id: &str) -> Transition {
        self.apply("select_category", |m| m.select_category(category_id))
    }

    pub fn select_product(&self, product_id: &str) -> Transition {
        self.apply("select_product", |m| m.select_product(product_id))
    }

    pub fn confirm_customization(&self, drink_id: &str) -> Transition {
        self.apply("confirm_customization", |m| m.confirm_customization(drink_id))
    }

    pub fn cancel_customization(&self) -> Transition {
        self.apply("cancel_customization", OrderMachine::cancel_customization)
    }

    pub fn request_cancel_order(&self) -> Transition {
        self.apply("request_cancel_order", OrderMachine::request_cancel_order)
    }

    pub fn confirm_cancel_order(&self) -> Transition {
        self.apply("confirm_cancel_order", OrderMachine::confirm_cancel_order)
    }

    pub fn dismiss_cancel_order(&self) -> Transition {
        self.apply("dismiss_cancel_order", OrderMachine::dismiss_cancel_order)
    }

    pub fn proceed_to_checkout(&self) -> Transition {
        self.apply("proceed_to_checkout", OrderMachine::proceed_to_checkout)
    }

    pub fn select_payment_method(&self, method: PaymentMethod) -> Transition {
        self.apply("select_payment_method", |m| m.select_payment_method(method))
    }

    pub fn return_to_menu(&self) -> Transition {
        self.apply("return_to_menu", OrderMachine::return_to_menu)
    }

    /// Leaves the success screen now instead of waiting for the timer.
    pub fn reset_after_success(&self) -> Transition {
        let mut shared = self.inner.lock();
        let outcome = shared.machine.reset_after_success();

        if outcome.is_applied() {
            let cancelled = shared.cancel_auto_return();
            debug!(cancelled, "Manual reset after success");
            self.inner.publish(&shared.machine);
        } else {
            debug!(transition = "reset_after_success", screen = %shared.machine.screen(), "Transition ignored");
        }

        outcome
    }

    /// Submits the checkout total to the gateway and applies the outcome.
    ///
    /// ## Returns
    /// - `Ok(Some(confirmation))`: paid, now on PaymentSuccess
    /// - `Ok(None)`: nothing to pay (wrong screen, no method, or a payment
    ///   is already in flight)
    /// - `Err(SessionError::Payment)`: declined, back on Checkout with the
    ///   cart and method intact
    pub async fn pay(&self) -> SessionResult<Option<OrderConfirmation>> {
        let request = {
            let mut shared = self.inner.lock();
            match shared.machine.begin_payment() {
                Some(request) => {
                    self.inner.publish(&shared.machine);
                    request
                }
                None => {
                    debug!(screen = %shared.machine.screen(), "Pay ignored");
                    return Ok(None);
                }
            }
        };

        info!(method = %request.method, total = %request.total, "Submitting payment");
        let result = self.inner.gateway.submit(request).await;

        let mut shared = self.inner.lock();
        match result {
            Ok(confirmation) => {
                if !shared.machine.complete_payment(confirmation.clone()).is_applied() {
                    warn!(
                        order_number = confirmation.order_number,
                        "Payment confirmed but the order is no longer in flight"
                    );
                    return Ok(None);
                }
                info!(
                    order_number = confirmation.order_number,
                    total = %confirmation.total,
                    method = %confirmation.method,
                    "Payment confirmed"
                );
                self.arm_auto_return(&mut shared);
                self.inner.publish(&shared.machine);
                Ok(Some(confirmation))
            }
            Err(err) => {
                warn!(error = %err, "Payment failed, returning to checkout");
                let _ = shared.machine.fail_payment();
                self.inner.publish(&shared.machine);
                Err(SessionError::Payment(err))
            }
        }
    }

    /// Cancels the auto-return timer. Transitions keep working.
    pub fn shutdown(&self) {
        if self.inner.lock().cancel_auto_return() {
            debug!("Auto-return timer cancelled on shutdown");
        }
        info!("Kiosk session shut down");
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn apply(&self, name: &'static str, f: impl FnOnce(&mut OrderMachine) -> Transition) -> Transition {
        let mut shared = self.inner.lock();
        let outcome = f(&mut shared.machine);

        match outcome {
            Transition::Applied => {
                debug!(transition = name, screen = %shared.machine.screen(), "Transition applied");
                self.inner.publish(&shared.machine);
            }
            Transition::Ignored => {
                debug!(transition = name, screen = %shared.machine.screen(), "Transition ignored");
            }
        }

        outcome
    }

    fn arm_auto_return(&self, shared: &mut Shared) {
        shared.cancel_auto_return();
        shared.next_generation += 1;

        let generation = shared.next_generation;
        let delay = self.inner.auto_return_after;
        let weak: Weak<Inner<G>> = Arc::downgrade(&self.inner);

        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if let Some(inner) = weak.upgrade() {
                inner.auto_return_elapsed(generation);
            }
        });

        debug!(generation, delay_secs = delay.as_secs_f64(), "Auto-return armed");
        shared.auto_return = Some(AutoReturn { generation, handle });
    }
}

impl<G: PaymentGateway> Drop for KioskSession<G> {
    fn drop(&mut self) {
        if let Ok(mut shared) = self.inner.shared.lock() {
            shared.cancel_auto_return();
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
