//! # Payment Gateway
//!
//! The seam between checkout and whatever actually takes the money.
//!
//! ## Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  KioskSession::pay()                                                    │
//! │     │                                                                   │
//! │     │ begin_payment() → PaymentRequest { method, total }                │
//! │     ▼                                                                   │
//! │  PaymentGateway::submit(request)        (session lock NOT held)         │
//! │     │                                                                   │
//! │     ├── Ok(OrderConfirmation) ──► complete_payment ──► PaymentSuccess   │
//! │     └── Err(PaymentError)     ──► fail_payment     ──► Checkout         │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Only [`SimulatedGateway`] ships here. It always succeeds after a fixed
//! delay; there is no retry or idempotency key.

use std::future::Future;
use std::time::Duration;

use chrono::Utc;
use kiosk_core::{OrderConfirmation, PaymentRequest, ORDER_NUMBER_MAX, ORDER_NUMBER_MIN};
use rand::Rng;
use tracing::debug;
use uuid::Uuid;

use crate::config::DEFAULT_PAYMENT_LATENCY;
use crate::error::PaymentError;

/// Something that can charge a customer.
pub trait PaymentGateway: Send + Sync + 'static {
    /// Charges `request.total` using `request.method`.
    fn submit(
        &self,
        request: PaymentRequest,
    ) -> impl Future<Output = Result<OrderConfirmation, PaymentError>> + Send;
}

// =============================================================================
// Simulated Gateway
// =============================================================================

/// Confirms every payment after a fixed latency.
#[derive(Debug, Clone)]
pub struct SimulatedGateway {
    latency: Duration,
}

impl SimulatedGateway {
    pub fn new(latency: Duration) -> Self {
        SimulatedGateway { latency }
    }
}

impl Default for SimulatedGateway {
    fn default() -> Self {
        SimulatedGateway::new(DEFAULT_PAYMENT_LATENCY)
    }
}

impl PaymentGateway for SimulatedGateway {
    fn submit(
        &self,
        request: PaymentRequest,
    ) -> impl Future<Output = Result<OrderConfirmation, PaymentError>> + Send {
        let latency = self.latency;

        async move {
            debug!(
                method = %request.method,
                total = %request.total,
                latency_ms = latency.as_millis() as u64,
                "Simulating payment"
            );
            tokio::time::sleep(latency).await;

            // Order numbers may repeat; nothing is persisted to collide with.
            let order_number = rand::thread_rng().gen_range(ORDER_NUMBER_MIN..=ORDER_NUMBER_MAX);

            Ok(OrderConfirmation {
                order_number,
                total: request.total,
                method: request.method,
                payment_reference: Uuid::new_v4().to_string(),
                confirmed_at: Utc::now(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kiosk_core::{Money, PaymentMethod};
    use tokio::time::Instant;

    fn request() -> PaymentRequest {
        PaymentRequest {
            method: PaymentMethod::Card,
            total: Money::from_micros(10_573_200),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_simulated_gateway_waits_then_confirms() {
        let gateway = SimulatedGateway::default();
        let started = Instant::now();

        let confirmation = gateway.submit(request()).await.unwrap();

        assert!(started.elapsed() >= Duration::from_millis(2000));
        assert_eq!(confirmation.total, request().total);
        assert_eq!(confirmation.method, PaymentMethod::Card);
        assert!(Uuid::parse_str(&confirmation.payment_reference).is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn test_order_numbers_are_six_digits() {
        let gateway = SimulatedGateway::new(Duration::ZERO);
        for _ in 0..200 {
            let confirmation = gateway.submit(request()).await.unwrap();
            assert!((ORDER_NUMBER_MIN..=ORDER_NUMBER_MAX).contains(&confirmation.order_number));
        }
    }
}
