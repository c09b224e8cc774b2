//! # kiosk-session: Session Controller for the Ordering Kiosk
//!
//! Wraps the pure [`kiosk_core::OrderMachine`] with everything that needs a
//! runtime: configuration, the payment gateway, the auto-return timer, and
//! snapshot broadcasting to the presentation layer.
//!
//! ## Modules
//! - [`config`] - `kiosk.toml` + environment configuration
//! - [`payment`] - Payment gateway trait and the simulator
//! - [`session`] - `KioskSession`, the single owner of order state
//! - [`error`] - Session and payment errors
//!
//! ## Usage
//! ```rust,no_run
//! use kiosk_core::PaymentMethod;
//! use kiosk_session::{KioskConfig, KioskSession};
//!
//! # async fn run() -> kiosk_session::SessionResult<()> {
//! let config = KioskConfig::load(None)?;
//! let session = KioskSession::from_config(&config)?;
//!
//! let _ = session.select_product("b2");
//! let _ = session.confirm_customization("d2");
//! let _ = session.proceed_to_checkout();
//! let _ = session.select_payment_method(PaymentMethod::Card);
//!
//! if let Some(confirmation) = session.pay().await? {
//!     println!("Order #{}", confirmation.order_number);
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod payment;
pub mod session;

pub use config::KioskConfig;
pub use error::{PaymentError, SessionError, SessionResult};
pub use payment::{PaymentGateway, SimulatedGateway};
pub use session::KioskSession;
