//! # kiosk-core: Pure Ordering Logic for the Self-Service Kiosk
//!
//! Everything the kiosk decides, as plain data and pure functions. Timers,
//! payment I/O and logging live in `kiosk-session`.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Kiosk Architecture                               │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Presentation (kiosk-console)                    │   │
//! │  │    Menu ──► Meal Builder ──► Checkout ──► Payment Success      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ transitions / snapshots                │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    kiosk-session                                │   │
//! │  │    KioskSession, payment gateway, auto-return timer            │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ kiosk-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │  catalog  │  │   order   │  │  pricing  │  │   money   │  │   │
//! │  │   │ Category  │  │  Order-   │  │  Order-   │  │   Money   │  │   │
//! │  │   │ Product   │  │  Machine  │  │  Totals   │  │  TaxRate  │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO TIMERS • NO NETWORK • PURE FUNCTIONS             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, CartLine, OrderConfirmation, etc.)
//! - [`money`] - Money type with integer arithmetic
//! - [`catalog`] - Read-only menu tables
//! - [`order`] - The screen state machine and cart
//! - [`pricing`] - Subtotal, tax, total
//! - [`error`] - Domain error types
//! - [`validation`] - Catalog data rules
//!
//! ## Example Usage
//!
//! ```rust
//! use std::sync::Arc;
//! use kiosk_core::{Catalog, OrderMachine, Screen, DEFAULT_TAX_RATE};
//!
//! let mut order = OrderMachine::new(Arc::new(Catalog::standard()), DEFAULT_TAX_RATE);
//!
//! let _ = order.select_product("b2");
//! assert_eq!(order.screen(), Screen::Builder);
//!
//! let _ = order.confirm_customization("d2");
//! assert_eq!(order.cart().len(), 1);
//! assert_eq!(order.totals().total.to_string(), "7.02");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
pub mod error;
pub mod money;
pub mod order;
pub mod pricing;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use catalog::{Catalog, CatalogData};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use order::{OrderMachine, OrderSnapshot, OrderState, PaymentStage, Transition};
pub use pricing::{compute_totals, OrderTotals};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Sales tax applied to every order unless configuration says otherwise.
pub const DEFAULT_TAX_RATE: TaxRate = TaxRate::from_bps(800);
