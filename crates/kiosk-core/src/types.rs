//! # Domain Types
//!
//! Core domain types used throughout the kiosk.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Category     │   │    Product      │   │  DrinkOption    │       │
//! │  │  ─────────────  │◄──│  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │   │  category_id    │   │  id             │       │
//! │  │  name           │   │  price_cents    │   │  price_delta    │       │
//! │  └─────────────────┘   └────────┬────────┘   └────────┬────────┘       │
//! │                                 │                     │                 │
//! │                                 ▼                     ▼                 │
//! │                        ┌─────────────────────────────────────┐          │
//! │                        │  CartLine { product, drink }        │          │
//! │                        └─────────────────────────────────────┘          │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    TaxRate      │   │ PaymentMethod   │   │ OrderConfirm.   │       │
//! │  │  bps (u32)      │   │  Card           │   │  order_number   │       │
//! │  │  800 = 8%       │   │  Cash           │   │  total          │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Catalog types are authored in whole cents (`price_cents`) and converted
//! to [`Money`] only through their accessors.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate represented in basis points (bps).
///
/// 1 basis point = 0.01%, so 800 bps = 8%.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TaxRate(u32);

impl TaxRate {
    /// Creates a tax rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Zero tax rate.
    #[inline]
    pub const fn zero() -> Self {
        TaxRate(0)
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        crate::DEFAULT_TAX_RATE
    }
}

// =============================================================================
// Catalog Entries
// =============================================================================

/// A menu category shown in the sidebar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub image_ref: String,
}

/// A product available for ordering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Product {
    /// Unique identifier within the catalog.
    pub id: String,

    /// The category this product is listed under.
    pub category_id: String,

    /// Display name.
    pub name: String,

    /// Price in cents.
    pub price_cents: i64,

    /// Image reference for the presentation layer.
    pub image_ref: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calories: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Product {
    /// Returns the price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }
}

/// A drink that completes a combo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DrinkOption {
    pub id: String,
    pub name: String,

    /// Price adjustment in cents. Zero for the standard drinks.
    #[serde(default)]
    pub price_delta_cents: i64,

    pub image_ref: String,
}

impl DrinkOption {
    /// Returns the price adjustment as Money.
    #[inline]
    pub fn price_delta(&self) -> Money {
        Money::from_cents(self.price_delta_cents)
    }
}

// =============================================================================
// Cart Line
// =============================================================================

/// One confirmed combo in the cart.
///
/// Uses the snapshot pattern: the product and drink are copied out of the
/// catalog at confirmation time, and a line is never edited afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CartLine {
    pub product: Product,
    pub drink: DrinkOption,
}

impl CartLine {
    pub fn new(product: Product, drink: DrinkOption) -> Self {
        CartLine { product, drink }
    }

    /// Product price plus drink delta.
    #[inline]
    pub fn price(&self) -> Money {
        self.product.price() + self.drink.price_delta()
    }
}

// =============================================================================
// Payment
// =============================================================================

/// How the customer pays at checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Card,
    Cash,
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaymentMethod::Card => write!(f, "card"),
            PaymentMethod::Cash => write!(f, "cash"),
        }
    }
}

/// What the checkout screen hands to the payment gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentRequest {
    pub method: PaymentMethod,
    pub total: Money,
}

/// Lowest order number the gateway issues.
pub const ORDER_NUMBER_MIN: u32 = 100_000;

/// Highest order number the gateway issues.
pub const ORDER_NUMBER_MAX: u32 = 999_999;

/// The record produced by a completed payment.
///
/// Lives only as long as the success screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct OrderConfirmation {
    /// Six-digit number called out at the counter.
    pub order_number: u32,

    /// Amount charged.
    pub total: Money,

    pub method: PaymentMethod,

    /// Gateway reference (auth code, transaction id).
    pub payment_reference: String,

    #[ts(as = "String")]
    pub confirmed_at: DateTime<Utc>,
}

// =============================================================================
// Screen
// =============================================================================

/// The discriminant of the order state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum Screen {
    Menu,
    Builder,
    Checkout,
    PaymentSuccess,
}

impl std::fmt::Display for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Screen::Menu => write!(f, "menu"),
            Screen::Builder => write!(f, "builder"),
            Screen::Checkout => write!(f, "checkout"),
            Screen::PaymentSuccess => write!(f, "payment_success"),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
