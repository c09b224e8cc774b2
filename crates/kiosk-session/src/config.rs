//! # Kiosk Configuration
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     KIOSK_TAX_RATE_BPS=825                                             │
//! │     KIOSK_AUTO_RETURN_SECS=8                                           │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/kiosk/kiosk.toml (Linux)                                 │
//! │     ~/Library/Application Support/com.kiosk.kiosk/kiosk.toml (macOS)   │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     8% tax, 5 s auto-return, 2 s payment latency, standard menu        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # kiosk.toml
//! [store]
//! name = "Downtown Kiosk 2"
//! currency_symbol = "$"
//!
//! [pricing]
//! tax_rate_bps = 800
//!
//! [timing]
//! auto_return_secs = 5
//! payment_latency_ms = 2000
//!
//! [catalog]
//! path = "/etc/kiosk/menu.json"  # omit for the standard menu
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use kiosk_core::validation::validate_tax_rate_bps;
use kiosk_core::{Catalog, Money, TaxRate, DEFAULT_TAX_RATE};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{SessionError, SessionResult};

/// How long the success screen stays up before a fresh order starts.
pub const DEFAULT_AUTO_RETURN: Duration = Duration::from_secs(5);

/// How long the simulated gateway takes to confirm a payment.
pub const DEFAULT_PAYMENT_LATENCY: Duration = Duration::from_millis(2000);

/// Longest accepted auto-return timeout.
const MAX_AUTO_RETURN_SECS: u64 = 300;

/// Longest accepted simulated payment latency.
const MAX_PAYMENT_LATENCY_MS: u64 = 60_000;

// =============================================================================
// Sections
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreSettings {
    /// Shown in the console header.
    #[serde(default = "default_store_name")]
    pub name: String,

    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
}

fn default_store_name() -> String {
    "Self-Service Kiosk".to_string()
}

fn default_currency_symbol() -> String {
    "$".to_string()
}

impl Default for StoreSettings {
    fn default() -> Self {
        StoreSettings {
            name: default_store_name(),
            currency_symbol: default_currency_symbol(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricingSettings {
    /// Sales tax in basis points (800 = 8%).
    #[serde(default = "default_tax_rate_bps")]
    pub tax_rate_bps: u32,
}

fn default_tax_rate_bps() -> u32 {
    DEFAULT_TAX_RATE.bps()
}

impl Default for PricingSettings {
    fn default() -> Self {
        PricingSettings {
            tax_rate_bps: default_tax_rate_bps(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimingSettings {
    /// Seconds the payment success screen stays up.
    #[serde(default = "default_auto_return_secs")]
    pub auto_return_secs: u64,

    /// Simulated gateway latency in milliseconds.
    #[serde(default = "default_payment_latency_ms")]
    pub payment_latency_ms: u64,
}

fn default_auto_return_secs() -> u64 {
    DEFAULT_AUTO_RETURN.as_secs()
}

fn default_payment_latency_ms() -> u64 {
    DEFAULT_PAYMENT_LATENCY.as_millis() as u64
}

impl Default for TimingSettings {
    fn default() -> Self {
        TimingSettings {
            auto_return_secs: default_auto_return_secs(),
            payment_latency_ms: default_payment_latency_ms(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogSettings {
    /// JSON catalog file. `None` means the built-in standard menu.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

// =============================================================================
// Kiosk Configuration
// =============================================================================

/// Complete kiosk configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KioskConfig {
    #[serde(default)]
    pub store: StoreSettings,

    #[serde(default)]
    pub pricing: PricingSettings,

    #[serde(default)]
    pub timing: TimingSettings,

    #[serde(default)]
    pub catalog: CatalogSettings,
}

impl KioskConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (kiosk.toml)
    /// 3. Environment variables
    ///
    /// An explicit `config_path` must exist. Only the platform default
    /// location may be absent.
    pub fn load(config_path: Option<PathBuf>) -> SessionResult<Self> {
        let mut config = match config_path {
            Some(path) => read_config_file(&path)?,
            None => match Self::default_config_path() {
                Some(path) if path.exists() => read_config_file(&path)?,
                Some(path) => {
                    debug!(?path, "Config file not found, using defaults");
                    Self::default()
                }
                None => Self::default(),
            },
        };

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load kiosk config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Validates the configuration.
    pub fn validate(&self) -> SessionResult<()> {
        if self.store.name.trim().is_empty() {
            return Err(SessionError::InvalidConfig(
                "store.name must not be empty".into(),
            ));
        }

        validate_tax_rate_bps(self.pricing.tax_rate_bps)
            .map_err(|e| SessionError::InvalidConfig(e.to_string()))?;

        if self.timing.auto_return_secs == 0 || self.timing.auto_return_secs > MAX_AUTO_RETURN_SECS
        {
            return Err(SessionError::InvalidConfig(format!(
                "timing.auto_return_secs must be between 1 and {}, got {}",
                MAX_AUTO_RETURN_SECS, self.timing.auto_return_secs
            )));
        }

        if self.timing.payment_latency_ms > MAX_PAYMENT_LATENCY_MS {
            return Err(SessionError::InvalidConfig(format!(
                "timing.payment_latency_ms must be at most {}, got {}",
                MAX_PAYMENT_LATENCY_MS, self.timing.payment_latency_ms
            )));
        }

        Ok(())
    }

    /// Applies environment variable overrides.
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies overrides from any key lookup. Unparseable numbers are
    /// logged and skipped.
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(name) = lookup("KIOSK_STORE_NAME") {
            self.store.name = name;
        }

        if let Some(symbol) = lookup("KIOSK_CURRENCY_SYMBOL") {
            self.store.currency_symbol = symbol;
        }

        if let Some(bps) = lookup("KIOSK_TAX_RATE_BPS") {
            match bps.parse::<u32>() {
                Ok(bps) => {
                    debug!(bps, "Overriding tax rate from environment");
                    self.pricing.tax_rate_bps = bps;
                }
                Err(_) => warn!(value = %bps, "Ignoring non-numeric KIOSK_TAX_RATE_BPS"),
            }
        }

        if let Some(secs) = lookup("KIOSK_AUTO_RETURN_SECS") {
            match secs.parse::<u64>() {
                Ok(secs) => {
                    debug!(secs, "Overriding auto-return timeout from environment");
                    self.timing.auto_return_secs = secs;
                }
                Err(_) => warn!(value = %secs, "Ignoring non-numeric KIOSK_AUTO_RETURN_SECS"),
            }
        }

        if let Some(ms) = lookup("KIOSK_PAYMENT_LATENCY_MS") {
            match ms.parse::<u64>() {
                Ok(ms) => self.timing.payment_latency_ms = ms,
                Err(_) => warn!(value = %ms, "Ignoring non-numeric KIOSK_PAYMENT_LATENCY_MS"),
            }
        }

        if let Some(path) = lookup("KIOSK_CATALOG_PATH") {
            debug!(path = %path, "Overriding catalog path from environment");
            self.catalog.path = Some(PathBuf::from(path));
        }
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "kiosk", "kiosk")
            .map(|dirs| dirs.config_dir().join("kiosk.toml"))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    pub fn tax_rate(&self) -> TaxRate {
        TaxRate::from_bps(self.pricing.tax_rate_bps)
    }

    pub fn auto_return_timeout(&self) -> Duration {
        Duration::from_secs(self.timing.auto_return_secs)
    }

    pub fn payment_latency(&self) -> Duration {
        Duration::from_millis(self.timing.payment_latency_ms)
    }

    /// Loads the configured catalog, or the standard menu when none is set.
    pub fn load_catalog(&self) -> SessionResult<Catalog> {
        match &self.catalog.path {
            Some(path) => load_catalog_file(path),
            None => Ok(Catalog::standard()),
        }
    }

    /// Formats an amount for display, rounded to cents.
    ///
    /// ## Example
    /// ```rust
    /// use kiosk_core::Money;
    /// use kiosk_session::KioskConfig;
    ///
    /// let config = KioskConfig::default();
    /// assert_eq!(config.format_currency(Money::from_micros(10_573_200)), "$10.57");
    /// ```
    pub fn format_currency(&self, amount: Money) -> String {
        let cents = amount.rounded_cents();
        format!(
            "{}{}{}.{:02}",
            if cents < 0 { "-" } else { "" },
            self.store.currency_symbol,
            (cents / 100).abs(),
            (cents % 100).abs()
        )
    }
}

fn read_config_file(path: &Path) -> SessionResult<KioskConfig> {
    info!(?path, "Loading kiosk config from file");
    let contents = std::fs::read_to_string(path)?;
    Ok(toml::from_str(&contents)?)
}

fn load_catalog_file(path: &Path) -> SessionResult<Catalog> {
    info!(?path, "Loading catalog from file");
    let json = std::fs::read_to_string(path)?;
    let catalog = Catalog::from_json(&json)?;
    debug!(
        categories = catalog.categories().len(),
        drinks = catalog.drink_options().len(),
        "Catalog loaded"
    );
    Ok(catalog)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn overrides(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = KioskConfig::default();
        assert_eq!(config.tax_rate(), DEFAULT_TAX_RATE);
        assert_eq!(config.auto_return_timeout(), Duration::from_secs(5));
        assert_eq!(config.payment_latency(), Duration::from_millis(2000));
        assert!(config.catalog.path.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: KioskConfig = toml::from_str(
            r#"
            [pricing]
            tax_rate_bps = 825
            "#,
        )
        .unwrap();
        assert_eq!(config.pricing.tax_rate_bps, 825);
        assert_eq!(config.timing.auto_return_secs, 5);
        assert_eq!(config.store.currency_symbol, "$");
    }

    #[test]
    fn test_overrides_take_priority() {
        let mut config = KioskConfig::default();
        config.apply_overrides(overrides(&[
            ("KIOSK_TAX_RATE_BPS", "650"),
            ("KIOSK_AUTO_RETURN_SECS", "10"),
            ("KIOSK_PAYMENT_LATENCY_MS", "250"),
            ("KIOSK_STORE_NAME", "Airport"),
            ("KIOSK_CATALOG_PATH", "/tmp/menu.json"),
        ]));

        assert_eq!(config.tax_rate(), TaxRate::from_bps(650));
        assert_eq!(config.auto_return_timeout(), Duration::from_secs(10));
        assert_eq!(config.payment_latency(), Duration::from_millis(250));
        assert_eq!(config.store.name, "Airport");
        assert_eq!(config.catalog.path, Some(PathBuf::from("/tmp/menu.json")));
    }

    #[test]
    fn test_unparseable_override_is_skipped() {
        let mut config = KioskConfig::default();
        config.apply_overrides(overrides(&[("KIOSK_TAX_RATE_BPS", "eight percent")]));
        assert_eq!(config.tax_rate(), DEFAULT_TAX_RATE);
    }

    #[test]
    fn test_config_validation() {
        let mut config = KioskConfig::default();

        config.pricing.tax_rate_bps = 10_001;
        assert!(config.validate().is_err());
        config.pricing.tax_rate_bps = 800;

        config.timing.auto_return_secs = 0;
        assert!(config.validate().is_err());
        config.timing.auto_return_secs = 5;

        config.timing.payment_latency_ms = 120_000;
        assert!(config.validate().is_err());
        config.timing.payment_latency_ms = 0;
        assert!(config.validate().is_ok());

        config.store.name = "  ".to_string();
        assert!(matches!(
            config.validate(),
            Err(SessionError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_load_explicit_missing_path_fails() {
        let path = std::env::temp_dir().join("kiosk-config-that-does-not-exist.toml");
        assert!(matches!(
            KioskConfig::load(Some(path.clone())),
            Err(SessionError::ConfigLoadFailed(_))
        ));

        // The lenient loader still falls back
        let config = KioskConfig::load_or_default(Some(path));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_explicit_file() {
        let path = std::env::temp_dir().join(format!("kiosk-config-{}.toml", std::process::id()));
        std::fs::write(
            &path,
            "[store]\nname = \"Airport\"\n\n[timing]\nauto_return_secs = 8\n",
        )
        .unwrap();

        let config = KioskConfig::load(Some(path.clone()));
        std::fs::remove_file(&path).unwrap();

        let config = config.unwrap();
        assert_eq!(config.store.name, "Airport");
        assert_eq!(config.auto_return_timeout(), Duration::from_secs(8));
        assert_eq!(config.tax_rate(), DEFAULT_TAX_RATE);
    }

    #[test]
    fn test_read_config_file_reports_bad_toml() {
        let path = std::env::temp_dir().join(format!("kiosk-bad-config-{}.toml", std::process::id()));
        std::fs::write(&path, "[timing\nauto_return_secs = ").unwrap();

        let result = read_config_file(&path);
        std::fs::remove_file(&path).unwrap();
        assert!(matches!(result, Err(SessionError::ConfigLoadFailed(_))));
    }

    #[test]
    fn test_load_catalog_defaults_to_standard() {
        let catalog = KioskConfig::default().load_catalog().unwrap();
        assert_eq!(catalog.first_category().id, "burgers");
    }

    #[test]
    fn test_load_catalog_missing_file() {
        let mut config = KioskConfig::default();
        config.catalog.path = Some(std::env::temp_dir().join("kiosk-no-such-menu.json"));
        assert!(matches!(
            config.load_catalog(),
            Err(SessionError::ConfigLoadFailed(_))
        ));
    }

    #[test]
    fn test_format_currency() {
        let config = KioskConfig::default();
        assert_eq!(config.format_currency(Money::from_cents(1234)), "$12.34");
        assert_eq!(config.format_currency(Money::zero()), "$0.00");
        assert_eq!(config.format_currency(Money::from_micros(783_200)), "$0.78");
        assert_eq!(config.format_currency(Money::from_cents(-1234)), "-$12.34");
    }
}
