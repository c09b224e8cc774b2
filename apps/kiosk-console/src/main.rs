//! # Kiosk Console Entry Point
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Kiosk Console                                    │
//! │                                                                         │
//! │   stdin ──► commands.rs ──► KioskSession ──► render.rs ──► stdout       │
//! │                                  │                                      │
//! │                                  └── tracing ──► stderr                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Usage: `kiosk-console [path/to/kiosk.toml]`

#[tokio::main]
async fn main() {
    // The actual setup is in lib.rs for better testability
    if let Err(err) = kiosk_console::run().await {
        eprintln!("kiosk-console: {err}");
        std::process::exit(1);
    }
}
