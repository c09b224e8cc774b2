//! # Kiosk Console Library
//!
//! A headless stand-in for the kiosk touch screen: reads commands from
//! stdin, drives a [`KioskSession`], prints each resulting screen.
//!
//! ## Module Organization
//! ```text
//! kiosk_console/
//! ├── lib.rs          ◄─── You are here (startup, command loop)
//! ├── commands.rs     ◄─── Line → Command parsing
//! └── render.rs       ◄─── Snapshot → text
//! ```
//!
//! ## Startup Sequence
//! 1. Initialize tracing (stderr, so screens on stdout stay readable)
//! 2. Load configuration (first argument, else the platform config dir)
//! 3. Load the catalog and start the session
//! 4. Watch snapshots for the auto-return
//! 5. Read commands until `quit` or end of input

pub mod commands;
pub mod render;

use std::path::PathBuf;

use kiosk_core::{OrderSnapshot, Screen, Transition};
use kiosk_session::{KioskConfig, KioskSession, PaymentGateway, SimulatedGateway};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use commands::{Command, HELP};

/// Runs the console until `quit` or end of input.
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    // An explicit config file must load; the default location may be absent.
    let config = match std::env::args_os().nth(1).map(PathBuf::from) {
        Some(path) => KioskConfig::load(Some(path))?,
        None => KioskConfig::load_or_default(None),
    };

    let session = KioskSession::from_config(&config)?;
    info!(store = %config.store.name, "Starting kiosk console");

    let console = Console::new(session, config);
    let notifier = watch_auto_return(console.session().subscribe());

    println!("{HELP}\n");
    println!("{}", console.execute(Command::Show).await);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match line.parse::<Command>() {
            Ok(Command::Quit) => break,
            Ok(Command::Pay) => {
                println!("Processing payment...");
                println!("{}", console.execute(Command::Pay).await);
            }
            Ok(command) => println!("{}", console.execute(command).await),
            Err(err) => println!("{err}"),
        }
    }

    notifier.abort();
    console.session().shutdown();
    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show every transition, applied or ignored
/// - `RUST_LOG=kiosk_session=trace` - Session internals only
/// - Default: INFO, debug for the kiosk crates
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,kiosk_session=debug,kiosk_console=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Prints a notice when the success screen times out on its own.
fn watch_auto_return(mut rx: watch::Receiver<OrderSnapshot>) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut last = rx.borrow().screen;
        while rx.changed().await.is_ok() {
            let screen = rx.borrow_and_update().screen;
            if last == Screen::PaymentSuccess && screen == Screen::Menu {
                println!("\nReady for the next order.");
            }
            last = screen;
        }
    })
}

// =============================================================================
// Console
// =============================================================================

/// Maps commands onto session transitions and renders the result.
pub struct Console<G: PaymentGateway = SimulatedGateway> {
    session: KioskSession<G>,
    config: KioskConfig,
}

impl<G: PaymentGateway> Console<G> {
    pub fn new(session: KioskSession<G>, config: KioskConfig) -> Self {
        Console { session, config }
    }

    pub fn session(&self) -> &KioskSession<G> {
        &self.session
    }

    /// Executes one command and returns the text to print.
    pub async fn execute(&self, command: Command) -> String {
        let session = &self.session;

        let outcome = match &command {
            Command::Categories => {
                return render::render_categories(&session.snapshot(), session.catalog());
            }
            Command::Menu => {
                return render::render_menu(&session.snapshot(), session.catalog(), &self.config);
            }
            Command::Show => return self.screen(),
            Command::Json => {
                return serde_json::to_string_pretty(&session.snapshot())
                    .unwrap_or_else(|err| format!("Snapshot could not be serialized: {err}"));
            }
            Command::Help => return HELP.to_string(),
            Command::Quit => return "Bye.".to_string(),

            Command::Category(id) => session.select_category(id),
            Command::Product(id) => session.select_product(id),
            Command::Drink(id) => session.confirm_customization(id),
            Command::Back => match session.screen() {
                Screen::Builder => session.cancel_customization(),
                _ => session.return_to_menu(),
            },
            Command::CancelOrder => session.request_cancel_order(),
            Command::Yes => session.confirm_cancel_order(),
            Command::No => session.dismiss_cancel_order(),
            Command::Checkout => session.proceed_to_checkout(),
            Command::Method(method) => session.select_payment_method(*method),
            Command::Done => session.reset_after_success(),
            Command::Pay => match session.pay().await {
                Ok(Some(_)) => Transition::Applied,
                Ok(None) => Transition::Ignored,
                Err(err) => {
                    warn!(error = %err, "Payment failed");
                    return format!("{err}\n{}", self.screen());
                }
            },
        };

        match outcome {
            Transition::Applied => self.screen(),
            Transition::Ignored => self.not_available(&command),
        }
    }

    fn screen(&self) -> String {
        render::render_screen(&self.session.snapshot(), self.session.catalog(), &self.config)
    }

    fn not_available(&self, command: &Command) -> String {
        let snapshot = self.session.snapshot();
        let reason = match command {
            Command::Product(id) if self.session.catalog().product(id).is_none() => {
                format!("There is no product `{id}`")
            }
            Command::Drink(id) if self.session.catalog().drink(id).is_none() => {
                format!("There is no drink `{id}`")
            }
            Command::CancelOrder | Command::Checkout if snapshot.cart.is_empty() => {
                "Your order is empty".to_string()
            }
            Command::Pay if snapshot.screen == Screen::Checkout && snapshot.payment_method.is_none() => {
                "Choose a payment method first".to_string()
            }
            _ => format!(
                "`{}` is not available on the {} screen",
                command.name(),
                snapshot.screen
            ),
        };
        format!("{reason}. Type `show` to see where you are.")
    }
}
