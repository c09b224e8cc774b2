//! # Console Commands
//!
//! One line of input, one command.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Screen            Commands                                             │
//! │  ──────            ────────                                             │
//! │  Menu              categories, menu, category <id>, product <id>,       │
//! │                    cancel → yes | no, checkout                          │
//! │  Builder           drink <id>, back                                     │
//! │  Checkout          method card|cash, pay, back                          │
//! │  PaymentSuccess    done                                                 │
//! │  Any               show, json, help, quit                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Commands are accepted on any screen. The session decides whether they
//! apply; parsing only checks the shape of the line.

use std::str::FromStr;

use kiosk_core::PaymentMethod;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Categories,
    Menu,
    Category(String),
    Product(String),
    Drink(String),
    Back,
    CancelOrder,
    Yes,
    No,
    Checkout,
    Method(PaymentMethod),
    Pay,
    Done,
    Show,
    Json,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("Type a command, or `help` for the list")]
    Empty,

    #[error("Unknown command `{0}`. Type `help` for the list")]
    Unknown(String),

    #[error("`{command}` needs {argument}")]
    MissingArgument {
        command: &'static str,
        argument: &'static str,
    },

    #[error("`{0}` takes no arguments")]
    UnexpectedArgument(&'static str),

    #[error("Unknown payment method `{0}`. Use `card` or `cash`")]
    InvalidMethod(String),
}

pub const HELP: &str = "\
Commands:
  categories         list menu categories
  menu               list products in the current category
  category <id>      switch category
  product <id>       customize a product
  drink <id>         add the product with this drink to the order
  back               leave the meal builder or checkout
  cancel             cancel the whole order (asks to confirm)
  yes | no           answer the cancel prompt
  checkout           review the order
  method card|cash   choose how to pay
  pay                submit payment
  done               start a new order from the success screen
  show               redraw the current screen
  json               print the current snapshot as JSON
  quit               exit";

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let Some(word) = words.next() else {
            return Err(CommandError::Empty);
        };
        let argument = words.next();
        if words.next().is_some() {
            return Err(CommandError::UnexpectedArgument("extra words"));
        }

        let keyword = word.to_lowercase();
        let command = match keyword.as_str() {
            "category" | "cat" => Command::Category(required(argument, "category", "a category id")?),
            "product" | "p" => Command::Product(required(argument, "product", "a product id")?),
            "drink" | "d" => Command::Drink(required(argument, "drink", "a drink id")?),
            "method" => {
                let method = required(argument, "method", "`card` or `cash`")?;
                Command::Method(parse_method(&method)?)
            }
            other => {
                let command = match other {
                    "categories" => Command::Categories,
                    "menu" | "ls" => Command::Menu,
                    "back" => Command::Back,
                    "cancel" => Command::CancelOrder,
                    "yes" | "y" => Command::Yes,
                    "no" | "n" => Command::No,
                    "checkout" => Command::Checkout,
                    "pay" => Command::Pay,
                    "done" => Command::Done,
                    "show" => Command::Show,
                    "json" => Command::Json,
                    "help" | "?" => Command::Help,
                    "quit" | "exit" | "q" => Command::Quit,
                    _ => return Err(CommandError::Unknown(word.to_string())),
                };
                if argument.is_some() {
                    return Err(CommandError::UnexpectedArgument(command.name()));
                }
                command
            }
        };

        Ok(command)
    }
}

impl Command {
    /// The canonical keyword, for messages.
    pub fn name(&self) -> &'static str {
        match self {
            Command::Categories => "categories",
            Command::Menu => "menu",
            Command::Category(_) => "category",
            Command::Product(_) => "product",
            Command::Drink(_) => "drink",
            Command::Back => "back",
            Command::CancelOrder => "cancel",
            Command::Yes => "yes",
            Command::No => "no",
            Command::Checkout => "checkout",
            Command::Method(_) => "method",
            Command::Pay => "pay",
            Command::Done => "done",
            Command::Show => "show",
            Command::Json => "json",
            Command::Help => "help",
            Command::Quit => "quit",
        }
    }
}

fn required(
    argument: Option<&str>,
    command: &'static str,
    what: &'static str,
) -> Result<String, CommandError> {
    argument
        .map(str::to_string)
        .ok_or(CommandError::MissingArgument {
            command,
            argument: what,
        })
}

fn parse_method(s: &str) -> Result<PaymentMethod, CommandError> {
    match s.to_lowercase().as_str() {
        "card" | "credit" | "debit" => Ok(PaymentMethod::Card),
        "cash" => Ok(PaymentMethod::Cash),
        _ => Err(CommandError::InvalidMethod(s.to_string())),
    }
}
