//! services/storefront/src/bin/cart.rs
//!
//! A command-line cart backed by a JSON file, for exercising the cart engine
//! outside the browser.

use ce_storefront_core::{CartEngine, CartLineItem, ItemType};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::process::ExitCode;
use storefront_lib::{adapters::JsonFileStore, config::CartConfig, init_tracing};
use tracing::error;

#[derive(Parser, Debug)]
#[command(author, version, about = "Manage a locally persisted shopping cart")]
struct Cli {
    /// Cart file; defaults to CART_FILE or cart.json.
    #[arg(long, global = true)]
    file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Add a course or package, or update the textbook choice of one already present
    Add {
        #[arg(long)]
        id: String,
        #[arg(long)]
        name: String,
        #[arg(long, value_enum, default_value_t = Kind::Course)]
        kind: Kind,
        #[arg(long, default_value = "")]
        state_slug: String,
        #[arg(long, default_value = "")]
        state_name: String,
        #[arg(long, value_parser = parse_amount)]
        price: f64,
        #[arg(long, value_parser = parse_amount, default_value_t = 0.0)]
        credit_hours: f64,
        #[arg(long)]
        with_textbook: bool,
        #[arg(long, value_parser = parse_amount, default_value_t = 0.0)]
        textbook_price: f64,
    },
    /// Remove a line item
    Remove { id: String },
    /// Flip the textbook choice of a line item
    ToggleTextbook { id: String },
    /// Empty the cart
    Clear,
    /// Print the cart and its totals
    Show {
        /// Print as JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Kind {
    Course,
    Package,
}

/// Accepts finite, non-negative amounts only.
fn parse_amount(raw: &str) -> Result<f64, String> {
    let amount: f64 = raw
        .trim()
        .parse()
        .map_err(|_| format!("'{}' is not a number", raw))?;
    if !amount.is_finite() || amount < 0.0 {
        return Err(format!("'{}' must be a finite amount of zero or more", raw));
    }
    Ok(amount)
}

impl From<Kind> for ItemType {
    fn from(kind: Kind) -> Self {
        match kind {
            Kind::Course => ItemType::Course,
            Kind::Package => ItemType::Package,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match CartConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            init_tracing(tracing::Level::INFO);
            error!("Configuration error: {}", e);
            return ExitCode::FAILURE;
        }
    };
    init_tracing(config.log_level);

    let path = cli.file.unwrap_or(config.cart_file);
    let mut cart = CartEngine::new(JsonFileStore::new(path));

    match cli.command {
        Command::Add {
            id,
            name,
            kind,
            state_slug,
            state_name,
            price,
            credit_hours,
            with_textbook,
            textbook_price,
        } => {
            let already_present = cart.is_in_cart(&id);
            cart.add_to_cart(CartLineItem {
                id: id.clone(),
                name,
                item_type: kind.into(),
                state_slug,
                state_name,
                price,
                credit_hours,
                with_textbook,
                textbook_price,
            });
            if already_present {
                println!("{} already in cart; textbook set to {}", id, with_textbook);
            } else {
                println!("Added {}", id);
            }
        }
        Command::Remove { id } => cart.remove_from_cart(&id),
        Command::ToggleTextbook { id } => cart.toggle_textbook(&id),
        Command::Clear => cart.clear_cart(),
        Command::Show { json } => {
            if json {
                let view = serde_json::json!({
                    "items": cart.items(),
                    "summary": cart.summary(),
                });
                match serde_json::to_string_pretty(&view) {
                    Ok(s) => println!("{}", s),
                    Err(e) => {
                        error!("Could not render cart: {}", e);
                        return ExitCode::FAILURE;
                    }
                }
            } else {
                print_table(&cart);
            }
        }
    }

    ExitCode::SUCCESS
}

fn print_table(cart: &CartEngine<JsonFileStore>) {
    if cart.items().is_empty() {
        println!("Cart is empty.");
        return;
    }
    for item in cart.items() {
        let textbook = if item.with_textbook { " +textbook" } else { "" };
        println!(
            "{:<20} {:<40} {:>8.2}{}",
            item.id,
            item.name,
            item.line_total(),
            textbook
        );
    }
    let summary = cart.summary();
    println!(
        "{} item(s), total {:.2}, {} credit hours",
        summary.count, summary.total, summary.credit_hours
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amounts_must_be_finite_and_non_negative() {
        assert_eq!(parse_amount("19.99"), Ok(19.99));
        assert_eq!(parse_amount("0"), Ok(0.0));
        for bad in ["NaN", "inf", "-inf", "-1", "ten"] {
            assert!(parse_amount(bad).is_err(), "{} was accepted", bad);
        }
    }

    #[test]
    fn add_rejects_a_nan_price() {
        let parsed = Cli::try_parse_from(["cart", "add", "--id", "x", "--name", "X", "--price", "NaN"]);
        assert!(parsed.is_err());

        let parsed = Cli::try_parse_from([
            "cart", "add", "--id", "x", "--name", "X", "--price", "10", "--credit-hours", "-2",
        ]);
        assert!(parsed.is_err());

        let parsed = Cli::try_parse_from(["cart", "add", "--id", "x", "--name", "X", "--price", "10"]);
        assert!(parsed.is_ok());
    }
}
