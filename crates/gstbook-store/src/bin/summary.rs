//! # Ledger Summary
//!
//! Prints the dashboard figures and every stored invoice's total.
//!
//! ## Usage
//! ```bash
//! # Platform config file and database
//! cargo run -p gstbook-store --bin gstbook-summary
//!
//! # Explicit config file
//! cargo run -p gstbook-store --bin gstbook-summary -- --config ./gstbook.toml
//!
//! # Explicit database (overrides the config file)
//! cargo run -p gstbook-store --bin gstbook-summary -- --db ./data/gstbook.db
//! ```

use std::env;
use std::path::PathBuf;

use gstbook_core::format_currency;
use gstbook_store::{AppConfig, Store};
use tracing::warn;
use tracing_subscriber::EnvFilter;

/// `RUST_LOG` wins; otherwise info, with store debug output.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,gstbook_store=debug,sqlx=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let args: Vec<String> = env::args().collect();

    let mut config_path: Option<PathBuf> = None;
    let mut db_path: Option<PathBuf> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--config" | "-c" => {
                if i + 1 < args.len() {
                    config_path = Some(PathBuf::from(&args[i + 1]));
                    i += 1;
                }
            }
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = Some(PathBuf::from(&args[i + 1]));
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("gstbook ledger summary");
                println!();
                println!("Usage: gstbook-summary [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --config <PATH>  Config file (default: platform config dir)");
                println!("  -d, --db <PATH>      Database file (overrides config)");
                println!("  -h, --help           Show this help message");
                return Ok(());
            }
            other => eprintln!("Ignoring unknown argument: {}", other),
        }
        i += 1;
    }

    let mut config = AppConfig::load(config_path)?;
    if let Some(path) = db_path {
        config.storage.database_path = Some(path);
    }

    let store = Store::new(config.store_config()).await?;
    let documents = store.documents();

    let invoices = documents.list_invoices().await?;
    let summary = documents.summary().await?;

    println!("{}", config.seller.name);
    println!("================================");
    println!(
        "Revenue:      {:>16}  ({} paid)",
        format_currency(summary.revenue),
        summary.paid_count
    );
    println!(
        "Outstanding:  {:>16}  ({} open)",
        format_currency(summary.outstanding),
        summary.outstanding_count
    );
    println!(
        "Pipeline:     {:>16}  ({} leads)",
        format_currency(summary.pipeline_value),
        summary.lead_count
    );
    println!("Invoices:     {:>16}", summary.invoice_count);

    if !invoices.is_empty() {
        println!();
    }

    for invoice in &invoices {
        let (amount, words) = match invoice.base.try_total() {
            Ok(total) => (
                format_currency(total),
                total.in_words().unwrap_or_else(|e| format!("({})", e)),
            ),
            Err(e) => {
                warn!(number = %invoice.base.number, error = %e, "Invoice total not computable");
                ("-".to_string(), format!("({})", e))
            }
        };

        println!(
            "{:<14} {:<8} {:>16}  {}",
            invoice.base.number,
            invoice.status.to_string(),
            amount,
            words
        );
    }

    store.close().await;
    Ok(())
}
