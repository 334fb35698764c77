//! Command-line front end for the crypto dashboard.
//!
//! Wiring:
//! 1. Parse arguments
//! 2. Load settings (optional TOML file + `CRYPTO_DASHBOARD_*` env)
//! 3. Init tracing on stderr (`RUST_LOG` wins over the configured level)
//! 4. Build the store over a file slot and the CoinGecko feed
//! 5. Run one command and print the result

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{error, info};

use crypto_dashboard_core::models::market::MarketCoin;
use crypto_dashboard_core::models::portfolio::Portfolio;
use crypto_dashboard_core::models::settings::{normalize_currency, Settings};
use crypto_dashboard_core::models::valuation::ValuationReport;
use crypto_dashboard_core::providers::coingecko::CoinGeckoProvider;
use crypto_dashboard_core::providers::traits::PriceFeed;
use crypto_dashboard_core::storage::file::FilePersistence;
use crypto_dashboard_core::PortfolioStore;

#[derive(Debug, Parser)]
#[command(name = "crypto-dashboard", version, about = "Track a crypto portfolio against live prices")]
struct Cli {
    /// Path to a TOML settings file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Show stored holdings
    List,
    /// Record a buy, merging into an existing holding
    Add {
        /// Asset id as used by CoinGecko (e.g. bitcoin)
        id: String,
        /// Display name (e.g. Bitcoin)
        name: String,
        /// Quantity bought
        amount: f64,
        /// Price paid per unit; omit if unknown
        #[arg(long)]
        price: Option<f64>,
    },
    /// Delete a holding
    Remove {
        id: String,
    },
    /// Value holdings at current market prices
    Value {
        /// Quote currency (defaults to the configured one)
        #[arg(long)]
        currency: Option<String>,
    },
    /// List the top coins by market cap
    Markets {
        #[arg(long, default_value_t = 50)]
        per_page: u32,
        #[arg(long)]
        currency: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let settings = Settings::load(cli.config.as_deref()).context("Failed to load settings")?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&settings.log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    info!(version = env!("CARGO_PKG_VERSION"), "Starting crypto dashboard");

    if let Err(e) = run(cli, &settings).await {
        error!(error = %e, "Command failed");
        return Err(e);
    }
    Ok(())
}

async fn run(cli: Cli, settings: &Settings) -> Result<()> {
    let store = PortfolioStore::new(FilePersistence::new(&settings.data_dir, &settings.storage_key));
    let feed = CoinGeckoProvider::with_base_url(&settings.api_base_url, settings.api_key.clone());

    match cli.command {
        Command::List => print_portfolio(&store.load(), cli.json)?,
        Command::Add { id, name, amount, price } => {
            let portfolio = store
                .upsert(&id, &name, amount, price)
                .with_context(|| format!("Could not add {amount} {id}"))?;
            print_portfolio(&portfolio, cli.json)?;
        }
        Command::Remove { id } => {
            let portfolio = store
                .remove(&id)
                .with_context(|| format!("Could not remove {id}"))?;
            print_portfolio(&portfolio, cli.json)?;
        }
        Command::Value { currency } => {
            let currency = quote_currency(currency, settings)?;
            let report = store.refresh_valuation(&feed, &currency).await;
            print_report(&report, &currency, cli.json)?;
        }
        Command::Markets { per_page, currency } => {
            let currency = quote_currency(currency, settings)?;
            let coins = feed
                .get_top_markets(&currency, per_page)
                .await
                .context("Failed to fetch markets")?;
            print_markets(&coins, &currency, cli.json)?;
        }
    }
    Ok(())
}

fn quote_currency(requested: Option<String>, settings: &Settings) -> Result<String> {
    match requested {
        Some(c) => Ok(normalize_currency(&c)?),
        None => Ok(settings.vs_currency.clone()),
    }
}

fn print_portfolio(portfolio: &Portfolio, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(portfolio)?);
        return Ok(());
    }
    if portfolio.is_empty() {
        println!("Portfolio is empty");
        return Ok(());
    }
    for h in portfolio.iter() {
        let cost = h
            .cost_basis
            .map(|c| format!("{c:.2}"))
            .unwrap_or_else(|| "-".to_string());
        println!("{:<20} {:<20} {:>16} {:>14}", h.id, h.name, h.amount, cost);
    }
    Ok(())
}

fn print_report(report: &ValuationReport, currency: &str, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }
    let ccy = currency.to_uppercase();
    for row in &report.holdings {
        println!(
            "{:<20} {:>16} {:>14.2} {ccy} {:>+8.2}% ({:.2} {ccy})",
            row.name,
            row.amount,
            row.current_value,
            row.profit_loss_percent,
            row.profit_loss.abs(),
        );
    }
    println!(
        "Total: {:.2} {ccy}  {:+.2}%  coins: {}",
        report.total_value, report.total_profit_loss_percent, report.count
    );
    Ok(())
}

fn print_markets(coins: &[MarketCoin], currency: &str, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(coins)?);
        return Ok(());
    }
    let ccy = currency.to_uppercase();
    for coin in coins {
        let rank = coin.market_cap_rank.map(|r| r.to_string()).unwrap_or_default();
        let price = coin.current_price.unwrap_or(0.0);
        let change = coin.price_change_percentage_24h.unwrap_or(0.0);
        println!(
            "{rank:>4} {:<24} {:<8} {price:>14.2} {ccy} {change:>+7.2}%",
            coin.name,
            coin.symbol.to_uppercase(),
        );
    }
    Ok(())
}
