//! view-runner: headless runner for the txnview pipeline.
//!
//! Usage:
//!   view-runner --base-url http://localhost:3000
//!   view-runner --config sources.json --name ann --amount 50 --customer 1

use anyhow::Result;
use std::env;
use txnview_core::{config::SourceConfig, source::SourceClient, view::ViewState};

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let base_url = str_arg(&args, "--base-url");
    let config_path = str_arg(&args, "--config");
    let name_query = str_arg(&args, "--name").unwrap_or_default();
    let amount_query = str_arg(&args, "--amount").unwrap_or_default();
    let customer: Option<i64> = str_arg(&args, "--customer").and_then(|s| s.parse().ok());

    let config = match (config_path, base_url) {
        (Some(path), _) => SourceConfig::load(&path)?,
        (None, Some(base)) => SourceConfig::from_base_url(&base),
        (None, None) => SourceConfig::default_test(),
    };

    println!("txnview — view-runner");
    println!("  customers:    {}", config.customers_url);
    println!("  transactions: {}", config.transactions_url);
    println!("  name query:   {name_query:?}");
    println!("  amount query: {amount_query:?}");
    println!();

    // The pipeline is single-threaded and cooperative; a current-thread
    // runtime is all the two joint fetches need.
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    let client = SourceClient::new(config)?;
    let snapshot = match runtime.block_on(client.fetch_snapshot()) {
        Ok(snapshot) => snapshot,
        Err(e) => {
            log::error!("snapshot fetch failed: {e}");
            return Err(e.into());
        }
    };

    let mut state = ViewState::new();
    state.install_snapshot(snapshot);
    state.set_name_query(&name_query);
    state.set_amount_query(&amount_query);
    state.select_customer(customer);

    print_listing(&state);
    if customer.is_some() {
        print_daily(&state);
    }

    Ok(())
}

fn print_listing(state: &ViewState) {
    println!(
        "{:>8}  {:<24}  {:>8}  {:<12}  {:>10}",
        "Cust ID", "Name", "Txn ID", "Date", "Amount"
    );
    let mut rows = 0usize;
    for jc in state.filtered() {
        for txn in &jc.transactions {
            println!(
                "{:>8}  {:<24}  {:>8}  {:<12}  {:>10.2}",
                jc.customer.id, jc.customer.name, txn.id, txn.date, txn.amount
            );
            rows += 1;
        }
    }
    println!();
    println!("  {rows} transaction rows across {} customers", state.filtered().len());
}

fn print_daily(state: &ViewState) {
    println!();
    match state.selected() {
        Some(id) => println!("=== DAILY TOTALS (customer {id}) ==="),
        None => return,
    }
    if state.daily().is_empty() {
        println!("  (no transactions under current filters)");
        return;
    }
    for agg in state.daily() {
        println!("  {}  {:>10.2}", agg.label(), agg.total);
    }
}

fn str_arg(args: &[String], flag: &str) -> Option<String> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].clone())
}
