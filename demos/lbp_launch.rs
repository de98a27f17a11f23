//! Liquidity bootstrapping launch example.
//!
//! A project lists 80 000 000 NEW against 20 000 000 USDC with weights
//! sliding from 99/1 to 61/39 over 1 000 seconds.  Buyers arrive at
//! several points of the sale and the price of NEW decays as its weight
//! falls.  Every pool event is logged through `tracing`.
//!
//! # Run
//!
//! ```bash
//! RUST_LOG=debug cargo run --example lbp_launch
//! ```

use std::sync::Arc;

use hydra_weighted::prelude::*;
use tracing_subscriber::EnvFilter;

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    println!("=== Liquidity Bootstrapping Pool ===\n");

    // ── 1. Accounts and assets ─────────────────────────────────────────
    let project = Address::from_bytes([1u8; 32]);
    let buyer = Address::from_bytes([2u8; 32]);
    let new = AssetType::new("NEW");
    let usdc = AssetType::new("USDC");

    let mut ledger = InMemoryLedger::new();
    ledger.credit(&project, &new, Amount::new(80_000_000))?;
    ledger.credit(&project, &usdc, Amount::new(20_000_000))?;
    ledger.credit(&buyer, &usdc, Amount::new(3_000_000))?;

    // ── 2. Configure the sale ──────────────────────────────────────────
    let start = Timestamp::from_secs(2_000);
    let end = Timestamp::from_secs(3_000);
    let schedule = WeightSchedule::new(
        WeightPoint::new(Weights::from_ratios(99, 1, 100)?, start),
        WeightPoint::new(Weights::from_ratios(61, 39, 100)?, end),
    )?;
    let key = PairKey::new(new.clone(), usdc.clone(), AssetType::new("NEW-USDC-LP"))?;
    let config = PairConfig::new(
        key.clone(),
        schedule,
        FeeRate::from_ratio(1, 100)?,
        Amount::new(80_000_000),
        Amount::new(20_000_000),
    )?;

    println!("Pair:      {key}");
    println!("Weights:   {} -> {}", schedule.before().weights(), schedule.after().weights());
    println!("Window:    {start} .. {end}");

    // ── 3. Create the pair before the window opens ─────────────────────
    let clock = Arc::new(ManualClock::new(Timestamp::from_secs(1_500)));
    let mut exchange = Exchange::new(project, ledger, Arc::clone(&clock), TracingSink);
    let shares = exchange.create_pair(&project, config)?;
    println!("\nPair created, {shares} shares minted to the project");

    match exchange.swap(&buyer, &key, Amount::new(10_000), Side::B, Amount::ZERO) {
        Err(AmmError::LbpNotStarted) => println!("Early buy rejected: sale has not started"),
        other => println!("Unexpected early buy result: {other:?}"),
    }

    // ── 4. Buy through the sale ────────────────────────────────────────
    println!("\n{:>6}  {:>14}  {:>16}  {:>10}", "t", "weights", "USDC per NEW", "NEW out");
    for secs in [2_000u64, 2_250, 2_500, 2_750, 3_000] {
        clock.set(Timestamp::from_secs(secs));
        let weights = exchange.current_weights(&key)?;
        let price = exchange.spot_price(&key, Side::B)?;
        let out = exchange.swap(&buyer, &key, Amount::new(500_000), Side::B, Amount::ZERO)?;
        println!(
            "{secs:>6}  {:>14}  {:>16}  {:>10}",
            weights.to_string(),
            price.to_string(),
            out.return_amount().to_string()
        );
    }

    // ── 5. Close the sale and settle ───────────────────────────────────
    clock.set(Timestamp::from_secs(3_100));
    let fixed = WeightSchedule::fixed(Weights::from_ratios(50, 50, 100)?);
    exchange.update_weight_schedule(&project, &key, fixed)?;

    let info = exchange.pair_info(&key)?;
    println!("\n--- After the sale ---");
    println!("  NEW balance:   {}", info.balance_a());
    println!("  USDC balance:  {}", info.balance_b());
    println!("  Buyer NEW:     {}", exchange.ledger().balance(&buyer, &new));
    println!("  Buyer USDC:    {}", exchange.ledger().balance(&buyer, &usdc));

    let exit = exchange.withdraw(&project, &key, shares, Amount::ZERO, Amount::ZERO)?;
    println!("\n--- Project exits ---");
    println!("  {exit}");

    println!("\n=== Done ===");
    Ok(())
}
