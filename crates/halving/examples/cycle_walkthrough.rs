//! Drives the halving engine over a simulated six-year daily block clock.
//!
//! Run with `cargo run --example cycle_walkthrough` (set `RUST_LOG=debug`
//! for per-block detail).

use ember_halving::{HalvingEngine, HalvingParams, PageRequest};
use ember_ledger::{InMemoryLedger, Ledger};
use ember_types::{
    AccountAddress, BondStatus, ValidatorInfo, ValidatorKey, MICRO_PER_EMBR, SECONDS_PER_DAY,
};
use tracing_subscriber::EnvFilter;

fn validator(byte: u8) -> ValidatorInfo {
    ValidatorInfo {
        key: ValidatorKey::new([byte; 32]),
        operator_address: AccountAddress::new(format!("embervaloper1v{byte}")),
        status: BondStatus::Bonded,
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut ledger = InMemoryLedger::new("uembr", 85_000_000 * MICRO_PER_EMBR);
    ledger.set_validators(vec![validator(1), validator(2), validator(3)]);
    let mut engine = HalvingEngine::new(HalvingParams::default())?;

    let start: i64 = 1_735_689_600; // 2025-01-01T00:00:00Z
    let days = 6 * 365;
    for day in 0..=days {
        engine.begin_block(&mut ledger, start + day * SECONDS_PER_DAY)?;
    }

    let now = start + days * SECONDS_PER_DAY;
    let status = engine
        .cycle_status(now)
        .ok_or_else(|| anyhow::anyhow!("engine never initialized"))?;
    println!();
    println!(
        "after {} years: cycle {} ({}), distributed {} of {} uembr",
        days / 365,
        status.cycle_number,
        status.phase,
        status.distributed_in_cycle,
        status.halving_fund
    );
    println!(
        "circulating supply: {} uembr, module account: {} uembr",
        ledger.total_supply("uembr")?,
        ledger.module_balance()
    );

    println!();
    println!("distribution history:");
    let page = engine.distribution_history(&PageRequest::default());
    for record in &page.records {
        println!(
            "  {}  cycle {} month {:2}  {} uembr",
            record
                .timestamp_utc()
                .map(|t| t.to_rfc3339())
                .unwrap_or_default(),
            record.cycle_number,
            record.month_in_cycle,
            record.amount
        );
    }

    Ok(())
}
