//! Genesis export → import must reproduce identical monetary state and
//! keep ticking identically afterwards.

use ember_halving::{GenesisState, HalvingEngine, HalvingParams};
use ember_ledger::InMemoryLedger;
use ember_types::{
    AccountAddress, BondStatus, ValidatorInfo, ValidatorKey, MICRO_PER_EMBR, SECONDS_PER_MONTH,
};

fn validator(byte: u8) -> ValidatorInfo {
    ValidatorInfo {
        key: ValidatorKey::new([byte; 32]),
        operator_address: AccountAddress::new(format!("embervaloper1v{byte}")),
        status: BondStatus::Bonded,
    }
}

fn run_months(engine: &mut HalvingEngine, ledger: &mut InMemoryLedger, months: i64) {
    for month in 0..months {
        engine
            .begin_block(ledger, month * SECONDS_PER_MONTH)
            .unwrap();
    }
}

#[test]
fn export_import_reproduces_state_and_records() {
    let mut engine = HalvingEngine::new(HalvingParams::default()).unwrap();
    let mut ledger = InMemoryLedger::new("uembr", 85_000_000 * MICRO_PER_EMBR);
    ledger.set_validators(vec![validator(1), validator(2)]);
    run_months(&mut engine, &mut ledger, 3);

    let exported = engine.export_genesis();
    let json = serde_json::to_string(&exported).unwrap();
    let parsed: GenesisState = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, exported);

    let restored = HalvingEngine::from_genesis(parsed).unwrap();
    assert_eq!(restored.export_genesis(), exported);
    assert_eq!(restored.state(), engine.state());
    assert_eq!(restored.total_distributed(), engine.total_distributed());
}

#[test]
fn restored_engine_continues_the_same_schedule() {
    let mut engine = HalvingEngine::new(HalvingParams::default()).unwrap();
    let mut ledger = InMemoryLedger::new("uembr", 85_000_000 * MICRO_PER_EMBR);
    ledger.set_validators(vec![validator(1), validator(2)]);
    run_months(&mut engine, &mut ledger, 3);

    let mut restored = HalvingEngine::from_genesis(engine.export_genesis()).unwrap();
    let mut restored_ledger = ledger.clone();

    let next = engine.begin_block(&mut ledger, 3 * SECONDS_PER_MONTH).unwrap();
    let replayed = restored
        .begin_block(&mut restored_ledger, 3 * SECONDS_PER_MONTH)
        .unwrap();

    assert_eq!(next, replayed);
    assert_eq!(restored.state(), engine.state());
}

#[test]
fn fresh_genesis_round_trips_before_first_tick() {
    let engine = HalvingEngine::new(HalvingParams::default()).unwrap();
    let exported = engine.export_genesis();
    assert!(exported.cycle_state.is_none());
    assert!(exported.distribution_records.is_empty());

    let json = serde_json::to_string(&exported).unwrap();
    let parsed: GenesisState = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, exported);
}

#[test]
fn import_rejects_corrupted_state() {
    let mut engine = HalvingEngine::new(HalvingParams::default()).unwrap();
    let mut ledger = InMemoryLedger::new("uembr", 85_000_000 * MICRO_PER_EMBR);
    run_months(&mut engine, &mut ledger, 1);

    let mut genesis = engine.export_genesis();
    let state = genesis.cycle_state.as_mut().unwrap();
    state.distributed_in_cycle = state.halving_fund + 1;

    assert!(HalvingEngine::from_genesis(genesis).is_err());
}
