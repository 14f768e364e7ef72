//! Backfill sweep behavior against an in-memory store

use veritor_backfill::{Backfill, BackfillConfig};
use veritor_domain::{AuthorityLevel, Claim, ClaimStore, TruthRegime};
use veritor_ordering::{OrderingConfidence, OrderingStore};
use veritor_store::MemoryStore;

fn claim(capability: &str, axis: &str, value: &str) -> Claim {
    Claim::new(
        capability,
        format!("{capability} is supported"),
        format!("{capability} is supported here"),
        format!("doc-{value}"),
        AuthorityLevel::Medium,
        TruthRegime::NormativeStrict,
        1_700_000_000,
    )
    .with_axis(axis, value)
}

#[test]
fn test_sweep_writes_orderable_axes_and_abstains_on_others() {
    let mut store = MemoryStore::new();
    store.insert_claim(claim("Feature X", "release_id", "2022")).unwrap();
    store.insert_claim(claim("Feature X", "release_id", "2021")).unwrap();
    store.insert_claim(claim("Feature X", "color", "red")).unwrap();
    store.insert_claim(claim("Feature X", "color", "blue")).unwrap();

    let mut backfill = Backfill::default_config();
    let run = backfill.run(&mut store).unwrap();

    assert_eq!(run.axes_scanned, 2);
    assert_eq!(run.orderings_written, 1);
    assert_eq!(run.abstentions, 1);
    assert_eq!(run.total_failures(), 0);

    let stored = store.stored_ordering("release_id").unwrap().unwrap();
    assert_eq!(stored.values, vec!["2021".to_string(), "2022".to_string()]);
    assert_eq!(stored.confidence, OrderingConfidence::Certain);
    assert!(store.stored_ordering("color").unwrap().is_none());
}

#[test]
fn test_rerun_is_idempotent() {
    let mut store = MemoryStore::new();
    store.insert_claim(claim("Feature X", "release_id", "2021")).unwrap();
    store.insert_claim(claim("Feature X", "release_id", "2022")).unwrap();

    let mut backfill = Backfill::default_config();
    let first = backfill.run(&mut store).unwrap();
    assert_eq!(first.orderings_written, 1);

    let second = backfill.run(&mut store).unwrap();
    assert_eq!(second.orderings_written, 0);
    assert_eq!(second.unchanged, 1);
}

#[test]
fn test_stale_ordering_is_recomputed_when_values_grow() {
    let mut store = MemoryStore::new();
    store.insert_claim(claim("Feature X", "release_id", "2021")).unwrap();
    store.insert_claim(claim("Feature X", "release_id", "2022")).unwrap();

    let mut backfill = Backfill::default_config();
    backfill.run(&mut store).unwrap();

    store.insert_claim(claim("Feature X", "release_id", "2023")).unwrap();
    let run = backfill.run(&mut store).unwrap();

    assert_eq!(run.orderings_written, 1);
    let stored = store.stored_ordering("release_id").unwrap().unwrap();
    assert_eq!(stored.values.len(), 3);
}

#[test]
fn test_dry_run_writes_nothing() {
    let mut store = MemoryStore::new();
    store.insert_claim(claim("Feature X", "release_id", "2021")).unwrap();
    store.insert_claim(claim("Feature X", "release_id", "2022")).unwrap();

    let config = BackfillConfig {
        dry_run: true,
        ..BackfillConfig::default()
    };
    let mut backfill = Backfill::new(config);
    let run = backfill.run(&mut store).unwrap();

    assert_eq!(run.orderings_written, 0);
    assert!(store.stored_ordering("release_id").unwrap().is_none());
}

#[test]
fn test_store_listing_failure_aborts_the_run() {
    let mut store = MemoryStore::new();
    store.insert_claim(claim("Feature X", "release_id", "2021")).unwrap();
    store.fail_with("store offline");

    let mut backfill = Backfill::default_config();
    assert!(backfill.run(&mut store).is_err());
}

#[test]
fn test_cumulative_metrics_accumulate() {
    let mut store = MemoryStore::new();
    store.insert_claim(claim("Feature X", "release_id", "2021")).unwrap();
    store.insert_claim(claim("Feature X", "release_id", "2022")).unwrap();

    let mut backfill = Backfill::default_config();
    backfill.run(&mut store).unwrap();
    backfill.run(&mut store).unwrap();

    let metrics = backfill.metrics();
    assert_eq!(metrics.sweep_count, 2);
    assert_eq!(metrics.axes_scanned, 2);
    assert_eq!(metrics.orderings_written, 1);
    assert_eq!(metrics.unchanged, 1);
}
